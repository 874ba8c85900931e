use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::order::OrderStatus;
use crate::domain::product::{ProductDraft, ProductFilters};

#[derive(Debug, Parser)]
#[command(name = "shop-client", version, about = "Command-line client for the shop services")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog products
    Products(ListArgs),
    /// Show a single product
    Product { id: String },
    /// Inspect or change the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for everything in the cart
    Checkout {
        #[arg(long)]
        user_id: Option<String>,
    },
    /// List a user's orders
    Orders {
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Show a single order
    Order { id: String },
    /// Complete or cancel a pending order
    OrderStatus { id: String, status: StatusArg },
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Register {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Profile,
    Logout,
    /// Product administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
}

impl ListArgs {
    pub fn filters(&self) -> ProductFilters {
        ProductFilters {
            name: self.name.clone().filter(|n| !n.trim().is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    Show,
    Add { id: String },
    Inc { id: String },
    Dec { id: String },
    Remove { id: String },
    Clear,
}

#[derive(Debug, Clone, Args)]
pub struct DraftArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub stock: i32,
}

impl From<DraftArgs> for ProductDraft {
    fn from(args: DraftArgs) -> Self {
        ProductDraft {
            name: args.name,
            price: args.price,
            stock: args.stock,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    List(ListArgs),
    Create(DraftArgs),
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Completed,
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Completed => OrderStatus::Completed,
            StatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_admin_update() {
        let cli = Cli::try_parse_from([
            "shop-client",
            "admin",
            "update",
            "p1",
            "--name",
            "Tea",
            "--price",
            "2.5",
            "--stock",
            "4",
        ])
        .unwrap();
        match cli.command {
            Command::Admin {
                action: AdminAction::Update { id, draft },
            } => {
                assert_eq!(id, "p1");
                assert_eq!(ProductDraft::from(draft).stock, 4);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_order_status() {
        let cli = Cli::try_parse_from(["shop-client", "order-status", "o1", "cancelled"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::OrderStatus {
                status: StatusArg::Cancelled,
                ..
            }
        ));
    }

    #[test]
    fn blank_name_filter_is_dropped() {
        let args = ListArgs {
            page: 1,
            name: Some("  ".to_string()),
            min_price: Some(1.0),
            max_price: None,
        };
        let filters = args.filters();
        assert_eq!(filters.name, None);
        assert_eq!(filters.min_price, Some(1.0));
    }
}
