pub mod admin_page;
pub mod cart_store;
pub mod login_page;
pub mod navigation;
pub mod profile_page;
pub mod register_page;
pub mod session_store;
pub mod shop_page;

pub use admin_page::AdminPage;
pub use login_page::LoginPage;
pub use navigation::{Outcome, Route};
pub use profile_page::{Profile, ProfilePage};
pub use register_page::{RegisterPage, RegistrationForm};
pub use shop_page::{Checkout, ShopPage};
