use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub page: i64,
    pub per_page: i64,
    pub filters: ProductFilters,
}

/// Fields submitted by the admin create/update forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "product name is required".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::InvalidInput(
                "product price cannot be negative".to_string(),
            ));
        }
        if self.stock < 0 {
            return Err(DomainError::InvalidInput(
                "product stock cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Page navigation derived from a listing's `total` and `per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Returns `None` when everything fits on a single page.
    pub fn new(total: i64, per_page: i64, current: i64) -> Option<Self> {
        if per_page <= 0 {
            return None;
        }
        let total_pages = (total + per_page - 1) / per_page;
        if total_pages <= 1 {
            return None;
        }
        Some(Self {
            current,
            total_pages,
        })
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}
