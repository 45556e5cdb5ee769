pub mod filter;
pub mod selection;

use chrono::{DateTime, Utc};

pub use self::filter::{ContactFilter, CountryFilter, FlagFilter};
pub use self::selection::Selection;

/// A row of the contact list. Owned by the contact store, never written here.
#[derive(Debug, Clone, PartialEq, serde::Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub subscribed_newsletters: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
