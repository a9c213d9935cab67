//! # Record Store
//!
//! Persistence for the ice cream table behind a narrow async interface.
//!
//! Two implementations ship with the crate:
//!
//! - [`PgStore`] - Postgres via `sqlx`
//! - [`InMemoryStore`] - a locked map, used by tests and `serve --in-memory`
//!
//! Both assign ids as `max(id) + 1` and check name uniqueness while holding
//! an exclusive lock, so concurrent writers never share an id or a name.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{IceCream, IceCreamFields};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failures. Both variants surface to callers as internal errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend could not be reached in time
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with an error
    #[error("store error: {0}")]
    Backend(String),
}

/// What `insert` did. The name check and the insert happen under one lock.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// Stored with a freshly assigned id
    Inserted(IceCream),

    /// A product with this name and the same fields already exists
    Identical(IceCream),

    /// A product with this name but different fields already exists
    NameTaken(IceCream),
}

/// What `update` did
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(IceCream),

    /// No product at the id
    Missing,

    /// Another product holds the requested name; nothing was written
    NameTaken(IceCream),
}

/// Persistence operations the request handlers rely on.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every product
    async fn fetch_all(&self) -> StoreResult<Vec<IceCream>>;

    /// Products whose id is in `ids`. Values that are not integers are ignored.
    async fn fetch_by_ids(&self, ids: &[String]) -> StoreResult<Vec<IceCream>>;

    /// Products whose name is in `names` (exact match)
    async fn fetch_by_names(&self, names: &[String]) -> StoreResult<Vec<IceCream>>;

    /// Persist a new product unless its name is already taken.
    async fn insert(&self, fields: IceCreamFields) -> StoreResult<InsertOutcome>;

    /// Overwrite the product at `id` unless another product holds the new name.
    async fn update(&self, id: i64, fields: &IceCreamFields) -> StoreResult<UpdateOutcome>;

    /// Remove the product at `id`. `false` if it did not exist.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Coerce loosely typed id selectors, dropping anything unparsable.
pub(crate) fn parse_ids(ids: &[String]) -> Vec<i64> {
    ids.iter()
        .filter_map(|raw| raw.trim().parse::<i64>().ok())
        .collect()
}
