//! In-memory record store.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{parse_ids, InsertOutcome, RecordStore, StoreResult, UpdateOutcome};
use crate::model::{IceCream, IceCreamFields};

/// Products kept in a map keyed by id.
///
/// The write lock is held across the name check, "read max id" and the
/// write itself, so concurrent writers never share an id or a name.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<BTreeMap<i64, IceCream>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products` as-is (ids included)
    pub fn with_products(products: impl IntoIterator<Item = IceCream>) -> Self {
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: RwLock::new(products),
        }
    }

    /// Create a store holding the five sample flavours
    pub fn with_sample_data() -> Self {
        Self::with_products(sample_products())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<IceCream>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn fetch_by_ids(&self, ids: &[String]) -> StoreResult<Vec<IceCream>> {
        let wanted: HashSet<i64> = parse_ids(ids).into_iter().collect();
        let products = self.products.read().await;
        Ok(wanted
            .iter()
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }

    async fn fetch_by_names(&self, names: &[String]) -> StoreResult<Vec<IceCream>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| names.iter().any(|n| *n == p.name))
            .cloned()
            .collect())
    }

    async fn insert(&self, fields: IceCreamFields) -> StoreResult<InsertOutcome> {
        let mut products = self.products.write().await;

        if let Some(existing) = products.values().find(|p| p.name == fields.name) {
            let existing = existing.clone();
            return Ok(if existing.matches(&fields) {
                InsertOutcome::Identical(existing)
            } else {
                InsertOutcome::NameTaken(existing)
            });
        }

        let last_id = products.keys().next_back().copied().unwrap_or(0);
        let product = fields.with_id(last_id + 1);
        products.insert(product.id, product.clone());
        Ok(InsertOutcome::Inserted(product))
    }

    async fn update(&self, id: i64, fields: &IceCreamFields) -> StoreResult<UpdateOutcome> {
        let mut products = self.products.write().await;

        if let Some(holder) = products
            .values()
            .find(|p| p.id != id && p.name == fields.name)
        {
            return Ok(UpdateOutcome::NameTaken(holder.clone()));
        }

        Ok(match products.get_mut(&id) {
            Some(existing) => {
                *existing = fields.clone().with_id(id);
                UpdateOutcome::Updated(existing.clone())
            }
            None => UpdateOutcome::Missing,
        })
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

fn sample_products() -> Vec<IceCream> {
    let sample = |id: i64, name: &str, price: f64, quantity: i64, on_display: bool, desc: &str| {
        IceCream {
            id,
            name: name.to_string(),
            price,
            quantity,
            on_display,
            description: desc.to_string(),
        }
    };

    vec![
        sample(
            1,
            "vanilla",
            3.1,
            100,
            true,
            "Vanilla Bean Ice Cream: Speck-tacular Flavor!",
        ),
        sample(
            2,
            "Blue Moon",
            2.0,
            20,
            true,
            "an ice cream flavor with bright blue coloring",
        ),
        sample(
            3,
            "Mint chocolate chip",
            3.2,
            110,
            true,
            "composed of mint ice cream with small chocolate chips",
        ),
        sample(
            4,
            "Raspberry Ripple",
            4.2,
            150,
            true,
            "consists of raspberry syrup injected into vanilla",
        ),
        sample(
            5,
            "Strawberry Cheesecake",
            1.9,
            140,
            false,
            "filled with strawberry cheesecake & graham-cracker swirl",
        ),
    ]
}
