//! # Ice Cream Facade
//!
//! The rules that sit between the HTTP handlers and the record store:
//! selector merging for listings, name uniqueness on writes, path/body id
//! agreement on replace, and partial merges on patch.
//!
//! Every store call is bounded by a timeout; expiry is reported as
//! [`StoreError::Unavailable`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::errors::{RestError, RestResult};
use super::response::CreateOutcome;
use super::selector::Selectors;
use crate::model::{
    CreateIceCreamParams, IceCream, IceCreamFields, PatchIceCreamParams, ReplaceIceCreamParams,
};
use crate::store::{InsertOutcome, RecordStore, StoreError, StoreResult, UpdateOutcome};

/// Business operations over an injected record store
pub struct IceCreamFacade {
    store: Arc<dyn RecordStore>,
    store_timeout: Duration,
}

impl IceCreamFacade {
    pub fn new(store: Arc<dyn RecordStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Run one store call under the configured timeout.
    async fn call<T, F>(&self, op: &'static str, fut: F) -> RestResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(RestError::Store(StoreError::Unavailable(format!(
                "{} timed out after {}ms",
                op,
                self.store_timeout.as_millis()
            )))),
        }
    }

    /// Products matching the `id` and `name` selectors (their union), or
    /// every product when neither selector is present.
    pub async fn list(&self, selectors: &Selectors) -> RestResult<Vec<IceCream>> {
        if selectors.is_unfiltered() {
            return self.call("fetch_all", self.store.fetch_all()).await;
        }

        let mut merged: BTreeMap<i64, IceCream> = BTreeMap::new();

        if let Some(ids) = selectors.ids() {
            let found = self.call("fetch_by_ids", self.store.fetch_by_ids(ids)).await?;
            merged.extend(found.into_iter().map(|p| (p.id, p)));
        }

        if let Some(names) = selectors.names() {
            let found = self
                .call("fetch_by_names", self.store.fetch_by_names(names))
                .await?;
            merged.extend(found.into_iter().map(|p| (p.id, p)));
        }

        debug!(matched = merged.len(), "listed ice creams");
        Ok(merged.into_values().collect())
    }

    /// The product at `id`
    pub async fn get(&self, id: i64) -> RestResult<IceCream> {
        let ids = [id.to_string()];
        let found = self.call("fetch_by_ids", self.store.fetch_by_ids(&ids)).await?;
        found
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(RestError::NotFound(id))
    }

    /// Create a product, or return the identical one that already exists.
    ///
    /// The store checks the name and inserts under one lock, so repeated
    /// concurrent creates yield a single row.
    pub async fn create(&self, params: CreateIceCreamParams) -> RestResult<CreateOutcome> {
        let fields = params.into_fields();
        fields.validate()?;

        match self.call("insert", self.store.insert(fields)).await? {
            InsertOutcome::Inserted(created) => {
                info!(id = created.id, name = %created.name, "created ice cream");
                Ok(CreateOutcome::Created(created))
            }
            InsertOutcome::Identical(current) => {
                debug!(id = current.id, name = %current.name, "create repeated, returning existing");
                Ok(CreateOutcome::AlreadyExists(current))
            }
            InsertOutcome::NameTaken(holder) => Err(RestError::DuplicateRecord(holder.name)),
        }
    }

    /// Overwrite name, price, quantity and description of the product at
    /// `id`. The display flag is kept.
    pub async fn replace(&self, id: i64, params: ReplaceIceCreamParams) -> RestResult<IceCream> {
        if params.id != id {
            return Err(RestError::IdMismatch {
                path_id: id,
                body_id: params.id,
            });
        }
        params.validate()?;

        // A conflict is reported ahead of a missing target.
        self.ensure_name_free(&params.name, id).await?;

        let current = self.get(id).await?;
        let fields = params.replace(&current);

        let updated = self.write(id, &fields).await?;
        info!(id, name = %updated.name, "replaced ice cream");
        Ok(updated)
    }

    /// Change only the supplied fields of the product at `id`.
    pub async fn patch(&self, id: i64, params: PatchIceCreamParams) -> RestResult<IceCream> {
        if let Some(name) = &params.name {
            self.ensure_name_free(name, id).await?;
        }

        let current = self.get(id).await?;
        let fields = params.apply(&current);
        fields.validate()?;

        let updated = self.write(id, &fields).await?;
        info!(id, name = %updated.name, "patched ice cream");
        Ok(updated)
    }

    /// Persist `fields` at `id`; the store re-checks the name under its lock.
    async fn write(&self, id: i64, fields: &IceCreamFields) -> RestResult<IceCream> {
        match self.call("update", self.store.update(id, fields)).await? {
            UpdateOutcome::Updated(updated) => Ok(updated),
            UpdateOutcome::Missing => Err(RestError::NotFound(id)),
            UpdateOutcome::NameTaken(holder) => Err(RestError::NameConflict(holder.name)),
        }
    }

    /// Remove the product at `id`
    pub async fn delete(&self, id: i64) -> RestResult<()> {
        if !self.call("delete", self.store.delete(id)).await? {
            return Err(RestError::NotFound(id));
        }
        info!(id, "deleted ice cream");
        Ok(())
    }

    /// Fail with a name conflict if a product other than `id` holds `name`.
    async fn ensure_name_free(&self, name: &str, id: i64) -> RestResult<()> {
        let names = [name.to_string()];
        let holders = self
            .call("fetch_by_names", self.store.fetch_by_names(&names))
            .await?;

        if holders.iter().any(|p| p.id != id) {
            return Err(RestError::NameConflict(name.to_string()));
        }
        Ok(())
    }
}
