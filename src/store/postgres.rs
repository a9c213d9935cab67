//! Postgres-backed record store.
//!
//! Works against an existing `public."Icecream"` table. Column types are
//! coerced on read: `Price` may be `money` or text with a `$` prefix,
//! `OnDisplay` may be a boolean or a `Y`/`N` style flag, and a NULL
//! `Description` reads back as the placeholder.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};

use super::{parse_ids, InsertOutcome, RecordStore, StoreError, StoreResult, UpdateOutcome};
use crate::config::DatabaseConfig;
use crate::model::{normalize_description, IceCream, IceCreamFields};

const MIN_CONNECTIONS: u32 = 2;
const MAX_CONNECTIONS: u32 = 15;

macro_rules! columns {
    () => {
        r#""ID"::bigint AS id, "Name" AS name, "Price"::text AS price, "Quantity"::bigint AS quantity, "OnDisplay"::text AS on_display, "Description" AS description"#
    };
}

const SELECT_ALL: &str = concat!("SELECT ", columns!(), r#" FROM public."Icecream""#);

const SELECT_BY_IDS: &str = concat!(
    "SELECT ",
    columns!(),
    r#" FROM public."Icecream" WHERE "ID" = ANY($1)"#
);

const SELECT_BY_NAMES: &str = concat!(
    "SELECT ",
    columns!(),
    r#" FROM public."Icecream" WHERE "Name" = ANY($1)"#
);

const SELECT_NAME_HOLDER: &str = concat!(
    "SELECT ",
    columns!(),
    r#" FROM public."Icecream" WHERE "Name" = $1 AND "ID" <> $2 ORDER BY "ID" LIMIT 1"#
);

const LOCK_TABLE: &str = r#"LOCK TABLE public."Icecream" IN EXCLUSIVE MODE"#;

const INSERT: &str = concat!(
    r#"INSERT INTO public."Icecream" ("ID", "Name", "Price", "Quantity", "OnDisplay", "Description") "#,
    "VALUES ($1, $2, $3::numeric, $4, $5, $6) RETURNING ",
    columns!()
);

const UPDATE: &str = concat!(
    r#"UPDATE public."Icecream" SET "Name" = $2, "Price" = $3::numeric, "Quantity" = $4, "#,
    r#""OnDisplay" = $5, "Description" = $6 WHERE "ID" = $1 RETURNING "#,
    columns!()
);

/// Row shape as selected, before coercion into [`IceCream`].
#[derive(Debug, Clone, FromRow)]
struct DbIceCream {
    id: i64,
    name: String,
    price: String,
    quantity: i64,
    on_display: Option<String>,
    description: Option<String>,
}

impl TryFrom<DbIceCream> for IceCream {
    type Error = StoreError;

    fn try_from(row: DbIceCream) -> Result<Self, Self::Error> {
        let price = parse_price(&row.price).ok_or_else(|| {
            StoreError::Backend(format!("unreadable price {:?} for id {}", row.price, row.id))
        })?;

        Ok(IceCream {
            id: row.id,
            name: row.name,
            price,
            quantity: row.quantity,
            on_display: parse_flag(row.on_display.as_deref()),
            description: normalize_description(row.description),
        })
    }
}

fn into_products(rows: Vec<DbIceCream>) -> StoreResult<Vec<IceCream>> {
    rows.into_iter().map(IceCream::try_from).collect()
}

/// Parse a price column rendered as text (`3.10`, `$3.10`, `$1,024.00`).
fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");
    digits.parse().ok()
}

/// Interpret a boolean-ish column rendered as text.
fn parse_flag(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "t" | "true" | "y" | "yes" | "1" | "on"
        ),
        None => false,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Record store over a `sqlx` Postgres pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a lazily connecting pool; no connection is opened until the
    /// first query.
    pub fn connect_lazy(config: &DatabaseConfig, acquire_timeout: Duration) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .min_connections(MIN_CONNECTIONS)
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);

        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn fetch_all(&self) -> StoreResult<Vec<IceCream>> {
        let rows: Vec<DbIceCream> = sqlx::query_as(SELECT_ALL).fetch_all(&self.pool).await?;
        into_products(rows)
    }

    async fn fetch_by_ids(&self, ids: &[String]) -> StoreResult<Vec<IceCream>> {
        let ids = parse_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<DbIceCream> = sqlx::query_as(SELECT_BY_IDS)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        into_products(rows)
    }

    async fn fetch_by_names(&self, names: &[String]) -> StoreResult<Vec<IceCream>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<DbIceCream> = sqlx::query_as(SELECT_BY_NAMES)
            .bind(names.to_vec())
            .fetch_all(&self.pool)
            .await?;
        into_products(rows)
    }

    async fn insert(&self, fields: IceCreamFields) -> StoreResult<InsertOutcome> {
        let mut tx = self.pool.begin().await?;

        // Held until commit; serialises the name check and id assignment
        sqlx::query(LOCK_TABLE).execute(&mut *tx).await?;

        // No product has id 0, so this matches any holder of the name
        let holder: Option<DbIceCream> = sqlx::query_as(SELECT_NAME_HOLDER)
            .bind(&fields.name)
            .bind(0_i64)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(row) = holder {
            tx.rollback().await?;
            let existing = IceCream::try_from(row)?;
            return Ok(if existing.matches(&fields) {
                InsertOutcome::Identical(existing)
            } else {
                InsertOutcome::NameTaken(existing)
            });
        }

        let last_id: i64 =
            sqlx::query_scalar(r#"SELECT COALESCE(MAX("ID"), 0)::bigint FROM public."Icecream""#)
                .fetch_one(&mut *tx)
                .await?;

        let row: DbIceCream = sqlx::query_as(INSERT)
            .bind(last_id + 1)
            .bind(&fields.name)
            .bind(fields.price)
            .bind(fields.quantity)
            .bind(fields.on_display)
            .bind(&fields.description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(InsertOutcome::Inserted(IceCream::try_from(row)?))
    }

    async fn update(&self, id: i64, fields: &IceCreamFields) -> StoreResult<UpdateOutcome> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(LOCK_TABLE).execute(&mut *tx).await?;

        let holder: Option<DbIceCream> = sqlx::query_as(SELECT_NAME_HOLDER)
            .bind(&fields.name)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(row) = holder {
            tx.rollback().await?;
            return Ok(UpdateOutcome::NameTaken(IceCream::try_from(row)?));
        }

        let row: Option<DbIceCream> = sqlx::query_as(UPDATE)
            .bind(id)
            .bind(&fields.name)
            .bind(fields.price)
            .bind(fields.quantity)
            .bind(fields.on_display)
            .bind(&fields.description)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(match row {
            Some(row) => UpdateOutcome::Updated(IceCream::try_from(row)?),
            None => UpdateOutcome::Missing,
        })
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(r#"DELETE FROM public."Icecream" WHERE "ID" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
