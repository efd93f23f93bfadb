//! sqlx-backed [`QueryClient`] implementation.
//!
//! Wraps a [`PgPool`] and normalizes each [`PgRow`] into the crate's
//! driver-agnostic [`Row`] representation, decoding by postgres type
//! name. Unrecognized types fall back to their text form, then to NULL.

// TODO: remove once async fn in traits become stable
use async_trait::async_trait;

use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Column, Row as _, TypeInfo};
use tracing::debug;

use crate::row::{Row, SqlValue};
use crate::{ClientError, QueryClient};

/// A [`QueryClient`] over a shared sqlx connection pool. Pool sizing,
/// credentials, and TLS are the caller's concern.
pub struct PgPoolClient {
    pool: PgPool,
}

impl PgPoolClient {
    pub fn new(pool: PgPool) -> Self {
        PgPoolClient { pool }
    }
}

#[async_trait]
impl QueryClient for PgPoolClient {
    async fn query(&self, sql: &str) -> Result<Vec<Row>, ClientError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), "query returned");

        Ok(rows.iter().map(normalize_row).collect())
    }
}

fn normalize_row(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = decode_value(row, idx, column.type_info().name());
            (column.name().to_string(), value)
        })
        .collect()
}

// Decoding failures and NULLs both land on SqlValue::Null; the facade
// treats rows as untyped apart from the geojson/st_asgeobuf columns.
fn decode_value(row: &PgRow, idx: usize, type_name: &str) -> SqlValue {
    fn get<'r, T>(row: &'r PgRow, idx: usize) -> Option<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        row.try_get::<Option<T>, _>(idx).ok().flatten()
    }

    match type_name {
        "BOOL" => get::<bool>(row, idx)
            .map(SqlValue::Bool)
            .unwrap_or(SqlValue::Null),
        "INT2" => get::<i16>(row, idx)
            .map(|v| SqlValue::Int(v.into()))
            .unwrap_or(SqlValue::Null),
        "INT4" => get::<i32>(row, idx)
            .map(|v| SqlValue::Int(v.into()))
            .unwrap_or(SqlValue::Null),
        "INT8" => get::<i64>(row, idx)
            .map(SqlValue::Int)
            .unwrap_or(SqlValue::Null),
        "FLOAT4" => get::<f32>(row, idx)
            .map(|v| SqlValue::Float(v.into()))
            .unwrap_or(SqlValue::Null),
        "FLOAT8" => get::<f64>(row, idx)
            .map(SqlValue::Float)
            .unwrap_or(SqlValue::Null),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => get::<String>(row, idx)
            .map(SqlValue::Text)
            .unwrap_or(SqlValue::Null),
        "BYTEA" => get::<Vec<u8>>(row, idx)
            .map(SqlValue::Bytes)
            .unwrap_or(SqlValue::Null),
        "JSON" | "JSONB" => get::<serde_json::Value>(row, idx)
            .map(SqlValue::Json)
            .unwrap_or(SqlValue::Null),
        "UUID" => get::<uuid::Uuid>(row, idx)
            .map(|v| SqlValue::Text(v.to_string()))
            .unwrap_or(SqlValue::Null),
        "TIMESTAMP" => get::<chrono::NaiveDateTime>(row, idx)
            .map(|v| SqlValue::Text(v.to_string()))
            .unwrap_or(SqlValue::Null),
        "TIMESTAMPTZ" => get::<chrono::DateTime<chrono::Utc>>(row, idx)
            .map(|v| SqlValue::Text(v.to_rfc3339()))
            .unwrap_or(SqlValue::Null),
        "DATE" => get::<chrono::NaiveDate>(row, idx)
            .map(|v| SqlValue::Text(v.to_string()))
            .unwrap_or(SqlValue::Null),
        _ => get::<String>(row, idx)
            .map(SqlValue::Text)
            .unwrap_or(SqlValue::Null),
    }
}
