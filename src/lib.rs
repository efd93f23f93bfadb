//! # PostGIS Scribe
//!
//! Tools for building and executing PostGIS spatial queries.
//!
//! ## Current status
//!
//! This crate should be regarded as stable in terms of code
//! reliability/correctness, but not yet stable in terms of trait and
//! method signatures. We are releasing this code in Rust tradition as
//! 0.x until we feel the interface and feature set have stabilized, but
//! welcome usage and contributions from the Rust GIS community.
//!
//! ## Current features
//!
//! Given a PostGIS-enabled database, this crate assembles and runs the
//! common spatial read operations -- schema introspection, bounding box,
//! centroid, nearest-neighbor, geometry intersection, GeoJSON/geobuf
//! encoding, and Mapbox vector tile rendering -- without hand-written
//! SQL. The [`Postgis`] facade exposes one method per operation; the
//! [`sql`] module exposes the underlying pure builders for callers who
//! only want the query text.
//!
//! ## Trust model
//!
//! Table names, column names, and filter/sort/group expressions are
//! interpolated into the query text verbatim, with no identifier quoting
//! or escaping. The caller is trusted completely; never feed these
//! parameters from untrusted input. Builder output is carried in the
//! [`sql::RawSql`] newtype to keep that boundary visible.
//!
//! ## Known Limitations
//!
//! Connection management, pooling, transactions, and authentication are
//! entirely delegated to the supplied client. The trait-based design
//! allows for further extensibility; additional drivers can implement
//! [`QueryClient`] without touching the facade.

#![deny(warnings)]

use std::sync::Arc;

// TODO: remove once async fn in traits become stable
use async_trait::async_trait;

use tracing::debug;

pub mod error;
pub mod options;
pub mod parse;
pub mod pg;
pub mod row;
pub mod sql;

pub use error::{Error, Result};
pub use options::{
    BboxOptions, CentroidOptions, GeoJsonOptions, GeobufOptions, IntersectFeatureOptions,
    IntersectPointOptions, ListTablesOptions, MvtOptions, NearestOptions, QueryTableOptions,
    TransformPointOptions,
};
pub use row::{Row, SqlValue};
pub use sql::RawSql;

/// Failure type a [`QueryClient`] may surface. The facade never inspects
/// it beyond its display text, which gets wrapped into
/// [`Error::QueryExecutionFailed`] at the execution chokepoint.
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An asynchronous handle to a spatial-extension-enabled database.
///
/// This is the one external collaborator: anything that can take a SQL
/// string and produce normalized rows. A production implementation backed
/// by a sqlx [`sqlx::PgPool`] lives in [`pg`]; tests inject mocks.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(&self, sql: &str) -> std::result::Result<Vec<Row>, ClientError>;
}

/// The facade: one method per spatial operation.
///
/// Holds nothing but the shared client reference, so concurrent callers
/// may use one instance freely. Each method applies the documented
/// defaults, builds the query through a pure builder in [`sql`], runs it
/// through the single execution chokepoint, and (for [`Postgis::geojson`]
/// and [`Postgis::geobuf`]) reshapes the result rows.
pub struct Postgis {
    client: Arc<dyn QueryClient>,
}

impl Postgis {
    /// Wraps a query client. Fails with [`Error::InvalidClient`] when no
    /// client is supplied; the trait bound guarantees the handle can
    /// actually run queries.
    pub fn new(client: Option<Arc<dyn QueryClient>>) -> Result<Self> {
        match client {
            Some(client) => Ok(Postgis { client }),
            None => Err(Error::InvalidClient),
        }
    }

    // Every built query passes through here and nowhere else. Any client
    // failure is re-signaled as QueryExecutionFailed with the underlying
    // message; there are no retries and no suppression.
    async fn execute(&self, query: &RawSql) -> Result<Vec<Row>> {
        debug!(sql = query.as_str(), "executing query");

        self.client
            .query(query.as_str())
            .await
            .map_err(|err| Error::QueryExecutionFailed(err.to_string()))
    }

    /// Lists user tables with their geometry metadata.
    pub async fn list_tables(&self, opts: ListTablesOptions) -> Result<Vec<Row>> {
        self.execute(&sql::list_tables(opts.filter.as_deref()))
            .await
    }

    /// Lists column name/type pairs for one table.
    pub async fn list_columns(&self, table: &str) -> Result<Vec<Row>> {
        self.execute(&sql::list_columns(table)).await
    }

    /// Plain table query with optional filter/group/sort/limit.
    pub async fn query_table(&self, table: &str, opts: QueryTableOptions) -> Result<Vec<Row>> {
        self.execute(&sql::query_table(table, &opts)).await
    }

    /// Bounding box of a table's geometries.
    pub async fn bbox(&self, table: &str, opts: BboxOptions) -> Result<Vec<Row>> {
        self.execute(&sql::bbox(table, &opts)).await
    }

    /// Centroid (or point-on-surface) coordinates per row.
    pub async fn centroid(&self, table: &str, opts: CentroidOptions) -> Result<Vec<Row>> {
        self.execute(&sql::centroid(table, &opts)).await
    }

    /// Rows of `table_from` within a distance of rows of `table_to`.
    pub async fn intersect_feature(
        &self,
        table_from: &str,
        table_to: &str,
        opts: IntersectFeatureOptions,
    ) -> Result<Vec<Row>> {
        self.execute(&sql::intersect_feature(table_from, table_to, &opts))
            .await
    }

    /// Rows within a distance of a `"x,y,srid"` point.
    pub async fn intersect_point(
        &self,
        table: &str,
        point: &str,
        opts: IntersectPointOptions,
    ) -> Result<Vec<Row>> {
        self.execute(&sql::intersect_point(table, point, &opts)?)
            .await
    }

    /// Queries a table as a GeoJSON FeatureCollection.
    pub async fn geojson(&self, table: &str, opts: GeoJsonOptions) -> Result<serde_json::Value> {
        let rows = self.execute(&sql::geojson(table, &opts)).await?;

        let features: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                row.get("geojson")
                    .and_then(SqlValue::as_json)
                    .cloned()
                    .unwrap_or(serde_json::Value::Null)
            })
            .collect();

        Ok(serde_json::json!({
            "type": "FeatureCollection",
            "features": features,
        }))
    }

    /// Queries a table as a single geobuf-encoded buffer. `None` when the
    /// query produced no row or a NULL buffer.
    pub async fn geobuf(&self, table: &str, opts: GeobufOptions) -> Result<Option<Vec<u8>>> {
        let rows = self.execute(&sql::geobuf(table, &opts)).await?;

        Ok(rows
            .first()
            .and_then(|row| row.get("st_asgeobuf"))
            .and_then(SqlValue::as_bytes)
            .map(<[u8]>::to_vec))
    }

    /// Renders one Mapbox vector tile for an XYZ tile coordinate. The
    /// binary tile comes back in the `mvt` column of the single row.
    pub async fn mvt(
        &self,
        table: &str,
        x: i32,
        y: i32,
        z: u8,
        opts: MvtOptions,
    ) -> Result<Vec<Row>> {
        self.execute(&sql::mvt(table, x, y, z, &opts)).await
    }

    /// Rows nearest to a `"x,y,srid"` point, closest first, with a
    /// `distance` column.
    pub async fn nearest(
        &self,
        table: &str,
        point: &str,
        opts: NearestOptions,
    ) -> Result<Vec<Row>> {
        self.execute(&sql::nearest(table, point, &opts)?).await
    }

    /// Reprojects a `"x,y,srid"` point to a target SRID, returning one
    /// row with `x` and `y` columns.
    pub async fn transform_point(
        &self,
        point: &str,
        opts: TransformPointOptions,
    ) -> Result<Vec<Row>> {
        self.execute(&sql::transform_point(point, &opts)?).await
    }
}
