//! Per-operation option structs.
//!
//! Each struct enumerates the optional knobs of one facade operation with
//! the documented defaults baked into its `Default` impl. `Option` fields
//! control clause emission: `None` (or an empty string) omits the clause
//! entirely. Filter, sort, and group expressions are raw SQL fragments,
//! trusted verbatim; see the crate docs for the trust model.

/// Options for [`crate::Postgis::list_tables`].
#[derive(Clone, Debug, Default)]
pub struct ListTablesOptions {
    /// Extra predicate ANDed onto the catalog query.
    pub filter: Option<String>,
}

/// Options for [`crate::Postgis::query_table`].
#[derive(Clone, Debug)]
pub struct QueryTableOptions {
    /// Columns to select. Defaults to `*`.
    pub columns: String,
    pub filter: Option<String>,
    pub group: Option<String>,
    pub sort: Option<String>,
    /// Row limit. Defaults to `Some(100)`; set to `None` to suppress the
    /// LIMIT clause entirely. `Some(0)` also suppresses it.
    pub limit: Option<i64>,
}

impl Default for QueryTableOptions {
    fn default() -> Self {
        QueryTableOptions {
            columns: "*".to_string(),
            filter: None,
            group: None,
            sort: None,
            limit: Some(100),
        }
    }
}

/// Options for [`crate::Postgis::bbox`].
#[derive(Clone, Debug)]
pub struct BboxOptions {
    pub geom_column: String,
    /// Target SRID for the extent. Defaults to 4326.
    pub srid: i32,
    pub filter: Option<String>,
}

impl Default for BboxOptions {
    fn default() -> Self {
        BboxOptions {
            geom_column: "geom".to_string(),
            srid: 4326,
            filter: None,
        }
    }
}

/// Options for [`crate::Postgis::centroid`].
#[derive(Clone, Debug)]
pub struct CentroidOptions {
    /// Use `ST_PointOnSurface` instead of `ST_Centroid`, guaranteeing the
    /// returned point lies on the geometry.
    pub force_on_surface: bool,
    pub geom_column: String,
    pub srid: i32,
    pub filter: Option<String>,
}

impl Default for CentroidOptions {
    fn default() -> Self {
        CentroidOptions {
            force_on_surface: false,
            geom_column: "geom".to_string(),
            srid: 4326,
            filter: None,
        }
    }
}

/// Options for [`crate::Postgis::intersect_feature`].
#[derive(Clone, Debug)]
pub struct IntersectFeatureOptions {
    pub columns: String,
    /// `ST_DWithin` distance threshold. Zero is a valid threshold and is
    /// always rendered, never treated as absent.
    pub distance: f64,
    pub geom_column_from: String,
    pub geom_column_to: String,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
}

impl Default for IntersectFeatureOptions {
    fn default() -> Self {
        IntersectFeatureOptions {
            columns: "*".to_string(),
            distance: 0.0,
            geom_column_from: "geom".to_string(),
            geom_column_to: "geom".to_string(),
            filter: None,
            sort: None,
            limit: None,
        }
    }
}

/// Options for [`crate::Postgis::intersect_point`].
#[derive(Clone, Debug)]
pub struct IntersectPointOptions {
    pub columns: String,
    pub distance: f64,
    pub geom_column: String,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
}

impl Default for IntersectPointOptions {
    fn default() -> Self {
        IntersectPointOptions {
            columns: "*".to_string(),
            distance: 0.0,
            geom_column: "geom".to_string(),
            filter: None,
            sort: None,
            limit: Some(10),
        }
    }
}

/// Options for [`crate::Postgis::geojson`].
#[derive(Clone, Debug)]
pub struct GeoJsonOptions {
    /// Comma-separated bounds: 4 numbers for an envelope, 3 for a tile
    /// coordinate (z, x, y). Any other length adds no spatial filter.
    pub bounds: Option<String>,
    /// Column promoted to the feature `id` and excluded from properties.
    pub id_column: Option<String>,
    /// Coordinate precision passed to `ST_AsGeoJSON`. Defaults to 9.
    pub precision: i32,
    pub geom_column: String,
    /// Extra columns projected into feature properties.
    pub columns: Option<String>,
    pub filter: Option<String>,
}

impl Default for GeoJsonOptions {
    fn default() -> Self {
        GeoJsonOptions {
            bounds: None,
            id_column: None,
            precision: 9,
            geom_column: "geom".to_string(),
            columns: None,
            filter: None,
        }
    }
}

/// Options for [`crate::Postgis::geobuf`].
#[derive(Clone, Debug)]
pub struct GeobufOptions {
    pub bounds: Option<String>,
    pub geom_column: String,
    pub columns: Option<String>,
    pub filter: Option<String>,
}

impl Default for GeobufOptions {
    fn default() -> Self {
        GeobufOptions {
            bounds: None,
            geom_column: "geom".to_string(),
            columns: None,
            filter: None,
        }
    }
}

/// Options for [`crate::Postgis::mvt`].
#[derive(Clone, Debug)]
pub struct MvtOptions {
    /// Extra columns encoded as feature attributes.
    pub columns: Option<String>,
    pub id_column: Option<String>,
    pub geom_column: String,
    pub filter: Option<String>,
}

impl Default for MvtOptions {
    fn default() -> Self {
        MvtOptions {
            columns: None,
            id_column: None,
            geom_column: "geom".to_string(),
            filter: None,
        }
    }
}

/// Options for [`crate::Postgis::nearest`].
#[derive(Clone, Debug)]
pub struct NearestOptions {
    pub columns: String,
    pub geom_column: String,
    pub filter: Option<String>,
    pub limit: Option<i64>,
}

impl Default for NearestOptions {
    fn default() -> Self {
        NearestOptions {
            columns: "*".to_string(),
            geom_column: "geom".to_string(),
            filter: None,
            limit: Some(10),
        }
    }
}

/// Options for [`crate::Postgis::transform_point`].
#[derive(Clone, Debug)]
pub struct TransformPointOptions {
    /// Target SRID. Defaults to 4326. The source SRID comes from the
    /// point string itself.
    pub srid: i32,
}

impl Default for TransformPointOptions {
    fn default() -> Self {
        TransformPointOptions { srid: 4326 }
    }
}
