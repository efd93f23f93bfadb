//! The query-construction engine.
//!
//! One pure builder function per facade operation: typed parameters in,
//! [`RawSql`] out. The same inputs always render the same text, and no
//! builder touches the database. Table and column names, filter, sort,
//! and group expressions are interpolated verbatim with no quoting or
//! escaping; the caller is trusted completely. Keeping every builder's
//! output behind the [`RawSql`] newtype keeps that boundary explicit,
//! so a parameterized query type can be introduced later without
//! touching the facade surface.

use std::fmt;

use crate::error::Result;
use crate::options::*;
use crate::parse::{parse_bounds, parse_point, PointParts};

/// A fully rendered SQL string, produced only by the builders in this
/// module and consumed exactly once by the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSql(String);

impl RawSql {
    fn new(text: String) -> Self {
        RawSql(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders `\n{keyword} {expr}` when the expression is present and
/// non-empty, nothing otherwise.
fn clause(keyword: &str, expr: Option<&str>) -> String {
    match expr {
        Some(expr) if !expr.is_empty() => format!("\n{} {}", keyword, expr),
        _ => String::new(),
    }
}

// A zero limit is treated as absent, like the other falsy knobs.
fn limit_clause(limit: Option<i64>) -> String {
    match limit {
        Some(n) if n != 0 => format!("\nLIMIT {}", n),
        _ => String::new(),
    }
}

/// Renders `, {expr}` for optional extra projection columns.
fn projection(expr: Option<&str>) -> String {
    match expr {
        Some(expr) if !expr.is_empty() => format!(", {}", expr),
        _ => String::new(),
    }
}

/// Combines up to two optional predicates into a WHERE clause, ANDing
/// them together. Emits nothing when neither predicate renders, so a
/// degenerate bounds value never leaves a dangling WHERE behind.
fn where_all(predicates: [Option<&str>; 2]) -> String {
    let present: Vec<&str> = predicates
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();

    if present.is_empty() {
        String::new()
    } else {
        format!("\nWHERE {}", present.join("\nAND "))
    }
}

/// Intersection predicate between a geometry column and a bounds value,
/// transformed into the table's native SRID (bound as `srid` by a probe
/// subquery in the enclosing FROM list). Four numbers make a rectangular
/// envelope, three a tile envelope. Any other length adds no predicate
/// at all: degenerate bounds are accepted and silently ignored, not
/// rejected.
fn envelope_predicate(geom_column: &str, bounds: &[f64]) -> Option<String> {
    let list = bounds
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");

    match bounds.len() {
        4 => Some(format!(
            "{} && ST_Transform(ST_MakeEnvelope({}, 4326), srid)",
            geom_column, list
        )),
        3 => Some(format!(
            "{} && ST_Transform(ST_TileEnvelope({}), srid)",
            geom_column, list
        )),
        _ => None,
    }
}

/// A point literal reprojected into the SRID of the table's geometry
/// column, discovered by a scalar subquery at execution time.
fn point_in_table_srid(point: &PointParts, geom_column: &str, table: &str) -> String {
    format!(
        "ST_Transform(st_setsrid(st_makepoint({}, {}), {}), (SELECT ST_SRID({}) FROM {} LIMIT 1))",
        point.x, point.y, point.srid, geom_column, table
    )
}

/// Table/geometry metadata from the catalogs, restricted to non-system
/// schemas the current user (or PUBLIC) can SELECT from.
pub fn list_tables(filter: Option<&str>) -> RawSql {
    RawSql::new(format!(
        "SELECT\n  \
           i.table_name,\n  \
           i.table_type,\n  \
           g.f_geometry_column as geometry_column,\n  \
           g.coord_dimension,\n  \
           g.srid,\n  \
           g.type\n\
         FROM\n  \
           information_schema.tables i\n\
         LEFT JOIN geometry_columns g ON i.table_name = g.f_table_name\n\
         INNER JOIN information_schema.table_privileges p\n  \
           ON i.table_name = p.table_name\n  \
           AND p.grantee in (current_user, 'PUBLIC')\n  \
           AND p.privilege_type = 'SELECT'\n\
         WHERE i.table_schema not in ('pg_catalog', 'information_schema')\n\
         -- Optional where filter{}\n\
         ORDER BY table_name",
        clause("and", filter)
    ))
}

/// Column name/type pairs for one table, via the pg catalog oids.
pub fn list_columns(table: &str) -> RawSql {
    RawSql::new(format!(
        "SELECT\n  \
           attname as field_name,\n  \
           typname as field_type\n\
         FROM\n  \
           pg_namespace, pg_attribute, pg_type, pg_class\n\
         WHERE\n  \
           pg_type.oid = atttypid AND\n  \
           pg_class.oid = attrelid AND\n  \
           relnamespace = pg_namespace.oid AND\n  \
           attnum >= 1 AND\n  \
           relname = '{}'",
        table
    ))
}

/// Plain SELECT with optional WHERE/GROUP BY/ORDER BY/LIMIT.
pub fn query_table(table: &str, opts: &QueryTableOptions) -> RawSql {
    RawSql::new(format!(
        "SELECT\n  {}\nFROM\n  {}{}{}{}{}",
        opts.columns,
        table,
        clause("WHERE", opts.filter.as_deref()),
        clause("GROUP BY", opts.group.as_deref()),
        clause("ORDER BY", opts.sort.as_deref()),
        limit_clause(opts.limit)
    ))
}

/// Extent of a geometry column, reprojected to the requested SRID.
pub fn bbox(table: &str, opts: &BboxOptions) -> RawSql {
    RawSql::new(format!(
        "SELECT\n  ST_Extent(ST_Transform({}, {})) as bbox\nFROM\n  {}{}",
        opts.geom_column,
        opts.srid,
        table,
        clause("WHERE", opts.filter.as_deref())
    ))
}

/// X/Y of each geometry's centroid (or point-on-surface), reprojected.
pub fn centroid(table: &str, opts: &CentroidOptions) -> RawSql {
    let center_fn = if opts.force_on_surface {
        "ST_PointOnSurface"
    } else {
        "ST_Centroid"
    };

    RawSql::new(format!(
        "SELECT\n  \
           ST_X(ST_Transform({center}({geom}), {srid})) as x,\n  \
           ST_Y(ST_Transform({center}({geom}), {srid})) as y\n\
         FROM\n  {table}{filter}",
        center = center_fn,
        geom = opts.geom_column,
        srid = opts.srid,
        table = table,
        filter = clause("WHERE", opts.filter.as_deref())
    ))
}

/// Rows of two tables within `distance` of each other. A zero distance
/// is a valid threshold and still renders `ST_DWithin(..., 0)`.
pub fn intersect_feature(
    table_from: &str,
    table_to: &str,
    opts: &IntersectFeatureOptions,
) -> RawSql {
    RawSql::new(format!(
        "SELECT\n  {columns}\nFROM\n  {from},\n  {to}\n\
         WHERE ST_DWithin({from}.{geom_from}, {to}.{geom_to}, {distance}){and_filter}{sort}{limit}",
        columns = opts.columns,
        from = table_from,
        to = table_to,
        geom_from = opts.geom_column_from,
        geom_to = opts.geom_column_to,
        distance = opts.distance,
        and_filter = clause("AND", opts.filter.as_deref()),
        sort = clause("ORDER BY", opts.sort.as_deref()),
        limit = limit_clause(opts.limit)
    ))
}

/// Rows within `distance` of a point, the point reprojected into the
/// table's own SRID. Fails before SQL is built when the point string
/// does not parse.
pub fn intersect_point(table: &str, point: &str, opts: &IntersectPointOptions) -> Result<RawSql> {
    let point = parse_point(point)?;

    Ok(RawSql::new(format!(
        "SELECT\n  {columns}\nFROM\n  {table}\n\
         WHERE ST_DWithin({geom}, {point}, {distance}){and_filter}{sort}{limit}",
        columns = opts.columns,
        table = table,
        geom = opts.geom_column,
        point = point_in_table_srid(&point, &opts.geom_column, table),
        distance = opts.distance,
        and_filter = clause("AND", opts.filter.as_deref()),
        sort = clause("ORDER BY", opts.sort.as_deref()),
        limit = limit_clause(opts.limit)
    )))
}

/// One GeoJSON Feature object per row: geometry reprojected to 4326 and
/// encoded by `ST_AsGeoJSON`, all other projected columns folded into
/// `properties`, with an optional promoted `id`.
pub fn geojson(table: &str, opts: &GeoJsonOptions) -> RawSql {
    let bounds = parse_bounds(opts.bounds.as_deref());
    let id_column = opts.id_column.as_deref().filter(|c| !c.is_empty());

    let id_field = id_column
        .map(|c| format!("'id', {}, ", c))
        .unwrap_or_default();
    let id_strip = id_column.map(|c| format!(" - '{}'", c)).unwrap_or_default();

    let predicate = bounds
        .as_deref()
        .and_then(|b| envelope_predicate(&opts.geom_column, b));

    RawSql::new(format!(
        "SELECT\n  \
           jsonb_build_object(\n    \
             'type', 'Feature',\n    \
             {id_field}'geometry', ST_AsGeoJSON(geom, {precision})::jsonb,\n    \
             'properties', to_jsonb(subq.*) - 'geom'{id_strip}\n  \
           ) AS geojson\n\
         FROM (\n  \
           SELECT\n    ST_Transform({geom}, 4326) as geom{columns}{id_proj}\n  \
           FROM\n    {table},\n    \
             (SELECT ST_SRID({geom}) AS srid FROM {table} WHERE {geom} IS NOT NULL LIMIT 1) a{where_clause}\n\
         ) as subq",
        id_field = id_field,
        precision = opts.precision,
        id_strip = id_strip,
        geom = opts.geom_column,
        columns = projection(opts.columns.as_deref()),
        id_proj = projection(id_column),
        table = table,
        where_clause = where_all([opts.filter.as_deref(), predicate.as_deref()])
    ))
}

/// Same subquery shape as [`geojson`], wrapped in `ST_AsGeobuf` so the
/// whole row set comes back as one binary-encoded row.
pub fn geobuf(table: &str, opts: &GeobufOptions) -> RawSql {
    let bounds = parse_bounds(opts.bounds.as_deref());

    // The SRID probe join is only needed when a bounds value is in play.
    let srid_probe = if bounds.is_some() {
        format!(
            ",\n    (SELECT ST_SRID({geom}) AS srid FROM {table} WHERE {geom} IS NOT NULL LIMIT 1) sq",
            geom = opts.geom_column,
            table = table
        )
    } else {
        String::new()
    };

    let predicate = bounds
        .as_deref()
        .and_then(|b| envelope_predicate(&opts.geom_column, b));

    RawSql::new(format!(
        "SELECT\n  ST_AsGeobuf(q, 'geom')\n\
         FROM (\n  \
           SELECT\n    ST_Transform({geom}, 4326) as geom{columns}\n  \
           FROM\n    {table}{srid_probe}{where_clause}\n\
         ) as q",
        geom = opts.geom_column,
        columns = projection(opts.columns.as_deref()),
        table = table,
        srid_probe = srid_probe,
        where_clause = where_all([opts.filter.as_deref(), predicate.as_deref()])
    ))
}

/// One Mapbox vector tile for an XYZ tile coordinate: tile-local
/// geometries built by `ST_AsMVTGeom` over the rows intersecting the
/// tile envelope, aggregated by `ST_AsMVT` into a single binary row.
pub fn mvt(table: &str, x: i32, y: i32, z: u8, opts: &MvtOptions) -> RawSql {
    let id_column = opts.id_column.as_deref().filter(|c| !c.is_empty());
    let id_arg = id_column.map(|c| format!(", '{}'", c)).unwrap_or_default();

    RawSql::new(format!(
        "WITH mvtgeom as (\n  \
           SELECT\n    \
             ST_AsMVTGeom(\n      \
               ST_Transform({geom}, 3857),\n      \
               ST_TileEnvelope({z}, {x}, {y})\n    \
             ) as geom{columns}{id_proj}\n  \
           FROM\n    {table},\n    \
             (SELECT ST_SRID({geom}) AS srid FROM {table} WHERE {geom} IS NOT NULL LIMIT 1) a\n  \
           WHERE ST_Intersects({geom}, ST_Transform(ST_TileEnvelope({z}, {x}, {y}), srid)){and_filter}\n\
         )\n\
         SELECT ST_AsMVT(mvtgeom.*, '{table}', 4096, 'geom'{id_arg}) AS mvt from mvtgeom",
        geom = opts.geom_column,
        z = z,
        x = x,
        y = y,
        columns = projection(opts.columns.as_deref()),
        id_proj = projection(id_column),
        table = table,
        and_filter = clause("AND", opts.filter.as_deref()),
        id_arg = id_arg
    ))
}

/// Rows nearest to a point, with an `ST_Distance` projection and the
/// `<->` operator driving an index-assisted ordering.
pub fn nearest(table: &str, point: &str, opts: &NearestOptions) -> Result<RawSql> {
    let point = parse_point(point)?;
    let projected_point = point_in_table_srid(&point, &opts.geom_column, table);

    Ok(RawSql::new(format!(
        "SELECT\n  {columns},\n  ST_Distance({point}, {geom}) as distance\n\
         FROM\n  {table}{filter}\n\
         ORDER BY {geom} <-> {point}{limit}",
        columns = opts.columns,
        point = projected_point,
        geom = opts.geom_column,
        table = table,
        filter = clause("WHERE", opts.filter.as_deref()),
        limit = limit_clause(opts.limit)
    )))
}

/// X/Y of a point reprojected from its embedded SRID to a target SRID.
pub fn transform_point(point: &str, opts: &TransformPointOptions) -> Result<RawSql> {
    let point = parse_point(point)?;

    Ok(RawSql::new(format!(
        "SELECT\n  \
           ST_X(ST_Transform(st_setsrid(st_makepoint({x}, {y}), {from_srid}), {srid})) as x,\n  \
           ST_Y(ST_Transform(st_setsrid(st_makepoint({x}, {y}), {from_srid}), {srid})) as y",
        x = point.x,
        y = point.y,
        from_srid = point.srid,
        srid = opts.srid
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // Whitespace is insignificant in the rendered SQL; collapse it the
    // way the queries would read on one line.
    fn norm(sql: &RawSql) -> String {
        sql.as_str().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_list_tables() {
        let sql = norm(&list_tables(None));
        assert!(sql.starts_with("SELECT i.table_name, i.table_type,"));
        assert!(sql.contains("LEFT JOIN geometry_columns g ON i.table_name = g.f_table_name"));
        assert!(sql.contains("p.grantee in (current_user, 'PUBLIC')"));
        assert!(sql.contains("i.table_schema not in ('pg_catalog', 'information_schema')"));
        assert!(sql.ends_with("ORDER BY table_name"));

        let filtered = norm(&list_tables(Some("srid = 4326")));
        assert!(filtered.contains("and srid = 4326 ORDER BY table_name"));
    }

    #[test]
    fn test_list_columns() {
        let sql = norm(&list_columns("rivers"));
        assert!(sql.contains("attname as field_name"));
        assert!(sql.contains("typname as field_type"));
        assert!(sql.contains("FROM pg_namespace, pg_attribute, pg_type, pg_class"));
        assert!(sql.contains("relname = 'rivers'"));
    }

    #[test]
    fn test_query_table_bare() {
        let opts = QueryTableOptions {
            limit: None,
            ..Default::default()
        };
        let sql = norm(&query_table("t", &opts));
        assert_eq!(sql, "SELECT * FROM t");
    }

    #[test]
    fn test_query_table_default_limit() {
        let sql = norm(&query_table("t", &QueryTableOptions::default()));
        assert_eq!(sql, "SELECT * FROM t LIMIT 100");
    }

    #[test]
    fn test_query_table_null_limit_omits_clause() {
        let opts = QueryTableOptions {
            filter: Some("\"state\" = 'GOA'".to_string()),
            limit: None,
            ..Default::default()
        };
        let sql = norm(&query_table("t", &opts));
        assert!(!sql.contains("LIMIT"));
        assert!(sql.ends_with("WHERE \"state\" = 'GOA'"));
    }

    #[test]
    fn test_query_table_zero_limit_omits_clause() {
        let opts = QueryTableOptions {
            limit: Some(0),
            ..Default::default()
        };
        assert!(!norm(&query_table("t", &opts)).contains("LIMIT"));
    }

    #[test]
    fn test_query_table_all_clauses_in_order() {
        let opts = QueryTableOptions {
            columns: "name".to_string(),
            filter: Some("\"state\" = 'GOA'".to_string()),
            group: Some("name".to_string()),
            sort: Some("name".to_string()),
            limit: Some(10),
        };
        let sql = norm(&query_table("places", &opts));
        assert_eq!(
            sql,
            "SELECT name FROM places WHERE \"state\" = 'GOA' GROUP BY name ORDER BY name LIMIT 10"
        );
    }

    #[test]
    fn test_bbox() {
        let opts = BboxOptions {
            filter: Some("a=1".to_string()),
            ..Default::default()
        };
        let sql = norm(&bbox("t", &opts));
        assert_eq!(
            sql,
            "SELECT ST_Extent(ST_Transform(geom, 4326)) as bbox FROM t WHERE a=1"
        );
    }

    #[test]
    fn test_centroid() {
        let opts = CentroidOptions {
            filter: Some("column_name='name'".to_string()),
            ..Default::default()
        };
        let sql = norm(&centroid("t", &opts));
        assert!(sql.contains("ST_X(ST_Transform(ST_Centroid(geom), 4326)) as x"));
        assert!(sql.contains("ST_Y(ST_Transform(ST_Centroid(geom), 4326)) as y"));
        assert!(sql.ends_with("FROM t WHERE column_name='name'"));
    }

    #[test]
    fn test_centroid_on_surface() {
        let opts = CentroidOptions {
            force_on_surface: true,
            ..Default::default()
        };
        let sql = norm(&centroid("t", &opts));
        assert!(sql.contains("ST_PointOnSurface(geom)"));
        assert!(!sql.contains("ST_Centroid"));
    }

    #[test]
    fn test_intersect_feature() {
        let opts = IntersectFeatureOptions {
            filter: Some("some_column='value'".to_string()),
            sort: Some("some_column ASC".to_string()),
            limit: Some(10),
            ..Default::default()
        };
        let sql = norm(&intersect_feature("table_name", "other_table", &opts));
        assert_eq!(
            sql,
            "SELECT * FROM table_name, other_table \
             WHERE ST_DWithin(table_name.geom, other_table.geom, 0) \
             AND some_column='value' ORDER BY some_column ASC LIMIT 10"
        );
    }

    #[test]
    fn test_intersect_feature_zero_distance_renders() {
        let sql = norm(&intersect_feature(
            "a",
            "b",
            &IntersectFeatureOptions::default(),
        ));
        assert!(sql.contains("ST_DWithin(a.geom, b.geom, 0)"));
    }

    #[test]
    fn test_intersect_point() {
        let opts = IntersectPointOptions {
            filter: Some("some_column='value'".to_string()),
            sort: Some("some_column ASC".to_string()),
            ..Default::default()
        };
        let sql = intersect_point("table_name", "73.70534,14.94202,4326", &opts).unwrap();
        let sql = norm(&sql);
        assert!(sql.contains(
            "ST_DWithin(geom, ST_Transform(st_setsrid(st_makepoint(73.70534, 14.94202), 4326), \
             (SELECT ST_SRID(geom) FROM table_name LIMIT 1)), 0)"
        ));
        assert!(sql.contains("AND some_column='value'"));
        assert!(sql.ends_with("ORDER BY some_column ASC LIMIT 10"));
    }

    #[test]
    fn test_intersect_point_rejects_bad_point() {
        let result = intersect_point("t", "nope", &IntersectPointOptions::default());
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_geojson_defaults() {
        let sql = norm(&geojson("t", &GeoJsonOptions::default()));
        assert!(sql.contains("jsonb_build_object( 'type', 'Feature',"));
        assert!(sql.contains("ST_AsGeoJSON(geom, 9)::jsonb"));
        assert!(sql.contains("'properties', to_jsonb(subq.*) - 'geom' )"));
        assert!(sql.contains("ST_Transform(geom, 4326) as geom FROM t,"));
        // SRID probe is always joined, bounds or not.
        assert!(sql.contains("(SELECT ST_SRID(geom) AS srid FROM t WHERE geom IS NOT NULL LIMIT 1) a"));
        assert!(!sql.contains("WHERE geom &&"));
    }

    #[test]
    fn test_geojson_id_column() {
        let opts = GeoJsonOptions {
            id_column: Some("gid".to_string()),
            ..Default::default()
        };
        let sql = norm(&geojson("t", &opts));
        assert!(sql.contains("'id', gid,"));
        assert!(sql.contains("- 'geom' - 'gid'"));
        assert!(sql.contains("as geom, gid FROM"));
    }

    #[test]
    fn test_geojson_envelope_bounds() {
        let opts = GeoJsonOptions {
            bounds: Some("-180,-85,180,85".to_string()),
            ..Default::default()
        };
        let sql = norm(&geojson("t", &opts));
        assert!(sql.contains("WHERE geom && ST_Transform(ST_MakeEnvelope(-180,-85,180,85, 4326), srid)"));
    }

    #[test]
    fn test_geojson_tile_bounds() {
        let opts = GeoJsonOptions {
            bounds: Some("12,2048,1360".to_string()),
            filter: Some("kind = 'river'".to_string()),
            ..Default::default()
        };
        let sql = norm(&geojson("t", &opts));
        assert!(sql.contains(
            "WHERE kind = 'river' AND geom && ST_Transform(ST_TileEnvelope(12,2048,1360), srid)"
        ));
    }

    #[test]
    fn test_geojson_degenerate_bounds_add_no_predicate() {
        let opts = GeoJsonOptions {
            bounds: Some("1,2".to_string()),
            ..Default::default()
        };
        let sql = norm(&geojson("t", &opts));
        assert!(!sql.contains("&&"));
        // The probe join is the last thing before the subquery closes; no
        // outer WHERE was emitted.
        assert!(sql.contains("LIMIT 1) a ) as subq"));
    }

    #[test]
    fn test_geobuf() {
        let sql = norm(&geobuf("t", &GeobufOptions::default()));
        assert!(sql.starts_with("SELECT ST_AsGeobuf(q, 'geom') FROM ("));
        assert!(sql.ends_with(") as q"));
        // No bounds, so no SRID probe join.
        assert!(!sql.contains("ST_SRID"));
    }

    #[test]
    fn test_geobuf_bounds_add_probe_and_predicate() {
        let opts = GeobufOptions {
            bounds: Some("0,0,10,10".to_string()),
            ..Default::default()
        };
        let sql = norm(&geobuf("t", &opts));
        assert!(sql.contains("(SELECT ST_SRID(geom) AS srid FROM t WHERE geom IS NOT NULL LIMIT 1) sq"));
        assert!(sql.contains("WHERE geom && ST_Transform(ST_MakeEnvelope(0,0,10,10, 4326), srid)"));
    }

    #[test]
    fn test_mvt() {
        let opts = MvtOptions {
            columns: Some("name".to_string()),
            id_column: Some("id".to_string()),
            ..Default::default()
        };
        let sql = norm(&mvt("roads", 2048, 1360, 12, &opts));
        assert!(sql.starts_with("WITH mvtgeom as ("));
        assert!(sql.contains("ST_AsMVTGeom( ST_Transform(geom, 3857), ST_TileEnvelope(12, 2048, 1360) ) as geom, name, id"));
        assert!(sql.contains(
            "WHERE ST_Intersects(geom, ST_Transform(ST_TileEnvelope(12, 2048, 1360), srid))"
        ));
        assert!(sql.ends_with("SELECT ST_AsMVT(mvtgeom.*, 'roads', 4096, 'geom', 'id') AS mvt from mvtgeom"));
    }

    #[test]
    fn test_mvt_without_id_column() {
        let sql = norm(&mvt("roads", 0, 0, 0, &MvtOptions::default()));
        assert!(sql.ends_with("SELECT ST_AsMVT(mvtgeom.*, 'roads', 4096, 'geom') AS mvt from mvtgeom"));
    }

    #[test]
    fn test_nearest() {
        let sql = nearest("t", "73.70534,14.94202,4326", &NearestOptions::default()).unwrap();
        let sql = norm(&sql);
        let point = "ST_Transform(st_setsrid(st_makepoint(73.70534, 14.94202), 4326), \
                     (SELECT ST_SRID(geom) FROM t LIMIT 1))";
        assert!(sql.contains(&format!("ST_Distance({}, geom) as distance", point)));
        assert!(sql.contains(&format!("ORDER BY geom <-> {}", point)));
        assert!(sql.ends_with("LIMIT 10"));
    }

    #[test]
    fn test_transform_point() {
        let sql = transform_point(
            "73.70534,14.94202,4326",
            &TransformPointOptions { srid: 3857 },
        )
        .unwrap();
        let sql = norm(&sql);
        assert!(sql.contains(
            "ST_X(ST_Transform(st_setsrid(st_makepoint(73.70534, 14.94202), 4326), 3857)) as x"
        ));
        assert!(sql.contains(
            "ST_Y(ST_Transform(st_setsrid(st_makepoint(73.70534, 14.94202), 4326), 3857)) as y"
        ));
        assert!(!sql.contains("FROM"));
    }

    #[test]
    fn test_transform_point_rejects_bad_point() {
        let result = transform_point("invalid,point,format", &TransformPointOptions::default());
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_builders_are_referentially_transparent() {
        let opts = GeoJsonOptions {
            bounds: Some("12,2048,1360".to_string()),
            filter: Some("kind = 'river'".to_string()),
            ..Default::default()
        };
        assert_eq!(geojson("t", &opts), geojson("t", &opts));
        assert_eq!(
            query_table("t", &QueryTableOptions::default()),
            query_table("t", &QueryTableOptions::default())
        );
    }
}
