//! GeoJSON region tables.

use anyhow::{bail, Context, Result};
use geo::{MultiPolygon, Polygon};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{RegionTable, Table, Value};

/// Load regions from a GeoJSON file, keeping feature order
pub fn load_regions(path: &Path) -> Result<RegionTable> {
    info!("Loading regions from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read region file {}", path.display()))?;
    let regions = parse_regions(&content)
        .with_context(|| format!("Failed to parse region file {}", path.display()))?;

    info!("Loaded {} regions", regions.len());
    Ok(regions)
}

/// Parse regions from GeoJSON text.
///
/// Accepts a `FeatureCollection` or a single `Feature`. Features whose
/// geometry is not a (multi)polygon are skipped.
pub fn parse_regions(content: &str) -> Result<RegionTable> {
    let geojson: geojson::GeoJson = content.parse().context("Invalid GeoJSON")?;

    let features = match geojson {
        geojson::GeoJson::FeatureCollection(fc) => fc.features,
        geojson::GeoJson::Feature(feature) => vec![feature],
        geojson::GeoJson::Geometry(_) => bail!("Expected a Feature or FeatureCollection"),
    };

    // Field order: first-seen across all kept features
    let mut fields: Vec<String> = Vec::new();
    let mut kept = Vec::with_capacity(features.len());

    for (idx, feature) in features.into_iter().enumerate() {
        let geometry = match feature.geometry.as_ref().map(|g| to_multi_polygon(&g.value)) {
            Some(Ok(Some(mp))) => mp,
            Some(Ok(None)) => {
                warn!("Skipping feature {}: geometry is not a polygon", idx);
                continue;
            }
            Some(Err(e)) => {
                warn!("Skipping feature {}: {}", idx, e);
                continue;
            }
            None => {
                warn!("Skipping feature {}: no geometry", idx);
                continue;
            }
        };

        let mut properties: Vec<(String, Value)> = feature
            .properties
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect();

        let has_id_property = properties.iter().any(|(k, _)| k == "id");
        if let (Some(id), false) = (&feature.id, has_id_property) {
            let value = match id {
                geojson::feature::Id::String(s) => Value::Text(s.clone()),
                geojson::feature::Id::Number(n) => Value::from_json(&serde_json::Value::Number(n.clone())),
            };
            properties.push(("id".to_string(), value));
        }

        for (key, _) in &properties {
            if !fields.contains(key) {
                fields.push(key.clone());
            }
        }
        kept.push((geometry, properties));
    }

    let mut table = Table::new(fields.iter().cloned())?;
    let mut geometries = Vec::with_capacity(kept.len());

    for (geometry, properties) in kept {
        let row = fields
            .iter()
            .map(|field| {
                properties
                    .iter()
                    .find(|(k, _)| k == field)
                    .map(|(_, v)| v.clone())
                    .unwrap_or(Value::Null)
            })
            .collect();
        table.push_row(row)?;
        geometries.push(geometry);
    }

    let regions = RegionTable::new(table, geometries)?;
    debug!(
        "Parsed {} regions with fields [{}]",
        regions.len(),
        fields.join(", ")
    );
    Ok(regions)
}

fn to_multi_polygon(value: &geojson::Value) -> Result<Option<MultiPolygon<f64>>> {
    match value {
        geojson::Value::Polygon(_) => {
            let polygon: Polygon<f64> = value
                .clone()
                .try_into()
                .context("Failed to convert polygon")?;
            Ok(Some(MultiPolygon::new(vec![polygon])))
        }
        geojson::Value::MultiPolygon(_) => {
            let multi: MultiPolygon<f64> = value
                .clone()
                .try_into()
                .context("Failed to convert multipolygon")?;
            Ok(Some(multi))
        }
        _ => Ok(None),
    }
}
