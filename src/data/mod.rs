//! Loading of district boundaries and market markers.

use crate::map::{MapRenderer, Ring};
use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A marker record as found in `{"coordinates": [{"type": "point", "lon": .., "lat": ..}]}`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MarkerRecord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Deserialize)]
struct MarkerGeometry {
    coordinates: Vec<f64>,
}

#[derive(Deserialize)]
struct MarkerFeature {
    geometry: Option<MarkerGeometry>,
}

/// Marker files come either as a flat coordinate list or as GeoJSON-like point features
#[derive(Deserialize)]
#[serde(untagged)]
enum MarkerDocument {
    Coordinates { coordinates: Vec<MarkerRecord> },
    Features { features: Vec<MarkerFeature> },
}

/// Load the boundary outline and the markers into the renderer.
///
/// The renderer projects and condenses what it receives.
pub fn load_all(renderer: &mut MapRenderer, outline_path: &Path, markers_path: &Path) -> Result<()> {
    let rings = load_outline(outline_path)?;
    renderer.set_outline(&rings);

    let markers = load_markers(markers_path)?;
    renderer.set_markers(&markers);
    Ok(())
}

/// Load boundary rings from a GeoJSON file
pub fn load_outline(path: &Path) -> Result<Vec<Ring>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading outline {}", path.display()))?;
    let rings = parse_outline(&content).with_context(|| format!("parsing outline {}", path.display()))?;
    info!(path = %path.display(), rings = rings.len(), "loaded outline");
    Ok(rings)
}

/// Every ring of every polygon in the document, in document order
pub fn parse_outline(content: &str) -> Result<Vec<Ring>> {
    let geojson: GeoJson = content.parse()?;
    let mut rings = Vec::new();
    process_geojson_rings(&geojson, &mut |ring| rings.push(ring));
    Ok(rings)
}

/// Load marker coordinates (lon, lat) in file order
pub fn load_markers(path: &Path) -> Result<Vec<(f64, f64)>> {
    let mut bytes = fs::read(path).with_context(|| format!("reading markers {}", path.display()))?;
    let markers = parse_markers(&mut bytes).with_context(|| format!("parsing markers {}", path.display()))?;
    info!(path = %path.display(), markers = markers.len(), "loaded markers");
    Ok(markers)
}

/// Parse either marker format. Records without two finite coordinates are skipped.
pub fn parse_markers(bytes: &mut [u8]) -> Result<Vec<(f64, f64)>> {
    let document: MarkerDocument = simd_json::serde::from_slice(bytes)
        .context("expected an object with a `coordinates` or `features` array")?;

    let raw: Vec<Option<(f64, f64)>> = match document {
        MarkerDocument::Coordinates { coordinates } => {
            coordinates.into_iter().map(|r| Some((r.lon, r.lat))).collect()
        }
        MarkerDocument::Features { features } => features
            .into_iter()
            .map(|f| match f.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
                Some([lon, lat, ..]) => Some((*lon, *lat)),
                _ => None,
            })
            .collect(),
    };

    let total = raw.len();
    let markers: Vec<(f64, f64)> = raw
        .into_iter()
        .flatten()
        .filter(|(lon, lat)| lon.is_finite() && lat.is_finite())
        .collect();

    if markers.len() < total {
        warn!(skipped = total - markers.len(), "skipped markers without usable coordinates");
    }
    Ok(markers)
}

fn process_geojson_rings<F>(geojson: &GeoJson, add_ring: &mut F)
where
    F: FnMut(Ring),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    process_geometry_rings(geometry, add_ring);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_rings(geometry, add_ring);
            }
        }
        GeoJson::Geometry(geometry) => process_geometry_rings(geometry, add_ring),
    }
}

fn process_geometry_rings<F>(geometry: &Geometry, add_ring: &mut F)
where
    F: FnMut(Ring),
{
    match &geometry.value {
        Value::Polygon(rings) => {
            for ring in rings {
                add_ring(ring.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::MultiPolygon(polygons) => {
            for ring in polygons.iter().flatten() {
                add_ring(ring.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_rings(g, add_ring);
            }
        }
        _ => debug!("ignoring non-polygon outline geometry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_markers() {
        let mut json = br#"{"coordinates": [
            {"type": "point", "lon": 13.359232, "lat": 52.546674},
            {"type": "point", "lon": 13.4, "lat": 52.5}
        ]}"#
        .to_vec();
        let markers = parse_markers(&mut json).unwrap();
        assert_eq!(markers, vec![(13.359232, 52.546674), (13.4, 52.5)]);
    }

    #[test]
    fn test_parse_feature_markers() {
        let mut json = br#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [13.504807966473637, 52.61959821024611]}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [13.1]}},
            {"type": "Feature", "geometry": null}
        ]}"#
        .to_vec();
        let markers = parse_markers(&mut json).unwrap();
        assert_eq!(markers, vec![(13.504807966473637, 52.61959821024611)]);
    }

    #[test]
    fn test_parse_markers_rejects_unknown_shape() {
        let mut json = br#"{"points": []}"#.to_vec();
        assert!(parse_markers(&mut json).is_err());
    }

    #[test]
    fn test_missing_files_name_the_path() {
        let dir = std::env::temp_dir().join(format!("condense-map-missing-{}", std::process::id()));
        let outline = dir.join("no_outline.geojson");
        let markers = dir.join("no_markers.json");

        let err = load_outline(&outline).unwrap_err();
        assert!(format!("{:#}", err).contains("no_outline.geojson"));

        let err = load_markers(&markers).unwrap_err();
        assert!(format!("{:#}", err).contains("no_markers.json"));
    }

    #[test]
    fn test_load_all_from_files() {
        let dir = std::env::temp_dir().join(format!("condense-map-load-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let outline = dir.join("outline.geojson");
        let markers = dir.join("markers.json");
        fs::write(
            &outline,
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}, "geometry":
                {"type": "Polygon", "coordinates": [[[13.0, 52.4], [13.1, 52.4], [13.1, 52.5], [13.0, 52.4]]]}}]}"#,
        )
        .unwrap();
        fs::write(&markers, r#"{"coordinates": [{"type": "point", "lon": 13.4, "lat": 52.5}]}"#).unwrap();

        let mut renderer = MapRenderer::new(&crate::Settings::default());
        load_all(&mut renderer, &outline, &markers).unwrap();
        assert_eq!(renderer.outline().len(), 1);
        assert_eq!(renderer.centers().len(), 1);

        let broken = dir.join("broken.json");
        fs::write(&broken, b"{not json").unwrap();
        let err = load_markers(&broken).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_outline_all_rings() {
        let content = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"Gemeinde_name": "Mitte"}, "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[13.3, 52.5], [13.4, 52.5], [13.4, 52.6], [13.3, 52.5]],
                 [[13.33, 52.52], [13.35, 52.52], [13.35, 52.53], [13.33, 52.52]]],
                [[[13.5, 52.4], [13.6, 52.4], [13.6, 52.45], [13.5, 52.4]]]
            ]}},
            {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [
                [[13.0, 52.4], [13.1, 52.4], [13.1, 52.5], [13.0, 52.4]]
            ]}},
            {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [13.0, 52.4]}}
        ]}"#;
        let rings = parse_outline(content).unwrap();
        assert_eq!(rings.len(), 4);
        assert_eq!(rings[0][0], (13.3, 52.5));
        assert_eq!(rings[1].len(), 4);
        assert_eq!(rings[3][2], (13.1, 52.5));
    }
}
