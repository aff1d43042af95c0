//! District boundaries from the geographic dataset.
//!
//! The dataset is a GeoJSON FeatureCollection; each feature carries its
//! district name in the `NAME` property. Feature order is irrelevant.

use geo::BoundingRect;
use geojson::{Feature, GeoJson};

use crate::{DataLoadError, Result};

/// Property holding the join key.
pub const NAME_PROPERTY: &str = "NAME";

/// Name used when a feature has no usable `NAME`.
pub const UNKNOWN_DISTRICT: &str = "Unknown";

/// A named district boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictFeature {
    pub name: String,
    /// Polygon or MultiPolygon, passed through to the map untouched
    pub geometry: geojson::Geometry,
}

impl DistrictFeature {
    /// Extract a district from a feature. Features without a geometry have
    /// nothing to draw and yield `None`.
    pub fn from_feature(feature: Feature) -> Option<Self> {
        let name = district_name(&feature);
        let geometry = feature.geometry?;
        Some(Self { name, geometry })
    }

    /// Bounding box of the boundary, if it converts to a geo geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        let geometry: geo::Geometry<f64> = self.geometry.value.clone().try_into().ok()?;
        let rect = geometry.bounding_rect()?;
        Some(Bounds {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        })
    }
}

/// `NAME` as a string, numbers stringified, anything else (or empty) is `Unknown`.
fn district_name(feature: &Feature) -> String {
    match feature.property(NAME_PROPERTY) {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => UNKNOWN_DISTRICT.to_string(),
    }
}

/// Parse the geographic dataset into districts.
pub fn parse_districts(geojson: &str) -> Result<Vec<DistrictFeature>> {
    let features = match geojson.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => return Err(DataLoadError::NotFeatureCollection("Geometry")),
    };

    let total = features.len();
    let districts: Vec<DistrictFeature> = features
        .into_iter()
        .filter_map(DistrictFeature::from_feature)
        .collect();

    if districts.len() < total {
        log::warn!(
            "[DTM] district: Skipped {} features without geometry",
            total - districts.len()
        );
    }
    log::info!("[DTM] district: Parsed {} districts", districts.len());
    Ok(districts)
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Leaflet `LatLngBounds` literal: `[[south, west], [north, east]]`.
    pub fn to_leaflet(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// Union of all district bounds, `None` when nothing has an extent.
pub fn union_bounds<'a>(districts: impl IntoIterator<Item = &'a DistrictFeature>) -> Option<Bounds> {
    districts
        .into_iter()
        .filter_map(DistrictFeature::bounds)
        .reduce(|acc, b| acc.union(&b))
}
