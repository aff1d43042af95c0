//! Fixed page configuration.
//!
//! The page has no environment variables or config files; every tunable lives
//! in one of these structs with a `Default` holding the production values.
//! Structs handed to the JS bridge serialize with camelCase keys so the D3
//! chart and Leaflet option objects can be passed through unchanged.

use serde::Serialize;

/// Where the two static datasets are fetched from, relative to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSources {
    /// JSON array of `{name, tax}` records
    pub tax_url: String,
    /// GeoJSON FeatureCollection with a `NAME` property per feature
    pub districts_url: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            tax_url: "taxData.json".to_string(),
            districts_url: "output_missouri_filtered.geojson".to_string(),
        }
    }
}

/// Everything the page session needs to initialize, in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageConfig {
    pub sources: DataSources,
    pub chart: ChartConfig,
    pub map: MapConfig,
}

/// Margins around the inner plotting area, in viewBox units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Geometry and styling of the ranked bar chart.
///
/// `width`/`height` define the internal coordinate system (the SVG viewBox);
/// the browser scales it to fit the host container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Lower end of the value axis. Not zero: rates below it all render as empty bars.
    pub value_floor: f64,
    /// Inner and outer band padding as a fraction of the band step
    pub band_padding: f64,
    /// Gap between the end of a bar and its rate label
    pub label_offset: f64,
    pub label_font_size: u32,
    pub label_color: String,
    pub bar_color: String,
    pub highlight_color: String,
    /// Approximate number of ticks on the value axis
    pub tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 750.0,
            margin: Margin {
                top: 20.0,
                right: 50.0,
                bottom: 20.0,
                left: 170.0,
            },
            value_floor: 2.5,
            band_padding: 0.1,
            label_offset: 5.0,
            label_font_size: 10,
            label_color: "#333".to_string(),
            bar_color: "steelblue".to_string(),
            highlight_color: DistrictStyle::ACCENT.to_string(),
            tick_count: 10,
        }
    }
}

/// Base map options passed to `L.map(...)` and `L.tileLayer(...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
    /// Off so the map does not hijack page scrolling
    pub scroll_wheel_zoom: bool,
    pub tap: bool,
    pub tile_url: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [38.5767, -92.1735],
            zoom: 7,
            scroll_wheel_zoom: false,
            tap: false,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution:
                "&copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a>".to_string(),
        }
    }
}

/// Leaflet path style for one district region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStyle {
    /// Outline color
    pub color: String,
    /// Outline width in pixels
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl DistrictStyle {
    /// Accent fill shared by highlighted regions and highlighted bars.
    pub const ACCENT: &'static str = "#fc8d62";

    /// Resting style: light gray at 60% over a 1px black outline.
    pub fn default_fill() -> Self {
        Self {
            color: "black".to_string(),
            weight: 1.0,
            fill_color: "lightgray".to_string(),
            fill_opacity: 0.6,
        }
    }

    /// Hover/selection style: accent fill at 80%, same outline.
    pub fn highlighted() -> Self {
        Self {
            fill_color: Self::ACCENT.to_string(),
            fill_opacity: 0.8,
            ..Self::default_fill()
        }
    }

    pub fn for_state(highlighted: bool) -> Self {
        if highlighted {
            Self::highlighted()
        } else {
            Self::default_fill()
        }
    }
}
