//! Recording doubles shared by the chart, map and session tests.

use std::collections::HashMap;

use crate::chart::{BarDatum, BarSurface};
use crate::config::{ChartConfig, DistrictStyle};
use crate::district::Bounds;
use crate::highlight::{BarHighlightSink, MapHighlightSink};
use crate::map::{DistrictLayer, LayerSurface};

pub const TAX_FIXTURE: &str = include_str!("../../fixtures/taxData.json");
pub const GEO_FIXTURE: &str = include_str!("../../fixtures/districts.geojson");

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<(String, bool)>,
    pub popups: Vec<String>,
    pub known: Vec<String>,
}

impl MapHighlightSink for RecordingMap {
    fn set_district_highlighted(&mut self, name: &str, on: bool) {
        self.calls.push((name.to_string(), on));
    }

    fn open_district_popup(&mut self, name: &str) -> bool {
        if self.known.iter().any(|k| k == name) {
            self.popups.push(name.to_string());
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingBars {
    pub calls: Vec<(String, bool)>,
}

impl BarHighlightSink for RecordingBars {
    fn set_bar_highlighted(&mut self, name: &str, on: bool) {
        self.calls.push((name.to_string(), on));
    }
}

/// Stands in for the D3 chart.
#[derive(Debug, Default, PartialEq)]
pub struct RecordingBarSurface {
    pub drawn: Vec<BarDatum>,
    pub domain: Option<[f64; 2]>,
    pub highlights: Vec<Option<String>>,
}

impl RecordingBarSurface {
    /// Highlight the chart currently shows.
    pub fn shown(&self) -> Option<&str> {
        self.highlights.last().and_then(|h| h.as_deref())
    }
}

impl BarSurface for RecordingBarSurface {
    fn draw_bars(&mut self, bars: &[BarDatum], domain: [f64; 2], _config: &ChartConfig) {
        self.drawn = bars.to_vec();
        self.domain = Some(domain);
    }

    fn show_highlight(&mut self, name: Option<&str>) {
        self.highlights.push(name.map(str::to_string));
    }
}

/// Stands in for the Leaflet map.
#[derive(Debug, Default)]
pub struct RecordingLayers {
    pub drawn: Vec<(String, String)>,
    pub fitted: Option<Bounds>,
    pub styles: HashMap<usize, DistrictStyle>,
    pub restyles: usize,
    pub popups: Vec<usize>,
}

impl RecordingLayers {
    pub fn highlighted_count(&self) -> usize {
        self.styles
            .values()
            .filter(|s| **s == DistrictStyle::highlighted())
            .count()
    }
}

impl LayerSurface for RecordingLayers {
    fn draw_layers(&mut self, layers: &[DistrictLayer], bounds: Option<Bounds>) {
        for layer in layers {
            self.drawn.push((layer.name.clone(), layer.popup.clone()));
            self.styles.insert(layer.index, layer.style.clone());
        }
        self.fitted = bounds;
    }

    fn restyle(&mut self, index: usize, style: &DistrictStyle) {
        self.styles.insert(index, style.clone());
        self.restyles += 1;
    }

    fn open_popup(&mut self, index: usize) {
        self.popups.push(index);
    }
}
