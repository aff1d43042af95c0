//! District regions on the map: popups, styles and the name → layer registry.
//!
//! [`DistrictMap`] is the map half of the page. It decides what every region
//! shows and how it is styled; the actual drawing is delegated to a
//! [`LayerSurface`] (Leaflet in the browser, a recorder in tests). The
//! name → layer index it builds is the only thing the chart ever reaches
//! through, via [`MapHighlightSink`].

use serde::Serialize;
use std::collections::HashMap;

use crate::config::DistrictStyle;
use crate::district::{union_bounds, Bounds, DistrictFeature};
use crate::highlight::{BarHighlightSink, MapHighlightSink};
use crate::record::TaxLookup;

/// Popup HTML for a district: its name and looked-up rate, or `N/A`.
pub fn popup_text(name: &str, lookup: &TaxLookup) -> String {
    format!("{}<br>Tax Rate: {}", name, lookup.rate_label(name))
}

/// The rendered handle for one district. Serializes as the per-layer payload
/// handed to the map script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictLayer {
    /// Position in draw order; the surface addresses layers by this index
    pub index: usize,
    pub name: String,
    pub popup: String,
    pub style: DistrictStyle,
    pub geometry: geojson::Geometry,
}

/// Whatever actually puts regions on screen.
pub trait LayerSurface {
    /// Draw every layer with its popup and style, then fit the viewport to
    /// `bounds` when there is one.
    fn draw_layers(&mut self, layers: &[DistrictLayer], bounds: Option<Bounds>);

    fn restyle(&mut self, index: usize, style: &DistrictStyle);

    fn open_popup(&mut self, index: usize);
}

#[derive(Debug)]
pub struct DistrictMap<S> {
    layers: Vec<DistrictLayer>,
    by_name: HashMap<String, usize>,
    highlighted: Option<usize>,
    bounds: Option<Bounds>,
    surface: S,
}

impl<S: LayerSurface> DistrictMap<S> {
    /// Overlay `features` on `surface`, one styled region each, with popups
    /// annotated from `lookup`.
    ///
    /// Every feature is drawn. When two features share a name the later one
    /// owns the name in the registry.
    pub fn overlay(features: Vec<DistrictFeature>, lookup: &TaxLookup, mut surface: S) -> Self {
        let bounds = union_bounds(&features);

        let mut by_name = HashMap::with_capacity(features.len());
        let layers: Vec<DistrictLayer> = features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| {
                by_name.insert(feature.name.clone(), index);
                DistrictLayer {
                    index,
                    popup: popup_text(&feature.name, lookup),
                    name: feature.name,
                    style: DistrictStyle::default_fill(),
                    geometry: feature.geometry,
                }
            })
            .collect();

        let unmatched = by_name.keys().filter(|n| lookup.get(n).is_none()).count();
        if unmatched > 0 {
            log::warn!("[DTM] map: {} districts have no tax record", unmatched);
        }

        surface.draw_layers(&layers, bounds);
        log::info!("[DTM] map: Overlaid {} districts", layers.len());

        Self {
            layers,
            by_name,
            highlighted: None,
            bounds,
            surface,
        }
    }

    pub fn layers(&self) -> &[DistrictLayer] {
        &self.layers
    }

    /// The registered layer for `name`.
    pub fn layer(&self, name: &str) -> Option<&DistrictLayer> {
        self.by_name.get(name).map(|&i| &self.layers[i])
    }

    /// Union of all region bounds the viewport was fit to.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.map(|i| self.layers[i].name.as_str())
    }

    pub fn is_highlighted(&self, name: &str) -> bool {
        self.highlighted() == Some(name)
    }

    /// Pointer entered region `index`: highlight it and its bar.
    pub fn pointer_enter(&mut self, index: usize, bars: &mut impl BarHighlightSink) {
        if index >= self.layers.len() {
            return;
        }
        self.set_layer_highlighted(index, true);
        bars.request_bar_highlight(&self.layers[index].name);
    }

    /// Pointer left region `index`: restore it and clear the bar highlight.
    pub fn pointer_leave(&mut self, index: usize, bars: &mut impl BarHighlightSink) {
        if index >= self.layers.len() {
            return;
        }
        self.set_layer_highlighted(index, false);
        bars.clear_bar_highlight();
    }

    /// Clear-then-set: turning a region on first restores whichever region
    /// was highlighted before.
    fn set_layer_highlighted(&mut self, index: usize, on: bool) {
        if on {
            if let Some(prev) = self.highlighted.filter(|&p| p != index) {
                self.apply_style(prev, false);
            }
            self.highlighted = Some(index);
        } else if self.highlighted == Some(index) {
            self.highlighted = None;
        }
        self.apply_style(index, on);
    }

    fn apply_style(&mut self, index: usize, on: bool) {
        let style = DistrictStyle::for_state(on);
        self.surface.restyle(index, &style);
        self.layers[index].style = style;
    }
}

impl<S: LayerSurface> MapHighlightSink for DistrictMap<S> {
    fn set_district_highlighted(&mut self, name: &str, on: bool) {
        if let Some(&index) = self.by_name.get(name) {
            self.set_layer_highlighted(index, on);
        }
    }

    fn open_district_popup(&mut self, name: &str) -> bool {
        match self.by_name.get(name) {
            Some(&index) => {
                self.surface.open_popup(index);
                true
            }
            None => false,
        }
    }
}
