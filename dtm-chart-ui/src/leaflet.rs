//! Leaflet-backed map surface and district event wiring.

use dtm_core::config::DistrictStyle;
use dtm_core::district::Bounds;
use dtm_core::map::{DistrictLayer, LayerSurface};

use crate::js_bridge;

/// Draws district layers into the Leaflet map living in `container_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafletSurface {
    container_id: String,
}

impl LeafletSurface {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl LayerSurface for LeafletSurface {
    fn draw_layers(&mut self, layers: &[DistrictLayer], bounds: Option<Bounds>) {
        let layers_json = match serde_json::to_string(layers) {
            Ok(json) => json,
            Err(e) => {
                log::error!("[DTM] leaflet: Failed to serialize district layers: {}", e);
                return;
            }
        };
        let bounds_json = serde_json::to_string(&bounds.map(|b| b.to_leaflet()))
            .unwrap_or_else(|_| "null".to_string());
        js_bridge::draw_district_layers(&self.container_id, &layers_json, &bounds_json);
    }

    fn restyle(&mut self, index: usize, style: &DistrictStyle) {
        let style_json = serde_json::to_string(style).unwrap_or_default();
        js_bridge::set_district_style(index, &style_json);
    }

    fn open_popup(&mut self, index: usize) {
        js_bridge::open_district_popup(index);
    }
}

/// Route the map script's hover events to Rust.
///
/// The script calls `window.__dtmDistrictEnter(index)` and
/// `window.__dtmDistrictLeave(index)`.
pub fn register_district_events(
    on_enter: impl FnMut(usize) + 'static,
    on_leave: impl FnMut(usize) + 'static,
) {
    js_bridge::set_window_callback("__dtmDistrictEnter", on_enter);
    js_bridge::set_window_callback("__dtmDistrictLeave", on_leave);
}
