//! D3-backed bar surface and bar event wiring.

use dtm_core::chart::{BarDatum, BarSurface};
use dtm_core::config::ChartConfig;

use crate::js_bridge;

/// Draws the ranked bars into the D3 chart living in `container_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct D3BarSurface {
    container_id: String,
}

impl D3BarSurface {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl BarSurface for D3BarSurface {
    fn draw_bars(&mut self, bars: &[BarDatum], domain: [f64; 2], config: &ChartConfig) {
        let (bars_json, domain_json, config_json) = match (
            serde_json::to_string(bars),
            serde_json::to_string(&domain),
            serde_json::to_string(config),
        ) {
            (Ok(b), Ok(d), Ok(c)) => (b, d, c),
            _ => {
                log::error!("[DTM] d3_chart: Failed to serialize bar chart data");
                return;
            }
        };
        js_bridge::render_tax_bar_chart(&self.container_id, &bars_json, &domain_json, &config_json);
    }

    fn show_highlight(&mut self, name: Option<&str>) {
        js_bridge::set_bar_highlighted(name);
    }
}

/// Route the chart script's bar events to Rust.
///
/// The script calls `window.__dtmBarEnter(index)`, `window.__dtmBarLeave(index)`
/// and `window.__dtmBarClick(index)`.
pub fn register_bar_events(
    on_enter: impl FnMut(usize) + 'static,
    on_leave: impl FnMut(usize) + 'static,
    on_click: impl FnMut(usize) + 'static,
) {
    js_bridge::set_window_callback("__dtmBarEnter", on_enter);
    js_bridge::set_window_callback("__dtmBarLeave", on_leave);
    js_bridge::set_window_callback("__dtmBarClick", on_click);
}
