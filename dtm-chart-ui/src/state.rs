//! Page session state managed via Dioxus context.
//!
//! `AppState` bundles the page's reactive signals into a single struct provided
//! via `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. It owns both views; neither view holds the
//! other, they only meet inside the event methods below, where each is passed
//! to the other as a highlight sink.

use dioxus::prelude::*;
use dtm_core::chart::BarChart;
use dtm_core::config::{MapConfig, PageConfig};
use dtm_core::map::DistrictMap;
use dtm_core::session::{self, SessionHost};

pub use dtm_core::session::LoadPhase;

use crate::d3_chart::{register_bar_events, D3BarSurface};
use crate::js_bridge;
use crate::leaflet::{register_district_events, LeafletSurface};
use crate::loader::FetchLoader;

/// Shared page state.
#[derive(Clone, Copy)]
pub struct AppState {
    pub phase: Signal<LoadPhase>,
    /// Ranked bar chart (None until the tax dataset loads)
    pub chart: Signal<Option<BarChart<D3BarSurface>>>,
    /// District regions (None until the district dataset loads)
    pub map: Signal<Option<DistrictMap<LeafletSurface>>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            phase: Signal::new(LoadPhase::Loading),
            chart: Signal::new(None),
            map: Signal::new(None),
        }
    }

    /// Pointer entered bar `index`.
    pub fn bar_enter(&mut self, index: usize) {
        let mut map = self.map.write();
        if let Some(chart) = self.chart.write().as_mut() {
            chart.pointer_enter(index, &mut *map);
        }
    }

    /// Pointer left bar `index`.
    pub fn bar_leave(&mut self, index: usize) {
        let mut map = self.map.write();
        if let Some(chart) = self.chart.write().as_mut() {
            chart.pointer_leave(index, &mut *map);
        }
    }

    /// Bar `index` clicked.
    pub fn bar_click(&mut self, index: usize) {
        let mut map = self.map.write();
        if let Some(chart) = self.chart.write().as_mut() {
            chart.activate(index, &mut *map);
        }
    }

    /// Pointer entered map region `index`.
    pub fn district_enter(&mut self, index: usize) {
        let mut chart = self.chart.write();
        if let Some(map) = self.map.write().as_mut() {
            map.pointer_enter(index, &mut *chart);
        }
    }

    /// Pointer left map region `index`.
    pub fn district_leave(&mut self, index: usize) {
        let mut chart = self.chart.write();
        if let Some(map) = self.map.write().as_mut() {
            map.pointer_leave(index, &mut *chart);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// The browser page: D3 chart and Leaflet map in two DOM containers, with
/// their events routed back into `AppState`.
struct PageHost {
    state: AppState,
    chart_container_id: &'static str,
    map_container_id: &'static str,
}

impl SessionHost for PageHost {
    type Bars = D3BarSurface;
    type Layers = LeafletSurface;

    fn bar_surface(&mut self) -> D3BarSurface {
        js_bridge::init_chart_scripts();
        let mut state = self.state;
        register_bar_events(
            move |index| state.bar_enter(index),
            move |index| state.bar_leave(index),
            move |index| state.bar_click(index),
        );
        D3BarSurface::new(self.chart_container_id)
    }

    fn base_map(&mut self, config: &MapConfig) -> LeafletSurface {
        js_bridge::init_map_scripts();
        match serde_json::to_string(config) {
            Ok(map_json) => js_bridge::render_base_map(self.map_container_id, &map_json),
            Err(e) => log::error!("[DTM] state: Failed to serialize map config: {}", e),
        }
        let mut state = self.state;
        register_district_events(
            move |index| state.district_enter(index),
            move |index| state.district_leave(index),
        );
        LeafletSurface::new(self.map_container_id)
    }

    fn chart_ready(&mut self, chart: BarChart<D3BarSurface>) {
        self.state.chart.set(Some(chart));
    }

    fn map_ready(&mut self, map: DistrictMap<LeafletSurface>) {
        self.state.map.set(Some(map));
    }

    fn set_phase(&mut self, phase: LoadPhase) {
        self.state.phase.set(phase);
    }
}

/// Fetch both datasets and bring the chart and map up in `state`.
pub async fn initialize(
    state: AppState,
    config: PageConfig,
    chart_container_id: &'static str,
    map_container_id: &'static str,
) -> LoadPhase {
    let mut host = PageHost {
        state,
        chart_container_id,
        map_container_id,
    };
    session::initialize(&FetchLoader, &mut host, &config).await
}
