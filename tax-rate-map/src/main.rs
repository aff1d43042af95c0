//! District Tax Rates
//!
//! Shows one tax rate per district twice: as a ranked horizontal bar chart
//! (lowest rate on top) and as district regions on a Leaflet map. Hovering a
//! bar highlights its region and vice versa; clicking a bar opens the
//! region's popup.
//!
//! Data flow:
//! 1. On mount, `taxData.json` is fetched, parsed and sorted by rate.
//! 2. The D3 bar chart is drawn from the sorted records and the name → rate
//!    lookup is built.
//! 3. The Leaflet base map is created, then the district GeoJSON is fetched
//!    and overlaid with popups annotated from the lookup.
//!
//! Both datasets are served as static files next to the page. A failure in
//! either is logged to the console; the page does not retry.

use dioxus::prelude::*;
use dtm_chart_ui::components::{ChartContainer, ChartHeader, LoadingSpinner, MapContainer};
use dtm_chart_ui::js_bridge;
use dtm_chart_ui::state::{initialize, AppState, LoadPhase};
use dtm_core::config::PageConfig;

/// DOM element id D3 renders into.
const CHART_CONTAINER_ID: &str = "tax-bar-chart";
/// DOM element id Leaflet renders into.
const MAP_CONTAINER_ID: &str = "district-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("tax-rate-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    // Load both datasets and build the views on mount
    use_effect(move || {
        spawn(async move {
            log::info!("Initializing district tax map");
            initialize(state, PageConfig::default(), CHART_CONTAINER_ID, MAP_CONTAINER_ID).await;
        });
    });

    use_drop(move || {
        js_bridge::destroy_chart(CHART_CONTAINER_ID);
        js_bridge::destroy_map(MAP_CONTAINER_ID);
    });

    let phase = (state.phase)();

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            if phase == LoadPhase::Loading {
                LoadingSpinner { label: "Loading tax rates...".to_string() }
            } else if phase != LoadPhase::Failed {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 24px; align-items: flex-start;",

                    // Ranked bar chart
                    div {
                        style: "flex: 1 1 360px; max-width: 520px;",
                        ChartHeader {
                            title: "Tax Rate by District".to_string(),
                            caption: "Sorted lowest to highest. Hover a bar to find the district on the map; click to open its details.".to_string(),
                        }
                        ChartContainer {
                            id: CHART_CONTAINER_ID.to_string(),
                            min_height: 600,
                        }
                    }

                    // District map
                    div {
                        style: "flex: 2 1 480px;",
                        ChartHeader {
                            title: "District Map".to_string(),
                            caption: "Hover a district to find its bar.".to_string(),
                        }
                        MapContainer {
                            id: MAP_CONTAINER_ID.to_string(),
                            height: 600,
                        }
                    }
                }
            }
        }
    }
}
