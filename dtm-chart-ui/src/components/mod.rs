//! Dioxus RSX components for the district tax map page.

mod chart_container;
mod chart_header;
mod loading_spinner;
mod map_container;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
