//! Core types and view logic for the district tax map.
//!
//! This crate has no browser dependencies and is tested natively. It provides:
//! - `record` / `district`: parsing of the two datasets (the DataLoader half that
//!   does not touch the network), the sorted tax records and the name → rate lookup
//! - `chart`: bar order, labels and the chart's highlight state
//! - `map`: the district layer registry, popups and region styles
//! - `highlight`: the two narrow sink contracts the views use to talk to each other
//! - `session`: load order and failure handling for the whole page
//! - `config`: fixed page configuration serialized for the JS bridge
//!
//! The browser side (`dtm-chart-ui`) owns fetching and drawing. It plugs a D3
//! [`chart::BarSurface`] and a Leaflet [`map::LayerSurface`] into the views
//! and runs [`session::initialize`].

pub mod chart;
pub mod config;
pub mod district;
pub mod error;
pub mod highlight;
pub mod map;
pub mod record;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DataLoadError, Result};
