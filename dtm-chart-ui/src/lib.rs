//! Shared Dioxus components and D3/Leaflet bridge for the district tax map.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3 chart and Leaflet map functions via `js_sys::eval()`
//! - `d3_chart` / `leaflet`: the browser surfaces the `dtm-core` views draw on
//! - `loader`: dataset fetching over `window.fetch`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components

pub mod components;
pub mod d3_chart;
pub mod js_bridge;
pub mod leaflet;
pub mod loader;
pub mod state;
