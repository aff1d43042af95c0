//! Ranked horizontal bar chart: bar data and highlight state.
//!
//! [`BarChart`] is built once from the sorted tax records. It decides bar
//! order, labels and the value each bar is drawn to, and it owns the single
//! "which bar is highlighted" slot that both the chart's own pointer events and
//! the map's cross-highlight requests drive. Scales, axes and SVG belong to a
//! [`BarSurface`] (the D3 chart in the browser, a recorder in tests).

use serde::Serialize;

use crate::config::ChartConfig;
use crate::highlight::{BarHighlightSink, MapHighlightSink};
use crate::record::TaxRecord;

/// One bar as handed to the chart script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    /// Position in draw order; bar events address bars by this index
    pub index: usize,
    pub name: String,
    pub tax: f64,
    /// Where the bar ends on the value axis: `tax`, raised to the floor when below it
    pub value: f64,
    pub label: String,
}

/// Whatever actually draws the bars.
pub trait BarSurface {
    /// Draw one bar per datum, in order, against a value axis spanning `domain`.
    fn draw_bars(&mut self, bars: &[BarDatum], domain: [f64; 2], config: &ChartConfig);

    /// Mark the bar for `name` and unmark every other one. `None` clears all.
    fn show_highlight(&mut self, name: Option<&str>);
}

#[derive(Debug)]
pub struct BarChart<S> {
    bars: Vec<BarDatum>,
    domain: [f64; 2],
    highlighted: Option<String>,
    surface: S,
}

impl<S: BarSurface> BarChart<S> {
    /// Draw `records` (already sorted ascending by rate) on `surface`, one bar each.
    ///
    /// The value axis runs from `config.value_floor` to the largest rate. Rates
    /// below the floor are drawn at the floor, so they all look the same while
    /// their labels keep the real value.
    pub fn new(records: &[TaxRecord], config: &ChartConfig, mut surface: S) -> Self {
        let floor = config.value_floor;
        let bars: Vec<BarDatum> = records
            .iter()
            .enumerate()
            .map(|(index, r)| BarDatum {
                index,
                name: r.name.clone(),
                tax: r.tax,
                value: r.tax.max(floor),
                label: r.rate_label(),
            })
            .collect();
        let top = bars.iter().map(|b| b.value).fold(floor, f64::max);
        let domain = [floor, top];

        surface.draw_bars(&bars, domain, config);
        log::info!("[DTM] chart: Drew {} bars", bars.len());

        Self {
            bars,
            domain,
            highlighted: None,
            surface,
        }
    }

    pub fn bars(&self) -> &[BarDatum] {
        &self.bars
    }

    /// `[floor, max]` of the value axis. Never inverted.
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn is_highlighted(&self, name: &str) -> bool {
        self.highlighted.as_deref() == Some(name)
    }

    fn has_bar(&self, name: &str) -> bool {
        self.bars.iter().any(|b| b.name == name)
    }

    fn bar_name(&self, index: usize) -> Option<String> {
        self.bars.get(index).map(|b| b.name.clone())
    }

    /// Move the highlight slot; the surface only hears about actual changes.
    fn set_highlight(&mut self, name: Option<String>) {
        if self.highlighted != name {
            self.highlighted = name;
            self.surface.show_highlight(self.highlighted.as_deref());
        }
    }

    /// Pointer entered bar `index`: mark it and highlight its region.
    pub fn pointer_enter(&mut self, index: usize, map: &mut impl MapHighlightSink) {
        let Some(name) = self.bar_name(index) else {
            return;
        };
        map.set_district_highlighted(&name, true);
        self.set_highlight(Some(name));
    }

    /// Pointer left bar `index`: unmark it and restore its region.
    pub fn pointer_leave(&mut self, index: usize, map: &mut impl MapHighlightSink) {
        let Some(name) = self.bar_name(index) else {
            return;
        };
        if self.is_highlighted(&name) {
            self.set_highlight(None);
        }
        map.set_district_highlighted(&name, false);
    }

    /// Bar `index` clicked: highlight its region and open the region popup.
    pub fn activate(&mut self, index: usize, map: &mut impl MapHighlightSink) {
        let Some(name) = self.bar_name(index) else {
            return;
        };
        map.set_district_highlighted(&name, true);
        if !map.open_district_popup(&name) {
            log::debug!("[DTM] chart: No map region for {}", name);
        }
    }
}

impl<S: BarSurface> BarHighlightSink for BarChart<S> {
    fn set_bar_highlighted(&mut self, name: &str, on: bool) {
        let next = (on && self.has_bar(name)).then(|| name.to_string());
        self.set_highlight(next);
    }
}
