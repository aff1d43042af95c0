//! Cross-highlight contracts between the chart and the map.
//!
//! Neither view knows the other's type. The chart talks to a
//! [`MapHighlightSink`], the map talks to a [`BarHighlightSink`]. Both calls
//! are fire-and-forget: a name with no target is a silent no-op.
//!
//! `Option<S>` implements both traits so a view that has not been built yet
//! (or never will be, after a failed load) can be passed where a sink is
//! expected.

/// Implemented by the map view; called by chart bar events.
pub trait MapHighlightSink {
    /// Restyle the region for `name` to the highlighted or default fill.
    fn set_district_highlighted(&mut self, name: &str, on: bool);

    /// Open the info popup of the region for `name`. Returns `false` when no
    /// region exists for that name.
    fn open_district_popup(&mut self, name: &str) -> bool;
}

/// Implemented by the chart view; called by map region events.
pub trait BarHighlightSink {
    /// Clear every bar, then mark the bar for `name` if `on`.
    fn set_bar_highlighted(&mut self, name: &str, on: bool);

    fn request_bar_highlight(&mut self, name: &str) {
        self.set_bar_highlighted(name, true);
    }

    fn clear_bar_highlight(&mut self) {
        self.set_bar_highlighted("", false);
    }
}

impl<S: MapHighlightSink> MapHighlightSink for Option<S> {
    fn set_district_highlighted(&mut self, name: &str, on: bool) {
        if let Some(sink) = self {
            sink.set_district_highlighted(name, on);
        }
    }

    fn open_district_popup(&mut self, name: &str) -> bool {
        match self {
            Some(sink) => sink.open_district_popup(name),
            None => false,
        }
    }
}

impl<S: BarHighlightSink> BarHighlightSink for Option<S> {
    fn set_bar_highlighted(&mut self, name: &str, on: bool) {
        if let Some(sink) = self {
            sink.set_bar_highlighted(name, on);
        }
    }
}
