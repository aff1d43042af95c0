//! Page bring-up: what loads when, and what a failure leaves behind.
//!
//! Order is tax data → chart → lookup → base map → district data → overlay.
//! The lookup is complete before any popup is built, since popups read it
//! synchronously, and the district dataset is only requested once the tax
//! dataset has loaded. A failed tax load stops everything; a failed district
//! load leaves the chart working on its own.

use crate::chart::{BarChart, BarSurface};
use crate::config::{MapConfig, PageConfig};
use crate::district::DistrictFeature;
use crate::map::{DistrictMap, LayerSurface};
use crate::record::{TaxLookup, TaxRecord};
use crate::Result;

/// How far initialization got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Waiting on the tax dataset
    Loading,
    /// Chart is up; the district dataset is pending or failed to load
    ChartReady,
    /// Chart and map are both up
    Ready,
    /// The tax dataset failed; nothing renders
    Failed,
}

/// Fetches and parses the two datasets.
#[allow(async_fn_in_trait)]
pub trait DataLoader {
    /// Tax records sorted ascending by rate.
    async fn load_tax_data(&self, url: &str) -> Result<Vec<TaxRecord>>;

    async fn load_districts(&self, url: &str) -> Result<Vec<DistrictFeature>>;
}

/// The page the session is brought up in.
pub trait SessionHost {
    type Bars: BarSurface;
    type Layers: LayerSurface;

    /// Surface the chart draws its bars on.
    fn bar_surface(&mut self) -> Self::Bars;

    /// Put up the base map (tiles, centre, zoom) and return the surface the
    /// district regions are drawn on.
    fn base_map(&mut self, config: &MapConfig) -> Self::Layers;

    fn chart_ready(&mut self, chart: BarChart<Self::Bars>);

    fn map_ready(&mut self, map: DistrictMap<Self::Layers>);

    fn set_phase(&mut self, phase: LoadPhase);
}

/// Bring the page up and return the phase it ended in.
///
/// Load errors are logged and end the sequence; they never propagate.
pub async fn initialize<L, H>(loader: &L, host: &mut H, config: &PageConfig) -> LoadPhase
where
    L: DataLoader,
    H: SessionHost,
{
    let tax_url = &config.sources.tax_url;
    let records = match loader.load_tax_data(tax_url).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Error loading {}: {}", tax_url, e);
            host.set_phase(LoadPhase::Failed);
            return LoadPhase::Failed;
        }
    };

    let chart = BarChart::new(&records, &config.chart, host.bar_surface());
    host.chart_ready(chart);
    let lookup = TaxLookup::from_records(&records);
    host.set_phase(LoadPhase::ChartReady);

    let layers = host.base_map(&config.map);

    let districts_url = &config.sources.districts_url;
    let districts = match loader.load_districts(districts_url).await {
        Ok(districts) => districts,
        Err(e) => {
            log::error!("Error loading {}: {}", districts_url, e);
            return LoadPhase::ChartReady;
        }
    };

    host.map_ready(DistrictMap::overlay(districts, &lookup, layers));
    host.set_phase(LoadPhase::Ready);
    LoadPhase::Ready
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::district::parse_districts;
    use crate::highlight::BarHighlightSink;
    use crate::record::parse_tax_records;
    use crate::testing::{RecordingBarSurface, RecordingLayers, GEO_FIXTURE, TAX_FIXTURE};
    use crate::DataLoadError;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct StubLoader {
        tax: Option<&'static str>,
        districts: Option<&'static str>,
        log: Log,
    }

    impl StubLoader {
        fn body(&self, url: &str, body: Option<&'static str>) -> Result<&'static str> {
            self.log.borrow_mut().push(format!("fetch {}", url));
            body.ok_or_else(|| DataLoadError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    impl DataLoader for StubLoader {
        async fn load_tax_data(&self, url: &str) -> Result<Vec<TaxRecord>> {
            parse_tax_records(self.body(url, self.tax)?)
        }

        async fn load_districts(&self, url: &str) -> Result<Vec<DistrictFeature>> {
            parse_districts(self.body(url, self.districts)?)
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        log: Log,
        phases: Vec<LoadPhase>,
        chart: Option<BarChart<RecordingBarSurface>>,
        map: Option<DistrictMap<RecordingLayers>>,
    }

    impl SessionHost for RecordingHost {
        type Bars = RecordingBarSurface;
        type Layers = RecordingLayers;

        fn bar_surface(&mut self) -> RecordingBarSurface {
            RecordingBarSurface::default()
        }

        fn base_map(&mut self, _config: &MapConfig) -> RecordingLayers {
            self.log.borrow_mut().push("base map".to_string());
            RecordingLayers::default()
        }

        fn chart_ready(&mut self, chart: BarChart<RecordingBarSurface>) {
            self.log.borrow_mut().push("chart".to_string());
            self.chart = Some(chart);
        }

        fn map_ready(&mut self, map: DistrictMap<RecordingLayers>) {
            self.log.borrow_mut().push("overlay".to_string());
            self.map = Some(map);
        }

        fn set_phase(&mut self, phase: LoadPhase) {
            self.phases.push(phase);
        }
    }

    fn run(
        tax: Option<&'static str>,
        districts: Option<&'static str>,
    ) -> (LoadPhase, RecordingHost) {
        let log = Log::default();
        let loader = StubLoader {
            tax,
            districts,
            log: log.clone(),
        };
        let mut host = RecordingHost {
            log,
            ..Default::default()
        };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let phase = runtime.block_on(initialize(&loader, &mut host, &PageConfig::default()));
        (phase, host)
    }

    fn logged(host: &RecordingHost) -> Vec<String> {
        host.log.borrow().clone()
    }

    #[test]
    fn test_loads_in_order() {
        let (phase, host) = run(Some(TAX_FIXTURE), Some(GEO_FIXTURE));
        assert_eq!(phase, LoadPhase::Ready);
        assert_eq!(
            logged(&host),
            vec![
                "fetch taxData.json",
                "chart",
                "base map",
                "fetch output_missouri_filtered.geojson",
                "overlay",
            ]
        );
        assert_eq!(host.phases, vec![LoadPhase::ChartReady, LoadPhase::Ready]);
    }

    #[test]
    fn test_popups_read_the_finished_lookup() {
        let (_, host) = run(Some(TAX_FIXTURE), Some(GEO_FIXTURE));
        let map = host.map.as_ref().unwrap();
        assert_eq!(map.layer("A").unwrap().popup, "A<br>Tax Rate: $5.50");
        assert_eq!(map.layer("B").unwrap().popup, "B<br>Tax Rate: $2.75");
        assert_eq!(map.layer("C").unwrap().popup, "C<br>Tax Rate: N/A");
    }

    #[test]
    fn test_tax_failure_stops_everything() {
        let (phase, host) = run(None, Some(GEO_FIXTURE));
        assert_eq!(phase, LoadPhase::Failed);
        assert_eq!(logged(&host), vec!["fetch taxData.json"]);
        assert_eq!(host.phases, vec![LoadPhase::Failed]);
        assert!(host.chart.is_none());
        assert!(host.map.is_none());
    }

    #[test]
    fn test_malformed_tax_data_fails() {
        let (phase, host) = run(Some("{not json"), Some(GEO_FIXTURE));
        assert_eq!(phase, LoadPhase::Failed);
        assert!(host.chart.is_none());
    }

    #[test]
    fn test_district_failure_keeps_chart_working() {
        let (phase, mut host) = run(Some(TAX_FIXTURE), None);
        assert_eq!(phase, LoadPhase::ChartReady);
        assert_eq!(host.phases, vec![LoadPhase::ChartReady]);
        assert!(logged(&host).contains(&"base map".to_string()));
        assert!(host.map.is_none());

        let chart = host.chart.as_mut().unwrap();
        // map requests land on the absent map and do nothing
        chart.pointer_enter(1, &mut host.map);
        assert!(chart.is_highlighted("A"));
        chart.activate(0, &mut host.map);
        chart.set_bar_highlighted("B", true);
        assert!(chart.is_highlighted("B"));
        assert!(host.map.is_none());
    }
}
