//! Dataset fetching for the page.
//!
//! Both datasets are static files served next to the page. Each is fetched
//! with `window.fetch`, read as text and handed to the `dtm-core` parsers,
//! which sort the tax records and extract district names and boundaries.

use dtm_core::district::{parse_districts, DistrictFeature};
use dtm_core::record::{parse_tax_records, TaxRecord};
use dtm_core::session::DataLoader;
use dtm_core::{DataLoadError, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Fetch the tax dataset and return its records sorted ascending by rate.
pub async fn load_tax_data(url: &str) -> Result<Vec<TaxRecord>> {
    let body = fetch_text(url).await?;
    parse_tax_records(&body)
}

/// Fetch the geographic dataset and return its districts.
pub async fn load_districts(url: &str) -> Result<Vec<DistrictFeature>> {
    let body = fetch_text(url).await?;
    parse_districts(&body)
}

/// Loads both datasets over `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchLoader;

impl DataLoader for FetchLoader {
    async fn load_tax_data(&self, url: &str) -> Result<Vec<TaxRecord>> {
        load_tax_data(url).await
    }

    async fn load_districts(&self, url: &str) -> Result<Vec<DistrictFeature>> {
        load_districts(url).await
    }
}

/// GET `url` and return the body. Non-2xx responses are errors.
pub async fn fetch_text(url: &str) -> Result<String> {
    let window = web_sys::window().ok_or_else(|| DataLoadError::Fetch {
        url: url.to_string(),
        reason: "no global window".to_string(),
    })?;

    let value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| DataLoadError::Fetch {
            url: url.to_string(),
            reason: js_reason(&e),
        })?;
    let response: Response = value.dyn_into().map_err(|e| DataLoadError::Fetch {
        url: url.to_string(),
        reason: js_reason(&e),
    })?;

    if !response.ok() {
        return Err(DataLoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body_err = |e: JsValue| DataLoadError::Body {
        url: url.to_string(),
        reason: js_reason(&e),
    };
    let text = JsFuture::from(response.text().map_err(body_err)?)
        .await
        .map_err(body_err)?;

    let body = text.as_string().ok_or_else(|| DataLoadError::Body {
        url: url.to_string(),
        reason: "body is not a string".to_string(),
    })?;
    log::info!("[DTM] loader: Fetched {} ({} bytes)", url, body.len());
    Ok(body)
}

/// Best-effort message from a thrown JS value.
fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
