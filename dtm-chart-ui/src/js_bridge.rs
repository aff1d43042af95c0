//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3 bar chart and the Leaflet map live in `assets/js/*.js` and are loaded
//! at runtime. They are evaluated as globals (no ES modules) and exposed via
//! `window.*`. This module serializes data for them and calls those globals.
//! Strings are always embedded as JSON string literals, never spliced raw.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

// Embed the chart and map JS at compile time
static TAX_BAR_CHART_JS: &str = include_str!("../assets/js/tax-bar-chart.js");
static DISTRICT_MAP_JS: &str = include_str!("../assets/js/district-map.js");

const D3_JS_URL: &str = "https://d3js.org/d3.v7.min.js";
const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('DTM JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote `value` as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Append `<script id=... src=...>` to `<head>` unless `global` is already defined
/// or the tag is already there.
fn load_script(global: &str, id: &str, src: &str) {
    call_js(&format!(
        r#"
        if (typeof {global} === 'undefined' && !document.getElementById({id})) {{
            var js = document.createElement('script');
            js.id = {id};
            js.src = {src};
            document.head.appendChild(js);
        }}
        "#,
        id = js_string(id),
        src = js_string(src),
    ));
}

/// Add D3 to `<head>` unless the page already has it.
pub fn load_d3() {
    load_script("d3", "dtm-d3-js", D3_JS_URL);
}

/// Add the Leaflet stylesheet and script to `<head>` unless the page already has them.
pub fn load_leaflet() {
    call_js(&format!(
        r#"
        if (typeof L === 'undefined' && !document.getElementById('dtm-leaflet-css')) {{
            var css = document.createElement('link');
            css.id = 'dtm-leaflet-css';
            css.rel = 'stylesheet';
            css.href = {css};
            document.head.appendChild(css);
        }}
        "#,
        css = js_string(LEAFLET_CSS_URL),
    ));
    load_script("L", "dtm-leaflet-js", LEAFLET_JS_URL);
}

/// Wait for `global`, then evaluate `script` at global scope and promote its
/// `functions` to `window.*`, finally setting `window[ready_flag]`.
///
/// The scripts declare their functions with `function` declarations. To make
/// them globally accessible (not block-scoped inside the setInterval callback)
/// they are evaluated via indirect eval.
fn init_scripts(global: &str, script: &str, functions: &[&str], ready_flag: &str) {
    let store_key = format!("{}Scripts", ready_flag);
    let store_js = format!("window.{} = {};", store_key, js_string(script));
    let _ = js_sys::eval(&store_js);

    let promote: String = functions
        .iter()
        .map(|f| format!("if (typeof {f} !== 'undefined') window.{f} = {f};\n"))
        .collect();
    let init_js = format!(
        r#"
        (function() {{
            if (window.{ready_flag}) {{ return; }}
            var waitForLibrary = setInterval(function() {{
                if (typeof {global} !== 'undefined' && window.{store_key}) {{
                    clearInterval(waitForLibrary);
                    (0, eval)(window.{store_key});
                    delete window.{store_key};
                    {promote}
                    window.{ready_flag} = true;
                    console.log('DTM {global} scripts initialized');
                }}
            }}, 100);
        }})();
        "#,
    );
    let _ = js_sys::eval(&init_js);
}

/// Load D3 and the bar chart script with a wait-for-D3 polling loop.
pub fn init_chart_scripts() {
    load_d3();
    init_scripts(
        "d3",
        TAX_BAR_CHART_JS,
        &["renderTaxBarChart", "setBarHighlighted", "destroyTaxBarChart"],
        "__dtmChartReady",
    );
}

/// Load Leaflet and the map script with a wait-for-Leaflet polling loop.
pub fn init_map_scripts() {
    load_leaflet();
    init_scripts(
        "L",
        DISTRICT_MAP_JS,
        &[
            "initDistrictMap",
            "addDistrictLayers",
            "setDistrictStyle",
            "openDistrictPopup",
            "destroyDistrictMap",
        ],
        "__dtmMapReady",
    );
}

/// Draw the bar chart into `container_id`.
///
/// `bars_json` is an array of `{index, name, tax, value, label}`; `domain_json`
/// is `[floor, max]`. Polls until D3, the chart script and the container exist.
pub fn render_tax_bar_chart(
    container_id: &str,
    bars_json: &str,
    domain_json: &str,
    config_json: &str,
) {
    let id = js_string(container_id);
    let bars = js_string(bars_json);
    let domain = js_string(domain_json);
    let config = js_string(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__dtmChartReady &&
                    typeof window.renderTaxBarChart !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.renderTaxBarChart({id}, {bars}, {domain}, {config});
                    }} catch(e) {{ console.error('[DTM] renderTaxBarChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// JS that records `name` as the highlighted bar (`null` clears) and repaints
/// the chart if it is drawn.
fn bar_highlight_js(name: Option<&str>) -> String {
    let name = name.map_or_else(|| "null".to_string(), js_string);
    format!(
        "window.__dtmBarHighlight = {name}; if (window.setBarHighlighted) window.setBarHighlighted({name});"
    )
}

/// Highlight the bar for `name` only, or none.
pub fn set_bar_highlighted(name: Option<&str>) {
    call_js(&bar_highlight_js(name));
}

/// Create the base map (tiles, centre, zoom) in `container_id`.
///
/// Polls until Leaflet and the map script are ready and the container exists.
pub fn render_base_map(container_id: &str, config_json: &str) {
    let id = js_string(container_id);
    let config = js_string(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__dtmMapReady &&
                    typeof window.initDistrictMap !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.initDistrictMap({id}, {config});
                    }} catch(e) {{ console.error('[DTM] initDistrictMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Add the district layers to the map in `container_id` and fit the viewport.
///
/// `layers_json` is an array of `{index, name, popup, style, geometry}`;
/// `bounds_json` is `[[south, west], [north, east]]` or `null`. Polls until
/// the base map for that container exists, so it may be called right after
/// [`render_base_map`].
pub fn draw_district_layers(container_id: &str, layers_json: &str, bounds_json: &str) {
    let id = js_string(container_id);
    let layers = js_string(layers_json);
    let bounds = js_string(bounds_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__dtmMap &&
                    window.__dtmMapContainer === {id} &&
                    typeof window.addDistrictLayers !== 'undefined') {{
                    clearInterval(poll);
                    try {{
                        window.addDistrictLayers({layers}, {bounds});
                    }} catch(e) {{ console.error('[DTM] addDistrictLayers error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// JS that restyles one district layer. Until the layers are drawn the style
/// waits in `window.__dtmPendingStyles` and is applied on draw.
fn district_style_js(index: usize, style_json: &str) -> String {
    let style = js_string(style_json);
    format!(
        "if (window.setDistrictStyle) {{ window.setDistrictStyle({index}, {style}); }} \
         else {{ window.__dtmPendingStyles = window.__dtmPendingStyles || {{}}; \
         window.__dtmPendingStyles[{index}] = JSON.parse({style}); }}"
    )
}

/// Restyle one district layer.
pub fn set_district_style(index: usize, style_json: &str) {
    call_js(&district_style_js(index, style_json));
}

/// Open the popup of one district layer.
pub fn open_district_popup(index: usize) {
    call_js(&format!(
        "if (window.openDistrictPopup) window.openDistrictPopup({});",
        index
    ));
}

/// Tear down the chart in `container_id` and forget its highlight.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "if (window.destroyTaxBarChart) window.destroyTaxBarChart({}); window.__dtmBarHighlight = null;",
        js_string(container_id)
    ));
}

/// Tear down the map, drop queued styles and empty its container.
pub fn destroy_map(container_id: &str) {
    call_js(&format!(
        "if (window.destroyDistrictMap) window.destroyDistrictMap(); window.__dtmPendingStyles = {{}}; var el = document.getElementById({}); if (el) el.innerHTML = '';",
        js_string(container_id)
    ));
}

/// Expose `handler` as `window[name](index)` for the chart and map scripts.
///
/// The closure lives for the rest of the page, so it is leaked with `forget`.
pub fn set_window_callback(name: &str, mut handler: impl FnMut(usize) + 'static) {
    let Some(window) = web_sys::window() else {
        log::error!("[DTM] js_bridge: No window to register {} on", name);
        return;
    };
    let closure = Closure::<dyn FnMut(u32)>::new(move |index: u32| handler(index as usize));
    if let Err(e) = js_sys::Reflect::set(window.as_ref(), &JsValue::from_str(name), closure.as_ref()) {
        log::error!("[DTM] js_bridge: Failed to register {}: {:?}", name, e);
        return;
    }
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes_and_newlines() {
        assert_eq!(js_string("O'Fallon"), "\"O'Fallon\"");
        assert_eq!(js_string("a\"b\nc"), "\"a\\\"b\\nc\"");
    }

    #[test]
    fn test_map_script_defines_bridge_functions() {
        for name in [
            "function initDistrictMap",
            "function addDistrictLayers",
            "function setDistrictStyle",
            "function openDistrictPopup",
            "function destroyDistrictMap",
        ] {
            assert!(DISTRICT_MAP_JS.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_chart_script_uses_d3_scales_and_axes() {
        for name in [
            "function renderTaxBarChart",
            "function setBarHighlighted",
            "function destroyTaxBarChart",
            "d3.scaleLinear()",
            "d3.scaleBand()",
            "d3.axisLeft(y)",
            "d3.axisBottom(x)",
            "d3.format('$.2f')",
            ".data(bars, d => d.index)",
        ] {
            assert!(TAX_BAR_CHART_JS.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_bar_highlight_is_remembered_before_draw() {
        let js = bar_highlight_js(Some("St. Louis"));
        assert!(js.starts_with("window.__dtmBarHighlight = \"St. Louis\";"));
        assert!(js.contains("window.setBarHighlighted(\"St. Louis\")"));
        assert!(bar_highlight_js(None).starts_with("window.__dtmBarHighlight = null;"));
        assert!(TAX_BAR_CHART_JS.contains("applyBarHighlight();\n}"));
    }

    #[test]
    fn test_district_style_is_queued_until_layers_exist() {
        let js = district_style_js(2, r##"{"fillColor":"#fc8d62"}"##);
        assert!(js.contains("window.setDistrictStyle(2, "));
        assert!(js.contains("window.__dtmPendingStyles[2] = JSON.parse("));
        assert!(DISTRICT_MAP_JS.contains("takePendingStyle(d.index) || d.style"));
        assert!(DISTRICT_MAP_JS.contains("window.__dtmPendingStyles[index] = style"));
    }
}
