use wasm_bindgen::prelude::*;
use serde_wasm_bindgen::{from_value, to_value};

use crate::chart::ChartData;
use crate::config::InterestConfig;
use crate::engine::InterestEngine;
use crate::format::ResultView;
use crate::inputs::RawInput;

/// Initialize hooks for better debugging in WASM
#[wasm_bindgen]
pub fn init_hooks() {
    console_error_panic_hook::set_once();
}

// Form fields arrive as numbers or strings; anything else reads as an empty field.
fn raw(value: JsValue) -> RawInput {
    from_value(value).unwrap_or_default()
}

/// Calculate simple interest from raw form values (lenient coercion).
///
/// Returns the serialized `CalculationResult`.
#[wasm_bindgen]
pub fn compute_wasm(principal: JsValue, rate: JsValue, time: JsValue) -> Result<JsValue, JsError> {
    let result = crate::engine::compute(raw(principal), raw(rate), raw(time));
    to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization Error: {}", e)))
}

/// Calculate under an explicit `InterestConfig` and return result, chart data and display lines together.
#[wasm_bindgen]
pub fn compute_view_wasm(
    config_json: JsValue,
    principal: JsValue,
    rate: JsValue,
    time: JsValue,
) -> Result<JsValue, JsError> {
    let config: InterestConfig = from_value(config_json)
        .map_err(|e| JsError::new(&format!("Invalid Config JSON: {}", e)))?;
    config.validate()
        .map_err(|e| JsError::new(&e.to_string()))?;

    let result = InterestEngine::new(&config)
        .compute_raw(raw(principal), raw(rate), raw(time))
        .map_err(|e| JsError::new(&e.to_string()))?;

    let payload = serde_json::json!({
        "result": result,
        "chart": ChartData::from_result(&result),
        "view": ResultView::with_config(&result, &config),
    });

    to_value(&payload)
        .map_err(|e| JsError::new(&format!("Serialization Error: {}", e)))
}
