use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod analysis;
pub mod audio;
pub mod error;
pub mod export;
pub mod pitch;

use analysis::types::{AnalyzerConfig, TranscriptionResult};
use audio::buffer::SampleBuffer;
use error::AnalysisError;

fn err_js(e: AnalysisError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn config_from_options(options: JsValue) -> Result<AnalyzerConfig, JsValue> {
    if options.is_null() || options.is_undefined() {
        Ok(AnalyzerConfig::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn run_analysis(
    channels: Vec<Vec<f32>>,
    sample_rate: f32,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let config = config_from_options(options)?;
    let buffer = SampleBuffer::new(channels, sample_rate).map_err(err_js)?;
    let result = analysis::analyzer::analyze(&buffer, &config).map_err(err_js)?;
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Transcribe a decoded multi-channel buffer (one Float32Array per channel).
/// Pass `null`/`undefined` options for the default configuration.
#[wasm_bindgen]
pub fn analyze(
    channels: js_sys::Array,
    sample_rate: f32,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let mut data: Vec<Vec<f32>> = Vec::with_capacity(channels.length() as usize);
    for channel in channels.iter() {
        let arr: js_sys::Float32Array = channel
            .dyn_into()
            .map_err(|_| JsValue::from_str("expected an array of Float32Array channels"))?;
        data.push(arr.to_vec());
    }
    run_analysis(data, sample_rate, options)
}

/// Single-channel fast path: no per-channel array plumbing on the JS side.
#[wasm_bindgen]
pub fn analyze_mono(
    samples: &[f32],
    sample_rate: f32,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    run_analysis(vec![samples.to_vec()], sample_rate, options)
}

/// Render a transcription's sheet music as a MusicXML 3.1 document.
#[wasm_bindgen]
pub fn sheet_music_xml(result: JsValue) -> Result<String, JsValue> {
    let result: TranscriptionResult =
        serde_wasm_bindgen::from_value(result).map_err(|e| JsValue::from_str(&e.to_string()))?;
    export::musicxml::sheet_music_to_xml(&result.sheet_music).map_err(err_js)
}

/// Default analyzer configuration, for host UIs exposing the tunables.
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&AnalyzerConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
