use serde::Serialize;
use serde_json::{Map, Value};

use crate::codec::{CodecError, DecodedMatrix, EncodedMatrix, decode_or_bytes};
use crate::input::Figure;

#[derive(Debug, Clone, Serialize)]
pub struct TraceFailure {
    pub trace: usize,
    pub error: String,
}

/// The payload figure with every trace matrix in plain nested-array form.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedFigure {
    pub data: Vec<Map<String, Value>>,
    pub layout: Value,
    pub failures: Vec<TraceFailure>,
}

pub fn decode_trace_matrix(value: &Value) -> Result<DecodedMatrix, CodecError> {
    let encoded = EncodedMatrix::from_value(value.clone())?;
    decode_or_bytes(&encoded)
}

/// Decodes the `z` matrix of each trace. A trace that fails keeps its other
/// fields, loses `z`, and is listed in `failures`; the remaining traces are
/// unaffected.
pub fn run_stage2(figure: &Figure) -> DecodedFigure {
    let mut data = Vec::with_capacity(figure.data.len());
    let mut failures = Vec::new();

    for (idx, trace) in figure.data.iter().enumerate() {
        let mut trace = trace.clone();
        if let Some(z) = trace.remove("z") {
            match decode_trace_matrix(&z) {
                Ok(matrix) => match serde_json::to_value(&matrix) {
                    Ok(v) => {
                        trace.insert("z".to_string(), v);
                    }
                    Err(e) => failures.push(TraceFailure {
                        trace: idx,
                        error: e.to_string(),
                    }),
                },
                Err(e) => {
                    tracing::warn!(trace = idx, error = %e, "failed to decode trace matrix");
                    failures.push(TraceFailure {
                        trace: idx,
                        error: e.to_string(),
                    });
                }
            }
        }
        data.push(trace);
    }

    DecodedFigure {
        data,
        layout: figure.layout.clone(),
        failures,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_decode.rs"]
mod tests;
