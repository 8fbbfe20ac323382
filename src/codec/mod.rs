pub mod decode;
pub mod dtype;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use decode::{decode, decode_or_bytes};
pub use dtype::Dtype;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("unsupported element encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("invalid base64 buffer: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed matrix value: {0}")]
    Malformed(String),
}

/// A numeric matrix as it travels inside a payload: either a binary buffer
/// that still needs decoding, or a JSON array that is used as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedMatrix {
    /// Any JSON array, including rows with `null` gaps.
    Plain(Vec<Value>),
    RawBinary {
        dtype: String,
        bdata: String,
        shape: ShapeSpec,
    },
}

impl EncodedMatrix {
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        serde_json::from_value(value).map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedMatrix {
    Rows(Vec<Vec<f64>>),
    Vector(Vec<f64>),
    /// A pre-decoded array, untouched.
    Plain(Vec<Value>),
}

impl DecodedMatrix {
    pub fn n_rows(&self) -> usize {
        match self {
            DecodedMatrix::Rows(rows) => rows.len(),
            DecodedMatrix::Vector(_) => 1,
            DecodedMatrix::Plain(items) => match items.first() {
                Some(Value::Array(_)) => items.len(),
                _ => 1,
            },
        }
    }

    pub fn n_cols(&self) -> usize {
        match self {
            DecodedMatrix::Rows(rows) => rows.first().map_or(0, Vec::len),
            DecodedMatrix::Vector(v) => v.len(),
            DecodedMatrix::Plain(items) => match items.first() {
                Some(Value::Array(row)) => row.len(),
                _ => items.len(),
            },
        }
    }
}

/// Shape as written by the producer: `"rows, cols"`, `[rows, cols]`, or a
/// bare length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeSpec {
    Dims(Vec<usize>),
    Scalar(usize),
    Text(String),
}

impl ShapeSpec {
    pub fn dims(&self) -> Result<Vec<usize>, CodecError> {
        let dims = match self {
            ShapeSpec::Dims(d) => d.clone(),
            ShapeSpec::Scalar(n) => vec![*n],
            ShapeSpec::Text(s) => parse_shape_text(s)?,
        };
        if dims.is_empty() || dims.len() > 2 {
            return Err(CodecError::ShapeMismatch(format!(
                "expected 1 or 2 dimensions, got {}",
                dims.len()
            )));
        }
        Ok(dims)
    }
}

/// `"2, 3"` style shapes. A single trailing comma (`"3,"`) is allowed; any
/// other component that is not a non-negative integer is an error.
fn parse_shape_text(text: &str) -> Result<Vec<usize>, CodecError> {
    let mut parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() > 1 && parts.last() == Some(&"") {
        parts.pop();
    }
    parts
        .into_iter()
        .map(|part| {
            part.parse::<usize>().map_err(|_| {
                CodecError::ShapeMismatch(format!("invalid shape component {part:?} in {text:?}"))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/codec/tests.rs"]
mod tests;
