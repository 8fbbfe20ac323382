use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::codec::{CodecError, DecodedMatrix, Dtype, EncodedMatrix, ShapeSpec};

pub fn decode(encoded: &EncodedMatrix) -> Result<DecodedMatrix, CodecError> {
    match encoded {
        EncodedMatrix::Plain(items) => Ok(DecodedMatrix::Plain(items.clone())),
        EncodedMatrix::RawBinary {
            dtype,
            bdata,
            shape,
        } => decode_raw(dtype, bdata, shape),
    }
}

/// Like [`decode`], but an unknown element tag degrades to the raw bytes as a
/// flat vector instead of failing.
pub fn decode_or_bytes(encoded: &EncodedMatrix) -> Result<DecodedMatrix, CodecError> {
    match decode(encoded) {
        Err(CodecError::UnsupportedEncoding(tag)) => {
            let EncodedMatrix::RawBinary { bdata, .. } = encoded else {
                return Err(CodecError::UnsupportedEncoding(tag));
            };
            tracing::warn!(dtype = %tag, "unknown matrix dtype; falling back to raw bytes");
            let bytes = STANDARD.decode(bdata.as_bytes())?;
            Ok(DecodedMatrix::Vector(
                bytes.into_iter().map(f64::from).collect(),
            ))
        }
        other => other,
    }
}

fn decode_raw(dtype: &str, bdata: &str, shape: &ShapeSpec) -> Result<DecodedMatrix, CodecError> {
    let dtype = Dtype::parse(dtype)?;
    let dims = shape.dims()?;
    let bytes = STANDARD.decode(bdata.as_bytes())?;

    let n_elements = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| CodecError::ShapeMismatch(format!("shape {dims:?} overflows")))?;
    let expected_bytes = n_elements
        .checked_mul(dtype.width())
        .ok_or_else(|| CodecError::ShapeMismatch(format!("shape {dims:?} overflows")))?;
    if bytes.len() != expected_bytes {
        return Err(CodecError::ShapeMismatch(format!(
            "shape {:?} of {:?} needs {} bytes, buffer has {}",
            dims,
            dtype,
            expected_bytes,
            bytes.len()
        )));
    }

    let flat = dtype.read_le(&bytes);
    match dims.as_slice() {
        [rows, cols] => Ok(DecodedMatrix::Rows(reshape_rows(flat, *rows, *cols))),
        _ => Ok(DecodedMatrix::Vector(flat)),
    }
}

fn reshape_rows(flat: Vec<f64>, rows: usize, cols: usize) -> Vec<Vec<f64>> {
    if cols == 0 {
        return vec![Vec::new(); rows];
    }
    flat.chunks_exact(cols).map(<[f64]>::to_vec).collect()
}
