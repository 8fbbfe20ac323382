use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::*;

fn raw(dtype: &str, bytes: &[u8], shape: ShapeSpec) -> EncodedMatrix {
    EncodedMatrix::RawBinary {
        dtype: dtype.to_string(),
        bdata: STANDARD.encode(bytes),
        shape,
    }
}

fn rows_of(m: DecodedMatrix) -> Vec<Vec<f64>> {
    match m {
        DecodedMatrix::Rows(rows) => rows,
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn test_round_trip_integer_types() {
    let values: [i32; 6] = [-3, 0, 7, 12, -1, 100];

    let i1: Vec<u8> = values.iter().flat_map(|&v| (v as i8).to_le_bytes()).collect();
    let i2: Vec<u8> = values.iter().flat_map(|&v| (v as i16).to_le_bytes()).collect();
    let i4: Vec<u8> = values.iter().flat_map(|&v| v.to_le_bytes()).collect();

    let expected = vec![vec![-3.0, 0.0, 7.0], vec![12.0, -1.0, 100.0]];
    for (tag, bytes) in [("i1", i1), ("i2", i2), ("i4", i4)] {
        let m = decode(&raw(tag, &bytes, ShapeSpec::Text("2, 3".to_string()))).unwrap();
        assert_eq!(rows_of(m), expected, "dtype {tag}");
    }

    let unsigned: [u32; 4] = [0, 1, 200, 255];
    let u1: Vec<u8> = unsigned.iter().map(|&v| v as u8).collect();
    let u2: Vec<u8> = unsigned.iter().flat_map(|&v| (v as u16).to_le_bytes()).collect();
    let u4: Vec<u8> = unsigned.iter().flat_map(|&v| v.to_le_bytes()).collect();
    let expected = vec![vec![0.0, 1.0], vec![200.0, 255.0]];
    for (tag, bytes) in [("u1", u1), ("u2", u2), ("u4", u4)] {
        let m = decode(&raw(tag, &bytes, ShapeSpec::Dims(vec![2, 2]))).unwrap();
        assert_eq!(rows_of(m), expected, "dtype {tag}");
    }
}

#[test]
fn test_round_trip_float_types() {
    let values = [0.125f64, -2.5, 3.75, 1e-3];

    let f8: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    let m = rows_of(decode(&raw("f8", &f8, ShapeSpec::Dims(vec![2, 2]))).unwrap());
    assert_eq!(m, vec![vec![0.125, -2.5], vec![3.75, 1e-3]]);

    let f4: Vec<u8> = values.iter().flat_map(|&v| (v as f32).to_le_bytes()).collect();
    let m = rows_of(decode(&raw("<f4", &f4, ShapeSpec::Dims(vec![1, 4]))).unwrap());
    for (got, want) in m[0].iter().zip(values.iter()) {
        assert!((got - want).abs() < 1e-6, "{got} vs {want}");
    }
}

#[test]
fn test_one_dimensional_shape() {
    let bytes: Vec<u8> = [1u16, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
    let m = decode(&raw("u2", &bytes, ShapeSpec::Scalar(3))).unwrap();
    assert_eq!(m, DecodedMatrix::Vector(vec![1.0, 2.0, 3.0]));

    let m = decode(&raw("u2", &bytes, ShapeSpec::Text("3".to_string()))).unwrap();
    assert_eq!(m, DecodedMatrix::Vector(vec![1.0, 2.0, 3.0]));
}

#[test]
fn test_shape_mismatch_rejected() {
    let bytes: Vec<u8> = [1.0f32, 2.0, 3.0].iter().flat_map(|v| v.to_le_bytes()).collect();
    for shape in [
        ShapeSpec::Dims(vec![2, 2]),
        ShapeSpec::Dims(vec![1, 2]),
        ShapeSpec::Scalar(4),
    ] {
        let err = decode(&raw("f4", &bytes, shape)).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch(_)), "{err}");
    }

    // Not a whole number of f4 elements.
    let err = decode(&raw("f4", &bytes[..11], ShapeSpec::Scalar(3))).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch(_)));

    let err = decode(&raw("u1", &[1, 2], ShapeSpec::Dims(vec![1, 1, 2]))).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch(_)));
}

#[test]
fn test_unsupported_dtype_and_byte_fallback() {
    let encoded = raw("i8", &[1, 0, 0, 0, 0, 0, 0, 0], ShapeSpec::Scalar(1));
    let err = decode(&encoded).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedEncoding(ref t) if t == "i8"));

    let fallback = decode_or_bytes(&encoded).unwrap();
    assert_eq!(
        fallback,
        DecodedMatrix::Vector(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
    );
}

#[test]
fn test_fallback_keeps_shape_errors() {
    let err = decode_or_bytes(&raw("f8", &[0u8; 8], ShapeSpec::Scalar(2))).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch(_)));
}

#[test]
fn test_invalid_base64() {
    let encoded = EncodedMatrix::RawBinary {
        dtype: "u1".to_string(),
        bdata: "not base64!!".to_string(),
        shape: ShapeSpec::Scalar(1),
    };
    assert!(matches!(decode(&encoded), Err(CodecError::Base64(_))));
}

#[test]
fn test_pre_decoded_passes_through() {
    let value = serde_json::json!([[1.0, 2.0], [3.0, 4.0]]);
    let encoded = EncodedMatrix::from_value(value.clone()).unwrap();
    assert!(matches!(encoded, EncodedMatrix::Plain(_)));
    let m = decode(&encoded).unwrap();
    assert_eq!(serde_json::to_value(&m).unwrap(), value);
    assert_eq!(m.n_rows(), 2);
    assert_eq!(m.n_cols(), 2);
}

#[test]
fn test_pre_decoded_with_gaps_is_untouched() {
    let value = serde_json::json!([[1.0, null], [2.0, 3.0]]);
    let m = decode_or_bytes(&EncodedMatrix::from_value(value.clone()).unwrap()).unwrap();
    assert_eq!(serde_json::to_value(&m).unwrap(), value);
    assert_eq!((m.n_rows(), m.n_cols()), (2, 2));

    let labels = serde_json::json!(["a", "b", "c"]);
    let m = decode(&EncodedMatrix::from_value(labels.clone()).unwrap()).unwrap();
    assert_eq!(serde_json::to_value(&m).unwrap(), labels);
    assert_eq!((m.n_rows(), m.n_cols()), (1, 3));
}

#[test]
fn test_object_without_buffer_fields_is_malformed() {
    let err = EncodedMatrix::from_value(serde_json::json!({"dtype": "f8"})).unwrap_err();
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn test_shape_text_parsing() {
    assert_eq!(ShapeSpec::Text("2, 3".to_string()).dims().unwrap(), vec![2, 3]);
    assert_eq!(ShapeSpec::Text(" 4 ,".to_string()).dims().unwrap(), vec![4]);
    for bad in ["3, x", "", ",", "2,,3", "-1", "2, 3, 4"] {
        let err = ShapeSpec::Text(bad.to_string()).dims().unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch(_)), "{bad:?}: {err}");
    }

    let bytes: Vec<u8> = [1u16, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
    let err = decode(&raw("u2", &bytes, ShapeSpec::Text("3, x".to_string()))).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch(_)));
}

#[test]
fn test_tagged_json_is_raw_binary() {
    let value = serde_json::json!({
        "dtype": "u1",
        "bdata": STANDARD.encode([5u8, 6, 7, 8]),
        "shape": "2, 2"
    });
    let encoded = EncodedMatrix::from_value(value).unwrap();
    assert!(matches!(encoded, EncodedMatrix::RawBinary { .. }));
    assert_eq!(
        rows_of(decode(&encoded).unwrap()),
        vec![vec![5.0, 6.0], vec![7.0, 8.0]]
    );
}

#[test]
fn test_zero_column_matrix() {
    let m = decode(&raw("f8", &[], ShapeSpec::Dims(vec![3, 0]))).unwrap();
    assert_eq!(rows_of(m), vec![Vec::<f64>::new(); 3]);
}
