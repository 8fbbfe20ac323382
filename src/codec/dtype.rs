use crate::codec::CodecError;

/// Element types a binary matrix buffer may carry. Buffers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    F4,
    F8,
}

impl Dtype {
    pub fn parse(tag: &str) -> Result<Self, CodecError> {
        let bare = tag
            .strip_prefix('<')
            .or_else(|| tag.strip_prefix('|'))
            .or_else(|| tag.strip_prefix('='))
            .unwrap_or(tag);
        match bare {
            "i1" => Ok(Dtype::I1),
            "u1" => Ok(Dtype::U1),
            "i2" => Ok(Dtype::I2),
            "u2" => Ok(Dtype::U2),
            "i4" => Ok(Dtype::I4),
            "u4" => Ok(Dtype::U4),
            "f4" => Ok(Dtype::F4),
            "f8" => Ok(Dtype::F8),
            _ => Err(CodecError::UnsupportedEncoding(tag.to_string())),
        }
    }

    pub fn width(self) -> usize {
        match self {
            Dtype::I1 | Dtype::U1 => 1,
            Dtype::I2 | Dtype::U2 => 2,
            Dtype::I4 | Dtype::U4 | Dtype::F4 => 4,
            Dtype::F8 => 8,
        }
    }

    /// Widens every element of `bytes` to `f64`. The caller guarantees
    /// `bytes.len()` is a multiple of [`Dtype::width`].
    pub fn read_le(self, bytes: &[u8]) -> Vec<f64> {
        bytes
            .chunks_exact(self.width())
            .map(|c| match self {
                Dtype::I1 => c[0] as i8 as f64,
                Dtype::U1 => c[0] as f64,
                Dtype::I2 => i16::from_le_bytes([c[0], c[1]]) as f64,
                Dtype::U2 => u16::from_le_bytes([c[0], c[1]]) as f64,
                Dtype::I4 => i32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64,
                Dtype::U4 => u32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64,
                Dtype::F4 => f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64,
                Dtype::F8 => {
                    f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]])
                }
            })
            .collect()
    }
}
