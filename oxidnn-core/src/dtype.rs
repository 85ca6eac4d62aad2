use half::{bf16, f16};

use crate::{Error, Result};

/// Element type of a tensor or filter, a closed set with fixed byte sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F32,
    F16,
    I8,
    I16,
    I32,
    I64,
    F64,
    Bool,
    U8,
    Bf16,
}

impl DType {
    /// Storage size of one element.
    pub fn size_in_bytes(self) -> usize {
        match self {
            DType::I8 | DType::U8 | DType::Bool => 1,
            DType::F16 | DType::Bf16 | DType::I16 => 2,
            DType::F32 | DType::I32 => 4,
            DType::I64 | DType::F64 => 8,
        }
    }

    /// Decode the wire encoding of an element type; `InvalidArgument` for
    /// values outside the closed set.
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(DType::F32),
            1 => Ok(DType::F16),
            2 => Ok(DType::I8),
            3 => Ok(DType::I16),
            4 => Ok(DType::I32),
            5 => Ok(DType::I64),
            6 => Ok(DType::F64),
            7 => Ok(DType::Bool),
            8 => Ok(DType::U8),
            9 => Ok(DType::Bf16),
            other => Err(Error::InvalidArgument(format!(
                "unknown element type encoding: {other}"
            ))),
        }
    }
}

/// Marker trait mapping Rust scalar types to their runtime element type.
pub trait WithDType: Copy + Send + Sync + 'static {
    const DTYPE: DType;
}

macro_rules! with_dtype {
    ($rt:ty, $dtype:expr) => {
        impl WithDType for $rt {
            const DTYPE: DType = $dtype;
        }
    };
}

with_dtype!(f32, DType::F32);
with_dtype!(f16, DType::F16);
with_dtype!(i8, DType::I8);
with_dtype!(i16, DType::I16);
with_dtype!(i32, DType::I32);
with_dtype!(i64, DType::I64);
with_dtype!(f64, DType::F64);
with_dtype!(bool, DType::Bool);
with_dtype!(u8, DType::U8);
with_dtype!(bf16, DType::Bf16);
