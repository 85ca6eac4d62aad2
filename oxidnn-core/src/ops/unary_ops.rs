//! Elementwise unary ops with a scalar operand: `y[i] = x[i] op alpha`.

use crate::desc::TensorDescriptor;
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Error, Result};

/// Scalar-operand unary operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpMode {
    AddScalar,
    MulScalar,
}

impl UnaryOpMode {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            11 => Ok(UnaryOpMode::AddScalar),
            13 => Ok(UnaryOpMode::MulScalar),
            other => Err(Error::InvalidArgument(format!(
                "unknown unary op mode encoding: {other}"
            ))),
        }
    }
}

/// The scalar operand. It travels to the kernel bit-exact in a 32-bit
/// word; the kernel reinterprets it according to the tensor element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryScalar {
    F32(f32),
    I32(i32),
}

impl UnaryScalar {
    pub fn to_bits(self) -> u32 {
        match self {
            UnaryScalar::F32(v) => v.to_bits(),
            UnaryScalar::I32(v) => v as u32,
        }
    }
}

/// Kernel parameter record.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOpsArgs {
    pub mode: UnaryOpMode,
    pub x: DevicePtr,
    pub y: DevicePtrMut,
    pub element_count: usize,
    pub spe_count: usize,
    pub alpha_bits: u32,
}

/// Selection-only superset of [`UnaryOpsArgs`].
pub struct UnaryOpsPatch<'a> {
    pub args: &'a UnaryOpsArgs,
    pub x_dtype: DType,
    pub y_dtype: DType,
    pub mode: UnaryOpMode,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<UnaryOpsArgs>] = &[
    KernelVariant::new(kernels::unary_ops_alpha_f32, "unary_ops_alpha_f32"),
    KernelVariant::new(kernels::unary_ops_alpha_i32, "unary_ops_alpha_i32"),
];

/// Pure predicate, keyed on the operand type pair alone; the hint is
/// deliberately not consulted for this operation.
pub(crate) fn select(patch: &UnaryOpsPatch) -> Option<usize> {
    match (patch.x_dtype, patch.y_dtype) {
        (DType::F32, DType::F32) => Some(0),
        (DType::I32, DType::I32) => Some(1),
        _ => None,
    }
}

impl Handle {
    /// Dispatch `y = x op alpha` over every element.
    #[allow(clippy::too_many_arguments)]
    pub fn unary_op(
        &self,
        mode: UnaryOpMode,
        alpha: UnaryScalar,
        x_desc: &TensorDescriptor,
        x: DevicePtr,
        y_desc: &TensorDescriptor,
        y: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(!x.is_null() && !y.is_null(), "unary_op: null operand buffer");
        ensure_param!(x_desc.rank() > 0, "unary_op: x descriptor is unset");

        let args = UnaryOpsArgs {
            mode,
            x,
            y,
            element_count: x_desc.element_count(),
            spe_count: self.spe_count(),
            alpha_bits: alpha.to_bits(),
        };
        let patch = UnaryOpsPatch {
            args: &args,
            x_dtype: x_desc.dtype(),
            y_dtype: y_desc.dtype(),
            mode,
            algo,
        };

        let mut op = OpRunner::new("unary_ops", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
