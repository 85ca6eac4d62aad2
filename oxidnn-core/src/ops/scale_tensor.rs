//! In-place tensor scaling: `y[i] = alpha * y[i]`.

use crate::desc::TensorDescriptor;
use crate::device::{DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Error, Result};

/// Kernel parameter record.
#[derive(Debug, Clone, Copy)]
pub struct ScaleTensorArgs {
    pub spe_count: usize,
    pub spa_count: usize,
    pub alpha: f32,
    pub element_count: usize,
    pub y: DevicePtrMut,
}

/// Selection-only superset of [`ScaleTensorArgs`].
pub struct ScaleTensorPatch<'a> {
    pub args: &'a ScaleTensorArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ScaleTensorArgs>] =
    &[KernelVariant::new(kernels::scale_tensor_f32, "scale_tensor_f32")];

pub(crate) fn select(patch: &ScaleTensorPatch) -> Option<usize> {
    if patch.dtype == DType::F32 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch an in-place scale of `y`. Only single-precision tensors
    /// carry a scale interpretation of `alpha` here; anything else is
    /// rejected before assembly.
    pub fn scale_tensor(
        &self,
        y_desc: &TensorDescriptor,
        y: DevicePtrMut,
        alpha: f32,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(!y.is_null(), "scale_tensor: null operand buffer");
        if y_desc.dtype() != DType::F32 {
            log::warn!("scale_tensor: alpha is only defined for f32 tensors");
            return Err(Error::NotSupported(
                "scale_tensor accepts f32 tensors only".to_string(),
            ));
        }

        let args = ScaleTensorArgs {
            spe_count: self.spe_count(),
            spa_count: self.spa_count(),
            alpha,
            element_count: y_desc.element_count(),
            y,
        };
        let patch = ScaleTensorPatch {
            args: &args,
            dtype: y_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("scale_tensor", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
