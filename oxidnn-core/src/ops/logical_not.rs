//! Elementwise logical negation: `C[i] = !A[i]`.

use crate::desc::TensorDescriptor;
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record.
#[derive(Debug, Clone, Copy)]
pub struct LogicalNotArgs {
    pub a: DevicePtr,
    pub c: DevicePtrMut,
    pub spe_count: usize,
    pub element_count: usize,
}

/// Selection-only superset of [`LogicalNotArgs`].
pub struct LogicalNotPatch<'a> {
    pub args: &'a LogicalNotArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<LogicalNotArgs>] =
    &[KernelVariant::new(kernels::logical_not_bool, "logical_not_bool")];

pub(crate) fn select(patch: &LogicalNotPatch) -> Option<usize> {
    if patch.dtype == DType::Bool && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch an elementwise logical not of `A` into `C`.
    pub fn logical_not(
        &self,
        a_desc: &TensorDescriptor,
        a: DevicePtr,
        c_desc: &TensorDescriptor,
        c: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(!a.is_null() && !c.is_null(), "logical_not: null operand buffer");
        ensure_param!(
            a_desc.rank() > 0 && c_desc.rank() > 0,
            "logical_not: operand descriptor is unset"
        );

        let args = LogicalNotArgs {
            a,
            c,
            spe_count: self.spe_count(),
            element_count: a_desc.element_count(),
        };
        let patch = LogicalNotPatch {
            args: &args,
            dtype: a_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("logical_not", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
