//! Deduplicate the elements of a flattened tensor.

use crate::desc::TensorDescriptor;
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. `inverse` and `counts` may be null when the
/// matching flag is off; `out_size` receives the number of unique values.
#[derive(Debug, Clone, Copy)]
pub struct UniqueArgs {
    pub spe_count: usize,
    pub x: DevicePtr,
    pub y: DevicePtrMut,
    pub inverse: DevicePtrMut,
    pub counts: DevicePtrMut,
    pub sorted: bool,
    pub return_inverse: bool,
    pub return_counts: bool,
    pub element_count: usize,
    pub out_size: DevicePtrMut,
}

/// Selection-only superset of [`UniqueArgs`].
pub struct UniquePatch<'a> {
    pub args: &'a UniqueArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<UniqueArgs>] =
    &[KernelVariant::new(kernels::unique_sorted_i64, "unique_sorted_i64")];

pub(crate) fn select(patch: &UniquePatch) -> Option<usize> {
    if patch.dtype == DType::I64 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch a unique over the flattened `input`.
    #[allow(clippy::too_many_arguments)]
    pub fn unique(
        &self,
        sorted: bool,
        return_inverse: bool,
        return_counts: bool,
        input_desc: &TensorDescriptor,
        input: DevicePtr,
        output: DevicePtrMut,
        inverse: DevicePtrMut,
        counts: DevicePtrMut,
        out_size: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !input.is_null() && !output.is_null() && !out_size.is_null(),
            "unique: null operand buffer"
        );
        ensure_param!(input_desc.rank() > 0, "unique: input descriptor is unset");

        let args = UniqueArgs {
            spe_count: self.spe_count(),
            x: input,
            y: output,
            inverse,
            counts,
            sorted,
            return_inverse,
            return_counts,
            element_count: input_desc.element_count(),
            out_size,
        };
        let patch = UniquePatch {
            args: &args,
            dtype: input_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("unique", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
