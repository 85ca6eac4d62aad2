//! Fill the elements of a tensor selected by a mask with one value.

use crate::desc::{TensorDescriptor, DIM_MAX};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. Dim arrays are reversed into fastest-first
/// kernel order; the mask's are padded with trailing ones up to the output
/// rank.
#[derive(Debug, Clone, Copy)]
pub struct MaskedFillArgs {
    pub spe_count: usize,
    pub value: f32,
    pub input: DevicePtr,
    pub mask: DevicePtr,
    pub output: DevicePtrMut,
    pub rank: usize,
    pub dim_input: [usize; DIM_MAX],
    pub dim_mask: [usize; DIM_MAX],
    pub dim_output: [usize; DIM_MAX],
}

/// Selection-only superset of [`MaskedFillArgs`].
pub struct MaskedFillPatch<'a> {
    pub args: &'a MaskedFillArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<MaskedFillArgs>] =
    &[KernelVariant::new(kernels::masked_fill_f32, "masked_fill_f32")];

pub(crate) fn select(patch: &MaskedFillPatch) -> Option<usize> {
    if patch.dtype == DType::F32 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

/// Copy `dims` reversed into a fixed kernel-order array.
pub(crate) fn reversed_dims(dims: &[usize]) -> [usize; DIM_MAX] {
    let mut out = [0usize; DIM_MAX];
    for (i, &dim) in dims.iter().rev().enumerate() {
        out[i] = dim;
    }
    out
}

impl Handle {
    /// Dispatch a masked fill of `input` into `output`.
    #[allow(clippy::too_many_arguments)]
    pub fn masked_fill(
        &self,
        value: f32,
        input_desc: &TensorDescriptor,
        input: DevicePtr,
        mask_desc: &TensorDescriptor,
        mask: DevicePtr,
        output_desc: &TensorDescriptor,
        output: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !input.is_null() && !mask.is_null() && !output.is_null(),
            "masked_fill: null operand buffer"
        );
        let input_rank = input_desc.rank();
        let mask_rank = mask_desc.rank();
        let output_rank = output_desc.rank();
        ensure_param!(
            input_rank > 0 && mask_rank > 0 && output_rank > 0,
            "masked_fill: operand descriptor is unset"
        );
        ensure_param!(
            input_rank <= DIM_MAX && mask_rank <= DIM_MAX && output_rank <= DIM_MAX,
            "masked_fill: rank above {DIM_MAX} is not representable"
        );
        ensure_param!(
            mask_rank <= output_rank,
            "masked_fill: mask rank {mask_rank} exceeds output rank {output_rank}"
        );

        let mut dim_mask = reversed_dims(mask_desc.dims());
        // Missing leading mask axes broadcast: pad with ones after reversal.
        for slot in dim_mask.iter_mut().take(output_rank).skip(mask_rank) {
            *slot = 1;
        }

        let args = MaskedFillArgs {
            spe_count: self.spe_count(),
            value,
            input,
            mask,
            output,
            rank: input_rank,
            dim_input: reversed_dims(input_desc.dims()),
            dim_mask,
            dim_output: reversed_dims(output_desc.dims()),
        };
        let patch = MaskedFillPatch {
            args: &args,
            dtype: input_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("masked_fill", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
