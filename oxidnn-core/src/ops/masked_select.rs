//! Compact the elements of a tensor selected by a mask.

use crate::desc::{TensorDescriptor, DIM_MAX};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. `broadcast_dim` holds the per-axis maximum of
/// the two operand shapes.
#[derive(Debug, Clone, Copy)]
pub struct MaskedSelectArgs {
    pub spe_count: usize,
    pub x_dim: [usize; DIM_MAX],
    pub mask_dim: [usize; DIM_MAX],
    pub broadcast_dim: [usize; DIM_MAX],
    pub rank: usize,
    pub input: DevicePtr,
    pub mask: DevicePtr,
    pub output: DevicePtrMut,
    pub input_len: usize,
    pub mask_len: usize,
    /// Receives the number of selected elements.
    pub select_count: DevicePtrMut,
}

/// Selection-only superset of [`MaskedSelectArgs`].
pub struct MaskedSelectPatch<'a> {
    pub args: &'a MaskedSelectArgs,
    pub x_dtype: DType,
    pub mask_dtype: DType,
    /// The input shape needs broadcasting up to the joint shape.
    pub input_broadcast: bool,
    /// The mask shape needs broadcasting up to the joint shape.
    pub mask_broadcast: bool,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<MaskedSelectArgs>] = &[KernelVariant::new(
    kernels::masked_select_i32_u8,
    "masked_select_i32_u8",
)];

/// Pure predicate: the single compaction kernel handles i32 data with a
/// byte mask and no broadcasting on either side.
pub(crate) fn select(patch: &MaskedSelectPatch) -> Option<usize> {
    if patch.input_broadcast || patch.mask_broadcast {
        return None;
    }
    if patch.x_dtype == DType::I32 && patch.mask_dtype == DType::U8 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch a masked select of `input` into the compacted `output`;
    /// `select_count` receives the element count.
    #[allow(clippy::too_many_arguments)]
    pub fn masked_select(
        &self,
        input_desc: &TensorDescriptor,
        input: DevicePtr,
        mask_desc: &TensorDescriptor,
        mask: DevicePtr,
        output: DevicePtrMut,
        select_count: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !input.is_null() && !mask.is_null() && !output.is_null() && !select_count.is_null(),
            "masked_select: null operand buffer"
        );
        let rank = input_desc.rank();
        ensure_param!(rank > 0, "masked_select: input descriptor is unset");
        ensure_param!(
            rank <= DIM_MAX,
            "masked_select: rank above {DIM_MAX} is not representable"
        );
        ensure_param!(
            mask_desc.rank() == rank,
            "masked_select: input rank {rank} and mask rank {} differ",
            mask_desc.rank()
        );

        let mut x_dim = [0usize; DIM_MAX];
        let mut mask_dim = [0usize; DIM_MAX];
        let mut broadcast_dim = [0usize; DIM_MAX];
        x_dim[..rank].copy_from_slice(input_desc.dims());
        mask_dim[..rank].copy_from_slice(mask_desc.dims());

        let mut input_len = 1usize;
        let mut mask_len = 1usize;
        let mut max_len = 1usize;
        for i in 0..rank {
            if x_dim[i] != mask_dim[i] && x_dim[i] != 1 && mask_dim[i] != 1 {
                log::warn!(
                    "masked_select: shapes {:?} and {:?} do not satisfy the broadcast rule",
                    input_desc.dims(),
                    mask_desc.dims()
                );
                return Err(crate::Error::bad_param(
                    "masked_select: input and mask shapes are not broadcast compatible",
                ));
            }
            broadcast_dim[i] = x_dim[i].max(mask_dim[i]);
            input_len *= x_dim[i];
            mask_len *= mask_dim[i];
            max_len *= broadcast_dim[i];
        }

        let args = MaskedSelectArgs {
            spe_count: self.spe_count(),
            x_dim,
            mask_dim,
            broadcast_dim,
            rank,
            input,
            mask,
            output,
            input_len,
            mask_len,
            select_count,
        };
        let patch = MaskedSelectPatch {
            args: &args,
            x_dtype: input_desc.dtype(),
            mask_dtype: mask_desc.dtype(),
            input_broadcast: input_len < max_len,
            mask_broadcast: mask_len < max_len,
            algo,
        };

        let mut op = OpRunner::new("masked_select", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
