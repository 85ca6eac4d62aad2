//! Index of the maximum along one axis.

use crate::desc::TensorDescriptor;
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. The reduction axis splits the tensor into
/// `high_num` outer groups of `axis_num * low_num` elements.
#[derive(Debug, Clone, Copy)]
pub struct ArgMaxArgs {
    pub spa_count: usize,
    pub spe_count: usize,
    pub x: DevicePtr,
    pub y: DevicePtrMut,
    pub high_num: usize,
    pub axis_num: usize,
    pub low_num: usize,
    pub axis: usize,
    pub rank: usize,
    pub elem_size: usize,
    /// Per-pass block length along the reduced run.
    pub low_blk: usize,
    /// Outer groups processed per pass.
    pub num: usize,
}

/// Selection-only superset of [`ArgMaxArgs`].
pub struct ArgMaxPatch<'a> {
    pub args: &'a ArgMaxArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ArgMaxArgs>] =
    &[KernelVariant::new(kernels::arg_max_f16, "arg_max_f16")];

pub(crate) fn select(patch: &ArgMaxPatch) -> Option<usize> {
    if patch.dtype == DType::F16 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

// On-chip block length in elements.
const BLK: usize = 1 << 10;

/// Blocking of the reduced run: cap at one block, then size the outer
/// batch so roughly two blocks are in flight per pass.
fn blocking(high_num: usize, axis_num: usize, low_num: usize) -> (usize, usize) {
    let low_ln = low_num * axis_num;
    if low_ln > BLK {
        let num = if high_num >= 16 { 16 } else { high_num };
        (BLK, num)
    } else {
        let num = if high_num * low_ln > 2 * BLK {
            if 2 * BLK / low_ln > 16 {
                (2 * BLK / low_ln) / 16 * 16
            } else {
                16
            }
        } else {
            high_num
        };
        (low_ln, num)
    }
}

impl Handle {
    /// Dispatch an argmax reduction along `axis` of `x` into `y`.
    pub fn arg_max(
        &self,
        axis: usize,
        x_desc: &TensorDescriptor,
        x: DevicePtr,
        y_desc: &TensorDescriptor,
        y: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(!x.is_null() && !y.is_null(), "arg_max: null operand buffer");
        let rank = x_desc.rank();
        ensure_param!(axis < rank, "arg_max: axis {axis} out of range for rank {rank}");
        ensure_param!(y_desc.rank() > 0, "arg_max: y descriptor is unset");

        let dims = x_desc.dims();
        let high_num: usize = dims[..axis].iter().product();
        let axis_num = dims[axis];
        let low_num: usize = dims[axis + 1..].iter().product();
        let (low_blk, num) = blocking(high_num, axis_num, low_num);

        let args = ArgMaxArgs {
            spa_count: self.spa_count(),
            spe_count: self.spe_count(),
            x,
            y,
            high_num,
            axis_num,
            low_num,
            axis,
            rank,
            elem_size: x_desc.dtype().size_in_bytes(),
            low_blk,
            num,
        };
        let patch = ArgMaxPatch {
            args: &args,
            dtype: x_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("arg_max", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
