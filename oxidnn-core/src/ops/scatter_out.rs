//! Scatter values into an output tensor along one axis.

use crate::desc::{TensorDescriptor, DIM_MAX};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::masked_fill::reversed_dims;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Error, Result};

/// How colliding scatter writes combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterReduction {
    None,
    Add,
    Multiply,
}

impl ScatterReduction {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(ScatterReduction::None),
            1 => Ok(ScatterReduction::Add),
            2 => Ok(ScatterReduction::Multiply),
            other => Err(Error::InvalidArgument(format!(
                "unknown scatter reduction encoding: {other}"
            ))),
        }
    }
}

/// Whether the scattered source is a broadcast scalar or a full array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterInput {
    Scalar,
    Array,
}

/// Kernel parameter record. Dim arrays are reversed into fastest-first
/// kernel order and the axis is mirrored accordingly.
#[derive(Debug, Clone, Copy)]
pub struct ScatterOutArgs {
    pub spe_count: usize,
    pub axis: usize,
    pub rank: usize,
    pub dim_input: [usize; DIM_MAX],
    pub dim_index: [usize; DIM_MAX],
    pub dim_output: [usize; DIM_MAX],
    pub input: DevicePtr,
    pub index: DevicePtr,
    pub output: DevicePtrMut,
    pub reduction: ScatterReduction,
    pub scalar_input: bool,
    pub alpha: f32,
    pub dtype: DType,
}

/// Selection-only superset of [`ScatterOutArgs`].
pub struct ScatterOutPatch<'a> {
    pub args: &'a ScatterOutArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ScatterOutArgs>] =
    &[KernelVariant::new(kernels::scatter_out_f32, "scatter_out_f32")];

pub(crate) fn select(patch: &ScatterOutPatch) -> Option<usize> {
    if patch.dtype == DType::F32 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch a scatter of `input` into `output` along `axis`, driven by
    /// `index` (PyTorch `scatter` semantics: all three ranks must agree).
    #[allow(clippy::too_many_arguments)]
    pub fn scatter_out(
        &self,
        axis: usize,
        alpha: f32,
        input_type: ScatterInput,
        reduction: ScatterReduction,
        input_desc: &TensorDescriptor,
        input: DevicePtr,
        index_desc: &TensorDescriptor,
        index: DevicePtr,
        output_desc: &TensorDescriptor,
        output: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !input.is_null() && !index.is_null() && !output.is_null(),
            "scatter_out: null operand buffer"
        );
        let rank = input_desc.rank();
        ensure_param!(rank > 0, "scatter_out: input descriptor is unset");
        ensure_param!(
            rank <= DIM_MAX,
            "scatter_out: rank above {DIM_MAX} is not representable"
        );
        ensure_param!(axis < rank, "scatter_out: axis {axis} out of range for rank {rank}");
        ensure_param!(
            index_desc.rank() == rank && output_desc.rank() == rank,
            "scatter_out: input, index and output ranks must all equal {rank}"
        );

        let args = ScatterOutArgs {
            spe_count: self.spe_count(),
            axis: rank - 1 - axis,
            rank,
            dim_input: reversed_dims(input_desc.dims()),
            dim_index: reversed_dims(index_desc.dims()),
            dim_output: reversed_dims(output_desc.dims()),
            input,
            index,
            output,
            reduction,
            scalar_input: input_type == ScatterInput::Scalar,
            alpha,
            dtype: input_desc.dtype(),
        };
        let patch = ScatterOutPatch {
            args: &args,
            dtype: input_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("scatter_out", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
