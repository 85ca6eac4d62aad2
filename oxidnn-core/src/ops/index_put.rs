//! Write values into a tensor at positions named by a list of index
//! tensors: `output[indices] = values` (optionally accumulating).

use crate::desc::{TensorDescriptor, DIM_MAX};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::masked_fill::reversed_dims;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. Index and output dims travel reversed into
/// fastest-first kernel order; value dims stay in logical order.
#[derive(Debug, Clone)]
pub struct IndexPutArgs {
    pub spe_count: usize,
    pub elem_size: usize,
    /// Number of index tensors in the list.
    pub index_count: usize,
    pub index_rank: usize,
    pub index_dims: [usize; DIM_MAX],
    /// Output rank.
    pub rank: usize,
    pub out_dims: [usize; DIM_MAX],
    /// Which index tensors broadcast against the longest one.
    pub index_broadcast: [bool; DIM_MAX],
    pub value_rank: usize,
    pub value_dims: [usize; DIM_MAX],
    /// Which result axes the value tensor broadcasts over.
    pub value_broadcast: [bool; DIM_MAX],
    /// Shape of the gather result the values must conform to.
    pub result_dims: [usize; DIM_MAX],
    pub indices: Vec<DevicePtr>,
    pub input: DevicePtr,
    pub values: DevicePtr,
    pub output: DevicePtrMut,
    pub accumulate: bool,
    /// Every value dim is 1: a scalar fill.
    pub scalar_fill: bool,
    /// The index tensors are boolean masks rather than coordinates.
    pub mask_index: bool,
    pub index_needs_broadcast: bool,
    pub value_needs_broadcast: bool,
    pub needs_broadcast: bool,
}

/// Selection-only superset of [`IndexPutArgs`].
pub struct IndexPutPatch<'a> {
    pub args: &'a IndexPutArgs,
    pub dtype: DType,
    pub index_dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<IndexPutArgs>] = &[KernelVariant::new(
    kernels::index_put_i64_indices,
    "index_put_i64_indices",
)];

/// Pure predicate: the coordinate-list kernel takes half-precision values
/// with int64 indices and no broadcasting on either the index list or the
/// values.
pub(crate) fn select(patch: &IndexPutPatch) -> Option<usize> {
    let args = patch.args;
    if args.mask_index || args.needs_broadcast {
        return None;
    }
    if patch.dtype == DType::F16
        && patch.index_dtype == DType::I64
        && patch.algo == Algo::DEFAULT
    {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch an index-put of `values` into `output` (a copy of `input`).
    #[allow(clippy::too_many_arguments)]
    pub fn index_put(
        &self,
        accumulate: bool,
        indices_desc: &[&TensorDescriptor],
        indices: &[DevicePtr],
        values_desc: &TensorDescriptor,
        values: DevicePtr,
        input_desc: &TensorDescriptor,
        input: DevicePtr,
        output_desc: &TensorDescriptor,
        output: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !values.is_null() && !input.is_null() && !output.is_null(),
            "index_put: null operand buffer"
        );
        ensure_param!(!indices_desc.is_empty(), "index_put: empty index list");
        ensure_param!(
            indices.len() == indices_desc.len(),
            "index_put: {} index buffers for {} descriptors",
            indices.len(),
            indices_desc.len()
        );
        ensure_param!(
            indices.iter().all(|p| !p.is_null()),
            "index_put: null index buffer"
        );
        ensure_param!(
            indices_desc.iter().all(|d| d.rank() > 0 && d.rank() <= DIM_MAX),
            "index_put: index descriptor rank outside 1..={DIM_MAX}"
        );

        let index_count = indices_desc.len();
        let rank = output_desc.rank();
        let value_rank = values_desc.rank();
        ensure_param!(
            rank > 0 && value_rank > 0,
            "index_put: operand descriptor is unset"
        );
        ensure_param!(
            rank <= DIM_MAX && value_rank <= DIM_MAX && index_count <= DIM_MAX,
            "index_put: rank above {DIM_MAX} is not representable"
        );
        ensure_param!(
            index_count <= rank,
            "index_put: {index_count} index tensors for an output of rank {rank}"
        );
        ensure_param!(
            input_desc.rank() == rank,
            "index_put: input rank {} and output rank {rank} differ",
            input_desc.rank()
        );

        let index0 = indices_desc[0];
        let index_dtype = index0.dtype();
        let mask_index = index_dtype == DType::Bool || index_dtype == DType::U8;
        let value_dims_logical = values_desc.dims();
        let scalar_fill = value_dims_logical.iter().all(|&d| d == 1);

        let mut index_broadcast = [false; DIM_MAX];
        let mut value_broadcast = [false; DIM_MAX];
        let mut result_dims = [0usize; DIM_MAX];
        let mut index_needs_broadcast = false;
        let mut value_needs_broadcast = false;
        // The representative index shape is the first non-broadcast one.
        let mut rep_index = index0;

        if index_dtype == DType::I64 {
            for &desc in indices_desc {
                if desc.dims()[0] != 1 {
                    rep_index = desc;
                    break;
                }
            }
            let rep_len = rep_index.dims()[0];
            for (i, desc) in indices_desc.iter().enumerate() {
                index_broadcast[i] = desc.dims()[0] == 1 && rep_len != 1;
                index_needs_broadcast |= index_broadcast[i];
            }

            // The gather result is [rep_len, trailing output dims].
            let mid = rank - index_count;
            ensure_param!(
                value_rank <= mid + 1,
                "index_put: value rank {value_rank} exceeds the result rank {}",
                mid + 1
            );
            result_dims[0] = rep_len;
            let out_dims_logical = output_desc.dims();
            for (d, slot) in result_dims.iter_mut().enumerate().take(mid + 1).skip(1) {
                *slot = out_dims_logical[d + index_count - 1];
            }

            value_needs_broadcast = value_rank != mid + 1;
            // Offset of the value dims against the result dims when the
            // value carries fewer axes.
            let shift = mid + 1 - value_rank;
            for v in (0..value_rank).rev() {
                let s_v = v + shift;
                ensure_param!(
                    value_dims_logical[v] == 1 || value_dims_logical[v] == result_dims[s_v],
                    "index_put: value dim {} does not conform to the result shape: \
                     each axis must equal the result axis or 1",
                    value_dims_logical[v]
                );
                if value_dims_logical[v] == 1 && result_dims[s_v] != 1 {
                    value_needs_broadcast = true;
                }
            }
            for d in 0..mid + 1 {
                // Missing leading axes always broadcast; present axes only
                // where the value holds a 1 against a longer result axis.
                value_broadcast[d] = if d < shift {
                    true
                } else {
                    value_dims_logical[d - shift] == 1 && result_dims[d] != 1
                };
            }
        }

        let needs_broadcast = index_needs_broadcast || value_needs_broadcast;

        let mut value_dims = [0usize; DIM_MAX];
        value_dims[..value_rank].copy_from_slice(value_dims_logical);

        let args = IndexPutArgs {
            spe_count: self.spe_count(),
            elem_size: output_desc.dtype().size_in_bytes(),
            index_count,
            index_rank: rep_index.rank(),
            index_dims: reversed_dims(rep_index.dims()),
            rank,
            out_dims: reversed_dims(output_desc.dims()),
            index_broadcast,
            value_rank,
            value_dims,
            value_broadcast,
            result_dims,
            indices: indices.to_vec(),
            input,
            values,
            output,
            accumulate,
            scalar_fill,
            mask_index,
            index_needs_broadcast,
            value_needs_broadcast,
            needs_broadcast,
        };
        let patch = IndexPutPatch {
            args: &args,
            dtype: values_desc.dtype(),
            index_dtype,
            algo,
        };

        let mut op = OpRunner::new("index_put", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
