//! N-dimensional scatter-add: `out = x` then `out[index[i]] += updates[i]`.

use crate::desc::{TensorDescriptor, DIM_MAX};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. The index tensor's last dim splits `x` into an
/// addressed outer part and a copied inner part.
#[derive(Debug, Clone, Copy)]
pub struct ScatterNdAddArgs {
    pub spe_count: usize,
    /// Product of the addressed leading dims of `x`.
    pub x_outer: usize,
    /// Product of the remaining dims of `x`.
    pub x_inner: usize,
    /// The addressed leading dims of `x`, unflattened.
    pub x_outer_dims: [usize; DIM_MAX],
    pub index_rows: usize,
    pub index_cols: usize,
    pub update_rows: usize,
    pub update_cols: usize,
    pub x: DevicePtr,
    pub index: DevicePtr,
    pub updates: DevicePtr,
    pub out: DevicePtrMut,
}

/// Selection-only superset of [`ScatterNdAddArgs`].
pub struct ScatterNdAddPatch<'a> {
    pub args: &'a ScatterNdAddArgs,
    pub x_dtype: DType,
    /// Carried for the kernel contract; the current table is keyed on the
    /// data type alone.
    pub index_dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ScatterNdAddArgs>] = &[
    KernelVariant::new(kernels::scatter_nd_add_i32_f32, "scatter_nd_add_i32_f32"),
    KernelVariant::new(kernels::scatter_nd_add_i32_f16, "scatter_nd_add_i32_f16"),
    KernelVariant::new(kernels::scatter_nd_add_i32_i32, "scatter_nd_add_i32_i32"),
    KernelVariant::new(kernels::scatter_nd_add_i32_f64, "scatter_nd_add_i32_f64"),
    KernelVariant::new(kernels::scatter_nd_add_i32_i64, "scatter_nd_add_i32_i64"),
];

pub(crate) fn select(patch: &ScatterNdAddPatch) -> Option<usize> {
    if patch.algo != Algo::DEFAULT {
        return None;
    }
    match patch.x_dtype {
        DType::F32 => Some(0),
        DType::F16 => Some(1),
        DType::I32 => Some(2),
        DType::F64 => Some(3),
        DType::I64 => Some(4),
        _ => None,
    }
}

impl Handle {
    /// Dispatch an N-dimensional scatter-add.
    #[allow(clippy::too_many_arguments)]
    pub fn scatter_nd_add(
        &self,
        x_desc: &TensorDescriptor,
        x: DevicePtr,
        index_desc: &TensorDescriptor,
        index: DevicePtr,
        updates_desc: &TensorDescriptor,
        updates: DevicePtr,
        out_desc: &TensorDescriptor,
        out: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !x.is_null() && !index.is_null() && !updates.is_null() && !out.is_null(),
            "scatter_nd_add: null operand buffer"
        );
        let index_rank = index_desc.rank();
        ensure_param!(index_rank > 0, "scatter_nd_add: index descriptor is unset");
        ensure_param!(
            updates_desc.rank() > 0 && out_desc.rank() > 0,
            "scatter_nd_add: operand descriptor is unset"
        );

        let index_dims = index_desc.dims();
        let index_cols = index_dims[index_rank - 1];
        let x_dims = x_desc.dims();
        ensure_param!(
            index_cols <= x_dims.len() && index_cols <= DIM_MAX,
            "scatter_nd_add: index depth {index_cols} exceeds the addressable rank"
        );

        let mut x_outer_dims = [0usize; DIM_MAX];
        x_outer_dims[..index_cols].copy_from_slice(&x_dims[..index_cols]);
        let x_outer: usize = x_dims[..index_cols].iter().product();
        let x_inner: usize = x_dims[index_cols..].iter().product();
        let index_rows: usize = index_dims[..index_rank - 1].iter().product();

        let args = ScatterNdAddArgs {
            spe_count: self.spe_count(),
            x_outer,
            x_inner,
            x_outer_dims,
            index_rows,
            index_cols,
            update_rows: index_rows,
            update_cols: x_inner,
            x,
            index,
            updates,
            out,
        };
        let patch = ScatterNdAddPatch {
            args: &args,
            x_dtype: x_desc.dtype(),
            index_dtype: index_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("scatter_nd_add", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
