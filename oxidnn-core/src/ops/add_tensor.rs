//! Elementwise tensor add: `C = alpha * A + beta * C`.

use crate::desc::TensorDescriptor;
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Layout, Result};

/// Kernel parameter record; spatial extents are pre-flattened to `h * w`.
#[derive(Debug, Clone, Copy)]
pub struct AddTensorArgs {
    pub spe_count: usize,
    pub a_n: usize,
    pub c_n: usize,
    pub a_c: usize,
    pub a_hw: usize,
    pub c_hw: usize,
    pub layout: Layout,
    pub alpha: f32,
    pub beta: f32,
    pub a: DevicePtr,
    pub c: DevicePtrMut,
}

/// Selection-only superset of [`AddTensorArgs`].
pub struct AddTensorPatch<'a> {
    pub args: &'a AddTensorArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<AddTensorArgs>] = &[
    KernelVariant::new(kernels::add_tensor_f16_single_core, "add_tensor_f16_single_core"),
    KernelVariant::new(kernels::add_tensor_f16_multi_core, "add_tensor_f16_multi_core"),
    KernelVariant::new(
        kernels::add_tensor_f16_double_buffer,
        "add_tensor_f16_double_buffer",
    ),
    KernelVariant::new(kernels::add_tensor_f16_simd, "add_tensor_f16_simd"),
];

/// Pure predicate: flattened batch/spatial counts must agree, and the
/// half-precision kernels process element pairs, so the total count must be
/// even.
pub(crate) fn select(patch: &AddTensorPatch) -> Option<usize> {
    let args = patch.args;
    if args.a_n * args.a_hw != args.c_n * args.c_hw {
        return None;
    }
    if patch.dtype == DType::F16 && (args.a_n * args.a_hw * args.a_c) % 2 == 0 {
        return Some(patch.algo.index());
    }
    None
}

impl Handle {
    /// Dispatch an elementwise add of `A` into `C`.
    pub fn add_tensor(
        &self,
        alpha: f32,
        a_desc: &TensorDescriptor,
        a: DevicePtr,
        beta: f32,
        c_desc: &TensorDescriptor,
        c: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(!a.is_null() && !c.is_null(), "add_tensor: null operand buffer");

        let [a_n, a_c, a_h, a_w] = a_desc.dims4()?;
        let [c_n, _, c_h, c_w] = c_desc.dims4()?;

        let args = AddTensorArgs {
            spe_count: self.spe_count(),
            a_n,
            c_n,
            a_c,
            a_hw: a_h * a_w,
            c_hw: c_h * c_w,
            layout: c_desc.layout(),
            alpha,
            beta,
            a,
            c,
        };
        let patch = AddTensorPatch {
            args: &args,
            dtype: a_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("add_tensor", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
