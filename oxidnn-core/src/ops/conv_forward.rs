//! Forward convolution: `y = conv(x, w)` over 4-D activations.

use crate::desc::{ConvDescriptor, FilterDescriptor, TensorDescriptor};
use crate::device::{DevicePtr, DevicePtrMut, Handle, DB_MAX_SPM_BYTES};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Result};

/// Kernel parameter record. `e`/`f` are the output spatial extents.
#[derive(Debug, Clone, Copy)]
pub struct ConvForwardArgs {
    pub n: usize,
    /// Input channels, a multiple of 32 on the optimized path.
    pub c: usize,
    pub h: usize,
    pub w_extent: usize,
    /// Output channels, a multiple of 32 on the optimized path.
    pub m: usize,
    pub r: usize,
    pub s: usize,
    pub e: usize,
    pub f: usize,
    pub pad_h: usize,
    pub pad_w: usize,
    pub stride_h: usize,
    pub stride_w: usize,
    pub dilation_h: usize,
    pub dilation_w: usize,
    pub x: DevicePtr,
    pub w: DevicePtr,
    pub y: DevicePtrMut,
    pub spa_count: usize,
    pub spe_count: usize,
    pub alpha: f32,
    pub beta: f32,
    pub workspace: DevicePtrMut,
    pub workspace_size: usize,
    pub out_dtype: DType,
}

/// Selection-only superset of [`ConvForwardArgs`].
pub struct ConvForwardPatch<'a> {
    pub args: &'a ConvForwardArgs,
    pub x_dtype: DType,
    pub w_dtype: DType,
    pub y_dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ConvForwardArgs>] = &[
    KernelVariant::new(kernels::conv_fwd_f16_single_core, "conv_fwd_f16_single_core"),
    KernelVariant::new(kernels::conv_fwd_f16_multi_core, "conv_fwd_f16_multi_core"),
    KernelVariant::new(kernels::conv_fwd_f16_dma, "conv_fwd_f16_dma"),
    KernelVariant::new(kernels::conv_fwd_f16_simd, "conv_fwd_f16_simd"),
    KernelVariant::new(kernels::conv_fwd_f16_matmul, "conv_fwd_f16_matmul"),
    KernelVariant::new(kernels::conv_fwd_f16_broadcast, "conv_fwd_f16_broadcast"),
    KernelVariant::new(
        kernels::conv_fwd_f16_double_buffer,
        "conv_fwd_f16_double_buffer",
    ),
];

const F16_BYTES: usize = 2;

/// Pure predicate: half precision throughout, channel counts aligned to the
/// 32-lane vector width, a pointwise (1x1, unpadded, unit-stride,
/// undilated) window, and a working set that fits on chip.
pub(crate) fn select(patch: &ConvForwardPatch) -> Option<usize> {
    let args = patch.args;
    if patch.x_dtype != DType::F16 || patch.w_dtype != DType::F16 || patch.y_dtype != DType::F16 {
        return None;
    }
    if args.c % 32 != 0 || args.m % 32 != 0 {
        return None;
    }
    if args.r != 1 || args.s != 1 {
        return None;
    }
    if args.pad_h != 0 || args.pad_w != 0 || args.stride_h != 1 || args.stride_w != 1 {
        return None;
    }
    if args.dilation_h != 1 || args.dilation_w != 1 {
        return None;
    }
    // Input tile + weights + double-buffered output must fit the scratchpad.
    let working_set = args.h * args.w_extent * args.c
        + args.c * args.r * args.s * args.m
        + 2 * args.e * args.f * args.m;
    if working_set * F16_BYTES >= DB_MAX_SPM_BYTES {
        return None;
    }
    Some(patch.algo.index())
}

fn assemble(
    handle: &Handle,
    x_desc: &TensorDescriptor,
    w_desc: &FilterDescriptor,
    conv_desc: &ConvDescriptor,
    y_desc: &TensorDescriptor,
    alpha: f32,
    beta: f32,
) -> Result<ConvForwardArgs> {
    let [n, c, h, w_extent] = x_desc.dims4()?;
    let [m, _, r, s] = w_desc.mcrs()?;
    let [_, _, e, f] = y_desc.dims4()?;
    let [pad_h, pad_w] = conv_desc.pad();
    let [stride_h, stride_w] = conv_desc.filter_stride();
    let [dilation_h, dilation_w] = conv_desc.dilation();

    Ok(ConvForwardArgs {
        n,
        c,
        h,
        w_extent,
        m,
        r,
        s,
        e,
        f,
        pad_h,
        pad_w,
        stride_h,
        stride_w,
        dilation_h,
        dilation_w,
        x: DevicePtr::null(),
        w: DevicePtr::null(),
        y: DevicePtrMut::null(),
        spa_count: handle.spa_count(),
        spe_count: handle.spe_count(),
        alpha,
        beta,
        workspace: DevicePtrMut::null(),
        workspace_size: 0,
        out_dtype: y_desc.dtype(),
    })
}

/// The implemented ladder stages entirely through on-chip memory.
fn workspace_size(_patch: &ConvForwardPatch) -> usize {
    0
}

impl Handle {
    /// Scratch-buffer requirement of the variant the hint would pick.
    pub fn conv_forward_workspace_size(
        &self,
        x_desc: &TensorDescriptor,
        w_desc: &FilterDescriptor,
        conv_desc: &ConvDescriptor,
        y_desc: &TensorDescriptor,
        algo: Algo,
    ) -> Result<usize> {
        let args = assemble(self, x_desc, w_desc, conv_desc, y_desc, 1.0, 0.0)?;
        let patch = ConvForwardPatch {
            args: &args,
            x_dtype: x_desc.dtype(),
            w_dtype: w_desc.dtype(),
            y_dtype: y_desc.dtype(),
            algo,
        };
        Ok(workspace_size(&patch))
    }

    /// Dispatch a forward convolution.
    #[allow(clippy::too_many_arguments)]
    pub fn conv_forward(
        &self,
        alpha: f32,
        x_desc: &TensorDescriptor,
        x: DevicePtr,
        w_desc: &FilterDescriptor,
        w: DevicePtr,
        conv_desc: &ConvDescriptor,
        algo: Algo,
        workspace: DevicePtrMut,
        workspace_size: usize,
        beta: f32,
        y_desc: &TensorDescriptor,
        y: DevicePtrMut,
    ) -> Result<()> {
        ensure_param!(
            !x.is_null() && !w.is_null() && !y.is_null(),
            "conv_forward: null operand buffer"
        );

        let mut args = assemble(self, x_desc, w_desc, conv_desc, y_desc, alpha, beta)?;
        args.x = x;
        args.w = w;
        args.y = y;
        args.workspace = workspace;
        args.workspace_size = workspace_size;

        let patch = ConvForwardPatch {
            args: &args,
            x_dtype: x_desc.dtype(),
            w_dtype: w_desc.dtype(),
            y_dtype: y_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("conv_forward", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
