//! Activation backward pass: `dx = alpha * act'(x, y) * dy + beta * dx`.

use crate::desc::{ActivationDescriptor, TensorDescriptor};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{ActivationMode, DType, Result};

/// Kernel parameter record.
#[derive(Debug, Clone, Copy)]
pub struct ActivationBackwardArgs {
    pub spe_count: usize,
    pub element_count: usize,
    pub mode: ActivationMode,
    pub coef: f64,
    pub x: DevicePtr,
    pub y: DevicePtr,
    pub dy: DevicePtr,
    pub dx: DevicePtrMut,
    pub alpha: f32,
    pub beta: f32,
}

/// Selection-only superset of [`ActivationBackwardArgs`].
pub struct ActivationBackwardPatch<'a> {
    pub args: &'a ActivationBackwardArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ActivationBackwardArgs>] = &[KernelVariant::new(
    kernels::activation_bwd_silu_f16,
    "activation_bwd_silu_f16",
)];

pub(crate) fn select(patch: &ActivationBackwardPatch) -> Option<usize> {
    if patch.dtype == DType::F16 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch an activation backward pass.
    #[allow(clippy::too_many_arguments)]
    pub fn activation_backward(
        &self,
        activation_desc: &ActivationDescriptor,
        alpha: f32,
        y_desc: &TensorDescriptor,
        y: DevicePtr,
        dy_desc: &TensorDescriptor,
        dy: DevicePtr,
        x_desc: &TensorDescriptor,
        x: DevicePtr,
        beta: f32,
        dx_desc: &TensorDescriptor,
        dx: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !x.is_null() && !y.is_null() && !dy.is_null() && !dx.is_null(),
            "activation_backward: null operand buffer"
        );
        ensure_param!(
            x_desc.rank() > 0 && y_desc.rank() > 0 && dy_desc.rank() > 0 && dx_desc.rank() > 0,
            "activation_backward: operand descriptor is unset"
        );

        let args = ActivationBackwardArgs {
            spe_count: self.spe_count(),
            element_count: x_desc.element_count(),
            mode: activation_desc.mode(),
            coef: activation_desc.coef(),
            x,
            y,
            dy,
            dx,
            alpha,
            beta,
        };
        let patch = ActivationBackwardPatch {
            args: &args,
            dtype: x_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("activation_backward", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
