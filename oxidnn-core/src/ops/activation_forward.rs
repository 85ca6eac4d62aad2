//! Activation forward pass: `y = alpha * act(x) + beta * y`.

use crate::desc::{ActivationDescriptor, TensorDescriptor};
use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{ActivationMode, DType, Result};

/// Kernel parameter record. The lookup tables are optional device buffers
/// used by table-driven activation variants.
#[derive(Debug, Clone, Copy)]
pub struct ActivationForwardArgs {
    pub spe_count: usize,
    pub element_count: usize,
    pub mode: ActivationMode,
    pub coef: f64,
    pub alpha: f32,
    pub beta: f32,
    pub x: DevicePtr,
    pub y: DevicePtrMut,
    pub table_a: DevicePtr,
    pub table_b: DevicePtr,
}

/// Selection-only superset of [`ActivationForwardArgs`].
pub struct ActivationForwardPatch<'a> {
    pub args: &'a ActivationForwardArgs,
    pub dtype: DType,
    pub algo: Algo,
}

static VARIANTS: &[KernelVariant<ActivationForwardArgs>] =
    &[KernelVariant::new(kernels::activation_fwd_f16, "activation_fwd_f16")];

pub(crate) fn select(patch: &ActivationForwardPatch) -> Option<usize> {
    if patch.dtype == DType::F16 && patch.algo == Algo::DEFAULT {
        return Some(0);
    }
    None
}

impl Handle {
    /// Dispatch an activation forward pass.
    #[allow(clippy::too_many_arguments)]
    pub fn activation_forward(
        &self,
        activation_desc: &ActivationDescriptor,
        alpha: f32,
        x_desc: &TensorDescriptor,
        x: DevicePtr,
        beta: f32,
        y_desc: &TensorDescriptor,
        y: DevicePtrMut,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !x.is_null() && !y.is_null(),
            "activation_forward: null operand buffer"
        );
        ensure_param!(
            x_desc.rank() > 0 && y_desc.rank() > 0,
            "activation_forward: operand descriptor is unset"
        );

        let args = ActivationForwardArgs {
            spe_count: self.spe_count(),
            element_count: x_desc.element_count(),
            mode: activation_desc.mode(),
            coef: activation_desc.coef(),
            alpha,
            beta,
            x,
            y,
            table_a: DevicePtr::null(),
            table_b: DevicePtr::null(),
        };
        let patch = ActivationForwardPatch {
            args: &args,
            dtype: x_desc.dtype(),
            algo,
        };

        let mut op = OpRunner::new("activation_forward", VARIANTS);
        op.find(select(&patch))?;
        op.run(args, self.queue())
    }
}
