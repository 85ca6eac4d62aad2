//! Host-visible entry points of the accelerator kernels.
//!
//! The dispatcher treats every entry as an opaque `fn(Args)` launched on an
//! execution queue: the kernel consumes its argument record and reports
//! nothing back, so all correctness checks happen before the call. The
//! bodies here are host stubs; the device toolchain supplies the real
//! SIMD/DMA implementations when the library is linked for hardware.

use crate::ops::activation_backward::ActivationBackwardArgs;
use crate::ops::activation_forward::ActivationForwardArgs;
use crate::ops::add_tensor::AddTensorArgs;
use crate::ops::arg_max::ArgMaxArgs;
use crate::ops::conv_forward::ConvForwardArgs;
use crate::ops::gemm::GemmArgs;
use crate::ops::index_put::IndexPutArgs;
use crate::ops::logical_not::LogicalNotArgs;
use crate::ops::masked_fill::MaskedFillArgs;
use crate::ops::masked_select::MaskedSelectArgs;
use crate::ops::scale_tensor::ScaleTensorArgs;
use crate::ops::scatter_nd_add::ScatterNdAddArgs;
use crate::ops::scatter_out::ScatterOutArgs;
use crate::ops::unary_ops::UnaryOpsArgs;
use crate::ops::unique::UniqueArgs;

pub(crate) fn gemm_f16_single_core(_args: GemmArgs) {}
pub(crate) fn gemm_f16_multi_core(_args: GemmArgs) {}
pub(crate) fn gemm_f16_dma(_args: GemmArgs) {}
pub(crate) fn gemm_f16_simd(_args: GemmArgs) {}
pub(crate) fn gemm_f16_matmul(_args: GemmArgs) {}
pub(crate) fn gemm_f16_broadcast(_args: GemmArgs) {}
pub(crate) fn gemm_f16_double_buffer(_args: GemmArgs) {}

pub(crate) fn conv_fwd_f16_single_core(_args: ConvForwardArgs) {}
pub(crate) fn conv_fwd_f16_multi_core(_args: ConvForwardArgs) {}
pub(crate) fn conv_fwd_f16_dma(_args: ConvForwardArgs) {}
pub(crate) fn conv_fwd_f16_simd(_args: ConvForwardArgs) {}
pub(crate) fn conv_fwd_f16_matmul(_args: ConvForwardArgs) {}
pub(crate) fn conv_fwd_f16_broadcast(_args: ConvForwardArgs) {}
pub(crate) fn conv_fwd_f16_double_buffer(_args: ConvForwardArgs) {}

pub(crate) fn add_tensor_f16_single_core(_args: AddTensorArgs) {}
pub(crate) fn add_tensor_f16_multi_core(_args: AddTensorArgs) {}
pub(crate) fn add_tensor_f16_double_buffer(_args: AddTensorArgs) {}
pub(crate) fn add_tensor_f16_simd(_args: AddTensorArgs) {}

pub(crate) fn scale_tensor_f32(_args: ScaleTensorArgs) {}

pub(crate) fn unary_ops_alpha_f32(_args: UnaryOpsArgs) {}
pub(crate) fn unary_ops_alpha_i32(_args: UnaryOpsArgs) {}

pub(crate) fn activation_fwd_f16(_args: ActivationForwardArgs) {}
pub(crate) fn activation_bwd_silu_f16(_args: ActivationBackwardArgs) {}

pub(crate) fn arg_max_f16(_args: ArgMaxArgs) {}

pub(crate) fn masked_fill_f32(_args: MaskedFillArgs) {}
pub(crate) fn masked_select_i32_u8(_args: MaskedSelectArgs) {}

pub(crate) fn logical_not_bool(_args: LogicalNotArgs) {}

pub(crate) fn index_put_i64_indices(_args: IndexPutArgs) {}

pub(crate) fn scatter_out_f32(_args: ScatterOutArgs) {}

pub(crate) fn scatter_nd_add_i32_f32(_args: ScatterNdAddArgs) {}
pub(crate) fn scatter_nd_add_i32_f16(_args: ScatterNdAddArgs) {}
pub(crate) fn scatter_nd_add_i32_i32(_args: ScatterNdAddArgs) {}
pub(crate) fn scatter_nd_add_i32_f64(_args: ScatterNdAddArgs) {}
pub(crate) fn scatter_nd_add_i32_i64(_args: ScatterNdAddArgs) {}

pub(crate) fn unique_sorted_i64(_args: UniqueArgs) {}
