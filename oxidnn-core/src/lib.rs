//! Oxidnn is the host-side operator layer of an accelerator math library.
//!
//! It owns the two things the accelerator itself cannot: the descriptor
//! model (how a multi-dimensional operand is laid out in memory) and the
//! dispatch engine (which of several hardware kernel variants a call maps
//! to). The kernels themselves are opaque device routines; a dispatched
//! call enqueues one of them on the handle's execution queue and returns
//! before it runs.
//!
//! ## A quick guide
//! - Create a [`Handle`]. It owns the execution [`Queue`] operations
//!   dispatch to.
//! - Describe each operand with a [`TensorDescriptor`] (or
//!   [`FilterDescriptor`] for convolution weights): layout, element type,
//!   extents, strides.
//! - Call the operation on the handle. Selection is deterministic: either a
//!   registered kernel variant matches and is enqueued, or the call fails
//!   with [`Error::NotImplemented`]; there is no silent fallback.
//! - Kernel completion is asynchronous; use [`Handle::synchronize`] when
//!   you need it.
//!
//! ```
//! use half::f16;
//! use oxidnn_core::{Algo, DType, DevicePtr, DevicePtrMut, Handle, Layout, TensorDescriptor};
//!
//! let handle = Handle::new();
//!
//! let mut a_desc = TensorDescriptor::new();
//! a_desc.set_4d(Layout::Nchw, DType::F16, 2, 3, 4, 4).unwrap();
//! let c_desc = a_desc.clone();
//!
//! let a = vec![f16::ONE; 96];
//! let mut c = vec![f16::ZERO; 96];
//! handle
//!     .add_tensor(
//!         1.0,
//!         &a_desc,
//!         DevicePtr::from_host(&a),
//!         0.0,
//!         &c_desc,
//!         DevicePtrMut::from_host_mut(&mut c),
//!         Algo::DEFAULT,
//!     )
//!     .unwrap();
//! handle.synchronize().unwrap();
//! ```

mod desc;
mod device;
mod dtype;
mod error;
mod kernels;
mod layout;
pub mod ops;

pub use desc::{
    ActivationDescriptor, ActivationMode, ConvDescriptor, ConvMode, FilterDescriptor, NanPropagation,
    NdView, Tensor4d, TensorDescriptor, DIM_MAX,
};
pub use device::{
    DevicePtr, DevicePtrMut, Handle, Queue, DB_MAX_SPM_BYTES, SPA_COUNT, SPE_COUNT,
};
pub use dtype::{DType, WithDType};
pub use error::{Context, Error, Result, Status};
pub use layout::{Axis, FilterAxis, Layout};
pub use ops::gemm::Transpose;
pub use ops::scatter_out::{ScatterInput, ScatterReduction};
pub use ops::unary_ops::{UnaryOpMode, UnaryScalar};
pub use ops::Algo;
