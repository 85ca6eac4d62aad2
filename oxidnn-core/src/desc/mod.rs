mod activation;
mod conv;
mod filter;
mod tensor;

pub use activation::{ActivationDescriptor, ActivationMode, NanPropagation};
pub use conv::{ConvDescriptor, ConvMode};
pub use filter::FilterDescriptor;
pub use tensor::{NdView, Tensor4d, TensorDescriptor, DIM_MAX};
