use crate::error::ensure_param;
use crate::{DType, Error, Result};

/// Convolution flavor: true convolution flips the kernel window,
/// cross-correlation does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvMode {
    Convolution,
    CrossCorrelation,
}

impl ConvMode {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(ConvMode::Convolution),
            1 => Ok(ConvMode::CrossCorrelation),
            other => Err(Error::InvalidArgument(format!(
                "unknown convolution mode encoding: {other}"
            ))),
        }
    }
}

/// Padding, stride and dilation parameters of a 2-D convolution.
#[derive(Debug, Clone)]
pub struct ConvDescriptor {
    pad: [usize; 2],
    filter_stride: [usize; 2],
    dilation: [usize; 2],
    mode: ConvMode,
    dtype: DType,
}

impl ConvDescriptor {
    pub fn new() -> Self {
        Self {
            pad: [0, 0],
            filter_stride: [1, 1],
            dilation: [1, 1],
            mode: ConvMode::CrossCorrelation,
            dtype: DType::F32,
        }
    }

    pub fn set_2d(
        &mut self,
        pad_h: usize,
        pad_w: usize,
        stride_h: usize,
        stride_w: usize,
        dilation_h: usize,
        dilation_w: usize,
        mode: ConvMode,
        dtype: DType,
    ) -> Result<()> {
        ensure_param!(
            stride_h > 0 && stride_w > 0,
            "filter stride must be positive, got ({stride_h}, {stride_w})"
        );
        ensure_param!(
            dilation_h > 0 && dilation_w > 0,
            "filter dilation must be positive, got ({dilation_h}, {dilation_w})"
        );
        self.pad = [pad_h, pad_w];
        self.filter_stride = [stride_h, stride_w];
        self.dilation = [dilation_h, dilation_w];
        self.mode = mode;
        self.dtype = dtype;
        Ok(())
    }

    /// (pad_h, pad_w).
    pub fn pad(&self) -> [usize; 2] {
        self.pad
    }

    /// (stride_h, stride_w).
    pub fn filter_stride(&self) -> [usize; 2] {
        self.filter_stride
    }

    /// (dilation_h, dilation_w).
    pub fn dilation(&self) -> [usize; 2] {
        self.dilation
    }

    pub fn mode(&self) -> ConvMode {
        self.mode
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }
}

impl Default for ConvDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
