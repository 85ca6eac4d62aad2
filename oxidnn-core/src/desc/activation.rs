use crate::{Error, Result};

/// Activation function selector. Only SiLU has registered kernel variants
/// on the current hardware generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationMode {
    Silu,
}

impl ActivationMode {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            13 => Ok(ActivationMode::Silu),
            other => Err(Error::InvalidArgument(format!(
                "unknown activation mode encoding: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NanPropagation {
    NotPropagate,
    Propagate,
}

impl NanPropagation {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(NanPropagation::NotPropagate),
            1 => Ok(NanPropagation::Propagate),
            other => Err(Error::InvalidArgument(format!(
                "unknown nan propagation encoding: {other}"
            ))),
        }
    }
}

/// Mode, NaN handling and coefficient of an activation operation.
#[derive(Debug, Clone)]
pub struct ActivationDescriptor {
    mode: ActivationMode,
    nan_opt: NanPropagation,
    coef: f64,
}

impl ActivationDescriptor {
    pub fn new() -> Self {
        Self {
            mode: ActivationMode::Silu,
            nan_opt: NanPropagation::NotPropagate,
            coef: 0.0,
        }
    }

    /// `coef` is the ceiling for clipped activations and the alpha for
    /// exponential ones; SiLU ignores it.
    pub fn set(&mut self, mode: ActivationMode, nan_opt: NanPropagation, coef: f64) {
        self.mode = mode;
        self.nan_opt = nan_opt;
        self.coef = coef;
    }

    pub fn mode(&self) -> ActivationMode {
        self.mode
    }

    pub fn nan_opt(&self) -> NanPropagation {
        self.nan_opt
    }

    pub fn coef(&self) -> f64 {
        self.coef
    }
}

impl Default for ActivationDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
