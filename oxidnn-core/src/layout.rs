use crate::{Error, Result};

/// Physical ordering of the four logical tensor axes, named from the
/// slowest- to the fastest-varying stored axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Row major (`w_stride = 1`, `h_stride = w`).
    Nchw,
    /// Feature maps interleaved (`c_stride = 1`).
    Nhwc,
    Chwn,
    Nwhc,
}

/// Logical tensor axis: batch, channel, height, width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    N,
    C,
    H,
    W,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::N, Axis::C, Axis::H, Axis::W];
}

/// Logical filter axis: output channels, input channels, kernel height,
/// kernel width. Shares the tensor axis table, with M stored in the batch
/// slot and R/S in the spatial slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterAxis {
    M,
    C,
    R,
    S,
}

impl FilterAxis {
    pub const ALL: [FilterAxis; 4] = [FilterAxis::M, FilterAxis::C, FilterAxis::R, FilterAxis::S];

    pub(crate) fn tensor_axis(self) -> Axis {
        match self {
            FilterAxis::M => Axis::N,
            FilterAxis::C => Axis::C,
            FilterAxis::R => Axis::H,
            FilterAxis::S => Axis::W,
        }
    }
}

impl Layout {
    /// Map a logical axis to its physical index under this layout.
    ///
    /// This single table backs every dimension and stride accessor of both
    /// descriptor types, so a set followed by a get on the same axis always
    /// round-trips and never perturbs another axis.
    pub fn axis_index(self, axis: Axis) -> usize {
        match axis {
            Axis::N => match self {
                Layout::Nchw | Layout::Nhwc | Layout::Nwhc => 0,
                Layout::Chwn => 3,
            },
            Axis::C => match self {
                Layout::Chwn => 0,
                Layout::Nchw => 1,
                Layout::Nhwc | Layout::Nwhc => 3,
            },
            Axis::H => match self {
                Layout::Nhwc | Layout::Chwn => 1,
                Layout::Nchw | Layout::Nwhc => 2,
            },
            Axis::W => match self {
                Layout::Nwhc => 1,
                Layout::Nhwc | Layout::Chwn => 2,
                Layout::Nchw => 3,
            },
        }
    }

    /// Dense strides for a 4-D tensor of extents (n, c, h, w), returned in
    /// logical (n, c, h, w) order. Which axis is fastest depends on the
    /// layout, so these are derived per layout rather than from a generic
    /// rank formula.
    pub(crate) fn default_strides_4d(self, n: usize, c: usize, h: usize, w: usize) -> [usize; 4] {
        match self {
            Layout::Nchw => [c * h * w, h * w, w, 1],
            Layout::Nhwc => [h * w * c, 1, w * c, c],
            Layout::Chwn => [1, h * w * n, w * n, n],
            Layout::Nwhc => [w * h * c, 1, c, h * c],
        }
    }

    /// Decode the wire encoding of a layout. Unknown values fail with
    /// `InvalidArgument` at this boundary; past it, a layout is always one
    /// of the four known orderings.
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Layout::Nchw),
            1 => Ok(Layout::Nhwc),
            2 => Ok(Layout::Chwn),
            3 => Ok(Layout::Nwhc),
            other => Err(Error::InvalidArgument(format!(
                "unknown tensor layout encoding: {other}"
            ))),
        }
    }
}
