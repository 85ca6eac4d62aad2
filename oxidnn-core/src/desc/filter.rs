use crate::error::ensure_param;
use crate::{DType, FilterAxis, Layout, Result};

/// Shape and element-type metadata of a convolution weight tensor.
///
/// Kernel weights are assumed dense, so unlike [`crate::TensorDescriptor`]
/// there is no independent stride array. Axis accessors share the tensor
/// layout table, with M in the batch slot and R/S in the spatial slots.
#[derive(Debug, Clone)]
pub struct FilterDescriptor {
    layout: Layout,
    dtype: DType,
    rank: usize,
    dims: [usize; 4],
    m: usize,
    c: usize,
    r: usize,
    s: usize,
}

impl FilterDescriptor {
    pub fn new() -> Self {
        Self {
            layout: Layout::Nhwc,
            dtype: DType::F32,
            rank: 0,
            dims: [0; 4],
            m: 0,
            c: 0,
            r: 0,
            s: 0,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn check(&self) -> Result<()> {
        ensure_param!(
            self.rank == 4,
            "filter descriptor rank {} does not admit 4d access",
            self.rank
        );
        Ok(())
    }

    /// Describe a 4-D filter of `m` output channels, `c` input channels and
    /// an `r` x `s` kernel window.
    pub fn set_4d(
        &mut self,
        dtype: DType,
        layout: Layout,
        m: usize,
        c: usize,
        r: usize,
        s: usize,
    ) -> Result<()> {
        ensure_param!(
            m > 0 && c > 0 && r > 0 && s > 0,
            "filter extents must be positive, got ({m}, {c}, {r}, {s})"
        );

        let mut dims = [0usize; 4];
        for (axis, dim) in [
            (FilterAxis::M, m),
            (FilterAxis::C, c),
            (FilterAxis::R, r),
            (FilterAxis::S, s),
        ] {
            dims[layout.axis_index(axis.tensor_axis())] = dim;
        }

        self.dtype = dtype;
        self.layout = layout;
        self.rank = 4;
        self.dims = dims;
        self.m = m;
        self.c = c;
        self.r = r;
        self.s = s;
        Ok(())
    }

    pub fn dim(&self, axis: FilterAxis) -> Result<usize> {
        self.check()?;
        Ok(self.dims[self.layout.axis_index(axis.tensor_axis())])
    }

    pub fn set_dim(&mut self, axis: FilterAxis, dim: usize) -> Result<()> {
        self.check()?;
        ensure_param!(dim > 0, "filter extent must be positive, got {dim}");
        self.dims[self.layout.axis_index(axis.tensor_axis())] = dim;
        match axis {
            FilterAxis::M => self.m = dim,
            FilterAxis::C => self.c = dim,
            FilterAxis::R => self.r = dim,
            FilterAxis::S => self.s = dim,
        }
        Ok(())
    }

    /// Footprint of the (always dense) filter.
    pub fn size_in_bytes(&self) -> Result<usize> {
        self.check()?;
        let elems: usize = self.dims[..self.rank].iter().product();
        Ok(elems * self.dtype.size_in_bytes())
    }

    /// Cached extents in logical (m, c, r, s) order.
    pub(crate) fn mcrs(&self) -> Result<[usize; 4]> {
        self.check()?;
        Ok([self.m, self.c, self.r, self.s])
    }
}

impl Default for FilterDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
