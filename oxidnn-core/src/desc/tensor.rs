use smallvec::SmallVec;

use crate::error::ensure_param;
use crate::{Axis, DType, Layout, Result};

/// Inline dimension capacity of a descriptor; higher ranks spill to the
/// heap and are released automatically on re-set and drop.
pub const DIM_MAX: usize = 8;

type DimVec = SmallVec<[usize; DIM_MAX]>;

/// Compute default (dense) strides for the given dims, right-to-left.
///
/// This treats the array as row major in the *given* dim order and is the
/// N-dimensional convention; 4-D descriptors instead derive strides per
/// layout. The two conventions are deliberately distinct.
pub(crate) fn contiguous_strides(dims: &[usize]) -> DimVec {
    let mut strides = DimVec::with_capacity(dims.len());
    let mut acc = 1;
    for dim in dims.iter().rev() {
        strides.push(acc);
        acc *= *dim;
    }
    strides.reverse();
    strides
}

/// Shape, stride, layout and element-type metadata of a tensor operand.
///
/// The descriptor never owns the data buffer. Rank 4 keeps the layout-aware
/// axis accessors live and caches the four extents and strides as scalars;
/// any other rank is addressed purely positionally through [`Self::nd`].
#[derive(Debug, Clone)]
pub struct TensorDescriptor {
    layout: Layout,
    dtype: DType,
    dims: DimVec,
    strides: DimVec,
    n: usize,
    c: usize,
    h: usize,
    w: usize,
    n_stride: usize,
    c_stride: usize,
    h_stride: usize,
    w_stride: usize,
}

/// Borrowed N-dimensional view of a descriptor, truncated to the rank the
/// caller asked for.
#[derive(Debug, Clone, Copy)]
pub struct NdView<'a> {
    pub dtype: DType,
    /// Stored rank, which may exceed `dims.len()` when the view was
    /// truncated.
    pub rank: usize,
    pub dims: &'a [usize],
    pub strides: &'a [usize],
}

/// Fully resolved 4-D descriptor contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tensor4d {
    pub dtype: DType,
    pub n: usize,
    pub c: usize,
    pub h: usize,
    pub w: usize,
    pub n_stride: usize,
    pub c_stride: usize,
    pub h_stride: usize,
    pub w_stride: usize,
}

impl TensorDescriptor {
    pub fn new() -> Self {
        Self {
            layout: Layout::Nhwc,
            dtype: DType::F32,
            dims: DimVec::new(),
            strides: DimVec::new(),
            n: 0,
            c: 0,
            h: 0,
            w: 0,
            n_stride: 0,
            c_stride: 0,
            h_stride: 0,
            w_stride: 0,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Dimensions in physical (stored) order.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Strides in physical (stored) order.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The axis-name accessors require a 4-D descriptor.
    pub fn check(&self) -> Result<()> {
        ensure_param!(
            self.dims.len() == 4,
            "tensor descriptor rank {} does not admit 4d access",
            self.dims.len()
        );
        Ok(())
    }

    /// Describe a 4-D tensor: extents through the layout's axis table and
    /// the dense strides of that layout.
    ///
    /// All validation happens before any field is written, so a rejected
    /// call leaves the previous contents fully observable.
    pub fn set_4d(
        &mut self,
        layout: Layout,
        dtype: DType,
        n: usize,
        c: usize,
        h: usize,
        w: usize,
    ) -> Result<()> {
        ensure_param!(
            n > 0 && c > 0 && h > 0 && w > 0,
            "tensor extents must be positive, got ({n}, {c}, {h}, {w})"
        );

        let [n_stride, c_stride, h_stride, w_stride] = layout.default_strides_4d(n, c, h, w);

        let mut dims = [0usize; 4];
        let mut strides = [0usize; 4];
        for (axis, dim, stride) in [
            (Axis::N, n, n_stride),
            (Axis::C, c, c_stride),
            (Axis::H, h, h_stride),
            (Axis::W, w, w_stride),
        ] {
            let index = layout.axis_index(axis);
            dims[index] = dim;
            strides[index] = stride;
        }

        self.layout = layout;
        self.dtype = dtype;
        self.dims = DimVec::from_slice(&dims);
        self.strides = DimVec::from_slice(&strides);
        self.n = n;
        self.c = c;
        self.h = h;
        self.w = w;
        self.n_stride = n_stride;
        self.c_stride = c_stride;
        self.h_stride = h_stride;
        self.w_stride = w_stride;
        Ok(())
    }

    /// Describe an N-dimensional tensor positionally. Missing strides
    /// default to the dense right-to-left cumulative product over the given
    /// dim order. Previous storage, inline or heap, is replaced in place.
    pub fn set_nd(&mut self, dtype: DType, dims: &[usize], strides: Option<&[usize]>) -> Result<()> {
        ensure_param!(!dims.is_empty(), "tensor rank must be positive");
        ensure_param!(
            dims.iter().all(|&d| d > 0),
            "tensor extents must be positive, got {dims:?}"
        );
        if let Some(strides) = strides {
            ensure_param!(
                strides.len() == dims.len(),
                "stride count {} does not match rank {}",
                strides.len(),
                dims.len()
            );
        }

        self.dtype = dtype;
        self.layout = Layout::Nchw;
        self.dims = DimVec::from_slice(dims);
        self.strides = match strides {
            Some(strides) => DimVec::from_slice(strides),
            None => contiguous_strides(dims),
        };

        // Positional order equals logical order under the forced Nchw
        // layout, so rank 4 refreshes the cached scalars directly.
        if dims.len() == 4 {
            self.n = self.dims[0];
            self.c = self.dims[1];
            self.h = self.dims[2];
            self.w = self.dims[3];
            self.n_stride = self.strides[0];
            self.c_stride = self.strides[1];
            self.h_stride = self.strides[2];
            self.w_stride = self.strides[3];
        }
        Ok(())
    }

    pub fn dim(&self, axis: Axis) -> Result<usize> {
        self.check()?;
        Ok(self.dims[self.layout.axis_index(axis)])
    }

    pub fn stride(&self, axis: Axis) -> Result<usize> {
        self.check()?;
        Ok(self.strides[self.layout.axis_index(axis)])
    }

    pub fn set_dim(&mut self, axis: Axis, dim: usize) -> Result<()> {
        self.check()?;
        ensure_param!(dim > 0, "tensor extent must be positive, got {dim}");
        self.dims[self.layout.axis_index(axis)] = dim;
        match axis {
            Axis::N => self.n = dim,
            Axis::C => self.c = dim,
            Axis::H => self.h = dim,
            Axis::W => self.w = dim,
        }
        Ok(())
    }

    pub fn set_stride(&mut self, axis: Axis, stride: usize) -> Result<()> {
        self.check()?;
        self.strides[self.layout.axis_index(axis)] = stride;
        match axis {
            Axis::N => self.n_stride = stride,
            Axis::C => self.c_stride = stride,
            Axis::H => self.h_stride = stride,
            Axis::W => self.w_stride = stride,
        }
        Ok(())
    }

    /// Resolved 4-D contents, all axes routed through the layout table.
    pub fn as_4d(&self) -> Result<Tensor4d> {
        self.check()?;
        Ok(Tensor4d {
            dtype: self.dtype,
            n: self.dim(Axis::N)?,
            c: self.dim(Axis::C)?,
            h: self.dim(Axis::H)?,
            w: self.dim(Axis::W)?,
            n_stride: self.stride(Axis::N)?,
            c_stride: self.stride(Axis::C)?,
            h_stride: self.stride(Axis::H)?,
            w_stride: self.stride(Axis::W)?,
        })
    }

    /// View up to `requested_rank` leading dims/strides; never exposes more
    /// entries than the caller asked for.
    pub fn nd(&self, requested_rank: usize) -> Result<NdView<'_>> {
        ensure_param!(requested_rank > 0, "requested rank must be positive");
        let count = self.dims.len().min(requested_rank);
        Ok(NdView {
            dtype: self.dtype,
            rank: self.dims.len(),
            dims: &self.dims[..count],
            strides: &self.strides[..count],
        })
    }

    /// Footprint of the tensor: the address span implied by the strides,
    /// `elem_size * (1 + sum((dim - 1) * stride))`, not the plain product.
    /// Exact for user-supplied non-dense strides.
    pub fn size_in_bytes(&self) -> usize {
        let mut span = 1usize;
        for i in (0..self.dims.len()).rev() {
            span += (self.dims[i] - 1) * self.strides[i];
        }
        span * self.dtype.size_in_bytes()
    }

    /// Number of logical elements.
    pub fn element_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Cached 4-D extents in logical (n, c, h, w) order.
    pub(crate) fn dims4(&self) -> Result<[usize; 4]> {
        self.check()?;
        Ok([self.n, self.c, self.h, self.w])
    }
}

impl Default for TensorDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
