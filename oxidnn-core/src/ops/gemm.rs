//! Half-precision general matrix multiply: `C = alpha * A @ B + beta * C`.

use crate::device::{DevicePtr, DevicePtrMut, Handle};
use crate::error::ensure_param;
use crate::kernels;
use crate::ops::{Algo, KernelVariant, OpRunner};
use crate::{DType, Error, Result};

/// Matrix transpose request for one GEMM operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    None,
    Trans,
    ConjTrans,
}

impl Transpose {
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Transpose::None),
            1 => Ok(Transpose::Trans),
            2 => Ok(Transpose::ConjTrans),
            other => Err(Error::InvalidArgument(format!(
                "unknown transpose encoding: {other}"
            ))),
        }
    }
}

/// Kernel parameter record.
#[derive(Debug, Clone, Copy)]
pub struct GemmArgs {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
    pub ldb: usize,
    pub ldc: usize,
    pub alpha: f32,
    pub beta: f32,
    pub batch: usize,
    pub a: DevicePtr,
    pub b: DevicePtr,
    pub c: DevicePtrMut,
    pub a_type: DType,
    pub b_type: DType,
    pub c_type: DType,
    /// Tile extents chosen by the dispatcher, zero until selection.
    pub tile_m: usize,
    pub tile_n: usize,
    pub tile_k: usize,
}

/// Selection-only superset of [`GemmArgs`].
pub struct GemmPatch<'a> {
    pub args: &'a GemmArgs,
    pub transa: Transpose,
    pub transb: Transpose,
    pub algo: Algo,
}

// Tile ladders for the half-precision kernels. The M dimension splits
// across 4 compute rows, K and N across 8-lane vectors.
const MAX_TILE_M: usize = 512;
const MIN_TILE_M: usize = 64;
const MAX_TILE_N: usize = 512;
const MIN_TILE_N: usize = 256;
const MAX_TILE_K: usize = 256;
const MIN_TILE_K: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TilePlan {
    pub tile_m: usize,
    pub tile_n: usize,
    pub tile_k: usize,
    /// Whether each operand needs a padded staging copy.
    pub pad_a: bool,
    pub pad_b: bool,
    pub pad_c: bool,
}

/// Largest tile on the ladder `max, max-step, ..` that divides `extent`;
/// `min` when none does.
fn largest_tile(extent: usize, max: usize, min: usize, step: usize) -> usize {
    let mut tile = max;
    while tile > min {
        if extent % tile == 0 {
            return tile;
        }
        tile -= step;
    }
    min
}

fn round_up(extent: usize, tile: usize) -> usize {
    extent.div_ceil(tile) * tile
}

/// Deterministic tiling/padding plan for the given problem.
pub(crate) fn tile_plan(args: &GemmArgs) -> TilePlan {
    let tile_k = largest_tile(args.k, MAX_TILE_K, MIN_TILE_K, MIN_TILE_K);
    let tile_n = largest_tile(args.n, MAX_TILE_N, MIN_TILE_N, MIN_TILE_N);
    let mut tile_m = largest_tile(args.m, MAX_TILE_M, MIN_TILE_M, MIN_TILE_M);
    if tile_n == MAX_TILE_N && tile_m > 256 {
        tile_m = 256;
    }
    if tile_m < 256 {
        tile_m = 256;
    }

    let m_end = round_up(args.m, tile_m);
    let n_end = round_up(args.n, tile_n);
    let k_end = round_up(args.k, tile_k);

    let pad_m = m_end > args.m;
    let pad_n = n_end > args.n || args.ldb > args.n || args.ldc > args.n;
    let pad_k = k_end > args.k || args.lda > args.k;

    TilePlan {
        tile_m,
        tile_n,
        tile_k,
        pad_a: pad_m || pad_k,
        pad_b: pad_k || pad_n,
        pad_c: pad_m || pad_n,
    }
}

static VARIANTS: &[KernelVariant<GemmArgs>] = &[
    // Ordered by increasing optimization effort.
    KernelVariant::new(kernels::gemm_f16_single_core, "gemm_f16_single_core"),
    KernelVariant::new(kernels::gemm_f16_multi_core, "gemm_f16_multi_core"),
    KernelVariant::new(kernels::gemm_f16_dma, "gemm_f16_dma"),
    KernelVariant::new(kernels::gemm_f16_simd, "gemm_f16_simd"),
    KernelVariant::new(kernels::gemm_f16_matmul, "gemm_f16_matmul"),
    KernelVariant::new(kernels::gemm_f16_broadcast, "gemm_f16_broadcast"),
    KernelVariant::new(kernels::gemm_f16_double_buffer, "gemm_f16_double_buffer"),
];

/// Pure predicate: the fast half-precision path applies only to
/// non-transposed operands whose extents are multiples of 256, with
/// identity scaling and a tile plan that needs no padded staging copies.
pub(crate) fn select(patch: &GemmPatch) -> Option<usize> {
    let args = patch.args;
    if args.a_type != DType::F16 || args.b_type != DType::F16 {
        return None;
    }
    if patch.transa != Transpose::None || patch.transb != Transpose::None {
        return None;
    }
    if args.m % 256 != 0 || args.n % 256 != 0 || args.k % 256 != 0 {
        return None;
    }
    if (args.alpha - 1.0).abs() > 1e-6 || args.beta.abs() > 1e-6 {
        return None;
    }
    let plan = tile_plan(args);
    if plan.pad_a || plan.pad_b || plan.pad_c {
        return None;
    }
    Some(patch.algo.index())
}

impl Handle {
    /// Dispatch a half-precision GEMM.
    #[allow(clippy::too_many_arguments)]
    pub fn hgemm(
        &self,
        transa: Transpose,
        transb: Transpose,
        m: usize,
        n: usize,
        k: usize,
        alpha: f32,
        a: DevicePtr,
        lda: usize,
        b: DevicePtr,
        ldb: usize,
        beta: f32,
        c: DevicePtrMut,
        ldc: usize,
        algo: Algo,
    ) -> Result<()> {
        ensure_param!(
            !a.is_null() && !b.is_null() && !c.is_null(),
            "hgemm: null operand buffer"
        );

        let mut args = GemmArgs {
            m,
            n,
            k,
            lda,
            ldb,
            ldc,
            alpha,
            beta,
            batch: 1,
            a,
            b,
            c,
            a_type: DType::F16,
            b_type: DType::F16,
            c_type: DType::F16,
            tile_m: 0,
            tile_n: 0,
            tile_k: 0,
        };
        let patch = GemmPatch {
            args: &args,
            transa,
            transb,
            algo,
        };

        let mut op = OpRunner::new("gemm", VARIANTS);
        op.find(select(&patch))?;

        let plan = tile_plan(&args);
        args.tile_m = plan.tile_m;
        args.tile_n = plan.tile_n;
        args.tile_k = plan.tile_k;
        op.run(args, self.queue())
    }
}
