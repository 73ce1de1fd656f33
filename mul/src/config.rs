use core::ops::Range;

use mm_matrix::dense::{RowMajorMatrixView, RowMajorMatrixViewMut};
use mm_scalar::Scalar;

use crate::kernels::{multiply_cache_blocked, multiply_standard, multiply_vectorized};

/// Side length of a cache tile when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Options for [`multiply`](crate::multiply).
///
/// The three switches are independent. Threading composes with any kernel; when both
/// `use_simd` and `use_cache_optimization` are set, the vectorized kernel alone runs
/// (see [`Kernel::select`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MulConfig {
    pub use_multithreading: bool,
    pub use_simd: bool,
    pub use_cache_optimization: bool,
    /// Requested worker count. Values of 0 or 1 keep the work on the calling thread.
    pub num_threads: usize,
    /// Tile side length for the cache-blocked kernel.
    pub block_size: usize,
}

impl Default for MulConfig {
    fn default() -> Self {
        Self {
            use_multithreading: false,
            use_simd: false,
            use_cache_optimization: false,
            num_threads: 1,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl MulConfig {
    /// Enables multithreading with `num_threads` workers.
    #[must_use]
    pub const fn with_threads(mut self, num_threads: usize) -> Self {
        self.use_multithreading = true;
        self.num_threads = num_threads;
        self
    }

    #[must_use]
    pub const fn with_simd(mut self, use_simd: bool) -> Self {
        self.use_simd = use_simd;
        self
    }

    #[must_use]
    pub const fn with_cache_optimization(mut self, use_cache_optimization: bool) -> Self {
        self.use_cache_optimization = use_cache_optimization;
        self
    }

    #[must_use]
    pub const fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Whether the output rows will be split across worker threads.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.use_multithreading && self.num_threads > 1
    }
}

/// The dense kernel run on each row range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kernel {
    /// Plain `i, j, k` triple loop.
    Standard,
    /// Square tiles of side `block_size` over rows, columns of `B` and the shared dimension.
    CacheBlocked { block_size: usize },
    /// Eight output columns at a time in packed lanes.
    Vectorized,
}

impl Kernel {
    /// Picks the kernel for `config`.
    ///
    /// Vectorization takes priority over cache blocking: with both requested, the vectorized
    /// kernel runs on its own rather than inside tiles.
    #[must_use]
    pub const fn select(config: &MulConfig) -> Self {
        match (config.use_simd, config.use_cache_optimization) {
            (true, _) => Self::Vectorized,
            (false, true) => Self::CacheBlocked {
                block_size: config.block_size,
            },
            (false, false) => Self::Standard,
        }
    }

    /// Accumulates rows `rows` of `a * b` into `out`, whose row `r` holds output row
    /// `rows.start + r`.
    pub fn run<T: Scalar>(
        self,
        a: RowMajorMatrixView<'_, T>,
        b: RowMajorMatrixView<'_, T>,
        out: RowMajorMatrixViewMut<'_, T>,
        rows: Range<usize>,
    ) {
        match self {
            Self::Standard => multiply_standard(a, b, out, rows),
            Self::CacheBlocked { block_size } => multiply_cache_blocked(a, b, out, rows, block_size),
            Self::Vectorized => multiply_vectorized(a, b, out, rows),
        }
    }
}
