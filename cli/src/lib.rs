//! Command line collaborator for the multipliers: builds the configuration, generates operands,
//! times the product and prints it.

pub mod parsers;
pub mod runs;

use clap::Parser;
use mm_mul::{DEFAULT_BLOCK_SIZE, MulConfig, MulError};
use thiserror::Error;

use crate::parsers::{ElementOptions, Mode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Which multiplication to run.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = Mode::Dense)]
    pub mode: Mode,

    /// Integer type of the matrix entries.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = ElementOptions::I32)]
    pub element: ElementOptions,

    /// Side length of the generated square matrices.
    #[arg(short = 'n', long, default_value_t = 256)]
    pub size: usize,

    /// Fraction of zero entries in generated sparse matrices, in [0, 1].
    #[arg(short, long, default_value_t = 0.9)]
    pub sparsity: f64,

    /// Worker threads for the dense product. 1 keeps everything on the main thread.
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// Use the vectorized kernel.
    #[arg(long)]
    pub simd: bool,

    /// Use the cache-blocked kernel. Ignored when --simd is also given.
    #[arg(long)]
    pub cache: bool,

    /// Tile side length for the cache-blocked kernel.
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Seed for matrix generation.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Check the result against the reference dense product.
    #[arg(long)]
    pub verify: bool,

    /// Print operands and result.
    #[arg(short, long)]
    pub print: bool,
}

impl Args {
    #[must_use]
    pub fn mul_config(&self) -> MulConfig {
        let config = MulConfig::default()
            .with_simd(self.simd)
            .with_cache_optimization(self.cache)
            .with_block_size(self.block_size);
        if self.threads > 1 {
            config.with_threads(self.threads)
        } else {
            config
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Mul(#[from] MulError),

    #[error("sparsity {0} is outside [0, 1]")]
    Sparsity(f64),

    #[error("matrix size must be positive")]
    EmptySize,

    #[error("{0} result differs from the reference product")]
    Mismatch(&'static str),
}
