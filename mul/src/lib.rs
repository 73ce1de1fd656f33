//! Integer matrix multiplication.
//!
//! Three structural strategies are provided: dense by dense ([`multiply`], with the
//! [`mul_dense_dense`] reference), dense by CSR ([`mul_dense_csr`]) and CSR by CSR
//! ([`mul_csr_csr`]). The dense path can additionally run a cache-blocked or a vectorized kernel
//! and spread its output rows across a pool of worker threads; every combination produces the same
//! bits as the reference product.

#![no_std]

extern crate alloc;

mod config;
mod dense;
mod error;
pub mod kernels;
mod partition;
mod sparse;

pub use config::*;
pub use dense::*;
pub use error::*;
pub use partition::partition_rows;
pub use sparse::*;
