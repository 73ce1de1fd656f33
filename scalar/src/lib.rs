//! Element types for integer matrix multiplication.

#![no_std]

mod packed;
mod scalar;

pub use packed::*;
pub use scalar::*;
