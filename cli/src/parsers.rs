//! Value enums for the command line.
//!
//! Each choice may be given by its full name, by any prefix that determines it uniquely, or by a
//! short alias.

use clap::ValueEnum;
use clap::builder::PossibleValue;

/// Which multiplication strategy to exercise.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Dense by dense through the configurable dispatcher.
    Dense,
    /// Dense by CSR with row-broadcast semantics.
    DenseSparse,
    /// CSR by CSR.
    SparseSparse,
    /// The fixed 2x2 scenarios.
    Demo,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementOptions {
    I32,
    I64,
}

/// Produce a `PossibleValue` accepting `base`, every prefix of `base` at least
/// `min_unique_base_prefix` long, and each alias together with its prefixes of at least the given
/// length.
///
/// For example `get_aliases("sparse-sparse", 1, &[("ss", 2)])` accepts
///
/// ```text
/// s, sp, spa, ..., sparse-spars, sparse-sparse, ss
/// ```
fn get_aliases(
    base: &'static str,
    min_unique_base_prefix: usize,
    aliases: &[(&'static str, usize)],
) -> PossibleValue {
    PossibleValue::new(base).aliases(
        (min_unique_base_prefix..base.len())
            .map(|i| &base[..i])
            .chain(
                aliases
                    .iter()
                    .flat_map(|&(alias, min_unique)| (min_unique..=alias.len()).map(|i| &alias[..i])),
            ),
    )
}

impl ValueEnum for Mode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Dense, Self::DenseSparse, Self::SparseSparse, Self::Demo]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            // "dense" is a prefix of "dense-sparse", so it only matches in full.
            Self::Dense => get_aliases("dense", 5, &[("dd", 2)]),
            Self::DenseSparse => get_aliases("dense-sparse", 6, &[("ds", 2)]),
            Self::SparseSparse => get_aliases("sparse-sparse", 1, &[("ss", 2)]),
            Self::Demo => get_aliases("demo", 3, &[]),
        })
    }
}

impl ValueEnum for ElementOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::I32, Self::I64]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::I32 => get_aliases("i32", 2, &[("32", 2)]),
            Self::I64 => get_aliases("i64", 2, &[("64", 2)]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_and_aliases_resolve() {
        assert_eq!(Mode::from_str("dense", true), Ok(Mode::Dense));
        assert_eq!(Mode::from_str("dd", true), Ok(Mode::Dense));
        assert_eq!(Mode::from_str("dense-s", true), Ok(Mode::DenseSparse));
        assert_eq!(Mode::from_str("ds", true), Ok(Mode::DenseSparse));
        assert_eq!(Mode::from_str("sp", true), Ok(Mode::SparseSparse));
        assert_eq!(Mode::from_str("dem", true), Ok(Mode::Demo));
        assert_eq!(ElementOptions::from_str("64", true), Ok(ElementOptions::I64));
        assert!(Mode::from_str("d", true).is_err());
    }
}
