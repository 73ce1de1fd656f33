use mm_matrix::Matrix;
use mm_matrix::dense::RowMajorMatrix;
use mm_scalar::Scalar;
use tracing::{debug, instrument};

use crate::partition::{partition_rows, run_partitioned};
use crate::{Kernel, MulConfig, MulError};

fn check_dimensions<T: Scalar>(
    a: &RowMajorMatrix<T>,
    b: &RowMajorMatrix<T>,
) -> Result<(), MulError> {
    if a.width() != b.height() {
        return Err(MulError::DimensionMismatch {
            a_width: a.width(),
            b_height: b.height(),
        });
    }
    Ok(())
}

/// Compute `C = A * B` with the plain triple loop.
///
/// This is the reference product: every other strategy and configuration agrees with it exactly.
/// Arithmetic wraps on overflow.
#[instrument(level = "debug", skip_all, fields(a = %a.dimensions(), b = %b.dimensions()))]
pub fn mul_dense_dense<T: Scalar>(
    a: &RowMajorMatrix<T>,
    b: &RowMajorMatrix<T>,
) -> Result<RowMajorMatrix<T>, MulError> {
    check_dimensions(a, b)?;
    let mut out = RowMajorMatrix::zeros(a.height(), b.width());
    Kernel::Standard.run(a.as_view(), b.as_view(), out.as_view_mut(), 0..a.height());
    Ok(out)
}

/// Compute `C = A * B` with the kernel and threading chosen by `config`.
///
/// Shapes are checked before anything is allocated. With threading enabled and more than one
/// thread requested, the output rows are split by [`partition_rows`] and each range is computed by
/// its own worker; the call returns only after every worker has finished.
#[instrument(level = "debug", skip_all, fields(a = %a.dimensions(), b = %b.dimensions()))]
pub fn multiply<T: Scalar>(
    a: &RowMajorMatrix<T>,
    b: &RowMajorMatrix<T>,
    config: &MulConfig,
) -> Result<RowMajorMatrix<T>, MulError> {
    check_dimensions(a, b)?;
    let kernel = Kernel::select(config);
    if kernel == (Kernel::CacheBlocked { block_size: 0 }) {
        return Err(MulError::ZeroBlockSize);
    }
    debug!(?kernel, threads = config.num_threads, "selected kernel");

    let mut out = RowMajorMatrix::zeros(a.height(), b.width());
    if config.is_parallel() {
        let ranges = partition_rows(a.height(), config.num_threads);
        run_partitioned(
            kernel,
            a.as_view(),
            b.as_view(),
            out.as_view_mut(),
            &ranges,
        )?;
    } else {
        kernel.run(a.as_view(), b.as_view(), out.as_view_mut(), 0..a.height());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::kernels::testing::{AWKWARD_SHAPES, naive, rand_pair};

    fn all_configs() -> Vec<MulConfig> {
        let mut configs = Vec::new();
        for threaded in [false, true] {
            for simd in [false, true] {
                for cache in [false, true] {
                    for threads in [1, 2, 4] {
                        configs.push(MulConfig {
                            use_multithreading: threaded,
                            use_simd: simd,
                            use_cache_optimization: cache,
                            num_threads: threads,
                            block_size: 8,
                        });
                    }
                }
            }
        }
        configs
    }

    #[test]
    fn two_by_two_under_every_config() {
        let a = RowMajorMatrix::<i32>::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = RowMajorMatrix::<i32>::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
        let expected = vec![vec![19, 22], vec![43, 50]];

        assert_eq!(mul_dense_dense(&a, &b).unwrap().to_rows(), expected);
        for config in all_configs() {
            assert_eq!(
                multiply(&a, &b, &config).unwrap().to_rows(),
                expected,
                "{config:?}"
            );
        }
    }

    #[test]
    fn reference_matches_naive() {
        for (seed, &(m, k, n)) in AWKWARD_SHAPES.iter().enumerate() {
            let (a, b) = rand_pair::<i32>(seed as u64, m, k, n);
            assert_eq!(mul_dense_dense(&a, &b).unwrap(), naive(&a, &b));
        }
    }

    #[test]
    fn every_config_matches_reference() {
        let (a, b) = rand_pair::<i32>(17, 23, 19, 21);
        let expected = mul_dense_dense(&a, &b).unwrap();
        for config in all_configs() {
            assert_eq!(multiply(&a, &b, &config).unwrap(), expected, "{config:?}");
        }
    }

    #[test]
    fn default_config_is_reference() {
        let (a, b) = rand_pair::<i64>(3, 5, 6, 7);
        assert_eq!(
            multiply(&a, &b, &MulConfig::default()).unwrap(),
            mul_dense_dense(&a, &b).unwrap()
        );
    }

    #[test]
    fn mismatched_shapes_rejected_everywhere() {
        let (a, _) = rand_pair::<i32>(1, 3, 4, 2);
        let (_, b) = rand_pair::<i32>(2, 3, 5, 2);
        let err = MulError::DimensionMismatch {
            a_width: 4,
            b_height: 5,
        };
        assert_eq!(mul_dense_dense(&a, &b), Err(err.clone()));
        for config in all_configs() {
            assert_eq!(multiply(&a, &b, &config), Err(err.clone()), "{config:?}");
        }
    }

    #[test]
    fn zero_block_size_rejected_only_when_used() {
        let (a, b) = rand_pair::<i32>(5, 4, 4, 4);
        let blocked = MulConfig::default()
            .with_cache_optimization(true)
            .with_block_size(0);
        assert_eq!(multiply(&a, &b, &blocked), Err(MulError::ZeroBlockSize));
        assert!(multiply(&a, &b, &blocked.with_simd(true)).is_ok());
    }

    #[test]
    fn more_threads_than_rows() {
        let (a, b) = rand_pair::<i32>(8, 3, 9, 10);
        let config = MulConfig::default().with_threads(16).with_simd(true);
        assert_eq!(
            multiply(&a, &b, &config).unwrap(),
            mul_dense_dense(&a, &b).unwrap()
        );
    }

    #[test]
    fn inputs_are_untouched() {
        let (a, b) = rand_pair::<i32>(6, 10, 10, 10);
        let (a0, b0) = (a.clone(), b.clone());
        let config = MulConfig::default()
            .with_threads(3)
            .with_cache_optimization(true);
        let _ = multiply(&a, &b, &config).unwrap();
        assert_eq!((a, b), (a0, b0));
    }
}
