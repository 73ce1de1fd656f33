use std::time::Instant;

use itertools::Itertools;
use mm_matrix::Matrix;
use mm_matrix::dense::RowMajorMatrix;
use mm_matrix::sparse::CsrMatrix;
use mm_mul::{mul_csr_csr, mul_dense_csr, mul_dense_dense, multiply};
use mm_scalar::Scalar;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, info_span};

use crate::parsers::Mode;
use crate::{Args, CliError};

/// Runs the multiplication selected by `args` with entries of type `T`.
pub fn run<T: Scalar>(args: &Args) -> Result<(), CliError> {
    if args.size == 0 {
        return Err(CliError::EmptySize);
    }
    if !(0.0..=1.0).contains(&args.sparsity) {
        return Err(CliError::Sparsity(args.sparsity));
    }
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let n = args.size;

    match args.mode {
        Mode::Dense => {
            let a = RowMajorMatrix::<T>::rand(&mut rng, n, n);
            let b = RowMajorMatrix::<T>::rand(&mut rng, n, n);
            let config = args.mul_config();
            let c = timed("dense-dense", || multiply(&a, &b, &config))?;
            if args.verify {
                check("dense-dense", c == mul_dense_dense(&a, &b)?)?;
            }
            if args.print {
                print_dense("A", &a);
                print_dense("B", &b);
                print_dense("A * B", &c);
            }
        }
        Mode::DenseSparse => {
            let a = RowMajorMatrix::<T>::rand(&mut rng, n, n);
            let b = CsrMatrix::<T>::rand_with_sparsity(&mut rng, n, n, args.sparsity);
            info!(nnz = b.nnz(), "generated sparse operand");
            let c = timed("dense-sparse", || mul_dense_csr(&a, &b, n));
            if args.print {
                print_dense("A", &a);
                print_csr("B", &b);
                print_dense("A * B (row broadcast)", &c);
            }
        }
        Mode::SparseSparse => {
            let a = CsrMatrix::<T>::rand_with_sparsity(&mut rng, n, n, args.sparsity);
            let b = CsrMatrix::<T>::rand_with_sparsity(&mut rng, n, n, args.sparsity);
            info!(a_nnz = a.nnz(), b_nnz = b.nnz(), "generated sparse operands");
            let c = timed("sparse-sparse", || mul_csr_csr(&a, &b, n));
            if args.verify {
                let expected = mul_dense_dense(&a.to_dense(), &b.to_dense())?;
                check("sparse-sparse", c.to_dense() == expected)?;
            }
            if args.print {
                print_csr("A", &a);
                print_csr("B", &b);
                print_csr("A * B", &c);
            }
        }
        Mode::Demo => run_demo::<T>()?,
    }
    Ok(())
}

/// The fixed 2x2 scenarios: `[[1, 2], [3, 4]] * [[5, 6], [7, 8]]`, the same `A` against
/// `diag(5, 7)` in CSR form, and `diag(1, 3) * diag(5, 7)` in CSR form.
pub fn run_demo<T: Scalar>() -> Result<(), CliError> {
    let s = T::from_u8;
    let a = RowMajorMatrix::new(vec![s(1), s(2), s(3), s(4)], 2);
    let b = RowMajorMatrix::new(vec![s(5), s(6), s(7), s(8)], 2);
    print_dense("Dense-Dense", &mul_dense_dense(&a, &b)?);

    let diag = |x, y| {
        CsrMatrix::from_dense(&RowMajorMatrix::new(
            vec![s(x), T::ZERO, T::ZERO, s(y)],
            2,
        ))
    };
    let sparse_b = diag(5, 7);
    print_dense("Dense-Sparse", &mul_dense_csr(&a, &sparse_b, 2));

    let sparse_a = diag(1, 3);
    print_csr("Sparse-Sparse", &mul_csr_csr(&sparse_a, &sparse_b, 2));
    Ok(())
}

fn timed<R>(label: &str, f: impl FnOnce() -> R) -> R {
    let _span = info_span!("multiply", strategy = label).entered();
    let start = Instant::now();
    let result = f();
    info!(elapsed = ?start.elapsed(), "done");
    result
}

fn check(label: &'static str, ok: bool) -> Result<(), CliError> {
    if ok {
        info!("{label} result matches the reference product");
        Ok(())
    } else {
        Err(CliError::Mismatch(label))
    }
}

fn print_dense<T: Scalar>(title: &str, m: &RowMajorMatrix<T>) {
    println!("{title} ({}):", m.dimensions());
    for row in m.rows() {
        println!("{}", row.iter().join(" "));
    }
}

fn print_csr<T: Scalar>(title: &str, m: &CsrMatrix<T>) {
    println!("{title} ({}, CSR):", m.dimensions());
    println!("Values: {}", m.values().iter().join(" "));
    println!("Column Indices: {}", m.col_indices().iter().join(" "));
    println!("Row Pointers: {}", m.row_ptr().iter().join(" "));
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn verified_runs_succeed() {
        for mode in ["dense", "sparse-sparse", "dense-sparse"] {
            let args = Args::parse_from([
                "mm", "-m", mode, "-n", "20", "-t", "3", "--cache", "-b", "7", "--verify",
            ]);
            run::<i32>(&args).unwrap();
            run::<i64>(&args).unwrap();
        }
    }

    #[test]
    fn demo_runs() {
        run_demo::<i32>().unwrap();
    }

    #[test]
    fn bad_sparsity_rejected() {
        let args = Args::parse_from(["mm", "-m", "ss", "-s", "1.5"]);
        assert!(matches!(run::<i32>(&args), Err(CliError::Sparsity(_))));
    }

    #[test]
    fn zero_size_rejected() {
        let args = Args::parse_from(["mm", "-n", "0"]);
        assert!(matches!(run::<i32>(&args), Err(CliError::EmptySize)));
    }
}
