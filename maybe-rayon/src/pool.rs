#[cfg(feature = "parallel")]
pub use rayon::ThreadPoolBuildError as PoolBuildError;

/// Runs `op` on a dedicated pool of exactly `num_threads` workers.
///
/// Parallel iterators driven from inside `op` are scheduled on that pool, so a caller that splits
/// its work into `num_threads` pieces gets one piece per worker. Blocks until `op` returns. A panic
/// on any worker is propagated to the caller.
///
/// # Panics
/// Panics if `num_threads == 0`.
#[cfg(feature = "parallel")]
pub fn run_with_threads<OP, R>(num_threads: usize, op: OP) -> Result<R, PoolBuildError>
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    assert_ne!(num_threads, 0, "a worker pool needs at least one thread");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("mm-worker-{i}"))
        .build()?;
    Ok(pool.install(op))
}

/// Never constructed: without the `parallel` feature no pool is ever built.
#[cfg(not(feature = "parallel"))]
#[derive(Debug)]
pub enum PoolBuildError {}

#[cfg(not(feature = "parallel"))]
impl core::fmt::Display for PoolBuildError {
    fn fmt(&self, _: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {}
    }
}

#[cfg(not(feature = "parallel"))]
impl core::error::Error for PoolBuildError {}

/// Serial fallback: runs `op` on the calling thread.
///
/// # Panics
/// Panics if `num_threads == 0`.
#[cfg(not(feature = "parallel"))]
pub fn run_with_threads<OP, R>(num_threads: usize, op: OP) -> Result<R, PoolBuildError>
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    assert_ne!(num_threads, 0, "a worker pool needs at least one thread");
    Ok(op())
}
