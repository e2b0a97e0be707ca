//! Parallel evaluation settings
//!
//! Fused assignment writes every destination element independently, so the
//! index range can be split across threads. [`ParallelismConfig`] decides the
//! thread count and how small a chunk may get. Without the `rayon` feature
//! every configuration evaluates sequentially.

use crate::dtype::Element;
use crate::error::{Error, Result};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "rayon")]
use std::sync::{Arc, Mutex};

/// Destinations shorter than this are evaluated on the calling thread
pub const PARALLEL_MIN_LEN: usize = 4096;

/// Thread count and chunking for fused assignment
///
/// A dedicated pool (`num_threads = Some(n)` with `n > 1`) is built on first
/// parallel use and then reused by every assignment through this config and
/// its clones. Keep one config around instead of creating one per call.
///
/// # Example
/// ```
/// use extensor::parallel::ParallelismConfig;
///
/// // four dedicated threads, chunks of at least 1024 elements
/// let config = ParallelismConfig::new(Some(4), Some(1024));
/// assert_eq!(config.min_len(), 1024);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParallelismConfig {
    /// Size of a dedicated thread pool (`None` uses the global rayon pool)
    pub num_threads: Option<usize>,
    /// Minimum number of elements per parallel chunk
    pub min_len: Option<usize>,
    #[cfg(feature = "rayon")]
    pool: Arc<Mutex<Option<Arc<rayon::ThreadPool>>>>,
}

/// Compares the settings only; the cached pool is ignored
impl PartialEq for ParallelismConfig {
    fn eq(&self, other: &Self) -> bool {
        self.num_threads == other.num_threads && self.min_len == other.min_len
    }
}

impl Eq for ParallelismConfig {}

impl ParallelismConfig {
    /// Create a configuration
    #[allow(clippy::needless_update)]
    pub fn new(num_threads: Option<usize>, min_len: Option<usize>) -> Self {
        Self {
            num_threads,
            min_len,
            ..Self::default()
        }
    }

    /// Always evaluate on the calling thread
    pub fn sequential() -> Self {
        Self::new(Some(1), None)
    }

    /// Effective minimum chunk length
    pub fn min_len(&self) -> usize {
        self.min_len.unwrap_or(PARALLEL_MIN_LEN).max(1)
    }

    /// Whether a destination of `len` elements takes the parallel path
    pub fn is_parallel_for(&self, len: usize) -> bool {
        cfg!(feature = "rayon") && self.num_threads != Some(1) && len >= self.min_len() && len > 1
    }

    /// Reject a zero thread count
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == Some(0) {
            return Err(Error::InvalidArgument {
                arg: "num_threads",
                reason: "thread count must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The dedicated thread pool, if one is requested
    ///
    /// Built on the first call and cached; rebuilt if `num_threads` no longer
    /// matches the cached pool.
    #[cfg(feature = "rayon")]
    pub fn pool(&self) -> Result<Option<Arc<rayon::ThreadPool>>> {
        self.validate()?;
        let n = match self.num_threads {
            None | Some(0) | Some(1) => return Ok(None),
            Some(n) => n,
        };
        let mut cached = self.pool.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pool) = cached.as_ref().filter(|p| p.current_num_threads() == n) {
            return Ok(Some(Arc::clone(pool)));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map(Arc::new)
            .map_err(|e| Error::InvalidArgument {
                arg: "num_threads",
                reason: e.to_string(),
            })?;
        *cached = Some(Arc::clone(&pool));
        Ok(Some(pool))
    }

    /// Prepare an evaluator for a destination of `len` elements
    ///
    /// All fallible setup happens here, so a caller can prepare first and
    /// only then start mutating its destination.
    pub(crate) fn evaluator(&self, len: usize) -> Result<Evaluator> {
        self.validate()?;
        let parallel = self.is_parallel_for(len);
        #[cfg(feature = "rayon")]
        let pool = if parallel { self.pool()? } else { None };
        Ok(Evaluator {
            parallel,
            min_len: self.min_len(),
            #[cfg(feature = "rayon")]
            pool,
        })
    }
}

/// Ready-to-run evaluation strategy for one destination
pub(crate) struct Evaluator {
    parallel: bool,
    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    min_len: usize,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Evaluator {
    pub(crate) fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Store `f(i)` into `out[i]` for every index
    pub(crate) fn run<T, F>(&self, out: &mut [T], f: F)
    where
        T: Element,
        F: Fn(usize) -> T + Sync,
    {
        #[cfg(feature = "rayon")]
        if self.parallel {
            let min_len = self.min_len;
            match &self.pool {
                Some(pool) => pool.install(|| fill_parallel(out, min_len, &f)),
                None => fill_parallel(out, min_len, &f),
            }
            return;
        }

        for (i, slot) in out.iter_mut().enumerate() {
            *slot = f(i);
        }
    }
}

#[cfg(feature = "rayon")]
fn fill_parallel<T, F>(out: &mut [T], min_len: usize, f: &F)
where
    T: Element,
    F: Fn(usize) -> T + Sync,
{
    out.par_iter_mut()
        .enumerate()
        .with_min_len(min_len)
        .for_each(|(i, slot)| *slot = f(i));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParallelismConfig::default();
        assert_eq!(config.min_len(), PARALLEL_MIN_LEN);
        assert!(!config.is_parallel_for(PARALLEL_MIN_LEN - 1));
        assert!(!ParallelismConfig::sequential().is_parallel_for(1 << 20));
    }

    #[test]
    fn test_zero_min_len_clamped() {
        assert_eq!(ParallelismConfig::new(None, Some(0)).min_len(), 1);
    }

    #[test]
    fn test_sequential_run() {
        let evaluator = ParallelismConfig::sequential().evaluator(8).unwrap();
        assert!(!evaluator.is_parallel());
        let mut out = vec![0u32; 8];
        evaluator.run(&mut out, |i| i as u32 * 2);
        assert_eq!(out, vec![0, 2, 4, 6, 8, 10, 12, 14]);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_run_matches_sequential() {
        let config = ParallelismConfig::new(Some(3), Some(16));
        assert!(config.is_parallel_for(1000));
        let evaluator = config.evaluator(1000).unwrap();
        assert!(evaluator.is_parallel());

        let mut out = vec![0u64; 1000];
        evaluator.run(&mut out, |i| (i as u64) * (i as u64));
        assert!(out.iter().enumerate().all(|(i, &v)| v == (i as u64) * (i as u64)));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_pool_built_once_and_shared() {
        let config = ParallelismConfig::new(Some(2), Some(8));
        let first = config.pool().unwrap().unwrap();
        let again = config.evaluator(64).unwrap().pool.unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        let cloned = config.clone();
        assert!(Arc::ptr_eq(&first, &cloned.pool().unwrap().unwrap()));
        assert_eq!(cloned, config);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_pool_rebuilt_after_resize() {
        let mut config = ParallelismConfig::new(Some(2), None);
        let two = config.pool().unwrap().unwrap();
        config.num_threads = Some(3);
        let three = config.pool().unwrap().unwrap();
        assert_eq!(three.current_num_threads(), 3);
        assert!(!Arc::ptr_eq(&two, &three));

        config.num_threads = None;
        assert!(config.pool().unwrap().is_none());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = ParallelismConfig::new(Some(0), Some(1));
        assert!(matches!(
            config.evaluator(10),
            Err(Error::InvalidArgument { arg: "num_threads", .. })
        ));
    }
}
