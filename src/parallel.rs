//! Thread pool configuration for per-file extraction
//!
//! Extraction of one file never depends on another, so files are processed on
//! Rayon's pool and joined before aggregation.

use crate::errors::{ClimCompError, Result};
use log::info;
use rayon::ThreadPoolBuilder;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a configuration that uses a specific number of threads
    #[must_use]
    pub const fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Set up the global Rayon thread pool with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClimCompError::ThreadPoolError`] if the thread count is zero or the
    /// global pool was already initialized.
    pub fn setup_global_pool(&self) -> Result<()> {
        if let Some(num_threads) = self.num_threads {
            if num_threads == 0 {
                return Err(ClimCompError::ThreadPoolError(
                    "thread count must be at least 1".to_string(),
                ));
            }

            ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    ClimCompError::ThreadPoolError(format!(
                        "Failed to initialize thread pool with {num_threads} threads: {e}"
                    ))
                })?;

            info!("Configured parallel extraction with {num_threads} threads");
        } else {
            info!(
                "Using default thread pool ({} threads, {} CPU cores)",
                rayon::current_num_threads(),
                num_cpus::get()
            );
        }

        Ok(())
    }
}
