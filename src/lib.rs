//! SIR epidemics on Watts-Strogatz contact networks.
//!
//! [`sir_model`] holds the simulation core: the contact network, the per node
//! state, the synchronous daily propagation and the daily records. The other
//! modules are the command line front end around it.

use{
    std::{num::NonZeroUsize, sync::OnceLock},
    indicatif::*,
    tracing::{debug, warn},
};

pub mod error;
pub mod logging;
pub mod sir_model;
pub mod misc_types;
pub mod stats_methods;
pub mod json_parsing;
pub mod simulate;
pub mod simple_sampling;

pub use error::{CliError, ConfigurationError, SimulationError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static POOL_THREADS: OnceLock<usize> = OnceLock::new();

pub fn indication_bar(len: u64) -> ProgressBar
{
        // for indication on when it is finished
        let bar = ProgressBar::new(len);
        bar.set_style(ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise} - {eta_precise}] {wide_bar}"));
        bar
}

/// Limit the global rayon pool to `num_threads` (default 1).
/// The global pool can only be built once, later calls keep the first size.
pub fn build_thread_pool(num_threads: Option<NonZeroUsize>) -> Result<(), CliError>
{
    let j = num_threads.map_or(1, NonZeroUsize::get);
    if let Some(&existing) = POOL_THREADS.get() {
        if existing != j {
            warn!(existing, requested = j, "thread pool already built");
        }
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new().num_threads(j).build_global()?;
    let _ = POOL_THREADS.set(j);
    debug!(threads = j, "built thread pool");
    Ok(())
}
