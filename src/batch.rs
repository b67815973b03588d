//! Parallel conversion of many files
//!
//! Parallelism is across files only: each job still runs its stages
//! sequentially on one worker, and jobs share nothing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::ConversionConfig;
use crate::emit::sanitize_identifier;
use crate::error::ConversionError;
use crate::report::ConversionReport;

/// Result of one job in a batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Input file of the job
    pub input: PathBuf,
    /// Report on success, the first stage error otherwise
    pub result: Result<ConversionReport, ConversionError>,
}

/// Default worker count: available CPU threads minus one, at least one
pub fn default_jobs() -> usize {
    let n = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

/// Derive a job for `input` from a template, writing into `out_dir`
///
/// The output file is `<stem>.<format extension>` and the array name is the
/// file stem turned into a C identifier.
pub fn job_for_input(template: &ConversionConfig, input: &Path, out_dir: &Path) -> ConversionConfig {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let array_name = sanitize_identifier(&stem);
    let output = out_dir.join(format!("{}.{}", stem, template.format.extension()));

    ConversionConfig {
        input: input.to_path_buf(),
        output,
        array_name,
        ..template.clone()
    }
}

/// Run independent conversion jobs on a pool of `workers` threads
///
/// Outcomes come back in the same order as `jobs`. A failing job does not
/// stop the others.
///
/// # Errors
///
/// Returns `ConversionError::InvalidInput` if two jobs target the same output
/// file or the thread pool cannot be built.
pub fn convert_batch(
    jobs: &[ConversionConfig],
    workers: usize,
) -> Result<Vec<BatchOutcome>, ConversionError> {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.output.as_path()) {
            return Err(ConversionError::InvalidInput(format!(
                "Multiple jobs write to {}",
                job.output.display()
            )));
        }
    }

    let workers = std::cmp::max(1, workers);
    log::info!("Batch: {} files, jobs={}", jobs.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ConversionError::InvalidInput(format!("Cannot build thread pool: {}", e)))?;

    let outcomes: Vec<BatchOutcome> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let result = crate::convert_file(job);
                if let Err(e) = &result {
                    log::warn!("{}: {}", job.input.display(), e);
                }
                BatchOutcome {
                    input: job.input.clone(),
                    result,
                }
            })
            .collect()
    });

    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    log::info!("Batch done: ok={}/{}", ok, outcomes.len());
    Ok(outcomes)
}
