//! Distance matrix assembly across many origins.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::MatrixError;
use crate::matcher::match_origin;
pub use crate::matcher::CancelFlag;
use crate::model::{Candidate, DistanceMatrix, Origin, RankedResult};
use crate::traits::DistanceProvider;

#[derive(Debug, Clone)]
pub struct MatrixOptions {
    /// Destinations kept per origin.
    pub k: usize,
    /// When set, only this many geodesically closest candidates per origin
    /// are sent to the provider.
    pub shortlist: Option<usize>,
    /// Worker threads; also the cap on concurrent provider calls.
    pub workers: usize,
    pub cancel: Option<CancelFlag>,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            k: 10,
            shortlist: None,
            workers: 1,
            cancel: None,
        }
    }
}

/// Advisory cost of a matrix build, reported before any work starts.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    /// Origin x candidate pairs considered.
    pub comparisons: usize,
    /// Calls that go to the provider (after shortlisting).
    pub provider_calls: usize,
    /// `provider_calls / comparisons_per_minute`; the local geodesic
    /// shortlisting pass is not counted.
    pub estimated_minutes: f64,
    /// Only for metered providers.
    pub estimated_cost_usd: Option<f64>,
}

pub fn estimate_cost<P>(origin_count: usize, candidate_count: usize, provider: &P, options: &MatrixOptions) -> CostEstimate
where
    P: DistanceProvider + ?Sized,
{
    let comparisons = origin_count * candidate_count;
    let per_origin = options
        .shortlist
        .map_or(candidate_count, |shortlist| shortlist.min(candidate_count));
    let provider_calls = origin_count * per_origin;

    let rate = provider.comparisons_per_minute();
    let estimated_minutes = if rate > 0.0 {
        provider_calls as f64 / rate
    } else {
        f64::INFINITY
    };

    CostEstimate {
        comparisons,
        provider_calls,
        estimated_minutes,
        estimated_cost_usd: provider
            .cost_per_request_usd()
            .map(|unit| unit * provider_calls as f64),
    }
}

/// Candidate identifiers that appear more than once, in first-seen order.
///
/// The builder never deduplicates; cleaning the pool is left to the caller.
pub fn duplicate_candidate_ids<A>(candidates: &[Candidate<A>]) -> Vec<&str> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for candidate in candidates {
        let count = seen.entry(candidate.id.as_str()).or_default();
        *count += 1;
        if *count == 2 {
            duplicates.push(candidate.id.as_str());
        }
    }

    duplicates
}

/// Match every origin against the shared candidate pool.
///
/// Rows come out in origin order, each origin's block sorted by distance.
/// Row-level provider failures are already folded into `None` fields, so a
/// bad lookup never drops other rows. The cancel flag is checked before
/// every provider call; an origin interrupted part-way is listed in
/// `skipped_origins` rather than emitted with a partial ranking.
pub fn build_distance_matrix<A, P>(
    origins: &[Origin],
    candidates: &[Candidate<A>],
    provider: &P,
    options: &MatrixOptions,
) -> Result<DistanceMatrix<A>, MatrixError>
where
    A: Clone + Send + Sync,
    P: DistanceProvider + ?Sized,
{
    let estimate = estimate_cost(origins.len(), candidates.len(), provider, options);
    info!(
        origins = origins.len(),
        candidates = candidates.len(),
        metered = provider.is_metered(),
        comparisons = estimate.comparisons,
        provider_calls = estimate.provider_calls,
        estimated_minutes = estimate.estimated_minutes,
        estimated_cost_usd = ?estimate.estimated_cost_usd,
        "building distance matrix"
    );

    let duplicates = duplicate_candidate_ids(candidates);
    if !duplicates.is_empty() {
        warn!(?duplicates, "candidate pool contains duplicate ids; they are kept as-is");
    }

    let match_one = |origin: &Origin| -> Option<RankedResult<A>> {
        let result = match_origin(
            origin,
            candidates,
            options.k,
            options.shortlist,
            provider,
            options.cancel.as_ref(),
        );
        match &result {
            Some(rows) => debug!(origin = %origin.id, rows = rows.len(), "origin matched"),
            None => debug!(origin = %origin.id, "origin skipped after cancellation"),
        }
        result
    };

    let results: Vec<Option<RankedResult<A>>> = if options.workers > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .build()?;
        // Indexed parallel collect keeps origin order.
        pool.install(|| origins.par_iter().map(match_one).collect())
    } else {
        origins.iter().map(match_one).collect()
    };

    let mut matrix = DistanceMatrix {
        rows: Vec::new(),
        skipped_origins: Vec::new(),
    };
    for (origin, result) in origins.iter().zip(results) {
        match result {
            Some(rows) => matrix.rows.extend(rows),
            None => matrix.skipped_origins.push(origin.id.clone()),
        }
    }

    if !matrix.skipped_origins.is_empty() {
        warn!(
            skipped = matrix.skipped_origins.len(),
            "distance matrix build cancelled before all origins were matched"
        );
    }
    info!(rows = matrix.rows.len(), "distance matrix built");

    Ok(matrix)
}
