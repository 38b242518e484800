//! Nearest-k candidate matching for a single origin.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::haversine::GeodesicDistance;
use crate::model::{Candidate, Distance, GeoPair, Origin, RankedResult, RankedRow};
use crate::traits::DistanceProvider;

/// Shared flag a caller sets to stop issuing further provider calls.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Rank every candidate by great-circle distance from `origin` and keep the
/// closest `k`.
///
/// Ties keep the candidate pool's order. An empty pool yields an empty
/// result; `k` larger than the pool returns every candidate. Driving data
/// from `provider` annotates the rows but never reorders them.
pub fn nearest<A, P>(origin: &Origin, candidates: &[Candidate<A>], k: usize, provider: &P) -> RankedResult<A>
where
    A: Clone,
    P: DistanceProvider + ?Sized,
{
    match_origin(origin, candidates, k, None, provider, None).unwrap_or_default()
}

/// Like [`nearest`], but only the `shortlist` geodesically closest
/// candidates are sent to `provider`.
///
/// Bounds metered lookups to `shortlist` per origin.
pub fn nearest_shortlisted<A, P>(
    origin: &Origin,
    candidates: &[Candidate<A>],
    k: usize,
    shortlist: usize,
    provider: &P,
) -> RankedResult<A>
where
    A: Clone,
    P: DistanceProvider + ?Sized,
{
    match_origin(origin, candidates, k, Some(shortlist), provider, None).unwrap_or_default()
}

/// Match one origin, checking `cancel` before every provider call.
///
/// Returns `None` when cancelled part-way; no partial ranking is produced.
pub(crate) fn match_origin<A, P>(
    origin: &Origin,
    candidates: &[Candidate<A>],
    k: usize,
    shortlist: Option<usize>,
    provider: &P,
    cancel: Option<&CancelFlag>,
) -> Option<RankedResult<A>>
where
    A: Clone,
    P: DistanceProvider + ?Sized,
{
    let pool = match shortlist {
        Some(shortlist) => closest_by(origin, candidates.iter(), shortlist, &GeodesicDistance, None)?
            .into_iter()
            .map(|(candidate, _)| candidate)
            .collect::<Vec<_>>(),
        None => candidates.iter().collect::<Vec<_>>(),
    };

    let rows = closest_by(origin, pool.into_iter(), k, provider, cancel)?
        .into_iter()
        .map(|(candidate, distance)| RankedRow {
            origin_id: origin.id.clone(),
            destination_id: candidate.id.clone(),
            attributes: candidate.attributes.clone(),
            distance,
        })
        .collect();

    Some(rows)
}

fn closest_by<'a, A, P, I>(
    origin: &Origin,
    candidates: I,
    k: usize,
    provider: &P,
    cancel: Option<&CancelFlag>,
) -> Option<Vec<(&'a Candidate<A>, Distance)>>
where
    A: 'a,
    I: Iterator<Item = &'a Candidate<A>>,
    P: DistanceProvider + ?Sized,
{
    // Lazy map + Option collect stops at the first cancelled check.
    let mut scored = candidates
        .map(|candidate| {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                return None;
            }
            let distance = provider.distance(&GeoPair::new(origin.point, candidate.point));
            Some((candidate, distance))
        })
        .collect::<Option<Vec<_>>>()?;

    // Vec::sort_by_key is stable, so equal distances keep pool order.
    scored.sort_by_key(|(_, distance)| distance.geodesic_miles);
    scored.truncate(k);
    Some(scored)
}
