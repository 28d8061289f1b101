use std::collections::HashSet;

use crate::{
    models::{Origin, PlaceCandidate},
    services::providers::PlacesSearchProvider,
};

/// Minimum rating a search result needs to enter the working set
pub const MIN_RATING: f64 = 4.5;
/// Minimum review count a search result needs to enter the working set
pub const MIN_REVIEW_COUNT: u32 = 100;
/// Upper bound of the ranked working set
pub const WORKING_SET_LIMIT: usize = 50;
/// Search radius per minute of travel time
pub const METERS_PER_MINUTE: u32 = 1000;

const FALLBACK_CATEGORY_COUNT: usize = 3;
const FALLBACK_RESULTS_PER_CATEGORY: usize = 5;
const FALLBACK_LIMIT: usize = 10;

/// Search parameters shared by every category query of one request
#[derive(Debug, Clone)]
pub struct SearchArea<'a> {
    pub origin: &'a Origin,
    pub travel_time_minutes: u32,
    pub open_now: bool,
}

impl SearchArea<'_> {
    /// Linear scale of the travel-time ceiling; not a measured travel time
    pub fn radius_meters(&self) -> u32 {
        self.travel_time_minutes.saturating_mul(METERS_PER_MINUTE)
    }
}

/// Ranked, deduplicated candidates for one request
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool {
    pub candidates: Vec<PlaceCandidate>,
    /// No result passed the quality prefilter, so the relaxed search supplied the pool
    pub degraded: bool,
}

pub fn passes_quality_prefilter(candidate: &PlaceCandidate) -> bool {
    candidate.rating.is_some_and(|rating| rating >= MIN_RATING)
        && candidate
            .review_count
            .is_some_and(|count| count >= MIN_REVIEW_COUNT)
}

/// Keeps the first occurrence of every provider id
pub fn dedup_by_id(candidates: Vec<PlaceCandidate>) -> Vec<PlaceCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.id.clone()))
        .collect()
}

/// Stable sort: review count descending, then rating descending; absent values count as zero
pub fn rank(candidates: &mut [PlaceCandidate]) {
    candidates.sort_by(|a, b| {
        b.review_count
            .unwrap_or(0)
            .cmp(&a.review_count.unwrap_or(0))
            .then_with(|| b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)))
    });
}

/// Searches every category, keeps quality results, dedups, ranks and truncates
///
/// Categories are searched one after another so provider request rate stays bounded.
/// A failed category search contributes nothing. When nothing survives, the first
/// three categories are searched again without the quality prefilter.
pub async fn gather_candidates(
    places: &dyn PlacesSearchProvider,
    area: &SearchArea<'_>,
    categories: &[&str],
) -> CandidatePool {
    let radius = area.radius_meters();
    let mut accumulated = Vec::new();

    for category in categories {
        let results = search_category(places, area, radius, category).await;
        let total = results.len();
        let kept: Vec<PlaceCandidate> = results
            .into_iter()
            .filter(passes_quality_prefilter)
            .collect();

        tracing::debug!(
            category = %category,
            total = total,
            kept = kept.len(),
            "Category search filtered"
        );
        accumulated.extend(kept);
    }

    let mut candidates = dedup_by_id(accumulated);
    rank(&mut candidates);
    candidates.truncate(WORKING_SET_LIMIT);

    tracing::info!(
        categories = categories.len(),
        radius_meters = radius,
        candidates = candidates.len(),
        "Candidate search completed"
    );

    if !candidates.is_empty() {
        return CandidatePool {
            candidates,
            degraded: false,
        };
    }

    tracing::warn!("No candidate passed the quality prefilter, running relaxed search");

    let mut fallback = Vec::new();
    for category in categories.iter().take(FALLBACK_CATEGORY_COUNT) {
        let results = search_category(places, area, radius, category).await;
        fallback.extend(results.into_iter().take(FALLBACK_RESULTS_PER_CATEGORY));
    }

    let mut candidates = dedup_by_id(fallback);
    candidates.truncate(FALLBACK_LIMIT);

    tracing::info!(candidates = candidates.len(), "Relaxed search completed");

    CandidatePool {
        candidates,
        degraded: true,
    }
}

async fn search_category(
    places: &dyn PlacesSearchProvider,
    area: &SearchArea<'_>,
    radius: u32,
    category: &str,
) -> Vec<PlaceCandidate> {
    match places
        .search_nearby(area.origin, radius, category, area.open_now)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            tracing::error!(category = %category, error = %e, "Category search failed");
            Vec::new()
        }
    }
}
