use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{EnrichedPlace, Origin, PlaceCandidate, PlaceDetails, TravelEstimate},
    services::{
        catalog,
        providers::{DistanceProvider, PlaceDetailsProvider},
    },
};

/// Review excerpts kept per place
pub const MAX_REVIEW_EXCERPTS: usize = 5;
/// Separator between review excerpts
pub const REVIEW_SEPARATOR: &str = " | ";
/// Comment text for a place without reviews
pub const NO_COMMENTS: &str = "Sem comentários.";

/// Fetches details and a travel estimate for every candidate concurrently
///
/// One task per candidate. A candidate whose details cannot be fetched is dropped;
/// siblings are unaffected. Output keeps the candidates' order.
pub async fn enrich_candidates(
    details: Arc<dyn PlaceDetailsProvider>,
    distance: Arc<dyn DistanceProvider>,
    origin: &Origin,
    travel_time_minutes: u32,
    candidates: Vec<PlaceCandidate>,
) -> Vec<EnrichedPlace> {
    tracing::info!(candidates = candidates.len(), "Fetching place details");

    let mut tasks = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let details = details.clone();
        let distance = distance.clone();
        let origin = origin.clone();
        let place_id = candidate.id.clone();
        let task = tokio::spawn(async move {
            enrich_one(
                details.as_ref(),
                distance.as_ref(),
                &origin,
                travel_time_minutes,
                candidate,
            )
            .await
        });
        tasks.push((place_id, task));
    }

    let mut enriched = Vec::with_capacity(tasks.len());
    let mut dropped = 0usize;

    for (place_id, task) in tasks {
        match task.await {
            Ok(Ok(place)) => enriched.push(place),
            Ok(Err(e)) => {
                tracing::error!(place_id = %place_id, error = %e, "Place details fetch failed");
                dropped += 1;
            }
            Err(e) => {
                tracing::error!(place_id = %place_id, error = %e, "Enrichment task join error");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::warn!(
            success_count = enriched.len(),
            error_count = dropped,
            "Partial enrichment failure"
        );
    }

    enriched
}

async fn enrich_one(
    details_provider: &dyn PlaceDetailsProvider,
    distance_provider: &dyn DistanceProvider,
    origin: &Origin,
    travel_time_minutes: u32,
    candidate: PlaceCandidate,
) -> AppResult<EnrichedPlace> {
    let details = details_provider.fetch_details(&candidate.id).await?;

    let (estimate, distance_estimated) =
        match distance_provider.estimate(origin, &details.address).await {
            Ok(Some(estimate)) => (estimate, false),
            Ok(None) => {
                tracing::debug!(place = %details.name, "No route found, estimating distance");
                (synthetic_estimate(&candidate.id, travel_time_minutes), true)
            }
            Err(e) => {
                tracing::warn!(
                    place = %details.name,
                    error = %e,
                    "Distance lookup failed, estimating distance"
                );
                (synthetic_estimate(&candidate.id, travel_time_minutes), true)
            }
        };

    let image_url = details
        .photo_reference
        .as_deref()
        .map(|reference| details_provider.photo_url(reference));

    Ok(build_enriched_place(
        candidate.id,
        details,
        estimate,
        distance_estimated,
        image_url,
    ))
}

fn build_enriched_place(
    id: String,
    details: PlaceDetails,
    estimate: TravelEstimate,
    distance_estimated: bool,
    image_url: Option<String>,
) -> EnrichedPlace {
    let categories = details
        .category_codes
        .iter()
        .map(|code| catalog::translate_category(code).to_string())
        .collect();

    EnrichedPlace {
        id,
        comments: join_reviews(&details.review_excerpts),
        estimated_cost: catalog::display_price(details.price_level).to_string(),
        name: details.name,
        address: details.address,
        rating: details.rating,
        review_count: details.review_count,
        link: details.link,
        image_url,
        distance: estimate.distance_text,
        travel_time: estimate.duration_text,
        distance_estimated,
        price_level: details.price_level,
        category_codes: details.category_codes,
        categories,
        opening_hours: details.opening_hours,
    }
}

/// First five excerpts joined, or the "no comments" sentinel
pub fn join_reviews(excerpts: &[String]) -> String {
    let kept: Vec<&str> = excerpts
        .iter()
        .take(MAX_REVIEW_EXCERPTS)
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect();

    if kept.is_empty() {
        NO_COMMENTS.to_string()
    } else {
        kept.join(REVIEW_SEPARATOR)
    }
}

/// Approximate distance and travel time used when the distance provider has no answer
///
/// Not a measurement: values are derived from the place id so the same place always
/// gets the same figures, and both stay within `[1, travel_time_minutes]`.
pub fn synthetic_estimate(place_id: &str, travel_time_minutes: u32) -> TravelEstimate {
    let ceiling = travel_time_minutes.max(1);
    let seed = place_id
        .bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(u32::from(byte)));

    let km = seed % ceiling + 1;
    let minutes = (seed / ceiling) % ceiling + 1;

    TravelEstimate {
        distance_text: format!("~{} km", km),
        duration_text: format!("~{} min", minutes),
    }
}
