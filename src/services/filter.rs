use crate::{
    models::{ActivityType, BudgetBand, EnrichedPlace},
    services::{
        aggregator::{MIN_RATING, MIN_REVIEW_COUNT},
        catalog,
    },
};

/// Below this many strict survivors the whole enriched list is classified instead
pub const MIN_STRICT_SURVIVORS: usize = 3;

/// Places handed to the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub places: Vec<EnrichedPlace>,
    /// Strict filtering left too few places and the unfiltered list was used
    pub relaxed: bool,
}

/// Outcome of the individual checks for one place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceChecks {
    pub rating_ok: bool,
    pub reviews_ok: bool,
    pub category_ok: bool,
    pub budget_ok: bool,
    pub is_store: bool,
}

impl PlaceChecks {
    pub fn evaluate(place: &EnrichedPlace, categories: &[&str], allowed_levels: &[u8]) -> Self {
        let price_level = catalog::price_level_from_display(&place.estimated_cost)
            .unwrap_or(catalog::DEFAULT_PRICE_LEVEL);

        Self {
            rating_ok: place.rating.is_some_and(|rating| rating >= MIN_RATING),
            reviews_ok: place
                .review_count
                .is_some_and(|count| count >= MIN_REVIEW_COUNT),
            category_ok: place
                .category_codes
                .iter()
                .any(|code| categories.contains(&code.as_str())),
            budget_ok: allowed_levels.contains(&price_level),
            is_store: catalog::is_store(&place.category_codes),
        }
    }

    pub fn passes(&self) -> bool {
        self.rating_ok && self.reviews_ok && self.category_ok && self.budget_ok && !self.is_store
    }
}

/// Applies quality, category, budget and store checks
///
/// Availability wins over strict filtering: with fewer than [`MIN_STRICT_SURVIVORS`]
/// strict survivors, the full input list is returned and `relaxed` is set.
pub fn filter_places(
    places: Vec<EnrichedPlace>,
    activity: ActivityType,
    budget: BudgetBand,
) -> FilterOutcome {
    let categories = catalog::categories_for(activity);
    let allowed_levels = catalog::price_levels_for(budget);

    let survivors: Vec<EnrichedPlace> = places
        .iter()
        .filter(|place| {
            let checks = PlaceChecks::evaluate(place, categories, allowed_levels);
            if checks.is_store {
                tracing::debug!(place = %place.name, "Removed: store");
            } else if !checks.budget_ok {
                tracing::debug!(
                    place = %place.name,
                    estimated_cost = %place.estimated_cost,
                    budget = %budget,
                    "Removed: over budget"
                );
            }
            checks.passes()
        })
        .cloned()
        .collect();

    tracing::info!(
        input = places.len(),
        survivors = survivors.len(),
        budget = %budget,
        "Quality and budget filter applied"
    );

    if survivors.len() >= MIN_STRICT_SURVIVORS {
        FilterOutcome {
            places: survivors,
            relaxed: false,
        }
    } else {
        if !places.is_empty() {
            tracing::warn!(
                survivors = survivors.len(),
                "Too few places passed filtering, using every enriched place"
            );
        }
        FilterOutcome {
            places,
            relaxed: true,
        }
    }
}
