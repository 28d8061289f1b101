use crate::{
    error::AppResult,
    models::{Origin, Preferences, RecommendationResponse},
    services::{
        aggregator::{self, SearchArea},
        assembler, catalog,
        classifier::{self, ClassificationContext},
        enrichment, filter, location,
        providers::Providers,
    },
};

pub const EMPTY_RESULT_SUMMARY: &str = "Não encontramos locais próximos com as características \
     solicitadas. Tente aumentar o tempo de deslocamento ou ajustar suas preferências.";

/// Generates outing recommendations for one set of preferences
///
/// Runs the full pipeline: origin resolution, category search, enrichment,
/// quality/budget filtering, language model classification and assembly.
///
/// Zero surviving places is not an error: the response carries an empty list and
/// [`EMPTY_RESULT_SUMMARY`]. A classifier failure is, since there is nothing
/// meaningful to rank without it.
pub async fn get_recommendations(
    providers: &Providers,
    default_origin: &Origin,
    preferences: Preferences,
) -> AppResult<RecommendationResponse> {
    preferences.validate()?;

    let origin = location::resolve_origin(
        providers.geocoding.as_ref(),
        preferences.location.as_deref(),
        default_origin,
    )
    .await;

    let categories = catalog::categories_for(preferences.activity_type);
    tracing::info!(
        origin = %origin,
        activity = %preferences.activity_type,
        budget = %preferences.budget,
        travel_time_minutes = preferences.travel_time_minutes,
        categories = ?categories,
        "Searching places"
    );

    let area = SearchArea {
        origin: &origin,
        travel_time_minutes: preferences.travel_time_minutes,
        open_now: preferences.open_now,
    };
    let pool = aggregator::gather_candidates(providers.places.as_ref(), &area, categories).await;

    let enriched = enrichment::enrich_candidates(
        providers.details.clone(),
        providers.distance.clone(),
        &origin,
        preferences.travel_time_minutes,
        pool.candidates,
    )
    .await;

    let filtered = filter::filter_places(enriched, preferences.activity_type, preferences.budget);

    if filtered.places.is_empty() {
        tracing::info!("No places left after filtering");
        return Ok(RecommendationResponse {
            summary: EMPTY_RESULT_SUMMARY.to_string(),
            recommendations: Vec::new(),
            degraded: pool.degraded,
            relaxed_filters: filtered.relaxed,
        });
    }

    let context = ClassificationContext {
        activity: preferences.activity_type,
        budget: preferences.budget,
        travel_time_minutes: preferences.travel_time_minutes,
    };
    let verdicts =
        classifier::classify_places(providers.classifier.as_ref(), &filtered.places, &context)
            .await?;

    let recommendations = assembler::assemble(filtered.places, &verdicts);

    tracing::info!(
        recommendations = recommendations.len(),
        degraded = pool.degraded,
        relaxed_filters = filtered.relaxed,
        "Recommendations ready"
    );

    Ok(RecommendationResponse {
        summary: success_summary(recommendations.len()),
        recommendations,
        degraded: pool.degraded,
        relaxed_filters: filtered.relaxed,
    })
}

pub fn success_summary(count: usize) -> String {
    format!(
        "Análise concluída! Encontramos {} locais perfeitos para seu rolê.",
        count
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mockall::predicate::eq;

    use super::*;
    use crate::{
        error::AppError,
        models::{ActivityType, BudgetBand, PlaceCandidate, PlaceDetails},
        services::{
            assembler::DEFAULT_JUSTIFICATION,
            providers::{
                MockDistanceProvider, MockGeocodingProvider, MockLanguageModelClassifier,
                MockPlaceDetailsProvider, MockPlacesSearchProvider,
            },
        },
    };

    fn candidate(id: &str) -> PlaceCandidate {
        PlaceCandidate {
            id: id.to_string(),
            name: id.to_uppercase(),
            rating: Some(4.8),
            review_count: Some(500),
            category_codes: vec!["park".to_string()],
        }
    }

    fn park_details(place_id: &str) -> PlaceDetails {
        PlaceDetails {
            name: place_id.to_uppercase(),
            address: format!("Av. {}", place_id),
            rating: Some(4.8),
            review_count: Some(500),
            review_excerpts: vec!["Muito verde".to_string()],
            link: None,
            photo_reference: None,
            price_level: Some(0),
            opening_hours: Vec::new(),
            category_codes: vec!["park".to_string()],
        }
    }

    fn preferences(activity_type: ActivityType, travel_time_minutes: u32) -> Preferences {
        Preferences {
            location: None,
            activity_type,
            travel_time_minutes,
            budget: BudgetBand::Free,
            open_now: false,
        }
    }

    fn providers(
        places: MockPlacesSearchProvider,
        classifier: MockLanguageModelClassifier,
    ) -> Providers {
        let mut details = MockPlaceDetailsProvider::new();
        details
            .expect_fetch_details()
            .returning(|place_id| Ok(park_details(place_id)));
        details.expect_photo_url().returning(|r| r.to_string());

        let mut distance = MockDistanceProvider::new();
        distance.expect_estimate().returning(|_, _| Ok(None));

        Providers {
            geocoding: Arc::new(MockGeocodingProvider::new()),
            places: Arc::new(places),
            details: Arc::new(details),
            distance: Arc::new(distance),
            classifier: Arc::new(classifier),
        }
    }

    fn parks_only_search() -> MockPlacesSearchProvider {
        let mut places = MockPlacesSearchProvider::new();
        places
            .expect_search_nearby()
            .returning(|_, _, category, _| {
                if category == "park" {
                    Ok(vec![candidate("a"), candidate("b"), candidate("c")])
                } else {
                    Ok(Vec::new())
                }
            });
        places
    }

    fn classifier_replying(reply: &'static str) -> MockLanguageModelClassifier {
        let mut classifier = MockLanguageModelClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(move |_| Ok(reply.to_string()));
        classifier.expect_name().return_const("mock");
        classifier
    }

    #[tokio::test]
    async fn test_fitness_searches_categories_in_order_with_radius() {
        let searched = Arc::new(Mutex::new(Vec::new()));
        let recorder = searched.clone();

        let mut places = MockPlacesSearchProvider::new();
        places
            .expect_search_nearby()
            .withf(|origin, radius, _, open_now| {
                origin.as_str() == "1,2" && *radius == 20_000 && !*open_now
            })
            .returning(move |_, _, category, _| {
                recorder.lock().unwrap().push(category.to_string());
                Ok(Vec::new())
            });

        let mut classifier = MockLanguageModelClassifier::new();
        classifier.expect_classify().never();

        let response = get_recommendations(
            &providers(places, classifier),
            &Origin::new("1,2"),
            preferences(ActivityType::Fitness, 20),
        )
        .await
        .unwrap();

        assert!(response.recommendations.is_empty());
        assert_eq!(response.summary, EMPTY_RESULT_SUMMARY);
        assert!(response.degraded);

        // strict pass over every category, then the relaxed pass over the first three
        let categories = catalog::categories_for(ActivityType::Fitness);
        let expected: Vec<&str> = categories
            .iter()
            .chain(categories.iter().take(3))
            .copied()
            .collect();
        assert_eq!(*searched.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_full_pipeline_keeps_approved_places() {
        let classifier = classifier_replying(
            "1. A - Ideal: ótimo para correr\n2. B - Não Ideal: muito cheio\n3. C - Aceitável: ok",
        );

        let response = get_recommendations(
            &providers(parks_only_search(), classifier),
            &Origin::new("1,2"),
            preferences(ActivityType::Fitness, 20),
        )
        .await
        .unwrap();

        let ids: Vec<&str> = response
            .recommendations
            .iter()
            .map(|r| r.place.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(response.recommendations[0].justification, "ótimo para correr");
        assert_eq!(response.summary, success_summary(2));
        assert!(!response.degraded);
        assert!(!response.relaxed_filters);
        assert!(response.recommendations.iter().all(|r| r.place.distance_estimated));
    }

    #[tokio::test]
    async fn test_zero_approvals_returns_every_place() {
        let classifier = classifier_replying(
            "1. A - Não Ideal: longe\n2. B - Não Ideal: caro\n3. C - Não Ideal: fechado",
        );

        let response = get_recommendations(
            &providers(parks_only_search(), classifier),
            &Origin::new("1,2"),
            preferences(ActivityType::Fitness, 20),
        )
        .await
        .unwrap();

        assert_eq!(response.recommendations.len(), 3);
        assert!(response
            .recommendations
            .iter()
            .all(|r| r.justification == DEFAULT_JUSTIFICATION));
        assert_eq!(response.summary, success_summary(3));
    }

    #[tokio::test]
    async fn test_classifier_failure_fails_the_request() {
        let mut classifier = MockLanguageModelClassifier::new();
        classifier
            .expect_classify()
            .returning(|_| Err(AppError::Classifier("rate limited".to_string())));
        classifier.expect_name().return_const("mock");

        let result = get_recommendations(
            &providers(parks_only_search(), classifier),
            &Origin::new("1,2"),
            preferences(ActivityType::Fitness, 20),
        )
        .await;

        assert!(matches!(result, Err(AppError::Classifier(_))));
    }

    #[tokio::test]
    async fn test_free_text_location_is_geocoded() {
        let mut geocoding = MockGeocodingProvider::new();
        geocoding
            .expect_geocode()
            .with(eq("Pinheiros"))
            .times(1)
            .returning(|_| Ok(Some(Origin::new("-23.56,-46.69"))));

        let mut places = MockPlacesSearchProvider::new();
        places
            .expect_search_nearby()
            .withf(|origin, _, _, _| origin.as_str() == "-23.56,-46.69")
            .returning(|_, _, _, _| Ok(Vec::new()));

        let mut classifier = MockLanguageModelClassifier::new();
        classifier.expect_classify().never();

        let mut providers = providers(places, classifier);
        providers.geocoding = Arc::new(geocoding);

        let mut prefs = preferences(ActivityType::Cultura, 10);
        prefs.location = Some("Pinheiros".to_string());

        let response = get_recommendations(&providers, &Origin::new("1,2"), prefs)
            .await
            .unwrap();
        assert!(response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_travel_time_is_rejected_before_any_call() {
        let mut places = MockPlacesSearchProvider::new();
        places.expect_search_nearby().never();
        let classifier = MockLanguageModelClassifier::new();

        let result = get_recommendations(
            &providers(places, classifier),
            &Origin::new("1,2"),
            preferences(ActivityType::Amigos, 0),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
