use crate::models::{EnrichedPlace, Recommendation, Verdict};

/// Justification attached when the classifier approved nothing
pub const DEFAULT_JUSTIFICATION: &str = "Sugestão selecionada pelas avaliações e proximidade.";

/// Merges verdicts onto places, keeping input order
///
/// Approved places are returned with their justification. If nothing was approved,
/// every place is returned with [`DEFAULT_JUSTIFICATION`], so the result is empty
/// only when `places` is.
pub fn assemble(places: Vec<EnrichedPlace>, verdicts: &[Verdict]) -> Vec<Recommendation> {
    let mut approved_justifications: Vec<Option<&str>> = vec![None; places.len()];
    for verdict in verdicts.iter().filter(|v| v.is_approved()) {
        if let Some(slot) = approved_justifications.get_mut(verdict.position) {
            *slot = Some(verdict.justification.as_str());
        }
    }

    if approved_justifications.iter().all(Option::is_none) {
        tracing::info!(
            places = places.len(),
            "No place approved by the classifier, returning all"
        );
        return places
            .into_iter()
            .map(|place| Recommendation {
                place,
                justification: DEFAULT_JUSTIFICATION.to_string(),
            })
            .collect();
    }

    places
        .into_iter()
        .zip(approved_justifications)
        .filter_map(|(place, justification)| {
            justification.map(|text| Recommendation {
                place,
                justification: text.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerdictLabel;

    fn place(id: &str) -> EnrichedPlace {
        EnrichedPlace {
            id: id.to_string(),
            name: id.to_uppercase(),
            address: String::new(),
            rating: Some(4.7),
            review_count: Some(200),
            comments: String::new(),
            link: None,
            image_url: None,
            distance: "1 km".to_string(),
            travel_time: "5 min".to_string(),
            distance_estimated: false,
            price_level: Some(0),
            estimated_cost: "R$0".to_string(),
            category_codes: Vec::new(),
            categories: Vec::new(),
            opening_hours: Vec::new(),
        }
    }

    fn verdict(position: usize, label: VerdictLabel, justification: &str) -> Verdict {
        Verdict {
            position,
            label,
            justification: justification.to_string(),
        }
    }

    #[test]
    fn test_keeps_only_approved_in_input_order() {
        let places = vec![place("a"), place("b"), place("c"), place("d")];
        let verdicts = vec![
            verdict(0, VerdictLabel::NotIdeal, "caro"),
            verdict(1, VerdictLabel::Acceptable, "ok"),
            verdict(2, VerdictLabel::Unrecognized, ""),
            verdict(3, VerdictLabel::Ideal, "perfeito"),
        ];

        let recommendations = assemble(places, &verdicts);
        let result: Vec<(&str, &str)> = recommendations
            .iter()
            .map(|r| (r.place.id.as_str(), r.justification.as_str()))
            .collect();
        assert_eq!(result, vec![("b", "ok"), ("d", "perfeito")]);
    }

    #[test]
    fn test_no_approvals_returns_everything_with_default() {
        let places = vec![place("a"), place("b")];
        let verdicts = vec![verdict(0, VerdictLabel::NotIdeal, "longe")];

        let recommendations = assemble(places, &verdicts);
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations
            .iter()
            .all(|r| r.justification == DEFAULT_JUSTIFICATION));
    }

    #[test]
    fn test_places_without_verdict_are_not_approved() {
        let places = vec![place("a"), place("b"), place("c")];
        let verdicts = vec![verdict(0, VerdictLabel::Ideal, "sim")];

        let recommendations = assemble(places, &verdicts);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].place.id, "a");
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(assemble(Vec::new(), &[]).is_empty());
    }

    #[test]
    fn test_out_of_range_verdict_is_ignored() {
        let recommendations = assemble(vec![place("a")], &[verdict(5, VerdictLabel::Ideal, "?")]);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].justification, DEFAULT_JUSTIFICATION);
    }
}
