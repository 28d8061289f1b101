use serde::Serialize;

use crate::{models::Origin, services::providers::Providers};

const PROBE_CATEGORY: &str = "restaurant";
const PROBE_RADIUS_METERS: u32 = 5000;
const PROBE_PROMPT: &str = "Responda apenas com a palavra OK.";

/// Outcome of probing a single provider
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProviderCheck {
    pub provider: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticsReport {
    pub places: ProviderCheck,
    pub classifier: ProviderCheck,
}

/// Probes the search and classifier providers with one cheap call each
///
/// Failures are reported in the returned checks rather than as errors.
pub async fn run_diagnostics(providers: &Providers, origin: &Origin) -> DiagnosticsReport {
    let places = match providers
        .places
        .search_nearby(origin, PROBE_RADIUS_METERS, PROBE_CATEGORY, false)
        .await
    {
        Ok(results) => ProviderCheck {
            provider: "places".to_string(),
            ok: true,
            count: Some(results.len()),
            reply: None,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Places provider probe failed");
            ProviderCheck {
                provider: "places".to_string(),
                ok: false,
                count: None,
                reply: None,
                error: Some(e.to_string()),
            }
        }
    };

    let classifier_name = providers.classifier.name().to_string();
    let classifier = match providers.classifier.classify(PROBE_PROMPT).await {
        Ok(reply) => ProviderCheck {
            provider: classifier_name,
            ok: true,
            count: None,
            reply: Some(reply.trim().to_string()),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Classifier probe failed");
            ProviderCheck {
                provider: classifier_name,
                ok: false,
                count: None,
                reply: None,
                error: Some(e.to_string()),
            }
        }
    };

    DiagnosticsReport { places, classifier }
}
