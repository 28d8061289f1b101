//! Relevance classification through a language model.
//!
//! All places go into a single prompt as a numbered list and the model answers
//! with one line per place: `index. Name - Label: Justification`. Line *i* of the
//! answer is taken to describe place *i*; the line's name is only used for a
//! mismatch warning.

use std::fmt::Write;

use crate::{
    error::AppResult,
    models::{ActivityType, BudgetBand, EnrichedPlace, Verdict, VerdictLabel},
    services::providers::LanguageModelClassifier,
};

pub const LABEL_IDEAL: &str = "Ideal";
pub const LABEL_ACCEPTABLE: &str = "Aceitável";
pub const LABEL_NOT_IDEAL: &str = "Não Ideal";

const COMMENT_PREVIEW_CHARS: usize = 200;

const BUDGET_REFERENCE: &str = "\
- gratuito: apenas lugares gratuitos (R$0)
- ate-50: até R$ 50 (R$0 e R$10 – R$50)
- 50-100: R$ 50 a 100 (R$0, R$10 – R$50 e R$50 – R$100)
- 100-200: R$ 100 a 200 (R$0, R$10 – R$50, R$50 – R$100 e R$100 – R$200)
- 200-500: R$ 200 a 500 (todas as faixas)
- acima-500: acima de R$ 500 (todas as faixas)";

const PRICE_REFERENCE: &str = "\
- R$0: gratuito
- R$10 – R$50: econômico
- R$50 – R$100: moderado
- R$100 – R$200: elevado
- R$200 ou mais: premium";

/// User constraints described to the model alongside the places
#[derive(Debug, Clone, Copy)]
pub struct ClassificationContext {
    pub activity: ActivityType,
    pub budget: BudgetBand,
    pub travel_time_minutes: u32,
}

/// Sends every place to the classifier in one exchange and parses the verdicts
///
/// Classifier failures propagate; parse problems never do.
pub async fn classify_places(
    classifier: &dyn LanguageModelClassifier,
    places: &[EnrichedPlace],
    context: &ClassificationContext,
) -> AppResult<Vec<Verdict>> {
    let prompt = build_prompt(places, context);

    tracing::info!(
        places = places.len(),
        classifier = classifier.name(),
        "Sending places for classification"
    );

    let response = classifier.classify(&prompt).await?;
    let verdicts = parse_verdicts(&response, places);

    tracing::info!(
        lines = verdicts.len(),
        approved = verdicts.iter().filter(|v| v.is_approved()).count(),
        "Classifier response parsed"
    );

    Ok(verdicts)
}

pub fn build_prompt(places: &[EnrichedPlace], context: &ClassificationContext) -> String {
    let mut prompt = String::new();

    // writing into a String cannot fail
    let _ = write!(
        prompt,
        "Você é um especialista em lazer e entretenimento. Analise os locais abaixo para um \
rolê do tipo \"{activity}\" com orçamento \"{budget}\" e tempo máximo de deslocamento de \
{minutes} minutos.\n\n\
ORÇAMENTO DO USUÁRIO: \"{budget}\"\n{budget_reference}\n\n\
FAIXAS DE PREÇO:\n{price_reference}\n\n\
Para cada local, classifique como \"{ideal}\", \"{acceptable}\" ou \"{not_ideal}\" e explique \
brevemente o porquê, considerando:\n\
- Tipo de rolê solicitado\n\
- Orçamento disponível (respeite o limite de orçamento)\n\
- Distância e tempo de deslocamento\n\
- Avaliação e comentários dos usuários\n\
- O local não pode ser uma loja\n\n\
Locais para análise:\n\n",
        activity = context.activity,
        budget = context.budget,
        minutes = context.travel_time_minutes,
        budget_reference = BUDGET_REFERENCE,
        price_reference = PRICE_REFERENCE,
        ideal = LABEL_IDEAL,
        acceptable = LABEL_ACCEPTABLE,
        not_ideal = LABEL_NOT_IDEAL,
    );

    for (index, place) in places.iter().enumerate() {
        let rating = place
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "sem nota".to_string());
        let _ = write!(
            prompt,
            "{}. {} - {}\nAvaliação: {}/5 ({} avaliações)\nDistância: {}\nTempo de viagem: {}\n\
Custo estimado: {}\nComentários: {}...\n\n",
            index + 1,
            place.name,
            place.address,
            rating,
            place.review_count.unwrap_or(0),
            place.distance,
            place.travel_time,
            place.estimated_cost,
            comment_preview(&place.comments),
        );
    }

    prompt.push_str(
        "Responda APENAS com a classificação de cada local, uma linha por local, na mesma ordem, \
no formato:\n\
1. [Nome do Local] - [Classificação]: [Justificativa]\n\
2. [Nome do Local] - [Classificação]: [Justificativa]\n\
...\n\
Não inclua introduções ou conclusões, apenas a lista numerada.",
    );

    prompt
}

fn comment_preview(comments: &str) -> String {
    comments.chars().take(COMMENT_PREVIEW_CHARS).collect()
}

/// Pairs non-blank response lines with places by position
///
/// Only `min(lines, places)` verdicts are produced; places past the end of the
/// response get no verdict and count as not approved.
pub fn parse_verdicts(response: &str, places: &[EnrichedPlace]) -> Vec<Verdict> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .zip(places.iter())
        .enumerate()
        .map(|(position, (line, place))| {
            let verdict = parse_line(position, line);
            if let Some(name) = line_place_name(line) {
                if !names_match(name, &place.name) {
                    tracing::warn!(
                        position = position + 1,
                        expected = %place.name,
                        found = %name,
                        "Classifier line does not name the place at its position"
                    );
                }
            }
            verdict
        })
        .collect()
}

/// Label and justification of a single numbered line
pub fn parse_line(position: usize, line: &str) -> Verdict {
    let (header, justification) = match line.split_once(':') {
        Some((header, rest)) => (header, rest.trim()),
        None => (line, ""),
    };

    let label = detect_label(header)
        .or_else(|| detect_label(line))
        .unwrap_or(VerdictLabel::Unrecognized);

    Verdict {
        position,
        label,
        justification: justification.to_string(),
    }
}

/// "Não Ideal" is checked first because it contains "Ideal"
fn detect_label(text: &str) -> Option<VerdictLabel> {
    if text.contains(LABEL_NOT_IDEAL) {
        Some(VerdictLabel::NotIdeal)
    } else if text.contains(LABEL_ACCEPTABLE) {
        Some(VerdictLabel::Acceptable)
    } else if text.contains(LABEL_IDEAL) {
        Some(VerdictLabel::Ideal)
    } else {
        None
    }
}

/// `Park X` from `1. Park X - Ideal: ...`
fn line_place_name(line: &str) -> Option<&str> {
    let header = line.split_once(':').map_or(line, |(header, _)| header);
    let without_index = header
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches('.')
        .trim();
    let (name, _) = without_index.rsplit_once(" - ")?;
    let name = name.trim().trim_matches('*').trim();
    (!name.is_empty()).then_some(name)
}

fn names_match(found: &str, expected: &str) -> bool {
    let found = found.to_lowercase();
    let expected = expected.to_lowercase();
    found.contains(&expected) || expected.contains(&found)
}
