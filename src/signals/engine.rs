use tracing::debug;

use super::rules::{Rule, RULES};
use crate::enrichment::{EnrichmentPayload, SignalEngineOutput};
use crate::thesis::FundThesis;

pub const BASE_SCORE: i32 = 40;
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Constant explanation attached to every engine output.
pub const THESIS_MATCH_EXPLANATION: &str = concat!(
    "This score reflects simple, explainable rules: ",
    "- Content overlap with the fund's focus areas (vertical SaaS, AI infra, applied AI). ",
    "- Presence of workflow depth, developer/infra motion, and AI-native product signals. ",
    "- Hints about go-to-market (self-serve, bottoms-up) and displacement of legacy systems. ",
    " ",
    "Use this as a directional thesis fit signal, not as an automated investment decision.",
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: &'static str,
    pub delta: i32,
    pub before: i32,
    pub after: i32,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub base_score: i32,
    pub contributions: Vec<RuleContribution>,
    /// Score before clamping to [MIN_SCORE, MAX_SCORE]
    pub raw_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReport {
    pub output: SignalEngineOutput,
    pub breakdown: ScoreBreakdown,
}

/// Lower-cased text the rules search: summary, then what-they-do, keywords
/// and signals, each space-joined.
pub fn search_text(payload: &EnrichmentPayload) -> String {
    [
        payload.summary.clone(),
        payload.what_they_do.join(" "),
        payload.keywords.join(" "),
        payload.signals.join(" "),
    ]
    .join(" ")
    .to_lowercase()
    .trim()
    .to_string()
}

/// Score a payload against the thesis.
pub fn run_signal_engine(payload: &EnrichmentPayload, thesis: &FundThesis) -> SignalEngineOutput {
    evaluate_with_breakdown(payload, thesis).output
}

/// Score a payload and keep the per-rule contributions.
pub fn evaluate_with_breakdown(payload: &EnrichmentPayload, thesis: &FundThesis) -> EngineReport {
    evaluate_rules(&search_text(payload), thesis, RULES)
}

/// Run an arbitrary rule table over already-built search text.
pub fn evaluate_rules(text: &str, thesis: &FundThesis, rules: &[Rule]) -> EngineReport {
    let mut score = BASE_SCORE;
    let mut derived_signals = Vec::new();
    let mut contributions = Vec::new();

    for rule in rules {
        if let Some(tier) = rule.evaluate(text, thesis) {
            let before = score;
            score += tier.delta;
            derived_signals.push(tier.message.to_string());
            contributions.push(RuleContribution {
                rule: rule.name,
                delta: tier.delta,
                before,
                after: score,
                message: tier.message,
            });
        }
    }

    let clamped = score.clamp(MIN_SCORE, MAX_SCORE);
    debug!(
        raw_score = score,
        score = clamped,
        matched = contributions.len(),
        "signal engine evaluated payload"
    );

    EngineReport {
        output: SignalEngineOutput {
            derived_signals,
            thesis_match_explanation: THESIS_MATCH_EXPLANATION.to_string(),
            // Clamped to 0..=100 above
            score: clamped as u8,
        },
        breakdown: ScoreBreakdown {
            base_score: BASE_SCORE,
            contributions,
            raw_score: score,
        },
    }
}
