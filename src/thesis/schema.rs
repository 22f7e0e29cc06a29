use serde::{Deserialize, Serialize};

use super::stage::FundingStage;
use super::tags::ThesisTag;

/// The fund thesis enrichment payloads are scored against.
///
/// Exactly one thesis is in effect per run. It comes from the `thesis` key of
/// the config file, or [`FundThesis::default`] when that key is absent.
///
/// Example YAML:
/// ```yaml
/// thesis:
///   id: climate-fund
///   name: Climate Software
///   focus_tags: [climate, fintech_infra]
///   preferred_stages: ["Seed", "Series A"]
///   description: Software for the energy transition.
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FundThesis {
    pub id: String,
    pub name: String,
    pub focus_tags: Vec<ThesisTag>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preferred_stages: Vec<FundingStage>,
    #[serde(default)]
    pub geography_bias: Option<String>,
}

impl Default for FundThesis {
    fn default() -> Self {
        Self {
            id: "core-fund-thesis".to_string(),
            name: "AI-Enabled Vertical SaaS & Infra".to_string(),
            focus_tags: vec![
                ThesisTag::VerticalSaas,
                ThesisTag::DeveloperTools,
                ThesisTag::AiInfrastructure,
                ThesisTag::AppliedAi,
            ],
            description: "We invest in thesis-driven, AI-enabled vertical SaaS and infrastructure \
                companies at pre-seed to Series A, with a bias for workflow depth, clear ROI, and \
                strong bottoms-up adoption."
                .to_string(),
            preferred_stages: vec![
                FundingStage::PreSeed,
                FundingStage::Seed,
                FundingStage::SeriesA,
            ],
            geography_bias: Some("North America + Western Europe".to_string()),
        }
    }
}

impl FundThesis {
    /// Focus tags as searchable phrases ("vertical saas", "applied ai", ...)
    pub fn focus_phrases(&self) -> Vec<String> {
        self.focus_tags.iter().map(ThesisTag::phrase).collect()
    }

    pub fn prefers_stage(&self, stage: FundingStage) -> bool {
        self.preferred_stages.contains(&stage)
    }
}
