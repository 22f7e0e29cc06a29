use serde::{Deserialize, Serialize};

use crate::thesis::{FundingStage, ThesisTag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRound {
    pub stage: FundingStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_millions: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_investor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub website: String,
    pub industry: String,
    pub stage: FundingStage,
    #[serde(default)]
    pub thesis_tags: Vec<ThesisTag>,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_funding_round: Option<FundingRound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count_range: Option<String>,
}

impl Company {
    /// Lower-cased text free-text queries are matched against.
    pub fn search_haystack(&self) -> String {
        let tags = self
            .thesis_tags
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        [
            self.name.as_str(),
            self.industry.as_str(),
            self.description.as_str(),
            self.location.as_str(),
            self.website.as_str(),
            self.stage.as_str(),
            tags.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn has_all_tags(&self, tags: &[ThesisTag]) -> bool {
        tags.iter().all(|t| self.thesis_tags.contains(t))
    }

    /// Short funding line, e.g. "Seed, $4.5M (2024-03), led by Foundry"
    pub fn funding_summary(&self) -> Option<String> {
        let round = self.last_funding_round.as_ref()?;
        let mut out = round.stage.to_string();
        if let Some(amount) = round.amount_millions {
            out.push_str(&format!(", ${}M", amount));
        }
        if let Some(ref date) = round.date {
            out.push_str(&format!(" ({})", date));
        }
        if let Some(ref lead) = round.lead_investor {
            out.push_str(&format!(", led by {}", lead));
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_company() -> Company {
        Company {
            id: "tern".to_string(),
            name: "Tern Health".to_string(),
            website: "tern.health".to_string(),
            industry: "Healthcare".to_string(),
            stage: FundingStage::Seed,
            thesis_tags: vec![ThesisTag::VerticalSaas, ThesisTag::AppliedAi],
            location: "Boston, MA".to_string(),
            description: "Prior-auth automation for specialty clinics.".to_string(),
            last_funding_round: Some(FundingRound {
                stage: FundingStage::Seed,
                amount_millions: Some(4.5),
                date: Some("2024-03".to_string()),
                lead_investor: Some("Foundry".to_string()),
            }),
            employee_count_range: Some("11-50".to_string()),
        }
    }

    #[test]
    fn test_haystack_includes_tags_and_location() {
        let haystack = sample_company().search_haystack();
        assert!(haystack.contains("tern health"));
        assert!(haystack.contains("boston"));
        assert!(haystack.contains("vertical_saas"));
        assert!(haystack.contains("prior-auth"));
        assert!(haystack.contains("tern.health"));
        assert!(haystack.contains("seed"));
    }

    #[test]
    fn test_has_all_tags() {
        let company = sample_company();
        assert!(company.has_all_tags(&[]));
        assert!(company.has_all_tags(&[ThesisTag::AppliedAi]));
        assert!(!company.has_all_tags(&[ThesisTag::AppliedAi, ThesisTag::Climate]));
    }

    #[test]
    fn test_funding_summary() {
        assert_eq!(
            sample_company().funding_summary().as_deref(),
            Some("Seed, $4.5M (2024-03), led by Foundry")
        );
        let mut company = sample_company();
        company.last_funding_round = None;
        assert!(company.funding_summary().is_none());
    }

    #[test]
    fn test_deserialize_minimal_company() {
        let json = r#"{
            "id": "x", "name": "X", "website": "x.io", "industry": "Fintech",
            "stage": "Series A", "location": "NYC", "description": "d"
        }"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.stage, FundingStage::SeriesA);
        assert!(company.thesis_tags.is_empty());
        assert!(company.last_funding_round.is_none());
    }
}
