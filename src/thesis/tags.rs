use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Investment focus area a company or a fund thesis can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThesisTag {
    VerticalSaas,
    FintechInfra,
    Climate,
    DeveloperTools,
    AiInfrastructure,
    AppliedAi,
    Marketplaces,
    FutureOfWork,
}

impl ThesisTag {
    pub const ALL: [ThesisTag; 8] = [
        ThesisTag::VerticalSaas,
        ThesisTag::FintechInfra,
        ThesisTag::Climate,
        ThesisTag::DeveloperTools,
        ThesisTag::AiInfrastructure,
        ThesisTag::AppliedAi,
        ThesisTag::Marketplaces,
        ThesisTag::FutureOfWork,
    ];

    /// Wire name, e.g. `vertical_saas`
    pub fn as_str(&self) -> &'static str {
        match self {
            ThesisTag::VerticalSaas => "vertical_saas",
            ThesisTag::FintechInfra => "fintech_infra",
            ThesisTag::Climate => "climate",
            ThesisTag::DeveloperTools => "developer_tools",
            ThesisTag::AiInfrastructure => "ai_infrastructure",
            ThesisTag::AppliedAi => "applied_ai",
            ThesisTag::Marketplaces => "marketplaces",
            ThesisTag::FutureOfWork => "future_of_work",
        }
    }

    /// Human-facing label, e.g. "Vertical SaaS"
    pub fn label(&self) -> &'static str {
        match self {
            ThesisTag::VerticalSaas => "Vertical SaaS",
            ThesisTag::FintechInfra => "Fintech infra",
            ThesisTag::Climate => "Climate",
            ThesisTag::DeveloperTools => "Developer tools",
            ThesisTag::AiInfrastructure => "AI infra",
            ThesisTag::AppliedAi => "Applied AI",
            ThesisTag::Marketplaces => "Marketplaces",
            ThesisTag::FutureOfWork => "Future of work",
        }
    }

    /// The phrase searched for in free text: the wire name with underscores
    /// replaced by spaces ("vertical saas").
    pub fn phrase(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Parse a comma-separated tag list. Empty segments are skipped.
    pub fn parse_list(s: &str) -> Result<Vec<ThesisTag>, QueryError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for ThesisTag {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ThesisTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| {
                let expected = ThesisTag::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                QueryError::UnknownTag(s.to_string(), expected)
            })
    }
}

impl fmt::Display for ThesisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_replaces_underscores() {
        assert_eq!(ThesisTag::VerticalSaas.phrase(), "vertical saas");
        assert_eq!(ThesisTag::FutureOfWork.phrase(), "future of work");
        assert_eq!(ThesisTag::Climate.phrase(), "climate");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Applied_AI".parse::<ThesisTag>(), Ok(ThesisTag::AppliedAi));
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "crypto".parse::<ThesisTag>().unwrap_err();
        assert!(matches!(err, QueryError::UnknownTag(ref t, _) if t == "crypto"));
    }

    #[test]
    fn test_parse_list_skips_empty_segments() {
        let tags = ThesisTag::parse_list("climate,,developer_tools,").unwrap();
        assert_eq!(tags, vec![ThesisTag::Climate, ThesisTag::DeveloperTools]);
        assert!(ThesisTag::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ThesisTag::AiInfrastructure).unwrap();
        assert_eq!(json, "\"ai_infrastructure\"");
    }
}
