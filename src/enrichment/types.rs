use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Where a piece of enrichment content was scraped from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    pub scraped_at: String,
}

/// Structured company summary produced by the upstream summarization step.
///
/// Missing arrays deserialize as empty so the signal engine always sees a
/// well-formed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentPayload {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub what_they_do: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl EnrichmentPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse enrichment payload: invalid JSON")
    }

    /// Guarantee at least one source entry, defaulting to the scraped URL and
    /// the given time.
    pub fn ensure_sources(&mut self, url: &str, now: DateTime<Utc>) {
        if self.sources.is_empty() {
            self.sources.push(Source {
                url: url.to_string(),
                scraped_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            });
        }
    }
}

/// Result of the signal engine for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEngineOutput {
    pub derived_signals: Vec<String>,
    pub thesis_match_explanation: String,
    pub score: u8,
}

/// A payload together with the engine's verdict on it, flattened into one
/// JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    #[serde(flatten)]
    pub payload: EnrichmentPayload,
    #[serde(flatten)]
    pub output: SignalEngineOutput,
}

impl EnrichmentResult {
    pub fn new(payload: EnrichmentPayload, output: SignalEngineOutput) -> Self {
        Self { payload, output }
    }
}

/// Prefix bare domains with `https://`; anything already starting with
/// `http` is returned unchanged.
pub fn normalize_website_url(website: &str) -> String {
    let website = website.trim();
    if website.starts_with("http") {
        website.to_string()
    } else {
        format!("https://{}", website)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let payload = EnrichmentPayload::from_json(r#"{"summary": "Payroll for clinics"}"#).unwrap();
        assert_eq!(payload.summary, "Payroll for clinics");
        assert!(payload.what_they_do.is_empty());
        assert!(payload.keywords.is_empty());
        assert!(payload.signals.is_empty());
        assert!(payload.sources.is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{
            "summary": "s",
            "whatTheyDo": ["a", "b"],
            "keywords": ["k"],
            "signals": [],
            "sources": [{"url": "https://acme.io", "scrapedAt": "2024-01-01T00:00:00Z"}]
        }"#;
        let payload = EnrichmentPayload::from_json(json).unwrap();
        assert_eq!(payload.what_they_do, vec!["a", "b"]);
        assert_eq!(payload.sources[0].scraped_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(EnrichmentPayload::from_json("not json").is_err());
        assert!(EnrichmentPayload::from_json(r#"{"keywords": "ai"}"#).is_err());
    }

    #[test]
    fn test_ensure_sources_fills_empty() {
        let mut payload = EnrichmentPayload::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        payload.ensure_sources("https://acme.io", now);
        assert_eq!(
            payload.sources,
            vec![Source {
                url: "https://acme.io".to_string(),
                scraped_at: "2024-05-01T12:00:00.000Z".to_string(),
            }]
        );
    }

    #[test]
    fn test_ensure_sources_keeps_existing() {
        let mut payload = EnrichmentPayload {
            sources: vec![Source {
                url: "https://other.io".to_string(),
                scraped_at: "2023-01-01T00:00:00Z".to_string(),
            }],
            ..Default::default()
        };
        payload.ensure_sources("https://acme.io", Utc::now());
        assert_eq!(payload.sources.len(), 1);
        assert_eq!(payload.sources[0].url, "https://other.io");
    }

    #[test]
    fn test_normalize_website_url() {
        assert_eq!(normalize_website_url("acme.io"), "https://acme.io");
        assert_eq!(normalize_website_url("http://acme.io"), "http://acme.io");
        assert_eq!(normalize_website_url(" https://acme.io "), "https://acme.io");
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = EnrichmentResult::new(
            EnrichmentPayload {
                summary: "s".to_string(),
                ..Default::default()
            },
            SignalEngineOutput {
                derived_signals: vec!["d".to_string()],
                thesis_match_explanation: "e".to_string(),
                score: 55,
            },
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["summary"], "s");
        assert_eq!(value["score"], 55);
        assert_eq!(value["derivedSignals"][0], "d");
        assert_eq!(value["thesisMatchExplanation"], "e");
        assert!(value["whatTheyDo"].is_array());
    }
}
