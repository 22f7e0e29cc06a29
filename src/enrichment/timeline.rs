use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::EnrichmentResult;
use crate::companies::Company;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Funding,
    Enrichment,
}

/// One dated event on a company's signal timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub id: String,
    pub kind: TimelineKind,
    pub label: String,
    /// ISO date or timestamp; items sort on this string
    pub date: String,
    pub source: Option<String>,
}

/// Merge a company's last funding round and its latest enrichment run into
/// one timeline, newest first.
///
/// A funding round without a date is left out. An enrichment run is dated by
/// its first source's `scraped_at`, or by today's date (`now`) when it has no
/// sources.
pub fn timeline(
    company: &Company,
    enrichment: Option<&EnrichmentResult>,
    now: DateTime<Utc>,
) -> Vec<TimelineItem> {
    let mut items = Vec::new();

    if let Some(round) = &company.last_funding_round {
        if let Some(date) = &round.date {
            let mut label = format!("{} round", round.stage);
            if let Some(amount) = round.amount_millions.filter(|a| *a != 0.0) {
                label.push_str(&format!(" (${}M)", amount));
            }
            items.push(TimelineItem {
                id: format!("{}-funding", company.id),
                kind: TimelineKind::Funding,
                label,
                date: date.clone(),
                source: round.lead_investor.clone(),
            });
        }
    }

    if let Some(result) = enrichment {
        let first = result.payload.sources.first();
        items.push(TimelineItem {
            id: format!("{}-enriched", company.id),
            kind: TimelineKind::Enrichment,
            label: "Thesis enrichment run".to_string(),
            date: first
                .map(|s| s.scraped_at.clone())
                .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
            source: first.map(|s| s.url.clone()),
        });
    }

    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::{sample_companies, FundingRound};
    use crate::enrichment::{EnrichmentPayload, SignalEngineOutput, Source};
    use crate::thesis::FundingStage;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn enriched(sources: Vec<Source>) -> EnrichmentResult {
        EnrichmentResult::new(
            EnrichmentPayload {
                sources,
                ..Default::default()
            },
            SignalEngineOutput {
                derived_signals: vec![],
                thesis_match_explanation: String::new(),
                score: 40,
            },
        )
    }

    fn ledgerloop() -> Company {
        sample_companies()
            .into_iter()
            .find(|c| c.id == "ledgerloop")
            .unwrap()
    }

    #[test]
    fn test_funding_only() {
        let items = timeline(&ledgerloop(), None, now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "ledgerloop-funding");
        assert_eq!(items[0].kind, TimelineKind::Funding);
        assert_eq!(items[0].label, "Seed round ($6M)");
        assert_eq!(items[0].date, "2024-02");
        assert_eq!(items[0].source.as_deref(), Some("Ridgeline Ventures"));
    }

    #[test]
    fn test_newest_first() {
        let result = enriched(vec![Source {
            url: "https://ledgerloop.io".to_string(),
            scraped_at: "2024-05-20T10:00:00.000Z".to_string(),
        }]);
        let items = timeline(&ledgerloop(), Some(&result), now());
        let kinds: Vec<TimelineKind> = items.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![TimelineKind::Enrichment, TimelineKind::Funding]);
        assert_eq!(items[0].label, "Thesis enrichment run");
        assert_eq!(items[0].source.as_deref(), Some("https://ledgerloop.io"));

        let old = enriched(vec![Source {
            url: "https://ledgerloop.io".to_string(),
            scraped_at: "2023-12-01T00:00:00.000Z".to_string(),
        }]);
        let items = timeline(&ledgerloop(), Some(&old), now());
        assert_eq!(items[0].kind, TimelineKind::Funding);
    }

    #[test]
    fn test_undated_round_is_skipped() {
        let mut company = ledgerloop();
        company.last_funding_round = Some(FundingRound {
            stage: FundingStage::Seed,
            amount_millions: Some(3.0),
            date: None,
            lead_investor: None,
        });
        assert!(timeline(&company, None, now()).is_empty());

        let items = timeline(&company, Some(&enriched(vec![])), now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, "2024-06-01");
        assert_eq!(items[0].source, None);
    }

    #[test]
    fn test_round_without_amount() {
        let mut company = ledgerloop();
        if let Some(round) = company.last_funding_round.as_mut() {
            round.amount_millions = None;
        }
        assert_eq!(timeline(&company, None, now())[0].label, "Seed round");
    }
}
