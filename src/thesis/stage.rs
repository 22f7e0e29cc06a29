use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingStage {
    #[serde(rename = "Pre-Seed")]
    PreSeed,
    #[serde(rename = "Seed")]
    Seed,
    #[serde(rename = "Series A")]
    SeriesA,
    #[serde(rename = "Series B+")]
    SeriesBPlus,
    #[serde(rename = "Bootstrapped")]
    Bootstrapped,
}

impl FundingStage {
    pub const ALL: [FundingStage; 5] = [
        FundingStage::PreSeed,
        FundingStage::Seed,
        FundingStage::SeriesA,
        FundingStage::SeriesBPlus,
        FundingStage::Bootstrapped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FundingStage::PreSeed => "Pre-Seed",
            FundingStage::Seed => "Seed",
            FundingStage::SeriesA => "Series A",
            FundingStage::SeriesBPlus => "Series B+",
            FundingStage::Bootstrapped => "Bootstrapped",
        }
    }
}

impl FromStr for FundingStage {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FundingStage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| QueryError::UnknownStage(s.to_string()))
    }
}

impl fmt::Display for FundingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage filter used by company queries and saved searches: either `Any` or
/// one exact stage. Serialized as the plain string ("Any", "Seed", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StageFilter {
    #[default]
    Any,
    Stage(FundingStage),
}

impl StageFilter {
    pub fn matches(&self, stage: FundingStage) -> bool {
        match self {
            StageFilter::Any => true,
            StageFilter::Stage(wanted) => *wanted == stage,
        }
    }
}

impl FromStr for StageFilter {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("any") {
            Ok(StageFilter::Any)
        } else {
            s.parse().map(StageFilter::Stage)
        }
    }
}

impl TryFrom<String> for StageFilter {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StageFilter> for String {
    fn from(filter: StageFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageFilter::Any => f.write_str("Any"),
            StageFilter::Stage(stage) => f.write_str(stage.as_str()),
        }
    }
}
