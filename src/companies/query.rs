use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::Company;
use crate::error::QueryError;
use crate::thesis::{StageFilter, ThesisTag};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Industry facet value that matches every company.
pub const ALL_INDUSTRIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Stage,
    Location,
}

impl SortKey {
    fn key<'a>(&self, company: &'a Company) -> &'a str {
        match self {
            SortKey::Name => &company.name,
            SortKey::Stage => company.stage.as_str(),
            SortKey::Location => &company.location,
        }
    }

    fn compare(&self, a: &Company, b: &Company) -> Ordering {
        let (ka, kb) = (self.key(a), self.key(b));
        ka.to_lowercase()
            .cmp(&kb.to_lowercase())
            .then_with(|| ka.cmp(kb))
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "stage" => Ok(SortKey::Stage),
            "location" => Ok(SortKey::Location),
            _ => Err(QueryError::UnknownSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::Stage => "stage",
            SortKey::Location => "location",
        })
    }
}

/// Filter, sort and page settings for browsing the company universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyQuery {
    pub q: String,
    pub stage: StageFilter,
    /// `None` (or "All") matches every industry
    pub industry: Option<String>,
    /// Companies must carry every one of these tags
    pub tags: Vec<ThesisTag>,
    pub sort: SortKey,
    /// 1-based; clamped into range when the query runs
    pub page: usize,
}

impl Default for CompanyQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            stage: StageFilter::Any,
            industry: None,
            tags: Vec::new(),
            sort: SortKey::Name,
            page: 1,
        }
    }
}

/// One page of query results.
#[derive(Debug)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a Company>,
    /// Number of companies matching the filters, across all pages
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl QueryPage<'_> {
    /// 0-based position of the first item on this page within the full result
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

impl CompanyQuery {
    pub fn matches(&self, company: &Company) -> bool {
        if !self.stage.matches(company.stage) {
            return false;
        }

        if let Some(ref industry) = self.industry {
            if industry != ALL_INDUSTRIES && company.industry != *industry {
                return false;
            }
        }

        if !company.has_all_tags(&self.tags) {
            return false;
        }

        let needle = self.q.trim().to_lowercase();
        needle.is_empty() || company.search_haystack().contains(&needle)
    }

    /// All matching companies in sort order.
    pub fn filter_and_sort<'a>(&self, companies: &'a [Company]) -> Vec<&'a Company> {
        let mut matched: Vec<&Company> = companies.iter().filter(|c| self.matches(c)).collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }

    /// Run the query and cut out the requested page.
    pub fn run<'a>(&self, companies: &'a [Company], page_size: usize) -> QueryPage<'a> {
        let page_size = page_size.max(1);
        let matched = self.filter_and_sort(companies);
        let total = matched.len();
        let total_pages = total.div_ceil(page_size).max(1);
        let page = self.page.clamp(1, total_pages);
        let items = matched
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        QueryPage {
            items,
            total,
            page,
            total_pages,
            page_size,
        }
    }
}

/// Industry facet values: "All" followed by every distinct industry, sorted.
pub fn industries(companies: &[Company]) -> Vec<String> {
    let distinct: BTreeSet<&str> = companies.iter().map(|c| c.industry.as_str()).collect();
    std::iter::once(ALL_INDUSTRIES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for ch in s.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    if pending_dash {
        slug.push('-');
    }
    slug
}

/// Id for a user-added company: `custom-<slug>-<suffix>`.
///
/// The slug comes from the name with leading and trailing dashes trimmed. A
/// name with no usable characters falls back to the (untrimmed) website slug.
pub fn custom_company_id(name: &str, website: &str, suffix: &str) -> String {
    let from_name = slugify(name).trim_matches('-').to_string();
    let base = if from_name.is_empty() {
        slugify(website)
    } else {
        from_name
    };
    format!("custom-{}-{}", base, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::sample_companies;
    use crate::thesis::FundingStage;

    fn ids(page: &QueryPage) -> Vec<String> {
        page.items.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_default_query_returns_everything_sorted_by_name() {
        let companies = sample_companies();
        let matched = CompanyQuery::default().filter_and_sort(&companies);
        assert_eq!(matched.len(), companies.len());
        let names: Vec<_> = matched.iter().map(|c| c.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_stage_filter() {
        let companies = sample_companies();
        let query = CompanyQuery {
            stage: StageFilter::Stage(FundingStage::SeriesA),
            ..Default::default()
        };
        let matched = query.filter_and_sort(&companies);
        assert!(!matched.is_empty());
        assert!(matched.iter().all(|c| c.stage == FundingStage::SeriesA));
    }

    #[test]
    fn test_industry_filter_and_all() {
        let companies = sample_companies();
        let energy = CompanyQuery {
            industry: Some("Energy".to_string()),
            ..Default::default()
        };
        let matched = energy.filter_and_sort(&companies);
        assert_eq!(matched.len(), 2);

        let all = CompanyQuery {
            industry: Some(ALL_INDUSTRIES.to_string()),
            ..Default::default()
        };
        assert_eq!(all.filter_and_sort(&companies).len(), companies.len());
    }

    #[test]
    fn test_tags_require_all_selected() {
        let companies = sample_companies();
        let query = CompanyQuery {
            tags: vec![ThesisTag::Climate, ThesisTag::FintechInfra],
            ..Default::default()
        };
        let matched = query.filter_and_sort(&companies);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "carbonbook");
    }

    #[test]
    fn test_text_query_searches_haystack() {
        let companies = sample_companies();
        let by_location = CompanyQuery {
            q: "  BERLIN ".to_string(),
            ..Default::default()
        };
        let matched = by_location.filter_and_sort(&companies);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "gridwise");

        let by_tag = CompanyQuery {
            q: "future_of_work".to_string(),
            ..Default::default()
        };
        assert_eq!(by_tag.filter_and_sort(&companies).len(), 2);

        let by_website = CompanyQuery {
            q: "docketly.law".to_string(),
            ..Default::default()
        };
        assert_eq!(by_website.filter_and_sort(&companies).len(), 1);
    }

    #[test]
    fn test_sort_by_location() {
        let companies = sample_companies();
        let query = CompanyQuery {
            sort: SortKey::Location,
            ..Default::default()
        };
        let matched = query.filter_and_sort(&companies);
        assert_eq!(matched[0].location, "Amsterdam, Netherlands");
        assert_eq!(matched.last().unwrap().location, "Toronto, Canada");
    }

    #[test]
    fn test_sort_by_stage_uses_display_string() {
        let companies = sample_companies();
        let query = CompanyQuery {
            sort: SortKey::Stage,
            ..Default::default()
        };
        let matched = query.filter_and_sort(&companies);
        assert_eq!(matched[0].stage, FundingStage::Bootstrapped);
        assert_eq!(matched.last().unwrap().stage, FundingStage::SeriesBPlus);
    }

    #[test]
    fn test_pagination() {
        let companies = sample_companies();
        let first = CompanyQuery::default().run(&companies, 5);
        assert_eq!(first.total, 12);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.offset(), 0);

        let last = CompanyQuery {
            page: 3,
            ..Default::default()
        }
        .run(&companies, 5);
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.offset(), 10);
    }

    #[test]
    fn test_page_is_clamped() {
        let companies = sample_companies();
        let too_far = CompanyQuery {
            page: 99,
            ..Default::default()
        }
        .run(&companies, 10);
        assert_eq!(too_far.page, 2);
        assert_eq!(too_far.items.len(), 2);

        let zero = CompanyQuery {
            page: 0,
            ..Default::default()
        }
        .run(&companies, 10);
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let companies = sample_companies();
        let page = CompanyQuery {
            q: "no such company anywhere".to_string(),
            ..Default::default()
        }
        .run(&companies, 10);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(ids(&page).is_empty());
    }

    #[test]
    fn test_industries_facet() {
        let companies = sample_companies();
        let facets = industries(&companies);
        assert_eq!(facets[0], "All");
        assert!(facets[1..].windows(2).all(|w| w[0] < w[1]));
        assert_eq!(facets.iter().filter(|i| *i == "Energy").count(), 1);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Location".parse::<SortKey>(), Ok(SortKey::Location));
        assert!("score".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_custom_company_id() {
        assert_eq!(
            custom_company_id("  Acme, Inc.  ", "acme.io", "x7k2"),
            "custom-acme-inc-x7k2"
        );
        assert_eq!(
            custom_company_id("!!!", "https://acme.io", "ab12"),
            "custom-https-acme-io-ab12"
        );
    }
}
