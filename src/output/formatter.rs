use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::companies::{Company, QueryPage};
use crate::enrichment::{EnrichmentResult, TimelineItem, TimelineKind};
use crate::signals::ScoreBreakdown;
use crate::thesis::FundThesis;
use crate::workspace::{CompanyList, SavedSearch};

const SCORE_HIGH: u8 = 70;
const SCORE_MID: u8 = 50;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width), width = width)
}

/// Thesis fit score, traffic-light coloured when `use_colors` is set
pub fn format_score(score: u8, use_colors: bool) -> String {
    let text = format!("{:>3}/100", score);
    if !use_colors {
        text
    } else if score >= SCORE_HIGH {
        text.green().bold().to_string()
    } else if score >= SCORE_MID {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

/// Format one page of companies as a table with columns:
/// Index, Name, Stage, Industry, Location. No headers.
/// Index is 1-based across the whole result, not per page.
pub fn format_company_table(page: &QueryPage, use_colors: bool) -> String {
    if page.items.is_empty() {
        return "No companies match. Try broadening the filters or removing some thesis tags."
            .to_string();
    }

    let stage_width = 12;
    let industry_width = 16;
    let separator = "  ";

    let term_width = get_terminal_width();

    page.items
        .iter()
        .enumerate()
        .map(|(idx, company)| {
            let index_str = format!("{:>3}.", page.offset() + idx + 1);
            let stage = pad(company.stage.as_str(), stage_width);
            let industry = pad(&company.industry, industry_width);

            // Name gets whatever is left after the fixed columns and location
            let fixed_width = index_str.len()
                + 1
                + stage_width
                + industry_width
                + separator.len() * 3
                + company.location.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(&company.name, width - fixed_width),
                Some(_) => truncate(&company.name, 20),
                None => company.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    name.bold(),
                    separator,
                    stage.cyan(),
                    separator,
                    industry.yellow(),
                    separator,
                    company.location.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, name, separator, stage, separator, industry, separator, company.location
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "12 results, page 1 of 2"
pub fn format_page_footer(page: &QueryPage) -> String {
    let noun = if page.total == 1 { "result" } else { "results" };
    format!(
        "{} {}, page {} of {}",
        page.total, noun, page.page, page.total_pages
    )
}

/// Format companies as tab-separated values for scripting
/// Columns: id, name, stage, industry, location (no headers, no colors)
pub fn format_company_tsv(companies: &[&Company]) -> String {
    companies
        .iter()
        .map(|c| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                c.id, c.name, c.stage, c.industry, c.location
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single company with detailed multi-line output
pub fn format_company_detail(company: &Company, use_colors: bool) -> String {
    let tags = if company.thesis_tags.is_empty() {
        "-".to_string()
    } else {
        company
            .thesis_tags
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!("{} ({})", company.name.bold(), company.id.dimmed()));
        lines.push(format!("  Website: {}", company.website.underline()));
        lines.push(format!("  Stage: {}", company.stage.cyan()));
        lines.push(format!("  Industry: {}", company.industry.yellow()));
    } else {
        lines.push(format!("{} ({})", company.name, company.id));
        lines.push(format!("  Website: {}", company.website));
        lines.push(format!("  Stage: {}", company.stage));
        lines.push(format!("  Industry: {}", company.industry));
    }
    lines.push(format!("  Location: {}", company.location));
    lines.push(format!("  Thesis tags: {}", tags));
    if let Some(funding) = company.funding_summary() {
        lines.push(format!("  Last round: {}", funding));
    }
    if let Some(ref employees) = company.employee_count_range {
        lines.push(format!("  Employees: {}", employees));
    }
    lines.push(format!("  {}", company.description));
    lines.join("\n")
}

/// Format an enrichment result: score, summary, raw and derived signals,
/// sources and the explanation. When `breakdown` is given each rule's
/// contribution is listed too.
pub fn format_signal_report(
    result: &EnrichmentResult,
    breakdown: Option<&ScoreBreakdown>,
    use_colors: bool,
) -> String {
    let payload = &result.payload;
    let output = &result.output;
    let mut lines = Vec::new();

    lines.push(format!(
        "Thesis fit: {}",
        format_score(output.score, use_colors)
    ));

    if !payload.summary.is_empty() {
        lines.push(String::new());
        lines.push(payload.summary.clone());
    }

    let mut section = |title: &str, items: &[String]| {
        if items.is_empty() {
            return;
        }
        lines.push(String::new());
        lines.push(if use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        });
        for item in items {
            lines.push(format!("  - {}", item));
        }
    };

    section("What they do", &payload.what_they_do);
    section("Keywords", &payload.keywords);
    section("Signals", &payload.signals);
    section("Derived signals", &output.derived_signals);

    if let Some(breakdown) = breakdown {
        lines.push(String::new());
        lines.push(format!("Score breakdown (base {})", breakdown.base_score));
        for c in &breakdown.contributions {
            lines.push(format!(
                "  {:<20} {:+}  {} -> {}",
                c.rule, c.delta, c.before, c.after
            ));
        }
        if breakdown.raw_score != i32::from(output.score) {
            lines.push(format!(
                "  clamped {} -> {}",
                breakdown.raw_score, output.score
            ));
        }
    }

    if !payload.sources.is_empty() {
        lines.push(String::new());
        lines.push("Sources".to_string());
        for source in &payload.sources {
            lines.push(format!("  {} ({})", source.url, source.scraped_at));
        }
    }

    lines.push(String::new());
    lines.push(if use_colors {
        output.thesis_match_explanation.dimmed().to_string()
    } else {
        output.thesis_match_explanation.clone()
    });

    lines.join("\n")
}

/// "Signal timeline" section, one dated line per item. Empty when there is
/// nothing to show.
pub fn format_timeline(items: &[TimelineItem], use_colors: bool) -> String {
    if items.is_empty() {
        return String::new();
    }

    let date_width = items.iter().map(|i| i.date.chars().count()).max().unwrap_or(0);
    let lines = items.iter().map(|item| {
        let date = format!("{:<width$}", item.date, width = date_width);
        let source = item
            .source
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        if use_colors {
            let label = match item.kind {
                TimelineKind::Funding => item.label.green().to_string(),
                TimelineKind::Enrichment => item.label.cyan().to_string(),
            };
            format!("  {}  {}{}", date.dimmed(), label, source.dimmed())
        } else {
            format!("  {}  {}{}", date, item.label, source)
        }
    });

    std::iter::once("Signal timeline".to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format lists with their member companies resolved by name where known
pub fn format_lists(lists: &[CompanyList], companies: &[Company], use_colors: bool) -> String {
    if lists.is_empty() {
        return "No lists yet. Create one with `scout lists create <name>`.".to_string();
    }

    lists
        .iter()
        .map(|list| {
            let count = list.company_ids.len();
            let header = format!(
                "{} ({} {})  {}",
                list.name,
                count,
                if count == 1 { "company" } else { "companies" },
                list.id
            );
            let header = if use_colors {
                header.bold().to_string()
            } else {
                header
            };

            let members = list.company_ids.iter().map(|id| {
                let name = companies
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("(unknown company)");
                format!("  - {} ({})", name, id)
            });

            std::iter::once(header)
                .chain(members)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per saved search: name, filters, id
pub fn format_saved_searches(searches: &[SavedSearch], use_colors: bool) -> String {
    if searches.is_empty() {
        return "No saved searches yet. Save one with `scout searches save <name> [filters]`."
            .to_string();
    }

    searches
        .iter()
        .map(|s| {
            let mut filters = Vec::new();
            if !s.query.is_empty() {
                filters.push(format!("q=\"{}\"", s.query));
            }
            if let Some(ref industry) = s.industry {
                filters.push(format!("industry={}", industry));
            }
            filters.push(format!("stage={}", s.stage));
            if !s.tags.is_empty() {
                let tags = s.tags.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",");
                filters.push(format!("tags={}", tags));
            }
            let name = if use_colors {
                s.name.bold().to_string()
            } else {
                s.name.clone()
            };
            format!("{}  {}  {}", name, filters.join(" "), s.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_thesis(thesis: &FundThesis) -> String {
    let tags = thesis
        .focus_tags
        .iter()
        .map(|t| format!("{} ({})", t.label(), t.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    let stages = thesis
        .preferred_stages
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("{} ({})", thesis.name, thesis.id),
        format!("  Focus: {}", tags),
        format!("  Stages: {}", stages),
    ];
    if let Some(ref geography) = thesis.geography_bias {
        lines.push(format!("  Geography: {}", geography));
    }
    if !thesis.description.is_empty() {
        lines.push(format!("  {}", thesis.description));
    }
    lines.join("\n")
}
