//! Built-in mock company universe used when no `companies_file` is configured.

use super::types::{Company, FundingRound};
use crate::thesis::{FundingStage, ThesisTag};

#[allow(clippy::too_many_arguments)]
fn company(
    id: &str,
    name: &str,
    website: &str,
    industry: &str,
    stage: FundingStage,
    thesis_tags: &[ThesisTag],
    location: &str,
    description: &str,
) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        website: website.to_string(),
        industry: industry.to_string(),
        stage,
        thesis_tags: thesis_tags.to_vec(),
        location: location.to_string(),
        description: description.to_string(),
        last_funding_round: None,
        employee_count_range: None,
    }
}

fn with_round(
    mut company: Company,
    amount_millions: f64,
    date: &str,
    lead_investor: &str,
    employees: &str,
) -> Company {
    company.last_funding_round = Some(FundingRound {
        stage: company.stage,
        amount_millions: Some(amount_millions),
        date: Some(date.to_string()),
        lead_investor: Some(lead_investor.to_string()),
    });
    company.employee_count_range = Some(employees.to_string());
    company
}

pub fn sample_companies() -> Vec<Company> {
    use FundingStage::*;
    use ThesisTag::*;

    vec![
        with_round(
            company(
                "ledgerloop",
                "LedgerLoop",
                "ledgerloop.io",
                "Fintech",
                Seed,
                &[FintechInfra, DeveloperTools],
                "New York, NY",
                "Reconciliation APIs for vertical software platforms embedding payments.",
            ),
            6.0,
            "2024-02",
            "Ridgeline Ventures",
            "11-50",
        ),
        with_round(
            company(
                "clinicflow",
                "ClinicFlow",
                "clinicflow.health",
                "Healthcare",
                SeriesA,
                &[VerticalSaas, AppliedAi],
                "Boston, MA",
                "AI copilot for specialty clinic front-office workflows and prior authorizations.",
            ),
            18.0,
            "2023-11",
            "Harbor Point Capital",
            "51-200",
        ),
        company(
            "gridwise",
            "Gridwise Labs",
            "gridwise.energy",
            "Energy",
            PreSeed,
            &[Climate, AiInfrastructure],
            "Berlin, Germany",
            "Forecasting models for distributed energy resources and grid operators.",
        ),
        with_round(
            company(
                "tensorhouse",
                "TensorHouse",
                "tensorhouse.dev",
                "Developer Tools",
                Seed,
                &[AiInfrastructure, DeveloperTools],
                "San Francisco, CA",
                "Usage-based inference gateway with an SDK for routing across model providers.",
            ),
            4.5,
            "2024-05",
            "Northbeam",
            "1-10",
        ),
        company(
            "crewbase",
            "Crewbase",
            "crewbase.app",
            "Construction",
            Seed,
            &[VerticalSaas, FutureOfWork],
            "Austin, TX",
            "Crew scheduling and field operations for specialty subcontractors.",
        ),
        company(
            "harvestline",
            "Harvestline",
            "harvestline.ag",
            "Agriculture",
            Bootstrapped,
            &[Marketplaces, Climate],
            "Des Moines, IA",
            "Marketplace connecting regional growers with food processors.",
        ),
        with_round(
            company(
                "claimpilot",
                "ClaimPilot",
                "claimpilot.ai",
                "Insurance",
                SeriesA,
                &[AppliedAi, VerticalSaas],
                "Chicago, IL",
                "LLM-driven claims intake replacing legacy on-prem adjuster tooling.",
            ),
            22.0,
            "2024-01",
            "Lakeshore Partners",
            "51-200",
        ),
        company(
            "shiftwell",
            "Shiftwell",
            "shiftwell.co",
            "HR Tech",
            SeriesBPlus,
            &[FutureOfWork],
            "London, UK",
            "Hourly workforce management with self-serve onboarding for multi-site employers.",
        ),
        company(
            "vaultkey",
            "Vaultkey",
            "vaultkey.io",
            "Security",
            PreSeed,
            &[DeveloperTools],
            "Toronto, Canada",
            "Secrets management SDK for small platform teams.",
        ),
        with_round(
            company(
                "carbonbook",
                "CarbonBook",
                "carbonbook.eco",
                "Energy",
                Seed,
                &[Climate, FintechInfra],
                "Amsterdam, Netherlands",
                "Carbon accounting ledger for mid-market manufacturers.",
            ),
            5.0,
            "2023-09",
            "Greenfield Fund",
            "11-50",
        ),
        company(
            "docketly",
            "Docketly",
            "docketly.law",
            "Legal",
            Seed,
            &[VerticalSaas, AppliedAi],
            "Denver, CO",
            "Matter intake and deadline tracking for boutique litigation firms.",
        ),
        company(
            "freightmesh",
            "FreightMesh",
            "freightmesh.com",
            "Logistics",
            SeriesBPlus,
            &[Marketplaces],
            "Atlanta, GA",
            "Spot freight marketplace for regional carriers.",
        ),
    ]
}
