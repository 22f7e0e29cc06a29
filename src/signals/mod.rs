pub mod engine;
pub mod rules;

pub use engine::{
    evaluate_rules, evaluate_with_breakdown, run_signal_engine, search_text, EngineReport,
    RuleContribution, ScoreBreakdown, THESIS_MATCH_EXPLANATION,
};
pub use rules::{Rule, Tier, Trigger, RULES};
