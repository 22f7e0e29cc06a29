use crate::thesis::FundThesis;

/// What a rule looks for in the lower-cased search text.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any of the thesis focus tags, as phrases ("vertical saas").
    FocusTags,
    /// Any one of the listed terms. Counts as a single hit.
    AnyTerm(&'static [&'static str]),
    /// Number of distinct listed terms present. Repeats of one term count once.
    DistinctTerms(&'static [&'static str]),
}

/// One score outcome of a rule. A rule fires its first tier whose
/// `min_hits` is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub min_hits: usize,
    pub delta: i32,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub trigger: Trigger,
    /// Ordered from highest `min_hits` to lowest.
    pub tiers: &'static [Tier],
}

impl Rule {
    /// Number of hits this rule's trigger finds in `text`.
    pub fn hits(&self, text: &str, thesis: &FundThesis) -> usize {
        match self.trigger {
            Trigger::FocusTags => {
                let matched = thesis
                    .focus_phrases()
                    .iter()
                    .any(|phrase| text.contains(phrase.as_str()));
                usize::from(matched)
            }
            Trigger::AnyTerm(terms) => usize::from(terms.iter().any(|t| text.contains(t))),
            Trigger::DistinctTerms(terms) => terms.iter().filter(|t| text.contains(*t)).count(),
        }
    }

    /// The tier this rule fires for `text`, if any.
    pub fn evaluate(&self, text: &str, thesis: &FundThesis) -> Option<&'static Tier> {
        let hits = self.hits(text, thesis);
        if hits == 0 {
            return None;
        }
        self.tiers.iter().find(|tier| hits >= tier.min_hits)
    }
}

/// The thesis-fit rules, in evaluation order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "focus_tags",
        trigger: Trigger::FocusTags,
        tiers: &[Tier {
            min_hits: 1,
            delta: 15,
            message: "Direct match to fund focus tags in content.",
        }],
    },
    Rule {
        name: "vertical_depth",
        trigger: Trigger::AnyTerm(&["vertical", "industry-specific", "specialty", "sector"]),
        tiers: &[Tier {
            min_hits: 1,
            delta: 10,
            message: "Language suggests strong vertical / workflow depth.",
        }],
    },
    Rule {
        name: "workflow",
        trigger: Trigger::AnyTerm(&["workflow", "back-office", "ops", "operations", "playbook"]),
        tiers: &[Tier {
            min_hits: 1,
            delta: 10,
            message: "Product appears embedded in an operational workflow.",
        }],
    },
    Rule {
        name: "ai_native",
        trigger: Trigger::DistinctTerms(&["ai", "machine learning", "ml", "copilot", "model", "llm"]),
        tiers: &[
            Tier {
                min_hits: 2,
                delta: 10,
                message: "Multiple references to AI-native product surface.",
            },
            Tier {
                min_hits: 1,
                delta: 5,
                message: "Some evidence of AI usage in the product.",
            },
        ],
    },
    Rule {
        name: "developer_motion",
        trigger: Trigger::AnyTerm(&["api", "developer", "sdk"]),
        tiers: &[Tier {
            min_hits: 1,
            delta: 10,
            message: "Developer-first or infra-like motion inferred.",
        }],
    },
    Rule {
        name: "product_led",
        trigger: Trigger::AnyTerm(&["self-serve", "bottoms-up", "usage-based", "product-led"]),
        tiers: &[Tier {
            min_hits: 1,
            delta: 10,
            message: "Signals of bottoms-up or product-led go-to-market.",
        }],
    },
    Rule {
        name: "legacy_displacement",
        trigger: Trigger::AnyTerm(&["on-prem", "legacy"]),
        tiers: &[Tier {
            min_hits: 1,
            delta: 5,
            message: "Opportunity framed against legacy or on-prem incumbents.",
        }],
    },
];

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thesis::ThesisTag;

    fn fired(name: &str, text: &str) -> Option<i32> {
        let thesis = FundThesis::default();
        rule(name)
            .expect("rule exists")
            .evaluate(text, &thesis)
            .map(|tier| tier.delta)
    }

    #[test]
    fn test_rule_names_are_unique() {
        for (i, a) in RULES.iter().enumerate() {
            for b in &RULES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_tiers_ordered_by_min_hits() {
        for rule in RULES {
            assert!(!rule.tiers.is_empty(), "{} has no tiers", rule.name);
            assert!(rule.tiers.windows(2).all(|w| w[0].min_hits > w[1].min_hits));
            assert!(rule.tiers.iter().all(|t| t.min_hits >= 1));
        }
    }

    #[test]
    fn test_focus_tags_uses_thesis() {
        assert_eq!(fired("focus_tags", "an applied ai company"), Some(15));
        assert_eq!(fired("focus_tags", "applied_ai"), None);

        let thesis = FundThesis {
            focus_tags: vec![ThesisTag::Climate],
            ..FundThesis::default()
        };
        let focus = rule("focus_tags").unwrap();
        assert!(focus.evaluate("carbon accounting for climate teams", &thesis).is_some());
        assert!(focus.evaluate("an applied ai company", &thesis).is_none());
    }

    #[test]
    fn test_vertical_depth() {
        assert_eq!(fired("vertical_depth", "built for the dental sector"), Some(10));
        assert_eq!(fired("vertical_depth", "horizontal tooling"), None);
    }

    #[test]
    fn test_workflow() {
        assert_eq!(fired("workflow", "automates back-office reconciliation"), Some(10));
        assert_eq!(fired("workflow", "a consumer game"), None);
    }

    #[test]
    fn test_ai_native_tiers() {
        assert_eq!(fired("ai_native", "an llm copilot"), Some(10));
        assert_eq!(fired("ai_native", "powered by an llm"), Some(5));
        assert_eq!(fired("ai_native", "spreadsheet export"), None);
    }

    #[test]
    fn test_ai_native_counts_distinct_terms_not_occurrences() {
        let thesis = FundThesis::default();
        let ai = rule("ai_native").unwrap();
        let text = "llm llm llm llm";
        assert_eq!(ai.hits(text, &thesis), 1);
        assert_eq!(ai.evaluate(text, &thesis).map(|t| t.delta), Some(5));
    }

    #[test]
    fn test_developer_motion() {
        assert_eq!(fired("developer_motion", "ships an sdk"), Some(10));
        assert_eq!(fired("developer_motion", "sales-led"), None);
    }

    #[test]
    fn test_product_led() {
        assert_eq!(fired("product_led", "usage-based pricing"), Some(10));
        assert_eq!(fired("product_led", "enterprise contracts"), None);
    }

    #[test]
    fn test_legacy_displacement() {
        assert_eq!(fired("legacy_displacement", "replaces on-prem servers"), Some(5));
        assert_eq!(fired("legacy_displacement", "greenfield"), None);
    }

    #[test]
    fn test_unknown_rule() {
        assert!(rule("nope").is_none());
    }
}
