use std::collections::HashSet;

use super::schema::FundThesis;

/// Validate the effective fund thesis at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_thesis(thesis: &FundThesis) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if thesis.id.trim().is_empty() {
        errors.push("thesis.id: must not be empty".to_string());
    }

    if thesis.name.trim().is_empty() {
        errors.push("thesis.name: must not be empty".to_string());
    }

    if thesis.focus_tags.is_empty() {
        errors.push("thesis.focus_tags: at least one focus tag is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, tag) in thesis.focus_tags.iter().enumerate() {
        if !seen.insert(tag) {
            errors.push(format!("thesis.focus_tags[{}]: duplicate tag '{}'", i, tag));
        }
    }

    if thesis.preferred_stages.is_empty() {
        errors.push("thesis.preferred_stages: at least one stage is required".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thesis::{FundingStage, ThesisTag};

    #[test]
    fn test_default_thesis_is_valid() {
        assert!(validate_thesis(&FundThesis::default()).is_ok());
    }

    #[test]
    fn test_missing_focus_tags() {
        let thesis = FundThesis {
            focus_tags: vec![],
            ..FundThesis::default()
        };
        let errors = validate_thesis(&thesis).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("thesis.focus_tags"));
    }

    #[test]
    fn test_duplicate_focus_tag() {
        let thesis = FundThesis {
            focus_tags: vec![ThesisTag::Climate, ThesisTag::Climate],
            ..FundThesis::default()
        };
        let errors = validate_thesis(&thesis).unwrap_err();
        assert!(errors[0].contains("thesis.focus_tags[1]"));
    }

    #[test]
    fn test_collects_all_errors() {
        let thesis = FundThesis {
            id: " ".to_string(),
            name: String::new(),
            focus_tags: vec![],
            description: String::new(),
            preferred_stages: vec![],
            geography_bias: None,
        };
        let errors = validate_thesis(&thesis).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_single_stage_is_enough() {
        let thesis = FundThesis {
            preferred_stages: vec![FundingStage::Bootstrapped],
            ..FundThesis::default()
        };
        assert!(validate_thesis(&thesis).is_ok());
    }
}
