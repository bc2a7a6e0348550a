//! Result of a fast single-action pre-check

use super::issue::{DesignIssue, Severity};
use serde::Serialize;

/// Issue code used by [`ValidationResult::invalid`].
pub const VALIDATION_ISSUE_CODE: &str = "ACTION_INVALID";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<DesignIssue>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    pub fn invalid(description: impl Into<String>, severity: Severity) -> Self {
        Self {
            is_valid: false,
            issues: vec![DesignIssue::new(VALIDATION_ISSUE_CODE, description, severity)],
        }
    }

    /// Invalid result carrying a fully described issue.
    pub fn rejected_by(issue: DesignIssue) -> Self {
        Self {
            is_valid: false,
            issues: vec![issue],
        }
    }

    /// Valid result that still carries advisory issues.
    pub fn valid_with(issues: Vec<DesignIssue>) -> Self {
        Self {
            is_valid: true,
            issues,
        }
    }

    /// Combine two results: invalid if either is invalid, issues concatenated.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.is_valid &= other.is_valid;
        self.issues.extend(other.issues);
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        let result = ValidationResult::valid();
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_invalid_carries_issue() {
        let result = ValidationResult::invalid("door too narrow", Severity::Error);
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert_eq!(result.issues[0].description, "door too narrow");
    }

    #[test]
    fn test_merge() {
        let merged = ValidationResult::valid_with(vec![DesignIssue::info("I", "note")])
            .merge(ValidationResult::invalid("bad", Severity::Warning));
        assert!(!merged.is_valid);
        assert_eq!(merged.issues.len(), 2);

        let still_valid = ValidationResult::valid().merge(ValidationResult::valid());
        assert!(still_valid.is_valid);
    }
}
