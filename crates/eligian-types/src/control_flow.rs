//! Control-flow typing rules (spec §4.4).

use crate::types::Type;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlFlowIssue {
    /// `if` condition did not infer to `boolean`.
    NonBooleanCondition,
    /// `if`/`for` body had no statements.
    EmptyBody,
    /// `for` collection did not infer to `array`.
    NonArrayCollection,
}

#[must_use]
pub fn check_if(condition: Type, then_branch_len: usize) -> Vec<ControlFlowIssue> {
    let mut issues = Vec::new();
    if condition != Type::Boolean && condition != Type::Unknown {
        issues.push(ControlFlowIssue::NonBooleanCondition);
    }
    if then_branch_len == 0 {
        issues.push(ControlFlowIssue::EmptyBody);
    }
    issues
}

#[must_use]
pub fn check_for(collection: Type, body_len: usize) -> Vec<ControlFlowIssue> {
    let mut issues = Vec::new();
    if collection != Type::Array && collection != Type::Unknown {
        issues.push(ControlFlowIssue::NonArrayCollection);
    }
    if body_len == 0 {
        issues.push(ControlFlowIssue::EmptyBody);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_boolean_condition_and_empty_branch_both_reported() {
        let issues = check_if(Type::Number, 0);
        assert_eq!(issues, vec![ControlFlowIssue::NonBooleanCondition, ControlFlowIssue::EmptyBody]);
    }

    #[test]
    fn unknown_condition_is_not_flagged() {
        assert!(check_if(Type::Unknown, 1).is_empty());
    }

    #[test]
    fn non_array_collection_is_an_error_candidate() {
        assert_eq!(check_for(Type::Object, 1), vec![ControlFlowIssue::NonArrayCollection]);
    }
}
