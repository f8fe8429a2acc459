//! Error types for graph construction and scheduling runs.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a task graph or running a schedule.
///
/// Every error is terminal for the operation that raised it: no partial
/// graph is built and no partial schedule is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The task set failed construction-time validation.
    #[error("invalid task graph: {}", summarize(.errors))]
    InvalidGraph {
        /// Every problem found in the input, in discovery order.
        errors: Vec<ValidationError>,
    },

    /// The run ended with tasks that never became ready.
    #[error(
        "{} task(s) could not be scheduled ({}); dependency cycle: {}",
        .unscheduled.len(),
        .unscheduled.join(", "),
        .cycle.join(" -> ")
    )]
    UnschedulableResidue {
        /// Names of all tasks left unscheduled, in input order.
        unscheduled: Vec<String>,
        /// One dependency cycle inside the residue, in dependency order.
        cycle: Vec<String>,
    },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_graph_display() {
        let err = Error::InvalidGraph {
            errors: vec![
                ValidationError::new(ValidationErrorKind::DuplicateName, "Duplicate task name: A"),
                ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    "Task 'B' depends on unknown task 'Z'",
                ),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid task graph: Duplicate task name: A; Task 'B' depends on unknown task 'Z'"
        );
    }

    #[test]
    fn test_residue_display() {
        let err = Error::UnschedulableResidue {
            unscheduled: vec!["X".into(), "Y".into(), "Z".into()],
            cycle: vec!["X".into(), "Y".into()],
        };
        assert_eq!(
            err.to_string(),
            "3 task(s) could not be scheduled (X, Y, Z); dependency cycle: X -> Y"
        );
    }
}
