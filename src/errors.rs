// Input validation errors and user-friendly error messages
//
// `InvalidInput` is the only domain error: an unrecognized label, an
// out-of-range age, or a missing required field. It is raised while the
// form fields are parsed, so the router itself never fails.

use std::fmt;
use thiserror::Error;

use crate::feedback::ClinicianJudgment;
use crate::patient::{Comorbidity, PrimaryConcern, MAX_AGE, MIN_AGE};

/// Which piece of input was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Age,
    PrimaryConcern,
    Comorbidity,
    ClinicianJudgment,
    EdgeCaseDescription,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Age => "age",
            InputField::PrimaryConcern => "primary concern",
            InputField::Comorbidity => "comorbidity",
            InputField::ClinicianJudgment => "clinician judgment",
            InputField::EdgeCaseDescription => "edge case description",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Invalid input: unknown {field} '{value}'")]
    UnknownValue { field: InputField, value: String },

    #[error("Invalid input: could not read {field} from '{value}'")]
    Malformed { field: InputField, value: String },

    #[error("Invalid input: age {age} is outside the supported range {min}-{max}")]
    AgeOutOfRange { age: i64, min: u8, max: u8 },

    #[error("Invalid input: {field} must not be empty")]
    Missing { field: InputField },
}

impl InvalidInput {
    /// The field that was rejected
    pub fn field(&self) -> InputField {
        match self {
            InvalidInput::UnknownValue { field, .. }
            | InvalidInput::Malformed { field, .. }
            | InvalidInput::Missing { field } => *field,
            InvalidInput::AgeOutOfRange { .. } => InputField::Age,
        }
    }
}

/// Accepted values for a field, as shown to the user
fn accepted_values(field: InputField) -> Vec<String> {
    match field {
        InputField::Age => vec![format!("whole numbers from {} to {}", MIN_AGE, MAX_AGE)],
        InputField::PrimaryConcern => PrimaryConcern::ALL
            .iter()
            .map(|c| format!("{} ({})", c.slug(), c.label()))
            .collect(),
        InputField::Comorbidity => Comorbidity::ALL
            .iter()
            .map(|c| format!("{} ({})", c.slug(), c.label()))
            .collect(),
        InputField::ClinicianJudgment => ClinicianJudgment::ALL
            .iter()
            .map(|j| format!("{} ({})", j.slug(), j.label()))
            .collect(),
        InputField::EdgeCaseDescription => vec!["any non-empty text".to_string()],
    }
}

/// Format an invalid input error together with the values that would be accepted
pub fn invalid_input_help(error: &InvalidInput) -> String {
    let accepted = accepted_values(error.field())
        .into_iter()
        .map(|v| format!("• {}", v))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n\
        \x1b[1;33mAccepted {} values:\x1b[0m\n{}",
        error,
        error.field(),
        accepted
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat {}\x1b[0m\n\n\
        2. Supported keys:\n\
           • export_dir = \"/path/for/exports\"\n\
           • history_path = \"/path/to/history.txt\"\n\
           • debug_logging = true | false\n\n\
        3. Move the file aside to fall back to defaults:\n\
           \x1b[36mmv {} {}.backup\x1b[0m",
        path, error, path, path, path
    )
}

/// Wrap a generic error with a suggestion
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!(
        "{}\n\n\
        \x1b[1;33mSuggestion:\x1b[0m {}",
        error, suggestion
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_messages() {
        let err = InvalidInput::UnknownValue {
            field: InputField::PrimaryConcern,
            value: "headache".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input: unknown primary concern 'headache'"
        );

        let err = InvalidInput::AgeOutOfRange { age: 42, min: 2, max: 18 };
        assert!(err.to_string().contains("2-18"));
        assert_eq!(err.field(), InputField::Age);
    }

    #[test]
    fn test_invalid_input_help_lists_accepted_values() {
        let err = InvalidInput::UnknownValue {
            field: InputField::Comorbidity,
            value: "flu".to_string(),
        };
        let msg = invalid_input_help(&err);
        assert!(msg.contains("suicidal-ideation"));
        assert!(msg.contains("School Refusal"));
    }

    #[test]
    fn test_config_parse_error_mentions_keys() {
        let msg = config_parse_error("/tmp/config.toml", "expected `=`");
        assert!(msg.contains("export_dir"));
        assert!(msg.contains("/tmp/config.toml.backup"));
    }
}
