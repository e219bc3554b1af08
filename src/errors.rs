// Record errors - the only two ways a setter can refuse input

use std::fmt;
use thiserror::Error;

// ============================================================================
// FIELD
// ============================================================================

/// Which field of a record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Identifier,
    Name,
    DateOfBirth,
    Major,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Identifier,
        Field::Name,
        Field::DateOfBirth,
        Field::Major,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Identifier => "id",
            Field::Name => "name",
            Field::DateOfBirth => "date of birth",
            Field::Major => "major",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RECORD ERROR
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Input does not have the shape the field requires.
    ///
    /// `cause` is set when a lower-level parser (the calendar) rejected the input.
    #[error("invalid {field}: {input:?} does not match {expected}")]
    InvalidFormat {
        field: Field,
        input: String,
        expected: &'static str,
        #[source]
        cause: Option<chrono::ParseError>,
    },

    #[error("{field} must not be empty")]
    EmptyValue { field: Field },
}

impl RecordError {
    pub(crate) fn invalid(field: Field, input: &str, expected: &'static str) -> Self {
        RecordError::InvalidFormat {
            field,
            input: input.to_string(),
            expected,
            cause: None,
        }
    }

    /// The field the error refers to
    pub fn field(&self) -> Field {
        match self {
            RecordError::InvalidFormat { field, .. } => *field,
            RecordError::EmptyValue { field } => *field,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Every failure from validating several fields at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordErrors(pub Vec<RecordError>);

impl fmt::Display for RecordErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for RecordErrors {}

impl From<Vec<RecordError>> for RecordErrors {
    fn from(errors: Vec<RecordError>) -> Self {
        RecordErrors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_format_message_quotes_input() {
        let err = RecordError::invalid(Field::Identifier, "138994", "NN-NNNN");
        assert_eq!(
            err.to_string(),
            "invalid id: \"138994\" does not match NN-NNNN"
        );
        assert_eq!(err.field(), Field::Identifier);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_empty_value_message() {
        let err = RecordError::EmptyValue { field: Field::Name };
        assert_eq!(err.to_string(), "name must not be empty");
        assert_eq!(err.field(), Field::Name);
    }

    #[test]
    fn test_record_errors_joined() {
        let errors = RecordErrors(vec![
            RecordError::EmptyValue { field: Field::Name },
            RecordError::invalid(Field::Major, "ARTS", "CSEN or DMET"),
        ]);
        assert_eq!(
            errors.to_string(),
            "name must not be empty; invalid major: \"ARTS\" does not match CSEN or DMET"
        );
    }

    #[test]
    fn test_parser_cause_is_exposed_as_source() {
        let cause = chrono::NaiveDate::parse_from_str("31/02/2021", "%d/%m/%Y").unwrap_err();
        let err = RecordError::InvalidFormat {
            field: Field::DateOfBirth,
            input: "31/02/2021".to_string(),
            expected: "DD/MM/YYYY",
            cause: Some(cause),
        };

        assert!(err.source().is_some());
    }
}
