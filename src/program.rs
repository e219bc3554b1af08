// Program codes - the two academic majors a record may hold

use crate::errors::{Field, RecordError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Whole-input, case-insensitive match against the known program codes.
/// Compiled once for the process and never mutated.
pub static MAJOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:CSEN|DMET)$").expect("major pattern is valid"));

pub const EXPECTED_MAJOR: &str = "\"CSEN\" or \"DMET\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProgramCode {
    /// Computer Science and Engineering
    Csen,
    /// Digital Media Engineering and Technology
    Dmet,
}

impl ProgramCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramCode::Csen => "CSEN",
            ProgramCode::Dmet => "DMET",
        }
    }
}

impl fmt::Display for ProgramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramCode {
    type Err = RecordError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !MAJOR_PATTERN.is_match(raw) {
            return Err(RecordError::invalid(Field::Major, raw, EXPECTED_MAJOR));
        }

        match raw.to_uppercase().as_str() {
            "CSEN" => Ok(ProgramCode::Csen),
            _ => Ok(ProgramCode::Dmet),
        }
    }
}
