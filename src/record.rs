// 🎓 Biographical Record - one person's id, name, date of birth and major
//
// Every field is assigned through a validating setter. A setter that fails
// leaves the previous value in place; a setter that is never called leaves
// the zero value (empty string, epoch date).

use crate::birth_date;
use crate::errors::{Field, RecordError, RecordErrors, Result};
use crate::program::ProgramCode;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const EXPECTED_ID: &str = "an id like \"13-8994\"";

// ============================================================================
// RAW RECORD
// ============================================================================

/// Unvalidated input for a record - what a form or a JSON document carries.
///
/// `None` means the field was not supplied and its setter is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// DD/MM/YYYY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
}

// ============================================================================
// BIOGRAPHICAL RECORD
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", into = "RawRecord")]
pub struct BiographicalRecord {
    id: String,
    name: String,
    date_of_birth: Option<NaiveDate>,
    major: Option<ProgramCode>,
}

impl BiographicalRecord {
    /// Empty record; every field reads as its zero value
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every supplied field through its setter.
    ///
    /// Unlike the setters this does not stop at the first failure: all
    /// rejected fields are reported together.
    pub fn from_fields(raw: RawRecord) -> std::result::Result<Self, Vec<RecordError>> {
        let mut record = BiographicalRecord::new();
        let mut errors = Vec::new();

        if let Some(id) = raw.id.as_deref() {
            if let Err(e) = record.set_identifier(id) {
                errors.push(e);
            }
        }

        if let Some(name) = raw.name.as_deref() {
            if let Err(e) = record.set_name(name) {
                errors.push(e);
            }
        }

        if let Some(date) = raw.date_of_birth.as_deref() {
            if let Err(e) = record.set_date_of_birth(date) {
                errors.push(e);
            }
        }

        if let Some(major) = raw.major.as_deref() {
            if let Err(e) = record.set_major(major) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            for e in &errors {
                debug!(field = %e.field(), error = %e, "record field rejected");
            }
            Err(errors)
        }
    }

    // ========================================================================
    // IDENTIFIER
    // ========================================================================

    /// Accepts anything containing a hyphen and stores it verbatim
    pub fn set_identifier(&mut self, raw: &str) -> Result<()> {
        if !raw.contains('-') {
            return Err(RecordError::invalid(Field::Identifier, raw, EXPECTED_ID));
        }

        self.id = raw.to_string();
        Ok(())
    }

    pub fn identifier(&self) -> &str {
        &self.id
    }

    // ========================================================================
    // NAME
    // ========================================================================

    pub fn set_name(&mut self, raw: &str) -> Result<()> {
        if raw.is_empty() {
            return Err(RecordError::EmptyValue { field: Field::Name });
        }

        self.name = raw.to_string();
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First whitespace-separated word of the name
    pub fn first_name(&self) -> Result<&str> {
        self.name
            .split_whitespace()
            .next()
            .ok_or(RecordError::EmptyValue { field: Field::Name })
    }

    // ========================================================================
    // DATE OF BIRTH
    // ========================================================================

    /// Parses DD/MM/YYYY; no bounds on the year
    pub fn set_date_of_birth(&mut self, raw: &str) -> Result<()> {
        self.date_of_birth = Some(birth_date::parse(raw)?);
        Ok(())
    }

    /// Stored date, or 1970-01-01 when unset
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth.unwrap_or_default()
    }

    /// e.g. "Saturday, February 29, 2020"
    pub fn formatted_date_of_birth(&self) -> String {
        birth_date::format_long(self.date_of_birth())
    }

    /// Age in calendar years as of the local clock's current date
    pub fn age(&self) -> i32 {
        self.age_on(Local::now().date_naive())
    }

    /// `today.year - birth.year`; month and day are not considered
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        birth_date::calendar_years(self.date_of_birth(), today)
    }

    // ========================================================================
    // MAJOR
    // ========================================================================

    /// Case-insensitive "CSEN" or "DMET", stored uppercase
    pub fn set_major(&mut self, raw: &str) -> Result<()> {
        self.major = Some(raw.parse::<ProgramCode>()?);
        Ok(())
    }

    /// Stored program code, or "" when unset
    pub fn major(&self) -> &str {
        self.major.map(|code| code.as_str()).unwrap_or("")
    }

    pub fn program_code(&self) -> Option<ProgramCode> {
        self.major
    }

    // ========================================================================
    // COMPLETENESS
    // ========================================================================

    /// Fields whose setter has never succeeded
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::Identifier => self.id.is_empty(),
                Field::Name => self.name.is_empty(),
                Field::DateOfBirth => self.date_of_birth.is_none(),
                Field::Major => self.major.is_none(),
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Serializable view including the derived values
    pub fn summary_on(&self, today: NaiveDate) -> RecordSummary {
        let dob = self.date_of_birth;

        RecordSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            first_name: self.first_name().ok().map(str::to_string),
            date_of_birth: dob.map(birth_date::format_input),
            formatted_date_of_birth: dob.map(birth_date::format_long),
            age: dob.map(|_| self.age_on(today)),
            major: self.major().to_string(),
        }
    }
}

impl fmt::Display for BiographicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_unset = |s: &str| if s.is_empty() { "<unset>".to_string() } else { s.to_string() };

        write!(
            f,
            "{} | {} | {} | {}",
            or_unset(&self.id),
            or_unset(&self.name),
            self.date_of_birth
                .map(birth_date::format_long)
                .unwrap_or_else(|| "<unset>".to_string()),
            or_unset(self.major()),
        )
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl TryFrom<RawRecord> for BiographicalRecord {
    type Error = RecordErrors;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, Self::Error> {
        BiographicalRecord::from_fields(raw).map_err(RecordErrors)
    }
}

impl From<BiographicalRecord> for RawRecord {
    fn from(record: BiographicalRecord) -> Self {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };

        RawRecord {
            id: non_empty(record.id),
            name: non_empty(record.name),
            date_of_birth: record.date_of_birth.map(birth_date::format_input),
            major: record.major.map(|code| code.as_str().to_string()),
        }
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Record plus derived values, as printed by `bio-record show --format json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub id: String,
    pub name: String,
    pub first_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub formatted_date_of_birth: Option<String>,
    pub age: Option<i32>,
    pub major: String,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ada() -> BiographicalRecord {
        let mut record = BiographicalRecord::new();
        record.set_identifier("13-8994").unwrap();
        record.set_name("Ada Lovelace").unwrap();
        record.set_date_of_birth("10/12/1815").unwrap();
        record.set_major("csen").unwrap();
        record
    }

    #[test]
    fn test_new_record_reads_zero_values() {
        let record = BiographicalRecord::new();

        assert_eq!(record.identifier(), "");
        assert_eq!(record.name(), "");
        assert_eq!(record.major(), "");
        assert_eq!(record.date_of_birth(), date(1970, 1, 1));
        assert_eq!(record.program_code(), None);
        assert_eq!(record.missing_fields(), Field::ALL.to_vec());
        assert!(!record.is_complete());
    }

    #[test]
    fn test_identifier_with_hyphen_stored_verbatim() {
        let mut record = BiographicalRecord::new();

        for id in ["13-8994", "-", "abc-", " 1-2 ", "x--y"] {
            record.set_identifier(id).unwrap();
            assert_eq!(record.identifier(), id);
        }
    }

    #[test]
    fn test_identifier_without_hyphen_rejected_and_unchanged() {
        let mut record = BiographicalRecord::new();
        record.set_identifier("13-8994").unwrap();

        for id in ["138994", "", "13_8994", "13–8994"] {
            let err = record.set_identifier(id).unwrap_err();
            assert!(matches!(
                err,
                RecordError::InvalidFormat { field: Field::Identifier, .. }
            ));
            assert_eq!(record.identifier(), "13-8994");
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut record = BiographicalRecord::new();
        record.set_name("Ada").unwrap();

        let err = record.set_name("").unwrap_err();
        assert_eq!(err, RecordError::EmptyValue { field: Field::Name });
        assert_eq!(record.name(), "Ada");
    }

    #[test]
    fn test_first_name() {
        let mut record = BiographicalRecord::new();
        record.set_name("Ada Lovelace").unwrap();
        assert_eq!(record.first_name().unwrap(), "Ada");

        record.set_name("  Grace \t Hopper").unwrap();
        assert_eq!(record.first_name().unwrap(), "Grace");
    }

    #[test]
    fn test_first_name_without_words_is_empty_value() {
        let mut record = BiographicalRecord::new();
        assert_eq!(
            record.first_name(),
            Err(RecordError::EmptyValue { field: Field::Name })
        );

        // Whitespace is a non-empty name but has no first word
        record.set_name("   ").unwrap();
        assert!(record.first_name().is_err());
    }

    #[test]
    fn test_leap_day_formatted() {
        let mut record = BiographicalRecord::new();
        record.set_date_of_birth("29/02/2020").unwrap();

        assert_eq!(record.date_of_birth(), date(2020, 2, 29));
        assert_eq!(record.formatted_date_of_birth(), "Saturday, February 29, 2020");
    }

    #[test]
    fn test_impossible_date_rejected_and_unchanged() {
        let mut record = BiographicalRecord::new();
        record.set_date_of_birth("29/02/2020").unwrap();

        let err = record.set_date_of_birth("31/02/2021").unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidFormat { field: Field::DateOfBirth, .. }
        ));
        assert_eq!(record.date_of_birth(), date(2020, 2, 29));
    }

    #[test]
    fn test_major_normalized_to_uppercase() {
        let mut record = BiographicalRecord::new();
        record.set_major("csen").unwrap();
        assert_eq!(record.major(), "CSEN");

        record.set_major("Dmet").unwrap();
        assert_eq!(record.major(), "DMET");
        assert_eq!(record.program_code(), Some(ProgramCode::Dmet));
    }

    #[test]
    fn test_unknown_major_rejected_and_unchanged() {
        let mut record = BiographicalRecord::new();
        record.set_major("csen").unwrap();

        let err = record.set_major("ARTS").unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidFormat { field: Field::Major, .. }
        ));
        assert_eq!(record.major(), "CSEN");
    }

    #[test]
    fn test_age_counts_calendar_years_only() {
        let mut record = BiographicalRecord::new();
        record.set_date_of_birth("31/12/2000").unwrap();

        // One day after birth still counts as a full year
        assert_eq!(record.age_on(date(2001, 1, 1)), 1);
        assert_eq!(record.age_on(date(2024, 6, 15)), 24);

        record.set_date_of_birth("01/01/2000").unwrap();
        assert_eq!(record.age_on(date(2024, 6, 15)), 24);
    }

    #[test]
    fn test_age_uses_current_year() {
        let mut record = BiographicalRecord::new();
        record.set_date_of_birth("15/06/2000").unwrap();

        let this_year = chrono::Datelike::year(&Local::now().date_naive());
        assert_eq!(record.age(), this_year - 2000);
    }

    #[test]
    fn test_from_fields_complete() {
        let record = BiographicalRecord::from_fields(RawRecord {
            id: Some("13-8994".to_string()),
            name: Some("Ada Lovelace".to_string()),
            date_of_birth: Some("10/12/1815".to_string()),
            major: Some("csen".to_string()),
        })
        .unwrap();

        assert_eq!(record, ada());
        assert!(record.is_complete());
    }

    #[test]
    fn test_from_fields_reports_every_failure() {
        let errors = BiographicalRecord::from_fields(RawRecord {
            id: Some("138994".to_string()),
            name: Some("Ada".to_string()),
            date_of_birth: Some("31/02/2021".to_string()),
            major: Some("ARTS".to_string()),
        })
        .unwrap_err();

        let fields: Vec<Field> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec![Field::Identifier, Field::DateOfBirth, Field::Major]);
    }

    #[test]
    fn test_from_fields_skips_missing() {
        let record = BiographicalRecord::from_fields(RawRecord {
            name: Some("Ada".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(record.name(), "Ada");
        assert_eq!(
            record.missing_fields(),
            vec![Field::Identifier, Field::DateOfBirth, Field::Major]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(ada()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "13-8994",
                "name": "Ada Lovelace",
                "date_of_birth": "10/12/1815",
                "major": "CSEN"
            })
        );

        let partial = serde_json::to_value(BiographicalRecord::new()).unwrap();
        assert_eq!(partial, serde_json::json!({}));
    }

    #[test]
    fn test_deserialize_validates() {
        let record: BiographicalRecord = serde_json::from_str(
            r#"{"id":"13-8994","name":"Ada Lovelace","date_of_birth":"10/12/1815","major":"Csen"}"#,
        )
        .unwrap();
        assert_eq!(record.major(), "CSEN");

        let result = serde_json::from_str::<BiographicalRecord>(r#"{"major":"ARTS"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_includes_derived_values() {
        let summary = ada().summary_on(date(2024, 1, 1));

        assert_eq!(summary.first_name.as_deref(), Some("Ada"));
        assert_eq!(summary.date_of_birth.as_deref(), Some("10/12/1815"));
        assert_eq!(
            summary.formatted_date_of_birth.as_deref(),
            Some("Sunday, December 10, 1815")
        );
        assert_eq!(summary.age, Some(209));
        assert_eq!(summary.major, "CSEN");

        let empty = BiographicalRecord::new().summary_on(date(2024, 1, 1));
        assert_eq!(empty.first_name, None);
        assert_eq!(empty.age, None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ada().to_string(),
            "13-8994 | Ada Lovelace | Sunday, December 10, 1815 | CSEN"
        );
        assert_eq!(
            BiographicalRecord::new().to_string(),
            "<unset> | <unset> | <unset> | <unset>"
        );
    }
}
