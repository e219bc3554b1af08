// Biographical Record - Core Library
// Exposes the record value object for use in the CLI, the form UI, and tests

pub mod errors;
pub mod program;
pub mod birth_date;
pub mod record;
pub mod cli;

// Re-export commonly used types
pub use errors::{Field, RecordError, RecordErrors, Result};
pub use program::{ProgramCode, MAJOR_PATTERN};
pub use record::{BiographicalRecord, RawRecord, RecordSummary};
pub use cli::{Cli, Command, OutputFormat, ShowArgs};
