pub mod check;
pub mod error;
pub mod record;
pub mod report;

pub use check::CheckSpec;
pub use error::{Error, Result};
pub use record::ToolCallRecord;
pub use report::{CheckResult, Report, Summary};
