pub mod context;
pub mod exceptions;
pub mod overtime;

pub use context::ReportContext;

use serde::Serialize;
use utoipa::ToSchema;

/// Per-reason counts of attendance records a report could not resolve.
/// Surfaced in every report envelope so partial results are visible to the
/// caller instead of silently shrinking the record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkippedRecords {
    #[schema(example = 0)]
    pub missing_employee: u32,
    #[schema(example = 1)]
    pub missing_assignment: u32,
    #[schema(example = 0)]
    pub missing_shift: u32,
}

impl SkippedRecords {
    pub fn total(&self) -> u32 {
        self.missing_employee + self.missing_assignment + self.missing_shift
    }
}
