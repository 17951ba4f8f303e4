use crate::analytics::SkippedRecords;
use crate::analytics::exceptions::{ExceptionKind, ExceptionRecord};
use crate::analytics::overtime::OvertimeRecord;
use crate::api::reports::ReportQuery;
use crate::export::{ExceptionReportResponse, OvertimeReportResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Analytics API",
        version = "1.0.0",
        description = r#"
## Workforce Attendance Analytics

Read-only reporting over attendance, shift, holiday, employee and
department data owned by the wider HRM suite.

### 🔹 Reports
- **Overtime**: payroll-finalised attendance days worked beyond the
  active shift window plus grace, with holiday annotation
- **Exceptions**: missed-punch / short-time / late classification with
  weekly-rest flagging

### 📦 Output
- JSON envelopes with period, totals and skipped-record metadata
- CSV with a fixed column order per report
- Excel is a documented gap: requests answer 501

### 🚀 Usage
Feed HR dashboards and compliance exports. All parameters are query
strings; invalid period input degrades to the current calendar month.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::reports::overtime_report,
        crate::api::reports::exception_report,
    ),
    components(
        schemas(
            ReportQuery,
            OvertimeReportResponse,
            OvertimeRecord,
            ExceptionReportResponse,
            ExceptionRecord,
            ExceptionKind,
            SkippedRecords
        )
    ),
    tags(
        (name = "Reports", description = "Attendance analytics report APIs"),
    )
)]
pub struct ApiDoc;
