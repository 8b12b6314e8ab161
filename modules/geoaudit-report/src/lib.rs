//! Report rendering: flattens audit results into stable rows and writes the
//! CSV and HTML reports. Rows carry the ten verdicts, the score and the five
//! stable metric columns (word count, H2/list/table counts, meta length);
//! any other evidence fields stay diagnostic-only.

pub mod csv;
pub mod html;
pub mod row;

pub use csv::write_csv_report;
pub use html::write_html_report;
pub use row::ReportRow;
