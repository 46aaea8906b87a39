//! Rendering of solver results: plain tables, Gambit style `NE` records, summaries and JSON.
mod render;
pub use render::*;

mod report_error;
pub use report_error::ReportError;
