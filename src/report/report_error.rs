use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot write report.")]
    Io(#[from] std::io::Error),

    #[error("Cannot write NE records.")]
    Csv(#[from] csv::Error),

    #[error("Cannot serialize report.")]
    Json(#[from] serde_json::Error),
}
