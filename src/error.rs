use thiserror::Error;

/// Problems with the source table. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("{format} input is missing required column '{column}'")]
    MissingColumn {
        format: &'static str,
        column: &'static str,
    },

    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },

    #[error("workbook has no worksheets")]
    NoWorksheet,
}
