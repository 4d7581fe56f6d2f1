use thiserror::Error;

// Failures of the strict bulk import. Row numbers are 1-based and count the header row,
// so they match what you see in the spreadsheet.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Sheet is empty or missing match data.")]
    EmptySheet,

    #[error("Invalid match at row {row}. Each match must have exactly two scores, found {found}.")]
    WrongScoreCount { row: usize, found: usize },

    #[error("Invalid match at row {row}. Score '{cell}' is not a whole, non-negative number.")]
    InvalidScore { row: usize, cell: String },

    #[error("Invalid match at row {row}. Column {column} has a score but no player name in the header.")]
    MissingPlayerName { row: usize, column: usize },

    #[error("could not decode sheet response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read csv export: {0}")]
    Csv(#[from] csv::Error),
}
