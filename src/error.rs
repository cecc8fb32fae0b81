use thiserror::Error;

pub type StreamGraphResult<T> = Result<T, StreamGraphError>;

#[derive(Debug, Error)]
pub enum StreamGraphError {
    #[error("No data provided")]
    EmptyData,

    #[error("Missing required fields: {}. Available: {}", missing.join(", "), available.join(", "))]
    MissingFields {
        missing: Vec<String>,
        available: Vec<String>,
        row: usize,
    },

    #[error("Invalid dates found in {count} rows (first: `{first}`)")]
    InvalidDate { count: usize, first: String },

    #[error(
        "Required columns not found for {}. Available: {}. Need columns containing: date, category, value",
        missing.join(", "),
        available.join(", ")
    )]
    UnmappableColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("invalid numeric value `{raw}` in row {row}")]
    InvalidValue { row: usize, raw: String },

    #[error("Data file not found. Expected paths: {}", attempted.join(", "))]
    DataSourcesExhausted { attempted: Vec<String> },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("Error creating stream graph: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StreamGraphError {
    /// Returns `true` for failures raised before chart construction.
    ///
    /// Everything else reaching the top of a render pass is reported as a
    /// [`StreamGraphError::Render`].
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyData
                | Self::MissingFields { .. }
                | Self::InvalidDate { .. }
                | Self::UnmappableColumns { .. }
                | Self::InvalidValue { .. }
                | Self::DataSourcesExhausted { .. }
        )
    }
}
