#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("REST view returned {status}: {body}")]
    Remote { status: u16, body: String },

    /// Pasted deck text is not valid JSON.
    #[error("Deck text is not valid JSON: {0}")]
    DeckParse(String),

    /// Deck text is JSON but carries no recognizable zone data.
    #[error("Deck JSON has no zone data: {0}")]
    DeckSchema(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl InventoryError {
    /// True for failures caused by the pasted deck text rather than the
    /// inventory source.
    pub fn is_deck_input_error(&self) -> bool {
        matches!(self, Self::DeckParse(_) | Self::DeckSchema(_))
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
