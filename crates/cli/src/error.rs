/// Client-side failures.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Select at least 2 drugs to check interaction.")]
    TooFewDrugs,
    #[error("no drug matches \"{0}\"")]
    UnknownDrug(String),
    #[error("\"{term}\" matches several drugs: {}", candidates.join(", "))]
    AmbiguousDrug {
        term: String,
        candidates: Vec<String>,
    },
    #[error("terminal output failed: {0}")]
    Output(#[from] std::io::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
