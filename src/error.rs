use thiserror::Error;

#[derive(Error, Debug)]
pub enum YamsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Player name cannot be empty")]
    EmptyPlayerName,

    #[error("A player named '{0}' already exists")]
    DuplicatePlayerName(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Cannot close a round without players")]
    EmptyRosterOnClose,

    #[error("No archived round #{0}")]
    UnknownRound(usize),

    #[error("This operation is irreversible and must be confirmed")]
    ConfirmationRequired,

    #[error("Malformed import document: {0}")]
    MalformedImport(String),
}

pub type YamsResult<T> = Result<T, YamsError>;
