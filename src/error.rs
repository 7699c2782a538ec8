use card_viewer_core::source::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("cards are not loaded (phase: {0})")]
    NotReady(String),
}
