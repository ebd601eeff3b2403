pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No element in the document matches the alert container selector.
    #[error("alert container not found: no element matches `{selector}`")]
    ContainerNotFound { selector: String },

    #[error("invalid selector `{selector}`")]
    InvalidSelector { selector: String },

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
}
