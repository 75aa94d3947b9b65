use thiserror::Error;

/// Reasons a panel could not be mounted. None of these reach the host page:
/// the supervisor logs them and either retries or stays quiet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("refusing to build a panel from an empty outline")]
    EmptyOutline,
    #[error("a panel with id `{0}` is already mounted")]
    AlreadyMounted(&'static str),
    #[error("document has no <body> to mount into")]
    MissingBody,
}
