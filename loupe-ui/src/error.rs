use loupe_common::NavigationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightboxError {
    #[error("No document available")]
    NoDocument,
    #[error("Mount root not found: {0}")]
    MissingRoot(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
