use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Two-tier failure model: everything transient (connection faults,
/// non-success statuses, bot interstitials) is swallowed and retried
/// inside [`crate::fetch`], so the only fetch-side variants that can
/// reach a caller are `RetriesExhausted` (bounded policies only) and
/// client construction failures. `Structure` is the fatal tier: the
/// page no longer looks like the page we know how to read.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gave up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: usize },

    #[error("page layout changed: {0}")]
    Structure(String),

    #[error("could not write {path}: {source}")]
    WriteImage {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
