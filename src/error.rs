//! Error types.

use crate::directive::DirectiveKind;
use crate::warning::Warning;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A directive was built without the version it refers to.
    #[error("'version' argument is required in {kind} directives")]
    MissingVersion { kind: DirectiveKind },

    /// A deprecation warning escalated by the `error` action.
    #[error("{0}")]
    Warning(Warning),
}
