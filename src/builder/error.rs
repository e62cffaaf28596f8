//! Errors raised while configuring a machine builder.

use crate::core::StateName;
use thiserror::Error;

/// Errors that can occur when configuring or starting from a builder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The state was never introduced through `path`.
    #[error("Unknown state '{state}'. States are created by declaring a path to or from them")]
    UnknownState { state: StateName },
}
