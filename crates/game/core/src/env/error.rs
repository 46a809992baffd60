//! Oracle access errors.

use crate::error::{ErrorSeverity, PotError};

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// ItemOracle is not available in the environment.
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl PotError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
