use ds_core::DsError;
use ds_mutation::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] DsError),

    #[error("mutation rules rejected: {0}")]
    Rules(#[from] ConfigurationError),
}

pub type SimResult<T> = Result<T, SimError>;
