use crate::types::ClusterId;
use thiserror::Error;

/// A decay's preconditions did not hold; nothing was mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecayError {
    #[error(
        "unable to alpha decay {cluster}: need 2 protons and 2 neutrons, found {protons} and {neutrons}"
    )]
    InsufficientNucleons {
        cluster: ClusterId,
        protons: usize,
        neutrons: usize,
    },
    #[error("unable to beta decay {cluster}: no protons found")]
    NoProton { cluster: ClusterId },
}

/// Invalid attribute access; the attribute was left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttrError {
    #[error("{0} is not a valid attribute")]
    Unknown(String),
    #[error("{value:?} is not a valid value for {name}")]
    InvalidValue { name: &'static str, value: String },
}
