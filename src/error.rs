use crate::{shower::ShowerError, xray::FluxTableError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `shower` module")]
    Shower(#[from] ShowerError),
    #[error("Error in the `xray` module")]
    Xray(#[from] FluxTableError),
}
