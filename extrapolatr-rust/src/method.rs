//! Selecting an extrapolation method at runtime

use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector};

use crate::config::ExtrapolationConfig;
use crate::error::{ExtrapolationError, Result};
use crate::mpe::mpe_with_config;
use crate::rre::rre_with_config;

/// Available extrapolation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Reduced Rank Extrapolation
    Rre,
    /// Minimal Polynomial Extrapolation
    Mpe,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Rre, Method::Mpe];

    /// Short lowercase name ("rre" or "mpe")
    pub fn name(&self) -> &'static str {
        match self {
            Method::Rre => "rre",
            Method::Mpe => "mpe",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ExtrapolationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rre" => Ok(Method::Rre),
            "mpe" => Ok(Method::Mpe),
            _ => Err(ExtrapolationError::UnknownMethod(s.to_string())),
        }
    }
}

/// Extrapolate the limit of `sequence` with the chosen method
pub fn extrapolate(
    sequence: &DMatrix<f64>,
    method: Method,
    config: &ExtrapolationConfig,
) -> Result<DVector<f64>> {
    match method {
        Method::Rre => rre_with_config(sequence, config),
        Method::Mpe => mpe_with_config(sequence, config),
    }
}
