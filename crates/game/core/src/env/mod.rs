//! Context objects describing read-only services.
//!
//! Oracles replace the original engine's global singletons (text manager,
//! shared RNG) with explicit references bundled into an [`Env`] aggregate,
//! so the core stays testable without a running host.
mod rng;
mod text;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use text::TextOracle;

/// Errors raised when a required oracle was not provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("rng oracle not available")]
    RngNotAvailable,

    #[error("text oracle not available")]
    TextNotAvailable,
}

/// Aggregates read-only oracles required by the effect and quest engines.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, R, T>
where
    R: RngOracle + ?Sized,
    T: TextOracle + ?Sized,
{
    rng: Option<&'a R>,
    text: Option<&'a T>,
}

pub type GameEnv<'a> = Env<'a, dyn RngOracle + 'a, dyn TextOracle + 'a>;

impl<'a, R, T> Env<'a, R, T>
where
    R: RngOracle + ?Sized,
    T: TextOracle + ?Sized,
{
    pub fn new(rng: Option<&'a R>, text: Option<&'a T>) -> Self {
        Self { rng, text }
    }

    pub fn empty() -> Self {
        Self {
            rng: None,
            text: None,
        }
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the TextOracle, or an error if not available.
    pub fn text(&self) -> Result<&'a T, OracleError> {
        self.text.ok_or(OracleError::TextNotAvailable)
    }
}

impl<'a> GameEnv<'a> {
    /// Convenience constructor for the common rng-only case.
    pub fn with_rng(rng: &'a dyn RngOracle) -> Self {
        Self::new(Some(rng), None)
    }
}
