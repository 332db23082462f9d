//! System randomness.
//!
//! Every operation that consumes randomness takes an `RngCore + CryptoRng`
//! so tests can inject a seeded generator. The default source is
//! [`OsRng`]; if the operating system refuses to provide bytes the error is
//! returned to the caller, never papered over with a weaker source.

use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

pub use rand::rngs::OsRng;

/// Fills `out` from `rng`, surfacing failures as [`Error::RandomnessUnavailable`].
pub fn fill_random<R>(rng: &mut R, out: &mut [u8]) -> Result<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    rng.try_fill_bytes(out).map_err(|err| {
        tracing::error!(%err, "randomness source failed");
        Error::RandomnessUnavailable(err.to_string())
    })
}

/// `N` fresh random bytes from `rng`.
pub fn random_bytes<const N: usize, R>(rng: &mut R) -> Result<[u8; N]>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut out = [0u8; N];
    fill_random(rng, &mut out)?;

    Ok(out)
}
