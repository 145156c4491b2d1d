//! Built-in cipher suites.

#[cfg(feature = "bandersnatch")]
pub mod bandersnatch;

#[cfg(feature = "secp256r1")]
pub mod secp256r1;

#[cfg(feature = "baby-jubjub")]
pub mod baby_jubjub;

#[cfg(test)]
pub(crate) mod testing;
