//! Fiat-Shamir transcript for the ring PIOP, built on the SHAKE-128 sponge
//! (the same XOF used by the Pedersen-suite pipeline's `shake128` feature).

use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::vec::Vec;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;

/// A SHAKE-128-backed Fiat-Shamir transcript.
///
/// `append` absorbs a labeled value; `challenge_scalar` squeezes a field
/// element and folds the squeezed bytes back in, so that two challenges
/// drawn in sequence are bound to each other even though the underlying
/// `Shake128` state is consumed (not mutated in place) on each squeeze.
#[derive(Clone)]
pub struct ArkTranscript {
    state: Shake128,
}

impl ArkTranscript {
    pub fn new(suite_id: &[u8]) -> Self {
        let mut state = Shake128::default();
        state.update(suite_id);
        Self { state }
    }

    pub fn append_bytes(&mut self, label: &[u8], bytes: &[u8]) {
        self.state.update(label);
        self.state.update(&(bytes.len() as u64).to_le_bytes());
        self.state.update(bytes);
    }

    pub fn append_point<P: CanonicalSerialize>(&mut self, label: &[u8], point: &P) {
        let mut buf = Vec::new();
        point
            .serialize_uncompressed(&mut buf)
            .expect("point serialization is infallible");
        self.append_bytes(label, &buf);
    }

    pub fn append_scalar<F: PrimeField>(&mut self, label: &[u8], scalar: &F) {
        let mut buf = Vec::new();
        scalar
            .serialize_uncompressed(&mut buf)
            .expect("scalar serialization is infallible");
        self.append_bytes(label, &buf);
    }

    pub fn challenge_scalar<F: PrimeField>(&mut self, label: &[u8]) -> F {
        self.state.update(label);
        self.state.update(b"challenge");
        let n_bytes = (F::MODULUS_BIT_SIZE as usize + 128).div_ceil(8);
        let mut reader = self.state.clone().finalize_xof();
        let mut buf = ark_std::vec![0u8; n_bytes];
        reader.read(&mut buf);
        self.state.update(&buf);
        F::from_le_bytes_mod_order(&buf)
    }
}
