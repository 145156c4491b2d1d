//! # IETF-VRF
//!
//! Implementation of the ECVRF scheme defined in [RFC-9381](https://datatracker.ietf.org/doc/rfc9381),
//! extended to support binding additional data to the proof.
//!
//! The extension specification is available at:
//! <https://github.com/davxy/bandersnatch-vrf-spec>
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! // Key generation
//! let secret = Secret::<MySuite>::from_seed(b"seed");
//! let public = secret.public();
//!
//! // Proving
//! use ark_vrf::ietf::Prover;
//! let input = Input::from(my_data);
//! let output = secret.output(input);
//! let proof = secret.prove(input, output, aux_data);
//!
//! // Verification
//! use ark_vrf::ietf::Verifier;
//! let result = public.verify(input, output, aux_data, &proof);
//! ```

use super::*;

pub trait IetfSuite: Suite {}

impl<T> IetfSuite for T where T: Suite {}

/// IETF VRF proof.
///
/// Schnorr-based proof of correctness for a VRF evaluation:
/// - `c`: Challenge scalar derived from public parameters
/// - `s`: Response scalar satisfying the verification equation
#[derive(Debug, Clone)]
pub struct Proof<S: IetfSuite> {
    pub c: ScalarField<S>,
    pub s: ScalarField<S>,
}

impl<S: IetfSuite> CanonicalSerialize for Proof<S> {
    fn serialize_with_mode<W: ark_serialize::Write>(
        &self,
        mut writer: W,
        compress: ark_serialize::Compress,
    ) -> Result<(), ark_serialize::SerializationError> {
        let c_buf = codec::scalar_encode::<S>(&self.c);
        if c_buf.len() < S::CHALLENGE_LEN {
            // Encoded scalar length must be at least S::CHALLENGE_LEN
            return Err(ark_serialize::SerializationError::NotEnoughSpace);
        }
        let buf = if S::Codec::ENDIANNESS.is_big() {
            &c_buf[c_buf.len() - S::CHALLENGE_LEN..]
        } else {
            &c_buf[..S::CHALLENGE_LEN]
        };
        writer.write_all(buf)?;
        self.s.serialize_with_mode(&mut writer, compress)?;
        Ok(())
    }

    fn serialized_size(&self, _compress_always: ark_serialize::Compress) -> usize {
        S::CHALLENGE_LEN + self.s.compressed_size()
    }
}

impl<S: IetfSuite> CanonicalDeserialize for Proof<S> {
    fn deserialize_with_mode<R: ark_serialize::Read>(
        mut reader: R,
        compress: ark_serialize::Compress,
        validate: ark_serialize::Validate,
    ) -> Result<Self, ark_serialize::SerializationError> {
        let mut c_buf = ark_std::vec![0; S::CHALLENGE_LEN];
        if reader.read_exact(&mut c_buf[..]).is_err() {
            return Err(ark_serialize::SerializationError::InvalidData);
        }
        let c = S::Codec::scalar_decode(&c_buf);
        let s = <ScalarField<S> as CanonicalDeserialize>::deserialize_with_mode(
            &mut reader,
            compress,
            validate,
        )?;
        Ok(Proof { c, s })
    }
}

impl<S: IetfSuite> ark_serialize::Valid for Proof<S> {
    fn check(&self) -> Result<(), ark_serialize::SerializationError> {
        self.c.check()?;
        self.s.check()?;
        Ok(())
    }
}

/// Trait for types that can generate VRF proofs.
///
/// Implementors can create cryptographic proofs that a VRF output
/// is correctly derived from an input using their secret key.
pub trait Prover<S: IetfSuite> {
    /// Generate a proof for the given input/output and additional data.
    ///
    /// Creates a non-interactive zero-knowledge proof binding the input, output,
    /// and additional data to the prover's public key.
    ///
    /// * `input` - VRF input point
    /// * `output` - VRF output point (γ = x·H)
    /// * `ad` - Additional data to bind to the proof
    fn prove(&self, input: Input<S>, output: Output<S>, ad: impl AsRef<[u8]>) -> Proof<S>;
}

/// Trait for entities that can verify VRF proofs.
///
/// Implementors can verify that a VRF output is correctly derived
/// from an input using a specific public key.
pub trait Verifier<S: IetfSuite> {
    /// Verify a proof for the given input/output and additional data.
    ///
    /// Verifies the cryptographic relationship between input, output, and proof
    /// under the verifier's public key.
    ///
    /// * `input` - VRF input point
    /// * `output` - Claimed VRF output point
    /// * `aux` - Additional data bound to the proof
    /// * `proof` - The proof to verify
    ///
    /// Returns `Ok(())` if verification succeeds, `Err(Error::VerificationFailure)` otherwise.
    fn verify(
        &self,
        input: Input<S>,
        output: Output<S>,
        aux: impl AsRef<[u8]>,
        proof: &Proof<S>,
    ) -> Result<(), Error>;
}

impl<S: IetfSuite> Prover<S> for Secret<S> {
    /// Implements the IETF VRF proving algorithm.
    ///
    /// This follows the procedure specified in RFC-9381 section 5.1, with extensions
    /// to support binding additional data to the proof:
    ///
    /// 1. Generate a deterministic nonce `k` based on the secret key and input
    /// 2. Compute nonce commitments `k_b` and `k_h`
    /// 3. Compute the challenge `c` using all public values, nonce commitments and the
    ///    additional data
    /// 4. Compute the response `s = k + c * secret`
    fn prove(&self, input: Input<S>, output: Output<S>, ad: impl AsRef<[u8]>) -> Proof<S> {
        let k = S::nonce(&self.scalar, input);

        let k_b = smul!(S::generator(), k).into_affine();
        let k_h = smul!(input.0, k).into_affine();

        let c = S::challenge(
            &[&self.public.0, &input.0, &output.0, &k_b, &k_h],
            ad.as_ref(),
        );
        let s = k + c * self.scalar;
        Proof { c, s }
    }
}

impl<S: IetfSuite> Verifier<S> for Public<S> {
    /// Implements the IETF VRF verification algorithm.
    ///
    /// This follows the procedure specified in RFC-9381 section 5.3, with extensions
    /// to support verifying additional data bound to the proof:
    ///
    /// 1. Compute `u = s*G - c*Y` where G is the generator and Y is the public key
    /// 2. Compute `v = s*H - c*O` where H is the input point and O is the output point
    /// 3. Recompute the expected challenge `c_exp` using all public values, `u`, `v` and
    ///    the additional data
    /// 4. Verify that `c_exp == c` from the proof
    fn verify(
        &self,
        input: Input<S>,
        output: Output<S>,
        aux: impl AsRef<[u8]>,
        proof: &Proof<S>,
    ) -> Result<(), Error> {
        let Proof { c, s } = proof;

        let s_b = S::generator() * s;
        let c_y = self.0 * c;
        let u = (s_b - c_y).into_affine();

        let s_h = input.0 * s;
        let c_o = output.0 * c;
        let v = (s_h - c_o).into_affine();

        let c_exp = S::challenge(&[&self.0, &input.0, &output.0, &u, &v], aux.as_ref());
        (&c_exp == c)
            .then_some(())
            .ok_or(Error::VerificationFailure)
    }
}
