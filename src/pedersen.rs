//! # Pedersen-VRF
//!
//! Implementation of a key-hiding VRF scheme using Pedersen commitments as described in
//! [BCHSV23](https://eprint.iacr.org/2023/002).
//!
//! This scheme extends the IETF VRF by adding key privacy through blinding factors,
//! allowing verification without revealing which specific public key was used.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! // Key generation
//! let secret = Secret::<MySuite>::from_seed(b"seed");
//! let public = secret.public();
//!
//! // Proving
//! use ark_vrf::pedersen::Prover;
//! let input = Input::from(my_data);
//! let output = secret.output(input);
//! let (proof, blinding) = secret.prove(input, output, aux_data);
//!
//! // Verification
//! use ark_vrf::pedersen::Verifier;
//! let result = Public::verify(input, output, aux_data, &proof);
//!
//! // Verify the proof was created using a specific public key
//! // This requires knowledge of the blinding factor
//! let expected_commitment = (public.0 + MySuite::BLINDING_BASE * blinding).into_affine();
//! assert_eq!(proof.key_commitment(), expected_commitment);
//! ```

use crate::ietf::IetfSuite;
use crate::*;
use ark_ec::VariableBaseMSM;

/// Magic spell for [`PedersenSuite::BLINDING_BASE`] generation in built-in implementations.
///
/// (en) *"the blinding foundation of hidden light which eludes the mind and creates darkness for those who see"*
pub const PEDERSEN_BASE_SEED: &[u8] =
    b"basis caecans lucis occultae quae mentem fugit et tenebras iis qui vident creat";

pub trait PedersenSuite: IetfSuite {
    /// Blinding base.
    const BLINDING_BASE: AffinePoint<Self>;

    /// Pedersen blinding factor.
    ///
    /// Default implementation is deterministic and loosely inspired by the RFC-9381
    /// challenge procedure. All parameters but `secret` are public.
    fn blinding(
        secret: &ScalarField<Self>,
        input: &AffinePoint<Self>,
        aux: &[u8],
    ) -> ScalarField<Self> {
        const DOM_SEP_START: u8 = 0xCC;
        const DOM_SEP_END: u8 = 0x00;
        let mut buf = [Self::SUITE_ID, &[DOM_SEP_START]].concat();
        Self::Codec::scalar_encode_into(secret, &mut buf);
        Self::Codec::point_encode_into(input, &mut buf);
        buf.extend_from_slice(aux);
        buf.push(DOM_SEP_END);
        let hash = &utils::hash::<Self::Hasher>(&buf);
        ScalarField::<Self>::from_be_bytes_mod_order(hash)
    }
}

/// Pedersen VRF proof.
///
/// Zero-knowledge proof with key-hiding properties:
/// - `pk_com`: Commitment to the public key (Y_b = x·G + b·B)
/// - `r`: Nonce commitment for the generator (R = k·G + k_b·B)
/// - `ok`: Nonce commitment for the input point (O_k = k·I)
/// - `s`: Response scalar for the secret key
/// - `sb`: Response scalar for the blinding factor
#[derive(Debug, Clone, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof<S: PedersenSuite> {
    pk_com: AffinePoint<S>,
    r: AffinePoint<S>,
    ok: AffinePoint<S>,
    s: ScalarField<S>,
    sb: ScalarField<S>,
}

impl<S: PedersenSuite> Proof<S> {
    /// Get public key commitment from proof.
    pub fn key_commitment(&self) -> AffinePoint<S> {
        self.pk_com
    }
}

/// Trait for types that can generate Pedersen VRF proofs.
///
/// Implementors can create zero-knowledge proofs that a VRF output
/// is correctly derived from an input using their secret key,
/// while hiding the specific public key used.
pub trait Prover<S: PedersenSuite> {
    /// Generate a proof for the given input/output and additional data.
    ///
    /// Creates a zero-knowledge proof binding the input, output, and additional data
    /// to a commitment of the prover's public key rather than the key itself.
    ///
    /// * `input` - VRF input point
    /// * `output` - VRF output point (γ = x·H)
    /// * `ad` - Additional data to bind to the proof
    ///
    /// Returns the proof together with the associated blinding factor.
    fn prove(
        &self,
        input: Input<S>,
        output: Output<S>,
        ad: impl AsRef<[u8]>,
    ) -> (Proof<S>, ScalarField<S>);
}

/// Trait for entities that can verify Pedersen VRF proofs.
///
/// Implementors can verify that a VRF output is correctly derived
/// from an input using a committed public key.
pub trait Verifier<S: PedersenSuite> {
    /// Verify a proof for the given input/output and additional data.
    ///
    /// Verifies the cryptographic relationship between input, output, and proof
    /// without requiring knowledge of which specific public key was used.
    /// Confirms that the secret key used to generate the output is the same as
    /// the one committed to in the proof.
    ///
    /// * `input` - VRF input point
    /// * `output` - Claimed VRF output point
    /// * `ad` - Additional data bound to the proof
    /// * `proof` - The proof to verify
    ///
    /// Returns `Ok(())` if verification succeeds, `Err(Error::VerificationFailure)` otherwise.
    fn verify(
        input: Input<S>,
        output: Output<S>,
        ad: impl AsRef<[u8]>,
        proof: &Proof<S>,
    ) -> Result<(), Error>;
}

impl<S: PedersenSuite> Prover<S> for Secret<S> {
    fn prove(
        &self,
        input: Input<S>,
        output: Output<S>,
        ad: impl AsRef<[u8]>,
    ) -> (Proof<S>, ScalarField<S>) {
        // Build blinding factor
        let blinding = S::blinding(&self.scalar, &input.0, ad.as_ref());

        // Construct the nonces
        let k = S::nonce(&self.scalar, input);
        let kb = S::nonce(&blinding, input);

        // Yb = x*G + b*B
        let xg = smul!(S::generator(), self.scalar);
        let bb = smul!(S::BLINDING_BASE, blinding);
        let pk_com = (xg + bb).into_affine();

        // R = k*G + kb*B
        let kg = smul!(S::generator(), k);
        let kbb = smul!(S::BLINDING_BASE, kb);
        let r = (kg + kbb).into_affine();

        // Ok = k*I
        let ok = smul!(input.0, k).into_affine();

        // c = Hash(Yb, I, O, R, Ok, ad)
        let c = S::challenge(&[&pk_com, &input.0, &output.0, &r, &ok], ad.as_ref());

        // s = k + c*x
        let s = k + c * self.scalar;
        // sb = kb + c*b
        let sb = kb + c * blinding;

        let proof = Proof {
            pk_com,
            r,
            ok,
            s,
            sb,
        };
        (proof, blinding)
    }
}

/// Pre-processed data for a single Pedersen VRF proof awaiting batch verification.
pub struct BatchItem<S: PedersenSuite> {
    input: AffinePoint<S>,
    output: AffinePoint<S>,
    pk_com: AffinePoint<S>,
    r: AffinePoint<S>,
    ok: AffinePoint<S>,
    c: ScalarField<S>,
    s: ScalarField<S>,
    sb: ScalarField<S>,
}

/// Batch verifier for Pedersen VRF proofs.
///
/// Collects multiple proofs and verifies both of their equations together
/// via a single multi-scalar multiplication.
pub struct BatchVerifier<S: PedersenSuite> {
    items: Vec<BatchItem<S>>,
}

impl<S: PedersenSuite> Default for BatchVerifier<S> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<S: PedersenSuite> BatchVerifier<S> {
    /// Create a new empty batch verifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare a proof for batch verification.
    ///
    /// Recomputes the challenge. This is cheap (hashes, no scalar
    /// multiplications on secret data) and can be done in parallel.
    pub fn prepare(
        input: Input<S>,
        output: Output<S>,
        ad: impl AsRef<[u8]>,
        proof: &Proof<S>,
    ) -> BatchItem<S> {
        let c = S::challenge(
            &[&proof.pk_com, &input.0, &output.0, &proof.r, &proof.ok],
            ad.as_ref(),
        );
        BatchItem {
            input: input.0,
            output: output.0,
            pk_com: proof.pk_com,
            r: proof.r,
            ok: proof.ok,
            c,
            s: proof.s,
            sb: proof.sb,
        }
    }

    /// Push a previously prepared entry into the batch.
    pub fn push_prepared(&mut self, entry: BatchItem<S>) {
        self.items.push(entry);
    }

    /// Prepare and push a proof in one step.
    pub fn push(
        &mut self,
        input: Input<S>,
        output: Output<S>,
        ad: impl AsRef<[u8]>,
        proof: &Proof<S>,
    ) {
        let entry = Self::prepare(input, output, ad, proof);
        self.push_prepared(entry);
    }

    /// Batch-verify all collected proofs using a single multi-scalar multiplication.
    ///
    /// For each proof i the two verification equations are:
    ///   Ok_i + c_i*O_i - s_i*I_i == 0
    ///   R_i + c_i*Yb_i - s_i*G - sb_i*B == 0
    ///
    /// With independent random weights w_i, v_i per proof the combined check
    /// becomes a single MSM:
    ///   sum_i w_i*(Ok_i + c_i*O_i - s_i*I_i) + v_i*(R_i + c_i*Yb_i - s_i*G - sb_i*B) == 0
    ///
    /// Returns `Ok(())` if all proofs verify, `Err(VerificationFailure)` otherwise.
    pub fn verify(&self) -> Result<(), Error> {
        use ark_std::rand::{RngCore, SeedableRng};

        let items = &self.items;
        if items.is_empty() {
            return Ok(());
        }
        let n = items.len();

        // Deterministic RNG seeded from all (c, s, sb) triples.
        let mut hasher = S::Hasher::new();
        let mut buf = Vec::with_capacity(3 * S::Codec::SCALAR_ENCODED_LEN);
        for e in items {
            buf.clear();
            S::Codec::scalar_encode_into(&e.c, &mut buf);
            S::Codec::scalar_encode_into(&e.s, &mut buf);
            S::Codec::scalar_encode_into(&e.sb, &mut buf);
            hasher.update(&buf);
        }
        let hash = hasher.finalize();
        let mut seed = [0u8; 32];
        let copy_len = hash.len().min(32);
        seed[..copy_len].copy_from_slice(&hash[..copy_len]);
        let mut rng = rand_chacha::ChaCha20Rng::from_seed(seed);

        // 128-bit random weights for Schwartz-Zippel soundness.
        let mut next_weight = |rng: &mut rand_chacha::ChaCha20Rng| {
            let mut buf = [0u8; 16];
            rng.fill_bytes(&mut buf);
            ScalarField::<S>::from_le_bytes_mod_order(&buf)
        };

        let mut bases = Vec::with_capacity(5 * n + 2);
        let mut scalars = Vec::with_capacity(5 * n + 2);
        let mut g_scalar = ScalarField::<S>::zero();
        let mut b_scalar = ScalarField::<S>::zero();

        for e in items.iter() {
            let w = next_weight(&mut rng);
            let v = next_weight(&mut rng);

            bases.push(e.ok);
            scalars.push(w);
            bases.push(e.output);
            scalars.push(w * e.c);
            bases.push(e.input);
            scalars.push(-(w * e.s));

            bases.push(e.r);
            scalars.push(v);
            bases.push(e.pk_com);
            scalars.push(v * e.c);
            g_scalar -= v * e.s;
            b_scalar -= v * e.sb;
        }

        bases.push(S::generator());
        scalars.push(g_scalar);
        bases.push(S::BLINDING_BASE);
        scalars.push(b_scalar);

        let result = <S::Affine as AffineRepr>::Group::msm_unchecked(&bases, &scalars);
        if !result.is_zero() {
            return Err(Error::VerificationFailure);
        }

        Ok(())
    }
}

impl<S: PedersenSuite> Verifier<S> for Public<S> {
    fn verify(
        input: Input<S>,
        output: Output<S>,
        ad: impl AsRef<[u8]>,
        proof: &Proof<S>,
    ) -> Result<(), Error> {
        let Proof {
            pk_com,
            r,
            ok,
            s,
            sb,
        } = proof;

        // c = Hash(Yb, I, O, R, Ok, ad)
        let c = S::challenge(&[pk_com, &input.0, &output.0, r, ok], ad.as_ref());

        // Ok + c*O = s*I
        if output.0 * c + ok != input.0 * s {
            return Err(Error::VerificationFailure);
        }

        // R + c*Yb = s*G + sb*B
        if *pk_com * c + r != S::generator() * s + S::BLINDING_BASE * sb {
            return Err(Error::VerificationFailure);
        }

        Ok(())
    }
}
