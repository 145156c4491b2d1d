//! Ring proof verification: recomputes the transcript challenges, checks
//! the aggregated-constraint identity in the field, then checks the two
//! KZG openings that bind the claimed evaluations to the committed columns.

use super::constraints::{self, RowValues};
use super::index::VerifierKey;
use super::pcs::commitment::KzgCommitment;
use super::pcs::kzg::KZG;
use super::pcs::urs::RawVerifierKey;
use super::piop::PiopParams;
use super::transcript::ArkTranscript;
use super::RingProof;
use ark_ec::pairing::Pairing;
use ark_ec::twisted_edwards::{Affine as TEAffine, TECurveConfig};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_serialize::CanonicalSerialize;
use ark_std::rand::SeedableRng;
use ark_std::vec::Vec;
use rand_chacha::ChaCha20Rng;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;

struct ReplayedChallenges<F: PrimeField> {
    alphas: [F; 7],
    zeta: F,
    nus: [F; 8],
    omega_n4: F,
    k2: F,
    k3: F,
}

fn replay<F, E, C>(
    verifier_key: &VerifierKey<F, E>,
    piop_params: &PiopParams<F, C>,
    transcript: &ArkTranscript,
    proof: &RingProof<F, E>,
    instance: &TEAffine<C>,
) -> ReplayedChallenges<F>
where
    F: PrimeField,
    E: Pairing<ScalarField = F>,
    C: TECurveConfig<BaseField = F>,
{
    let n = piop_params.domain.size();
    let omega = piop_params.domain.omega();
    let omega_n4 = omega.pow([(n - 4) as u64]);

    let mut transcript = transcript.clone();
    transcript.append_point(b"vk", &verifier_key.committed.px);
    transcript.append_point(b"vk", &verifier_key.committed.py);
    transcript.append_point(b"vk", &verifier_key.committed.s);
    transcript.append_point(b"instance", instance);
    transcript.append_point(b"committed_cols", &proof.c_bits);
    transcript.append_point(b"committed_cols", &proof.c_acc_x);
    transcript.append_point(b"committed_cols", &proof.c_acc_y);
    transcript.append_point(b"committed_cols", &proof.c_acc_ip);

    let mut alphas = [F::zero(); 7];
    for alpha in alphas.iter_mut() {
        *alpha = transcript.challenge_scalar(b"constraints_aggregation");
    }

    transcript.append_point(b"quotient", &proof.c_quotient);
    let zeta: F = transcript.challenge_scalar(b"evaluation_point");

    for v in [
        proof.px_zeta,
        proof.py_zeta,
        proof.s_zeta,
        proof.b_zeta,
        proof.acc_ip_zeta,
        proof.acc_x_zeta,
        proof.acc_y_zeta,
        proof.q_zeta,
    ] {
        transcript.append_scalar(b"register_evaluations", &v);
    }
    transcript.append_scalar(b"shifted_linearization_evaluation", &proof.lin_zeta_omega);

    let mut nus = [F::zero(); 8];
    for nu in nus.iter_mut() {
        *nu = transcript.challenge_scalar(b"kzg_aggregation");
    }

    let zeta_row = RowValues {
        px: proof.px_zeta,
        py: proof.py_zeta,
        s: proof.s_zeta,
        b: proof.b_zeta,
        acc_ip: proof.acc_ip_zeta,
        acc_x: proof.acc_x_zeta,
        acc_y: proof.acc_y_zeta,
    };
    let k2 = constraints::k2(&zeta_row, C::COEFF_A);
    let k3 = constraints::k3(&zeta_row);

    ReplayedChallenges {
        alphas,
        zeta,
        nus,
        omega_n4,
        k2,
        k3,
    }
}

/// The two KZG-openable items a fully-checked ring proof reduces to: the
/// batched register-and-quotient opening at `zeta`, and the linearization
/// opening at `zeta * omega`.
pub struct PreparedBatchItem<E: Pairing, C: TECurveConfig<BaseField = E::ScalarField>> {
    agg_commitment: KzgCommitment<E>,
    agg_point: E::ScalarField,
    agg_value: E::ScalarField,
    agg_proof: KzgCommitment<E>,
    lin_commitment: KzgCommitment<E>,
    lin_point: E::ScalarField,
    lin_value: E::ScalarField,
    lin_proof: KzgCommitment<E>,
    field_check_passed: bool,
    _marker: core::marker::PhantomData<C>,
}

pub struct RingVerifier<F: PrimeField, E: Pairing<ScalarField = F>, C: TECurveConfig<BaseField = F>> {
    verifier_key: VerifierKey<F, E>,
    piop_params: PiopParams<F, C>,
    transcript: ArkTranscript,
}

impl<F: PrimeField, E: Pairing<ScalarField = F>, C: TECurveConfig<BaseField = F>> RingVerifier<F, E, C> {
    pub fn init(verifier_key: VerifierKey<F, E>, piop_params: PiopParams<F, C>, transcript: ArkTranscript) -> Self {
        Self {
            verifier_key,
            piop_params,
            transcript,
        }
    }

    pub fn verify(&self, proof: RingProof<F, E>, key_commitment: TEAffine<C>) -> bool {
        let item = self.prepare_item(&proof, key_commitment);
        if !item.field_check_passed {
            return false;
        }
        KZG::<E>::verify(&self.verifier_key.vk, &item.agg_commitment, item.agg_point, item.agg_value, &item.agg_proof)
            && KZG::<E>::verify(&self.verifier_key.vk, &item.lin_commitment, item.lin_point, item.lin_value, &item.lin_proof)
    }

    pub fn kzg_batch_verifier(&self) -> KzgBatchVerifier<E, C, ArkTranscript> {
        KzgBatchVerifier::new(
            self.verifier_key.vk,
            self.piop_params.clone(),
            self.verifier_key.commitment(),
            self.transcript.clone(),
        )
    }

    fn prepare_item(&self, proof: &RingProof<F, E>, key_commitment: TEAffine<C>) -> PreparedBatchItem<E, C> {
        prepare_item_inner(
            &self.verifier_key.vk,
            &self.piop_params,
            &self.verifier_key.commitment(),
            &self.transcript,
            proof,
            key_commitment,
        )
    }
}

fn prepare_item_inner<F, E, C>(
    vk: &RawVerifierKey<E>,
    piop_params: &PiopParams<F, C>,
    committed: &super::index::FixedColumnsCommitted<F, KzgCommitment<E>>,
    transcript: &ArkTranscript,
    proof: &RingProof<F, E>,
    key_commitment: TEAffine<C>,
) -> PreparedBatchItem<E, C>
where
    F: PrimeField,
    E: Pairing<ScalarField = F>,
    C: TECurveConfig<BaseField = F>,
{
    let result = (piop_params.seed.into_group() + key_commitment.into_group()).into_affine();

    let verifier_key = VerifierKey {
        vk: *vk,
        committed: committed.clone(),
    };
    let replayed = replay(&verifier_key, piop_params, transcript, proof, &result);
    let ReplayedChallenges {
        alphas,
        zeta,
        nus,
        omega_n4,
        k2,
        k3,
    } = replayed;

    let n = piop_params.domain.size();
    let omega = piop_params.domain.omega();
    let not_last4_zeta = zeta - omega_n4;
    let l0 = piop_params.domain.lagrange_basis_eval(0, zeta);
    let l_last = piop_params.domain.lagrange_basis_eval(n - 4, zeta);

    let zeta_row = RowValues {
        px: proof.px_zeta,
        py: proof.py_zeta,
        s: proof.s_zeta,
        b: proof.b_zeta,
        acc_ip: proof.acc_ip_zeta,
        acc_x: proof.acc_x_zeta,
        acc_y: proof.acc_y_zeta,
    };
    let const2 = constraints::const2(&zeta_row);
    let const3 = constraints::const3(&zeta_row);
    let c4 = constraints::c4(&zeta_row);
    let c5 = constraints::c5(&zeta_row, piop_params.seed.x, result.x, l0, l_last);
    let c6 = constraints::c6(&zeta_row, piop_params.seed.y, result.y, l0, l_last);
    let c7 = constraints::c7(&zeta_row, l0, l_last);

    let shifted_part = proof.lin_zeta_omega
        - not_last4_zeta
            * (alphas[0] * (proof.acc_ip_zeta + proof.b_zeta * proof.s_zeta) + alphas[1] * const2 + alphas[2] * const3);
    let agg_zeta = shifted_part + alphas[3] * c4 + alphas[4] * c5 + alphas[5] * c6 + alphas[6] * c7;

    let z_h_zeta = piop_params.domain.vanishing_at(zeta);
    let m_zeta = (zeta - omega.pow([(n - 1) as u64]))
        * (zeta - omega.pow([(n - 2) as u64]))
        * (zeta - omega.pow([(n - 3) as u64]));

    let field_check_passed = agg_zeta * m_zeta == z_h_zeta * proof.q_zeta;

    let agg_value = nus[0] * proof.px_zeta
        + nus[1] * proof.py_zeta
        + nus[2] * proof.s_zeta
        + nus[3] * proof.b_zeta
        + nus[4] * proof.acc_ip_zeta
        + nus[5] * proof.acc_x_zeta
        + nus[6] * proof.acc_y_zeta
        + nus[7] * proof.q_zeta;
    let agg_bases = [
        committed.px.0,
        committed.py.0,
        committed.s.0,
        proof.c_bits.0,
        proof.c_acc_ip.0,
        proof.c_acc_x.0,
        proof.c_acc_y.0,
        proof.c_quotient.0,
    ];
    let agg_commitment = KzgCommitment(<E::G1 as VariableBaseMSM>::msm_unchecked(&agg_bases, &nus).into_affine());

    let lin_bases = [proof.c_acc_ip.0, proof.c_acc_x.0, proof.c_acc_y.0];
    let lin_scalars = [
        alphas[0] * not_last4_zeta,
        alphas[1] * k2 * not_last4_zeta,
        alphas[2] * k3 * not_last4_zeta,
    ];
    let lin_commitment =
        KzgCommitment(<E::G1 as VariableBaseMSM>::msm_unchecked(&lin_bases, &lin_scalars).into_affine());

    PreparedBatchItem {
        agg_commitment,
        agg_point: zeta,
        agg_value,
        agg_proof: proof.agg_proof,
        lin_commitment,
        lin_point: zeta * omega,
        lin_value: proof.lin_zeta_omega,
        lin_proof: proof.lin_proof,
        field_check_passed,
        _marker: core::marker::PhantomData,
    }
}

/// Accumulates prepared items from many ring proofs and checks all of
/// their KZG openings with a single batched pairing computation.
pub struct KzgBatchVerifier<E: Pairing, C: TECurveConfig<BaseField = E::ScalarField>, T> {
    vk: RawVerifierKey<E>,
    piop_params: PiopParams<E::ScalarField, C>,
    committed: super::index::FixedColumnsCommitted<E::ScalarField, KzgCommitment<E>>,
    transcript: ArkTranscript,
    items: Vec<PreparedBatchItem<E, C>>,
    _marker: core::marker::PhantomData<T>,
}

impl<E, C, T> KzgBatchVerifier<E, C, T>
where
    E: Pairing,
    C: TECurveConfig<BaseField = E::ScalarField>,
{
    pub fn new(
        vk: RawVerifierKey<E>,
        piop_params: PiopParams<E::ScalarField, C>,
        committed: super::index::FixedColumnsCommitted<E::ScalarField, KzgCommitment<E>>,
        transcript: ArkTranscript,
    ) -> Self {
        Self {
            vk,
            piop_params,
            committed,
            transcript,
            items: Vec::new(),
            _marker: core::marker::PhantomData,
        }
    }

    pub fn prepare(&self, proof: RingProof<E::ScalarField, E>, key_commitment: TEAffine<C>) -> PreparedBatchItem<E, C> {
        prepare_item_inner(&self.vk, &self.piop_params, &self.committed, &self.transcript, &proof, key_commitment)
    }

    pub fn push_prepared(&mut self, item: PreparedBatchItem<E, C>) {
        self.items.push(item);
    }

    pub fn verify(&self) -> bool {
        if self.items.is_empty() {
            return true;
        }
        if self.items.iter().any(|item| !item.field_check_passed) {
            return false;
        }
        let mut seed_hasher = Shake128::default();
        for item in &self.items {
            let mut buf = Vec::new();
            item.agg_commitment.serialize_uncompressed(&mut buf).ok();
            seed_hasher.update(&buf);
        }
        let mut seed = [0u8; 32];
        seed_hasher.finalize_xof().read(&mut seed);
        let mut rng = ChaCha20Rng::from_seed(seed);

        let mut list = Vec::with_capacity(self.items.len() * 2);
        for item in &self.items {
            list.push((item.agg_commitment, item.agg_point, item.agg_value, item.agg_proof));
            list.push((item.lin_commitment, item.lin_point, item.lin_value, item.lin_proof));
        }
        KZG::<E>::batch_verify(&self.vk, &list, &mut rng)
    }
}
