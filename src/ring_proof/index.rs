//! Indexing: commits the fixed columns once per ring, producing the
//! prover key (which also keeps the column polynomials around) and the
//! verifier key (which keeps only the commitments and the raw KZG
//! verifier parameters).

use super::pcs::commitment::KzgCommitment;
use super::pcs::urs::{RawVerifierKey, URS};
use super::piop::{FixedColumns, PiopParams};
use ark_ec::pairing::Pairing;
use ark_ec::twisted_edwards::{Affine as TEAffine, TECurveConfig};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;

#[derive(Clone, CanonicalSerialize, CanonicalDeserialize, PartialEq, Eq)]
pub struct FixedColumnsCommitted<F: PrimeField, C> {
    pub px: C,
    pub py: C,
    pub s: C,
    #[doc(hidden)]
    pub _marker: core::marker::PhantomData<F>,
}

#[derive(Clone)]
pub struct ProverKey<F: PrimeField, E: Pairing<ScalarField = F>, C: TECurveConfig<BaseField = F>> {
    pub srs: URS<E>,
    pub fixed_columns: FixedColumns<F>,
    pub committed: FixedColumnsCommitted<F, KzgCommitment<E>>,
    pub keys: Vec<TEAffine<C>>,
}

/// Verifier key. Deliberately not `Clone`: callers that need to hand out
/// multiple verifiers reconstruct it from `commitment()` plus the raw KZG
/// verifier parameters via `from_commitment_and_kzg_vk`, mirroring how the
/// outer `RingProofParams` re-derives its PIOP parameters on deserialize
/// instead of storing them twice.
pub struct VerifierKey<F: PrimeField, E: Pairing<ScalarField = F>> {
    pub vk: RawVerifierKey<E>,
    pub committed: FixedColumnsCommitted<F, KzgCommitment<E>>,
}

impl<F: PrimeField, E: Pairing<ScalarField = F>> VerifierKey<F, E> {
    pub fn commitment(&self) -> FixedColumnsCommitted<F, KzgCommitment<E>> {
        self.committed.clone()
    }

    pub fn from_commitment_and_kzg_vk(
        committed: FixedColumnsCommitted<F, KzgCommitment<E>>,
        vk: RawVerifierKey<E>,
    ) -> Self {
        Self { vk, committed }
    }
}

pub fn index<F, E, C>(
    pcs: &URS<E>,
    piop: &PiopParams<F, C>,
    keys: &[TEAffine<C>],
) -> (ProverKey<F, E, C>, VerifierKey<F, E>)
where
    F: PrimeField,
    E: Pairing<ScalarField = F>,
    C: TECurveConfig<BaseField = F>,
{
    let fixed_columns = piop.fixed_columns(keys);
    let committed = FixedColumnsCommitted {
        px: fixed_columns.px.commit(pcs),
        py: fixed_columns.py.commit(pcs),
        s: fixed_columns.s.commit(pcs),
        _marker: core::marker::PhantomData,
    };
    let prover_key = ProverKey {
        srs: pcs.clone(),
        fixed_columns,
        committed: committed.clone(),
        keys: keys.to_vec(),
    };
    let verifier_key = VerifierKey {
        vk: pcs.raw_vk(),
        committed,
    };
    (prover_key, verifier_key)
}
