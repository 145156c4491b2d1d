//! Fixed and witness column construction for the ring membership PIOP.
//!
//! Layout (spec section on the ring VRF column layout): fixed columns
//! `P_x`/`P_y` hold the ring's public keys followed by successive
//! power-of-two multiples of the Pedersen blinding base `h`, padded with
//! zero rows; the selector `s` is `1` over the ring part and `0` elsewhere.
//! The witness `b` one-hot-selects the prover's row in the ring part and
//! then carries the little-endian bits of the blinding scalar; `(accX,accY)`
//! walks a Twisted Edwards conditional-add accumulator seeded at a fixed
//! base point; `accIP` accumulates `b[i]*s[i]` and must land on `1`.

use super::domain::Domain;
use super::pcs::commitment::KzgCommitment;
use super::pcs::urs::URS;
use ark_ec::twisted_edwards::{Affine as TEAffine, TECurveConfig};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, One, PrimeField, Zero};
use ark_poly::univariate::DensePolynomial;
use ark_poly::Polynomial;
use ark_std::vec::Vec;

#[derive(Clone)]
pub struct Column<F: PrimeField> {
    pub evals: Vec<F>,
    pub poly: DensePolynomial<F>,
}

impl<F: PrimeField> Column<F> {
    pub fn from_evals(domain: &Domain<F>, evals: Vec<F>) -> Self {
        let poly = domain.interpolate(evals.clone());
        Self { evals, poly }
    }

    pub fn evaluate(&self, z: F) -> F {
        self.poly.evaluate(&z)
    }

    pub fn commit<E>(&self, srs: &URS<E>) -> KzgCommitment<E>
    where
        E: ark_ec::pairing::Pairing<ScalarField = F>,
    {
        super::pcs::kzg::KZG::<E>::commit(srs, &self.poly)
    }
}

#[derive(Clone)]
pub struct FixedColumns<F: PrimeField> {
    pub px: Column<F>,
    pub py: Column<F>,
    pub s: Column<F>,
}

#[derive(Clone)]
pub struct WitnessColumns<F: PrimeField> {
    pub b: Column<F>,
    pub acc_x: Column<F>,
    pub acc_y: Column<F>,
    pub acc_ip: Column<F>,
}

#[derive(Clone)]
pub struct PiopParams<F: PrimeField, C: TECurveConfig<BaseField = F>> {
    pub domain: Domain<F>,
    pub h: TEAffine<C>,
    pub seed: TEAffine<C>,
    pub padding_point: TEAffine<C>,
    pub scalar_bitlen: usize,
    pub keyset_part_size: usize,
}

impl<F: PrimeField, C: TECurveConfig<BaseField = F>> PiopParams<F, C> {
    pub fn setup(domain: Domain<F>, h: TEAffine<C>, seed: TEAffine<C>, padding_point: TEAffine<C>) -> Self {
        let scalar_bitlen = <C::ScalarField as PrimeField>::MODULUS_BIT_SIZE as usize;
        let keyset_part_size = domain
            .capacity
            .checked_sub(scalar_bitlen + 1)
            .expect("domain too small for the blinding scalar's bit length");
        Self {
            domain,
            h,
            seed,
            padding_point,
            scalar_bitlen,
            keyset_part_size,
        }
    }

    pub fn power_of_2_multiples_of_h(&self, count: usize) -> Vec<TEAffine<C>> {
        let mut out = Vec::with_capacity(count);
        let mut cur = self.h;
        for _ in 0..count {
            out.push(cur);
            cur = (cur + cur).into_affine();
        }
        out
    }

    pub fn fixed_columns(&self, keys: &[TEAffine<C>]) -> FixedColumns<F> {
        assert!(keys.len() <= self.keyset_part_size, "ring exceeds keyset capacity");
        let n = self.domain.size();
        let max_ring = self.keyset_part_size;
        let h_vec = self.power_of_2_multiples_of_h(n - 4 - max_ring);

        let mut px = Vec::with_capacity(n);
        let mut py = Vec::with_capacity(n);
        let mut s = ark_std::vec![F::zero(); n];

        for i in 0..max_ring {
            let p = keys.get(i).copied().unwrap_or(self.padding_point);
            px.push(p.x);
            py.push(p.y);
            s[i] = F::one();
        }
        for p in &h_vec {
            px.push(p.x);
            py.push(p.y);
        }
        for _ in 0..4 {
            px.push(F::zero());
            py.push(F::zero());
        }

        FixedColumns {
            px: Column::from_evals(&self.domain, px),
            py: Column::from_evals(&self.domain, py),
            s: Column::from_evals(&self.domain, s),
        }
    }

    pub fn scalar_bits_le(&self, e: C::ScalarField) -> Vec<bool> {
        e.into_bigint().to_bits_le().into_iter().take(self.scalar_bitlen).collect()
    }

    /// Builds the witness columns for proving membership of `fixed`'s row
    /// `key_index` in the ring, blinded by `blinding`. Returns the witness
    /// columns alongside the accumulator's final point,
    /// `SeedPoint + PK_key_index + blinding * h`.
    pub fn witness_columns(
        &self,
        fixed: &FixedColumns<F>,
        key_index: usize,
        blinding: C::ScalarField,
    ) -> (WitnessColumns<F>, TEAffine<C>) {
        let n = self.domain.size();
        let max_ring = self.keyset_part_size;
        assert!(key_index < max_ring);

        let mut b = ark_std::vec![F::zero(); n];
        b[key_index] = F::one();
        for (i, bit) in self.scalar_bits_le(blinding).into_iter().enumerate() {
            if bit {
                b[max_ring + i] = F::one();
            }
        }

        let h_vec = self.power_of_2_multiples_of_h(n - 4 - max_ring);
        let mut rows = Vec::with_capacity(n);
        for i in 0..max_ring {
            rows.push(TEAffine::<C>::new_unchecked(fixed.px.evals[i], fixed.py.evals[i]));
        }
        rows.extend(h_vec);
        while rows.len() < n {
            rows.push(TEAffine::<C>::zero());
        }

        let mut acc = self.seed;
        let mut acc_x = ark_std::vec![F::zero(); n];
        let mut acc_y = ark_std::vec![F::zero(); n];
        acc_x[0] = acc.x;
        acc_y[0] = acc.y;
        for i in 1..(n - 3) {
            if b[i - 1].is_one() {
                acc = (acc + rows[i - 1]).into_affine();
            }
            acc_x[i] = acc.x;
            acc_y[i] = acc.y;
        }
        for i in (n - 3)..n {
            acc_x[i] = acc.x;
            acc_y[i] = acc.y;
        }
        let result = acc;

        let mut acc_ip = ark_std::vec![F::zero(); n];
        let mut running = F::zero();
        for i in 1..n {
            running += b[i - 1] * fixed.s.evals[i - 1];
            acc_ip[i] = running;
        }

        let witness = WitnessColumns {
            b: Column::from_evals(&self.domain, b),
            acc_x: Column::from_evals(&self.domain, acc_x),
            acc_y: Column::from_evals(&self.domain, acc_y),
            acc_ip: Column::from_evals(&self.domain, acc_ip),
        };
        (witness, result)
    }
}
