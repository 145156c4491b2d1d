//! KZG polynomial commitment scheme over a pairing-friendly curve, per the
//! commit/open/verify/batch-verify contract used by the ring PIOP.

pub mod commitment {
    use ark_ec::pairing::Pairing;
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
    pub struct KzgCommitment<E: Pairing>(pub E::G1Affine);
}

pub mod urs {
    use super::commitment::KzgCommitment;
    use ark_ec::pairing::Pairing;
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError, Valid};
    use ark_std::vec::Vec;

    /// Universal reference string: powers of a trapdoor `tau` in `G1` (as
    /// many as the largest polynomial we ever commit to) and the two powers
    /// of `tau` in `G2` needed for the pairing-based opening check.
    #[derive(Clone, CanonicalSerialize, CanonicalDeserialize)]
    pub struct URS<E: Pairing> {
        pub powers_in_g1: Vec<E::G1Affine>,
        pub powers_in_g2: Vec<E::G2Affine>,
    }

    impl<E: Pairing> Valid for URS<E> {
        fn check(&self) -> Result<(), SerializationError> {
            self.powers_in_g1.check()?;
            self.powers_in_g2.check()
        }
    }

    /// The verifier-side slice of the URS: the two base points needed by the
    /// pairing equation, independent of the maximum committed degree.
    #[derive(Clone, Copy)]
    pub struct RawVerifierKey<E: Pairing> {
        pub g1: E::G1Affine,
        pub g2: E::G2Affine,
        pub tau_g2: E::G2Affine,
    }

    impl<E: Pairing> URS<E> {
        pub fn raw_vk(&self) -> RawVerifierKey<E> {
            RawVerifierKey {
                g1: self.powers_in_g1[0],
                g2: self.powers_in_g2[0],
                tau_g2: self.powers_in_g2[1],
            }
        }

        pub fn commit(&self, poly: &ark_poly::univariate::DensePolynomial<E::ScalarField>) -> KzgCommitment<E> {
            super::kzg::KZG::<E>::commit(self, poly)
        }
    }
}

pub mod kzg {
    use super::commitment::KzgCommitment;
    use super::urs::{RawVerifierKey, URS};
    use ark_ec::pairing::Pairing;
    use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
    use ark_ff::{PrimeField, UniformRand, Zero};
    use ark_poly::univariate::DensePolynomial;
    use ark_poly::Polynomial;
    use ark_std::rand::RngCore;
    use ark_std::vec::Vec;

    /// Marker type namespacing the KZG operations for a fixed pairing `E`.
    pub struct KZG<E: Pairing>(core::marker::PhantomData<E>);

    impl<E: Pairing> KZG<E> {
        /// Generates an insecure, in-process URS. Production deployments
        /// load a URS produced by a real trusted setup instead.
        pub fn setup(max_degree: usize, rng: &mut impl RngCore) -> URS<E> {
            let tau = E::ScalarField::rand(rng);
            let g1 = E::G1Affine::generator();
            let g2 = E::G2Affine::generator();
            let mut powers_in_g1 = Vec::with_capacity(max_degree + 1);
            let mut tau_pow = E::ScalarField::from(1u64);
            for _ in 0..=max_degree {
                powers_in_g1.push((g1 * tau_pow).into_affine());
                tau_pow *= tau;
            }
            let powers_in_g2 = ark_std::vec![g2, (g2 * tau).into_affine()];
            URS {
                powers_in_g1,
                powers_in_g2,
            }
        }

        /// `commit(f) = sum_i f_i * (tau^i * G1)`, computed as an MSM.
        pub fn commit(srs: &URS<E>, poly: &DensePolynomial<E::ScalarField>) -> KzgCommitment<E> {
            if poly.coeffs.is_empty() {
                return KzgCommitment(E::G1::zero().into_affine());
            }
            assert!(
                poly.coeffs.len() <= srs.powers_in_g1.len(),
                "polynomial degree exceeds the URS"
            );
            let bases = &srs.powers_in_g1[..poly.coeffs.len()];
            let result = <E::G1 as VariableBaseMSM>::msm_unchecked(bases, &poly.coeffs);
            KzgCommitment(result.into_affine())
        }

        /// Opens `poly` at `z`, returning the witness commitment `pi = commit((poly(X)-y)/(X-z))`
        /// and the evaluation `y = poly(z)`.
        pub fn open(
            srs: &URS<E>,
            poly: &DensePolynomial<E::ScalarField>,
            z: E::ScalarField,
        ) -> (KzgCommitment<E>, E::ScalarField) {
            let y = poly.evaluate(&z);
            let mut f = poly.coeffs.clone();
            if f.is_empty() {
                f.push(E::ScalarField::zero());
            }
            f[0] -= y;

            // Synthetic division of f(X) by (X - z): classic Horner-style
            // descent from the top coefficient.
            let n = f.len();
            let mut q = ark_std::vec![E::ScalarField::zero(); n - 1];
            let mut carry = E::ScalarField::zero();
            for i in (1..n).rev() {
                carry = f[i] + carry * z;
                q[i - 1] = carry;
            }
            let q_poly = DensePolynomial::from_coefficients_vec(q);
            (Self::commit(srs, &q_poly), y)
        }

        /// Pairing check `e(C - y*G1, G2) == e(pi, tau*G2 - z*G2)`.
        pub fn verify(
            vk: &RawVerifierKey<E>,
            commitment: &KzgCommitment<E>,
            z: E::ScalarField,
            y: E::ScalarField,
            proof: &KzgCommitment<E>,
        ) -> bool {
            let lhs = (commitment.0.into_group() - vk.g1.into_group() * y).into_affine();
            let rhs = (vk.tau_g2.into_group() - vk.g2.into_group() * z).into_affine();
            E::pairing(lhs, vk.g2) == E::pairing(proof.0, rhs)
        }

        /// Verifies a batch of (possibly distinct-point) openings with a
        /// single pairing product, combined via random linear coefficients.
        pub fn batch_verify(
            vk: &RawVerifierKey<E>,
            items: &[(KzgCommitment<E>, E::ScalarField, E::ScalarField, KzgCommitment<E>)],
            rng: &mut impl RngCore,
        ) -> bool {
            if items.is_empty() {
                return true;
            }
            let mut a = E::G1::zero();
            let mut b = E::G1::zero();
            for (c, z, y, pi) in items {
                let r = E::ScalarField::rand(rng);
                a += (c.0.into_group() - vk.g1.into_group() * y + pi.0.into_group() * z) * r;
                b += pi.0.into_group() * r;
            }
            E::pairing(a.into_affine(), vk.g2) == E::pairing(b.into_affine(), vk.tau_g2)
        }
    }
}
