//! Evaluation domains for the ring PIOP: the core domain of size `n` that
//! carries the column polynomials, and the radix-4 domain of size `4n` used
//! to evaluate degree-raising constraint products alias-free before the
//! division by the vanishing polynomial.

use ark_ff::FftField;
use ark_poly::univariate::DensePolynomial;
use ark_poly::{EvaluationDomain, Evaluations, Polynomial, Radix2EvaluationDomain};
use ark_std::vec::Vec;

#[derive(Clone)]
pub struct Domain<F: FftField> {
    pub domain: Radix2EvaluationDomain<F>,
    pub domain4x: Radix2EvaluationDomain<F>,
    /// Rows available to the fixed/witness columns before the last-4
    /// reserved rows (`n - 4` when `hiding` is set, `n` otherwise).
    pub capacity: usize,
}

impl<F: FftField> Domain<F> {
    pub fn new(min_size: usize, hiding: bool) -> Self {
        let n = min_size.next_power_of_two();
        let domain = Radix2EvaluationDomain::new(n)
            .expect("domain size not supported by the scalar field's two-adicity");
        let domain4x = Radix2EvaluationDomain::new(4 * n)
            .expect("radix-4 domain size not supported by the scalar field's two-adicity");
        let capacity = if hiding { n - 4 } else { n };
        Self {
            domain,
            domain4x,
            capacity,
        }
    }

    pub fn size(&self) -> usize {
        self.domain.size()
    }

    pub fn omega(&self) -> F {
        self.domain.group_gen
    }

    pub fn interpolate(&self, evals: Vec<F>) -> DensePolynomial<F> {
        Evaluations::from_vec_and_domain(evals, self.domain).interpolate()
    }

    /// Evaluates `poly` at every point of the radix-4 domain.
    pub fn evaluate4x(&self, poly: &DensePolynomial<F>) -> Vec<F> {
        poly.evaluate_over_domain_by_ref(self.domain4x).evals
    }

    pub fn elements4x(&self) -> Vec<F> {
        self.domain4x.elements().collect()
    }

    pub fn vanishing_at(&self, z: F) -> F {
        self.domain.evaluate_vanishing_polynomial(z)
    }

    /// Closed-form evaluation of the `index`-th Lagrange basis polynomial of
    /// the core domain at `z`: `L_index(z) = (omega^index / n) * (z^n - 1) / (z - omega^index)`.
    pub fn lagrange_basis_eval(&self, index: usize, z: F) -> F {
        let n_f = F::from(self.domain.size() as u64);
        let omega_i = self.omega().pow([index as u64]);
        let denom = n_f * (z - omega_i);
        if denom.is_zero() {
            return F::one();
        }
        self.vanishing_at(z) * omega_i * denom.inverse().expect("checked non-zero above")
    }

    /// Interpolates the `index`-th unit vector and evaluates it over the
    /// radix-4 domain, i.e. the Lagrange basis polynomial in evaluation form.
    pub fn lagrange_basis4x(&self, index: usize) -> Vec<F> {
        let n = self.size();
        let mut unit = ark_std::vec![F::zero(); n];
        unit[index] = F::one();
        self.evaluate4x(&self.interpolate(unit))
    }
}
