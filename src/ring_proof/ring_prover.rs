//! Ring proof generation: builds the witness columns, aggregates the seven
//! constraints into a single quotient via the vanishing-polynomial folding
//! trick, and produces the two batched KZG openings the verifier checks.

use super::constraints::{self, RowValues};
use super::index::ProverKey;
use super::pcs::kzg::KZG;
use super::piop::PiopParams;
use super::transcript::ArkTranscript;
use super::RingProof;
use ark_ec::pairing::Pairing;
use ark_ec::twisted_edwards::TECurveConfig;
use ark_ff::{Field, One, PrimeField, Zero};
use ark_poly::univariate::DensePolynomial;
use ark_poly::Polynomial;
use ark_std::vec::Vec;

fn scale<F: PrimeField>(p: &DensePolynomial<F>, s: F) -> DensePolynomial<F> {
    DensePolynomial::from_coefficients_vec(p.coeffs.iter().map(|c| *c * s).collect())
}

fn sum_polys<F: PrimeField>(polys: &[DensePolynomial<F>]) -> DensePolynomial<F> {
    let max_len = polys.iter().map(|p| p.coeffs.len()).max().unwrap_or(0);
    let mut out = ark_std::vec![F::zero(); max_len];
    for p in polys {
        for (i, c) in p.coeffs.iter().enumerate() {
            out[i] += *c;
        }
    }
    DensePolynomial::from_coefficients_vec(out)
}

/// Exact division of a polynomial known to vanish on the core domain by
/// `Z_H(X) = X^n - 1`: folding coefficients in blocks of `n`, from the
/// highest block down.
fn divide_by_vanishing<F: PrimeField>(coeffs: &[F], n: usize) -> Vec<F> {
    if coeffs.is_empty() {
        return Vec::new();
    }
    let num_blocks = coeffs.len().div_ceil(n);
    if num_blocks <= 1 {
        return Vec::new();
    }
    let blocks: Vec<Vec<F>> = (0..num_blocks)
        .map(|j| {
            let start = j * n;
            let end = (start + n).min(coeffs.len());
            let mut block = coeffs[start..end].to_vec();
            block.resize(n, F::zero());
            block
        })
        .collect();

    let mut q_blocks: Vec<Vec<F>> = Vec::with_capacity(num_blocks - 1);
    let mut prev = ark_std::vec![F::zero(); n];
    for block in blocks.iter().take(num_blocks - 1) {
        let mut cur = ark_std::vec![F::zero(); n];
        for k in 0..n {
            cur[k] = prev[k] - block[k];
        }
        q_blocks.push(cur.clone());
        prev = cur;
    }

    let mut out = Vec::with_capacity(q_blocks.len() * n);
    for block in q_blocks {
        out.extend(block);
    }
    while out.last() == Some(&F::zero()) {
        out.pop();
    }
    out
}

pub struct RingProver<F: PrimeField, E: Pairing<ScalarField = F>, C: TECurveConfig<BaseField = F>> {
    prover_key: ProverKey<F, E, C>,
    piop_params: PiopParams<F, C>,
    key_index: usize,
    transcript: ArkTranscript,
}

impl<F: PrimeField, E: Pairing<ScalarField = F>, C: TECurveConfig<BaseField = F>> RingProver<F, E, C> {
    pub fn init(
        prover_key: ProverKey<F, E, C>,
        piop_params: PiopParams<F, C>,
        key_index: usize,
        transcript: ArkTranscript,
    ) -> Self {
        Self {
            prover_key,
            piop_params,
            key_index,
            transcript,
        }
    }

    pub fn prove(&self, secret_blinding: C::ScalarField) -> RingProof<F, E> {
        let domain = &self.piop_params.domain;
        let n = domain.size();
        let omega = domain.omega();
        let a_coeff = C::COEFF_A;

        let (witness, result) =
            self.piop_params
                .witness_columns(&self.prover_key.fixed_columns, self.key_index, secret_blinding);

        let c_bits = witness.b.commit::<E>(&self.prover_key.srs);
        let c_acc_x = witness.acc_x.commit::<E>(&self.prover_key.srs);
        let c_acc_y = witness.acc_y.commit::<E>(&self.prover_key.srs);
        let c_acc_ip = witness.acc_ip.commit::<E>(&self.prover_key.srs);

        let mut transcript = self.transcript.clone();
        transcript.append_point(b"vk", &self.prover_key.committed.px);
        transcript.append_point(b"vk", &self.prover_key.committed.py);
        transcript.append_point(b"vk", &self.prover_key.committed.s);
        transcript.append_point(b"instance", &result);
        transcript.append_point(b"committed_cols", &c_bits);
        transcript.append_point(b"committed_cols", &c_acc_x);
        transcript.append_point(b"committed_cols", &c_acc_y);
        transcript.append_point(b"committed_cols", &c_acc_ip);

        let mut alphas = [F::zero(); 7];
        for alpha in alphas.iter_mut() {
            *alpha = transcript.challenge_scalar(b"constraints_aggregation");
        }

        let px4 = domain.evaluate4x(&self.prover_key.fixed_columns.px.poly);
        let py4 = domain.evaluate4x(&self.prover_key.fixed_columns.py.poly);
        let s4 = domain.evaluate4x(&self.prover_key.fixed_columns.s.poly);
        let b4 = domain.evaluate4x(&witness.b.poly);
        let acc_x4 = domain.evaluate4x(&witness.acc_x.poly);
        let acc_y4 = domain.evaluate4x(&witness.acc_y.poly);
        let acc_ip4 = domain.evaluate4x(&witness.acc_ip.poly);

        let m4 = acc_x4.len();
        let shift4 = |v: &[F]| -> Vec<F> {
            let mut out = ark_std::vec![F::zero(); v.len()];
            for i in 0..v.len() {
                out[i] = v[(i + 4) % v.len()];
            }
            out
        };
        let acc_x4_next = shift4(&acc_x4);
        let acc_y4_next = shift4(&acc_y4);
        let acc_ip4_next = shift4(&acc_ip4);

        let omega_n4 = omega.pow([(n - 4) as u64]);
        let elems4 = domain.elements4x();
        let not_last4: Vec<F> = elems4.iter().map(|x| *x - omega_n4).collect();
        let l0_4 = domain.lagrange_basis4x(0);
        let l_last_4 = domain.lagrange_basis4x(n - 4);

        let mut agg4 = ark_std::vec![F::zero(); m4];
        for idx in 0..m4 {
            let v = RowValues {
                px: px4[idx],
                py: py4[idx],
                s: s4[idx],
                b: b4[idx],
                acc_ip: acc_ip4[idx],
                acc_x: acc_x4[idx],
                acc_y: acc_y4[idx],
            };
            let nl = not_last4[idx];
            let c1 = constraints::c1(&v, acc_ip4_next[idx], nl);
            let c2 = constraints::c2(&v, acc_x4_next[idx], a_coeff, nl);
            let c3 = constraints::c3(&v, acc_y4_next[idx], nl);
            let c4 = constraints::c4(&v);
            let c5 = constraints::c5(&v, self.piop_params.seed.x, result.x, l0_4[idx], l_last_4[idx]);
            let c6 = constraints::c6(&v, self.piop_params.seed.y, result.y, l0_4[idx], l_last_4[idx]);
            let c7 = constraints::c7(&v, l0_4[idx], l_last_4[idx]);
            agg4[idx] = alphas[0] * c1
                + alphas[1] * c2
                + alphas[2] * c3
                + alphas[3] * c4
                + alphas[4] * c5
                + alphas[5] * c6
                + alphas[6] * c7;
        }

        let agg_poly = ark_poly::Evaluations::from_vec_and_domain(agg4, domain.domain4x).interpolate();

        let roots = [
            omega.pow([(n - 1) as u64]),
            omega.pow([(n - 2) as u64]),
            omega.pow([(n - 3) as u64]),
        ];
        let mut masked = agg_poly;
        for r in roots {
            masked = masked.naive_mul(&DensePolynomial::from_coefficients_vec(ark_std::vec![-r, F::one()]));
        }

        let q_coeffs = divide_by_vanishing(&masked.coeffs, n);
        let q_poly = DensePolynomial::from_coefficients_vec(q_coeffs);
        let c_quotient = KZG::<E>::commit(&self.prover_key.srs, &q_poly);

        transcript.append_point(b"quotient", &c_quotient);
        let zeta: F = transcript.challenge_scalar(b"evaluation_point");

        let px_zeta = self.prover_key.fixed_columns.px.evaluate(zeta);
        let py_zeta = self.prover_key.fixed_columns.py.evaluate(zeta);
        let s_zeta = self.prover_key.fixed_columns.s.evaluate(zeta);
        let b_zeta = witness.b.evaluate(zeta);
        let acc_ip_zeta = witness.acc_ip.evaluate(zeta);
        let acc_x_zeta = witness.acc_x.evaluate(zeta);
        let acc_y_zeta = witness.acc_y.evaluate(zeta);
        let q_zeta = q_poly.evaluate(&zeta);

        for v in [
            px_zeta, py_zeta, s_zeta, b_zeta, acc_ip_zeta, acc_x_zeta, acc_y_zeta, q_zeta,
        ] {
            transcript.append_scalar(b"register_evaluations", &v);
        }

        let not_last4_zeta = zeta - omega_n4;
        let zeta_row = RowValues {
            px: px_zeta,
            py: py_zeta,
            s: s_zeta,
            b: b_zeta,
            acc_ip: acc_ip_zeta,
            acc_x: acc_x_zeta,
            acc_y: acc_y_zeta,
        };
        let k2 = constraints::k2(&zeta_row, a_coeff);
        let k3 = constraints::k3(&zeta_row);

        let l1_poly = scale(&witness.acc_ip.poly, alphas[0] * not_last4_zeta);
        let l2_poly = scale(&witness.acc_x.poly, alphas[1] * k2 * not_last4_zeta);
        let l3_poly = scale(&witness.acc_y.poly, alphas[2] * k3 * not_last4_zeta);
        let l_poly = sum_polys(&[l1_poly, l2_poly, l3_poly]);

        let zeta_omega = zeta * omega;
        let lin_zeta_omega = l_poly.evaluate(&zeta_omega);
        transcript.append_scalar(b"shifted_linearization_evaluation", &lin_zeta_omega);

        let mut nus = [F::zero(); 8];
        for nu in nus.iter_mut() {
            *nu = transcript.challenge_scalar(b"kzg_aggregation");
        }

        let agg_open_poly = sum_polys(&[
            scale(&self.prover_key.fixed_columns.px.poly, nus[0]),
            scale(&self.prover_key.fixed_columns.py.poly, nus[1]),
            scale(&self.prover_key.fixed_columns.s.poly, nus[2]),
            scale(&witness.b.poly, nus[3]),
            scale(&witness.acc_ip.poly, nus[4]),
            scale(&witness.acc_x.poly, nus[5]),
            scale(&witness.acc_y.poly, nus[6]),
            scale(&q_poly, nus[7]),
        ]);
        let (agg_proof, _) = KZG::<E>::open(&self.prover_key.srs, &agg_open_poly, zeta);
        let (lin_proof, _) = KZG::<E>::open(&self.prover_key.srs, &l_poly, zeta_omega);

        RingProof {
            c_bits,
            c_acc_x,
            c_acc_y,
            c_acc_ip,
            c_quotient,
            px_zeta,
            py_zeta,
            s_zeta,
            b_zeta,
            acc_ip_zeta,
            acc_x_zeta,
            acc_y_zeta,
            q_zeta,
            lin_zeta_omega,
            agg_proof,
            lin_proof,
        }
    }
}
