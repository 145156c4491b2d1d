//! The seven ring PIOP constraints, shared between the prover (which
//! evaluates them pointwise over the radix-4 domain) and the verifier
//! (which recomputes the non-shifted ones in closed form at `zeta`).
//!
//! `acc_x`/`acc_y` below are the accumulator's *current* row; `px`/`py` is
//! the fixed columns' row being conditionally added; `b` one-hot-selects
//! whether the addition happens. `k2`/`k3`/`const2`/`const3` factor the
//! conditional-add constraints `c2`/`c3` into "coefficient of the shifted
//! accumulator" times "constant term", which is what the linearization
//! polynomial needs.

use ark_ff::{One, PrimeField};

#[derive(Clone, Copy)]
pub struct RowValues<F: PrimeField> {
    pub px: F,
    pub py: F,
    pub s: F,
    pub b: F,
    pub acc_ip: F,
    pub acc_x: F,
    pub acc_y: F,
}

pub fn k2<F: PrimeField>(v: &RowValues<F>, a: F) -> F {
    v.b * (v.acc_y * v.py + a * v.acc_x * v.px) + (F::one() - v.b)
}

pub fn k3<F: PrimeField>(v: &RowValues<F>) -> F {
    v.b * (v.acc_x * v.py - v.px * v.acc_y) + (F::one() - v.b)
}

pub fn const2<F: PrimeField>(v: &RowValues<F>) -> F {
    v.b * (v.acc_x * v.acc_y + v.px * v.py) + (F::one() - v.b) * v.acc_x
}

pub fn const3<F: PrimeField>(v: &RowValues<F>) -> F {
    v.b * (v.acc_x * v.acc_y - v.px * v.py) + (F::one() - v.b) * v.acc_y
}

pub fn c1<F: PrimeField>(v: &RowValues<F>, acc_ip_next: F, not_last4: F) -> F {
    (acc_ip_next - v.acc_ip - v.b * v.s) * not_last4
}

pub fn c2<F: PrimeField>(v: &RowValues<F>, acc_x_next: F, a: F, not_last4: F) -> F {
    (acc_x_next * k2(v, a) - const2(v)) * not_last4
}

pub fn c3<F: PrimeField>(v: &RowValues<F>, acc_y_next: F, not_last4: F) -> F {
    (acc_y_next * k3(v) - const3(v)) * not_last4
}

pub fn c4<F: PrimeField>(v: &RowValues<F>) -> F {
    v.b * (F::one() - v.b)
}

pub fn c5<F: PrimeField>(v: &RowValues<F>, seed_x: F, result_x: F, l0: F, l_last: F) -> F {
    (v.acc_x - seed_x) * l0 + (v.acc_x - result_x) * l_last
}

pub fn c6<F: PrimeField>(v: &RowValues<F>, seed_y: F, result_y: F, l0: F, l_last: F) -> F {
    (v.acc_y - seed_y) * l0 + (v.acc_y - result_y) * l_last
}

pub fn c7<F: PrimeField>(v: &RowValues<F>, l0: F, l_last: F) -> F {
    v.acc_ip * l0 + (v.acc_ip - F::one()) * l_last
}
