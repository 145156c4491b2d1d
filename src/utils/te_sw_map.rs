use crate::*;
use ark_ec::{
    short_weierstrass::{Affine as WeierstrassAffine, SWCurveConfig},
    twisted_edwards::{Affine as EdwardsAffine, MontCurveConfig, TECurveConfig},
    AffineRepr, CurveConfig,
};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_std::borrow::Cow;

/// Constants used in mapping TE form to SW form and vice versa.
pub trait MapConfig: TECurveConfig + SWCurveConfig + MontCurveConfig {
    const MONT_A_OVER_THREE: <Self as CurveConfig>::BaseField;
    const MONT_B_INV: <Self as CurveConfig>::BaseField;
}

pub fn map_sw_to_te<C: MapConfig>(point: &WeierstrassAffine<C>) -> Option<EdwardsAffine<C>> {
    let mx = <C as MontCurveConfig>::COEFF_B * point.x - C::MONT_A_OVER_THREE;
    let my = <C as MontCurveConfig>::COEFF_B * point.y;

    let v_denom = my.inverse()?;
    let x_p_1 = mx + <<C as CurveConfig>::BaseField as One>::one();
    let w_denom = x_p_1.inverse()?;
    let v = mx * v_denom;
    let w = (mx - <<C as CurveConfig>::BaseField as One>::one()) * w_denom;

    Some(EdwardsAffine::new_unchecked(v, w))
}

pub fn map_te_to_sw<C: MapConfig>(point: &EdwardsAffine<C>) -> Option<WeierstrassAffine<C>> {
    let v_denom = <<C as CurveConfig>::BaseField as One>::one() - point.y;
    let w_denom = point.x - point.x * point.y;
    let v_denom_inv = v_denom.inverse()?;
    let w_denom_inv = w_denom.inverse()?;
    let v_w_num = <<C as CurveConfig>::BaseField as One>::one() + point.y;
    let v = v_w_num * v_denom_inv;
    let w = v_w_num * w_denom_inv;

    let x = C::MONT_B_INV * (v + C::MONT_A_OVER_THREE);
    let y = C::MONT_B_INV * w;

    Some(WeierstrassAffine::new_unchecked(x, y))
}

/// Maps points between a curve's Short-Weierstrass and "native" representation.
pub trait SWMapping<C: SWCurveConfig> {
    fn from_sw(sw: WeierstrassAffine<C>) -> Self;
    fn into_sw(&self) -> Cow<WeierstrassAffine<C>>;
}

impl<C: SWCurveConfig> SWMapping<C> for WeierstrassAffine<C> {
    #[inline(always)]
    fn from_sw(sw: WeierstrassAffine<C>) -> Self {
        sw
    }

    #[inline(always)]
    fn into_sw(&self) -> Cow<WeierstrassAffine<C>> {
        Cow::Borrowed(self)
    }
}

impl<C: MapConfig> SWMapping<C> for EdwardsAffine<C> {
    #[inline(always)]
    fn from_sw(sw: WeierstrassAffine<C>) -> Self {
        const ERR_MSG: &str =
            "SW to TE is expected to be implemented only for curves supporting the mapping";
        map_sw_to_te(&sw).expect(ERR_MSG)
    }

    #[inline(always)]
    fn into_sw(&self) -> Cow<WeierstrassAffine<C>> {
        const ERR_MSG: &str =
            "TE to SW is expected to be implemented only for curves supporting the mapping";
        Cow::Owned(map_te_to_sw(self).expect(ERR_MSG))
    }
}

pub(crate) trait SWMappingSeq<C: SWCurveConfig> {
    fn into_sw_seq(&self) -> Cow<[WeierstrassAffine<C>]>;
}

impl<C: SWCurveConfig> SWMappingSeq<C> for [WeierstrassAffine<C>]
where
    WeierstrassAffine<C>: SWMapping<C>,
{
    #[inline(always)]
    fn into_sw_seq(&self) -> Cow<[WeierstrassAffine<C>]> {
        Cow::Borrowed(self)
    }
}

impl<C: MapConfig> SWMappingSeq<C> for [EdwardsAffine<C>]
where
    EdwardsAffine<C>: SWMapping<C>,
{
    #[inline(always)]
    fn into_sw_seq(&self) -> Cow<[WeierstrassAffine<C>]> {
        const ERR_MSG: &str =
            "TE to SW is expected to be implemented only for curves supporting the mapping";
        #[cfg(feature = "parallel")]
        use rayon::prelude::*;
        #[cfg(feature = "parallel")]
        let pks: Vec<_> = self.par_iter().map(|p| map_te_to_sw(p).expect(ERR_MSG)).collect();
        #[cfg(not(feature = "parallel"))]
        let pks: Vec<_> = self.iter().map(|p| map_te_to_sw(p).expect(ERR_MSG)).collect();
        Cow::Owned(pks)
    }
}

/// Maps points into a curve's Twisted Edwards representation.
///
/// The Ring VRF's PIOP columns are built directly in Twisted Edwards form
/// (Bandersnatch's native representation), so for a TE-native curve this is
/// the identity. The trait exists so ring-proof code generic over the
/// register affine type doesn't need a separate code path per curve family.
pub trait TEMapping<C: TECurveConfig> {
    fn to_te(&self) -> Cow<EdwardsAffine<C>>;

    #[inline(always)]
    fn into_te(&self) -> EdwardsAffine<C> {
        self.to_te().into_owned()
    }
}

impl<C: TECurveConfig> TEMapping<C> for EdwardsAffine<C> {
    #[inline(always)]
    fn to_te(&self) -> Cow<EdwardsAffine<C>> {
        Cow::Borrowed(self)
    }
}

pub trait TEMappingSeq<C: TECurveConfig> {
    fn to_te_slice(&self) -> Cow<[EdwardsAffine<C>]>;
}

impl<C: TECurveConfig> TEMappingSeq<C> for [EdwardsAffine<C>] {
    #[inline(always)]
    fn to_te_slice(&self) -> Cow<[EdwardsAffine<C>]> {
        Cow::Borrowed(self)
    }
}

/// Constants for the isogenous Montgomery model used by Elligator-2, plus
/// the Montgomery<->Twisted-Edwards birational map coefficients.
pub trait Elligator2Config: TECurveConfig {
    /// Montgomery `A` coefficient (curve `v^2 = u^3 + A u^2 + u`).
    const MONT_A: <Self as CurveConfig>::BaseField;
    /// Montgomery `B` coefficient.
    const MONT_B: <Self as CurveConfig>::BaseField;
    /// A fixed non-square element of the base field used by Elligator-2.
    const ELL2_Z: <Self as CurveConfig>::BaseField;
}

fn montgomery_to_te<C: Elligator2Config>(
    u: <C as CurveConfig>::BaseField,
    v: <C as CurveConfig>::BaseField,
) -> Option<EdwardsAffine<C>> {
    // (u, v) -> (u/v, (u-1)/(u+1)), the standard Montgomery->TE birational map.
    let one = <<C as CurveConfig>::BaseField as One>::one();
    let x = u * v.inverse()?;
    let y = (u - one) * (u + one).inverse()?;
    Some(EdwardsAffine::new_unchecked(x, y))
}

/// Elligator-2 map from a field element to a point on the Montgomery model,
/// returned in Twisted Edwards coordinates. RFC 9380 section 6.7.1.
fn elligator2_map<C: Elligator2Config>(
    u: <C as CurveConfig>::BaseField,
) -> EdwardsAffine<C> {
    type F<C> = <C as CurveConfig>::BaseField;
    let one = <F<C> as One>::one();
    let a = C::MONT_A;
    let b = C::MONT_B;
    let z = C::ELL2_Z;

    let tv1 = (z * u * u).inverse().unwrap_or_else(F::<C>::zero);
    let x1 = (-a) * (one + tv1);
    let x1 = if tv1.is_zero() { -a } else { x1 };
    let gx1 = x1 * x1 * x1 + a * x1 * x1 + x1;
    let x2 = -x1 - a;
    let gx2 = x2 * x2 * x2 + a * x2 * x2 + x2;

    let (x, y2, sq_root_is_gx1) = if is_square(gx1) {
        (x1, gx1, true)
    } else {
        (x2, gx2, false)
    };
    let mut y = sqrt(y2).unwrap_or_else(F::<C>::zero);
    let y_is_neg = is_square(y) != sq_root_is_gx1;
    if y_is_neg {
        y = -y;
    }

    // Scale from the reduced curve `v^2 = u^3 + (A/B) u^2 + u/B^2` back to
    // the canonical Montgomery curve by multiplying through by `B`.
    let u_m = x;
    let v_m = y * b;
    montgomery_to_te::<C>(u_m, v_m).unwrap_or_else(|| EdwardsAffine::zero())
}

fn is_square<F: Field>(x: F) -> bool {
    x.legendre().is_qr() || x.is_zero()
}

fn sqrt<F: Field>(x: F) -> Option<F> {
    x.sqrt()
}

/// Hashes `count` field elements from `data` following RFC 9380's
/// `expand_message_xmd` with the suite's hasher, then reduces each 48-byte
/// (resp. wide) chunk modulo the base field.
fn hash_to_field<S: Suite, const N: usize>(data: &[u8], dst: &[u8]) -> [BaseField<S>; N]
where
    BaseField<S>: PrimeField,
{
    use digest::{Digest, FixedOutputReset};
    let _ = FixedOutputReset::finalize_fixed_reset; // silence unused-trait warnings on some digests
    let mod_bytes = (BaseField::<S>::MODULUS_BIT_SIZE as usize + 7) / 8 + 16;

    let mut uniform = expand_message_xmd::<S::Hasher>(data, dst, mod_bytes * N);
    core::array::from_fn(|_| {
        let chunk: Vec<u8> = uniform.drain(0..mod_bytes).collect();
        BaseField::<S>::from_le_bytes_mod_order(&chunk)
    })
}

/// `expand_message_xmd` per RFC 9380 section 5.3.1.
fn expand_message_xmd<D: digest::Digest>(msg: &[u8], dst: &[u8], len: usize) -> Vec<u8> {
    let b_in_bytes = D::output_size();
    let ell = (len + b_in_bytes - 1) / b_in_bytes;
    assert!(ell <= 255, "requested output too long for XMD");
    let dst_prime = [dst, &[dst.len() as u8]].concat();

    let z_pad = ark_std::vec![0u8; 64]; // block size upper bound for SHA-2 family
    let l_i_b_str = (len as u16).to_be_bytes();
    let msg_prime = [&z_pad[..], msg, &l_i_b_str, &[0u8], &dst_prime[..]].concat();

    let b0 = D::digest(&msg_prime);
    let b1 = D::digest([&b0[..], &[1u8], &dst_prime[..]].concat());

    let mut uniform = Vec::with_capacity(ell * b_in_bytes);
    uniform.extend_from_slice(&b1);
    let mut b_prev = b1;
    for i in 2..=ell {
        let xored: Vec<u8> = b0.iter().zip(b_prev.iter()).map(|(a, b)| a ^ b).collect();
        let b_i = D::digest([&xored[..], &[i as u8], &dst_prime[..]].concat());
        uniform.extend_from_slice(&b_i);
        b_prev = b_i;
    }
    uniform.truncate(len);
    uniform
}

/// Hash-to-curve via Elligator-2 on the isogenous Montgomery model, per
/// RFC 9380's random-oracle combinator: two field elements are hashed,
/// mapped independently, summed, and the cofactor is cleared.
pub fn hash_to_curve_ell2<S, C>(data: &[u8], h2c_suite_id: &[u8]) -> Option<AffinePoint<S>>
where
    S: Suite<Affine = EdwardsAffine<C>>,
    C: Elligator2Config,
    <C as CurveConfig>::BaseField: PrimeField,
{
    let dst = [b"ECVRF_", h2c_suite_id, S::SUITE_ID].concat();
    let [u0, u1] = hash_to_field::<S, 2>(data, &dst);

    let p0 = elligator2_map::<C>(u0);
    let p1 = elligator2_map::<C>(u1);
    let sum = (p0 + p1).into_affine();
    let pt = sum.clear_cofactor();
    (!pt.is_zero()).then_some(pt)
}

