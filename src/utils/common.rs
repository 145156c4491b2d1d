use crate::{codec::Codec, AffinePoint, HashOutput, ScalarField, Suite};
use ark_ec::{AffineRepr, CurveConfig};
use ark_ff::PrimeField;
use ark_serialize::CanonicalDeserialize;
use ark_std::vec::Vec;
use digest::Digest;

/// Run `S::Hasher` over `data` and return the raw digest bytes.
#[inline(always)]
pub fn hash<D: Digest>(data: &[u8]) -> digest::Output<D> {
    D::digest(data)
}

/// Nonce generation according to RFC 9381 section 5.4.2.2.
///
/// Based on section 5.1.6 of RFC 8032 (EdDSA). Deterministic in `(sk, pt)`.
///
/// # Panics
///
/// Panics if `Hasher` output is less than 64 bytes.
pub fn nonce_rfc_8032<S: Suite>(sk: &ScalarField<S>, pt: &AffinePoint<S>) -> ScalarField<S> {
    let sk_bytes = S::Codec::scalar_encode(sk);
    let sk_hash = hash::<S::Hasher>(&sk_bytes);
    let sk_hash = sk_hash.as_slice();
    assert!(sk_hash.len() >= 64, "hasher output too short for RFC-8032 nonce");
    let k_seed = &sk_hash[32..];

    let pt_bytes = S::Codec::point_encode(pt);
    let v = [k_seed, &pt_bytes[..]].concat();
    let h = hash::<S::Hasher>(&v);

    ScalarField::<S>::from_le_bytes_mod_order(h.as_slice())
}

/// Nonce generation according to RFC 9381 section 5.4.2.1, based on RFC 6979.
pub fn nonce_rfc_6979<S: Suite>(sk: &ScalarField<S>, pt: &AffinePoint<S>) -> ScalarField<S> {
    let pt_bytes = S::Codec::point_encode(pt);
    let h1 = hash::<S::Hasher>(&pt_bytes);
    let h1 = h1.as_slice();

    let x = S::Codec::scalar_encode(sk);

    let mut v = ark_std::vec![1u8; h1.len()];
    let mut k = ark_std::vec![0u8; h1.len()];

    k = hmac::<S::Hasher>(&k, &[&v[..], &[0x00], &x[..], h1].concat());
    v = hmac::<S::Hasher>(&k, &v);
    k = hmac::<S::Hasher>(&k, &[&v[..], &[0x01], &x[..], h1].concat());
    v = hmac::<S::Hasher>(&k, &v);
    v = hmac::<S::Hasher>(&k, &v);

    ScalarField::<S>::from_be_bytes_mod_order(&v)
}

fn hmac<D: Digest + digest::core_api::BlockSizeUser>(key: &[u8], data: &[u8]) -> Vec<u8> {
    // Minimal HMAC built on the suite's own digest, avoiding a dependency on
    // a specific block size by relying on the `hmac` crate's generic impl
    // whenever `D` implements the required traits; for digests used by the
    // built-in suites (SHA-256/SHA-512) this matches RFC 2104 exactly.
    use hmac::{Mac, SimpleHmac};
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Challenge generation as described by RFC-9381 section 5.4.3, extended to
/// allow additional data.
pub fn challenge_rfc_9381<S: Suite>(pts: &[&AffinePoint<S>], ad: &[u8]) -> ScalarField<S> {
    const DOM_SEP_FRONT: u8 = 0x02;
    const DOM_SEP_BACK: u8 = 0x00;

    let mut buf = Vec::new();
    buf.extend_from_slice(S::SUITE_ID);
    buf.push(DOM_SEP_FRONT);
    for pt in pts {
        S::Codec::point_encode_into(pt, &mut buf);
    }
    buf.extend_from_slice(ad);
    buf.push(DOM_SEP_BACK);

    let hash = hash::<S::Hasher>(&buf);
    let len = S::CHALLENGE_LEN.min(hash.len());
    ScalarField::<S>::from_le_bytes_mod_order(&hash[..len])
}

/// Try-And-Increment method as defined by RFC-9381 section 5.4.1.1.
///
/// Works for any curve whose codec can decode an arbitrary hash as a
/// compressed point. Expected to find a point after ~2 attempts on average.
pub fn hash_to_curve_tai_rfc_9381<S: Suite>(data: &[u8]) -> Option<AffinePoint<S>> {
    const DOM_SEP_FRONT: u8 = 0x01;
    const DOM_SEP_BACK: u8 = 0x00;

    let mut buf = Vec::new();
    buf.extend_from_slice(S::SUITE_ID);
    buf.push(DOM_SEP_FRONT);
    buf.extend_from_slice(data);
    buf.push(0x00); // ctr placeholder
    buf.push(DOM_SEP_BACK);
    let ctr_pos = buf.len() - 2;

    for ctr in 0..=255u8 {
        buf[ctr_pos] = ctr;
        let h = hash::<S::Hasher>(&buf);
        if let Ok(pt) = S::Codec::point_decode(h.as_slice()) {
            let pt = pt.clear_cofactor();
            if !pt.is_zero() {
                return Some(pt);
            }
        }
    }
    None
}

/// Point-to-hash as described by RFC-9381 section 5.2, optionally clearing
/// the cofactor first.
pub fn point_to_hash_rfc_9381<S: Suite>(
    pt: &AffinePoint<S>,
    clear_cofactor: bool,
) -> HashOutput<S> {
    const DOM_SEP_FRONT: u8 = 0x03;
    const DOM_SEP_BACK: u8 = 0x00;

    let pt = if clear_cofactor { pt.clear_cofactor() } else { *pt };

    let mut buf = Vec::new();
    buf.extend_from_slice(S::SUITE_ID);
    buf.push(DOM_SEP_FRONT);
    S::Codec::point_encode_into(&pt, &mut buf);
    buf.push(DOM_SEP_BACK);

    hash::<S::Hasher>(&buf)
}

/// Hash-to-curve via Elligator-2 applied to the isogenous Montgomery model,
/// following RFC 9380's `hash_to_curve` with `expand_message_xmd` and the
/// random-oracle combinator (two field elements, mapped independently and
/// summed before clearing the cofactor).
pub fn hash_to_curve_ell2_rfc_9380<S, C>(data: &[u8], h2c_suite_id: &[u8]) -> Option<AffinePoint<S>>
where
    S: Suite<Affine = ark_ec::twisted_edwards::Affine<C>>,
    C: super::te_sw_map::Elligator2Config,
    <C as CurveConfig>::BaseField: PrimeField,
{
    super::te_sw_map::hash_to_curve_ell2::<S, C>(data, h2c_suite_id)
}

/// Parses a point from bytes, erroring as `Error::InvalidData` via `?`.
pub fn decode_point<S: Suite>(buf: &[u8]) -> Result<AffinePoint<S>, crate::Error> {
    AffinePoint::<S>::deserialize_compressed_unchecked(buf).map_err(Into::into)
}

