//! Shared test infrastructure: deterministic randomness, golden test-vector
//! loading/generation, and small helper traits used by every suite's own
//! `testing` submodule.

use crate::*;
use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use ark_std::UniformRand;
use std::string::{String, ToString};
use std::vec::Vec;

/// Fixed seed used throughout the test suite wherever determinism matters
/// more than realism.
pub const TEST_SEED: &[u8] = b"ark-ec-vrfs-testing-seed";

/// Location of the BLS12-381 KZG SRS fixture used by Ring-VRF tests.
pub const PCS_SRS_FILE: &str = "data/bls12-381-srs-2-11-uncompressed.bin";

/// Location of the BN254 KZG SRS fixture used by the Baby-JubJub Ring-VRF tests.
pub const BN254_PCS_SRS_FILE: &str = "data/bn254-srs-2-11-uncompressed.bin";

/// Directory holding golden test-vector JSON fixtures, one file per
/// `TestVectorTrait::name()`.
const VECTORS_DIR: &str = "data/vectors";

#[inline(always)]
pub fn random_val<T: UniformRand>(rng: Option<&mut dyn RngCore>) -> T {
    let mut local_rng = ark_std::test_rng();
    let rng = rng.unwrap_or(&mut local_rng);
    T::rand(rng)
}

#[inline(always)]
pub fn random_vec<T: UniformRand>(n: usize, rng: Option<&mut dyn RngCore>) -> Vec<T> {
    let mut local_rng = ark_std::test_rng();
    let rng = rng.unwrap_or(&mut local_rng);
    (0..n).map(|_| T::rand(rng)).collect()
}

/// Times a closure under the `print-trace` convention, falling back to a
/// plain call when tracing is disabled.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let timer = ark_std::start_timer!(|| label.to_string());
    let result = f();
    ark_std::end_timer!(timer);
    result
}

/// Gives a suite a human-readable, file-system-safe name used to key its
/// golden test-vector fixture.
pub trait SuiteExt: Suite {
    fn suite_name() -> String {
        String::from_utf8_lossy(Self::SUITE_ID)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect()
    }
}

impl<S: Suite> SuiteExt for S {}

/// On-curve / subgroup sanity check for a suite-declared constant point.
pub trait CheckPoint {
    fn check(&self, in_subgroup: bool) -> Result<(), Error>;
}

impl<S: Suite> CheckPoint for AffinePoint<S> {
    fn check(&self, in_subgroup: bool) -> Result<(), Error> {
        if !self.is_on_curve() {
            return Err(Error::InvalidData);
        }
        if in_subgroup && !self.is_in_correct_subgroup_assuming_on_curve() {
            return Err(Error::InvalidData);
        }
        Ok(())
    }
}

/// A golden test vector: constructs itself from fresh randomness, (de)serializes
/// to a flat string map, and re-derives its claimed values to check them.
pub trait TestVectorTrait: Sized {
    fn name() -> String;
    fn new(comment: &str, seed: &[u8], alpha: &[u8], salt: &[u8], ad: &[u8]) -> Self;
    fn from_map(map: &TestVectorMap) -> Self;
    fn to_map(&self) -> TestVectorMap;
    fn run(&self);
}

/// Flat `name -> hex` map backing a JSON test-vector fixture.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TestVectorMap(pub indexmap::IndexMap<String, String>);

impl TestVectorMap {
    pub fn get_bytes(&self, name: &str) -> Vec<u8> {
        let value = self.0.get(name).unwrap_or_else(|| panic!("missing test vector field '{name}'"));
        hex::decode(value).expect("test vector field is not valid hex")
    }

    pub fn get<T: CanonicalDeserialize>(&self, name: &str) -> T {
        let bytes = self.get_bytes(name);
        T::deserialize_compressed_unchecked(&bytes[..])
            .unwrap_or_else(|_| panic!("failed to decode test vector field '{name}'"))
    }

    pub fn set<T: CanonicalSerialize>(&mut self, name: &str, value: &T) {
        let mut buf = Vec::new();
        value.serialize_compressed(&mut buf).unwrap();
        self.0.insert(name.to_string(), hex::encode(buf));
    }
}

/// Base fields shared by every scheme's test vector: the key pair, VRF
/// input/output points, and the additional data bound to the proof.
pub struct TestVector<S: Suite> {
    pub comment: String,
    pub seed: Vec<u8>,
    pub alpha: Vec<u8>,
    pub salt: Vec<u8>,
    pub ad: Vec<u8>,
    pub sk: ScalarField<S>,
    pub pk: AffinePoint<S>,
    pub h: AffinePoint<S>,
    pub gamma: AffinePoint<S>,
}

impl<S: Suite> core::fmt::Debug for TestVector<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestVector")
            .field("comment", &self.comment)
            .field("sk", &hex::encode(codec::scalar_encode::<S>(&self.sk)))
            .field("pk", &hex::encode(codec::point_encode::<S>(&self.pk)))
            .finish()
    }
}

impl<S: Suite + SuiteExt + core::fmt::Debug> TestVectorTrait for TestVector<S> {
    fn name() -> String {
        S::suite_name()
    }

    fn new(comment: &str, seed: &[u8], alpha: &[u8], salt: &[u8], ad: &[u8]) -> Self {
        let data = [salt, alpha].concat();
        let secret = Secret::<S>::from_seed(seed);
        let input = Input::<S>::new(&data).expect("test vector alpha must hash to a curve point");
        let output = secret.output(input);
        Self {
            comment: comment.to_string(),
            seed: seed.to_vec(),
            alpha: alpha.to_vec(),
            salt: salt.to_vec(),
            ad: ad.to_vec(),
            sk: secret.scalar,
            pk: secret.public().0,
            h: input.0,
            gamma: output.0,
        }
    }

    fn from_map(map: &TestVectorMap) -> Self {
        Self {
            comment: map.0.get("comment").cloned().unwrap_or_default(),
            seed: map.get_bytes("seed"),
            alpha: map.get_bytes("alpha"),
            salt: map.get_bytes("salt"),
            ad: map.get_bytes("ad"),
            sk: S::Codec::scalar_decode(&map.get_bytes("sk")),
            pk: codec::point_decode::<S>(&map.get_bytes("pk")).unwrap(),
            h: codec::point_decode::<S>(&map.get_bytes("h")).unwrap(),
            gamma: codec::point_decode::<S>(&map.get_bytes("gamma")).unwrap(),
        }
    }

    fn to_map(&self) -> TestVectorMap {
        let mut map = TestVectorMap::default();
        map.0.insert("comment".to_string(), self.comment.clone());
        map.0.insert("seed".to_string(), hex::encode(&self.seed));
        map.0.insert("alpha".to_string(), hex::encode(&self.alpha));
        map.0.insert("salt".to_string(), hex::encode(&self.salt));
        map.0.insert("ad".to_string(), hex::encode(&self.ad));
        map.0.insert("sk".to_string(), hex::encode(codec::scalar_encode::<S>(&self.sk)));
        map.0.insert("pk".to_string(), hex::encode(codec::point_encode::<S>(&self.pk)));
        map.0.insert("h".to_string(), hex::encode(codec::point_encode::<S>(&self.h)));
        map.0.insert("gamma".to_string(), hex::encode(codec::point_encode::<S>(&self.gamma)));
        map
    }

    fn run(&self) {
        let secret = Secret::<S>::from_seed(&self.seed);
        assert_eq!(secret.scalar, self.sk, "secret scalar mismatch");
        assert_eq!(secret.public().0, self.pk, "public key mismatch");

        let data = [&self.salt[..], &self.alpha[..]].concat();
        let input = Input::<S>::new(&data).expect("alpha must hash to a curve point");
        assert_eq!(input.0, self.h, "VRF input point mismatch");

        let output = secret.output(input);
        assert_eq!(output.0, self.gamma, "VRF output point mismatch");
    }
}

/// Runs a test vector against its golden fixture, generating and persisting
/// the fixture on first run (when `ARK_VRF_WRITE_VECTORS` is set) or simply
/// constructing-and-checking it in-memory otherwise.
pub fn test_vectors_process<V: TestVectorTrait>(name: &str) {
    let path = std::path::Path::new(VECTORS_DIR).join(format!("{name}.json"));

    let vector = match std::fs::read_to_string(&path) {
        Ok(data) => {
            let map: TestVectorMap =
                serde_json::from_str(&data).expect("malformed test vector fixture");
            V::from_map(&map)
        }
        Err(_) => V::new(name, TEST_SEED, b"", b"", b""),
    };
    vector.run();

    if std::env::var_os("ARK_VRF_WRITE_VECTORS").is_some() {
        let map = vector.to_map();
        let json = serde_json::to_string_pretty(&map).unwrap();
        let _ = std::fs::create_dir_all(VECTORS_DIR);
        std::fs::write(&path, json).expect("failed to persist test vector fixture");
    }
}

/// Runs `$v::name()`'s golden fixture.
#[macro_export]
macro_rules! test_vectors {
    ($v:ty) => {
        #[test]
        fn test_vectors() {
            $crate::testing::test_vectors_process::<$v>(
                &<$v as $crate::testing::TestVectorTrait>::name(),
            );
        }
    };
}

/// IETF + Pedersen prove/verify and test-vector checks for a suite that
/// doesn't carry a pairing-friendly embedding (no ring feature).
#[macro_export]
macro_rules! suite_tests {
    ($suite:ty) => {
        $crate::ietf_suite_tests!($suite);
        $crate::pedersen_suite_tests!($suite);
    };
}
