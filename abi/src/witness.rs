use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical `"0x<hex>"` representation of a single witness value.
///
/// Values built from numeric literals take the minimal hex form (`5` becomes
/// `0x5`, `0` becomes `0x0`); caller-supplied strings are kept verbatim after
/// the prefix check so large field elements preserve their exact shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Scalar(String);

impl Scalar {
    /// Required prefix of the canonical representation.
    pub const PREFIX: &'static str = "0x";

    /// Wrap a caller-provided hex string, verbatim after the prefix check.
    ///
    /// # Example
    ///
    /// ```
    /// use circuit_abi::Scalar;
    ///
    /// assert!(Scalar::new("0x2a").is_some());
    /// assert!(Scalar::new("2a").is_none());
    /// ```
    pub fn new<S>(value: S) -> Option<Self>
    where
        S: Into<String>,
    {
        let value = value.into();

        value.starts_with(Self::PREFIX).then(|| Self(value))
    }

    /// Hexadecimal digits following the prefix.
    pub fn digits(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    /// Read the value back as `u64`, when it fits.
    pub fn to_u64(&self) -> Option<u64> {
        u64::from_str_radix(self.digits(), 16).ok()
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, value))
    }
}

impl Deref for Scalar {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// DerefMut is intentionally not provided so the inner string can't be
// manipulated into a prefixless state

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        Self::new(value).ok_or_else(|| {
            serde::de::Error::custom("scalar values require the `0x` prefix")
        })
    }
}

/// Flat, index-addressed witness assignment produced by encoding.
///
/// Serializes as a JSON object keyed by decimal index strings, the exact
/// wire shape the proving backend consumes:
/// `{"0": "0x2", "1": "0x3"}`. Iteration follows increasing index order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WitnessMap(BTreeMap<usize, Scalar>);

impl WitnessMap {
    /// Create an empty witness map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to a witness index, returning a previous assignment.
    pub fn insert(&mut self, index: usize, value: Scalar) -> Option<Scalar> {
        self.0.insert(index, value)
    }

    /// Consume the map, returning the inner index-ordered collection.
    pub fn into_inner(self) -> BTreeMap<usize, Scalar> {
        self.0
    }
}

impl Deref for WitnessMap {
    type Target = BTreeMap<usize, Scalar>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// read access goes through Deref; DerefMut is omitted so every assignment is
// funneled through `insert`

#[test]
fn minimal_hex_from_u64() {
    assert_eq!(Scalar::from(5).as_str(), "0x5");
    assert_eq!(Scalar::from(0).as_str(), "0x0");
    assert_eq!(Scalar::from(255).as_str(), "0xff");
    assert_eq!(Scalar::from(u64::MAX).as_str(), "0xffffffffffffffff");
}

#[test]
fn u64_read_back() {
    assert_eq!(Scalar::from(77).to_u64(), Some(77));

    let wide = Scalar::new("0xffffffffffffffffff")
        .expect("failed to wrap a prefixed value");
    assert_eq!(wide.to_u64(), None);
}

#[test]
fn scalar_serializes_as_bare_string() {
    let json = serde_json::to_string(&Scalar::from(42))
        .expect("failed to serialize a scalar");
    assert_eq!(json, r#""0x2a""#);

    let scalar: Scalar = serde_json::from_str(r#""0x2a""#)
        .expect("failed to deserialize a scalar");
    assert_eq!(scalar.to_u64(), Some(42));

    serde_json::from_str::<Scalar>(r#""2a""#)
        .expect_err("a prefixless value shouldn't deserialize");
}

#[test]
fn witness_map_serializes_with_decimal_string_keys() {
    let mut witness = WitnessMap::new();

    witness.insert(1, Scalar::from(3));
    witness.insert(0, Scalar::from(2));

    let json = serde_json::to_string(&witness)
        .expect("failed to serialize a witness map");
    assert_eq!(json, r#"{"0":"0x2","1":"0x3"}"#);

    let parsed: WitnessMap =
        serde_json::from_str(&json).expect("failed to parse a witness map");
    assert_eq!(parsed, witness);
    assert_eq!(parsed.into_inner().len(), 2);
}
