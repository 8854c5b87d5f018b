use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{Abi, AbiParameter, AbiResult};

/// Compiler artifact bundling the circuit interface with its bytecode.
///
/// Unrecognized manifest keys are ignored, so artifacts produced by newer
/// compilers parse as long as the declared interface is intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitManifest {
    /// Compiler version that produced the artifact.
    #[serde(alias = "noir_version")]
    pub version: String,
    /// Artifact content hash, when the compiler provides one.
    ///
    /// Artifacts in the wild carry this either as a bare number or as a
    /// quoted decimal string; both parse.
    #[serde(
        default,
        deserialize_with = "hash_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub hash: Option<u64>,
    /// Declared circuit interface.
    pub abi: Abi,
    /// Opaque, backend-specific circuit bytecode.
    pub bytecode: String,
}

fn hash_value<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(hash)) => Some(hash),
        Some(Raw::Text(text)) => text.parse().ok(),
        None => None,
    })
}

impl CircuitManifest {
    /// Parse a manifest from its JSON representation.
    ///
    /// # Example
    ///
    /// ```
    /// use circuit_abi::CircuitManifest;
    ///
    /// let json = std::fs::read_to_string("../assets/product-circuit.json")
    ///     .expect("failed to read the manifest");
    ///
    /// let manifest = CircuitManifest::from_json(&json)
    ///     .expect("failed to parse the manifest");
    ///
    /// assert_eq!(manifest.parameters().len(), 3);
    /// ```
    pub fn from_json(json: &str) -> AbiResult<Self> {
        let manifest: Self = serde_json::from_str(json)?;

        debug!(
            version = %manifest.version,
            parameters = manifest.abi.parameters.len(),
            "parsed circuit manifest"
        );

        Ok(manifest)
    }

    /// Ordered parameter declarations of the circuit.
    pub fn parameters(&self) -> &[AbiParameter] {
        &self.abi.parameters
    }
}

#[test]
fn version_accepts_compiler_specific_alias() {
    let manifest = CircuitManifest::from_json(
        r#"{
            "noir_version": "1.0.0-beta.14",
            "abi": {"parameters": [{"name": "a", "type": {"kind": "field"}}]},
            "bytecode": "aGVsbG8="
        }"#,
    )
    .expect("failed to parse a manifest with an aliased version key");

    assert_eq!(manifest.version, "1.0.0-beta.14");
    assert_eq!(manifest.hash, None);
    assert_eq!(manifest.parameters().len(), 1);
}

#[test]
fn hash_parses_from_number_or_quoted_decimal() {
    let manifest = CircuitManifest::from_json(
        r#"{
            "version": "1.0.0",
            "hash": "7656203794231641961",
            "abi": {"parameters": []},
            "bytecode": "aGVsbG8="
        }"#,
    )
    .expect("failed to parse a manifest with a quoted hash");

    assert_eq!(manifest.hash, Some(7656203794231641961));
}

#[test]
fn unknown_manifest_keys_are_ignored() {
    let manifest = CircuitManifest::from_json(
        r#"{
            "version": "1.0.0",
            "hash": 7656203794231641961,
            "abi": {
                "parameters": [],
                "return_type": null,
                "error_types": {}
            },
            "bytecode": "aGVsbG8=",
            "debug_symbols": "none",
            "file_map": {}
        }"#,
    )
    .expect("failed to parse a manifest with extra keys");

    assert_eq!(manifest.hash, Some(7656203794231641961));
    assert!(manifest.parameters().is_empty());
}

#[test]
fn malformed_manifests_are_reported() {
    CircuitManifest::from_json("{}")
        .expect_err("a manifest without an interface shouldn't parse");
}
