//! Seam between the witness codec and an external proving backend.

use std::path::Path;
use std::{fmt, io};

use crate::{Scalar, WitnessMap};

/// Proof artifact produced by a backend, shuttled as hex on the wire.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Proof(Vec<u8>);

impl Proof {
    /// Hex representation of the proof bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a proof from its hex representation.
    pub fn from_hex(hex: &str) -> io::Result<Self> {
        hex::decode(hex)
            .map(Self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Raw proof bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the proof in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the proof holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Proof {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Proof {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Driver for an external executor, prover, and verifier.
///
/// Implementations own the SRS and key lifecycles; this crate only shapes
/// the witness data that crosses the seam. Methods take `&mut self` so an
/// implementation can hold a single native context without interior
/// mutability.
pub trait Backend {
    /// Prepare an SRS able to cover `circuit_size` gates, returning the
    /// number of points the setup produced.
    fn setup_srs(
        &mut self,
        circuit_size: u32,
        srs_path: Option<&Path>,
    ) -> io::Result<usize>;

    /// Prepare the SRS by inspecting the circuit bytecode, returning the
    /// number of points the setup produced.
    fn setup_srs_from_bytecode(
        &mut self,
        bytecode: &str,
        srs_path: Option<&Path>,
    ) -> io::Result<usize>;

    /// Execute the circuit over an encoded initial witness, returning the
    /// full solved witness column.
    fn execute(
        &mut self,
        bytecode: &str,
        witness: &WitnessMap,
    ) -> io::Result<Vec<Scalar>>;

    /// Derive the verification key of the circuit.
    fn verification_key(&mut self, bytecode: &str) -> io::Result<String>;

    /// Produce a proof over an encoded witness.
    fn prove(
        &mut self,
        bytecode: &str,
        witness: &WitnessMap,
        verification_key: &str,
    ) -> io::Result<Proof>;

    /// Check a proof against a verification key.
    fn verify(
        &mut self,
        proof: &Proof,
        verification_key: &str,
    ) -> io::Result<bool>;
}

#[test]
fn proof_hex_round_trip() {
    let proof = Proof::from(vec![0xde, 0xad, 0xbe, 0xef]);

    assert_eq!(proof.to_hex(), "deadbeef");
    assert_eq!(
        Proof::from_hex("deadbeef").expect("failed to parse a proof"),
        proof
    );

    Proof::from_hex("nothex").expect_err("invalid hex shouldn't parse");
}
