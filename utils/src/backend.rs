use std::io;
use std::path::Path;

use circuit_abi::{Backend, Proof, Scalar, WitnessMap};
use sha2::{Digest, Sha256};

/// Deterministic in-process stand-in for a native proving backend.
///
/// Execution solves nothing: the initial witness is echoed back as the full
/// column, so encoded inputs must already cover every index from zero.
/// Proofs are digests bound to the verification key and the witness, which
/// lets verification check key consistency without a proof system.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockBackend;

impl MockBackend {
    fn digest_key(verification_key: &str) -> io::Result<[u8; 32]> {
        let key = hex::decode(verification_key)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(Sha256::digest(&key).into())
    }
}

impl Backend for MockBackend {
    fn setup_srs(
        &mut self,
        circuit_size: u32,
        _srs_path: Option<&Path>,
    ) -> io::Result<usize> {
        Ok(circuit_size as usize + 1)
    }

    fn setup_srs_from_bytecode(
        &mut self,
        bytecode: &str,
        _srs_path: Option<&Path>,
    ) -> io::Result<usize> {
        Ok(bytecode.len() + 1)
    }

    fn execute(
        &mut self,
        _bytecode: &str,
        witness: &WitnessMap,
    ) -> io::Result<Vec<Scalar>> {
        let mut column = Vec::with_capacity(witness.len());

        for (position, (index, scalar)) in witness.iter().enumerate() {
            if *index != position {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "witness indices aren't contiguous from zero",
                ));
            }

            column.push(scalar.clone());
        }

        Ok(column)
    }

    fn verification_key(&mut self, bytecode: &str) -> io::Result<String> {
        Ok(hex::encode(Sha256::digest(bytecode.as_bytes())))
    }

    fn prove(
        &mut self,
        bytecode: &str,
        witness: &WitnessMap,
        verification_key: &str,
    ) -> io::Result<Proof> {
        let witness = serde_json::to_vec(witness)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut hasher = Sha256::new();

        hasher.update(bytecode.as_bytes());
        hasher.update(&witness);

        let mut proof = Self::digest_key(verification_key)?.to_vec();

        proof.extend(hasher.finalize());

        Ok(Proof::from(proof))
    }

    fn verify(
        &mut self,
        proof: &Proof,
        verification_key: &str,
    ) -> io::Result<bool> {
        let expected = Self::digest_key(verification_key)?;
        let bytes = proof.as_bytes();

        Ok(bytes.len() == 64 && bytes[..32] == expected)
    }
}

#[test]
fn mock_proofs_bind_to_the_verification_key() {
    let mut backend = MockBackend;

    let vk = backend
        .verification_key("aGVsbG8=")
        .expect("failed to derive a key");

    let mut witness = WitnessMap::new();
    witness.insert(0, Scalar::from(2));

    let proof = backend
        .prove("aGVsbG8=", &witness, &vk)
        .expect("failed to prove");

    assert!(backend.verify(&proof, &vk).expect("failed to verify"));

    let other = backend
        .verification_key("b3RoZXI=")
        .expect("failed to derive a key");

    assert!(!backend.verify(&proof, &other).expect("failed to verify"));
}
