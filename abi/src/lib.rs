#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Model
//!
//! A [`CircuitManifest`] declares an ordered list of typed parameters, each
//! described by an [`AbiType`]. Every declared type expands to a fixed
//! number of leaf scalars, and the [`Encoder`] assigns those leaves
//! sequential witness indices, producing the [`WitnessMap`] a proving
//! backend consumes. The [`Decoder`] inverts the walk over the solved
//! witness column an executor returns.
//!
//! [`Circuit`] ties a parsed manifest to a [`Backend`] implementation and
//! drives the full pipeline: encode, execute, prove, and verify.

mod abi;
mod backend;
mod config;
mod decoder;
mod encoder;
mod error;
mod manifest;
mod value;
mod witness;

use std::path::Path;

use tracing::{debug, info};

pub use abi::{Abi, AbiParameter, AbiType, Sign, StructField, Visibility};
pub use backend::{Backend, Proof};
pub use config::Config;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{AbiResult, Error};
pub use manifest::CircuitManifest;
pub use value::{InputMap, InputValue};
pub use witness::{Scalar, WitnessMap};

/// A circuit with no proving backend attached; supports encoding, decoding,
/// and layout inspection only.
pub type UnboundCircuit = Circuit<()>;

/// A parsed circuit bound to a proving backend.
///
/// The codec side ([`encode_inputs`] and [`decoder`]) works with any `B`;
/// the proving pipeline requires `B` to implement [`Backend`]. Proving and
/// verifying additionally require a prior [`setup_srs`] call, while
/// execution does not.
///
/// [`encode_inputs`]: Self::encode_inputs
/// [`decoder`]: Self::decoder
/// [`setup_srs`]: Self::setup_srs
#[derive(Debug)]
pub struct Circuit<B> {
    manifest: CircuitManifest,
    backend: B,
    config: Config,
    size: Option<u32>,
    srs_points: usize,
}

impl<B> Circuit<B> {
    /// Bind a parsed manifest to a proving backend.
    pub fn new(manifest: CircuitManifest, backend: B) -> Self {
        Self {
            manifest,
            backend,
            config: Config::DEFAULT,
            size: None,
            srs_points: 0,
        }
    }

    /// Parse a JSON manifest and bind it to a proving backend.
    pub fn from_json_manifest(json: &str, backend: B) -> AbiResult<Self> {
        CircuitManifest::from_json(json)
            .map(|manifest| Self::new(manifest, backend))
    }

    /// Replace the codec configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Declare the circuit size to use for SRS setup instead of deriving it
    /// from the bytecode.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Parsed manifest of the circuit.
    pub const fn manifest(&self) -> &CircuitManifest {
        &self.manifest
    }

    /// Codec configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Number of SRS points produced by setup; zero before [`setup_srs`].
    ///
    /// [`setup_srs`]: Self::setup_srs
    pub const fn srs_points(&self) -> usize {
        self.srs_points
    }

    /// Ordered parameter declarations of the circuit.
    pub fn parameters(&self) -> &[AbiParameter] {
        self.manifest.parameters()
    }

    /// Opaque circuit bytecode.
    pub fn bytecode(&self) -> &str {
        &self.manifest.bytecode
    }

    /// Release the backend handle.
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Encode named inputs into the witness map the backend consumes.
    pub fn encode_inputs(&self, inputs: &InputMap) -> AbiResult<WitnessMap> {
        let witness =
            Encoder::new(self.config, self.parameters()).encode(inputs)?;

        debug!(witnesses = witness.len(), "encoded initial witness");

        Ok(witness)
    }

    /// Positional reader over an executor's solved witness column.
    pub fn decoder<'a>(&'a self, column: &'a [Scalar]) -> Decoder<'a> {
        Decoder::new(self.parameters(), column)
    }
}

impl<B> Circuit<B>
where
    B: Backend,
{
    /// Prepare the backend SRS, covering the declared size when one was
    /// given and deriving the size from the bytecode otherwise. Returns the
    /// SRS point count.
    pub fn setup_srs(&mut self, srs_path: Option<&Path>) -> AbiResult<usize> {
        let points = match self.size {
            Some(size) => self.backend.setup_srs(size, srs_path)?,
            None => self
                .backend
                .setup_srs_from_bytecode(&self.manifest.bytecode, srs_path)?,
        };

        self.srs_points = points;

        info!(points, "SRS ready");

        Ok(points)
    }

    /// Encode the inputs and execute the circuit, returning the full solved
    /// witness column.
    ///
    /// Execution doesn't require a prior SRS setup.
    pub fn execute(&mut self, inputs: &InputMap) -> AbiResult<Vec<Scalar>> {
        let witness = self.encode_inputs(inputs)?;

        info!("executing circuit");

        let column = self.backend.execute(&self.manifest.bytecode, &witness)?;

        debug!(witnesses = column.len(), "execution solved the witness");

        Ok(column)
    }

    /// Derive the verification key of the circuit.
    pub fn verification_key(&mut self) -> AbiResult<String> {
        let key = self.backend.verification_key(&self.manifest.bytecode)?;

        Ok(key)
    }

    /// Encode the inputs and prove the circuit.
    ///
    /// Requires a prior [`setup_srs`] call. When no verification key is
    /// supplied, one is derived from the bytecode first.
    ///
    /// [`setup_srs`]: Self::setup_srs
    pub fn prove(
        &mut self,
        inputs: &InputMap,
        verification_key: Option<&str>,
    ) -> AbiResult<Proof> {
        if self.srs_points == 0 {
            return Err(Error::SrsNotSetup);
        }

        let witness = self.encode_inputs(inputs)?;

        let key = match verification_key {
            Some(key) => key.to_string(),
            None => self.verification_key()?,
        };

        info!("proving circuit");

        let proof =
            self.backend.prove(&self.manifest.bytecode, &witness, &key)?;

        debug!(bytes = proof.len(), "proof produced");

        Ok(proof)
    }

    /// Check a proof against the circuit's verification key.
    ///
    /// Requires a prior [`setup_srs`] call. When no verification key is
    /// supplied, one is derived from the bytecode first.
    ///
    /// [`setup_srs`]: Self::setup_srs
    pub fn verify(
        &mut self,
        proof: &Proof,
        verification_key: Option<&str>,
    ) -> AbiResult<bool> {
        if self.srs_points == 0 {
            return Err(Error::SrsNotSetup);
        }

        let key = match verification_key {
            Some(key) => key.to_string(),
            None => self.verification_key()?,
        };

        let verdict = self.backend.verify(proof, &key)?;

        info!(verdict, "proof verification finished");

        Ok(verdict)
    }
}
