use circuit_abi::*;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

// hard limit for generated lengths and field counts
const LIMIT: usize = 6;

/// Seeded generator of matched circuit manifests and input maps.
pub struct AbiGenerator {
    rng: StdRng,
    name_index: usize,
}

impl AbiGenerator {
    pub fn new(seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        let name_index = 0;

        Self { rng, name_index }
    }

    /// Generate a unique parameter name.
    pub fn gen_name(&mut self) -> String {
        let suffix: String = (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(4)
            .map(char::from)
            .collect();

        let name = format!("p{}_{}", self.name_index, suffix.to_lowercase());
        self.name_index += 1;

        name
    }

    pub fn gen_scalar(&mut self) -> Scalar {
        Scalar::from(self.gen::<u64>())
    }

    pub fn gen_column(&mut self, leaves: usize) -> Vec<Scalar> {
        (0..leaves).map(|_| self.gen_scalar()).collect()
    }

    pub fn gen_type(&mut self, depth: usize) -> AbiType {
        let variants = if depth == 0 { 3 } else { 5 };

        match self.gen_range(0..variants) {
            0 => AbiType::Field,

            1 => self.gen_integer_type(),

            2 => AbiType::String {
                length: self.gen_range(1..LIMIT),
            },

            3 => self.gen_array_type(depth - 1),

            _ => {
                let fields = (0..self.gen_range(1..4))
                    .map(|_| StructField {
                        name: self.gen_name(),
                        ty: self.gen_type(depth - 1),
                    })
                    .collect();

                AbiType::Struct { fields }
            }
        }
    }

    pub fn gen_integer_type(&mut self) -> AbiType {
        let widths = [8u32, 16, 32, 64, 128];
        let width = widths[self.gen_range(0..widths.len())];
        let sign = if self.gen() {
            Sign::Signed
        } else {
            Sign::Unsigned
        };

        AbiType::Integer { sign, width }
    }

    /// Generate an array type; element types stay within what the encoder's
    /// flattener walks, so arrays never nest structs.
    pub fn gen_array_type(&mut self, depth: usize) -> AbiType {
        let variants = if depth == 0 { 3 } else { 4 };

        let element = match self.gen_range(0..variants) {
            0 => AbiType::Field,
            1 => self.gen_integer_type(),
            2 => AbiType::String {
                length: self.gen_range(1..LIMIT),
            },
            _ => self.gen_array_type(depth - 1),
        };

        AbiType::Array {
            length: self.gen_range(1..LIMIT),
            element: Box::new(element),
        }
    }

    pub fn gen_parameter(&mut self, depth: usize) -> AbiParameter {
        let visibility = match self.gen_range(0..3) {
            0 => Some(Visibility::Private),
            1 => Some(Visibility::Public),
            _ => None,
        };

        AbiParameter {
            name: self.gen_name(),
            ty: self.gen_type(depth),
            visibility,
        }
    }

    pub fn gen_abi(&mut self, parameters: usize) -> Abi {
        let parameters =
            (0..parameters).map(|_| self.gen_parameter(2)).collect();

        Abi { parameters }
    }

    /// Generate a value matching the declared type, so the pair always
    /// encodes.
    pub fn gen_value(&mut self, ty: &AbiType) -> InputValue {
        match ty {
            AbiType::Field => {
                if self.gen() {
                    InputValue::Number(self.gen())
                } else {
                    InputValue::String(format!("0x{:x}", self.gen::<u128>()))
                }
            }

            AbiType::Integer { width, .. } => {
                if *width > u64::BITS {
                    InputValue::String(format!("0x{:x}", self.gen::<u128>()))
                } else {
                    let value = match *width {
                        w if w >= u64::BITS => self.gen(),
                        w => self.gen::<u64>() & ((1 << w) - 1),
                    };

                    if self.gen() {
                        InputValue::Number(value)
                    } else {
                        InputValue::String(format!("0x{:x}", value))
                    }
                }
            }

            AbiType::String { length } => {
                let text: String = (&mut self.rng)
                    .sample_iter(&Alphanumeric)
                    .take(*length)
                    .map(char::from)
                    .collect();

                InputValue::String(text)
            }

            AbiType::Array { length, element } => InputValue::Sequence(
                (0..*length).map(|_| self.gen_value(element)).collect(),
            ),

            AbiType::Struct { fields } => InputValue::Mapping(
                fields
                    .iter()
                    .cloned()
                    .map(|f| (f.name, self.gen_value(&f.ty)))
                    .collect(),
            ),

            AbiType::Unknown => InputValue::Number(0),
        }
    }

    pub fn gen_inputs(&mut self, abi: &Abi) -> InputMap {
        abi.parameters
            .iter()
            .cloned()
            .map(|p| (p.name, self.gen_value(&p.ty)))
            .collect()
    }

    pub fn gen_manifest(&mut self, parameters: usize) -> CircuitManifest {
        let abi = self.gen_abi(parameters);

        let bytecode: String = (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        CircuitManifest {
            version: "1.0.0".into(),
            hash: Some(self.gen()),
            abi,
            bytecode,
        }
    }

    /// Generate a manifest together with inputs that encode against it.
    pub fn gen_circuit(
        &mut self,
        parameters: usize,
    ) -> (CircuitManifest, InputMap) {
        let manifest = self.gen_manifest(parameters);
        let inputs = self.gen_inputs(&manifest.abi);

        (manifest, inputs)
    }
}

impl RngCore for AbiGenerator {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

#[test]
fn generator_is_rng() {
    let mut generator = AbiGenerator::new(0x348);

    let mut bytes = vec![0xfa; 32];

    generator
        .try_fill_bytes(&mut bytes)
        .expect("failed to fill bytes");
}

#[test]
fn generated_names_are_unique() {
    use std::collections::HashSet;

    let mut generator = AbiGenerator::new(0x348);

    let names: HashSet<String> =
        (0..100).map(|_| generator.gen_name()).collect();

    assert_eq!(names.len(), 100);
}

#[test]
fn generated_pairs_encode() {
    let cases = vec![0, 1, 2, 5, 10];

    for parameters in cases {
        let mut generator = AbiGenerator::new(0x348);

        let (manifest, inputs) = generator.gen_circuit(parameters);

        assert_eq!(manifest.parameters().len(), parameters);

        let witness = Encoder::new(Config::DEFAULT, manifest.parameters())
            .encode(&inputs)
            .expect("failed to encode a generated pair");

        let leaves = manifest.abi.leaves();

        assert_eq!(witness.len(), leaves);
        assert!(witness.keys().copied().eq(0..leaves));
    }
}
