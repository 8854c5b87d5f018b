//! Witness encoding of named inputs against a declared parameter list.


use crate::{
    AbiParameter, AbiResult, AbiType, Config, Error, InputMap, InputValue,
    Scalar, WitnessMap,
};

/// A scalar-to-be produced by flattening an array input.
enum Leaf<'v> {
    Number(u64),
    Hex(&'v str),
}

/// Recursive witness encoder over an ordered parameter list.
///
/// Every leaf scalar implied by the declared types receives one sequential
/// witness index, starting from the configured base. A run either yields a
/// complete map or fails without output; the encoder itself holds no mutable
/// state, so repeated runs over identical inputs produce identical maps.
///
/// # Example
///
/// ```
/// use circuit_abi::{AbiParameter, AbiType, Config, Encoder, InputMap};
///
/// let parameters = vec![
///     AbiParameter {
///         name: "a".into(),
///         ty: AbiType::Field,
///         visibility: None,
///     },
///     AbiParameter {
///         name: "b".into(),
///         ty: AbiType::Field,
///         visibility: None,
///     },
/// ];
///
/// let inputs: InputMap = [
///     ("a".to_string(), "0x2".into()),
///     ("b".to_string(), 3.into()),
/// ]
/// .into_iter()
/// .collect();
///
/// let witness = Encoder::new(Config::default(), &parameters)
///     .encode(&inputs)
///     .expect("failed to encode the inputs");
///
/// assert_eq!(witness.get(&0).map(|s| s.as_str()), Some("0x2"));
/// assert_eq!(witness.get(&1).map(|s| s.as_str()), Some("0x3"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    config: Config,
    parameters: &'a [AbiParameter],
    base: usize,
}

impl<'a> Encoder<'a> {
    /// Create an encoder assigning witness indices from zero.
    pub const fn new(config: Config, parameters: &'a [AbiParameter]) -> Self {
        Self::with_base(config, parameters, 0)
    }

    /// Create an encoder assigning witness indices from `base`.
    pub const fn with_base(
        config: Config,
        parameters: &'a [AbiParameter],
        base: usize,
    ) -> Self {
        Self {
            config,
            parameters,
            base,
        }
    }

    /// Encoding configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// First witness index the encoder assigns.
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Witness index one past the encoder's assignment range.
    ///
    /// Derived from the declared types alone; this is where a caller's index
    /// cursor resumes after a successful encode.
    pub fn next_index(&self) -> usize {
        self.base
            + self
                .parameters
                .iter()
                .map(AbiParameter::leaves)
                .sum::<usize>()
    }

    /// Encode the named inputs into a fresh witness map.
    ///
    /// Parameters are visited in declaration order and every input is
    /// matched against its declared type; any mismatch aborts the run
    /// without producing a map.
    pub fn encode(&self, inputs: &InputMap) -> AbiResult<WitnessMap> {
        let mut witness = WitnessMap::new();
        let mut index = self.base;

        for parameter in self.parameters {
            let value = inputs.get(&parameter.name).ok_or_else(|| {
                Error::MissingParameter {
                    name: parameter.name.clone(),
                }
            })?;

            self.encode_value(
                &mut witness,
                &mut index,
                &parameter.name,
                &parameter.ty,
                value,
            )?;
        }

        Ok(witness)
    }

    fn encode_value(
        &self,
        witness: &mut WitnessMap,
        index: &mut usize,
        name: &str,
        ty: &AbiType,
        value: &InputValue,
    ) -> AbiResult<()> {
        match ty {
            AbiType::Field => {
                self.encode_scalar(witness, index, name, None, value)
            }

            AbiType::Integer { width, .. } => {
                self.encode_scalar(witness, index, name, Some(*width), value)
            }

            AbiType::Array { element, .. } => {
                let elements = match value {
                    InputValue::Sequence(elements) => elements,
                    other => {
                        return Err(Error::TypeMismatch {
                            name: name.into(),
                            expected: "array",
                            found: other.kind(),
                        })
                    }
                };

                let expected = ty.leaves();
                let mut leaves = Vec::with_capacity(expected);

                self.flatten(name, elements, element, &mut leaves)?;

                if leaves.len() != expected {
                    return Err(Error::LengthMismatch {
                        name: name.into(),
                        expected,
                        found: leaves.len(),
                    });
                }

                let width = match element.leaf_type() {
                    AbiType::Integer { width, .. } => Some(*width),
                    _ => None,
                };

                for leaf in leaves {
                    self.encode_leaf(witness, index, name, width, leaf)?;
                }

                Ok(())
            }

            AbiType::String { length } => {
                self.encode_string(witness, index, name, *length, value)
            }

            AbiType::Struct { fields } => {
                let mapping = match value {
                    InputValue::Mapping(mapping) => mapping,
                    other => {
                        return Err(Error::TypeMismatch {
                            name: name.into(),
                            expected: "struct",
                            found: other.kind(),
                        })
                    }
                };

                // fields reuse the parent's running index so nested
                // assignments stay contiguous
                for field in fields {
                    let value = mapping.get(&field.name).ok_or_else(|| {
                        Error::MissingParameter {
                            name: field.name.clone(),
                        }
                    })?;

                    self.encode_value(
                        witness,
                        index,
                        &field.name,
                        &field.ty,
                        value,
                    )?;
                }

                Ok(())
            }

            AbiType::Unknown => Err(Error::UnsupportedType {
                name: name.into(),
            }),
        }
    }

    fn encode_scalar(
        &self,
        witness: &mut WitnessMap,
        index: &mut usize,
        name: &str,
        width: Option<u32>,
        value: &InputValue,
    ) -> AbiResult<()> {
        let leaf = match value {
            InputValue::Number(value) => Leaf::Number(*value),
            InputValue::String(value) => Leaf::Hex(value),
            other => {
                return Err(Error::TypeMismatch {
                    name: name.into(),
                    expected: "integer",
                    found: other.kind(),
                })
            }
        };

        self.encode_leaf(witness, index, name, width, leaf)
    }

    fn encode_leaf(
        &self,
        witness: &mut WitnessMap,
        index: &mut usize,
        name: &str,
        width: Option<u32>,
        leaf: Leaf<'_>,
    ) -> AbiResult<()> {
        let scalar = match leaf {
            Leaf::Number(value) => {
                if let Some(width) = width {
                    if width > u64::BITS {
                        return Err(Error::UnsupportedWidth {
                            name: name.into(),
                            width,
                        });
                    }
                }

                Scalar::from(value)
            }

            Leaf::Hex(value) => self.wrap_hex(name, value)?,
        };

        witness.insert(*index, scalar);
        *index += 1;

        Ok(())
    }

    fn wrap_hex(&self, name: &str, value: &str) -> AbiResult<Scalar> {
        let scalar =
            Scalar::new(value).ok_or_else(|| Error::InvalidFormat {
                name: name.into(),
            })?;

        if self.config.require_hex_digits {
            let digits = scalar.digits();

            if digits.is_empty()
                || !digits.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(Error::InvalidFormat { name: name.into() });
            }
        }

        Ok(scalar)
    }

    /// Flatten an arbitrarily nested sequence into scalar leaves.
    ///
    /// Inputs flatter than the declared shape are accepted as long as the
    /// total leaf count matches; inputs nested deeper than the declared
    /// shape are a type mismatch.
    fn flatten<'v>(
        &self,
        name: &str,
        elements: &'v [InputValue],
        element: &AbiType,
        leaves: &mut Vec<Leaf<'v>>,
    ) -> AbiResult<()> {
        for value in elements {
            match (value, element) {
                (
                    InputValue::Sequence(inner),
                    AbiType::Array {
                        element: nested, ..
                    },
                ) => self.flatten(name, inner, nested, leaves)?,

                (InputValue::Sequence(_), _) => {
                    return Err(Error::TypeMismatch {
                        name: name.into(),
                        expected: element.kind(),
                        found: value.kind(),
                    })
                }

                (InputValue::String(text), AbiType::String { length }) => {
                    self.expand_text(name, text, *length, leaves)?
                }

                (InputValue::Number(value), _) => {
                    leaves.push(Leaf::Number(*value))
                }

                (InputValue::String(value), _) => {
                    leaves.push(Leaf::Hex(value))
                }

                (InputValue::Mapping(_), _) => {
                    return Err(Error::TypeMismatch {
                        name: name.into(),
                        expected: element.kind(),
                        found: value.kind(),
                    })
                }
            }
        }

        Ok(())
    }

    /// Expand a string element nested in an array into one leaf per byte.
    fn expand_text(
        &self,
        name: &str,
        text: &str,
        length: usize,
        leaves: &mut Vec<Leaf<'_>>,
    ) -> AbiResult<()> {
        let bytes = text.as_bytes();

        if !self.config.pad_string_elements && bytes.len() != length {
            return Err(Error::LengthMismatch {
                name: name.into(),
                expected: length,
                found: bytes.len(),
            });
        }

        // short strings pad with zero bytes; overlong ones truncate to the
        // declared length
        for position in 0..length {
            let byte = bytes.get(position).copied().unwrap_or(0);

            leaves.push(Leaf::Number(u64::from(byte)));
        }

        Ok(())
    }

    /// Encode a top-level string parameter, one leaf per byte.
    ///
    /// Top-level strings never pad, regardless of configuration.
    fn encode_string(
        &self,
        witness: &mut WitnessMap,
        index: &mut usize,
        name: &str,
        length: usize,
        value: &InputValue,
    ) -> AbiResult<()> {
        let text = match value {
            InputValue::String(text) => text,
            other => {
                return Err(Error::TypeMismatch {
                    name: name.into(),
                    expected: "string",
                    found: other.kind(),
                })
            }
        };

        let bytes = text.as_bytes();

        if bytes.len() != length {
            return Err(Error::LengthMismatch {
                name: name.into(),
                expected: length,
                found: bytes.len(),
            });
        }

        for byte in bytes {
            witness.insert(*index, Scalar::from(u64::from(*byte)));
            *index += 1;
        }

        Ok(())
    }
}
