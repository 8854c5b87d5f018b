use serde::{Deserialize, Serialize};

/// Declared interface of a circuit: its ordered, typed parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abi {
    /// Ordered parameter declarations; the order fixes the witness indices.
    pub parameters: Vec<AbiParameter>,
}

impl Abi {
    /// Total number of leaf scalars implied by all declared parameters.
    pub fn leaves(&self) -> usize {
        self.parameters.iter().map(AbiParameter::leaves).sum()
    }
}

/// A single declared circuit parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    /// Parameter name, the key callers use in the input map.
    pub name: String,
    /// Declared type of the parameter.
    #[serde(rename = "type")]
    pub ty: AbiType,
    /// Witness visibility, when the compiler declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl AbiParameter {
    /// Number of leaf scalars this parameter expands to.
    pub fn leaves(&self) -> usize {
        self.ty.leaves()
    }
}

/// Named, typed field of a struct parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    /// Field name, the key used inside the struct's input mapping.
    pub name: String,
    /// Declared type of the field.
    #[serde(rename = "type")]
    pub ty: AbiType,
}

/// Witness visibility of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// The witness stays private to the prover.
    Private,
    /// The witness is exposed as a public input.
    Public,
}

impl Visibility {
    /// Manifest spelling of the visibility.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

/// Signedness of an integer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Two's complement signed integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
}

/// Declared type of a parameter, tagged by the manifest's `kind` field.
///
/// Arrays nest arbitrarily, so multi-dimensional shapes are expressed as
/// arrays of arrays. A structurally well-formed description with an
/// unrecognized `kind` parses into [`AbiType::Unknown`] and is only rejected
/// once encoding reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AbiType {
    /// Unbounded field element; one leaf.
    Field,
    /// Fixed-width integer; one leaf.
    Integer {
        /// Signedness declared by the manifest.
        sign: Sign,
        /// Width in bits; may exceed the 64-bit literal range.
        width: u32,
    },
    /// Fixed-length homogeneous sequence.
    Array {
        /// Declared element count.
        length: usize,
        /// Element type; arrays nest through this.
        #[serde(rename = "type")]
        element: Box<AbiType>,
    },
    /// Fixed-length byte string; one leaf per byte.
    String {
        /// Declared length in bytes.
        length: usize,
    },
    /// Named product type with ordered fields.
    Struct {
        /// Ordered field declarations.
        fields: Vec<StructField>,
    },
    /// Unrecognized `kind` tag, kept so encoding can report it.
    #[serde(other)]
    Unknown,
}

impl AbiType {
    /// Total number of leaf scalars a value of this type expands to.
    pub fn leaves(&self) -> usize {
        match self {
            Self::Field | Self::Integer { .. } => 1,
            Self::Array { length, element } => length * element.leaves(),
            Self::String { length } => *length,
            Self::Struct { fields } => {
                fields.iter().map(|field| field.ty.leaves()).sum()
            }
            Self::Unknown => 0,
        }
    }

    /// Manifest spelling of the type's `kind` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Integer { .. } => "integer",
            Self::Array { .. } => "array",
            Self::String { .. } => "string",
            Self::Struct { .. } => "struct",
            Self::Unknown => "unknown",
        }
    }

    /// Innermost non-array type reached by descending element types.
    pub(crate) fn leaf_type(&self) -> &AbiType {
        match self {
            Self::Array { element, .. } => element.leaf_type(),
            other => other,
        }
    }
}

#[test]
fn leaf_count_follows_nesting() {
    assert_eq!(AbiType::Field.leaves(), 1);

    let int = AbiType::Integer {
        sign: Sign::Unsigned,
        width: 32,
    };
    assert_eq!(int.leaves(), 1);

    assert_eq!(AbiType::String { length: 5 }.leaves(), 5);

    let matrix = AbiType::Array {
        length: 3,
        element: Box::new(AbiType::Array {
            length: 2,
            element: Box::new(AbiType::Field),
        }),
    };
    assert_eq!(matrix.leaves(), 6);

    let composite = AbiType::Struct {
        fields: vec![
            StructField {
                name: "x".into(),
                ty: AbiType::Field,
            },
            StructField {
                name: "tag".into(),
                ty: AbiType::String { length: 4 },
            },
        ],
    };
    assert_eq!(composite.leaves(), 5);

    assert_eq!(AbiType::Unknown.leaves(), 0);
}

#[test]
fn types_parse_from_kind_tags() {
    let ty: AbiType =
        serde_json::from_str(r#"{"kind":"integer","sign":"unsigned","width":32}"#)
            .expect("failed to parse an integer type");

    assert_eq!(
        ty,
        AbiType::Integer {
            sign: Sign::Unsigned,
            width: 32
        }
    );

    let ty: AbiType = serde_json::from_str(
        r#"{"kind":"array","length":2,"type":{"kind":"string","length":3}}"#,
    )
    .expect("failed to parse an array type");

    assert_eq!(
        ty,
        AbiType::Array {
            length: 2,
            element: Box::new(AbiType::String { length: 3 })
        }
    );
}

#[test]
fn unknown_kinds_parse_and_count_zero_leaves() {
    let ty: AbiType = serde_json::from_str(r#"{"kind":"tuple","arity":2}"#)
        .expect("unrecognized kinds shouldn't fail to parse");

    assert_eq!(ty, AbiType::Unknown);
    assert_eq!(ty.leaves(), 0);
}
