use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named input values supplied by the caller, keyed by parameter name.
pub type InputMap = BTreeMap<String, InputValue>;

/// A loosely shaped input value matched against a declared type during
/// encoding.
///
/// The representation is untagged so the caller-facing JSON carries no
/// variant markers: numbers, strings, sequences, and mappings are told apart
/// by shape alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Numeric literal, limited to what 64 bits represent losslessly.
    Number(u64),
    /// `0x`-prefixed scalar for field and integer parameters, or raw text
    /// for string parameters.
    String(String),
    /// Element sequence for array parameters.
    Sequence(Vec<InputValue>),
    /// Field mapping for struct parameters.
    Mapping(InputMap),
}

impl InputValue {
    /// Shape name reported in type mismatch errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<u64> for InputValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<InputValue>> for InputValue {
    fn from(values: Vec<InputValue>) -> Self {
        Self::Sequence(values)
    }
}

impl From<InputMap> for InputValue {
    fn from(mapping: InputMap) -> Self {
        Self::Mapping(mapping)
    }
}

#[test]
fn untagged_shapes_parse() {
    let value: InputValue =
        serde_json::from_str("5").expect("failed to parse a number");
    assert_eq!(value, InputValue::Number(5));

    let value: InputValue =
        serde_json::from_str(r#""0x5""#).expect("failed to parse a string");
    assert_eq!(value, InputValue::from("0x5"));

    let value: InputValue = serde_json::from_str(r#"[[1,2],["0x3",4]]"#)
        .expect("failed to parse a nested sequence");
    assert_eq!(
        value,
        InputValue::from(vec![
            InputValue::from(vec![1.into(), 2.into()]),
            InputValue::from(vec!["0x3".into(), 4.into()]),
        ])
    );

    let value: InputValue = serde_json::from_str(r#"{"x":1,"tag":"ab"}"#)
        .expect("failed to parse a mapping");
    let mapping: InputMap = [
        ("x".to_string(), InputValue::from(1)),
        ("tag".to_string(), InputValue::from("ab")),
    ]
    .into_iter()
    .collect();
    assert_eq!(value, InputValue::from(mapping));
}

#[test]
fn input_maps_parse_by_name() {
    let inputs: InputMap =
        serde_json::from_str(r#"{"a":"0x2","b":3,"v":[1,2]}"#)
            .expect("failed to parse an input map");

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs.get("a"), Some(&InputValue::from("0x2")));
    assert_eq!(inputs.get("b"), Some(&InputValue::from(3)));
}
