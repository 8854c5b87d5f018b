use circuit_abi::*;

fn parameter(name: &str, ty: AbiType) -> AbiParameter {
    AbiParameter {
        name: name.into(),
        ty,
        visibility: None,
    }
}

fn field(name: &str) -> AbiParameter {
    parameter(name, AbiType::Field)
}

fn integer(name: &str, width: u32) -> AbiParameter {
    parameter(name, AbiType::Integer {
        sign: Sign::Unsigned,
        width,
    })
}

fn inputs<const N: usize>(entries: [(&str, InputValue); N]) -> InputMap {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[test]
fn fields_encode_to_contiguous_indices() {
    let parameters = vec![field("a"), field("b")];

    let inputs = inputs([("a", 2.into()), ("b", "0x3".into())]);

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs)
        .expect("failed to encode two fields");

    let json = serde_json::to_string(&witness).expect("failed to render the witness");

    assert_eq!(json, r#"{"0":"0x2","1":"0x3"}"#);
}

#[test]
fn numbers_render_as_minimal_hex() {
    let parameters = vec![
        integer("zero", 8),
        integer("small", 32),
        integer("max", 64),
    ];

    let inputs = inputs([
        ("zero", 0.into()),
        ("small", 5.into()),
        ("max", u64::MAX.into()),
    ]);

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs)
        .expect("failed to encode the integers");

    assert_eq!(witness.get(&0).map(|s| s.as_str()), Some("0x0"));
    assert_eq!(witness.get(&1).map(|s| s.as_str()), Some("0x5"));
    assert_eq!(
        witness.get(&2).map(|s| s.as_str()),
        Some("0xffffffffffffffff")
    );
}

#[test]
fn wide_integers_reject_numbers_but_accept_hex() {
    let parameters = vec![integer("wide", 128)];

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("wide", 1.into())]))
        .expect_err("a numeric literal shouldn't fit a 128-bit integer");

    assert!(matches!(
        err,
        Error::UnsupportedWidth { width: 128, .. }
    ));

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([(
            "wide",
            "0xffffffffffffffffffffffffffffffff".into(),
        )]))
        .expect("failed to encode a hex literal for a 128-bit integer");

    assert_eq!(
        witness.get(&0).map(|s| s.as_str()),
        Some("0xffffffffffffffffffffffffffffffff")
    );
}

#[test]
fn array_leaf_counts_are_checked() {
    let parameters = vec![parameter(
        "triple",
        AbiType::Array {
            length: 3,
            element: Box::new(AbiType::Field),
        },
    )];

    let short = InputValue::from(vec![1.into(), 2.into()]);

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("triple", short)]))
        .expect_err("two values shouldn't fill a three-element array");

    assert!(matches!(
        err,
        Error::LengthMismatch {
            expected: 3,
            found: 2,
            ..
        }
    ));

    let exact = InputValue::from(vec![1.into(), 2.into(), 3.into()]);

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("triple", exact)]))
        .expect("failed to encode the array");

    assert_eq!(witness.len(), 3);
    assert_eq!(witness.get(&2).map(|s| s.as_str()), Some("0x3"));
}

#[test]
fn flat_and_nested_sequences_encode_alike() {
    let parameters = vec![parameter(
        "matrix",
        AbiType::Array {
            length: 2,
            element: Box::new(AbiType::Array {
                length: 2,
                element: Box::new(AbiType::Field),
            }),
        },
    )];

    let nested = InputValue::from(vec![
        vec![InputValue::from(1), 2.into()].into(),
        vec![InputValue::from(3), 4.into()].into(),
    ]);

    let flat =
        InputValue::from(vec![1.into(), 2.into(), 3.into(), 4.into()]);

    let encoder = Encoder::new(Config::DEFAULT, &parameters);

    let from_nested = encoder
        .encode(&inputs([("matrix", nested)]))
        .expect("failed to encode the nested matrix");

    let from_flat = encoder
        .encode(&inputs([("matrix", flat)]))
        .expect("failed to encode the flattened matrix");

    assert_eq!(from_nested, from_flat);
    assert_eq!(from_nested.len(), 4);

    let deeper = InputValue::from(vec![
        InputValue::from(vec![InputValue::from(vec![
            InputValue::from(1),
            2.into(),
        ])]),
        vec![InputValue::from(vec![InputValue::from(3), 4.into()])].into(),
    ]);

    let err = encoder
        .encode(&inputs([("matrix", deeper)]))
        .expect_err("values nested deeper than the declared shape shouldn't encode");

    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn struct_elements_encode_only_when_preflattened() {
    let parameters = vec![parameter(
        "points",
        AbiType::Array {
            length: 2,
            element: Box::new(AbiType::Struct {
                fields: vec![
                    StructField {
                        name: "x".into(),
                        ty: AbiType::Field,
                    },
                    StructField {
                        name: "y".into(),
                        ty: AbiType::Field,
                    },
                ],
            }),
        },
    )];

    let flat =
        InputValue::from(vec![1.into(), 2.into(), 3.into(), 4.into()]);

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("points", flat)]))
        .expect("failed to encode pre-flattened struct elements");

    assert_eq!(witness.len(), 4);

    let mut point = InputMap::new();
    point.insert("x".into(), 1.into());
    point.insert("y".into(), 2.into());

    let structured = InputValue::from(vec![
        InputValue::Mapping(point.clone()),
        InputValue::Mapping(point),
    ]);

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("points", structured)]))
        .expect_err("mappings under an array shouldn't encode");

    assert!(matches!(
        err,
        Error::TypeMismatch {
            found: "mapping",
            ..
        }
    ));
}

#[test]
fn nested_strings_pad_and_truncate() {
    let parameters = vec![parameter(
        "words",
        AbiType::Array {
            length: 2,
            element: Box::new(AbiType::String { length: 5 }),
        },
    )];

    let words = InputValue::from(vec!["abc".into(), "toolong".into()]);

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("words", words)]))
        .expect("failed to encode the padded strings");

    assert_eq!(witness.len(), 10);

    // 'a' 'b' 'c' and two padding bytes
    assert_eq!(witness.get(&0).map(|s| s.as_str()), Some("0x61"));
    assert_eq!(witness.get(&2).map(|s| s.as_str()), Some("0x63"));
    assert_eq!(witness.get(&3).map(|s| s.as_str()), Some("0x0"));
    assert_eq!(witness.get(&4).map(|s| s.as_str()), Some("0x0"));

    // "toolong" truncates to "toolo"
    assert_eq!(witness.get(&5).map(|s| s.as_str()), Some("0x74"));
    assert_eq!(witness.get(&9).map(|s| s.as_str()), Some("0x6f"));
}

#[test]
fn strict_string_elements_reject_padding() {
    let parameters = vec![parameter(
        "word",
        AbiType::Array {
            length: 1,
            element: Box::new(AbiType::String { length: 5 }),
        },
    )];

    let mut config = Config::DEFAULT;
    config.with_pad_string_elements(false);

    let err = Encoder::new(config, &parameters)
        .encode(&inputs([("word", vec!["abc".into()].into())]))
        .expect_err("a short string shouldn't pad under a strict config");

    assert!(matches!(
        err,
        Error::LengthMismatch {
            expected: 5,
            found: 3,
            ..
        }
    ));

    let witness = Encoder::new(config, &parameters)
        .encode(&inputs([("word", vec!["exact".into()].into())]))
        .expect("failed to encode an exact string under a strict config");

    assert_eq!(witness.len(), 5);
}

#[test]
fn top_level_strings_are_always_exact() {
    let parameters = vec![parameter("greeting", AbiType::String { length: 5 })];

    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("greeting", "hello".into())]))
        .expect("failed to encode an exact string");

    assert_eq!(witness.len(), 5);
    assert_eq!(witness.get(&0).map(|s| s.as_str()), Some("0x68"));
    assert_eq!(witness.get(&4).map(|s| s.as_str()), Some("0x6f"));

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("greeting", "hi".into())]))
        .expect_err("a short top-level string shouldn't pad");

    assert!(matches!(
        err,
        Error::LengthMismatch {
            expected: 5,
            found: 2,
            ..
        }
    ));
}

#[test]
fn struct_fields_share_the_running_index() {
    let parameters = vec![
        parameter(
            "point",
            AbiType::Struct {
                fields: vec![
                    StructField {
                        name: "x".into(),
                        ty: AbiType::Field,
                    },
                    StructField {
                        name: "y".into(),
                        ty: AbiType::Field,
                    },
                ],
            },
        ),
        field("tail"),
    ];

    let point = inputs([("x", 7.into()), ("y", 9.into())]);

    let encoder = Encoder::with_base(Config::DEFAULT, &parameters, 2);

    let witness = encoder
        .encode(&inputs([
            ("point", InputValue::Mapping(point)),
            ("tail", 1.into()),
        ]))
        .expect("failed to encode the struct");

    assert_eq!(encoder.next_index(), 5);

    assert_eq!(witness.get(&2).map(|s| s.as_str()), Some("0x7"));
    assert_eq!(witness.get(&3).map(|s| s.as_str()), Some("0x9"));
    assert_eq!(witness.get(&4).map(|s| s.as_str()), Some("0x1"));
}

#[test]
fn missing_values_are_reported_by_name() {
    let parameters = vec![field("a"), field("b")];

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("a", 1.into())]))
        .expect_err("a missing input shouldn't encode");

    assert!(matches!(err, Error::MissingParameter { name } if name == "b"));

    let parameters = vec![parameter(
        "point",
        AbiType::Struct {
            fields: vec![StructField {
                name: "x".into(),
                ty: AbiType::Field,
            }],
        },
    )];

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("point", InputValue::Mapping(InputMap::new()))]))
        .expect_err("a missing struct field shouldn't encode");

    assert!(matches!(err, Error::MissingParameter { name } if name == "x"));
}

#[test]
fn shape_mismatches_are_reported() {
    let array = vec![parameter(
        "triple",
        AbiType::Array {
            length: 3,
            element: Box::new(AbiType::Field),
        },
    )];

    let err = Encoder::new(Config::DEFAULT, &array)
        .encode(&inputs([("triple", InputValue::Mapping(InputMap::new()))]))
        .expect_err("a mapping shouldn't encode as an array");

    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: "array",
            found: "mapping",
            ..
        }
    ));

    let structure = vec![parameter(
        "point",
        AbiType::Struct {
            fields: vec![StructField {
                name: "x".into(),
                ty: AbiType::Field,
            }],
        },
    )];

    let err = Encoder::new(Config::DEFAULT, &structure)
        .encode(&inputs([("point", 1.into())]))
        .expect_err("a number shouldn't encode as a struct");

    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: "struct",
            found: "number",
            ..
        }
    ));
}

#[test]
fn hex_values_require_the_prefix() {
    let parameters = vec![field("a")];

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("a", "123".into())]))
        .expect_err("a prefixless string shouldn't encode");

    assert!(matches!(err, Error::InvalidFormat { name } if name == "a"));

    // the default config trusts whatever follows the prefix
    let witness = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("a", "0xzz".into())]))
        .expect("failed to encode a prefixed value");

    assert_eq!(witness.get(&0).map(|s| s.as_str()), Some("0xzz"));

    let mut config = Config::DEFAULT;
    config.with_require_hex_digits(true);

    let err = Encoder::new(config, &parameters)
        .encode(&inputs([("a", "0xzz".into())]))
        .expect_err("non-hex digits shouldn't encode under a strict config");

    assert!(matches!(err, Error::InvalidFormat { .. }));

    let err = Encoder::new(config, &parameters)
        .encode(&inputs([("a", "0x".into())]))
        .expect_err("an empty digit run shouldn't encode under a strict config");

    assert!(matches!(err, Error::InvalidFormat { .. }));

    let witness = Encoder::new(config, &parameters)
        .encode(&inputs([("a", "0x2a".into())]))
        .expect("failed to encode a hex value under a strict config");

    assert_eq!(witness.get(&0).map(|s| s.as_str()), Some("0x2a"));
}

#[test]
fn unknown_kinds_parse_but_wont_encode() {
    let parameters: Vec<AbiParameter> =
        serde_json::from_str(r#"[{"name": "t", "type": {"kind": "tuple"}}]"#)
            .expect("failed to parse a parameter with an unrecognized kind");

    assert_eq!(parameters[0].leaves(), 0);

    let err = Encoder::new(Config::DEFAULT, &parameters)
        .encode(&inputs([("t", 0.into())]))
        .expect_err("an unrecognized kind shouldn't encode");

    assert!(matches!(err, Error::UnsupportedType { name } if name == "t"));
}

#[test]
fn encoding_is_deterministic() {
    let parameters = vec![
        field("a"),
        parameter(
            "pair",
            AbiType::Array {
                length: 2,
                element: Box::new(AbiType::Integer {
                    sign: Sign::Signed,
                    width: 32,
                }),
            },
        ),
    ];

    let inputs = inputs([
        ("a", "0x2".into()),
        ("pair", vec![3.into(), "0x4".into()].into()),
    ]);

    let encoder = Encoder::new(Config::DEFAULT, &parameters);

    let first = encoder.encode(&inputs).expect("failed to encode");
    let second = encoder.encode(&inputs).expect("failed to re-encode");

    assert_eq!(first, second);

    let first = serde_json::to_string(&first).expect("failed to render");
    let second = serde_json::to_string(&second).expect("failed to render");

    assert_eq!(first, second);
}
