//! Text round-trip properties.

use proptest::prelude::*;
use tessera_format::{FormatOptions, reformat, to_string, to_string_pretty, to_string_with};
use tessera_parse::ParseOptions;
use tessera_tree::{Value, parse};

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("JSON has no infinities or NaN", |f| f.is_finite())
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(Value::Unsigned),
        finite_f64().prop_map(Value::Float),
        "[a-z \u{e9}\u{1F600}\"\\\\\n\t\u{1}/]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-c\u{e9}\"]{0,2}", inner), 0..6)
                .prop_map(|members| Value::Object(members.into_iter().collect())),
        ]
    })
}

fn arb_options() -> impl Strategy<Value = FormatOptions> {
    (0usize..5, prop::sample::select(vec![' ', '\t']), any::<bool>(), any::<bool>()).prop_map(
        |(indent, c, ensure_ascii, sort_keys)| {
            FormatOptions::new()
                .indent(indent)
                .indent_char(c)
                .ensure_ascii(ensure_ascii)
                .sort_keys(sort_keys)
        },
    )
}

proptest! {
    #[test]
    fn text_round_trips(value in arb_value(), options in arb_options()) {
        let text = to_string_with(&value, options);
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn reformatting_matches_tree_output(value in arb_value()) {
        let compact = to_string(&value);
        let pretty = to_string_pretty(&value);
        let reformatted = reformat(
            compact.as_bytes(),
            ParseOptions::default(),
            FormatOptions::pretty(),
        )
        .unwrap();
        prop_assert_eq!(reformatted, pretty);
    }

    #[test]
    fn ensure_ascii_output_is_ascii(value in arb_value()) {
        let text = to_string_with(&value, FormatOptions::new().ensure_ascii(true));
        prop_assert!(text.is_ascii());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn doubles_round_trip_bit_identical(f in finite_f64()) {
        let text = to_string(&Value::Float(f));
        let back = parse(&text).unwrap();
        prop_assert!(back.is_float(), "{} read back as {:?}", text, back);
        prop_assert_eq!(back.as_f64().unwrap().to_bits(), f.to_bits(), "{}", text);

        let oracle: f64 = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(oracle.to_bits(), f.to_bits(), "{}", text);
    }
}
