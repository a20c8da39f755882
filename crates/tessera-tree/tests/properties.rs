//! Structural properties of arbitrary trees.

use proptest::prelude::*;
use tessera_tree::{Cursor, TreeBuilder, Value, replay};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(Value::Unsigned),
        any::<f64>()
            .prop_filter("NaN is not equal to itself", |f| !f.is_nan())
            .prop_map(Value::Float),
        "[a-z\u{e9}\u{1F600}\"\\\\]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-c]{1,2}", inner), 0..6)
                .prop_map(|members| Value::Object(members.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn clone_is_equal(value in arb_value()) {
        prop_assert_eq!(value.clone(), value);
    }

    #[test]
    fn replay_rebuilds_the_tree(value in arb_value()) {
        let mut builder = TreeBuilder::new();
        replay(&value, &mut builder);
        prop_assert_eq!(builder.finish().unwrap(), value);
    }

    #[test]
    fn iteration_visits_size_elements(value in arb_value()) {
        prop_assert_eq!(value.iter().count(), value.size());
        prop_assert_eq!(value.iter().rev().count(), value.size());

        let mut cursor = Cursor::begin(&value);
        let mut steps = 0;
        while !cursor.is_end() {
            prop_assert!(cursor.value().is_ok());
            cursor.advance().unwrap();
            steps += 1;
        }
        prop_assert_eq!(steps, value.size());
        prop_assert!(cursor.try_eq(&Cursor::end(&value)).unwrap());
    }

    #[test]
    fn object_equality_ignores_order(
        members in prop::collection::btree_map("[a-z]{1,3}", any::<i32>(), 0..8)
    ) {
        let forward: Value = members.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let backward: Value = members.iter().rev().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(forward, backward);
    }
}
