//! Property-based tests for the Symbolic Value Bridge and Dispatch Shim
//!
//! Invariants that should hold for ALL inputs:
//! - Round-trip: decode(encode(v)) names the same symbolic variable as v
//! - Pass-through: concrete values survive encode and decode untouched
//! - Transparency: build_post_data is the identity on concrete-only forms
//! - Restoration only for singleton value lists

use std::collections::BTreeMap;
use std::sync::Arc;

use concolic_core::config::DEFAULT_TAG;
use concolic_core::features::dispatch::{build_post_data, parse_post_data, FormData};
use concolic_core::{SampleLibrary, SymbolicBridge, SymbolicKind, SymbolicValue, Value};
use proptest::prelude::*;

fn bridge() -> SymbolicBridge {
    SymbolicBridge::new(DEFAULT_TAG, Arc::new(SampleLibrary::new()))
}

fn symbolic_value() -> impl Strategy<Value = SymbolicValue> {
    let id = "[A-Za-z_][A-Za-z0-9_:.-]{0,24}";
    prop_oneof![
        (id, any::<i64>()).prop_map(|(id, n)| SymbolicValue::int(id, n)),
        (id, "[a-z ]{0,12}").prop_map(|(id, s)| SymbolicValue::string(id, s)),
    ]
}

fn concrete_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9).prop_map(Value::Float),
        "[a-zA-Z0-9 _.@-]{0,32}".prop_map(Value::Str),
    ]
}

// ============================================================================
// Bridge
// ============================================================================

proptest! {
    #[test]
    fn prop_round_trip_keeps_identifier(sym in symbolic_value()) {
        let bridge = bridge();
        let token = bridge.encode(&Value::from(sym.clone()));
        let raw = token.as_str().expect("symbolic values encode to strings");

        // Invariant: the token carries kind and identifier
        let expected = format!("{}:{}", sym.kind().tag(), sym.id());
        prop_assert!(raw.ends_with(&expected));

        let decoded = bridge.decode(raw);
        let decoded = decoded.as_symbolic().expect("token decodes to a symbolic value");
        prop_assert_eq!(decoded.id(), sym.id());
        prop_assert_eq!(decoded.kind(), sym.kind());
    }

    #[test]
    fn prop_concrete_values_pass_through(value in concrete_value()) {
        let bridge = bridge();
        prop_assert_eq!(bridge.encode(&value), value.clone());

        if let Value::Str(s) = &value {
            prop_assert_eq!(bridge.decode(s), value.clone());
        }
    }

    #[test]
    fn prop_unknown_kind_is_passed_through(kind in "[a-z_]{1,12}", id in "[a-z0-9]{1,8}") {
        prop_assume!(SymbolicKind::from_tag(&kind).is_none());
        let raw = format!("{}{}:{}", DEFAULT_TAG, kind, id);
        prop_assert_eq!(bridge().decode(&raw), Value::Str(raw.clone()));
        prop_assert!(bridge().try_decode(&raw).is_err());
    }
}

// ============================================================================
// Dispatch shim
// ============================================================================

proptest! {
    #[test]
    fn prop_build_post_data_transparent_on_concrete(
        fields in prop::collection::btree_map("[a-z_]{1,10}", concrete_value(), 0..8)
    ) {
        prop_assert_eq!(build_post_data(&bridge(), &fields), fields);
    }

    #[test]
    fn prop_only_singletons_restored(
        syms in prop::collection::vec(symbolic_value(), 2..5)
    ) {
        let bridge = bridge();
        let mut raw = FormData::new();
        for sym in &syms {
            let token = bridge.encode(&Value::from(sym.clone()));
            raw.append("many", token.to_form_string());
        }
        raw.append("one", bridge.encode(&Value::from(syms[0].clone())).to_form_string());

        let parsed = parse_post_data(&bridge, &raw);
        prop_assert!(parsed.get_list("many").iter().all(|v| !v.is_symbolic()));
        prop_assert_eq!(parsed.get_list("many").len(), syms.len());
        prop_assert!(parsed.get("one").map(Value::is_symbolic).unwrap_or(false));
    }

    #[test]
    fn prop_parse_does_not_mutate_input(
        fields in prop::collection::btree_map("[a-z_]{1,10}", "[a-z0-9]{0,10}", 0..8)
    ) {
        let raw: FormData<String> = fields.into_iter().collect();
        let before = raw.clone();
        let _ = parse_post_data(&bridge(), &raw);
        prop_assert_eq!(raw, before);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_symbolic_int_x1_token() {
    let bridge = bridge();
    let token = bridge.encode(&Value::from(SymbolicValue::int("x1", 0)));
    let raw = token.as_str().unwrap();
    assert!(raw.contains("concolic_int:x1"));

    let decoded = bridge.decode(raw);
    let decoded = decoded.as_symbolic().unwrap();
    assert_eq!(decoded.kind(), SymbolicKind::Int);
    assert_eq!(decoded.id(), "x1");
}

#[test]
fn test_post_data_round_trip_mixed() {
    let bridge = bridge();
    let mut fields = BTreeMap::new();
    fields.insert("zoobars".to_string(), Value::from(SymbolicValue::int("amount", 0)));
    fields.insert("recipient".to_string(), Value::from(SymbolicValue::string("who", "")));
    fields.insert("submission".to_string(), Value::from("Send"));

    let built = build_post_data(&bridge, &fields);
    let raw: FormData<String> = built.iter().map(|(k, v)| (k.clone(), v.to_form_string())).collect();
    let parsed = parse_post_data(&bridge, &raw);

    assert_eq!(parsed.get("zoobars").and_then(Value::as_symbolic).map(|s| s.id()), Some("amount"));
    assert_eq!(parsed.get("recipient").and_then(Value::as_symbolic).map(|s| s.id()), Some("who"));
    assert_eq!(parsed.get("submission"), Some(&Value::from("Send")));
}
