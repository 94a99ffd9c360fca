//! Edge cases of the Mutation Testing Engine
//!
//! Covers:
//! - mutation soundness (|operators| - 1 siblings, operator-only difference)
//! - dead-mutation filtering against brute-force evaluation
//! - skipped shapes, deduplicated diagnostics
//! - FieldError propagation and suppression
//! - NULL columns, empty tables, implicit `exact`

use std::collections::BTreeSet;
use std::sync::Arc;

use concolic_core::features::data_access::FieldKind;
use concolic_core::features::mutation::{Decomposition, DiagnosticRegistry};
use concolic_core::{
    ConcolicError, FilterArgs, FilterPredicate, Lookup, Manager, MemoryStore, ModelMeta, MutationAwareManager,
    MutationConfig, MutationEngine, MutationLog, QuerySet, SymbolicValue, Value,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct Fixture {
    store: Arc<MemoryStore>,
    log: Arc<MutationLog>,
    engine: Arc<MutationEngine>,
}

impl Fixture {
    fn new(config: MutationConfig, zoobars: &[Option<i64>]) -> Self {
        let store = MemoryStore::new();
        store.create_model(
            ModelMeta::new("Transfer")
                .field("recipient", FieldKind::Text)
                .nullable_field("zoobars", FieldKind::Int),
        );
        for z in zoobars {
            let value = z.map(Value::Int).unwrap_or(Value::Null);
            store
                .insert("Transfer", [("recipient", Value::from("bob")), ("zoobars", value)])
                .unwrap();
        }
        let log = Arc::new(MutationLog::new());
        let engine = Arc::new(MutationEngine::new(config, log.clone(), Arc::new(DiagnosticRegistry::new())));
        Self { store, log, engine }
    }

    fn zoobar_rows(values: &[i64]) -> Self {
        let rows: Vec<Option<i64>> = values.iter().copied().map(Some).collect();
        Self::new(MutationConfig::default(), &rows)
    }

    fn manager(&self) -> MutationAwareManager<concolic_core::features::data_access::MemoryManager> {
        MutationAwareManager::new(self.store.manager("Transfer").unwrap(), self.engine.clone())
    }

    fn plain(&self) -> Box<dyn QuerySet> {
        self.store.manager("Transfer").unwrap().get_queryset()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Mutation soundness
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_sibling_count_and_shape(op_idx in 0usize..5, value in any::<i64>()) {
        let fixture = Fixture::zoobar_rows(&[]);
        let original = FilterPredicate::new("zoobars", Lookup::MUTABLE[op_idx], value);
        let siblings = fixture.engine.mutation_set(&original);

        prop_assert_eq!(siblings.len(), Lookup::MUTABLE.len() - 1);
        let ops: BTreeSet<&str> = siblings.iter().map(|s| s.lookup.as_str()).collect();
        prop_assert_eq!(ops.len(), siblings.len());
        for sibling in &siblings {
            prop_assert_eq!(&sibling.column, &original.column);
            prop_assert_eq!(&sibling.value, &original.value);
            prop_assert_ne!(sibling.lookup, original.lookup);
        }
    }

    #[test]
    fn prop_live_iff_result_differs(
        rows in prop::collection::vec(-20i64..20, 0..12),
        op_idx in 0usize..5,
        threshold in -20i64..20,
    ) {
        let fixture = Fixture::zoobar_rows(&rows);
        let op = Lookup::MUTABLE[op_idx];
        let key = format!("zoobars__{}", op);
        let outcome = fixture
            .engine
            .run(fixture.plain().as_ref(), &FilterArgs::single(key, threshold))
            .unwrap();

        let base = fixture.plain();
        let original = base.filter_predicate(&FilterPredicate::new("zoobars", op, threshold)).unwrap().pks().unwrap();
        let live: Vec<Lookup> = outcome.report.live_predicates().map(|p| p.lookup).collect();

        for sibling in fixture.engine.mutation_set(&FilterPredicate::new("zoobars", op, threshold)) {
            let mutated = base.filter_predicate(&sibling).unwrap().pks().unwrap();
            prop_assert_eq!(live.contains(&sibling.lookup), mutated != original);
        }
        prop_assert_eq!(outcome.report.live.len() + outcome.report.dead, 4);
        prop_assert_eq!(outcome.queryset.pks().unwrap(), original);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Skipped shapes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_multi_key_filter_not_mutated() {
    let fixture = Fixture::zoobar_rows(&[5, 10, 15, 20]);
    let args = FilterArgs::single("recipient", "bob").arg("zoobars__gt", 10);

    match fixture.engine.decompose(&fixture.store.manager("Transfer").unwrap().model().clone(), &args).unwrap() {
        Decomposition::Unsupported(shape) => assert_eq!(shape, "Transfer: 2 keywords [recipient, zoobars__gt]"),
        other => panic!("unexpected: {:?}", other),
    }

    let qs = fixture.manager().filter(&args).unwrap();
    assert_eq!(qs.count().unwrap(), 2);
    let reports = fixture.log.reports();
    let report = &reports[0];
    assert!(report.is_skipped());
    assert!(report.live.is_empty());
    assert_eq!(report.dead, 0);
}

#[test]
fn test_unsupported_shape_warned_once() {
    let fixture = Fixture::zoobar_rows(&[5, 10]);
    let manager = fixture.manager();
    for _ in 0..3 {
        manager
            .filter(&FilterArgs::single("recipient__contains", "b"))
            .unwrap();
    }
    assert_eq!(fixture.engine.diagnostics().len(), 1);
    assert_eq!(fixture.log.len(), 3);
}

#[test]
fn test_empty_filter_args_skipped() {
    let fixture = Fixture::zoobar_rows(&[5, 10]);
    let qs = fixture.manager().filter(&FilterArgs::new()).unwrap();
    assert_eq!(qs.count().unwrap(), 2);
    assert!(fixture.log.reports()[0].is_skipped());
}

// ═══════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_field_error_on_original_propagates() {
    let fixture = Fixture::zoobar_rows(&[5]);
    let err = fixture
        .manager()
        .filter(&FilterArgs::single("amount__gt", 1))
        .unwrap_err();
    match err {
        ConcolicError::Field(msg) => {
            assert!(msg.contains("amount"));
            assert!(msg.contains("Choices are: id, recipient, zoobars"));
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(fixture.log.is_empty());
}

#[test]
fn test_traversal_through_plain_field_is_field_error() {
    let fixture = Fixture::zoobar_rows(&[5]);
    let err = fixture
        .manager()
        .filter(&FilterArgs::single("recipient__name__exact", "bob"))
        .unwrap_err();
    assert!(matches!(err, ConcolicError::Field(_)));
}

#[test]
fn test_suppressed_field_error_yields_empty_result() {
    let fixture = Fixture::new(MutationConfig::default().suppress_field_errors(true), &[Some(5)]);
    let qs = fixture
        .manager()
        .filter(&FilterArgs::single("amount__gt", 1))
        .unwrap();
    assert_eq!(qs.count().unwrap(), 0);
    assert!(!qs.exists().unwrap());
    assert!(fixture.log.reports()[0].skipped.as_deref().unwrap_or("").contains("amount"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Data edge cases
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_empty_table_all_dead() {
    let fixture = Fixture::zoobar_rows(&[]);
    fixture
        .manager()
        .filter(&FilterArgs::single("zoobars__gt", 10))
        .unwrap();
    let reports = fixture.log.reports();
    let report = &reports[0];
    assert!(report.live.is_empty());
    assert_eq!(report.dead, 4);
}

#[test]
fn test_null_rows_never_match_orderings() {
    let fixture = Fixture::new(MutationConfig::default(), &[None, Some(10), None]);
    let qs = fixture
        .manager()
        .filter(&FilterArgs::single("zoobars__lte", 100))
        .unwrap();
    assert_eq!(qs.pks().unwrap().into_iter().collect::<Vec<_>>(), vec![2]);

    let reports = fixture.log.reports();
    let report = &reports[0];
    let live: Vec<Lookup> = report.live_predicates().map(|p| p.lookup).collect();
    // gte/gt/exact select nothing; lt selects the same row
    assert_eq!(live, vec![Lookup::Gte, Lookup::Gt, Lookup::Exact]);
    assert_eq!(report.dead, 1);
}

#[test]
fn test_implicit_exact_is_mutated() {
    let fixture = Fixture::zoobar_rows(&[5, 10, 15]);
    let (qs, report) = fixture
        .manager()
        .mutation_queryset()
        .filter_with_report(&FilterArgs::single("zoobars", 10))
        .unwrap();
    assert_eq!(qs.count().unwrap(), 1);
    assert_eq!(report.keys, vec!["zoobars__exact".to_string()]);
    assert_eq!(report.original.unwrap().lookup, Lookup::Exact);
    assert_eq!(report.live.len(), 4);
}

#[test]
fn test_pk_alias() {
    let fixture = Fixture::zoobar_rows(&[5, 10, 15]);
    let row = fixture.manager().get(&FilterArgs::single("pk", 2)).unwrap();
    assert_eq!(row.get("zoobars"), Some(&Value::Int(10)));

    let reports = fixture.log.reports();
    let report = &reports[0];
    assert_eq!(report.original.as_ref().unwrap().column, "id");
    let lt = report.live.iter().find(|m| m.predicate.lookup == Lookup::Lt).unwrap();
    assert_eq!(lt.added, vec![1]);
    assert_eq!(lt.removed, vec![2]);
}

#[test]
fn test_symbolic_value_preserved_in_report() {
    let fixture = Fixture::zoobar_rows(&[5, 10, 15, 20]);
    let x = Value::from(SymbolicValue::int("x1", 10));
    fixture
        .manager()
        .filter(&FilterArgs::single("zoobars__gt", x.clone()))
        .unwrap();
    for predicate in fixture.log.live_predicates() {
        assert_eq!(predicate.value, x);
    }

    let json = fixture.log.to_json().unwrap();
    assert!(json.contains("x1"));
    assert!(json.contains("zoobars"));
}

#[test]
fn test_chained_filters_each_mutated() {
    let fixture = Fixture::zoobar_rows(&[5, 10, 15, 20]);
    let qs = fixture
        .manager()
        .filter(&FilterArgs::single("zoobars__gt", 5))
        .unwrap()
        .filter(&FilterArgs::single("zoobars__lt", 20))
        .unwrap();
    assert_eq!(qs.pks().unwrap().into_iter().collect::<Vec<_>>(), vec![2, 3]);

    let reports = fixture.log.reports();
    assert_eq!(reports.len(), 2);
    // the second call is tested against the narrowed base {10, 15, 20}
    let second = &reports[1];
    let lte = second.live.iter().find(|m| m.predicate.lookup == Lookup::Lte).unwrap();
    assert_eq!(lte.added, vec![4]);
    assert!(lte.removed.is_empty());
}
