//! End-to-end: simulated request → router → view → mutation-aware filter
//!
//! A small zoobar-like application (people holding zoobars, transfers
//! between them) driven through `SymClient` with symbolic form fields.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use concolic_core::features::data_access::FieldKind;
use concolic_core::{
    ConcolicConfig, ConcolicContext, ConcolicError, FilterArgs, FnView, Lookup, MemoryStore, ModelMeta,
    ModelRegistry, MutationLog, PathMatch, QuerySet, RegexView, Request, Response, SampleLibrary, SymbolicValue,
    Value, ViewArgs, ViewMap,
};
use pretty_assertions::assert_eq;

struct App {
    ctx: ConcolicContext,
    store: Arc<MemoryStore>,
    log: Arc<MutationLog>,
    library: Arc<SampleLibrary>,
}

fn store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    store.create_model(
        ModelMeta::new("Person")
            .field("username", FieldKind::Text)
            .field("zoobars", FieldKind::Int)
            .nullable_field("profile", FieldKind::Text),
    );
    store.create_model(
        ModelMeta::new("Transfer")
            .field("sender", FieldKind::Text)
            .field("recipient", FieldKind::Text)
            .field("zoobars", FieldKind::Int),
    );
    for (name, zoobars) in [("alice", 10), ("bob", 10), ("carol", 3)] {
        store
            .insert("Person", [("username", Value::from(name)), ("zoobars", Value::from(zoobars))])
            .unwrap();
    }
    for (sender, recipient, zoobars) in [("alice", "bob", 5), ("bob", "carol", 10), ("carol", "alice", 15), ("alice", "carol", 20)] {
        store
            .insert(
                "Transfer",
                [
                    ("sender", Value::from(sender)),
                    ("recipient", Value::from(recipient)),
                    ("zoobars", Value::from(zoobars)),
                ],
            )
            .unwrap();
    }
    store
}

fn views() -> ViewMap {
    let users = RegexView::new(r"^/zoobar/index\.cgi/users$", |request: &Request, _: &ViewArgs| {
        let user = request.get.get("user").cloned().unwrap_or_default();
        let people = request
            .objects("Person")?
            .filter(&FilterArgs::single("username", user.clone()))?;
        match people.entities()?.first() {
            Some(person) => Ok(Response::ok(format!("{} zoobars", person.get("zoobars").cloned().unwrap_or_default()))
                .with_context("user", user)),
            None => Ok(Response::ok("Cannot find that user.").with_context("user", user)),
        }
    })
    .unwrap();

    let history = FnView::new(
        |path: &str| (path == "/zoobar/index.cgi/transfer").then_some(PathMatch::Bare),
        |request: &Request, _: &ViewArgs| {
            let amount = request.post.get("zoobars").cloned().unwrap_or_default();
            let bigger = request
                .objects("Transfer")?
                .filter(&FilterArgs::single("zoobars__gt", amount))?;
            Ok(Response::ok(bigger.count()?.to_string()))
        },
    );

    let send = FnView::new(
        |path: &str| (path == "/zoobar/index.cgi/send").then_some(PathMatch::Bare),
        |request: &Request, _: &ViewArgs| {
            let field = |key: &str| request.post.get(key).cloned().unwrap_or_default();
            let transfer = request.objects("Transfer")?.create(
                &FilterArgs::single("sender", "alice")
                    .arg("recipient", field("recipient"))
                    .arg("zoobars", field("zoobars")),
            )?;
            Ok(Response::ok(transfer.pk.to_string()))
        },
    );

    let broken = FnView::new(
        |path: &str| (path == "/zoobar/index.cgi/broken").then_some(PathMatch::Bare),
        |request: &Request, _: &ViewArgs| {
            request
                .objects("Transfer")?
                .filter(&FilterArgs::single("amount__gt", 1))?;
            Ok(Response::ok("unreachable"))
        },
    );

    ViewMap::builder()
        .view("zoobar.views.users", users)
        .view("zoobar.views.transfer", history)
        .view("zoobar.views.send", send)
        .view("zoobar.views.broken", broken)
        .build()
}

fn app(config: ConcolicConfig) -> App {
    let store = store();
    let log = Arc::new(MutationLog::new());
    let library = Arc::new(SampleLibrary::new());
    let ctx = ConcolicContext::builder(config)
        .library(library.clone())
        .views(views())
        .models(
            ModelRegistry::new()
                .with(store.manager("Person").unwrap())
                .with(store.manager("Transfer").unwrap()),
        )
        .sink(log.clone())
        .build()
        .unwrap();
    App { ctx, store, log, library }
}

fn form(key: &str, value: impl Into<Value>) -> BTreeMap<String, Value> {
    let mut data = BTreeMap::new();
    data.insert(key.to_string(), value.into());
    data
}

// ═══════════════════════════════════════════════════════════════════════════
// Transfer history (zoobars__gt=amount)
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_transfer_history_reports_all_four_live() {
    let app = app(ConcolicConfig::default());
    app.library.set_sample("amount", 10);

    let response = app
        .ctx
        .new_client()
        .post("/zoobar/index.cgi/transfer", &form("zoobars", SymbolicValue::int("amount", 0)))
        .unwrap();
    // original: {15, 20}
    assert_eq!(response.body, "2");

    let reports = app.log.reports();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.model, "Transfer");
    assert_eq!(report.original_count, 2);
    assert_eq!(report.dead, 0);

    let live: Vec<(Lookup, usize)> = report
        .live
        .iter()
        .map(|m| (m.predicate.lookup, m.divergence()))
        .collect();
    // lte {5,10}, gte {10,15,20}, lt {5}, exact {10}
    assert_eq!(
        live,
        vec![(Lookup::Lte, 4), (Lookup::Gte, 1), (Lookup::Lt, 3), (Lookup::Exact, 3)]
    );

    for predicate in report.live_predicates() {
        let sym = predicate.value.as_symbolic().unwrap();
        assert_eq!(sym.id(), "amount");
        assert_eq!(predicate.column, "zoobars");
    }
}

#[test]
fn test_concrete_form_amount_compares_numerically() {
    let app = app(ConcolicConfig::default());

    let response = app
        .ctx
        .new_client()
        .post("/zoobar/index.cgi/transfer", &form("zoobars", "10"))
        .unwrap();
    assert_eq!(response.body, "2");

    let reports = app.log.reports();
    let report = &reports[0];
    assert_eq!(report.original.as_ref().map(|p| p.value.clone()), Some(Value::Int(10)));
    assert_eq!(report.live.len(), 4);
    assert_eq!(report.dead, 0);
}

#[test]
fn test_non_numeric_form_amount_is_field_error() {
    let app = app(ConcolicConfig::default());
    let err = app
        .ctx
        .new_client()
        .post("/zoobar/index.cgi/transfer", &form("zoobars", "ten"))
        .unwrap_err();
    assert!(matches!(err, ConcolicError::Field(msg) if msg.contains("zoobars")));
}

#[test]
fn test_new_sample_changes_outcome() {
    let app = app(ConcolicConfig::default());
    let client = app.ctx.new_client();

    app.library.set_sample("amount", 12);
    client
        .post("/zoobar/index.cgi/transfer", &form("zoobars", SymbolicValue::int("amount", 0)))
        .unwrap();
    let first = app.log.drain();
    // no transfer of exactly 12: gte coincides with gt
    assert_eq!(first[0].dead, 1);

    app.library.set_sample("amount", 100);
    let response = client
        .post("/zoobar/index.cgi/transfer", &form("zoobars", SymbolicValue::int("amount", 0)))
        .unwrap();
    assert_eq!(response.body, "0");
    let second = app.log.drain();
    let live: Vec<Lookup> = second[0].live_predicates().map(|p| p.lookup).collect();
    assert_eq!(live, vec![Lookup::Lte, Lookup::Lt]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Sending zoobars (writes through the substituted manager)
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_send_view_creates_transfer() {
    let app = app(ConcolicConfig::default());
    app.library.set_sample("amount", 12);
    let client = app.ctx.new_client();

    let mut data = form("recipient", "bob");
    data.insert("zoobars".to_string(), Value::from(SymbolicValue::int("amount", 0)));
    let response = client.post("/zoobar/index.cgi/send", &data).unwrap();
    assert_eq!(response.body, "5");

    let stored = app.store.rows("Transfer").unwrap();
    let sent = stored.last().unwrap();
    assert_eq!(sent.get("recipient"), Some(&Value::from("bob")));
    // the sample, stored concrete
    assert_eq!(sent.get("zoobars"), Some(&Value::Int(12)));
    // writes are not mutation-tested
    assert!(app.log.is_empty());

    // the new transfer shows up in the history: {12, 15, 20}
    let history = client
        .post("/zoobar/index.cgi/transfer", &form("zoobars", "10"))
        .unwrap();
    assert_eq!(history.body, "3");
}

#[test]
fn test_send_view_rejects_non_numeric_amount() {
    let app = app(ConcolicConfig::default());
    let mut data = form("recipient", "bob");
    data.insert("zoobars".to_string(), Value::from("a lot"));
    let err = app
        .ctx
        .new_client()
        .post("/zoobar/index.cgi/send", &data)
        .unwrap_err();
    assert!(matches!(err, ConcolicError::Field(_)));
    assert_eq!(app.store.rows("Transfer").unwrap().len(), 4);
}

// ═══════════════════════════════════════════════════════════════════════════
// User lookup (implicit exact on text)
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_user_lookup_with_symbolic_username() {
    let app = app(ConcolicConfig::default());
    app.library.set_sample("user", "bob");

    let response = app
        .ctx
        .new_client()
        .get("/zoobar/index.cgi/users", &form("user", SymbolicValue::string("user", "")))
        .unwrap();
    assert_eq!(response.body, "10 zoobars");
    assert_eq!(
        response.context["user"].as_symbolic().map(|s| s.id().to_string()),
        Some("user".to_string())
    );

    let reports = app.log.reports();
    let report = &reports[0];
    assert_eq!(report.keys, vec!["username__exact".to_string()]);
    // lexicographic: lte {alice,bob}, gte {bob,carol}, gt {carol}, lt {alice}
    assert_eq!(report.live.len(), 4);
}

#[test]
fn test_unknown_user() {
    let app = app(ConcolicConfig::default());
    app.library.set_sample("user", "mallory");
    let response = app
        .ctx
        .new_client()
        .get("/zoobar/index.cgi/users", &form("user", SymbolicValue::string("user", "")))
        .unwrap();
    assert_eq!(response.body, "Cannot find that user.");
}

// ═══════════════════════════════════════════════════════════════════════════
// Failure behaviour
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_field_error_propagates_out_of_request() {
    let app = app(ConcolicConfig::default());
    let err = app
        .ctx
        .new_client()
        .get("/zoobar/index.cgi/broken", &BTreeMap::new())
        .unwrap_err();
    assert!(matches!(err, ConcolicError::Field(_)));
}

#[test]
fn test_unknown_path_is_404_and_no_report() {
    let app = app(ConcolicConfig::default());
    let response = app
        .ctx
        .new_client()
        .get("/zoobar/index.cgi/nowhere", &BTreeMap::new())
        .unwrap();
    assert_eq!(response.status, 404);
    assert!(app.log.is_empty());
}

#[test]
fn test_unknown_token_kind_reaches_view_as_string() {
    let app = app(ConcolicConfig::default());
    let raw = "CoNcOlIc::concolic_float:f";
    let response = app
        .ctx
        .new_client()
        .get("/zoobar/index.cgi/users", &form("user", raw))
        .unwrap();
    assert_eq!(response.context["user"], Value::from(raw));
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_yaml_configured_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "version: 1\nbridge:\n  tag: \"SyM::\"\nmutation:\n  operators: [gt, lt]\n  record_skipped: false\n"
    )
    .unwrap();
    let config = ConcolicConfig::from_yaml(file.path()).unwrap();
    assert_eq!(config.bridge.tag, "SyM::");

    let app = app(config);
    app.library.set_sample("amount", 10);
    let client = app.ctx.new_client();
    let request = client
        .build_request(
            concolic_core::Method::Post,
            "/zoobar/index.cgi/transfer",
            &form("zoobars", SymbolicValue::int("amount", 0)),
        )
        .unwrap();
    assert!(request.post.get("zoobars").unwrap().is_symbolic());

    client
        .post("/zoobar/index.cgi/transfer", &form("zoobars", SymbolicValue::int("amount", 0)))
        .unwrap();
    let reports = app.log.drain();
    assert_eq!(reports[0].live.len(), 1);
    assert_eq!(reports[0].live[0].predicate.lookup, Lookup::Lt);

    // gte is not configured, so this call is skipped and not recorded
    app.ctx
        .models()
        .objects("Transfer")
        .unwrap()
        .filter(&FilterArgs::single("zoobars__gte", 1))
        .unwrap();
    assert!(app.log.is_empty());
}

#[test]
fn test_reports_export_as_json() {
    let app = app(ConcolicConfig::default());
    app.library.set_sample("amount", 10);
    app.ctx
        .new_client()
        .post("/zoobar/index.cgi/transfer", &form("zoobars", SymbolicValue::int("amount", 0)))
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&app.log.to_json().unwrap()).unwrap();
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["model"], "Transfer");
    assert_eq!(reports[0]["live"].as_array().unwrap().len(), 4);
}
