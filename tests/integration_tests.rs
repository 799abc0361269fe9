use cosmoql::{ErrorKind, EvalError, InMemoryStore, StoreConfig, StoreError, parse};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Person {
    name: String,
    age: u32,
    city: Option<String>,
    tags: Vec<String>,
    score: f64,
}

fn person(name: &str, age: u32, city: Option<&str>, tags: &[&str], score: f64) -> Person {
    Person {
        name: name.to_string(),
        age,
        city: city.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        score,
    }
}

fn people() -> InMemoryStore<Person> {
    InMemoryStore::with_records(
        StoreConfig::new("people"),
        vec![
            person("Ann", 31, Some("Oslo"), &["admin"], 9.5),
            person("Bo", 17, Some("Bergen"), &[], 4.0),
            person("Cy", 45, None, &["ops", "admin"], 7.25),
            person("Di", 22, Some("Oslo"), &["ops"], 7.0),
        ],
    )
}

fn names(store: &InMemoryStore<Person>, query: &str) -> Vec<String> {
    match store.query(query) {
        Ok(rows) => rows.into_iter().map(|p| p.name.clone()).collect(),
        Err(e) => panic!("Query {:?} failed: {}", query, e),
    }
}

#[test]
fn test_select_all() {
    assert_eq!(names(&people(), "select * from people").len(), 4);
}

#[test]
fn test_comparisons() {
    let store = people();
    assert_eq!(names(&store, "select * from people p where p.age > 30"), vec!["Ann", "Cy"]);
    assert_eq!(names(&store, "select * from people p where p.age >= 45"), vec!["Cy"]);
    assert_eq!(names(&store, "select * from people p where p.age < 18"), vec!["Bo"]);
    assert_eq!(names(&store, "select * from people p where p.age <= 22 and p.city = 'Oslo'"), vec!["Di"]);
    assert_eq!(names(&store, "select * from people where name = 'Bo'"), vec!["Bo"]);
}

#[test]
fn test_decimal_comparison() {
    let store = people();
    assert_eq!(names(&store, "select * from people p where p.score = 7"), vec!["Di"]);
    assert_eq!(names(&store, "select * from people p where p.score > 7.2"), vec!["Ann", "Cy"]);
}

#[test]
fn test_negation() {
    let store = people();
    assert_eq!(
        names(&store, "select * from people p where p.city is not 'Oslo'"),
        vec!["Bo", "Cy"]
    );
    assert_eq!(names(&store, "select * from people p where p.city != 'Oslo'"), vec!["Bo", "Cy"]);
    assert_eq!(names(&store, "select * from people p where p.city is null"), vec!["Cy"]);
}

#[test]
fn test_in() {
    let store = people();
    assert_eq!(
        names(&store, "select * from people p where p.name in ('Bo', 'Di', 'Zed')"),
        vec!["Bo", "Di"]
    );
    assert_eq!(names(&store, "select * from people p where p.age in (17, 45)"), vec!["Bo", "Cy"]);
}

#[test]
fn test_or_group() {
    let store = people();
    assert_eq!(
        names(&store, "select * from people p where p.age < 18 or p.city = 'Bergen' or p.name = 'Cy'"),
        vec!["Bo", "Cy"]
    );
}

#[test]
fn test_and_list_ored_with_or_list() {
    // and: [age > 30]   or: [city = 'Bergen', name = 'Di']
    let store = people();
    assert_eq!(
        names(&store, "select * from people p where p.age > 30 and p.city = 'Bergen' or p.name = 'Di'"),
        vec!["Ann", "Bo", "Cy", "Di"]
    );
}

#[test]
fn test_array_index_path() {
    let store = people();
    assert_eq!(names(&store, "select * from people p where p.tags.0 = 'ops'"), vec!["Cy", "Di"]);
}

#[test]
fn test_projection() {
    let store = people();
    let rows = store
        .select("select p.name, p.city from people p where p.age > 40 or p.age < 18")
        .unwrap();
    assert_eq!(rows, vec![json!({"name": "Bo", "city": "Bergen"}), json!({"name": "Cy", "city": null})]);
}

#[test]
fn test_container_mismatch() {
    let store = people();
    match store.query("select * from orders") {
        Err(StoreError::ContainerMismatch { requested, container }) => {
            assert_eq!(requested, "orders");
            assert_eq!(container, "people");
        }
        other => panic!("Expected container mismatch, got {:?}", other.map(|r| r.len())),
    }

    assert!(store.query("select * from People").is_err());
    let relaxed = InMemoryStore::with_records(StoreConfig::new("people").case_insensitive(), vec![person("Ann", 1, None, &[], 0.0)]);
    assert_eq!(relaxed.query("select * from People").unwrap().len(), 1);
}

#[test]
fn test_parse_error_carries_query_text() {
    let store = people();
    let err = store.query("select * from people where x = 1 y").unwrap_err();
    match &err {
        StoreError::Parse { query, source } => {
            assert_eq!(query, "select * from people where x = 1 y");
            assert_eq!(source.kind(), ErrorKind::State);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Invalid query 'select * from people where x = 1 y'"));
}

#[test]
fn test_in_requires_array() {
    let store = people();
    assert!(matches!(
        store.query("select * from people p where p.name in 'Ann'"),
        Err(StoreError::Eval(_))
    ));
}

#[test]
fn test_unknown_alias() {
    let store = people();
    let err = store.query("select * from people p where q.name = 'Ann'").unwrap_err();
    assert!(matches!(err, StoreError::Eval(EvalError::UnknownAlias { ref alias, .. }) if alias == "q"));
    assert!(matches!(
        store.select("select q.name from people p"),
        Err(StoreError::Eval(EvalError::UnknownAlias { .. }))
    ));
    assert_eq!(names(&store, "select * from people p where people.name = 'Ann'"), vec!["Ann"]);
}

#[test]
fn test_typed_match() {
    let query = parse::<Person>("select * from people p where p.age >= 18 and p.tags.0 = 'admin'").unwrap();
    assert!(query.matches(&person("Ann", 31, None, &["admin"], 0.0)).unwrap());
    assert!(!query.matches(&person("Bo", 17, None, &["admin"], 0.0)).unwrap());
    assert!(!query.matches(&person("Cy", 45, None, &[], 0.0)).unwrap());
}
