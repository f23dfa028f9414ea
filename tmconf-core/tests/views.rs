use pretty_assertions::assert_eq;
use tmconf_core::{parse, ConfigValue, TabularEntry};

const PROFILES: &str =
    "ltm profile imap imap {\n    activation-mode require\n}\nltm profile pop3 pop3 {\n    activation-mode require\n}";

fn activation_required() -> ConfigValue {
    let mut object = tmconf_core::ConfigMap::new();
    object.insert("activation-mode".to_string(), ConfigValue::from("require"));
    ConfigValue::Map(object)
}

#[test]
fn tabular_entries_follow_document_order() {
    let parsed = parse(PROFILES).expect("parse");
    assert_eq!(
        parsed.tabular(),
        &[
            TabularEntry {
                path: "ltm profile imap".to_string(),
                name: "imap".to_string(),
                object: activation_required(),
            },
            TabularEntry {
                path: "ltm profile pop3".to_string(),
                name: "pop3".to_string(),
                object: activation_required(),
            },
        ][..]
    );
}

#[test]
fn tabular_json_is_an_array_of_triples() {
    let parsed = parse(PROFILES).expect("parse");
    assert_eq!(
        parsed.tabular_json(),
        r#"[["ltm profile imap", "imap", {"activation-mode": "require"}], ["ltm profile pop3", "pop3", {"activation-mode": "require"}]]"#
    );
}

#[test]
fn records_json_is_an_array_of_objects() {
    let parsed = parse(PROFILES).expect("parse");
    assert_eq!(
        parsed.records_json(),
        r#"[{"path": "ltm profile imap", "name": "imap", "object": {"activation-mode": "require"}}, {"path": "ltm profile pop3", "name": "pop3", "object": {"activation-mode": "require"}}]"#
    );
}

#[test]
fn jsonl_has_one_record_per_line_without_trailing_newline() {
    let parsed = parse(PROFILES).expect("parse");
    assert_eq!(
        parsed.jsonl(),
        "{\"path\": \"ltm profile imap\", \"name\": \"imap\", \"object\": {\"activation-mode\": \"require\"}}\n{\"path\": \"ltm profile pop3\", \"name\": \"pop3\", \"object\": {\"activation-mode\": \"require\"}}"
    );
}

#[test]
fn repeated_view_requests_are_identical() {
    let parsed = parse(PROFILES).expect("parse");
    assert_eq!(parsed.json(), parsed.json());
    assert_eq!(parsed.tabular_json(), parsed.tabular_json());
    assert_eq!(parsed.records_json(), parsed.records_json());
    assert_eq!(parsed.jsonl(), parsed.jsonl());
}

#[test]
fn views_can_be_built_from_several_threads() {
    let parsed = parse(PROFILES).expect("parse");
    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| parsed.jsonl().to_string()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect()
    });
    assert!(outputs.iter().all(|o| o == parsed.jsonl()));
}
