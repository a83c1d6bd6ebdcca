use linkdispatch::compiler::expand_prefixes;
use linkdispatch::{compile, DeepLinkEntry, DeepLinkError, MatchIndex};

#[test]
fn test_expand_prefixes_is_cartesian() {
    let prefixes = vec![
        "http://example.com".to_string(),
        "https://example.com".to_string(),
    ];
    assert_eq!(
        expand_prefixes(&prefixes, "/promo/{id}"),
        vec![
            "http://example.com/promo/{id}".to_string(),
            "https://example.com/promo/{id}".to_string(),
        ]
    );
}

#[test]
fn test_malformed_template_is_reported_and_skipped() {
    let compiled = compile(&[
        DeepLinkEntry::class("no-scheme-here", "com.example.Broken"),
        DeepLinkEntry::class("app://host/ok", "com.example.Ok"),
    ]);

    assert_eq!(compiled.diagnostics.len(), 1);
    assert_eq!(compiled.diagnostics[0].location, "com.example.Broken");
    assert!(matches!(
        compiled.diagnostics[0].error,
        DeepLinkError::MalformedTemplate { .. }
    ));

    // the rest of the batch still compiles
    assert_eq!(compiled.template_count, 1);
    let index = MatchIndex::load(&compiled.blocks).expect("load");
    assert!(index.match_uri("app://host/ok").is_some());
}

#[test]
fn test_conflicting_templates_are_reported_with_both_parties() {
    let compiled = compile(&[
        DeepLinkEntry::class("app://host/a/{x}", "com.example.First"),
        DeepLinkEntry::class("app://host/a/{y}", "com.example.Second"),
    ]);

    assert_eq!(compiled.template_count, 1);
    assert_eq!(compiled.diagnostics.len(), 1);
    match &compiled.diagnostics[0].error {
        DeepLinkError::ConflictingTemplate {
            handler,
            existing_handler,
            ..
        } => {
            // priority tie-break sorts First ahead, so Second is rejected
            assert_eq!(existing_handler, "com.example.First");
            assert_eq!(handler, "com.example.Second");
        }
        other => panic!("expected ConflictingTemplate, got {other:?}"),
    }
}

#[test]
fn test_fully_identical_templates_conflict() {
    let compiled = compile(&[
        DeepLinkEntry::method("app://host/a", "com.example.Same", "go"),
        DeepLinkEntry::method("app://host/a", "com.example.Same", "go"),
    ]);
    assert_eq!(compiled.template_count, 1);
    assert_eq!(compiled.diagnostics.len(), 1);
    assert!(matches!(
        compiled.diagnostics[0].error,
        DeepLinkError::ConflictingTemplate { .. }
    ));
}

#[test]
fn test_same_shape_distinct_query_sets_do_not_conflict() {
    let compiled = compile(&[
        DeepLinkEntry::class("app://host/a", "com.example.Plain"),
        DeepLinkEntry::class("app://host/a?foo", "com.example.WithFoo"),
    ]);
    assert!(compiled.is_clean());
    assert_eq!(compiled.template_count, 2);
}

#[test]
fn test_configurable_path_keys_are_collected() {
    let compiled = compile(&[
        DeepLinkEntry::class("app://host/<env>/promo", "com.example.Promo"),
        DeepLinkEntry::class("app://host/<env>/<tenant>/home", "com.example.Home"),
        DeepLinkEntry::class("app://host/{var}/plain", "com.example.Plain"),
    ]);
    assert!(compiled.is_clean());
    assert_eq!(
        compiled
            .configurable_path_keys
            .iter()
            .cloned()
            .collect::<Vec<_>>(),
        vec!["env".to_string(), "tenant".to_string()]
    );
}

#[test]
fn test_empty_batch_compiles_to_loadable_empty_index() {
    let compiled = compile(&[]);
    assert!(compiled.is_clean());
    assert_eq!(compiled.template_count, 0);
    let index = MatchIndex::load(&compiled.blocks).expect("load");
    assert!(index.match_uri("app://host/a").is_none());
}
