use linkdispatch::index::{serialize, serialize_bytes};
use linkdispatch::{DeepLinkError, MatchIndex, Template, Trie};

fn sample_trie() -> Trie {
    let mut trie = Trie::new();
    let bindings = [
        ("app://example.com/a/b/c", "com.example.Long", None),
        ("app://example.com/a/b", "com.example.Literal", None),
        ("app://example.com/a/{x}", "com.example.Variable", None),
        ("app://example.com/a?foo", "com.example.Query", Some("withFoo")),
        ("app://example.com/<env>/promo", "com.example.Promo", None),
        ("web://host/{a}/{b}", "com.example.TwoVars", Some("twoVars")),
    ];
    for (i, (raw, handler, method)) in bindings.iter().enumerate() {
        let t = Template::parse(raw, handler, *method).expect("template should parse");
        trie.insert(&t, i as u32).expect("insert should succeed");
    }
    trie
}

#[test]
fn test_round_trip_preserves_matching() {
    let trie = sample_trie();
    let index = MatchIndex::load(&serialize(&trie)).expect("load");

    let cases = [
        ("app://example.com/a/b/c", Some("com.example.Long")),
        ("app://example.com/a/b", Some("com.example.Literal")),
        ("app://example.com/a/q", Some("com.example.Variable")),
        ("app://example.com/a?foo=1", Some("com.example.Query")),
        ("web://host/1/2", Some("com.example.TwoVars")),
        ("app://example.com/nope/nope", None),
        ("other://example.com/a/b", None),
    ];
    for (uri, expected) in cases {
        let got = index.match_uri(uri).map(|m| m.handler);
        assert_eq!(got.as_deref(), expected, "for {uri}");
    }

    let m = index.match_uri("web://host/1/2").expect("two vars");
    assert_eq!(m.param("a"), Some("1"));
    assert_eq!(m.param("b"), Some("2"));
    assert_eq!(m.method.as_deref(), Some("twoVars"));
}

#[test]
fn test_double_round_trip_is_byte_identical() {
    let trie = sample_trie();
    let first = serialize(&trie);
    let reloaded = MatchIndex::load(&first).expect("load");
    assert_eq!(reloaded.to_blocks(), first);
}

#[test]
fn test_empty_trie_round_trips() {
    let trie = Trie::new();
    let index = MatchIndex::load(&serialize(&trie)).expect("load");
    assert!(index.match_uri("app://host/a").is_none());
    assert_eq!(index.to_blocks(), serialize(&trie));
}

#[test]
fn test_every_truncation_is_corrupt() {
    let payload = serialize_bytes(&sample_trie());
    for len in 0..payload.len() {
        let err = MatchIndex::load(&[&payload[..len]]).expect_err("truncation must fail");
        assert!(
            matches!(err, DeepLinkError::CorruptIndex { .. }),
            "prefix of {len} bytes: {err}"
        );
    }
}

#[test]
fn test_trailing_bytes_are_corrupt() {
    let mut payload = serialize_bytes(&sample_trie());
    payload.push(0);
    let err = MatchIndex::load(&[payload]).expect_err("trailing byte must fail");
    assert!(matches!(err, DeepLinkError::CorruptIndex { .. }));
}

#[test]
fn test_bad_magic_and_version_are_corrupt() {
    let mut payload = serialize_bytes(&sample_trie());
    payload[0] = b'X';
    assert!(MatchIndex::load(&[payload.clone()]).is_err());

    let mut payload = serialize_bytes(&sample_trie());
    payload[2] = 99;
    let err = MatchIndex::load(&[payload]).expect_err("future version must fail");
    assert!(matches!(err, DeepLinkError::CorruptIndex { .. }));
}

#[test]
fn test_invalid_variable_flag_is_corrupt() {
    let mut payload = serialize_bytes(&Trie::new());
    // root node layout: child_count varint, then the flag byte
    payload[4] = 7;
    let err = MatchIndex::load(&[payload]).expect_err("bad flag must fail");
    assert!(matches!(err, DeepLinkError::CorruptIndex { .. }));
}

#[test]
fn test_block_boundaries_do_not_matter() {
    let trie = sample_trie();
    let payload = serialize_bytes(&trie);
    // re-chunk into tiny 7-byte blocks; the loader only sees the concatenation
    let blocks: Vec<Vec<u8>> = payload.chunks(7).map(<[u8]>::to_vec).collect();
    let index = MatchIndex::load(&blocks).expect("load from odd blocks");
    assert_eq!(
        index.match_uri("app://example.com/a/b").map(|m| m.handler),
        Some("com.example.Literal".to_string())
    );
}
