//! Integration tests for field-mapped query rendering

use std::sync::Arc;

use solrmap::prelude::*;

fn aliases() -> Arc<AliasTable> {
    Arc::new(
        [
            ("title", "title_s"),
            ("text", "text_t"),
            ("created_at", "created_at_dt"),
        ]
        .into_iter()
        .collect(),
    )
}

#[test]
fn test_or_and_and_rendering() {
    let mut query = FieldMappedQuery::new(aliases());
    query.add_search_term("title", "foo").add_search_term("text", "bar");
    assert_eq!(query.get_query(), "title_s:foo OR text_t:bar");

    query.set_use_and_operator(true);
    assert_eq!(query.get_query(), "title_s:foo AND text_t:bar");
}

#[test]
fn test_query_all_fields_phrase_and_wildcard() {
    let mut query = FieldMappedQuery::new(aliases());
    query.query_all_fields("foo 12");
    assert_eq!(
        query.get_query(),
        r#"title_s:"foo 12" OR text_t:"foo 12" OR created_at_dt:"foo 12""#
    );

    query.set_use_wildcard(true);
    assert_eq!(
        query.get_query(),
        r#"title_s:"*foo 12*" OR text_t:"*foo 12*" OR created_at_dt:"*foo 12*""#
    );
}

#[test]
fn test_unmapped_names_leave_state_unchanged() {
    let mut query = FieldMappedQuery::new(aliases());
    query.add_field("title").add_search_term("title", "foo");

    let fields = query.get_fields().to_vec();
    let terms = query.get_search_terms().to_vec();

    query
        .add_field("isbn")
        .add_field("isbn")
        .add_search_term("isbn", "123");

    assert_eq!(query.get_fields(), fields.as_slice());
    assert_eq!(query.get_search_terms(), terms.as_slice());
}

#[test]
fn test_distinct_term_fields_match_resolved_names() {
    let mut query = FieldMappedQuery::new(aliases());
    query
        .add_search_term("title", "a")
        .add_search_term("text", "b")
        .add_search_term("title", "c")
        .query_all_fields("d")
        .add_search_term("unknown", "e");

    assert_eq!(query.get_search_terms().len(), 3);
    assert_eq!(query.search_term("title_s"), Some("d"));
}

#[test]
fn test_shared_alias_table_across_queries() {
    let aliases = aliases();
    let mut first = FieldMappedQuery::new(Arc::clone(&aliases));
    let mut second = FieldMappedQuery::new(Arc::clone(&aliases));

    first.add_search_term("title", "foo");
    second.add_search_term("text", "bar");

    assert_eq!(first.get_query(), "title_s:foo");
    assert_eq!(second.get_query(), "text_t:bar");
    assert_eq!(first.aliases(), second.aliases());
}

#[test]
fn test_built_query_is_shareable_read_only() {
    let mut query = FieldMappedQuery::new(aliases());
    query.add_search_term("title", "foo bar");
    let query = Arc::new(query);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let query = Arc::clone(&query);
            std::thread::spawn(move || query.get_query())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), r#"title_s:"foo bar""#);
    }
}

#[test]
fn test_empty_query_renders_empty_string() {
    let query = FieldMappedQuery::new(aliases());
    assert_eq!(query.get_query(), "");
    assert!(query.is_empty());
}
