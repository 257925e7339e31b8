use taskboard_core::models::TASK_SCHEMA;
use taskboard_core::query_builder::{
    ComparisonOperator, FieldKind, FieldValue, ListQuery, RawParams, SoftDeleteScope,
    SortDirection,
};
use taskboard_core::query_builder::schema::parse_timestamp;

fn parse(pairs: &[(&str, &str)]) -> ListQuery {
    ListQuery::parse(&RawParams::from_pairs(pairs.iter().copied()), &TASK_SCHEMA)
}

#[test]
fn test_reserved_keys_are_never_filters() {
    let query = parse(&[
        ("page", "2"),
        ("perPage", "5"),
        ("limit", "7"),
        ("sort", "title"),
        ("search", "x"),
        ("deleted", "true"),
        ("fields", "title"),
    ]);
    assert!(query.filters.is_empty());
    assert_eq!(query.page, Some(2));
    assert_eq!(query.per_page, Some(5));
    assert_eq!(query.deleted, SoftDeleteScope::Deleted);
}

#[test]
fn test_limit_used_when_per_page_absent() {
    assert_eq!(parse(&[("limit", "7")]).per_page, Some(7));
    assert_eq!(parse(&[("perPage", "abc"), ("limit", "7")]).per_page, Some(7));
}

#[test]
fn test_unusable_pagination_values_fall_back() {
    for bad in ["0", "-3", "abc", "", "2.5"] {
        let query = parse(&[("page", bad), ("perPage", bad)]);
        assert_eq!(query.page, None, "page={bad}");
        assert_eq!(query.per_page, None, "perPage={bad}");
    }
}

#[test]
fn test_unknown_and_hostile_keys_dropped() {
    let query = parse(&[
        ("unknownField", "x"),
        ("__proto__", "x"),
        ("deletedAt", "2024-01-01"),
        ("title[$regex]", ".*"),
        ("title[gte", "a"),
        ("title]", "a"),
        ("[gte]", "a"),
        ("title[gte][lt]", "a"),
    ]);
    assert!(query.filters.is_empty());
}

#[test]
fn test_bracket_operators_and_coercion() {
    let query = parse(&[
        ("createdAt[gte]", "2024-01-01"),
        ("createdAt[lt]", "2024-02-01T00:00:00Z"),
        ("isCompleted", "true"),
        ("title[ne]", "Draft"),
    ]);
    assert_eq!(query.filters.len(), 4);

    let first = &query.filters[0];
    assert_eq!(first.field, "createdAt");
    assert_eq!(first.kind, FieldKind::Timestamp);
    assert_eq!(first.operator, ComparisonOperator::Gte);
    assert_eq!(
        first.value,
        FieldValue::Timestamp(parse_timestamp("2024-01-01T00:00:00Z").unwrap())
    );

    assert_eq!(query.filters[2].value, FieldValue::Bool(true));
    assert_eq!(query.filters[3].operator, ComparisonOperator::Ne);
}

#[test]
fn test_uncoercible_values_drop_the_clause() {
    let query = parse(&[
        ("isCompleted", "yes"),
        ("createdAt[gte]", "last tuesday"),
        ("owner", "not-a-uuid"),
    ]);
    assert!(query.filters.is_empty());
}

#[test]
fn test_deleted_only_exact_true() {
    assert_eq!(parse(&[("deleted", "true")]).deleted, SoftDeleteScope::Deleted);
    for other in ["TRUE", "1", "false", "yes", ""] {
        assert_eq!(parse(&[("deleted", other)]).deleted, SoftDeleteScope::Live);
    }
    assert_eq!(parse(&[]).deleted, SoftDeleteScope::Live);
}

#[test]
fn test_repeated_keys_last_wins() {
    let query = parse(&[("page", "2"), ("page", "4"), ("sort", "title"), ("sort", "-title")]);
    assert_eq!(query.page, Some(4));
    let sort = query.sort.unwrap();
    assert_eq!(sort.len(), 1);
    assert_eq!(sort[0].direction, SortDirection::Descending);
}

#[test]
fn test_sort_and_fields_respect_allowlists() {
    let query = parse(&[
        ("sort", "owner,-createdAt,bogus"),
        ("fields", "title,readers,__v,password"),
    ]);
    let sort = query.sort.unwrap();
    assert_eq!(sort.len(), 1);
    assert_eq!(sort[0].field, "createdAt");
    assert_eq!(query.fields.unwrap(), vec!["title", "readers"]);

    let query = parse(&[("sort", "bogus,,")]);
    assert!(query.sort.is_none());
}

#[test]
fn test_blank_search_ignored() {
    assert!(parse(&[("search", "   ")]).search.is_none());
    assert_eq!(parse(&[("search", " proj ")]).search.as_deref(), Some("proj"));
}
