use crate::common::*;
use taskboard_core::database::InMemoryStore;
use taskboard_core::query_builder::{
    paginate, FieldKind, PageOptions, QueryDescriptor, SoftDeleteScope, SortKey, SortSpec,
};
use taskboard_core::TaskboardError;

fn newest_first() -> QueryDescriptor {
    QueryDescriptor::new("tasks")
        .scoped(SoftDeleteScope::Live)
        .with_sort(SortSpec::new(vec![
            SortKey::descending("createdAt", FieldKind::Timestamp),
            SortKey::ascending("id", FieldKind::Id),
        ]))
}

#[tokio::test]
async fn test_second_page_of_five() {
    let store = InMemoryStore::new();
    seed_five_tasks(&store).await;

    let result = paginate(&store, &newest_first(), PageOptions::new(2, 2))
        .await
        .unwrap();

    assert_eq!(titles(&result.docs), vec!["T3", "T2"]);
    let meta = result.meta;
    assert_eq!(meta.total_docs, 5);
    assert_eq!(meta.total_pages, 3);
    assert_eq!(meta.page, 2);
    assert_eq!(meta.limit, 2);
    assert!(meta.has_next_page);
    assert!(meta.has_prev_page);
    assert_eq!(meta.next_page, Some(3));
    assert_eq!(meta.prev_page, Some(1));
}

#[tokio::test]
async fn test_out_of_range_page_keeps_totals() {
    let store = InMemoryStore::new();
    seed_five_tasks(&store).await;

    let result = paginate(&store, &newest_first(), PageOptions::new(9, 2))
        .await
        .unwrap();

    assert!(result.docs.is_empty());
    assert_eq!(result.meta.total_docs, 5);
    assert_eq!(result.meta.total_pages, 3);
    assert!(!result.meta.has_next_page);
    assert_eq!(result.meta.next_page, None);
}

#[tokio::test]
async fn test_empty_collection() {
    let store = InMemoryStore::new();
    let result = paginate(&store, &newest_first(), PageOptions::default())
        .await
        .unwrap();

    assert!(result.docs.is_empty());
    assert_eq!(result.meta.total_docs, 0);
    assert_eq!(result.meta.total_pages, 0);
    assert!(!result.meta.has_next_page);
    assert!(!result.meta.has_prev_page);
}

#[tokio::test]
async fn test_pages_partition_the_result_set() {
    let store = InMemoryStore::new();
    let seeded = seed_five_tasks(&store).await;

    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = paginate(&store, &newest_first(), PageOptions::new(page, 2))
            .await
            .unwrap();
        assert!(result.docs.len() <= 2);
        seen.extend(result.docs.iter().filter_map(|doc| doc.id()));
    }

    let mut expected: Vec<_> = seeded.iter().rev().map(|task| task.id).collect();
    assert_eq!(seen, expected);
    expected.dedup();
    assert_eq!(expected.len(), 5);
}

#[tokio::test]
async fn test_store_failure_is_returned_unchanged() {
    let err = paginate(&FailingStore, &newest_first(), PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TaskboardError::DataAccess(ref detail) if detail == "connection refused"
    ));
}
