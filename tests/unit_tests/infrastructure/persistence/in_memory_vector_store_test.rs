use voice_to_post::application::ports::{VectorStore, VectorStoreError};
use voice_to_post::domain::{ContextEntry, Embedding};
use voice_to_post::infrastructure::persistence::InMemoryVectorStore;

fn entry(text: &str) -> ContextEntry {
    ContextEntry::new(text.to_string())
}

#[tokio::test]
async fn given_entries_when_searching_then_nearest_first() {
    let store = InMemoryVectorStore::new();
    store
        .add(
            &[entry("far"), entry("near"), entry("middle")],
            &[
                Embedding::new(vec![10.0, 0.0]),
                Embedding::new(vec![1.0, 0.0]),
                Embedding::new(vec![4.0, 0.0]),
            ],
        )
        .await
        .unwrap();

    let results = store
        .search(&Embedding::new(vec![0.0, 0.0]), 2)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].entry.text, "near");
    assert_eq!(results[0].distance, 1.0);
    assert_eq!(results[1].entry.text, "middle");
}

#[tokio::test]
async fn given_empty_store_when_searching_then_returns_empty() {
    let store = InMemoryVectorStore::new();
    let results = store
        .search(&Embedding::new(vec![1.0, 2.0]), 3)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn given_wrong_dimension_when_adding_then_rejects_whole_batch() {
    let store = InMemoryVectorStore::with_dimension(2);
    let result = store
        .add(
            &[entry("ok"), entry("bad")],
            &[Embedding::new(vec![1.0, 0.0]), Embedding::new(vec![1.0])],
        )
        .await;

    assert!(matches!(
        result,
        Err(VectorStoreError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn given_mismatched_counts_when_adding_then_returns_error() {
    let store = InMemoryVectorStore::new();
    let result = store.add(&[entry("a")], &[]).await;
    assert!(matches!(result, Err(VectorStoreError::CountMismatch { .. })));
}
