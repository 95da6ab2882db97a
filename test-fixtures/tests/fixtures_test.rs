use cortex_core::memory::MemoryType;
use cortex_core::traits::{IEmbeddingProvider, IMemoryStorage, MemoryFilter};
use test_fixtures::{
    sample_memories, InMemoryStorage, MemoryBuilder, MockEmbeddingProvider, StorageOp,
};

#[test]
fn sample_memories_cover_several_types() {
    let memories = sample_memories();
    assert_eq!(memories.len(), 6);
    let types: Vec<MemoryType> = memories.iter().map(|m| m.memory_type()).collect();
    assert!(types.contains(&MemoryType::Tribal));
    assert!(types.contains(&MemoryType::Core));
    assert!(memories
        .iter()
        .all(|m| (0.0..=1.0).contains(&m.confidence.value())));
}

#[tokio::test]
async fn storage_filters_by_prefix_and_tags() {
    let storage = InMemoryStorage::with_memories(sample_memories());

    let billing = storage
        .search(&MemoryFilter {
            linked_file_prefix: Some("src/billing".to_string()),
            ..MemoryFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(billing.len(), 1);
    assert_eq!(billing[0].id, "mem-repository");

    let tagged = storage
        .search(&MemoryFilter::tags(vec!["security".to_string()]))
        .await
        .unwrap();
    assert_eq!(tagged[0].id, "mem-bcrypt");
}

#[tokio::test]
async fn injected_failures_only_hit_the_named_operation() {
    let storage = InMemoryStorage::with_memories([MemoryBuilder::tribal("t1").build()]);
    storage.fail_on(StorageOp::FindByFile);

    assert!(storage.find_by_file("src/lib.rs").await.is_err());
    assert!(storage.read("t1").await.unwrap().is_some());

    storage.heal();
    assert!(storage.find_by_file("src/lib.rs").await.is_ok());
}

#[tokio::test]
async fn record_access_increments_count() {
    let storage = InMemoryStorage::with_memories([MemoryBuilder::tribal("t1").build()]);
    storage.record_access("t1").await.unwrap();
    storage.record_access("t1").await.unwrap();
    assert_eq!(storage.get("t1").unwrap().access_count, 2);
    assert!(storage.record_access("missing").await.is_err());
}

#[tokio::test]
async fn mock_embeddings_are_deterministic() {
    let provider = MockEmbeddingProvider::new(16);
    let a = provider.embed("hello").await.unwrap();
    let b = provider.embed("hello").await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 16);

    provider.poison_texts_containing("bad");
    assert!(provider
        .embed_batch(&["ok".to_string(), "bad text".to_string()])
        .await
        .is_err());
    assert_eq!(provider.batch_sizes(), vec![1, 1, 2]);
}
