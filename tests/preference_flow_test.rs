use std::sync::Arc;

use stylerank::embedding::EMBEDDING_DIM;
use stylerank::embedding::source::{SourceEmbedder, UriHashEmbedder};
use stylerank::error::{Result, StyleRankError};
use stylerank::profile::{PersonalizationStatus, PreferenceService};
use stylerank::store::memory::MemoryProfileStore;

fn service(store: Arc<MemoryProfileStore>) -> PreferenceService {
    PreferenceService::new(store, Arc::new(UriHashEmbedder::new()))
}

#[tokio::test]
async fn first_photo_sets_combined_to_its_own_embedding() -> Result<()> {
    let store = Arc::new(MemoryProfileStore::new());
    let service = service(store);

    let before = service.profile("ana").await?;
    assert_eq!(before.status(), PersonalizationStatus::NoPreferences);
    assert!(before.combined.is_none());

    let profile = service.add_photo("ana", "file:///photos/look-1.jpg").await?;
    assert_eq!(profile.status(), PersonalizationStatus::HasPreferences);
    assert_eq!(profile.photo_count, 1);

    let expected = UriHashEmbedder::new()
        .embed_source("file:///photos/look-1.jpg")
        .await?;
    assert_eq!(profile.combined.as_ref().unwrap(), &expected);
    assert_eq!(profile.combined.as_ref().unwrap().dimension(), EMBEDDING_DIM);
    Ok(())
}

#[tokio::test]
async fn combined_tracks_mean_across_adds_and_removes() -> Result<()> {
    let store = Arc::new(MemoryProfileStore::new());
    let service = service(store);

    service.add_photo("ana", "file:///photos/a.jpg").await?;
    let two = service.add_photo("ana", "file:///photos/b.jpg").await?;
    assert_eq!(two.photo_count, 2);

    let embedder = UriHashEmbedder::new();
    let a = embedder.embed_source("file:///photos/a.jpg").await?;
    let b = embedder.embed_source("file:///photos/b.jpg").await?;
    let combined = two.combined.as_ref().unwrap();
    for i in 0..EMBEDDING_DIM {
        let mean = (a.data[i] + b.data[i]) / 2.0;
        assert!((combined.data[i] - mean).abs() < 1e-6);
    }

    // Removing the first photo leaves the second photo's own embedding.
    let one = service.remove_photo("ana", 0).await?;
    assert_eq!(one.photo_count, 1);
    assert_eq!(one.combined.as_ref().unwrap(), &b);
    Ok(())
}

#[tokio::test]
async fn removing_last_photo_returns_to_no_preferences() -> Result<()> {
    let store = Arc::new(MemoryProfileStore::new());
    let service = service(store);

    service.add_photo("ana", "file:///photos/a.jpg").await?;
    let emptied = service.remove_photo("ana", 0).await?;

    assert_eq!(emptied.photo_count, 0);
    assert!(emptied.combined.is_none());
    assert_eq!(emptied.status(), PersonalizationStatus::NoPreferences);
    Ok(())
}

#[tokio::test]
async fn remove_with_invalid_index_fails_and_persists_nothing() -> Result<()> {
    let store = Arc::new(MemoryProfileStore::new());
    let service = PreferenceService::new(store.clone(), Arc::new(UriHashEmbedder::new()));

    service.add_photo("ana", "file:///photos/a.jpg").await?;
    let err = service.remove_photo("ana", 3).await.unwrap_err();
    assert!(matches!(err, StyleRankError::OutOfRange { index: 3, len: 1 }));

    // The stored profile is unchanged.
    let stored = service.profile("ana").await?;
    assert_eq!(stored.photo_count, 1);
    Ok(())
}

#[tokio::test]
async fn profiles_persist_across_service_instances() -> Result<()> {
    let store = Arc::new(MemoryProfileStore::new());

    let first = PreferenceService::new(store.clone(), Arc::new(UriHashEmbedder::new()));
    first.add_photo("ana", "file:///photos/a.jpg").await?;

    let second = PreferenceService::new(store, Arc::new(UriHashEmbedder::new()));
    let profile = second.profile("ana").await?;
    assert_eq!(profile.photo_count, 1);
    assert_eq!(profile.sources[0].uri, "file:///photos/a.jpg");
    Ok(())
}
