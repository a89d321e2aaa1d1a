//! Session restore and teardown through the real file store.

use folio_client::{FileTokenStore, FolioClient, Transport};
use folio_core::auth::SessionEvent;
use folio_core::config::ClientConfig;
use tempfile::TempDir;

fn transport() -> Transport {
    // Unroutable address: these flows must not touch the network.
    Transport::new(&ClientConfig::with_base_url("http://127.0.0.1:1"))
}

#[tokio::test]
async fn test_restores_session_from_disk_and_tears_it_down() {
    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("admin_token");
    std::fs::write(&token_path, "persisted-token").unwrap();

    let client = FolioClient::with_parts(transport(), FileTokenStore::new(&token_path))
        .await
        .unwrap();

    assert!(client.session().is_authenticated().await);
    assert_eq!(
        client.session().token().await,
        Some("persisted-token".to_string())
    );

    let mut events = client.session().subscribe();
    client.session().logout().await;

    assert!(!client.session().is_authenticated().await);
    assert!(!token_path.exists());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
}

#[tokio::test]
async fn test_fresh_start_is_unauthenticated() {
    let dir = TempDir::new().unwrap();

    let client = FolioClient::with_parts(
        transport(),
        FileTokenStore::new(dir.path().join("admin_token")),
    )
    .await
    .unwrap();

    assert!(!client.session().is_authenticated().await);
    assert_eq!(client.session().token().await, None);
}
