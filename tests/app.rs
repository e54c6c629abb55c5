mod common;

use common::{user, FakeBackend};
use std::sync::Arc;

use mindalign::app::{create_backend, create_session_store, App};
use mindalign::backend::Backend;
use mindalign::config::Config;
use mindalign::session::{PersistedSession, SessionStore};

#[tokio::test]
async fn test_views_require_sign_in() {
    let fake = FakeBackend::new();
    fake.add_account(user("1", "Ana", "ana@example.com"), "Secr3t!pw");
    let backend: Arc<dyn Backend> = fake.clone();
    let mut app = App::with_parts(backend, Box::new(mindalign::session::MemorySessionStore::new()));

    assert!(app.require_auth().is_err());

    app.session.login("ana@example.com", "Secr3t!pw").await.unwrap();
    assert!(app.require_auth().is_ok());

    // Views share the app's notifier
    let mut tasks = app.tasks();
    tasks.add("Buy milk").await.unwrap();
    assert!(app.notifier.drain().iter().any(|n| !n.is_error() && n.message.contains("Task added")));
}

#[test]
fn test_session_store_follows_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.session.path = Some(dir.path().join("session.json"));

    let store = create_session_store(&config).unwrap();
    store
        .save(&PersistedSession::new(user("1", "Ana", "ana@example.com"), "t".to_string()))
        .unwrap();
    assert!(dir.path().join("session.json").exists());

    config.session.persist = false;
    let store = create_session_store(&config).unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_create_backend() {
    let config = Config::default();
    let backend = create_backend("rest", &config).unwrap();
    assert_eq!(backend.backend_type(), "rest");
    assert!(create_backend("carrier-pigeon", &config).is_err());
}
