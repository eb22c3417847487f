use chrono::Duration;

use engine::{Claims, Engine, EngineError, SessionIssuer};

fn engine() -> Engine {
    Engine::builder().secret("test-secret").build().unwrap()
}

#[tokio::test]
async fn register_normalizes_and_returns_user() {
    let engine = engine();
    let user = engine
        .register("  alice  ", " Alice@Example.COM ", "hunter2")
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, "hunter2");
}

#[tokio::test]
async fn duplicate_email_any_case_is_rejected() {
    let engine = engine();
    engine
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let err = engine
        .register("someone-else", "ALICE@example.com", "hunter2")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateIdentity);
}

#[tokio::test]
async fn duplicate_trimmed_username_is_rejected() {
    let engine = engine();
    engine
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let err = engine
        .register("  alice ", "other@example.com", "hunter2")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateIdentity);
}

#[tokio::test]
async fn verify_accepts_the_right_password() {
    let engine = engine();
    let registered = engine
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let verified = engine.verify("alice@example.com", "hunter2").await.unwrap();
    assert_eq!(verified.id, registered.id);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let engine = engine();
    engine
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let wrong_password = engine
        .verify("alice@example.com", "not-hunter2")
        .await
        .unwrap_err();
    let unknown_email = engine
        .verify("nobody@example.com", "hunter2")
        .await
        .unwrap_err();
    assert_eq!(wrong_password, EngineError::InvalidCredentials);
    assert_eq!(unknown_email, EngineError::InvalidCredentials);
}

#[tokio::test]
async fn session_roundtrip_binds_the_user() {
    let engine = engine();
    let user = engine
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let token = engine.sessions().issue(user.id).unwrap();
    assert_eq!(engine.sessions().validate(&token).unwrap(), user.id);
}

#[tokio::test]
async fn expired_session_fails_with_expiry_error() {
    let engine = engine();
    let token = engine
        .sessions()
        .sign(&Claims::new(1, Duration::seconds(-1)))
        .unwrap();
    assert_eq!(
        engine.sessions().validate(&token).unwrap_err(),
        EngineError::TokenExpired
    );
}

#[tokio::test]
async fn foreign_secret_session_never_validates() {
    let engine = engine();
    let foreign = SessionIssuer::new(b"some-other-secret");
    let token = foreign.issue(1).unwrap();
    assert_eq!(
        engine.sessions().validate(&token).unwrap_err(),
        EngineError::TokenInvalid
    );
}

#[tokio::test]
async fn builder_requires_a_secret() {
    assert!(Engine::builder().build().is_err());
    assert!(Engine::builder().secret("").build().is_err());
}
