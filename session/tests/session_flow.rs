//! Store-level session flows: login, restore at boot, background expiry.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use taskhive_core::environment::SystemClock;
use taskhive_runtime::Store;
use taskhive_session::mocks::{MockAuthApi, MockCredentialStore};
use taskhive_session::{
    ExpiryWatcher, SessionAction, SessionEnvironment, SessionReducer, SessionState, TokenPair,
};

type TestStore = Store<
    SessionState,
    SessionAction,
    SessionEnvironment<MockAuthApi, MockCredentialStore>,
    SessionReducer<MockAuthApi, MockCredentialStore>,
>;

/// Forge an unsigned access token whose claims expire `ttl_secs` from now.
fn access_token(user_id: i64, username: &str, role: &str, ttl_secs: i64) -> String {
    let claims = serde_json::json!({
        "user_id": user_id,
        "username": username,
        "role": role,
        "exp": Utc::now().timestamp() + ttl_secs,
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.sig")
}

fn token_pair(ttl_secs: i64) -> TokenPair {
    TokenPair {
        access: access_token(1, "John Manager", "manager", ttl_secs),
        refresh: "refresh".to_string(),
    }
}

fn store_with(api: MockAuthApi, credentials: MockCredentialStore) -> TestStore {
    let env = SessionEnvironment::new(api, credentials, Arc::new(SystemClock));
    Store::new(SessionState::default(), SessionReducer::new(), env)
}

#[tokio::test]
async fn login_persists_credential_and_sets_identity() {
    taskhive_testing::init_tracing();

    let api = MockAuthApi::new();
    let credentials = MockCredentialStore::new();
    let tokens = token_pair(3600);
    api.queue_login(Ok(tokens.clone()));

    let store = store_with(api.clone(), credentials.clone());

    let outcome = store
        .send_and_wait_for(
            SessionAction::LogIn {
                username: "john".to_string(),
                password: "password".to_string(),
            },
            |a| {
                matches!(
                    a,
                    SessionAction::LoggedIn { .. } | SessionAction::LoginFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(SessionAction::LoggedIn { .. })));

    // Credential persisted before the event was announced
    assert_eq!(credentials.stored(), Some(tokens));

    let state = store.state(Clone::clone).await;
    assert!(state.is_authenticated());
    assert_eq!(
        state.identity.map(|i| i.username),
        Some("John Manager".to_string())
    );
    assert_eq!(api.login_calls().len(), 1);
}

#[tokio::test]
async fn rejected_login_surfaces_error_and_stays_logged_out() {
    let store = store_with(MockAuthApi::new(), MockCredentialStore::new());

    let outcome = store
        .send_and_wait_for(
            SessionAction::LogIn {
                username: "john".to_string(),
                password: "wrong".to_string(),
            },
            |a| {
                matches!(
                    a,
                    SessionAction::LoggedIn { .. } | SessionAction::LoginFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(SessionAction::LoginFailed { .. })));

    let state = store.state(Clone::clone).await;
    assert!(!state.is_authenticated());
    assert!(state.last_error.is_some());
}

#[tokio::test]
async fn restore_picks_up_valid_persisted_credential() {
    let credentials = MockCredentialStore::with_credential(token_pair(3600));
    let store = store_with(MockAuthApi::new(), credentials);

    let outcome = store
        .send_and_wait_for(
            SessionAction::Restore,
            |a| matches!(a, SessionAction::Restored { .. } | SessionAction::LoggedOut),
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(SessionAction::Restored { .. })));
    assert!(store.state(SessionState::is_authenticated).await);
}

#[tokio::test]
async fn restore_discards_expired_credential() {
    let credentials = MockCredentialStore::with_credential(token_pair(-60));
    let store = store_with(MockAuthApi::new(), credentials.clone());

    let outcome = store
        .send_and_wait_for(
            SessionAction::Restore,
            |a| matches!(a, SessionAction::Restored { .. } | SessionAction::LoggedOut),
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(SessionAction::LoggedOut)));
    assert_eq!(credentials.stored(), None);
    assert!(!store.state(SessionState::is_authenticated).await);
}

#[tokio::test]
async fn logout_clears_persisted_credential() {
    let credentials = MockCredentialStore::with_credential(token_pair(3600));
    let store = store_with(MockAuthApi::new(), credentials.clone());

    let outcome = store
        .send_and_wait_for(
            SessionAction::LogOut,
            |a| matches!(a, SessionAction::LoggedOut),
            Duration::from_secs(5),
        )
        .await
        .map_err(|e| e.to_string());

    assert!(matches!(outcome, Ok(SessionAction::LoggedOut)));
    assert_eq!(credentials.stored(), None);
}

#[tokio::test(start_paused = true)]
async fn expiry_watcher_tears_down_expired_session() {
    let credentials = MockCredentialStore::new();
    let store = store_with(MockAuthApi::new(), credentials.clone());

    // Seed an authenticated session whose token expires in 30 seconds
    let tokens = token_pair(30);
    let identity = taskhive_session::Identity {
        user_id: taskhive_session::UserId(1),
        username: "John Manager".to_string(),
        role: taskhive_session::Role::Manager,
    };
    let handle = store
        .send(SessionAction::LoggedIn {
            identity,
            credential: tokens,
        })
        .await;
    assert!(handle.is_ok());

    let store_for_watcher = store.clone();
    let watcher = ExpiryWatcher::spawn(Duration::from_secs(60), move || {
        let store = store_for_watcher.clone();
        async move {
            let _ = store.send(SessionAction::CheckExpiry).await;
        }
    });

    // After one period the token has lapsed and the watcher forces logout
    tokio::time::sleep(Duration::from_secs(61)).await;
    for _ in 0..100 {
        if !store.state(SessionState::is_authenticated).await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let state = store.state(Clone::clone).await;
    assert!(!state.is_authenticated());
    assert!(state.last_error.as_deref().is_some_and(|e| e.contains("expired")));

    watcher.stop();
}
