//! Session reducer.
//!
//! Implements the credential lifecycle: login, signup, logout, restore at
//! boot, and the background expiry check.
//!
//! # Flow
//!
//! 1. A command is validated against current state
//! 2. Remote work is described as effects calling the injected providers
//! 3. Effects resolve into events which are applied to state
//!
//! The credential is persisted *inside* the login effect, before `LoggedIn`
//! is emitted - the remote client re-reads the credential store per request,
//! so there is no window in which it could attach a stale credential.

use taskhive_core::effect::Effect;
use taskhive_core::reducer::{Effects, Reducer};
use taskhive_core::smallvec;

use crate::actions::SessionAction;
use crate::environment::SessionEnvironment;
use crate::providers::{AuthApi, CredentialStore, SignupRequest};
use crate::state::SessionState;
use crate::token;

/// Reducer for the session store.
#[derive(Debug, Clone)]
pub struct SessionReducer<A, C> {
    /// Phantom data to hold provider type parameters.
    _phantom: std::marker::PhantomData<(A, C)>,
}

impl<A, C> SessionReducer<A, C> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, C> Default for SessionReducer<A, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C> SessionReducer<A, C> {
    /// Applies an event to state.
    fn apply_event(state: &mut SessionState, event: &SessionAction) {
        match event {
            SessionAction::LoggedIn {
                identity,
                credential,
            }
            | SessionAction::Restored {
                identity,
                credential,
            } => {
                state.identity = Some(identity.clone());
                state.credential = Some(credential.clone());
                state.last_error = None;
            },
            SessionAction::LoginFailed { reason } | SessionAction::SignUpFailed { reason } => {
                state.identity = None;
                state.credential = None;
                state.last_error = Some(reason.clone());
            },
            SessionAction::SignedUp { message } => {
                state.last_notice = Some(message.clone());
                state.last_error = None;
            },
            SessionAction::LoggedOut => {
                state.identity = None;
                state.credential = None;
                state.last_error = None;
            },
            SessionAction::SessionExpired => {
                state.identity = None;
                state.credential = None;
                state.last_error = Some("Your session has expired, please log in again".to_string());
            },
            // Commands are not applied to state
            SessionAction::LogIn { .. }
            | SessionAction::SignUp { .. }
            | SessionAction::LogOut
            | SessionAction::Restore
            | SessionAction::CheckExpiry => {},
        }
    }
}

impl<A, C> Reducer for SessionReducer<A, C>
where
    A: AuthApi + Clone + 'static,
    C: CredentialStore + Clone + 'static,
{
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment<A, C>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        tracing::trace!(action = action.name(), "Reducing session action");

        match action {
            // ═══════════════════════════════════════════════════════════════
            // LogIn: exchange credentials, decode identity, persist pair
            // ═══════════════════════════════════════════════════════════════
            SessionAction::LogIn { username, password } => {
                if username.trim().is_empty() || password.is_empty() {
                    Self::apply_event(
                        state,
                        &SessionAction::LoginFailed {
                            reason: "Username and password are required".to_string(),
                        },
                    );
                    return smallvec![];
                }

                let api = env.api.clone();
                let credentials = env.credentials.clone();

                smallvec![Effect::future(async move {
                    let tokens = match api.login(&username, &password).await {
                        Ok(tokens) => tokens,
                        Err(error) => {
                            tracing::warn!(%error, "Login request failed");
                            return Some(SessionAction::LoginFailed {
                                reason: error.to_string(),
                            });
                        },
                    };

                    let identity = match token::decode_claims(&tokens.access) {
                        Ok(claims) => claims.identity(),
                        Err(error) => {
                            tracing::warn!(%error, "Received an undecodable access token");
                            return Some(SessionAction::LoginFailed {
                                reason: error.to_string(),
                            });
                        },
                    };

                    // Persist before announcing, so the very next request
                    // already attaches the new credential.
                    if let Err(error) = credentials.save(&tokens).await {
                        tracing::error!(%error, "Failed to persist credential");
                        return Some(SessionAction::LoginFailed {
                            reason: error.to_string(),
                        });
                    }

                    tracing::info!(user = %identity.username, "Logged in");
                    Some(SessionAction::LoggedIn {
                        identity,
                        credential: tokens,
                    })
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // SignUp: register an account; does not log in
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignUp {
                username,
                email,
                password,
                password_confirm,
            } => {
                if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
                    Self::apply_event(
                        state,
                        &SessionAction::SignUpFailed {
                            reason: "All signup fields are required".to_string(),
                        },
                    );
                    return smallvec![];
                }
                if password != password_confirm {
                    Self::apply_event(
                        state,
                        &SessionAction::SignUpFailed {
                            reason: "Passwords do not match".to_string(),
                        },
                    );
                    return smallvec![];
                }

                let api = env.api.clone();
                let request = SignupRequest {
                    username,
                    email,
                    password,
                    password_confirm,
                };

                smallvec![Effect::future(async move {
                    match api.signup(request).await {
                        Ok(message) => Some(SessionAction::SignedUp { message }),
                        Err(error) => {
                            tracing::warn!(%error, "Signup request failed");
                            Some(SessionAction::SignUpFailed {
                                reason: error.to_string(),
                            })
                        },
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // LogOut: clear storage, then announce
            // ═══════════════════════════════════════════════════════════════
            SessionAction::LogOut => {
                let credentials = env.credentials.clone();

                smallvec![Effect::future(async move {
                    if let Err(error) = credentials.clear().await {
                        // The in-memory session is torn down regardless.
                        tracing::warn!(%error, "Failed to clear persisted credential");
                    }
                    Some(SessionAction::LoggedOut)
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // Restore: pick up a persisted credential at boot
            // ═══════════════════════════════════════════════════════════════
            SessionAction::Restore => {
                let credentials = env.credentials.clone();
                let now = env.clock.now();

                smallvec![Effect::future(async move {
                    let stored = match credentials.load().await {
                        Ok(stored) => stored,
                        Err(error) => {
                            tracing::warn!(%error, "Failed to read persisted credential");
                            return None;
                        },
                    };

                    let Some(tokens) = stored else {
                        // Nothing persisted: stay logged out, no event needed.
                        return None;
                    };

                    if token::is_expired(&tokens.access, now) {
                        tracing::info!("Persisted credential is expired, discarding");
                        if let Err(error) = credentials.clear().await {
                            tracing::warn!(%error, "Failed to clear expired credential");
                        }
                        return Some(SessionAction::LoggedOut);
                    }

                    match token::decode_claims(&tokens.access) {
                        Ok(claims) => Some(SessionAction::Restored {
                            identity: claims.identity(),
                            credential: tokens,
                        }),
                        Err(error) => {
                            tracing::warn!(%error, "Persisted credential is undecodable, discarding");
                            if let Err(error) = credentials.clear().await {
                                tracing::warn!(%error, "Failed to clear broken credential");
                            }
                            Some(SessionAction::LoggedOut)
                        },
                    }
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // CheckExpiry: periodic re-validation of the held access token
            // ═══════════════════════════════════════════════════════════════
            SessionAction::CheckExpiry => {
                let Some(ref credential) = state.credential else {
                    return smallvec![];
                };

                if !token::is_expired(&credential.access, env.clock.now()) {
                    return smallvec![];
                }

                tracing::info!("Access token expired, forcing logout");
                let credentials = env.credentials.clone();

                smallvec![Effect::future(async move {
                    if let Err(error) = credentials.clear().await {
                        tracing::warn!(%error, "Failed to clear expired credential");
                    }
                    Some(SessionAction::SessionExpired)
                })]
            },

            // ═══════════════════════════════════════════════════════════════
            // Events: already resolved, apply to state
            // ═══════════════════════════════════════════════════════════════
            SessionAction::LoggedIn { .. }
            | SessionAction::LoginFailed { .. }
            | SessionAction::SignedUp { .. }
            | SessionAction::SignUpFailed { .. }
            | SessionAction::Restored { .. }
            | SessionAction::LoggedOut
            | SessionAction::SessionExpired => {
                Self::apply_event(state, &action);
                smallvec![]
            },
        }
    }
}
