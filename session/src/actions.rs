//! Session actions: commands issued by the view layer and events resolved by
//! effects.

use taskhive_macros::Action;

use crate::state::{Identity, TokenPair};

/// All inputs to the session reducer.
///
/// Commands express user intent (log in, log out); events carry the resolved
/// outcome of an effect (login succeeded, session expired). Events are what
/// view layers observe on the store's action broadcast.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    // ========== Commands ==========
    /// Command: authenticate with username and password.
    #[command]
    LogIn {
        /// Account username.
        username: String,
        /// Account password.
        password: String,
    },

    /// Command: register a new account.
    #[command]
    SignUp {
        /// Desired username.
        username: String,
        /// Contact email.
        email: String,
        /// Password.
        password: String,
        /// Password confirmation, checked by the backend as well.
        password_confirm: String,
    },

    /// Command: end the session.
    #[command]
    LogOut,

    /// Command: restore a persisted session at application boot.
    #[command]
    Restore,

    /// Command: re-validate the held access token (sent by the expiry watcher).
    #[command]
    CheckExpiry,

    // ========== Events ==========
    /// Event: login succeeded and the credential was persisted.
    #[event]
    LoggedIn {
        /// Decoded identity.
        identity: Identity,
        /// The token pair now held.
        credential: TokenPair,
    },

    /// Event: login failed.
    #[event]
    LoginFailed {
        /// User-visible reason.
        reason: String,
    },

    /// Event: signup succeeded.
    #[event]
    SignedUp {
        /// Confirmation message from the backend.
        message: String,
    },

    /// Event: signup failed.
    #[event]
    SignUpFailed {
        /// User-visible reason.
        reason: String,
    },

    /// Event: a persisted session was restored at boot.
    #[event]
    Restored {
        /// Decoded identity.
        identity: Identity,
        /// The restored token pair.
        credential: TokenPair,
    },

    /// Event: the session ended. View layers redirect to the login view.
    #[event]
    LoggedOut,

    /// Event: the access token expired; the session was torn down.
    #[event]
    SessionExpired,
}
