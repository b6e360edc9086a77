//! [`AuthApi`] implementation for the remote client.

use std::future::Future;

use taskhive_session::TokenPair;
use taskhive_session::error::Result;
use taskhive_session::providers::{AuthApi, CredentialStore, SignupRequest};

use crate::client::ApiClient;
use crate::types::SignupBody;

impl<C> AuthApi for ApiClient<C>
where
    C: CredentialStore + Clone,
{
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenPair>> + Send {
        let client = self.clone();
        let username = username.to_string();
        let password = password.to_string();

        async move {
            let pair = client.post_token(&username, &password).await?;
            Ok(pair)
        }
    }

    fn signup(&self, request: SignupRequest) -> impl Future<Output = Result<String>> + Send {
        let client = self.clone();
        let body = SignupBody {
            username: request.username,
            email: request.email,
            password: request.password,
            password2: request.password_confirm,
        };

        async move {
            let message = client.post_signup(body).await?;
            Ok(message)
        }
    }
}
