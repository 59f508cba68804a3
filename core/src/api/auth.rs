//! Sign-in flows. These are the only operations that write the session.

use serde_json::Value;
use tracing::{info, warn};

use super::{encode_body, TravelApi};
use crate::encode::{self, Attachment};
use crate::entities::{Credentials, Normalize, ProfileInput, RegisterInput, User};
use crate::error::{ApiError, ApiResult};
use crate::http::HttpMethod;
use crate::raw::{Field, Raw};
use crate::transport::HttpExecutor;

const TOKEN: Field<String> = Field::new(&["token", "access_token", "access", "accessToken"]);
const USER_OBJECT: &[&str] = &["user", "profile"];

impl<E: HttpExecutor> TravelApi<E> {
    /// Exchanges credentials for a token and stores both token and user in
    /// the session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let path = self.routes.login();
        let body = encode_body(&encode::LOGIN, credentials, None, &path, "login")?;
        let payload = self.write(HttpMethod::Post, &path, Some(body), "login").await?;

        let raw = Raw::new(&payload);
        let token = TOKEN
            .get(raw)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::unexpected("login response carried no token"))?;
        let user = user_in(&payload);
        info!(user = %user.id, "signed in");
        self.session().sign_in(token, Some(user.clone()));
        Ok(user)
    }

    /// Creates an account. The session is left untouched; the caller signs
    /// in afterwards.
    pub async fn register(&self, input: &RegisterInput) -> ApiResult<User> {
        let path = self.routes.register();
        let body = encode_body(&encode::REGISTER, input, None, &path, "register")?;
        let payload = self.write(HttpMethod::Post, &path, Some(body), "register").await?;
        Ok(user_in(&payload))
    }

    /// Tells the backend about the sign-out, then clears the session whatever
    /// the backend said.
    pub async fn logout(&self) {
        if self.session().is_authenticated() {
            if let Err(err) = self.transport.send(HttpMethod::Post, &self.routes.logout(), None).await {
                warn!(error = %err, "logout request failed; clearing the session anyway");
            }
        }
        self.session().sign_out();
    }

    /// Reloads the signed-in user and refreshes the session copy.
    pub async fn fetch_profile(&self) -> Option<User> {
        let user: User = self.read_one(&self.routes.profile(), "profile").await?;
        self.session().set_user(user.clone());
        Some(user)
    }

    pub async fn update_profile(&self, input: &ProfileInput, avatar: Option<Attachment>) -> ApiResult<User> {
        let user: User = self
            .write_record(HttpMethod::Patch, &self.routes.profile(), &encode::USER, input, avatar, "profile")
            .await?;
        self.session().set_user(user.clone());
        Ok(user)
    }
}

/// The user record in an auth response: under `user`/`profile`, or the
/// payload itself.
fn user_in(payload: &Value) -> User {
    let nested = Raw::new(payload).nested_any(USER_OBJECT);
    if nested.is_empty() {
        User::from_value(payload)
    } else {
        User::normalize(nested)
    }
}
