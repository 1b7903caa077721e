//! Cookie sessions backed by signed HS256 tokens.
//!
//! Login issues a short-lived token carrying the username and role, set as
//! an `HttpOnly` cookie. [`SessionLayer`] validates it on every request and
//! inserts a [`CurrentUser`] into request extensions. Unauthenticated
//! requests get a redirect to the login page, or a 401 JSON body for
//! `/api` paths. There is no server-side session store.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use wakehub_domain::time;
use wakehub_domain::user::Role;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "wakehub_session";

/// Signing configuration for session tokens.
pub struct SessionConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    exp: i64,
}

/// The authenticated user, inserted into request extensions by
/// [`SessionLayer`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    /// Whether this session may manage users.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl SessionConfig {
    /// Create a config signing with `secret`, issuing tokens valid for
    /// `ttl_minutes`.
    #[must_use]
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl_minutes,
        }
    }

    /// Issue a signed session token.
    ///
    /// # Errors
    ///
    /// Returns the underlying encoding error, which only occurs for key
    /// misconfiguration.
    pub fn issue(&self, username: &str, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = (time::now() + chrono::Duration::minutes(self.ttl_minutes)).timestamp();
        let claims = Claims {
            sub: username.to_string(),
            role,
            exp,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token, returning the user it names. Expired or tampered
    /// tokens return `None`.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<CurrentUser> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .ok()
            .map(|data| CurrentUser {
                username: data.claims.sub,
                role: data.claims.role,
            })
    }

    /// `Set-Cookie` value establishing a session.
    #[must_use]
    pub fn cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl_minutes * 60
        )
    }

    /// `Set-Cookie` value clearing the session.
    #[must_use]
    pub fn clear_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

fn extract_token(req: &Request) -> Option<String> {
    let cookie_header = req.headers().get(header::COOKIE)?;
    let cookies = cookie_header.to_str().ok()?;
    for part in cookies.split(';') {
        if let Some(value) = part
            .trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return Some(value.to_owned());
        }
    }
    None
}

fn unauthorized_json() -> axum::response::Response {
    axum::response::Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"error":"unauthorized"}"#))
        .unwrap()
}

fn login_redirect() -> axum::response::Response {
    axum::response::Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, "/")
        .body(Body::empty())
        .unwrap()
}

/// Tower layer enforcing a valid session on everything but the login page
/// and the health check.
#[derive(Clone)]
pub struct SessionLayer {
    pub config: Arc<SessionConfig>,
}

impl<S> tower::Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            config: self.config.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SessionService<S> {
    inner: S,
    config: Arc<SessionConfig>,
}

impl<S> tower::Service<Request> for SessionService<S>
where
    S: tower::Service<Request, Response = axum::response::Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let path = req.uri().path();

        // Public endpoints: the login page itself and the health check.
        if path == "/" || path == "/health" {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        match extract_token(&req).and_then(|token| self.config.verify(&token)) {
            Some(user) => {
                tracing::debug!(user = %user.username, path = %path, "session valid");
                req.extensions_mut().insert(user);
                let mut inner = self.inner.clone();
                Box::pin(async move { inner.call(req).await })
            }
            None => {
                tracing::debug!(path = %path, "no valid session");
                let response = if path.starts_with("/api/") {
                    unauthorized_json()
                } else {
                    login_redirect()
                };
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
