//! Signed session tokens and the Tower middleware that enforces them.
//!
//! Tokens are HS256 JWTs carrying the visitor's email as `sub`. `SessionLayer`
//! verifies the token before the wrapped route runs and stores the
//! [`SessionUser`] in the request extensions.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::IntoResponse;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tower::{Layer, Service};

use crate::domain::model::SessionUser;
use crate::domain::ports::SessionValidator;
use crate::utils::error::{Result, SiteError};

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Issues and verifies session tokens signed with the configured secret.
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, email: &str, ttl: Duration) -> Result<String> {
        self.issue_until(email, Utc::now() + ttl)
    }

    pub fn issue_until(&self, email: &str, expires_at: DateTime<Utc>) -> Result<String> {
        let claims = SessionClaims {
            sub: email.to_string(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            SiteError::ConfigError {
                message: format!("failed to sign session token: {}", e),
            }
        })
    }
}

fn unauthorized(reason: &str) -> SiteError {
    SiteError::UnauthorizedError {
        reason: reason.to_string(),
    }
}

impl SessionValidator for SessionSigner {
    fn verify(&self, token: &str) -> Result<SessionUser> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => unauthorized("session expired"),
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    unauthorized("invalid session signature")
                }
                _ => unauthorized(&format!("malformed session token: {}", e)),
            })?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err(unauthorized("session has no email"));
        }
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| unauthorized("malformed session expiry"))?;

        Ok(SessionUser {
            email: claims.sub,
            expires_at,
        })
    }
}

/// Tower `Layer` that rejects requests without a valid session with 401.
#[derive(Clone)]
pub struct SessionLayer<V: SessionValidator> {
    validator: Arc<V>,
    cookie_name: Arc<str>,
}

impl<V: SessionValidator> SessionLayer<V> {
    pub fn new(validator: Arc<V>, cookie_name: &str) -> Self {
        Self {
            validator,
            cookie_name: Arc::from(cookie_name),
        }
    }
}

impl<V: SessionValidator, S> Layer<S> for SessionLayer<V> {
    type Service = SessionService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            validator: self.validator.clone(),
            cookie_name: self.cookie_name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SessionService<V: SessionValidator, S> {
    inner: S,
    validator: Arc<V>,
    cookie_name: Arc<str>,
}

impl<V, S> Service<Request<Body>> for SessionService<V, S>
where
    V: SessionValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let verified = match extract_token(&req, &self.cookie_name) {
            Some(token) => self.validator.verify(&token),
            None => Err(unauthorized("missing session token")),
        };

        Box::pin(async move {
            match verified {
                Ok(user) => {
                    tracing::debug!("Session verified for {}", user.email);
                    req.extensions_mut().insert(user);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

/// Bearer token first, then the session cookie.
fn extract_token(req: &Request<Body>, cookie_name: &str) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    req.headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
