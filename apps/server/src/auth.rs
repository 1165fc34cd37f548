use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use producao_core::{
    errors::{Error as CoreError, ValidationError},
    users::{NewUser, RequestContext, Role, User},
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{CreateAdminRequest, UserResponse},
};

pub const SESSION_COOKIE: &str = "session";

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    /// Revoked token ids mapped to their expiry, pruned as they lapse.
    revoked: RwLock<HashMap<String, usize>>,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    InactiveUser,
    MissingCredentials,
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    error: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
    jti: String,
}

/// A validated session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub token_id: String,
    pub expires_at: usize,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
    pub message: String,
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

#[derive(Serialize)]
pub struct CreateAdminResponse {
    pub message: String,
    pub user: UserResponse,
}

fn now_secs() -> Result<u64, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))
}

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(password_hash: &str, candidate: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = now_secs()?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now as usize,
            exp: (now + self.token_ttl.as_secs()) as usize,
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<Session, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_) => AuthError::Unauthorized,
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })?;
        if self.is_revoked(&claims.jti) {
            return Err(AuthError::Unauthorized);
        }
        Ok(Session {
            user_id: claims.sub,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }

    pub fn revoke(&self, session: &Session) {
        let now = now_secs().unwrap_or_default() as usize;
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        revoked.retain(|_, expires_at| *expires_at >= now);
        revoked.insert(session.token_id.clone(), session.expires_at);
    }

    pub fn is_revoked(&self, token_id: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token_id)
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthError::InactiveUser => (StatusCode::UNAUTHORIZED, "User is inactive".to_string()),
            AuthError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                "username and password are required".to_string(),
            ),
            AuthError::Internal(msg) => {
                tracing::error!("Authentication failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            error: message,
        });
        (status, body).into_response()
    }
}

impl From<CoreError> for AuthError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(_) => AuthError::Unauthorized,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// Token from `Authorization: Bearer` or, failing that, the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| {
            let (scheme, token) = header.split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("Bearer")
                .then(|| token.trim().to_string())
        })
        .filter(|token| !token.is_empty());
    bearer.or_else(|| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
            .map(|(_, value)| value.to_string())
    })
}

fn session_cookie(token: &str, max_age: u64) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}"
    ))
    .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))
}

/// Resolves the active user behind a token.
fn resolve_session(state: &AppState, token: &str) -> Result<(Session, User), AuthError> {
    let session = state.auth.validate_token(token)?;
    let user = state.user_service.get_user(&session.user_id)?;
    if !user.is_active {
        return Err(AuthError::Unauthorized);
    }
    Ok((session, user))
}

/// Rejects requests without a valid session and hands the acting user to
/// handlers as a [`RequestContext`] extension.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = session_token(request.headers()).ok_or(AuthError::Unauthorized)?;
    let (session, user) = resolve_session(&state, &token)?;
    let extensions = request.extensions_mut();
    extensions.insert(session);
    extensions.insert(RequestContext::new(user));
    Ok(next.run(request).await)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AuthError::MissingCredentials);
    };
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let user = state
        .user_service
        .find_by_username(&username)?
        .ok_or(AuthError::InvalidCredentials)?;
    AuthManager::verify_password(&user.password_hash, &password)?;
    if !user.is_active {
        return Err(AuthError::InactiveUser);
    }

    let user = state.user_service.record_login(&user.id).await?;
    let token = state.auth.issue_token(&user.id)?;
    let expires_in = state.auth.expires_in().as_secs();
    let cookie = session_cookie(&token, expires_in)?;
    tracing::info!("User '{}' logged in", user.username);

    let body = Json(LoginResponse {
        authenticated: true,
        message: "Login successful".to_string(),
        user: UserResponse::from(&user),
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in,
    });
    Ok(([(SET_COOKIE, cookie)], body).into_response())
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AuthError> {
    if let Some(token) = session_token(&headers) {
        if let Ok(session) = state.auth.validate_token(&token) {
            state.auth.revoke(&session);
        }
    }
    let body = Json(MessageResponse {
        message: "Logout successful".to_string(),
    });
    Ok(([(SET_COOKIE, session_cookie("", 0)?)], body).into_response())
}

pub async fn check_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<AuthStatusResponse> {
    let user = session_token(&headers)
        .and_then(|token| resolve_session(&state, &token).ok())
        .map(|(_, user)| UserResponse::from(&user));
    Json(AuthStatusResponse {
        authenticated: user.is_some(),
        user,
    })
}

pub async fn me(Extension(ctx): Extension<RequestContext>) -> Json<UserEnvelope> {
    Json(UserEnvelope {
        user: UserResponse::from(ctx.user()),
    })
}

pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateAdminRequest>,
) -> ApiResult<(StatusCode, Json<CreateAdminResponse>)> {
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CoreError::from(ValidationError::MissingField("password".to_string())))?;
    let password_hash = AuthManager::hash_password(&password)
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    let user = state
        .user_service
        .create_admin(NewUser {
            username: payload.username.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            password_hash,
            role: Role::Admin,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateAdminResponse {
            message: "Administrator created".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}
