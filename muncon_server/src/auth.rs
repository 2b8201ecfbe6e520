use argon2::Argon2;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    headers::{
        authorization::{Basic, Bearer},
        Authorization,
    },
    http::{request::Parts, StatusCode},
    routing::post,
    Json, Router, TypedHeader,
};
use base64::Engine;
use muncon_entities::{queries::query_user_by_email, schema::user_access_key};
use rand::{thread_rng, Rng};
use sea_orm::{prelude::*, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::{
    forms::LoginForm,
    response::{handle_error, APIError},
    state::AppState,
    validate::ValidatedJson,
};

// Access keys are high-entropy, so a fixed salt is enough to make the
// stored hashes useless on their own.
const ACCESS_KEY_SALT: &str = "bXVuY29uc2FsdA";

#[derive(Debug)]
pub struct AuthenticatedUser {
    pub uuid: Uuid,
}

pub struct ExtractAuthenticatedUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for ExtractAuthenticatedUser {
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let basic_header =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state).await;

        if let Ok(basic_header) = basic_header {
            let decoded = basic_header.0;

            let user = query_user_by_email(&state.db, decoded.username())
                .await
                .map_err(handle_error)?;
            let user = user.ok_or((StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            verify_password(&user.password_hash, decoded.password())?;

            Ok(ExtractAuthenticatedUser(AuthenticatedUser {
                uuid: user.uuid,
            }))
        } else {
            let TypedHeader(bearer_header) =
                TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                    .await
                    .map_err(|_| (StatusCode::UNAUTHORIZED, "No valid authorization header found"))?;

            let key = base64::engine::general_purpose::STANDARD_NO_PAD
                .decode(bearer_header.0.token())
                .map_err(|_| APIError::from((StatusCode::UNAUTHORIZED, "Bearer token invalid")))?;
            let hashed_key = hash_access_key(&key)
                .map_err(|_| APIError::from((StatusCode::UNAUTHORIZED, "Bearer token invalid")))?;

            let key = user_access_key::Entity::find_by_id(hashed_key)
                .one(&state.db)
                .await
                .map_err(handle_error)?;
            let key = key.ok_or((StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

            Ok(ExtractAuthenticatedUser(AuthenticatedUser {
                uuid: key.user_id,
            }))
        }
    }
}

pub fn hash_password(pwd: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let pwd = Argon2::default().hash_password(pwd.as_bytes(), &salt)?;
    Ok(pwd.to_string())
}

fn verify_password(stored_hash: &str, password: &str) -> Result<(), APIError> {
    let password_hash = PasswordHash::new(stored_hash).map_err(|_| {
        APIError::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Stored password hash is invalid",
        ))
    })?;
    let algs: &[&dyn PasswordVerifier] = &[&Argon2::default()];

    password_hash
        .verify_password(algs, password)
        .map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect").into())
}

fn hash_access_key(key: &[u8]) -> Result<String, password_hash::Error> {
    let salt = SaltString::from_b64(ACCESS_KEY_SALT)?;
    let hashed_key = Argon2::default().hash_password(key, &salt)?;
    Ok(hashed_key.to_string())
}

pub fn create_key(
    key: &[u8],
    user_id: Uuid,
) -> Result<user_access_key::Model, password_hash::Error> {
    Ok(user_access_key::Model {
        key_hash: hash_access_key(key)?,
        user_id,
    })
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn issue_key(db: &DatabaseConnection, user_id: Uuid) -> Result<Json<LoginResponse>, APIError> {
    let key: [u8; 32] = thread_rng().gen::<[u8; 32]>();

    let token = create_key(&key, user_id).map_err(handle_error)?;
    token
        .into_active_model()
        .insert(db)
        .await
        .map_err(handle_error)?;

    Ok(Json(LoginResponse {
        token: base64::engine::general_purpose::STANDARD_NO_PAD.encode(key),
    }))
}

pub async fn login_handler(
    State(db): State<DatabaseConnection>,
    ValidatedJson(form): ValidatedJson<LoginForm>,
) -> Result<Json<LoginResponse>, APIError> {
    let user = query_user_by_email(&db, &form.email)
        .await
        .map_err(handle_error)?;
    let user = user.ok_or((StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

    verify_password(&user.password_hash, &form.password)?;

    issue_key(&db, user.uuid).await
}

pub async fn create_token_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<LoginResponse>, APIError> {
    issue_key(&db, user.uuid).await
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_handler))
        .route("/tokens", post(create_token_handler))
}
