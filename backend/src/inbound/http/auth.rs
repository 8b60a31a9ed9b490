//! Account API handlers.
//!
//! ```text
//! POST /api/auth/register {"fullName":"Ann Lee","email":"ann@test.com","userName":"ann","password":"pw"}
//! POST /api/auth/login {"email":"admin@test.com","password":"admin123"}
//! ```
//!
//! The session token returned by login is not checked by any endpoint.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, CredentialsValidationError, Error, LoginCredentials, Registration, SessionToken,
    UserProfile,
};
use crate::inbound::http::state::HttpState;

/// Registration request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(example = "Ann Lee")]
    pub full_name: String,
    #[schema(example = "ann@test.com")]
    pub email: String,
    #[schema(example = "ann")]
    pub user_name: String,
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialsValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.full_name,
            &value.email,
            &value.user_name,
            &value.password,
        )
    }
}

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[schema(example = "admin@test.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Body of a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: UserProfile,
}

/// Body of a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub token: SessionToken,
    pub user: UserProfile,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_detail(err.field())
}

/// Create an employee account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input or user already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let user = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_owned(),
        user,
    }))
}

/// Exchange email and password for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    // Malformed input cannot match a stored account; report it like any miss.
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|_| Error::invalid_credentials())?;
    let outcome = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_owned(),
        token: outcome.token,
        user: outcome.user,
    }))
}
