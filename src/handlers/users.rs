use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use model::entities::user::{Role, User};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, UpdateSummary};

/// Request body for issuing a token on sign-in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Request body for registering a user on first sign-in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// User response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

/// Stored role for an email, if the email is known
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub role: Option<String>,
}

/// Request body for demoting a member
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberRequest {
    pub email: String,
}

/// Issue a signed token for a signed-in user
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "users",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<TokenResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let token = state.tokens.issue(&request.email, request.name)?;
    debug!("token issued");
    Ok(Json(ApiResponse {
        data: TokenResponse { token },
        message: "Token issued successfully".to_string(),
        success: true,
    }))
}

/// Register a user on first sign-in; idempotent for known emails
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 200, description = "User already registered", body = ApiResponse<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    if let Some(existing) = state.stores.users.find_by_email(&request.email).await? {
        debug!("sign-in for known user");
        return Ok((
            StatusCode::OK,
            Json(ApiResponse {
                data: existing.into(),
                message: "User already registered".to_string(),
                success: true,
            }),
        ));
    }

    let user = User {
        id: Some(ObjectId::new()),
        name: request.name,
        email: request.email,
        role: Role::User,
    };
    state.stores.users.insert(&user).await?;
    info!(email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: user.into(),
            message: "User created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Look up the stored role for an email
#[utoipa::path(
    get,
    path = "/users/role/{email}",
    tag = "users",
    params(("email" = String, Path, description = "User email")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Role retrieved", body = ApiResponse<RoleResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, _claims))]
pub async fn get_user_role(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<RoleResponse>>, AppError> {
    let role = state
        .stores
        .users
        .find_by_email(&email)
        .await?
        .map(|user| user.role.as_str().to_string());
    Ok(Json(ApiResponse {
        data: RoleResponse { role },
        message: "Role retrieved successfully".to_string(),
        success: true,
    }))
}

/// List all members (admin only)
#[utoipa::path(
    get,
    path = "/members",
    tag = "users",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Members retrieved", body = ApiResponse<Vec<UserResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims))]
pub async fn list_members(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let members = state.stores.users.list_by_role(Role::Member).await?;
    Ok(Json(ApiResponse {
        data: members.into_iter().map(UserResponse::from).collect(),
        message: "Members retrieved successfully".to_string(),
        success: true,
    }))
}

/// Demote a member back to a plain user (admin only)
#[utoipa::path(
    patch,
    path = "/remove-members",
    tag = "users",
    request_body = RemoveMemberRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Member demoted", body = ApiResponse<UpdateSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(email = %request.email))]
pub async fn remove_member(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<RemoveMemberRequest>,
) -> Result<Json<ApiResponse<UpdateSummary>>, AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let modified = state
        .stores
        .users
        .set_role(&request.email, Role::User)
        .await?;
    info!(email = %request.email, modified, "member demoted");
    Ok(Json(ApiResponse {
        data: UpdateSummary { modified },
        message: "Member removed successfully".to_string(),
        success: true,
    }))
}
