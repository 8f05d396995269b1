use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::UpdateRoleRequest;
use crate::domain::models::auth::UserProfile;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !admin.role.is_admin() {
        return Err(AppError::Forbidden("Admin role required".into()));
    }

    let users = state.user_repo.list().await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(|u| UserProfile {
        id: u.id,
        email: u.email,
        name: u.name,
        role: u.role,
    }).collect();

    Ok(Json(profiles))
}

pub async fn update_role(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !admin.role.is_admin() {
        return Err(AppError::Forbidden("Admin role required".into()));
    }

    let target = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let updated = state.user_repo.update_role(&target.id, payload.role).await?;
    info!("Role of user {} set to {:?}", updated.id, updated.role);

    Ok(Json(UserProfile {
        id: updated.id,
        email: updated.email,
        name: updated.name,
        role: updated.role,
    }))
}
