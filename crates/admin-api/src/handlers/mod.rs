//! HTTP handlers

pub mod health;
pub mod auth;
pub mod navigation;
pub mod dashboard;
pub mod menus;
pub mod roles;
pub mod users;
pub mod packages;
pub mod workflows;
pub mod user_flows;
pub mod public;

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::response::ApiResponse;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub(crate) fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}
