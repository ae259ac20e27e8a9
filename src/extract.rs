use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections render as `ApiError` instead of plain text
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
