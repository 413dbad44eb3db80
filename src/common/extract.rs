// src/common/extract.rs

use axum::extract::{FromRequest, FromRequestParts, Json, Query};

use crate::common::error::AppError;

/// `Json` whose rejection is an `AppError`, so malformed bodies keep the `{ "error": ... }` shape.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Query` with the same error shape as [`ApiJson`].
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
