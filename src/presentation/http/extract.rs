use super::errors::AppError;
use axum::extract::FromRequest;

/// `Json` body extractor whose rejection renders as the API's error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
