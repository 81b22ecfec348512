use axum::extract::FromRequest;

use crate::common::error::AppError;

// Igual ao `Json` do axum, mas a rejeição vira um AppError (400 com o nosso corpo padrão).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
