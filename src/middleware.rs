use crate::errors::custom::{AuthError, CustomError};
use crate::startup::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage};
use actix_web_lab::middleware::Next;

/// Token from the `token` header, or from `Authorization: Bearer <token>`.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(token) = req.headers().get("token").and_then(|v| v.to_str().ok()) {
        return Some(token.to_string());
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/******************************************/
// JWT guard for every protected route
/******************************************/
pub async fn jwt_auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let token = extract_token(&req).ok_or_else(|| {
        CustomError::AuthenticationError(AuthError::MissingToken(
            "No Authorization header provided".to_string(),
        ))
    })?;

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        CustomError::AuthenticationError(AuthError::OtherAuthenticationError(
            "Token service unavailable".to_string(),
        ))
    })?;
    let claims = state
        .tokens
        .validate_token(&token)
        .map_err(CustomError::AuthenticationError)?;

    tracing::debug!(uid = %claims.uid, "request authenticated");
    req.extensions_mut().insert(claims);
    next.call(req).await
}
