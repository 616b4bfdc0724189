use actix_web::HttpResponse;
use tracing::instrument;

/******************************************/
// Health check route
/******************************************/
/**
 * @route   GET /health_check
 * @access  Public
 */
#[instrument(name = "Health check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
