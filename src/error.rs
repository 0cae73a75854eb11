use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Activity not found: {0}")]
    ActivityNotFound(i64),

    #[error("Activity is not active")]
    ActivityInactive,

    #[error("Global draw quota exceeded (quota: {quota}, requested: {requested})")]
    GlobalQuotaExceeded { quota: i64, requested: i64 },

    #[error("Activity draw limit exceeded (limit: {limit}, requested: {requested})")]
    ActivityQuotaExceeded { limit: i64, requested: i64 },

    #[error("No prizes configured for activity: {0}")]
    EmptyPrizePool(i64),

    #[error("Total probability exceeds 100%: {total}")]
    ProbabilityOverflow { total: f64 },

    #[error("No fallback prize configured")]
    MissingFallbackPrize,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::UserNotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                self.to_string(),
            ),
            AppError::ActivityNotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "ACTIVITY_NOT_FOUND",
                self.to_string(),
            ),
            AppError::ActivityInactive => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "ACTIVITY_INACTIVE",
                self.to_string(),
            ),
            AppError::GlobalQuotaExceeded { .. } => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "GLOBAL_QUOTA_EXCEEDED",
                self.to_string(),
            ),
            AppError::ActivityQuotaExceeded { .. } => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "ACTIVITY_QUOTA_EXCEEDED",
                self.to_string(),
            ),
            AppError::EmptyPrizePool(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "EMPTY_PRIZE_POOL",
                self.to_string(),
            ),
            AppError::ProbabilityOverflow { .. } => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "PROBABILITY_OVERFLOW",
                self.to_string(),
            ),
            AppError::MissingFallbackPrize => {
                // 配置缺陷：概率校验本应保证兜底奖存在
                log::error!("Missing fallback prize at draw time");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "MISSING_FALLBACK_PRIZE",
                    self.to_string(),
                )
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
