use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::draw::draw,
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::update_user,
        handlers::admin::create_activity,
        handlers::admin::list_activities,
        handlers::admin::list_prizes,
        handlers::admin::validate_activity,
        handlers::admin::create_prize,
        handlers::admin::update_prize,
        handlers::admin::delete_prize,
        handlers::admin::list_draw_records,
    ),
    components(
        schemas(
            DrawRequest,
            DrawOutcome,
            DrawRecordQuery,
            DrawRecordResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserListQuery,
            UserResponse,
            CreateActivityRequest,
            ActivityResponse,
            ValidateActivityResponse,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            PrizeResponse,
            ApiError,
            PaginationParams,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "draw", description = "Draw API"),
        (name = "user", description = "User management API"),
        (name = "admin", description = "Activity and prize administration API"),
    ),
    info(
        title = "Lucky Draw Backend API",
        version = "1.0.0",
        description = "Lucky draw backend REST API documentation",
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
