use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/activities",
    tag = "admin",
    request_body = CreateActivityRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建活动成功", body = ActivityResponse),
        (status = 400, description = "概率超过 100% 或其它配置错误"),
        (status = 401, description = "未授权")
    )
)]
/// 创建抽奖活动；关联奖品概率不足 100% 时自动创建兜底奖补齐
pub async fn create_activity(
    service: web::Data<AdminService>,
    request: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse> {
    match service.create_activity(request.into_inner()).await {
        Ok(activity) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": activity }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/activities",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取活动列表成功", body = [ActivityResponse]),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_activities(service: web::Data<AdminService>) -> Result<HttpResponse> {
    match service.list_activities().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/activities/{activity_id}/prizes",
    tag = "admin",
    params(
        ("activity_id" = i64, Path, description = "活动 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取活动奖品列表成功", body = [PrizeResponse]),
        (status = 401, description = "未授权"),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn list_prizes(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_prizes(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/activities/{activity_id}/validate",
    tag = "admin",
    params(
        ("activity_id" = i64, Path, description = "活动 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "校验结果", body = ValidateActivityResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "活动不存在")
    )
)]
/// 检查活动奖品概率之和是否为 100%
pub async fn validate_activity(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.validate_activity_config(path.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/prizes",
    tag = "admin",
    request_body = CreatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建奖品成功", body = PrizeResponse),
        (status = 400, description = "参数错误"),
        (status = 401, description = "未授权")
    )
)]
pub async fn create_prize(
    service: web::Data<AdminService>,
    request: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/prizes/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "奖品 ID")
    ),
    request_body = UpdatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新奖品成功", body = PrizeResponse),
        (status = 400, description = "概率超过 100% 或其它配置错误"),
        (status = 401, description = "未授权"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 更新奖品（库存、概率等）；普通奖品概率变化会自动平衡各活动的兜底奖
pub async fn update_prize(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .update_prize(path.into_inner(), request.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/prizes/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "奖品 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除奖品成功"),
        (status = 401, description = "未授权"),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn delete_prize(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_prize(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/draw-records",
    tag = "admin",
    params(
        ("activity_id" = Option<i64>, Query, description = "活动 ID"),
        ("user_id" = Option<i64>, Query, description = "用户 ID"),
        ("user_name" = Option<String>, Query, description = "用户名（模糊查询）"),
        ("is_win" = Option<bool>, Query, description = "是否中奖"),
        ("start_time" = Option<String>, Query, description = "开始时间 (RFC 3339)"),
        ("end_time" = Option<String>, Query, description = "结束时间 (RFC 3339)"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取抽奖记录成功", body = PaginatedResponse<DrawRecordResponse>),
        (status = 401, description = "未授权")
    )
)]
/// 按条件分页查询抽奖记录（倒序）
pub async fn list_draw_records(
    service: web::Data<AdminService>,
    query: web::Query<DrawRecordQuery>,
) -> Result<HttpResponse> {
    match service.list_draw_records(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/activities", web::post().to(create_activity))
            .route("/activities", web::get().to(list_activities))
            .route("/activities/{activity_id}/prizes", web::get().to(list_prizes))
            .route(
                "/activities/{activity_id}/validate",
                web::get().to(validate_activity),
            )
            .route("/prizes", web::post().to(create_prize))
            .route("/prizes/{id}", web::put().to(update_prize))
            .route("/prizes/{id}", web::delete().to(delete_prize))
            .route("/draw-records", web::get().to(list_draw_records)),
    );
}
