use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/draw",
    tag = "draw",
    request_body = DrawRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "抽奖成功", body = [DrawOutcome]),
        (status = 400, description = "配额不足、活动未启用等业务错误"),
        (status = 401, description = "未授权"),
        (status = 404, description = "用户或活动不存在")
    )
)]
/// 执行抽奖（批量）:
/// 1. 整批校验全局与活动内配额
/// 2. 逐次按概率选奖，限量奖品原子扣减库存
/// 3. 库存竞争失败回落兜底奖
/// 4. 每次生成一条抽奖记录，按顺序返回全部结果
pub async fn draw(
    service: web::Data<DrawService>,
    request: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match service
        .draw(request.user_id, request.activity_id, request.count)
        .await
    {
        Ok(outcomes) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": outcomes }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/draw").route("", web::post().to(draw)));
}
