use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::user_entity;

/// 创建用户请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// 用户名称
    pub name: String,
    /// 全局抽奖配额（默认 10）
    pub draw_quota: Option<i64>,
}

/// 更新用户请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    /// 用户名称
    pub name: Option<String>,
    /// 全局抽奖配额
    pub draw_quota: Option<i64>,
}

/// 用户列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserListQuery {
    /// 按名称模糊过滤
    pub name: Option<String>,
}

/// 用户信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    /// 全局抽奖配额
    pub draw_quota: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<user_entity::Model> for UserResponse {
    fn from(m: user_entity::Model) -> Self {
        UserResponse {
            id: m.id,
            name: m.name,
            draw_quota: m.draw_quota,
            created_at: m.created_at,
        }
    }
}
