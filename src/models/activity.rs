use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::activity_entity;

/// 创建活动请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateActivityRequest {
    /// 活动名称
    pub name: String,
    /// 活动开始时间（不填则不限制）
    pub start_time: Option<DateTime<Utc>>,
    /// 活动结束时间（不填则不限制）
    pub end_time: Option<DateTime<Utc>>,
    /// 每位用户最大抽奖次数（默认 1）
    pub max_draws_per_user: Option<i64>,
    /// 活动奖品 ID 列表
    #[serde(default)]
    pub prize_ids: Vec<i64>,
}

/// 活动信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i64,
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// 每位用户最大抽奖次数
    pub max_draws_per_user: i64,
    /// 当前是否处于有效时间窗口
    pub is_active: bool,
}

impl From<activity_entity::Model> for ActivityResponse {
    fn from(m: activity_entity::Model) -> Self {
        let is_active = m.is_active(Utc::now());
        ActivityResponse {
            id: m.id,
            name: m.name,
            start_time: m.start_time,
            end_time: m.end_time,
            max_draws_per_user: m.max_draws_per_user,
            is_active,
        }
    }
}

/// 活动配置校验结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidateActivityResponse {
    pub activity_id: i64,
    /// 概率之和是否为 1.0（容差内）
    pub is_valid: bool,
    /// 当前概率之和
    pub total_probability: f64,
    pub message: String,
}
