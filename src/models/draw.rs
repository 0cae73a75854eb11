use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_record_entity;

use super::PaginatedResponse;

/// 抽奖请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawRequest {
    /// 用户 ID
    pub user_id: i64,
    /// 活动 ID
    pub activity_id: i64,
    /// 抽奖次数（默认 1，非正数按 1 处理）
    pub count: Option<i64>,
}

/// 单次抽奖结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawOutcome {
    /// 是否中奖（抽中兜底奖为 false）
    pub is_win: bool,
    /// 奖品 ID
    pub prize_id: i64,
    /// 奖品名称
    pub prize_name: String,
    pub message: String,
}

/// 抽奖记录查询参数（管理端）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawRecordQuery {
    /// 活动 ID
    pub activity_id: Option<i64>,
    /// 用户 ID
    pub user_id: Option<i64>,
    /// 用户名（模糊查询）
    pub user_name: Option<String>,
    /// 是否中奖
    pub is_win: Option<bool>,
    /// 开始时间
    pub start_time: Option<DateTime<Utc>>,
    /// 结束时间
    pub end_time: Option<DateTime<Utc>>,
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

/// 抽奖记录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawRecordResponse {
    pub id: i64,
    pub user_id: i64,
    pub activity_id: i64,
    pub prize_id: i64,
    /// 奖品名称 (历史快照)
    pub prize_name: String,
    pub is_win: bool,
    pub created_at: DateTime<Utc>,
}

impl From<draw_record_entity::Model> for DrawRecordResponse {
    fn from(m: draw_record_entity::Model) -> Self {
        DrawRecordResponse {
            id: m.id,
            user_id: m.user_id,
            activity_id: m.activity_id,
            prize_id: m.prize_id,
            prize_name: m.prize_name,
            is_win: m.is_win,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 抽奖记录分页响应
pub type DrawRecordPageResponse = PaginatedResponse<DrawRecordResponse>;
