use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 创建奖品请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePrizeRequest {
    /// 奖品名称
    pub name: String,
    /// 总库存 (None = 无限)
    pub total_stock: Option<i64>,
    /// 中奖概率 (0.0 - 1.0)
    pub probability: f64,
}

/// 更新奖品请求（未提供的字段保持不变）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrizeRequest {
    /// 奖品名称
    pub name: Option<String>,
    /// 总库存；变更量会同步加到剩余库存上（补货）
    pub total_stock: Option<i64>,
    /// 剩余库存（显式指定时直接覆盖）
    pub available_stock: Option<i64>,
    /// 中奖概率 (0.0 - 1.0)
    pub probability: Option<f64>,
}

/// 奖品信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    /// 总库存 (None = 无限)
    pub total_stock: Option<i64>,
    /// 剩余库存 (None = 无限)
    pub available_stock: Option<i64>,
    /// 中奖概率 [0,1]
    pub probability: f64,
    /// 是否兜底奖
    pub is_fallback: bool,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            total_stock: m.total_stock,
            available_stock: m.available_stock,
            probability: m.probability,
            is_fallback: m.is_fallback,
        }
    }
}
