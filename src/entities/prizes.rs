use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖品配置实体
/// 概念说明:
/// - probability: 中奖概率, [0,1] 小数, 活动内所有奖品概率之和为 1.0
/// - total_stock: 奖品总库存 (NULL 表示无限)
/// - available_stock: 剩余库存 (NULL 表示无限, 不参与扣减)
/// - is_fallback: 是否为兜底奖（"谢谢参与"），概率缺口由它自动吸收
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 奖品名称
    pub name: String,
    /// 库存上限 (NULL=无限)
    pub total_stock: Option<i64>,
    /// 剩余库存 (NULL=无限)
    pub available_stock: Option<i64>,
    /// 中奖概率 [0,1]
    pub probability: f64,
    /// 是否兜底奖
    pub is_fallback: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 是否还有库存 (无限库存或剩余 > 0)
    pub fn is_available(&self) -> bool {
        match self.available_stock {
            None => true,
            Some(remain) => remain > 0,
        }
    }

    /// 是否是限量奖品
    pub fn is_limited(&self) -> bool {
        self.total_stock.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        super::activity_prizes::Relation::Activity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::activity_prizes::Relation::Prize.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
