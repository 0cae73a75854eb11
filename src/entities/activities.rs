use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖活动实体
/// start_time / end_time 为 NULL 时表示该侧不限制
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// 每位用户在本活动内的抽奖次数上限
    pub max_draws_per_user: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 活动当前是否在有效时间窗口内
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        (self.start_time.is_none_or(|start| now >= start))
            && (self.end_time.is_none_or(|end| now <= end))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::prizes::Entity> for Entity {
    fn to() -> RelationDef {
        super::activity_prizes::Relation::Prize.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::activity_prizes::Relation::Activity.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn activity(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Model {
        Model {
            id: 1,
            name: "Test".to_string(),
            start_time: start,
            end_time: end,
            max_draws_per_user: 1,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_is_active_unbounded() {
        let now = Utc::now();
        assert!(activity(None, None).is_active(now));
    }

    #[test]
    fn test_is_active_before_start() {
        let now = Utc::now();
        let a = activity(Some(now + Duration::hours(1)), None);
        assert!(!a.is_active(now));
    }

    #[test]
    fn test_is_active_after_end() {
        let now = Utc::now();
        let a = activity(None, Some(now - Duration::hours(1)));
        assert!(!a.is_active(now));
    }

    #[test]
    fn test_is_active_inside_window() {
        let now = Utc::now();
        let a = activity(
            Some(now - Duration::hours(1)),
            Some(now + Duration::hours(1)),
        );
        assert!(a.is_active(now));
    }
}
