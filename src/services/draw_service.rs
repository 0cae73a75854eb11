use crate::entities::{
    activity_entity as activities, draw_record_entity as records, prize_entity as prizes,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::DrawOutcome;
use crate::services::DrawStrategy;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, UpdateResult,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    strategy: Arc<dyn DrawStrategy>,
}

/// 整批一次判定；consumed 读取不加锁，同一用户并发多批时
/// 可能在读取与落库之间短暂超额，上限为在途批次之和，按近似处理
fn exceeds_quota(consumed: i64, limit: i64, requested: i64) -> bool {
    consumed + requested > limit
}

impl DrawService {
    pub fn new(pool: DatabaseConnection, strategy: Arc<dyn DrawStrategy>) -> Self {
        Self { pool, strategy }
    }

    /// 抽奖（批量）
    ///
    /// 逻辑:
    /// 1. 校验用户存在与全局配额（整批一次判定，不足则整批拒绝）
    /// 2. 校验活动时间窗口与活动内配额
    /// 3. 一次性读取活动奖品快照（id 升序，整批共用）
    /// 4. 逐次: 按概率选奖 -> 限量奖品原子扣减库存，竞争失败回落兜底奖
    /// 5. 每次写一条抽奖记录并生成结果
    ///
    /// 已落库的记录与已扣减的库存不回滚；中途失败只中止剩余次数。
    pub async fn draw(
        &self,
        user_id: i64,
        activity_id: i64,
        count: Option<i64>,
    ) -> AppResult<Vec<DrawOutcome>> {
        let draw_count = count.filter(|c| *c >= 1).unwrap_or(1);

        // 用户与全局配额
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;

        let total_draws = records::Entity::find()
            .filter(records::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;
        if exceeds_quota(total_draws, user.draw_quota, draw_count) {
            return Err(AppError::GlobalQuotaExceeded {
                quota: user.draw_quota,
                requested: draw_count,
            });
        }

        // 活动时间窗口
        let activity = activities::Entity::find_by_id(activity_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::ActivityNotFound(activity_id))?;
        if !activity.is_active(Utc::now()) {
            return Err(AppError::ActivityInactive);
        }

        // 活动内配额
        let activity_draws = records::Entity::find()
            .filter(records::Column::UserId.eq(user_id))
            .filter(records::Column::ActivityId.eq(activity_id))
            .count(&self.pool)
            .await? as i64;
        if exceeds_quota(activity_draws, activity.max_draws_per_user, draw_count) {
            return Err(AppError::ActivityQuotaExceeded {
                limit: activity.max_draws_per_user,
                requested: draw_count,
            });
        }

        // 奖品快照：整批共用一份游离数据，库存在内存中同步递减供后续
        // 几次使用；真正的扣减只通过单行条件更新进行，绝不整体回写
        let mut prize_list = activity
            .find_related(prizes::Entity)
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        if prize_list.is_empty() {
            return Err(AppError::EmptyPrizePool(activity_id));
        }

        let mut outcomes = Vec::with_capacity(draw_count as usize);

        for _ in 0..draw_count {
            let mut selected = self
                .strategy
                .select(&prize_list)
                .ok_or(AppError::MissingFallbackPrize)?;

            if !selected.is_fallback {
                if self.reserve_stock(selected.id).await? {
                    // 扣减成功：同步内存快照
                    if let Some(entry) = prize_list.iter_mut().find(|p| p.id == selected.id) {
                        if let Some(remaining) = entry.available_stock {
                            entry.available_stock = Some(remaining - 1);
                        }
                        selected = entry.clone();
                    }
                } else {
                    // 竞争失败（并发把库存抢完）：回落兜底奖，不重试
                    log::info!(
                        "Failed to secure stock for prize {}, falling back",
                        selected.id
                    );
                    selected = prize_list
                        .iter()
                        .find(|p| p.is_fallback)
                        .cloned()
                        .ok_or(AppError::MissingFallbackPrize)?;
                }
            }

            let is_win = !selected.is_fallback;

            // 写抽奖记录（审计台账，只追加）
            records::ActiveModel {
                user_id: Set(user_id),
                activity_id: Set(activity_id),
                prize_id: Set(selected.id),
                prize_name: Set(selected.name.clone()),
                is_win: Set(is_win),
                ..Default::default()
            }
            .insert(&self.pool)
            .await?;

            outcomes.push(DrawOutcome {
                is_win,
                prize_id: selected.id,
                prize_name: selected.name.clone(),
                message: if is_win { "恭喜中奖！" } else { "再接再厉！" }.to_string(),
            });
        }

        Ok(outcomes)
    }

    /// 原子条件扣减：仅当剩余库存 > 0 时减一 (update where available_stock > 0)，
    /// 受影响行数即扣减成败。这是并发下防止超卖的唯一同步手段。
    /// 兜底奖（无限库存）不走此路径。
    async fn reserve_stock(&self, prize_id: i64) -> AppResult<bool> {
        let result: UpdateResult = prizes::Entity::update_many()
            .col_expr(
                prizes::Column::AvailableStock,
                Expr::col(prizes::Column::AvailableStock).sub(1),
            )
            .filter(prizes::Column::Id.eq(prize_id))
            .filter(
                Condition::all()
                    .add(prizes::Column::AvailableStock.is_not_null())
                    .add(prizes::Column::AvailableStock.gt(0)),
            )
            .exec(&self.pool)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::exceeds_quota;

    #[test]
    fn test_quota_allows_exact_fit() {
        assert!(!exceeds_quota(7, 10, 3));
    }

    #[test]
    fn test_quota_rejects_overflow() {
        assert!(exceeds_quota(8, 10, 3));
    }

    #[test]
    fn test_quota_rejects_exhausted() {
        assert!(exceeds_quota(10, 10, 1));
    }

    #[test]
    fn test_quota_batch_all_or_nothing() {
        // 剩 2 次时请求 5 次必须整批拒绝，而不是放行 2 次
        assert!(exceeds_quota(8, 10, 5));
    }
}
