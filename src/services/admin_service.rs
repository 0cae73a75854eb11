use crate::entities::{
    activity_entity as activities, activity_prize_entity as activity_prizes,
    draw_record_entity as records, prize_entity as prizes, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityResponse, CreateActivityRequest, CreatePrizeRequest, DrawRecordPageResponse,
    DrawRecordQuery, DrawRecordResponse, PaginatedResponse, PaginationParams, PrizeResponse,
    UpdatePrizeRequest, ValidateActivityResponse,
};
use crate::services::probability::{self, PoolBalance};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    JoinType, ModelTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};

/// 兜底奖名称（概率缺口自动由它吸收，无限库存）
const FALLBACK_PRIZE_NAME: &str = "谢谢参与";

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建活动
    ///
    /// 1. 开始/结束时间同时给出时至少间隔 10 分钟
    /// 2. 关联奖品必须全部存在且仍有库存
    /// 3. 概率校验：超过 1.0 整体拒绝；不足 1.0 自动创建兜底奖吸收缺口
    /// 4. 建立活动-奖品关联
    /// 全程单事务，失败不留任何部分写入。
    pub async fn create_activity(
        &self,
        request: CreateActivityRequest,
    ) -> AppResult<ActivityResponse> {
        if let (Some(start), Some(end)) = (request.start_time, request.end_time)
            && end - start < Duration::minutes(10)
        {
            return Err(AppError::ValidationError(
                "Activity start and end time must be at least 10 minutes apart".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let mut prize_list = Vec::new();
        if !request.prize_ids.is_empty() {
            prize_list = prizes::Entity::find()
                .filter(prizes::Column::Id.is_in(request.prize_ids.clone()))
                .order_by_asc(prizes::Column::Id)
                .all(&txn)
                .await?;

            let distinct: std::collections::HashSet<i64> =
                request.prize_ids.iter().copied().collect();
            if prize_list.len() != distinct.len() {
                return Err(AppError::ValidationError(
                    "Some prizes were not found or duplicate ids were provided".to_string(),
                ));
            }

            for p in &prize_list {
                if !p.is_available() {
                    return Err(AppError::ValidationError(format!(
                        "Prize '{}' (ID: {}) is out of stock",
                        p.name, p.id
                    )));
                }
            }
        }

        // 概率校验与兜底奖补齐
        let total = probability::sum_probabilities(
            prize_list
                .iter()
                .filter(|p| !p.is_fallback)
                .map(|p| p.probability),
        );
        match probability::check_sum(total) {
            PoolBalance::Overflow(total) => {
                return Err(AppError::ProbabilityOverflow { total });
            }
            PoolBalance::Shortfall(residual) => {
                if let Some(idx) = prize_list.iter().position(|p| p.is_fallback) {
                    // 已关联兜底奖：把缺口写到它身上
                    let mut am = prize_list[idx].clone().into_active_model();
                    am.probability = Set(residual);
                    am.updated_at = Set(Some(Utc::now()));
                    prize_list[idx] = am.update(&txn).await?;
                } else {
                    // 自动创建兜底奖（无限库存）
                    let fallback = prizes::ActiveModel {
                        name: Set(FALLBACK_PRIZE_NAME.to_string()),
                        total_stock: Set(None),
                        available_stock: Set(None),
                        probability: Set(residual),
                        is_fallback: Set(true),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    prize_list.push(fallback);
                }
            }
            PoolBalance::Balanced => {
                // 刚好 1.0：已关联的兜底奖概率校正为剩余值（可能为 0）
                if let Some(idx) = prize_list.iter().position(|p| p.is_fallback) {
                    let mut am = prize_list[idx].clone().into_active_model();
                    am.probability = Set(probability::fallback_residual(total));
                    am.updated_at = Set(Some(Utc::now()));
                    prize_list[idx] = am.update(&txn).await?;
                }
            }
        }

        let activity = activities::ActiveModel {
            name: Set(request.name),
            start_time: Set(request.start_time),
            end_time: Set(request.end_time),
            max_draws_per_user: Set(request.max_draws_per_user.unwrap_or(1)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for p in &prize_list {
            activity_prizes::ActiveModel {
                activity_id: Set(activity.id),
                prize_id: Set(p.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(activity.into())
    }

    pub async fn list_activities(&self) -> AppResult<Vec<ActivityResponse>> {
        let list = activities::Entity::find()
            .order_by_asc(activities::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 创建奖品（剩余库存初始化为总库存）
    pub async fn create_prize(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        if !(0.0..=1.0).contains(&request.probability) {
            return Err(AppError::ValidationError(
                "Probability must be between 0.0 and 1.0".to_string(),
            ));
        }
        if let Some(total) = request.total_stock
            && total < 0
        {
            return Err(AppError::ValidationError(
                "Total stock must be non-negative".to_string(),
            ));
        }

        let model = prizes::ActiveModel {
            name: Set(request.name),
            total_stock: Set(request.total_stock),
            available_stock: Set(request.total_stock),
            probability: Set(request.probability),
            is_fallback: Set(false),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 更新奖品
    ///
    /// 概率变化时对每个关联活动独立校验:
    /// - 普通奖品：其余普通奖品 + 新值超过 1.0 则整体拒绝（事务回滚，
    ///   不留部分写入），否则该活动的兜底奖概率改为剩余值
    /// - 兜底奖本身：按调用方给的值校验后原样接受，不做自动平衡
    /// 总库存的变更量会同步补到剩余库存（补货）；显式给出剩余库存则直接覆盖。
    pub async fn update_prize(
        &self,
        prize_id: i64,
        request: UpdatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        let txn = self.pool.begin().await?;

        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize not found: {prize_id}")))?;

        if let Some(new_probability) = request.probability {
            if !(0.0..=1.0).contains(&new_probability) {
                return Err(AppError::ValidationError(
                    "Probability must be between 0.0 and 1.0".to_string(),
                ));
            }

            // 一个奖品可挂在多个活动下，逐个活动用各自的其余成员校验
            let linked = prize.find_related(activities::Entity).all(&txn).await?;
            for activity in &linked {
                let members = activity.find_related(prizes::Entity).all(&txn).await?;
                let others = members
                    .iter()
                    .filter(|p| p.id != prize_id && !p.is_fallback)
                    .map(|p| p.probability);
                let total =
                    probability::sum_probabilities(others.chain(std::iter::once(new_probability)));

                if total > 1.0 + probability::PROBABILITY_EPSILON {
                    return Err(AppError::ProbabilityOverflow { total });
                }

                if !prize.is_fallback
                    && let Some(fallback) = members.iter().find(|p| p.is_fallback)
                {
                    let mut am = fallback.clone().into_active_model();
                    am.probability = Set(probability::fallback_residual(total));
                    am.updated_at = Set(Some(Utc::now()));
                    am.update(&txn).await?;
                }
            }
        }

        let mut am = prize.clone().into_active_model();
        if let Some(name) = request.name {
            am.name = Set(name);
        }
        if let Some(new_probability) = request.probability {
            am.probability = Set(new_probability);
        }
        if let Some(new_total) = request.total_stock {
            let diff = new_total - prize.total_stock.unwrap_or(0);
            am.total_stock = Set(Some(new_total));
            if diff != 0 {
                am.available_stock = Set(Some(prize.available_stock.unwrap_or(0) + diff));
            }
        }
        if let Some(available) = request.available_stock {
            am.available_stock = Set(Some(available));
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        Ok(updated.into())
    }

    /// 删除奖品（先解除活动关联；历史记录保留名称快照，不受影响）
    pub async fn delete_prize(&self, prize_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        activity_prizes::Entity::delete_many()
            .filter(activity_prizes::Column::PrizeId.eq(prize_id))
            .exec(&txn)
            .await?;

        let result = prizes::Entity::delete_by_id(prize_id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Prize not found: {prize_id}")));
        }

        txn.commit().await?;
        Ok(())
    }

    /// 获取活动的奖品列表（配置顺序 = id 升序）
    pub async fn list_prizes(&self, activity_id: i64) -> AppResult<Vec<PrizeResponse>> {
        let activity = activities::Entity::find_by_id(activity_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::ActivityNotFound(activity_id))?;

        let list = activity
            .find_related(prizes::Entity)
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 校验活动概率配置是否完整（含兜底奖之和为 1.0）
    pub async fn validate_activity_config(
        &self,
        activity_id: i64,
    ) -> AppResult<ValidateActivityResponse> {
        let activity = activities::Entity::find_by_id(activity_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::ActivityNotFound(activity_id))?;

        let members = activity.find_related(prizes::Entity).all(&self.pool).await?;
        let total = probability::sum_probabilities(members.iter().map(|p| p.probability));
        let is_valid = probability::is_balanced(total);

        if !is_valid {
            log::warn!("Activity {activity_id} configuration invalid: total probability is {total}");
        }

        Ok(ValidateActivityResponse {
            activity_id,
            is_valid,
            total_probability: total,
            message: if is_valid {
                "Configuration is valid".to_string()
            } else {
                "Total probability must be 1.0 (100%)".to_string()
            },
        })
    }

    /// 抽奖记录查询（分页 + 条件过滤，倒序）
    pub async fn list_draw_records(
        &self,
        query: &DrawRecordQuery,
    ) -> AppResult<DrawRecordPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut condition = Condition::all();
        if let Some(activity_id) = query.activity_id {
            condition = condition.add(records::Column::ActivityId.eq(activity_id));
        }
        if let Some(user_id) = query.user_id {
            condition = condition.add(records::Column::UserId.eq(user_id));
        }
        if let Some(is_win) = query.is_win {
            condition = condition.add(records::Column::IsWin.eq(is_win));
        }
        if let Some(start) = query.start_time {
            condition = condition.add(records::Column::CreatedAt.gte(start));
        }
        if let Some(end) = query.end_time {
            condition = condition.add(records::Column::CreatedAt.lte(end));
        }

        let mut base_query = records::Entity::find().filter(condition);
        if let Some(user_name) = query.user_name.as_deref().filter(|s| !s.is_empty()) {
            // 按用户名模糊查询需要关联用户表
            base_query = base_query
                .join(JoinType::InnerJoin, records::Relation::User.def())
                .filter(users::Column::Name.contains(user_name));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(records::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<DrawRecordResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_per_page(),
            total,
        ))
    }
}
