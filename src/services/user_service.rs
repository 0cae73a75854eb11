use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserResponse};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

/// 新用户默认全局抽奖配额
const DEFAULT_DRAW_QUOTA: i64 = 10;

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "User name must not be empty".to_string(),
            ));
        }
        let draw_quota = request.draw_quota.unwrap_or(DEFAULT_DRAW_QUOTA);
        if draw_quota < 0 {
            return Err(AppError::ValidationError(
                "Draw quota must be non-negative".to_string(),
            ));
        }

        let model = users::ActiveModel {
            name: Set(request.name),
            draw_quota: Set(draw_quota),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// 获取用户列表（可按名称模糊过滤）
    pub async fn list_users(&self, query: &UserListQuery) -> AppResult<Vec<UserResponse>> {
        let mut find = users::Entity::find().order_by_asc(users::Column::Id);
        if let Some(name) = query.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            find = find.filter(users::Column::Name.contains(name));
        }
        let list = find.all(&self.pool).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;
        Ok(model.into())
    }

    /// 更新用户（名称 / 配额，未提供的字段保持不变）
    pub async fn update_user(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        if request.name.is_none() && request.draw_quota.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(quota) = request.draw_quota
            && quota < 0
        {
            return Err(AppError::ValidationError(
                "Draw quota must be non-negative".to_string(),
            ));
        }

        let mut model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(quota) = request.draw_quota {
            model.draw_quota = Set(quota);
        }
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        Ok(updated.into())
    }
}
