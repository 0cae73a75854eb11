use sea_orm_migration::prelude::*;

/// Users (抽奖用户)
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    DrawQuota,
    CreatedAt,
    UpdatedAt,
}

/// Prizes (奖品配置表)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    TotalStock,
    AvailableStock,
    Probability,
    IsFallback,
    CreatedAt,
    UpdatedAt,
}

/// Activities (抽奖活动)
#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    Name,
    StartTime,
    EndTime,
    MaxDrawsPerUser,
    CreatedAt,
    UpdatedAt,
}

/// Activity <-> Prize 多对多关联表
#[derive(DeriveIden)]
enum ActivityPrizes {
    Table,
    ActivityId,
    PrizeId,
}

/// Draw Records (抽奖记录, 只追加)
#[derive(DeriveIden)]
enum DrawRecords {
    Table,
    Id,
    UserId,
    ActivityId,
    PrizeId,
    PrizeName,
    IsWin,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 库存列允许 NULL，NULL 表示无限库存（兜底奖"谢谢参与"即如此配置）
/// probability 为 [0,1] 小数，活动内所有奖品概率之和必须为 1.0
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::DrawQuota)
                            .big_integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Prizes::TotalStock)
                            .big_integer()
                            .null(), // NULL = 无限库存
                    )
                    .col(
                        ColumnDef::new(Prizes::AvailableStock)
                            .big_integer()
                            .null(), // 与 TotalStock 对应, NULL 表示不参与扣减
                    )
                    .col(ColumnDef::new(Prizes::Probability).double().not_null())
                    .col(
                        ColumnDef::new(Prizes::IsFallback)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动表
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Activities::StartTime)
                            .timestamp_with_time_zone()
                            .null(), // NULL = 不限制开始时间
                    )
                    .col(
                        ColumnDef::new(Activities::EndTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Activities::MaxDrawsPerUser)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Activities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动-奖品关联表（一个奖品可挂在多个活动下）
        manager
            .create_table(
                Table::create()
                    .table(ActivityPrizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityPrizes::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityPrizes::PrizeId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ActivityPrizes::ActivityId)
                            .col(ActivityPrizes::PrizeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_prizes_activity")
                            .from(ActivityPrizes::Table, ActivityPrizes::ActivityId)
                            .to(Activities::Table, Activities::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_prizes_prize")
                            .from(ActivityPrizes::Table, ActivityPrizes::PrizeId)
                            .to(Prizes::Table, Prizes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 抽奖记录表
        manager
            .create_table(
                Table::create()
                    .table(DrawRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DrawRecords::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRecords::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRecords::PrizeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRecords::PrizeName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DrawRecords::IsWin).boolean().not_null())
                    .col(
                        ColumnDef::new(DrawRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 配额统计查询索引（全局 / 按活动）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_records_user")
                    .table(DrawRecords::Table)
                    .col(DrawRecords::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_records_user_activity")
                    .table(DrawRecords::Table)
                    .col(DrawRecords::UserId)
                    .col(DrawRecords::ActivityId)
                    .to_owned(),
            )
            .await?;

        // 外键（不加 ON DELETE CASCADE，历史记录必须保留）
        manager
            .alter_table(
                Table::alter()
                    .table(DrawRecords::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_draw_records_user")
                            .from_tbl(DrawRecords::Table)
                            .from_col(DrawRecords::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：记录 -> 关联 -> 活动 -> 奖品 -> 用户
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DrawRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(ActivityPrizes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Activities::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
