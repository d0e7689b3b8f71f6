use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // system_action_log: one row per guest-account lifecycle transition
        manager
            .create_table(
                Table::create()
                    .table(SystemActionLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemActionLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemActionLog::LogType).string().not_null())
                    .col(
                        ColumnDef::new(SystemActionLog::OperatorId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemActionLog::OperatorName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemActionLog::TargetAccountId)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(SystemActionLog::Data).text().not_null())
                    .col(
                        ColumnDef::new(SystemActionLog::Timestamp)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_system_action_log_timestamp")
                    .table(SystemActionLog::Table)
                    .col(SystemActionLog::Timestamp)
                    .to_owned(),
            )
            .await?;

        // user_change_log: one row per user_master mutation with before/after
        manager
            .create_table(
                Table::create()
                    .table(UserChangeLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserChangeLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserChangeLog::Action).string().not_null())
                    .col(
                        ColumnDef::new(UserChangeLog::TargetUserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserChangeLog::OperatorId).string().not_null())
                    .col(
                        ColumnDef::new(UserChangeLog::OperatorName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserChangeLog::OldData).text().null())
                    .col(ColumnDef::new(UserChangeLog::NewData).text().null())
                    .col(ColumnDef::new(UserChangeLog::ChangedFields).text().null())
                    .col(ColumnDef::new(UserChangeLog::Description).string().null())
                    .col(ColumnDef::new(UserChangeLog::Timestamp).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_change_log_timestamp")
                    .table(UserChangeLog::Table)
                    .col(UserChangeLog::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserChangeLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemActionLog::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SystemActionLog {
    Table,
    Id,
    LogType,
    OperatorId,
    OperatorName,
    TargetAccountId,
    Data,
    Timestamp,
}

#[derive(DeriveIden)]
enum UserChangeLog {
    Table,
    Id,
    Action,
    TargetUserId,
    OperatorId,
    OperatorName,
    OldData,
    NewData,
    ChangedFields,
    Description,
    Timestamp,
}
