use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // user_master: directory of people who can hold or approve guest accounts
        manager
            .create_table(
                Table::create()
                    .table(UserMaster::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserMaster::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserMaster::LastName).string().not_null())
                    .col(ColumnDef::new(UserMaster::FirstName).string().not_null())
                    .col(ColumnDef::new(UserMaster::Department).string().not_null())
                    .col(
                        ColumnDef::new(UserMaster::EmploymentStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserMaster::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(UserMaster::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(UserMaster::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // guest_accounts: the lifecycle records themselves
        manager
            .create_table(
                Table::create()
                    .table(GuestAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuestAccounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GuestAccounts::LastName).string().not_null())
                    .col(ColumnDef::new(GuestAccounts::FirstName).string().not_null())
                    .col(
                        ColumnDef::new(GuestAccounts::Department)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestAccounts::UsagePurpose)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestAccounts::ApproverId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestAccounts::ExpirationDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GuestAccounts::Status).string().not_null())
                    .col(
                        ColumnDef::new(GuestAccounts::RequestedExpirationDate)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GuestAccounts::LastUpdatedDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestAccounts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GuestAccounts::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(GuestAccounts::ArchivedAt)
                            .big_integer()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_guest_accounts_approver_id")
                    .table(GuestAccounts::Table)
                    .col(GuestAccounts::ApproverId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_guest_accounts_status")
                    .table(GuestAccounts::Table)
                    .col(GuestAccounts::Status)
                    .to_owned(),
            )
            .await?;

        // sequence_counters: one row per named counter, mutated only inside
        // the issuance transaction
        manager
            .create_table(
                Table::create()
                    .table(SequenceCounters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SequenceCounters::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SequenceCounters::Value)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SequenceCounters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GuestAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserMaster::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum UserMaster {
    Table,
    Id,
    LastName,
    FirstName,
    Department,
    EmploymentStatus,
    IsAdmin,
    PasswordHash,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GuestAccounts {
    Table,
    Id,
    LastName,
    FirstName,
    Department,
    UsagePurpose,
    ApproverId,
    ExpirationDate,
    Status,
    RequestedExpirationDate,
    LastUpdatedDate,
    CreatedAt,
    CreatedBy,
    ArchivedAt,
}

#[derive(DeriveIden)]
enum SequenceCounters {
    Table,
    Id,
    Value,
}
