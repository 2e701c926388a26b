use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderdeskUser::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderdeskUser::Id))
                    .col(string_len_uniq(OrderdeskUser::Username, 64))
                    .col(string_len(OrderdeskUser::PasswordHash, 256))
                    .col(string_len(OrderdeskUser::Avatar, 128).default("default_avatar.png"))
                    .col(timestamp(OrderdeskUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderdeskUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum OrderdeskUser {
    Table,
    Id,
    Username,
    PasswordHash,
    Avatar,
    CreatedAt,
}
