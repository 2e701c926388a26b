use sea_orm_migration::{prelude::*, schema::*};

static IDX_ORDERDESK_ORDER_UPLOAD_TIMESTAMP: &str = "idx_orderdesk_order_upload_timestamp";
static IDX_ORDERDESK_ORDER_CUSTOMER_NAME: &str = "idx_orderdesk_order_customer_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderdeskOrder::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderdeskOrder::Id))
                    // NMCF + 4 characters, sized with headroom for future formats
                    .col(string_len_uniq(OrderdeskOrder::OrderId, 10))
                    .col(string_len(OrderdeskOrder::SupplierName, 128).default(""))
                    .col(string_len(OrderdeskOrder::CustomerName, 64))
                    .col(double(OrderdeskOrder::Amount))
                    .col(timestamp(OrderdeskOrder::IssueTime))
                    .col(string_len(OrderdeskOrder::Phone, 20))
                    .col(string_len_uniq(OrderdeskOrder::CouponCode, 15))
                    .col(integer(OrderdeskOrder::ValidityMonths).default(12))
                    .col(string_len(OrderdeskOrder::Status, 20))
                    .col(timestamp(OrderdeskOrder::UploadTimestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORDERDESK_ORDER_UPLOAD_TIMESTAMP)
                    .table(OrderdeskOrder::Table)
                    .col(OrderdeskOrder::UploadTimestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORDERDESK_ORDER_CUSTOMER_NAME)
                    .table(OrderdeskOrder::Table)
                    .col(OrderdeskOrder::CustomerName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ORDERDESK_ORDER_CUSTOMER_NAME)
                    .table(OrderdeskOrder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ORDERDESK_ORDER_UPLOAD_TIMESTAMP)
                    .table(OrderdeskOrder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OrderdeskOrder::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum OrderdeskOrder {
    Table,
    Id,
    OrderId,
    SupplierName,
    CustomerName,
    Amount,
    IssueTime,
    Phone,
    CouponCode,
    ValidityMonths,
    Status,
    UploadTimestamp,
}
