use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orderdesk_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_id: String,
    pub supplier_name: String,
    pub customer_name: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub issue_time: DateTime,
    pub phone: String,
    #[sea_orm(unique)]
    pub coupon_code: String,
    pub validity_months: i32,
    pub status: String,
    pub upload_timestamp: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
