use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{model::order::OrderStatus, server::model::db::OrderModel};

/// Validity assigned to every newly ingested order.
pub const DEFAULT_VALIDITY_MONTHS: i32 = 12;

/// Fields of an order that come from an uploaded row plus its generated identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub order_id: String,
    pub coupon_code: String,
    pub supplier_name: String,
    pub customer_name: String,
    pub amount: f64,
    pub issue_time: NaiveDateTime,
    pub phone: String,
}

/// Editable order fields, already validated and trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderChanges {
    pub supplier_name: String,
    pub customer_name: String,
    pub amount: f64,
    pub phone: String,
}

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    /// Creates a new instance of [`OrderRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Whether any persisted order already uses `order_id`
    pub async fn order_id_exists(&self, order_id: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::OrderdeskOrder::find()
            .filter(entity::orderdesk_order::Column::OrderId.eq(order_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether any persisted order already uses `coupon_code`
    pub async fn coupon_code_exists(&self, coupon_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::OrderdeskOrder::find()
            .filter(entity::orderdesk_order::Column::CouponCode.eq(coupon_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a new active order stamped with the current time as its upload timestamp
    pub async fn insert(&self, order: NewOrder) -> Result<OrderModel, DbErr> {
        let order = entity::orderdesk_order::ActiveModel {
            order_id: ActiveValue::Set(order.order_id),
            supplier_name: ActiveValue::Set(order.supplier_name),
            customer_name: ActiveValue::Set(order.customer_name),
            amount: ActiveValue::Set(order.amount),
            issue_time: ActiveValue::Set(order.issue_time),
            phone: ActiveValue::Set(order.phone),
            coupon_code: ActiveValue::Set(order.coupon_code),
            validity_months: ActiveValue::Set(DEFAULT_VALIDITY_MONTHS),
            status: ActiveValue::Set(OrderStatus::Active.as_str().to_string()),
            upload_timestamp: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        order.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<OrderModel>, DbErr> {
        entity::prelude::OrderdeskOrder::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Fetches one page of orders matching `condition`, newest upload first
    ///
    /// `page` is 1-based. Returns the page's orders alongside the total number of orders
    /// matching `condition`; a page past the end yields an empty list with the same total.
    pub async fn get_page(
        &self,
        condition: Condition,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<OrderModel>, u64), DbErr> {
        let paginator = entity::prelude::OrderdeskOrder::find()
            .filter(condition)
            .order_by_desc(entity::orderdesk_order::Column::UploadTimestamp)
            .order_by_desc(entity::orderdesk_order::Column::Id)
            .paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;

        // Offsets past the last page are never queried, so huge page numbers cannot overflow
        let page_index = page.saturating_sub(1);
        if page_index >= total.div_ceil(per_page.max(1)) {
            return Ok((Vec::new(), total));
        }

        let orders = paginator.fetch_page(page_index).await?;

        Ok((orders, total))
    }

    /// Applies `changes` to an existing order
    ///
    /// Returns `Ok(None)` if no order with `id` exists.
    pub async fn update(
        &self,
        id: i32,
        changes: OrderChanges,
    ) -> Result<Option<OrderModel>, DbErr> {
        let order = match entity::prelude::OrderdeskOrder::find_by_id(id)
            .one(self.db)
            .await?
        {
            Some(order) => order,
            None => return Ok(None),
        };

        let mut order_am = order.into_active_model();
        order_am.supplier_name = ActiveValue::Set(changes.supplier_name);
        order_am.customer_name = ActiveValue::Set(changes.customer_name);
        order_am.amount = ActiveValue::Set(changes.amount);
        order_am.phone = ActiveValue::Set(changes.phone);

        let order = order_am.update(self.db).await?;

        Ok(Some(order))
    }

    /// Deletes every order whose ID is in `ids` in a single statement
    ///
    /// IDs that match no order are ignored, check [`DeleteResult::rows_affected`] for the
    /// number actually deleted.
    pub async fn delete_many(&self, ids: &[i32]) -> Result<DeleteResult, DbErr> {
        entity::prelude::OrderdeskOrder::delete_many()
            .filter(entity::orderdesk_order::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await
    }
}
