//! Order fixture utilities.
//!
//! Fixture orders use sequential identifiers (`NMCF0001`, `CX0000001`, ...) which satisfy the
//! production identifier formats while staying predictable in assertions.

pub mod factory;

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::OrderModel, TestContext};

/// Description of an order to insert, with sensible defaults for every field.
#[derive(Clone, Debug)]
pub struct MockOrder {
    pub customer_name: String,
    pub supplier_name: String,
    pub amount: f64,
    pub phone: String,
    pub issue_time: Option<NaiveDateTime>,
    pub upload_timestamp: Option<NaiveDateTime>,
}

impl MockOrder {
    pub fn new(customer_name: impl Into<String>, supplier_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            supplier_name: supplier_name.into(),
            amount: 100.0,
            phone: "13800138000".to_string(),
            issue_time: None,
            upload_timestamp: None,
        }
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn uploaded_at(mut self, upload_timestamp: NaiveDateTime) -> Self {
        self.upload_timestamp = Some(upload_timestamp);
        self
    }
}

impl TestContext {
    pub fn order<'a>(&'a mut self) -> OrderFixtures<'a> {
        OrderFixtures { setup: self }
    }
}

pub struct OrderFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> OrderFixtures<'a> {
    /// Insert an order described by `order`.
    ///
    /// Each insert receives the next fixture sequence number, which drives both identifiers and
    /// (unless overridden) an upload timestamp one second later than the previous fixture so
    /// listing order is deterministic.
    pub async fn insert_order(&mut self, order: MockOrder) -> Result<OrderModel, TestError> {
        self.setup.order_seq += 1;
        let seq = self.setup.order_seq;

        let now = Utc::now().naive_utc();
        let upload_timestamp = order
            .upload_timestamp
            .unwrap_or_else(|| now + Duration::seconds(seq as i64));

        Ok(
            entity::prelude::OrderdeskOrder::insert(entity::orderdesk_order::ActiveModel {
                order_id: ActiveValue::Set(format!("NMCF{:04}", seq)),
                supplier_name: ActiveValue::Set(order.supplier_name),
                customer_name: ActiveValue::Set(order.customer_name),
                amount: ActiveValue::Set(order.amount),
                issue_time: ActiveValue::Set(order.issue_time.unwrap_or(now)),
                phone: ActiveValue::Set(order.phone),
                coupon_code: ActiveValue::Set(format!("CX{:07}", seq)),
                validity_months: ActiveValue::Set(12),
                status: ActiveValue::Set("active".to_string()),
                upload_timestamp: ActiveValue::Set(upload_timestamp),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an order for `customer_name` supplied by `supplier_name`.
    pub async fn insert_mock_order(
        &mut self,
        customer_name: &str,
        supplier_name: &str,
    ) -> Result<OrderModel, TestError> {
        self.insert_order(MockOrder::new(customer_name, supplier_name))
            .await
    }

    /// Insert `count` orders for generic customers, returned in insertion order.
    pub async fn insert_mock_orders(&mut self, count: usize) -> Result<Vec<OrderModel>, TestError> {
        let mut orders = Vec::with_capacity(count);

        for n in 0..count {
            let order = self
                .insert_mock_order(&format!("Customer {}", n + 1), "Mock Supplier")
                .await?;
            orders.push(order);
        }

        Ok(orders)
    }
}
