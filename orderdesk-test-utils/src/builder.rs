//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, fixtures::order::MockOrder, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// fixtures. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_order_tables: bool,
    include_user_tables: bool,

    users: Vec<(String, String)>,
    orders: Vec<MockOrder>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_order_tables: false,
            include_user_tables: false,
            users: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Add the order table to the test database.
    pub fn with_order_tables(mut self) -> Self {
        self.include_order_tables = true;
        self
    }

    /// Add the operator account table to the test database.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert an operator account with the given credentials during `build()`.
    ///
    /// Requires `with_user_tables`.
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.push((username.into(), password.into()));
        self
    }

    /// Insert an order for the given customer and supplier during `build()`.
    ///
    /// Requires `with_order_tables`.
    pub fn with_mock_order(
        mut self,
        customer_name: impl Into<String>,
        supplier_name: impl Into<String>,
    ) -> Self {
        self.orders
            .push(MockOrder::new(customer_name, supplier_name));
        self
    }

    /// Insert `count` orders for generic customers during `build()`.
    pub fn with_mock_orders(mut self, count: usize) -> Self {
        for n in 0..count {
            self.orders.push(MockOrder::new(
                format!("Customer {}", n + 1),
                "Mock Supplier",
            ));
        }
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (user tables, order tables, then custom tables)
    /// 2. Inserts users, then orders, in the order they were queued
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut all_tables = Vec::new();

        if self.include_user_tables {
            all_tables.push(schema.create_table_from_entity(entity::prelude::OrderdeskUser));
        }

        if self.include_order_tables {
            all_tables.push(schema.create_table_from_entity(entity::prelude::OrderdeskOrder));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for (username, password) in self.users {
            setup.user().insert_user(&username, &password).await?;
        }

        for order in self.orders {
            setup.order().insert_order(order).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
