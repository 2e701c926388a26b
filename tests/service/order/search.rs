use chrono::{Duration, Utc};
use orderdesk::{model::order::OrderSearchParams, server::service::order::OrderService};
use orderdesk_test_utils::prelude::*;

fn params(
    page: Option<u64>,
    supplier_query: Option<&str>,
    customer_query: Option<&str>,
) -> OrderSearchParams {
    OrderSearchParams {
        page,
        supplier_query: supplier_query.map(str::to_string),
        customer_query: customer_query.map(str::to_string),
    }
}

/// Expect supplier and customer filters to combine and hide the supplier column
#[tokio::test]
async fn filters_by_supplier_and_customer_terms() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskOrder)?;
    test.order().insert_mock_order("Li Lei", "ACME Corp").await?;
    test.order().insert_mock_order("Wang Fang", "acme").await?;
    test.order().insert_mock_order("Zhang San", "ACME").await?;
    test.order().insert_mock_order("Li Si", "Globex").await?;

    let page = OrderService::new(&test.db)
        .search(&params(None, Some(" ACME "), Some("Li, Wang")), 10)
        .await
        .unwrap();

    let mut customers: Vec<&str> = page
        .orders
        .iter()
        .map(|order| order.customer_name.as_str())
        .collect();
    customers.sort();
    assert_eq!(customers, vec!["Li Lei", "Wang Fang"]);
    assert_eq!(page.total, 2);
    assert!(page.hide_supplier_column);
    assert_eq!(page.searched_supplier_name.as_deref(), Some("ACME"));

    Ok(())
}

/// Expect a customer-only search to keep the supplier column visible
#[tokio::test]
async fn customer_search_keeps_supplier_column() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskOrder)?;
    test.order().insert_mock_order("Li Lei", "ACME").await?;
    test.order().insert_mock_order("Wang Fang", "Globex").await?;

    let page = OrderService::new(&test.db)
        .search(&params(None, None, Some("li")), 10)
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.orders[0].customer_name, "Li Lei");
    assert!(!page.hide_supplier_column);
    assert!(page.searched_supplier_name.is_none());

    Ok(())
}

/// Expect LIKE wildcards in a query to match only literally
#[tokio::test]
async fn treats_wildcards_literally() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskOrder)?;
    test.order().insert_mock_order("Li Lei", "50% Off").await?;
    test.order().insert_mock_order("Wang Fang", "500 Club").await?;

    let page = OrderService::new(&test.db)
        .search(&params(None, Some("50%"), None), 10)
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.orders[0].supplier_name, "50% Off");

    Ok(())
}

/// Expect the last partial page to report its record window
#[tokio::test]
async fn paginates_last_partial_page() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .with_mock_orders(23)
        .build()
        .await?;

    let page = OrderService::new(&test.db)
        .search(&params(Some(3), None, None), 10)
        .await
        .unwrap();

    assert_eq!(page.orders.len(), 3);
    assert_eq!(page.total, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.start_record, 21);
    assert_eq!(page.end_record, 23);
    assert_eq!(page.display_info, "Showing records 21 to 23 of 23");

    Ok(())
}

/// Expect the newest upload to be listed first
#[tokio::test]
async fn orders_newest_upload_first() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskOrder)?;
    let now = Utc::now().naive_utc();
    test.order()
        .insert_order(MockOrder::new("Older", "ACME").uploaded_at(now - Duration::hours(2)))
        .await?;
    test.order()
        .insert_order(MockOrder::new("Newer", "ACME").uploaded_at(now))
        .await?;

    let page = OrderService::new(&test.db)
        .search(&params(None, None, None), 10)
        .await
        .unwrap();

    assert_eq!(page.orders[0].customer_name, "Newer");
    assert_eq!(page.orders[1].customer_name, "Older");

    Ok(())
}

/// Expect page zero to be treated as the first page
#[tokio::test]
async fn clamps_page_zero() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .with_mock_orders(5)
        .build()
        .await?;

    let page = OrderService::new(&test.db)
        .search(&params(Some(0), None, None), 10)
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.orders.len(), 5);

    Ok(())
}

/// Expect the largest possible page number to return an empty page without failing
#[tokio::test]
async fn handles_maximum_page_number() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .with_mock_orders(1)
        .build()
        .await?;

    let page = OrderService::new(&test.db)
        .search(&params(Some(u64::MAX), None, None), 10)
        .await
        .unwrap();

    assert!(page.orders.is_empty());
    assert_eq!(page.total, 1);
    assert_eq!(page.page, u64::MAX);
    assert_eq!(page.end_record, 1);

    Ok(())
}
