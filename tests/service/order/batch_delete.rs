use orderdesk::server::{
    error::{order::OrderError, Error},
    service::order::OrderService,
};
use orderdesk_test_utils::prelude::*;
use sea_orm::EntityTrait;

/// Expect IDs that match no order to be ignored in the deleted count
#[tokio::test]
async fn ignores_missing_ids() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskOrder)?;
    let orders = test.order().insert_mock_orders(5).await?;
    let target = orders[4].id;

    let result = OrderService::new(&test.db)
        .batch_delete(&[target.to_string(), "999".to_string()])
        .await
        .unwrap();

    assert_eq!(result.requested_count, 2);
    assert_eq!(result.deleted_count, 1);
    assert_eq!(result.message, "Successfully deleted 1 of 2 selected records.");

    let deleted = entity::prelude::OrderdeskOrder::find_by_id(target)
        .one(&test.db)
        .await?;
    assert!(deleted.is_none());

    Ok(())
}

/// Expect an invalid ID to abort the whole deletion
#[tokio::test]
async fn rejects_invalid_id_without_deleting() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskOrder)?;
    let orders = test.order().insert_mock_orders(2).await?;

    let result = OrderService::new(&test.db)
        .batch_delete(&[orders[0].id.to_string(), "x1".to_string()])
        .await;

    assert!(matches!(
        result,
        Err(Error::OrderError(OrderError::InvalidIdFormat(_)))
    ));

    let remaining = entity::prelude::OrderdeskOrder::find().all(&test.db).await?;
    assert_eq!(remaining.len(), 2);

    Ok(())
}
