mod common;

use common::fixture;
use rust_decimal_macros::dec;
use storefront_client::application::checkout::{EMPTY_BASKET, NO_CUSTOMER};
use storefront_client::application::commands::{Action, Command};
use storefront_client::domain::basket::BasketLine;
use storefront_client::infrastructure::in_memory::{CallKind, GatewayCall};

#[tokio::test]
async fn test_checkout_without_customer_sends_nothing() {
    let mut fx = fixture(&[("Mug", dec!(10), 5)]).await;
    fx.run(Command::AddToBasket(fx.products[0].product_id)).await;

    fx.dispatch(Action::Checkout).await;

    assert!(fx.gateway.calls().await.is_empty());
    assert_eq!(fx.state.error.as_deref(), Some(NO_CUSTOMER));
    assert_eq!(fx.state.basket.total_items(), 1);
}

#[tokio::test]
async fn test_checkout_with_empty_basket_sends_nothing() {
    let mut fx = fixture(&[("Mug", dec!(10), 5)]).await;
    fx.run(Command::SelectCustomer(fx.customer.customer_id)).await;

    fx.dispatch(Action::Checkout).await;

    assert!(fx.gateway.calls().await.is_empty());
    assert_eq!(fx.state.error.as_deref(), Some(EMPTY_BASKET));
}

#[tokio::test]
async fn test_failed_second_line_stops_checkout() {
    let mut fx = fixture(&[
        ("Mug", dec!(10), 5),
        ("Tea", dec!(5), 5),
        ("Spoon", dec!(1), 5),
    ])
    .await;
    let customer_id = fx.customer.customer_id;
    let ids: Vec<_> = fx.products.iter().map(|p| p.product_id).collect();

    fx.run(Command::SelectCustomer(customer_id)).await;
    for id in &ids {
        fx.run(Command::AddToBasket(*id)).await;
    }
    fx.run(Command::Increase(ids[0])).await;
    let basket_before = fx.state.basket.clone();

    fx.gateway
        .fail_call(CallKind::AddToBasket, 2, 409, Some("Tea is out of stock"))
        .await;
    fx.dispatch(Action::Checkout).await;

    assert_eq!(
        fx.gateway.calls().await,
        vec![
            GatewayCall::AddToBasket(
                customer_id,
                BasketLine {
                    product_id: ids[0],
                    quantity: 2
                }
            ),
            GatewayCall::AddToBasket(
                customer_id,
                BasketLine {
                    product_id: ids[1],
                    quantity: 1
                }
            ),
        ]
    );
    assert_eq!(fx.state.basket, basket_before);
    assert_eq!(fx.state.error.as_deref(), Some("Tea is out of stock"));
    assert_eq!(fx.state.order, None);
}

#[tokio::test]
async fn test_stock_rejection_surfaces_server_message() {
    let mut fx = fixture(&[("Mug", dec!(10), 5), ("Kettle", dec!(40), 1)]).await;
    fx.run(Command::SelectCustomer(fx.customer.customer_id)).await;
    fx.run(Command::AddToBasket(fx.products[0].product_id)).await;
    fx.run(Command::AddToBasket(fx.products[1].product_id)).await;
    fx.run(Command::Increase(fx.products[1].product_id)).await;

    fx.dispatch(Action::Checkout).await;

    assert_eq!(
        fx.state.error.as_deref(),
        Some("Insufficient stock for Kettle")
    );
    assert_eq!(fx.state.basket.total().value(), dec!(90));
    assert!(
        !fx.gateway
            .calls()
            .await
            .iter()
            .any(|call| matches!(call, GatewayCall::Checkout(_)))
    );
}

#[tokio::test]
async fn test_successful_checkout() {
    let mut fx = fixture(&[("Mug", dec!(10), 5), ("Tea", dec!(5), 5)]).await;
    let customer_id = fx.customer.customer_id;
    let mug = fx.products[0].product_id;
    let tea = fx.products[1].product_id;

    fx.run(Command::SelectCustomer(customer_id)).await;
    fx.run(Command::AddToBasket(mug)).await;
    fx.run(Command::AddToBasket(tea)).await;
    fx.run(Command::AddToBasket(mug)).await;
    assert_eq!(fx.state.basket.total().value(), dec!(25));

    fx.dispatch(Action::Checkout).await;

    assert_eq!(fx.state.error, None);
    assert!(fx.state.basket.is_empty());

    let order = fx.state.order.clone().expect("order is shown");
    assert_eq!(order.customer_id, Some(customer_id));
    assert_eq!(order.total.unwrap().value(), dec!(25));
    assert_eq!(order.lines.len(), 2);

    let calls = fx.gateway.calls().await;
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[2], GatewayCall::Checkout(customer_id));
    assert_eq!(calls[3], GatewayCall::ListProducts);

    // The reloaded catalog reflects the stock taken by the order.
    let mug_listing = fx.state.product(mug).unwrap();
    assert_eq!(mug_listing.stock, 3);
}

#[tokio::test]
async fn test_commit_failure_keeps_basket() {
    let mut fx = fixture(&[("Mug", dec!(10), 5)]).await;
    fx.run(Command::SelectCustomer(fx.customer.customer_id)).await;
    fx.run(Command::AddToBasket(fx.products[0].product_id)).await;
    let basket_before = fx.state.basket.clone();

    fx.gateway
        .fail_call(CallKind::Checkout, 1, 500, Some("Payment service unavailable"))
        .await;
    fx.dispatch(Action::Checkout).await;

    assert_eq!(
        fx.state.error.as_deref(),
        Some("Payment service unavailable")
    );
    assert_eq!(fx.state.basket, basket_before);
    assert_eq!(fx.state.order, None);
}

#[tokio::test]
async fn test_next_checkout_discards_previous_order_and_error() {
    let mut fx = fixture(&[("Mug", dec!(10), 5)]).await;
    let mug = fx.products[0].product_id;
    fx.run(Command::SelectCustomer(fx.customer.customer_id)).await;
    fx.run(Command::AddToBasket(mug)).await;
    fx.dispatch(Action::Checkout).await;
    assert!(fx.state.order.is_some());

    // Empty basket now: the old order goes away and a validation error shows.
    fx.dispatch(Action::Checkout).await;
    assert_eq!(fx.state.order, None);
    assert_eq!(fx.state.error.as_deref(), Some(EMPTY_BASKET));

    fx.run(Command::AddToBasket(mug)).await;
    fx.dispatch(Action::Checkout).await;
    assert_eq!(fx.state.error, None);
    assert_eq!(fx.state.order.as_ref().and_then(|o| o.order_id), Some(2));
}
