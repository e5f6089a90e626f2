//! End-to-end tests against a full [`StoreSystem`] with every actor real.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use storefront::clients::ActorClient;
use storefront::config::{SeedConfig, SeedUser};
use storefront::coupons::{Coupon, CouponKind, StaticCoupons};
use storefront::lifecycle::StoreSystem;
use storefront::model::{
    Address, AddressId, AddressType, NewAddress, Order, OrderCreate, OrderStatus, PaymentInfo,
    PaymentMethod, PaymentStatus, ProductCreate, ProductId, ProductUpdate, ShippingSelection,
    UserCreate, UserId,
};
use storefront::order_actor::OrderError;

fn system() -> StoreSystem {
    let coupons = StaticCoupons::new([Coupon {
        code: "SAVE10".into(),
        kind: CouponKind::Percentage,
        value: dec!(10),
    }]);
    StoreSystem::new(16, Arc::new(coupons))
}

async fn product(system: &StoreSystem, name: &str, price: Decimal) -> ProductId {
    system
        .product_client
        .create_product(ProductCreate {
            name: name.into(),
            description: String::new(),
            price,
            image: None,
        })
        .await
        .expect("Failed to create product")
}

async fn user(system: &StoreSystem, name: &str) -> UserId {
    system
        .user_client
        .create_user(UserCreate {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
        })
        .await
        .expect("Failed to create user")
}

fn address() -> Address {
    Address {
        street: "1 Main St".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip_code: "62701".into(),
        country: "US".into(),
    }
}

fn checkout(owner: UserId) -> OrderCreate {
    OrderCreate {
        owner,
        shipping: ShippingSelection::Inline(address()),
        payment: PaymentInfo {
            method: PaymentMethod::Upi,
            transaction_id: Some("alice@bank".into()),
            status: PaymentStatus::Pending,
        },
    }
}

async fn place(system: &StoreSystem, owner: UserId, product: ProductId, quantity: u32) -> Order {
    system
        .cart_client
        .add_item(owner, product, quantity)
        .await
        .expect("Failed to add item");
    system
        .order_client
        .place_order(checkout(owner))
        .await
        .expect("Failed to place order")
}

#[tokio::test]
async fn test_free_shipping_checkout_is_price_locked() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let lamp = product(&system, "Lamp", dec!(50)).await;

    system.cart_client.add_item(alice, lamp, 3).await.unwrap();
    let summary = system.cart_client.summary(alice).await.unwrap();
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.pricing.total, dec!(162.00));

    let order = system
        .order_client
        .place_order(checkout(alice))
        .await
        .unwrap();
    assert_eq!(order.subtotal, dec!(150));
    assert_eq!(order.shipping_cost, dec!(0));
    assert_eq!(order.tax, dec!(12.00));
    assert_eq!(order.total_amount, dec!(162.00));
    assert_eq!(order.payment_info.transaction_id.as_deref(), Some("alice@bank"));

    // Checkout empties the cart but keeps it.
    let cart = system.cart_client.get_cart(alice).await.unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.total_amount, Decimal::ZERO);
    assert!(system.cart_client.get(alice).await.unwrap().is_some());

    system
        .product_client
        .update_product(
            lamp,
            ProductUpdate {
                price: Some(dec!(80)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let stored = system.order_client.get_order(alice, order.id).await.unwrap();
    assert_eq!(stored.items[0].price, dec!(50));
    assert_eq!(stored.total_amount, dec!(162.00));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_flat_shipping_checkout() {
    let system = system();
    let bob = user(&system, "Bob").await;
    let mug = product(&system, "Mug", dec!(20)).await;

    let order = place(&system, bob, mug, 2).await;

    assert_eq!(order.subtotal, dec!(40));
    assert_eq!(order.shipping_cost, dec!(10));
    assert_eq!(order.tax, dec!(3.20));
    assert_eq!(order.total_amount, dec!(53.20));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_keeps_first_unit_price_and_total() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let mug = product(&system, "Mug", dec!(10)).await;
    let pen = product(&system, "Pen", dec!(2.5)).await;

    system.cart_client.add_item(alice, mug, 1).await.unwrap();
    system
        .product_client
        .update_product(
            mug,
            ProductUpdate {
                price: Some(dec!(12)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    system.cart_client.add_item(alice, mug, 2).await.unwrap();
    let cart = system.cart_client.add_item(alice, pen, 2).await.unwrap();

    let line = cart.items.iter().find(|i| i.product_ref == mug).unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(line.unit_price, dec!(10));
    assert_eq!(cart.total_amount, dec!(35));

    let cart = system.cart_client.set_quantity(alice, pen, 4).await.unwrap();
    assert_eq!(cart.total_amount, dec!(40));

    // Reads do not change anything.
    let first = system.cart_client.get_cart(alice).await.unwrap();
    let second = system.cart_client.get_cart(alice).await.unwrap();
    assert_eq!(first, second);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_removing_last_item_deletes_cart() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let mug = product(&system, "Mug", dec!(10)).await;
    let pen = product(&system, "Pen", dec!(1)).await;

    system.cart_client.add_item(alice, mug, 1).await.unwrap();
    system.cart_client.add_item(alice, pen, 1).await.unwrap();

    let remaining = system.cart_client.remove_item(alice, mug).await.unwrap();
    assert_eq!(remaining.map(|c| c.total_amount), Some(dec!(1)));
    assert_eq!(system.cart_client.remove_item(alice, pen).await.unwrap(), None);

    assert!(system.cart_client.get(alice).await.unwrap().is_none());
    let cart = system.cart_client.get_cart(alice).await.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_amount, Decimal::ZERO);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product_never_creates_cart() {
    let system = system();
    let alice = user(&system, "Alice").await;

    let err = system
        .cart_client
        .add_item(alice, ProductId(99), 1)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Product not found: product_99");
    assert!(system.cart_client.get(alice).await.unwrap().is_none());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_percentage_coupon_is_not_carried_to_order() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let lamp = product(&system, "Lamp", dec!(50)).await;

    system.cart_client.add_item(alice, lamp, 3).await.unwrap();
    let cart = system
        .cart_client
        .apply_coupon(alice, " save10 ".into())
        .await
        .unwrap();
    let coupon = cart.applied_coupon.clone().unwrap();
    assert_eq!(coupon.code, "SAVE10");
    assert_eq!(coupon.discount_amount, dec!(15));
    assert_eq!(cart.total_amount, dec!(135));

    let summary = system.cart_client.summary(alice).await.unwrap();
    assert_eq!(summary.coupon_code.as_deref(), Some("SAVE10"));
    assert_eq!(summary.pricing.discount, dec!(15));
    assert_eq!(summary.pricing.total, dec!(147.00));

    let unknown = system
        .cart_client
        .apply_coupon(alice, "NOPE".into())
        .await
        .unwrap();
    assert_eq!(unknown.revision, cart.revision);

    let order = system
        .order_client
        .place_order(checkout(alice))
        .await
        .unwrap();
    assert_eq!(order.discount, Decimal::ZERO);
    assert_eq!(order.total_amount, dec!(162.00));
    let cart = system.cart_client.get_cart(alice).await.unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.applied_coupon.as_ref().map(|c| c.code.as_str()), Some("SAVE10"));
    assert_eq!(cart.total_amount, Decimal::ZERO);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_percentage_discount_follows_quantity() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let chair = product(&system, "Chair", dec!(100)).await;

    system.cart_client.add_item(alice, chair, 1).await.unwrap();
    let cart = system
        .cart_client
        .apply_coupon(alice, "SAVE10".into())
        .await
        .unwrap();
    assert_eq!(cart.total_amount, dec!(90));

    let cart = system.cart_client.set_quantity(alice, chair, 3).await.unwrap();
    assert_eq!(cart.applied_coupon.as_ref().unwrap().discount_amount, dec!(30));
    assert_eq!(cart.total_amount, dec!(270));

    let summary = system.cart_client.summary(alice).await.unwrap();
    assert_eq!(summary.pricing.subtotal, dec!(300));
    assert_eq!(summary.pricing.discount, dec!(30));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_checkouts_produce_one_order() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let mug = product(&system, "Mug", dec!(20)).await;
    system.cart_client.add_item(alice, mug, 1).await.unwrap();

    let (first, second) = tokio::join!(
        system.order_client.place_order(checkout(alice)),
        system.order_client.place_order(checkout(alice)),
    );

    let (placed, failed): (Vec<_>, Vec<_>) = [first, second].into_iter().partition(Result::is_ok);
    assert_eq!(placed.len(), 1);
    assert!(matches!(
        failed[0],
        Err(OrderError::EmptyCart) | Err(OrderError::CartChanged)
    ));
    assert_eq!(system.order_client.list_orders(alice).await.unwrap().len(), 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_checkout_fails() {
    let system = system();
    let alice = user(&system, "Alice").await;

    let err = system
        .order_client
        .place_order(checkout(alice))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::EmptyCart);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancellation_guard() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let bob = user(&system, "Bob").await;
    let mug = product(&system, "Mug", dec!(20)).await;
    let order = place(&system, alice, mug, 1).await;

    assert_eq!(
        system
            .order_client
            .cancel_order(bob, order.id, None)
            .await
            .unwrap_err(),
        OrderError::Forbidden("cancel")
    );
    assert_eq!(
        system.order_client.get_order(bob, order.id).await.unwrap_err(),
        OrderError::Forbidden("view")
    );

    let cancelled = system
        .order_client
        .cancel_order(alice, order.id, Some("  ".into()))
        .await
        .unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("No reason provided"));
    assert_eq!(cancelled.status_updates.len(), 2);
    assert_eq!(cancelled.total_amount, order.total_amount);

    let err = system
        .order_client
        .cancel_order(alice, order.id, Some("again".into()))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Order cannot be cancelled as it is already cancelled"
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_records_given_reason() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let mug = product(&system, "Mug", dec!(20)).await;
    let order = place(&system, alice, mug, 1).await;

    let cancelled = system
        .order_client
        .cancel_order(alice, order.id, Some("changed my mind".into()))
        .await
        .unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("changed my mind"));
    let last = cancelled.status_updates.last().unwrap();
    assert_eq!(last.status, OrderStatus::Cancelled);
    assert_eq!(last.note, "changed my mind");
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_processing_order_can_be_delivered_directly() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let mug = product(&system, "Mug", dec!(20)).await;
    let order = place(&system, alice, mug, 1).await;
    assert_eq!(order.order_status, OrderStatus::Processing);

    let delivered = system
        .order_client
        .advance_status(order.id, OrderStatus::Delivered, None)
        .await
        .unwrap();
    assert_eq!(delivered.order_status, OrderStatus::Delivered);
    assert_eq!(delivered.status_updates.len(), 2);

    let err = system
        .order_client
        .advance_status(order.id, OrderStatus::Shipped, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Shipped,
        }
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_fulfillment_and_stats() {
    let system = system();
    let alice = user(&system, "Alice").await;
    let mug = product(&system, "Mug", dec!(20)).await;

    let empty = system.order_client.order_stats(alice).await.unwrap();
    assert_eq!(empty.total_orders, 0);
    assert_eq!(empty.total_amount, Decimal::ZERO);
    assert!(empty.orders_by_status.is_empty());

    let first = place(&system, alice, mug, 2).await;
    let second = place(&system, alice, mug, 1).await;

    for status in [OrderStatus::Confirmed, OrderStatus::Shipped] {
        system
            .order_client
            .advance_status(first.id, status, None)
            .await
            .unwrap();
    }
    let err = system
        .order_client
        .advance_status(first.id, OrderStatus::Cancelled, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
    let delivered = system
        .order_client
        .advance_status(first.id, OrderStatus::Delivered, Some("Left at door".into()))
        .await
        .unwrap();
    assert_eq!(delivered.status_updates.last().unwrap().note, "Left at door");
    assert_eq!(
        system
            .order_client
            .cancel_order(alice, first.id, None)
            .await
            .unwrap_err(),
        OrderError::NotCancellable(OrderStatus::Delivered)
    );

    let listed = system.order_client.list_orders(alice).await.unwrap();
    assert_eq!(
        listed.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    let stats = system.order_client.order_stats(alice).await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_amount, first.total_amount + second.total_amount);
    assert_eq!(stats.orders_by_status[&OrderStatus::Delivered], 1);
    assert_eq!(stats.orders_by_status[&OrderStatus::Processing], 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_seeded_user_checks_out_to_saved_address() {
    let system = system();
    let seed = SeedConfig {
        products: vec![ProductCreate {
            name: "Notebook".into(),
            description: "A5".into(),
            price: dec!(6.75),
            image: None,
        }],
        users: vec![SeedUser {
            name: "Alice".into(),
            email: "Alice@Example.com".into(),
            addresses: vec![NewAddress {
                kind: AddressType::Home,
                address: address(),
                is_default: false,
            }],
        }],
    };
    let seeded = system.seed(&seed).await.unwrap();
    let (alice, notebook) = (seeded.users[0], seeded.products[0]);

    let user = system.user_client.get(alice).await.unwrap().unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert!(user.addresses[0].is_default);

    system.cart_client.add_item(alice, notebook, 4).await.unwrap();
    let mut request = checkout(alice);
    request.shipping = ShippingSelection::Saved(AddressId(1));
    let order = system.order_client.place_order(request).await.unwrap();

    assert_eq!(order.shipping_address, address());
    assert_eq!(order.subtotal, dec!(27.00));
    assert_eq!(order.tax, dec!(2.16));
    assert_eq!(order.total_amount, dec!(39.16));
    system.shutdown().await.unwrap();
}
