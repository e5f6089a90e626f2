//! Real Order actor with mocked Cart, Product and User collaborators.
//!
//! These tests drive checkout (`Order::on_create`) in isolation: each collaborator only
//! answers the requests scripted for it, and `verify()` proves no other request (in
//! particular, no cart clear) was sent.

use actor_framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
use actor_framework::FrameworkError;
use rust_decimal_macros::dec;
use storefront::cart_actor::{CartAction, CartActionResult, CartError};
use storefront::clients::{ActorClient, CartClient, OrderClient, ProductClient, UserClient};
use storefront::model::{
    Address, AddressId, AddressType, Cart, CartItem, OrderCreate, OrderStatus, PaymentInfo,
    PaymentMethod, PaymentStatus, Product, ProductId, SavedAddress, ShippingSelection, User,
    UserId,
};
use storefront::order_actor::{OrderContext, OrderError};
use tokio::task::JoinHandle;

const ALICE: UserId = UserId(1);

struct Harness {
    carts: MockClient<Cart>,
    products: MockClient<Product>,
    users: MockClient<User>,
}

impl Harness {
    fn new() -> Self {
        Self {
            carts: MockClient::new(),
            products: MockClient::new(),
            users: MockClient::new(),
        }
    }

    fn start(&self) -> (OrderClient, JoinHandle<()>) {
        let (actor, client) = storefront::order_actor::new(16);
        let handle = tokio::spawn(actor.run(OrderContext {
            carts: CartClient::new(self.carts.client()),
            products: ProductClient::new(self.products.client()),
            users: UserClient::new(self.users.client()),
        }));
        (client, handle)
    }

    fn verify(&self) {
        self.carts.verify();
        self.products.verify();
        self.users.verify();
    }
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

fn cod() -> PaymentInfo {
    PaymentInfo {
        method: PaymentMethod::Cod,
        transaction_id: None,
        status: PaymentStatus::Pending,
    }
}

/// Two units of product 1 at 20.00, at revision 3.
fn cart() -> Cart {
    let mut cart = Cart::empty(ALICE);
    cart.items.push(CartItem {
        product_ref: ProductId(1),
        quantity: 2,
        unit_price: dec!(20),
    });
    cart.total_amount = dec!(40);
    cart.revision = 3;
    cart
}

fn checkout(shipping: ShippingSelection) -> OrderCreate {
    OrderCreate {
        owner: ALICE,
        shipping,
        payment: cod(),
    }
}

#[tokio::test]
async fn test_checkout_snapshots_cart_prices() {
    let mut h = Harness::new();
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    // Catalog price moved since the item was added; the cart price wins.
    let mut mug = Product::new(ProductId(1), "Mug", dec!(99));
    mug.image = Some("/img/mug.png".into());
    h.products.expect_get(ProductId(1)).return_ok(Some(mug));
    h.carts
        .expect_action(ALICE)
        .return_ok(CartActionResult::Updated(Cart::empty(ALICE)));
    let (orders, handle) = h.start();

    let order = orders
        .place_order(checkout(ShippingSelection::Inline(address())))
        .await
        .unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name, "Mug");
    assert_eq!(order.items[0].image.as_deref(), Some("/img/mug.png"));
    assert_eq!(order.items[0].price, dec!(20));
    assert_eq!(order.subtotal, dec!(40));
    assert_eq!(order.shipping_cost, dec!(10));
    assert_eq!(order.tax, dec!(3.20));
    assert_eq!(order.discount, dec!(0));
    assert_eq!(order.total_amount, dec!(53.20));
    assert_eq!(order.order_status, OrderStatus::Processing);
    assert_eq!(order.status_updates.len(), 1);
    assert_eq!(order.status_updates[0].note, "Order received");
    h.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_is_rejected_before_anything_else() {
    let mut h = Harness::new();
    h.carts.expect_get(ALICE).return_ok(Some(Cart::empty(ALICE)));
    h.carts.expect_get(ALICE).return_ok(None);
    let (orders, _handle) = h.start();

    for _ in 0..2 {
        let err = orders
            .place_order(checkout(ShippingSelection::Inline(address())))
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty");
    }
    assert!(orders.list_orders(ALICE).await.unwrap().is_empty());
    h.verify();
}

#[tokio::test]
async fn test_changed_cart_creates_no_order() {
    let mut h = Harness::new();
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    h.products
        .expect_get(ProductId(1))
        .return_ok(Some(Product::new(ProductId(1), "Mug", dec!(20))));
    h.carts
        .expect_action(ALICE)
        .return_err(FrameworkError::EntityError(Box::new(
            CartError::RevisionConflict {
                expected: 3,
                actual: 4,
            },
        )));
    let (orders, _handle) = h.start();

    let err = orders
        .place_order(checkout(ShippingSelection::Inline(address())))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::CartChanged);
    assert!(orders.list_orders(ALICE).await.unwrap().is_empty());
    h.verify();
}

#[tokio::test]
async fn test_missing_product_leaves_cart_alone() {
    let mut h = Harness::new();
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    h.products.expect_get(ProductId(1)).return_ok(None);
    let (orders, _handle) = h.start();

    let err = orders
        .place_order(checkout(ShippingSelection::Inline(address())))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::ProductNotFound(ProductId(1)));
    h.verify();
}

#[tokio::test]
async fn test_incomplete_address_and_bad_upi_are_rejected() {
    let mut h = Harness::new();
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    let (orders, _handle) = h.start();

    let mut partial = address();
    partial.city = "  ".into();
    let err = orders
        .place_order(checkout(ShippingSelection::Inline(partial)))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::InvalidAddress("missing city".into()));

    let mut upi = checkout(ShippingSelection::Inline(address()));
    upi.payment = PaymentInfo {
        method: PaymentMethod::Upi,
        transaction_id: Some("foo".into()),
        status: PaymentStatus::Pending,
    };
    let err = orders.place_order(upi).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidPayment(_)));
    h.verify();
}

#[tokio::test]
async fn test_saved_address_is_resolved() {
    let mut h = Harness::new();
    let mut alice = User::new(ALICE, "Alice", "alice@example.com");
    alice.addresses.push(SavedAddress {
        id: AddressId(1),
        kind: AddressType::Work,
        address: address(),
        is_default: true,
    });
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    h.users.expect_get(ALICE).return_ok(Some(alice.clone()));
    h.products
        .expect_get(ProductId(1))
        .return_ok(Some(Product::new(ProductId(1), "Mug", dec!(20))));
    h.carts
        .expect_action(ALICE)
        .return_ok(CartActionResult::Updated(Cart::empty(ALICE)));
    // Second attempt names an address Alice does not have.
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    h.users.expect_get(ALICE).return_ok(Some(alice));
    let (orders, _handle) = h.start();

    let order = orders
        .place_order(checkout(ShippingSelection::Saved(AddressId(1))))
        .await
        .unwrap();
    assert_eq!(order.shipping_address, address());

    let err = orders
        .place_order(checkout(ShippingSelection::Saved(AddressId(9))))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidAddress(_)));
    h.verify();
}

#[tokio::test]
async fn test_orders_cannot_be_deleted() {
    let mut h = Harness::new();
    h.carts.expect_get(ALICE).return_ok(Some(cart()));
    h.products
        .expect_get(ProductId(1))
        .return_ok(Some(Product::new(ProductId(1), "Mug", dec!(20))));
    h.carts
        .expect_action(ALICE)
        .return_ok(CartActionResult::Updated(Cart::empty(ALICE)));
    let (orders, _handle) = h.start();

    let order = orders
        .place_order(checkout(ShippingSelection::Inline(address())))
        .await
        .unwrap();

    assert_eq!(orders.delete(order.id).await.unwrap_err(), OrderError::Immutable);
    assert!(orders.get(order.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_clear_uses_revision_that_was_priced() {
    let (cart_client, mut cart_requests) = create_mock_client::<Cart>(4);
    let mut products = MockClient::<Product>::new();
    products
        .expect_get(ProductId(1))
        .return_ok(Some(Product::new(ProductId(1), "Mug", dec!(20))));
    let users = MockClient::<User>::new();
    let (actor, orders) = storefront::order_actor::new(4);
    tokio::spawn(actor.run(OrderContext {
        carts: CartClient::new(cart_client),
        products: ProductClient::new(products.client()),
        users: UserClient::new(users.client()),
    }));

    let placing = tokio::spawn(async move {
        orders
            .place_order(checkout(ShippingSelection::Inline(address())))
            .await
    });

    let (id, respond_to) = expect_get(&mut cart_requests).await.expect("cart read");
    assert_eq!(id, ALICE);
    respond_to.send(Ok(Some(cart()))).unwrap();

    let (id, action, respond_to) = expect_action(&mut cart_requests)
        .await
        .expect("cart clear");
    assert_eq!(id, ALICE);
    assert!(matches!(
        action,
        CartAction::ClearForCheckout { expected_revision: 3 }
    ));
    respond_to
        .send(Ok(CartActionResult::Updated(Cart::empty(ALICE))))
        .unwrap();

    let order = placing.await.unwrap().unwrap();
    assert_eq!(order.total_amount, dec!(53.20));
    products.verify();
}
