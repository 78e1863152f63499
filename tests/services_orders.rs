use storefront::domain::auth::{AuthenticatedUser, SellerAccess};
use storefront::domain::cart::NewCartItem;
use storefront::domain::order::OrderStatus;
use storefront::domain::pricing::Money;
use storefront::forms::cart::AddToCartForm;
use storefront::forms::offers::OfferForm;
use storefront::forms::orders::{BuyNowForm, ShippingForm, StatusForm};
use storefront::repository::{CartReader, CartWriter, OfferReader, ProductReader};
use storefront::services::{ServiceError, cart, offers, orders, seller_orders};

mod common;

const SHIPPING: &str = r#""full_name": "Alice", "phone": "555-0100", "address1": "1 Main St",
    "city": "Springfield", "state": "IL", "pincode": "62701", "payment_method": "cod""#;

fn seller() -> AuthenticatedUser {
    AuthenticatedUser {
        id: 999,
        username: "seller".into(),
        email: "seller@example.com".into(),
        name: "Seller".into(),
        is_staff: false,
        is_superuser: false,
        seller_session: true,
    }
}

#[test]
fn test_buy_now_snapshots_selling_price() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::customer(&repo, "alice@example.com");
    let identity = AuthenticatedUser::from_user(&user, false);
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, Some(400));

    let form: BuyNowForm = serde_json::from_str(&format!(
        r#"{{"product_id": {}, "quantity": "3", {SHIPPING}}}"#,
        product.id
    ))
    .unwrap();
    let order = orders::buy_now(&repo, &identity, form).unwrap();

    assert_eq!(order.total_amount, Money::from_units(1200));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].price, Money::from_units(400));
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.status, OrderStatus::Placed);

    let stored = repo.get_product_by_id(product.id).unwrap().unwrap();
    assert_eq!(stored.stock, product.stock);
}

#[test]
fn test_checkout_empties_cart() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::complete_customer(&repo, "alice@example.com");
    let identity = AuthenticatedUser::from_user(&user, false);
    let shirts = common::category(&repo, "Shirts");
    let tee = common::product(&repo, shirts.id, "Tee", 500, Some(400));
    let polo = common::product(&repo, shirts.id, "Polo", 300, None);

    let form: AddToCartForm =
        serde_json::from_str(&format!(r#"{{"product_id": {}, "quantity": 2}}"#, tee.id)).unwrap();
    cart::add_to_cart(&repo, &identity, form).unwrap();
    repo.add_cart_item(&NewCartItem {
        user_id: user.id,
        product_id: polo.id,
        size_variant_id: None,
        quantity: 1,
    })
    .unwrap();

    let form: ShippingForm = serde_json::from_str(&format!("{{{SHIPPING}}}")).unwrap();
    let order = orders::checkout_cart(&repo, &identity, form).unwrap();

    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total_amount, Money::from_units(1100));
    assert!(repo.list_cart_items(user.id).unwrap().is_empty());

    let form: ShippingForm = serde_json::from_str(&format!("{{{SHIPPING}}}")).unwrap();
    assert!(matches!(
        orders::checkout_cart(&repo, &identity, form),
        Err(ServiceError::Form(msg)) if msg == "Cart is empty"
    ));
}

#[test]
fn test_checkout_requires_complete_profile() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::customer(&repo, "alice@example.com");
    let identity = AuthenticatedUser::from_user(&user, false);

    let form: ShippingForm = serde_json::from_str(&format!("{{{SHIPPING}}}")).unwrap();

    assert!(matches!(
        orders::checkout_cart(&repo, &identity, form),
        Err(ServiceError::ProfileIncomplete)
    ));
}

#[test]
fn test_status_lifecycle() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let access = SellerAccess::default();
    let user = common::customer(&repo, "alice@example.com");
    let identity = AuthenticatedUser::from_user(&user, false);
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, None);

    let form: BuyNowForm = serde_json::from_str(&format!(
        r#"{{"product_id": {}, {SHIPPING}}}"#,
        product.id
    ))
    .unwrap();
    let order = orders::buy_now(&repo, &identity, form).unwrap();

    for status in ["shipped", "out_for_delivery", "delivered"] {
        let form = StatusForm {
            status: Some(status.into()),
        };
        seller_orders::update_order_status(&repo, &access, &seller(), order.id, form).unwrap();
    }

    let form = StatusForm {
        status: Some("delivered".into()),
    };
    assert!(matches!(
        seller_orders::update_order_status(&repo, &access, &seller(), order.id, form),
        Err(ServiceError::Form(msg)) if msg == "Order cannot be updated"
    ));
    assert!(matches!(
        orders::cancel_order(&repo, &identity, order.id),
        Err(ServiceError::Form(msg)) if msg == "Order cannot be cancelled"
    ));
}

#[test]
fn test_rejected_offer_price_changes_nothing() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let access = SellerAccess::default();
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, Some(450));

    let form: OfferForm = serde_json::from_str(&format!(
        r#"{{"product": {}, "title": "Deal", "offer_price": "500"}}"#,
        product.id
    ))
    .unwrap();

    assert!(matches!(
        offers::create_offer(&repo, &access, &seller(), form),
        Err(ServiceError::Form(_))
    ));
    assert!(
        repo.list_offers(storefront::domain::offer::OfferListQuery::All)
            .unwrap()
            .is_empty()
    );
    let stored = repo.get_product_by_id(product.id).unwrap().unwrap();
    assert_eq!(stored.offer_price, Some(Money::from_units(450)));
}
