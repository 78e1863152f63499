use pushkind_common::repository::errors::RepositoryError;
use storefront::domain::cart::{CartLineKey, NewCartItem};
use storefront::domain::offer::{NewOffer, OfferListQuery, UpdateOffer};
use storefront::domain::order::{NewOrder, OrderListQuery, OrderStatus, ShippingDetails};
use storefront::domain::pricing::Money;
use storefront::domain::product::{NewProduct, NewSizeVariant, ProductListQuery, UpdateProduct};
use storefront::domain::user::NewUser;
use storefront::repository::{
    CartReader, CartWriter, CategoryReader, OfferReader, OfferWriter, OrderReader, OrderWriter,
    ProductReader, ProductWriter, ProfileReader, UserReader, UserWriter, WishlistReader,
    WishlistWriter,
};

mod common;

fn variant(label: &str, original: i64, offer: Option<i64>) -> NewSizeVariant {
    NewSizeVariant {
        size_label: label.to_string(),
        original_price: Money::from_units(original),
        offer_price: offer.map(Money::from_units),
        stock: 3,
        display_order: 0,
        is_active: true,
    }
}

fn shipping() -> ShippingDetails {
    ShippingDetails {
        full_name: "Alice".into(),
        phone: "555-0100".into(),
        address: "1 Main St".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        pincode: "62701".into(),
    }
}

#[test]
fn test_customer_gets_empty_profile() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let user = common::customer(&repo, " Alice@Example.com ");

    assert_eq!(user.username, "alice@example.com");
    let found = repo.get_user_by_username("alice@example.com").unwrap();
    assert_eq!(found.map(|user| user.id), Some(user.id));

    let profile = repo.get_profile(user.id).unwrap().expect("profile created");
    assert_eq!(profile.name, "Alice");
    assert!(!profile.is_complete());
}

#[test]
fn test_duplicate_customer_insert_is_reported() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let user = common::customer(&repo, "alice@example.com");
    let again = repo
        .create_customer(&NewUser::customer("alice@example.com", "Other".into(), "hash".into()))
        .unwrap();

    assert!(again.is_none());
    let profile = repo.get_profile(user.id).unwrap().expect("profile created");
    assert_eq!(profile.name, "Alice");
}

#[test]
fn test_slugs_are_deduplicated() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let first = common::category(&repo, "Shirts");
    let second = common::category(&repo, "shirts");
    assert_eq!(first.slug, "shirts");
    assert_eq!(second.slug, "shirts-2");

    let a = common::product(&repo, first.id, "Linen Shirt", 500, None);
    let b = common::product(&repo, first.id, "Linen Shirt", 600, None);
    assert_eq!(a.slug, "linen-shirt");
    assert_eq!(b.slug, "linen-shirt-2");

    let found = repo.find_category("SHIRTS").unwrap().expect("category found");
    assert_eq!(found.id, first.id);
}

#[test]
fn test_product_listing_filters() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let shirts = common::category(&repo, "Shirts");
    let hats = common::category(&repo, "Hats");

    let shirt = common::product(&repo, shirts.id, "Shirt", 500, None);
    let other_shirt = common::product(&repo, shirts.id, "Polo", 400, None);
    let hat = common::product(&repo, hats.id, "Hat", 100, None);
    repo.update_product(hat.id, &UpdateProduct::deactivate())
        .unwrap();

    let active = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(active.len(), 2);

    let related = repo
        .list_products(ProductListQuery::new().category(shirts.id).exclude(shirt.id))
        .unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, other_shirt.id);
    assert_eq!(related[0].category_name, "Shirts");

    let inactive = repo
        .list_products(ProductListQuery::new().inactive_only())
        .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].id, hat.id);
}

#[test]
fn test_variant_update_keeps_matching_ids() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let shirts = common::category(&repo, "Shirts");

    let new_product = NewProduct::new(shirts.id, "Tee", Money::from_units(1000))
        .with_size_variants(vec![variant("M", 1000, None), variant("L", 1200, Some(900))]);
    let product = repo.create_product(&new_product).unwrap();
    assert_eq!(product.size_variants.len(), 2);
    let large_id = product
        .size_variants
        .iter()
        .find(|variant| variant.size_label == "L")
        .map(|variant| variant.id)
        .unwrap();

    let mut updates = UpdateProduct::new();
    updates.size_variants = Some(vec![variant("l", 1300, None), variant("XL", 1400, None)]);
    let updated = repo.update_product(product.id, &updates).unwrap();

    assert_eq!(updated.size_variants.len(), 2);
    let large = updated
        .size_variants
        .iter()
        .find(|variant| variant.size_label == "l")
        .expect("large kept");
    assert_eq!(large.id, large_id);
    assert_eq!(large.original_price, Money::from_units(1300));
    assert!(updated.size_variants.iter().all(|variant| variant.size_label != "M"));
}

#[test]
fn test_offer_visibility_and_price() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let shirts = common::category(&repo, "Shirts");
    let shown = common::product(&repo, shirts.id, "Shown", 500, None);
    let hidden = common::product(&repo, shirts.id, "Hidden", 500, None);

    let offer = repo
        .create_offer(&NewOffer::new(shown.id, "Sale").with_offer_price(Money::from_units(450)))
        .unwrap();
    repo.create_offer(&NewOffer::new(hidden.id, "Hidden sale"))
        .unwrap();
    repo.create_offer(&NewOffer::new(shown.id, "Paused").inactive())
        .unwrap();
    repo.update_product(hidden.id, &UpdateProduct::deactivate())
        .unwrap();

    let visible = repo.list_offers(OfferListQuery::Visible).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, offer.id);
    assert_eq!(repo.list_offers(OfferListQuery::All).unwrap().len(), 3);

    let stored = repo.get_product_by_id(shown.id).unwrap().unwrap();
    assert_eq!(stored.offer_price, Some(Money::from_units(450)));

    let mut updates = UpdateOffer::new();
    updates.title = Some("Big sale".into());
    updates.offer_price = Some(Money::from_units(300));
    let updated = repo.update_offer(offer.id, &updates).unwrap();
    assert_eq!(updated.title, "Big sale");
    let stored = repo.get_product_by_id(shown.id).unwrap().unwrap();
    assert_eq!(stored.offer_price, Some(Money::from_units(300)));

    repo.delete_offer(offer.id).unwrap();
    assert!(matches!(
        repo.delete_offer(offer.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_cart_lines_are_keyed_by_size() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::complete_customer(&repo, "alice@example.com");
    let shirts = common::category(&repo, "Shirts");
    let new_product = NewProduct::new(shirts.id, "Tee", Money::from_units(1000))
        .with_size_variants(vec![variant("L", 1200, Some(900))]);
    let product = repo.create_product(&new_product).unwrap();
    let large_id = product.size_variants[0].id;

    let plain = NewCartItem {
        user_id: user.id,
        product_id: product.id,
        size_variant_id: None,
        quantity: 1,
    };
    let sized = NewCartItem {
        size_variant_id: Some(large_id),
        quantity: 2,
        ..plain.clone()
    };

    repo.add_cart_item(&plain).unwrap();
    let again = repo.add_cart_item(&plain).unwrap();
    assert_eq!(again.quantity, 2);
    let sized_line = repo.add_cart_item(&sized).unwrap();
    assert_eq!(sized_line.quantity, 2);
    assert_eq!(sized_line.quote().original_price, Money::from_units(1200));

    let lines = repo.list_cart_items(user.id).unwrap();
    assert_eq!(lines.len(), 2);

    let removed = repo
        .remove_cart_items(user.id, product.id, Some(large_id))
        .unwrap();
    assert_eq!(removed, 1);
    let removed = repo.remove_cart_items(user.id, product.id, None).unwrap();
    assert_eq!(removed, 1);
    assert!(repo.list_cart_items(user.id).unwrap().is_empty());
}

#[test]
fn test_wishlist_add_is_idempotent() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::complete_customer(&repo, "alice@example.com");
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 100, None);

    let first = repo.add_wishlist_item(user.id, product.id).unwrap();
    let second = repo.add_wishlist_item(user.id, product.id).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(repo.list_wishlist_items(user.id).unwrap().len(), 1);

    assert_eq!(repo.remove_wishlist_items(user.id, product.id).unwrap(), 1);
    assert!(repo.list_wishlist_items(user.id).unwrap().is_empty());
}

#[test]
fn test_cart_order_uses_lines_as_stored_at_checkout() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::complete_customer(&repo, "alice@example.com");
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, Some(400));

    assert!(repo.create_order_from_cart(user.id, &shipping()).unwrap().is_none());

    let line = repo
        .add_cart_item(&NewCartItem {
            user_id: user.id,
            product_id: product.id,
            size_variant_id: None,
            quantity: 1,
        })
        .unwrap();
    let key = CartLineKey {
        user_id: user.id,
        product_id: product.id,
        size_variant_id: None,
    };
    let bumped = repo.update_cart_item_quantity(&key, 5).unwrap();
    assert_eq!(bumped.id, line.id);

    let order = repo
        .create_order_from_cart(user.id, &shipping())
        .unwrap()
        .expect("cart has a line");
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 5);
    assert_eq!(order.total_amount, Money::from_units(2000));
    assert_eq!(order.customer_email, "alice@example.com");
    assert!(repo.list_cart_items(user.id).unwrap().is_empty());
}

#[test]
fn test_cart_order_leaves_other_carts_alone() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let alice = common::complete_customer(&repo, "alice@example.com");
    let bob = common::complete_customer(&repo, "bob@example.com");
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, None);

    for user_id in [alice.id, bob.id] {
        repo.add_cart_item(&NewCartItem {
            user_id,
            product_id: product.id,
            size_variant_id: None,
            quantity: 2,
        })
        .unwrap();
    }

    let order = repo
        .create_order_from_cart(alice.id, &shipping())
        .unwrap()
        .expect("cart has a line");
    assert_eq!(order.total_amount, Money::from_units(1000));
    assert!(repo.list_cart_items(alice.id).unwrap().is_empty());
    assert_eq!(repo.list_cart_items(bob.id).unwrap().len(), 1);
    assert_eq!(repo.list_orders(OrderListQuery::all()).unwrap().len(), 1);
}

#[test]
fn test_order_status_is_persisted() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::customer(&repo, "alice@example.com");
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, None);

    let order = repo
        .create_order(&NewOrder::buy_now(user.id, shipping(), &product, None, 1))
        .unwrap();
    assert_eq!(order.status, OrderStatus::Placed);

    let shipped = repo
        .update_order_status(order.id, OrderStatus::Placed, OrderStatus::Shipped)
        .unwrap()
        .expect("order is placed");
    assert_eq!(shipped.status, OrderStatus::Shipped);

    let mine = repo.list_orders(OrderListQuery::for_user(user.id)).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].items[0].product_name, "Tee");
    assert!(
        repo.list_orders(OrderListQuery::for_user(user.id + 1))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_order_status_update_needs_current_status() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let user = common::customer(&repo, "alice@example.com");
    let shirts = common::category(&repo, "Shirts");
    let product = common::product(&repo, shirts.id, "Tee", 500, None);

    let order = repo
        .create_order(&NewOrder::buy_now(user.id, shipping(), &product, None, 1))
        .unwrap();
    repo.update_order_status(order.id, OrderStatus::Placed, OrderStatus::Cancelled)
        .unwrap()
        .expect("order is placed");

    let stale = repo
        .update_order_status(order.id, OrderStatus::Placed, OrderStatus::Shipped)
        .unwrap();
    assert!(stale.is_none());

    let stored = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    assert!(
        repo.update_order_status(order.id + 100, OrderStatus::Placed, OrderStatus::Shipped)
            .unwrap()
            .is_none()
    );
}
