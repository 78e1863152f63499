use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::domain::pricing::{Money, PriceQuote, Priced};

/// Domain representation of a catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Seller that owns the product. Unassigned products belong to every seller.
    pub seller_id: Option<i32>,
    /// Category the product is listed under.
    pub category_id: i32,
    /// Name of the category, loaded alongside the product.
    pub category_name: String,
    /// Human-readable name of the product.
    pub name: String,
    /// Unique URL slug derived from the name.
    pub slug: String,
    /// Regular price.
    pub original_price: Money,
    /// Promotional price, applied only while it is below the original price.
    pub offer_price: Option<Money>,
    /// Units in stock. Informational only.
    pub stock: i32,
    /// Inactive products are hidden from the storefront.
    pub is_active: bool,
    /// Highlighted on the landing page.
    pub featured: bool,
    /// Stored image URL or path.
    pub image: Option<String>,
    /// Longer description shown on the detail page.
    pub description: String,
    /// Active and inactive size variants ordered by display order.
    pub size_variants: Vec<ProductSizeVariant>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether `seller_id` may manage this product.
    pub fn is_owned_by(&self, seller_id: i32) -> bool {
        self.seller_id.is_none_or(|owner| owner == seller_id)
    }

    /// Find an active size variant of this product.
    pub fn active_variant(&self, variant_id: i32) -> Option<&ProductSizeVariant> {
        self.size_variants
            .iter()
            .find(|variant| variant.id == variant_id && variant.is_active)
    }

    pub fn variant(&self, variant_id: i32) -> Option<&ProductSizeVariant> {
        self.size_variants
            .iter()
            .find(|variant| variant.id == variant_id)
    }
}

impl Priced for Product {
    fn original_price(&self) -> Money {
        self.original_price
    }

    fn offer_price(&self) -> Option<Money> {
        self.offer_price
    }
}

#[derive(Serialize)]
struct ProductRepr<'a> {
    id: i32,
    seller: Option<i32>,
    category: i32,
    category_name: &'a str,
    name: &'a str,
    slug: &'a str,
    stock: i32,
    is_active: bool,
    featured: bool,
    image: Option<&'a str>,
    description: &'a str,
    #[serde(flatten)]
    quote: PriceQuote,
    size_variants: &'a [ProductSizeVariant],
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProductRepr {
            id: self.id,
            seller: self.seller_id,
            category: self.category_id,
            category_name: &self.category_name,
            name: &self.name,
            slug: &self.slug,
            stock: self.stock,
            is_active: self.is_active,
            featured: self.featured,
            image: self.image.as_deref(),
            description: &self.description,
            quote: self.quote(),
            size_variants: &self.size_variants,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .serialize(serializer)
    }
}

/// Per-size price and stock override of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSizeVariant {
    pub id: i32,
    pub product_id: i32,
    /// Trimmed label such as `M` or `XL`, unique per product ignoring case.
    pub size_label: String,
    pub original_price: Money,
    pub offer_price: Option<Money>,
    pub stock: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Priced for ProductSizeVariant {
    fn original_price(&self) -> Money {
        self.original_price
    }

    fn offer_price(&self) -> Option<Money> {
        self.offer_price
    }
}

#[derive(Serialize)]
struct SizeVariantRepr<'a> {
    id: i32,
    size_label: &'a str,
    stock: i32,
    display_order: i32,
    is_active: bool,
    #[serde(flatten)]
    quote: PriceQuote,
}

impl Serialize for ProductSizeVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SizeVariantRepr {
            id: self.id,
            size_label: &self.size_label,
            stock: self.stock,
            display_order: self.display_order,
            is_active: self.is_active,
            quote: self.quote(),
        }
        .serialize(serializer)
    }
}

/// Size variant payload stored together with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSizeVariant {
    pub size_label: String,
    pub original_price: Money,
    pub offer_price: Option<Money>,
    pub stock: i32,
    pub display_order: i32,
    pub is_active: bool,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Seller creating the product.
    pub seller_id: Option<i32>,
    pub category_id: i32,
    pub name: String,
    pub original_price: Money,
    pub offer_price: Option<Money>,
    pub stock: i32,
    pub is_active: bool,
    pub featured: bool,
    pub image: Option<String>,
    pub description: String,
    /// Variants inserted in the same transaction as the product.
    pub size_variants: Vec<NewSizeVariant>,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new active product payload with the current timestamp.
    pub fn new(category_id: i32, name: impl Into<String>, original_price: Money) -> Self {
        Self {
            seller_id: None,
            category_id,
            name: name.into(),
            original_price,
            offer_price: None,
            stock: 0,
            is_active: true,
            featured: false,
            image: None,
            description: String::new(),
            size_variants: Vec::new(),
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_seller(mut self, seller_id: i32) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn with_offer_price(mut self, offer_price: Money) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_size_variants(mut self, variants: Vec<NewSizeVariant>) -> Self {
        self.size_variants = variants;
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub original_price: Option<Money>,
    /// `Some(None)` clears the offer price.
    pub offer_price: Option<Option<Money>>,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
    /// `Some(None)` clears the image.
    pub image: Option<Option<String>>,
    pub description: Option<String>,
    /// Seller taking ownership of an unassigned product.
    pub seller_id: Option<i32>,
    /// When present, replaces every stored size variant.
    pub size_variants: Option<Vec<NewSizeVariant>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: Option<NaiveDateTime>,
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            updated_at: Some(Local::now().naive_utc()),
            ..Self::default()
        }
    }

    /// Soft delete: hide the product from the storefront.
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::new()
        }
    }

    pub fn assign_seller(mut self, seller_id: i32) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    /// Original price the product will have once the patch is applied.
    pub fn effective_original_price(&self, current: &Product) -> Money {
        self.original_price.unwrap_or(current.original_price)
    }
}

/// Which products a listing should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    Active,
    Inactive,
    All,
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to one category.
    pub category_id: Option<i32>,
    /// Exclude a single product, used for related products.
    pub exclude_id: Option<i32>,
    pub activity: ActivityFilter,
}

impl ProductListQuery {
    /// Construct a query over all active products.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn exclude(mut self, product_id: i32) -> Self {
        self.exclude_id = Some(product_id);
        self
    }

    pub fn inactive_only(mut self) -> Self {
        self.activity = ActivityFilter::Inactive;
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.activity = ActivityFilter::All;
        self
    }
}
