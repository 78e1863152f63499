use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing::Money;
use crate::domain::product::{
    NewProduct as DomainNewProduct, NewSizeVariant as DomainNewSizeVariant,
    Product as DomainProduct, ProductSizeVariant as DomainProductSizeVariant,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub seller_id: Option<i32>,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub original_price: i64,
    pub offer_price: Option<i64>,
    pub stock: i32,
    pub is_active: bool,
    pub featured: bool,
    pub image: Option<String>,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub seller_id: Option<i32>,
    pub category_id: i32,
    pub name: &'a str,
    pub slug: &'a str,
    pub original_price: i64,
    pub offer_price: Option<i64>,
    pub stock: i32,
    pub is_active: bool,
    pub featured: bool,
    pub image: Option<&'a str>,
    pub description: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewProduct<'a> {
    /// Insertable row for `value` stored under the already de-duplicated `slug`.
    pub fn with_slug(value: &'a DomainNewProduct, slug: &'a str) -> Self {
        Self {
            seller_id: value.seller_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            slug,
            original_price: value.original_price.cents(),
            offer_price: value.offer_price.map(Money::cents),
            stock: value.stock,
            is_active: value.is_active,
            featured: value.featured,
            image: value.image.as_deref(),
            description: value.description.as_str(),
            updated_at: value.updated_at,
        }
    }
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub seller_id: Option<i32>,
    pub category_id: Option<i32>,
    pub name: Option<&'a str>,
    pub original_price: Option<i64>,
    pub offer_price: Option<Option<i64>>,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
    pub image: Option<Option<&'a str>>,
    pub description: Option<&'a str>,
    pub updated_at: Option<NaiveDateTime>,
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            seller_id: value.seller_id,
            category_id: value.category_id,
            name: value.name.as_deref(),
            original_price: value.original_price.map(Money::cents),
            offer_price: value.offer_price.map(|price| price.map(Money::cents)),
            stock: value.stock,
            is_active: value.is_active,
            featured: value.featured,
            image: value.image.as_ref().map(|image| image.as_deref()),
            description: value.description.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

/// Row plus the name of its category.
impl From<(Product, String)> for DomainProduct {
    fn from((value, category_name): (Product, String)) -> Self {
        Self {
            id: value.id,
            seller_id: value.seller_id,
            category_id: value.category_id,
            category_name,
            name: value.name,
            slug: value.slug,
            original_price: Money::from_cents(value.original_price),
            offer_price: value.offer_price.map(Money::from_cents),
            stock: value.stock,
            is_active: value.is_active,
            featured: value.featured,
            image: value.image,
            description: value.description,
            size_variants: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_size_variants)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
pub struct ProductSizeVariant {
    pub id: i32,
    pub product_id: i32,
    pub size_label: String,
    pub original_price: i64,
    pub offer_price: Option<i64>,
    pub stock: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_size_variants)]
pub struct NewProductSizeVariant<'a> {
    pub product_id: i32,
    pub size_label: &'a str,
    pub original_price: i64,
    pub offer_price: Option<i64>,
    pub stock: i32,
    pub display_order: i32,
    pub is_active: bool,
}

impl<'a> NewProductSizeVariant<'a> {
    pub fn for_product(product_id: i32, value: &'a DomainNewSizeVariant) -> Self {
        Self {
            product_id,
            size_label: value.size_label.as_str(),
            original_price: value.original_price.cents(),
            offer_price: value.offer_price.map(Money::cents),
            stock: value.stock,
            display_order: value.display_order,
            is_active: value.is_active,
        }
    }
}

impl From<ProductSizeVariant> for DomainProductSizeVariant {
    fn from(value: ProductSizeVariant) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            size_label: value.size_label,
            original_price: Money::from_cents(value.original_price),
            offer_price: value.offer_price.map(Money::from_cents),
            stock: value.stock,
            display_order: value.display_order,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::product_size_variants)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProductSizeVariant<'a> {
    pub size_label: &'a str,
    pub original_price: i64,
    pub offer_price: Option<i64>,
    pub stock: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl<'a> UpdateProductSizeVariant<'a> {
    pub fn from_domain(value: &'a DomainNewSizeVariant, updated_at: NaiveDateTime) -> Self {
        Self {
            size_label: value.size_label.as_str(),
            original_price: value.original_price.cents(),
            offer_price: value.offer_price.map(Money::cents),
            stock: value.stock,
            display_order: value.display_order,
            is_active: value.is_active,
            updated_at,
        }
    }
}
