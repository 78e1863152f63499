//! Helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};
use tempfile::TempDir;

use storefront::domain::category::{Category, NewCategory};
use storefront::domain::customer::UpdateCustomerProfile;
use storefront::domain::pricing::Money;
use storefront::domain::product::{NewProduct, Product};
use storefront::domain::user::{NewUser, User};
use storefront::repository::{
    CategoryWriter, DieselRepository, ProductWriter, ProfileWriter, UserWriter,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Migrated SQLite database inside a temporary directory that is removed
/// on drop.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join("test.db");
        let url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb { dir, path, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

pub fn customer(repo: &DieselRepository, email: &str) -> User {
    repo.create_customer(&NewUser::customer(email, "Alice".into(), "hash".into()))
        .expect("customer created")
        .expect("username is free")
}

/// Customer whose profile has every shipping field filled in.
pub fn complete_customer(repo: &DieselRepository, email: &str) -> User {
    let user = customer(repo, email);
    let updates = UpdateCustomerProfile {
        name: Some("Alice".into()),
        phone: Some("555-0100".into()),
        address: Some("1 Main St".into()),
        city: Some("Springfield".into()),
        state: Some("IL".into()),
        pincode: Some("62701".into()),
        ..UpdateCustomerProfile::default()
    };
    repo.update_profile(user.id, &updates)
        .expect("profile updated");
    user
}

pub fn category(repo: &DieselRepository, name: &str) -> Category {
    repo.create_category(&NewCategory::new(name))
        .expect("category created")
}

pub fn product(
    repo: &DieselRepository,
    category_id: i32,
    name: &str,
    original: i64,
    offer: Option<i64>,
) -> Product {
    let mut new_product = NewProduct::new(category_id, name, Money::from_units(original));
    if let Some(offer) = offer {
        new_product = new_product.with_offer_price(Money::from_units(offer));
    }
    repo.create_product(&new_product).expect("product created")
}
