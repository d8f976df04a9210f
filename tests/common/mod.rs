//! Helpers for integration tests.

use chrono::Utc;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::NamedTempFile;
use vam_storefront::db::{DbPool, establish_connection_pool};
use vam_storefront::domain::category::NewCategory;
use vam_storefront::domain::product::{NewBreadcrumb, NewImage, NewProduct, NewVariant};
use vam_storefront::domain::types::{CategoryId, CategoryName, ProductId, ProductName, ProductPrice};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

#[allow(dead_code)]
pub fn new_category(id: &str, name: &str) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        id: CategoryId::new(id).unwrap(),
        name: CategoryName::new(name).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

/// `variants` variants named `v{i}`, each with `images` images `v{i}-{j}.png`.
#[allow(dead_code)]
pub fn new_product(id: &str, name: &str, variants: usize, images: usize) -> NewProduct {
    let now = Utc::now().naive_utc();
    NewProduct {
        id: ProductId::new(id).unwrap(),
        name: ProductName::new(name).unwrap(),
        price: ProductPrice::new("₹ 299"),
        href: format!("/{id}"),
        description: "A sturdy stoneware mug".into(),
        details: "Hand wash only".into(),
        highlights: vec!["350 ml".into(), "Matte glaze".into()],
        category_id: None,
        breadcrumbs: vec![
            NewBreadcrumb {
                name: "Home".into(),
                href: "/".into(),
            },
            NewBreadcrumb {
                name: "Mugs".into(),
                href: "/shop".into(),
            },
        ],
        variants: (0..variants)
            .map(|i| NewVariant {
                name: Some(format!("v{i}")),
                images: (0..images)
                    .map(|j| NewImage {
                        src: format!("http://x/v{i}-{j}.png"),
                        alt: format!("variant {i} image {j}"),
                    })
                    .collect(),
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}
