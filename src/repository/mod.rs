use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::domain::types::{CategoryId, CategoryName, ProductId};

pub mod category;
pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for product aggregates.
pub trait ProductReader {
    /// List every product with its category, breadcrumbs and variant/image subtree.
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a single product aggregate by its identifier.
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    /// Count products that reference a category.
    fn count_products_in_category(&self, category_id: &CategoryId) -> RepositoryResult<usize>;
}

/// Write operations for product aggregates.
///
/// Every method runs as a single transaction.
pub trait ProductWriter {
    /// Persist a product with its breadcrumbs and variant/image subtree.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Update scalar fields and replace the whole variant/image subtree.
    ///
    /// Returns [`RepositoryError::NotFound`] when no product has `id`.
    fn update_product(&self, id: &ProductId, update: &ProductUpdate) -> RepositoryResult<Product>;
    /// Delete images, variants, breadcrumbs and finally the product row.
    fn delete_product(&self, id: &ProductId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its exact display label.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it as stored.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Delete a category by id.
    fn delete_category(&self, id: &CategoryId) -> RepositoryResult<usize>;
}
