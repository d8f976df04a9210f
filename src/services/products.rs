use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ProductId};
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::repository::{CategoryReader, ProductReader, ProductWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Ids that cannot be valid are reported as missing rather than malformed.
fn parse_product_id(raw: &str) -> ServiceResult<ProductId> {
    ProductId::new(raw).map_err(|_| ServiceError::NotFound)
}

fn ensure_category_exists<R>(category_id: &CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::Form("Category not found".to_string())),
        Err(e) => {
            log::error!("Failed to get category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// All products with their full subtree.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    repo.list_products().map_err(|e| {
        log::error!("Failed to list products: {e}");
        ServiceError::Internal
    })
}

pub fn get_product<R>(product_id: &str, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let product_id = parse_product_id(product_id)?;
    match repo.get_product_by_id(&product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product {product_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a product, its breadcrumbs and its variant/image subtree.
pub fn create_product<R>(payload: CreateProductPayload, repo: &R) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader,
{
    if let Some(category_id) = &payload.category_id {
        ensure_category_exists(category_id, repo)?;
    }

    let new_product = payload.into_new_product();
    match repo.create_product(&new_product) {
        Ok(product) => {
            log::info!("Created product {} ({})", product.id, product.name);
            Ok(product)
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Update scalar fields and replace the variant/image subtree.
pub fn update_product<R>(
    product_id: &str,
    payload: UpdateProductPayload,
    repo: &R,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader,
{
    let product_id = parse_product_id(product_id)?;
    ensure_category_exists(&payload.category_id, repo)?;

    match repo.update_product(&product_id, &payload.into_product_update()) {
        Ok(product) => {
            log::info!("Updated product {product_id}");
            Ok(product)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update product {product_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a product together with everything it owns.
pub fn delete_product<R>(product_id: &str, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    let product_id = parse_product_id(product_id)?;

    match repo.delete_product(&product_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Deleted product {product_id}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete product {product_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
