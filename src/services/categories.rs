use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::AddCategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter, ProductReader};

use super::{ServiceError, ServiceResult};

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a category; labels must be unique.
pub fn create_category<R>(payload: AddCategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_name(&payload.name) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Form(format!(
                "Category \"{}\" already exists",
                payload.name
            )));
        }
        Err(e) => {
            log::error!("Failed to look up category by name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => {
            log::info!("Created category {} ({})", created.id, created.name);
            Ok(created.into())
        }
        Err(e) if e.is_unique_violation() => Err(ServiceError::Form(format!(
            "Category \"{}\" already exists",
            category.name
        ))),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a category that no product references.
pub fn delete_category<R>(category_id: &str, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + ProductReader,
{
    let category_id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_category_by_id(&category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {category_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.count_products_in_category(&category_id) {
        Ok(0) => {}
        Ok(count) => {
            return Err(ServiceError::Form(format!(
                "Category is used by {count} product(s)"
            )));
        }
        Err(e) => {
            log::error!("Failed to count products in category {category_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(&category_id) {
        Ok(_) => {
            log::info!("Deleted category {category_id}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
