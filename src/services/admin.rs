//! Seller dashboard: product table and the add/edit product form.

use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::Product;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::forms::products::{FormMode, FormOp, ProductFormData, ProductFormSubmission};
use crate::repository::{CategoryReader, CategoryWriter, ProductReader, ProductWriter};

use super::auth::ensure_admin;
use super::{ServiceError, ServiceResult, categories, products};

/// One row of the dashboard product table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: Option<String>,
    pub variant_count: usize,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_str().to_string(),
            name: product.name.as_str().to_string(),
            price: product.price.as_str().to_string(),
            description: product.description.clone(),
            category: product
                .category
                .as_ref()
                .map(|category| category.name.as_str().to_string()),
            variant_count: product.variants.len(),
        }
    }
}

/// Everything the product form template needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFormPage {
    pub mode: FormMode,
    pub product_id: Option<String>,
    pub form: ProductFormData,
    pub categories: Vec<CategoryDto>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductFormOutcome {
    /// The product was stored; the caller should leave the form.
    Saved(Product),
    /// Show the form again with the given state.
    Render(ProductFormPage),
}

/// Categories for the form's select box. A failure leaves the box empty.
fn category_options<R>(repo: &R) -> Vec<CategoryDto>
where
    R: CategoryReader,
{
    categories::list_categories(repo).unwrap_or_default()
}

fn message_for(err: ServiceError, fallback: &str) -> String {
    match err {
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => message,
        _ => fallback.to_string(),
    }
}

pub fn show_dashboard(user: Option<&AuthenticatedUser>) -> ServiceResult<&AuthenticatedUser> {
    ensure_admin(user)
}

pub fn show_products<R>(user: Option<&AuthenticatedUser>, repo: &R) -> ServiceResult<Vec<ProductRow>>
where
    R: ProductReader,
{
    ensure_admin(user)?;
    let products = products::list_products(repo)?;
    Ok(products.iter().map(ProductRow::from).collect())
}

pub fn delete_product<R>(
    user: Option<&AuthenticatedUser>,
    product_id: &str,
    repo: &R,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    ensure_admin(user)?;
    products::delete_product(product_id, repo)
}

pub fn new_product_form<R>(user: Option<&AuthenticatedUser>, repo: &R) -> ServiceResult<ProductFormPage>
where
    R: CategoryReader,
{
    ensure_admin(user)?;
    Ok(ProductFormPage {
        mode: FormMode::Create,
        product_id: None,
        form: ProductFormData::blank(),
        categories: category_options(repo),
        error: None,
        notice: None,
    })
}

pub fn edit_product_form<R>(
    user: Option<&AuthenticatedUser>,
    product_id: &str,
    repo: &R,
) -> ServiceResult<ProductFormPage>
where
    R: ProductReader + CategoryReader,
{
    ensure_admin(user)?;
    let product = products::get_product(product_id, repo)?;
    Ok(ProductFormPage {
        mode: FormMode::Edit,
        product_id: Some(product.id.as_str().to_string()),
        form: ProductFormData::from_product(&product),
        categories: category_options(repo),
        error: None,
        notice: None,
    })
}

/// Handle a post of the product form.
///
/// List edits and inline category creation re-render the form with the
/// submitted state; `save` stores the product. Save failures are reported
/// on the re-rendered form rather than as errors, except for a product that
/// vanished while being edited.
pub fn submit_product_form<R>(
    user: Option<&AuthenticatedUser>,
    product_id: Option<&str>,
    fields: Vec<(String, String)>,
    repo: &R,
) -> ServiceResult<ProductFormOutcome>
where
    R: ProductReader + ProductWriter + CategoryReader + CategoryWriter,
{
    ensure_admin(user)?;

    let mode = match product_id {
        Some(product_id) => {
            products::get_product(product_id, repo)?;
            FormMode::Edit
        }
        None => FormMode::Create,
    };

    let ProductFormSubmission {
        mut form,
        op,
        new_category_name,
    } = ProductFormSubmission::from_fields(fields)?;

    let mut error = None;
    let mut notice = None;

    match op {
        FormOp::Save => {
            let saved = match (mode, product_id) {
                (FormMode::Edit, Some(product_id)) => form
                    .clone()
                    .into_update_payload()
                    .map_err(ServiceError::from)
                    .and_then(|payload| products::update_product(product_id, payload, repo)),
                _ => form
                    .clone()
                    .into_create_payload()
                    .map_err(ServiceError::from)
                    .and_then(|payload| products::create_product(payload, repo)),
            };
            match saved {
                Ok(product) => return Ok(ProductFormOutcome::Saved(product)),
                Err(ServiceError::NotFound) => return Err(ServiceError::NotFound),
                Err(err) => error = Some(message_for(err, "Failed to save product")),
            }
        }
        FormOp::CreateCategory => {
            let created = AddCategoryFormPayload::try_from(AddCategoryForm {
                name: new_category_name,
            })
            .map_err(ServiceError::from)
            .and_then(|payload| categories::create_category(payload, repo));
            match created {
                Ok(category) => {
                    notice = Some(format!("Category \"{}\" created", category.name));
                    form.category_id = category.id;
                }
                Err(err) => error = Some(message_for(err, "Failed to create category")),
            }
        }
        op => form.apply(&op),
    }

    Ok(ProductFormOutcome::Render(ProductFormPage {
        mode,
        product_id: product_id.map(str::to_string),
        form,
        categories: category_options(repo),
        error,
        notice,
    }))
}
