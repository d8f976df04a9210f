//! Request and response bodies of the product JSON API.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::{Breadcrumb, Image, NewBreadcrumb, NewImage, NewVariant, Product, Variant};
use crate::domain::types::{CategoryId, ProductName, ProductPrice, TypeConstraintError};
use crate::dto::categories::CategoryDto;
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub price: String,
    pub href: String,
    pub description: String,
    pub details: String,
    pub highlights: Vec<String>,
    pub category_id: Option<String>,
    pub category: Option<CategoryDto>,
    pub breadcrumbs: Vec<BreadcrumbDto>,
    pub variants: Vec<VariantDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbDto {
    pub id: i32,
    pub name: String,
    pub href: String,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDto {
    pub id: i32,
    pub name: Option<String>,
    pub product_id: String,
    pub images: Vec<ImageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: i32,
    pub src: String,
    pub alt: String,
    pub variant_id: i32,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.into_inner(),
            name: value.name.into_inner(),
            price: value.price.into_inner(),
            href: value.href,
            description: value.description,
            details: value.details,
            highlights: value.highlights,
            category_id: value.category_id.map(CategoryId::into_inner),
            category: value.category.map(CategoryDto::from),
            breadcrumbs: value.breadcrumbs.into_iter().map(Into::into).collect(),
            variants: value.variants.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Breadcrumb> for BreadcrumbDto {
    fn from(value: Breadcrumb) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            href: value.href,
            product_id: value.product_id.into_inner(),
        }
    }
}

impl From<Variant> for VariantDto {
    fn from(value: Variant) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            product_id: value.product_id.into_inner(),
            images: value.images.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Image> for ImageDto {
    fn from(value: Image) -> Self {
        Self {
            id: value.id.get(),
            src: value.src,
            alt: value.alt,
            variant_id: value.variant_id.get(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageRequest>,
}

impl From<VariantRequest> for NewVariant {
    fn from(value: VariantRequest) -> Self {
        Self {
            name: value.name,
            images: value
                .images
                .into_iter()
                .map(|image| NewImage {
                    src: image.src,
                    alt: image.alt,
                })
                .collect(),
        }
    }
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub breadcrumbs: Vec<BreadcrumbRequest>,
    #[serde(default)]
    pub variants: Vec<VariantRequest>,
}

/// Body of `PUT /api/products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantRequest>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductRequestError {
    #[error("Category ID is required")]
    MissingCategory,
    #[error("{0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for ProductRequestError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateProductRequest> for CreateProductPayload {
    type Error = ProductRequestError;

    fn try_from(value: CreateProductRequest) -> Result<Self, Self::Error> {
        let category_id = match value.category_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(id) => Some(CategoryId::new(id)?),
        };

        Ok(Self {
            name: ProductName::new(value.name)?,
            price: ProductPrice::new(value.price),
            href: value.href,
            description: value.description,
            details: value.details,
            highlights: value.highlights,
            category_id,
            breadcrumbs: value
                .breadcrumbs
                .into_iter()
                .map(|b| NewBreadcrumb {
                    name: b.name,
                    href: b.href,
                })
                .collect(),
            variants: value.variants.into_iter().map(Into::into).collect(),
        })
    }
}

impl TryFrom<UpdateProductRequest> for UpdateProductPayload {
    type Error = ProductRequestError;

    fn try_from(value: UpdateProductRequest) -> Result<Self, Self::Error> {
        let category_id = match value.category_id.as_deref().map(str::trim) {
            None | Some("") => return Err(ProductRequestError::MissingCategory),
            Some(id) => CategoryId::new(id)?,
        };

        Ok(Self {
            name: ProductName::new(value.name)?,
            price: ProductPrice::new(value.price),
            description: value.description,
            category_id,
            variants: value.variants.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::fixtures::{sample_category, sample_product};

    #[test]
    fn create_request_accepts_camel_case_body() {
        let request: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Mug",
            "price": "299",
            "categoryId": "abc123",
            "variants": [{"name": "#ff0000", "images": [{"src": "http://x/1.png", "alt": "front"}]}]
        }))
        .unwrap();

        let payload = CreateProductPayload::try_from(request).unwrap();
        assert_eq!(payload.category_id.unwrap().as_str(), "abc123");
        assert!(payload.highlights.is_empty());
        assert_eq!(payload.variants[0].images[0].alt, "front");
    }

    #[test]
    fn update_request_requires_category() {
        let request = UpdateProductRequest {
            name: "Mug".into(),
            price: "299".into(),
            description: String::new(),
            category_id: None,
            variants: vec![],
        };
        assert_eq!(
            UpdateProductPayload::try_from(request).unwrap_err(),
            ProductRequestError::MissingCategory
        );
    }

    #[test]
    fn product_dto_uses_camel_case_keys() {
        let mut product = sample_product("p1");
        let category = sample_category("c1", "Kitchen");
        product.category_id = Some(category.id.clone());
        product.category = Some(category);

        let value = serde_json::to_value(ProductDto::from(product)).unwrap();
        assert_eq!(value["categoryId"], "c1");
        assert_eq!(value["category"]["name"], "Kitchen");
        assert_eq!(value["variants"][0]["productId"], "p1");
        assert_eq!(value["variants"][0]["images"][1]["variantId"], 1);
        assert_eq!(value["breadcrumbs"][0]["href"], "/");
    }
}
