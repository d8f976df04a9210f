use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{
    BreadcrumbId, CategoryId, ImageId, ProductId, ProductName, ProductPrice, VariantId,
};

/// A product together with its breadcrumbs and variant/image subtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    pub href: String,
    pub description: String,
    pub details: String,
    pub highlights: Vec<String>,
    pub category_id: Option<CategoryId>,
    /// Owning category, loaded alongside the product when `category_id` is set.
    pub category: Option<Category>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub variants: Vec<Variant>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// All variant images flattened in variant order.
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.variants.iter().flat_map(|variant| variant.images.iter())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Breadcrumb {
    pub id: BreadcrumbId,
    pub product_id: ProductId,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub name: Option<String>,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub id: ImageId,
    pub variant_id: VariantId,
    pub src: String,
    pub alt: String,
}

/// Information required to create a new [`Product`] with all of its children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    pub href: String,
    pub description: String,
    pub details: String,
    pub highlights: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub breadcrumbs: Vec<NewBreadcrumb>,
    pub variants: Vec<NewVariant>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBreadcrumb {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVariant {
    pub name: Option<String>,
    pub images: Vec<NewImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewImage {
    pub src: String,
    pub alt: String,
}

/// Replacement data for an existing product.
///
/// `variants` replaces the whole variant/image subtree; fields not listed here
/// (href, details, highlights, breadcrumbs) are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductUpdate {
    pub name: ProductName,
    pub price: ProductPrice,
    pub description: String,
    pub category_id: CategoryId,
    pub variants: Vec<NewVariant>,
    pub updated_at: NaiveDateTime,
}
