use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{CategoryId, ProductId, ProductName, ProductPrice, TypeConstraintError};
use crate::models::breadcrumb::Breadcrumb;
use crate::models::category::Category;
use crate::models::image::Image;
use crate::models::variant::Variant;

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub href: String,
    pub description: String,
    pub details: String,
    /// JSON array of highlight strings.
    pub highlights: String,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`]; children are inserted separately.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: &'a str,
    pub href: &'a str,
    pub description: &'a str,
    pub details: &'a str,
    pub highlights: String,
    pub category_id: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A product row with every child row loaded for it.
#[derive(Debug)]
pub struct ProductRows {
    pub product: Product,
    pub category: Option<Category>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub variants: Vec<(Variant, Vec<Image>)>,
}

pub fn encode_highlights(highlights: &[String]) -> String {
    serde_json::Value::from(highlights.to_vec()).to_string()
}

pub fn decode_highlights(raw: &str) -> Result<Vec<String>, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("highlights: {e}")))
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            id: product.id.as_str(),
            name: product.name.as_str(),
            price: product.price.as_str(),
            href: &product.href,
            description: &product.description,
            details: &product.details,
            highlights: encode_highlights(&product.highlights),
            category_id: product.category_id.as_ref().map(CategoryId::as_str),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl TryFrom<ProductRows> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(rows: ProductRows) -> Result<Self, Self::Error> {
        let ProductRows {
            product,
            category,
            breadcrumbs,
            variants,
        } = rows;

        Ok(Self {
            highlights: decode_highlights(&product.highlights)?,
            id: ProductId::new(product.id)?,
            name: ProductName::new(product.name)?,
            price: ProductPrice::new(product.price),
            href: product.href,
            description: product.description,
            details: product.details,
            category_id: product.category_id.map(CategoryId::new).transpose()?,
            category: category.map(TryInto::try_into).transpose()?,
            breadcrumbs: breadcrumbs
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
            variants: variants
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}
