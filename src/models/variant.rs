use diesel::prelude::*;

use crate::domain::product::Variant as DomainVariant;
use crate::domain::types::{ProductId, TypeConstraintError};
use crate::models::image::Image;
use crate::models::product::Product;

/// Diesel model representing the `variants` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Product))]
#[diesel(table_name = crate::schema::variants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Variant {
    pub id: i32,
    pub product_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::variants)]
pub struct NewVariant<'a> {
    pub product_id: &'a str,
    pub name: Option<&'a str>,
}

impl TryFrom<(Variant, Vec<Image>)> for DomainVariant {
    type Error = TypeConstraintError;

    fn try_from((variant, images): (Variant, Vec<Image>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: variant.id.try_into()?,
            product_id: ProductId::new(variant.product_id)?,
            name: variant.name,
            images: images
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
