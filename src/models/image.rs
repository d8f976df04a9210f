use diesel::prelude::*;

use crate::domain::product::Image as DomainImage;
use crate::domain::types::TypeConstraintError;
use crate::models::variant::Variant;

/// Diesel model representing the `images` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Variant))]
#[diesel(table_name = crate::schema::images)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Image {
    pub id: i32,
    pub variant_id: i32,
    pub src: String,
    pub alt: String,
}

/// Insertable form of [`Image`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage<'a> {
    pub variant_id: i32,
    pub src: &'a str,
    pub alt: &'a str,
}

impl TryFrom<Image> for DomainImage {
    type Error = TypeConstraintError;

    fn try_from(image: Image) -> Result<Self, Self::Error> {
        Ok(Self {
            id: image.id.try_into()?,
            variant_id: image.variant_id.try_into()?,
            src: image.src,
            alt: image.alt,
        })
    }
}
