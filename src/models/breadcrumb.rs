use diesel::prelude::*;

use crate::domain::product::Breadcrumb as DomainBreadcrumb;
use crate::domain::types::{ProductId, TypeConstraintError};
use crate::models::product::Product;

/// Diesel model representing the `breadcrumbs` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Product))]
#[diesel(table_name = crate::schema::breadcrumbs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Breadcrumb {
    pub id: i32,
    pub product_id: String,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::breadcrumbs)]
pub struct NewBreadcrumb<'a> {
    pub product_id: &'a str,
    pub name: &'a str,
    pub href: &'a str,
}

impl TryFrom<Breadcrumb> for DomainBreadcrumb {
    type Error = TypeConstraintError;

    fn try_from(breadcrumb: Breadcrumb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: breadcrumb.id.try_into()?,
            product_id: ProductId::new(breadcrumb.product_id)?,
            name: breadcrumb.name,
            href: breadcrumb.href,
        })
    }
}
