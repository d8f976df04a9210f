use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::{NewBreadcrumb, NewProduct, NewVariant, Product, ProductUpdate};
use crate::domain::types::{CategoryId, ProductId};
use crate::models::breadcrumb::{Breadcrumb as DbBreadcrumb, NewBreadcrumb as DbNewBreadcrumb};
use crate::models::category::Category as DbCategory;
use crate::models::image::{Image as DbImage, NewImage as DbNewImage};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct, ProductRows};
use crate::models::variant::{NewVariant as DbNewVariant, Variant as DbVariant};
use crate::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
};

/// Load categories, breadcrumbs and the variant/image subtree for `rows`,
/// keeping the order of `rows` and ordering children by insertion.
fn load_aggregates(
    conn: &mut SqliteConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<Product>> {
    use crate::schema::{breadcrumbs, categories, images, variants};

    if rows.is_empty() {
        return Ok(vec![]);
    }

    let breadcrumb_rows = DbBreadcrumb::belonging_to(&rows)
        .select(DbBreadcrumb::as_select())
        .order(breadcrumbs::id.asc())
        .load(conn)?;

    let variant_rows = DbVariant::belonging_to(&rows)
        .select(DbVariant::as_select())
        .order(variants::id.asc())
        .load(conn)?;

    let image_rows = DbImage::belonging_to(&variant_rows)
        .select(DbImage::as_select())
        .order(images::id.asc())
        .load(conn)?;

    let category_ids: Vec<&str> = rows
        .iter()
        .filter_map(|p| p.category_id.as_deref())
        .collect();
    let categories_by_id: HashMap<String, DbCategory> = categories::table
        .filter(categories::id.eq_any(category_ids))
        .select(DbCategory::as_select())
        .load(conn)?
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect();

    let images_by_variant = image_rows.grouped_by(&variant_rows);
    let variants_with_images: Vec<(DbVariant, Vec<DbImage>)> =
        variant_rows.into_iter().zip(images_by_variant).collect();
    let variants_by_product = variants_with_images.grouped_by(&rows);
    let breadcrumbs_by_product = breadcrumb_rows.grouped_by(&rows);

    rows.into_iter()
        .zip(breadcrumbs_by_product)
        .zip(variants_by_product)
        .map(|((product, breadcrumbs), variants)| -> RepositoryResult<Product> {
            let category = product
                .category_id
                .as_ref()
                .and_then(|id| categories_by_id.get(id).cloned());
            let aggregate = Product::try_from(ProductRows {
                product,
                category,
                breadcrumbs,
                variants,
            })?;
            Ok(aggregate)
        })
        .collect()
}

fn load_product(conn: &mut SqliteConnection, id: &str) -> RepositoryResult<Option<Product>> {
    use crate::schema::products;

    let row = products::table
        .find(id)
        .select(DbProduct::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(load_aggregates(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

fn insert_breadcrumbs(
    conn: &mut SqliteConnection,
    product_id: &str,
    new_breadcrumbs: &[NewBreadcrumb],
) -> RepositoryResult<()> {
    use crate::schema::breadcrumbs;

    if new_breadcrumbs.is_empty() {
        return Ok(());
    }

    let rows: Vec<DbNewBreadcrumb> = new_breadcrumbs
        .iter()
        .map(|b| DbNewBreadcrumb {
            product_id,
            name: &b.name,
            href: &b.href,
        })
        .collect();

    diesel::insert_into(breadcrumbs::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn insert_variants(
    conn: &mut SqliteConnection,
    product_id: &str,
    new_variants: &[NewVariant],
) -> RepositoryResult<()> {
    use crate::schema::{images, variants};

    for variant in new_variants {
        let variant_id: i32 = diesel::insert_into(variants::table)
            .values(DbNewVariant {
                product_id,
                name: variant.name.as_deref(),
            })
            .returning(variants::id)
            .get_result(conn)?;

        if variant.images.is_empty() {
            continue;
        }

        let rows: Vec<DbNewImage> = variant
            .images
            .iter()
            .map(|image| DbNewImage {
                variant_id,
                src: &image.src,
                alt: &image.alt,
            })
            .collect();

        diesel::insert_into(images::table)
            .values(&rows)
            .execute(conn)?;
    }

    Ok(())
}

/// Images reference variants, so they go first.
fn delete_variants(conn: &mut SqliteConnection, product_id: &str) -> RepositoryResult<()> {
    use crate::schema::{images, variants};

    diesel::delete(
        images::table.filter(
            images::variant_id.eq_any(
                variants::table
                    .filter(variants::product_id.eq(product_id))
                    .select(variants::id),
            ),
        ),
    )
    .execute(conn)?;

    diesel::delete(variants::table.filter(variants::product_id.eq(product_id))).execute(conn)?;

    Ok(())
}

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let rows = products::table
            .select(DbProduct::as_select())
            .order((products::name.asc(), products::id.asc()))
            .load(&mut conn)?;

        load_aggregates(&mut conn, rows)
    }

    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        load_product(&mut conn, id.as_str())
    }

    fn count_products_in_category(&self, category_id: &CategoryId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let total = products::table
            .filter(products::category_id.eq(category_id.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            diesel::insert_into(products::table)
                .values(DbNewProduct::from(product))
                .execute(conn)?;

            insert_breadcrumbs(conn, product.id.as_str(), &product.breadcrumbs)?;
            insert_variants(conn, product.id.as_str(), &product.variants)?;

            load_product(conn, product.id.as_str())?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(&self, id: &ProductId, update: &ProductUpdate) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            let existing = products::table
                .find(id.as_str())
                .count()
                .get_result::<i64>(conn)?;
            if existing == 0 {
                return Err(RepositoryError::NotFound);
            }

            delete_variants(conn, id.as_str())?;

            diesel::update(products::table.find(id.as_str()))
                .set((
                    products::name.eq(update.name.as_str()),
                    products::price.eq(update.price.as_str()),
                    products::description.eq(&update.description),
                    products::category_id.eq(update.category_id.as_str()),
                    products::updated_at.eq(update.updated_at),
                ))
                .execute(conn)?;

            insert_variants(conn, id.as_str(), &update.variants)?;

            load_product(conn, id.as_str())?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, id: &ProductId) -> RepositoryResult<usize> {
        use crate::schema::{breadcrumbs, products};

        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            delete_variants(conn, id.as_str())?;

            diesel::delete(breadcrumbs::table.filter(breadcrumbs::product_id.eq(id.as_str())))
                .execute(conn)?;

            let affected = diesel::delete(products::table.find(id.as_str())).execute(conn)?;
            Ok(affected)
        })
    }
}
