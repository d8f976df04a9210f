//! View models for the public storefront pages.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::product::{Image, Product};
use crate::repository::ProductReader;

use super::products::{get_product, list_products};
use super::ServiceResult;

/// Characters of the description shown on a product card.
pub const EXCERPT_CHARS: usize = 50;
/// Images shown in the thumbnail strip of a product page.
pub const THUMBNAIL_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImage {
    pub id: i32,
    pub src: String,
    pub alt: String,
}

impl GalleryImage {
    fn from_image(image: &Image, product_name: &str) -> Self {
        let alt = if image.alt.trim().is_empty() {
            product_name.to_string()
        } else {
            image.alt.clone()
        };
        Self {
            id: image.id.get(),
            src: image.src.clone(),
            alt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: String,
    pub excerpt: String,
    pub image: Option<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbLink {
    pub name: String,
    /// `None` marks the current page.
    pub href: Option<String>,
}

/// A variant selector entry; `swatch` is set when the name is a hex colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantOption {
    pub id: i32,
    pub label: String,
    pub swatch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub details: String,
    pub highlights: Vec<String>,
    pub category: Option<String>,
    pub primary_image: Option<GalleryImage>,
    pub thumbnails: Vec<GalleryImage>,
    pub breadcrumbs: Vec<BreadcrumbLink>,
    pub variants: Vec<VariantOption>,
    /// Schema.org `Product` document, safe to embed in a `<script>` tag.
    pub json_ld: String,
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_colour(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// First [`EXCERPT_CHARS`] characters followed by an ellipsis when longer.
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn card(product: &Product) -> ProductCard {
    ProductCard {
        id: product.id.as_str().to_string(),
        name: product.name.as_str().to_string(),
        price: product.price.as_str().to_string(),
        excerpt: excerpt(&product.description),
        image: product
            .variants
            .first()
            .and_then(|variant| variant.images.first())
            .map(|image| GalleryImage::from_image(image, product.name.as_str())),
    }
}

fn breadcrumb_trail(product: &Product) -> Vec<BreadcrumbLink> {
    let mut trail: Vec<BreadcrumbLink> = if product.breadcrumbs.is_empty() {
        let mut fallback = vec![BreadcrumbLink {
            name: "Home".to_string(),
            href: Some("/".to_string()),
        }];
        if let Some(category) = &product.category {
            fallback.push(BreadcrumbLink {
                name: category.name.as_str().to_string(),
                href: Some("/shop".to_string()),
            });
        }
        fallback
    } else {
        product
            .breadcrumbs
            .iter()
            .map(|b| BreadcrumbLink {
                name: b.name.clone(),
                href: (!b.href.is_empty()).then(|| b.href.clone()),
            })
            .collect()
    };
    trail.push(BreadcrumbLink {
        name: product.name.as_str().to_string(),
        href: None,
    });
    trail
}

/// Schema.org metadata with `<` escaped so the document cannot close its
/// surrounding `<script>` element.
pub fn product_json_ld(product: &Product, images: &[GalleryImage], currency_code: &str) -> String {
    let mut document = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.name.as_str(),
        "description": product.description,
        "image": images.iter().map(|image| image.src.as_str()).collect::<Vec<_>>(),
        "offers": {
            "@type": "Offer",
            "price": product.price.numeric_part(),
            "priceCurrency": currency_code,
            "availability": "https://schema.org/InStock",
        },
    });
    if let (Some(category), Value::Object(map)) = (&product.category, &mut document) {
        map.insert(
            "category".to_string(),
            Value::String(category.name.as_str().to_string()),
        );
    }
    document.to_string().replace('<', "\\u003c")
}

/// Cards for the shop grid, in catalog order.
pub fn show_shop<R>(repo: &R) -> ServiceResult<Vec<ProductCard>>
where
    R: ProductReader,
{
    Ok(list_products(repo)?.iter().map(card).collect())
}

pub fn show_product<R>(product_id: &str, currency_code: &str, repo: &R) -> ServiceResult<ProductPage>
where
    R: ProductReader,
{
    let product = get_product(product_id, repo)?;

    let gallery: Vec<GalleryImage> = product
        .images()
        .map(|image| GalleryImage::from_image(image, product.name.as_str()))
        .collect();
    let json_ld = product_json_ld(&product, &gallery, currency_code);

    let variants = product
        .variants
        .iter()
        .map(|variant| {
            let name = variant.name.as_deref().map(str::trim).unwrap_or_default();
            let label = match name {
                "" => format!("Variant {}", variant.id),
                name => name.to_string(),
            };
            let swatch = is_hex_colour(name).then(|| name.to_string());
            VariantOption {
                id: variant.id.get(),
                label,
                swatch,
            }
        })
        .collect();

    Ok(ProductPage {
        id: product.id.as_str().to_string(),
        name: product.name.as_str().to_string(),
        price: product.price.as_str().to_string(),
        description: product.description.clone(),
        details: product.details.clone(),
        highlights: product.highlights.clone(),
        category: product
            .category
            .as_ref()
            .map(|category| category.name.as_str().to_string()),
        primary_image: gallery.first().cloned(),
        thumbnails: gallery.iter().take(THUMBNAIL_LIMIT).cloned().collect(),
        breadcrumbs: breadcrumb_trail(&product),
        variants,
        json_ld,
    })
}
