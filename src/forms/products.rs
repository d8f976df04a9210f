use std::str::FromStr;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewBreadcrumb, NewImage, NewProduct, NewVariant, Product, ProductUpdate};
use crate::domain::types::{CategoryId, ProductId, ProductName, ProductPrice, TypeConstraintError};

/// Upper bound on any list index accepted from a submitted form.
pub const MAX_FORM_ROWS: usize = 100;

/// Whether the product form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreadcrumbFields {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageFields {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantFields {
    pub name: String,
    pub images: Vec<ImageFields>,
}

impl VariantFields {
    fn blank() -> Self {
        Self {
            name: String::new(),
            images: vec![ImageFields::default()],
        }
    }

    /// Blank name becomes `None`; image rows without a source are dropped.
    fn into_new_variant(self) -> NewVariant {
        let name = self.name.trim();
        NewVariant {
            name: (!name.is_empty()).then(|| name.to_string()),
            images: self
                .images
                .into_iter()
                .filter(|image| !image.src.trim().is_empty())
                .map(|image| NewImage {
                    src: image.src.trim().to_string(),
                    alt: image.alt.trim().to_string(),
                })
                .collect(),
        }
    }
}

/// In-progress state of the add/edit product form.
///
/// The whole form is re-posted on every list edit so nothing is kept on the
/// server between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ProductFormData {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
    pub href: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub details: String,
    pub category_id: String,
    pub highlights: Vec<String>,
    pub breadcrumbs: Vec<BreadcrumbFields>,
    pub variants: Vec<VariantFields>,
}

impl Default for ProductFormData {
    fn default() -> Self {
        Self::blank()
    }
}

impl ProductFormData {
    /// Empty form with one blank row in every list.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            href: String::new(),
            description: String::new(),
            details: String::new(),
            category_id: String::new(),
            highlights: vec![String::new()],
            breadcrumbs: vec![BreadcrumbFields::default()],
            variants: vec![VariantFields::blank()],
        }
    }

    /// Pre-fill the form from a stored product for editing.
    pub fn from_product(product: &Product) -> Self {
        let variants = product
            .variants
            .iter()
            .map(|variant| {
                let mut images: Vec<ImageFields> = variant
                    .images
                    .iter()
                    .map(|image| ImageFields {
                        src: image.src.clone(),
                        alt: image.alt.clone(),
                    })
                    .collect();
                if images.is_empty() {
                    images.push(ImageFields::default());
                }
                VariantFields {
                    name: variant.name.clone().unwrap_or_default(),
                    images,
                }
            })
            .collect();

        Self {
            name: product.name.as_str().to_string(),
            price: product.price.as_str().to_string(),
            href: product.href.clone(),
            description: product.description.clone(),
            details: product.details.clone(),
            category_id: product
                .category_id
                .as_ref()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
            highlights: product.highlights.clone(),
            breadcrumbs: product
                .breadcrumbs
                .iter()
                .map(|b| BreadcrumbFields {
                    name: b.name.clone(),
                    href: b.href.clone(),
                })
                .collect(),
            variants,
        }
    }

    /// Apply a list edit in place. Out-of-range indices leave the form unchanged.
    pub fn apply(&mut self, op: &FormOp) {
        match *op {
            FormOp::AddHighlight => self.highlights.push(String::new()),
            FormOp::RemoveHighlight(index) => remove_at(&mut self.highlights, index),
            FormOp::AddBreadcrumb => self.breadcrumbs.push(BreadcrumbFields::default()),
            FormOp::RemoveBreadcrumb(index) => remove_at(&mut self.breadcrumbs, index),
            FormOp::AddVariant => self.variants.push(VariantFields::blank()),
            FormOp::RemoveVariant(index) => remove_at(&mut self.variants, index),
            FormOp::AddImage(variant) => {
                if let Some(variant) = self.variants.get_mut(variant) {
                    variant.images.push(ImageFields::default());
                }
            }
            FormOp::RemoveImage(variant, image) => {
                if let Some(variant) = self.variants.get_mut(variant) {
                    remove_at(&mut variant.images, image);
                }
            }
            FormOp::Save | FormOp::CreateCategory => {}
        }
    }

    fn set_field(&mut self, key: &str, value: String) -> Result<(), ProductFormError> {
        let (base, segments) =
            split_field_key(key).ok_or_else(|| ProductFormError::InvalidField(key.to_string()))?;

        match (base, segments.as_slice()) {
            ("name", []) => self.name = value,
            ("price", []) => self.price = value,
            ("href", []) => self.href = value,
            ("description", []) => self.description = value,
            ("details", []) => self.details = value,
            ("category_id", []) => self.category_id = value,
            ("highlights", [i]) => *slot(&mut self.highlights, parse_index(i)?)? = value,
            ("breadcrumbs", [i, "name"]) => {
                slot(&mut self.breadcrumbs, parse_index(i)?)?.name = value
            }
            ("breadcrumbs", [i, "href"]) => {
                slot(&mut self.breadcrumbs, parse_index(i)?)?.href = value
            }
            ("variants", [i, "name"]) => slot(&mut self.variants, parse_index(i)?)?.name = value,
            ("variants", [i, "images", j, field]) => {
                let variant = slot(&mut self.variants, parse_index(i)?)?;
                let image = slot(&mut variant.images, parse_index(j)?)?;
                match *field {
                    "src" => image.src = value,
                    "alt" => image.alt = value,
                    _ => return Err(ProductFormError::InvalidField(key.to_string())),
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Validate and convert into a payload for creating a product.
    pub fn into_create_payload(self) -> Result<CreateProductPayload, ProductFormError> {
        self.validate()?;
        require(&self.href, "Href")?;
        require(&self.details, "Details")?;

        let category_id = match self.category_id.trim() {
            "" => None,
            id => Some(CategoryId::new(id)?),
        };

        Ok(CreateProductPayload {
            name: ProductName::new(self.name)?,
            price: ProductPrice::new(self.price.trim()),
            href: self.href.trim().to_string(),
            description: self.description.trim().to_string(),
            details: self.details.trim().to_string(),
            highlights: self
                .highlights
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
            category_id,
            breadcrumbs: self
                .breadcrumbs
                .into_iter()
                .filter(|b| !b.name.trim().is_empty() || !b.href.trim().is_empty())
                .map(|b| NewBreadcrumb {
                    name: b.name.trim().to_string(),
                    href: b.href.trim().to_string(),
                })
                .collect(),
            variants: self
                .variants
                .into_iter()
                .map(VariantFields::into_new_variant)
                .collect(),
        })
    }

    /// Validate and convert into a payload for updating a product.
    ///
    /// Only the fields an update may change are read; a category is required.
    pub fn into_update_payload(self) -> Result<UpdateProductPayload, ProductFormError> {
        self.validate()?;
        require(&self.category_id, "Category")?;

        Ok(UpdateProductPayload {
            name: ProductName::new(self.name)?,
            price: ProductPrice::new(self.price.trim()),
            description: self.description.trim().to_string(),
            category_id: CategoryId::new(self.category_id)?,
            variants: self
                .variants
                .into_iter()
                .map(VariantFields::into_new_variant)
                .collect(),
        })
    }
}

/// Action requested by the button that submitted the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOp {
    Save,
    CreateCategory,
    AddHighlight,
    RemoveHighlight(usize),
    AddBreadcrumb,
    RemoveBreadcrumb(usize),
    AddVariant,
    RemoveVariant(usize),
    AddImage(usize),
    RemoveImage(usize, usize),
}

impl FromStr for FormOp {
    type Err = ProductFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let action = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let op = match (action, args.as_slice()) {
            ("save", []) => FormOp::Save,
            ("create_category", []) => FormOp::CreateCategory,
            ("add_highlight", []) => FormOp::AddHighlight,
            ("remove_highlight", [i]) => FormOp::RemoveHighlight(parse_index(i)?),
            ("add_breadcrumb", []) => FormOp::AddBreadcrumb,
            ("remove_breadcrumb", [i]) => FormOp::RemoveBreadcrumb(parse_index(i)?),
            ("add_variant", []) => FormOp::AddVariant,
            ("remove_variant", [i]) => FormOp::RemoveVariant(parse_index(i)?),
            ("add_image", [v]) => FormOp::AddImage(parse_index(v)?),
            ("remove_image", [v, i]) => FormOp::RemoveImage(parse_index(v)?, parse_index(i)?),
            _ => return Err(ProductFormError::UnknownOp(s.to_string())),
        };
        Ok(op)
    }
}

/// A decoded product form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormSubmission {
    pub form: ProductFormData,
    pub op: FormOp,
    /// Label typed into the inline "new category" box.
    pub new_category_name: String,
}

impl ProductFormSubmission {
    /// Decode `application/x-www-form-urlencoded` pairs using bracketed keys
    /// such as `variants[0][images][2][src]`. A missing `op` means save.
    pub fn from_fields(fields: Vec<(String, String)>) -> Result<Self, ProductFormError> {
        let mut form = ProductFormData {
            highlights: vec![],
            breadcrumbs: vec![],
            variants: vec![],
            ..ProductFormData::blank()
        };
        let mut op = FormOp::Save;
        let mut new_category_name = String::new();

        for (key, value) in fields {
            match key.as_str() {
                "op" => op = value.parse()?,
                "new_category_name" => new_category_name = value,
                _ => form.set_field(&key, value)?,
            }
        }

        Ok(Self {
            form,
            op,
            new_category_name,
        })
    }
}

/// Data accepted for creating a product with all of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductPayload {
    pub name: ProductName,
    pub price: ProductPrice,
    pub href: String,
    pub description: String,
    pub details: String,
    pub highlights: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub breadcrumbs: Vec<NewBreadcrumb>,
    pub variants: Vec<NewVariant>,
}

impl CreateProductPayload {
    /// Assign a fresh identifier and timestamps.
    pub fn into_new_product(self) -> NewProduct {
        let now = Utc::now().naive_utc();
        NewProduct {
            id: ProductId::generate(),
            name: self.name,
            price: self.price,
            href: self.href,
            description: self.description,
            details: self.details,
            highlights: self.highlights,
            category_id: self.category_id,
            breadcrumbs: self.breadcrumbs,
            variants: self.variants,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data accepted for updating a product; `variants` replaces the stored set.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductPayload {
    pub name: ProductName,
    pub price: ProductPrice,
    pub description: String,
    pub category_id: CategoryId,
    pub variants: Vec<NewVariant>,
}

impl UpdateProductPayload {
    pub fn into_product_update(self) -> ProductUpdate {
        ProductUpdate {
            name: self.name,
            price: self.price,
            description: self.description,
            category_id: self.category_id,
            variants: self.variants,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Unknown form action: {0}")]
    UnknownOp(String),
    #[error("Invalid form field: {0}")]
    InvalidField(String),
    #[error("Invalid row index: {0}")]
    InvalidIndex(String),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ProductFormError> {
    if value.trim().is_empty() {
        Err(ProductFormError::Missing(field))
    } else {
        Ok(())
    }
}

fn parse_index(raw: &str) -> Result<usize, ProductFormError> {
    match raw.parse::<usize>() {
        Ok(index) if index < MAX_FORM_ROWS => Ok(index),
        _ => Err(ProductFormError::InvalidIndex(raw.to_string())),
    }
}

/// Row at `index`, growing the list with blank rows when needed.
fn slot<T: Default>(items: &mut Vec<T>, index: usize) -> Result<&mut T, ProductFormError> {
    if index >= MAX_FORM_ROWS {
        return Err(ProductFormError::InvalidIndex(index.to_string()));
    }
    if items.len() <= index {
        items.resize_with(index + 1, T::default);
    }
    Ok(&mut items[index])
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

/// Split `variants[0][images][1][src]` into `("variants", ["0", "images", "1", "src"])`.
fn split_field_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let Some(open) = key.find('[') else {
        return Some((key, vec![]));
    };
    let (base, mut rest) = key.split_at(open);
    let mut segments = vec![];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some((base, segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::fixtures::sample_product;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn filled_form() -> ProductFormData {
        ProductFormData {
            name: "Mug".into(),
            price: "299".into(),
            href: "/mug".into(),
            description: "Stoneware".into(),
            details: "Hand wash".into(),
            category_id: "abc123".into(),
            ..ProductFormData::blank()
        }
    }

    #[test]
    fn parses_nested_fields_and_op() {
        let submission = ProductFormSubmission::from_fields(fields(&[
            ("name", "Mug"),
            ("highlights[0]", "350 ml"),
            ("breadcrumbs[1][href]", "/mugs"),
            ("variants[0][name]", "#ff0000"),
            ("variants[0][images][1][src]", "http://x/2.png"),
            ("op", "remove_image:0:0"),
        ]))
        .unwrap();

        assert_eq!(submission.op, FormOp::RemoveImage(0, 0));
        let form = submission.form;
        assert_eq!(form.name, "Mug");
        assert_eq!(form.highlights, vec!["350 ml".to_string()]);
        assert_eq!(form.breadcrumbs.len(), 2);
        assert_eq!(form.breadcrumbs[1].href, "/mugs");
        assert_eq!(form.variants[0].images.len(), 2);
        assert_eq!(form.variants[0].images[1].src, "http://x/2.png");
    }

    #[test]
    fn missing_op_means_save() {
        let submission = ProductFormSubmission::from_fields(fields(&[("name", "Mug")])).unwrap();
        assert_eq!(submission.op, FormOp::Save);
    }

    #[test]
    fn rejects_unknown_ops_and_huge_indices() {
        assert!("explode".parse::<FormOp>().is_err());
        assert!("remove_variant:x".parse::<FormOp>().is_err());
        assert!(
            ProductFormSubmission::from_fields(fields(&[("highlights[5000]", "x")])).is_err()
        );
    }

    #[test]
    fn list_edits_change_only_the_targeted_row() {
        let mut form = ProductFormData::blank();
        form.apply(&FormOp::AddVariant);
        form.apply(&FormOp::AddImage(1));
        form.variants[1].images[1].src = "keep".into();
        form.apply(&FormOp::RemoveImage(1, 0));

        assert_eq!(form.variants.len(), 2);
        assert_eq!(form.variants[0].images.len(), 1);
        assert_eq!(form.variants[1].images.len(), 1);
        assert_eq!(form.variants[1].images[0].src, "keep");
    }

    #[test]
    fn out_of_range_removals_are_ignored() {
        let mut form = ProductFormData::blank();
        let before = form.clone();
        form.apply(&FormOp::RemoveHighlight(3));
        form.apply(&FormOp::RemoveImage(7, 0));
        form.apply(&FormOp::AddImage(9));
        assert_eq!(form, before);
    }

    #[test]
    fn create_payload_drops_blank_rows() {
        let mut form = filled_form();
        form.highlights = vec!["  ".into(), "Dishwasher safe".into()];
        form.variants[0].images.push(ImageFields {
            src: "http://x/1.png".into(),
            alt: String::new(),
        });

        let payload = form.into_create_payload().unwrap();
        assert_eq!(payload.highlights, vec!["Dishwasher safe".to_string()]);
        assert!(payload.breadcrumbs.is_empty());
        assert_eq!(payload.variants.len(), 1);
        assert_eq!(payload.variants[0].name, None);
        assert_eq!(payload.variants[0].images.len(), 1);
        assert_eq!(payload.category_id.unwrap().as_str(), "abc123");
    }

    #[test]
    fn create_payload_requires_core_fields() {
        let mut form = filled_form();
        form.name.clear();
        assert!(matches!(
            form.into_create_payload(),
            Err(ProductFormError::Validation(_))
        ));

        let mut form = filled_form();
        form.details.clear();
        assert!(matches!(
            form.into_create_payload(),
            Err(ProductFormError::Missing("Details"))
        ));
    }

    #[test]
    fn update_payload_requires_category() {
        let mut form = filled_form();
        form.category_id.clear();
        assert!(matches!(
            form.into_update_payload(),
            Err(ProductFormError::Missing("Category"))
        ));
    }

    #[test]
    fn edit_form_mirrors_stored_product() {
        let mut product = sample_product("p1");
        product.variants[1].images.clear();

        let form = ProductFormData::from_product(&product);
        assert_eq!(form.name, "Mug");
        assert_eq!(form.variants.len(), 2);
        assert_eq!(form.variants[0].name, "#ff0000");
        assert_eq!(form.variants[0].images.len(), 2);
        assert_eq!(form.variants[1].images, vec![ImageFields::default()]);
        assert_eq!(form.breadcrumbs[0].href, "/");
    }
}
