//! Seller dashboard under `/seller-dashboard`.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, internal_error, not_found, redirect, render_template, sign_in_prompt,
};
use crate::services::ServiceError;
use crate::services::admin::{
    ProductFormOutcome, ProductFormPage, delete_product as delete_product_service,
    edit_product_form, new_product_form, show_dashboard, show_products, submit_product_form,
};

const PRODUCTS_URL: &str = "/seller-dashboard/products";

/// Responses shared by every dashboard page for errors it cannot render.
fn error_response(
    err: ServiceError,
    user: Option<&AuthenticatedUser>,
    tera: &Tera,
    config: &ServerConfig,
    back_to: &str,
) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => sign_in_prompt(tera, config),
        ServiceError::NotFound => not_found(tera, user, config),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back_to)
        }
        ServiceError::Internal => internal_error(),
    }
}

fn render_form(
    page: &ProductFormPage,
    user: Option<&AuthenticatedUser>,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
    config: &ServerConfig,
) -> HttpResponse {
    let mut context = base_context(flash_messages, user, "product_form", config);
    context.insert("page", page);
    render_template(tera, "admin/product_form.html", &context)
}

fn handle_submission(
    outcome: Result<ProductFormOutcome, ServiceError>,
    user: Option<&AuthenticatedUser>,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
    config: &ServerConfig,
    back_to: &str,
) -> HttpResponse {
    match outcome {
        Ok(ProductFormOutcome::Saved(product)) => {
            FlashMessage::success(format!("Product \"{}\" saved.", product.name)).send();
            redirect(PRODUCTS_URL)
        }
        Ok(ProductFormOutcome::Render(page)) => {
            render_form(&page, user, flash_messages, tera, config)
        }
        Err(err) => error_response(err, user, tera, config, back_to),
    }
}

#[get("")]
pub async fn dashboard(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_dashboard(user.as_ref()) {
        Ok(admin) => {
            let context = base_context(&flash_messages, Some(admin), "dashboard", &config);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(err) => error_response(err, user.as_ref(), &tera, &config, "/"),
    }
}

#[get("/products")]
pub async fn products(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_products(user.as_ref(), repo.get_ref()) {
        Ok(rows) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "products", &config);
            context.insert("products", &rows);
            render_template(&tera, "admin/products.html", &context)
        }
        Err(err) => error_response(err, user.as_ref(), &tera, &config, "/seller-dashboard"),
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match delete_product_service(user.as_ref(), &product_id, repo.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect(PRODUCTS_URL)
        }
        Err(ServiceError::NotFound) if user.as_ref().is_some_and(AuthenticatedUser::is_admin) => {
            FlashMessage::error("Product not found.").send();
            redirect(PRODUCTS_URL)
        }
        Err(err) => error_response(err, user.as_ref(), &tera, &config, PRODUCTS_URL),
    }
}

#[get("/add-product")]
pub async fn new_product(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match new_product_form(user.as_ref(), repo.get_ref()) {
        Ok(page) => render_form(&page, user.as_ref(), &flash_messages, &tera, &config),
        Err(err) => error_response(err, user.as_ref(), &tera, &config, PRODUCTS_URL),
    }
}

#[post("/add-product")]
pub async fn submit_new_product(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(fields): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let outcome = submit_product_form(user.as_ref(), None, fields, repo.get_ref());
    handle_submission(
        outcome,
        user.as_ref(),
        &flash_messages,
        &tera,
        &config,
        "/seller-dashboard/add-product",
    )
}

#[get("/edit-product/{product_id}")]
pub async fn edit_product(
    product_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match edit_product_form(user.as_ref(), &product_id, repo.get_ref()) {
        Ok(page) => render_form(&page, user.as_ref(), &flash_messages, &tera, &config),
        Err(err) => error_response(err, user.as_ref(), &tera, &config, PRODUCTS_URL),
    }
}

#[post("/edit-product/{product_id}")]
pub async fn submit_edit_product(
    product_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(fields): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let outcome = submit_product_form(user.as_ref(), Some(product_id.as_str()), fields, repo.get_ref());
    let back_to = format!("/seller-dashboard/edit-product/{product_id}");
    handle_submission(
        outcome,
        user.as_ref(),
        &flash_messages,
        &tera,
        &config,
        &back_to,
    )
}
