use actix_web::{HttpResponse, Responder, get, web};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{internal_error, not_found, page_context, render_template};
use crate::services::ServiceError;
use crate::services::storefront::{show_product, show_shop};

fn render_shop(
    user: Option<&AuthenticatedUser>,
    repo: &DieselRepository,
    config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match show_shop(repo) {
        Ok(cards) => {
            let mut context = page_context(user, "shop", config);
            context.insert("products", &cards);
            render_template(tera, "shop/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render shop page: {err}");
            internal_error()
        }
    }
}

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_shop(user.as_ref(), &repo, &config, &tera)
}

#[get("/shop")]
pub async fn shop(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_shop(user.as_ref(), &repo, &config, &tera)
}

#[get("/shop/{product_id}")]
pub async fn product(
    product_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_product(&product_id, &config.currency_code, repo.get_ref()) {
        Ok(page) => {
            let mut context = page_context(user.as_ref(), "product", &config);
            context.insert("title", &format!("{} | {}", page.name, config.store_name));
            context.insert("product", &page);
            render_template(&tera, "shop/product.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(&tera, user.as_ref(), &config),
        Err(err) => {
            log::error!("Failed to render product page: {err}");
            internal_error()
        }
    }
}
