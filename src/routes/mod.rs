use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde_json::json;
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;

pub mod admin;
pub mod api;
pub mod shop;

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Values every page template relies on.
pub fn page_context(
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    config: &ServerConfig,
) -> Context {
    let mut context = Context::new();
    context.insert("current_user", &user);
    context.insert("is_admin", &user.is_some_and(AuthenticatedUser::is_admin));
    context.insert("current_page", current_page);
    context.insert("store_name", &config.store_name);
    context.insert("currency_symbol", &config.currency_symbol);
    context.insert("sign_in_url", &config.sign_in_url);
    context.insert("alerts", &Vec::<(String, &str)>::new());
    context
}

/// [`page_context`] plus pending flash messages.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    config: &ServerConfig,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = page_context(user, current_page, config);
    context.insert("alerts", &alerts);
    context
}

pub fn not_found(tera: &Tera, user: Option<&AuthenticatedUser>, config: &ServerConfig) -> HttpResponse {
    let context = page_context(user, "not_found", config);
    match tera.render("errors/not_found.html", &context) {
        Ok(body) => HttpResponse::NotFound().body(body),
        Err(e) => {
            log::error!("Failed to render not found page: {e}");
            HttpResponse::NotFound().finish()
        }
    }
}

/// Shown instead of a dashboard page when nobody is signed in.
pub fn sign_in_prompt(tera: &Tera, config: &ServerConfig) -> HttpResponse {
    let context = page_context(None, "sign_in", config);
    render_template(tera, "admin/sign_in.html", &context)
}

pub fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().finish()
}

async fn fallback(
    user: Option<AuthenticatedUser>,
    tera: web::Data<Tera>,
    config: web::Data<ServerConfig>,
) -> HttpResponse {
    not_found(&tera, user.as_ref(), &config)
}

/// Malformed JSON bodies answer `400 {"error": ...}` like every other API failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    })
}

/// Register every route. Shared state (`DieselRepository`, `ServerConfig`,
/// `Tera`) is expected as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(api::list_products)
            .service(api::create_product)
            .service(api::get_product)
            .service(api::update_product)
            .service(api::delete_product)
            .service(api::list_categories)
            .service(api::create_category)
            .service(api::delete_category),
    )
    .service(
        web::scope("/seller-dashboard")
            .service(admin::dashboard)
            .service(admin::products)
            .service(admin::delete_product)
            .service(admin::new_product)
            .service(admin::submit_new_product)
            .service(admin::edit_product)
            .service(admin::submit_edit_product),
    )
    .service(shop::index)
    .service(shop::shop)
    .service(shop::product)
    .default_service(web::to(fallback));
}
