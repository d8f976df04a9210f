//! Catalog JSON API under `/api`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::dto::products::{CreateProductRequest, ProductDto, UpdateProductRequest};
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, categories, products};

fn error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message.into() }))
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    error(StatusCode::BAD_REQUEST, message)
}

fn not_found(message: &str) -> HttpResponse {
    error(StatusCode::NOT_FOUND, message)
}

fn server_error(message: &str) -> HttpResponse {
    error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::list_products(repo.get_ref()) {
        Ok(items) => {
            HttpResponse::Ok().json(items.into_iter().map(ProductDto::from).collect::<Vec<_>>())
        }
        Err(_) => server_error("Failed to fetch products"),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<CreateProductRequest>,
) -> impl Responder {
    let payload: CreateProductPayload = match request.try_into() {
        Ok(payload) => payload,
        Err(e) => return bad_request(ServiceError::from(e).to_string()),
    };

    match products::create_product(payload, repo.get_ref()) {
        Ok(product) => HttpResponse::Created().json(ProductDto::from(product)),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            bad_request(message)
        }
        Err(_) => server_error("Failed to create product"),
    }
}

#[get("/products/{product_id}")]
pub async fn get_product(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product(&product_id, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(ServiceError::NotFound) => not_found("Product not found"),
        Err(_) => server_error("Failed to fetch product"),
    }
}

#[put("/products/{product_id}")]
pub async fn update_product(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(request): web::Json<UpdateProductRequest>,
) -> impl Responder {
    let payload: UpdateProductPayload = match request.try_into() {
        Ok(payload) => payload,
        Err(e) => return bad_request(ServiceError::from(e).to_string()),
    };

    match products::update_product(&product_id, payload, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(ServiceError::NotFound) => not_found("Product not found"),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            bad_request(message)
        }
        Err(_) => server_error("Failed to update product"),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::delete_product(&product_id, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })),
        Err(ServiceError::NotFound) => not_found("Product not found"),
        Err(_) => server_error("Failed to delete product"),
    }
}

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match categories::list_categories(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(_) => server_error("Failed to fetch categories"),
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return bad_request(ServiceError::from(e).to_string()),
    };

    match categories::create_category(payload, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            bad_request(message)
        }
        Err(_) => server_error("Failed to create category"),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::delete_category(&category_id, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Category deleted successfully" })),
        Err(ServiceError::NotFound) => not_found("Category not found"),
        Err(ServiceError::Form(message)) => bad_request(message),
        Err(_) => server_error("Failed to delete category"),
    }
}
