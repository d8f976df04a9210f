use actix_identity::{Identity, IdentityMiddleware};
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use serde_json::{Value, json};
use tera::Tera;
use vam_storefront::ADMIN_ROLE;
use vam_storefront::dto::products::ProductDto;
use vam_storefront::models::config::ServerConfig;
use vam_storefront::repository::{CategoryWriter, DieselRepository};
use vam_storefront::routes;

mod common;

fn server_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        address: "127.0.0.1".into(),
        port: 0,
        secret: String::new(),
        sign_in_url: "https://accounts.example.com/sign-in".into(),
        store_name: "VAM Enterprises".into(),
        currency_code: "INR".into(),
        currency_symbol: "₹".into(),
        templates_dir: "templates/**/*".into(),
    }
}

/// Stores the posted profile as the session identity, as the identity
/// provider would.
async fn sign_in_as(req: HttpRequest, profile: web::Json<Value>) -> HttpResponse {
    Identity::login(&req.extensions(), profile.to_string()).unwrap();
    HttpResponse::Ok().finish()
}

async fn init_app(
    repo: DieselRepository,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    let key = Key::generate();
    let config = server_config();
    let tera = Tera::new(&config.templates_dir).expect("templates should parse");
    let message_store = CookieMessageStore::builder(key.clone()).build();

    test::init_service(
        App::new()
            .wrap(FlashMessagesFramework::builder(message_store).build())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key)
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(tera))
            .route("/test/sign-in", web::post().to(sign_in_as))
            .configure(routes::configure),
    )
    .await
}

fn mug_request() -> Value {
    json!({
        "name": "Mug",
        "price": "299",
        "href": "/mug",
        "description": "d",
        "details": "x",
        "highlights": ["h1"],
        "breadcrumbs": [{"name": "Home", "href": "/"}],
        "variants": [{"name": "#ff0000", "images": [{"src": "http://x/1.png", "alt": "a"}]}]
    })
}

#[actix_web::test]
async fn create_then_fetch_returns_identical_aggregate() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(mug_request())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ProductDto = test::read_body_json(resp).await;

    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Mug");
    assert_eq!(created.highlights, vec!["h1".to_string()]);
    assert_eq!(created.breadcrumbs[0].product_id, created.id);
    assert_eq!(created.variants[0].name.as_deref(), Some("#ff0000"));
    assert_eq!(created.variants[0].images[0].variant_id, created.variants[0].id);
    assert_eq!(created.category_id, None);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", created.id))
        .to_request();
    let fetched: ProductDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: Vec<ProductDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, vec![created]);
}

#[actix_web::test]
async fn create_with_unknown_category_is_rejected() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let mut body = mug_request();
    body["categoryId"] = json!("nosuchcategory");
    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Category not found");
}

#[actix_web::test]
async fn malformed_json_is_a_client_error() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert!(error["error"].is_string());
}

#[actix_web::test]
async fn update_requires_category_and_leaves_product_untouched() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let category = repo
        .create_category(&common::new_category("kitchen", "Kitchen"))
        .unwrap();
    let app = init_app(repo).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(mug_request())
        .to_request();
    let created: ProductDto = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/products/{}", created.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"name": "Big Mug", "price": "399", "description": "d2", "variants": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Category ID is required");

    let req = test::TestRequest::get().uri(&uri).to_request();
    let unchanged: ProductDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(unchanged, created);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "name": "Big Mug",
            "price": "399",
            "description": "d2",
            "categoryId": category.id.as_str(),
            "variants": [{"name": "Blue", "images": []}, {"images": [{"src": "http://x/2.png", "alt": ""}]}]
        }))
        .to_request();
    let updated: ProductDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.name, "Big Mug");
    assert_eq!(updated.category.as_ref().map(|c| c.name.as_str()), Some("Kitchen"));
    assert_eq!(updated.variants.len(), 2);
    assert_eq!(updated.variants[1].name, None);
    assert_eq!(updated.href, "/mug");
}

#[actix_web::test]
async fn update_of_missing_product_is_not_found() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    repo.create_category(&common::new_category("kitchen", "Kitchen"))
        .unwrap();
    let app = init_app(repo).await;

    let req = test::TestRequest::put()
        .uri("/api/products/missing")
        .set_json(json!({"name": "Mug", "price": "1", "categoryId": "kitchen"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleted_product_is_gone() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(mug_request())
        .to_request();
    let created: ProductDto = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/products/{}", created.id);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Product deleted successfully");

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Product not found");

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn category_endpoints() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Kitchen"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(resp).await;
    let category_id = category["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .set_json(json!({"name": "Kitchen"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut body = mug_request();
    body["categoryId"] = json!(category_id);
    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(body)
        .to_request();
    let product: ProductDto = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{category_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", product.id))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{category_id}"))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let categories: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(categories.is_empty());
}

#[actix_web::test]
async fn storefront_pages_render() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(mug_request())
        .to_request();
    let created: ProductDto = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/shop").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(&format!("/shop/{}", created.id)));

    let req = test::TestRequest::get()
        .uri(&format!("/shop/{}", created.id))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Mug | VAM Enterprises"));
    assert!(html.contains("application/ld+json"));
    assert!(html.contains("background-color: #ff0000"));
    assert!(html.contains("class=\"thumbnails\""));

    let req = test::TestRequest::get().uri("/shop/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

async fn session_cookie<S, B>(app: &S, role: Option<&str>) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/test/sign-in")
        .set_json(json!({
            "sub": "user_1",
            "email": "seller@example.com",
            "public_metadata": {"role": role}
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success());
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .expect("session cookie should be set")
        .into_owned()
}

#[actix_web::test]
async fn dashboard_is_gated_by_admin_role() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;

    let req = test::TestRequest::get().uri("/seller-dashboard/products").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("accounts.example.com"));

    let customer = session_cookie(&app, Some("customer")).await;
    let req = test::TestRequest::get()
        .uri("/seller-dashboard/products")
        .cookie(customer)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let admin = session_cookie(&app, Some(ADMIN_ROLE)).await;
    let req = test::TestRequest::get()
        .uri("/seller-dashboard/products")
        .cookie(admin)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("No products yet."));
}

#[actix_web::test]
async fn admin_form_round_trip_creates_product() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;
    let admin = session_cookie(&app, Some(ADMIN_ROLE)).await;

    let req = test::TestRequest::post()
        .uri("/seller-dashboard/add-product")
        .cookie(admin.clone())
        .set_form(vec![
            ("name", "Lamp"),
            ("price", "1499"),
            ("href", "/lamp"),
            ("description", "Brass desk lamp"),
            ("details", "E27 bulb"),
            ("category_id", ""),
            ("variants[0][name]", "Brass"),
            ("variants[0][images][0][src]", "http://x/lamp.png"),
            ("variants[0][images][0][alt]", ""),
            ("op", "add_image:0"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("variants[0][images][1][src]"));

    let req = test::TestRequest::post()
        .uri("/seller-dashboard/add-product")
        .cookie(admin)
        .set_form(vec![
            ("name", "Lamp"),
            ("price", "1499"),
            ("href", "/lamp"),
            ("description", "Brass desk lamp"),
            ("details", "E27 bulb"),
            ("category_id", ""),
            ("variants[0][name]", "Brass"),
            ("variants[0][images][0][src]", "http://x/lamp.png"),
            ("variants[0][images][0][alt]", ""),
            ("variants[0][images][1][src]", ""),
            ("variants[0][images][1][alt]", ""),
            ("op", "save"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: Vec<ProductDto> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].variants[0].images.len(), 1);
}

#[actix_web::test]
async fn product_names_stay_out_of_inline_scripts() {
    let test_db = common::TestDb::new();
    let app = init_app(DieselRepository::new(test_db.pool())).await;
    let admin = session_cookie(&app, Some(ADMIN_ROLE)).await;

    let hostile = "x');alert(document.domain);//";
    let mut body = mug_request();
    body["name"] = json!(hostile);
    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/seller-dashboard/products")
        .cookie(admin)
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();

    assert!(html.contains("x&#x27;);alert(document.domain);"));
    assert_eq!(html.matches("onsubmit=").count(), 1);
    for handler in html.split("onsubmit=\"").skip(1) {
        let handler = handler.split('"').next().unwrap_or_default();
        assert_eq!(handler, "return confirm('Delete this product?');");
    }
}
