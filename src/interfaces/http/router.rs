//! HTTP router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CatalogService, ItemForm};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{api, health, items, listing};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "Media Catalog", description = "Books, CDs, DVDs and board games"),
    paths(
        // Health
        health::health_check,
        // Items
        items::home,
        items::item_detail,
        items::new_item_choices,
        items::create_item,
        items::edit_item,
        items::delete_item,
        // Listing
        listing::list_by_type,
        // API
        api::list_items,
        api::create_item,
        api::get_item,
        api::delete_item,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            items::ItemDto,
            items::TypeLink,
            items::HomeResponse,
            items::NewItemChoices,
            ItemForm,
            listing::ListingResponse,
            listing::PageLinks,
            api::CreateItemRequest,
            api::CreatedItemResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Items", description = "Item pages and form submissions"),
        (name = "Listing", description = "Cursor-paginated listings per type"),
        (name = "API", description = "JSON item API"),
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the running service
pub struct RouterState {
    pub catalog: Arc<CatalogService>,
    /// Pinged by `/health`; `None` for the in-memory store
    pub db: Option<DatabaseConnection>,
    pub metrics: PrometheusHandle,
}

/// Build the full HTTP router
pub fn create_router(state: RouterState) -> Router {
    let catalog_state = items::CatalogState {
        catalog: state.catalog,
    };

    let item_routes = Router::new()
        .route("/", get(items::home))
        .route("/items/new", get(items::new_item_choices))
        .route("/items/new/{item_type}", post(items::create_item))
        .route("/items/type/{item_type}", get(listing::list_by_type))
        .route("/items/{id}", get(items::item_detail))
        .route("/items/{id}/edit", post(items::edit_item))
        .route("/items/{id}/delete", post(items::delete_item))
        .with_state(catalog_state.clone());

    let api_routes = Router::new()
        .route("/items", get(api::list_items).post(api::create_item))
        .route("/items/{id}", get(api::get_item).delete(api::delete_item))
        .with_state(catalog_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: state.db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: state.metrics,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(item_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api", api_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::storage::InMemoryItemRepository;

    fn app(page_size: u64) -> Router {
        let catalog = CatalogService::new(Arc::new(InMemoryItemRepository::new()), page_size);
        create_router(RouterState {
            catalog: Arc::new(catalog),
            db: None,
            metrics: PrometheusBuilder::new().build_recorder().handle(),
        })
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_books(app: &Router, count: usize) {
        for n in 1..=count {
            let resp = send(app, post_json("/api/items", json!({"title": format!("Book {n:02}")}))).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }
    }

    #[tokio::test]
    async fn api_create_defaults_to_untitled_book() {
        let app = app(10);
        let resp = send(&app, post_json("/api/items", json!({"authors": ["Ann"]}))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        assert_eq!(body["type"], "book");
        assert_eq!(body["title"], "Untitled");
        assert_eq!(body["authors"], json!(["Ann"]));
        assert_eq!(body["genres"], json!([]));
    }

    #[tokio::test]
    async fn api_create_accepts_game_alias() {
        let app = app(10);
        let resp = send(
            &app,
            post_json("/api/items", json!({"type": "Game", "title": "Catan", "min_players": 3})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(json_body(resp).await["type"], "board_game");
    }

    #[tokio::test]
    async fn api_create_rejects_unknown_type() {
        let app = app(10);
        let resp = send(&app, post_json("/api/items", json!({"type": "vinyl"}))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "unknown type");
    }

    #[tokio::test]
    async fn api_create_rejects_invalid_url() {
        let app = app(10);
        let resp = send(&app, post_json("/api/items", json!({"image_url": "nope"}))).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn api_list_get_and_delete() {
        let app = app(10);
        send(
            &app,
            post_json(
                "/api/items",
                json!({"type": "cd", "title": "Blue Train", "artist": "John Coltrane", "track_list": ["Blue Train"]}),
            ),
        )
        .await;

        let list = json_body(send(&app, get("/api/items")).await).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["primary_artist"], "John Coltrane");
        assert_eq!(list[0]["track_list"], json!(["Blue Train"]));

        let id = list[0]["id"].as_i64().unwrap();
        let resp = send(&app, get(&format!("/api/items/{id}"))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/items/{id}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, delete).await.status(), StatusCode::NO_CONTENT);

        let resp = send(&app, get(&format!("/api/items/{id}"))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(resp).await["success"], false);
    }

    #[tokio::test]
    async fn listing_pages_forward_and_back() {
        let app = app(10);
        create_books(&app, 25).await;

        let p1 = json_body(send(&app, get("/items/type/book")).await).await;
        assert_eq!(p1["items"].as_array().unwrap().len(), 10);
        assert_eq!(p1["items"][0]["id"], 1);
        assert_eq!(p1["has_next"], true);
        assert_eq!(p1["has_prev"], false);
        assert_eq!(p1["total"], 25);
        assert_eq!(p1["type_label"], "Book");
        assert!(p1["links"]["prev"].is_null());

        let next = p1["links"]["next"].as_str().unwrap().to_string();
        let p2 = json_body(send(&app, get(&next)).await).await;
        assert_eq!(p2["items"][0]["id"], 11);
        assert_eq!(p2["has_prev"], true);

        let prev = p2["links"]["prev"].as_str().unwrap().to_string();
        let back = json_body(send(&app, get(&prev)).await).await;
        assert_eq!(back["items"], p1["items"]);
        assert_eq!(back["has_prev"], false);
    }

    #[tokio::test]
    async fn listing_by_title_desc_echoes_parameters() {
        let app = app(2);
        create_books(&app, 3).await;

        let page = json_body(send(&app, get("/items/type/BOOK?sort=title&order=desc")).await).await;
        assert_eq!(page["sort"], "title");
        assert_eq!(page["order"], "desc");
        assert_eq!(page["route_param"], "BOOK");
        assert_eq!(page["items"][0]["title"], "Book 03");
        assert!(page["links"]["next"]
            .as_str()
            .unwrap()
            .starts_with("/items/type/BOOK?sort=title&order=desc&cursor="));
    }

    #[tokio::test]
    async fn listing_rejects_garbage_cursor() {
        let app = app(10);
        create_books(&app, 1).await;
        let resp = send(&app, get("/items/type/book?cursor=garbage&direction=next")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn listing_of_unknown_type_is_empty() {
        let app = app(10);
        create_books(&app, 2).await;
        let resp = send(&app, get("/items/type/vinyl")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let page = json_body(resp).await;
        assert_eq!(page["items"], json!([]));
        assert_eq!(page["total"], 0);
        assert!(page["next_cursor"].is_null());
    }

    #[tokio::test]
    async fn form_create_edit_delete_flow() {
        let app = app(10);

        let resp = send(
            &app,
            post_form(
                "/items/new/boardgame",
                "title=Azul&author=Michael+Kiesling&min_players=2&max_players=4&authors=michael+kiesling%2C+Michael+Kiesling",
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert_eq!(location, "/items/1");

        let item = json_body(send(&app, get(&location)).await).await;
        assert_eq!(item["type"], "board_game");
        assert_eq!(item["author_note"], "Michael Kiesling");
        assert_eq!(item["authors"], json!(["Michael Kiesling"]));

        let resp = send(&app, post_form("/items/1/edit", "title=&max_players=5&genres=abstract")).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let item = json_body(send(&app, get("/items/1")).await).await;
        assert_eq!(item["title"], "Azul");
        assert_eq!(item["min_players"], 2);
        assert_eq!(item["max_players"], 5);
        assert_eq!(item["authors"], json!([]));
        assert_eq!(item["genres"], json!(["Abstract"]));

        let resp = send(&app, post_form("/items/1/delete", "")).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        assert_eq!(send(&app, get("/items/1")).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn form_with_unknown_type_or_bad_number_is_rejected() {
        let app = app(10);
        let resp = send(&app, post_form("/items/new/vinyl", "title=x")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(&app, post_form("/items/new/book", "title=x&length=long")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn home_and_new_pages() {
        let app = app(2);
        create_books(&app, 3).await;

        let home = json_body(send(&app, get("/")).await).await;
        let recent: Vec<i64> = home["recent"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["id"].as_i64().unwrap())
            .collect();
        assert_eq!(recent, vec![3, 2]);
        assert_eq!(home["types"].as_array().unwrap().len(), 4);

        let choices = json_body(send(&app, get("/items/new")).await).await;
        assert_eq!(choices["types"][3]["new_url"], "/items/new/board_game");
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        let app = app(10);
        let resp = send(&app, get("/health")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        assert_eq!(json_body(resp).await["database"]["status"], "memory");

        let resp = send(&app, get("/metrics")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/items/type/{item_type}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/items"));

        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("ItemForm"));
        assert!(schemas.contains_key("ListingResponse"));
    }
}
