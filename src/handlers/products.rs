use crate::error::{parse_id, ApiError, ErrorResponse};
use crate::models::{NewProduct, Product, ProductQuery};
use crate::route_registry::ExampleTable;
use crate::routes;
use crate::routing::{self, TrackedRouter};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// GET /products handler - List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Invalid category id", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<(StatusCode, Json<Vec<Product>>), ApiError> {
    let category_id = query.category_id.as_deref().map(parse_id).transpose()?;
    let products = state.store.read(|catalog| catalog.products(category_id))?;
    Ok((StatusCode::OK, Json(products)))
}

/// POST /products handler - Add a product to the catalog
#[utoipa::path(
    post,
    path = "/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.store.write(|catalog| catalog.add_product(new))??;

    tracing::info!("Created product {} ({})", product.name, product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{id} handler - Fetch one product
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product UUID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let id = parse_id(&id_str)?;

    match state.store.read(|catalog| catalog.product(id).cloned())? {
        Some(product) => Ok((StatusCode::OK, Json(product))),
        None => {
            tracing::info!("Product not found with id: {}", id);
            Err(ApiError::ProductNotFound(id))
        }
    }
}

/// DELETE /products/{id} handler - Remove a product and its cart lines
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product UUID")
    ),
    responses(
        (status = 204, description = "Product removed"),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id_str)?;

    match state.store.write(|catalog| catalog.remove_product(id))? {
        Some(product) => {
            tracing::info!("Removed product {} ({})", product.name, id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::ProductNotFound(id)),
    }
}

pub fn router() -> TrackedRouter<AppState> {
    TrackedRouter::new()
        .route(
            routes::ROOT,
            routing::get(list_products_handler).post(create_product_handler),
        )
        .route(
            routes::ITEM,
            routing::get(get_product_handler).delete(delete_product_handler),
        )
}

pub fn examples() -> ExampleTable {
    ExampleTable::from([(
        "POST /products".to_string(),
        serde_json::json!({
            "name": "Desk lamp",
            "description": "Adjustable LED desk lamp",
            "price": 99.99,
            "stock": 25,
            "categoryId": null
        }),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{json_body, send, test_app};
    use axum::body::Body;
    use serde_json::json;
    use uuid::Uuid;

    async fn create_category(app: &axum::Router, name: &str) -> String {
        let (_, body) = send(app, "POST", "/categories", json_body(&json!({ "name": name }))).await;
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_product(app: &axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        send(app, "POST", "/products", json_body(&body)).await
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let app = test_app();

        let (status, created) =
            create_product(&app, json!({ "name": "Desk lamp", "price": 99.99, "stock": 3 })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["stock"], 3);

        let uri = format!("/products/{}", created["id"].as_str().unwrap());
        let (status, fetched) = send(&app, "GET", &uri, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Desk lamp");
        assert_eq!(fetched["price"], 99.99);
    }

    #[tokio::test]
    async fn test_list_products_by_category() {
        let app = test_app();
        let lighting = create_category(&app, "Lighting").await;

        create_product(&app, json!({ "name": "Lamp", "price": 10.0, "categoryId": lighting })).await;
        create_product(&app, json!({ "name": "Mug", "price": 4.5 })).await;

        let (_, all) = send(&app, "GET", "/products", Body::empty()).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let uri = format!("/products?categoryId={}", lighting);
        let (status, filtered) = send(&app, "GET", &uri, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(filtered.as_array().unwrap().len(), 1);
        assert_eq!(filtered[0]["name"], "Lamp");
    }

    #[tokio::test]
    async fn test_list_products_invalid_category_id() {
        let app = test_app();

        let (status, error) = send(&app, "GET", "/products?categoryId=nope", Body::empty()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].as_str().unwrap().contains("Invalid UUID format"));
    }

    #[tokio::test]
    async fn test_create_product_unknown_category() {
        let app = test_app();
        let missing = Uuid::new_v4();

        let (status, error) =
            create_product(&app, json!({ "name": "Lamp", "price": 10.0, "categoryId": missing })).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error["details"][0].as_str().unwrap().contains(&missing.to_string()));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let app = test_app();

        let uri = format!("/products/{}", Uuid::new_v4());
        let (status, _) = send(&app, "GET", &uri, Body::empty()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_product_invalid_uuid() {
        let app = test_app();

        let (status, error) = send(&app, "GET", "/products/not-a-uuid", Body::empty()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].as_str().unwrap().contains("not-a-uuid"));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let app = test_app();
        let (_, created) = create_product(&app, json!({ "name": "Lamp", "price": 10.0 })).await;
        let uri = format!("/products/{}", created["id"].as_str().unwrap());

        let (status, _) = send(&app, "DELETE", &uri, Body::empty()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", &uri, Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
