use crate::error::{ApiError, ErrorResponse};
use crate::models::{Category, NewCategory};
use crate::route_registry::ExampleTable;
use crate::routes;
use crate::routing::{self, TrackedRouter};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /categories handler - List all categories in creation order
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Category>>), ApiError> {
    let categories = state.store.read(|catalog| catalog.categories().to_vec())?;
    Ok((StatusCode::OK, Json(categories)))
}

/// POST /categories handler - Create a category
#[utoipa::path(
    post,
    path = "/categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 409, description = "Category name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(new): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.store.write(|catalog| catalog.add_category(new))??;

    tracing::info!("Created category {} ({})", category.name, category.id);
    Ok((StatusCode::CREATED, Json(category)))
}

pub fn router() -> TrackedRouter<AppState> {
    TrackedRouter::new().route(
        routes::ROOT,
        routing::get(list_categories_handler).post(create_category_handler),
    )
}

pub fn examples() -> ExampleTable {
    ExampleTable::from([(
        "POST /categories".to_string(),
        serde_json::json!({ "name": "Lighting", "description": "Lamps and bulbs" }),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{json_body, send, test_app};
    use axum::body::Body;

    #[tokio::test]
    async fn test_create_and_list_categories() {
        let app = test_app();

        let (status, created) = send(
            &app,
            "POST",
            "/categories",
            json_body(&serde_json::json!({ "name": "Books" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Books");

        let (status, listed) = send(&app, "GET", "/categories", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_duplicate_category_returns_conflict() {
        let app = test_app();
        let body = serde_json::json!({ "name": "Books" });

        send(&app, "POST", "/categories", json_body(&body)).await;
        let (status, error) = send(&app, "POST", "/categories", json_body(&body)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(error["error"].as_str().unwrap().contains("Books"));
    }

    #[tokio::test]
    async fn test_blank_category_name_rejected() {
        let app = test_app();

        let (status, error) = send(
            &app,
            "POST",
            "/categories",
            json_body(&serde_json::json!({ "name": "   " })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error["details"][0], "name must not be empty");
    }
}
