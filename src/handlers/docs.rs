use crate::route_registry::MountDocs;
use crate::routes;
use crate::routing::{self, TrackedRouter};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /routes handler - Every registered route with its example payload
///
/// Re-walks the registered routers on each call.
#[utoipa::path(
    get,
    path = routes::DOCS,
    responses(
        (status = 200, description = "Registered routes grouped by mount", body = Vec<MountDocs>)
    ),
    tag = "docs"
)]
pub async fn list_routes_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Vec<MountDocs>>) {
    (StatusCode::OK, Json(state.registry.snapshot()))
}

pub fn router() -> TrackedRouter<AppState> {
    TrackedRouter::new().route(routes::ROOT, routing::get(list_routes_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{self, tests::send};
    use crate::config::Config;
    use crate::store::Store;
    use axum::body::Body;
    use serde_json::{json, Value};

    fn route_entry(mounts: &Value, name: &str) -> Value {
        mounts
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["name"] == name)
            .cloned()
            .unwrap_or_else(|| panic!("no mount named {}", name))
    }

    #[tokio::test]
    async fn test_routes_lists_mounts_in_registration_order() {
        let app = app::tests::test_app();

        let (status, mounts) = send(&app, "GET", "/routes", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);

        let names: Vec<&str> = mounts
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Health", "Categories", "Products", "Cart", "Docs"]);
    }

    #[tokio::test]
    async fn test_routes_attaches_cart_example() {
        let app = app::tests::test_app();

        let (_, mounts) = send(&app, "GET", "/routes", Body::empty()).await;
        let cart = route_entry(&mounts, "Cart");

        assert_eq!(cart["basePathPrefix"], "/cart");
        let add = cart["routes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["path"] == "/add")
            .unwrap();
        assert_eq!(add["method"], "POST");
        assert_eq!(add["example"]["totalAmount"], 199.98);

        let get = cart["routes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["method"] == "GET")
            .unwrap();
        assert_eq!(get["path"], "/");
        assert_eq!(get["example"], Value::Null);
    }

    #[tokio::test]
    async fn test_products_routes_keep_placeholders() {
        let app = app::tests::test_app();

        let (_, mounts) = send(&app, "GET", "/routes", Body::empty()).await;
        let products = route_entry(&mounts, "Products");

        let routes: Vec<Value> = products["routes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| json!([r["method"], r["path"]]))
            .collect();
        assert_eq!(
            routes,
            vec![
                json!(["GET", "/"]),
                json!(["POST", "/"]),
                json!(["GET", "/{id}"]),
                json!(["DELETE", "/{id}"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_examples_attach_to_root_routes() {
        let app = app::tests::test_app();

        let (_, mounts) = send(&app, "GET", "/routes", Body::empty()).await;
        let products = route_entry(&mounts, "Products");
        let routes = products["routes"].as_array().unwrap();

        let find = |method: &str, path: &str| {
            routes
                .iter()
                .find(|r| r["method"] == method && r["path"] == path)
                .cloned()
                .unwrap()
        };

        assert_eq!(find("POST", "/")["example"]["name"], "Desk lamp");
        assert_eq!(find("GET", "/")["example"], Value::Null);
        assert_eq!(find("GET", "/{id}")["example"], Value::Null);

        let categories = route_entry(&mounts, "Categories");
        let create = categories["routes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["method"] == "POST")
            .unwrap();
        assert_eq!(create["example"]["name"], "Lighting");
    }

    #[tokio::test]
    async fn test_routes_disabled() {
        let config = Config {
            route_docs_enabled: false,
            ..Config::default()
        };
        let app = app::build_app(&config, Store::new());

        let (status, _) = send(&app, "GET", "/routes", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
