use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::Config;
use crate::handlers;
use crate::route_registry::{ExampleTable, RouteRegistry};
use crate::routes;
use crate::routing::TrackedRouter;
use crate::state::AppState;
use crate::store::Store;

/// Registers `router` and mounts it on `app` under `prefix`.
fn mount(
    app: Router<AppState>,
    registry: &mut RouteRegistry,
    prefix: &str,
    name: &str,
    router: TrackedRouter<AppState>,
    examples: ExampleTable,
) -> Router<AppState> {
    let router = registry.register(prefix, router, name, examples).into_router();
    if prefix.is_empty() || prefix == "/" {
        app.merge(router)
    } else {
        app.nest(prefix, router)
    }
}

/// Wires every feature router, the route registry and the shared state.
pub fn build_app(config: &Config, store: Store) -> Router {
    let mut registry = RouteRegistry::new();
    let mut app = Router::new();

    app = mount(
        app,
        &mut registry,
        routes::HEALTH,
        "Health",
        handlers::health::router(),
        ExampleTable::new(),
    );
    app = mount(
        app,
        &mut registry,
        routes::CATEGORIES,
        "Categories",
        handlers::categories::router(),
        handlers::categories::examples(),
    );
    app = mount(
        app,
        &mut registry,
        routes::PRODUCTS,
        "Products",
        handlers::products::router(),
        handlers::products::examples(),
    );
    app = mount(
        app,
        &mut registry,
        routes::CART,
        "Cart",
        handlers::cart::router(),
        handlers::cart::examples(),
    );

    if config.route_docs_enabled {
        app = mount(
            app,
            &mut registry,
            routes::DOCS,
            "Docs",
            handlers::docs::router(),
            ExampleTable::new(),
        );
    }

    tracing::info!("Registered {} route mounts", registry.mounts().len());

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        registry: Arc::new(registry),
    };

    app.merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
