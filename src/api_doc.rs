use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    AddToCartRequest, CartItemRequest, CartLine, CartResponse, Category, NewCategory, NewProduct,
    Product,
};
use crate::route_registry::{DocumentedRoute, MountDocs};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "storefront-api",
        version = "1.0.0",
        description = "Product catalog and cart service with a self-describing route listing"
    ),
    paths(
        handlers::health::health_handler,
        handlers::categories::list_categories_handler,
        handlers::categories::create_category_handler,
        handlers::products::list_products_handler,
        handlers::products::create_product_handler,
        handlers::products::get_product_handler,
        handlers::products::delete_product_handler,
        handlers::cart::add_to_cart_handler,
        handlers::cart::get_cart_handler,
        handlers::cart::clear_cart_handler,
        handlers::docs::list_routes_handler
    ),
    components(
        schemas(
            Category,
            NewCategory,
            Product,
            NewProduct,
            CartItemRequest,
            AddToCartRequest,
            CartLine,
            CartResponse,
            MountDocs,
            DocumentedRoute,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "catalog", description = "Product and category operations"),
        (name = "cart", description = "Shopping cart operations"),
        (name = "docs", description = "Registered route listing")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in ["/health", "/categories", "/products", "/products/{id}", "/cart", "/cart/add", "/routes"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
    }
}
