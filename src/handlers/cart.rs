use crate::error::{ApiError, ErrorResponse};
use crate::models::{AddToCartRequest, CartResponse};
use crate::route_registry::ExampleTable;
use crate::routes;
use crate::routing::{self, TrackedRouter};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /cart/add handler - Validate items and add them to the cart
///
/// Prices must match the catalog, quantities must be in stock and
/// `totalAmount` must equal the sum of the lines. All violations are
/// reported together.
#[utoipa::path(
    post,
    path = "/cart/add",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Items added", body = CartResponse),
        (status = 422, description = "Cart validation failed", body = ErrorResponse)
    ),
    tag = "cart"
)]
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let item_count = request.items.len();
    let cart = state
        .store
        .write(|catalog| catalog.add_to_cart(request))?
        .inspect_err(|err| {
            if let ApiError::Validation(details) = err {
                tracing::warn!("Rejected cart addition: {}", details.join("; "));
            }
        })?;

    tracing::info!(
        "Added {} item(s) to cart, total now {:.2}",
        item_count,
        cart.total_amount
    );
    Ok((StatusCode::OK, Json(cart)))
}

/// GET /cart handler - Current cart contents
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart contents", body = CartResponse)
    ),
    tag = "cart"
)]
pub async fn get_cart_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let cart = state.store.read(|catalog| catalog.cart())?;
    Ok((StatusCode::OK, Json(cart)))
}

/// DELETE /cart handler - Empty the cart
#[utoipa::path(
    delete,
    path = "/cart",
    responses(
        (status = 204, description = "Cart cleared")
    ),
    tag = "cart"
)]
pub async fn clear_cart_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store.write(|catalog| catalog.clear_cart())?;
    tracing::info!("Cart cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> TrackedRouter<AppState> {
    TrackedRouter::new()
        .route(
            routes::ROOT,
            routing::get(get_cart_handler).delete(clear_cart_handler),
        )
        .route(routes::CART_ADD, routing::post(add_to_cart_handler))
}

pub fn examples() -> ExampleTable {
    ExampleTable::from([(
        "POST /cart/add".to_string(),
        serde_json::json!({
            "totalAmount": 199.98,
            "items": [
                {
                    "productId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                    "quantity": 2,
                    "price": 99.99
                }
            ]
        }),
    )])
}
