// Route path constants - single source of truth for all API paths

// Mount prefixes
pub const HEALTH: &str = "/health";
pub const CATEGORIES: &str = "/categories";
pub const PRODUCTS: &str = "/products";
pub const CART: &str = "/cart";
pub const DOCS: &str = "/routes";

// Paths relative to their mount prefix
pub const ROOT: &str = "/";
pub const ITEM: &str = "/{id}";
pub const CART_ADD: &str = "/add";

// Swagger UI
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
