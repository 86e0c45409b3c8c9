pub mod health;
pub mod categories;
pub mod products;
pub mod cart;
pub mod docs;

pub use health::health_handler;
pub use categories::{create_category_handler, list_categories_handler};
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
};
pub use cart::{add_to_cart_handler, clear_cart_handler, get_cart_handler};
pub use docs::list_routes_handler;
