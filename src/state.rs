use crate::config::Config;
use crate::route_registry::RouteRegistry;
use crate::store::Store;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub registry: Arc<RouteRegistry>,
}
