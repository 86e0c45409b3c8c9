//! Recording wrappers around axum's router types.
//!
//! axum keeps its route table private, so routers that should show up in the
//! route registry are built through [`TrackedRouter`] and [`Endpoint`]. Each
//! call is forwarded to axum and mirrored as a [`Layer`] in a side stack.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    handler::Handler,
    http::Method,
    response::IntoResponse,
    routing::{MethodRouter, Route},
};
use tower::{Layer as TowerLayer, Service};

use crate::route_tree::{self, Layer, LayerStack, MethodSet, RouteSource};

/// A method router that remembers which methods were attached to it.
pub struct Endpoint<S = ()> {
    inner: MethodRouter<S>,
    methods: MethodSet,
}

macro_rules! endpoint_method {
    ($name:ident, $method:expr) => {
        pub fn $name<H, T>(mut self, handler: H) -> Self
        where
            H: Handler<T, S>,
            T: 'static,
        {
            self.inner = self.inner.$name(handler);
            self.methods.insert($method);
            self
        }
    };
}

macro_rules! endpoint_constructor {
    ($name:ident) => {
        pub fn $name<H, T, S>(handler: H) -> Endpoint<S>
        where
            H: Handler<T, S>,
            T: 'static,
            S: Clone + Send + Sync + 'static,
        {
            Endpoint::new().$name(handler)
        }
    };
}

impl<S> Endpoint<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: MethodRouter::new(),
            methods: MethodSet::new(),
        }
    }

    endpoint_method!(get, Method::GET);
    endpoint_method!(post, Method::POST);
    endpoint_method!(put, Method::PUT);
    endpoint_method!(patch, Method::PATCH);
    endpoint_method!(delete, Method::DELETE);
}

impl<S> Default for Endpoint<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

endpoint_constructor!(get);
endpoint_constructor!(post);
endpoint_constructor!(put);
endpoint_constructor!(patch);
endpoint_constructor!(delete);

/// An axum [`Router`] paired with a mirror of its layer stack.
pub struct TrackedRouter<S = ()> {
    inner: Router<S>,
    layers: Vec<Layer>,
}

impl<S> TrackedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Router::new(),
            layers: Vec::new(),
        }
    }

    pub fn route(mut self, path: &str, endpoint: Endpoint<S>) -> Self {
        self.inner = self.inner.route(path, endpoint.inner);
        self.layers.push(Layer::Route {
            path: path.to_string(),
            methods: endpoint.methods,
        });
        self
    }

    /// Nests `child` under `prefix`. The prefix is baked into the child's
    /// route paths, so the walker never adds it again.
    pub fn nest(mut self, prefix: &str, child: TrackedRouter<S>) -> Self {
        self.inner = self.inner.nest(prefix, child.inner);
        let layers = child
            .layers
            .into_iter()
            .map(|layer| rebase(prefix, layer))
            .collect();
        self.layers.push(Layer::Router { layers });
        self
    }

    pub fn merge(mut self, other: TrackedRouter<S>) -> Self {
        self.inner = self.inner.merge(other.inner);
        self.layers.push(Layer::Router {
            layers: other.layers,
        });
        self
    }

    /// Applies a tower middleware to every route added so far.
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: TowerLayer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        let label = short_type_name::<L>();
        self.inner = self.inner.layer(layer);
        self.layers.push(Layer::Other { label });
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn into_router(self) -> Router<S> {
        self.inner
    }
}

impl<S> Default for TrackedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteSource for TrackedRouter<S> {
    fn layer_stack(&self) -> LayerStack {
        Arc::from(self.layers.as_slice())
    }
}

fn rebase(prefix: &str, layer: Layer) -> Layer {
    match layer {
        Layer::Route { path, methods } => Layer::Route {
            path: route_tree::join_path(prefix, &path),
            methods,
        },
        Layer::Router { layers } => Layer::Router {
            layers: layers.into_iter().map(|l| rebase(prefix, l)).collect(),
        },
        other @ Layer::Other { .. } => other,
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
