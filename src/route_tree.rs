use axum::http::Method;
use std::sync::Arc;

/// Ordered set of HTTP methods a route layer answers to.
///
/// Names are upper-cased on insert and kept unique; iteration follows
/// first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet {
    methods: Vec<Method>,
}

impl MethodSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from method names, ignoring case.
    ///
    /// Names that are not valid HTTP method tokens are dropped.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::new();
        for name in names {
            let upper = name.trim().to_ascii_uppercase();
            match Method::from_bytes(upper.as_bytes()) {
                Ok(method) => set.insert(method),
                Err(_) => tracing::debug!("Ignoring invalid method name: {:?}", name),
            }
        }
        set
    }

    pub fn insert(&mut self, method: Method) {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }
}

/// One entry of a router's layer stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    /// Terminal route binding methods to a path fragment.
    Route { path: String, methods: MethodSet },
    /// Nested sub-router. Child path fragments already carry the mount prefix.
    Router { layers: Vec<Layer> },
    /// Middleware or anything else that produces no routes.
    Other { label: String },
}

impl Layer {
    pub fn route<'a, I>(path: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Layer::Route {
            path: path.into(),
            methods: MethodSet::from_names(methods),
        }
    }

    pub fn router(layers: Vec<Layer>) -> Self {
        Layer::Router { layers }
    }

    pub fn other(label: impl Into<String>) -> Self {
        Layer::Other {
            label: label.into(),
        }
    }
}

/// Immutable, cheaply clonable snapshot of a router's layer stack.
pub type LayerStack = Arc<[Layer]>;

/// Anything that can hand out its layer stack for introspection.
pub trait RouteSource {
    fn layer_stack(&self) -> LayerStack;
}

impl RouteSource for LayerStack {
    fn layer_stack(&self) -> LayerStack {
        Arc::clone(self)
    }
}

impl RouteSource for Vec<Layer> {
    fn layer_stack(&self) -> LayerStack {
        Arc::from(self.as_slice())
    }
}

/// A flattened (method, full path) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub method: String,
    pub path: String,
}

/// Flattens a layer stack into route descriptors, in match order.
pub fn flatten(layers: &[Layer]) -> Vec<RouteDescriptor> {
    flatten_with_prefix("", layers)
}

/// Pre-order, depth-first walk emitting one descriptor per (route, method).
///
/// `prefix` is prepended at route layers only; router layers pass it through
/// unchanged. Uses an explicit stack so deep trees cannot overflow.
pub fn flatten_with_prefix(prefix: &str, layers: &[Layer]) -> Vec<RouteDescriptor> {
    let mut out = Vec::new();
    let mut stack = vec![layers.iter()];

    while let Some(iter) = stack.last_mut() {
        let Some(layer) = iter.next() else {
            stack.pop();
            continue;
        };

        match layer {
            Layer::Route { path, methods } => {
                let full_path = format!("{prefix}{path}");
                out.extend(methods.iter().map(|method| RouteDescriptor {
                    method: method.as_str().to_string(),
                    path: full_path.clone(),
                }));
            }
            Layer::Router { layers } => stack.push(layers.iter()),
            Layer::Other { .. } => {}
        }
    }

    out
}

/// Joins a mount prefix and a path fragment the way axum nests routes.
pub fn join_path(prefix: &str, fragment: &str) -> String {
    if fragment == "/" && !prefix.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}{fragment}")
    }
}
