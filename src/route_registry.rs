use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::route_tree::{self, LayerStack, RouteSource};

/// Example payloads keyed by `"<METHOD> <path>"`.
pub type ExampleTable = HashMap<String, JsonValue>;

/// A router registered under a display name and mount prefix.
#[derive(Debug, Clone)]
pub struct RegisteredMount {
    pub base_path_prefix: String,
    pub name: String,
    pub layers: LayerStack,
    pub examples: ExampleTable,
}

/// Route descriptor with the matching example payload, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentedRoute {
    pub method: String,
    pub path: String,
    pub example: Option<JsonValue>,
}

/// Documentation for one registered mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MountDocs {
    pub name: String,
    pub base_path_prefix: String,
    pub routes: Vec<DocumentedRoute>,
}

/// Append-only list of router mounts, in registration order.
///
/// Filled through `&mut self` during start-up, then shared read-only
/// (usually behind an `Arc`) with the documentation handler.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    mounts: Vec<RegisteredMount>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `router` under `name` and hands it back for mounting.
    ///
    /// Duplicate names or prefixes are kept as separate entries.
    pub fn register<R: RouteSource>(
        &mut self,
        base_path_prefix: &str,
        router: R,
        name: &str,
        examples: ExampleTable,
    ) -> R {
        let layers = router.layer_stack();
        tracing::debug!(
            "Registered route mount '{}' at '{}' ({} layers, {} examples)",
            name,
            base_path_prefix,
            layers.len(),
            examples.len()
        );
        self.mounts.push(RegisteredMount {
            base_path_prefix: base_path_prefix.to_string(),
            name: name.to_string(),
            layers,
            examples,
        });
        router
    }

    pub fn mounts(&self) -> &[RegisteredMount] {
        &self.mounts
    }

    /// Walks every registered router and attaches example payloads.
    pub fn snapshot(&self) -> Vec<MountDocs> {
        let docs: Vec<MountDocs> = self.mounts.iter().map(document_mount).collect();
        tracing::debug!(
            "Route snapshot: {} mounts, {} routes",
            docs.len(),
            docs.iter().map(|m| m.routes.len()).sum::<usize>()
        );
        docs
    }
}

fn document_mount(mount: &RegisteredMount) -> MountDocs {
    let routes = route_tree::flatten(&mount.layers)
        .into_iter()
        .map(|descriptor| {
            let example = find_example(mount, &descriptor.method, &descriptor.path).cloned();
            DocumentedRoute {
                method: descriptor.method,
                path: descriptor.path,
                example,
            }
        })
        .collect();

    MountDocs {
        name: mount.name.clone(),
        base_path_prefix: mount.base_path_prefix.clone(),
        routes,
    }
}

/// Exact lookup by the mounted path first, then the router-relative path.
fn find_example<'a>(mount: &'a RegisteredMount, method: &str, path: &str) -> Option<&'a JsonValue> {
    let mounted = route_tree::join_path(&mount.base_path_prefix, path);
    mount
        .examples
        .get(&example_key(method, &mounted))
        .or_else(|| mount.examples.get(&example_key(method, path)))
}

pub fn example_key(method: &str, path: &str) -> String {
    format!("{} {}", method, path)
}
