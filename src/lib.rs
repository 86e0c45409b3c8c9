//! Storefront REST backend with a self-describing route registry.
//!
//! Feature routers are built with [`routing::TrackedRouter`], which mirrors
//! every route into a [`route_tree::Layer`] stack. At start-up each router is
//! registered with a [`route_registry::RouteRegistry`]; `GET /routes` serves
//! [`route_registry::RouteRegistry::snapshot`], the flattened route list of
//! every mount with example payloads attached.

pub mod api_doc;
pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod route_registry;
pub mod route_tree;
pub mod routes;
pub mod routing;
pub mod state;
pub mod store;
pub mod validation;
