//! Route tree flattening.
//!
//! Composes child paths onto their parents and lists every route in
//! pre-order: a parent before its descendants, children in declared order.

use routemark_core::{FlattenedRoute, RouteNode, route::join_route_path};

/// Flatten one or more route trees.
///
/// Pass `[&node]` for a single tree. The input is never modified.
pub fn flatten<'a>(routes: impl IntoIterator<Item = &'a RouteNode>) -> Vec<FlattenedRoute> {
    let mut flattened = Vec::new();
    for route in routes {
        flatten_node(route, route.path.clone(), &mut flattened);
    }
    flattened
}

/// Flatten `route` as if its path were `path`.
fn flatten_node(route: &RouteNode, path: String, out: &mut Vec<FlattenedRoute>) {
    let data_path = route.data_path.clone().unwrap_or_else(|| path.clone());

    out.push(FlattenedRoute {
        path: path.clone(),
        data_path,
        title: route.title.clone(),
        description: route.description.clone(),
    });

    for child in &route.child_routes {
        flatten_node(child, join_route_path(&path, &child.path), out);
    }
}
