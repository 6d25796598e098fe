//! Shared fixtures for integration tests.

use std::sync::Arc;

use url_rewriter::{Rewriter, RewriterStore, RouteMapping};

/// Base mapping of a typical service build.
pub fn base_mapping() -> RouteMapping {
    RouteMapping::from_pairs([
        ("/", "OnlineSbisRu"),
        ("/page/regex:^([a-z]+)$", "OnlineSbisRu/Page/$1"),
        ("/a/b", "X"),
        ("/a", "A"),
    ])
}

/// Override mapping supplied by an application feature.
pub fn custom_mapping() -> RouteMapping {
    RouteMapping::from_pairs([
        ("/regex:^([0-9]{5})$", "SomeModule/$1"),
        ("/my-page", "MyModule/my-page"),
        ("/a/b/c", "ab"),
    ])
}

pub fn store() -> RewriterStore {
    RewriterStore::from_mapping(&base_mapping()).unwrap()
}

#[allow(dead_code)]
pub fn custom() -> Arc<Rewriter> {
    Arc::new(Rewriter::from_mapping(&custom_mapping()).unwrap())
}
