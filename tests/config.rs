//! Loading config and mapping files, then rewriting through the loaded routes.

use std::fs;
use std::sync::Arc;

use url_rewriter::config::{load_config, load_mappings};
use url_rewriter::{Rewriter, RewriterStore};

#[test]
fn test_config_to_scope() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("router.json");
    let custom = dir.path().join("router.custom.json");
    let config_path = dir.path().join("rewriter.toml");

    fs::write(&base, r#"{"/": "OnlineSbisRu", "/a": "A"}"#).unwrap();
    fs::write(&custom, r#"{"/a": "Custom", "/regex:^([0-9]{5})$": "SomeModule/$1"}"#).unwrap();
    fs::write(
        &config_path,
        format!(
            "mapping_path = {:?}\noverride_path = {:?}\n\n[logging]\nlevel = \"debug\"\n",
            base.display().to_string(),
            custom.display().to_string(),
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let (base_mapping, custom_mapping) = load_mappings(&config).unwrap();
    let store = RewriterStore::from_mapping(&base_mapping).unwrap();
    let custom = custom_mapping
        .map(|m| Arc::new(Rewriter::from_mapping(&m).unwrap()));

    let scope = store.scope(custom);
    assert_eq!(scope.get("/"), "/OnlineSbisRu");
    assert_eq!(scope.get("/a"), "/Custom");
    assert_eq!(scope.get("/54321?tab=1"), "/SomeModule/54321?tab=1");
    assert_eq!(scope.get_reverse("/A"), "/a");
}
