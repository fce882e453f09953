use std::path::PathBuf;
use std::sync::Once;

use core_estimate::CATALOG_PATH_ENV;

static INIT: Once = Once::new();

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Point the catalog override at the small test catalog, once per test binary.
pub fn ensure_test_catalog() -> PathBuf {
    let catalog_path = fixture_path("test_catalog.json");
    INIT.call_once(|| {
        debug_assert!(
            catalog_path.exists(),
            "missing test catalog at {}",
            catalog_path.display()
        );
        std::env::set_var(CATALOG_PATH_ENV, &catalog_path);
    });
    catalog_path
}
