#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use debench_core::error::DebenchError;
use debench_overlay::assets;

#[test]
fn mirrors_the_builtin_theme_tree() {
    let dir = tempfile::tempdir().unwrap();
    let theme = dir.path().join("theme");

    assets::ensure_assets_present(&theme).unwrap();

    for rel in [
        "debench/widget.htm",
        "debench/widget.minimal.htm",
        "debench/widget.log.htm",
        "debench/widget.message.htm",
        "debench/widget.exception.htm",
        "debench/assets/debench.css",
        "debench/assets/debench.js",
    ] {
        assert!(theme.join(rel).is_file(), "missing {rel}");
    }
}

#[test]
fn sync_is_size_based() {
    let dir = tempfile::tempdir().unwrap();
    let theme = dir.path().join("theme");
    assets::ensure_assets_present(&theme).unwrap();

    let widget = theme.join("debench/widget.htm");
    let original = fs::read_to_string(&widget).unwrap();

    // Different size: restored on the next sync.
    fs::write(&widget, "stale").unwrap();
    assets::ensure_assets_present(&theme).unwrap();
    assert_eq!(fs::read_to_string(&widget).unwrap(), original);

    // Same size: skipped, local edit survives.
    let same_size: String = original.chars().map(|_| 'x').collect();
    fs::write(&widget, &same_size).unwrap();
    assets::ensure_assets_present(&theme).unwrap();
    assert_eq!(fs::read_to_string(&widget).unwrap(), same_size);
}

#[test]
fn missing_destination_parent_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let theme = dir.path().join("missing").join("theme");

    let err = assets::ensure_assets_present(&theme).expect_err("must fail");
    assert!(matches!(err, DebenchError::AssetBootstrap(_)));
}
