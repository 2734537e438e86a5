#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use debench_core::error::DebenchError;
use debench_overlay::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
overlay:
  minimal: false
  theem_dir: "theme" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DebenchError::Config(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(cfg.overlay.enabled);
    assert!(!cfg.overlay.minimal);
    assert_eq!(cfg.overlay.theme_dir, "theme");
    assert!(cfg.overlay.template_cache);
}

#[test]
fn unsupported_version_is_rejected() {
    let bad = r#"
version: 2
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DebenchError::Config(_)));
}

#[test]
fn empty_theme_dir_is_rejected() {
    let bad = r#"
version: 1
overlay:
  theme_dir: "  "
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DebenchError::Config(_)));
}
