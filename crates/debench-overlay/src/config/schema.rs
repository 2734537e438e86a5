use serde::Deserialize;

use debench_core::error::{DebenchError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    pub version: u32,

    #[serde(default)]
    pub overlay: OverlaySection,
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DebenchError::Config(
                "version must be 1".into(),
            ));
        }
        self.overlay.validate()?;
        Ok(())
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            overlay: OverlaySection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlaySection {
    /// Master switch; when false every overlay operation is a no-op.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Render the condensed one-line report instead of the full widget.
    #[serde(default)]
    pub minimal: bool,

    /// Directory the theme assets are mirrored into.
    #[serde(default = "default_theme_dir")]
    pub theme_dir: String,

    /// Read-through template cache; disable only while editing a theme.
    #[serde(default = "default_template_cache")]
    pub template_cache: bool,
}

impl Default for OverlaySection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            minimal: false,
            theme_dir: default_theme_dir(),
            template_cache: default_template_cache(),
        }
    }
}

impl OverlaySection {
    pub fn validate(&self) -> Result<()> {
        if self.theme_dir.trim().is_empty() {
            return Err(DebenchError::Config(
                "overlay.theme_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}
fn default_theme_dir() -> String {
    "theme".into()
}
fn default_template_cache() -> bool {
    true
}
