//! Plain string-substitution template renderer with a read-through cache.
//!
//! Templates are raw text files; every `{{@key}}` marker is replaced with
//! the corresponding value. Raw text is cached per path for the lifetime
//! of the engine, so repeated row renders hit the disk once.

use std::fs;
use std::path::Path;

use dashmap::DashMap;

use debench_core::error::{DebenchError, Result};

pub struct TemplateEngine {
    cache: DashMap<String, String>,
    caching: bool,
}

impl TemplateEngine {
    pub fn new(caching: bool) -> Self {
        Self {
            cache: DashMap::new(),
            caching,
        }
    }

    pub fn is_caching(&self) -> bool {
        self.caching
    }

    /// Render the template at `path`, replacing every `{{@key}}` with its
    /// value. A missing template is a broken installation and propagates.
    pub fn render(&self, path: &Path, params: &[(&str, String)]) -> Result<String> {
        let mut out = self.load(path)?;
        for (key, value) in params {
            out = out.replace(&format!("{{{{@{key}}}}}"), value);
        }
        Ok(out)
    }

    fn load(&self, path: &Path) -> Result<String> {
        let key = path.to_string_lossy().into_owned();
        if self.caching {
            if let Some(hit) = self.cache.get(&key) {
                return Ok(hit.clone());
            }
        }
        let raw =
            fs::read_to_string(path).map_err(|_| DebenchError::TemplateNotFound(key.clone()))?;
        if self.caching {
            self.cache.insert(key, raw.clone());
        }
        Ok(raw)
    }
}
