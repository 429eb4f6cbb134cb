//! Compiled-template cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Template, TemplateError};

/// Compiled templates keyed by source text.
///
/// Owned by a formatter, so formatters built from different rule stores never
/// share entries. Entries are only ever added. Two threads compiling the same
/// source at once both succeed; the first insert is kept.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a compiled template, compiling and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns the compile error; failures are not cached.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<Template>, TemplateError> {
        if let Ok(entries) = self.entries.read()
            && let Some(template) = entries.get(source)
        {
            return Ok(Arc::clone(template));
        }

        let compiled = Arc::new(Template::compile(source)?);
        if let Ok(mut entries) = self.entries.write() {
            let cached = entries
                .entry(source.to_string())
                .or_insert_with(|| Arc::clone(&compiled));
            return Ok(Arc::clone(cached));
        }
        Ok(compiled)
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_compiled_template() {
        let cache = TemplateCache::new();
        let first = cache.get_or_compile("{{{road}}}").unwrap();
        let second = cache.get_or_compile("{{{road}}}").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = TemplateCache::new();
        assert!(cache.get_or_compile("{{#road}}").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_population() {
        let cache = Arc::new(TemplateCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_compile("{{{city}}}").map(|_| ()))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
