//! Per-build inputs.
//!
//! Everything a single build needs besides the attribute graph and the
//! registry: the reader configuration, the document origin, the fallback
//! title and the namespaces declared by the document. A context is owned
//! by one build, so concurrent builds never share an origin.

use ogr_core::ReaderConfig;
use ogr_schema::ProcessContext;

/// Inputs of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub config: ReaderConfig,
    /// Source URL of the document.
    pub origin: Option<String>,
    /// Page title used when `og:title` is missing and title synthesis is on.
    pub fallback_title: Option<String>,
    /// Namespaces declared by the document's `prefix` attribute.
    pub declared_namespaces: Vec<String>,
}

impl BuildContext {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = Some(title.into());
        self
    }

    pub fn with_declared_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// The view handed to type processors.
    pub fn process_context(&self) -> ProcessContext<'_> {
        ProcessContext::new(&self.config).with_origin(self.origin.as_deref())
    }

    pub fn declares(&self, namespace: &str) -> bool {
        self.declared_namespaces.iter().any(|n| n == namespace)
    }
}
