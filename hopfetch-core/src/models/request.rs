//! Fetch request descriptor.

/// A request to fetch one resource.
///
/// The context is opaque to the fetcher. It is carried alongside the target
/// so callers can thread their own metadata (tracing ids, producer state)
/// through a fetch without the fetcher knowing its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<C = ()> {
    target_uri: String,
    context: C,
}

impl FetchRequest {
    /// Creates a request with no context.
    pub fn new(target_uri: impl Into<String>) -> Self {
        Self::with_context(target_uri, ())
    }
}

impl<C> FetchRequest<C> {
    /// Creates a request carrying a caller-supplied context.
    pub fn with_context(target_uri: impl Into<String>, context: C) -> Self {
        Self {
            target_uri: target_uri.into(),
            context,
        }
    }

    /// Returns the URI the fetch starts from.
    pub fn target_uri(&self) -> &str {
        &self.target_uri
    }

    /// Returns the caller context.
    pub fn context(&self) -> &C {
        &self.context
    }
}
