//! Conversion of GitHub markdown into chat markup.

pub mod slack;

use std::{ops::Deref, sync::Arc};

// Traits.

/// Generic markup converter trait.
///
/// Conversion is pure and synchronous: text in, text out.
pub trait GenericMarkupConverter: Send + Sync + 'static {
    /// Convert GitHub-flavoured markdown into the chat platform's markup.
    fn convert(&self, markdown: &str) -> String;
}

// Structs.

/// Markup converter for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct MarkupConverter {
    inner: Arc<dyn GenericMarkupConverter>,
}

impl Deref for MarkupConverter {
    type Target = dyn GenericMarkupConverter;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl MarkupConverter {
    pub fn new(inner: Arc<dyn GenericMarkupConverter>) -> Self {
        Self { inner }
    }
}
