//! Negated-form provider.
//!
//! Producing the logical opposite of a question's text is an external
//! collaborator concern; the pipeline only requires a pure function of
//! `(text, language)`, called once per input question.

/// Capability to produce the negated form of a question text.
pub trait Negator: Send + Sync {
    /// Returns the logical opposite of `text`. Pure; no side effects.
    fn negate(&self, text: &str, language: Option<&str>) -> String;
}

impl<F> Negator for F
where
    F: Fn(&str, Option<&str>) -> String + Send + Sync,
{
    fn negate(&self, text: &str, language: Option<&str>) -> String {
        self(text, language)
    }
}

/// Deterministic [`Negator`] for tests: prefixes the text with a marker so
/// negated forms are distinct from originals and from each other.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Default)]
pub struct MockNegator;

#[cfg(any(test, feature = "mock"))]
impl MockNegator {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(any(test, feature = "mock"))]
impl Negator for MockNegator {
    fn negate(&self, text: &str, _language: Option<&str>) -> String {
        format!("NOT: {text}")
    }
}
