//! Extraction options.

/// What to do with a declaration whose value degrades to
/// [`Resolved::Unresolved`](crate::Resolved::Unresolved) or
/// [`Resolved::Unsupported`](crate::Resolved::Unsupported).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegradedPolicy {
    /// Keep the outcome in the mapping.
    #[default]
    Keep,
    /// Keep the outcome and log a warning.
    Warn,
    /// Abort the extraction with an error.
    Fail,
}

/// Configuration for an extraction pass.
///
/// ```
/// use lessvars::{DegradedPolicy, Options};
///
/// let options = Options::new().on_degraded(DegradedPolicy::Fail);
/// assert_eq!(options.degraded, DegradedPolicy::Fail);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub degraded: DegradedPolicy,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_degraded(mut self, policy: DegradedPolicy) -> Self {
        self.degraded = policy;
        self
    }
}
