//! Action trait for dispatchable messages

use std::fmt::Debug;

/// A message that can be dispatched to an [`EffectStore`](crate::EffectStore)
///
/// Actions cross task boundaries (async results are sent back over a
/// channel) and are logged by middleware, hence the `Clone + Debug + Send`
/// bounds.
pub trait Action: Clone + Debug + Send + 'static {
    /// Stable variant name used in logs
    fn name(&self) -> &'static str;

    /// One-line description for logs.
    ///
    /// Defaults to the `Debug` output. Override for variants that carry
    /// large payloads.
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
