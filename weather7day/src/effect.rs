//! Effects - side effects declared by the reducer

use crate::state::Coordinate;

/// Work the reducer asks the runtime to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the seven-day forecast; the result must be tagged with `request`
    FetchForecast { request: u64, coordinate: Coordinate },
}
