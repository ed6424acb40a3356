pub mod amortization;
pub mod arv;
pub mod error;
pub mod financing;
pub mod normalize;
pub mod rehab;
pub mod types;
pub mod validation;

#[cfg(feature = "flip")]
pub mod flip;

#[cfg(feature = "brrrr")]
pub mod brrrr;

pub use error::DealEngineError;
pub use types::*;

/// Standard result type for all deal-engine operations
pub type DealEngineResult<T> = Result<T, DealEngineError>;
