//! Business logic services
//!
//! Services wrap the shared engine with request-level concerns:
//! classification against the configured reference table and logging.

pub mod composition;
pub mod intake;

pub use composition::CompositionService;
pub use intake::IntakeService;
