//! Infrastructure layer - External service implementations

pub mod category;
pub mod logging;
