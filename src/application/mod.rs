mod error;
mod reporting;
mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
