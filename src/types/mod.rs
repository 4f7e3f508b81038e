//! Type definitions for creatrack

mod adset;
mod creative;
mod error;
mod filters;
mod record;

pub use adset::*;
pub use creative::*;
pub use error::*;
pub use filters::*;
pub use record::*;
