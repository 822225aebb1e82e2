//! API request handlers.

pub mod health;
pub mod leads;
pub mod orders;

pub use health::*;
pub use leads::*;
pub use orders::*;
