pub mod filter;
pub mod task;

pub use filter::*;
pub use task::*;
