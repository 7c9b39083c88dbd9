pub mod fetch;
pub mod normalize;
pub mod types;

pub use fetch::*;
pub use normalize::*;
pub use types::*;
