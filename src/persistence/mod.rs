pub mod interchange;
pub mod store;

pub use interchange::*;
pub use store::*;
