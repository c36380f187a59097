pub mod changes;
pub mod geometry;
pub mod model;
pub mod store;

pub use changes::*;
pub use geometry::{NodeSize, find_drop_target};
pub use model::*;
pub use store::GraphStore;
