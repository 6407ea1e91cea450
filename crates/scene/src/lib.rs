pub mod manager;
pub mod surface;
pub mod world;

pub use manager::*;
pub use surface::*;
pub use world::*;
