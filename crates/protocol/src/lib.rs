pub mod api;
pub mod routes;

pub use api::*;
pub use routes::*;
