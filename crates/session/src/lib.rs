//! Interactive spot-finding flow: session state, screens, remote queries and
//! the map side effects that follow them.

pub mod backend;
pub mod config;
pub mod error;
pub mod flow;
pub mod location;
pub mod navigation;
pub mod place;
pub mod screen;
pub mod state;
pub mod views;

#[cfg(test)]
mod fakes;

pub use backend::*;
pub use config::*;
pub use error::*;
pub use flow::*;
pub use location::*;
pub use navigation::*;
pub use place::*;
pub use screen::*;
pub use state::*;
pub use views::*;
