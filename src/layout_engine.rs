pub mod candidates;
pub mod engine;
mod error;
pub mod layouts;
pub mod rotation;
pub mod strategy;

pub use candidates::{MINIBUFFER_PATTERN, PaneFilter, candidates, get_buffers};
pub use engine::{TileCommand, TileEngine};
pub use error::TileError;
pub use layouts::{
    Arrange, CustomLayout, EvenlySplitLayout, Layout, MasterLayout, MasterPosition, MasterSplit,
    Orientation, SplitAxis,
};
pub use rotation::Rotation;
pub use strategy::{BufferFetcher, BuiltinStrategy, Strategy};

#[cfg(test)]
mod tests;
