pub mod common;
pub mod host;
pub mod layout_engine;
