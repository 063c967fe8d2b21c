//! The narrow interface the tiling engine needs from the environment that
//! owns panes and the display surface.
//!
//! The engine never creates or destroys panes. It reads pane identity and
//! names, then drives the host's split and placement primitives.

use std::fmt;

use thiserror::Error;

pub mod virtual_host;

#[cfg(test)]
pub(crate) mod testing;

/// Opaque handle to a host-managed pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(u32);

impl PaneId {
    pub const fn new(idx: u32) -> Self { PaneId(idx) }

    pub fn idx(self) -> u32 { self.0 }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "pane#{}", self.0) }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("Region too small to split ({width}x{height})")]
    RegionTooSmall { width: u32, height: u32 },
    #[error("Unknown pane: {0}")]
    UnknownPane(PaneId),
    #[error("No region is focused")]
    NoRegion,
    #[error("{0}")]
    Other(String),
}

/// Window-system primitives used by layouts.
///
/// Enumeration order is host-defined but must be stable within a call.
/// Which region keeps focus after a split is also host-defined; master
/// layouts compensate for it explicitly.
pub trait Host {
    /// Panes currently shown on the display surface, in visible order.
    fn visible_panes(&self) -> Vec<PaneId>;

    /// Every pane the host knows about, in list order.
    fn all_panes(&self) -> Vec<PaneId>;

    /// The pane shown in the focused region. `None` only when the host has
    /// no panes at all.
    fn focused_pane(&self) -> Option<PaneId>;

    fn pane_name(&self, pane: PaneId) -> Option<String>;

    /// Split the focused region into two regions stacked top to bottom.
    fn split_vertically(&mut self) -> Result<(), HostError>;

    /// Split the focused region into two regions side by side.
    fn split_horizontally(&mut self) -> Result<(), HostError>;

    fn move_focus(&mut self, offset: i32) -> Result<(), HostError>;

    /// Show `pane` in the focused region.
    fn set_pane(&mut self, pane: PaneId) -> Result<(), HostError>;

    /// Discard every region except the focused one.
    fn delete_other_regions(&mut self) -> Result<(), HostError>;

    fn balance_regions(&mut self) -> Result<(), HostError>;
}
