use std::fmt;
use std::sync::Arc;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::trace;

use crate::host::{Host, HostError, PaneId};

/// Axis of a split primitive. `Horizontal` places regions side by side,
/// `Vertical` stacks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn split(self, host: &mut dyn Host) -> Result<(), HostError> {
        match self {
            Orientation::Horizontal => host.split_horizontally(),
            Orientation::Vertical => host.split_vertically(),
        }
    }
}

/// Visual effect of an evenly split layout. `Wide` regions are rows stacked
/// top to bottom, `Tall` regions are columns side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SplitAxis {
    Wide,
    Tall,
}

impl SplitAxis {
    pub fn orientation(self) -> Orientation {
        match self {
            SplitAxis::Wide => Orientation::Vertical,
            SplitAxis::Tall => Orientation::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MasterPosition {
    Left,
    Right,
    Top,
    Bottom,
}

#[enum_dispatch]
pub trait Arrange {
    /// Tile `buffers` starting from the focused region, which is assumed to be
    /// the only region on the surface.
    fn apply(&self, host: &mut dyn Host, buffers: &[PaneId]) -> Result<(), HostError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvenlySplitLayout {
    axis: SplitAxis,
}

impl EvenlySplitLayout {
    pub const fn new(axis: SplitAxis) -> Self { EvenlySplitLayout { axis } }

    pub const fn wide() -> Self { Self::new(SplitAxis::Wide) }

    pub const fn tall() -> Self { Self::new(SplitAxis::Tall) }

    pub fn axis(&self) -> SplitAxis { self.axis }
}

impl Arrange for EvenlySplitLayout {
    fn apply(&self, host: &mut dyn Host, buffers: &[PaneId]) -> Result<(), HostError> {
        let Some((first, rest)) = buffers.split_first() else {
            return Ok(());
        };
        host.set_pane(*first)?;
        for pane in rest {
            self.axis.orientation().split(host)?;
            host.move_focus(1)?;
            host.set_pane(*pane)?;
        }
        host.balance_regions()?;
        host.move_focus(1)
    }
}

/// The split that carves the master region out of the surface.
///
/// Afterwards focus must be on the remainder region. Hosts keep focus on the
/// original region after a split, so masters placed first along the axis
/// (left, top) move focus forward onto the new region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasterSplit {
    pub orientation: Orientation,
    pub focus_remainder: bool,
}

impl MasterSplit {
    pub fn carve(self, host: &mut dyn Host) -> Result<(), HostError> {
        self.orientation.split(host)?;
        if self.focus_remainder {
            host.move_focus(1)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasterLayout {
    master: MasterSplit,
    others: EvenlySplitLayout,
}

impl MasterLayout {
    pub const fn new(master: MasterSplit, others: EvenlySplitLayout) -> Self {
        MasterLayout { master, others }
    }

    pub fn at(position: MasterPosition) -> Self {
        let (orientation, focus_remainder, others) = match position {
            MasterPosition::Left => (Orientation::Horizontal, true, EvenlySplitLayout::wide()),
            MasterPosition::Right => (Orientation::Horizontal, false, EvenlySplitLayout::wide()),
            MasterPosition::Top => (Orientation::Vertical, true, EvenlySplitLayout::tall()),
            MasterPosition::Bottom => (Orientation::Vertical, false, EvenlySplitLayout::tall()),
        };
        MasterLayout::new(MasterSplit { orientation, focus_remainder }, others)
    }

    pub fn master(&self) -> MasterSplit { self.master }

    pub fn others(&self) -> EvenlySplitLayout { self.others }
}

impl Arrange for MasterLayout {
    fn apply(&self, host: &mut dyn Host, buffers: &[PaneId]) -> Result<(), HostError> {
        let Some((master, others)) = buffers.split_first() else {
            return Ok(());
        };
        host.set_pane(*master)?;
        self.master.carve(host)?;
        trace!(others = others.len(), "master region carved");
        self.others.apply(host, others)
    }
}

pub type ArrangeFn = dyn Fn(&mut dyn Host, &[PaneId]) -> Result<(), HostError>;

/// Arbitrary arrangement callback.
#[derive(Clone)]
pub struct CustomLayout {
    name: String,
    arrange: Arc<ArrangeFn>,
}

impl CustomLayout {
    pub fn new<F>(name: impl Into<String>, arrange: F) -> Self
    where F: Fn(&mut dyn Host, &[PaneId]) -> Result<(), HostError> + 'static {
        CustomLayout {
            name: name.into(),
            arrange: Arc::new(arrange),
        }
    }

    pub fn name(&self) -> &str { &self.name }
}

impl Arrange for CustomLayout {
    fn apply(&self, host: &mut dyn Host, buffers: &[PaneId]) -> Result<(), HostError> {
        (self.arrange)(host, buffers)
    }
}

impl PartialEq for CustomLayout {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.arrange, &other.arrange)
    }
}

impl fmt::Debug for CustomLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomLayout").field("name", &self.name).finish_non_exhaustive()
    }
}

#[enum_dispatch(Arrange)]
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    EvenlySplit(EvenlySplitLayout),
    Master(MasterLayout),
    Custom(CustomLayout),
}

impl Layout {
    pub fn wide() -> Self { Layout::EvenlySplit(EvenlySplitLayout::wide()) }

    pub fn tall() -> Self { Layout::EvenlySplit(EvenlySplitLayout::tall()) }

    pub fn master(position: MasterPosition) -> Self { Layout::Master(MasterLayout::at(position)) }

    pub fn custom<F>(name: impl Into<String>, arrange: F) -> Self
    where F: Fn(&mut dyn Host, &[PaneId]) -> Result<(), HostError> + 'static {
        Layout::Custom(CustomLayout::new(name, arrange))
    }
}
