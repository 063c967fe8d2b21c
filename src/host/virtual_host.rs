//! In-memory display surface.
//!
//! Regions form a binary split tree over a character-cell surface. Splits
//! follow the classic editor model: the new region is placed after the
//! current one, shows the same pane, and focus stays where it was.

use ascii_tree::Tree;
use slotmap::SlotMap;
use tracing::trace;

use super::{Host, HostError, PaneId};
use crate::layout_engine::Orientation;

slotmap::new_key_type! { pub struct RegionId; }

pub const MIN_REGION_WIDTH: u32 = 10;
pub const MIN_REGION_HEIGHT: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
enum RegionKind {
    Leaf {
        pane: PaneId,
    },
    Split {
        orientation: Orientation,
        ratio: f64,
        first: RegionId,
        second: RegionId,
    },
}

#[derive(Clone, Debug)]
struct Region {
    kind: RegionKind,
}

pub struct VirtualHost {
    panes: Vec<(PaneId, String)>,
    regions: SlotMap<RegionId, Region>,
    root: Option<RegionId>,
    focused: Option<RegionId>,
    width: u32,
    height: u32,
}

impl Default for VirtualHost {
    fn default() -> Self { VirtualHost::new(160, 48) }
}

impl VirtualHost {
    pub fn new(width: u32, height: u32) -> Self {
        VirtualHost {
            panes: Vec::new(),
            regions: SlotMap::with_key(),
            root: None,
            focused: None,
            width,
            height,
        }
    }

    /// Register a pane. The first pane registered fills the surface.
    pub fn add_pane(&mut self, name: impl Into<String>) -> PaneId {
        let id = PaneId::new(self.panes.len() as u32 + 1);
        self.panes.push((id, name.into()));
        if self.root.is_none() {
            let leaf = self.regions.insert(Region { kind: RegionKind::Leaf { pane: id } });
            self.root = Some(leaf);
            self.focused = Some(leaf);
        }
        id
    }

    pub fn pane_by_name(&self, name: &str) -> Option<PaneId> {
        self.panes.iter().find(|(_, n)| n == name).map(|(id, _)| *id)
    }

    /// Focus the region showing `pane`, or show it in the focused region if
    /// it is not visible.
    pub fn focus_pane(&mut self, pane: PaneId) -> Result<(), HostError> {
        let region = self.leaves().into_iter().find(|r| self.leaf_pane(*r) == Some(pane));
        match region {
            Some(region) => {
                self.focused = Some(region);
                Ok(())
            }
            None => self.set_pane(pane),
        }
    }

    pub fn region_count(&self) -> usize { self.leaves().len() }

    /// Screen rectangle of every region, in region order.
    pub fn frames(&self) -> Vec<(PaneId, Rect)> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.collect_frames(root, self.surface(), &mut |id, rect| {
                if let Some(pane) = self.leaf_pane(id) {
                    out.push((pane, rect));
                }
            });
        }
        out
    }

    pub fn draw_tree(&self) -> String {
        let Some(root) = self.root else {
            return "<empty>".to_string();
        };
        let mut out = String::new();
        if ascii_tree::write_tree(&mut out, &self.tree_node(root)).is_err() {
            return "<unprintable>".to_string();
        }
        out
    }

    fn surface(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    fn tree_node(&self, id: RegionId) -> Tree {
        match &self.regions[id].kind {
            RegionKind::Leaf { pane } => {
                let name = self.pane_name(*pane).unwrap_or_default();
                let marker = if self.focused == Some(id) { " *" } else { "" };
                Tree::Leaf(vec![format!("{pane} {name}{marker}")])
            }
            RegionKind::Split {
                orientation,
                ratio,
                first,
                second,
            } => Tree::Node(
                format!("{orientation:?} {ratio:.2}"),
                vec![self.tree_node(*first), self.tree_node(*second)],
            ),
        }
    }

    fn leaf_pane(&self, id: RegionId) -> Option<PaneId> {
        match self.regions.get(id)?.kind {
            RegionKind::Leaf { pane } => Some(pane),
            RegionKind::Split { .. } => None,
        }
    }

    fn leaves(&self) -> Vec<RegionId> {
        fn walk(host: &VirtualHost, id: RegionId, out: &mut Vec<RegionId>) {
            match &host.regions[id].kind {
                RegionKind::Leaf { .. } => out.push(id),
                RegionKind::Split { first, second, .. } => {
                    walk(host, *first, out);
                    walk(host, *second, out);
                }
            }
        }
        let mut out = Vec::new();
        if let Some(root) = self.root {
            walk(self, root, &mut out);
        }
        out
    }

    fn collect_frames(&self, id: RegionId, rect: Rect, f: &mut dyn FnMut(RegionId, Rect)) {
        match &self.regions[id].kind {
            RegionKind::Leaf { .. } => f(id, rect),
            RegionKind::Split {
                orientation,
                ratio,
                first,
                second,
            } => {
                let (r1, r2) = divide(rect, *orientation, *ratio);
                self.collect_frames(*first, r1, f);
                self.collect_frames(*second, r2, f);
            }
        }
    }

    fn frame_of(&self, target: RegionId) -> Option<Rect> {
        let mut found = None;
        if let Some(root) = self.root {
            self.collect_frames(root, self.surface(), &mut |id, rect| {
                if id == target {
                    found = Some(rect);
                }
            });
        }
        found
    }

    fn split(&mut self, orientation: Orientation) -> Result<(), HostError> {
        let focused = self.focused.ok_or(HostError::NoRegion)?;
        let pane = self.leaf_pane(focused).ok_or(HostError::NoRegion)?;
        let rect = self.frame_of(focused).ok_or(HostError::NoRegion)?;
        let fits = match orientation {
            Orientation::Horizontal => rect.width >= 2 * MIN_REGION_WIDTH,
            Orientation::Vertical => rect.height >= 2 * MIN_REGION_HEIGHT,
        };
        if !fits {
            return Err(HostError::RegionTooSmall {
                width: rect.width,
                height: rect.height,
            });
        }

        let first = self.regions.insert(Region { kind: RegionKind::Leaf { pane } });
        let second = self.regions.insert(Region { kind: RegionKind::Leaf { pane } });
        self.regions[focused].kind = RegionKind::Split {
            orientation,
            ratio: 0.5,
            first,
            second,
        };
        self.focused = Some(first);
        trace!(?orientation, %pane, "split region");
        Ok(())
    }

    /// Number of regions a same-axis chain rooted at `id` lays out along
    /// `orientation`.
    fn units_along(&self, id: RegionId, orientation: Orientation) -> u32 {
        match &self.regions[id].kind {
            RegionKind::Split {
                orientation: o,
                first,
                second,
                ..
            } if *o == orientation => {
                self.units_along(*first, orientation) + self.units_along(*second, orientation)
            }
            _ => 1,
        }
    }

    fn balance(&mut self, id: RegionId) {
        let RegionKind::Split {
            orientation,
            first,
            second,
            ..
        } = self.regions[id].kind.clone()
        else {
            return;
        };
        let a = self.units_along(first, orientation) as f64;
        let b = self.units_along(second, orientation) as f64;
        if let RegionKind::Split { ratio, .. } = &mut self.regions[id].kind {
            *ratio = a / (a + b);
        }
        self.balance(first);
        self.balance(second);
    }
}

fn divide(rect: Rect, orientation: Orientation, ratio: f64) -> (Rect, Rect) {
    match orientation {
        Orientation::Horizontal => {
            let first = (rect.width as f64 * ratio).round() as u32;
            (
                Rect { width: first, ..rect },
                Rect {
                    x: rect.x + first,
                    width: rect.width - first,
                    ..rect
                },
            )
        }
        Orientation::Vertical => {
            let first = (rect.height as f64 * ratio).round() as u32;
            (
                Rect { height: first, ..rect },
                Rect {
                    y: rect.y + first,
                    height: rect.height - first,
                    ..rect
                },
            )
        }
    }
}

impl Host for VirtualHost {
    fn visible_panes(&self) -> Vec<PaneId> {
        self.leaves().into_iter().filter_map(|r| self.leaf_pane(r)).collect()
    }

    fn all_panes(&self) -> Vec<PaneId> { self.panes.iter().map(|(id, _)| *id).collect() }

    fn focused_pane(&self) -> Option<PaneId> { self.focused.and_then(|r| self.leaf_pane(r)) }

    fn pane_name(&self, pane: PaneId) -> Option<String> {
        self.panes.iter().find(|(id, _)| *id == pane).map(|(_, name)| name.clone())
    }

    fn split_vertically(&mut self) -> Result<(), HostError> { self.split(Orientation::Vertical) }

    fn split_horizontally(&mut self) -> Result<(), HostError> {
        self.split(Orientation::Horizontal)
    }

    fn move_focus(&mut self, offset: i32) -> Result<(), HostError> {
        let leaves = self.leaves();
        let focused = self.focused.ok_or(HostError::NoRegion)?;
        let idx = leaves.iter().position(|r| *r == focused).ok_or(HostError::NoRegion)?;
        let next = (idx as i64 + offset as i64).rem_euclid(leaves.len() as i64) as usize;
        self.focused = Some(leaves[next]);
        Ok(())
    }

    fn set_pane(&mut self, pane: PaneId) -> Result<(), HostError> {
        if !self.panes.iter().any(|(id, _)| *id == pane) {
            return Err(HostError::UnknownPane(pane));
        }
        let focused = self.focused.ok_or(HostError::NoRegion)?;
        match &mut self.regions[focused].kind {
            RegionKind::Leaf { pane: shown } => {
                *shown = pane;
                Ok(())
            }
            RegionKind::Split { .. } => Err(HostError::NoRegion),
        }
    }

    fn delete_other_regions(&mut self) -> Result<(), HostError> {
        let pane = self.focused_pane().ok_or(HostError::NoRegion)?;
        self.regions.clear();
        let leaf = self.regions.insert(Region { kind: RegionKind::Leaf { pane } });
        self.root = Some(leaf);
        self.focused = Some(leaf);
        Ok(())
    }

    fn balance_regions(&mut self) -> Result<(), HostError> {
        if let Some(root) = self.root {
            self.balance(root);
        }
        Ok(())
    }
}
