use super::{Host, HostError, PaneId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    SplitVertically,
    SplitHorizontally,
    MoveFocus(i32),
    SetPane(PaneId),
    DeleteOtherRegions,
    BalanceRegions,
}

impl Call {
    pub fn is_split(self) -> bool {
        matches!(self, Call::SplitVertically | Call::SplitHorizontally)
    }
}

/// Host double that answers enumeration queries from fixed lists and
/// records every side-effecting call in order.
#[derive(Default)]
pub struct RecordingHost {
    pub panes: Vec<(PaneId, String)>,
    pub visible: Vec<PaneId>,
    pub focused: Option<PaneId>,
    pub calls: Vec<Call>,
    /// Number of splits that succeed before every further split fails.
    pub splits_allowed: Option<usize>,
}

pub fn p(idx: u32) -> PaneId { PaneId::new(idx) }

impl RecordingHost {
    /// Panes named `buf-N`, all of them visible, the first one focused.
    pub fn with_panes(count: u32) -> Self {
        let panes: Vec<_> = (1..=count).map(|i| (p(i), format!("buf-{i}"))).collect();
        let visible = panes.iter().map(|(id, _)| *id).collect();
        RecordingHost {
            focused: panes.first().map(|(id, _)| *id),
            panes,
            visible,
            ..Default::default()
        }
    }

    pub fn add_pane(&mut self, idx: u32, name: &str) -> PaneId {
        self.panes.push((p(idx), name.to_string()));
        if self.focused.is_none() {
            self.focused = Some(p(idx));
        }
        p(idx)
    }

    pub fn split_count(&self) -> usize { self.calls.iter().filter(|c| c.is_split()).count() }

    pub fn placed(&self) -> Vec<PaneId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetPane(pane) => Some(*pane),
                _ => None,
            })
            .collect()
    }

    fn record_split(&mut self, call: Call) -> Result<(), HostError> {
        if let Some(allowed) = self.splits_allowed {
            if self.split_count() >= allowed {
                return Err(HostError::RegionTooSmall { width: 4, height: 2 });
            }
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Host for RecordingHost {
    fn visible_panes(&self) -> Vec<PaneId> { self.visible.clone() }

    fn all_panes(&self) -> Vec<PaneId> { self.panes.iter().map(|(id, _)| *id).collect() }

    fn focused_pane(&self) -> Option<PaneId> { self.focused }

    fn pane_name(&self, pane: PaneId) -> Option<String> {
        self.panes.iter().find(|(id, _)| *id == pane).map(|(_, name)| name.clone())
    }

    fn split_vertically(&mut self) -> Result<(), HostError> {
        self.record_split(Call::SplitVertically)
    }

    fn split_horizontally(&mut self) -> Result<(), HostError> {
        self.record_split(Call::SplitHorizontally)
    }

    fn move_focus(&mut self, offset: i32) -> Result<(), HostError> {
        self.calls.push(Call::MoveFocus(offset));
        Ok(())
    }

    fn set_pane(&mut self, pane: PaneId) -> Result<(), HostError> {
        self.calls.push(Call::SetPane(pane));
        Ok(())
    }

    fn delete_other_regions(&mut self) -> Result<(), HostError> {
        self.calls.push(Call::DeleteOtherRegions);
        Ok(())
    }

    fn balance_regions(&mut self) -> Result<(), HostError> {
        self.calls.push(Call::BalanceRegions);
        Ok(())
    }
}
