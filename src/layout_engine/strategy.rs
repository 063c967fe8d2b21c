use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, instrument, warn};

use super::candidates::{PaneFilter, get_buffers};
use super::layouts::{Arrange, Layout, MasterPosition};
use crate::host::{Host, HostError, PaneId};

/// Upper bound on the panes a single execution lays out. Each one needs its
/// own region, so larger counts can only end in a failed split.
pub const MAX_TILED_PANES: i64 = 256;

/// Decides how many panes a strategy tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferFetcher {
    /// Uses the count supplied at invocation time.
    Argument,
    /// Always fetches the same number of panes.
    FixedN(usize),
}

impl BufferFetcher {
    pub fn count(self, caller_count: i64) -> i64 {
        match self {
            BufferFetcher::Argument => caller_count,
            BufferFetcher::FixedN(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }

    pub fn get_buffers(
        self,
        host: &dyn Host,
        caller_count: i64,
        filter: &PaneFilter,
    ) -> Vec<PaneId> {
        get_buffers(host, self.count(caller_count), filter)
    }
}

/// A buffer fetcher bound to the layout that arranges what it fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    name: String,
    fetcher: BufferFetcher,
    layout: Layout,
}

impl Strategy {
    pub fn new(name: impl Into<String>, fetcher: BufferFetcher, layout: Layout) -> Self {
        Strategy {
            name: name.into(),
            fetcher,
            layout,
        }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn fetcher(&self) -> BufferFetcher { self.fetcher }

    pub fn layout(&self) -> &Layout { &self.layout }

    pub fn get_buffers(
        &self,
        host: &dyn Host,
        caller_count: i64,
        filter: &PaneFilter,
    ) -> Vec<PaneId> {
        self.fetcher.get_buffers(host, caller_count, filter)
    }

    /// Fetch panes, clear the surface down to one region and lay them out.
    ///
    /// Panes are collected before the surface is cleared since collection
    /// reads the current regions. Does nothing when no pane is available.
    #[instrument(name = "strategy::execute", skip(self, host, filter), fields(strategy = %self.name))]
    pub fn execute(
        &self,
        host: &mut dyn Host,
        caller_count: i64,
        filter: &PaneFilter,
    ) -> Result<(), HostError> {
        let mut count = self.fetcher.count(caller_count);
        if count > MAX_TILED_PANES {
            warn!(count, max = MAX_TILED_PANES, "pane count capped");
            count = MAX_TILED_PANES;
        }
        let buffers = get_buffers(&*host, count, filter);
        if buffers.is_empty() {
            debug!("no panes to tile");
            return Ok(());
        }
        debug!(?buffers, "tiling");
        host.delete_other_regions()?;
        self.layout.apply(host, &buffers)
    }
}

/// Strategies available by name without configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltinStrategy {
    MasterLeft,
    MasterRight,
    MasterTop,
    MasterBottom,
    Wide,
    Tall,
    Monocle,
}

impl BuiltinStrategy {
    pub fn strategy(self) -> Strategy {
        let (fetcher, layout) = match self {
            BuiltinStrategy::MasterLeft => {
                (BufferFetcher::Argument, Layout::master(MasterPosition::Left))
            }
            BuiltinStrategy::MasterRight => {
                (BufferFetcher::Argument, Layout::master(MasterPosition::Right))
            }
            BuiltinStrategy::MasterTop => {
                (BufferFetcher::Argument, Layout::master(MasterPosition::Top))
            }
            BuiltinStrategy::MasterBottom => {
                (BufferFetcher::Argument, Layout::master(MasterPosition::Bottom))
            }
            BuiltinStrategy::Wide => (BufferFetcher::Argument, Layout::wide()),
            BuiltinStrategy::Tall => (BufferFetcher::Argument, Layout::tall()),
            BuiltinStrategy::Monocle => (BufferFetcher::FixedN(1), Layout::wide()),
        };
        Strategy::new(self.to_string(), fetcher, layout)
    }
}
