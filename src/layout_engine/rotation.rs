use tracing::{debug, info, instrument};

use super::candidates::PaneFilter;
use super::error::TileError;
use super::strategy::Strategy;
use crate::host::Host;

/// Fixed, ordered list of strategies and the one that ran last.
#[derive(Clone, Debug, Default)]
pub struct Rotation {
    strategies: Vec<Strategy>,
    last_executed: Option<Strategy>,
}

impl Rotation {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Rotation {
            strategies,
            last_executed: None,
        }
    }

    pub fn strategies(&self) -> &[Strategy] { &self.strategies }

    pub fn last_executed(&self) -> Option<&Strategy> { self.last_executed.as_ref() }

    pub fn select(&self, name: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.name() == name)
    }

    /// The strategy after `current`, wrapping around. Anything not in the
    /// list (including `None`) yields the first strategy.
    pub fn next_strategy(&self, current: Option<&Strategy>) -> Option<&Strategy> {
        match self.position(current) {
            Some(idx) => self.strategies.get((idx + 1) % self.strategies.len()),
            None => self.strategies.first(),
        }
    }

    /// The strategy before `current`, wrapping around. Anything not in the
    /// list yields the last strategy.
    pub fn previous_strategy(&self, current: Option<&Strategy>) -> Option<&Strategy> {
        let len = self.strategies.len();
        match self.position(current) {
            Some(idx) => self.strategies.get((idx + len - 1) % len),
            None => self.strategies.last(),
        }
    }

    /// What a plain `run` would execute: the successor of the last executed
    /// strategy, or of the last configured one before anything has run.
    pub fn upcoming(&self) -> Option<&Strategy> {
        let current = self.last_executed.as_ref().or(self.strategies.last());
        self.next_strategy(current)
    }

    fn position(&self, current: Option<&Strategy>) -> Option<usize> {
        let current = current?;
        self.strategies.iter().position(|s| s == current)
    }

    /// Tile with `strategy`, or the next one in rotation, and remember it.
    ///
    /// `window_count` defaults to the number of visible regions. On host
    /// failure the last executed strategy is left unchanged.
    #[instrument(name = "rotation::run", skip(self, host, strategy, filter))]
    pub fn run(
        &mut self,
        host: &mut dyn Host,
        window_count: Option<i64>,
        strategy: Option<Strategy>,
        filter: &PaneFilter,
    ) -> Result<(), TileError> {
        let strategy = match strategy {
            Some(strategy) => strategy,
            None => self.upcoming().cloned().ok_or(TileError::EmptyRotation)?,
        };
        let window_count = window_count
            .unwrap_or_else(|| host.visible_panes().len().try_into().unwrap_or(i64::MAX));
        debug!(strategy = strategy.name(), window_count, "running strategy");

        strategy.execute(host, window_count, filter)?;

        info!(strategy = strategy.name(), "tiled");
        self.last_executed = Some(strategy);
        Ok(())
    }
}
