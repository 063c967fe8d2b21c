use serde::{Deserialize, Serialize};
use tracing::debug;

use super::candidates::PaneFilter;
use super::error::TileError;
use super::rotation::Rotation;
use super::strategy::{BuiltinStrategy, Strategy};
use crate::common::config::Config;
use crate::host::Host;

/// The user-facing tiling command.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TileCommand {
    /// Number of panes to tile. Defaults to the number of visible regions.
    #[serde(default)]
    pub window_count: Option<i64>,
    /// Strategy to run by name. Defaults to the next one in rotation.
    #[serde(default)]
    pub strategy: Option<String>,
    /// Step backwards through the rotation instead of forwards.
    #[serde(default)]
    pub reverse: bool,
}

/// Owns the rotation state and the pane filter used for every invocation.
pub struct TileEngine {
    rotation: Rotation,
    filter: PaneFilter,
}

impl TileEngine {
    pub fn new(rotation: Rotation, filter: PaneFilter) -> Self { TileEngine { rotation, filter } }

    pub fn from_config(config: &Config) -> Result<Self, TileError> {
        let strategies = config
            .settings
            .rotation
            .iter()
            .map(|spec| spec.to_strategy())
            .collect::<Result<Vec<_>, _>>()?;
        let filter = PaneFilter::ignore_names(&config.settings.filter.ignore_names)?;
        Ok(TileEngine::new(Rotation::new(strategies), filter))
    }

    pub fn rotation(&self) -> &Rotation { &self.rotation }

    pub fn filter(&self) -> &PaneFilter { &self.filter }

    /// Resolve a strategy name against the rotation first, then the
    /// built-in catalog.
    pub fn resolve(&self, name: &str) -> Result<Strategy, TileError> {
        if let Some(strategy) = self.rotation.select(name) {
            return Ok(strategy.clone());
        }
        name.parse::<BuiltinStrategy>()
            .map(BuiltinStrategy::strategy)
            .map_err(|_| TileError::UnknownStrategy(name.to_string()))
    }

    pub fn handle_command(
        &mut self,
        host: &mut dyn Host,
        command: &TileCommand,
    ) -> Result<(), TileError> {
        let strategy = match (&command.strategy, command.reverse) {
            (Some(name), _) => Some(self.resolve(name)?),
            (None, true) => {
                let current = self.rotation.last_executed().or(self.rotation.strategies().first());
                let previous = self.rotation.previous_strategy(current);
                Some(previous.cloned().ok_or(TileError::EmptyRotation)?)
            }
            (None, false) => None,
        };
        debug!(?command, "handling tile command");
        self.rotation.run(host, command.window_count, strategy, &self.filter)
    }
}
