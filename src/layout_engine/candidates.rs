//! Candidate panes for a tiling pass.
//!
//! The sequence is visible panes first, then every other known pane, then
//! the focused pane repeated forever. Duplicates are dropped before the
//! padding phase and every element passes the active [`PaneFilter`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::RegexSet;
use tracing::trace;

use crate::common::collections::HashSet;
use crate::host::{Host, PaneId};

/// Minibuffer and prompt panes, e.g. ` *Minibuf-1*`.
pub const MINIBUFFER_PATTERN: &str = r"^ ?\*Minibuf(-[0-9]+)?\*$";

static MINIBUFFER_NAMES: Lazy<RegexSet> =
    Lazy::new(|| RegexSet::new([MINIBUFFER_PATTERN]).expect("minibuffer pattern is valid"));

/// Predicate deciding whether a pane may be tiled.
#[derive(Clone)]
pub enum PaneFilter {
    AcceptAll,
    /// Rejects panes whose display name matches any pattern.
    IgnoreNames(RegexSet),
    Custom(Arc<dyn Fn(PaneId, &str) -> bool>),
}

impl PaneFilter {
    pub fn minibuffer() -> Self { PaneFilter::IgnoreNames(MINIBUFFER_NAMES.clone()) }

    pub fn ignore_names<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(PaneFilter::IgnoreNames(RegexSet::new(patterns)?))
    }

    pub fn custom<F>(f: F) -> Self
    where F: Fn(PaneId, &str) -> bool + 'static {
        PaneFilter::Custom(Arc::new(f))
    }

    pub fn accepts(&self, host: &dyn Host, pane: PaneId) -> bool {
        match self {
            PaneFilter::AcceptAll => true,
            PaneFilter::IgnoreNames(set) => {
                host.pane_name(pane).is_none_or(|name| !set.is_match(&name))
            }
            PaneFilter::Custom(f) => f(pane, &host.pane_name(pane).unwrap_or_default()),
        }
    }
}

impl Default for PaneFilter {
    fn default() -> Self { PaneFilter::minibuffer() }
}

impl fmt::Debug for PaneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaneFilter::AcceptAll => f.write_str("AcceptAll"),
            PaneFilter::IgnoreNames(set) => {
                f.debug_tuple("IgnoreNames").field(&set.patterns()).finish()
            }
            PaneFilter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Lazy, unbounded candidate sequence. See [`candidates`].
pub struct Candidates<'a> {
    distinct: Box<dyn Iterator<Item = PaneId> + 'a>,
    focused: Option<PaneId>,
    last: Option<PaneId>,
    padding: Option<Option<PaneId>>,
}

impl Iterator for Candidates<'_> {
    type Item = PaneId;

    fn next(&mut self) -> Option<PaneId> {
        if self.padding.is_none() {
            if let Some(pane) = self.distinct.next() {
                self.last = Some(pane);
                return Some(pane);
            }
            // A rejected focused pane falls back to the last accepted one.
            let pad = self.focused.or(self.last);
            trace!(?pad, "candidate list exhausted, padding");
            self.padding = Some(pad);
        }
        self.padding.flatten()
    }
}

/// Fresh candidate sequence over the host's current panes.
///
/// The sequence never ends while at least one pane passes `filter`; it is
/// empty when none does.
pub fn candidates<'a>(host: &'a dyn Host, filter: &'a PaneFilter) -> Candidates<'a> {
    let focused = host.focused_pane().filter(|pane| filter.accepts(host, *pane));
    let mut seen = HashSet::default();
    let distinct = host
        .visible_panes()
        .into_iter()
        .chain(host.all_panes())
        .filter(move |pane| seen.insert(*pane))
        .filter(move |pane| filter.accepts(host, *pane));
    Candidates {
        distinct: Box::new(distinct),
        focused,
        last: None,
        padding: None,
    }
}

/// A non-positive count still tiles one pane.
pub fn clamp_count(count: i64) -> usize { usize::try_from(count.max(1)).unwrap_or(usize::MAX) }

/// The first `count` candidates, with `count <= 0` treated as 1.
pub fn get_buffers(host: &dyn Host, count: i64, filter: &PaneFilter) -> Vec<PaneId> {
    candidates(host, filter).take(clamp_count(count)).collect()
}
