//! Lifecycle hooks consulted by a match runtime.
//!
//! The validator never calls these. A runtime starts a match with
//! [`MatchContext::start`], which announces every active clause through a
//! [`MessageSink`], and then asks the context before applying a status.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use tracing::{info, trace};

use crate::resolver::EffectiveRuleset;
use crate::rules::Capabilities;

// =============================================================================
// Message sink
// =============================================================================

/// Kind of an emitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// The format being played.
    Format,
    /// An active rule or clause.
    Rule,
    /// A hook refused an action.
    Blocked,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageKind::Format => "format",
            MessageKind::Rule => "rule",
            MessageKind::Blocked => "blocked",
        })
    }
}

/// Destination for announcements. Transport is up to the implementor.
pub trait MessageSink {
    fn emit(&mut self, kind: MessageKind, text: &str);
}

impl MessageSink for Vec<(MessageKind, String)> {
    fn emit(&mut self, kind: MessageKind, text: &str) {
        self.push((kind, text.to_string()));
    }
}

/// Sink that logs every message at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn emit(&mut self, kind: MessageKind, text: &str) {
        info!(%kind, "{text}");
    }
}

// =============================================================================
// Status hooks
// =============================================================================

/// Non-volatile status conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Sleep,
    Burn,
    Paralysis,
    Poison,
    Toxic,
    Freeze,
}

/// A status about to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEvent {
    /// Side (0 or 1) of the target.
    pub side: usize,
    /// Team slot of the target.
    pub slot: usize,
    pub status: Status,
    /// Side that caused it; `None` for self-inflicted statuses (Rest).
    pub source_side: Option<usize>,
}

impl StatusEvent {
    pub fn caused_by_opponent(&self) -> bool {
        self.source_side.is_some_and(|source| source != self.side)
    }
}

/// Outcome of a status hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusDecision {
    Allow,
    /// The status is not applied; the message explains why.
    Block(String),
}

/// Mutable per-match state owned by hooks.
#[derive(Debug, Default, Clone)]
pub struct MatchState {
    /// Slots per side currently asleep because of the opponent.
    pub(crate) slept_by_opponent: BTreeMap<usize, BTreeSet<usize>>,
}

impl MatchState {
    /// Slots on `side` the opponent has put to sleep.
    pub fn slept_by_opponent(&self, side: usize) -> impl Iterator<Item = usize> + '_ {
        self.slept_by_opponent
            .get(&side)
            .into_iter()
            .flat_map(|slots| slots.iter().copied())
    }
}

/// One running match: the resolved ruleset plus hook state.
#[derive(Debug)]
pub struct MatchContext {
    ruleset: Arc<EffectiveRuleset>,
    state: MatchState,
}

impl MatchContext {
    /// Start a match, announcing the format and each active clause.
    pub fn start(name: &str, ruleset: Arc<EffectiveRuleset>, sink: &mut dyn MessageSink) -> Self {
        sink.emit(MessageKind::Format, &format!("Format: {name}"));
        for rule in ruleset.rules_with(Capabilities::ON_START) {
            rule.on_start(sink);
        }
        Self {
            ruleset,
            state: MatchState::default(),
        }
    }

    pub fn ruleset(&self) -> &Arc<EffectiveRuleset> {
        &self.ruleset
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Ask every status hook whether `event` may happen.
    ///
    /// The first rule that blocks wins; later rules are not consulted.
    pub fn set_status(&mut self, event: &StatusEvent) -> StatusDecision {
        for rule in self.ruleset.rules_with(Capabilities::ON_SET_STATUS) {
            trace!(rule = %rule.name(), ?event, "on_set_status");
            if let StatusDecision::Block(reason) = rule.on_set_status(&mut self.state, event) {
                return StatusDecision::Block(reason);
            }
        }
        StatusDecision::Allow
    }

    /// The target's status ended (woke up, cured, or fainted).
    pub fn clear_status(&mut self, side: usize, slot: usize) {
        if let Some(slots) = self.state.slept_by_opponent.get_mut(&side) {
            slots.remove(&slot);
        }
    }
}
