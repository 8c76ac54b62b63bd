//! Per-validation context.

use ladder_standards::EntityLookup;

use crate::registry::Format;
use crate::resolver::EffectiveRuleset;

/// State shared by the rules of one validation request.
///
/// Lives for a single call; nothing here outlives the request.
pub struct ValidationContext<'a> {
    pub format: &'a Format,
    pub ruleset: &'a EffectiveRuleset,
    pub dex: &'a dyn EntityLookup,
    /// Zero-power moves seen so far on Uber-weighted sets.
    pub(crate) uber_zero_power_moves: usize,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        format: &'a Format,
        ruleset: &'a EffectiveRuleset,
        dex: &'a dyn EntityLookup,
    ) -> Self {
        Self {
            format,
            ruleset,
            dex,
            uber_zero_power_moves: 0,
        }
    }
}
