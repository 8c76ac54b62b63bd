//! Subcommand implementations.
//!
//! Each command returns plain data; printing lives in the binary so these
//! stay testable.

use std::path::Path;

use anyhow::{Context, Result};
use ladder_model::parse_team;
use ladder_standards::StandardsConfig;
use ladder_validate::resolver::RULE_KEY_PREFIX;
use ladder_validate::{FormatCatalog, MessageKind, Problem};
use serde::Serialize;
use tracing::{info, info_span};

/// Load the catalog from `--data-dir`, `LADDER_DATA_DIR`, or the embedded data.
pub fn load_catalog(config: &StandardsConfig) -> Result<FormatCatalog> {
    FormatCatalog::load(config).context("load format catalog")
}

/// One row of `ladder formats`.
#[derive(Debug, Clone, Serialize)]
pub struct FormatRow {
    pub name: String,
    pub kind: &'static str,
    pub generation: u8,
    pub team_size: usize,
    /// `None` when the format resolved; otherwise the rejection message.
    pub rejected: Option<String>,
    pub description: Option<String>,
}

pub fn list_formats(catalog: &FormatCatalog) -> Vec<FormatRow> {
    let snapshot = catalog.snapshot();
    snapshot
        .registry()
        .iter()
        .map(|format| FormatRow {
            name: format.name.clone(),
            kind: format.kind.label(),
            generation: format.generation,
            team_size: format.team_size,
            rejected: snapshot.rejection(&format.name).map(ToString::to_string),
            description: format.description.clone(),
        })
        .collect()
}

/// Output of `ladder resolve`.
#[derive(Debug, Clone, Serialize)]
pub struct RulesetReport {
    pub format: String,
    pub rules: Vec<String>,
    /// Banned ids and tags, without `rule:` keys.
    pub bans: Vec<String>,
    pub complex_bans: Vec<String>,
    pub allowed: Vec<String>,
}

pub fn resolve_format(catalog: &FormatCatalog, format: &str) -> Result<RulesetReport> {
    let snapshot = catalog.snapshot();
    let ruleset = snapshot
        .resolve(format)
        .with_context(|| format!("resolve format '{format}'"))?;
    Ok(RulesetReport {
        format: display_name(catalog, format),
        rules: ruleset
            .ordered_rules
            .iter()
            .map(|entry| entry.name().to_string())
            .collect(),
        bans: ruleset
            .ban_set
            .iter()
            .filter(|key| !key.starts_with(RULE_KEY_PREFIX))
            .cloned()
            .collect(),
        complex_bans: ruleset.complex_bans.iter().map(ToString::to_string).collect(),
        allowed: ruleset.allowed.iter().map(ToString::to_string).collect(),
    })
}

/// Output of `ladder validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub format: String,
    pub team_size: usize,
    pub problems: Vec<Problem>,
}

impl ValidationReport {
    pub fn is_legal(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Read a team file and validate it.
pub fn validate_file(catalog: &FormatCatalog, format: &str, path: &Path) -> Result<ValidationReport> {
    let span = info_span!("validate_file", path = %path.display());
    let _guard = span.enter();

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read team file {}", path.display()))?;
    let mut team =
        parse_team(&text).with_context(|| format!("parse team file {}", path.display()))?;
    let problems = catalog
        .validate_team(&mut team, format)
        .with_context(|| format!("validate against '{format}'"))?;
    info!(sets = team.len(), problems = problems.len(), "Validated team");

    Ok(ValidationReport {
        format: display_name(catalog, format),
        team_size: team.len(),
        problems,
    })
}

/// Messages a match in `format` opens with.
pub fn announce(catalog: &FormatCatalog, format: &str) -> Result<Vec<(MessageKind, String)>> {
    let mut messages = Vec::new();
    catalog
        .start_match(format, &mut messages)
        .with_context(|| format!("start match in '{format}'"))?;
    Ok(messages)
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}

fn display_name(catalog: &FormatCatalog, format: &str) -> String {
    catalog
        .snapshot()
        .registry()
        .get(format)
        .map_or_else(|| format.to_string(), |found| found.name.clone())
}
