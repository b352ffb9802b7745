//! Move and replace transformation rules.
//!
//! Rules arrive as `from||to||paths` strings in the config file and are parsed
//! once, at deserialization time, into [`TransformRule`]. Rendering turns them
//! back into `core.move(...)` / `core.replace(...)` clauses.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Separator between the fields of an encoded rule.
pub const RULE_DELIMITER: &str = "||";

/// Path glob used when a rule does not name one.
pub const ALL_FILES: &str = "**";

/// One move or replace edit, scoped by a path glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRule {
    pub from: String,
    pub to: String,
    pub paths: String,
}

impl TransformRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>, paths: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            paths: paths.into(),
        }
    }

    /// Parse an encoded `from||to||paths` rule.
    ///
    /// Returns `None` for an empty string. A missing `to` becomes the empty
    /// string, a missing or empty `paths` becomes `**`, and anything after a
    /// third delimiter is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let mut parts = raw.split(RULE_DELIMITER);
        let from = parts.next().unwrap_or_default();
        let to = parts.next().unwrap_or_default();
        let paths = match parts.next() {
            Some(p) if !p.is_empty() => p,
            _ => ALL_FILES,
        };

        Some(Self::new(from, to, paths))
    }
}

impl fmt::Display for TransformRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.from,
            self.to,
            self.paths,
            d = RULE_DELIMITER
        )
    }
}

/// Parse a list of encoded rules, dropping empty entries.
pub fn parse_rules<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<TransformRule> {
    raw.into_iter().filter_map(TransformRule::parse).collect()
}

/// serde helper for `Vec<TransformRule>` fields encoded as string lists.
pub(crate) fn deserialize_rules<'de, D>(deserializer: D) -> Result<Vec<TransformRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(parse_rules(raw.iter().map(String::as_str)))
}

/// The Copybara transformation a rule renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Move,
    Replace,
}

impl TransformKind {
    fn method(self) -> &'static str {
        match self {
            TransformKind::Move => "move",
            TransformKind::Replace => "replace",
        }
    }
}

/// Which workflow a transformation block is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Push,
    Pr,
}

/// Render a single rule as a clause, including its leading newline and
/// indentation.
pub fn render_clause(kind: TransformKind, rule: &TransformRule) -> String {
    format!(
        "\n        core.{}(\"{}\", \"{}\", paths = glob([\"{}\"])),",
        kind.method(),
        rule.from,
        rule.to,
        rule.paths
    )
}

fn render_block(kind: TransformKind, rules: &[TransformRule]) -> String {
    rules.iter().map(|rule| render_clause(kind, rule)).collect()
}

/// Render the transformation block for one side of the sync.
///
/// Push applies moves before replaces. PR applies replaces before moves.
pub fn render_transformations(
    moves: &[TransformRule],
    replacements: &[TransformRule],
    side: Side,
) -> String {
    let moved = render_block(TransformKind::Move, moves);
    let replaced = render_block(TransformKind::Replace, replacements);

    match side {
        Side::Push => moved + &replaced,
        Side::Pr => replaced + &moved,
    }
}
