//! Recovers document structure from unmarked solution text.
//!
//! Solutions come back from the model or the ticket database as plain prose,
//! sometimes with a numbered list run together on a single line. Formatting
//! happens in two passes: the text is first normalized so that every list
//! item starts on its own line, then each trimmed line is classified by the
//! first matching entry of [`RULES`].

use std::sync::LazyLock;

use regex::Regex;

use crate::block::Block;
use crate::config::FormatterConfig;

/// `". 2."`: a sentence ends and the next numbered item follows on the same line.
static ITEM_AFTER_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.\s+)([0-9]+\.)").unwrap());

/// `"thing 2."`: a numbered item follows a word with no closing punctuation.
static ITEM_AFTER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])\s+([0-9]+\.)").unwrap());

static STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:step\s+)?([0-9]+)[.:)]\s*(.+)$").unwrap());

static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*•]\s+(.+)$").unwrap());

/// One entry of the classification table.
pub struct Rule {
    pub name: &'static str,
    pub classify: fn(&str, &FormatterConfig) -> Option<Block>,
}

/// Classification rules in precedence order. The first rule that accepts a
/// line decides its block; `short_line` accepts everything.
pub const RULES: &[Rule] = &[
    Rule {
        name: "step",
        classify: classify_step,
    },
    Rule {
        name: "bullet",
        classify: classify_bullet,
    },
    Rule {
        name: "heading",
        classify: classify_heading,
    },
    Rule {
        name: "paragraph",
        classify: classify_paragraph,
    },
    Rule {
        name: "short_line",
        classify: classify_short_line,
    },
];

/// Format solution text using the default thresholds.
pub fn format(raw: &str) -> Vec<Block> {
    format_with_config(raw, &FormatterConfig::default())
}

/// Format a solution that may be missing altogether.
pub fn format_optional(raw: Option<&str>) -> Vec<Block> {
    raw.map(format).unwrap_or_default()
}

pub fn format_with_config(raw: &str, config: &FormatterConfig) -> Vec<Block> {
    if raw.is_empty() {
        return Vec::new();
    }

    let normalized = split_run_on_items(raw);
    let blocks: Vec<Block> = normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| classify_line(line, config))
        .collect();

    if blocks.is_empty() {
        tracing::debug!(len = raw.len(), "no text lines found, keeping input as one paragraph");
        return vec![Block::Paragraph {
            text: raw.to_string(),
        }];
    }

    tracing::debug!(blocks = blocks.len(), "formatted solution");
    blocks
}

/// Put every numbered item that was run into the previous sentence on its own line.
fn split_run_on_items(raw: &str) -> String {
    let text = ITEM_AFTER_SENTENCE.replace_all(raw, "${1}\n${2}");
    ITEM_AFTER_WORD.replace_all(&text, "${1}\n${2}").into_owned()
}

fn classify_line(line: &str, config: &FormatterConfig) -> Block {
    RULES
        .iter()
        .find_map(|rule| {
            let block = (rule.classify)(line, config)?;
            tracing::trace!(rule = rule.name, line, "classified line");
            Some(block)
        })
        .unwrap_or_else(|| Block::ShortLine {
            text: line.to_string(),
        })
}

fn classify_step(line: &str, _config: &FormatterConfig) -> Option<Block> {
    let caps = STEP.captures(line)?;
    Some(Block::Step {
        number: caps[1].to_string(),
        text: caps[2].trim().to_string(),
    })
}

fn classify_bullet(line: &str, _config: &FormatterConfig) -> Option<Block> {
    let caps = BULLET.captures(line)?;
    Some(Block::BulletItem {
        text: caps[1].trim().to_string(),
    })
}

fn classify_heading(line: &str, config: &FormatterConfig) -> Option<Block> {
    (line.ends_with(':') && line.chars().count() < config.heading_max_chars).then(|| {
        Block::Heading {
            text: line.to_string(),
        }
    })
}

fn classify_paragraph(line: &str, config: &FormatterConfig) -> Option<Block> {
    (line.chars().count() > config.paragraph_min_chars).then(|| Block::Paragraph {
        text: line.to_string(),
    })
}

fn classify_short_line(line: &str, _config: &FormatterConfig) -> Option<Block> {
    Some(Block::ShortLine {
        text: line.to_string(),
    })
}
