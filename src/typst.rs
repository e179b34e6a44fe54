use crate::block::Block;
use crate::config::Config;

/// Numbered badge followed by the step text, used for every `Block::Step`.
const STEP_FUNCTION: &str = "#let step(num, body) = grid(columns: (auto, 1fr), column-gutter: 0.6em, box(fill: luma(230), inset: (x: 0.4em, y: 0.2em), radius: 3pt)[*#num*], body)\n";

/// Runs of bullet items render as one list, everything else stands alone.
enum Unit<'a> {
    Single(&'a Block),
    Bullets(Vec<&'a str>),
}

fn group_units(blocks: &[Block]) -> Vec<Unit<'_>> {
    let mut units: Vec<Unit<'_>> = Vec::new();
    for block in blocks {
        let Block::BulletItem { text } = block else {
            units.push(Unit::Single(block));
            continue;
        };
        if let Some(Unit::Bullets(items)) = units.last_mut() {
            items.push(text.as_str());
            continue;
        }
        units.push(Unit::Bullets(vec![text.as_str()]));
    }
    units
}

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    out.push_str("#set page(paper: ");
    push_string_literal(&config.page.paper, &mut out);
    out.push_str(")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push_str(STEP_FUNCTION);
    out.push('\n');

    if blocks.is_empty() {
        escape_text(&config.render.empty_message, &mut out);
        out.push_str("\n\n");
        return out;
    }

    let units = group_units(blocks);
    let mut i = 0;
    while i < units.len() {
        match &units[i] {
            Unit::Single(Block::Heading { text }) => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(text, &mut out);

                if i + 1 < units.len() {
                    i += 1;
                    emit_unit(&units[i], &mut out);
                }
                out.push_str("]\n\n");
            }
            unit => emit_unit(unit, &mut out),
        }

        i += 1;
    }

    tracing::debug!(blocks = blocks.len(), bytes = out.len(), "rendered typst");
    out
}

fn emit_heading(text: &str, out: &mut String) {
    out.push_str("#strong[");
    escape_text(text, out);
    out.push_str("]\n\n");
}

fn emit_unit(unit: &Unit<'_>, out: &mut String) {
    match unit {
        Unit::Bullets(items) => {
            // Wrap list to keep together when small, allow breaks when large
            if items.len() <= 5 {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(items, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(items, out);
                out.push('\n');
            }
        }
        Unit::Single(block) => emit_block(block, out),
    }
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { text } => emit_heading(text, out),
        Block::Step { number, text } => {
            out.push_str("#step(");
            push_string_literal(number, out);
            out.push_str(")[");
            escape_text(text, out);
            out.push_str("]\n\n");
        }
        Block::BulletItem { text } => list_to_typst(&[text.as_str()], out),
        Block::Paragraph { text } => {
            escape_text(text, out);
            out.push_str("\n\n");
        }
        Block::ShortLine { text } => {
            escape_text(text, out);
            out.push_str(" \\\n");
        }
    }
}

fn list_to_typst(items: &[&str], out: &mut String) {
    for item in items {
        out.push_str("- ");
        escape_text(item, out);
        out.push('\n');
    }
}

/// Escape text for Typst markup mode.
fn escape_text(text: &str, out: &mut String) {
    // Line-start markers would otherwise open a list, enum or heading.
    let enum_marker = text
        .find(|c: char| !c.is_ascii_digit())
        .filter(|&end| end > 0 && text[end..].starts_with('.'));

    for (i, ch) in text.char_indices() {
        let line_start_marker = i == 0 && matches!(ch, '-' | '+' | '=');
        if line_start_marker || enum_marker == Some(i) {
            out.push('\\');
            out.push(ch);
            continue;
        }
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn push_string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}
