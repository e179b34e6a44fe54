use crate::block::Block;
use crate::config::Config;

/// Convert blocks back to plain text, one block per line.
///
/// Formatting the result again yields the same blocks for well-formed
/// solutions; ambiguous lines may still classify differently.
pub fn blocks_to_text(blocks: &[Block], config: &Config) -> String {
    if blocks.is_empty() {
        return format!("{}\n", config.render.empty_message);
    }

    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Step { number, text } => {
                out.push_str(number);
                out.push_str(". ");
                out.push_str(text);
            }
            Block::BulletItem { text } => {
                out.push_str("- ");
                out.push_str(text);
            }
            Block::Heading { text } | Block::Paragraph { text } | Block::ShortLine { text } => {
                out.push_str(text);
            }
        }
        out.push('\n');
    }
    out
}
