use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd, html};

use crate::block::Block;
use crate::config::Config;

const HEADING_LEVEL: HeadingLevel = HeadingLevel::H4;

/// Convert blocks to an HTML fragment.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let events = blocks_to_events(blocks, config);
    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    tracing::debug!(blocks = blocks.len(), bytes = out.len(), "rendered html");
    out
}

/// Lower blocks to the event stream pulldown-cmark renders, so escaping is
/// handled by its HTML writer.
fn blocks_to_events<'a>(blocks: &'a [Block], config: &'a Config) -> Vec<Event<'a>> {
    let mut events = Vec::new();

    if blocks.is_empty() {
        events.push(Event::Start(Tag::Paragraph));
        events.push(Event::Text(config.render.empty_message.as_str().into()));
        events.push(Event::End(TagEnd::Paragraph));
        return events;
    }

    let badge_open = format!(
        "<span class=\"{}\">",
        sanitize_class(&config.render.step_badge_class)
    );
    let mut in_list = false;

    for block in blocks {
        let is_bullet = matches!(block, Block::BulletItem { .. });
        if in_list && !is_bullet {
            events.push(Event::End(TagEnd::List(false)));
            in_list = false;
        }

        match block {
            Block::Heading { text } => {
                events.push(Event::Start(Tag::Heading {
                    level: HEADING_LEVEL,
                    id: None,
                    classes: Vec::new(),
                    attrs: Vec::new(),
                }));
                events.push(Event::Text(text.as_str().into()));
                events.push(Event::End(TagEnd::Heading(HEADING_LEVEL)));
            }
            Block::Step { number, text } => {
                events.push(Event::Start(Tag::Paragraph));
                events.push(Event::InlineHtml(CowStr::from(badge_open.clone())));
                events.push(Event::Text(number.as_str().into()));
                events.push(Event::InlineHtml("</span> ".into()));
                events.push(Event::Text(text.as_str().into()));
                events.push(Event::End(TagEnd::Paragraph));
            }
            Block::BulletItem { text } => {
                if !in_list {
                    events.push(Event::Start(Tag::List(None)));
                    in_list = true;
                }
                events.push(Event::Start(Tag::Item));
                events.push(Event::Text(text.as_str().into()));
                events.push(Event::End(TagEnd::Item));
            }
            Block::Paragraph { text } => {
                events.push(Event::Start(Tag::Paragraph));
                events.push(Event::Text(text.as_str().into()));
                events.push(Event::End(TagEnd::Paragraph));
            }
            Block::ShortLine { text } => {
                events.push(Event::Text(text.as_str().into()));
                events.push(Event::HardBreak);
            }
        }
    }

    if in_list {
        events.push(Event::End(TagEnd::List(false)));
    }

    events
}

/// Keep only characters that are safe inside a class attribute.
fn sanitize_class(class: &str) -> String {
    class
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect()
}
