mod block;
mod config;
mod error;
mod formatter;
mod html;
mod output;
mod text;
mod ticket;
mod typst;

pub use block::{Block, BlockKind};
pub use config::{Config, FormatterConfig, PageConfig, RenderConfig};
pub use error::{Error, Result};
pub use formatter::{RULES, Rule, format, format_optional, format_with_config};
pub use output::{OutputFormat, read_input, render};
pub use ticket::{ResponseSource, SolutionRecord};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Render a solution's blocks as plain text using default config.
pub fn solution_to_text(raw: &str) -> String {
    solution_to_text_with_config(raw, &Config::compiled_default())
}

pub fn solution_to_text_with_config(raw: &str, config: &Config) -> String {
    let blocks = format_with_config(raw, &config.formatter);
    text::blocks_to_text(&blocks, config)
}

/// Render already formatted blocks as plain text.
pub fn blocks_to_text(blocks: &[Block], config: &Config) -> String {
    text::blocks_to_text(blocks, config)
}

/// Convert a solution to an HTML fragment using default config.
pub fn solution_to_html(raw: &str) -> String {
    solution_to_html_with_config(raw, &Config::compiled_default())
}

/// Convert a solution to an HTML fragment with custom config.
pub fn solution_to_html_with_config(raw: &str, config: &Config) -> String {
    let blocks = format_with_config(raw, &config.formatter);
    html::blocks_to_html(&blocks, config)
}

pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    html::blocks_to_html(blocks, config)
}

/// Convert a solution to Typst markup using default config.
pub fn solution_to_typst(raw: &str) -> String {
    solution_to_typst_with_config(raw, &Config::compiled_default())
}

/// Convert a solution to Typst markup with custom config.
pub fn solution_to_typst_with_config(raw: &str, config: &Config) -> String {
    let blocks = format_with_config(raw, &config.formatter);
    typst::blocks_to_typst(&blocks, config)
}

pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    typst::blocks_to_typst(blocks, config)
}

/// Convert a solution to PDF bytes using default config.
pub fn solution_to_pdf(raw: &str) -> Result<Vec<u8>> {
    solution_to_pdf_with_config(raw, &Config::compiled_default())
}

/// Convert a solution to PDF bytes with custom config.
pub fn solution_to_pdf_with_config(raw: &str, config: &Config) -> Result<Vec<u8>> {
    let blocks = format_with_config(raw, &config.formatter);
    blocks_to_pdf(&blocks, config)
}

/// Compile already formatted blocks to PDF bytes.
pub fn blocks_to_pdf(blocks: &[Block], config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = typst::blocks_to_typst(blocks, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
