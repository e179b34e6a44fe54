use std::fs;
use std::io::Read;
use std::path::Path;

use clap::ValueEnum;

use crate::block::Block;
use crate::config::Config;
use crate::error::{Error, Result};

/// Formats the command line tool can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Typst,
    Pdf,
    /// The block list itself, as pretty printed JSON
    Json,
}

impl OutputFormat {
    /// Binary formats cannot be written to a terminal.
    pub fn needs_output_file(self) -> bool {
        self == OutputFormat::Pdf
    }
}

/// Read solution text from `path`, or from `stdin` when the path is `-`.
pub fn read_input(path: &Path, mut stdin: impl Read) -> Result<String> {
    let read_error = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut input = String::new();
        stdin.read_to_string(&mut input).map_err(read_error)?;
        Ok(input)
    } else {
        fs::read_to_string(path).map_err(read_error)
    }
}

/// Render blocks in the given format. The caption, if any, heads the text
/// output and is ignored by the other formats.
pub fn render(
    format: OutputFormat,
    caption: Option<&str>,
    blocks: &[Block],
    config: &Config,
) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(caption) = caption {
                out.push_str(caption);
                out.push_str("\n\n");
            }
            out.push_str(&crate::blocks_to_text(blocks, config));
            out.into_bytes()
        }
        OutputFormat::Html => crate::blocks_to_html(blocks, config).into_bytes(),
        OutputFormat::Typst => crate::blocks_to_typst(blocks, config).into_bytes(),
        OutputFormat::Pdf => crate::blocks_to_pdf(blocks, config)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(blocks)?;
            json.push(b'\n');
            json
        }
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;

    #[test]
    fn dash_reads_stdin() {
        let input = read_input(Path::new("-"), "1. Reboot\n".as_bytes()).unwrap();
        assert_eq!(input, "1. Reboot\n");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_input(Path::new("/nonexistent/solution.txt"), "unused".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().starts_with("Error reading /nonexistent/solution.txt"));
    }

    #[test]
    fn json_lists_blocks() {
        let config = Config::compiled_default();
        let bytes = render(OutputFormat::Json, None, &format("Fix:\n2. Reboot"), &config).unwrap();
        let json = String::from_utf8(bytes).unwrap();

        assert!(json.ends_with("]\n"));
        let blocks: Vec<Block> = serde_json::from_str(&json).unwrap();
        assert_eq!(blocks, format("Fix:\n2. Reboot"));
        assert!(json.contains("\"kind\": \"step\""));
    }

    #[test]
    fn text_starts_with_caption() {
        let config = Config::compiled_default();
        let bytes = render(
            OutputFormat::Text,
            Some("AI-generated solution"),
            &format("OK"),
            &config,
        )
        .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "AI-generated solution\n\nOK\n");
    }

    #[test]
    fn caption_is_text_only() {
        let config = Config::compiled_default();
        let bytes = render(OutputFormat::Html, Some("AI-generated solution"), &format("OK"), &config).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "OK<br />\n");
    }

    #[test]
    fn only_pdf_needs_output_file() {
        assert!(OutputFormat::Pdf.needs_output_file());
        for format in [OutputFormat::Text, OutputFormat::Html, OutputFormat::Typst, OutputFormat::Json] {
            assert!(!format.needs_output_file());
        }
    }
}
