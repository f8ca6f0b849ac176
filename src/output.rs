//! Output formatting for search results

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How search results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One file name per line
    Lines { color: bool },
    /// A JSON array of file names
    Json,
}

/// Print search results to stdout
pub fn print_search_results(files: &[String], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Lines { color } => {
            let choice = if color {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            };
            let mut stdout = StandardStream::stdout(choice);
            write_file_names(&mut stdout, files)
        }
        OutputFormat::Json => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_json(&mut lock, files)
        }
    }
}

/// Write file names, one per line, in magenta when the writer supports color
pub fn write_file_names<W: WriteColor>(out: &mut W, files: &[String]) -> io::Result<()> {
    for file in files {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", file)?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write the file names as a JSON array followed by a newline
pub fn write_json<W: Write>(out: &mut W, files: &[String]) -> io::Result<()> {
    serde_json::to_writer(&mut *out, files)?;
    writeln!(out)
}

/// Write words one per line
pub fn write_words<'a, W: Write>(
    out: &mut W,
    words: impl IntoIterator<Item = &'a str>,
) -> io::Result<()> {
    for word in words {
        writeln!(out, "{}", word)?;
    }
    Ok(())
}
