use std::fs::File;
use std::io::{ BufReader, Read };
use std::path::Path;

use algorithm::string::WhitespaceSqueezer;
use errors::*;

/// Turns raw AMR text into the single-line strings the parser reads. Graphs are separated by
/// blank lines; comment lines (`# ::snt ...`) are dropped.
pub struct EntryReader {
    squeezer: WhitespaceSqueezer
}

impl EntryReader {
    pub fn new() -> EntryReader {
        EntryReader { squeezer: WhitespaceSqueezer::new() }
    }

    /// Normalize one block of text into a single line
    pub fn clean_entry(&self, block: &str) -> String {
        let lines = block.lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect::<Vec<_>>();

        self.squeezer.squeeze(&lines.join(" ")).trim().to_owned()
    }

    /// Split a text into blocks separated by blank lines and clean each of them. Blocks that are
    /// empty after cleaning (e.g. only comments) are skipped.
    pub fn split_segments(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    segments.push(self.clean_entry(&block.join("\n")));
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }
        if !block.is_empty() {
            segments.push(self.clean_entry(&block.join("\n")));
        }

        segments.retain(|s| !s.is_empty());
        segments
    }

    /// Read every graph of an AMR file
    pub fn read_entries(&self, fpath: &Path) -> Result<Vec<String>> {
        let mut content = String::new();
        BufReader::new(File::open(fpath).chain_err(|| format!("Cannot open AMR file: {:?}", fpath))?)
            .read_to_string(&mut content)?;

        Ok(self.split_segments(&content))
    }
}

/// A table cell that holds a number (NaN included) instead of AMR text is an empty entry
pub fn text_cell(cell: &str) -> &str {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed.parse::<f64>().is_ok() {
        ""
    } else {
        cell
    }
}
