//! Simulator-report log parsing
//!
//! Fault-simulator runs emit a free-text report: a fault header, its numbered
//! subcases, and per-initialization detection lines, each optionally followed
//! by the list of detecting operations. This module extracts those records
//! into the tabular form the analyses and exporters consume — one sheet per
//! initialization value (`Init0`, `Init1`).
//!
//! A report fragment looks like:
//!
//! ```text
//! dynamic Read Disturb Fault
//! Subcase 0 < S / F / R >
//! Init 0: 0101 (0x5)
//!     R0, R1
//! Init 1: No detection
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::LogParseError;
use crate::table::{Table, Workbook};

/// Line prefixes that start a new section; a line opening with one of these is
/// never a detect-operation list.
const SECTION_PREFIXES: [&str; 11] = [
    "Init",
    "Subcase",
    "dynamic",
    "Stuck",
    "Transition",
    "Write",
    "Read",
    "Disturb",
    "Incorrect",
    "State",
    "Detected Rate",
];

/// Parser for fault-simulator report logs.
///
/// Compiles its line patterns once; reuse one parser across files.
#[derive(Debug)]
pub struct LogParser {
    fault_re: Regex,
    subcase_re: Regex,
    init_re: Regex,
}

struct DetectionRow {
    fault: String,
    subcase: String,
    sfr: String,
    syndrome: String,
    hex_syndrome: String,
    detect_ops: String,
}

impl LogParser {
    /// Build a parser. Fails only if a line pattern does not compile.
    pub fn new() -> Result<Self, LogParseError> {
        Ok(LogParser {
            fault_re: Regex::new(r"^\s*(.+?Fault.*)$")?,
            subcase_re: Regex::new(r"^Subcase\s+(\d+)\s+<\s*([^>]+?)\s*>")?,
            init_re: Regex::new(
                r"^Init\s+([01]):\s+([01]+|No detection)(?:\s+\((0x[0-9a-fA-F]+)\))?",
            )?,
        })
    }

    /// Parse a report from any buffered reader into a two-sheet workbook.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Workbook, LogParseError> {
        let lines: Vec<String> = reader.lines().collect::<io::Result<Vec<_>>>()?;

        let mut rows: [Vec<DetectionRow>; 2] = [Vec::new(), Vec::new()];
        let mut fault = String::new();
        let mut subcase = String::new();
        let mut sfr = String::new();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i].trim_end();

            if let Some(caps) = self.fault_re.captures(line) {
                fault = caps[1].trim().to_string();
                i += 1;
                continue;
            }

            if let Some(caps) = self.subcase_re.captures(line) {
                subcase = caps[1].to_string();
                sfr = caps[2].to_string();
                i += 1;
                continue;
            }

            if let Some(caps) = self.init_re.captures(line) {
                let init_id = if &caps[1] == "0" { 0 } else { 1 };
                let detected = &caps[2] != "No detection";
                let syndrome = if detected { caps[2].to_string() } else { String::new() };
                let hex_syndrome = caps
                    .get(3)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();

                // The detect-operation list, when present, is the next line —
                // unless that line opens a new section or is blank.
                let mut detect_ops = String::new();
                if let Some(next) = lines.get(i + 1) {
                    let next = next.trim_start();
                    if !next.is_empty() && !SECTION_PREFIXES.iter().any(|p| next.starts_with(p)) {
                        detect_ops = next.trim_end().to_string();
                        i += 1;
                    }
                }

                rows[init_id].push(DetectionRow {
                    fault: fault.clone(),
                    subcase: subcase.clone(),
                    sfr: sfr.clone(),
                    syndrome,
                    hex_syndrome,
                    detect_ops: if detected {
                        detect_ops
                    } else {
                        "No detection".to_string()
                    },
                });
            }

            i += 1;
        }

        let mut book = Workbook::new();
        for (init_id, init_rows) in rows.into_iter().enumerate() {
            let mut table = Table::new(&[
                "Fault Name".to_string(),
                "Subcase <idx>".to_string(),
                "<S / F / R>".to_string(),
                format!("Init {} <syndrome>", init_id),
                format!("Init {} <hex_syndrome>", init_id),
                format!("Init {} <detect OPs>", init_id),
            ]);
            for row in init_rows {
                table.push_row(vec![
                    row.fault,
                    row.subcase,
                    row.sfr,
                    row.syndrome,
                    row.hex_syndrome,
                    row.detect_ops,
                ]);
            }
            book.add_sheet(&format!("Init{}", init_id), table);
        }
        Ok(book)
    }

    /// Parse a report held in memory.
    pub fn parse_string(&self, s: &str) -> Result<Workbook, LogParseError> {
        use std::io::Cursor;
        self.parse(Cursor::new(s.as_bytes()))
    }

    /// Parse a report file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Workbook, LogParseError> {
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }
}
