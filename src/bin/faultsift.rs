//! faultsift - Command Line Interface
//!
//! Batch conversions over fault-test records: dominance filtering, signature
//! minimization, simulator-log extraction, and JSON export.

use clap::{Parser, ValueEnum};
use faultsift::{
    dominance_workbook, minimized_table, records_from_table, write_json, CsvRead, CsvWrite,
    LogParser, SignatureRule, Table,
};
use std::io::Write;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, ValueEnum)]
enum Command {
    /// Mark dominated records and derive the minimal diagnostic set (default)
    Dominance,
    /// Assign each record a minimized don't-care signature
    Minimize,
    /// Extract detection records from a simulator report log
    Log2table,
    /// Export fault records as fixed-schema JSON
    Json,
    /// Print statistics about the input table
    Stats,
}

#[derive(Parser, Debug)]
#[command(name = "faultsift")]
#[command(about = "Fault-record dominance filtering and signature minimization", long_about = None)]
#[command(version = VERSION)]
struct Args {
    /// Input file: CSV fault table, or a report log for log2table
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Subcommand to execute
    #[arg(short = 'D', long = "do", value_enum, default_value = "dominance")]
    command: Command,

    /// Output file (single-table outputs; writes to stdout if not specified)
    #[arg(short = 'O', long = "out-file")]
    out_file: Option<PathBuf>,

    /// Output directory (multi-sheet outputs; one CSV per sheet)
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Compare operation signatures by superset containment instead of
    /// strict equality in the dominance test
    #[arg(long = "superset-ops")]
    superset_ops: bool,

    /// Provide execution summary on stderr
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Suppress printing of results
    #[arg(short = 'x', long = "no-output")]
    no_output: bool,
}

fn load_table(args: &Args) -> Table {
    match Table::from_csv_file(&args.input) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    }
}

fn emit_table(args: &Args, table: &Table) {
    if args.no_output {
        return;
    }
    let result = match &args.out_file {
        Some(path) => table.to_csv_file(path).map(|_| {
            if args.summary {
                eprintln!("Wrote output to: {}", path.display());
            }
        }),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            table.write_csv(&mut handle)
        }
    };
    if let Err(e) = result {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

fn out_dir(args: &Args) -> PathBuf {
    args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

fn main() {
    let args = Args::parse();

    let rule = if args.superset_ops {
        SignatureRule::Superset
    } else {
        SignatureRule::Exact
    };

    if args.summary {
        eprintln!("faultsift {}", VERSION);
        eprintln!();
    }

    match args.command {
        Command::Dominance => {
            let table = load_table(&args);
            if args.summary {
                eprintln!("Running dominance analysis over {} records...", table.num_rows());
            }
            let book = match dominance_workbook(&table, rule) {
                Ok(book) => book,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            if args.summary {
                let minimal = book.sheet("MinimalSet").map(|t| t.num_rows()).unwrap_or(0);
                eprintln!("Minimal set: {} of {} records", minimal, table.num_rows());
            }
            if !args.no_output {
                if let Err(e) = book.to_csv_dir(out_dir(&args)) {
                    eprintln!("Error writing output: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Minimize => {
            let table = load_table(&args);
            if args.summary {
                eprintln!("Minimizing signatures of {} records...", table.num_rows());
            }
            let out = match minimized_table(&table) {
                Ok(out) => out,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            emit_table(&args, &out);
        }
        Command::Log2table => {
            let parser = match LogParser::new() {
                Ok(parser) => parser,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let book = match parser.parse_file(&args.input) {
                Ok(book) => book,
                Err(e) => {
                    eprintln!("Error reading '{}': {}", args.input.display(), e);
                    process::exit(1);
                }
            };
            if args.summary {
                for sheet in book.sheets() {
                    eprintln!("{}: {} rows", sheet.name, sheet.table.num_rows());
                }
            }
            if !args.no_output {
                if let Err(e) = book.to_csv_dir(out_dir(&args)) {
                    eprintln!("Error writing output: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Json => {
            let table = load_table(&args);
            let records = match records_from_table(&table) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            if args.summary {
                eprintln!("Exporting {} records...", records.len());
            }
            if !args.no_output {
                let result = match &args.out_file {
                    Some(path) => std::fs::File::create(path)
                        .map_err(faultsift::SiftError::from)
                        .and_then(|file| {
                            let mut writer = std::io::BufWriter::new(file);
                            write_json(&mut writer, &records)?;
                            writer.flush()?;
                            Ok(())
                        }),
                    None => {
                        let stdout = std::io::stdout();
                        let mut handle = stdout.lock();
                        write_json(&mut handle, &records)
                    }
                };
                if let Err(e) = result {
                    eprintln!("Error writing output: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Stats => {
            let table = load_table(&args);
            println!("Table statistics:");
            println!("  Columns: {}", table.columns().len());
            println!("  Rows:    {}", table.num_rows());
            for column in table.columns() {
                println!("    {}", column);
            }
        }
    }

    if args.summary {
        eprintln!("Done.");
    }
}
