//! fshgen CLI - Convert terminology tables to FSH
//!
//! # Commands
//!
//! ```bash
//! fshgen convert terms.xlsx --code code --display uz --ru ru --en en --la la
//! fshgen convert terms.csv --mapping mapping.json -o concepts.fsh
//! fshgen columns terms.xlsx          # Show columns and detected lang:xx columns
//! fshgen example-mapping             # Print a mapping profile template
//! ```

use clap::{Parser, Subcommand};
use fshgen::config::EnvDefaults;
use fshgen::logs::LOG_BROADCASTER;
use fshgen::transform::{extra_languages, EXTRA_LANGUAGE_PREFIX};
use fshgen::{
    classify, convert_file, example_mapping, load_mapping, read_table, resolve_bindings,
    BindingOverrides, ConfigError, ConvertOptions, LanguageTag, ReadOptions,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fshgen")]
#[command(about = "Convert spreadsheet terminology tables to FSH concepts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an Excel/CSV/TSV table to FSH
    Convert {
        /// Input file (.xlsx, .xls, .ods, .csv, .tsv)
        input: PathBuf,

        /// Output file (default: <input-name>.fsh)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Delimiter override (default: ',' for .csv, tab for .tsv)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Mapping profile JSON (overridden by column flags)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Column holding the concept code
        #[arg(long)]
        code: Option<String>,

        /// Column holding the display text
        #[arg(long, alias = "uz")]
        display: Option<String>,

        /// Column for the Russian designation
        #[arg(long)]
        ru: Option<String>,

        /// Column for the English designation
        #[arg(long)]
        en: Option<String>,

        /// Column for the Latin designation
        #[arg(long)]
        la: Option<String>,

        /// Additional conventional designation, as TAG=COLUMN (repeatable)
        #[arg(long = "lang", value_parser = parse_lang_binding)]
        langs: Vec<(LanguageTag, String)>,

        /// Don't print progress
        #[arg(short, long)]
        quiet: bool,
    },

    /// List columns and detected extra language columns
    Columns {
        /// Input file
        input: PathBuf,

        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Delimiter override (default: ',' for .csv, tab for .tsv)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Show an example mapping profile
    ExampleMapping,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let env = EnvDefaults::from_env();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            sheet,
            delimiter,
            mapping,
            code,
            display,
            ru,
            en,
            la,
            langs,
            quiet,
        } => collect_secondary(ru, en, la, langs)
            .map_err(Into::into)
            .and_then(|secondary| {
                cmd_convert(
                    &input,
                    output,
                    ReadOptions {
                        sheet: sheet.or(env.sheet.clone()),
                        delimiter,
                    },
                    mapping.or(env.mapping.clone()).as_deref(),
                    BindingOverrides {
                        code,
                        display,
                        secondary,
                    },
                    quiet,
                )
            }),

        Commands::Columns {
            input,
            sheet,
            delimiter,
        } => cmd_columns(
            &input,
            &ReadOptions {
                sheet: sheet.or(env.sheet),
                delimiter,
            },
        ),

        Commands::ExampleMapping => cmd_example_mapping(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `--ru/--en/--la` in that order, then any `--lang` bindings.
fn collect_secondary(
    ru: Option<String>,
    en: Option<String>,
    la: Option<String>,
    langs: Vec<(LanguageTag, String)>,
) -> Result<Vec<(LanguageTag, String)>, ConfigError> {
    let mut secondary = Vec::new();
    for (tag, column) in [("ru", ru), ("en", en), ("la", la)] {
        if let Some(column) = column {
            secondary.push((LanguageTag::new(tag)?, column));
        }
    }
    secondary.extend(langs);
    Ok(secondary)
}

fn parse_lang_binding(s: &str) -> Result<(LanguageTag, String), String> {
    let (tag, column) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=COLUMN, got '{}'", s))?;
    let tag = LanguageTag::new(tag).map_err(|e| e.to_string())?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("empty column name in '{}'", s));
    }
    Ok((tag, column.to_string()))
}

fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    read: ReadOptions,
    mapping: Option<&Path>,
    overrides: BindingOverrides,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    LOG_BROADCASTER.set_quiet(quiet);

    let profile = match mapping {
        Some(path) => Some(load_mapping(path)?),
        None => None,
    };
    let bindings = resolve_bindings(profile, overrides)?;

    let options = ConvertOptions {
        input: input.to_path_buf(),
        output,
        read,
        bindings,
    };
    let report = convert_file(&options)?;

    if !quiet {
        println!("Done. Wrote {}", report.output.display());
    }
    Ok(())
}

fn cmd_columns(input: &Path, read: &ReadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let table = read_table(input, read)?;
    let columns = &table.dataset.columns;

    println!("{} ({}, {} rows)", input.display(), table.format, table.dataset.rows.len());
    for (i, col) in columns.iter().enumerate() {
        println!("  [{:2}] {}", i + 1, col);
    }

    let detected = classify(columns);
    if detected.is_empty() {
        println!("\nNo extra language columns ({}xx).", EXTRA_LANGUAGE_PREFIX);
        return Ok(());
    }

    let emitted = extra_languages(columns, &example_mapping());
    println!("\nExtra language columns:");
    for (tag, column) in detected.iter() {
        let note = if emitted.get(tag.as_str()).is_some() {
            ""
        } else {
            "  (ignored: conventional language)"
        };
        println!("  #{} <- {}{}", tag, column, note);
    }
    Ok(())
}

fn cmd_example_mapping() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", example_mapping().to_json()?);
    Ok(())
}
