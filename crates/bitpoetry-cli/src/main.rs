use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;

use bitpoetry_core::{Vocabulary, decode_poem, decode_poem_report};

#[derive(Parser, Debug)]
#[command(name = "bitpoetry")]
#[command(version, long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ", env!("BITPOETRY_BUILD_COMMIT"),
    ", built ", env!("BITPOETRY_BUILD_DATE"), ")"
))]
#[command(
    about = "Decoder for Finite Poetry Protocol streams.",
    long_about = None,
    after_help = "Examples:\n  bitpoetry poem decode poem.bin -o poem.txt\n  bitpoetry poem decode poem.hex --hex --stdout\n  bitpoetry poem decode poem.bin --stdout --json --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on encoded poem streams.
    Poem {
        #[command(subcommand)]
        command: PoemCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PoemCommands {
    /// Decode a poem stream into rendered text (or a JSON report).
    #[command(alias = "render")]
    #[command(
        after_help = "Examples:\n  bitpoetry poem decode poem.bin -o poem.txt\n  bitpoetry poem render poem.bin --stdout\n  bitpoetry poem decode poem.hex --hex --stdout"
    )]
    Decode {
        /// Path to an encoded poem file
        input: PathBuf,

        /// Output path for the rendered text
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write rendered text to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Treat the input file as hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Emit a versioned JSON report instead of plain text
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json", conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long, requires = "json")]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Poem { command } => match command {
            PoemCommands::Decode {
                input,
                output,
                stdout,
                hex,
                json,
                pretty,
                compact,
                quiet,
            } => cmd_poem_decode(input, output, stdout, hex, json, pretty, compact, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_poem_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    hex: bool,
    json: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let output = if stdout {
        None
    } else {
        Some(output.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };

    if let Some(output_path) = output.as_ref() {
        if paths_collide(&resolved_input, output_path)? {
            return Err(CliError::new(
                format!(
                    "output path must differ from input: {}",
                    output_path.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }

    let poem = read_poem_bytes(&resolved_input, hex)?;
    let vocabulary = Vocabulary::reference();

    let rendered = if json {
        let report = decode_poem_report(&resolved_input.display().to_string(), &poem, &vocabulary)
            .map_err(|err| {
                CliError::new(
                    format!("poem decode failed: {}", err),
                    Some("check the input against the protocol wire format".to_string()),
                )
            })?;
        serialize_report(&report, pretty, compact)?
    } else {
        decode_poem(&poem, &vocabulary).map_err(|err| {
            CliError::new(
                format!("poem decode failed: {}", err),
                Some("check the input against the protocol wire format".to_string()),
            )
        })?
    };

    if stdout {
        print!("{}", rendered);
        return Ok(());
    }

    let output = output.expect("output required when not using stdout");
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&output, rendered)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    if !quiet {
        eprintln!("OK: poem written -> {}", output.display());
    }
    Ok(())
}

fn read_poem_bytes(input: &PathBuf, hex: bool) -> Result<Vec<u8>, CliError> {
    if !hex {
        return fs::read(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))
            .map_err(Into::into);
    }

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            format!("hex input has odd digit count ({})", digits.len()),
            Some("each byte needs two hex digits".to_string()),
        ));
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.as_bytes().chunks_exact(2) {
        let pair = std::str::from_utf8(pair).unwrap_or_default();
        let byte = u8::from_str_radix(pair, 16).map_err(|_| {
            CliError::new(
                format!("invalid hex byte '{}'", pair),
                Some("hex input may contain only 0-9, a-f and whitespace".to_string()),
            )
        })?;
        bytes.push(byte);
    }
    Ok(bytes)
}

fn serialize_report(
    report: &bitpoetry_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn paths_collide(input: &PathBuf, output: &PathBuf) -> Result<bool, CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_abs = output
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose();
    let Ok(Some(output_dir)) = output_abs else {
        // Output directory may not exist yet; it cannot collide then.
        return Ok(false);
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| CliError::new("invalid output path", None))?;
    Ok(output_dir.join(file_name) == input_abs)
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass an encoded poem file".to_string()),
        ));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass an encoded poem file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single poem file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches.iter().take(3).collect::<Vec<_>>();
        if !listed.is_empty() {
            let mut details = String::new();
            details.push_str("; matches: ");
            details.push_str(
                &listed
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if matches.len() > 3 {
                details.push_str(", ...");
            }
            message.push_str(&details);
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
