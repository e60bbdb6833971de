// Command-line interface for vitae
//
// This binary fetches resumes from the remote resume service and converts resume HTML into PDF
// and DOCX documents. All of the conversion work happens in the vitae-babel library; this crate
// only deals with arguments, configuration, files and exit codes.
//
// Usage:
//  vitae fetch <token> [-o <dir>] [--name <stem>] [--to pdf|docx|all]  - Fetch and convert
//  vitae convert <input.html> -o <file> [--to pdf|docx]                 - Convert a local file
//  vitae inspect <input.html>                                          - Print the blocks as JSON
//  vitae list-formats                                                  - List export formats
//
// Extra Parameters:
//
// Configuration values can be overridden per run using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies the value over the loaded configuration.
// Example:
//  vitae convert cv.html -o cv.pdf --extra-page-size letter --extra-inline-mode cascade

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use vitae_babel::fetch::ResumeClient;
use vitae_babel::formats::html::HtmlImporter;
use vitae_babel::{convert, Conversion, FormatRegistry, FormatSelection};
use vitae_config::{InlineModeConfig, Loader, PdfPageSize, VitaeConfig, LOCAL_CONFIG_FILE};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("vitae")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fetch resumes and convert them to PDF and DOCX")
        .long_about(
            "vitae is a command-line tool for turning resume HTML into documents.\n\n\
            Commands:\n  \
            - fetch:        Download a resume by access token and convert it\n  \
            - convert:      Convert a local HTML file\n  \
            - inspect:      Show the structure extracted from an HTML file\n  \
            - list-formats: List the export formats\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> <value> to override a configuration value for one run:\n  \
            page-size, margin-pt, body-font-size, inline-mode, title,\n  \
            base-url, user-agent, timeout-secs.\n\n\
            Examples:\n  \
            vitae fetch 8Kx2aQ                       # Writes resume.pdf and resume.docx\n  \
            vitae fetch 8Kx2aQ --to pdf -o out/      # Only the PDF, into out/\n  \
            vitae convert cv.html -o cv.docx         # Format inferred from the extension\n  \
            vitae inspect cv.html                    # Block sequence as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a vitae.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("fetch")
                .about("Fetch a resume by access token and convert it")
                .long_about(
                    "Download the resume HTML for an access token and convert it.\n\n\
                    Files are named <stem>.pdf and <stem>.docx. Each format is written\n\
                    independently: if one conversion fails the other is still saved.\n\
                    The command fails when the fetch fails or when no format could be\n\
                    produced.",
                )
                .arg(
                    Arg::new("token")
                        .help("Resume access token")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .help("Directory to write into (defaults to output.directory)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("File stem for the outputs (defaults to output.file_stem)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Formats to produce")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "pdf", "docx", "all",
                        ]))
                        .default_value("all"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a local HTML file")
                .long_about(
                    "Convert a resume HTML file into a single document.\n\n\
                    The target format is taken from --to, or detected from the output\n\
                    file extension when --to is omitted.\n\n\
                    Examples:\n  \
                    vitae convert cv.html -o cv.pdf\n  \
                    vitae convert cv.html --to docx -o out.bin",
                )
                .arg(
                    Arg::new("input")
                        .help("Input HTML file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (auto-detected from the output extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the block sequence extracted from an HTML file as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the HTML file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("list-formats").about("List the available export formats"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let matches = build_cli().get_matches_from(&cleaned_args);

    init_logging(matches.get_count("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    if let Some(key) = extra_params.keys().next() {
        eprintln!("Error: Unknown parameter --extra-{key}");
        std::process::exit(1);
    }
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    match matches.subcommand() {
        Some(("fetch", sub_matches)) => {
            let token = sub_matches
                .get_one::<String>("token")
                .expect("token is required");
            let output_dir = sub_matches
                .get_one::<String>("output-dir")
                .map(PathBuf::from);
            let name = sub_matches.get_one::<String>("name").map(|s| s.as_str());
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("all");
            handle_fetch_command(token, output_dir, name, to, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches
                .get_one::<String>("output")
                .expect("output is required");

            // Auto-detect --to if not provided
            let to = match sub_matches.get_one::<String>("to") {
                Some(t) => t.to_string(),
                None => match FormatRegistry::default().detect_format_from_filename(output) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{output}'");
                        eprintln!("Please specify --to explicitly");
                        std::process::exit(1);
                    }
                },
            };

            handle_convert_command(input, &to, output, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            handle_inspect_command(path, &config);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Handle the fetch command
fn handle_fetch_command(
    token: &str,
    output_dir: Option<PathBuf>,
    name: Option<&str>,
    to: &str,
    config: &VitaeConfig,
) {
    let selection = FormatSelection::parse(to).unwrap_or_else(|| {
        eprintln!("Error: Unknown output selection '{to}'");
        std::process::exit(1);
    });

    let client = ResumeClient::new(config.fetch_options()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let html = client.fetch_html(token).unwrap_or_else(|e| {
        eprintln!("Error: No content: {e}");
        std::process::exit(1);
    });

    log::debug!("fetched {} bytes of html", html.len());
    let conversion = convert(&html, &selection, &config.export_options());

    let dir = output_dir.unwrap_or_else(|| config.output.directory.clone());
    fs::create_dir_all(&dir).unwrap_or_else(|e| {
        eprintln!("Error creating directory '{}': {e}", dir.display());
        std::process::exit(1);
    });
    let stem = name.unwrap_or(&config.output.file_stem);

    if write_conversion(&conversion, &dir, stem) == 0 {
        eprintln!("Error: No format could be produced");
        std::process::exit(1);
    }
}

/// Write every successful output of `conversion`; returns how many were written.
fn write_conversion(conversion: &Conversion, dir: &Path, stem: &str) -> usize {
    let mut written = 0;
    for (extension, outcome) in [("pdf", &conversion.pdf), ("docx", &conversion.docx)] {
        match outcome {
            Some(Ok(bytes)) => {
                let path = output_path(dir, stem, extension);
                match fs::write(&path, bytes) {
                    Ok(()) => {
                        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
                        println!("Wrote {}", path.display());
                        written += 1;
                    }
                    Err(e) => eprintln!("Error writing file '{}': {e}", path.display()),
                }
            }
            Some(Err(e)) => eprintln!("Error: {extension} conversion failed: {e}"),
            None => log::debug!("{extension} not requested"),
        }
    }
    written
}

fn output_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{stem}.{extension}"))
}

/// Handle the convert command
fn handle_convert_command(input: &str, to: &str, output: &str, config: &VitaeConfig) {
    let registry = FormatRegistry::default();

    // Validate format exists
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let options = config.export_options();
    let blocks = HtmlImporter::new(options.inline_mode).parse(&source);

    let result = registry
        .serialize(&blocks, to, &options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    let bytes = result.into_bytes();
    fs::write(output, &bytes).unwrap_or_else(|e| {
        eprintln!("Error writing file '{output}': {e}");
        std::process::exit(1);
    });
    log::info!("wrote {} bytes of {to} to {output}", bytes.len());
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, config: &VitaeConfig) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let (blocks, stats) =
        HtmlImporter::new(config.export_options().inline_mode).parse_with_stats(&source);
    if stats.faults > 0 {
        eprintln!("Warning: {} element(s) could not be processed", stats.faults);
    }

    let json = serde_json::to_string_pretty(&blocks).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let extensions = format
                .file_extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {name:<6} {} ({extensions})", format.description());
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> VitaeConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    if let Some(path) = explicit_path {
        log::debug!("loading configuration from {path}");
    }
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut VitaeConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["page-size", "size"]) {
        config.convert.pdf.page_size = match raw.to_lowercase().as_str() {
            "a4" => PdfPageSize::A4,
            "letter" => PdfPageSize::Letter,
            other => {
                eprintln!("Invalid page size '{other}' for --extra-page-size (expected a4 or letter)");
                std::process::exit(1);
            }
        };
    }
    if let Some(raw) = take_override(extra_params, &["inline-mode"]) {
        config.convert.inline_mode = match raw.to_lowercase().as_str() {
            "flatten" => InlineModeConfig::Flatten,
            "cascade" => InlineModeConfig::Cascade,
            other => {
                eprintln!(
                    "Invalid inline mode '{other}' for --extra-inline-mode (expected flatten or cascade)"
                );
                std::process::exit(1);
            }
        };
    }
    if let Some(raw) = take_override(extra_params, &["margin-pt", "margin"]) {
        config.convert.pdf.margin_pt = parse_number_arg("margin-pt", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["body-font-size", "font-size"]) {
        config.convert.pdf.body_font_size = parse_number_arg("body-font-size", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["title"]) {
        config.convert.title = raw;
    }
    if let Some(raw) = take_override(extra_params, &["base-url"]) {
        config.fetch.base_url = raw;
    }
    if let Some(raw) = take_override(extra_params, &["user-agent"]) {
        config.fetch.user_agent = raw;
    }
    if let Some(raw) = take_override(extra_params, &["timeout-secs", "timeout"]) {
        let secs = parse_number_arg("timeout-secs", &raw);
        config.fetch.timeout_secs = (secs.ceil() as u64).max(1);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_number_arg(flag: &str, raw: &str) -> f32 {
    match raw.parse::<f32>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => {
            eprintln!("Invalid number '{raw}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
