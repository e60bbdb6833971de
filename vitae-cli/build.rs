use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs, reduced to what completions need.
// Build scripts can't access src/ modules, so the definition is duplicated here.
const FETCH_SELECTIONS: &[&str] = &["pdf", "docx", "all"];
const EXPORT_FORMATS: &[&str] = &["pdf", "docx"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("vitae")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fetch resumes and convert them to PDF and DOCX")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("fetch")
                .arg(Arg::new("token").required(true).index(1))
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .value_hint(ValueHint::DirPath),
                )
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FETCH_SELECTIONS)),
                ),
        )
        .subcommand(
            Command::new("convert")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(EXPORT_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect").arg(
                Arg::new("path")
                    .required(true)
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        )
        .subcommand(Command::new("list-formats"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "vitae", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "vitae", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "vitae", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
