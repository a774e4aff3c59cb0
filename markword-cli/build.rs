use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the formats registered by FormatRegistry::with_defaults and the
// transforms in src/transforms.rs. Build scripts can't access src/ modules.
const AVAILABLE_FORMATS: &[&str] = &["html", "markdown", "whatsapp", "word"];
const AVAILABLE_TRANSFORMS: &[&str] = &["blocks-simple", "blocks-json", "spans-json"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let formats = || clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS);

    let mut cmd = Command::new("markword")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to WhatsApp text, HTML previews and Word documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a markword.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert Markdown to another format")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format")
                        .value_parser(formats()),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_parser(formats()),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the WhatsApp transcoder's intermediate stages")
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the CSS used for HTML previews")
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .help("Preview theme")
                        .value_parser(["markdown", "word"]),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "markword", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "markword", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "markword", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
