// Command-line interface for markword
//
// This binary converts Markdown into the payloads the markword tool produces:
// WhatsApp-formatted text, HTML previews (markdown or word theme), the rich-text
// HTML fragment, and Word-openable .doc files.
//
// The core capabilities live in the markword-babel crate; this binary reads
// input, layers configuration, dispatches to a format and writes the result.
//
// Converting:
//
// The source format is auto-detected from the file extension, and can be
// overridden with an explicit --from flag. Reading from stdin (`-`) assumes
// Markdown.
// Usage:
//  markword <input> --to <format> [--from <format>] [--output <file>]  - Convert (default)
//  markword convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  markword inspect <input> [<transform>]   - Show the transcoder's intermediate stages
//  markword generate-css [--theme <name>]   - Print the CSS of an HTML preview theme
//  markword --list-formats                  - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  markword notes.md --to whatsapp --extra-bullet "-" --extra-rule-width 8

use markword_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use markword_babel::formats::{get_css, HtmlFormat, HtmlTheme, WhatsappFormat, WordFormat};
use markword_babel::{Document, FormatError, FormatRegistry, SerializedDocument};
use markword_config::{Loader, MarkwordConfig};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

/// Input path that reads from stdin
const STDIN_PATH: &str = "-";

/// Environment variable holding the log filter
const LOG_ENV: &str = "MARKWORD_LOG";

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
            // A following "-" is a value (a bullet marker), not a flag
            let has_value = match args.get(i + 1) {
                Some(next) => next == "-" || !next.starts_with('-'),
                None => false,
            };

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
    Command::new("markword")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to WhatsApp text, HTML previews and Word documents")
        .long_about(
            "markword converts Markdown documents into chat-ready and office-ready output.\n\n\
            Commands:\n  \
            - convert: Convert Markdown to whatsapp, html, word or normalized markdown\n  \
            - inspect: View the WhatsApp transcoder's intermediate stages\n  \
            - generate-css: Print the CSS of an HTML preview theme\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            markword notes.md --to whatsapp              # WhatsApp text (stdout)\n  \
            markword notes.md --to html -o preview.html  # Markdown-style preview\n  \
            markword notes.md --to html --extra-fragment # Rich-text clipboard payload\n  \
            markword notes.md --to word -o notes.doc     # Word document\n  \
            cat notes.md | markword - --to whatsapp      # Read from stdin",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a markword.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert Markdown to another format (default command)")
                .long_about(
                    "Convert a Markdown document.\n\n\
                    Supported formats:\n  \
                    - whatsapp: WhatsApp chat formatting (*bold*, _italic_, ~strike~)\n  \
                    - html:     HTML preview, markdown or word theme (.html)\n  \
                    - word:     Word-openable document (.doc)\n  \
                    - markdown: Normalized Markdown (.md)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Use '-' as the input to read Markdown from stdin.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    markword convert notes.md --to whatsapp\n  \
                    markword convert notes.md --to html --extra-theme word -o preview.html\n  \
                    markword notes.md --to word -o notes.doc     # 'convert' is optional",
                )
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
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: whatsapp, html, word, markdown\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the WhatsApp transcoder's intermediate stages")
                .long_about(
                    "View how a Markdown file is classified and tokenized.\n\n\
                    Transforms:\n  \
                    - blocks-simple: one 'kind: text' line per source line (default)\n  \
                    - blocks-json:   classified lines as JSON\n  \
                    - spans-json:    inline spans of every formatted line as JSON\n\n\
                    Extra Parameters:\n  \
                    --extra-show-linum    Prefix blocks-simple lines with line numbers\n\n\
                    Examples:\n  \
                    markword inspect notes.md\n  \
                    markword inspect notes.md spans-json",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'blocks-simple'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the CSS used for HTML previews")
                .long_about(
                    "Outputs the baseline CSS plus the overrides of one preview theme.\n\n\
                    Examples:\n  \
                    markword generate-css                  # Markdown theme\n  \
                    markword generate-css --theme word     # Word theme\n  \
                    markword generate-css > custom.css     # Save to file for editing",
                )
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .help("Preview theme")
                        .value_parser(["markdown", "word"])
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    init_tracing();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&cleaned_args) {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }
    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with("input is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                exit_with("--to is required");
            };
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_source_format(input),
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params);
        }
        Some(("generate-css", sub_matches)) => {
            if let Some(theme) = sub_matches.get_one::<String>("theme") {
                config.convert.html.theme = theme.clone();
            }
            handle_generate_css_command(&config);
        }
        _ => exit_with("Unknown subcommand. Use --help for usage information."),
    }
}

/// Route tracing output to stderr so stdout stays clean for payloads.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn should_inject_convert(cleaned_args: &[String]) -> bool {
    match cleaned_args.get(1) {
        Some(first) => {
            (first == STDIN_PATH || !first.starts_with('-'))
                && !matches!(
                    first.as_str(),
                    "convert" | "inspect" | "generate-css" | "help"
                )
        }
        None => false,
    }
}

fn detect_source_format(input: &str) -> String {
    if input == STDIN_PATH {
        return "markdown".to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Read a file, or stdin for `-`, as a UTF-8 document.
fn read_input(input: &str) -> Document {
    let bytes = if input == STDIN_PATH {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer).map(|_| buffer)
    } else {
        fs::read(input)
    }
    .unwrap_or_else(|e| {
        eprintln!("Error reading '{input}': {e}");
        std::process::exit(1);
    });

    Document::from_utf8(bytes).unwrap_or_else(|e| {
        eprintln!("Error reading '{input}': {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MarkwordConfig,
) {
    let registry = build_registry(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        exit_with(&format!("Error: {e}"));
    }
    if let Err(e) = registry.get(to) {
        exit_with(&format!("Error: {e}"));
    }

    let source = read_input(input);
    let doc = registry.parse(source.source(), from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    tracing::info!(input, from, to, "converting");

    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    write_output(output, result);
}

fn write_output(output: Option<&str>, result: SerializedDocument) {
    match output {
        Some(path) => {
            fs::write(path, result.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            tracing::info!(path, "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            let mut text = result.content;
            if !text.ends_with('\n') {
                text.push('\n');
            }
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .unwrap_or_else(|e| {
                    eprintln!("Error writing to stdout: {e}");
                    std::process::exit(1);
                });
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, extra_params: &HashMap<String, String>) {
    let doc = read_input(path);

    let output =
        transforms::execute_transform(doc.source(), transform, extra_params).unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the generate-css command
fn handle_generate_css_command(config: &MarkwordConfig) {
    let theme = html_theme(config).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    print!("{}", get_css(theme));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let Ok(format) = registry.get(&format_name) else {
            continue;
        };
        let mut capabilities = Vec::new();
        if format.supports_parsing() {
            capabilities.push("parse");
        }
        if format.supports_serialization() {
            capabilities.push("serialize");
        }
        println!(
            "  {format_name:<10} {:<16} {}",
            capabilities.join("+"),
            format.description()
        );
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MarkwordConfig {
    let loader = Loader::new().with_optional_file("markword.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move config-backed `--extra-*` values into the configuration.
fn apply_config_overrides(config: &mut MarkwordConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("bullet") {
        config.convert.whatsapp.bullet = raw;
    }
    if let Some(raw) = take_override(extra_params, &["rule-width", "rule_width"]) {
        config.convert.whatsapp.rule_width = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value '{raw}' for --extra-rule-width (expected a whole number)");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("theme") {
        config.convert.html.theme = raw;
    }
}

/// Default registry with the serializers configured from `config`.
fn build_registry(config: &MarkwordConfig) -> Result<FormatRegistry, FormatError> {
    let mut registry = FormatRegistry::default();
    registry.register(WhatsappFormat::new((&config.convert.whatsapp).into()));
    registry.register(HtmlFormat::new(html_theme(config)?));
    registry.register(WordFormat::new(config.convert.word.title.clone()));
    Ok(registry)
}

fn html_theme(config: &MarkwordConfig) -> Result<HtmlTheme, FormatError> {
    config
        .convert
        .html
        .theme()
        .ok_or_else(|| FormatError::InvalidOption {
            key: "theme".to_string(),
            reason: format!(
                "unknown theme '{}' (expected markdown or word)",
                config.convert.html.theme
            ),
        })
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
