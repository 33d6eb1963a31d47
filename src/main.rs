mod report;

use dossier::cracker::{self, CrackRequest, CrackerRunner};
use dossier::profile::{load_profile, write_template};
use dossier::reference::{CachedDownloader, catalog_names};
use dossier::sink::write_wordlist;
use dossier::{Options, generate_with, logging};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_TEMPLATE: &str = "profile_template.json";
const DEFAULT_JOHN_COMMAND: &str = "basic_crack";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    logging::init();
    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
    options: Options,
    john: Option<JohnConfig>,
    color: bool,
}

struct JohnConfig {
    command: String,
    targets: Vec<String>,
    format: Option<String>,
    rules: bool,
}

fn run(config: &CliConfig) -> dossier::Result<()> {
    if let Some(path) = &config.template {
        write_template(path)?;
        println!("Template written to {}", path.display());
    }

    let (Some(input), Some(output)) = (&config.input, &config.output) else {
        return Ok(());
    };

    let (profile, weights) = load_profile(input)?;
    let downloader = CachedDownloader::default();
    let mut generation = generate_with(&profile, &weights, &config.options, &downloader);
    let written = write_wordlist(&mut generation, output, config.options.max_words)?;
    report::print_run(output, written, generation.metrics(), &config.options, config.color);

    if let Some(john) = &config.john {
        if john.targets.is_empty() && john.command != "restore_session" {
            warn!(command = %john.command, "skipping john: no --john-target given");
            return Ok(());
        }
        let runner = CrackerRunner::default();
        let request = CrackRequest {
            command: &john.command,
            wordlist: Some(output.as_path()),
            targets: &john.targets,
            format: john.format.as_deref(),
            rules: john.rules,
        };
        let outcome = runner.run(&request)?;
        report::print_crack(&outcome, config.color);
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut template: Option<PathBuf> = None;
    let mut options = Options::default();
    let mut john = false;
    let mut john_command = DEFAULT_JOHN_COMMAND.to_string();
    let mut john_targets: Vec<String> = Vec::new();
    let mut john_format: Option<String> = None;
    let mut john_rules = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            match inline.clone() {
                Some(value) => Ok(value),
                None => args.next().ok_or_else(|| format!("error: {name} expects a value")),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("dossier {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-i" | "--input" => input = Some(PathBuf::from(value("--input")?)),
            "-o" | "--output" => output = Some(PathBuf::from(value("--output")?)),
            "-m" | "--max-words" => options.max_words = parse_count("--max-words", &value("--max-words")?)?,
            "--min-length" => options.min_length = parse_count("--min-length", &value("--min-length")?)?,
            "--max-length" => options.max_length = parse_count("--max-length", &value("--max-length")?)?,
            "--no-threading" => options.threads = false,
            "--include-common" => options.include_reference = true,
            "--dedup-common" => options.dedup_reference = true,
            "--common-lists" => {
                let lists: Vec<String> = match inline {
                    Some(value) => value.split(',').map(str::to_string).collect(),
                    None => take_values(&mut args),
                };
                if lists.is_empty() {
                    return Err("error: --common-lists expects at least one name".to_string());
                }
                options.reference_lists = lists;
            }
            "--create-template" => template = Some(inline.map(PathBuf::from).unwrap_or_else(|| DEFAULT_TEMPLATE.into())),
            "--john" => john = true,
            "--john-command" => john_command = value("--john-command")?,
            "--john-target" => match inline {
                Some(value) => john_targets.push(value),
                None => john_targets.extend(take_values(&mut args)),
            },
            "--john-format" => john_format = Some(value("--john-format")?),
            "--john-rules" => john_rules = true,
            _ => return Err(format!("error: unknown option '{arg}'\n\n{}", help_text())),
        }
    }

    if template.is_none() {
        if input.is_none() {
            return Err(format!("error: no profile provided (use --input)\n\n{}", help_text()));
        }
        if output.is_none() {
            return Err("error: --output is required".to_string());
        }
    } else if input.is_some() != output.is_some() {
        return Err("error: --input and --output must be given together".to_string());
    }

    if options.min_length > options.max_length {
        return Err(format!(
            "error: --min-length ({}) exceeds --max-length ({})",
            options.min_length, options.max_length
        ));
    }

    let known: Vec<&str> = cracker::command_names().collect();
    if john && !known.contains(&john_command.as_str()) {
        return Err(format!("error: unknown john command '{john_command}' (available: {})", known.join(", ")));
    }

    let john = john.then(|| JohnConfig { command: john_command, targets: john_targets, format: john_format, rules: john_rules });

    Ok(CliConfig { input, output, template, options, john, color })
}

/// Consume the values following a multi-value flag, up to the next option.
fn take_values(args: &mut std::iter::Peekable<impl Iterator<Item = String>>) -> Vec<String> {
    std::iter::from_fn(|| args.next_if(|next| !next.starts_with('-'))).collect()
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a non-negative integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "dossier {version}

Profile-driven password wordlist generator.

Usage:
  dossier -i <profile.json> -o <wordlist.txt> [OPTIONS]
  dossier --create-template[=<path>]

Options:
  -i, --input <path>           JSON profile to read.
  -o, --output <path>          Wordlist file to write.
  -m, --max-words <n>          Maximum number of words. Default: {max_words}
  --min-length <n>             Shortest word kept. Default: {min_length}
  --max-length <n>             Longest word kept. Default: {max_length}
  --no-threading               Expand variations on a single thread.
  --include-common             Append words from reference wordlists.
  --common-lists <names...>    Reference lists to use. Default: rockyou
                               Available: {lists}
  --dedup-common               Skip reference words already generated.
  --create-template[=<path>]   Write an example profile.
                               Default: {template}
  --john                       Run John the Ripper on the wordlist.
  --john-command <name>        Catalog command. Default: {john_command}
                               Available: {commands}
  --john-target <files...>     Hash files to crack.
  --john-format <format>       Hash format for specific_format.
  --john-rules                 Enable John's word mangling rules.
  --color                      Force ANSI color output.
  --no-color                   Disable ANSI color output.
  -h, --help                   Show this help message.
  -V, --version                Print version information.

Environment:
  DOSSIER_LOG                  Log filter, e.g. dossier=debug.

Exit codes:
  0  Success.
  1  Runtime error (profile, output, download or john failure).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        max_words = Options::default().max_words,
        min_length = Options::default().min_length,
        max_length = Options::default().max_length,
        lists = catalog_names().collect::<Vec<_>>().join(", "),
        template = DEFAULT_TEMPLATE,
        john_command = DEFAULT_JOHN_COMMAND,
        commands = cracker::command_names().collect::<Vec<_>>().join(", "),
    )
}
