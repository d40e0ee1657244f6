//! tuneset command line
//!
//! ```text
//! tuneset [--config FILE] [--sections FILE] [--actions FILE] <COMMAND>
//!
//!   preview                     print the JSONL dataset
//!   export [--out PATH]         write the export file
//!   verify [--input FILE]       run the self-verification suite
//!   weights --section ID        per-row weight shares for one section
//!   sections                    sections with review progress
//! ```

#![warn(unreachable_pub)]

pub mod commands;
mod config;
mod input;

pub use commands::FieldSet;
pub use config::AppConfig;
pub use input::{load_actions, load_sections, open_session};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;

/// Build the argument parser
#[must_use]
pub fn command() -> Command {
    Command::new("tuneset")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build, export and verify fine-tuning datasets from reviewed sections")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("sections")
                .long("sections")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON array of sections (default: demo seed)"),
        )
        .arg(
            Arg::new("actions")
                .long("actions")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON array of session actions to replay first"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(Command::new("preview").about("Print the JSONL dataset to stdout"))
        .subcommand(
            Command::new("export")
                .about("Write the dataset export file")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file or directory (default: configured file name in cwd)"),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Run the self-verification suite; exits 1 on failure")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_parser(value_parser!(PathBuf))
                        .help("Verify an existing export instead of a fresh build"),
                ),
        )
        .subcommand(
            Command::new("weights")
                .about("Show provenance weights for one section")
                .arg(
                    Arg::new("section")
                        .long("section")
                        .required(true)
                        .help("Section id"),
                )
                .arg(
                    Arg::new("recommendations")
                        .long("recommendations")
                        .action(ArgAction::SetTrue)
                        .help("Weigh the recommendation fields instead of the narrative fields"),
                ),
        )
        .subcommand(Command::new("sections").about("List sections with review progress"))
}

/// Run a parsed command line, writing reports to `out`
///
/// Returns `false` when verification ran and failed.
///
/// # Errors
/// Returns error if configuration or inputs cannot be loaded, or a
/// command fails
pub fn run(matches: &ArgMatches, out: &mut impl Write) -> anyhow::Result<bool> {
    let config = AppConfig::load_or_default(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let store = open_session(
        matches.get_one::<PathBuf>("sections").map(PathBuf::as_path),
        matches.get_one::<PathBuf>("actions").map(PathBuf::as_path),
    )?;

    match matches.subcommand() {
        Some(("preview", _)) => {
            commands::preview(out, store.sections(), &config.export)?;
        }
        Some(("export", args)) => {
            let target = args.get_one::<PathBuf>("out").map(PathBuf::as_path);
            commands::export(out, store.sections(), &config.export, target)?;
        }
        Some(("verify", args)) => {
            let input = args.get_one::<PathBuf>("input").map(PathBuf::as_path);
            return commands::verify(out, store.sections(), &config, input);
        }
        Some(("weights", args)) => {
            let id = args
                .get_one::<String>("section")
                .map(String::as_str)
                .unwrap_or_default();
            let set = if args.get_flag("recommendations") {
                FieldSet::Recommendations
            } else {
                FieldSet::Narrative
            };
            commands::weights(out, &store, id, set)?;
        }
        Some(("sections", _)) => {
            commands::list_sections(out, &store)?;
        }
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
    Ok(true)
}
