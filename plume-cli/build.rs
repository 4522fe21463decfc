use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs, trimmed to what completions need.
// Build scripts can't reach src/ modules.
const RENDER_MODES: &[&str] = &["standard", "safe"];

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("plume")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile Markdown into inline-styled HTML and read such HTML back")
        .arg_required_else_help(true)
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
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .arg(input_arg("Markdown file"))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_parser(clap::builder::PossibleValuesParser::new(RENDER_MODES)),
                )
                .arg(Arg::new("style").long("style").value_hint(ValueHint::FilePath))
                .arg(Arg::new("template").long("template").value_hint(ValueHint::FilePath))
                .arg(Arg::new("library").long("library").value_hint(ValueHint::FilePath))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .arg(input_arg("HTML file"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("infer").arg(input_arg("HTML file")))
        .subcommand(
            Command::new("extract")
                .arg(input_arg("HTML file"))
                .arg(Arg::new("source-title").long("source-title"))
                .arg(Arg::new("library").long("library").value_hint(ValueHint::FilePath)),
        )
        .subcommand(Command::new("to-markdown").arg(input_arg("HTML file")))
        .subcommand(Command::new("check-template").arg(input_arg("Template JSON file")))
        .subcommand(Command::new("defaults"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "plume", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "plume", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "plume", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
