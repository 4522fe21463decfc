// Command-line interface for plume
//
// A thin shell over plume-babel: every command reads one input file, calls into the library
// and writes the result to stdout (or the file given with -o). File access and process exit
// codes live here; the library never touches either.
//
// Usage:
//  plume render <input.md> [--mode standard|safe] [--style style.json] [--template tpl.json]
//               [--library presets.json] [-o out.html]
//  plume inspect <input.html> [--json]
//  plume infer <input.html>
//  plume extract <input.html> [--source-title T] [--library presets.json]
//  plume to-markdown <input.html>
//  plume check-template <template.json>
//  plume defaults
//
// Extra Parameters:
//
// Style fields can be overridden with --extra-<field> <value>, e.g. --extra-h2-size 30.
// --extra-allow-h1 and --extra-max-declarations tune the loaded configuration instead.

mod overrides;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use overrides::{apply_config_overrides, parse_extra_args, style_overrides};
use plume_babel::library::StyleLibrary;
use plume_babel::render::{RenderMode, RenderOptions};
use plume_babel::style::{validate, StyleConfig, StylePatch};
use plume_babel::{
    derive_refine_by_type, export_template_json, extract_presets, infer_config,
    inspect_with_limit, parse_template_import, render, to_markdown, FormatInspectionReport,
    StyleTemplate, TemplateImportError,
};
use plume_config::{Loader, PlumeConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("plume")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile Markdown into inline-styled HTML and read such HTML back")
        .long_about(
            "plume compiles Markdown into HTML whose every visual property lives in inline\n\
            style attributes, ready to paste into rich-text hosts that drop stylesheets and\n\
            classes. It also reads pasted HTML back into style data and Markdown.\n\n\
            Extra Parameters:\n  \
            Use --extra-<field> <value> to override a single style field.\n\n\
            Examples:\n  \
            plume render post.md -o post.html           # Render with the default style\n  \
            plume render post.md --mode safe            # Replace tables and embeds\n  \
            plume render post.md --extra-h2-size 30     # Override one style field\n  \
            plume infer pasted.html > style.json        # Guess a style from pasted HTML",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a plume.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline stages to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render Markdown to inline-styled HTML")
                .arg(input_arg("Markdown file"))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help("Render mode (defaults to render.mode from configuration)")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "standard", "safe",
                        ])),
                )
                .arg(
                    Arg::new("style")
                        .long("style")
                        .help("JSON object of style fields laid over the base style")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("Template JSON whose style replaces the configured one")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("library")
                        .long("library")
                        .help("Preset library JSON resolving the template's element presets")
                        .requires("template")
                        .value_hint(ValueHint::FilePath),
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
                .about("Summarize how an HTML document is styled")
                .arg(input_arg("HTML file"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("infer")
                .about("Infer a complete style from an HTML document")
                .arg(input_arg("HTML file")),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract per-element presets from an HTML document")
                .arg(input_arg("HTML file"))
                .arg(
                    Arg::new("source-title")
                        .long("source-title")
                        .help("Name prefix for imported presets")
                        .default_value(""),
                )
                .arg(
                    Arg::new("library")
                        .long("library")
                        .help("Preset library JSON to import the presets into (created if missing)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("to-markdown")
                .about("Convert an HTML document to Markdown")
                .arg(input_arg("HTML file")),
        )
        .subcommand(
            Command::new("check-template")
                .about("Check a template JSON document and print it normalized")
                .arg(input_arg("Template JSON file")),
        )
        .subcommand(Command::new("defaults").about("Print the default style as JSON"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = build_cli().get_matches_from(&cleaned_args);

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(&config.log.level, matches.get_flag("verbose"));
    apply_config_overrides(&mut config, &mut extra_params).unwrap_or_else(|e| fail(&e));

    match matches.subcommand() {
        Some(("render", sub_matches)) => handle_render_command(sub_matches, &config, &extra_params),
        Some(("inspect", sub_matches)) => {
            let input = required(sub_matches, "input");
            handle_inspect_command(input, sub_matches.get_flag("json"), &config);
        }
        Some(("infer", sub_matches)) => {
            handle_infer_command(required(sub_matches, "input"), &config, &extra_params)
        }
        Some(("extract", sub_matches)) => handle_extract_command(sub_matches, &config, &extra_params),
        Some(("to-markdown", sub_matches)) => {
            handle_to_markdown_command(required(sub_matches, "input"))
        }
        Some(("check-template", sub_matches)) => {
            handle_check_template_command(required(sub_matches, "input"))
        }
        Some(("defaults", _)) => print_json(&StyleConfig::default()),
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn init_logging(level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(if verbose { "debug" } else { level })
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle the render command
fn handle_render_command(
    matches: &ArgMatches,
    config: &PlumeConfig,
    extra_params: &HashMap<String, String>,
) {
    let markdown = read_input(required(matches, "input"));

    let template = matches.get_one::<String>("template").map(|path| load_template(path));
    let mut style = match &template {
        Some(template) => template.global_style_config.clone(),
        None => config.style_config(),
    };
    if let Some(path) = matches.get_one::<String>("style") {
        style = style.patched(&load_style_patch(path));
    }
    style = apply_extra_style(style, extra_params);

    let mut options = RenderOptions::from(&config.render);
    if let Some(mode) = matches.get_one::<String>("mode") {
        options.mode = mode.parse::<RenderMode>().unwrap_or_else(|e| fail(&e.to_string()));
    }
    if let (Some(template), Some(path)) = (&template, matches.get_one::<String>("library")) {
        let library = load_library(path)
            .unwrap_or_else(|| fail(&format!("Preset library '{path}' does not exist")));
        options = options.with_refine_by_type(derive_refine_by_type(template, &library));
    }

    tracing::debug!(mode = %options.mode, "rendering");
    let html = render(&markdown, &style, &options).unwrap_or_else(|e| fail(&e.to_string()));
    write_output(matches.get_one::<String>("output").map(|s| s.as_str()), &html);
}

/// Handle the inspect command
fn handle_inspect_command(input: &str, json: bool, config: &PlumeConfig) {
    let html = read_input(input);
    let report = inspect_with_limit(&html, config.inspect.max_declarations);
    if json {
        print_json(&report);
    } else {
        print!("{}", format_report(&report));
    }
}

fn format_report(report: &FormatInspectionReport) -> String {
    let mut out = format!(
        "elements: {} (inline style: {}, class: {})\n",
        report.total_elements, report.inline_style_elements, report.class_elements
    );
    for summary in &report.tag_summaries {
        out.push_str(&format!("\n<{}> x{}\n", summary.tag, summary.count));
        for usage in &summary.style_usage {
            out.push_str(&format!("  {:>4}  {}\n", usage.count, usage.declaration));
        }
    }
    out
}

/// Handle the infer command
fn handle_infer_command(input: &str, config: &PlumeConfig, extra_params: &HashMap<String, String>) {
    let html = read_input(input);
    let fallback = apply_extra_style(config.style_config(), extra_params);
    print_json(&validate(&infer_config(&html, &fallback)));
}

/// Handle the extract command
fn handle_extract_command(
    matches: &ArgMatches,
    config: &PlumeConfig,
    extra_params: &HashMap<String, String>,
) {
    let html = read_input(required(matches, "input"));
    let fallback = apply_extra_style(config.style_config(), extra_params);
    let result = extract_presets(&html, &fallback)
        .unwrap_or_else(|e| fail(&e.to_string()));

    if let Some(path) = matches.get_one::<String>("library") {
        let mut library = load_library(path).unwrap_or_else(StyleLibrary::seeded);
        let source_title = required(matches, "source-title");
        for imported in library.import_extracted(&result.presets, source_title) {
            match &imported.renamed_from {
                Some(wanted) => eprintln!("Imported {} (renamed from {wanted})", imported.final_name),
                None => eprintln!("Imported {}", imported.final_name),
            }
        }
        let json = library
            .to_json()
            .unwrap_or_else(|e| fail(&e.to_string()));
        write_output(Some(path), &json);
    }

    print_json(&result);
}

/// Handle the to-markdown command
fn handle_to_markdown_command(input: &str) {
    let html = read_input(input);
    let markdown = to_markdown(&html).unwrap_or_else(|e| fail(&e.to_string()));
    println!("{markdown}");
}

/// Handle the check-template command
fn handle_check_template_command(input: &str) {
    let json = read_input(input);
    let template = parse_template_import(&json).unwrap_or_else(|e| fail_import(input, &e));
    let normalized = export_template_json(&template)
        .unwrap_or_else(|e| fail(&e.to_string()));
    println!("{normalized}");
}

/// A full template document (with its element preset mapping) or, failing that, an import
/// document checked field by field.
fn load_template(path: &str) -> StyleTemplate {
    let json = read_input(path);
    match serde_json::from_str::<StyleTemplate>(&json) {
        Ok(template) => template.normalized(),
        Err(_) => parse_template_import(&json).unwrap_or_else(|e| fail_import(path, &e)),
    }
}

fn load_style_patch(path: &str) -> StylePatch {
    let json = read_input(path);
    serde_json::from_str(&json)
        .unwrap_or_else(|e| fail(&format!("Invalid style file '{path}': {e}")))
}

/// The library stored at `path`, or `None` when there is no such file.
fn load_library(path: &str) -> Option<StyleLibrary> {
    if !Path::new(path).exists() {
        return None;
    }
    let json = read_input(path);
    Some(
        StyleLibrary::from_json(&json)
            .unwrap_or_else(|e| fail(&format!("Invalid preset library '{path}': {e}"))),
    )
}

fn apply_extra_style(style: StyleConfig, extra_params: &HashMap<String, String>) -> StyleConfig {
    let patch = style_overrides(extra_params).unwrap_or_else(|e| fail(&e));
    if patch.is_empty() {
        style
    } else {
        style.patched(&patch)
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(|s| s.as_str())
        .unwrap_or_else(|| fail(&format!("Missing argument '{id}'")))
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")))
}

fn write_output(path: Option<&str>, content: &str) {
    match path {
        Some(path) => fs::write(path, content)
            .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}"))),
        None => println!("{content}"),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(&e.to_string()));
    println!("{json}");
}

fn fail_import(path: &str, error: &TemplateImportError) -> ! {
    eprintln!("{error} ({path})");
    for issue in &error.issues {
        eprintln!("  {}: {}", issue.field, issue.message);
    }
    std::process::exit(1);
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn load_cli_config(explicit_path: Option<&str>) -> PlumeConfig {
    let loader = Loader::new().with_optional_file("plume.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}
