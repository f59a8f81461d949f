use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use classforge_registry::{GeneratorConfig, generate, split_base_list};
use miette::{MietteHandlerOpts, Result};
use std::path::PathBuf;
use std::process;
use tracing::info;

mod logging;
mod output;

#[derive(Parser)]
#[command(
    name = "classforge",
    version,
    about = "Generate a C++ object-construction registry",
    long_about = "Scans C++ headers for the given base types and every class directly derived \
                  from them, then writes a header with name lookup, factory dispatch, hierarchy \
                  queries and constructor diagnostics."
)]
struct Cli {
    /// Path of the generated header ('-' writes to stdout)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Comma-separated base type names
    #[arg(value_name = "BASES")]
    bases: String,

    /// Header files to scan, in discovery order
    #[arg(required = true, value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// TOML generator configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include paths are emitted relative to the last occurrence of this prefix
    #[arg(long, value_name = "PREFIX")]
    include_root: Option<String>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let bases = split_base_list(&cli.bases);
    if bases.is_empty() {
        Cli::command()
            .error(ErrorKind::InvalidValue, "BASES must name at least one base type")
            .exit();
    }

    if let Err(report) = run(&cli, &bases) {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

fn run(cli: &Cli, bases: &[String]) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(root) = &cli.include_root {
        config.include_root = root.clone();
    }

    let artifact = generate(bases, &cli.inputs, &config)?;
    output::write_output(&cli.output, &artifact)?;

    info!(output = %cli.output.display(), bytes = artifact.len(), "wrote registry");
    Ok(())
}

/// Graphical miette reports with C++ highlighting
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;
    use syntect::parsing::SyntaxSet;

    let color = logging::use_color();
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let highlighter = ThemeSet::load_defaults()
        .themes
        .get("base16-ocean.dark")
        .cloned()
        .map(|theme| SyntectHighlighter::new(syntax_set, theme, true));

    miette::set_hook(Box::new(move |_| {
        let opts = MietteHandlerOpts::new()
            .terminal_links(color)
            .unicode(color)
            .color(color)
            .tab_width(4)
            .with_cause_chain();
        let opts = match &highlighter {
            Some(highlighter) if color => opts.with_syntax_highlighting(highlighter.clone()),
            _ => opts,
        };
        Box::new(opts.build())
    }))
    .ok();
}
