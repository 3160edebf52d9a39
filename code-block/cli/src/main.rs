//! Code panel rendering CLI.
//!
//! Reads a snippet from a file or stdin and prints the highlighted HTML
//! panel to stdout. Props can come from a JSON/YAML file; flags override it.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use code_block::{
    ClipboardTarget, CodeBlockProps, CodeBlockRenderer, CodeTheme, Osc52Clipboard, RenderOptions,
    Size, standalone_document,
};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "codeblock", about = "Render syntax-highlighted code panels as HTML", version)]
struct Cli {
    /// Source file (reads from stdin if not provided, use "-" for explicit stdin)
    input: Option<PathBuf>,

    /// Language tag (js, ts, py, sql; jsx and tsx are aliases)
    #[arg(long)]
    lang: Option<String>,

    /// Class name to derive the language from (e.g. "language-python")
    #[arg(long)]
    class_name: Option<String>,

    /// Lines to emphasize: "14", "14,15" or "14..19"
    #[arg(long, value_name = "SPEC")]
    highlight_lines: Option<String>,

    /// First displayed line number
    #[arg(long, value_name = "N")]
    starting_line_number: Option<usize>,

    /// Do not render the copy button
    #[arg(long)]
    hide_copy: bool,

    /// Size hint (small, medium, large)
    #[arg(long, value_parser = parse_size)]
    size: Option<Size>,

    /// Load props from a JSON or YAML file
    #[arg(long, value_name = "FILE")]
    props: Option<PathBuf>,

    /// Theme for token colors (kebab-case name, see --list-themes)
    #[arg(long, value_parser = parse_theme_name)]
    theme: Option<CodeTheme>,

    /// List available themes
    #[arg(long)]
    list_themes: bool,

    /// Wrap the panel in a complete HTML page
    #[arg(long)]
    standalone: bool,

    /// Also copy the source to the clipboard (OSC52)
    #[arg(long)]
    copy: bool,

    /// Clipboard the --copy sequence targets (clipboard, primary, both)
    #[arg(long, value_parser = parse_clipboard_target, default_value = "clipboard", requires = "copy")]
    clipboard_target: ClipboardTarget,

    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_theme_name(s: &str) -> Result<CodeTheme, String> {
    CodeTheme::try_from(s).map_err(|e| e.to_string())
}

fn parse_clipboard_target(s: &str) -> Result<ClipboardTarget, String> {
    ClipboardTarget::try_from(s)
}

fn parse_size(s: &str) -> Result<Size, String> {
    Size::try_from(s)
}

/// Initialize tracing subscriber based on verbosity level.
///
/// Nothing is installed at verbosity 0.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "info,codeblock=info,code_block=info".to_string(),
            2 => "info,codeblock=debug,code_block=debug".to_string(),
            _ => "debug,codeblock=trace,code_block=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_themes {
        list_themes();
        return Ok(());
    }

    let props = build_props(&cli)?;

    let mut options = RenderOptions::from_env();
    if let Some(theme) = cli.theme {
        options = options.with_theme(theme);
    }

    let renderer = CodeBlockRenderer::new(options);
    let panel = renderer.render(&props);

    if cli.copy {
        match panel.copy_control() {
            Some(control) => match Osc52Clipboard::stdout() {
                Ok(clipboard) => control.activate(&clipboard.with_target(cli.clipboard_target)),
                Err(e) => eprintln!("Clipboard unavailable, skipping copy: {e}"),
            },
            None => tracing::warn!("Nothing to copy: the copy control is hidden or the source is empty"),
        }
    }

    if cli.standalone {
        print!("{}", standalone_document("Code", &[panel]));
    } else {
        println!("{}", panel.html());
    }

    Ok(())
}

/// Merges the props file, the source input, and flag overrides.
fn build_props(cli: &Cli) -> Result<CodeBlockProps> {
    let mut props = match &cli.props {
        Some(path) => load_props_file(path)?,
        None => CodeBlockProps::default(),
    };

    if cli.input.is_some() || props.children.is_none() {
        props.children = Some(read_source(cli.input.as_deref())?);
    }
    if let Some(lang) = &cli.lang {
        props.lang = Some(lang.clone());
    }
    if let Some(class_name) = &cli.class_name {
        props.class_name = Some(class_name.clone());
    }
    if let Some(spec) = &cli.highlight_lines {
        props.highlight_lines = Some(spec.clone());
    }
    if let Some(line) = cli.starting_line_number {
        props.starting_line_number = Some(line);
    }
    if let Some(size) = cli.size {
        props.size = Some(size);
    }
    if cli.hide_copy {
        props.hide_copy = true;
    }

    Ok(props)
}

fn load_props_file(path: &Path) -> Result<CodeBlockProps> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read props file {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let props = if is_yaml {
        CodeBlockProps::from_yaml(&content)
    } else {
        CodeBlockProps::from_json(&content)
    };

    props.map_err(|e| eyre!("{}: {}", path.display(), e))
}

fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {:?}", path)),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn list_themes() {
    println!("Available themes:");
    for theme in CodeTheme::all() {
        let marker = if theme == CodeTheme::default() { "*" } else { " " };
        println!("{marker} {:<12} {}", theme.name(), theme.description());
    }
}
