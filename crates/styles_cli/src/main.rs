//! Renders a JSON stylesheet to static CSS.
//!
//! Every entry of the sheet is turned into a class the way a page would use
//! it, and the generated CSS is printed after the class names.

use anyhow::{Result, anyhow};
use env_logger::{Builder, Env};
use log::info;
use serde_json::{Value, from_slice};
use std::env;
use std::fmt::Write as _;
use std::fs::read;
use std::io::{Write as _, stderr, stdout};
use std::path::PathBuf;
use valor_styles::{StyleConfig, Styles};

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Options {
    /// JSON file holding `{ "name": style, ... }`.
    sheet: PathBuf,
    minify: bool,
    no_important: bool,
}

/// Print usage information to stderr.
fn print_usage() {
    drop(writeln!(
        stderr(),
        "Usage:\n  valor-styles <sheet.json> [--minify] [--no-important]"
    ));
}

/// Parse arguments after the program name.
///
/// # Errors
/// Returns an error for unknown flags or a missing sheet path.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options> {
    let mut sheet: Option<PathBuf> = None;
    let mut minify = false;
    let mut no_important = false;
    for arg in args {
        match arg.as_str() {
            "--minify" => minify = true,
            "--no-important" => no_important = true,
            flag if flag.starts_with("--") => return Err(anyhow!("unknown flag `{flag}`")),
            _ if sheet.is_none() => sheet = Some(PathBuf::from(arg)),
            _ => return Err(anyhow!("unexpected argument `{arg}`")),
        }
    }
    let sheet = sheet.ok_or_else(|| anyhow!("missing stylesheet path"))?;
    Ok(Options {
        sheet,
        minify,
        no_important,
    })
}

/// Flags override whatever the environment configured.
fn config_for(options: &Options, mut config: StyleConfig) -> StyleConfig {
    config.minify |= options.minify;
    if options.no_important {
        config.use_important = false;
    }
    config
}

/// Render every entry of `sheet` and return the output text.
///
/// # Errors
/// Returns an error if the sheet is malformed or generation fails.
fn render(sheet: &Value, config: &StyleConfig) -> Result<String> {
    let styles = Styles::detached(config);
    let sheet = styles.create_from_json(sheet)?;
    let page = styles.render_static(|| {
        let mut lines = String::new();
        for (name, definition) in sheet.iter() {
            let class_name = styles.css(&[definition.into()])?;
            writeln!(lines, "{name} => {class_name}")?;
        }
        Ok(lines)
    })?;
    info!(
        "rendered {} classes into {} bytes of CSS",
        page.css.rendered_identifiers.len(),
        page.css.content.len()
    );
    Ok(format!("{}\n{}\n", page.markup, page.css.content))
}

/// Main entry point for the valor-styles CLI tool.
///
/// # Errors
/// Returns an error if argument parsing, reading the sheet or rendering
/// fails.
fn main() -> Result<()> {
    drop(Builder::from_env(Env::default().filter_or("RUST_LOG", "warn")).try_init());

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            print_usage();
            return Err(err);
        }
    };
    let config = config_for(&options, StyleConfig::from_env());
    let data = read(&options.sheet)?;
    let sheet: Value = from_slice(&data)?;
    let output = render(&sheet, &config)?;
    stdout().write_all(output.as_bytes())?;
    Ok(())
}
