#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use extras::{
    Catalog, CatalogError, Command, EditorError, Effect, Form, FormHandle, Orchestrator, Outcome,
};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid form snapshot: {0}")]
    Form(serde_json::Error),
    #[error("script line {line}: invalid command: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error("script line {line}: {source}")]
    Command { line: usize, source: EditorError },
    #[error("failed to encode form values: {0}")]
    Encode(serde_json::Error),
    #[error("failed to report blocked save: {0}")]
    Notice(io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "extras", about = "Replay extras editor commands against a form snapshot")]
struct Cli {
    /// Kind catalog (.yaml, .yml or .json). Defaults to the built-in kinds.
    #[arg(long, env = "EXTRAS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Top-level form field holding the extras.
    #[arg(long, env = "EXTRAS_PARENT", default_value = "extras")]
    parent: String,

    /// Form values as JSON. Starts from an empty form when omitted.
    #[arg(long)]
    form: Option<PathBuf>,

    /// JSON Lines file of commands, one per line; `-` reads stdin.
    #[arg(long)]
    script: PathBuf,

    /// Pretty-print the resulting form values.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let values = match &cli.form {
        Some(path) => serde_json::from_str(&read(path)?).map_err(CliError::Form)?,
        None => Value::Object(serde_json::Map::new()),
    };
    let mut form = Form::new(values).with_validation(&cli.parent, catalog.clone());
    let mut orchestrator = Orchestrator::new(catalog, &cli.parent);

    let script: Box<dyn BufRead> = if cli.script.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = fs::File::open(&cli.script).map_err(|source| CliError::Read { path: cli.script.clone(), source })?;
        Box::new(BufReader::new(file))
    };
    run_script(&mut orchestrator, &mut form, script, &cli.script, &mut io::stderr())?;

    print_json(form.values(), cli.pretty)
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let text = read(path)?;
    let catalog = parse_catalog(&text, path.extension().and_then(|ext| ext.to_str()))?;
    tracing::info!(path = %path.display(), kinds = catalog.kinds().len(), "catalog loaded");
    Ok(catalog)
}

/// JSON for a `.json` extension, YAML for anything else.
fn parse_catalog(text: &str, extension: Option<&str>) -> Result<Catalog, CliError> {
    Ok(match extension {
        Some("json") => Catalog::from_json_str(text)?,
        _ => Catalog::from_yaml_str(text)?,
    })
}

/// Apply every command in `script` in order. Blank lines and `#` comments
/// are skipped; blocked saves are reported to `notices` and do not stop
/// the run.
fn run_script(
    orchestrator: &mut Orchestrator,
    form: &mut Form,
    script: impl BufRead,
    script_path: &Path,
    notices: &mut impl Write,
) -> Result<(), CliError> {
    for (n, line) in script.lines().enumerate() {
        let line_no = n + 1;
        let line = line.map_err(|source| CliError::Read { path: script_path.to_path_buf(), source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command: Command =
            serde_json::from_str(trimmed).map_err(|source| CliError::Script { line: line_no, source })?;
        let dispatch = orchestrator
            .apply(form, command)
            .map_err(|source| CliError::Command { line: line_no, source })?;

        if let Outcome::Blocked(notice) = &dispatch.outcome {
            writeln!(notices, "line {line_no}: {}", notice.message()).map_err(CliError::Notice)?;
        }
        for effect in dispatch.effects {
            match effect {
                Effect::ScrollToTop { after } => {
                    tracing::debug!(line = line_no, after = ?after, "scroll to top");
                }
            }
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn print_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) }
        .map_err(CliError::Encode)?;
    println!("{rendered}");
    Ok(())
}
