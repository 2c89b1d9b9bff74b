use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::TreeService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Scalar, TreeKind};
use crate::exitcode;
use crate::infrastructure::{Codec, RealFileSystem};
use crate::util::path::expand_path;

/// Runs the parsed command and returns the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let settings = Settings::load(cli.config.as_deref())?;
    let kind = cli.kind.map(TreeKind::from).unwrap_or(settings.default_kind);
    debug!(?kind, max_depth = settings.max_depth, "settings loaded");

    let service = TreeService::new(Arc::new(RealFileSystem), Codec::new(settings.max_depth));

    match &cli.command {
        Some(Commands::Create { file, value, force }) => {
            _create(&service, &expand_path(file), kind, value, *force)
        }
        Some(Commands::Show { file }) => _show(&service, &expand_path(file), kind),
        Some(Commands::Range { file, lo, hi }) => _range(&service, &expand_path(file), kind, lo, hi),
        Some(Commands::Find { file, value }) => _find(&service, &expand_path(file), kind, value),
        Some(Commands::Insert { file, path, value }) => {
            _insert(&service, &expand_path(file), kind, path, value)
        }
        Some(Commands::Delete { file, value }) => {
            _delete(&service, &expand_path(file), kind, value)
        }
        Some(Commands::Edit { file, old, new }) => {
            _edit(&service, &expand_path(file), kind, old, new)
        }
        Some(Commands::Clear { file }) => _clear(&service, &expand_path(file), kind),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

#[instrument(skip(service))]
fn _create(
    service: &TreeService,
    file: &Path,
    kind: TreeKind,
    value: &Scalar,
    force: bool,
) -> CliResult<i32> {
    service.create(file, kind, value.clone(), force)?;
    output::success(&format!("created {} tree {}", kind, file.display()));
    Ok(exitcode::OK)
}

#[instrument(skip(service))]
fn _show(service: &TreeService, file: &Path, kind: TreeKind) -> CliResult<i32> {
    let rendered = service.show(file, kind)?;
    if rendered.is_empty() {
        output::warning(&format!("{} holds an empty tree", file.display()));
    } else {
        output::info(&rendered);
    }
    Ok(exitcode::OK)
}

#[instrument(skip(service))]
fn _range(
    service: &TreeService,
    file: &Path,
    kind: TreeKind,
    lo: &Scalar,
    hi: &Scalar,
) -> CliResult<i32> {
    let values = service.range(file, kind, lo, hi)?;
    output::line(&values.iter().join(" "));
    Ok(exitcode::OK)
}

#[instrument(skip(service))]
fn _find(service: &TreeService, file: &Path, kind: TreeKind, value: &Scalar) -> CliResult<i32> {
    match service.find(file, kind, value)? {
        Some(rendered) => {
            output::info(&rendered);
            Ok(exitcode::OK)
        }
        None => {
            output::warning(&format!("no node holds {}", value));
            Ok(exitcode::NO_MATCH)
        }
    }
}

#[instrument(skip(service))]
fn _insert(
    service: &TreeService,
    file: &Path,
    kind: TreeKind,
    path: &str,
    value: &Scalar,
) -> CliResult<i32> {
    service.insert(file, kind, path, value.clone())?;
    output::success(&format!("inserted {} at '{}'", value, path));
    Ok(exitcode::OK)
}

#[instrument(skip(service))]
fn _delete(service: &TreeService, file: &Path, kind: TreeKind, value: &Scalar) -> CliResult<i32> {
    if service.delete(file, kind, value)? {
        output::success(&format!("deleted {}", value));
        Ok(exitcode::OK)
    } else {
        output::warning(&format!("no node holds {}", value));
        Ok(exitcode::NO_MATCH)
    }
}

#[instrument(skip(service))]
fn _edit(
    service: &TreeService,
    file: &Path,
    kind: TreeKind,
    old: &Scalar,
    new: &Scalar,
) -> CliResult<i32> {
    if service.edit(file, kind, old, new.clone())? {
        output::success(&format!("renamed {} to {}", old, new));
        Ok(exitcode::OK)
    } else {
        output::warning(&format!("no node holds {}", old));
        Ok(exitcode::NO_MATCH)
    }
}

#[instrument(skip(service))]
fn _clear(service: &TreeService, file: &Path, kind: TreeKind) -> CliResult<i32> {
    let released = service.clear(file, kind)?;
    output::success(&format!("deleted {} nodes from {}", released, file.display()));
    Ok(exitcode::OK)
}

fn _config(settings: &Settings) -> CliResult<i32> {
    output::info(&settings.to_toml()?);
    Ok(exitcode::OK)
}
