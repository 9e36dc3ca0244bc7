//! Command dispatch

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{OutlineService, TreeSummary};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::TreeNode;
use crate::infrastructure::di::ServiceContainer;
use crate::tree_traits::TreeNodeConvert;

/// Path argument that selects stdin.
const STDIN_ARG: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e))?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    let container = ServiceContainer::new(settings);
    let service = container.outline_service();

    match command {
        Commands::Show { file } => _show(&service, file),
        Commands::Json {
            file,
            bare,
            compact,
        } => _json(&service, &container.settings, file, *bare, *compact),
        Commands::Check { files } => _check(&service, files),
        Commands::Leaves { file } => _leaves(&service, file),
        Commands::Paths { file, separator } => _paths(&service, file, separator),
        Commands::Fmt { file, write } => _fmt(&service, file, *write),
        Commands::New { file, root, force } => {
            let root = root.as_deref().unwrap_or(&container.settings.root_template);
            _new(&service, file, root, *force)
        }
        Commands::Config { command } => _config(&container.settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Layered settings with the command-line depth override on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|e| CliError::io("get current directory", e))?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = max_depth;
        settings.validate()?;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_ARG
}

/// Convert the outline at `path`, or stdin for `-`.
fn load_tree(service: &OutlineService, path: &Path) -> CliResult<TreeNode> {
    if is_stdin(path) {
        let text = read_stdin()?;
        return Ok(service.parse(Path::new("<stdin>"), &text)?);
    }
    Ok(service.load(path)?)
}

fn read_stdin() -> CliResult<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| CliError::io("read stdin", e))?;
    Ok(text)
}

#[instrument(skip(service))]
fn _show(service: &OutlineService, file: &Path) -> CliResult<()> {
    let tree = load_tree(service, file)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(skip(service, settings))]
fn _json(
    service: &OutlineService,
    settings: &Settings,
    file: &Path,
    bare: bool,
    compact: bool,
) -> CliResult<()> {
    let tree = load_tree(service, file)?;
    let wrap = settings.wrap_output && !bare;
    let pretty = settings.pretty_json && !compact;
    output::info(&service.to_json(&tree, wrap, pretty)?);
    Ok(())
}

#[instrument(skip(service))]
fn _check(service: &OutlineService, files: &[PathBuf]) -> CliResult<()> {
    let paths: Vec<PathBuf> = files.iter().filter(|p| !is_stdin(p)).cloned().collect();
    let mut checked = service.check_all(&paths).into_iter();

    // one result per argument, in argument order
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        if is_stdin(file) {
            let summary = load_tree(service, file).map(|tree| TreeSummary::of(&tree));
            results.push((PathBuf::from("<stdin>"), summary));
        } else if let Some((path, summary)) = checked.next() {
            results.push((path, summary.map_err(CliError::from)));
        }
    }

    let mut failed = 0;
    for (path, summary) in &results {
        match summary {
            Ok(s) => output::success(&format!(
                "{}: '{}' {} nodes, depth {}, {} leaves",
                path.display(),
                s.root,
                s.nodes,
                s.depth,
                s.leaves
            )),
            Err(e) => {
                failed += 1;
                output::failure(e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

#[instrument(skip(service))]
fn _leaves(service: &OutlineService, file: &Path) -> CliResult<()> {
    let tree = load_tree(service, file)?;
    for leaf in tree.leaf_names() {
        output::info(leaf);
    }
    Ok(())
}

#[instrument(skip(service))]
fn _paths(service: &OutlineService, file: &Path, separator: &str) -> CliResult<()> {
    let tree = load_tree(service, file)?;
    for path in tree.paths() {
        output::info(&path.join(separator));
    }
    Ok(())
}

#[instrument(skip(service))]
fn _fmt(service: &OutlineService, file: &Path, write: bool) -> CliResult<()> {
    if write {
        if is_stdin(file) {
            return Err(CliError::InvalidArgs(
                "--write needs a file, not stdin".to_string(),
            ));
        }
        if service.format_file(file)? {
            output::action("Formatted", &file.display());
        } else {
            output::detail(&format!("{} already formatted", file.display()));
        }
        return Ok(());
    }

    let tree = load_tree(service, file)?;
    print!("{}", service.to_outline(&tree)?);
    Ok(())
}

#[instrument(skip(service))]
fn _new(service: &OutlineService, file: &Path, root: &str, force: bool) -> CliResult<()> {
    let tree = service.create(file, root, force)?;
    output::action("Created", &file.display());
    output::info(&tree.to_tree_string());
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(settings.to_toml()?.trim_end()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", describe(&path))),
                None => output::warning("no home directory, global config unavailable"),
            }
            let cwd =
                std::env::current_dir().map_err(|e| CliError::io("get current directory", e))?;
            output::info(&format!("local:  {}", describe(&local_config_path(&cwd))));
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
    }
    Ok(())
}

fn describe(path: &Path) -> String {
    if path.exists() {
        format!("{}", path.display())
    } else {
        format!("{} (not found)", path.display())
    }
}
