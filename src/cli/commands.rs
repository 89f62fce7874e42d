//! Command dispatch: load inputs, run the domain operations, print results.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, SourceArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{
    add_data_to_forest, find_node, DataConfig, ForestBuilder, Record, RecordId, Tree,
};
use crate::tree_traits::{release, TreeNodeConvert};

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".to_string()));
    };
    let load_settings = || -> CliResult<Settings> {
        let settings = Settings::load(cli.config.as_deref())?;
        debug!(?settings, "Loaded settings");
        Ok(settings)
    };

    match command {
        Commands::Tree { source } => {
            for tree in load_forest(source, &load_settings()?)? {
                let rendered = tree.to_tree_string();
                output::info(&rendered);
                release(rendered);
            }
            Ok(())
        }
        Commands::Leaves { source } => {
            for line in leaf_lines(&load_forest(source, &load_settings()?)?) {
                output::info(&line);
            }
            Ok(())
        }
        Commands::Data {
            source,
            data,
            node,
            reference_id,
            collection,
            recursive,
        } => {
            let settings = load_settings()?;
            let mut trees = load_forest(source, &settings)?;
            let config = DataConfig::try_from(
                settings.data_config(reference_id.as_deref(), collection.as_deref()),
            )?;
            let records = read_records(data)?;
            let attached = add_data_to_forest(&mut trees, &records, &config);
            if attached < records.len() {
                output::warning(&format!(
                    "{} of {} records reference no node",
                    records.len() - attached,
                    records.len()
                ));
            }

            for line in node_data_lines(&trees, &RecordId::parse(node), *recursive)? {
                output::info(&line);
            }
            Ok(())
        }
        Commands::Config { command } => {
            let settings = load_settings()?;
            match command {
                ConfigCommands::Show => output::info(&settings.to_toml()?),
                ConfigCommands::Path => {
                    output::header("Global config");
                    match global_config_path() {
                        Some(path) => output::detail(&path.display()),
                        None => output::detail("<no home directory>"),
                    }
                    if let Some(local) = &cli.config {
                        output::header("Local config");
                        output::detail(&local.display());
                    }
                }
            }
            Ok(())
        }
        Commands::Completion { shell } => {
            print_completions(*shell);
            Ok(())
        }
    }
}

/// Reads a JSON array of records.
#[instrument(level = "debug")]
pub fn read_records(path: &Path) -> CliResult<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the tree records named by `source` and builds the forest.
pub fn load_forest(source: &SourceArgs, settings: &Settings) -> CliResult<Vec<Tree>> {
    let records = read_records(&source.records)?;
    let trees = ForestBuilder::new()
        .records(records)
        .config(settings.tree_config(source.id.as_deref(), source.parent_id.as_deref()))
        .build()?;
    Ok(trees)
}

/// One line per tree: `<root>: <leaf>, <leaf>, ...`
pub fn leaf_lines(trees: &[Tree]) -> Vec<String> {
    trees
        .iter()
        .map(|tree| {
            let leaves = tree.leaves().iter().map(|leaf| leaf.id()).join(", ");
            format!("{}: {}", tree.root().id(), leaves)
        })
        .collect()
}

/// The node's data as JSON lines, subtree included when `recursive`.
pub fn node_data_lines(trees: &[Tree], id: &RecordId, recursive: bool) -> CliResult<Vec<String>> {
    let node = find_node(trees, id).ok_or_else(|| CliError::NodeNotFound(id.clone()))?;
    let records = if recursive {
        node.recursive_node_data()
    } else {
        node.single_node_data()
    };
    records
        .into_iter()
        .map(|record| serde_json::to_string(record).map_err(CliError::from))
        .collect()
}
