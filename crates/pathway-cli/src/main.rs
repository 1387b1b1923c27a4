//! `pathway` command-line harness
//!
//! Loads a snapshot file and either reports its integrity, traces a pathway
//! selection, or runs the project attribute filter.

mod render;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pathway_engine::{EngineConfig, ExplorerMode, PathwayEngine, ProjectFilter, Session};
use pathway_model::Dataset;
use pathway_source::{DatasetLoader, FileSource, LoadState, SourceConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn snapshot_arg() -> Arg {
    Arg::new("snapshot")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Snapshot file (.json, .yaml or .yml)")
}

fn repeated(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .action(ArgAction::Append)
        .value_name("ID")
        .help(help)
}

fn cli() -> Command {
    Command::new("pathway")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Theory-of-Change pathway filter")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Engine configuration (TOML)"),
        )
        .arg(
            Arg::new("max-file-size")
                .long("max-file-size")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Largest snapshot accepted, in bytes"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("check")
                .about("Load a snapshot and print its integrity report")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("trace")
                .about("Derive the pathway view for a selection")
                .arg(snapshot_arg())
                .arg(repeated("worldview", "Select a worldview"))
                .arg(repeated("outcome", "Select an outcome"))
                .arg(repeated("problem", "Select a problem"))
                .arg(
                    Arg::new("guided")
                        .long("guided")
                        .action(ArgAction::SetTrue)
                        .help("Use guided mode (emptying a stage clears downstream)"),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Filter projects by text, category and organization")
                .arg(snapshot_arg())
                .arg(Arg::new("text").long("text").help("Case-insensitive substring"))
                .arg(Arg::new("category").long("category").help("Exact problem category"))
                .arg(
                    Arg::new("organization")
                        .long("organization")
                        .help("Exact organization name"),
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();
    let Some((command, args)) = matches.subcommand() else {
        bail!("no subcommand given");
    };
    // Global flags are propagated down, so read them from the subcommand.
    let json = args.get_flag("json");

    match command {
        "check" => {
            let dataset = load(snapshot(args)?, source_config(args)).await?;
            let report = dataset.integrity_report();
            let fingerprint = dataset
                .fingerprint()
                .context("failed to fingerprint dataset")?;
            if json {
                let out = serde_json::json!({
                    "fingerprint": fingerprint,
                    "report": report,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                render::integrity(&dataset, &fingerprint, &report);
            }
        }
        "trace" => {
            let dataset = load(snapshot(args)?, source_config(args)).await?;
            let mut config = engine_config(args)?;
            if args.get_flag("guided") {
                config = config.with_mode(ExplorerMode::Guided);
            }

            let engine = Arc::new(PathwayEngine::new(dataset, config));
            let mut session = Session::new(Arc::clone(&engine));
            for id in values(args, "worldview") {
                session.toggle_worldview(id);
            }
            for id in values(args, "outcome") {
                session.toggle_outcome(id);
            }
            for id in values(args, "problem") {
                session.toggle_problem(id);
            }

            let view = session.view();
            if json {
                let out = serde_json::json!({
                    "selection": session.selection(),
                    "view": &*view,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                render::trace(engine.dataset(), session.selection(), &view);
            }
        }
        "search" => {
            let dataset = load(snapshot(args)?, source_config(args)).await?;
            let engine = PathwayEngine::new(dataset, engine_config(args)?);

            let mut filter = ProjectFilter::new();
            if let Some(text) = args.get_one::<String>("text") {
                filter = filter.with_text(text);
            }
            if let Some(category) = args.get_one::<String>("category") {
                filter = filter.with_category(category.as_str());
            }
            if let Some(organization) = args.get_one::<String>("organization") {
                filter = filter.with_organization(organization);
            }

            let projects = engine.filtered_projects(&filter);
            if json {
                let out = serde_json::json!({
                    "filter": filter,
                    "projects": projects,
                    "facets": engine.facets(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                render::search(engine.dataset(), &filter, &projects, &engine.facets());
            }
        }
        other => bail!("unknown subcommand '{other}'"),
    }

    Ok(())
}

fn snapshot(args: &ArgMatches) -> anyhow::Result<&Path> {
    args.get_one::<PathBuf>("snapshot")
        .map(PathBuf::as_path)
        .context("missing snapshot path")
}

fn values<'a>(args: &'a ArgMatches, id: &str) -> impl Iterator<Item = &'a str> {
    args.get_many::<String>(id)
        .into_iter()
        .flatten()
        .map(String::as_str)
}

fn source_config(matches: &ArgMatches) -> SourceConfig {
    match matches.get_one::<u64>("max-file-size") {
        Some(bytes) => SourceConfig::default().with_max_file_size(*bytes),
        None => SourceConfig::default(),
    }
}

fn engine_config(matches: &ArgMatches) -> anyhow::Result<EngineConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            tracing::debug!(path = %path.display(), ?config, "engine config loaded");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

async fn load(path: &Path, config: SourceConfig) -> anyhow::Result<Arc<Dataset>> {
    let mut loader = DatasetLoader::new(FileSource::new(path).with_config(config));
    match loader.load().await {
        LoadState::Ready(dataset) => Ok(Arc::clone(dataset)),
        LoadState::Failed(error) => bail!("failed to load {}: {error}", path.display()),
        LoadState::Idle => bail!("loader did not run"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn trace_collects_repeated_ids() {
        let matches = cli()
            .try_get_matches_from([
                "pathway", "trace", "data.json", "--worldview", "w1", "--worldview", "w2", "--guided",
                "--json",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();

        assert_eq!(values(args, "worldview").collect::<Vec<_>>(), vec!["w1", "w2"]);
        assert!(args.get_flag("guided"));
        assert!(args.get_flag("json"));
        assert_eq!(snapshot(args).unwrap(), Path::new("data.json"));
    }
}
