//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, GenerateArgs};
use crate::cli::error::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::display::TreeConvert;
use crate::errors::TreeResult;
use crate::forest::Forest;
use crate::node::NodeId;
use crate::traversal::Order;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Generate(args)) => {
            let settings = effective_settings(cli, args, None)?;
            print!("{}", render_tree(&settings)?);
            Ok(())
        }
        Some(Commands::Walk { generate, order }) => {
            let settings = effective_settings(cli, generate, *order)?;
            print!("{}", render_walk(&settings)?);
            Ok(())
        }
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Layered settings with command line overrides applied on top.
#[instrument(skip(cli))]
pub fn effective_settings(
    cli: &Cli,
    args: &GenerateArgs,
    order: Option<Order>,
) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(size) = args.size {
        settings.size = size;
    }
    if let Some(chance) = args.branch_chance {
        settings.branch_chance = chance;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(order) = order {
        settings.order = order;
    }
    settings.validate()?;
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

/// Generates a tree per `settings` and renders it.
pub fn render_tree(settings: &Settings) -> CliResult<String> {
    let (forest, root) = grow(settings)?;
    Ok(forest.to_tree_string(root)?.to_string())
}

/// Generates a tree per `settings` and lists it in `settings.order`, one
/// `depth value` line per node, indented by depth.
pub fn render_walk(settings: &Settings) -> CliResult<String> {
    let (forest, root) = grow(settings)?;
    let mut out = String::new();
    forest.walk(root, settings.order, &mut out, |out, depth, node| {
        out.push_str(&format!("{}{} {}\n", "  ".repeat(depth), depth, node.value()));
    })?;
    Ok(out)
}

fn grow(settings: &Settings) -> TreeResult<(Forest<usize>, NodeId)> {
    let generator = settings.generator()?;
    let mut forest = Forest::with_capacity(settings.size);
    let root = match settings.seed {
        Some(seed) => generator.generate(&mut forest, &mut StdRng::seed_from_u64(seed), counter())?,
        None => generator.generate(&mut forest, &mut rand::thread_rng(), counter())?,
    };
    Ok((forest, root))
}

/// Labels nodes 0, 1, 2, ... in creation order.
fn counter<R: Rng>() -> impl FnMut(&mut R) -> usize {
    let mut next = 0;
    move |_| {
        let label = next;
        next += 1;
        label
    }
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Template => print!("{}", Settings::template()),
        ConfigCommands::Path => {
            let path = global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("cannot determine a config directory for this user".into())
            })?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
