//! `biomer`: inspect and edit `.biom` planet surface files.
//!
//! Configuration is loaded from `config.ron` and can be overridden via the
//! global flags, e.g. `biomer --catalog biomes.ron info planet.biom`.

mod commands;
mod error;

use std::path::PathBuf;

use biomer_config::{Config, GlobalArgs, default_config_dir};
use clap::{Parser, Subcommand};

use commands::{HemisphereArg, Layer};
use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "biomer", version, about = "Inspect and edit .biom planet surface files")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the biome table and per-hemisphere statistics.
    Info {
        /// `.biom` file to inspect.
        file: PathBuf,
    },
    /// Append a biome to the table.
    AddBiome {
        /// `.biom` file to edit.
        file: PathBuf,
        /// Catalog editor id, or a form id (`0x1234abcd` or decimal).
        biome: String,
        /// Plugin the edited file belongs to.
        #[arg(long)]
        plugin: Option<String>,
        /// Write here instead of overwriting the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove the biome at a table position.
    RemoveBiome {
        /// `.biom` file to edit.
        file: PathBuf,
        /// Zero-based table position.
        index: usize,
        /// Plugin the edited file belongs to.
        #[arg(long)]
        plugin: Option<String>,
        /// Write here instead of overwriting the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render one hemisphere layer to a PNG.
    Export {
        /// `.biom` file to read.
        file: PathBuf,
        /// Hemisphere to render (defaults to `render.default_hemisphere`).
        #[arg(long, value_enum)]
        side: Option<HemisphereArg>,
        /// Layer to render.
        #[arg(long, value_enum, default_value = "biome")]
        layer: Layer,
        /// PNG path (defaults to `<output dir>/<name>_<side>_<layer>.png`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace one hemisphere layer with the contents of a PNG.
    Import {
        /// `.biom` file to edit.
        file: PathBuf,
        /// PNG painted with the export palette.
        image: PathBuf,
        /// Hemisphere to replace (defaults to `render.default_hemisphere`).
        #[arg(long, value_enum)]
        side: Option<HemisphereArg>,
        /// Layer to replace.
        #[arg(long, value_enum, default_value = "biome")]
        layer: Layer,
        /// Plugin the edited file belongs to.
        #[arg(long)]
        plugin: Option<String>,
        /// Write here instead of overwriting the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the configured biome catalog.
    Catalog,
}

fn main() {
    let cli = Cli::parse();

    let config_dir = cli.global.config.clone().or_else(|| match default_config_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("{e}, using default config");
            None
        }
    });

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&cli.global);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    biomer_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(cli.command, &config) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> Result<(), CliError> {
    let text = match command {
        Command::Info { file } => commands::info(&file, config)?,
        Command::AddBiome {
            file,
            biome,
            plugin,
            output,
        } => commands::add_biome(
            &file,
            &biome,
            plugin.as_deref(),
            output.as_deref(),
            config,
        )?,
        Command::RemoveBiome {
            file,
            index,
            plugin,
            output,
        } => commands::remove_biome(&file, index, plugin.as_deref(), output.as_deref(), config)?,
        Command::Export {
            file,
            side,
            layer,
            output,
        } => {
            let path = commands::export(&file, side, layer, output.as_deref(), config)?;
            format!("wrote {}", path.display())
        }
        Command::Import {
            file,
            image,
            side,
            layer,
            plugin,
            output,
        } => commands::import(
            &file,
            &image,
            side,
            layer,
            plugin.as_deref(),
            output.as_deref(),
            config,
        )?,
        Command::Catalog => commands::catalog(config)?,
    };
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_flags() {
        let cli = Cli::try_parse_from([
            "biomer",
            "--no-backup",
            "export",
            "planet.biom",
            "--side",
            "south",
            "--layer",
            "resource",
        ])
        .unwrap();
        assert!(cli.global.no_backup);
        match cli.command {
            Command::Export { side, layer, output, .. } => {
                assert_eq!(side, Some(HemisphereArg::South));
                assert_eq!(layer, Layer::Resource);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "biomer",
            "remove-biome",
            "planet.biom",
            "3",
            "--catalog",
            "biomes.ron",
        ])
        .unwrap();
        assert_eq!(cli.global.catalog, Some(PathBuf::from("biomes.ron")));
        assert!(matches!(cli.command, Command::RemoveBiome { index: 3, .. }));
    }

    #[test]
    fn test_negative_index_rejected() {
        let result = Cli::try_parse_from(["biomer", "remove-biome", "planet.biom", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
