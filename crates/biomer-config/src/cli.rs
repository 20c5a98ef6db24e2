//! Command-line flags shared by every Biomer subcommand.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// RON biome catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory for exported images.
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Never write `.bak` backups, regardless of config.
    #[arg(long, global = true)]
    pub no_backup: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &GlobalArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref catalog) = args.catalog {
            self.paths.catalog = Some(catalog.clone());
        }
        if let Some(ref dir) = args.output_dir {
            self.paths.output_dir = Some(dir.clone());
        }
        if args.no_backup {
            self.edit.backup_on_save = false;
        }
    }
}
