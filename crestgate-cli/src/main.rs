//! Crestgate CLI — capability-table inspection and evaluation.
//!
//! Install with `cargo install crestgate-cli`, then run:
//!
//! ```bash
//! crestgate roles
//! crestgate check --role officer --user u-17 --chapter Beta --action approve --resource service_entry
//! crestgate view --session session.json --resource dues_record --records records.json
//! crestgate demo
//! ```
//!
//! See `crestgate --help` for all available commands and options.

mod commands;

use clap::{Parser, Subcommand};
use crestgate_core::config::CrestgateConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crestgate",
    about = "Inspect and evaluate Crestgate capability tables",
    version,
    after_help = "See https://github.com/crestgate/crestgate for full documentation."
)]
struct Cli {
    /// Capability-table config file (defaults to crestgate.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the capability matrix for the active registry
    Roles,

    /// Evaluate a single action-gate decision
    Check {
        /// Role of the acting user
        #[arg(long)]
        role: String,

        /// Acting user id
        #[arg(long)]
        user: String,

        /// Chapter affiliation of the acting user
        #[arg(long)]
        chapter: Option<String>,

        /// Region affiliation of the acting user
        #[arg(long)]
        region: Option<String>,

        /// Action to test: view, create, edit, approve, delete
        #[arg(long)]
        action: String,

        /// Resource kind the action targets
        #[arg(long)]
        resource: String,

        /// JSON file holding candidate records
        #[arg(long)]
        records: Option<PathBuf>,

        /// Id of the record to test against (requires --records)
        #[arg(long)]
        id: Option<String>,
    },

    /// Compose a render-ready view from session and record files
    View {
        /// JSON file holding the session claims
        #[arg(long)]
        session: PathBuf,

        /// Resource kind to compose
        #[arg(long)]
        resource: String,

        /// JSON file holding the raw records
        #[arg(long)]
        records: PathBuf,
    },

    /// Run every sample session over the bundled demo dataset
    Demo,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(config.logging.level_filter())
        .init();

    match &cli.config {
        Some(path) => log::debug!("capability table loaded from {}", path.display()),
        None => log::debug!("capability table loaded from defaults/environment"),
    }

    let result = match cli.command {
        Commands::Roles => commands::roles::run(&config),
        Commands::Check {
            role,
            user,
            chapter,
            region,
            action,
            resource,
            records,
            id,
        } => commands::check::run(
            &config,
            commands::check::CheckArgs {
                role,
                user,
                chapter,
                region,
                action,
                resource,
                records,
                id,
            },
        ),
        Commands::View {
            session,
            resource,
            records,
        } => commands::view::run(&config, &session, &resource, &records),
        Commands::Demo => commands::demo::run(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<CrestgateConfig> {
    match path {
        // Explicit file: env vars and validation still apply on top.
        Some(path) => {
            let mut config = CrestgateConfig::from_file(path)?;
            config.apply_env_vars();
            config.validate()?;
            Ok(config)
        }
        // Full supersedence (defaults, crestgate.toml, env) in one pass.
        None => CrestgateConfig::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.roles.is_empty());
    }

    #[test]
    fn test_load_config_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[logging]\nlevel = \"debug\"\n\n\
             [roles.member.message]\nvisible_fields = \"all\"\ncan_view = true\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.roles.is_empty());
    }

    #[test]
    fn test_load_config_rejects_bad_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[roles.superuser.member]\ncan_view = true\n").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
