//! Command-line argument parsing
//!
//! Supports:
//! - Composing mega and demo dashboards from plan files
//! - Inserting HTTP status code panels into a dashboard
//! - Appending panels from a file below a dashboard's content

use clap::{Parser, Subcommand};
use compose::AppendConfig;
use layout_engine::SlotConfig;
use std::path::PathBuf;

/// Compose and edit dashboard JSON files
#[derive(Parser, Debug)]
#[command(name = "dashctl", version, about = "Compose and edit dashboard JSON files")]
pub struct CliArgs {
    /// Log placement details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge every panel of several dashboards into one, a section per source
    Mega {
        /// Plan file naming the sections and their source dashboards
        plan: PathBuf,

        /// Where to write the result; overrides the plan's `output`
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build a curated overview from selected panels of several dashboards
    Demo {
        plan: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Insert (or refresh) HTTP status code panels
    StatusCodes {
        /// Dashboard to edit
        target: PathBuf,

        /// Status code configuration; built-in codes and layout when absent
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Where to write the result; the target is replaced when absent
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Append panels from a file on a fixed tile grid
    Append {
        /// Dashboard to edit
        target: PathBuf,

        /// File holding a JSON array of panels, or a dashboard
        panels: PathBuf,

        #[arg(long, value_name = "N", default_value_t = 12)]
        tile_width: u32,

        #[arg(long, value_name = "N", default_value_t = 8)]
        tile_height: u32,

        /// Tiles per row; as many as fit when absent
        #[arg(long, value_name = "N")]
        per_row: Option<u32>,

        /// Insertion row; below existing content when absent
        #[arg(long, value_name = "ROW")]
        at: Option<u32>,

        /// Lowest id to hand out
        #[arg(long, value_name = "ID")]
        id_floor: Option<u64>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Build the append configuration from the tile options
pub fn append_config(
    tile_width: u32,
    tile_height: u32,
    per_row: Option<u32>,
    at: Option<u32>,
    id_floor: Option<u64>,
) -> AppendConfig {
    let mut slot = SlotConfig::new(tile_width, tile_height);
    slot.per_row = per_row;
    AppendConfig { slot, at, id_floor }
}

impl CliArgs {
    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mega() {
        let args = CliArgs::parse_from(["dashctl", "mega", "plans/mega.json", "-o", "out.json"]);
        assert!(!args.verbose);
        match args.command {
            Command::Mega { plan, output } => {
                assert_eq!(plan, PathBuf::from("plans/mega.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let args = CliArgs::parse_from(["dashctl", "status-codes", "errors.json", "-v"]);
        assert_eq!(args.log_filter(), "debug");
        assert!(matches!(
            args.command,
            Command::StatusCodes { config: None, output: None, .. }
        ));
    }

    #[test]
    fn test_append_defaults() {
        let args = CliArgs::parse_from(["dashctl", "append", "deps.json", "mongo.json"]);
        let Command::Append {
            tile_width,
            tile_height,
            per_row,
            at,
            id_floor,
            ..
        } = args.command
        else {
            panic!("expected append");
        };
        assert_eq!(
            append_config(tile_width, tile_height, per_row, at, id_floor),
            AppendConfig::default()
        );
    }
}
