//! Command-line arguments for the hexglobe demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Generate a tiled globe, pick the tile under the camera, and report stats.
///
/// Values given here win over `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexglobe", about = "Goldberg polyhedron globe generator")]
pub struct CliArgs {
    /// Segments per icosahedron edge.
    #[arg(long, short = 'n')]
    pub subdivisions: Option<u32>,

    /// Noise and cap-mode seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Probability that a rock tile gets a separate cap.
    #[arg(long)]
    pub cap_chance: Option<f64>,

    /// Log filter (error, warn, info, debug, trace, or a full directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print globe stats as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(n) = args.subdivisions {
            self.globe.subdivisions = n;
        }
        if let Some(seed) = args.seed {
            self.globe.seed = seed;
        }
        if let Some(chance) = args.cap_chance {
            self.globe.separate_cap_chance = chance;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(["hexglobe", "-n", "8", "--seed", "42", "--cap-chance", "0.25"]);
        config.apply_cli_overrides(&args);

        assert_eq!(config.globe.subdivisions, 8);
        assert_eq!(config.globe.seed, 42);
        assert_eq!(config.globe.separate_cap_chance, 0.25);
        assert_eq!(config.debug.log_level, "info");
        assert!(!args.json);
    }

    #[test]
    fn test_no_args_keeps_config() {
        let mut config = Config::default();
        config.globe.seed = 3;
        let args = CliArgs::parse_from(["hexglobe"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.globe.seed, 3);
        assert_eq!(config.globe.subdivisions, 25);
    }

    #[test]
    fn test_json_and_config_dir() {
        let args = CliArgs::parse_from(["hexglobe", "--json", "--config", "/tmp/hg", "--log-level", "debug"]);
        assert!(args.json);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/hg")));

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.log_level, "debug");
    }
}
