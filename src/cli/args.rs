//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;

/// Raindrop.io image downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "raindrop-images-dl",
    version,
    about = "Download images from Raindrop.io collections",
    long_about = "Downloads every image bookmark of a Raindrop.io collection into\n\
                  <output>/<collection title>/, optionally writing a .info.json\n\
                  metadata file next to each image. Existing files are never overwritten."
)]
pub struct Args {
    /// The collection ID (or collection URL) to download images from.
    #[arg(short, long, env = "RAINDROP_COLLECTION")]
    pub collection: Option<String>,

    /// The output directory to save the images. Must already exist.
    #[arg(short, long, env = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// The Raindrop.io API key.
    #[arg(short = 'k', long = "api-key", env = "RAINDROP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Generate a JSON file with the image metadata.
    #[arg(
        short = 'i',
        long = "gen-info-json",
        env = "GEN_INFO_JSON",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub gen_info_json: Option<bool>,

    /// Raindrop API base URL.
    #[arg(long = "base-url", env = "RAINDROP_API_URL")]
    pub base_url: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide download progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Configuration file to read: `--config` if given, else the platform default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(api_key) = self.api_key {
            config.account.api_key = api_key;
        }

        if let Some(collection) = self.collection {
            config.options.collection = Some(collection);
        }

        if let Some(output) = self.output {
            config.options.output_directory = Some(output);
        }

        if let Some(gen_info_json) = self.gen_info_json {
            config.options.write_info_json = gen_info_json;
        }

        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("raindrop-images-dl").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "-c",
            "123",
            "-o",
            "/tmp/out",
            "-k",
            "secret",
            "--gen-info-json",
            "false",
            "--quiet",
        ]);

        let mut config = Config::default();
        config.options.collection = Some("999".to_string());
        args.merge_into_config(&mut config);

        assert_eq!(config.account.api_key, "secret");
        assert_eq!(config.options.collection.as_deref(), Some("123"));
        assert_eq!(
            config.options.output_directory,
            Some(PathBuf::from("/tmp/out"))
        );
        assert!(!config.options.write_info_json);
        assert!(!config.options.show_progress);
    }

    #[test]
    fn test_bare_info_flag_means_true() {
        let args = parse(&["-i"]);
        assert_eq!(args.gen_info_json, Some(true));

        let mut config = Config::default();
        config.options.write_info_json = false;
        args.merge_into_config(&mut config);
        assert!(config.options.write_info_json);
    }

    #[test]
    fn test_unset_flags_keep_config_values() {
        let args = Args {
            collection: None,
            output: None,
            api_key: None,
            gen_info_json: None,
            base_url: None,
            config: None,
            quiet: false,
            debug: false,
        };

        let mut config = Config::default();
        config.account.api_key = "from-file".to_string();
        config.options.write_info_json = false;
        args.merge_into_config(&mut config);

        assert_eq!(config.account.api_key, "from-file");
        assert!(!config.options.write_info_json);
        assert!(config.options.show_progress);
    }
}
