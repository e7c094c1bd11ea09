//! Raindrop Images DL - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use raindrop_images_dl::{
    api::RaindropApi,
    cli::{watch_interrupts, Args},
    config::{validate_config, Config},
    download::{AssetDownloader, Downloader},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_stats,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = if e.is_cancelled() {
                exit_codes::ABORT
            } else if e.is_config() {
                exit_codes::CONFIG_ERROR
            } else {
                match e {
                    Error::CollectionFetch { .. }
                    | Error::NotFound(_)
                    | Error::UnexpectedStatus { .. }
                    | Error::Decode(_)
                    | Error::Http(_) => exit_codes::API_ERROR,
                    Error::TomlParse(_) | Error::UrlParse(_) => exit_codes::CONFIG_ERROR,
                    _ => exit_codes::UNEXPECTED_ERROR,
                }
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = match args.config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading configuration from {}", path.display());
            Config::load(&path)?
        }
        Some(path) if args.config.is_some() => {
            return Err(Error::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        _ => Config::default(),
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let downloader_config = config.downloader_config()?;
    print_config_summary(
        downloader_config.collection_id,
        &downloader_config.output_dir,
        downloader_config.write_info_json,
    );

    let api = RaindropApi::new(&config.api_settings())?;
    let assets = AssetDownloader::new(
        &config.api.user_agent,
        config.timeout(),
        config.options.show_progress,
    )?;
    let downloader = Downloader::new(api, assets, downloader_config);

    // Cancel in-flight requests on Ctrl-C, exit right away on a second one
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        let forced = watch_interrupts(tokio::signal::ctrl_c, on_signal, || {
            print_warning("Interrupted, stopping after the current request...");
            print_warning("Press Ctrl-C again to quit immediately");
        })
        .await;
        if forced {
            print_error("Interrupted again, exiting");
            std::process::exit(exit_codes::ABORT);
        }
    });

    print_info("Fetching collection from Raindrop.io...");
    let report = downloader.run(&cancel).await?;

    print_run_stats(&report);

    if report.cancelled() {
        print_warning("Download cancelled");
        return Ok(exit_codes::ABORT);
    }

    if let Some(reason) = &report.stopped {
        print_warning(&format!("Stopped before the last page: {}", reason));
    } else {
        print_success(&format!(
            "Collection '{}' downloaded to {}",
            report.collection_title,
            report.target_dir.display()
        ));
    }

    Ok(exit_codes::SUCCESS)
}
