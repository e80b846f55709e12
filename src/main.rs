//! Parentzone Archiver - CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use parentzone_archiver::{
    api::{prompt_for_api_key, resolve_api_key, ParentzoneApi},
    cli::Args,
    config::{validate_api_key, validate_config, Config, SyncMode},
    download::{backfill_snapshot, sync_gallery, sync_posts, SyncStats},
    error::{exit_codes, Error, Result},
    logging::init_logging,
    output::{
        print_backfill_report, print_banner, print_config_summary, print_error, print_info,
        print_success, print_sync_stats, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::MissingApiKey => ExitCode::from(exit_codes::ABORT as u8),
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::TomlParse(_)
                | Error::UrlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Authentication(_)
                | Error::Api(_)
                | Error::Http(_)
                | Error::MalformedPost { .. } => ExitCode::from(exit_codes::API_ERROR as u8),
                Error::Download(_) | Error::InvalidFilename(_) => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config_found = args.config.exists();
    let mut config = if config_found {
        Config::load(&args.config)?
    } else {
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    // Set up logging
    init_logging(args.log_level(), &config.log_file())?;

    print_banner();
    if !config_found {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
    }

    let mode = config.options.mode;
    print_config_summary(
        &mode.to_string(),
        &config.paths.output_dir.display().to_string(),
        &config.api.base_url,
    );

    let mut stats = SyncStats::default();

    if mode.needs_api() {
        let api_key = resolve_api_key(
            args.api_key.as_deref(),
            config.account.api_key.as_deref(),
            &config.paths.api_key_file,
            prompt_for_api_key,
        )?;
        validate_api_key(&api_key)?;

        let api = ParentzoneApi::new(&config.api.base_url, api_key)?;

        if mode.includes_posts() {
            sync_posts(&api, &config, &mut stats).await?;
        }

        if mode.includes_gallery() {
            sync_gallery(&api, &config, &mut stats).await?;
        }
    }

    for &kind in mode.snapshot_kinds() {
        match backfill_snapshot(&config, kind, &mut stats) {
            Ok(report) => print_backfill_report(&kind.to_string(), &report),
            // Backfill-only runs may find just one of the snapshots
            Err(e) if mode == SyncMode::Timestamps => {
                print_warning(&format!("Skipping {} snapshot: {}", kind, e));
            }
            Err(e) => return Err(e),
        }
    }

    print_sync_stats(&stats);

    if stats.timestamps_failed > 0 {
        print_warning(&format!(
            "Could not set timestamps on {} file(s)",
            stats.timestamps_failed
        ));
    }

    if stats.failed > 0 {
        print_warning(&format!(
            "{} item(s) failed to download; run again to retry them",
            stats.failed
        ));
    } else {
        print_success("Archive is up to date");
    }

    Ok(())
}
