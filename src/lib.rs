// File Migration Wizard
// Main library entry point

pub mod catalog;
pub mod migration;
pub mod models;
pub mod pagination;
pub mod smoke;
pub mod tui;
pub mod utils;

use log::{error, info};

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging(with_stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = utils::path_resolver::resolve_log_folder()?;
    std::fs::create_dir_all(&log_dir)?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("migration-wizard-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("migration-wizard-{}.txt", timestamp));

    // Configure dual-format logging:
    // - JSON format to .log file
    // - Human-readable format to .txt file
    // - Optional: human-readable to stdout (disabled for TUI to avoid corrupting the terminal UI)
    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    log::info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(())
}

/// Interactive terminal UI wizard.
pub fn run_tui() {
    // Initialize logging (no stdout to avoid corrupting the TUI)
    if let Err(e) = init_logging(false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Migration wizard TUI starting at {}",
        chrono::Utc::now()
    );

    match utils::path_resolver::resolve_deployment_folder() {
        Ok(folder) => info!(
            "[PHASE: initialization] [STEP: deployment_folder] Deployment folder: {:?}",
            folder
        ),
        Err(e) => eprintln!("Failed to resolve deployment folder: {}", e),
    }

    if let Err(e) = tui::run() {
        error!("[PHASE: tui] [STEP: fatal] TUI exited with error: {:?}", e);
        eprintln!("Migration wizard error: {}", e);
    }
}

/// Non-interactive TUI smoke mode (for automated checks).
/// Renders a single frame for the requested page and exits (restores terminal).
pub fn run_tui_smoke(target: Option<String>) {
    // Initialize logging (no stdout to avoid corrupting the terminal)
    if let Err(e) = init_logging(false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] TUI smoke starting at {}",
        chrono::Utc::now()
    );

    let target = target.as_deref().unwrap_or("object");
    if let Err(e) = tui::smoke(target) {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Migration wizard error: {}", e);
        std::process::exit(1);
    }
}

/// Non-interactive wizard flow contract smoke (for automated verification / log capture).
/// Writes `flow_contract_smoke_transcript.log` under `Migration_Wizard_Log/` and exits 0/1.
pub fn run_flow_smoke() {
    // Initialize logging
    if let Err(e) = init_logging(false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Flow contract smoke starting at {}",
        chrono::Utc::now()
    );

    let transcript_path = match utils::path_resolver::resolve_log_folder() {
        Ok(dir) => dir.join(smoke::TRANSCRIPT_FILE),
        Err(e) => {
            eprintln!("Failed to resolve log folder for transcript: {}", e);
            std::path::PathBuf::from(smoke::TRANSCRIPT_FILE)
        }
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    let result = match rt {
        Ok(rt) => rt.block_on(smoke::flow_contract_smoke(&transcript_path)),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to create async runtime for flow contract smoke: {}",
            e
        )),
    };

    if let Err(e) = result {
        error!(
            "[PHASE: flow] [STEP: contract_smoke] Smoke exited with error: {:?}",
            e
        );
        eprintln!("Migration wizard error: {}", e);
        std::process::exit(1);
    }

    info!(
        "[PHASE: flow] [STEP: contract_smoke] Transcript written to {:?}",
        transcript_path
    );
}
