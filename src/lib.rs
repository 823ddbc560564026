use anyhow::Result;
use chrono::Utc;
use log::LevelFilter;

pub mod client;
pub mod config;
pub mod probe;

pub use config::{Config, Endpoint};
pub use probe::{
    FALLBACK_RESPONSE, ProbeResponse, TEMPLATE_PATTERN, probe_index_templates,
    probe_index_templates_from_env, probe_index_templates_with_client,
    probe_index_templates_with_config,
};

pub const APP_NAME: &str = "index_template_probe";

/// Logs this crate and `calling_module` at INFO (DEBUG if `verbose`) and everything else at
/// WARN.
pub fn set_up_logger(app_name: &str, calling_module: &str, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for(app_name.to_string(), level)
        .level_for(calling_module.to_string(), level)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
