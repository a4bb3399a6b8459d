use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hl_core::config::{output_dir_from_env_value, strict_input_from_env_value};
use hl_core::{Kiosk, KioskConfig, Session};

/// Main entry point for the Health-Link kiosk
///
/// Runs one interactive kiosk session on the terminal. The menu is written to stdout and logs
/// go to stderr, so redirecting stderr keeps the screen clean.
///
/// # Environment Variables
/// - `HEALTH_LINK_OUTPUT_DIR`: Directory for `<name>_QR.png` and `<name>_ID.txt` (default: ".")
/// - `HEALTH_LINK_STRICT_INPUT`: Validate onboarding fields when truthy (default: off)
/// - `RUST_LOG`: Log filter (default directive: "health_link=info,hl_core=info")
///
/// # Returns
/// * `Ok(())` - When the user exits or input ends
/// * `Err(anyhow::Error)` - If configuration is invalid or the console fails
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_link=info".parse()?)
                .add_directive("hl_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let output_dir = output_dir_from_env_value(std::env::var("HEALTH_LINK_OUTPUT_DIR").ok());
    let strict_input =
        strict_input_from_env_value(std::env::var("HEALTH_LINK_STRICT_INPUT").ok())?;
    let cfg = Arc::new(KioskConfig::new(output_dir, strict_input)?);

    tracing::info!(
        "++ Starting Health-Link kiosk (output dir: {}, strict input: {})",
        cfg.output_dir().display(),
        cfg.strict_input()
    );

    let session = Session::new(cfg);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut kiosk = Kiosk::new(session, stdin.lock(), stdout.lock());
    kiosk.run()?;

    Ok(())
}
