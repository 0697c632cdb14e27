use std::process::ExitCode;

use roomplanner::backend::Backends;
use roomplanner::config::IntakeConfig;
use roomplanner::telemetry;

/// Load configuration and build the backend clients, reporting whether the
/// intake service is ready to accept submissions.
fn main() -> ExitCode {
    telemetry::init();

    let config = match IntakeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration incomplete");
            return ExitCode::FAILURE;
        }
    };

    match Backends::from_config(&config) {
        Ok(_) => {
            tracing::info!(
                bucket = %config.storage_bucket,
                table = %config.submissions_table,
                notify = config.notify_email.is_some(),
                retry_attempts = config.retry.attempts,
                "intake backends ready"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "backend setup failed");
            ExitCode::FAILURE
        }
    }
}
