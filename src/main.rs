use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;

use nurse_onboarding::config::{StorageBackend, WizardConfig};
use nurse_onboarding::onboarding::{LogSubmission, PersonalInfoForm, WizardStore};
use nurse_onboarding::shell::Shell;
use nurse_onboarding::store::{FileStorage, LibSqlStorage, MemoryStorage, ProfileStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WizardConfig::from_env()?;

    // stdout is the wizard itself, so logs go to a daily file.
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating log directory {}", config.log_dir.display()))?;
    let appender = tracing_appender::rolling::daily(&config.log_dir, "onboarding.log");
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        storage = ?config.storage,
        data_dir = %config.data_dir.display(),
        "Starting onboarding wizard"
    );

    // ── Storage ──────────────────────────────────────────────────────────
    let storage: Arc<dyn ProfileStorage> = match config.storage {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FileStorage::new(config.data_dir.clone())),
        StorageBackend::LibSql => {
            let path = config.database_path();
            Arc::new(
                LibSqlStorage::new_local(&path)
                    .await
                    .with_context(|| format!("opening database at {}", path.display()))?,
            )
        }
    };

    let store = WizardStore::load(storage, Arc::new(LogSubmission), config.storage_key.clone()).await;
    let form = PersonalInfoForm::new(config.debounce);

    let mut shell = Shell::new(store, form);
    shell
        .run(BufReader::new(tokio::io::stdin()), std::io::stdout())
        .await
        .context("terminal I/O failed")?;

    tracing::info!("Onboarding wizard exited");
    Ok(())
}
