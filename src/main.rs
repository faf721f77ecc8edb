//! sublabel - Entry point for the inbox labeler

use std::path::Path;

use anyhow::Context;
use sublabel::config::{Settings, StorageSettings};
use sublabel::providers::Mailbox;
use sublabel::storage::{InMemoryMailbox, SqliteMailbox};
use sublabel::{LabelingReport, ThreadLabeler};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!("Labeling failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings_path = Settings::default_path()?;
    let settings = Settings::load(&settings_path)?;

    tracing::info!(
        settings = %settings_path.display(),
        trusted_domains = ?settings.labeling.trusted_domains.iter().collect::<Vec<_>>(),
        dry_run = settings.labeling.dry_run,
        "Starting sublabel"
    );

    let dry_run = settings.labeling.dry_run;
    let labeler = ThreadLabeler::new(settings.labeling);
    let report = match &settings.storage.snapshot_path {
        Some(path) => label_snapshot(&labeler, path, dry_run)?,
        None => label_database(&labeler, &settings.storage)?,
    };

    tracing::info!(
        threads = report.threads_examined,
        labeled = report.applied.len(),
        labels = report.labels_applied(),
        failed = report.failures.len(),
        "Labeling finished"
    );

    Ok(())
}

fn label_database(
    labeler: &ThreadLabeler,
    storage: &StorageSettings,
) -> anyhow::Result<LabelingReport> {
    let db_path = storage.resolve_database_path()?;
    tracing::info!(database = %db_path.display(), "Labeling mailbox database");

    let mailbox = SqliteMailbox::open(&db_path)
        .with_context(|| format!("opening mailbox at {}", db_path.display()))?;
    label_inbox(labeler, &mailbox)
}

fn label_snapshot(
    labeler: &ThreadLabeler,
    path: &Path,
    dry_run: bool,
) -> anyhow::Result<LabelingReport> {
    tracing::info!(snapshot = %path.display(), "Labeling mailbox snapshot");

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let mailbox = InMemoryMailbox::from_json(&json)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    let report = label_inbox(labeler, &mailbox)?;

    if !dry_run {
        std::fs::write(path, mailbox.to_json()?)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
    }

    Ok(report)
}

fn label_inbox<M: Mailbox>(labeler: &ThreadLabeler, mailbox: &M) -> anyhow::Result<LabelingReport> {
    labeler.run(mailbox).context("listing inbox threads")
}
