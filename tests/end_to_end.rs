use arkade_vault::core::backup::archive_writer::ArchiveWriter;
use arkade_vault::core::backup::backup_queue::EnqueueOutcome;
use arkade_vault::model::config::Config;
use arkade_vault::model::job::{GameType, Job};
use arkade_vault::model::schedule::interval::IntervalUnit;
use arkade_vault::{AppConfig, BackupManager, Reporter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn ark_server(root: &Path) {
    let saved = root.join("ShooterGame/Saved");
    write(&saved.join("SavedArks/Ragnarok/Ragnarok.ark"), "world");
    write(&saved.join("SavedArks/Ragnarok/76561198000000000.arkprofile"), "survivor");
    write(&saved.join("SavedArks/Ragnarok/1337.arktribe"), "tribe");
    write(&saved.join("Config/WindowsServer/GameUserSettings.ini"), "[ServerSettings]");
    write(&saved.join("Config/WindowsServer/Game.ini"), "[/script/shootergame]");
}

fn manager(dir: &TempDir) -> BackupManager {
    let config = Config {
        data_directory: dir.path().join("data"),
        log_directory: dir.path().join("logs"),
        default_monthly_destination: dir.path().join("monthly"),
        ..Config::default()
    };
    BackupManager::new(Arc::new(AppConfig::from_config(config).unwrap()), Reporter::detached())
}

fn archives(destination: &Path) -> Vec<PathBuf> {
    fs::read_dir(destination)
        .map(|entries| {
            entries
                .map(|entry| entry.unwrap().path())
                .filter(|path| path.extension().is_some_and(|extension| extension == "zip"))
                .collect()
        })
        .unwrap_or_default()
}

fn ragnarok(source: &Path, destination: &Path) -> Job {
    let mut job = Job::new("ragnarok", GameType::Ark, source, destination, 30, IntervalUnit::Minutes, 7);
    job.include_save = true;
    job.include_server_config = true;
    job.selected_map = Some(String::from("Ragnarok"));
    job
}

#[tokio::test]
async fn run_now_twice_publishes_one_verified_archive() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("server");
    let destination = dir.path().join("backups");
    ark_server(&source);

    let mut manager = manager(&dir);
    manager.add_job(ragnarok(&source, &destination)).unwrap();

    assert_eq!(manager.run_now(0).unwrap(), EnqueueOutcome::Queued);
    assert!(matches!(manager.run_now(0).unwrap(), EnqueueOutcome::Skipped { .. }));
    manager.shutdown().await;

    let published = archives(&destination);
    assert_eq!(published.len(), 1);
    let name = published[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("ragnarok_"));
    assert!(name.ends_with(".zip"));
    ArchiveWriter::verify(&published[0], 5).unwrap();

    let record = manager.last_record("ragnarok").unwrap();
    assert!(record.succeeded());
}

#[tokio::test]
async fn failed_build_is_recorded_and_publishes_nothing() {
    let dir = tempdir().unwrap();
    let destination = dir.path().join("backups");
    let mut manager = manager(&dir);
    manager
        .add_job(ragnarok(&dir.path().join("missing"), &destination))
        .unwrap();

    manager.run_now(0).unwrap();
    manager.shutdown().await;

    assert!(archives(&destination).is_empty());
    assert!(!manager.last_record("ragnarok").unwrap().succeeded());
}

#[tokio::test]
async fn jobs_survive_restart() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("server");

    let mut first = manager(&dir);
    first
        .add_job(ragnarok(&source, &dir.path().join("backups")))
        .unwrap();
    first.shutdown().await;

    let second = manager(&dir);
    assert_eq!(second.jobs().len(), 1);
    assert_eq!(second.jobs()[0].name, "ragnarok");
    second.shutdown().await;
}
