use crate::model::error::archive::ArchiveError;
use crate::model::error::io::IOError;
use crate::model::error::Error;
use crate::model::job::{GameType, Job};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SERVER_CONFIG_FILES: [&str; 2] = ["GameUserSettings.ini", "Game.ini"];
const PALWORLD_WORLD_FILES: [&str; 2] = ["Level.sav", "LevelMeta.sav"];

/// A file on disk and the name it is stored under inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: PathBuf,
    pub entry_name: String,
}

impl SourceEntry {
    fn new(path: PathBuf, entry_name: String) -> Self {
        Self { path, entry_name }
    }
}

/// Resolves the files a job archives. Fails when the game layout is missing
/// or no file matches the inclusion flags.
pub fn collect(job: &Job) -> Result<Vec<SourceEntry>, Error> {
    let entries = match job.game_type {
        GameType::Ark => collect_ark(job)?,
        GameType::Palworld => collect_palworld(job)?,
    };
    if entries.is_empty() {
        Err(ArchiveError::no_content(&job.name))?
    }
    Ok(entries)
}

fn collect_ark(job: &Job) -> Result<Vec<SourceEntry>, Error> {
    let root = job.source.join("ShooterGame");
    if !root.is_dir() {
        Err(ArchiveError::source_not_found(root.clone()))?
    }

    let mut entries = Vec::new();

    if job.include_save {
        let saved_arks = root.join("Saved").join("SavedArks");
        if saved_arks.is_dir() {
            let map = job.map_filter();
            for folder in sorted_children(&saved_arks, Path::is_dir)? {
                let files = sorted_children(&folder, Path::is_file)?;
                if !files.iter().any(|file| is_map_save(file, map)) {
                    continue;
                }
                let folder_name = file_name(&folder);
                for file in files {
                    if is_map_save(&file, map) || has_extension(&file, "arkprofile") || has_extension(&file, "arktribe") {
                        let entry_name = format!("SavedArks/{}/{}", folder_name, file_name(&file));
                        entries.push(SourceEntry::new(file, entry_name));
                    }
                }
                break;
            }
        }
    }

    if job.include_server_config {
        let config_dir = root.join("Saved").join("Config").join("WindowsServer");
        for name in SERVER_CONFIG_FILES {
            let path = config_dir.join(name);
            if path.is_file() {
                entries.push(SourceEntry::new(path, format!("ServerConfig/{name}")));
            }
        }
    }

    if job.include_plugin_config {
        let plugins = root
            .join("Binaries")
            .join("Win64")
            .join("ArkApi")
            .join("Plugins");
        if plugins.is_dir() {
            for plugin in sorted_children(&plugins, Path::is_dir)? {
                let config = plugin.join("config.json");
                if config.is_file() {
                    let entry_name = format!("Plugins/{}/config.json", file_name(&plugin));
                    entries.push(SourceEntry::new(config, entry_name));
                }
            }
        }
    }

    Ok(entries)
}

fn collect_palworld(job: &Job) -> Result<Vec<SourceEntry>, Error> {
    let save_games = job
        .source
        .join("Pal")
        .join("Saved")
        .join("SaveGames")
        .join("0");
    if !save_games.is_dir() {
        Err(ArchiveError::source_not_found(save_games.clone()))?
    }
    let slot = sorted_children(&save_games, Path::is_dir)?
        .into_iter()
        .next()
        .ok_or_else(|| ArchiveError::source_not_found(save_games.clone()))?;
    let prefix = format!("SaveGames/0/{}", file_name(&slot));

    let mut entries = Vec::new();
    for name in PALWORLD_WORLD_FILES {
        let path = slot.join(name);
        if path.is_file() {
            entries.push(SourceEntry::new(path, format!("{prefix}/{name}")));
        }
    }

    let players = slot.join("Players");
    if players.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(&players).sort_by_file_name() {
            let entry = entry.map_err(|err| IOError::read_directory_failed(&players, err))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&slot)
                .map(|relative| {
                    relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/")
                })
                .unwrap_or_else(|_| file_name(entry.path()));
            files.push(SourceEntry::new(entry.path().to_path_buf(), format!("{prefix}/{relative}")));
        }
        entries.extend(files);
    }

    Ok(entries)
}

fn sorted_children(dir: &Path, keep: fn(&Path) -> bool) -> Result<Vec<PathBuf>, Error> {
    let reader = fs::read_dir(dir).map_err(|err| IOError::read_directory_failed(dir, err))?;
    let mut children = Vec::new();
    for entry in reader {
        let path = entry
            .map_err(|err| IOError::read_directory_failed(dir, err))?
            .path();
        if keep(&path) {
            children.push(path);
        }
    }
    children.sort_by_key(|path| file_name(path));
    Ok(children)
}

fn is_map_save(path: &Path, map: &str) -> bool {
    has_extension(path, "ark") && file_name(path).starts_with(map)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|value| value.eq_ignore_ascii_case(extension))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::model::schedule::interval::IntervalUnit;
    use tempfile::tempdir;

    pub fn touch(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn ark_server(root: &Path) {
        let saved = root.join("ShooterGame/Saved");
        touch(&saved.join("SavedArks/Aberration/Aberration_P.ark"), "other map");
        touch(&saved.join("SavedArks/TheIsland/TheIsland.ark"), "island world");
        touch(&saved.join("SavedArks/TheIsland/1234.arkprofile"), "profile");
        touch(&saved.join("SavedArks/TheIsland/55.arktribe"), "tribe");
        touch(&saved.join("SavedArks/TheIsland/notes.txt"), "ignored");
        touch(&saved.join("Config/WindowsServer/GameUserSettings.ini"), "[ServerSettings]");
        touch(&saved.join("Config/WindowsServer/Game.ini"), "[/script/shootergame]");
        touch(
            &root.join("ShooterGame/Binaries/Win64/ArkApi/Plugins/Permissions/config.json"),
            "{}",
        );
    }

    fn ark_job(source: &Path) -> Job {
        let mut job = Job::new("island", GameType::Ark, source, "/unused", 30, IntervalUnit::Minutes, 7);
        job.include_save = true;
        job.include_server_config = true;
        job.include_plugin_config = true;
        job
    }

    fn names(entries: &[SourceEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.entry_name.as_str()).collect()
    }

    #[test]
    fn ark_selects_map_folder_and_configs() {
        let dir = tempdir().unwrap();
        ark_server(dir.path());
        let mut job = ark_job(dir.path());
        job.selected_map = Some(String::from("TheIsland"));

        let entries = collect(&job).unwrap();
        assert_eq!(
            names(&entries),
            vec![
                "SavedArks/TheIsland/1234.arkprofile",
                "SavedArks/TheIsland/55.arktribe",
                "SavedArks/TheIsland/TheIsland.ark",
                "ServerConfig/GameUserSettings.ini",
                "ServerConfig/Game.ini",
                "Plugins/Permissions/config.json",
            ]
        );
    }

    #[test]
    fn ark_without_map_takes_first_folder_with_a_save() {
        let dir = tempdir().unwrap();
        ark_server(dir.path());
        let mut job = ark_job(dir.path());
        job.include_server_config = false;
        job.include_plugin_config = false;

        let entries = collect(&job).unwrap();
        assert_eq!(names(&entries), vec!["SavedArks/Aberration/Aberration_P.ark"]);
    }

    #[test]
    fn ark_requires_shooter_game() {
        let dir = tempdir().unwrap();
        let result = collect(&ark_job(dir.path()));
        assert!(matches!(
            result,
            Err(Error::Archive(ArchiveError::SourceNotFound { .. }))
        ));
    }

    #[test]
    fn nothing_selected_is_no_content() {
        let dir = tempdir().unwrap();
        ark_server(dir.path());
        let mut job = ark_job(dir.path());
        job.include_save = false;
        job.include_server_config = false;
        job.include_plugin_config = false;

        assert!(matches!(
            collect(&job),
            Err(Error::Archive(ArchiveError::NoContent { .. }))
        ));
    }

    #[test]
    fn palworld_archives_world_and_players() {
        let dir = tempdir().unwrap();
        let slot = dir.path().join("Pal/Saved/SaveGames/0/A1B2C3");
        touch(&slot.join("Level.sav"), "level");
        touch(&slot.join("LevelMeta.sav"), "meta");
        touch(&slot.join("Players/0001.sav"), "player");
        touch(&slot.join("WorldOption.sav"), "ignored");
        let job = Job::new("pal", GameType::Palworld, dir.path(), "/unused", 1, IntervalUnit::Hours, 3);

        let entries = collect(&job).unwrap();
        assert_eq!(
            names(&entries),
            vec![
                "SaveGames/0/A1B2C3/Level.sav",
                "SaveGames/0/A1B2C3/LevelMeta.sav",
                "SaveGames/0/A1B2C3/Players/0001.sav",
            ]
        );
    }

    #[test]
    fn palworld_requires_a_save_slot() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Pal/Saved/SaveGames/0")).unwrap();
        let job = Job::new("pal", GameType::Palworld, dir.path(), "/unused", 1, IntervalUnit::Hours, 3);

        assert!(matches!(
            collect(&job),
            Err(Error::Archive(ArchiveError::SourceNotFound { .. }))
        ));
    }
}
