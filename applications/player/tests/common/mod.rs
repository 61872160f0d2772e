/// Common test utilities and fixtures
use segue_player::PlayerConfig;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `info{id}.json`
pub fn write_info(dir: &Path, id: &str, title: &str, game: &str, favorite: bool) {
    let doc = json!({
        "Title": title,
        "Composer": "Composer",
        "Game": game,
        "ReleaseYear": 2001,
        "Favorite": favorite,
        "Color1": { "r": 0.1, "g": 0.2, "b": 0.3, "a": 1.0 },
        "Color2": { "r": 0.9, "g": 0.8, "b": 0.7, "a": 1.0 }
    });
    fs::write(dir.join(format!("info{}.json", id)), doc.to_string()).unwrap();
}

/// Create an empty asset file
pub fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

/// Three-track library
///
/// | id | title   | game  | favorite | assets                 |
/// |----|---------|-------|----------|------------------------|
/// | 1  | Charlie | Delta | no       | song, two videos       |
/// | 2  | Alpha   | Echo  | yes      | song, logo             |
/// | 3  | Bravo   | Alpha | no       | song                   |
pub fn sample_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();

    write_info(path, "1", "Charlie", "Delta", false);
    write_info(path, "2", "Alpha", "Echo", true);
    write_info(path, "3", "Bravo", "Alpha", false);

    touch(path, "song1.mp3");
    touch(path, "video1_a.mp4");
    touch(path, "video1_b.mp4");
    touch(path, "song2.mp3");
    touch(path, "logo2.png");
    touch(path, "song3.mp3");

    dir
}

/// Configuration over `dir` with short tracks and clips
pub fn test_config(dir: &Path) -> PlayerConfig {
    let mut config = PlayerConfig::default();
    config.library.directory = dir.to_path_buf();
    config.playback.shuffle_seed = Some(7);
    config.playback.track_seconds = 10;
    config.playback.clip_seconds = 4;
    config
}
