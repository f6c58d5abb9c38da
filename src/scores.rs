//! High-score persistence: a single JSON record in `~/.scamper/`.
//!
//! The watermark is stored in half-point units so it stays an exact
//! integer (one scratcher passed = 1 half-point = 0.5 displayed points).
//! A missing or corrupt file loads as the zero default; the game never
//! fails over its save file.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const HIGH_SCORE_FILE: &str = "high_score.json";

/// The persisted high-score record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    /// Best session score, in half-point units.
    pub best_half_points: u32,
    /// Unix timestamp when the best was set.
    pub achieved_at: i64,
}

/// `~/.scamper/`, created on demand.
fn data_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine home directory")
    })?;
    let dir = home.join(".scamper");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn high_score_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(HIGH_SCORE_FILE))
}

fn read_record(path: &Path) -> HighScore {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => HighScore::default(),
    }
}

fn write_record(path: &Path, record: &HighScore) -> io::Result<()> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Load the saved high score, or the zero default if anything is off.
pub fn load_high_score() -> HighScore {
    match high_score_path() {
        Ok(path) => read_record(&path),
        Err(_) => HighScore::default(),
    }
}

/// Persist a new watermark, stamped with the current time.
pub fn save_high_score(best_half_points: u32) -> io::Result<()> {
    let record = HighScore {
        best_half_points,
        achieved_at: Utc::now().timestamp(),
    };
    write_record(&high_score_path()?, &record)
}

/// Render a half-point score for display: `7` or `7.5`.
pub fn format_half_points(half_points: u32) -> String {
    if half_points % 2 == 0 {
        (half_points / 2).to_string()
    } else {
        format!("{}.5", half_points / 2)
    }
}
