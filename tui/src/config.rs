use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Keymap {
    pub quit: String,
    pub add_note: String,
    pub edit_note: String,
    pub delete_note: String,
    pub select_up: String,
    pub select_down: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            add_note: "a".to_string(),
            edit_note: "e".to_string(),
            delete_note: "d".to_string(),
            select_up: "up".to_string(),
            select_down: "down".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the notes, relative to the working directory
    pub store_path: PathBuf,
    /// How often countdowns are refreshed
    pub tick_rate_ms: u64,
    /// Where `duenotes.log` goes; defaults to the store's directory
    pub log_dir: Option<PathBuf>,
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("notes.json"),
            tick_rate_ms: 1000,
            log_dir: None,
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Directory for log files
    pub fn resolved_log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        match self.store_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Load the config file, writing the defaults out if it does not exist yet
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).context("Failed to serialize default config")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Check a key event against a binding such as `q`, `ctrl-n`, `up` or `enter`
pub fn key_matches(binding: &str, key: &KeyEvent) -> bool {
    let binding = binding.trim().to_lowercase();
    let (wants_ctrl, wants_alt, name) = split_modifiers(&binding);

    if key.modifiers.contains(KeyModifiers::CONTROL) != wants_ctrl
        || key.modifiers.contains(KeyModifiers::ALT) != wants_alt
    {
        return false;
    }

    match (name, key.code) {
        ("up", KeyCode::Up) => true,
        ("down", KeyCode::Down) => true,
        ("left", KeyCode::Left) => true,
        ("right", KeyCode::Right) => true,
        ("enter", KeyCode::Enter) => true,
        ("esc", KeyCode::Esc) => true,
        ("tab", KeyCode::Tab) => true,
        ("delete", KeyCode::Delete) => true,
        ("pageup", KeyCode::PageUp) => true,
        ("pagedown", KeyCode::PageDown) => true,
        ("space", KeyCode::Char(' ')) => true,
        (name, KeyCode::Char(c)) => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(expected), None) => c.to_lowercase().eq(expected.to_lowercase()),
                _ => false,
            }
        }
        _ => false,
    }
}

fn split_modifiers(binding: &str) -> (bool, bool, &str) {
    let mut ctrl = false;
    let mut alt = false;
    let mut rest = binding;
    loop {
        if let Some(r) = rest.strip_prefix("ctrl-") {
            ctrl = true;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("alt-") {
            alt = true;
            rest = r;
        } else {
            return (ctrl, alt, rest);
        }
    }
}
