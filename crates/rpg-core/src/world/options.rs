//! Game options and configuration
//!
//! Options live in a small rc file, one `OPTIONS=` entry per line:
//!
//! ```text
//! # textrpg configuration
//! OPTIONS=name:Melon
//! OPTIONS=class:mage
//! OPTIONS=!typewriter
//! OPTIONS=flee_chance:75
//! ```

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::ClassKind;
use crate::{DEFAULT_FLEE_CHANCE, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_HEIGHT, MAX_WIDTH};

/// Everything a player can set from the rc file or the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    // Character options
    pub name: String,
    pub class: Option<ClassKind>,

    // Display options
    pub typewriter: bool,
    /// Delay between characters in milliseconds when typewriter is on
    pub text_delay: u64,
    pub map: bool,

    // World options
    pub grid_width: u8,
    pub grid_height: u8,
    pub seed: Option<u64>,

    // Combat options
    /// Percent chance that running from a battle succeeds
    pub flee_chance: u32,

    // Save options
    pub save_dir: Option<String>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            class: None,

            typewriter: true,
            text_delay: 15,
            map: true,

            grid_width: DEFAULT_WIDTH,
            grid_height: DEFAULT_HEIGHT,
            seed: None,

            flee_chance: DEFAULT_FLEE_CHANCE,

            save_dir: None,
        }
    }
}

impl GameOptions {
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Parse rc file text; blank lines and `#` comments are skipped
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(opts) = line.strip_prefix("OPTIONS=") else {
                return Err(OptionsError::ParseError(line.to_string()));
            };
            for opt in opts.split(',') {
                options.parse_option(opt.trim())?;
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }

        if let Some(name) = opt.strip_prefix('!') {
            return self.set_bool_option(name, false);
        }

        match opt.split_once(':') {
            Some((name, value)) => self.set_option(name.trim(), value.trim()),
            None => self.set_bool_option(opt, true),
        }
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "typewriter" => self.typewriter = value,
            "map" => self.map = value,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "name" => self.name = value.to_string(),
            "class" => self.class = Some(value.parse().map_err(|_| invalid())?),
            "text_delay" => self.text_delay = value.parse().map_err(|_| invalid())?,
            "grid_width" => {
                let width: u8 = value.parse().map_err(|_| invalid())?;
                if width == 0 || width > MAX_WIDTH {
                    return Err(invalid());
                }
                self.grid_width = width;
            }
            "grid_height" => {
                let height: u8 = value.parse().map_err(|_| invalid())?;
                if height == 0 || height > MAX_HEIGHT {
                    return Err(invalid());
                }
                self.grid_height = height;
            }
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            "flee_chance" => {
                let chance: u32 = value.parse().map_err(|_| invalid())?;
                if chance > 100 {
                    return Err(invalid());
                }
                self.flee_chance = chance;
            }
            "save_dir" => self.save_dir = Some(value.to_string()),
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Write the rc file, creating its directory first
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_config_string())?;
        Ok(())
    }

    /// Render as an rc file that `parse_config` reads back unchanged
    pub fn to_config_string(&self) -> String {
        let flag = |on: bool, name: &str| {
            if on {
                format!("OPTIONS={name}")
            } else {
                format!("OPTIONS=!{name}")
            }
        };

        let mut out = String::from("# textrpg configuration\n");
        if !self.name.is_empty() {
            let _ = writeln!(out, "OPTIONS=name:{}", self.name);
        }
        if let Some(class) = self.class {
            let _ = writeln!(out, "OPTIONS=class:{class}");
        }

        out.push_str("\n# Display\n");
        let _ = writeln!(out, "{}", flag(self.typewriter, "typewriter"));
        let _ = writeln!(out, "OPTIONS=text_delay:{}", self.text_delay);
        let _ = writeln!(out, "{}", flag(self.map, "map"));

        out.push_str("\n# World and combat\n");
        let _ = writeln!(
            out,
            "OPTIONS=grid_width:{},grid_height:{}",
            self.grid_width, self.grid_height
        );
        if let Some(seed) = self.seed {
            let _ = writeln!(out, "OPTIONS=seed:{seed}");
        }
        let _ = writeln!(out, "OPTIONS=flee_chance:{}", self.flee_chance);

        if let Some(dir) = &self.save_dir {
            let _ = writeln!(out, "\nOPTIONS=save_dir:{dir}");
        }
        out
    }
}

/// Options parsing errors
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Could not read options: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let opts = GameOptions::default();
        assert!(opts.typewriter);
        assert_eq!(opts.grid_width, 5);
        assert_eq!(opts.grid_height, 5);
        assert_eq!(opts.flee_chance, 50);
        assert!(opts.class.is_none());
    }

    #[test]
    fn test_negated_flags() {
        let config = "OPTIONS=!typewriter\nOPTIONS=!map";
        let opts = GameOptions::parse_config(config).unwrap();
        assert!(!opts.typewriter);
        assert!(!opts.map);
    }

    #[test]
    fn test_parse_value_options() {
        let config = "# comment\nOPTIONS=name:Melon,class:rogue\nOPTIONS=seed:99,flee_chance:80";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.name, "Melon");
        assert_eq!(opts.class, Some(ClassKind::Rogue));
        assert_eq!(opts.seed, Some(99));
        assert_eq!(opts.flee_chance, 80);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=flee_chance:150"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=class:Bard"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=grid_width:27"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert!(matches!(
            GameOptions::parse_config("OPTIONS=colour"),
            Err(OptionsError::UnknownOption(_))
        ));
        assert!(matches!(
            GameOptions::parse_config("BIND=x:y"),
            Err(OptionsError::ParseError(_))
        ));
    }

    #[test]
    fn test_written_config_reads_back() {
        let opts = GameOptions {
            name: "Tester".into(),
            class: Some(ClassKind::Mage),
            typewriter: false,
            grid_width: 8,
            seed: Some(7),
            save_dir: Some("/tmp/saves".into()),
            ..GameOptions::default()
        };

        let parsed = GameOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_save_to_file_creates_directory() {
        let dir = std::env::temp_dir().join(format!("textrpg_opts_{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("textrpg").join("textrpgrc");
        let opts = GameOptions {
            grid_height: 3,
            map: false,
            ..GameOptions::default()
        };

        opts.save_to_file(&path).unwrap();
        assert_eq!(GameOptions::load_from_file(&path).unwrap(), opts);
        std::fs::remove_dir_all(&dir).ok();
    }
}
