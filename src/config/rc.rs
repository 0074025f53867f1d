use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::action::history::DEFAULT_UNDO_LEVELS;
use crate::literal::ByteOrder;

const RC_FILE_NAME: &str = ".hexabyterc";
const MAX_UNDO_LEVELS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcConfig {
    pub undo_levels: usize,
    pub byte_order: ByteOrder,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            undo_levels: DEFAULT_UNDO_LEVELS,
            byte_order: ByteOrder::Native,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .hexabyterc in:
    /// 1. Current directory
    /// 2. Home directory (~/.hexabyterc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load the RC file from its default location
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(rc_path) => Self::load_from(&rc_path),
            None => RcConfig::default(),
        }
    }

    /// Load and parse a specific RC file. Unreadable files yield the defaults.
    pub fn load_from(rc_path: &Path) -> RcConfig {
        let mut config = RcConfig::default();

        match fs::read_to_string(rc_path) {
            Ok(content) => {
                log::info!("loading configuration from {}", rc_path.display());
                Self::parse_config_content(&content, &mut config);
            }
            Err(err) => {
                log::warn!("cannot read {}: {err}", rc_path.display());
            }
        }

        config
    }

    /// Parse the content of an RC file
    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    /// Parse a single configuration line
    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        // "set key=value" (vim style) and plain "key=value" share the same keys
        let setting = line.strip_prefix("set ").unwrap_or(line).trim();
        let Some((key, value)) = setting.split_once('=') else {
            log::debug!("ignoring configuration line: {line}");
            return;
        };

        match key.trim() {
            "undolevels" | "undo_levels" => {
                match value.trim().parse::<usize>() {
                    Ok(levels) if (1..=MAX_UNDO_LEVELS).contains(&levels) => {
                        config.undo_levels = levels;
                    }
                    _ => log::warn!("invalid undo levels: {}", value.trim()),
                }
            }
            "byteorder" | "byte_order" => match value.trim().parse::<ByteOrder>() {
                Ok(order) => config.byte_order = order,
                Err(err) => log::warn!("{err}"),
            },
            other => log::debug!("unknown setting: {other}"),
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# hexabyte configuration file (.hexabyterc)
# Lines starting with # or " are comments

# Number of goto steps kept for undo (1-10000)
set undolevels=1000

# Byte order for integer search literals without a marker:
# @ / native, < / little, > / big, ! / network
set byteorder=@

# Alternative key=value syntax:
# undo_levels=500
# byte_order=little
"#
        .to_string()
    }
}
