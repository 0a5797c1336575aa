use serde::{Serialize, Deserialize};
use std::fs;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::error::{Error, Result};
use crate::types::Source;

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

/// Paths of the two corpus resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub simple_path: PathBuf,
    pub uthmani_path: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            simple_path: PathBuf::from("data/mushaf_simple.json"),
            uthmani_path: PathBuf::from("data/mushaf_uthmani.json"),
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.simple_path.as_os_str().is_empty() || self.uthmani_path.as_os_str().is_empty() {
            return Err(Error::config("corpus resource paths must not be empty"));
        }
        Ok(())
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "files" {
            return None;
        }
        match key {
            "simple_path" => {
                self.simple_path = PathBuf::from(value);
                Some(Ok(()))
            }
            "uthmani_path" => {
                self.uthmani_path = PathBuf::from(value);
                Some(Ok(()))
            }
            _ => None,
        }
    }
}

/// Default output shaping, overridable per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub source: Source,
    pub blocks: bool,
    pub separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source: Source::TanzilSimple,
            blocks: false,
            separator: "\t".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(Error::config("output separator must not be empty"));
        }
        Ok(())
    }
}

impl FromIni for OutputConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "output" {
            return None;
        }
        match key {
            "source" => Some(Source::from_str(value).map(|s| {
                self.source = s;
            })),
            "blocks" => match value.parse() {
                Ok(flag) => {
                    self.blocks = flag;
                    Some(Ok(()))
                }
                Err(_) => Some(Err(Error::config(format!(
                    "blocks must be true or false, got {:?}",
                    value
                )))),
            },
            "separator" => {
                self.separator = value.to_string();
                Some(Ok(()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MushafConfig {
    pub files: FileConfig,
    pub output: OutputConfig,
}

impl MushafConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.output.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());
        let content = fs::read_to_string(&path)?;

        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = config
                    .files
                    .from_ini_section(&current_section, key, value)
                    .or_else(|| config.output.from_ini_section(&current_section, key, value))
                {
                    result?;
                } else {
                    warn!(
                        "Unrecognized config key: {}={} in section [{}]",
                        key, value, current_section
                    );
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}
