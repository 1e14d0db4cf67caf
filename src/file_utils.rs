use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;
use std::path::Path;

// @module: File and stream utilities for command input and output

/// Path that stands for standard input or output
pub const STDIO_PATH: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Read a file, or standard input when the path is `-`
    pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if path.as_os_str() == STDIO_PATH {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read standard input")?;
            return Ok(content);
        }
        Self::read_to_string(path)
    }

    /// Parse a JSON document from a file or standard input
    pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
        let path = path.as_ref();
        let content = Self::read_input(path)?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON from {:?}", path))
    }

    /// Write a value as pretty JSON to a file, or to standard output when no
    /// path is given or the path is `-`
    pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
        match path {
            Some(path) if path.as_os_str() != STDIO_PATH => Self::write_to_file(path, &json),
            _ => {
                println!("{}", json);
                Ok(())
            }
        }
    }
}
