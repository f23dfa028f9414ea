use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where `parse` reads its tmconf text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// A missing argument or `-` means stdin.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => Input::File(path),
            _ => Input::Stdin,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Input::Stdin => None,
            Input::File(path) => Some(path),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole input. An interactive stdin reads as empty.
    pub fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut stdin = io::stdin();
                if stdin.is_terminal() {
                    return Ok(String::new());
                }
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("failed to read tmconf from stdin")?;
                Ok(text)
            }
            Input::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}
