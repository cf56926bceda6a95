//! Generated G-code files and where they go.
//!
//! A [`GcodeFile`] pairs a layer's program text with its download name.
//! Sinks receive finished files; the pipeline itself never touches storage.

use crate::error::CamToolResult;
use crate::gcode_emitter::GcodeDocument;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Number of characters shown by [`GcodeFile::preview`]
pub const PREVIEW_LIMIT: usize = 1000;

const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// A named G-code program, one per layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcodeFile {
    pub name: String,
    pub content: String,
}

impl GcodeFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File for a zero-based layer index, named `layer_<index + 1>.gcode`
    pub fn for_layer(index: usize, document: &GcodeDocument) -> Self {
        Self::new(Self::layer_file_name(index), document.to_string())
    }

    pub fn layer_file_name(index: usize) -> String {
        format!("layer_{}.gcode", index + 1)
    }

    /// Human-readable excerpt: the first [`PREVIEW_LIMIT`] characters,
    /// with a truncation marker when the content is longer.
    pub fn preview(&self) -> String {
        match self.content.char_indices().nth(PREVIEW_LIMIT) {
            Some((cut, _)) => format!("{}{}", &self.content[..cut], TRUNCATION_MARKER),
            None => self.content.clone(),
        }
    }
}

/// Receiver for generated files
pub trait GcodeSink {
    fn write_file(&mut self, file: &GcodeFile) -> CamToolResult<()>;
}

/// Hand every file to a sink, stopping at the first failure
pub fn write_all<S: GcodeSink + ?Sized>(files: &[GcodeFile], sink: &mut S) -> CamToolResult<()> {
    for file in files {
        sink.write_file(file)?;
    }
    Ok(())
}

/// Writes each file into a directory, creating it if needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl GcodeSink for DirectorySink {
    fn write_file(&mut self, file: &GcodeFile) -> CamToolResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.name);
        std::fs::write(&path, &file.content)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Collects files in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<GcodeFile>,
}

impl GcodeSink for MemorySink {
    fn write_file(&mut self, file: &GcodeFile) -> CamToolResult<()> {
        self.files.push(file.clone());
        Ok(())
    }
}
