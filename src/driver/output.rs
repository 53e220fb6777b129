//! Output file placement and writing.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated `.v` files.
#[derive(Debug, Clone, Default)]
pub(crate) struct OutputWriter {
    output_dir: Option<PathBuf>,
}

impl OutputWriter {
    pub(crate) fn new(output_dir: Option<PathBuf>) -> Self {
        OutputWriter { output_dir }
    }

    /// `foo/bar.c` becomes `foo/bar.v`, or `<output-dir>/bar.v`.
    pub(crate) fn v_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = PathBuf::from(stem);
        name.set_extension("v");
        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => input.with_file_name(name),
        }
    }

    /// Directory that receives the globals file of a directory input.
    pub(crate) fn globals_dir<'p>(&'p self, input_dir: &'p Path) -> &'p Path {
        self.output_dir.as_deref().unwrap_or(input_dir)
    }

    pub(crate) fn write_unit(&self, input: &Path, text: &str) -> std::io::Result<PathBuf> {
        let path = self.v_path(input);
        self.write(&path, text)?;
        Ok(path)
    }

    pub(crate) fn write_globals(&self, input_dir: &Path, name: &str, text: &str) -> std::io::Result<PathBuf> {
        let path = self.globals_dir(input_dir).join(name);
        self.write(&path, text)?;
        Ok(path)
    }

    fn write(&self, path: &Path, text: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        debug!("writing {}", path.display());
        fs::write(path, text)
    }
}
