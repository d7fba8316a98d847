//! Editing a file in the user's `$EDITOR`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

use tracing::info;

use crate::core::console::Console;
use crate::error::{Error, Result};

/// Environment variable naming the editor program
pub const EDITOR_ENV: &str = "EDITOR";

impl Console {
    /// Let the user edit `path` (or a scratch file) and return its contents.
    ///
    /// A `template` is written first if the file is missing or empty.
    pub fn edit_file(
        &self,
        kind_of_data: &str,
        path: Option<&Path>,
        template: Option<&str>,
    ) -> Result<String> {
        let editor = std::env::var(EDITOR_ENV).map_err(|_| Error::MissingEnv(EDITOR_ENV))?;
        self.edit_file_with(&editor, kind_of_data, path, template)
    }

    /// [`Console::edit_file`] with an explicit editor program
    pub fn edit_file_with(
        &self,
        editor: &str,
        kind_of_data: &str,
        path: Option<&Path>,
        template: Option<&str>,
    ) -> Result<String> {
        self.wait_for_foreground();

        // Keeps the scratch file alive until it has been read back
        let scratch;
        let path: PathBuf = match path {
            Some(path) => path.to_path_buf(),
            None => {
                scratch = tempfile::NamedTempFile::new()?;
                scratch.path().to_path_buf()
            }
        };

        if let Some(template) = template {
            let is_empty = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
            if is_empty {
                fs::write(&path, template)?;
            }
        }

        self.tell(format!("Start editing {} using {}…", kind_of_data, editor));
        thread::sleep(self.editor_delay());

        info!("Running editor {} on {}", editor, path.display());
        let status = Command::new(editor).arg(&path).status()?;
        if !status.success() {
            return Err(Error::Editor {
                editor: editor.to_string(),
                status,
            });
        }

        Ok(fs::read_to_string(&path)?)
    }
}
