//! External editor launch.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor_command is empty")]
    EmptyCommand,

    #[error("failed to expand editor argument '{0}'")]
    Expand(String),

    #[error("failed to launch editor '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("editor exited with status: {0}")]
    Exit(std::process::ExitStatus),
}

/// Opens a document for the user.
pub trait Editor {
    fn open(&self, base_dir: &Path, path: &Path) -> Result<(), EditorError>;
}

/// Runs `editor_command` with `{base_dir}` and `{path}` substituted and waits
/// for it to exit.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    argv: Vec<String>,
}

impl CommandEditor {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// The argv that `open` would run.
    pub fn command_line(&self, base_dir: &Path, path: &Path) -> Result<Vec<String>, EditorError> {
        if self.argv.is_empty() {
            return Err(EditorError::EmptyCommand);
        }

        let base_dir = base_dir.display().to_string();
        let path = path.display().to_string();
        self.argv
            .iter()
            .map(|arg| {
                let expanded =
                    shellexpand::full(arg).map_err(|_| EditorError::Expand(arg.clone()))?;
                Ok(expanded.replace("{base_dir}", &base_dir).replace("{path}", &path))
            })
            .collect()
    }
}

impl Editor for CommandEditor {
    fn open(&self, base_dir: &Path, path: &Path) -> Result<(), EditorError> {
        let argv = self.command_line(base_dir, path)?;
        let (program, args) = argv.split_first().ok_or(EditorError::EmptyCommand)?;

        tracing::debug!("launching editor: {argv:?}");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| EditorError::Spawn { program: program.clone(), source })?;

        if status.success() { Ok(()) } else { Err(EditorError::Exit(status)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::default_editor_command;

    #[test]
    fn default_command_substitutes_placeholders() {
        let editor = CommandEditor::new(default_editor_command());
        let argv = editor
            .command_line(Path::new("/data/memos"), Path::new("/data/memos/a.md"))
            .unwrap();

        assert_eq!(
            argv,
            vec!["code", "--folder-uri", "/data/memos", "--goto", "/data/memos/a.md:7"]
        );
    }

    #[test]
    fn empty_command_is_rejected() {
        let editor = CommandEditor::new(Vec::new());
        assert!(matches!(
            editor.open(Path::new("/"), Path::new("/a.md")),
            Err(EditorError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_an_error() {
        let editor = CommandEditor::new(vec!["false".into()]);
        assert!(matches!(
            editor.open(Path::new("/"), Path::new("/a.md")),
            Err(EditorError::Exit(_))
        ));
        CommandEditor::new(vec!["true".into()]).open(Path::new("/"), Path::new("/a.md")).unwrap();
    }
}
