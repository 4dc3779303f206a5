use std::path::Path;
use std::process::Command;

use elmscope_error::{Error, Result};

/// Exit status `elm-make` uses for "compiled, but found problems".
const FOUND_ISSUES: i32 = 1;

/// Runs one `elm-make` executable.
#[derive(Debug, Clone)]
pub struct ElmMake {
    executable: String,
}

impl ElmMake {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn command(&self, project_root: &Path, file: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .current_dir(project_root)
            .arg("--report=json")
            .arg("--output=/dev/null")
            .arg("--yes")
            .arg("--warn")
            .arg(file);
        command
    }

    /// Compile `file` and return stdout when problems were found.
    ///
    /// A clean compile, any other exit status and a failure to start the
    /// process all give `None`.
    pub fn run(&self, project_root: &Path, file: &Path) -> Option<String> {
        let mut command = self.command(project_root, file);
        tracing::info!(command = ?command, "running elm-make");

        let output = match command.output() {
            Ok(output) => output,
            Err(err) => {
                tracing::error!(executable = %self.executable, error = %err, "cannot start elm-make");
                return None;
            }
        };

        let code = output.status.code();
        tracing::debug!(?code, "elm-make exited");
        if code != Some(FOUND_ISSUES) {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// First line of `elm-make --help`.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.executable)
            .arg("--help")
            .output()
            .map_err(|err| {
                Error::tool_not_found(&self.executable)
                    .with_operation("make::version")
                    .set_source(err)
            })?;

        if !output.status.success() {
            return Err(Error::tool_failed(&self.executable, output.status.code())
                .with_operation("make::version"));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let make = ElmMake::new("elm-make");
        let command = make.command(Path::new("/work/app"), Path::new("/work/app/src/Main.elm"));
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--report=json",
                "--output=/dev/null",
                "--yes",
                "--warn",
                "/work/app/src/Main.elm"
            ]
        );
        assert_eq!(command.get_current_dir(), Some(Path::new("/work/app")));
    }

    #[test]
    fn test_missing_executable() {
        let make = ElmMake::new("elmscope-no-such-elm-make");
        assert!(make.run(Path::new("."), Path::new("Main.elm")).is_none());
        let err = make.version().unwrap_err();
        assert_eq!(err.kind(), elmscope_error::ErrorKind::ToolNotFound);
    }
}
