use crate::parser::SyntaxNode;
use crate::render::{to_dot, RenderError};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default Graphviz layout program.
pub const DEFAULT_DOT_PROGRAM: &str = "dot";

/// Default image format handed to `-T`.
pub const DEFAULT_FORMAT: &str = "png";

/// Turns a syntax tree into an image by piping DOT through Graphviz.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: PathBuf,
    format: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DOT_PROGRAM)
    }
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Render `root` into `output`.
    ///
    /// A renderer that cannot be started because it does not exist is
    /// reported as [`RenderError::RendererMissing`].
    pub fn render(&self, root: &SyntaxNode, output: &Path) -> Result<(), RenderError> {
        let dot = to_dot(root);
        tracing::debug!(
            program = %self.program.display(),
            format = %self.format,
            output = %output.display(),
            "rendering syntax tree"
        );

        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RenderError::RendererMissing {
                    program: self.program.display().to_string(),
                },
                _ => RenderError::Io(e),
            })?;

        // A renderer that fails may stop reading early. Its exit status and
        // stderr take precedence over a broken pipe.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot.as_bytes()),
            None => Ok(()),
        };

        let result = child.wait_with_output()?;
        if !result.status.success() {
            return Err(RenderError::RendererFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(())
    }
}
