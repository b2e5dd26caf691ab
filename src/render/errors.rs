use thiserror::Error;

/// Rendering error types
///
/// These are setup and tooling problems, never problems with the program
/// being analyzed.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Renderer '{program}' was not found; install Graphviz from https://graphviz.org/download/")]
    RendererMissing { program: String },

    #[error("Renderer exited with {status}: {stderr}")]
    RendererFailed { status: String, stderr: String },

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}
