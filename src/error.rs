use thiserror::Error;

/// Errors that can end a viewer run.
///
/// Mesh and geometry errors are raised before any backend state exists, so
/// a failed run never leaks renderer resources. Image-write failures are
/// deliberately *not* represented here: they are diagnostic-only and the
/// render loop reports them without aborting.
#[derive(Error, Debug)]
pub enum ViewError {
    /// Wrong argument shape on the command line.
    #[error("{0}")]
    Usage(String),

    /// The mesh file could not be read or parsed.
    #[error("failed to load mesh: {0:#}")]
    Mesh(anyhow::Error),

    /// A line cell references a point beyond the mesh's point array.
    #[error("line cell {cell} references point {index} but the mesh has {point_count} points")]
    IndexOutOfRange {
        cell: usize,
        index: usize,
        point_count: usize,
    },

    /// No line cells survived extraction; an empty scene is a data error,
    /// not a valid degenerate render.
    #[error("mesh contains no line cells; nothing to render")]
    EmptyGeometry,

    /// The rendering backend failed to come up.
    #[error(transparent)]
    BackendInit(#[from] BackendInitError),
}

impl From<anyhow::Error> for ViewError {
    fn from(err: anyhow::Error) -> Self {
        ViewError::Mesh(err)
    }
}

impl ViewError {
    /// Process exit code for this error. Backend failures surface the
    /// backend's own code; everything else is an ordinary usage/data error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ViewError::BackendInit(err) => err.code,
            _ => 1,
        }
    }
}

/// Initialization failure reported by the rendering backend, carrying the
/// numeric code the process exits with.
#[derive(Error, Debug)]
#[error("backend initialization failed (code {code}): {message}")]
pub struct BackendInitError {
    pub code: i32,
    pub message: String,
}

impl BackendInitError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            code: 2,
            message: message.into(),
        }
    }
}
