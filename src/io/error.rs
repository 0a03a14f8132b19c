//! Error types for piece preparation, solving, and output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all puzzle operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Piece set doesn't meet solver preconditions
    ///
    /// Raised before solving begins, never during the greedy join loop:
    /// an empty piece set, a piece with an empty edge strip, or a piece
    /// whose identity index disagrees with its position.
    InvalidPieceSet {
        /// Description of the violated precondition
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidPieceSet { reason } => {
                write!(f, "Invalid piece set: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid piece set error
pub fn invalid_piece_set(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidPieceSet {
        reason: reason.to_string(),
    }
}

/// Create a generic path error
pub fn io_error(msg: &str) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_piece_set_display() {
        let err = invalid_piece_set(&"piece set is empty");
        assert_eq!(err.to_string(), "Invalid piece set: piece set is empty");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = invalid_parameter("rows", &0, &"must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'rows' = '0': must be at least 1"
        );
    }

    #[test]
    fn test_file_system_source_is_forwarded() {
        let err = PuzzleError::FileSystem {
            path: PathBuf::from("/tmp/out"),
            operation: "create directory",
            source: std::io::Error::other("denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
