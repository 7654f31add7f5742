//! Error and return-code types.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failure while turning a package description into a [`Package`](crate::model::Package).
///
/// Any of these aborts the parse; no partial package is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse XML {path}")]
    Xml {
        path: Utf8PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("No <package> root in {path}")]
    MissingRoot { path: Utf8PathBuf },
    /// An abstract element or attribute names a class that no `<element>` declares.
    #[error("No concrete classes recorded for abstract '{name}'")]
    UnknownAbstract { name: String },
    /// Only raised when strict reference checking is enabled.
    #[error("Plugin on '{plugin}' references unknown element '{reference}'")]
    UnresolvedReference { plugin: String, reference: String },
    /// Raised by the binary when consistency checks report errors.
    #[error("Package '{package}' failed validation with {count} errors")]
    Invalid { package: String, count: usize },
}

/// Command-line arguments that parse but cannot be used together.
#[derive(Debug, Error)]
#[error("Invalid arguments: {0}")]
pub struct UsageError(pub String);

/// Process return codes of the `deviser` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Success = 0,
    MissingFunctionArgument = 1,
    ParsingError = 2,
    UnknownError = 3,
}

impl ReturnCode {
    /// Pick the return code for an error surfaced by the binary.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.chain().any(|e| e.is::<UsageError>()) {
            ReturnCode::MissingFunctionArgument
        } else if err.chain().any(|e| e.is::<ParseError>()) {
            ReturnCode::ParsingError
        } else {
            ReturnCode::UnknownError
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReturnCode::Success => "success",
            ReturnCode::MissingFunctionArgument => "missing function argument",
            ReturnCode::ParsingError => "parsing error",
            ReturnCode::UnknownError => "unknown error",
        };
        f.write_str(s)
    }
}
