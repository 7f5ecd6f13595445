//! Error types for loading, editing and writing game objects.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with game object documents.
#[derive(Debug, Error)]
pub enum Error {
    /// No input path was given.
    #[error("no input path given")]
    PathEmpty,

    /// The input document does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input document exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    XmlSyntax(#[source] metaforge_xml::Error),

    /// Well-formed XML with a root tag this crate does not know.
    #[error("unsupported document root <{root}>")]
    UnsupportedDocument { root: String },

    /// A template name that is not part of the loaded objects.
    #[error("no object named {0:?} in the loaded document")]
    InvalidTemplateSelection(String),

    /// An edit request without any edits.
    #[error("no edits provided")]
    NoEditsProvided,

    /// A structure violated the fixed layout its codec expects.
    #[error("malformed <{shape}>: {reason}")]
    MalformedStructure { shape: String, reason: String },

    /// A deeply nested element that no codec knows how to decode or encode.
    #[error("unrecognized irregular structure <{0}>")]
    UnrecognizedIrregularShape(String),

    /// An object type key outside the fixed mapping.
    #[error("unknown object type {0:?}")]
    UnknownObjectType(String),

    /// Writing the destination document failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the destination document failed.
    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: metaforge_xml::Error,
    },
}

impl Error {
    pub(crate) fn malformed(shape: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedStructure {
            shape: shape.into(),
            reason: reason.into(),
        }
    }

    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PathEmpty => ErrorKind::PathEmpty,
            Self::FileNotFound(_) | Self::Read { .. } => ErrorKind::FileNotFound,
            Self::XmlSyntax(_) => ErrorKind::XmlSyntaxError,
            Self::UnsupportedDocument { .. } => ErrorKind::UnsupportedDocument,
            Self::InvalidTemplateSelection(_) => ErrorKind::InvalidTemplateSelection,
            Self::NoEditsProvided => ErrorKind::NoEditsProvided,
            Self::MalformedStructure { .. } => ErrorKind::MalformedStructure,
            Self::UnrecognizedIrregularShape(_) => ErrorKind::UnrecognizedIrregularShape,
            Self::UnknownObjectType(_) => ErrorKind::UnknownObjectType,
            Self::WriteIo { .. } | Self::Serialize { .. } => ErrorKind::WriteIoError,
        }
    }
}

/// Coarse error categories, one per user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PathEmpty,
    FileNotFound,
    XmlSyntaxError,
    UnsupportedDocument,
    InvalidTemplateSelection,
    NoEditsProvided,
    MalformedStructure,
    UnrecognizedIrregularShape,
    UnknownObjectType,
    WriteIoError,
}

impl ErrorKind {
    /// Short human-readable message for this category.
    pub fn message(self) -> &'static str {
        match self {
            Self::PathEmpty => "Path cannot be empty.",
            Self::FileNotFound => "File not found. Check the path and try again.",
            Self::XmlSyntaxError => "The file could not be parsed as XML.",
            Self::UnsupportedDocument => "Not a supported META/XML file.",
            Self::InvalidTemplateSelection => "The selected template is not in the loaded file.",
            Self::NoEditsProvided => "Nothing to generate: no values were changed.",
            Self::MalformedStructure => "The file contains a structure with an unexpected layout.",
            Self::UnrecognizedIrregularShape => "The file contains a nested structure that is not supported.",
            Self::UnknownObjectType => "Unknown object type.",
            Self::WriteIoError => "The output file could not be written.",
        }
    }
}

/// Result type for game object operations.
pub type Result<T> = std::result::Result<T, Error>;
