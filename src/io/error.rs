/// Errors produced while turning a program source into a [`Program`].
///
/// Two families:
/// - **Unreadable**: the source does not exist or could not be read.
/// - **Malformed**: a line could not be decoded; carries the 1-based line
///   number and the raw line text.
///
/// [`Program`]: super::Program
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("error opening program {name}: {source}")]
    Unreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name}:{line} - invalid integer argument in `{text}`")]
    InvalidInteger { name: String, line: usize, text: String },

    #[error("{name}:{line} - missing string argument in `{text}`")]
    MissingArgument { name: String, line: usize, text: String },

    #[error("{name}:{line} - invalid operation `{text}`")]
    UnknownOperation { name: String, line: usize, text: String },
}

impl LoadError {
    pub fn is_malformed(&self) -> bool {
        !matches!(self, LoadError::Unreadable { .. })
    }

    /// Line of the offending instruction, if the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Unreadable { .. } => None,
            LoadError::InvalidInteger { line, .. }
            | LoadError::MissingArgument { line, .. }
            | LoadError::UnknownOperation { line, .. } => Some(*line),
        }
    }
}
