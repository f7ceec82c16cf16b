pub type Result<T, E = Error> = std::result::Result<T, E>;

// Boxed error raised by a Transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{step}: {cause}")]
    Transport {
        step: &'static str,
        cause: TransportError,
    },
    #[error("got non-200 status code while {step}: got code {status}")]
    UnexpectedStatus { step: &'static str, status: u16 },
    #[error("could not determine dynamic IDP login URL")]
    LoginUrlUnavailable,
    #[error("expected 1 {what}, got {count}")]
    Structure { what: String, count: usize },
    #[error("could not find {what}")]
    Missing { what: String },
    #[error("could not find {what} at index {index} (matched {count} elements)")]
    FieldNotFound {
        what: String,
        index: usize,
        count: usize,
    },
    #[error("invalid selector {css:?}: {message}")]
    InvalidSelector { css: String, message: String },
    #[error("could not derive a row index from id {id:?}")]
    MalformedId { id: String },
    #[error("{what} has no '{attr}' attribute")]
    MissingAttribute { what: String, attr: &'static str },
    #[error("could not parse {what} {text:?} into a number: {cause}")]
    Coercion {
        what: String,
        text: String,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{context}: {inner}")]
    Context { context: String, inner: Box<Error> },
}

impl Error {
    pub(crate) fn structure(what: impl Into<String>, count: usize) -> Self {
        Self::Structure {
            what: what.into(),
            count,
        }
    }

    // Wraps `self` with a description of the step or row that failed.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            inner: Box::new(self),
        }
    }

    // Innermost error beneath any context layers.
    pub fn root(&self) -> &Error {
        match self {
            Self::Context { inner, .. } => inner.root(),
            other => other,
        }
    }
}

pub(crate) trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<C: Into<String>>(self, f: impl FnOnce() -> C) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<C: Into<String>>(self, f: impl FnOnce() -> C) -> Result<T> {
        self.map_err(|e| e.context(f()))
    }
}
