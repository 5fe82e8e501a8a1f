//! Error taxonomy for the console.
//!
//! Call failures (`CallError`) never escape the remote call client: they are
//! stored as the terminal `Failure` state of a call. Rendering and form
//! errors are reported separately so the presentation layer can tell a broken
//! backend apart from a stale client.

use crate::rpc::models::RpcError;
use thiserror::Error;

/// Terminal failure of a remote call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// Non-2xx HTTP status or connection failure.
    #[error("{message}")]
    Transport { message: String },

    /// The response body was not the JSON we expected.
    #[error("{message}")]
    Protocol { message: String },

    /// A well-formed JSON-RPC error returned by the backend.
    #[error("{}", .0.display_message())]
    Rpc(RpcError),

    /// One or more entries of a batch response carried an error.
    #[error("{message}")]
    Batch {
        errors: Vec<RpcError>,
        message: String,
    },
}

impl CallError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Aggregates batch entry errors, joining their messages (or codes when a
    /// message is empty) with `",\n"`.
    pub fn batch(errors: Vec<RpcError>) -> Self {
        let message = errors
            .iter()
            .map(RpcError::display_message)
            .collect::<Vec<_>>()
            .join(",\n");
        Self::Batch { errors, message }
    }

    /// The backend errors carried by this failure, if any.
    pub fn rpc_errors(&self) -> &[RpcError] {
        match self {
            Self::Rpc(error) => std::slice::from_ref(error),
            Self::Batch { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// Failure of a declarative UI render pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A namespaced `type` that no registered component library provides.
    /// This means the client and the backend disagree on the UI vocabulary.
    #[error("Unknown component reference '{reference}'")]
    UnknownComponent { reference: String },
}

/// Invalid operator input for the active form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Expected name=value, got '{0}'")]
    MalformedPair(String),
}

/// The API description could not be indexed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptionError {
    #[error("Duplicate operation '{0}' in description")]
    DuplicateOperation(String),

    #[error("Malformed description: {0}")]
    Malformed(String),
}

/// Errors surfaced by the console controller.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Blocking notice shown instead of a broken form.
    #[error("Cannot load OpenRPC specification. ({0})")]
    DescriptionUnavailable(String),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("No operation selected")]
    NoSelection,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
