//! Error handling for the CLI toolkit
//!
//! Every failure is a value of [`CliError`]. The variants follow the
//! categories an operator sees: bad input, configuration, key custody,
//! remote calls and transaction validation.

use std::fmt;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Classification of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorKind {
    Unavailable,
    Deadline,
    Permission,
    NotFound,
    InvalidArgument,
    Internal,
}

impl RpcErrorKind {
    /// Map a gRPC status code onto the closed set of kinds
    pub fn from_code(code: tonic::Code) -> Self {
        match code {
            tonic::Code::Unavailable | tonic::Code::Cancelled | tonic::Code::Aborted => {
                RpcErrorKind::Unavailable
            }
            tonic::Code::DeadlineExceeded => RpcErrorKind::Deadline,
            tonic::Code::PermissionDenied | tonic::Code::Unauthenticated => {
                RpcErrorKind::Permission
            }
            tonic::Code::NotFound => RpcErrorKind::NotFound,
            tonic::Code::InvalidArgument
            | tonic::Code::FailedPrecondition
            | tonic::Code::OutOfRange
            | tonic::Code::AlreadyExists => RpcErrorKind::InvalidArgument,
            _ => RpcErrorKind::Internal,
        }
    }
}

impl fmt::Display for RpcErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RpcErrorKind::Unavailable => "unavailable",
            RpcErrorKind::Deadline => "deadline exceeded",
            RpcErrorKind::Permission => "permission denied",
            RpcErrorKind::NotFound => "not found",
            RpcErrorKind::InvalidArgument => "invalid argument",
            RpcErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Reasons a transaction is rejected before it leaves the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidHash,
    InvalidAmount,
    InvalidPrice,
    InvalidAccount,
    InvalidRecipient,
    InvalidType,
    InvalidPayload,
    NonceTooLow,
    NonceTooHigh,
    InsufficientBalance,
    TooSmallAmount,
    OnlyInPrivateNet,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::InvalidHash => "tx invalid hash",
            ValidationError::InvalidAmount => "tx invalid amount",
            ValidationError::InvalidPrice => "tx invalid price",
            ValidationError::InvalidAccount => "tx invalid account",
            ValidationError::InvalidRecipient => "tx invalid recipient",
            ValidationError::InvalidType => "tx invalid type",
            ValidationError::InvalidPayload => "tx invalid payload",
            ValidationError::NonceTooLow => "nonce is too low",
            ValidationError::NonceTooHigh => "nonce is too high",
            ValidationError::InsufficientBalance => "not enough balance",
            ValidationError::TooSmallAmount => "too small amount to influence",
            ValidationError::OnlyInPrivateNet => "tx only supported in private",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

/// Comprehensive error type for the node and polaris CLIs
#[derive(Debug, Clone)]
pub enum CliError {
    /// Bad flag, undecodable address, unparseable amount, unknown unit
    Input(String),
    /// Home directory, template or config file problems
    Config(String),
    /// Wrong password, corrupt key file, bad signature, bad key version
    Crypto(String),
    /// Transport or application failure of a remote call
    Rpc { kind: RpcErrorKind, message: String },
    /// Transaction rejected by local validation
    Validation(ValidationError),
    /// File I/O errors
    Io(String),
    /// JSON, TOML or protobuf (de)serialization errors
    Serialization(String),
}

impl CliError {
    pub fn rpc(kind: RpcErrorKind, message: impl Into<String>) -> Self {
        CliError::Rpc {
            kind,
            message: message.into(),
        }
    }

    /// True when a remote call reported that the requested entity is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CliError::Rpc {
                kind: RpcErrorKind::NotFound,
                ..
            }
        )
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Config(msg) => write!(f, "config error: {msg}"),
            CliError::Crypto(msg) => write!(f, "{msg}"),
            CliError::Rpc { kind, message } => write!(f, "rpc error ({kind}): {message}"),
            CliError::Validation(err) => write!(f, "{err}"),
            CliError::Io(msg) => write!(f, "I/O error: {msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Validation(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Io(format!("prompt: {err}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(format!("json: {err}"))
    }
}

impl From<prost::DecodeError> for CliError {
    fn from(err: prost::DecodeError) -> Self {
        CliError::Serialization(format!("protobuf: {err}"))
    }
}

impl From<tonic::Status> for CliError {
    fn from(status: tonic::Status) -> Self {
        CliError::Rpc {
            kind: RpcErrorKind::from_code(status.code()),
            message: status.message().to_string(),
        }
    }
}

impl From<tonic::transport::Error> for CliError {
    fn from(err: tonic::transport::Error) -> Self {
        CliError::Rpc {
            kind: RpcErrorKind::Unavailable,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_kind() {
        let err: CliError = tonic::Status::not_found("tx not found").into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "rpc error (not found): tx not found");

        let err: CliError = tonic::Status::deadline_exceeded("slow").into();
        assert!(matches!(
            err,
            CliError::Rpc {
                kind: RpcErrorKind::Deadline,
                ..
            }
        ));
    }

    #[test]
    fn test_validation_messages() {
        let err: CliError = ValidationError::NonceTooLow.into();
        assert_eq!(err.to_string(), "nonce is too low");
        assert_eq!(
            ValidationError::InsufficientBalance.to_string(),
            "not enough balance"
        );
    }
}
