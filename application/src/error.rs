//! [`Error`]-related definitions.

use std::{collections::BTreeMap, fmt};

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::{command, domain::contract, infra::database, infra::storage};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            fields: ::std::collections::BTreeMap::new(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Per-field violation messages, if this [`Error`] is a validation one.
    pub fields: BTreeMap<String, String>,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            fields: BTreeMap::new(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] out of the provided per-field violation
    /// messages.
    #[must_use]
    pub fn unprocessable(
        fields: impl IntoIterator<Item = (impl ToString, impl ToString)>,
    ) -> Self {
        Self {
            code: "UNPROCESSABLE_ENTITY",
            status_code: http::StatusCode::UNPROCESSABLE_ENTITY,
            message: "validation failed".to_string(),
            fields: fields
                .into_iter()
                .map(|(f, m)| (f.to_string(), m.to_string()))
                .collect(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            fields: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        /// Body of an [`Error`] response.
        #[derive(Debug, Serialize)]
        struct Body {
            /// [`Error`] code.
            code: Code,

            /// [`Error`] message.
            message: String,

            /// Per-field violation messages.
            #[serde(skip_serializing_if = "BTreeMap::is_empty")]
            errors: BTreeMap<String, String>,
        }

        if self.status_code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let Self {
            code,
            status_code,
            fields,
            backtrace: _,
            message,
        } = self;

        (
            status_code,
            Json(Body {
                code,
                message,
                errors: fields,
            }),
        )
            .into_response()
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for storage::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "BAD_GATEWAY",
            status_code: http::StatusCode::BAD_GATEWAY,
            message: "file-hosting service request failed".to_string(),
            fields: BTreeMap::new(),
            backtrace: None,
        })
    }
}

impl AsError for contract::Violations {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::unprocessable(self.iter()))
    }
}

/// Creates a "not found" [`Error`] out of the provided message.
fn not_found(message: impl ToString) -> Error {
    Error {
        code: "NOT_FOUND",
        status_code: http::StatusCode::NOT_FOUND,
        message: message.to_string(),
        fields: BTreeMap::new(),
        backtrace: None,
    }
}

impl AsError for command::create_person::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_person::ExecutionError as E;

        match self {
            E::Db(..) => None,
        }
    }
}

impl AsError for command::update_person::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_person::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::PersonNotExists(..) => Some(not_found(self)),
        }
    }
}

impl AsError for command::delete_person::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::delete_person::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::PersonNotExists(..) => Some(not_found(self)),
        }
    }
}

impl AsError for command::create_equipment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_equipment::ExecutionError as E;

        match self {
            E::Db(..) => None,
        }
    }
}

impl AsError for command::create_possession_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_possession_contract::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::InvalidDraft(violations) => violations.try_as_error(),
            E::PersonNotExists(..) | E::EquipmentNotExists(..) => {
                Some(not_found(self))
            }
            E::AlreadyPossessed { .. } => Some(Error {
                code: "CONFLICT",
                status_code: http::StatusCode::CONFLICT,
                message: self.to_string(),
                fields: BTreeMap::new(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::update_possession_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_possession_contract::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::InvalidDraft(violations) => violations.try_as_error(),
            E::ContractNotExists(..) => Some(not_found(self)),
        }
    }
}

impl AsError for command::delete_possession_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::delete_possession_contract::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::ContractNotExists(..) => Some(not_found(self)),
        }
    }
}

impl AsError for command::create_agreement_execution::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_agreement_execution::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::Fs(fs) => fs.try_as_error(),
            E::PersonNotExists(..) => Some(not_found(self)),
        }
    }
}

impl AsError for command::update_agreement_execution::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_agreement_execution::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::AgreementNotExists(..) => Some(not_found(self)),
        }
    }
}

impl AsError for command::delete_agreement_execution::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::delete_agreement_execution::ExecutionError as E;

        match self {
            E::Db(..) => None,
            E::AgreementNotExists(..) => Some(not_found(self)),
        }
    }
}
