use std::fmt;

/// Machine-readable error codes for scripts and JSON consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidIdentifier,
    ConnectionNotFound,
    MalformedLinkRecord,
    LinkSourceUnavailable,
    ConnectorLookupFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidIdentifier => "E1002",
            Self::ConnectionNotFound => "E2001",
            Self::MalformedLinkRecord => "E3001",
            Self::LinkSourceUnavailable => "E3002",
            Self::ConnectorLookupFailed => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidIdentifier => "Invalid table or column name",
            Self::ConnectionNotFound => "Connection not found in link graph",
            Self::MalformedLinkRecord => "Malformed link record",
            Self::LinkSourceUnavailable => "Link source unavailable",
            Self::ConnectorLookupFailed => "Connector lookup failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .cablepath/config.toml and retry."),
            Self::InvalidIdentifier => {
                Some("Use plain identifiers (letters, digits, underscore) for tables and columns.")
            }
            Self::ConnectionNotFound => {
                Some("Only connections that appear in the link list are part of the graph.")
            }
            Self::MalformedLinkRecord => {
                Some("Fix NULL start/end connection ids in the link list and reload.")
            }
            Self::LinkSourceUnavailable => {
                Some("Check the database path and the configured link view.")
            }
            Self::ConnectorLookupFailed => {
                Some("Check the configured connection table and its connector column.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
