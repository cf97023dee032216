#[derive(Clone, PartialEq, Eq)]
pub enum PingError {
    InvalidInput(String),
    /// Number of bytes left once the IPv4 header was stripped.
    MalformedPacket(usize),
    Transport(TransportError),
    Timeout,
    PermissionDenied(String),
    Unsupported(String),
}

#[derive(Clone, PartialEq, Eq)]
pub enum TransportError {
    SocketSetupFailed(String),
    SetSockOptError(String),
    BindError(String),
    SendtoFailed(String),
    RecvFailed(String),
    ResolveFailed(String),
    ProcessFailed(String),
    OutputParseFailed(String),
}

impl PingError {
    /// Only a missing raw-socket privilege stops a sweep; every other error
    /// is folded into the outcome of a single attempt.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, PingError::PermissionDenied(_) | PingError::Unsupported(_))
    }
}

impl std::fmt::Debug for PingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PingError::InvalidInput(str) => write!(f, "PingError::InvalidInput({:?})", str),
            PingError::MalformedPacket(len) => write!(f, "PingError::MalformedPacket({len})"),
            PingError::Transport(e) => write!(f, "PingError::Transport({:?})", e),
            PingError::Timeout => write!(f, "PingError::Timeout"),
            PingError::PermissionDenied(str) => {
                write!(f, "PingError::PermissionDenied({:?})", str)
            }
            PingError::Unsupported(str) => write!(f, "PingError::Unsupported({:?})", str),
        }
    }
}

impl std::fmt::Debug for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::SocketSetupFailed(str) => {
                write!(f, "TransportError::SocketSetupFailed({:?})", str)
            }
            TransportError::SetSockOptError(str) => {
                write!(f, "TransportError::SetSockOptError({:?})", str)
            }
            TransportError::BindError(str) => write!(f, "TransportError::BindError({:?})", str),
            TransportError::SendtoFailed(str) => {
                write!(f, "TransportError::SendtoFailed({:?})", str)
            }
            TransportError::RecvFailed(str) => {
                write!(f, "TransportError::RecvFailed({:?})", str)
            }
            TransportError::ResolveFailed(str) => {
                write!(f, "TransportError::ResolveFailed({:?})", str)
            }
            TransportError::ProcessFailed(str) => {
                write!(f, "TransportError::ProcessFailed({:?})", str)
            }
            TransportError::OutputParseFailed(str) => {
                write!(f, "TransportError::OutputParseFailed({:?})", str)
            }
        }
    }
}

impl std::fmt::Display for PingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PingError::InvalidInput(str) => write!(f, "invalid input: {}", str),
            PingError::MalformedPacket(len) => {
                write!(f, "malformed packet: {len} bytes after ip header, need 8")
            }
            PingError::Transport(e) => write!(f, "{}", e),
            PingError::Timeout => write!(f, "ping timeout"),
            PingError::PermissionDenied(str) => {
                write!(f, "permission denied opening raw socket: {}", str)
            }
            PingError::Unsupported(str) => write!(f, "unsupported: {}", str),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::SocketSetupFailed(str) => write!(f, "failed to setup socket: {}", str),
            TransportError::SetSockOptError(str) => {
                write!(f, "failed to set socket option: {}", str)
            }
            TransportError::BindError(str) => write!(f, "failed to bind socket: {}", str),
            TransportError::SendtoFailed(str) => write!(f, "failed to send message: {}", str),
            TransportError::RecvFailed(str) => {
                write!(f, "failed to receive message from socket: {}", str)
            }
            TransportError::ResolveFailed(str) => write!(f, "failed to resolve host: {}", str),
            TransportError::ProcessFailed(str) => write!(f, "failed to run ping: {}", str),
            TransportError::OutputParseFailed(str) => {
                write!(f, "failed to parse ping output: {}", str)
            }
        }
    }
}

impl std::error::Error for PingError {}

impl std::error::Error for TransportError {}

impl From<TransportError> for PingError {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}
