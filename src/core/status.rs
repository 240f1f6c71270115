use tokio::sync::watch;

/// Connection health as seen by the transport status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Reconnecting,
}

impl ConnectionState {
    /// User-visible indicator label for this state.
    pub fn indicator(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "Server Online",
            ConnectionState::Disconnected => "Server Offline",
            ConnectionState::Reconnecting => "Reconnecting to server",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    Connect,
    Disconnect,
    ReconnectAttempt,
}

/// Connection-health indicator fed by transport events. Lives for the
/// whole session; observers follow the published state on the watch
/// channel. A successful reconnect arrives as a plain `Connect`.
pub struct StatusReporter {
    tx: watch::Sender<ConnectionState>,
}

impl StatusReporter {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ConnectionState::Disconnected);
        Self { tx }
    }

    pub fn apply(&self, event: TransportEvent) {
        let next = match event {
            TransportEvent::Connect => ConnectionState::Connected,
            TransportEvent::Disconnect => ConnectionState::Disconnected,
            TransportEvent::ReconnectAttempt => ConnectionState::Reconnecting,
        };
        let previous = self.tx.send_replace(next);
        if previous != next {
            tracing::info!("connection status: {}", next.indicator());
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.tx.borrow()
    }

    pub fn is_online(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}
