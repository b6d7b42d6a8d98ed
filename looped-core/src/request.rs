//! Request-generation tokens.
//!
//! A view issues a new token every time it starts a request of some kind and
//! only accepts a result carrying the most recent one. Results of superseded
//! requests (a second refresh, a closed drawer, a new file selection) are
//! dropped instead of overwriting newer state.

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Generation counter for one kind of request
#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
    issued: u64,
    latest: Option<u64>,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token, superseding every earlier one
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        self.latest = Some(self.issued);
        RequestToken(self.issued)
    }

    /// Whether `token` is the latest outstanding request
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token.0)
    }

    /// Accept `token` if current, closing it so the same result cannot apply twice
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.latest = None;
            true
        } else {
            false
        }
    }

    /// Drop any outstanding request
    pub fn cancel(&mut self) {
        self.latest = None;
    }

    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }
}
