use crate::transport::ConnectionHandle;

/// One attached connection. Created without a name; becomes a roster member
/// once a display name is accepted.
#[derive(Debug)]
pub struct Session {
    pub(crate) handle: ConnectionHandle,
    pub(crate) display_name: Option<String>,
    pub(crate) muted: bool,
    pub(crate) presence: bool,
    /// Position in the roster; set together with `display_name`.
    pub(crate) joined_seq: Option<u64>,
}

impl Session {
    pub(crate) fn new(handle: ConnectionHandle) -> Self {
        Self {
            handle,
            display_name: None,
            muted: false,
            presence: false,
            joined_seq: None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_joined(&self) -> bool {
        self.display_name.is_some()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }
}
