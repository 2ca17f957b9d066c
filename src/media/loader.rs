// SPDX-License-Identifier: MPL-2.0
//! Generation-tagged image load requests.
//!
//! Every load attempt receives a monotonically increasing [`RequestId`].
//! Only the response carrying the most recently issued id may update the
//! viewer; responses for superseded requests are discarded regardless of the
//! order in which they resolve.

use crate::domain::media::ImageSource;

/// Identifier of a single load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A load the caller should perform asynchronously.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub id: RequestId,
    pub source: ImageSource,
}

/// Issues request ids and remembers the latest one.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    issued: u64,
}

impl LoadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new request, superseding every earlier one.
    pub fn issue(&mut self, source: ImageSource) -> LoadRequest {
        self.issued += 1;
        LoadRequest {
            id: RequestId(self.issued),
            source,
        }
    }

    /// Returns true if `id` is the most recently issued request.
    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest() == Some(id)
    }

    /// Returns the latest issued id, if any.
    #[must_use]
    pub fn latest(&self) -> Option<RequestId> {
        (self.issued != 0).then_some(RequestId(self.issued))
    }
}
