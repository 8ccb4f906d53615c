//! Host faults surfaced by document edits.
//!
//! Missing targets, strips without an action and curves that cannot be
//! located are not errors; the proxies skip them. Only faults the host itself
//! raises end up here.

use crate::host::{ActionId, ObjectId};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HostError {
    /// The object id does not name a live object (deleted or never created).
    #[error("object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// A strip references an action that is not in the document.
    #[error("action not found: {0:?}")]
    ActionNotFound(ActionId),

    /// Structural animation edits are refused while in tweak mode.
    #[error("cannot edit animation structure while in tweak mode")]
    TweakModeActive,

    /// The track has no room for a strip starting at this frame.
    #[error("track '{track}' has no space for a strip at frame {frame_start}")]
    NoSpaceForStrip { track: String, frame_start: i32 },
}
