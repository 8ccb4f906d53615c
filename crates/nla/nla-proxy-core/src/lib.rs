//! NLA proxy core
//!
//! Value copies of an object's animation data (current action, blend
//! settings, NLA tracks, strips, strip F-curves and their keys) that can be
//! taken before an export step clears the object and replayed afterwards.
//!
//! The host document is modelled by [`host`]; proxies live in [`proxy`];
//! [`AnimationManager`] drives the save / clear / restore cycle and keeps
//! tweak mode out of the way with a [`TweakModeGuard`].

pub mod config;
pub mod error;
pub mod fields;
pub mod guard;
pub mod host;
pub mod manager;
pub mod proxy;

// Re-exports for consumers (exporters)
pub use config::ManagerConfig;
pub use error::HostError;
pub use fields::{CopyPolicy, FieldSpec};
pub use guard::TweakModeGuard;
pub use host::{
    Action, ActionId, ActionLibrary, AnimData, Document, EditScope, FCurve, NlaStrip, NlaTrack,
    NlaTracks, Object, ObjectId, TweakModeHost,
};
pub use manager::{AnimationManager, AnimationRecord};
pub use proxy::{FCurveSnapshot, KeyframePointSnapshot, NlaSave, StripSnapshot, TrackSnapshot};
