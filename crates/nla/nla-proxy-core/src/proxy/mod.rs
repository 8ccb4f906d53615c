//! Value copies ("proxies") of the animation graph, leaf first.
//!
//! Capture walks curves → strips → tracks → track list; restoring walks the
//! other way and rebuilds each level through the host constructors.

pub mod fcurve;
pub mod keyframe;
pub mod strip;
pub mod track;
pub mod track_list;

pub use fcurve::FCurveSnapshot;
pub use keyframe::KeyframePointSnapshot;
pub use strip::StripSnapshot;
pub use track::TrackSnapshot;
pub use track_list::NlaSave;
