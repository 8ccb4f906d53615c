use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::{ActionLibrary, NlaTracks, Object};
use crate::proxy::track::TrackSnapshot;

/// Copy of an object's whole track stack, bottom track first.
///
/// Stack order drives NLA blending, so restoring replays tracks in exactly
/// the captured order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NlaSave {
    pub tracks: Option<Vec<TrackSnapshot>>,
}

impl NlaSave {
    /// Capture `tracks`; `None` stores nothing.
    pub fn new(tracks: Option<&NlaTracks>) -> Self {
        let mut save = Self::default();
        if let Some(tracks) = tracks {
            save.save_tracks(tracks);
        }
        save
    }

    pub fn save_tracks(&mut self, tracks: &NlaTracks) {
        let saved: Vec<TrackSnapshot> = tracks.iter().map(TrackSnapshot::capture).collect();
        debug!("saved {} nla track(s)", saved.len());
        self.tracks = Some(saved);
    }

    pub fn is_saved(&self) -> bool {
        self.tracks.is_some()
    }

    pub fn len(&self) -> usize {
        self.tracks.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the saved tracks onto `target`. No object, or an object
    /// without an animation record, is a no-op.
    pub fn apply_save_on_target(
        &self,
        target: Option<&mut Object>,
        actions: &ActionLibrary,
    ) -> Result<(), HostError> {
        let Some(anim) = target.and_then(Object::animation_data_mut) else {
            return Ok(());
        };
        for track in self.tracks.iter().flatten() {
            track.restore(&mut anim.nla_tracks, actions)?;
        }
        Ok(())
    }
}
