use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::fields::{copied, TrackField, TRACK_FIELDS};
use crate::host::{ActionLibrary, NlaTrack, NlaTracks, Object};
use crate::proxy::strip::StripSnapshot;

/// Copy of one NLA track: flags plus strips in chronological order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub name: String,
    /// Captured for inspection only; the host decides which track is active.
    pub active: bool,
    pub is_solo: bool,
    pub lock: bool,
    pub mute: bool,
    pub select: bool,
    pub strips: Vec<StripSnapshot>,
}

impl TrackSnapshot {
    pub fn capture(track: &NlaTrack) -> Self {
        Self {
            name: track.name().to_string(),
            active: track.active(),
            is_solo: track.is_solo(),
            lock: track.lock(),
            mute: track.mute(),
            select: track.select(),
            strips: track.strips().iter().map(StripSnapshot::capture).collect(),
        }
    }

    /// Restore onto an object. No object, or an object without an animation
    /// record, is a no-op.
    pub fn apply_on_target(
        &self,
        target: Option<&mut Object>,
        actions: &ActionLibrary,
    ) -> Result<(), HostError> {
        let Some(anim) = target.and_then(Object::animation_data_mut) else {
            return Ok(());
        };
        self.restore(&mut anim.nla_tracks, actions)?;
        Ok(())
    }

    /// Append a new track on top of `tracks` and rebuild flags and strips.
    pub fn restore<'t>(
        &self,
        tracks: &'t mut NlaTracks,
        actions: &ActionLibrary,
    ) -> Result<&'t mut NlaTrack, HostError> {
        let track = tracks.new_track();
        for field in copied(TRACK_FIELDS) {
            self.apply(field, track);
        }
        for strip in &self.strips {
            strip.restore(track, actions)?;
        }
        Ok(track)
    }

    fn apply(&self, field: TrackField, track: &mut NlaTrack) {
        match field {
            TrackField::IsSolo => track.set_is_solo(self.is_solo),
            TrackField::Lock => track.set_lock(self.lock),
            TrackField::Mute => track.set_mute(self.mute),
            TrackField::Name => track.set_name(self.name.as_str()),
            TrackField::Select => track.set_select(self.select),
            TrackField::Active | TrackField::Strips => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Action, ActionId};

    fn fixture() -> (ActionLibrary, NlaTracks) {
        let mut lib = ActionLibrary::new();
        let mut action = Action::new("Idle");
        action.manual_frame_range = Some([0.0, 10.0]);
        let idle = lib.insert(action);

        let mut tracks = NlaTracks::default();
        let track = tracks.new_track();
        track.set_name("Base");
        track.set_lock(true);
        track.set_select(true);
        track.new_strip("first", 0, idle, lib.get(idle).unwrap()).unwrap();
        track.new_strip("second", 20, idle, lib.get(idle).unwrap()).unwrap();
        track.new_strip("third", 40, idle, lib.get(idle).unwrap()).unwrap();
        (lib, tracks)
    }

    #[test]
    fn restore_keeps_flags_and_strip_order() {
        let (lib, tracks) = fixture();
        let snap = TrackSnapshot::capture(tracks.get(0).unwrap());

        let mut target = NlaTracks::default();
        let restored = snap.restore(&mut target, &lib).unwrap();
        assert_eq!(TrackSnapshot::capture(restored), snap);
        let names: Vec<&str> = restored.strips().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn skipped_strip_leaves_siblings() {
        let (lib, tracks) = fixture();
        let mut snap = TrackSnapshot::capture(tracks.get(0).unwrap());
        snap.strips[1].action = None;

        let mut target = NlaTracks::default();
        let restored = snap.restore(&mut target, &lib).unwrap();
        let names: Vec<&str> = restored.strips().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert!(restored
            .strips()
            .iter()
            .all(|s| s.action() == Some(ActionId(0))));
    }

    #[test]
    fn object_without_record_is_untouched() {
        let (lib, tracks) = fixture();
        let snap = TrackSnapshot::capture(tracks.get(0).unwrap());
        let mut object = Object::new("Empty");
        snap.apply_on_target(Some(&mut object), &lib).unwrap();
        assert!(object.animation_data().is_none());
        snap.apply_on_target(None, &lib).unwrap();
    }
}
