//! Save / clear / restore of one object's whole animation record.
//!
//! Typical export use:
//! 1. `save_animation_data` on the source object,
//! 2. `clear_animation_data` (and whatever the export needs to do),
//! 3. `set_animation_data` on the same or another object.
//!
//! Restoring consumes the manager; a saved record is replayed once.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::ManagerConfig;
use crate::error::HostError;
use crate::guard::TweakModeGuard;
use crate::host::{ActionId, BlendType, Document, EditScope, Extrapolation, ObjectId};
use crate::proxy::NlaSave;

/// What was saved from an object that had an animation record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationRecord {
    /// Shared reference; the action itself stays in the document.
    pub action: Option<ActionId>,
    pub action_extrapolation: Extrapolation,
    pub action_blend_type: BlendType,
    pub action_influence: f32,
    pub nla_tracks: NlaSave,
}

#[derive(Clone, Debug, Default)]
pub struct AnimationManager {
    config: ManagerConfig,
    record: Option<AnimationRecord>,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            config,
            record: None,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn record(&self) -> Option<&AnimationRecord> {
        self.record.as_ref()
    }

    /// True once an object with an animation record has been saved.
    pub fn has_animation_data(&self) -> bool {
        self.record.is_some()
    }

    /// Snapshot the current action, its blend settings and the NLA stack.
    /// An object without an animation record saves nothing.
    pub fn save_animation_data(
        &mut self,
        doc: &Document,
        target: ObjectId,
    ) -> Result<(), HostError> {
        let object = doc.object(target)?;
        self.record = object.animation_data().map(|anim| AnimationRecord {
            action: anim.action,
            action_extrapolation: anim.action_extrapolation,
            action_blend_type: anim.action_blend_type,
            action_influence: anim.action_influence,
            nla_tracks: NlaSave::new(Some(&anim.nla_tracks)),
        });
        debug!(
            "saved animation data of '{}' (present: {})",
            object.name,
            self.record.is_some()
        );
        Ok(())
    }

    /// Drop the object's animation record. Clearing twice is the same as once.
    pub fn clear_animation_data(
        &self,
        doc: &mut Document,
        target: ObjectId,
    ) -> Result<(), HostError> {
        let mut doc = TweakModeGuard::exit(doc);
        doc.edit(target)?.object.animation_data_clear();
        Ok(())
    }

    /// Restore with `copy_nla` taken from the configuration.
    pub fn restore(self, doc: &mut Document, target: ObjectId) -> Result<(), HostError> {
        let copy_nla = self.config.copy_nla;
        self.set_animation_data(doc, target, copy_nla)
    }

    /// Write the saved record onto `target`.
    ///
    /// Tweak mode is switched off for the duration and switched back on
    /// afterwards if it was on, including when a host edit fails part way.
    /// With `copy_nla`, existing tracks on the target are removed and the
    /// saved stack is rebuilt in its original order.
    pub fn set_animation_data(
        self,
        doc: &mut Document,
        target: ObjectId,
        copy_nla: bool,
    ) -> Result<(), HostError> {
        let mut doc = TweakModeGuard::exit(doc);
        let EditScope { object, actions } = doc.edit(target)?;
        info!("set animation data on '{}'", object.name);

        if self.record.is_some() {
            object.animation_data_create();
        }
        let Some(anim) = object.animation_data_mut() else {
            return Ok(());
        };

        match &self.record {
            Some(record) => {
                anim.action = record.action;
                anim.action_extrapolation = record.action_extrapolation;
                anim.action_blend_type = record.action_blend_type;
                anim.action_influence = record.action_influence;
            }
            None => {
                anim.action = None;
                anim.action_extrapolation = self.config.default_extrapolation;
                anim.action_blend_type = self.config.default_blend_type;
                anim.action_influence = self.config.default_influence;
            }
        }

        if copy_nla {
            // Always remove index 0 so removal never skips a track.
            while anim.nla_tracks.remove(0).is_some() {}
            if let Some(record) = &self.record {
                record.nla_tracks.apply_save_on_target(Some(object), actions)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Action, Object, TweakModeHost};

    fn scene() -> (Document, ObjectId, ActionId) {
        let mut doc = Document::new();
        let mut walk = Action::new("Walk");
        walk.manual_frame_range = Some([0.0, 24.0]);
        let walk = doc.add_action(walk);
        let id = doc.add_object(Object::new("Hero"));
        {
            let scope = doc.edit(id).unwrap();
            let anim = scope.object.animation_data_create();
            anim.action = Some(walk);
            anim.action_blend_type = BlendType::Combine;
            anim.action_influence = 0.75;
            let track = anim.nla_tracks.new_track();
            track.set_name("Locomotion");
            track
                .new_strip("Walk", 0, walk, scope.actions.get(walk).unwrap())
                .unwrap();
        }
        (doc, id, walk)
    }

    #[test]
    fn set_without_copy_nla_keeps_target_tracks() {
        let (mut doc, id, walk) = scene();
        let mut manager = AnimationManager::new();
        manager.save_animation_data(&doc, id).unwrap();
        {
            let scope = doc.edit(id).unwrap();
            let anim = scope.object.animation_data_mut().unwrap();
            anim.action = None;
            anim.nla_tracks.new_track().set_name("Extra");
        }
        manager.set_animation_data(&mut doc, id, false).unwrap();
        let anim = doc.object(id).unwrap().animation_data().unwrap();
        assert_eq!(anim.action, Some(walk));
        assert_eq!(anim.action_blend_type, BlendType::Combine);
        assert_eq!(anim.nla_tracks.len(), 2);
    }

    #[test]
    fn unsaved_manager_writes_defaults() {
        let (mut doc, id, _) = scene();
        AnimationManager::new()
            .set_animation_data(&mut doc, id, true)
            .unwrap();
        let anim = doc.object(id).unwrap().animation_data().unwrap();
        assert_eq!(anim.action, None);
        assert_eq!(anim.action_blend_type, BlendType::Replace);
        assert_eq!(anim.action_extrapolation, Extrapolation::Hold);
        assert_eq!(anim.action_influence, 1.0);
        assert!(anim.nla_tracks.is_empty());
    }

    #[test]
    fn restore_uses_configured_copy_nla() {
        let (mut doc, id, _) = scene();
        let mut manager = AnimationManager::with_config(ManagerConfig {
            copy_nla: true,
            ..ManagerConfig::default()
        });
        manager.save_animation_data(&doc, id).unwrap();
        manager.clear_animation_data(&mut doc, id).unwrap();
        manager.restore(&mut doc, id).unwrap();
        let anim = doc.object(id).unwrap().animation_data().unwrap();
        assert_eq!(anim.nla_tracks.get(0).unwrap().name(), "Locomotion");
    }

    #[test]
    fn clear_works_in_tweak_mode() {
        let (mut doc, id, _) = scene();
        doc.enter_tweak_mode();
        AnimationManager::new().clear_animation_data(&mut doc, id).unwrap();
        assert!(doc.is_tweak_mode());
        assert!(doc.object(id).unwrap().animation_data().is_none());
    }

    #[test]
    fn unknown_object_is_a_host_fault() {
        let (mut doc, id, _) = scene();
        doc.remove_object(id);
        let mut manager = AnimationManager::new();
        assert_eq!(
            manager.save_animation_data(&doc, id).unwrap_err(),
            HostError::ObjectNotFound(id)
        );
        assert_eq!(
            manager.set_animation_data(&mut doc, id, true).unwrap_err(),
            HostError::ObjectNotFound(id)
        );
    }
}
