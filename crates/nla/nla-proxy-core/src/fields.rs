//! Field tables: every host field a proxy knows about, and what restoring
//! does with it.
//!
//! Paste routines walk these tables and assign exactly the [`CopyPolicy::Copy`]
//! entries, in table order. Anything else is listed with the reason it is not
//! assigned.

use serde::{Deserialize, Serialize};

use self::CopyPolicy as P;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyPolicy {
    /// Assigned back onto the new host element.
    Copy,
    /// Passed to the host constructor; assigning again is redundant.
    SetAtCreation,
    /// Host-derived or host-managed; no setter.
    SkipReadOnly,
    /// Assigning outside the owning editor context corrupts host state.
    SkipCrashProne,
    /// Collection restored element by element by the child proxy.
    Replay,
    /// Not supported yet (modifiers, drivers, meta strips).
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec<F> {
    pub field: F,
    pub name: &'static str,
    pub policy: CopyPolicy,
}

const fn spec<F>(field: F, name: &'static str, policy: CopyPolicy) -> FieldSpec<F> {
    FieldSpec {
        field,
        name,
        policy,
    }
}

/// Fields assigned on restore, in table order.
pub fn copied<F: Copy>(table: &'static [FieldSpec<F>]) -> impl Iterator<Item = F> {
    table
        .iter()
        .filter(|f| f.policy == CopyPolicy::Copy)
        .map(|f| f.field)
}

pub fn policy_of<F: PartialEq>(table: &[FieldSpec<F>], field: F) -> Option<CopyPolicy> {
    table.iter().find(|f| f.field == field).map(|f| f.policy)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FCurveField {
    DataPath,
    ArrayIndex,
    Color,
    ColorMode,
    Driver,
    Extrapolation,
    Group,
    Hide,
    IsEmpty,
    IsValid,
    KeyframePoints,
    Lock,
    Modifiers,
    Mute,
    SampledPoints,
    Select,
}

pub const FCURVE_FIELDS: &[FieldSpec<FCurveField>] = &[
    spec(FCurveField::DataPath, "data_path", P::SkipReadOnly),
    spec(FCurveField::ArrayIndex, "array_index", P::Copy),
    spec(FCurveField::Color, "color", P::Copy),
    spec(FCurveField::ColorMode, "color_mode", P::Copy),
    spec(FCurveField::Driver, "driver", P::Unsupported),
    spec(FCurveField::Extrapolation, "extrapolation", P::Copy),
    spec(FCurveField::Group, "group", P::Copy),
    spec(FCurveField::Hide, "hide", P::Copy),
    spec(FCurveField::IsEmpty, "is_empty", P::SkipReadOnly),
    spec(FCurveField::IsValid, "is_valid", P::SkipReadOnly),
    spec(FCurveField::Lock, "lock", P::Copy),
    spec(FCurveField::Modifiers, "modifiers", P::Unsupported),
    spec(FCurveField::Mute, "mute", P::Copy),
    spec(FCurveField::SampledPoints, "sampled_points", P::SkipReadOnly),
    spec(FCurveField::Select, "select", P::Copy),
    spec(FCurveField::KeyframePoints, "keyframe_points", P::Replay),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StripField {
    Action,
    ActionFrameEnd,
    ActionFrameStart,
    Active,
    BlendIn,
    BlendOut,
    BlendType,
    Extrapolation,
    FCurves,
    FrameEnd,
    FrameStart,
    Influence,
    UseAnimatedInfluence,
    StripTime,
    UseAnimatedTime,
    UseAnimatedTimeCyclic,
    UseAutoBlend,
    UseReverse,
    UseSyncLength,
    Modifiers,
    Mute,
    Name,
    Repeat,
    Scale,
    Select,
    Strips,
}

// `influence` / `strip_time` come before their `use_animated_*` toggles so the
// curve the host creates is keyed with the restored value.
pub const STRIP_FIELDS: &[FieldSpec<StripField>] = &[
    spec(StripField::Name, "name", P::SetAtCreation),
    spec(StripField::FrameStart, "frame_start", P::SetAtCreation),
    spec(StripField::Action, "action", P::SetAtCreation),
    spec(StripField::Active, "active", P::SkipCrashProne),
    spec(StripField::ActionFrameEnd, "action_frame_end", P::Copy),
    spec(StripField::ActionFrameStart, "action_frame_start", P::Copy),
    spec(StripField::BlendIn, "blend_in", P::Copy),
    spec(StripField::BlendOut, "blend_out", P::Copy),
    spec(StripField::BlendType, "blend_type", P::Copy),
    spec(StripField::Extrapolation, "extrapolation", P::Copy),
    spec(StripField::FrameEnd, "frame_end", P::Copy),
    spec(StripField::Influence, "influence", P::Copy),
    spec(StripField::UseAnimatedInfluence, "use_animated_influence", P::Copy),
    spec(StripField::StripTime, "strip_time", P::Copy),
    spec(StripField::UseAnimatedTime, "use_animated_time", P::Copy),
    spec(StripField::UseAnimatedTimeCyclic, "use_animated_time_cyclic", P::Copy),
    spec(StripField::UseAutoBlend, "use_auto_blend", P::Copy),
    spec(StripField::UseReverse, "use_reverse", P::Copy),
    spec(StripField::UseSyncLength, "use_sync_length", P::Copy),
    spec(StripField::Modifiers, "modifiers", P::Unsupported),
    spec(StripField::Mute, "mute", P::Copy),
    spec(StripField::Repeat, "repeat", P::Copy),
    spec(StripField::Scale, "scale", P::Copy),
    spec(StripField::Select, "select", P::Copy),
    spec(StripField::Strips, "strips", P::Unsupported),
    spec(StripField::FCurves, "fcurves", P::Replay),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackField {
    Active,
    IsSolo,
    Lock,
    Mute,
    Name,
    Select,
    Strips,
}

pub const TRACK_FIELDS: &[FieldSpec<TrackField>] = &[
    spec(TrackField::Active, "active", P::SkipReadOnly),
    spec(TrackField::IsSolo, "is_solo", P::Copy),
    spec(TrackField::Lock, "lock", P::Copy),
    spec(TrackField::Mute, "mute", P::Copy),
    spec(TrackField::Name, "name", P::Copy),
    spec(TrackField::Select, "select", P::Copy),
    spec(TrackField::Strips, "strips", P::Replay),
];
