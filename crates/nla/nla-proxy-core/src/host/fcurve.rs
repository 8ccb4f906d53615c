//! F-curves and keyframe points as the host stores them.

use serde::{Deserialize, Serialize};

/// How the curve is drawn in the editors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorMode {
    #[default]
    AutoRainbow,
    AutoRgb,
    AutoYrgb,
    Custom,
}

/// Curve behaviour outside the keyed range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurveExtrapolation {
    #[default]
    Constant,
    Linear,
}

/// A single (frame, value) sample on a curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub co: [f32; 2],
}

impl Keyframe {
    pub fn new(frame: f32, value: f32) -> Self {
        Self { co: [frame, value] }
    }

    #[inline]
    pub fn frame(&self) -> f32 {
        self.co[0]
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.co[1]
    }
}

/// Animation curve for one channel, identified by `(data_path, array_index)`.
///
/// `data_path` is fixed once the host created the curve; everything else the
/// proxies touch goes through setters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FCurve {
    data_path: String,
    #[serde(default)]
    array_index: i32,
    #[serde(default)]
    color: [f32; 3],
    #[serde(default)]
    color_mode: ColorMode,
    #[serde(default)]
    extrapolation: CurveExtrapolation,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    hide: bool,
    #[serde(default)]
    lock: bool,
    #[serde(default)]
    mute: bool,
    #[serde(default)]
    select: bool,
    #[serde(default)]
    keyframe_points: Vec<Keyframe>,
}

impl FCurve {
    pub fn new(data_path: impl Into<String>, array_index: i32) -> Self {
        Self {
            data_path: data_path.into(),
            array_index,
            color: [0.0; 3],
            color_mode: ColorMode::default(),
            extrapolation: CurveExtrapolation::default(),
            group: None,
            hide: false,
            lock: false,
            mute: false,
            select: false,
            keyframe_points: Vec::new(),
        }
    }

    pub fn data_path(&self) -> &str {
        &self.data_path
    }

    pub fn array_index(&self) -> i32 {
        self.array_index
    }

    pub fn set_array_index(&mut self, index: i32) {
        self.array_index = index;
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    pub fn extrapolation(&self) -> CurveExtrapolation {
        self.extrapolation
    }

    pub fn set_extrapolation(&mut self, extrapolation: CurveExtrapolation) {
        self.extrapolation = extrapolation;
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    pub fn hide(&self) -> bool {
        self.hide
    }

    pub fn set_hide(&mut self, hide: bool) {
        self.hide = hide;
    }

    pub fn lock(&self) -> bool {
        self.lock
    }

    pub fn set_lock(&mut self, lock: bool) {
        self.lock = lock;
    }

    pub fn mute(&self) -> bool {
        self.mute
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    pub fn select(&self) -> bool {
        self.select
    }

    pub fn set_select(&mut self, select: bool) {
        self.select = select;
    }

    /// True when the curve has no keyframes (host-derived).
    pub fn is_empty(&self) -> bool {
        self.keyframe_points.is_empty()
    }

    pub fn keyframe_points(&self) -> &[Keyframe] {
        &self.keyframe_points
    }

    pub fn clear_keyframes(&mut self) {
        self.keyframe_points.clear();
    }

    /// Insert a keyframe, keeping points sorted by frame.
    /// A key already sitting on `frame` gets its value replaced.
    pub fn insert_keyframe(&mut self, frame: f32, value: f32) -> &mut Keyframe {
        let idx = match self
            .keyframe_points
            .binary_search_by(|k| k.frame().total_cmp(&frame))
        {
            Ok(i) => {
                self.keyframe_points[i].co[1] = value;
                i
            }
            Err(i) => {
                self.keyframe_points.insert(i, Keyframe::new(frame, value));
                i
            }
        };
        &mut self.keyframe_points[idx]
    }
}
