use geoarc_anim::TweenId;
use geoarc_geometry::Arc;
use geoarc_math::{LinearMap, Point3};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::key::EndpointKey;

// --- SlotMap key types ---

new_key_type! {
    pub struct GroupId;
    pub struct MarkerId;
}

/// Where a new event's marker and group ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkHandle {
    pub group: GroupId,
    pub marker: MarkerId,
}

// --- Categories ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Misc,
    File,
    Approval,
    Alert,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Misc,
        EventKind::File,
        EventKind::Approval,
        EventKind::Alert,
    ];

    /// Marker colour used when the event does not carry one.
    pub fn default_color(self) -> u32 {
        match self {
            EventKind::Misc => 0x3498db,
            EventKind::File => 0xf1c40f,
            EventKind::Approval => 0x2ecc71,
            EventKind::Alert => 0xe74c3c,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Misc => "misc",
            EventKind::File => "file",
            EventKind::Approval => "approval",
            EventKind::Alert => "alert",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category filter selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Only(EventKind),
}

impl Filter {
    pub fn matches(self, kind: EventKind) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(k) => k == kind,
        }
    }
}

// --- Lifecycle ---

/// Lifecycle of a curve or marker entity.
///
/// Curves go `DrawingIn -> Idle -> FadingOut -> Removed` (or start in `Idle`
/// when created hidden). Markers go `Idle -> Traveling -> FadingOut ->
/// Removed`, where `Idle` means waiting for the curve to finish drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Idle,
    DrawingIn,
    Traveling,
    FadingOut,
    Removed,
}

impl LifecycleState {
    /// Still counts as a live child of its group.
    pub fn is_live(self) -> bool {
        !matches!(self, LifecycleState::FadingOut | LifecycleState::Removed)
    }
}

/// What a registry tween animates. Carried through the clock and handed back
/// on every update and completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    MarkerProgress(MarkerId),
    MarkerOpacity(MarkerId),
    CurveDraw(GroupId),
    CurveOpacity(GroupId),
}

// --- Timing ---

/// Durations for the link lifecycle, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkTiming {
    /// Chord distance to one marker loop. Not clamped.
    pub marker_period: LinearMap,
    /// Chord distance to curve draw-in time. Not clamped.
    pub draw_in: LinearMap,
    pub fade_in_ms: f64,
    pub group_fade_out_ms: f64,
    pub marker_fade_out_ms: f64,
    pub line_color: u32,
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self {
            marker_period: LinearMap::new((0.0, 400.0), (1000.0, 5000.0)),
            draw_in: LinearMap::new((0.0, 400.0), (1000.0, 2000.0)),
            fade_in_ms: 1000.0,
            group_fade_out_ms: 1000.0,
            marker_fade_out_ms: 500.0,
            line_color: 0x3498db,
        }
    }
}

// --- Entity structs ---

/// The drawn line of a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveEntity {
    pub state: LifecycleState,
    pub color: u32,
    pub opacity: f64,
    pub visible: bool,
    /// Fraction of the arc length revealed so far.
    pub draw_progress: f64,
    #[serde(skip)]
    pub(crate) draw_tween: Option<TweenId>,
    #[serde(skip)]
    pub(crate) fade_tween: Option<TweenId>,
}

/// A point travelling along a group's arc on behalf of one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub group: GroupId,
    pub kind: EventKind,
    pub color: u32,
    pub state: LifecycleState,
    /// Bezier parameter of the current position, looping over `[0, 1]`.
    pub progress: f64,
    pub position: Point3,
    pub opacity: f64,
    pub visible: bool,
    pub period_ms: f64,
    #[serde(skip)]
    pub(crate) progress_tween: Option<TweenId>,
    #[serde(skip)]
    pub(crate) fade_tween: Option<TweenId>,
}

#[derive(Debug, Clone)]
pub struct LinkGroup {
    pub(crate) key: EndpointKey,
    pub arc: Arc,
    pub curve: CurveEntity,
    pub markers: Vec<MarkerId>,
    /// The whole group is fading out and will be released.
    pub fading: bool,
}

impl LinkGroup {
    /// Curve plus attached markers, including ones still fading.
    pub fn child_count(&self) -> usize {
        1 + self.markers.len()
    }

    pub fn key(&self) -> EndpointKey {
        self.key
    }
}
