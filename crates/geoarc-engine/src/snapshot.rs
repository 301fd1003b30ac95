//! Read-only view of the scene handed to renderers once per frame.

use geoarc_anim::CameraPose;
use geoarc_links::{EventKind, Filter, GroupId, LifecycleState, MarkerId};
use geoarc_math::Point3;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SunView {
    pub position: Point3,
    pub enabled: bool,
    pub ambient_color: u32,
    pub debug_visible: bool,
    /// Orbit and equator polylines, only filled in while debug lines are shown.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sun_path: Vec<Point3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equator_path: Vec<Point3>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    pub id: MarkerId,
    pub kind: EventKind,
    pub color: u32,
    pub state: LifecycleState,
    pub position: Point3,
    pub opacity: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub id: GroupId,
    pub color: u32,
    pub state: LifecycleState,
    pub opacity: f64,
    pub visible: bool,
    /// Drawn prefix of the arc polyline.
    pub curve: Vec<Point3>,
    pub markers: Vec<MarkerView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub elapsed_ms: f64,
    pub camera: CameraPose,
    pub sun: SunView,
    pub filter: Filter,
    pub event_count: usize,
    pub groups: Vec<GroupView>,
}

impl SceneSnapshot {
    pub fn marker_count(&self) -> usize {
        self.groups.iter().map(|g| g.markers.len()).sum()
    }

    pub fn visible_groups(&self) -> impl Iterator<Item = &GroupView> {
        self.groups.iter().filter(|g| g.visible)
    }
}

/// Something that consumes one snapshot per frame: a renderer, a recorder,
/// a test probe.
pub trait FrameSink {
    fn present(&mut self, frame: &SceneSnapshot);
}

impl FrameSink for Vec<SceneSnapshot> {
    fn present(&mut self, frame: &SceneSnapshot) {
        self.push(frame.clone());
    }
}
