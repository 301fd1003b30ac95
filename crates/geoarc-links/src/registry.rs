use std::collections::HashMap;

use geoarc_anim::{AnimationClock, TickReport, Tween};
use geoarc_core::MatchTolerance;
use geoarc_geometry::ArcBuilder;
use geoarc_math::{project, GeoPoint};
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::key::EndpointKey;
use crate::types::*;

pub type LinkClock = AnimationClock<Channel>;

/// Owns every link group and marker, plus the endpoint index used to merge
/// events that share an arc.
#[derive(Debug, Clone)]
pub struct LinkRegistry {
    builder: ArcBuilder,
    timing: LinkTiming,
    tolerance: MatchTolerance,
    filter: Filter,
    pub(crate) groups: SlotMap<GroupId, LinkGroup>,
    pub(crate) markers: SlotMap<MarkerId, Marker>,
    /// Groups that new events may still merge into.
    pub(crate) index: HashMap<EndpointKey, GroupId>,
}

impl LinkRegistry {
    pub fn new(builder: ArcBuilder, timing: LinkTiming, tolerance: MatchTolerance) -> Self {
        Self {
            builder,
            timing,
            tolerance,
            filter: Filter::All,
            groups: SlotMap::with_key(),
            markers: SlotMap::with_key(),
            index: HashMap::new(),
        }
    }

    // --- Queries ---

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn timing(&self) -> &LinkTiming {
        &self.timing
    }

    pub fn group(&self, id: GroupId) -> Option<&LinkGroup> {
        self.groups.get(id)
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &LinkGroup)> {
        self.groups.iter()
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
        self.markers.iter()
    }

    pub fn group_of(&self, marker: MarkerId) -> Option<GroupId> {
        self.markers.get(marker).map(|m| m.group)
    }

    /// Curve plus attached markers, or `None` once the group is released.
    pub fn child_count(&self, group: GroupId) -> Option<usize> {
        self.groups.get(group).map(LinkGroup::child_count)
    }

    /// All groups still holding resources, fading ones included.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups that new events can merge into.
    pub fn active_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.index.values().copied()
    }

    pub fn active_group_count(&self) -> usize {
        self.index.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// The mergeable group for an endpoint pair, in either order.
    pub fn find_group(&self, from: GeoPoint, to: GeoPoint) -> Option<GroupId> {
        let r = self.builder.params.radius;
        let key = EndpointKey::new(
            project(from, r).position,
            project(to, r).position,
            self.tolerance,
        );
        self.index.get(&key).copied()
    }

    // --- Insertion ---

    /// Add one event's marker, merging into an existing group when the
    /// projected endpoints match an active group in either direction.
    pub fn add_link(
        &mut self,
        clock: &mut LinkClock,
        kind: EventKind,
        color: u32,
        from: GeoPoint,
        to: GeoPoint,
    ) -> LinkHandle {
        let r = self.builder.params.radius;
        let from = project(from, r);
        let to = project(to, r);
        let key = EndpointKey::new(from.position, to.position, self.tolerance);
        let shown = self.filter.matches(kind);

        if let Some(&group_id) = self.index.get(&key) {
            let marker = self.attach_traveling_marker(clock, group_id, kind, color, shown);
            if shown {
                self.groups[group_id].curve.visible = true;
            }
            debug!(
                ?group_id,
                ?marker,
                %kind,
                children = self.groups[group_id].child_count(),
                "merged event into existing link group"
            );
            return LinkHandle {
                group: group_id,
                marker,
            };
        }

        let arc = self.builder.build(from, to);
        let chord = arc.chord_distance();
        let group_id = self.groups.insert(LinkGroup {
            key,
            arc,
            curve: CurveEntity {
                state: LifecycleState::Idle,
                color: self.timing.line_color,
                opacity: 1.0,
                visible: shown,
                draw_progress: 1.0,
                draw_tween: None,
                fade_tween: None,
            },
            markers: Vec::new(),
            fading: false,
        });
        self.index.insert(key, group_id);

        let marker = if shown {
            let marker = self.insert_marker(group_id, kind, color, LifecycleState::Idle, false);

            let curve = &mut self.groups[group_id].curve;
            curve.state = LifecycleState::DrawingIn;
            curve.draw_progress = 0.0;
            curve.opacity = 0.0;
            curve.draw_tween = Some(clock.start(
                Channel::CurveDraw(group_id),
                Tween::once(0.0, 1.0, self.timing.draw_in.apply(chord)),
            ));
            curve.fade_tween = Some(clock.start(
                Channel::CurveOpacity(group_id),
                Tween::once(0.0, 1.0, self.timing.fade_in_ms),
            ));

            let m = &mut self.markers[marker];
            m.opacity = 0.0;
            m.fade_tween = Some(clock.start(
                Channel::MarkerOpacity(marker),
                Tween::once(0.0, 1.0, self.timing.fade_in_ms),
            ));
            marker
        } else {
            self.attach_traveling_marker(clock, group_id, kind, color, false)
        };

        debug!(?group_id, ?marker, %kind, chord, shown, "created link group");
        LinkHandle {
            group: group_id,
            marker,
        }
    }

    fn insert_marker(
        &mut self,
        group_id: GroupId,
        kind: EventKind,
        color: u32,
        state: LifecycleState,
        visible: bool,
    ) -> MarkerId {
        let group = &self.groups[group_id];
        let marker = self.markers.insert(Marker {
            group: group_id,
            kind,
            color,
            state,
            progress: 0.0,
            position: group.arc.from().position,
            opacity: 1.0,
            visible,
            period_ms: self.timing.marker_period.apply(group.arc.chord_distance()),
            progress_tween: None,
            fade_tween: None,
        });
        self.groups[group_id].markers.push(marker);
        marker
    }

    fn attach_traveling_marker(
        &mut self,
        clock: &mut LinkClock,
        group_id: GroupId,
        kind: EventKind,
        color: u32,
        visible: bool,
    ) -> MarkerId {
        let marker = self.insert_marker(group_id, kind, color, LifecycleState::Traveling, visible);
        self.start_travel(clock, marker);
        marker
    }

    fn start_travel(&mut self, clock: &mut LinkClock, marker: MarkerId) {
        let m = &mut self.markers[marker];
        m.state = LifecycleState::Traveling;
        if m.progress_tween.is_none() {
            m.progress_tween = Some(clock.start(
                Channel::MarkerProgress(marker),
                Tween::looping(0.0, 1.0, m.period_ms),
            ));
        }
    }

    // --- Eviction ---

    /// Start fading out one event's marker.
    ///
    /// While the group has other live markers only this marker fades and is
    /// released. When it is the last live marker the whole group fades and is
    /// released once every child reaches zero opacity. Returns `false` for
    /// markers that are unknown or already fading.
    pub fn evict(&mut self, clock: &mut LinkClock, marker: MarkerId) -> bool {
        let Some(m) = self.markers.get(marker) else {
            return false;
        };
        if !m.state.is_live() {
            return false;
        }
        let group_id = m.group;
        let Some(group) = self.groups.get(group_id) else {
            return false;
        };

        let others_live = group
            .markers
            .iter()
            .filter(|&&id| id != marker)
            .any(|&id| self.markers.get(id).is_some_and(|o| o.state.is_live()));

        if others_live {
            let duration = self.timing.marker_fade_out_ms;
            self.fade_marker(clock, marker, duration);
            debug!(?group_id, ?marker, "fading single marker out of shared group");
        } else {
            self.fade_group(clock, group_id);
            debug!(?group_id, ?marker, "fading whole link group");
        }
        true
    }

    fn fade_marker(&mut self, clock: &mut LinkClock, marker: MarkerId, duration_ms: f64) {
        let m = &mut self.markers[marker];
        if let Some(id) = m.fade_tween.take() {
            clock.cancel(id);
        }
        m.state = LifecycleState::FadingOut;
        m.fade_tween = Some(clock.start(
            Channel::MarkerOpacity(marker),
            Tween::once(m.opacity, 0.0, duration_ms),
        ));
    }

    fn fade_group(&mut self, clock: &mut LinkClock, group_id: GroupId) {
        let duration = self.timing.group_fade_out_ms;
        let group = &mut self.groups[group_id];
        group.fading = true;
        if self.index.get(&group.key) == Some(&group_id) {
            self.index.remove(&group.key);
        }

        let curve = &mut group.curve;
        for id in [curve.draw_tween.take(), curve.fade_tween.take()].into_iter().flatten() {
            clock.cancel(id);
        }
        curve.state = LifecycleState::FadingOut;
        curve.fade_tween = Some(clock.start(
            Channel::CurveOpacity(group_id),
            Tween::once(curve.opacity, 0.0, duration),
        ));

        let live: Vec<MarkerId> = group
            .markers
            .iter()
            .copied()
            .filter(|&id| self.markers.get(id).is_some_and(|m| m.state.is_live()))
            .collect();
        for marker in live {
            self.fade_marker(clock, marker, duration);
        }
    }

    // --- Tick application ---

    /// Apply a clock report: copy tween values onto entities, then run the
    /// state transitions for completed tweens.
    pub fn apply(&mut self, clock: &mut LinkClock, report: &TickReport<Channel>) {
        for update in &report.updates {
            match update.target {
                Channel::MarkerProgress(id) => {
                    let Some(m) = self.markers.get_mut(id) else { continue };
                    if let Some(group) = self.groups.get(m.group) {
                        m.progress = update.value;
                        m.position = group.arc.point_at(update.value);
                    }
                }
                Channel::MarkerOpacity(id) => {
                    if let Some(m) = self.markers.get_mut(id) {
                        m.opacity = update.value;
                    }
                }
                Channel::CurveDraw(id) => {
                    if let Some(g) = self.groups.get_mut(id) {
                        g.curve.draw_progress = update.value;
                    }
                }
                Channel::CurveOpacity(id) => {
                    if let Some(g) = self.groups.get_mut(id) {
                        g.curve.opacity = update.value;
                    }
                }
            }
        }

        for done in &report.completed {
            match done.target {
                Channel::CurveDraw(id) => self.finish_draw_in(clock, id),
                Channel::CurveOpacity(id) => self.finish_curve_fade(clock, id),
                Channel::MarkerOpacity(id) => self.finish_marker_fade(clock, id),
                Channel::MarkerProgress(_) => {}
            }
        }
    }

    fn finish_draw_in(&mut self, clock: &mut LinkClock, group_id: GroupId) {
        let Some(group) = self.groups.get_mut(group_id) else {
            return;
        };
        group.curve.draw_tween = None;
        if group.curve.state != LifecycleState::DrawingIn {
            return;
        }
        group.curve.state = LifecycleState::Idle;
        group.curve.draw_progress = 1.0;

        let waiting: Vec<MarkerId> = group
            .markers
            .iter()
            .copied()
            .filter(|&id| self.markers.get(id).is_some_and(|m| m.state == LifecycleState::Idle))
            .collect();
        for marker in waiting {
            let m = &mut self.markers[marker];
            m.visible = self.filter.matches(m.kind);
            self.start_travel(clock, marker);
        }
        trace!(?group_id, "draw-in complete");
    }

    fn finish_curve_fade(&mut self, clock: &mut LinkClock, group_id: GroupId) {
        let Some(group) = self.groups.get_mut(group_id) else {
            return;
        };
        group.curve.fade_tween = None;
        if group.curve.state == LifecycleState::FadingOut {
            group.curve.state = LifecycleState::Removed;
            group.curve.visible = false;
            self.try_release(clock, group_id);
        }
    }

    fn finish_marker_fade(&mut self, clock: &mut LinkClock, marker: MarkerId) {
        let Some(m) = self.markers.get_mut(marker) else {
            return;
        };
        m.fade_tween = None;
        if m.state != LifecycleState::FadingOut {
            return;
        }

        let group_id = m.group;
        self.release_marker(clock, marker);
        if self.groups.get(group_id).is_some_and(|g| g.fading) {
            self.try_release(clock, group_id);
        }
    }

    // --- Release ---

    /// Drop a marker and cancel its tweens. Safe to call more than once.
    fn release_marker(&mut self, clock: &mut LinkClock, marker: MarkerId) -> bool {
        let Some(m) = self.markers.remove(marker) else {
            return false;
        };
        for id in [m.progress_tween, m.fade_tween].into_iter().flatten() {
            clock.cancel(id);
        }
        if let Some(group) = self.groups.get_mut(m.group) {
            group.markers.retain(|&id| id != marker);
        }
        trace!(?marker, group = ?m.group, "marker released");
        true
    }

    fn try_release(&mut self, clock: &mut LinkClock, group_id: GroupId) {
        let ready = self.groups.get(group_id).is_some_and(|g| {
            g.fading && g.curve.state == LifecycleState::Removed && g.markers.is_empty()
        });
        if ready {
            self.release_group(clock, group_id);
        }
    }

    /// Drop a group, its remaining markers, and every tween pointing at them.
    /// Safe to call more than once.
    fn release_group(&mut self, clock: &mut LinkClock, group_id: GroupId) -> bool {
        let Some(group) = self.groups.remove(group_id) else {
            return false;
        };
        for marker in &group.markers {
            self.release_marker(clock, *marker);
        }
        clock.cancel_where(|c| matches!(c, Channel::CurveDraw(g) | Channel::CurveOpacity(g) if *g == group_id));
        if self.index.get(&group.key) == Some(&group_id) {
            self.index.remove(&group.key);
        }
        debug!(?group_id, "link group released");
        true
    }

    // --- Filtering ---

    /// Show markers whose kind matches `filter` and hide the rest; a curve is
    /// shown while any of its live markers is. Nothing is destroyed, and
    /// entities already fading out are left alone.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        for (_, group) in self.groups.iter_mut() {
            if group.fading {
                continue;
            }
            let mut any_shown = false;
            for &id in &group.markers {
                let Some(m) = self.markers.get_mut(id) else { continue };
                if !m.state.is_live() {
                    continue;
                }
                let shown = filter.matches(m.kind);
                any_shown |= shown;
                if m.state == LifecycleState::Traveling {
                    m.visible = shown;
                }
            }
            group.curve.visible = any_shown;
        }
        debug!(?filter, "filter changed");
    }
}

impl Default for LinkRegistry {
    fn default() -> Self {
        Self::new(ArcBuilder::default(), LinkTiming::default(), MatchTolerance::Exact)
    }
}
