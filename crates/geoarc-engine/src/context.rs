use chrono::{DateTime, Utc};
use geoarc_anim::OrbitCamera;
use geoarc_core::error::Result;
use geoarc_core::traits::Validate;
use geoarc_core::EventId;
use geoarc_geometry::ArcBuilder;
use geoarc_links::{Filter, LinkClock, LinkRegistry};
use geoarc_math::SolarPosition;
use tracing::{debug, info, trace};

use crate::config::GlobeConfig;
use crate::event::{EventHandle, EventQueue, EventRecord, NewEvent};
use crate::snapshot::{FrameSink, GroupView, MarkerView, SceneSnapshot, SunView};
use crate::sun::SunLight;

/// Owns every entity collection of one globe view and exposes the surface
/// used by the event source, the UI and the renderer.
///
/// All mutation happens through `&mut self`, one call at a time; the frame
/// loop calls [`tick`](Self::tick) and then reads a [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct GlobeContext {
    config: GlobeConfig,
    registry: LinkRegistry,
    clock: LinkClock,
    events: EventQueue,
    sun: SunLight,
}

impl GlobeContext {
    /// Build a context with the sun placed for the current time.
    pub fn new(config: GlobeConfig) -> Result<Self> {
        Self::with_date(config, Utc::now())
    }

    /// Build a context with the sun placed for `date`.
    pub fn with_date(config: GlobeConfig, date: DateTime<Utc>) -> Result<Self> {
        config.validate()?;
        let registry = LinkRegistry::new(
            ArcBuilder::new(config.arc),
            config.timing,
            config.match_tolerance,
        );
        let clock = LinkClock::new(OrbitCamera::new(config.camera));
        let solar = SolarPosition::compute(date);
        let sun = SunLight::new(solar, config.arc.radius, &config.sun);
        info!(
            max_events = config.max_events,
            declination_deg = solar.declination_degrees(),
            "globe context ready"
        );
        Ok(Self {
            events: EventQueue::new(config.max_events),
            config,
            registry,
            clock,
            sun,
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn registry(&self) -> &LinkRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &LinkClock {
        &self.clock
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn sun(&self) -> &SunLight {
        &self.sun
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.clock.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.clock.camera
    }

    // --- Events ---

    pub fn add_event(&mut self, event: NewEvent) -> EventHandle {
        self.add_event_at(event, Utc::now())
    }

    /// Place an event on the globe and record it at the head of the event
    /// list. When the list is over capacity the oldest event is evicted.
    pub fn add_event_at(&mut self, event: NewEvent, created_at: DateTime<Utc>) -> EventHandle {
        let color = event.resolved_color();
        let link = self.registry.add_link(
            &mut self.clock,
            event.kind,
            color,
            event.source,
            event.target,
        );
        let id = EventId::new();
        let record = EventRecord {
            id,
            kind: event.kind,
            color,
            message: event.message,
            source: event.source,
            target: event.target,
            created_at,
            link,
        };
        debug!(%id, kind = %record.kind, group = ?link.group, "event added");

        if let Some(oldest) = self.events.push_front(record) {
            debug!(id = %oldest.id, "event list full, evicting oldest");
            self.registry.evict(&mut self.clock, oldest.link.marker);
        }
        EventHandle { id, link }
    }

    /// Remove an event and fade out its marker (and its curve, if it was the
    /// last live marker on it). Returns `false` for unknown ids.
    pub fn evict(&mut self, id: EventId) -> bool {
        let Some(record) = self.events.remove(id) else {
            return false;
        };
        self.registry.evict(&mut self.clock, record.link.marker)
    }

    pub fn filter(&self) -> Filter {
        self.registry.filter()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.registry.set_filter(filter);
    }

    // --- Frame ---

    /// Advance the camera, every tween and the sun by `elapsed_ms`, then
    /// apply the resulting entity updates.
    pub fn tick(&mut self, elapsed_ms: f64) {
        let report = self.clock.tick(elapsed_ms);
        self.registry.apply(&mut self.clock, &report);
        self.sun.advance(elapsed_ms.max(0.0));
        trace!(
            updates = report.updates.len(),
            completed = report.completed.len(),
            groups = self.registry.group_count(),
            "frame"
        );
    }

    /// Tick, then hand the resulting frame to `sink`.
    pub fn render(&mut self, elapsed_ms: f64, sink: &mut dyn FrameSink) {
        self.tick(elapsed_ms);
        sink.present(&self.snapshot());
    }

    // --- Camera / UI ---

    pub fn set_camera_target(&mut self, x: f64, y: f64, zoom: f64) {
        self.clock.camera.set_location(x, y, zoom);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.clock.camera.zoom_by(delta);
    }

    pub fn fly_to(&mut self, x: f64, y: f64, zoom: f64) {
        self.clock.camera.fly_to(x, y, zoom);
    }

    pub fn toggle_sun(&mut self) {
        self.sun.toggle_sun();
    }

    pub fn toggle_sun_debug(&mut self) {
        self.sun.toggle_sun_debug();
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let groups = self
            .registry
            .groups()
            .map(|(id, group)| GroupView {
                id,
                color: group.curve.color,
                state: group.curve.state,
                opacity: group.curve.opacity,
                visible: group.curve.visible,
                curve: group.arc.revealed(group.curve.draw_progress),
                markers: group
                    .markers
                    .iter()
                    .filter_map(|&mid| {
                        self.registry.marker(mid).map(|m| MarkerView {
                            id: mid,
                            kind: m.kind,
                            color: m.color,
                            state: m.state,
                            position: m.position,
                            opacity: m.opacity,
                            visible: m.visible,
                        })
                    })
                    .collect(),
            })
            .collect();

        let debug_lines = self.sun.is_debug_visible();
        SceneSnapshot {
            elapsed_ms: self.clock.elapsed_ms(),
            camera: self.clock.camera.pose(),
            sun: SunView {
                position: self.sun.position(),
                enabled: self.sun.is_enabled(),
                ambient_color: self.sun.ambient_color(),
                debug_visible: debug_lines,
                sun_path: if debug_lines { self.sun.sun_path() } else { Vec::new() },
                equator_path: if debug_lines { self.sun.equator_path() } else { Vec::new() },
            },
            filter: self.registry.filter(),
            event_count: self.events.len(),
            groups,
        }
    }
}

impl Validate for GlobeContext {
    fn validate(&self) -> Result<()> {
        self.registry.validate()
    }
}
