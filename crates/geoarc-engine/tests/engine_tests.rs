use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use geoarc_anim::CameraLimits;
use geoarc_core::traits::Validate;
use geoarc_core::{EventId, GeoArcError};
use geoarc_engine::{
    EventKind, Filter, GeoPoint, GlobeConfig, GlobeContext, NewEvent, SceneSnapshot,
};
use geoarc_links::LifecycleState;

fn context() -> GlobeContext {
    let date = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
    GlobeContext::with_date(GlobeConfig::default(), date).unwrap()
}

fn run(ctx: &mut GlobeContext, total_ms: f64) {
    let mut t = 0.0;
    while t < total_ms {
        ctx.tick(50.0);
        ctx.validate().unwrap();
        t += 50.0;
    }
}

fn event(kind: EventKind, from: (f64, f64), to: (f64, f64)) -> NewEvent {
    NewEvent::new(kind, GeoPoint::from(from), GeoPoint::from(to))
}

#[test]
fn test_event_list_is_capped() {
    let mut ctx = context();
    let mut handles = Vec::new();
    for i in 0..=GlobeConfig::MAX_EVENTS {
        let lat = -60.0 + i as f64 * 4.0;
        handles.push(ctx.add_event(event(EventKind::Misc, (lat, 10.0), (lat, 80.0))));
    }
    assert_eq!(ctx.events().len(), GlobeConfig::MAX_EVENTS);

    let oldest = handles[0];
    assert!(ctx.events().get(oldest.id).is_none());
    assert_eq!(ctx.events().newest().unwrap().id, handles[GlobeConfig::MAX_EVENTS].id);
    let marker = ctx.registry().marker(oldest.link.marker).unwrap();
    assert_eq!(marker.state, LifecycleState::FadingOut);

    run(&mut ctx, 1500.0);
    assert_eq!(ctx.registry().group_count(), GlobeConfig::MAX_EVENTS);
    assert!(ctx.registry().group(oldest.link.group).is_none());
}

#[test]
fn test_reversed_events_share_an_arc() {
    let mut ctx = context();
    let a = ctx.add_event(event(EventKind::Misc, (40.0, -70.0), (51.0, 0.0)));
    let b = ctx.add_event(event(EventKind::Alert, (51.0, 0.0), (40.0, -70.0)));
    assert_eq!(a.link.group, b.link.group);
    assert_eq!(ctx.registry().child_count(a.link.group), Some(3));

    run(&mut ctx, 2500.0);
    let frame = ctx.snapshot();
    assert_eq!(frame.groups.len(), 1);
    assert_eq!(frame.marker_count(), 2);
    assert_eq!(frame.groups[0].curve.len(), 101);
}

#[test]
fn test_evict_by_id() {
    let mut ctx = context();
    let a = ctx.add_event(event(EventKind::File, (0.0, 0.0), (30.0, 30.0)));
    assert!(ctx.evict(a.id));
    assert!(!ctx.evict(a.id));
    assert!(!ctx.evict(EventId::new()));
    assert!(ctx.events().is_empty());

    run(&mut ctx, 1100.0);
    assert_eq!(ctx.registry().group_count(), 0);
    assert_eq!(ctx.registry().marker_count(), 0);
}

#[test]
fn test_camera_zoom_is_clamped() {
    let mut ctx = context();
    ctx.set_camera_target(0.0, 0.0, CameraLimits::DIST_MAX + 500.0);
    assert_eq!(ctx.camera().distance_target(), CameraLimits::DIST_MAX);

    ctx.zoom_by(10_000.0);
    assert_eq!(ctx.camera().distance_target(), CameraLimits::DIST_MIN);
}

#[test]
fn test_camera_eases_toward_target() {
    let mut ctx = context();
    ctx.set_camera_target(0.5, 0.2, 800.0);
    ctx.camera_mut().stop_rotation();
    run(&mut ctx, 10_000.0);
    let cam = ctx.camera();
    assert_relative_eq!(cam.distance(), 800.0, epsilon = 1e-3);
    assert_relative_eq!(cam.rotation().x, 0.5, epsilon = 1e-6);
}

#[test]
fn test_fly_to_arrives() {
    let mut ctx = context();
    ctx.fly_to(1.0, 0.3, 600.0);
    assert!(ctx.camera().is_flying());
    run(&mut ctx, 1100.0);
    assert!(!ctx.camera().is_flying());
    assert_relative_eq!(ctx.camera().distance_target(), 600.0, epsilon = 1e-9);
}

#[test]
fn test_filter_hides_unmatched_markers() {
    let mut ctx = context();
    ctx.add_event(event(EventKind::Misc, (10.0, 10.0), (20.0, 20.0)));
    ctx.add_event(event(EventKind::Alert, (-10.0, 10.0), (-20.0, 20.0)));
    run(&mut ctx, 2500.0);

    ctx.set_filter(Filter::Only(EventKind::Alert));
    let frame = ctx.snapshot();
    assert_eq!(frame.visible_groups().count(), 1);
    assert_eq!(ctx.events().visible(ctx.filter()).count(), 1);

    ctx.set_filter(Filter::All);
    assert_eq!(ctx.snapshot().visible_groups().count(), 2);
}

#[test]
fn test_curve_reveals_while_drawing() {
    let mut ctx = context();
    ctx.add_event(event(EventKind::Misc, (0.0, 0.0), (0.0, 90.0)));
    ctx.tick(100.0);
    let partial = ctx.snapshot().groups[0].curve.len();
    assert!(partial > 1 && partial < 101, "revealed {partial} points");
}

#[test]
fn test_sun_debug_lines_in_snapshot() {
    let mut ctx = context();
    assert!(ctx.snapshot().sun.sun_path.is_empty());
    ctx.toggle_sun_debug();
    let frame = ctx.snapshot();
    assert_eq!(frame.sun.sun_path.len(), 51);
    assert_eq!(frame.sun.equator_path.len(), 51);
    assert_relative_eq!(frame.sun.position.length(), 250.0, epsilon = 1e-9);
}

#[test]
fn test_render_presents_each_frame() {
    let mut ctx = context();
    ctx.add_event(event(EventKind::Approval, (5.0, 5.0), (45.0, 45.0)));
    let mut frames: Vec<SceneSnapshot> = Vec::new();
    for _ in 0..3 {
        ctx.render(16.0, &mut frames);
    }
    assert_eq!(frames.len(), 3);
    assert_relative_eq!(frames[2].elapsed_ms, 48.0);
}

#[test]
fn test_snapshot_serializes() {
    let mut ctx = context();
    ctx.add_event(event(EventKind::File, (35.0, 139.0), (-33.0, 151.0)).with_message("sync"));
    run(&mut ctx, 500.0);
    let json = serde_json::to_value(ctx.snapshot()).unwrap();
    assert_eq!(json["event_count"], 1);
    assert_eq!(json["filter"], "all");
    assert_eq!(json["groups"][0]["markers"][0]["kind"], "file");
    assert!(json["sun"].get("sun_path").is_none());
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("globe.json");
    std::fs::write(&path, r#"{ "max_events": 3, "match_tolerance": { "mode": "quantized", "step": 0.001 } }"#)
        .unwrap();

    let config = GlobeConfig::load(&path).unwrap();
    assert_eq!(config.max_events, 3);

    let mut ctx = GlobeContext::new(config).unwrap();
    for i in 0..5 {
        ctx.add_event(event(EventKind::Misc, (i as f64, 0.0), (i as f64, 40.0)));
    }
    assert_eq!(ctx.events().len(), 3);
}

#[test]
fn test_config_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GlobeConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, GeoArcError::Io(_)));
}

#[test]
fn test_invalid_config_rejected_by_context() {
    let mut config = GlobeConfig::default();
    config.arc.segments = 0;
    assert!(matches!(GlobeContext::new(config), Err(GeoArcError::Config(_))));
}
