// Host-side tests for the scene sequencer timeline.

use morph_core::*;

fn config() -> MorphConfig {
    MorphConfig::default()
        .with_particle_count(2000)
        .unwrap()
        .with_name(Some("Ada"))
}

fn sequencer() -> SceneSequencer {
    SceneSequencer::with_default_scenes(&config()).unwrap()
}

fn morphs(events: &[SceneEvent]) -> Vec<(SceneId, f32)> {
    events
        .iter()
        .filter_map(|e| match e {
            SceneEvent::Morph { scene, mix_end, .. } => Some((*scene, *mix_end)),
            _ => None,
        })
        .collect()
}

#[test]
fn default_sequence_order() {
    let scenes = Scene::default_sequence(&config());
    let ids: Vec<_> = scenes.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        vec![
            SceneId::Idle,
            SceneId::Helix,
            SceneId::Network,
            SceneId::Galaxy,
            SceneId::NameReveal
        ]
    );
    assert_eq!(
        scenes[4].shape,
        SceneShape::NameGlyph {
            font_size: NAME_FONT_SIZE
        }
    );
    assert!(scenes.iter().filter(|s| s.pickable).all(|s| s.id == SceneId::Network));
    assert!(scenes.last().unwrap().hold_duration_sec.is_none());
}

#[test]
fn start_seeds_idle_without_morphing() {
    let mut seq = sequencer();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);

    assert_eq!(seq.current_id(), Some(SceneId::Idle));
    assert_eq!(morphs(&events), vec![(SceneId::Idle, 0.0)]);
    assert!(!events.iter().any(|e| matches!(e, SceneEvent::ShowText(_))));
    assert_eq!(seq.pending_timers(), 0);
}

#[test]
fn double_trigger_enters_helix_once() {
    let mut seq = sequencer();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);
    events.clear();

    assert!(seq.trigger(0.0, &mut events));
    assert!(!seq.trigger(0.0, &mut events));
    assert_eq!(events, vec![SceneEvent::FadeOutText]);
    assert!(seq.is_transitioning());

    // Nothing enters before the text has faded
    events.clear();
    seq.tick(0.5, &mut events);
    assert!(events.is_empty());

    seq.tick(TEXT_FADE_OUT_SEC, &mut events);
    assert_eq!(morphs(&events), vec![(SceneId::Helix, 1.0)]);
    assert_eq!(
        events.first(),
        Some(&SceneEvent::ShowText("Encoded with brilliance.".to_string()))
    );
    assert!(!seq.is_transitioning());
    assert_eq!(seq.cursor(), 1);

    // Trigger only works from the first scene
    events.clear();
    assert!(!seq.trigger(2.0, &mut events));
    assert!(events.is_empty());
}

#[test]
fn advance_is_ignored_mid_transition() {
    let mut seq = sequencer();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);
    assert!(seq.advance(0.0, &mut events));
    assert!(!seq.advance(0.1, &mut events));
    assert_eq!(seq.cursor(), 1);
}

#[test]
fn full_timeline_reaches_name_reveal() {
    let mut seq = sequencer();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);
    seq.trigger(0.0, &mut events);
    events.clear();

    // Helix: enter at 1, hold 7, fade 1
    seq.tick(1.0, &mut events);
    assert_eq!(seq.current_id(), Some(SceneId::Helix));
    seq.tick(7.9, &mut events);
    assert_eq!(seq.cursor(), 1);

    events.clear();
    seq.tick(8.0, &mut events);
    assert_eq!(events, vec![SceneEvent::FadeOutText]);
    assert_eq!(seq.current_id(), Some(SceneId::Network));

    events.clear();
    seq.tick(9.0, &mut events);
    assert_eq!(morphs(&events), vec![(SceneId::Network, 1.0)]);
    assert!(events.contains(&SceneEvent::Picking(true)));
    assert!(events.iter().any(|e| matches!(
        e,
        SceneEvent::Morph { particle_size, duration_sec, .. }
            if *particle_size == 2.0 && *duration_sec == 2.5
    )));

    events.clear();
    seq.tick(15.0, &mut events);
    assert_eq!(
        events,
        vec![SceneEvent::Picking(false), SceneEvent::FadeOutText]
    );

    events.clear();
    seq.tick(16.0, &mut events);
    assert_eq!(morphs(&events), vec![(SceneId::Galaxy, 1.0)]);
    assert!(events.contains(&SceneEvent::ShowText("Built to explore.".to_string())));

    events.clear();
    seq.tick(23.0, &mut events);
    seq.tick(24.0, &mut events);
    assert_eq!(seq.current_id(), Some(SceneId::NameReveal));
    assert!(seq.is_terminal());
    assert!(events.contains(&SceneEvent::ShowText("Happy Birthday, Ada".to_string())));
    assert!(events.contains(&SceneEvent::Dolly {
        from: CAMERA_START_Z,
        to: CAMERA_REVEAL_Z
    }));
    let glyph = events.iter().find_map(|e| match e {
        SceneEvent::Morph { shape, .. } => Some(shape.clone()),
        _ => None,
    });
    match glyph {
        Some(ShapeSpec::Glyph { points, .. }) => {
            assert!(!points.is_empty());
            assert!(points.len() <= 2000);
        }
        other => panic!("expected glyph morph, got {:?}", other),
    }

    // Terminal scene holds forever
    assert_eq!(seq.pending_timers(), 0);
    events.clear();
    assert!(!seq.advance(30.0, &mut events));
    seq.tick(1000.0, &mut events);
    assert!(events.is_empty());
}

#[test]
fn late_tick_schedules_hold_from_entry_time() {
    let mut seq = sequencer();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);
    seq.trigger(0.0, &mut events);
    events.clear();

    // A very late frame enters the scene; its hold counts from that frame
    seq.tick(100.0, &mut events);
    assert_eq!(seq.current_id(), Some(SceneId::Helix));
    assert!(!seq.is_transitioning());
    assert_eq!(seq.pending_timers(), 1);

    seq.tick(106.9, &mut events);
    assert_eq!(seq.cursor(), 1);
    seq.tick(107.0, &mut events);
    assert_eq!(seq.cursor(), 2);
}

#[test]
fn cancel_all_stops_the_story() {
    let mut seq = sequencer();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);
    seq.trigger(0.0, &mut events);
    seq.cancel_all();
    assert!(!seq.is_transitioning());
    assert_eq!(seq.pending_timers(), 0);

    events.clear();
    seq.tick(50.0, &mut events);
    assert!(events.is_empty());
}

#[test]
fn invalid_scene_shape_is_rejected() {
    let mut scenes = Scene::default_sequence(&config());
    scenes[1].shape = SceneShape::Spec(ShapeSpec::Helix {
        length: 60.0,
        radius: -1.0,
        turns: 10.0,
    });
    assert!(matches!(
        SceneSequencer::new(scenes, &config()),
        Err(ShapeError::NonPositive { name: "radius", .. })
    ));
}

#[test]
fn name_glyph_samples_configured_name_on_entry() {
    let cfg = config();
    let all = Scene::default_sequence(&cfg);
    let scenes = vec![all[0].clone(), all[4].clone()];
    let mut seq = SceneSequencer::new(scenes, &cfg).unwrap();
    let mut events = Vec::new();
    seq.start(0.0, &mut events);
    seq.trigger(0.0, &mut events);
    events.clear();
    seq.tick(TEXT_FADE_OUT_SEC, &mut events);

    let expected = GlyphSampler::default().sample("Ada", cfg.particle_count, NAME_FONT_SIZE);
    assert!(!expected.is_empty());
    let shape = events.iter().find_map(|e| match e {
        SceneEvent::Morph { shape, .. } => Some(shape.clone()),
        _ => None,
    });
    assert_eq!(shape, Some(ShapeSpec::text(expected)));
}
