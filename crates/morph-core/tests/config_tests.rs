// Host-side tests for session configuration.

use morph_core::*;

#[test]
fn defaults() {
    let cfg = MorphConfig::default();
    assert_eq!(cfg.particle_count, DEFAULT_PARTICLE_COUNT);
    assert_eq!(cfg.custom_name, DEFAULT_NAME);
    assert_eq!(cfg.reveal_text(), "Happy Birthday, Explorer");
    assert_eq!(cfg.seed, None);
}

#[test]
fn particle_count_is_bounded() {
    let cfg = MorphConfig::default().with_particle_count(500).unwrap();
    assert_eq!(cfg.particle_count, 500);
    assert!(MorphConfig::default().with_particle_count(0).is_ok());

    let err = MorphConfig::default()
        .with_particle_count(MAX_PARTICLE_COUNT + 1)
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::TooManyParticles {
            requested: MAX_PARTICLE_COUNT + 1,
            max: MAX_PARTICLE_COUNT
        }
    );
}

#[test]
fn blank_names_keep_default() {
    assert_eq!(MorphConfig::default().with_name(None).custom_name, DEFAULT_NAME);
    assert_eq!(MorphConfig::default().with_name(Some("   ")).custom_name, DEFAULT_NAME);
    let cfg = MorphConfig::default().with_name(Some("  Ada "));
    assert_eq!(cfg.custom_name, "Ada");
    assert_eq!(cfg.reveal_text(), "Happy Birthday, Ada");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_consistent() {
    assert!(DEFAULT_PARTICLE_COUNT <= MAX_PARTICLE_COUNT);
    assert!(GALAXY_JITTER_CORE > GALAXY_JITTER_FALLOFF);
    assert!(CAMERA_REVEAL_Z > CAMERA_START_Z);
    assert!(CAMERA_ZNEAR < CAMERA_START_Z && CAMERA_REVEAL_Z < CAMERA_ZFAR);
    assert!(DOLLY_DAMPING > 0.0 && DOLLY_DAMPING < 1.0);
    assert!(HELIX_RUNG_WIDTH < HELIX_RUNG_PERIOD);
    assert!(SNAPSHOT_THRESHOLD > 0.0 && SNAPSHOT_THRESHOLD < 1.0);
    assert_eq!(camera_eye(CAMERA_START_Z).z, CAMERA_START_Z);
}
