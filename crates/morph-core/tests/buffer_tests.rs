// Host-side tests for the particle buffer and retargeting.

use glam::Vec3;
use morph_core::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn new_buffer_is_a_dispersed_cloud() {
    let buf = ParticleBuffer::new(256, Some(1));
    assert_eq!(buf.len(), 256);
    assert_eq!(buf.targets().len(), 256);
    assert_eq!(buf.sizes().len(), 256);
    assert_eq!(buf.colors().len(), 256);
    assert_eq!(buf.positions(), buf.targets());

    for p in buf.positions() {
        assert!(p.abs().max_element() <= DISPERSION_HALF_EXTENT);
    }
    for s in buf.sizes() {
        assert!((0.0..1.0).contains(s));
    }
    for c in buf.colors() {
        assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        // Blue-to-purple palette
        assert!(c.z >= c.x && c.z >= c.y, "{:?}", c);
    }
}

#[test]
fn seeded_buffers_are_identical() {
    let a = ParticleBuffer::new(64, Some(42));
    let b = ParticleBuffer::new(64, Some(42));
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.sizes(), b.sizes());
}

#[test]
fn dirty_flags_are_taken_once() {
    let mut buf = ParticleBuffer::new(8, Some(1));
    let first = buf.take_dirty();
    assert!(first.positions && first.targets && first.attributes);
    assert!(!buf.dirty().any());

    let mut anim = MorphAnimator::new();
    buf.retarget(&ShapeSpec::cell(), &mut anim);
    let after = buf.take_dirty();
    assert!(after.targets);
    assert!(!after.positions);
    assert!(!after.attributes);
}

#[test]
fn retarget_below_threshold_keeps_sources() {
    let mut buf = ParticleBuffer::new(100, Some(3));
    let mut anim = MorphAnimator::new();
    anim.set_mix(0.3);
    let before = buf.positions().to_vec();

    buf.retarget(&ShapeSpec::dna(), &mut anim);
    assert_eq!(buf.positions(), &before[..]);
    assert_eq!(anim.mix(), 0.3);
    assert!(approx(buf.targets()[0], helix_point(0, 100, HELIX_LENGTH, HELIX_RADIUS, HELIX_TURNS)));
}

#[test]
fn retarget_at_threshold_does_not_snapshot() {
    let mut buf = ParticleBuffer::new(10, Some(3));
    let mut anim = MorphAnimator::new();
    anim.set_mix(SNAPSHOT_THRESHOLD);
    let before = buf.positions().to_vec();
    buf.retarget(&ShapeSpec::galaxy(), &mut anim);
    assert_eq!(buf.positions(), &before[..]);
    assert_eq!(anim.mix(), SNAPSHOT_THRESHOLD);
}

#[test]
fn retarget_past_threshold_snapshots_targets() {
    let mut buf = ParticleBuffer::new(100, Some(5));
    let mut anim = MorphAnimator::new();
    buf.retarget(&ShapeSpec::cell(), &mut anim);
    let cell_targets = buf.targets().to_vec();

    anim.set_mix(0.8);
    buf.retarget(&ShapeSpec::dna(), &mut anim);
    assert_eq!(buf.positions(), &cell_targets[..]);
    assert_eq!(anim.mix(), 0.0);
    assert!(!anim.is_morphing());
    assert!(buf.dirty().positions);
}

#[test]
fn empty_buffer_ignores_retarget() {
    let mut buf = ParticleBuffer::new(0, Some(1));
    let mut anim = MorphAnimator::new();
    anim.set_mix(0.9);
    buf.retarget(&ShapeSpec::galaxy(), &mut anim);
    assert!(buf.is_empty());
    assert_eq!(anim.mix(), 0.9);
    assert_eq!(buf.interpolated(0, 1.0), None);
}

#[test]
fn completed_helix_morph_lands_on_helix() {
    let mut buf = ParticleBuffer::new(100, Some(9));
    let mut anim = MorphAnimator::new();
    buf.retarget(&ShapeSpec::dna(), &mut anim);
    anim.animate_mix_to(1.0, 3.0, 0.0);
    anim.advance(3.0);
    assert_eq!(anim.mix(), 1.0);

    let p = buf.interpolated(0, anim.mix()).unwrap();
    assert!(approx(p, Vec3::new(0.0, -HELIX_LENGTH / 2.0, 0.0)), "{:?}", p);
}

#[test]
fn interpolation_blends_endpoints() {
    let mut buf = ParticleBuffer::new(20, Some(11));
    let mut anim = MorphAnimator::new();
    buf.retarget(&ShapeSpec::galaxy(), &mut anim);

    let mut out = Vec::new();
    buf.interpolate_into(0.25, &mut out);
    assert_eq!(out.len(), 20);
    for (i, p) in out.iter().enumerate() {
        let expected = buf.positions()[i].lerp(buf.targets()[i], 0.25);
        assert!(approx(*p, expected));
        assert_eq!(buf.interpolated(i, 0.25), Some(*p));
    }
    assert_eq!(buf.interpolated(0, 0.0), Some(buf.positions()[0]));
}

#[test]
fn point_size_is_never_negative() {
    let mut buf = ParticleBuffer::new(1, Some(1));
    buf.set_point_size(2.0);
    assert_eq!(buf.point_size(), 2.0);
    buf.set_point_size(-1.0);
    assert_eq!(buf.point_size(), 0.0);
}

#[test]
fn hsl_primaries() {
    assert!(approx(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
    assert!(approx(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
    assert!(approx(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
    assert_eq!(hsl_to_rgb(0.3, 0.0, 0.25), Vec3::splat(0.25));
}

#[test]
fn instance_layout_is_48_bytes() {
    assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);
}
