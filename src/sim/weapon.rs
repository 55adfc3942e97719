//! Weapons and fire-rate pacing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Hazard, Projectile, WeaponKind};
use crate::consts::SPRAY_FAN_DEGREES;
use crate::rotate_degrees;

/// Build the projectiles for one trigger pull.
///
/// Slipper and ball fire straight up. Spray aims at the nearest hazard and
/// fans out five shots; with nothing to aim at it fires a single shot up.
pub fn fire(weapon: WeaponKind, origin: Vec2, speed: f32, hazards: &[Hazard]) -> Vec<Projectile> {
    let straight_up = Vec2::new(0.0, -speed);
    let damage = weapon.damage();

    match weapon {
        WeaponKind::Slipper | WeaponKind::Ball => {
            vec![Projectile::new(weapon, origin, straight_up, damage)]
        }
        WeaponKind::Spray => match nearest_hazard(origin, hazards) {
            None => vec![Projectile::new(weapon, origin, straight_up, damage)],
            Some(target) => {
                let base = (target.pos() - origin).normalize_or_zero() * speed;
                let mut shots = Vec::with_capacity(1 + SPRAY_FAN_DEGREES.len());
                shots.push(Projectile::new(weapon, origin, base, damage));
                shots.extend(
                    SPRAY_FAN_DEGREES
                        .iter()
                        .map(|&deg| Projectile::new(weapon, origin, rotate_degrees(base, deg), damage)),
                );
                shots
            }
        },
    }
}

/// Closest hazard to `point`; the first one seen wins ties
pub fn nearest_hazard(point: Vec2, hazards: &[Hazard]) -> Option<&Hazard> {
    let mut best: Option<(&Hazard, f32)> = None;
    for hazard in hazards {
        let dist = point.distance(hazard.pos());
        if best.is_none_or(|(_, min)| dist < min) {
            best = Some((hazard, dist));
        }
    }
    best.map(|(hazard, _)| hazard)
}

/// Shot timer that turns elapsed trigger time into a whole number of volleys.
///
/// The caller guarantees `fire_rate > 0` (validated with the tuning).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    /// Banked trigger time (seconds)
    pub timer: f32,
}

impl FireControl {
    /// Advance by `dt` and return how many volleys are due this frame.
    ///
    /// While not firing the bank is wrapped into `[0, interval)` of the
    /// current weapon so released time cannot pile up into a burst.
    pub fn advance(&mut self, firing: bool, dt: f32, fire_rate: f32) -> u32 {
        let interval = 1.0 / fire_rate;
        if !firing {
            if self.timer >= interval {
                self.timer %= interval;
            }
            return 0;
        }

        self.timer += dt;
        let mut shots = 0;
        while self.timer >= interval {
            self.timer -= interval;
            shots += 1;
        }
        shots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{HazardKind, SizeClass};
    use proptest::prelude::*;

    fn hazard_at(x: f32, y: f32) -> Hazard {
        Hazard::new(HazardKind::Square, SizeClass::Small, Vec2::new(x, y), Vec2::ZERO)
    }

    fn angle_deg(v: Vec2) -> f32 {
        v.y.atan2(v.x).to_degrees()
    }

    #[test]
    fn test_slipper_and_ball_fire_straight_up() {
        let origin = Vec2::new(400.0, 380.0);
        let hazards = [hazard_at(0.0, 0.0)];

        let slipper = fire(WeaponKind::Slipper, origin, 300.0, &hazards);
        assert_eq!(slipper.len(), 1);
        assert_eq!(slipper[0].motion.vel, Vec2::new(0.0, -300.0));
        assert_eq!(slipper[0].damage, 20);

        let ball = fire(WeaponKind::Ball, origin, 440.0, &[]);
        assert_eq!(ball.len(), 1);
        assert_eq!(ball[0].motion.vel, Vec2::new(0.0, -440.0));
        assert_eq!(ball[0].damage, 10);
        assert_eq!(ball[0].radius(), 5.0);
    }

    #[test]
    fn test_spray_fallback_without_targets() {
        let shots = fire(WeaponKind::Spray, Vec2::new(100.0, 100.0), 440.0, &[]);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].motion.vel, Vec2::new(0.0, -440.0));
        assert_eq!(shots[0].damage, 8);
    }

    #[test]
    fn test_spray_fan_directions() {
        let origin = Vec2::new(400.0, 400.0);
        // Nearest is due right of the origin
        let hazards = [hazard_at(400.0, 100.0), hazard_at(500.0, 400.0)];
        let shots = fire(WeaponKind::Spray, origin, 440.0, &hazards);
        assert_eq!(shots.len(), 5);

        let base = angle_deg(shots[0].motion.vel);
        assert!(base.abs() < 1e-3);
        for (shot, offset) in shots.iter().zip([0.0, -6.0, 6.0, -3.0, 3.0]) {
            assert_eq!(shot.damage, 8);
            assert!((shot.motion.vel.length() - 440.0).abs() < 1e-2);
            assert!((angle_deg(shot.motion.vel) - (base + offset)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_spray_does_not_touch_hazards() {
        let hazards = vec![hazard_at(10.0, 10.0), hazard_at(20.0, 20.0)];
        let before = hazards.clone();
        let _ = fire(WeaponKind::Spray, Vec2::ZERO, 100.0, &hazards);
        assert_eq!(hazards, before);
    }

    #[test]
    fn test_nearest_hazard_first_seen_wins_ties() {
        let hazards = [hazard_at(10.0, 0.0), hazard_at(-10.0, 0.0), hazard_at(50.0, 0.0)];
        let nearest = nearest_hazard(Vec2::ZERO, &hazards).expect("has hazards");
        assert_eq!(nearest.pos(), Vec2::new(10.0, 0.0));
        assert!(nearest_hazard(Vec2::ZERO, &[]).is_none());
    }

    /// Hold the trigger for `frames` frames of `dt`, counting volleys
    fn hold(control: &mut FireControl, frames: u32, dt: f32, rate: f32) -> u32 {
        (0..frames).map(|_| control.advance(true, dt, rate)).sum()
    }

    #[test]
    fn test_pacing_high_frame_rate() {
        // 252 frames at 240 Hz = 1.05 s; 1.05 * 22 = 23.1
        let mut control = FireControl::default();
        assert_eq!(hold(&mut control, 252, 1.0 / 240.0, 22.0), 23);
    }

    #[test]
    fn test_pacing_low_frame_rate() {
        // 16 frames at 15 Hz = 1.0667 s; * 22 = 23.47
        let mut control = FireControl::default();
        assert_eq!(hold(&mut control, 16, 1.0 / 15.0, 22.0), 23);

        // 34 frames at 15 Hz = 2.2667 s; * 5 = 11.33
        let mut control = FireControl::default();
        assert_eq!(hold(&mut control, 34, 1.0 / 15.0, 5.0), 11);
    }

    #[test]
    fn test_low_frame_rate_fires_multiple_per_frame() {
        let mut control = FireControl::default();
        // A 100 ms hitch holds 2.2 intervals at 22/s
        assert_eq!(control.advance(true, 0.1, 22.0), 2);
        assert!(control.timer < 1.0 / 22.0);
    }

    #[test]
    fn test_high_frame_rate_waits_for_interval() {
        let mut control = FireControl::default();
        // 1/240 s is well under one 1/5 s interval
        for _ in 0..47 {
            assert_eq!(control.advance(true, 1.0 / 240.0, 5.0), 0);
        }
        assert_eq!(hold(&mut control, 2, 1.0 / 240.0, 5.0), 1);
    }

    #[test]
    fn test_release_wraps_bank() {
        let mut control = FireControl { timer: 0.95 };
        assert_eq!(control.advance(false, 1.0 / 60.0, 5.0), 0);
        assert!((control.timer - 0.15).abs() < 1e-5);

        // A bank already below the interval is left alone
        let mut control = FireControl { timer: 0.01 };
        control.advance(false, 1.0 / 60.0, 5.0);
        assert_eq!(control.timer, 0.01);
    }

    proptest! {
        #[test]
        fn prop_release_leaves_less_than_one_interval(
            timer in 0.0f32..100.0,
            rate in 0.5f32..60.0,
        ) {
            let mut control = FireControl { timer };
            control.advance(false, 0.016, rate);
            prop_assert!(control.timer >= 0.0);
            prop_assert!(control.timer < 1.0 / rate);
        }

        #[test]
        fn prop_shot_count_tracks_held_time(
            frames in 1u32..600,
            fps in prop::sample::select(vec![15.0f32, 30.0, 60.0, 144.0, 240.0]),
            rate in prop::sample::select(vec![5.0f32, 22.0]),
        ) {
            let dt = 1.0 / fps;
            let mut control = FireControl::default();
            let shots = hold(&mut control, frames, dt, rate) as f32;
            let expected = frames as f32 * dt * rate;
            // Float accumulation can land either side of an exact boundary
            prop_assert!(shots <= expected.floor() + 1.0);
            prop_assert!(shots >= expected.floor() - 1.0);
            prop_assert!(control.timer < 1.0 / rate + 1e-4);
        }
    }
}
