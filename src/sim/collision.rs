//! Collision detection and resolution
//!
//! Two passes per frame, in order:
//! 1. projectiles against hazards (each projectile removes at most one hazard)
//! 2. the ship against hazards, folded together with hazard motion/lifetime
//!
//! Removal goes through `retain`/`remove` so no pass ever holds a stale index.

use glam::Vec2;
use rand::Rng;

use super::motion::advance_hazard;
use super::spawn::spawn_split;
use super::state::{Hazard, HazardKind, Projectile, Ship};
use crate::tuning::Tuning;

/// Something the resolver did this frame
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionEvent {
    /// A projectile destroyed a hazard
    HazardDestroyed {
        kind: HazardKind,
        pos: Vec2,
        /// Offspring were spawned
        split: bool,
    },
    /// A hazard rammed the ship
    ShipHit {
        kind: HazardKind,
        damage: i32,
        hp_after: i32,
        killed: bool,
    },
}

/// Circle overlap test (touching is not a hit)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Resolve projectile hits against hazards.
///
/// Projectiles are visited in order; each takes out the first hazard it
/// overlaps and is consumed. Offspring of a splitting hazard are appended
/// right away and can be hit by later projectiles in the same pass.
pub fn resolve_projectile_hits<R: Rng + ?Sized>(
    projectiles: &mut Vec<Projectile>,
    hazards: &mut Vec<Hazard>,
    rng: &mut R,
    tuning: &Tuning,
    screen: Vec2,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    projectiles.retain(|projectile| {
        let hit = hazards.iter().position(|hazard| {
            circles_overlap(projectile.pos(), projectile.radius(), hazard.pos(), hazard.radius())
        });
        let Some(index) = hit else {
            return true;
        };

        let dead = hazards.remove(index);
        let split = dead.kind.splits_on_death();
        if split {
            hazards.extend(spawn_split(&mut *rng, tuning, screen, dead.pos()));
        }
        events.push(CollisionEvent::HazardDestroyed {
            kind: dead.kind,
            pos: dead.pos(),
            split,
        });
        false
    });

    events
}

/// Resolve ship rams, then move every hazard that did not hit the ship.
///
/// A hazard touching a living ship deals its damage and is removed before its
/// lifetime is considered; the rest advance by `dt` and drop once off screen.
pub fn resolve_ship_hits(
    ship: &mut Ship,
    hazards: &mut Vec<Hazard>,
    dt: f32,
    screen: Vec2,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    hazards.retain_mut(|hazard| {
        if ship.is_alive() && circles_overlap(ship.pos(), ship.radius, hazard.pos(), hazard.radius()) {
            let damage = hazard.damage();
            ship.take_damage(damage);
            events.push(CollisionEvent::ShipHit {
                kind: hazard.kind,
                damage,
                hp_after: ship.hp,
                killed: !ship.is_alive(),
            });
            return false;
        }
        advance_hazard(hazard, dt, screen)
    });

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{SizeClass, WeaponKind};
    use crate::tuning::{ShipTuning, WeaponTable};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn screen() -> Vec2 {
        Vec2::new(800.0, 800.0)
    }

    fn ship() -> Ship {
        Ship::new(screen(), &ShipTuning::default(), WeaponTable::default())
    }

    fn hazard(kind: HazardKind, size: SizeClass, x: f32, y: f32) -> Hazard {
        Hazard::new(kind, size, Vec2::new(x, y), Vec2::ZERO)
    }

    fn ball(x: f32, y: f32) -> Projectile {
        Projectile::new(WeaponKind::Ball, Vec2::new(x, y), Vec2::ZERO, 10)
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    }

    #[test]
    fn test_projectile_destroys_first_overlapping_hazard_only() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        let mut hazards = vec![
            hazard(HazardKind::Square, SizeClass::Small, 100.0, 100.0),
            hazard(HazardKind::Triangle, SizeClass::Small, 105.0, 100.0),
        ];
        let mut projectiles = vec![ball(102.0, 100.0)];

        let events = resolve_projectile_hits(&mut projectiles, &mut hazards, &mut rng, &tuning, screen());

        assert!(projectiles.is_empty());
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].kind, HazardKind::Triangle);
        assert_eq!(
            events,
            vec![CollisionEvent::HazardDestroyed {
                kind: HazardKind::Square,
                pos: Vec2::new(100.0, 100.0),
                split: false,
            }]
        );
    }

    #[test]
    fn test_later_projectile_sees_updated_hazards() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        let mut hazards = vec![hazard(HazardKind::Square, SizeClass::Small, 100.0, 100.0)];
        // Both overlap the same hazard; only the first is consumed
        let mut projectiles = vec![ball(100.0, 100.0), ball(101.0, 100.0), ball(700.0, 700.0)];

        resolve_projectile_hits(&mut projectiles, &mut hazards, &mut rng, &tuning, screen());

        assert!(hazards.is_empty());
        assert_eq!(projectiles.len(), 2);
        assert_eq!(projectiles[0].pos(), Vec2::new(101.0, 100.0));
        assert_eq!(projectiles[1].pos(), Vec2::new(700.0, 700.0));
    }

    #[test]
    fn test_small_homing_splits_into_two_large_homing() {
        let mut rng = Pcg32::seed_from_u64(2);
        let tuning = Tuning::default();
        let mut hazards = vec![
            hazard(HazardKind::Pentagon, SizeClass::Small, 600.0, 600.0),
            hazard(HazardKind::KomarDebil, SizeClass::Medium, 200.0, 200.0),
        ];
        let mut projectiles = vec![ball(200.0, 200.0)];

        let events = resolve_projectile_hits(&mut projectiles, &mut hazards, &mut rng, &tuning, screen());

        assert_eq!(hazards.len(), 3);
        assert_eq!(hazards[0].kind, HazardKind::Pentagon);
        assert!(hazards[1..].iter().all(|h| h.kind == HazardKind::Komar));
        assert_eq!(
            events,
            vec![CollisionEvent::HazardDestroyed {
                kind: HazardKind::KomarDebil,
                pos: Vec2::new(200.0, 200.0),
                split: true,
            }]
        );
    }

    #[test]
    fn test_other_kinds_never_split() {
        let tuning = Tuning::default();
        for kind in [
            HazardKind::Triangle,
            HazardKind::Square,
            HazardKind::Pentagon,
            HazardKind::Komar,
        ] {
            let mut rng = Pcg32::seed_from_u64(4);
            // The next hazard in line is a splitter; its kind must not leak into the decision
            let mut hazards = vec![
                hazard(kind, SizeClass::Large, 300.0, 300.0),
                hazard(HazardKind::KomarDebil, SizeClass::Medium, 700.0, 100.0),
            ];
            let mut projectiles = vec![ball(300.0, 300.0)];
            resolve_projectile_hits(&mut projectiles, &mut hazards, &mut rng, &tuning, screen());
            assert_eq!(hazards.len(), 1);
            assert_eq!(hazards[0].kind, HazardKind::KomarDebil);
        }
    }

    #[test]
    fn test_large_pentagon_rams_ship() {
        let mut ship = ship();
        let mut hazards = vec![hazard(HazardKind::Pentagon, SizeClass::Large, 420.0, 400.0)];

        let events = resolve_ship_hits(&mut ship, &mut hazards, 1.0 / 60.0, screen());

        assert!(hazards.is_empty());
        assert_eq!(ship.hp, 40);
        assert!(ship.is_alive());
        assert_eq!(
            events,
            vec![CollisionEvent::ShipHit {
                kind: HazardKind::Pentagon,
                damage: 60,
                hp_after: 40,
                killed: false,
            }]
        );
    }

    #[test]
    fn test_second_ram_kills_ship() {
        let mut ship = ship();

        let mut hazards = vec![hazard(HazardKind::Pentagon, SizeClass::Large, 400.0, 400.0)];
        resolve_ship_hits(&mut ship, &mut hazards, 1.0 / 60.0, screen());
        assert!(ship.is_alive());

        let mut hazards = vec![hazard(HazardKind::Pentagon, SizeClass::Large, 400.0, 400.0)];
        let events = resolve_ship_hits(&mut ship, &mut hazards, 1.0 / 60.0, screen());
        assert_eq!(ship.hp, -20);
        assert!(!ship.is_alive());
        assert!(matches!(events[0], CollisionEvent::ShipHit { killed: true, .. }));
    }

    #[test]
    fn test_dead_ship_is_not_hit() {
        let mut ship = ship();
        ship.take_damage(1000);
        let mut hazards = vec![hazard(HazardKind::Square, SizeClass::Small, 400.0, 400.0)];
        let events = resolve_ship_hits(&mut ship, &mut hazards, 1.0 / 60.0, screen());
        assert!(events.is_empty());
        assert_eq!(hazards.len(), 1);
    }

    #[test]
    fn test_ram_wins_over_lifetime() {
        // Ship parked past the right edge; the hazard would leave the screen this frame
        let mut ship = ship();
        ship.transform.pos = Vec2::new(860.0, 400.0);
        let mut hazards = vec![Hazard::new(
            HazardKind::Triangle,
            SizeClass::Small,
            Vec2::new(830.0, 400.0),
            Vec2::new(1000.0, 0.0),
        )];

        let events = resolve_ship_hits(&mut ship, &mut hazards, 0.1, screen());

        assert!(hazards.is_empty());
        assert_eq!(ship.hp, 95);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_off_screen_hazard_removed_without_event() {
        let mut ship = ship();
        let mut hazards = vec![
            Hazard::new(
                HazardKind::Square,
                SizeClass::Small,
                Vec2::new(10.0, 10.0),
                Vec2::new(-500.0, 0.0),
            ),
            Hazard::new(
                HazardKind::Square,
                SizeClass::Small,
                Vec2::new(100.0, 100.0),
                Vec2::new(10.0, 0.0),
            ),
        ];

        let events = resolve_ship_hits(&mut ship, &mut hazards, 0.1, screen());

        assert!(events.is_empty());
        assert_eq!(hazards.len(), 1);
        assert!((hazards[0].pos().x - 101.0).abs() < 1e-4);
    }

    #[test]
    fn test_colliding_hazard_is_not_advanced() {
        let mut ship = ship();
        let far = Hazard::new(HazardKind::Square, SizeClass::Small, Vec2::new(100.0, 100.0), Vec2::new(0.0, 10.0));
        let near = hazard(HazardKind::Triangle, SizeClass::Small, 400.0, 400.0);
        let mut hazards = vec![near, far];

        resolve_ship_hits(&mut ship, &mut hazards, 1.0, screen());

        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].pos(), Vec2::new(100.0, 110.0));
    }
}
