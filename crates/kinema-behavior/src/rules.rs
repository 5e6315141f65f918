//! Per-behavior transform rules
//!
//! Each rule reads the object's working transform, runtime state and the
//! scene snapshot in a [`BehaviorContext`] and records axis writes.

use crate::jitter::JitterRng;
use crate::state::{Mood, ObjectRuntimeState};
use kinema_core::{ObjectId, PropertyPath, Transform, Vec3};
use kinema_scene::{ObjectKind, SceneObject};
use std::f64::consts::PI;

pub type Rule = fn(&mut BehaviorContext<'_>);

const PX: PropertyPath = PropertyPath::POSITION_X;
const PY: PropertyPath = PropertyPath::POSITION_Y;
const PZ: PropertyPath = PropertyPath::POSITION_Z;
const RX: PropertyPath = PropertyPath::ROTATION_X;
const RY: PropertyPath = PropertyPath::ROTATION_Y;
const RZ: PropertyPath = PropertyPath::ROTATION_Z;

const GRAVITY: f64 = 9.81;
const JUMP_SPEED: f64 = 5.0;
const FOLLOW_SPEED: f64 = 2.0;

/// Axis writes produced for one object in one tick, last write per axis wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformPatch {
    writes: Vec<(PropertyPath, f64)>,
}

impl TransformPatch {
    pub fn set(&mut self, path: PropertyPath, value: f64) {
        match self.writes.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = value,
            None => self.writes.push((path, value)),
        }
    }

    pub fn get(&self, path: PropertyPath) -> Option<f64> {
        self.writes
            .iter()
            .find(|(p, _)| *p == path)
            .map(|&(_, v)| v)
    }

    pub fn writes(&self) -> &[(PropertyPath, f64)] {
        &self.writes
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Everything a rule may read or update for one object
pub struct BehaviorContext<'a> {
    pub id: &'a ObjectId,
    pub kind: ObjectKind,
    /// Position of the object in store order
    pub index: usize,
    pub delta: f64,
    /// All objects as currently stored
    pub objects: &'a [SceneObject],
    pub state: &'a mut ObjectRuntimeState,
    pub rng: &'a mut JitterRng,
    /// Live transform including earlier writes from this tick
    transform: Transform,
    patch: TransformPatch,
}

impl<'a> BehaviorContext<'a> {
    pub fn new(
        object: &'a SceneObject,
        index: usize,
        delta: f64,
        objects: &'a [SceneObject],
        state: &'a mut ObjectRuntimeState,
        rng: &'a mut JitterRng,
    ) -> Self {
        Self {
            id: &object.id,
            kind: object.kind,
            index,
            delta,
            objects,
            state,
            rng,
            transform: object.transform,
            patch: TransformPatch::default(),
        }
    }

    pub fn time(&self) -> f64 {
        self.state.animation_time
    }

    pub fn base(&self) -> &Transform {
        &self.state.base
    }

    pub fn get(&self, path: PropertyPath) -> f64 {
        self.transform.get(path)
    }

    pub fn set(&mut self, path: PropertyPath, value: f64) {
        self.transform.set(path, value);
        self.patch.set(path, value);
    }

    pub fn add(&mut self, path: PropertyPath, amount: f64) {
        let value = self.get(path) + amount;
        self.set(path, value);
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_uniform_scale(&mut self, s: f64) {
        for path in [
            PropertyPath::SCALE_X,
            PropertyPath::SCALE_Y,
            PropertyPath::SCALE_Z,
        ] {
            self.set(path, s);
        }
    }

    pub fn into_patch(self) -> TransformPatch {
        self.patch
    }
}

pub(crate) fn rotate(ctx: &mut BehaviorContext<'_>) {
    ctx.add(RY, ctx.delta);
}

pub(crate) fn bounce(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.set(PY, ctx.base().position.y + (t * 3.0).sin().abs() * 2.0);
}

pub(crate) fn float(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    let phase = ctx.index as f64;
    ctx.set(PY, ctx.base().position.y + (t + phase).sin() * 0.5);
}

pub(crate) fn walk(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.add(PX, (t * 2.0).sin() * 0.1);
    ctx.set(RZ, (t * 4.0).sin() * 0.1);
}

pub(crate) fn run(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.add(PX, (t * 4.0).sin() * 0.2);
    ctx.set(PY, ctx.base().position.y + (t * 8.0).sin().abs() * 0.3);
}

pub(crate) fn jump(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    let dt = ctx.delta;
    let ground = ctx.base().position.y;

    if t % 3.0 < 0.1 {
        ctx.state.velocity.y = JUMP_SPEED;
        ctx.state.is_grounded = false;
    }
    ctx.state.velocity.y -= GRAVITY * dt;

    let y = ground.max(ctx.get(PY) + ctx.state.velocity.y * dt);
    ctx.set(PY, y);
    if y <= ground {
        ctx.state.velocity.y = 0.0;
        ctx.state.is_grounded = true;
    }
}

pub(crate) fn fly(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.set(PY, ctx.base().position.y + (t * 2.0).sin());
    ctx.set(RX, t.sin() * 0.2);
    ctx.set(RZ, (t * 1.5).cos() * 0.1);
}

pub(crate) fn swim(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.set(PY, ctx.base().position.y + (t * 3.0).sin() * 0.3);
    ctx.set(RX, (t * 2.0).sin() * 0.3);
}

pub(crate) fn eat(ctx: &mut BehaviorContext<'_>) {
    if ctx.time() % 2.0 < 0.3 {
        ctx.set_uniform_scale(1.1);
        ctx.state.add_energy(ctx.delta * 10.0);
    } else {
        ctx.set_uniform_scale(1.0);
    }
}

pub(crate) fn sleep(ctx: &mut BehaviorContext<'_>) {
    ctx.set(RZ, PI / 6.0);
    ctx.set_uniform_scale(0.9);
    ctx.state.add_energy(ctx.delta * 20.0);
    ctx.state.mood = Mood::Peaceful;
}

pub(crate) fn attack(ctx: &mut BehaviorContext<'_>) {
    let cycle = ctx.time() % 1.5;
    if cycle < 0.2 {
        ctx.set_uniform_scale(1.3);
        ctx.add(RY, ctx.delta * 10.0);
    } else if cycle < 0.4 {
        ctx.set_uniform_scale(1.1);
    } else {
        ctx.set_uniform_scale(1.0);
    }
}

pub(crate) fn dance(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.set(RY, (t * 4.0).sin() * 0.5);
    ctx.set(PY, ctx.base().position.y + (t * 6.0).sin().abs() * 0.5);
    ctx.set(RX, (t * 3.0).sin() * 0.2);
}

pub(crate) fn patrol(ctx: &mut BehaviorContext<'_>) {
    let sweep = (ctx.time() * 0.5).sin();
    ctx.set(PX, ctx.base().position.x + sweep * 5.0);
    ctx.set(RY, if sweep > 0.0 { 0.0 } else { PI });
}

/// Step toward the first character other than self and face it
pub(crate) fn follow(ctx: &mut BehaviorContext<'_>) {
    let Some(target) = ctx
        .objects
        .iter()
        .find(|o| o.kind == ObjectKind::Character && o.id != *ctx.id)
    else {
        return;
    };
    let target = target.transform.position;
    let offset = target - ctx.position();
    let Some(dir) = offset.try_normalized() else {
        return;
    };

    let step = ctx.delta * FOLLOW_SPEED;
    ctx.add(PX, dir.x * step);
    ctx.add(PZ, dir.z * step);

    let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
    ctx.set(RX, -offset.y.atan2(horizontal));
    ctx.set(RY, offset.x.atan2(offset.z));
    ctx.set(RZ, 0.0);
}

pub(crate) fn grow(ctx: &mut BehaviorContext<'_>) {
    ctx.set_uniform_scale(1.0 + ctx.time().sin() * 0.2);
}

pub(crate) fn shrink(ctx: &mut BehaviorContext<'_>) {
    ctx.set_uniform_scale((1.0 - ctx.time().sin() * 0.2).max(0.1));
}

pub(crate) fn pulse(ctx: &mut BehaviorContext<'_>) {
    ctx.set_uniform_scale(1.0 + (ctx.time() * 5.0).sin() * 0.3);
}

pub(crate) fn wave(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    let base = ctx.base().position;
    ctx.set(PY, base.y + (t * 2.0 + base.x).sin() * 0.5);
}

pub(crate) fn spiral(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    let base = ctx.base().position;
    ctx.set(PX, base.x + t.cos() * 2.0);
    ctx.set(PZ, base.z + t.sin() * 2.0);
    ctx.set(PY, base.y + t * 0.5);
}

pub(crate) fn vibrate(ctx: &mut BehaviorContext<'_>) {
    let base = ctx.base().position;
    let jx = ctx.rng.centered(0.1);
    let jz = ctx.rng.centered(0.1);
    ctx.set(PX, base.x + jx);
    ctx.set(PZ, base.z + jz);
}

pub(crate) fn breathe(ctx: &mut BehaviorContext<'_>) {
    ctx.set_uniform_scale(1.0 + (ctx.time() * 2.0).sin() * 0.05);
}

pub(crate) fn idle(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.add(RY, (t * 0.5).sin() * 0.01);
    ctx.set(PY, ctx.base().position.y + (t * 0.8).sin() * 0.02);
}

pub(crate) fn drive(ctx: &mut BehaviorContext<'_>) {
    ctx.add(PX, ctx.delta * 3.0);
    // Suspension
    ctx.set(RZ, (ctx.time() * 10.0).sin() * 0.05);
}

pub(crate) fn brake(ctx: &mut BehaviorContext<'_>) {
    ctx.state.velocity.x *= 0.95;
    // Nose dive
    ctx.set(RX, -0.1);
}

pub(crate) fn turn(ctx: &mut BehaviorContext<'_>) {
    ctx.add(RY, ctx.delta);
    // Banking
    ctx.set(RZ, (ctx.time() * 2.0).sin() * 0.2);
}

pub(crate) fn sway(ctx: &mut BehaviorContext<'_>) {
    let t = ctx.time();
    ctx.set(RZ, (t * 1.5).sin() * 0.1);
    ctx.set(RX, (t * 1.2).cos() * 0.05);
}

pub(crate) fn waterfall(ctx: &mut BehaviorContext<'_>) {
    let base_y = ctx.base().position.y;
    let mut y = ctx.get(PY) - ctx.delta * 2.0;
    if y < base_y - 5.0 {
        y = base_y + 5.0;
    }
    ctx.set(PY, y);
}

pub(crate) fn wind(ctx: &mut BehaviorContext<'_>) {
    let strength = (ctx.time() * 0.5).sin() * 0.1;
    ctx.set(RZ, strength);
    ctx.set(PX, ctx.base().position.x + strength * 0.5);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        objects: Vec<SceneObject>,
        state: ObjectRuntimeState,
        rng: JitterRng,
    }

    impl Fixture {
        fn new(kind: ObjectKind, position: Vec3) -> Self {
            let object = SceneObject::new("o1", kind, position);
            let state = ObjectRuntimeState::for_object(&object);
            Self {
                objects: vec![object],
                state,
                rng: JitterRng::new(1),
            }
        }

        fn with_time(mut self, t: f64) -> Self {
            self.state.animation_time = t;
            self
        }

        fn run(&mut self, rule: Rule, delta: f64) -> TransformPatch {
            let (subject, _) = self.objects.split_first().unwrap();
            let mut ctx = BehaviorContext::new(
                subject,
                0,
                delta,
                &self.objects,
                &mut self.state,
                &mut self.rng,
            );
            rule(&mut ctx);
            ctx.into_patch()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bounce_peaks_at_two_above_base() {
        let mut fx = Fixture::new(ObjectKind::Cube, Vec3::new(0.0, 0.0, 0.0)).with_time(PI / 6.0);
        let patch = fx.run(bounce, 1.0 / 60.0);
        assert!(approx(patch.get(PY).unwrap(), 2.0));
    }

    #[test]
    fn jump_launches_then_applies_gravity() {
        let dt = 1.0 / 60.0;
        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO).with_time(dt);
        let patch = fx.run(jump, dt);

        assert!(approx(fx.state.velocity.y, 5.0 - 9.81 * dt));
        assert!(!fx.state.is_grounded);
        assert!(approx(patch.get(PY).unwrap(), fx.state.velocity.y * dt));
    }

    #[test]
    fn jump_lands_on_base() {
        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO).with_time(1.5);
        fx.state.velocity.y = -3.0;
        let patch = fx.run(jump, 0.1);

        assert_eq!(patch.get(PY), Some(0.0));
        assert_eq!(fx.state.velocity.y, 0.0);
        assert!(fx.state.is_grounded);
    }

    #[test]
    fn eat_duty_cycle() {
        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO).with_time(4.1);
        fx.state.energy = 50.0;
        let patch = fx.run(eat, 0.5);
        assert_eq!(patch.get(PropertyPath::SCALE_Y), Some(1.1));
        assert_eq!(fx.state.energy, 55.0);

        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO).with_time(1.0);
        let patch = fx.run(eat, 0.5);
        assert_eq!(patch.get(PropertyPath::SCALE_X), Some(1.0));
    }

    #[test]
    fn sleep_tilts_and_rests() {
        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO);
        fx.state.energy = 99.0;
        let patch = fx.run(sleep, 1.0);
        assert_eq!(patch.get(RZ), Some(PI / 6.0));
        assert_eq!(patch.get(PropertyPath::SCALE_Z), Some(0.9));
        assert_eq!(fx.state.energy, 100.0);
        assert_eq!(fx.state.mood, Mood::Peaceful);
    }

    #[test]
    fn attack_phases() {
        let scale_at = |t: f64| {
            let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO).with_time(t);
            fx.run(attack, 0.01).get(PropertyPath::SCALE_X).unwrap()
        };
        assert_eq!(scale_at(1.6), 1.3);
        assert_eq!(scale_at(1.8), 1.1);
        assert_eq!(scale_at(1.0), 1.0);
    }

    #[test]
    fn patrol_faces_direction_of_travel() {
        let mut fx = Fixture::new(ObjectKind::Character, Vec3::new(2.0, 0.0, 0.0)).with_time(PI);
        let patch = fx.run(patrol, 0.01);
        assert!(approx(patch.get(PX).unwrap(), 7.0));
        assert_eq!(patch.get(RY), Some(0.0));

        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO).with_time(3.0 * PI);
        assert_eq!(fx.run(patrol, 0.01).get(RY), Some(PI));
    }

    #[test]
    fn follow_moves_toward_character() {
        let mut fx = Fixture::new(ObjectKind::Sphere, Vec3::ZERO);
        fx.objects
            .push(SceneObject::new("player", ObjectKind::Character, Vec3::new(3.0, 0.0, 4.0)));
        let patch = fx.run(follow, 0.5);

        assert!(approx(patch.get(PX).unwrap(), 0.6));
        assert!(approx(patch.get(PZ).unwrap(), 0.8));
        assert!(approx(patch.get(RY).unwrap(), 3.0f64.atan2(4.0)));
        assert_eq!(patch.get(PY), None);
    }

    #[test]
    fn follow_without_target_is_noop() {
        // The only character is the follower itself
        let mut fx = Fixture::new(ObjectKind::Character, Vec3::ZERO);
        assert!(fx.run(follow, 0.5).is_empty());

        // Target at the same spot: no direction
        let mut fx = Fixture::new(ObjectKind::Sphere, Vec3::ONE);
        fx.objects
            .push(SceneObject::new("player", ObjectKind::Character, Vec3::ONE));
        assert!(fx.run(follow, 0.5).is_empty());
    }

    #[test]
    fn shrink_floors_scale() {
        let mut fx = Fixture::new(ObjectKind::Cube, Vec3::ZERO).with_time(PI / 2.0);
        assert!(approx(fx.run(shrink, 0.0).get(PropertyPath::SCALE_X).unwrap(), 0.8));
    }

    #[test]
    fn spiral_orbits_base() {
        let mut fx = Fixture::new(ObjectKind::Cube, Vec3::new(1.0, 1.0, 1.0)).with_time(PI);
        let patch = fx.run(spiral, 0.0);
        assert!(approx(patch.get(PX).unwrap(), -1.0));
        assert!(approx(patch.get(PZ).unwrap(), 1.0));
        assert!(approx(patch.get(PY).unwrap(), 1.0 + PI * 0.5));
    }

    #[test]
    fn vibrate_stays_near_base() {
        let mut fx = Fixture::new(ObjectKind::Cube, Vec3::new(4.0, 0.0, -2.0));
        for _ in 0..100 {
            let patch = fx.run(vibrate, 0.01);
            assert!((patch.get(PX).unwrap() - 4.0).abs() <= 0.05);
            assert!((patch.get(PZ).unwrap() + 2.0).abs() <= 0.05);
        }
    }

    #[test]
    fn waterfall_wraps_to_top() {
        let mut fx = Fixture::new(ObjectKind::Terrain, Vec3::ZERO);
        fx.objects[0].transform.position.y = -4.9;
        let patch = fx.run(waterfall, 0.1);
        assert_eq!(patch.get(PY), Some(5.0));
    }

    #[test]
    fn brake_damps_velocity() {
        let mut fx = Fixture::new(ObjectKind::Vehicle, Vec3::ZERO);
        fx.state.velocity.x = 10.0;
        let patch = fx.run(brake, 0.1);
        assert!(approx(fx.state.velocity.x, 9.5));
        assert_eq!(patch.get(RX), Some(-0.1));
    }

    #[test]
    fn patch_keeps_last_write_per_axis() {
        let mut patch = TransformPatch::default();
        patch.set(PX, 1.0);
        patch.set(PY, 2.0);
        patch.set(PX, 3.0);
        assert_eq!(patch.writes(), &[(PX, 3.0), (PY, 2.0)]);
    }
}
