//! The closed behavior vocabulary and its lookup table

use crate::rules::{self, Rule};
use kinema_core::PropertyPath;
use kinema_scene::ObjectKind;
use serde::{Deserialize, Serialize};
use std::fmt;

const PX: PropertyPath = PropertyPath::POSITION_X;
const PY: PropertyPath = PropertyPath::POSITION_Y;
const PZ: PropertyPath = PropertyPath::POSITION_Z;
const RX: PropertyPath = PropertyPath::ROTATION_X;
const RY: PropertyPath = PropertyPath::ROTATION_Y;
const RZ: PropertyPath = PropertyPath::ROTATION_Z;
const SX: PropertyPath = PropertyPath::SCALE_X;
const SY: PropertyPath = PropertyPath::SCALE_Y;
const SZ: PropertyPath = PropertyPath::SCALE_Z;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Rotate,
    Bounce,
    Float,
    Walk,
    Run,
    Jump,
    Fly,
    Swim,
    Eat,
    Sleep,
    Attack,
    Dance,
    Patrol,
    Follow,
    Grow,
    Shrink,
    Pulse,
    Wave,
    Spiral,
    Vibrate,
    Breathe,
    Idle,
    Drive,
    Brake,
    Turn,
    Sway,
    Waterfall,
    Wind,
}

/// Table entry for one behavior
pub struct BehaviorEntry {
    pub behavior: Behavior,
    pub name: &'static str,
    /// The behavior only acts on objects of this kind
    pub kind_gate: Option<ObjectKind>,
    /// Transform axes the rule writes
    pub targets: &'static [PropertyPath],
    pub rule: Rule,
}

impl BehaviorEntry {
    pub fn applies_to(&self, kind: ObjectKind) -> bool {
        self.kind_gate.map_or(true, |gate| gate == kind)
    }

    /// Axes this behavior writes on an object of `kind`
    pub fn claims(&self, kind: ObjectKind) -> &'static [PropertyPath] {
        if self.applies_to(kind) {
            self.targets
        } else {
            &[]
        }
    }
}

impl fmt::Debug for BehaviorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorEntry")
            .field("name", &self.name)
            .field("kind_gate", &self.kind_gate)
            .field("targets", &self.targets)
            .finish()
    }
}

macro_rules! entry {
    ($behavior:ident, $name:literal, $gate:expr, [$($target:expr),*], $rule:path) => {
        BehaviorEntry {
            behavior: Behavior::$behavior,
            name: $name,
            kind_gate: $gate,
            targets: &[$($target),*],
            rule: $rule,
        }
    };
}

pub static BEHAVIORS: [BehaviorEntry; 28] = [
    entry!(Rotate, "rotate", None, [RY], rules::rotate),
    entry!(Bounce, "bounce", None, [PY], rules::bounce),
    entry!(Float, "float", None, [PY], rules::float),
    entry!(Walk, "walk", None, [PX, RZ], rules::walk),
    entry!(Run, "run", None, [PX, PY], rules::run),
    entry!(Jump, "jump", None, [PY], rules::jump),
    entry!(Fly, "fly", None, [PY, RX, RZ], rules::fly),
    entry!(Swim, "swim", None, [PY, RX], rules::swim),
    entry!(Eat, "eat", None, [SX, SY, SZ], rules::eat),
    entry!(Sleep, "sleep", None, [RZ, SX, SY, SZ], rules::sleep),
    entry!(Attack, "attack", None, [RY, SX, SY, SZ], rules::attack),
    entry!(Dance, "dance", None, [PY, RX, RY], rules::dance),
    entry!(Patrol, "patrol", None, [PX, RY], rules::patrol),
    entry!(Follow, "follow", None, [PX, PZ, RX, RY, RZ], rules::follow),
    entry!(Grow, "grow", None, [SX, SY, SZ], rules::grow),
    entry!(Shrink, "shrink", None, [SX, SY, SZ], rules::shrink),
    entry!(Pulse, "pulse", None, [SX, SY, SZ], rules::pulse),
    entry!(Wave, "wave", None, [PY], rules::wave),
    entry!(Spiral, "spiral", None, [PX, PY, PZ], rules::spiral),
    entry!(Vibrate, "vibrate", None, [PX, PZ], rules::vibrate),
    entry!(Breathe, "breathe", None, [SX, SY, SZ], rules::breathe),
    entry!(Idle, "idle", None, [PY, RY], rules::idle),
    entry!(Drive, "drive", Some(ObjectKind::Vehicle), [PX, RZ], rules::drive),
    entry!(Brake, "brake", Some(ObjectKind::Vehicle), [RX], rules::brake),
    entry!(Turn, "turn", Some(ObjectKind::Vehicle), [RY, RZ], rules::turn),
    entry!(Sway, "sway", Some(ObjectKind::Tree), [RX, RZ], rules::sway),
    entry!(Waterfall, "waterfall", Some(ObjectKind::Terrain), [PY], rules::waterfall),
    entry!(Wind, "wind", None, [PX, RZ], rules::wind),
];

impl Behavior {
    /// Look up a behavior by its identifier. Unknown identifiers yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(name).map(|entry| entry.behavior)
    }

    pub fn entry(self) -> &'static BehaviorEntry {
        // Table order matches declaration order
        &BEHAVIORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Find the table entry for a behavior identifier
pub fn lookup(name: &str) -> Option<&'static BehaviorEntry> {
    BEHAVIORS.iter().find(|entry| entry.name == name)
}
