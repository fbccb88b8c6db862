use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Object tags understood by the simulation environment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Agent,
    GoodGoal,
    GoodGoalMulti,
    GoodGoalMultiBounce,
    BadGoal,
    BadGoalBounce,
    Wall,
    Ramp,
    CylinderTunnel,
    Cardbox1,
    Cardbox2,
    UObject,
    LObject,
    LObject2,
    DeathZone,
    HotZone,
}

impl ItemKind {
    pub fn is_reward(&self) -> bool {
        matches!(
            self,
            ItemKind::GoodGoal | ItemKind::GoodGoalMulti | ItemKind::GoodGoalMultiBounce
        )
    }

    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            ItemKind::BadGoal | ItemKind::BadGoalBounce | ItemKind::DeathZone | ItemKind::HotZone
        )
    }
}

/// One placed (or pending) copy of an object.
///
/// Absent fields are delegated to the environment: no `position` means the
/// environment spawns it anywhere, no `size` means the environment default
/// (and no footprint for collision purposes), no `rotation` means the
/// orientation is unknown.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Instance {
    pub position: Option<Vector3<f32>>,
    pub size: Option<Vector3<f32>>,
    pub rotation: Option<f32>,
}

impl Instance {
    /// Ground-level instance at `(x, 0, z)`.
    pub fn at(x: f32, z: f32) -> Self {
        Instance {
            position: Some(Vector3::new(x, 0.0, z)),
            ..Default::default()
        }
    }

    /// Instance resting at height `y`, e.g. on top of a platform.
    pub fn raised(x: f32, y: f32, z: f32) -> Self {
        Instance {
            position: Some(Vector3::new(x, y, z)),
            ..Default::default()
        }
    }

    pub fn sized(mut self, size: Vector3<f32>) -> Self {
        self.size = Some(size);
        self
    }

    /// Cube of the given side, the usual shape for goals and zones.
    pub fn cube(self, side: f32) -> Self {
        self.sized(Vector3::new(side, side, side))
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.rotation = Some(angle);
        self
    }
}

/// A group of instances sharing one kind and tint; most entities hold a
/// single instance, multi-instance groups cover pillar grids, hazard rows
/// and the like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: ItemKind,
    pub instances: Vec<Instance>,
    pub tint: Option<Rgb>,
}

impl Entity {
    pub fn single(kind: ItemKind, instance: Instance) -> Self {
        Entity {
            kind,
            instances: vec![instance],
            tint: None,
        }
    }

    pub fn group(kind: ItemKind, instances: Vec<Instance>) -> Self {
        Entity {
            kind,
            instances,
            tint: None,
        }
    }

    pub fn tinted(mut self, tint: Rgb) -> Self {
        self.tint = Some(tint);
        self
    }
}

/// One generated level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub time_limit: u32,
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blackouts: Vec<i32>,
}

impl Arena {
    pub fn new(time_limit: u32) -> Self {
        Arena {
            time_limit,
            entities: Vec::new(),
            blackouts: Vec::new(),
        }
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn contains_kind(&self, kind: ItemKind) -> bool {
        self.entities.iter().any(|entity| entity.kind == kind)
    }
}

/// The keyed set of levels handed to the environment; keys are reassigned by
/// the final shuffle, so iteration order is the externally observed order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArenaCollection {
    pub arenas: BTreeMap<usize, Arena>,
}

impl ArenaCollection {
    pub fn insert_next(&mut self, arena: Arena) {
        self.arenas.insert(self.arenas.len(), arena);
    }

    pub fn len(&self) -> usize {
        self.arenas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arenas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAY;

    #[test]
    fn kind_predicates() {
        assert!(ItemKind::GoodGoalMulti.is_reward());
        assert!(!ItemKind::BadGoal.is_reward());
        assert!(ItemKind::DeathZone.is_hazard());
        assert!(!ItemKind::Wall.is_hazard());
    }

    #[test]
    fn wire_form_round_trips() {
        let mut arena = Arena::new(500);
        arena.push(
            Entity::single(ItemKind::Agent, Instance::at(10.0, 30.0).rotated(90.0)).tinted(GRAY),
        );
        arena.push(Entity::single(
            ItemKind::GoodGoalMulti,
            Instance::default().cube(1.5),
        ));
        arena.blackouts = vec![-20];

        let encoded = serde_json::to_string(&arena).unwrap();
        let decoded: Arena = serde_json::from_str(&encoded).unwrap();
        assert_eq!(arena, decoded);
    }

    #[test]
    fn blackouts_are_omitted_when_empty() {
        let arena = Arena::new(250);
        let encoded = serde_json::to_string(&arena).unwrap();
        assert!(!encoded.contains("blackouts"));
    }
}
