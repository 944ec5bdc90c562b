use std::fmt;

/// Host-assigned identifier of a physics component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    GeometryCollection,
    StaticMesh,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub name: String,
}

impl ComponentInfo {
    pub fn new(id: u64, kind: ComponentKind, name: &str) -> Self {
        Self {
            id: ComponentId(id),
            kind,
            name: name.to_string(),
        }
    }
}

/// Sibling components of the entity an adapter is attached to. Components may
/// appear over several frames while the host finishes spawning the entity.
pub trait ActorComponents {
    fn components(&self) -> &[ComponentInfo];
}

/// Plain component list, for hosts that do not have their own entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentList(pub Vec<ComponentInfo>);

impl ComponentList {
    pub fn push(&mut self, component: ComponentInfo) {
        self.0.push(component);
    }
}

impl ActorComponents for ComponentList {
    fn components(&self) -> &[ComponentInfo] {
        &self.0
    }
}
