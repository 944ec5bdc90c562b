use glam::Vec3;

/// Line-list vertex for a host debug renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl DebugVertex {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

const CELL_COLOR: [f32; 4] = [0.3, 1.0, 0.3, 0.6]; // green, semi-transparent

/// An occupied cell drawn for a limited time after a sound is admitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugCellMarker {
    pub center: Vec3,
    pub half_extent: f32,
    /// Seconds left before the marker disappears.
    pub remaining: f32,
}

impl DebugCellMarker {
    pub fn wireframe(&self) -> Vec<DebugVertex> {
        cell_wireframe(self.center, self.half_extent, CELL_COLOR)
    }
}

/// Age markers by `dt` and drop expired ones.
pub fn age_markers(markers: &mut Vec<DebugCellMarker>, dt: f32) {
    for marker in markers.iter_mut() {
        marker.remaining -= dt;
    }
    markers.retain(|m| m.remaining > 0.0);
}

/// Wireframe vertices for an axis-aligned cube (12 edges x 2 verts = 24 verts).
pub fn cell_wireframe(center: Vec3, half_extent: f32, color: [f32; 4]) -> Vec<DebugVertex> {
    let r = half_extent;
    let Vec3 { x: cx, y: cy, z: cz } = center;

    let corners: [[f32; 3]; 8] = [
        [cx - r, cy - r, cz - r],
        [cx + r, cy - r, cz - r],
        [cx + r, cy + r, cz - r],
        [cx - r, cy + r, cz - r],
        [cx - r, cy - r, cz + r],
        [cx + r, cy - r, cz + r],
        [cx + r, cy + r, cz + r],
        [cx - r, cy + r, cz + r],
    ];

    let edges: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0), // bottom face
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4), // top face
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7), // verticals
    ];

    let mut verts = Vec::with_capacity(24);
    for (a, b) in edges {
        verts.push(DebugVertex::new(corners[a], color));
        verts.push(DebugVertex::new(corners[b], color));
    }
    verts
}
