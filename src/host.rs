use cgmath::Point3;

use crate::controller::EngineBindings;
use crate::data::{DataSlot, FieldData, TrackedData};
use crate::rod::RodGeometry;

/// In-memory stand-in for the external simulation engine.
///
/// Owns the mesh the way the engine would, hands slot-backed bindings to the
/// controller, and plays the role of the topology processor: pending removal
/// requests are applied by deleting one element index at a time, which is
/// exactly the sequential scheme the descending index order exists for.
pub struct DemoHost {
    positions: FieldData<Vec<Point3<f64>>>,
    tetrahedra: FieldData<Vec<[u32; 4]>>,
    removal: TrackedData<Vec<u32>>,
    rod_geometry: TrackedData<RodGeometry>,
}

impl DemoHost {
    pub fn new(positions: Vec<Point3<f64>>, tetrahedra: Vec<[u32; 4]>) -> Self {
        Self {
            positions: FieldData::new(positions),
            tetrahedra: FieldData::new(tetrahedra),
            removal: TrackedData::new(Vec::new()),
            rod_geometry: TrackedData::new(RodGeometry::RigidPose([0.0; 7])),
        }
    }

    pub fn bindings(&self) -> EngineBindings {
        EngineBindings {
            rod_geometry: Box::new(self.rod_geometry.clone()),
            positions: Box::new(self.positions.clone()),
            tetrahedra: Box::new(self.tetrahedra.clone()),
            removal: Some(Box::new(self.removal.clone())),
        }
    }

    /// Execute the pending removal request, if any. Returns how many
    /// elements were deleted.
    pub fn apply_pending_removal(&mut self) -> usize {
        let pending = self.removal.read();
        if pending.is_empty() {
            return 0;
        }
        let mut tetrahedra = self.tetrahedra.read();
        let mut deleted = 0;
        for &index in &pending {
            let index = index as usize;
            if index < tetrahedra.len() {
                tetrahedra.remove(index);
                deleted += 1;
            }
        }
        self.tetrahedra.write(tetrahedra);
        // Consume the request so it cannot run twice.
        self.removal.write(Vec::new());
        deleted
    }

    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.read().len()
    }

    pub fn rod_geometry(&self) -> RodGeometry {
        self.rod_geometry.read()
    }

    /// How many times the controller republished the rod geometry.
    pub fn rod_republish_count(&self) -> u64 {
        self.rod_geometry.revision()
    }
}

/// Axis-aligned bar of unit cells, each split into five tetrahedra.
///
/// Vertices form a `(nx+1) x (ny+1) x (nz+1)` lattice starting at `origin`
/// with spacing `cell_size`.
pub fn tetrahedral_bar(
    nx: u32,
    ny: u32,
    nz: u32,
    cell_size: f64,
    origin: Point3<f64>,
) -> (Vec<Point3<f64>>, Vec<[u32; 4]>) {
    let mut positions = Vec::with_capacity(((nx + 1) * (ny + 1) * (nz + 1)) as usize);
    for z in 0..=nz {
        for y in 0..=ny {
            for x in 0..=nx {
                positions.push(Point3::new(
                    origin.x + x as f64 * cell_size,
                    origin.y + y as f64 * cell_size,
                    origin.z + z as f64 * cell_size,
                ));
            }
        }
    }

    let vertex = |x: u32, y: u32, z: u32| -> u32 { x + y * (nx + 1) + z * (nx + 1) * (ny + 1) };
    let mut tetrahedra = Vec::with_capacity((nx * ny * nz * 5) as usize);
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                let corner = [
                    vertex(x, y, z),
                    vertex(x + 1, y, z),
                    vertex(x + 1, y + 1, z),
                    vertex(x, y + 1, z),
                    vertex(x, y, z + 1),
                    vertex(x + 1, y, z + 1),
                    vertex(x + 1, y + 1, z + 1),
                    vertex(x, y + 1, z + 1),
                ];
                // Four corner tetrahedra plus the central one.
                for tet in [
                    [corner[0], corner[1], corner[3], corner[4]],
                    [corner[1], corner[2], corner[3], corner[6]],
                    [corner[1], corner[4], corner[5], corner[6]],
                    [corner[3], corner[4], corner[6], corner[7]],
                    [corner[1], corner[3], corner[4], corner[6]],
                ] {
                    tetrahedra.push(tet);
                }
            }
        }
    }
    (positions, tetrahedra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RodToolConfig;
    use crate::controller::RodCutController;
    use crate::key::RawKey;

    #[test]
    fn bar_generator_counts_add_up() {
        let (positions, tetrahedra) = tetrahedral_bar(4, 2, 1, 1.0, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(positions.len(), 5 * 3 * 2);
        assert_eq!(tetrahedra.len(), 4 * 2 * 1 * 5);
        let vertex_count = positions.len() as u32;
        assert!(tetrahedra
            .iter()
            .all(|tet| tet.iter().all(|&v| v < vertex_count)));
    }

    #[test]
    fn pending_removal_applies_descending_indices_sequentially() {
        let (positions, _) = tetrahedral_bar(1, 1, 1, 1.0, Point3::new(0.0, 0.0, 0.0));
        let tetrahedra = vec![[0, 1, 2, 3], [4, 5, 6, 7], [0, 2, 4, 6], [1, 3, 5, 7]];
        let mut host = DemoHost::new(positions, tetrahedra);
        let mut bindings = host.bindings();
        bindings
            .removal
            .as_mut()
            .expect("demo host always binds a removal sink")
            .write(vec![2, 0]);
        assert_eq!(host.apply_pending_removal(), 2);
        assert_eq!(host.tetrahedron_count(), 2);
        // Descending deletion leaves the surviving elements intact.
        let survivors = host.tetrahedra.read();
        assert_eq!(survivors, vec![[4, 5, 6, 7], [1, 3, 5, 7]]);
        // The request was consumed.
        assert_eq!(host.apply_pending_removal(), 0);
    }

    #[test]
    fn controller_sweep_cuts_a_channel_through_the_bar() {
        let (positions, tetrahedra) = tetrahedral_bar(6, 1, 1, 1.0, Point3::new(0.0, -1.0, -1.0));
        let total = tetrahedra.len();
        let mut host = DemoHost::new(positions, tetrahedra);
        let mut config = RodToolConfig::new([-2.0, -0.5, -0.5], [0.4, 0.4, 0.4]);
        config.speed = 25.0;
        let mut controller = RodCutController::new(&config, host.bindings());

        controller.on_key_pressed(&RawKey::Char('p'));
        controller.on_key_pressed(&RawKey::Text("6".to_string()));
        let mut removed_total = 0;
        for _ in 0..40 {
            controller.on_animate_begin();
            removed_total += host.apply_pending_removal();
        }
        assert!(controller.center().x > 6.0, "rod swept past the bar");
        assert!(removed_total > 0);
        assert_eq!(host.tetrahedron_count(), total - removed_total);
        assert!(host.tetrahedron_count() < total);
    }
}
