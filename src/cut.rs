use cgmath::{Point3, Vector3};

/// Closed 3D axis-aligned bounding box.
///
/// Intervals are inclusive on both ends: two boxes that merely touch on a
/// face still overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb3 {
    pub fn from_center_half_extents(center: Point3<f64>, half: Vector3<f64>) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tight bounds of a point set. `None` for an empty set.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some(Self { min, max })
    }

    /// Separating-axis overlap test: not disjoint on X, Y and Z at once.
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.max.z >= other.min.z
            && self.min.z <= other.max.z
    }
}

/// Indices of every tetrahedron whose bounding box overlaps `rod`, sorted in
/// strictly descending order.
///
/// Descending order matters downstream: the removal sink deletes elements
/// one index at a time, and deleting from the back keeps the indices of
/// not-yet-deleted elements stable.
///
/// A tetrahedron referencing a vertex id beyond `positions` is skipped; that
/// happens when the snapshot is read mid-rebuild and is treated as "not
/// overlapping this tick".
pub fn removal_candidates(
    positions: &[Point3<f64>],
    tetrahedra: &[[u32; 4]],
    rod: &Aabb3,
) -> Vec<u32> {
    let mut to_remove = Vec::new();
    'elements: for (index, tet) in tetrahedra.iter().enumerate() {
        let mut corners = [Point3::new(0.0, 0.0, 0.0); 4];
        for (corner, &vertex) in corners.iter_mut().zip(tet.iter()) {
            match positions.get(vertex as usize) {
                Some(p) => *corner = *p,
                None => continue 'elements,
            }
        }
        let Some(bounds) = Aabb3::from_points(&corners) else {
            continue;
        };
        if bounds.overlaps(rod) {
            to_remove.push(index as u32);
        }
    }
    to_remove.sort_unstable_by(|a, b| b.cmp(a));
    to_remove
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rod() -> Aabb3 {
        Aabb3::from_center_half_extents(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
    }

    // One tet fully inside the unit rod box, one far past x = 5.
    fn two_tet_fixture() -> (Vec<Point3<f64>>, Vec<[u32; 4]>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(0.0, 0.0, 0.5),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(6.5, 0.0, 0.0),
            Point3::new(6.0, 0.5, 0.0),
            Point3::new(6.0, 0.0, 0.5),
        ];
        let tetrahedra = vec![[0, 1, 2, 3], [4, 5, 6, 7]];
        (positions, tetrahedra)
    }

    #[test]
    fn contained_element_is_marked_distant_one_is_not() {
        let (positions, tetrahedra) = two_tet_fixture();
        let removed = removal_candidates(&positions, &tetrahedra, &unit_rod());
        assert_eq!(removed, vec![0]);
    }

    #[test]
    fn overlap_is_required_on_all_three_axes() {
        // Shares the rod's X and Y ranges but sits past it in Z.
        let positions = vec![
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(0.5, 0.0, 3.0),
            Point3::new(0.0, 0.5, 3.0),
            Point3::new(0.0, 0.0, 3.5),
        ];
        let removed = removal_candidates(&positions, &[[0, 1, 2, 3]], &unit_rod());
        assert!(removed.is_empty());
    }

    #[test]
    fn touching_counts_as_overlap() {
        let positions = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.0),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(1.0, 0.0, 0.5),
        ];
        let removed = removal_candidates(&positions, &[[0, 1, 2, 3]], &unit_rod());
        assert_eq!(removed, vec![0]);
    }

    #[test]
    fn indices_come_back_strictly_descending() {
        let positions = vec![
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, -0.5, -0.5),
            Point3::new(-0.5, 0.5, -0.5),
            Point3::new(-0.5, -0.5, 0.5),
        ];
        // Three copies of the same contained element.
        let tetrahedra = vec![[0, 1, 2, 3], [0, 1, 2, 3], [0, 1, 2, 3]];
        let removed = removal_candidates(&positions, &tetrahedra, &unit_rod());
        assert_eq!(removed, vec![2, 1, 0]);
        assert!(removed.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn out_of_range_vertex_ids_are_skipped() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(0.0, 0.0, 0.5),
        ];
        let tetrahedra = vec![[0, 1, 2, 99], [0, 1, 2, 3]];
        let removed = removal_candidates(&positions, &tetrahedra, &unit_rod());
        assert_eq!(removed, vec![1]);
    }

    #[test]
    fn from_points_rejects_empty_input() {
        assert_eq!(Aabb3::from_points(&[]), None);
    }
}
