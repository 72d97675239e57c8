use alcance_core::util::geo_utils::equirectangular_distance;

use super::{DisjointSet, Disk};

/// two disks connect when their centers are no farther apart than the sum of their
/// radii plus the tolerance. touching disks connect.
pub fn are_connected(a: &Disk, b: &Disk, tolerance_meters: f64) -> bool {
    let distance = equirectangular_distance(&a.center, &b.center);
    distance <= a.radius_meters + b.radius_meters + tolerance_meters
}

/// partitions disks into connected groups by testing every pair.
///
/// degenerate disks take no part in grouping and appear in no group.
///
/// # Returns
///
/// * groups of indices into `disks`, each ascending, ordered by their first index
pub fn group_disks(disks: &[Disk], tolerance_meters: f64) -> Vec<Vec<usize>> {
    let active: Vec<usize> = (0..disks.len())
        .filter(|i| !disks[*i].is_degenerate())
        .collect();
    let mut set = DisjointSet::new(disks.len());
    for (pos, a) in active.iter().enumerate() {
        for b in active[pos + 1..].iter() {
            if are_connected(&disks[*a], &disks[*b], tolerance_meters) {
                set.union(*a, *b);
            }
        }
    }
    set.sets()
        .into_iter()
        .filter(|group| !disks[group[0]].is_degenerate())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alcance_core::util::geo_utils::{offset_by_meters, METERS_PER_DEGREE};
    use geo::Coord;
    use itertools::Itertools;

    fn disk(label: &str, lon: f64, lat: f64, radius: f64) -> Disk {
        Disk {
            center: Coord { x: lon, y: lat },
            radius_meters: radius,
            label: label.to_string(),
            route: None,
            is_origin: false,
            sample_points: 18,
        }
    }

    /// groups as sorted label sets, so results can be compared across input orders
    fn label_groups(disks: &[Disk], tolerance: f64) -> Vec<Vec<String>> {
        group_disks(disks, tolerance)
            .into_iter()
            .map(|g| g.into_iter().map(|i| disks[i].label.clone()).sorted().collect_vec())
            .sorted()
            .collect()
    }

    #[test]
    fn test_touching_disks_grouped_without_tolerance() {
        let a = disk("a", -58.38, -34.60, 1.0);
        let b = disk("b", -58.37, -34.61, 1.0);
        let d = equirectangular_distance(&a.center, &b.center);
        let a = Disk { radius_meters: d / 2.0, ..a };
        let b = Disk { radius_meters: d - d / 2.0, ..b };
        assert!(are_connected(&a, &b, 0.0));
        assert_eq!(group_disks(&[a, b], 0.0), vec![vec![0, 1]]);
    }

    #[test]
    fn test_tolerance_bridges_gap() {
        let a = disk("a", 0.0, 0.0, 500.0);
        let b = disk("b", 0.0, 1150.0 / METERS_PER_DEGREE, 500.0);
        assert!(!are_connected(&a, &b, 100.0));
        assert!(are_connected(&a, &b, 200.0));
    }

    #[test]
    fn test_overlap_always_grouped() {
        let center = Coord { x: -58.4, y: -34.6 };
        for step in 0..24 {
            let bearing = (step as f64 * 15.0).to_radians();
            let r1 = 100.0 + 37.0 * step as f64;
            let r2 = 900.0 - 11.0 * step as f64;
            let other = offset_by_meters(&center, (r1 + r2) * 0.999, bearing);
            let a = disk("a", center.x, center.y, r1);
            let b = disk("b", other.x, other.y, r2);
            assert!(are_connected(&a, &b, 0.0), "bearing {bearing}");
            assert_eq!(group_disks(&[a, b], 200.0).len(), 1);
        }
    }

    #[test]
    fn test_transitive_chain_and_isolated_disk() {
        let disks = vec![
            disk("a", 0.0, 0.0, 600.0),
            disk("far", 0.1, 0.1, 300.0),
            disk("b", 0.0, 0.01, 600.0),
            disk("c", 0.0, 0.02, 600.0),
        ];
        assert_eq!(group_disks(&disks, 0.0), vec![vec![0, 2, 3], vec![1]]);
    }

    #[test]
    fn test_degenerate_disks_excluded() {
        let disks = vec![
            disk("a", 0.0, 0.0, 600.0),
            disk("zero", 0.0, 0.0, 0.0),
            disk("negative", 0.0, 0.001, -5.0),
        ];
        assert_eq!(group_disks(&disks, 200.0), vec![vec![0]]);
    }

    #[test]
    fn test_grouping_is_order_independent() {
        let disks = vec![
            disk("a", 0.0, 0.0, 600.0),
            disk("b", 0.0, 0.01, 600.0),
            disk("c", 0.05, 0.05, 400.0),
            disk("d", 0.0, 0.02, 600.0),
            disk("e", 0.054, 0.05, 100.0),
            disk("f", -0.2, 0.0, 50.0),
        ];
        let expected = label_groups(&disks, 200.0);
        assert_eq!(expected.len(), 3);
        for permutation in (0..disks.len()).permutations(disks.len()) {
            let shuffled = permutation.iter().map(|i| disks[*i].clone()).collect_vec();
            assert_eq!(label_groups(&shuffled, 200.0), expected);
        }
    }
}
