use ecowater::pip::{assign_region_code, build_points, RegionCodeResolver, ResolverOptions};
use ecowater::{RegionTable, Table, Value};
use geo::{polygon, Contains, Point, Polygon};
use proptest::prelude::*;

fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
    polygon![
        (x: x0, y: y0),
        (x: x0 + size, y: y0),
        (x: x0 + size, y: y0 + size),
        (x: x0, y: y0 + size),
        (x: x0, y: y0),
    ]
}

fn point_table(coords: &[(f64, f64)]) -> Table {
    let rows = coords
        .iter()
        .enumerate()
        .map(|(i, &(lon, lat))| vec![Value::Int(i as i64), lon.into(), lat.into()])
        .collect();
    let raw = Table::from_rows(["row", "longitude", "latitude"], rows).unwrap();
    build_points(&raw, "longitude", "latitude").unwrap()
}

fn region_table(squares: &[(f64, f64, f64)]) -> (RegionTable, Vec<Polygon<f64>>) {
    let polygons: Vec<Polygon<f64>> = squares
        .iter()
        .map(|&(x, y, s)| square(x, y, s))
        .collect();
    let regions = RegionTable::from_polygons(
        "code",
        polygons
            .iter()
            .enumerate()
            .map(|(i, p)| (format!("R{}", i).into(), p.clone()))
            .collect::<Vec<(ecowater::RegionCode, Polygon<f64>)>>(),
    )
    .unwrap();
    (regions, polygons)
}

/// Code of the earliest polygon containing (lon, lat)
fn expected_code(polygons: &[Polygon<f64>], lon: f64, lat: f64) -> Value {
    polygons
        .iter()
        .position(|p| p.contains(&Point::new(lon, lat)))
        .map(|i| Value::Text(format!("R{}", i)))
        .unwrap_or(Value::Null)
}

fn coords() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-5.0..5.0_f64, -5.0..5.0_f64), 0..40)
}

fn squares() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((-5.0..4.0_f64, -5.0..4.0_f64, 0.5..4.0_f64), 0..6)
}

proptest! {
    #[test]
    fn test_keep_empty_preserves_rows(coords in coords(), squares in squares()) {
        let points = point_table(&coords);
        let (regions, polygons) = region_table(&squares);

        let out = assign_region_code(&points, &regions, "code", false).unwrap();
        prop_assert_eq!(out.len(), points.len());

        for (i, &(lon, lat)) in coords.iter().enumerate() {
            prop_assert_eq!(out.get(i, "row"), Some(&Value::Int(i as i64)));
            prop_assert_eq!(out.get(i, "geometry"), points.get(i, "geometry"));
            prop_assert_eq!(out.get(i, "code").cloned(), Some(expected_code(&polygons, lon, lat)));
        }
    }

    #[test]
    fn test_remove_empty_drops_exactly_unmatched(coords in coords(), squares in squares()) {
        let points = point_table(&coords);
        let (regions, polygons) = region_table(&squares);

        let matrix = RegionCodeResolver::default().evaluate(&points, &regions).unwrap();
        let matched: Vec<i64> = matrix
            .any_per_row()
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(i, _)| i as i64)
            .collect();

        let out = assign_region_code(&points, &regions, "code", true).unwrap();
        prop_assert!(out.len() <= points.len());

        let kept: Vec<i64> = out
            .column("row")
            .unwrap()
            .map(|v| match v {
                Value::Int(i) => *i,
                other => panic!("unexpected row value {:?}", other),
            })
            .collect();
        prop_assert_eq!(&kept, &matched);

        for (out_row, &src) in kept.iter().enumerate() {
            let (lon, lat) = coords[src as usize];
            let code = out.get(out_row, "code").cloned().unwrap();
            prop_assert!(!code.is_null());
            prop_assert_eq!(code, expected_code(&polygons, lon, lat));
        }
    }

    #[test]
    fn test_repeated_runs_are_identical(coords in coords(), squares in squares()) {
        let points = point_table(&coords);
        let (regions, _) = region_table(&squares);

        let parallel = RegionCodeResolver::default();
        let sequential = RegionCodeResolver::new(ResolverOptions {
            parallel: false,
            ..ResolverOptions::default()
        });

        let first = parallel.assign(&points, &regions).unwrap();
        let second = parallel.assign(&points, &regions).unwrap();
        let third = sequential.assign(&points, &regions).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &third);
    }

    #[test]
    fn test_earlier_region_wins(lon in 0.1..0.9_f64, lat in 0.1..0.9_f64, extra in 0.0..3.0_f64) {
        let points = point_table(&[(lon, lat)]);
        // both squares contain the point; the second is larger
        let (regions, _) = region_table(&[(0.0, 0.0, 1.0), (-extra - 0.5, -extra - 0.5, 2.0 + 2.0 * extra)]);

        let out = assign_region_code(&points, &regions, "code", true).unwrap();
        prop_assert_eq!(out.get(0, "code"), Some(&Value::from("R0")));
    }
}
