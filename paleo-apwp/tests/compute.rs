use approx::assert_abs_diff_eq;
use paleo_apwp::plates::plate_frame_id;
use paleo_apwp::{
    ApwpCatalog, ApwpDataset, ApwpError, ComputeOptions, DatedRotation, ErrorKind,
    FiniteRotation, FrameErrorKind, PaleolatitudeCalculator, PlateErrorKind, PlateIndex,
    PlatePolygon, RotationTable, Site,
};

const FRAME: &str = "torsvik-2012-vandervoo-2015";
const UNCONSTRAINED: u32 = 1001;

fn synthetic_apwp() -> ApwpDataset {
    ApwpDataset::from_rows(
        FRAME,
        [
            (0.0, 88.5, 183.4, 1.8),
            (10.0, 86.9, 154.5, 2.6),
            (20.0, 85.6, 151.9, 2.1),
            (30.0, 84.4, 154.8, 2.6),
            (40.0, 83.1, 149.7, 3.4),
            (60.0, 77.2, 154.8, 2.8),
            (100.0, 64.4, 152.8, 3.3),
        ],
    )
    .unwrap()
}

fn catalog() -> ApwpCatalog {
    let rows = [(0.0, 90.0, 0.0, 1.0), (50.0, 80.0, 10.0, 3.0)];
    let second = ApwpDataset::from_rows("besse-courtillot-2002", rows).unwrap();
    ApwpCatalog::from_datasets([synthetic_apwp(), second]).unwrap()
}

#[test]
fn test_default_frame_resolves() {
    let catalog = catalog();
    let site = Site::new(52.0, 5.0, 25.0).unwrap();
    let result = PaleolatitudeCalculator::new(&catalog)
        .compute(&site, &ComputeOptions::default())
        .unwrap();

    assert_eq!(result.reference_frame, FRAME);
    assert!(result.paleolatitude_deg.is_finite());
    assert!(result.confidence_interval_deg > 0.0);
    assert!(result.paleolatitude_min_deg <= result.paleolatitude_deg);
    assert!(result.paleolatitude_deg <= result.paleolatitude_max_deg);
    assert!(!result.extrapolated);
}

#[test]
fn test_every_recorded_age_is_reproduced() {
    let catalog = catalog();
    let dataset = catalog.get(FRAME).unwrap();
    let calculator = PaleolatitudeCalculator::new(&catalog);

    for record in dataset.records() {
        let site = Site::new(10.0, 20.0, record.age_ma()).unwrap();
        let result = calculator.compute(&site, &ComputeOptions::new(FRAME)).unwrap();
        assert_eq!(&result.pole_used, record);
    }
}

#[test]
fn test_paleolatitude_is_continuous_in_age() {
    let catalog = catalog();
    let calculator = PaleolatitudeCalculator::new(&catalog);
    let options = ComputeOptions::new(FRAME);

    let mut previous: Option<f64> = None;
    for step in 0..=1000 {
        let age = step as f64 * 0.1;
        let site = Site::new(-33.9, 18.4, age).unwrap();
        let lat = calculator.compute(&site, &options).unwrap().paleolatitude_deg;
        if let Some(prev) = previous {
            let jump = (lat - prev).abs();
            assert!(jump < 0.5, "jump at {} Ma: {} -> {}", age, prev, lat);
        }
        previous = Some(lat);
    }
}

#[test]
fn test_extrapolation_is_opt_in() {
    let catalog = catalog();
    let calculator = PaleolatitudeCalculator::new(&catalog);
    let site = Site::new(0.0, 0.0, 120.0).unwrap();

    match calculator.compute(&site, &ComputeOptions::new(FRAME)).unwrap_err() {
        ApwpError::OutOfRange {
            age_ma,
            min_age_ma,
            max_age_ma,
            ..
        } => {
            assert_eq!(age_ma, 120.0);
            assert_eq!(min_age_ma, 0.0);
            assert_eq!(max_age_ma, 100.0);
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }

    let options = ComputeOptions::new(FRAME).with_extrapolation(true);
    let result = calculator.compute(&site, &options).unwrap();
    assert!(result.extrapolated);
    assert!(result.confidence_interval_deg >= 0.0);
}

#[test]
fn test_made_up_frame() {
    let catalog = catalog();
    let site = Site::new(0.0, 0.0, 0.0).unwrap();
    let err = PaleolatitudeCalculator::new(&catalog)
        .compute(&site, &ComputeOptions::new("made-up-frame"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownFrame);
    assert!(err.to_string().contains("made-up-frame"));
}

#[test]
fn test_rotation_into_other_frame() {
    let catalog = catalog();
    let mut table = RotationTable::new();
    let series = vec![
        DatedRotation {
            age_ma: 0.0,
            rotation: FiniteRotation::new(0.0, 0.0, 0.0).unwrap(),
        },
        DatedRotation {
            age_ma: 100.0,
            rotation: FiniteRotation::new(0.0, 90.0, 10.0).unwrap(),
        },
    ];
    table.add_dated(FRAME, "mantle", series).unwrap();
    let spin = FiniteRotation::new(90.0, 0.0, 45.0).unwrap();
    table.add_fixed("mantle", "spin-axis", spin).unwrap();

    let calculator = PaleolatitudeCalculator::new(&catalog).with_rotations(&table);
    let site = Site::new(45.0, -120.0, 50.0).unwrap();

    let direct = calculator.compute(&site, &ComputeOptions::new(FRAME)).unwrap();
    let options = ComputeOptions::new(FRAME).with_target_frame("spin-axis");
    let rotated = calculator.compute(&site, &options).unwrap();

    assert_eq!(rotated.target_frame.as_deref(), Some("spin-axis"));
    assert_abs_diff_eq!(
        rotated.pole_used.a95_deg(),
        direct.pole_used.a95_deg(),
        epsilon = 1e-12
    );
    let shift = (rotated.paleolatitude_deg - direct.paleolatitude_deg).abs();
    assert!(shift > 1e-6);

    let options = ComputeOptions::new(FRAME).with_target_frame("nowhere");
    let err = calculator.compute(&site, &options).unwrap_err();
    match err {
        ApwpError::UnknownFrame { kind, .. } => assert_eq!(kind, FrameErrorKind::NoRotationPath),
        other => panic!("Expected UnknownFrame, got {:?}", other),
    }
}

fn plates() -> PlateIndex {
    let africa = PlatePolygon::new(
        701,
        "Africa",
        &[(-35.0, -15.0), (-35.0, 50.0), (35.0, 50.0), (35.0, -15.0)],
    )
    .unwrap();
    let belt = PlatePolygon::new(
        UNCONSTRAINED,
        "Unconstrained deformation zone",
        &[(40.0, 60.0), (40.0, 80.0), (50.0, 70.0)],
    )
    .unwrap();
    PlateIndex::from_plates([africa, belt])
}

#[test]
fn test_site_plate_drives_rotation() {
    let catalog = catalog();
    let mut table = RotationTable::new();
    let euler = FiniteRotation::new(0.0, 0.0, 20.0).unwrap();
    table.add_fixed(FRAME, &plate_frame_id(701), euler).unwrap();

    let plates = plates();
    let calculator = PaleolatitudeCalculator::new(&catalog)
        .with_rotations(&table)
        .with_plates(&plates);
    let options = ComputeOptions::new(FRAME);

    let site = Site::new(-33.9, 18.4, 40.0).unwrap();
    let on_plate = calculator.compute(&site, &options).unwrap();
    assert_eq!(on_plate.plate_id, Some(701));
    assert_eq!(on_plate.plate_name.as_deref(), Some("Africa"));
    assert_eq!(on_plate.target_frame.as_deref(), Some("plate-701"));

    let direct = PaleolatitudeCalculator::new(&catalog)
        .compute(&site, &options)
        .unwrap();
    let shift = (on_plate.paleolatitude_deg - direct.paleolatitude_deg).abs();
    assert!(shift > 1e-6);

    let explicit = options.clone().with_target_frame(FRAME);
    let overridden = calculator.compute(&site, &explicit).unwrap();
    assert_eq!(overridden.plate_id, None);
    assert_eq!(overridden.paleolatitude_deg, direct.paleolatitude_deg);
}

#[test]
fn test_site_plate_lookup_failures() {
    let catalog = catalog();
    let plates = plates();
    let calculator = PaleolatitudeCalculator::new(&catalog).with_plates(&plates);
    let options = ComputeOptions::new(FRAME);

    let ocean = Site::new(-60.0, -100.0, 10.0).unwrap();
    match calculator.compute(&ocean, &options).unwrap_err() {
        ApwpError::PlateLookup { kind, .. } => assert_eq!(kind, PlateErrorKind::NoPlate),
        other => panic!("Expected PlateLookup, got {:?}", other),
    }

    let belt = Site::new(44.0, 70.0, 10.0).unwrap();
    match calculator.compute(&belt, &options).unwrap_err() {
        ApwpError::PlateLookup { kind, .. } => assert_eq!(kind, PlateErrorKind::Unconstrained),
        other => panic!("Expected PlateLookup, got {:?}", other),
    }
}

#[test]
fn test_parallel_requests_share_catalog() {
    let catalog = catalog();
    let options = ComputeOptions::new(FRAME);

    let serial: Vec<f64> = (0..8)
        .map(|i| {
            let site = Site::new(10.0 * i as f64, 0.0, 12.5 * i as f64).unwrap();
            let calculator = PaleolatitudeCalculator::new(&catalog);
            calculator.compute(&site, &options).unwrap().paleolatitude_deg
        })
        .collect();

    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (catalog, options) = (&catalog, &options);
                scope.spawn(move || {
                    let site = Site::new(10.0 * i as f64, 0.0, 12.5 * i as f64).unwrap();
                    PaleolatitudeCalculator::new(catalog)
                        .compute(&site, options)
                        .unwrap()
                        .paleolatitude_deg
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, parallel);
}
