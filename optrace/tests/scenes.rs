use approx::assert_abs_diff_eq;
use optrace::*;

fn laser(id: &str, position: [Float; 2], rotation: Float) -> OpticalComponent {
    OpticalComponent::new(id, ComponentType::Emitter, position, rotation)
}

fn lossy_mirror(reflectivity: Float) -> ComponentKind {
    ComponentKind::Mirror {
        reflectivity: Some(reflectivity),
    }
}

/// Each emitter's first segment starts at that emitter, in input order.
#[test]
fn one_lineage_per_emitter() {
    let components = [
        laser("up", [0.0, 0.0], 90.0),
        OpticalComponent::new("m", ComponentType::Mirror, [50.0, 50.0], 0.0),
        laser("right", [0.0, 10.0], 360.0),
        laser("left", [0.0, -10.0], 180.0),
    ];
    let segments = calculate_ray_path(&components);

    assert_eq!(segments.len(), 3);
    for (segment, start) in segments.iter().zip([[0.0, 0.0], [0.0, 10.0], [0.0, -10.0]]) {
        assert_abs_diff_eq!(segment.p1, Position::from(start), epsilon = 1e-2);
        assert_eq!(segment.intensity, 1.0);
    }
}

/// A splitter feeding two detectors, one directly and one through a mirror.
#[test]
fn splitter_feeds_two_detectors() {
    let components = [
        laser("laser", [0.0, 0.0], 360.0),
        OpticalComponent::new(
            "bs",
            ComponentKind::Splitter {
                reflectivity: Some(0.5),
                transmissivity: Some(0.5),
            },
            [10.0, 0.0],
            0.0,
        ),
        // the reflected branch goes towards +y, and is folded back towards +x
        OpticalComponent::new("fold", lossy_mirror(0.9), [10.0, 10.0], 135.0),
        OpticalComponent::new("d_straight", ComponentType::Detector, [20.0, 0.0], 0.0),
        OpticalComponent::new("d_folded", ComponentType::Detector, [20.0, 10.0], 0.0),
        OpticalComponent::new("d_dark", ComponentType::Detector, [-20.0, 0.0], 0.0),
    ];
    let segments = calculate_ray_path(&components);

    // laser -> bs, bs -> fold, bs -> d_straight, fold -> d_folded
    assert_eq!(segments.len(), 4);
    assert_abs_diff_eq!(segments[3].intensity, 0.45, epsilon = 1e-12);
    assert_abs_diff_eq!(segments[3].p2, Position::new(20.0, 10.0), epsilon = 1e-9);

    let lit: Vec<_> = detectors_hit(&components, &segments)
        .into_iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(lit, ["d_straight", "d_folded"]);
}

/// Rays fall below the intensity floor long before the bounce ceiling.
#[test]
fn lossy_cavity_dies_out() {
    let components = [
        laser("laser", [0.0, 0.0], 360.0),
        OpticalComponent::new("a", lossy_mirror(0.5), [10.0, 0.0], 0.0),
        OpticalComponent::new("b", lossy_mirror(0.5), [-10.0, 0.0], 0.0),
    ];
    let segments = calculate_ray_path(&components);

    // 1, 0.5, 0.25, ..., 1/64 > 0.01 >= 1/128
    assert_eq!(segments.len(), 7);
    for pair in segments.windows(2) {
        assert_abs_diff_eq!(pair[1].intensity, pair[0].intensity * 0.5);
    }
    assert!(segments.iter().all(|s| s.intensity > TraceConfig::MIN_INTENSITY));
}

/// Splitters facing each other keep branching, the ceiling still bounds the run.
#[test]
fn branching_is_bounded() {
    let components = [
        laser("laser", [0.0, 0.0], 360.0),
        OpticalComponent::new("s1", ComponentType::Splitter, [10.0, 0.0], 0.0),
        OpticalComponent::new("s2", ComponentType::Splitter, [10.0, 10.0], 0.0),
        OpticalComponent::new("s3", ComponentType::Splitter, [20.0, 0.0], 0.0),
        OpticalComponent::new("m1", ComponentType::Mirror, [20.0, 10.0], 0.0),
        OpticalComponent::new("m2", ComponentType::Mirror, [0.0, 10.0], 0.0),
    ];
    let config = TraceConfig::default();

    let rounds: Vec<_> = Propagation::new(&components, config).collect();
    assert!(rounds.len() <= config.max_bounces);
    assert!(rounds.iter().flatten().all(|s| s.intensity > config.min_intensity));

    let segments = trace_with(&components, &config);
    assert_eq!(segments.len(), rounds.iter().map(Vec::len).sum::<usize>());
    assert_eq!(segments, calculate_ray_path(&components));
}

#[test]
fn rotating_a_laser_to_zero_keeps_it_firing() {
    let mut components = vec![laser("laser", [0.0, 0.0], 5.0)];
    components[0].rotate_by(-5.0);
    assert_eq!(components[0].rotation(), 360.0);

    let segments = calculate_ray_path(&components);
    assert_eq!(segments.len(), 1);
    assert_abs_diff_eq!(segments[0].direction(), Position::new(1.0, 0.0), epsilon = 1e-12);
}
