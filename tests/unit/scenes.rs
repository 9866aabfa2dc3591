use super::*;

fn cfg() -> SceneConfig {
    SceneConfig::default()
}

#[test]
fn default_config_is_the_classic_canvas() {
    let c = cfg();
    c.validate().unwrap();
    assert_eq!((c.canvas.width, c.canvas.height), (240, 240));
    assert_eq!(c.total_steps, 120);
    assert_eq!(c.center(), Point::new(120.0, 120.0));

    let bad = SceneConfig {
        total_steps: 0,
        ..cfg()
    };
    assert!(bad.validate().is_err());
    assert!(Variant::Circle.build(&bad).is_err());
}

#[test]
fn variant_names_are_unique_and_serde_friendly() {
    let names: std::collections::HashSet<_> = Variant::ALL.iter().map(|v| v.name()).collect();
    assert_eq!(names.len(), Variant::ALL.len());

    for v in Variant::ALL {
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, format!("\"{}\"", v.name()));
        let back: Variant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}

#[test]
fn every_variant_builds_with_the_expected_shape_counts() {
    let expected = [
        (Variant::Circle, 1),
        (Variant::Squares, 4),
        (Variant::Heptagram, 3 * HEPTAGRAM_ORBITS),
        (Variant::Overlay, 5),
        (Variant::Cross, 1),
        (Variant::Crosses, 16 + 25),
    ];
    for (variant, shapes) in expected {
        let summary = describe(variant, &cfg()).unwrap();
        assert_eq!(summary.total_steps, 120, "{variant:?}");
        assert_eq!(summary.min_shapes_per_step, shapes, "{variant:?}");
        assert_eq!(summary.max_shapes_per_step, shapes, "{variant:?}");
    }
}

#[test]
fn circle_dot_starts_above_the_center() {
    let p = Variant::Circle.build(&cfg()).unwrap();
    assert_eq!(p.evaluate(0, 120.0, 70.0), Some(ColorIndex::BLACK));
    assert_eq!(p.evaluate(0, 120.0, 120.0), None);
    // A quarter period later the dot has moved a quarter turn counter-clockwise.
    assert_eq!(p.evaluate(30, 70.0, 120.0), Some(ColorIndex::BLACK));
}

#[test]
fn overlay_paints_the_red_dot_over_the_squares() {
    let p = Variant::Overlay.build(&cfg()).unwrap();
    let corner = 120.0 - SMALL_ORBIT_RADIUS * std::f64::consts::FRAC_1_SQRT_2;
    assert_eq!(p.evaluate(0, corner, corner), Some(ColorIndex::BLACK));
    assert_eq!(p.evaluate(0, 120.0, 70.0), Some(ColorIndex::RED));
}

#[test]
fn heptagram_dots_sit_on_top_of_their_chords() {
    let c = cfg();
    let p = rotating_heptagram(&c).unwrap();
    assert_eq!(p.order(), HitOrder::FirstHit);

    let dot = match p.shapes_at(0)[0] {
        Shape::Circle(dot) => dot,
        other => panic!("expected a dot first, got {}", other.kind_name()),
    };
    assert_eq!(
        p.evaluate(0, dot.center.x, dot.center.y),
        Some(ColorIndex::BLACK)
    );

    let chords = &p.shapes_at(0)[HEPTAGRAM_ORBITS..];
    assert!(chords.iter().all(|s| matches!(s, Shape::Line(_))));
    let blue = chords.iter().filter(|s| matches!(s, Shape::Line(l) if l.color == ColorIndex::BLUE));
    assert_eq!(blue.count(), HEPTAGRAM_ORBITS);
}

#[test]
fn single_cross_is_static() {
    let p = Variant::Cross.build(&cfg()).unwrap();
    for step in [0, 60, 119] {
        assert_eq!(p.evaluate(step, 120.0, 120.0), Some(ColorIndex::BLACK));
        assert_eq!(p.evaluate(step, 134.0, 120.0), Some(ColorIndex::BLACK));
        assert_eq!(p.evaluate(step, 134.0, 134.0), None);
    }
}

#[test]
fn crosses_layer_blue_over_red() {
    let p = Variant::Crosses.build(&cfg()).unwrap();
    assert_eq!(p.evaluate(0, 30.0, 30.0), Some(ColorIndex::RED));
    assert_eq!(p.evaluate(0, 60.0, 60.0), Some(ColorIndex::BLUE));
    // Red arm from (30, 30) and blue arm from (60, 0) both cover this pixel.
    assert_eq!(p.evaluate(0, 55.0, 25.0), Some(ColorIndex::BLUE));
    assert_eq!(p.evaluate(0, 30.0, 0.0), None);
}

#[test]
fn crosses_turn_in_opposite_directions() {
    let c = cfg();
    let red = cross_lattice(&c, CROSS_CELL / 2.0, 1.0, ColorIndex::RED).unwrap();
    let blue = cross_lattice(&c, 0.0, -1.0, ColorIndex::BLUE).unwrap();
    let rotation = |p: &Pattern, step| match p.shapes_at(step)[0] {
        Shape::EqualArmedCross(x) => x.rotation,
        other => panic!("unexpected {}", other.kind_name()),
    };
    assert_eq!(rotation(&red, 0), 0.0);
    assert!(rotation(&red, 60) > 0.0);
    assert!(rotation(&blue, 60) < 0.0);
    assert!((rotation(&red, 60) + rotation(&blue, 60)).abs() < 1e-12);
}
