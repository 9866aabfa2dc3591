use super::*;
use crate::foundation::core::Point;
use crate::pattern::stepped::Pattern;
use crate::shape::primitives::{Circle, LineSegment};

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn uncovered_pixels_take_the_background() {
    let pattern = Pattern::from_fn(1, |_| Ok(vec![])).unwrap();
    let frame = render_step(canvas(4, 3), 0, &pattern, &RenderSettings::default()).unwrap();
    assert_eq!(frame.indices.len(), 12);
    assert_eq!(frame.count(ColorIndex::WHITE), 12);

    let settings = RenderSettings {
        background: ColorIndex::YELLOW,
    };
    let frame = render_step(canvas(4, 3), 0, &pattern, &settings).unwrap();
    assert_eq!(frame.count(ColorIndex::YELLOW), 12);
}

#[test]
fn frame_is_row_major() {
    let pattern = Pattern::from_fn(1, |_| {
        Ok(vec![
            LineSegment::new(Point::new(0.0, 1.0), Point::new(4.0, 1.0), ColorIndex::RED)?
                .into(),
        ])
    })
    .unwrap();
    let frame = render_step(canvas(5, 3), 0, &pattern, &RenderSettings::default()).unwrap();
    for x in 0..5 {
        assert_eq!(frame.get(x, 0), Some(ColorIndex::WHITE));
        assert_eq!(frame.get(x, 1), Some(ColorIndex::RED));
        assert_eq!(frame.get(x, 2), Some(ColorIndex::WHITE));
    }
    assert_eq!(frame.indices[5..10], [ColorIndex::RED; 5]);
    assert_eq!(frame.get(5, 0), None);
}

#[test]
fn render_step_checks_step_range() {
    let pattern = Pattern::from_fn(2, |_| Ok(vec![])).unwrap();
    let err = render_step(canvas(2, 2), 2, &pattern, &RenderSettings::default()).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn render_step_rejects_empty_canvas() {
    let pattern = Pattern::from_fn(1, |_| Ok(vec![])).unwrap();
    let zero = Canvas {
        width: 0,
        height: 4,
    };
    assert!(render_step(zero, 0, &pattern, &RenderSettings::default()).is_err());
}

#[test]
fn centered_disc_renders_symmetric_coverage() {
    let pattern =
        Pattern::from_fn(1, |_| Ok(vec![Circle::new(Point::new(10.0, 10.0), 3.0)?.into()]))
            .unwrap();
    let frame = render_step(canvas(21, 21), 0, &pattern, &RenderSettings::default()).unwrap();
    // Lattice points within distance 3 of the center.
    assert_eq!(frame.count(ColorIndex::BLACK), 29);
    assert_eq!(frame.get(13, 10), Some(ColorIndex::BLACK));
    assert_eq!(frame.get(10, 7), Some(ColorIndex::BLACK));
    assert_eq!(frame.get(13, 13), Some(ColorIndex::WHITE));
}

#[test]
fn rgba_expansion_goes_through_the_palette() {
    let mut frame = IndexedFrame::filled(canvas(2, 1), ColorIndex::BLUE);
    frame.indices[1] = ColorIndex::RED;
    let rgba = frame.to_rgba8(&Palette::standard()).unwrap();
    assert_eq!(rgba, vec![0, 0, 255, 255, 255, 0, 0, 255]);

    frame.indices[0] = ColorIndex(9);
    assert!(frame.to_rgba8(&Palette::standard()).is_err());
}
