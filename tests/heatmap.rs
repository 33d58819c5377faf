use pitch_pulse::heatmap::{
    blend_over, heatmap_commands, rasterize, render_heatmap, DrawCommand, Palette, Point, Surface,
    BLOB_RADIUS, SURFACE_HEIGHT, SURFACE_WIDTH,
};

fn render(points: &[Point]) -> image::RgbaImage {
    render_heatmap(points, Surface::default(), &Palette::default())
}

#[test]
fn empty_trail_still_paints_background_and_pitch_lines() {
    let commands = heatmap_commands(&[], Surface::default(), &Palette::default());
    assert_eq!(commands.len(), 3);
    assert!(matches!(commands[0], DrawCommand::LinearGradient { .. }));
    assert!(matches!(commands[1], DrawCommand::StrokeRect { .. }));
    assert!(matches!(commands[2], DrawCommand::VerticalLine { .. }));

    let img = render(&[]);
    assert_eq!(img.dimensions(), (SURFACE_WIDTH, SURFACE_HEIGHT));
    assert!(img.pixels().all(|px| px[3] == 255));

    // Border and halfway line are brighter than the background next to them.
    let border = img.get_pixel(10, 180);
    let beside_border = img.get_pixel(20, 180);
    assert!(border[0] > beside_border[0] + 10);
    let halfway = img.get_pixel(320, 180);
    let beside_halfway = img.get_pixel(330, 180);
    assert!(halfway[0] > beside_halfway[0] + 10);
    let outside = img.get_pixel(5, 5);
    assert!(outside[0] < 20);
}

#[test]
fn background_runs_from_light_to_dark_corner() {
    let img = render(&[]);
    let top_left = img.get_pixel(0, 0);
    let bottom_right = img.get_pixel(SURFACE_WIDTH - 1, SURFACE_HEIGHT - 1);
    assert_eq!(&top_left.0[..3], &[0x0f, 0x2a, 0x44]);
    assert_eq!(&bottom_right.0[..3], &[0x0a, 0x1c, 0x30]);
}

#[test]
fn blobs_follow_input_order_between_background_and_lines() {
    let points = [Point::new(10.0, 10.0), Point::new(300.0, 200.0), Point::new(50.0, 90.0)];
    let commands = heatmap_commands(&points, Surface::default(), &Palette::default());
    assert_eq!(commands.len(), points.len() + 3);
    for (cmd, expected) in commands[1..=3].iter().zip(points.iter()) {
        match cmd {
            DrawCommand::RadialBlob { center, radius, .. } => {
                assert_eq!(center, expected);
                assert_eq!(*radius, BLOB_RADIUS);
            }
            other => panic!("expected blob, got {other:?}"),
        }
    }
    assert!(matches!(commands.last(), Some(DrawCommand::VerticalLine { .. })));
}

#[test]
fn repaint_is_pixel_identical() {
    let points = [Point::new(120.0, 80.0), Point::new(200.0, 120.0), Point::new(260.0, 200.0)];
    assert_eq!(render(&points), render(&points));
}

#[test]
fn blob_brightens_its_center_and_fades_out() {
    let base = render(&[]);
    let img = render(&[Point::new(200.5, 100.5)]);
    let center = img.get_pixel(200, 100);
    let palette = Palette::default();
    assert_eq!(*center, blend_over(*base.get_pixel(200, 100), palette.accent));
    // Beyond the radius nothing changes.
    assert_eq!(img.get_pixel(200, 140), base.get_pixel(200, 140));
    // Halfway out is between the two.
    let mid = img.get_pixel(214, 100);
    assert!(mid[1] > base.get_pixel(214, 100)[1]);
    assert!(mid[1] < center[1]);
}

#[test]
fn overlapping_blobs_overlay_instead_of_summing() {
    let base = render(&[]);
    let p = Point::new(200.5, 100.5);
    let twice = render(&[p, p]);
    let accent = Palette::default().accent;

    let once = blend_over(*base.get_pixel(200, 100), accent);
    let expected = blend_over(once, accent);
    assert_eq!(*twice.get_pixel(200, 100), expected);

    let summed = blend_over(*base.get_pixel(200, 100), accent.with_alpha(accent.alpha * 2.0));
    assert_ne!(*twice.get_pixel(200, 100), summed);
}

#[test]
fn lines_stay_visible_through_blobs() {
    let base = render(&[]);
    let covered = render(&[Point::new(320.0, 180.0)]);
    let line_px = covered.get_pixel(320, 180);
    let beside = covered.get_pixel(322, 180);
    assert!(line_px[0] > beside[0]);
    assert_ne!(line_px, base.get_pixel(320, 180));
}

#[test]
fn samples_near_or_off_the_edge_are_clipped() {
    let points = [
        Point::new(-40.0, -40.0),
        Point::new(0.0, 0.0),
        Point::new(650.0, 370.0),
        Point::new(f64::NAN, 12.0),
    ];
    let commands = heatmap_commands(&points, Surface::default(), &Palette::default());
    assert_eq!(commands.len(), 3 + 3);
    let img = rasterize(&commands, Surface::default());
    assert_eq!(img.dimensions(), (SURFACE_WIDTH, SURFACE_HEIGHT));
}

#[test]
fn custom_surface_sizes_are_respected() {
    let surface = Surface {
        width: 64,
        height: 36,
    };
    let img = render_heatmap(&[Point::new(32.0, 18.0)], surface, &Palette::default());
    assert_eq!(img.dimensions(), (64, 36));
}
