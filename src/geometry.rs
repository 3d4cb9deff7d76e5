//! Pure dial geometry: maps an angle to a graduation tick segment and a
//! label rectangle. No rendering, no font access — text sizes are injected
//! by the caller so everything here stays testable arithmetic.

/// A point in framebuffer coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width * 0.5,
            y: center.y - height * 0.5,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// The semicircular arc: centered at the bottom-middle of its frame, spanning
/// 180 degrees from the left endpoint to the right one.
#[derive(Debug, Clone, Copy)]
pub struct DialSpec {
    pub radius: f64,
    pub center: Point,
    pub stroke_width: f64,
}

impl DialSpec {
    /// Lays the dial out inside a frame: radius is half the width minus the
    /// inset, center sits at the bottom-middle so the half-circle fills the
    /// upper part of the frame.
    pub fn from_frame(width: f64, height: f64, inset: f64, stroke_width: f64) -> Self {
        Self {
            radius: (width * 0.5 - inset).max(0.0),
            center: Point::new(width * 0.5, height),
            stroke_width,
        }
    }

    /// The two endpoints of the arc, at angles pi (left) and 0 (right).
    pub fn endpoints(&self) -> (Point, Point) {
        (
            Point::new(self.center.x - self.radius, self.center.y),
            Point::new(self.center.x + self.radius, self.center.y),
        )
    }

    /// Radius at which the graduation tick starts: the inner half of the
    /// stroke belongs to the arc band.
    pub fn inner_graduation_radius(&self) -> f64 {
        self.radius - self.stroke_width * 0.5
    }
}

/// Graduation tick dimensions and label spacing.
#[derive(Debug, Clone, Copy)]
pub struct GraduationSpec {
    pub length: f64,
    pub width: f64,
    pub text_padding: f64,
}

/// One graduation, fully laid out. Recomputed from scratch on every angle
/// change; nothing here carries identity between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct GraduationGeometry {
    pub tick_start: Point,
    pub tick_end: Point,
    pub label_rect: Rect,
    pub label: String,
}

/// Lays out the graduation at `angle` (radians, 0 = right endpoint, pi = left
/// endpoint, counter-clockwise along the arc).
///
/// The angle is negated in the trig calls because the framebuffer y axis is
/// inverted relative to the mathematical convention; negating keeps the sweep
/// direction consistent with the arc's own drawing direction.
///
/// `text_size` is the measured (width, height) of `label` under the display
/// font; an empty label measures (0, 0) and yields a zero-size rect.
pub fn graduation_geometry(
    dial: &DialSpec,
    grad: &GraduationSpec,
    angle: f64,
    label: &str,
    text_size: (f64, f64),
) -> GraduationGeometry {
    let start_r = dial.inner_graduation_radius();
    let end_r = start_r + grad.length;

    let dir_x = (-angle).cos();
    let dir_y = (-angle).sin();

    let tick_start = Point::new(
        dial.center.x + dir_x * start_r,
        dial.center.y + dir_y * start_r,
    );
    let tick_end = Point::new(dial.center.x + dir_x * end_r, dial.center.y + dir_y * end_r);

    let (text_w, text_h) = text_size;

    // Project the label's half-extent onto the tick direction so the box just
    // clears the tick line at any angle, then push it out by the padding.
    let x_off = angle.cos().abs() * text_w * 0.5;
    let y_off = angle.sin().abs() * text_h * 0.5;
    let text_offset = (x_off * x_off + y_off * y_off).sqrt() + grad.text_padding;

    let label_center = Point::new(
        tick_end.x + dir_x * text_offset,
        tick_end.y + dir_y * text_offset,
    );

    GraduationGeometry {
        tick_start,
        tick_end,
        label_rect: Rect::centered_at(label_center, text_w, text_h),
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    fn dial() -> DialSpec {
        DialSpec {
            radius: 100.0,
            center: Point::new(200.0, 300.0),
            stroke_width: 20.0,
        }
    }

    fn grad() -> GraduationSpec {
        GraduationSpec {
            length: 50.0,
            width: 4.0,
            text_padding: 5.0,
        }
    }

    #[test]
    fn tick_at_angle_zero_points_right() {
        let g = graduation_geometry(&dial(), &grad(), 0.0, "value", (30.0, 20.0));
        // start_r = 100 - 20/2 = 90, end_r = 140
        assert_close(g.tick_start.x, 200.0 + 90.0);
        assert_close(g.tick_start.y, 300.0);
        assert_close(g.tick_end.x, 200.0 + 140.0);
        assert_close(g.tick_end.y, 300.0);
    }

    #[test]
    fn tick_length_is_graduation_length_at_any_angle() {
        for i in 0..=16 {
            let angle = PI * i as f64 / 16.0;
            let g = graduation_geometry(&dial(), &grad(), angle, "x", (10.0, 10.0));
            assert_close(g.tick_start.distance(g.tick_end), 50.0);
        }
    }

    #[test]
    fn tick_endpoints_lie_on_their_radii() {
        let d = dial();
        for i in 0..=8 {
            let angle = PI * i as f64 / 8.0;
            let g = graduation_geometry(&d, &grad(), angle, "x", (12.0, 8.0));
            assert_close(g.tick_start.distance(d.center), 90.0);
            assert_close(g.tick_end.distance(d.center), 140.0);
        }
    }

    #[test]
    fn tick_at_right_angle_points_up_in_screen_coords() {
        let g = graduation_geometry(&dial(), &grad(), PI / 2.0, "x", (10.0, 10.0));
        // y grows downward, so "up" means decreasing y away from the center
        assert!(g.tick_end.y < g.tick_start.y);
        assert!(g.tick_start.y < 300.0);
        assert_close(g.tick_start.x, 200.0);
    }

    #[test]
    fn label_clears_tick_by_at_least_the_padding() {
        for i in 0..=16 {
            let angle = PI * i as f64 / 16.0;
            let g = graduation_geometry(&dial(), &grad(), angle, "value", (34.0, 22.0));
            let dist = g.label_rect.center().distance(g.tick_end);
            assert!(dist >= 5.0 - EPS, "label too close at angle {angle}: {dist}");
        }
    }

    #[test]
    fn label_offset_at_angle_zero_is_half_width_plus_padding() {
        let g = graduation_geometry(&dial(), &grad(), 0.0, "value", (30.0, 20.0));
        // x_off = 15, y_off = 0 -> offset = 15 + 5
        let center = g.label_rect.center();
        assert_close(center.x, g.tick_end.x + 20.0);
        assert_close(center.y, g.tick_end.y);
        assert_close(g.label_rect.x, g.tick_end.x + 20.0 - 15.0);
        assert_close(g.label_rect.width, 30.0);
        assert_close(g.label_rect.height, 20.0);
    }

    #[test]
    fn empty_label_degenerates_to_zero_rect_past_the_tick() {
        let g = graduation_geometry(&dial(), &grad(), 1.0, "", (0.0, 0.0));
        assert_close(g.label_rect.width, 0.0);
        assert_close(g.label_rect.height, 0.0);
        assert_close(g.label_rect.center().distance(g.tick_end), 5.0);
    }

    #[test]
    fn degenerate_dial_collapses_to_center() {
        let d = DialSpec {
            radius: 0.0,
            center: Point::new(50.0, 50.0),
            stroke_width: 0.0,
        };
        let g = graduation_geometry(
            &d,
            &GraduationSpec {
                length: 0.0,
                width: 0.0,
                text_padding: 0.0,
            },
            0.7,
            "",
            (0.0, 0.0),
        );
        assert_close(g.tick_start.distance(d.center), 0.0);
        assert_close(g.tick_end.distance(d.center), 0.0);
        assert_close(g.label_rect.center().distance(d.center), 0.0);
    }

    #[test]
    fn frame_layout_places_center_at_bottom_middle() {
        let d = DialSpec::from_frame(600.0, 320.0, 100.0, 20.0);
        assert_close(d.radius, 200.0);
        assert_close(d.center.x, 300.0);
        assert_close(d.center.y, 320.0);
        let (left, right) = d.endpoints();
        assert_close(left.x, 100.0);
        assert_close(left.y, 320.0);
        assert_close(right.x, 500.0);
        assert_close(right.y, 320.0);
    }
}
