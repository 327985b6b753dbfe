use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel_signed(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a closed outline through the given pixel positions.
/// The last vertex is joined back to the first.
pub fn draw_polygon(canvas: &mut BrailleCanvas, vertices: &[(i32, i32)]) {
    match vertices {
        [] => {}
        [(x, y)] => canvas.set_pixel_signed(*x, *y),
        [first, .., last] => {
            for pair in vertices.windows(2) {
                draw_line(canvas, pair[0].0, pair[0].1, pair[1].0, pair[1].1);
            }
            draw_line(canvas, last.0, last.1, first.0, first.1);
        }
    }
}

/// Draw the outline of a circle (midpoint algorithm)
pub fn draw_circle_outline(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    if radius <= 0 {
        canvas.set_pixel_signed(cx, cy);
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (ox, oy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            canvas.set_pixel_signed(cx + ox, cy + oy);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a point marker (small cross)
pub fn draw_marker(canvas: &mut BrailleCanvas, x: i32, y: i32, size: i32) {
    for i in -size..=size {
        canvas.set_pixel_signed(x + i, y);
        canvas.set_pixel_signed(x, y + i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert!((0..10).all(|x| canvas.is_set(x, 0)));
        assert!(!canvas.is_set(0, 1));
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert!((0..8).all(|y| canvas.is_set(0, y)));
    }

    #[test]
    fn test_polygon_is_closed() {
        let mut canvas = BrailleCanvas::new(6, 3);
        draw_polygon(&mut canvas, &[(0, 0), (10, 0), (10, 10)]);
        // closing edge runs along the diagonal back to the origin
        assert!(canvas.is_set(5, 5));
        assert!(canvas.is_set(10, 5));
    }

    #[test]
    fn test_circle_outline_hollow() {
        let mut canvas = BrailleCanvas::new(10, 5);
        draw_circle_outline(&mut canvas, 10, 10, 5);
        assert!(canvas.is_set(15, 10));
        assert!(canvas.is_set(5, 10));
        assert!(canvas.is_set(10, 15));
        assert!(canvas.is_set(10, 5));
        assert!(!canvas.is_set(10, 10));
    }

    #[test]
    fn test_zero_radius_circle_is_a_dot() {
        let mut canvas = BrailleCanvas::new(2, 1);
        draw_circle_outline(&mut canvas, 1, 1, 0);
        assert!(canvas.is_set(1, 1));
    }
}
