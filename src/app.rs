use condense_map::map::{MapRenderer, Viewport};
use condense_map::Settings;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub settings: Settings,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    pub fn new(map_renderer: MapRenderer, settings: Settings, width: usize, height: usize) -> Self {
        let (pixel_width, pixel_height) = Self::pixel_size(width, height);
        let (canvas_width, canvas_height) = settings.canvas_size();

        Self {
            viewport: Viewport::fit(canvas_width, canvas_height, pixel_width, pixel_height),
            map_renderer,
            settings,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
        }
    }

    /// Braille pixel size of the map area for a terminal of the given size.
    /// Accounts for the border (2 columns, 2 rows) and the status bar (1 row).
    fn pixel_size(width: usize, height: usize) -> (usize, usize) {
        (width.saturating_sub(2) * 2, height.saturating_sub(3) * 4)
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pixel_width, pixel_height) = Self::pixel_size(width, height);
        self.viewport.width = pixel_width;
        self.viewport.height = pixel_height;
    }

    /// Show the whole canvas again
    pub fn reset_view(&mut self) {
        let (canvas_width, canvas_height) = self.settings.canvas_size();
        self.viewport = Viewport::fit(canvas_width, canvas_height, self.viewport.width, self.viewport.height);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    /// Terminal cell to braille pixel, skipping the 1-cell border
    fn to_pixel(col: u16, row: u16) -> (i32, i32) {
        ((col.saturating_sub(1) as i32) * 2, (row.saturating_sub(1) as i32) * 4)
    }

    pub fn scan_radius_up(&mut self) {
        self.map_renderer.adjust_scan_radius(1);
    }

    pub fn scan_radius_down(&mut self) {
        self.map_renderer.adjust_scan_radius(-1);
    }

    pub fn radius_increase_up(&mut self) {
        self.map_renderer.adjust_radius_increase(1);
    }

    pub fn radius_increase_down(&mut self) {
        self.map_renderer.adjust_radius_increase(-1);
    }

    /// Restore the configured radii
    pub fn reset_radii(&mut self) {
        self.map_renderer
            .set_radii(self.settings.scan_radius, self.settings.radius_increase);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Canvas coordinates under the mouse
    pub fn cursor_coords(&self) -> String {
        match self.mouse_pixel_pos() {
            Some((px, py)) => {
                let p = self.viewport.unproject(px, py);
                format!("{:.0},{:.0}", p.x, p.y)
            }
            None => "-".to_string(),
        }
    }

    /// Pan by the distance dragged since the last mouse event
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            self.pan(dx * 2, dy * 4);
        }
        self.last_mouse = Some((x, y));
    }

    /// Reset drag state when mouse button released
    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Get mouse position in braille pixel coordinates
    pub fn mouse_pixel_pos(&self) -> Option<(i32, i32)> {
        self.mouse_pos.map(|(col, row)| Self::to_pixel(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let settings = Settings::default();
        let mut renderer = MapRenderer::new(&settings);
        renderer.set_markers(&[(13.40, 52.50), (13.45, 52.50)]);
        App::new(renderer, settings, 82, 43)
    }

    #[test]
    fn test_viewport_sized_from_terminal() {
        let app = app();
        assert_eq!(app.viewport.width, 160);
        assert_eq!(app.viewport.height, 160);
    }

    #[test]
    fn test_radius_keys_recondense() {
        let mut app = app();
        assert_eq!(app.map_renderer.centers().len(), 2);
        for _ in 0..40 {
            app.scan_radius_up();
        }
        assert_eq!(app.map_renderer.scan_radius(), 44);
        assert_eq!(app.map_renderer.centers().len(), 1);
        app.reset_radii();
        assert_eq!(app.map_renderer.scan_radius(), 4);
        assert_eq!(app.map_renderer.centers().len(), 2);
    }

    #[test]
    fn test_reset_view() {
        let mut app = app();
        app.zoom_in();
        app.pan(30, 10);
        app.reset_view();
        assert_eq!(app.viewport.zoom, 1.0);
        assert_eq!(app.viewport.width, 160);
    }
}
