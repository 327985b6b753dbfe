use crate::app::App;
use condense_map::braille::BrailleCanvas;
use condense_map::map::MapLayers;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Markets ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport);

    let cursor_pos = app.mouse_pixel_pos().and_then(|(px, py)| {
        let cx = (px / 2) as u16;
        let cy = (py / 4) as u16;
        (cx < inner.width && cy < inner.height).then_some((cx, cy))
    });

    frame.render_widget(MapWidget { layers, cursor_pos }, inner);
}

/// Braille layers stacked back to front
struct MapWidget {
    layers: MapLayers,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate().take(area.height as usize) {
            let y = area.y + row_idx as u16;
            for (col_idx, ch) in row_str.chars().enumerate().take(area.width as usize) {
                // blank braille cell, keep whatever is underneath
                if ch == '\u{2800}' {
                    continue;
                }
                buf[(area.x + col_idx as u16, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_layer(&self.layers.outline, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.markers, Color::Yellow, area, buf);
        Self::render_layer(&self.layers.circles, Color::Cyan, area, buf);

        if let Some((cx, cy)) = self.cursor_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let renderer = &app.map_renderer;
    let settings = &renderer.settings;
    let dim = Style::default().fg(Color::DarkGray);
    let toggle = |on: bool| Style::default().fg(if on { Color::Green } else { Color::DarkGray });

    let status = Line::from(vec![
        Span::styled(format!(" {} circles", renderer.centers().len()), Style::default().fg(Color::Cyan)),
        Span::styled(format!(" / {} markers ", renderer.markers().len()), dim),
        Span::styled("| scan ", dim),
        Span::styled(renderer.scan_radius().to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(" +", dim),
        Span::styled(renderer.radius_increase().to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(" | zoom ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Magenta)),
        Span::styled(" | ", dim),
        Span::styled(if settings.show_outline { "[O]utline " } else { "[o]utline " }, toggle(settings.show_outline)),
        Span::styled(if settings.show_circles { "[C]ircles " } else { "[c]ircles " }, toggle(settings.show_circles)),
        Span::styled(if settings.show_markers { "[M]arkers " } else { "[m]arkers " }, toggle(settings.show_markers)),
        Span::styled("| ", dim),
        Span::styled(app.cursor_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | []:scan {}:increase R:radii r:reset q:quit", dim),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
