mod app;
mod ui;

use anyhow::{bail, Result};
use app::App;
use clap::Parser;
use condense_map::map::MapRenderer;
use condense_map::{data, svg, Settings};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "condense-map")]
#[command(about = "Draw district outlines with condensed market markers", long_about = None)]
struct Args {
    /// GeoJSON file with the district boundaries
    #[arg(short, long)]
    outline: Option<PathBuf>,

    /// JSON file with market coordinates
    #[arg(short, long)]
    markers: Option<PathBuf>,

    /// Radius of the first scan around each seed (canvas units)
    #[arg(short, long)]
    scan_radius: Option<u32>,

    /// Added to the scan radius whenever a scan finds neighbours
    #[arg(short = 'i', long)]
    radius_increase: Option<u32>,

    /// Drawable canvas width; height follows the Berlin aspect ratio
    #[arg(short, long)]
    width: Option<f64>,

    /// Write an SVG to this path instead of opening the viewer
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = match self.width {
            Some(width) => Settings::with_width(width),
            None => Settings::default(),
        };
        if let Some(ref path) = self.outline {
            settings.outline_path = path.clone();
        }
        if let Some(ref path) = self.markers {
            settings.markers_path = path.clone();
        }
        if let Some(radius) = self.scan_radius {
            settings.scan_radius = radius;
        }
        if let Some(increase) = self.radius_increase {
            settings.radius_increase = increase;
        }
        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The viewer owns the terminal, so keep stderr quiet unless asked
    let level = match (args.verbose, args.svg.is_some()) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(format!("condense_map={level}").parse()?))
        .init();

    let settings = args.settings();
    if !settings.width.is_finite() || settings.width <= 0.0 {
        bail!("--width must be a positive number");
    }

    match args.svg {
        Some(ref path) => export(&settings, path),
        None => view(settings),
    }
}

/// Headless mode: load, condense and write the SVG
fn export(settings: &Settings, path: &Path) -> Result<()> {
    let mut renderer = MapRenderer::new(settings);
    data::load_all(&mut renderer, &settings.outline_path, &settings.markers_path)?;

    let (width, height) = settings.canvas_size();
    svg::write_svg(path, renderer.outline(), renderer.centers(), width, height)?;
    println!("{} Circles drawn", renderer.centers().len());
    Ok(())
}

fn view(settings: Settings) -> Result<()> {
    // The viewer still opens when one of the two files is unusable
    let mut renderer = MapRenderer::new(&settings);
    match data::load_outline(&settings.outline_path) {
        Ok(rings) => renderer.set_outline(&rings),
        Err(e) => warn!("{:#}", e),
    }
    match data::load_markers(&settings.markers_path) {
        Ok(markers) => renderer.set_markers(&markers),
        Err(e) => warn!("{:#}", e),
    }
    if !renderer.has_data() {
        bail!(
            "nothing to draw: neither {} nor {} could be loaded",
            settings.outline_path.display(),
            settings.markers_path.display()
        );
    }

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, renderer, settings);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events for panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, renderer: MapRenderer, settings: Settings) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(renderer, settings, size.width as usize, size.height as usize);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // ~60fps poll
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                    KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                    KeyCode::Char(']') => app.scan_radius_up(),
                    KeyCode::Char('[') => app.scan_radius_down(),
                    KeyCode::Char('}') => app.radius_increase_up(),
                    KeyCode::Char('{') => app.radius_increase_down(),
                    KeyCode::Char('R') => app.reset_radii(),

                    KeyCode::Char('o') | KeyCode::Char('O') => app.map_renderer.toggle_outline(),
                    KeyCode::Char('c') | KeyCode::Char('C') => app.map_renderer.toggle_circles(),
                    KeyCode::Char('m') | KeyCode::Char('M') => app.map_renderer.toggle_markers(),

                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),
                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use condense_map::config::BERLIN_RATIO;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["condense-map"]);
        assert_eq!(args.settings(), Settings::default());
        assert!(args.svg.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::parse_from([
            "condense-map",
            "--outline",
            "shapes/districts.geojson",
            "-m",
            "shapes/markets.json",
            "--scan-radius",
            "9",
            "-i",
            "3",
            "--width",
            "1280",
            "--svg",
            "out/sketch.svg",
        ]);
        let settings = args.settings();
        assert_eq!(settings.outline_path, PathBuf::from("shapes/districts.geojson"));
        assert_eq!(settings.markers_path, PathBuf::from("shapes/markets.json"));
        assert_eq!(settings.scan_radius, 9);
        assert_eq!(settings.radius_increase, 3);
        assert_eq!(settings.width, 1280.0);
        assert_eq!(settings.height, 1280.0 * BERLIN_RATIO);
        assert_eq!(args.svg, Some(PathBuf::from("out/sketch.svg")));
    }

    #[test]
    fn test_negative_radius_rejected() {
        assert!(Args::try_parse_from(["condense-map", "--scan-radius", "-1"]).is_err());
    }
}
