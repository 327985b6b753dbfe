//! SVG export of the outline and the condensed circles.

use crate::condense::CondensedCenter;
use crate::geo::Point;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

const STROKE: &str = "black";
const STROKE_WIDTH: f64 = 1.0;

/// Build an SVG document of `width` x `height` canvas units.
/// Each ring becomes a closed path, each center a circle with diameter equal to its radius.
pub fn to_svg(outline: &[Vec<Point>], centers: &[CondensedCenter], width: f64, height: f64) -> String {
    format!(
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">
<g fill="none" stroke="{STROKE}" stroke-width="{STROKE_WIDTH}">
{outline}{circles}</g>
</svg>
"#,
        outline = outline_paths(outline),
        circles = circles(centers),
    )
}

/// Write the SVG to `path`, creating the parent directory if needed
pub fn write_svg(
    path: &Path,
    outline: &[Vec<Point>],
    centers: &[CondensedCenter],
    width: f64,
    height: f64,
) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, to_svg(outline, centers, width, height))
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), circles = centers.len(), "wrote svg");
    Ok(())
}

fn outline_paths(outline: &[Vec<Point>]) -> String {
    outline
        .iter()
        .filter(|ring| !ring.is_empty())
        .fold(String::new(), |mut acc, ring| {
            acc.push_str("<path d=\"");
            for (i, p) in ring.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(acc, "{cmd}{:.3},{:.3} ", p.x, p.y);
            }
            acc.push_str("Z\"/>\n");
            acc
        })
}

fn circles(centers: &[CondensedCenter]) -> String {
    centers.iter().fold(String::new(), |mut acc, c| {
        let _ = writeln!(
            acc,
            r#"<circle cx="{:.3}" cy="{:.3}" r="{}"/>"#,
            c.center.x,
            c.center.y,
            c.radius as f64 / 2.0
        );
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_contents() {
        let outline = vec![vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.5)]];
        let centers = vec![
            CondensedCenter {
                center: Point::new(3.0, 4.0),
                radius: 6,
            },
            CondensedCenter {
                center: Point::new(1.25, 2.0),
                radius: 5,
            },
        ];
        let svg = to_svg(&outline, &centers, 710.0, 584.21875);
        assert!(svg.starts_with("<svg width=\"710\" height=\"584.21875\""));
        assert!(svg.contains("<path d=\"M0.000,0.000 L10.000,0.000 L10.000,5.500 Z\"/>"));
        assert!(svg.contains(r#"<circle cx="3.000" cy="4.000" r="3"/>"#));
        assert!(svg.contains(r#"<circle cx="1.250" cy="2.000" r="2.5"/>"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_write_svg_creates_directory() {
        let dir = std::env::temp_dir().join(format!("condense-map-svg-{}", std::process::id()));
        let path = dir.join("out").join("sketch.svg");
        let centers = vec![CondensedCenter {
            center: Point::new(5.0, 5.0),
            radius: 4,
        }];

        write_svg(&path, &[], &centers, 20.0, 20.0).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_svg(&[], &centers, 20.0, 20.0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_svg_error_names_path() {
        let dir = std::env::temp_dir().join(format!("condense-map-svg-err-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        // a file where the parent directory should be
        let blocker = dir.join("taken");
        fs::write(&blocker, b"").unwrap();
        let err = write_svg(&blocker.join("sketch.svg"), &[], &[], 10.0, 10.0).unwrap_err();
        assert!(format!("{:#}", err).contains("taken"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_document() {
        let svg = to_svg(&[vec![]], &[], 10.0, 10.0);
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<circle"));
    }
}
