//! SVG render surface.
//!
//! Each frame is drawn as a standalone SVG document: the connecting lines
//! first, then the nodes from back to front. Every node is wrapped in a link
//! that opens in a new browsing context, so the static image stays clickable
//! without any script.

use std::fmt::Write;

use super::camera::Viewport;
use super::scene::{Frame, BACKGROUND_COLOR, LINE_COLOR, LINE_OPACITY, NODE_COLOR};
use crate::traits::{RenderSurface, SurfaceError};
use crate::ui::escape_html;

/// Renders frames into an in-memory SVG document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    viewport: Option<Viewport>,
    document: Option<String>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Take the most recent frame, leaving the surface empty.
    pub fn take_document(&mut self) -> Option<String> {
        self.document.take()
    }
}

impl RenderSurface for SvgSurface {
    fn attach(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        if self.viewport.is_some() {
            return Err(SurfaceError::AlreadyAttached);
        }
        self.viewport = Some(viewport);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.viewport.is_some() {
            self.viewport = Some(viewport);
        }
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        if self.viewport.is_none() {
            return Err(SurfaceError::Detached);
        }
        let document =
            render_svg(frame).map_err(|e| SurfaceError::RenderFailed(e.to_string()))?;
        self.document = Some(document);
        Ok(())
    }

    fn detach(&mut self) {
        self.viewport = None;
        self.document = None;
    }

    fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }
}

/// Draw one frame as an SVG document.
pub fn render_svg(frame: &Frame<'_>) -> Result<String, std::fmt::Error> {
    let viewport = frame.viewport;
    let camera = frame.camera;
    let mut out = String::with_capacity(256 + frame.scene.nodes().len() * 200);

    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" role="img" aria-label="Folder spiral">"#,
        w = viewport.width,
        h = viewport.height,
    )?;
    out.push_str(
        r##"<defs><radialGradient id="node-shade" cx="50%" cy="50%" fx="65%" fy="35%" r="60%"><stop offset="0%" stop-color="#b3ffb3"/><stop offset="45%" stop-color=""##,
    );
    out.push_str(NODE_COLOR);
    out.push_str(r##""/><stop offset="100%" stop-color="#006600"/></radialGradient></defs>"##);
    write!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        BACKGROUND_COLOR
    )?;

    let projected: Vec<_> = frame
        .scene
        .nodes()
        .iter()
        .map(|node| camera.project(node.position))
        .collect();

    out.push_str(r#"<g class="segments">"#);
    for segment in &frame.scene.layout.segments {
        let (Some(Some(a)), Some(Some(b))) = (projected.get(segment.from), projected.get(segment.to))
        else {
            continue;
        };
        let (x1, y1) = viewport.from_ndc(a.ndc_x, a.ndc_y);
        let (x2, y2) = viewport.from_ndc(b.ndc_x, b.ndc_y);
        write!(
            out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{}" stroke-width="1.5"/>"#,
            x1, y1, x2, y2, LINE_COLOR, LINE_OPACITY
        )?;
    }
    out.push_str("</g>");

    // Far nodes first so near ones paint over them.
    let mut order: Vec<_> = projected
        .iter()
        .enumerate()
        .filter_map(|(index, p)| p.map(|p| (index, p)))
        .collect();
    order.sort_by(|(_, a), (_, b)| b.depth.total_cmp(&a.depth));

    out.push_str(r#"<g class="nodes">"#);
    for (index, p) in order {
        let Some(node) = frame.scene.node(index) else {
            continue;
        };
        let (cx, cy) = viewport.from_ndc(p.ndc_x, p.ndc_y);
        let r = camera.projected_radius(frame.scene.node_radius, p.depth, &viewport);
        write!(
            out,
            r#"<a href="{link}" target="_blank" rel="noopener noreferrer"><title>{name}</title><circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="url(#node-shade)" data-folder="{id}"/></a>"#,
            link = escape_html(&node.link),
            name = escape_html(&node.name),
            id = node.folder_id,
        )?;
    }
    out.push_str("</g></svg>");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiral::camera::PerspectiveCamera;
    use crate::spiral::layout::SpiralInput;
    use crate::spiral::scene::Scene;

    fn scene(names: &[&str]) -> Scene {
        let folders: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| SpiralInput {
                id: i as i64 + 1,
                name: name.to_string(),
                url: None,
            })
            .collect();
        Scene::build(&folders)
    }

    fn draw(scene: &Scene, width: f64) -> String {
        let viewport = Viewport::with_width(width);
        let camera = PerspectiveCamera::new(viewport.aspect());
        render_svg(&Frame {
            scene,
            camera: &camera,
            viewport,
            number: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_draws_nodes_and_segments() {
        let svg = draw(&scene(&["Docs", "Music", "Photos"]), 900.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="900" height="600""#));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains(r#"href="https://example.com/folder/2" target="_blank""#));
    }

    #[test]
    fn test_escapes_names() {
        let svg = draw(&scene(&["<script>"]), 900.0);
        assert!(svg.contains("&lt;script&gt;"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_empty_scene_has_no_nodes() {
        let svg = draw(&scene(&[]), 900.0);
        assert!(!svg.contains("<circle"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_surface_lifecycle() {
        let scene = scene(&["Docs"]);
        let viewport = Viewport::with_width(640.0);
        let camera = PerspectiveCamera::new(viewport.aspect());
        let frame = Frame {
            scene: &scene,
            camera: &camera,
            viewport,
            number: 1,
        };

        let mut surface = SvgSurface::new();
        assert_eq!(surface.render(&frame), Err(SurfaceError::Detached));

        surface.attach(viewport).unwrap();
        assert_eq!(surface.attach(viewport), Err(SurfaceError::AlreadyAttached));
        surface.render(&frame).unwrap();
        assert!(surface.document().unwrap().contains("<circle"));

        surface.detach();
        assert!(!surface.is_attached());
        assert!(surface.document().is_none());
        surface.detach();
    }
}
