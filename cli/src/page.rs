//! Standalone HTML document that displays presented avatars.

use std::fs;
use std::io;
use std::path::Path;

use avatar_core::{PresentError, Presenter, SurfaceRegistry};

/// Surface the demonstration renders its generated avatar into.
pub const DISPLAY_SURFACE: &str = "avatar-display";

const PLACEHOLDER: &str = "<p>Avatar will appear here...</p>";

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }\n\
    .avatar-display { border: 1px solid #ccc; padding: 10px; margin: 10px 0; }";

/// A page with one `<div>` per registered surface.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    title: String,
    surfaces: SurfaceRegistry,
}

impl HtmlPage {
    /// Creates a page with the [`DISPLAY_SURFACE`] already registered.
    pub fn new(title: &str) -> Self {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.register(DISPLAY_SURFACE, PLACEHOLDER);
        Self {
            title: title.to_string(),
            surfaces,
        }
    }

    pub fn render(&self) -> String {
        let title = escape(&self.title);
        let mut html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
        );
        for (id, content) in self.surfaces.iter() {
            html.push_str(&format!(
                "<div id=\"{}\" class=\"avatar-display\">{content}</div>\n",
                escape(id)
            ));
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }
}

impl Presenter for HtmlPage {
    fn present(&mut self, markup: &str, surface_id: &str) -> Result<(), PresentError> {
        self.surfaces.present(markup, surface_id)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
