mod growing_line;
mod starburst;

pub use growing_line::GrowingLine;
pub use starburst::Starburst;

use serde::{Deserialize, Serialize};

use crate::raster::Rasterizer;

/// Trait for everything the render loop can draw once per frame
pub trait RenderPass: Send {
    /// Advance animation state (called once per frame, before `render`)
    /// - width/height: buffer dimensions
    fn update(&mut self, width: u32, height: u32);

    /// Draw into the live buffer. The buffer is already cleared.
    fn render(&self, raster: &mut Rasterizer);

    /// Pass name for logs
    fn name(&self) -> &str;
}

/// Selectable render passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassKind {
    #[default]
    GrowingLine,
    Starburst,
}

impl PassKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "growing-line" | "line" => Some(Self::GrowingLine),
            "starburst" | "star" => Some(Self::Starburst),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn RenderPass> {
        match self {
            Self::GrowingLine => Box::new(GrowingLine::new()),
            Self::Starburst => Box::new(Starburst::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_names() {
        assert_eq!(PassKind::from_name("growing-line"), Some(PassKind::GrowingLine));
        assert_eq!(PassKind::from_name(" Starburst "), Some(PassKind::Starburst));
        assert_eq!(PassKind::from_name("plasma"), None);
        assert_eq!(PassKind::GrowingLine.build().name(), "Growing Line");
        assert_eq!(PassKind::Starburst.build().name(), "Starburst");
    }

    #[test]
    fn test_pass_kind_serde_names() {
        let kind: PassKind = serde_json::from_str("\"starburst\"").unwrap();
        assert_eq!(kind, PassKind::Starburst);
        assert_eq!(
            serde_json::to_string(&PassKind::GrowingLine).unwrap(),
            "\"growing-line\""
        );
    }
}
