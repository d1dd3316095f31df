//! Window configuration

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use crate::config::WindowConfig;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Window title showing the zoom value and the selected target
pub fn status_title(base: &str, zoom: f32, target: Option<&str>, xray: bool) -> String {
    let mut title = format!("{base} | zoom {:>3.0}%", zoom * 100.0);
    if let Some(target) = target {
        title.push_str(&format!(" | {target}"));
    }
    if xray {
        title.push_str(" | x-ray");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_title() {
        assert_eq!(
            status_title("Hyperzoom", 0.5, Some("house-1"), true),
            "Hyperzoom | zoom  50% | house-1 | x-ray"
        );
        assert_eq!(status_title("Hz", 0.0, None, false), "Hz | zoom   0%");
    }
}
