//! egui presentation of TouchView context-action overlays.
//!
//! This crate paints the overlay widgets a view exposes on its transient
//! surface and reports which one was clicked:
//!
//! - **Overlay**: the [`OverlayLayer`] over a view's current widgets
//! - **Buttons**: icon and text buttons placed at a fixed rect

pub mod buttons;
pub mod overlay;

pub use buttons::{OverlayButtonStyle, OverlayIconButton, OverlayTextButton};
pub use overlay::{OverlayLayer, to_egui_rect};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Icon inset inside its button rect
    pub const ICON_PADDING: f32 = 4.0;
    /// Text button font size
    pub const FONT_SIZE: f32 = 12.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Accent color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Button background
    pub const BUTTON_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 240);
}
