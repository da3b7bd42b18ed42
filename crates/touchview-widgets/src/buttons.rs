//! Button components placed at a fixed rect: icon buttons and text buttons.
//!
//! Unlike layout-driven buttons these do not allocate space. The rect comes
//! from the overlay manager, which centers each widget on its engine anchor.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Id, Image, Rect, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// Style configuration for overlay buttons.
#[derive(Clone)]
pub struct OverlayButtonStyle {
    /// Corner radius
    pub corner_radius: u8,
    /// Background color
    pub bg_color: Color32,
    /// Background color when hovered
    pub hover_color: Color32,
    /// Border color (None = no border)
    pub border: Option<Color32>,
    /// Text color for text buttons
    pub text_color: Color32,
    /// Font size for text buttons
    pub font_size: f32,
    /// Icon inset inside the button rect
    pub icon_padding: f32,
    /// Icon tint when hovered (None = no tint)
    pub hover_icon_tint: Option<Color32>,
}

impl Default for OverlayButtonStyle {
    fn default() -> Self {
        Self {
            corner_radius: sizing::CORNER_RADIUS,
            bg_color: theme::BUTTON_BG,
            hover_color: theme::HOVER_BG,
            border: Some(theme::BORDER),
            text_color: theme::TEXT,
            font_size: sizing::FONT_SIZE,
            icon_padding: sizing::ICON_PADDING,
            hover_icon_tint: Some(theme::ACCENT),
        }
    }
}

impl OverlayButtonStyle {
    fn background(&self, ui: &Ui, rect: Rect, hovered: bool) {
        let bg_color = if hovered { self.hover_color } else { self.bg_color };
        let radius = CornerRadius::same(self.corner_radius);
        ui.painter().rect_filled(rect, radius, bg_color);
        if let Some(border) = self.border {
            ui.painter()
                .rect_stroke(rect, radius, Stroke::new(1.0, border), StrokeKind::Inside);
        }
    }
}

/// An overlay button showing an image, with its caption as tooltip.
pub struct OverlayIconButton<'a> {
    id: Id,
    rect: Rect,
    uri: &'a str,
    tooltip: &'a str,
    style: OverlayButtonStyle,
}

impl<'a> OverlayIconButton<'a> {
    /// Create an icon button at `rect`.
    pub fn new(id: Id, rect: Rect, uri: &'a str, tooltip: &'a str) -> Self {
        Self {
            id,
            rect,
            uri,
            tooltip,
            style: OverlayButtonStyle::default(),
        }
    }

    /// Set the button style.
    pub fn style(mut self, style: OverlayButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let response = ui.interact(self.rect, self.id, Sense::click());

        if ui.is_rect_visible(self.rect) {
            self.style.background(ui, self.rect, response.hovered());

            let icon_rect = self.rect.shrink(self.style.icon_padding);
            let mut image = Image::from_uri(self.uri).fit_to_exact_size(icon_rect.size());
            if response.hovered() {
                if let Some(tint) = self.style.hover_icon_tint {
                    image = image.tint(tint);
                }
            }
            image.paint_at(ui, icon_rect);
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// An overlay button showing its caption.
pub struct OverlayTextButton<'a> {
    id: Id,
    rect: Rect,
    label: &'a str,
    style: OverlayButtonStyle,
}

impl<'a> OverlayTextButton<'a> {
    /// Create a text button at `rect`.
    pub fn new(id: Id, rect: Rect, label: &'a str) -> Self {
        Self {
            id,
            rect,
            label,
            style: OverlayButtonStyle::default(),
        }
    }

    /// Set the button style.
    pub fn style(mut self, style: OverlayButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let response = ui.interact(self.rect, self.id, Sense::click());

        if ui.is_rect_visible(self.rect) {
            self.style.background(ui, self.rect, response.hovered());

            // Draw text centered
            ui.painter().text(
                self.rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(self.style.font_size),
                self.style.text_color,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
