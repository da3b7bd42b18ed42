//! Overlay layer: paints a view's context-action widgets.

use egui::{Id, Pos2, Ui, pos2};
use touchview_core::{OverlayKind, OverlayWidget, WidgetId};

use crate::buttons::{OverlayButtonStyle, OverlayIconButton, OverlayTextButton};

/// Convert a surface rect to screen space, given the surface origin.
pub fn to_egui_rect(rect: kurbo::Rect, origin: Pos2) -> egui::Rect {
    let rect = rect.abs();
    egui::Rect::from_min_max(
        pos2(origin.x + rect.x0 as f32, origin.y + rect.y0 as f32),
        pos2(origin.x + rect.x1 as f32, origin.y + rect.y1 as f32),
    )
}

/// Paints overlay widgets on top of the transient surface.
///
/// ```ignore
/// if let Some(widget) = OverlayLayer::new(view.overlays()).origin(rect.min).show(ui) {
///     view.activate_overlay(widget)?;
/// }
/// ```
pub struct OverlayLayer<'a> {
    widgets: &'a [OverlayWidget],
    origin: Pos2,
    style: OverlayButtonStyle,
}

impl<'a> OverlayLayer<'a> {
    pub fn new(widgets: &'a [OverlayWidget]) -> Self {
        Self {
            widgets,
            origin: Pos2::ZERO,
            style: OverlayButtonStyle::default(),
        }
    }

    /// Screen position of the transient surface's top-left corner.
    pub fn origin(mut self, origin: Pos2) -> Self {
        self.origin = origin;
        self
    }

    /// Set the button style.
    pub fn style(mut self, style: OverlayButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Paint every widget and return the one clicked this frame, if any.
    ///
    /// The caller passes the result to the view's overlay activation, which
    /// dismisses the whole set.
    pub fn show(self, ui: &mut Ui) -> Option<WidgetId> {
        let mut clicked = None;

        for widget in self.widgets {
            let rect = to_egui_rect(widget.rect, self.origin);
            let id = Id::new(("touchview_overlay", widget.id));
            let caption = widget.caption.unwrap_or_default();

            let hit = match &widget.kind {
                OverlayKind::Icon(icon) => OverlayIconButton::new(id, rect, &icon.uri, caption)
                    .style(self.style.clone())
                    .show(ui),
                OverlayKind::TextButton => OverlayTextButton::new(id, rect, caption)
                    .style(self.style.clone())
                    .show(ui),
            };

            if hit && clicked.is_none() {
                log::debug!("Overlay widget {} (action {}) clicked", widget.id, widget.action);
                clicked = Some(widget.id);
            }
        }

        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, PointerButton, RawInput, vec2};
    use kurbo::Point;
    use touchview_core::Icon;

    fn text_button(id: WidgetId, rect: kurbo::Rect) -> OverlayWidget {
        OverlayWidget {
            id,
            action: 5,
            kind: OverlayKind::TextButton,
            anchor: rect.center(),
            rect,
            caption: Some("Delete"),
        }
    }

    fn input(events: Vec<Event>) -> RawInput {
        RawInput {
            screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            events,
            ..Default::default()
        }
    }

    fn frame(ctx: &egui::Context, widgets: &[OverlayWidget], events: Vec<Event>) -> Option<WidgetId> {
        let mut clicked = None;
        let _ = ctx.run(input(events), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                clicked = OverlayLayer::new(widgets).show(ui);
            });
        });
        clicked
    }

    #[test]
    fn test_rect_conversion() {
        let rect = to_egui_rect(kurbo::Rect::new(10.0, 20.0, 50.0, 44.0), pos2(100.0, 5.0));
        assert_eq!(rect, egui::Rect::from_min_max(pos2(110.0, 25.0), pos2(150.0, 49.0)));
    }

    #[test]
    fn test_rect_conversion_normalizes() {
        let rect = to_egui_rect(kurbo::Rect::new(50.0, 44.0, 10.0, 20.0), Pos2::ZERO);
        assert_eq!(rect.min, pos2(10.0, 20.0));
        assert_eq!(rect.max, pos2(50.0, 44.0));
    }

    #[test]
    fn test_no_input_no_click() {
        let ctx = egui::Context::default();
        let icon = Icon::new("bytes://delete.png", kurbo::Size::new(32.0, 32.0));
        let widgets = vec![
            text_button(1, kurbo::Rect::from_center_size(Point::new(100.0, 100.0), (90.0, 24.0))),
            OverlayWidget {
                id: 2,
                action: 6,
                kind: OverlayKind::Icon(icon),
                anchor: Point::new(200.0, 100.0),
                rect: kurbo::Rect::from_center_size(Point::new(200.0, 100.0), (32.0, 32.0)),
                caption: Some("Clone"),
            },
        ];

        assert_eq!(frame(&ctx, &widgets, Vec::new()), None);
    }

    #[test]
    fn test_empty_layer() {
        let ctx = egui::Context::default();
        assert_eq!(frame(&ctx, &[], Vec::new()), None);
    }

    #[test]
    fn test_click_reports_widget() {
        let ctx = egui::Context::default();
        let widgets = vec![
            text_button(7, kurbo::Rect::new(100.0, 100.0, 190.0, 124.0)),
            text_button(8, kurbo::Rect::new(300.0, 100.0, 390.0, 124.0)),
        ];
        let target = pos2(145.0, 112.0);
        let press = |pressed| Event::PointerButton {
            pos: target,
            button: PointerButton::Primary,
            pressed,
            modifiers: Default::default(),
        };

        let mut results = Vec::new();
        results.push(frame(&ctx, &widgets, vec![Event::PointerMoved(target)]));
        results.push(frame(&ctx, &widgets, vec![Event::PointerMoved(target)]));
        results.push(frame(&ctx, &widgets, vec![press(true)]));
        results.push(frame(&ctx, &widgets, vec![press(false)]));

        let clicked: Vec<WidgetId> = results.into_iter().flatten().collect();
        assert_eq!(clicked, vec![7]);
    }
}
