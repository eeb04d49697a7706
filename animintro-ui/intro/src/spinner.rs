use std::f32::consts::PI;

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, path};
use iced::{Color, Point, Radians, Rectangle, Theme, mouse};

const STROKE_WIDTH: f32 = 4.0;
const SWEEP: f32 = 1.5 * PI;

/// Busy indicator drawn as a rotating arc.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Spinner {
    angle: f32,
    color: Color,
}

impl Spinner {
    /// Spinner rotated by one turn per second of `elapsed_secs`.
    pub(crate) fn at(elapsed_secs: f32, color: Color) -> Self {
        Self {
            angle: (elapsed_secs * 2.0 * PI) % (2.0 * PI),
            color,
        }
    }
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius =
            (bounds.width.min(bounds.height) / 2.0 - STROKE_WIDTH).max(1.0);

        let arc = Path::new(|builder| {
            builder.arc(path::Arc {
                center,
                radius,
                start_angle: Radians(self.angle),
                end_angle: Radians(self.angle + SWEEP),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(self.color)
                .with_width(STROKE_WIDTH),
        );

        vec![frame.into_geometry()]
    }
}
