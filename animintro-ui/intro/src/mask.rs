use std::sync::{Mutex, PoisonError};

use iced::Size;
use iced::widget::svg;

use crate::fetch::RemoteImage;

/// Rounded size and viewport of one title frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameKey {
    title_px: u32,
    width: u32,
    height: u32,
}

impl FrameKey {
    fn new(title_size: f32, viewport: Size) -> Self {
        Self {
            title_px: title_size.round().max(0.0) as u32,
            width: viewport.width.round().max(1.0) as u32,
            height: viewport.height.round().max(1.0) as u32,
        }
    }
}

/// Last masked-title frame of one screen.
///
/// The title is rounded to whole pixels, so consecutive animation ticks and
/// every frame after the growth ends draw the same handle instead of
/// re-parsing the picture payload.
#[derive(Default)]
pub(crate) struct MaskCache {
    last: Mutex<Option<(FrameKey, svg::Handle)>>,
}

impl MaskCache {
    pub(crate) fn handle(
        &self,
        image: &RemoteImage,
        title: &str,
        title_size: f32,
        viewport: Size,
        offset_y: f32,
    ) -> svg::Handle {
        let key = FrameKey::new(title_size, viewport);
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((_, handle)) =
            last.as_ref().filter(|(cached, _)| *cached == key)
        {
            return handle.clone();
        }

        let document = masked_title_svg(
            image,
            title,
            key.title_px as f32,
            Size::new(key.width as f32, key.height as f32),
            offset_y,
        );
        let handle = svg::Handle::from_memory(document.into_bytes());
        *last = Some((key, handle.clone()));
        handle
    }
}

/// Build an SVG document of `image` clipped to the uppercase `title`.
///
/// The document covers `viewport`; the picture fills it (cropping the
/// overflow) and the title is centred horizontally, `offset_y` pixels away
/// from the vertical centre. An empty title or a non-positive size yields an
/// empty document, so nothing of the picture shows through.
pub(crate) fn masked_title_svg(
    image: &RemoteImage,
    title: &str,
    title_size: f32,
    viewport: Size,
    offset_y: f32,
) -> String {
    let width = viewport.width.max(1.0);
    let height = viewport.height.max(1.0);
    let label = escape_xml(&title.trim().to_uppercase());

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    if !label.is_empty() && title_size > 0.0 {
        let x = width / 2.0;
        let y = height / 2.0 + offset_y;
        svg.push_str(&format!(
            r#"<defs><clipPath id="title"><text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-weight="bold" font-size="{title_size}">{label}</text></clipPath></defs>"#
        ));
        svg.push_str(&format!(
            r#"<image clip-path="url(#title)" x="0" y="0" width="{width}" height="{height}" preserveAspectRatio="xMidYMid slice" xlink:href="{}"/>"#,
            image.data_url()
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::fetch::prepare_image;

    fn remote_image() -> RemoteImage {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([0, 0, 0])))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode");
        prepare_image(&bytes).expect("prepared")
    }

    #[test]
    fn given_title_when_composing_then_clips_image_with_uppercase_text() {
        let image = remote_image();
        let svg = masked_title_svg(
            &image,
            "hello",
            80.0,
            Size::new(800.0, 600.0),
            -100.0,
        );

        assert!(svg.contains(">HELLO</text>"));
        assert!(svg.contains(r#"font-size="80""#));
        assert!(svg.contains(r#"x="400" y="200""#));
        assert!(svg.contains(r#"clip-path="url(#title)""#));
        assert!(svg.contains(image.data_url()));
    }

    #[test]
    fn given_same_rounded_size_and_viewport_then_frames_share_one_handle() {
        let image = remote_image();
        let cache = MaskCache::default();
        let viewport = Size::new(800.0, 600.0);

        let first = cache.handle(&image, "hello", 40.2, viewport, -100.0);
        let second = cache.handle(&image, "hello", 39.8, viewport, -100.0);

        assert_eq!(first.id(), second.id());
        assert!(std::ptr::eq(first.data(), second.data()));
    }

    #[test]
    fn given_new_size_or_viewport_then_frame_is_rebuilt() {
        let image = remote_image();
        let cache = MaskCache::default();
        let viewport = Size::new(800.0, 600.0);

        let small = cache.handle(&image, "hello", 40.0, viewport, 0.0);
        let large = cache.handle(&image, "hello", 41.0, viewport, 0.0);
        let resized =
            cache.handle(&image, "hello", 41.0, Size::new(640.0, 480.0), 0.0);

        assert_ne!(small.id(), large.id());
        assert_ne!(large.id(), resized.id());
    }

    #[test]
    fn given_markup_in_title_when_composing_then_escapes_it() {
        let svg = masked_title_svg(
            &remote_image(),
            "a<b & \"c\"",
            40.0,
            Size::new(100.0, 100.0),
            0.0,
        );

        assert!(svg.contains("A&lt;B &amp; &quot;C&quot;"));
    }

    #[test]
    fn given_empty_title_or_zero_size_then_document_is_empty() {
        let image = remote_image();
        let viewport = Size::new(100.0, 100.0);

        for svg in [
            masked_title_svg(&image, "   ", 80.0, viewport, 0.0),
            masked_title_svg(&image, "hello", 0.0, viewport, 0.0),
        ] {
            assert!(!svg.contains("<image"));
            assert!(svg.ends_with("</svg>"));
        }
    }
}
