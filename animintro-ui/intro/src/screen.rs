use std::time::{Duration, Instant};

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Space, button, canvas, container, image, responsive, row, stack, svg,
    text,
};
use iced::{
    Background, Border, Color, ContentFit, Element, Font, Length, Padding,
    Subscription, Task, font, task,
};

use crate::assets::{self, AssetImage, AssetResolver};
use crate::fetch::{RemoteImage, fetch_image};
use crate::icons;
use crate::mask::MaskCache;
use crate::settings::IntroSettings;
use crate::spinner::Spinner;
use crate::state::{IntroState, Phase, TimerRequest};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const SPINNER_SIZE: f32 = 48.0;
const BUTTON_LABEL: &str = "GO!";
const BUTTON_COLOR: Color = Color::from_rgb(0.2, 0.78, 0.35);
const SPINNER_COLOR: Color = Color::from_rgb(0.55, 0.55, 0.55);

/// Events handled by [`IntroScreen::update`].
#[derive(Debug, Clone)]
pub enum Event {
    ImageFetched(Result<RemoteImage, String>),
    Tick(Instant),
    RevealElapsed { token: u64 },
    GoPressed,
    DismissElapsed { token: u64 },
}

/// Outcome of [`IntroScreen::update`] for the embedding application.
#[must_use]
pub enum Action {
    None,
    Run(Task<Event>),
    /// The screen finished its dismiss transition and should be removed.
    Dismissed,
}

/// Animated intro screen: a remote picture masked by the title, followed by
/// a "GO!" button that dismisses the screen.
///
/// Dropping the screen aborts its pending fetch and timers.
pub struct IntroScreen {
    settings: IntroSettings,
    state: IntroState,
    image: Option<RemoteImage>,
    mask: MaskCache,
    logo: AssetImage,
    button_icon: AssetImage,
    now: Instant,
    fetch: Option<task::Handle>,
    timer: Option<task::Handle>,
}

impl IntroScreen {
    /// Create the screen and start fetching its picture.
    ///
    /// `assets` resolves the caller's logo name; the button icon always uses
    /// the bundled logo.
    pub fn new(
        settings: IntroSettings,
        assets: &dyn AssetResolver,
    ) -> (Self, Task<Event>) {
        let now = Instant::now();
        let logo = assets::resolve_or_placeholder(assets, &settings.logo_name);
        let mut screen = Self {
            state: IntroState::new(&settings),
            image: None,
            mask: MaskCache::default(),
            logo,
            button_icon: AssetImage::bundled_logo(),
            now,
            fetch: None,
            timer: None,
            settings,
        };

        let task = screen.start(now);
        (screen, task)
    }

    pub fn state(&self) -> &IntroState {
        &self.state
    }

    pub fn settings(&self) -> &IntroSettings {
        &self.settings
    }

    pub fn update(&mut self, event: Event) -> Action {
        match event {
            Event::ImageFetched(Ok(image)) => {
                self.fetch = None;
                let now = Instant::now();
                match self.state.image_loaded(now) {
                    Some(timer) => {
                        self.image = Some(image);
                        self.now = now;
                        Action::Run(self.schedule(timer, |token| {
                            Event::RevealElapsed { token }
                        }))
                    },
                    None => Action::None,
                }
            },
            Event::ImageFetched(Err(message)) => {
                self.fetch = None;
                if self.state.image_failed() {
                    log::warn!("intro image fetch failed: {message}");
                }
                Action::None
            },
            Event::Tick(now) => {
                self.now = now;
                Action::None
            },
            Event::RevealElapsed { token } => {
                if self.state.reveal_elapsed(token) {
                    self.now = Instant::now();
                    log::debug!("intro button revealed");
                }
                Action::None
            },
            Event::GoPressed => {
                let now = Instant::now();
                match self.state.press(now) {
                    Some(timer) => {
                        self.now = now;
                        Action::Run(self.schedule(timer, |token| {
                            Event::DismissElapsed { token }
                        }))
                    },
                    None => Action::None,
                }
            },
            Event::DismissElapsed { token } => {
                if self.state.dismiss_elapsed(token) {
                    self.timer = None;
                    log::info!("intro screen dismissed");
                    Action::Dismissed
                } else {
                    Action::None
                }
            },
        }
    }

    pub fn subscription(&self) -> Subscription<Event> {
        if self.state.is_animating(self.now) {
            iced::time::every(FRAME_INTERVAL).map(Event::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Abort pending work and freeze the screen.
    pub fn dispose(&mut self) {
        self.state.dispose();
        if let Some(handle) = self.fetch.take() {
            handle.abort();
        }
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }

    pub fn view(&self) -> Element<'_, Event> {
        let backdrop = container(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            });

        let mut layers = stack![backdrop, self.picture_layer()]
            .width(Length::Fill)
            .height(Length::Fill);

        if self.state.button_visible() {
            layers = layers.push(self.overlay_layer());
        }

        layers.into()
    }

    fn start(&mut self, now: Instant) -> Task<Event> {
        if !self.state.begin_loading(now) {
            return Task::none();
        }

        let url = self.settings.image_url.clone();
        let (task, handle) = Task::perform(fetch_image(url), |result| {
            Event::ImageFetched(result.map_err(|err| err.to_string()))
        })
        .abortable();
        self.fetch = Some(handle.abort_on_drop());
        task
    }

    fn schedule(
        &mut self,
        timer: TimerRequest,
        event: impl Fn(u64) -> Event + Send + 'static,
    ) -> Task<Event> {
        let TimerRequest { token, delay } = timer;
        let (task, handle) = Task::perform(
            async move { tokio::time::sleep(delay).await },
            move |()| event(token),
        )
        .abortable();
        self.timer = Some(handle.abort_on_drop());
        task
    }

    fn picture_layer(&self) -> Element<'_, Event> {
        match (self.state.phase(), &self.image) {
            (Phase::NotStarted | Phase::Loading, _) => self.loading_view(),
            (Phase::Failed, _) => failure_view(),
            (_, Some(image)) => self.masked_view(image),
            (_, None) => Space::new().into(),
        }
    }

    fn loading_view(&self) -> Element<'_, Event> {
        let elapsed = self.state.loading_elapsed(self.now).as_secs_f32();
        let spinner = canvas(Spinner::at(elapsed, SPINNER_COLOR))
            .width(Length::Fixed(SPINNER_SIZE))
            .height(Length::Fixed(SPINNER_SIZE));

        container(spinner)
            .center(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(Color::WHITE)),
                ..Default::default()
            })
            .into()
    }

    fn masked_view<'a>(
        &'a self,
        image: &'a RemoteImage,
    ) -> Element<'a, Event> {
        let title = self.settings.title.as_str();
        let title_size = self.state.title_size_at(self.now);
        let offset_y = self.settings.layout.title_offset_y;
        let opacity = self.state.opacity_at(self.now);

        responsive(move |viewport| {
            let handle = self
                .mask
                .handle(image, title, title_size, viewport, offset_y);
            svg(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Fill)
                .opacity(opacity)
                .into()
        })
        .into()
    }

    fn overlay_layer(&self) -> Element<'_, Event> {
        let layout = &self.settings.layout;
        let opacity = self.state.opacity_at(self.now);

        let logo = container(asset_view(&self.logo, layout.logo_width, opacity))
            .center(Length::Fill);

        let bold = Font {
            weight: font::Weight::Bold,
            ..Font::default()
        };
        let label = row![
            asset_view(&self.button_icon, layout.button_icon_width, opacity),
            text(BUTTON_LABEL)
                .size(layout.button_text_size)
                .font(bold)
                .color(with_alpha(Color::WHITE, opacity)),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        let radius = layout.button_radius;
        let mut go = button(label).padding(layout.button_padding).style(
            move |_, _| button::Style {
                background: Some(Background::Color(with_alpha(
                    BUTTON_COLOR,
                    opacity,
                ))),
                text_color: with_alpha(Color::WHITE, opacity),
                border: Border {
                    radius: radius.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        if self.state.is_interactive() {
            go = go.on_press(Event::GoPressed);
        }

        stack![logo, offset_from_center(go.into(), layout.button_offset_y)]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl Drop for IntroScreen {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn failure_view<'a>() -> Element<'a, Event> {
    let glyph = svg(svg::Handle::from_memory(icons::LOAD_FAILED))
        .width(Length::Fill)
        .height(Length::Fill)
        .content_fit(ContentFit::Contain);

    container(glyph).center(Length::Fill).into()
}

fn asset_view<'a>(
    asset: &AssetImage,
    width: f32,
    opacity: f32,
) -> Element<'a, Event> {
    match asset {
        AssetImage::Raster(handle) => image(handle.clone())
            .width(Length::Fixed(width))
            .content_fit(ContentFit::Contain)
            .opacity(opacity)
            .into(),
        AssetImage::Vector(handle) => svg(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(width))
            .content_fit(ContentFit::Contain)
            .opacity(opacity)
            .into(),
    }
}

/// Centre `content` in the available space, shifted vertically by `dy`.
fn offset_from_center(
    content: Element<'_, Event>,
    dy: f32,
) -> Element<'_, Event> {
    let shift = (dy * 2.0).abs();
    let padding = if dy >= 0.0 {
        Padding::ZERO.top(shift)
    } else {
        Padding::ZERO.bottom(shift)
    };

    container(content)
        .padding(padding)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha.clamp(0.0, 1.0),
        ..color
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ::image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::assets::BundledAssets;
    use crate::fetch::prepare_image;
    use crate::settings::TimingSettings;

    fn remote_image() -> RemoteImage {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode");
        prepare_image(&bytes).expect("prepared")
    }

    fn screen() -> IntroScreen {
        let settings = IntroSettings::new("hello", 80.0, "Logo");
        let (screen, _task) = IntroScreen::new(settings, &BundledAssets::new());
        screen
    }

    fn reveal(screen: &mut IntroScreen) {
        let _ = screen.update(Event::ImageFetched(Ok(remote_image())));
        let token = screen.state.timer_token_for_tests();
        let _ = screen.update(Event::RevealElapsed { token });
    }

    #[test]
    fn given_new_screen_then_loading_without_button() {
        let screen = screen();

        assert_eq!(screen.state().phase(), Phase::Loading);
        assert!(!screen.state().button_visible());
        assert!(screen.fetch.is_some());
    }

    #[test]
    fn given_fetch_failure_then_no_timer_is_armed() {
        let mut screen = screen();

        let action = screen
            .update(Event::ImageFetched(Err(String::from("offline"))));

        assert!(matches!(action, Action::None));
        assert_eq!(screen.state().phase(), Phase::Failed);
        assert!(screen.timer.is_none());
        assert!(screen.fetch.is_none());
        assert!(!screen.state().button_visible());
    }

    #[test]
    fn given_fetch_success_then_reveal_timer_is_scheduled() {
        let mut screen = screen();

        let action = screen.update(Event::ImageFetched(Ok(remote_image())));

        assert!(matches!(action, Action::Run(_)));
        assert!(screen.timer.is_some());
        assert!(screen.fetch.is_none());
        assert!(screen.image.is_some());
        assert!(!screen.state().button_visible());
    }

    #[test]
    fn given_duplicate_fetch_success_then_second_is_ignored() {
        let mut screen = screen();
        let _ = screen.update(Event::ImageFetched(Ok(remote_image())));

        let action = screen.update(Event::ImageFetched(Ok(remote_image())));

        assert!(matches!(action, Action::None));
    }

    #[test]
    fn given_revealed_button_when_pressed_twice_then_dismissed_once() {
        let mut screen = screen();
        reveal(&mut screen);
        assert!(screen.state().button_visible());

        assert!(matches!(screen.update(Event::GoPressed), Action::Run(_)));
        assert!(matches!(screen.update(Event::GoPressed), Action::None));

        let token = screen.state.timer_token_for_tests();
        assert!(matches!(
            screen.update(Event::DismissElapsed { token }),
            Action::Dismissed
        ));
        assert!(matches!(
            screen.update(Event::DismissElapsed { token }),
            Action::None
        ));
    }

    #[test]
    fn given_slow_title_growth_when_revealed_then_ticks_continue() {
        let settings = IntroSettings::new("hello", 80.0, "Logo").with_timing(
            TimingSettings {
                title_animation: Duration::from_secs(60),
                ..TimingSettings::default()
            },
        );
        let (mut screen, _task) =
            IntroScreen::new(settings, &BundledAssets::new());
        reveal(&mut screen);

        assert_eq!(screen.state().phase(), Phase::Revealed);
        assert!(screen.state().title_size_at(screen.now) < 80.0);
        assert!(screen.state().is_animating(screen.now));
    }

    #[test]
    fn given_hidden_button_when_pressed_then_ignored() {
        let mut screen = screen();

        assert!(matches!(screen.update(Event::GoPressed), Action::None));
        assert_eq!(screen.state().phase(), Phase::Loading);
    }

    #[test]
    fn given_disposed_screen_when_reveal_fires_then_nothing_changes() {
        let mut screen = screen();
        let _ = screen.update(Event::ImageFetched(Ok(remote_image())));
        let token = screen.state.timer_token_for_tests();

        screen.dispose();
        let action = screen.update(Event::RevealElapsed { token });

        assert!(matches!(action, Action::None));
        assert!(!screen.state().button_visible());
        assert!(screen.timer.is_none());
        assert!(screen.fetch.is_none());
    }

    #[test]
    fn given_missing_logo_name_then_screen_uses_placeholder() {
        let settings = IntroSettings::new("hello", 80.0, "Unknown");
        let (screen, _task) = IntroScreen::new(settings, &BundledAssets::new());

        assert!(matches!(screen.logo, AssetImage::Vector(_)));
    }

    #[test]
    fn given_alpha_when_applied_then_scales_color_alpha() {
        let color = with_alpha(Color::WHITE, 0.25);

        assert!((color.a - 0.25).abs() < f32::EPSILON);
        assert_eq!(with_alpha(Color::WHITE, 2.0).a, 1.0);
    }
}
