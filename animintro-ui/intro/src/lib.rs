//! Animated intro screen for [`iced`] applications.
//!
//! The screen fetches one remote picture, shows it through the uppercase
//! title while the title grows from nothing to its final size, and after a
//! short delay reveals a "GO!" button. Pressing the button plays a fade-out
//! and then reports [`Action::Dismissed`] to the embedding application.
//!
//! The crate is split into two layers:
//! - [`IntroState`], a rendering-independent state machine driven by explicit
//!   instants and timer tokens;
//! - [`IntroScreen`], the `iced` component that owns the fetch and timer
//!   tasks and renders the state.
//!
//! See `examples/intro_screen.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```no_run
//! use animintro_ui_intro::{Action, BundledAssets, IntroScreen, IntroSettings};
//! use iced::{Element, Subscription, Task};
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Intro(animintro_ui_intro::Event),
//! }
//!
//! struct App {
//!     intro: Option<IntroScreen>,
//! }
//!
//! impl App {
//!     fn new() -> (Self, Task<Message>) {
//!         let settings = IntroSettings::new("hello", 80.0, "Logo");
//!         let (intro, task) = IntroScreen::new(settings, &BundledAssets::new());
//!         (Self { intro: Some(intro) }, task.map(Message::Intro))
//!     }
//!
//!     fn update(&mut self, message: Message) -> Task<Message> {
//!         let Message::Intro(event) = message;
//!         let Some(intro) = self.intro.as_mut() else {
//!             return Task::none();
//!         };
//!         match intro.update(event) {
//!             Action::None => Task::none(),
//!             Action::Run(task) => task.map(Message::Intro),
//!             Action::Dismissed => {
//!                 self.intro = None;
//!                 Task::none()
//!             },
//!         }
//!     }
//!
//!     fn subscription(&self) -> Subscription<Message> {
//!         self.intro
//!             .as_ref()
//!             .map(|intro| intro.subscription().map(Message::Intro))
//!             .unwrap_or_else(Subscription::none)
//!     }
//!
//!     fn view(&self) -> Element<'_, Message> {
//!         match &self.intro {
//!             Some(intro) => intro.view().map(Message::Intro),
//!             None => iced::widget::text("Welcome").into(),
//!         }
//!     }
//! }
//! ```

mod assets;
mod error;
mod fetch;
mod icons;
mod mask;
mod screen;
mod settings;
mod spinner;
mod state;

pub use assets::{
    AssetImage, AssetResolver, BUNDLED_LOGO, BundledAssets, DirectoryAssets,
};
pub use error::{IntroError, Result};
pub use fetch::{RemoteImage, fetch_image, prepare_image};
pub use screen::{Action, Event, IntroScreen};
pub use settings::{
    DEFAULT_IMAGE_URL, IntroSettings, LayoutSettings, TimingSettings,
};
pub use state::{IntroState, Phase, TimerRequest};
