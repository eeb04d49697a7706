use animintro_ui_intro::{Action, Event as IntroEvent, IntroScreen};
use iced::widget::{button, column, container, text};
use iced::{Element, Length, Subscription, Task};

use crate::settings::{self, SettingsData};

pub(crate) const MIN_WINDOW_WIDTH: f32 = 800.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 600.0;

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum Event {
    Intro(IntroEvent),
    ReplayIntro,
}

pub(crate) struct App {
    settings: SettingsData,
    intro: Option<IntroScreen>,
    dismissed: bool,
}

impl App {
    pub(crate) fn new() -> (Self, Task<Event>) {
        let settings = settings::load_initial_settings();
        let (intro, task) = open_intro(&settings);

        (
            Self {
                settings,
                intro: Some(intro),
                dismissed: false,
            },
            task,
        )
    }

    pub(crate) fn title(&self) -> String {
        self.settings.title().to_string()
    }

    pub(crate) fn update(&mut self, event: Event) -> Task<Event> {
        match event {
            Event::Intro(event) => {
                let Some(intro) = self.intro.as_mut() else {
                    log::debug!("intro event after dismissal: {event:?}");
                    return Task::none();
                };

                match intro.update(event) {
                    Action::None => Task::none(),
                    Action::Run(task) => task.map(Event::Intro),
                    Action::Dismissed => {
                        self.dismissed = true;
                        self.intro = None;
                        Task::none()
                    },
                }
            },
            Event::ReplayIntro => {
                let (intro, task) = open_intro(&self.settings);
                self.intro = Some(intro);
                self.dismissed = false;
                task
            },
        }
    }

    pub(crate) fn subscription(&self) -> Subscription<Event> {
        match &self.intro {
            Some(intro) => intro.subscription().map(Event::Intro),
            None => Subscription::none(),
        }
    }

    pub(crate) fn view(&self) -> Element<'_, Event> {
        match &self.intro {
            Some(intro) if !self.dismissed => intro.view().map(Event::Intro),
            _ => self.main_view(),
        }
    }

    fn main_view(&self) -> Element<'_, Event> {
        let content = column![
            text(self.settings.title().to_uppercase()).size(40),
            button(text("Replay intro")).on_press(Event::ReplayIntro),
        ]
        .spacing(16)
        .align_x(iced::Alignment::Center);

        container(content).center(Length::Fill).into()
    }
}

fn open_intro(settings: &SettingsData) -> (IntroScreen, Task<Event>) {
    let resolver = settings.asset_resolver();
    let (intro, task) =
        IntroScreen::new(settings.intro_settings(), resolver.as_ref());
    (intro, task.map(Event::Intro))
}
