use animintro_ui_intro::{
    Action, BundledAssets, Event as IntroEvent, IntroScreen, IntroSettings,
};
use iced::widget::{button, column, container, text};
use iced::{Element, Length, Size, Subscription, Task};

fn main() -> iced::Result {
    iced::application(App::new, App::update, App::view)
        .title("intro_screen")
        .window_size(Size {
            width: 1024.0,
            height: 768.0,
        })
        .subscription(App::subscription)
        .run()
}

#[derive(Debug, Clone)]
enum Event {
    Intro(IntroEvent),
    Replay,
}

struct App {
    intro: Option<IntroScreen>,
    dismissed: bool,
}

impl App {
    fn new() -> (Self, Task<Event>) {
        let (intro, task) = start_intro();
        (
            Self {
                intro: Some(intro),
                dismissed: false,
            },
            task,
        )
    }

    fn update(&mut self, event: Event) -> Task<Event> {
        match event {
            Event::Intro(event) => {
                let Some(intro) = self.intro.as_mut() else {
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
            Event::Replay => {
                let (intro, task) = start_intro();
                self.intro = Some(intro);
                self.dismissed = false;
                task
            },
        }
    }

    fn subscription(&self) -> Subscription<Event> {
        match &self.intro {
            Some(intro) => intro.subscription().map(Event::Intro),
            None => Subscription::none(),
        }
    }

    fn view(&self) -> Element<'_, Event> {
        match &self.intro {
            Some(intro) if !self.dismissed => intro.view().map(Event::Intro),
            _ => container(
                column![
                    text("Intro dismissed").size(32),
                    button(text("Replay")).on_press(Event::Replay),
                ]
                .spacing(16),
            )
            .center(Length::Fill)
            .into(),
        }
    }
}

fn start_intro() -> (IntroScreen, Task<Event>) {
    let settings = IntroSettings::new("titre", 80.0, "Logo");
    let (intro, task) = IntroScreen::new(settings, &BundledAssets::new());
    (intro, task.map(Event::Intro))
}
