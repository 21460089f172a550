//! Application state and update logic for the marquee TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use marquee_engine::{
    Animation, Blink, Config, DecodeToggle, Mode, Page, Post, RoiField, RoiInputs, SearchIndex,
    Sequencer, Typewriter,
};

/// How long a notification stays on the status bar, in milliseconds.
const NOTIFICATION_MS: u64 = 3_000;

/// The current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    About,
    Blog,
    Contact,
    Roi,
}

impl Screen {
    /// Screens in tab order; `1`..`5` select them.
    pub const ALL: [Self; 5] = [Self::Home, Self::About, Self::Blog, Self::Contact, Self::Roi];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Blog => "Blog",
            Self::Contact => "Contact",
            Self::Roi => "ROI",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// The boot log shown on this screen, if any.
    pub fn page(self) -> Option<Page> {
        match self {
            Self::About => Some(Page::About),
            Self::Blog => Some(Page::Blog),
            Self::Contact => Some(Page::Contact),
            Self::Home | Self::Roi => None,
        }
    }
}

/// Hero banner: the typed role and its cursor.
#[derive(Debug)]
pub struct Hero {
    pub typewriter: Typewriter,
    pub cursor: Blink,
}

/// A boot log and its trailing cursor.
#[derive(Debug)]
pub struct BootLogView {
    pub page: Page,
    pub sequencer: Sequencer,
    pub cursor: Blink,
}

/// Animations mounted for the visible screen.
///
/// A new value is built every time a screen is entered, and the old one
/// is disposed before it is dropped.
#[derive(Debug, Default)]
pub enum Display {
    Hero(Hero),
    Log(BootLogView),
    #[default]
    Still,
}

impl Display {
    fn mount(screen: Screen, config: &Config, now: u64) -> Self {
        let mut cursor = Blink::new(config.timing.blink_ms);
        cursor.start(now);

        if screen == Screen::Home {
            let mut typewriter = Typewriter::new(config.roles.iter().cloned(), config.timing.typewriter);
            typewriter.start(now);
            return Self::Hero(Hero { typewriter, cursor });
        }

        match screen.page() {
            Some(page) => {
                let mut sequencer = Sequencer::lines(config.script(page), config.interval_ms(page));
                sequencer.start(now);
                Self::Log(BootLogView {
                    page,
                    sequencer,
                    cursor,
                })
            }
            None => Self::Still,
        }
    }

    /// Fire everything due by `now`. Returns whether anything changed.
    fn advance(&mut self, now: u64) -> bool {
        match self {
            Self::Hero(hero) => hero.typewriter.advance(now) | hero.cursor.advance(now),
            Self::Log(log) => log.sequencer.advance(now) | log.cursor.advance(now),
            Self::Still => false,
        }
    }

    fn dispose(&mut self) {
        match self {
            Self::Hero(hero) => {
                hero.typewriter.dispose();
                hero.cursor.dispose();
            }
            Self::Log(log) => {
                log.sequencer.dispose();
                log.cursor.dispose();
            }
            Self::Still => {}
        }
    }

    /// The mounted hero, if the home screen is showing.
    pub fn hero(&self) -> Option<&Hero> {
        match self {
            Self::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    /// The mounted boot log, if one is showing.
    pub fn log(&self) -> Option<&BootLogView> {
        match self {
            Self::Log(log) => Some(log),
            _ => None,
        }
    }
}

/// Blog search box, tag filter and list selection.
#[derive(Debug, Default)]
pub struct BlogState {
    pub query: TextInputState,
    /// Whether keystrokes go to the search box.
    pub focused: bool,
    pub tag: Option<String>,
    /// Highlighted row in the result list.
    pub selected: usize,
}

impl BlogState {
    fn is_filtered(&self) -> bool {
        self.focused || !self.query.is_empty() || self.tag.is_some()
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Current screen.
    pub screen: Screen,

    /// Loaded configuration.
    pub config: Config,

    /// Search index over the configured posts.
    pub index: SearchIndex,

    /// Last clock reading, in milliseconds.
    pub now: u64,

    /// Animations for the current screen.
    pub display: Display,

    /// Hidden message on the about screen.
    pub decode: DecodeToggle,

    pub blog: BlogState,

    pub roi: RoiInputs,

    /// Index into [`RoiField::ALL`] of the field arrows adjust.
    pub roi_field: usize,

    /// Notification message (displayed temporarily).
    pub notification: Option<String>,

    /// Clock reading at which the notification is cleared.
    notification_until: u64,
}

impl App {
    /// Create a new app on the home screen at time zero.
    pub fn new(config: Config) -> Self {
        let index = SearchIndex::new(config.posts.clone()).with_threshold(config.search_threshold);
        let display = Display::mount(Screen::Home, &config, 0);
        let decode = DecodeToggle::new(config.hidden_message.clone());
        let roi = config.roi.clamped();
        Self {
            should_quit: false,
            show_help: false,
            screen: Screen::Home,
            config,
            index,
            now: 0,
            display,
            decode,
            blog: BlogState::default(),
            roi,
            roi_field: 0,
            notification: None,
            notification_until: 0,
        }
    }

    /// Create an app with the built-in defaults for tests.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self::new(Config::default())
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Tab(i) => {
                if let Some(&screen) = Screen::ALL.get(i) {
                    self.switch_to(screen);
                }
            }
            Action::Back => self.back(),
            Action::Replay => self.replay(),
            Action::Pause => self.toggle_pause(),
            Action::Decode => self.toggle_decode(),
            _ => match self.screen {
                Screen::Blog => self.handle_blog_action(action),
                Screen::Roi => self.handle_roi_action(action),
                Screen::Home | Screen::About | Screen::Contact => {}
            },
        }
    }

    /// Leave the current screen and mount a fresh display for `screen`.
    pub fn switch_to(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        self.display.dispose();
        self.screen = screen;
        self.display = Display::mount(screen, &self.config, self.now);
        match screen {
            Screen::About => self.decode = DecodeToggle::new(self.config.hidden_message.clone()),
            Screen::Blog => self.blog = BlogState::default(),
            Screen::Home | Screen::Contact | Screen::Roi => {}
        }
    }

    fn back(&mut self) {
        match self.screen {
            Screen::Blog if self.blog.is_filtered() => {
                self.blog = BlogState::default();
            }
            Screen::Home => {}
            _ => self.switch_to(Screen::Home),
        }
    }

    fn replay(&mut self) {
        let now = self.now;
        match &mut self.display {
            Display::Hero(hero) => {
                hero.typewriter.reset();
                hero.typewriter.start(now);
            }
            Display::Log(log) => log.sequencer.restart(now),
            Display::Still => return,
        }
        self.set_notification("Replaying".into());
    }

    fn toggle_pause(&mut self) {
        let now = self.now;
        let Display::Log(log) = &mut self.display else {
            return;
        };
        let message = match log.sequencer.mode() {
            Mode::Running if log.sequencer.pause(now) => "Paused",
            Mode::Paused if log.sequencer.resume(now) => "Resumed",
            _ => return,
        };
        self.set_notification(message.into());
    }

    fn toggle_decode(&mut self) {
        if self.screen != Screen::About {
            return;
        }
        let message = if self.decode.toggle() {
            "Message decoded"
        } else {
            "Message encoded"
        };
        self.set_notification(message.into());
    }

    fn handle_blog_action(&mut self, action: Action) {
        match action {
            Action::Search => self.blog.focused = true,
            Action::NextTag => self.cycle_tag(true),
            Action::PrevTag => self.cycle_tag(false),
            Action::Up => self.blog.selected = self.blog.selected.saturating_sub(1),
            Action::Down => {
                let last = self.results().len().saturating_sub(1);
                self.blog.selected = (self.blog.selected + 1).min(last);
            }
            _ => {}
        }
    }

    /// Step the tag filter through every tag and back to "all".
    fn cycle_tag(&mut self, forward: bool) {
        let tags = self.index.all_tags();
        if tags.is_empty() {
            return;
        }
        let current = self
            .blog
            .tag
            .as_deref()
            .and_then(|t| tags.iter().position(|x| *x == t));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(tags.len() - 1),
            (Some(i), true) => (i + 1 < tags.len()).then_some(i + 1),
            (Some(i), false) => i.checked_sub(1),
        };
        self.blog.tag = next.map(|i| tags[i].to_string());
        self.blog.selected = 0;
    }

    fn handle_roi_action(&mut self, action: Action) {
        let count = RoiField::ALL.len();
        match action {
            Action::Up => self.roi_field = (self.roi_field + count - 1) % count,
            Action::Down => self.roi_field = (self.roi_field + 1) % count,
            Action::Left => self.roi.nudge(self.roi_field(), -1),
            Action::Right => self.roi.nudge(self.roi_field(), 1),
            _ => {}
        }
    }

    /// Field the arrow keys currently adjust.
    pub fn roi_field(&self) -> RoiField {
        RoiField::ALL[self.roi_field % RoiField::ALL.len()]
    }

    /// Posts matching the current query and tag, best first.
    pub fn results(&self) -> Vec<&Post> {
        self.index
            .search(self.blog.query.content(), self.blog.tag.as_deref())
    }

    /// Called after the search text changes.
    pub fn search_edited(&mut self) {
        self.blog.selected = 0;
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_until = self.now.saturating_add(NOTIFICATION_MS);
    }

    /// Advance the clock to `now` and fire due animation ticks.
    /// Returns whether anything visible changed.
    pub fn tick(&mut self, now: u64) -> bool {
        self.now = self.now.max(now);
        let mut changed = self.display.advance(self.now);

        if self.notification.is_some() && self.now >= self.notification_until {
            self.notification = None;
            changed = true;
        }
        changed
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.display.dispose();
    }
}
