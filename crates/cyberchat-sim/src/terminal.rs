//! Terminal driver for the simulator.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Radio and permission state
//! come from a [`SimHost`].
//!
//! Host dialogs (adapter enable, permissions) are modal: while one is up the
//! only accepted input is its yes/no answer, which becomes the result event.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use cyberchat_gate::{
    Destination, Driver, GateEvent, GateView, Notice, NoticeDuration, Permission, PermissionGrants,
    PermissionHost, PermissionSet, PlatformVersion, RadioHardwareQuery, RequestId, SimHost,
    UserIntent,
};
use futures::{Stream, StreamExt};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use thiserror::Error;

use crate::{
    screen::{Dialog, Screen},
    ui,
};

const HELP: [&str; 8] = [
    "commands:",
    "  enable   turn on Bluetooth",
    "  perms    request permissions again",
    "  find     open device discovery",
    "  chat     start a chat",
    "  resume   return to the screen",
    "  toggle   flip Bluetooth in system settings",
    "  quit     close the screen (or Esc)",
];

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<std::convert::Infallible> for ConsoleError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Intent(UserIntent),
    Resume,
    Toggle,
    Quit,
    Help,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        Some(match line {
            "enable" => Self::Intent(UserIntent::EnableAdapter),
            "perms" => Self::Intent(UserIntent::RequestPermissions),
            "find" => Self::Intent(UserIntent::Navigate(Destination::Discovery)),
            "chat" => Self::Intent(UserIntent::Navigate(Destination::Chat)),
            "resume" => Self::Resume,
            "toggle" => Self::Toggle,
            "quit" | "exit" => Self::Quit,
            "help" | "?" => Self::Help,
            _ => return None,
        })
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line {
        "y" | "yes" | "allow" => Some(true),
        "n" | "no" | "deny" => Some(false),
        _ => None,
    }
}

/// Restores the terminal when the console is dropped.
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Terminal front end implementing the [`Driver`] trait.
///
/// Generic over the ratatui backend and the terminal event source so the
/// same driver runs against a real terminal or a scripted one.
pub struct Console<B: Backend, S> {
    host: SimHost,
    terminal: Terminal<B>,
    events: S,
    screen: Screen,
    _raw_mode: Option<RawModeGuard>,
}

impl Console<CrosstermBackend<Stdout>, EventStream> {
    /// Take over the terminal: raw mode, alternate screen, crossterm events.
    pub fn new(host: SimHost) -> Result<Self, ConsoleError> {
        enable_raw_mode()?;
        let raw_mode = RawModeGuard;
        stdout().execute(EnterAlternateScreen)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self::from_parts(host, terminal, EventStream::new(), Some(raw_mode)))
    }
}

impl<B: Backend, S> Console<B, S> {
    fn from_parts(
        host: SimHost,
        terminal: Terminal<B>,
        events: S,
        raw_mode: Option<RawModeGuard>,
    ) -> Self {
        let mut screen = Screen::default();
        screen.push_message("type help for commands");
        Self { host, terminal, events, screen, _raw_mode: raw_mode }
    }
}

impl<B, S> Console<B, S>
where
    B: Backend,
    ConsoleError: From<B::Error>,
{

    fn draw(&mut self) -> Result<(), ConsoleError> {
        let screen = &self.screen;
        self.terminal.draw(|frame| ui::render(frame, screen))?;
        Ok(())
    }

    fn say(&mut self, message: impl Into<String>) -> Result<(), ConsoleError> {
        self.screen.push_message(message);
        self.draw()
    }

    /// Turn an answer to `dialog` into its result event.
    fn answer(&mut self, dialog: Dialog, accepted: bool) -> GateEvent {
        match dialog {
            Dialog::Enable(id) => {
                self.host.accept_enable = accepted;
                let accepted = self.host.answer_enable();
                GateEvent::EnableAdapterResult { id, accepted }
            },
            Dialog::Permissions(id, set) => {
                let grants = if accepted {
                    self.host.answer_permissions(set)
                } else {
                    PermissionGrants::denying(set, set.permissions())
                };
                GateEvent::PermissionResult { id, grants }
            },
        }
    }

    /// Map one submitted line to an event. `None` if the line produced none.
    fn interpret(&mut self, line: &str) -> Result<Option<GateEvent>, ConsoleError> {
        if let Some(dialog) = self.screen.dialog() {
            return match parse_answer(line) {
                Some(accepted) => {
                    self.screen.close_dialog();
                    let event = self.answer(dialog, accepted);
                    self.draw()?;
                    Ok(Some(event))
                },
                None => {
                    self.say("answer y or n")?;
                    Ok(None)
                },
            };
        }

        let event = match Command::parse(line) {
            Some(Command::Intent(intent)) => GateEvent::Intent(intent),
            Some(Command::Resume) => GateEvent::Resumed,
            Some(Command::Toggle) => {
                self.host.powered = !self.host.powered;
                tracing::debug!(powered = self.host.powered, "adapter toggled in settings");
                GateEvent::AdapterStateChanged
            },
            Some(Command::Quit) => GateEvent::TornDown,
            Some(Command::Help) => {
                for line in HELP {
                    self.screen.push_message(line);
                }
                self.draw()?;
                return Ok(None);
            },
            None => {
                if !line.is_empty() {
                    self.say(format!("unknown command {line:?}, try help"))?;
                }
                return Ok(None);
            },
        };
        Ok(Some(event))
    }

    /// Apply a key press to the input line. Returns an event once a line is
    /// submitted or the screen is closed.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<GateEvent>, ConsoleError> {
        match key.code {
            KeyCode::Esc => return Ok(Some(GateEvent::TornDown)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(GateEvent::TornDown));
            },
            KeyCode::Enter => {
                let line = self.screen.take_input();
                self.draw()?;
                return self.interpret(line.trim());
            },
            KeyCode::Backspace => self.screen.backspace(),
            KeyCode::Char(c) => self.screen.push_char(c),
            _ => return Ok(None),
        }
        self.draw()?;
        Ok(None)
    }
}

impl<B: Backend, S> RadioHardwareQuery for Console<B, S> {
    fn present(&self) -> bool {
        self.host.present()
    }

    fn powered_on(&self) -> bool {
        self.host.powered_on()
    }
}

impl<B: Backend, S> PermissionHost for Console<B, S> {
    fn granted(&self, permission: Permission) -> bool {
        self.host.granted(permission)
    }
}

impl<B: Backend, S> PlatformVersion for Console<B, S> {
    fn at_least(&self, level: u32) -> bool {
        self.host.at_least(level)
    }
}

impl<B, S> Driver for Console<B, S>
where
    B: Backend + Send,
    ConsoleError: From<B::Error>,
    S: Stream<Item = io::Result<Event>> + Unpin + Send,
{
    type Error = ConsoleError;

    async fn poll_event(&mut self) -> Result<Option<GateEvent>, Self::Error> {
        loop {
            match self.events.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(event) = self.handle_key(key)? {
                        return Ok(Some(event));
                    }
                },
                Some(Ok(Event::Resize(..))) => self.draw()?,
                Some(Ok(_)) => {},
                Some(Err(e)) => return Err(ConsoleError::Io(e)),
                None => return Ok(None),
            }
        }
    }

    fn render(&mut self, view: &GateView) -> Result<(), Self::Error> {
        self.screen.set_view(*view);
        self.draw()
    }

    fn request_enable_adapter(&mut self, id: RequestId) -> Result<(), Self::Error> {
        self.screen.open_dialog(Dialog::Enable(id));
        self.draw()
    }

    fn request_permissions(
        &mut self,
        id: RequestId,
        set: PermissionSet,
    ) -> Result<(), Self::Error> {
        self.screen.open_dialog(Dialog::Permissions(id, set));
        self.draw()
    }

    fn navigate(&mut self, target: Destination) -> Result<(), Self::Error> {
        let screen = match target {
            Destination::Discovery => "device discovery",
            Destination::Chat => "chat",
        };
        self.say(format!("-> opening {screen}"))
    }

    fn notify(&mut self, notice: &Notice, duration: NoticeDuration) -> Result<(), Self::Error> {
        let marker = match duration {
            NoticeDuration::Short => "*",
            NoticeDuration::Long => "**",
        };
        self.say(format!("{marker} {notice}"))
    }
}
