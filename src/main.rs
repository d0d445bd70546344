pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use rehearse::{
    app_dirs::AppDirs,
    capability::{DeviceProbe, MediaCapture, NoMedia, ScriptedRecognizer, SpeechRecognizer, Unsupported},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    questions::QuestionScript,
    runtime::{CrosstermEventSource, FixedTicker, InterviewEvent, Runner},
    scoring::{RandomizedScorer, Score, Scorer},
    session::{Difficulty, ExperienceLevel, InterviewType, DURATION_CHOICES},
    setup::{SetupField, SetupForm},
    InterviewError, Room, Route, ScriptError, SessionContext,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, warn};

/// practice interviews in your terminal
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "A terminal mock interview: configure a session, answer a timed script of questions, and get a score with feedback."
)]
pub struct Cli {
    /// job title you are practicing for
    #[clap(short = 'r', long)]
    role: Option<String>,

    /// company you are interviewing with
    #[clap(short = 'c', long)]
    company: Option<String>,

    /// experience level
    #[clap(short = 'l', long, value_enum)]
    level: Option<ExperienceLevel>,

    /// interview type
    #[clap(short = 't', long = "type", value_enum)]
    interview_type: Option<InterviewType>,

    /// session length in minutes (15, 30, 45 or 60)
    #[clap(short = 'd', long, value_parser = parse_duration)]
    duration: Option<u32>,

    /// question difficulty
    #[clap(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// json file with a custom question script: {"name": "...", "questions": ["..."]}
    #[clap(short = 'q', long)]
    questions: Option<PathBuf>,

    /// skip the setup screen and start right away (requires a role)
    #[clap(short = 's', long)]
    start: bool,

    /// seed for reproducible scores
    #[clap(long)]
    seed: Option<u64>,

    /// do not probe for a camera or microphone
    #[clap(long)]
    no_media: bool,

    /// simulate voice input by dictating this text when voice input is started
    #[clap(long)]
    voice_demo: Option<String>,
}

fn parse_duration(s: &str) -> Result<u32, String> {
    let minutes: u32 = s.parse().map_err(|e| format!("{e}"))?;
    if DURATION_CHOICES.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(format!("must be one of {DURATION_CHOICES:?}"))
    }
}

impl Cli {
    /// Stored defaults with any flags given on the command line applied on top
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(role) = &self.role {
            cfg.role = role.clone();
        }
        if let Some(company) = &self.company {
            cfg.company = company.clone();
        }
        if let Some(level) = self.level {
            cfg.experience_level = level;
        }
        if let Some(kind) = self.interview_type {
            cfg.interview_type = kind;
        }
        if let Some(duration) = self.duration {
            cfg.duration_minutes = duration;
        }
        if let Some(difficulty) = self.difficulty {
            cfg.difficulty = difficulty;
        }
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub cli: Cli,
    pub route: Route,
    pub ctx: SessionContext,
    pub setup: SetupForm,
    pub room: Option<Room>,
    pub score: Option<Score>,
    pub notice: Option<String>,
    script: QuestionScript,
    scorer: Box<dyn Scorer>,
    media: Box<dyn MediaCapture>,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(cli: Cli, store: Box<dyn ConfigStore>) -> Result<Self, ScriptError> {
        let script = match &cli.questions {
            Some(path) => QuestionScript::from_path(path)?,
            None => QuestionScript::default(),
        };
        let scorer: Box<dyn Scorer> = match cli.seed {
            Some(seed) => Box::new(RandomizedScorer::seeded(seed)),
            None => Box::new(RandomizedScorer::from_entropy()),
        };
        let media: Box<dyn MediaCapture> = if cli.no_media {
            Box::new(NoMedia)
        } else {
            Box::new(DeviceProbe::default())
        };

        let setup = SetupForm::new(&cli.apply_to(store.load()));
        let mut app = Self {
            cli,
            route: Route::Setup,
            ctx: SessionContext::new(),
            setup,
            room: None,
            score: None,
            notice: None,
            script,
            scorer,
            media,
            store,
        };

        if app.cli.start {
            app.start_session();
        }
        Ok(app)
    }

    fn speech(&self) -> Box<dyn SpeechRecognizer> {
        match &self.cli.voice_demo {
            Some(text) => Box::new(ScriptedRecognizer::new(text)),
            None => Box::new(Unsupported),
        }
    }

    /// Submit the setup form and enter the room.
    pub fn start_session(&mut self) {
        match self.setup.submit() {
            Ok(config) => {
                if let Err(e) = self.store.save(&Config::from(&config)) {
                    warn!(error = %e, "could not save setup defaults");
                }
                self.ctx.set_config(config);
                self.navigate(Route::Room);
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        self.notice = None;
        match route {
            Route::Setup => {
                self.room = None;
                self.score = None;
                self.route = Route::Setup;
            }
            Route::Room => {
                match Room::enter(&self.ctx, &self.script, self.media.as_ref(), self.speech()) {
                    Ok(room) => {
                        if room.media().is_none() {
                            self.notice = Some("camera unavailable, continuing in text-only mode".into());
                        }
                        self.room = Some(room);
                        self.route = Route::Room;
                    }
                    Err(e) => self.redirect_to_setup(e),
                }
            }
            Route::Results => {
                // leaving the room stops its timer and frees the media handle
                self.room = None;
                match self.ctx.result() {
                    Some(result) => {
                        self.score = Some(self.scorer.score(result));
                        self.route = Route::Results;
                    }
                    None => self.redirect_to_setup(InterviewError::MissingResult),
                }
            }
        }
    }

    fn redirect_to_setup(&mut self, err: InterviewError) {
        info!(reason = %err, "redirecting to setup");
        self.room = None;
        self.score = None;
        self.route = Route::Setup;
        self.notice = Some(err.to_string());
    }

    /// Start over from a fresh context, keeping the last setup as defaults.
    pub fn practice_again(&mut self) {
        self.ctx.reset();
        self.setup = SetupForm::new(&self.store.load());
        self.navigate(Route::Setup);
    }

    /// Advance the live room by `secs` session seconds. Returns true when the
    /// screen needs redrawing.
    pub fn on_seconds(&mut self, secs: u64) -> bool {
        if self.route != Route::Room {
            return false;
        }
        for _ in 0..secs {
            let next = match self.room.as_mut() {
                Some(room) => room.on_second(&mut self.ctx),
                None => None,
            };
            if let Some(route) = next {
                self.navigate(route);
                break;
            }
        }
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.route {
            Route::Setup => self.handle_setup_key(key),
            Route::Room => {
                self.handle_room_key(key);
                Flow::Continue
            }
            Route::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Flow::Quit,
                KeyCode::Char('r') | KeyCode::Char('n') => {
                    self.practice_again();
                    Flow::Continue
                }
                _ => Flow::Continue,
            },
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab | KeyCode::Down => self.setup.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.setup.focus_prev(),
            KeyCode::Left => self.setup.cycle(false),
            KeyCode::Right => self.setup.cycle(true),
            KeyCode::Backspace => self.setup.backspace(),
            KeyCode::Enter => {
                if self.setup.focus() == SetupField::Start {
                    self.start_session();
                } else {
                    self.setup.focus_next();
                }
            }
            KeyCode::Char(c) => self.setup.type_char(c),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_room_key(&mut self, key: KeyEvent) {
        let Some(room) = self.room.as_mut() else {
            return;
        };

        let next = match key.code {
            KeyCode::Enter => room.submit(&mut self.ctx),
            KeyCode::Esc => room.end(&mut self.ctx),
            KeyCode::Tab => {
                room.skip();
                None
            }
            KeyCode::Backspace => {
                room.backspace();
                None
            }
            KeyCode::F(2) => {
                if let Err(e) = room.start_listening() {
                    self.notice = Some(e.to_string());
                }
                None
            }
            KeyCode::F(3) => {
                room.toggle_camera();
                None
            }
            KeyCode::F(4) => {
                room.toggle_mic();
                None
            }
            KeyCode::F(5) => {
                room.toggle_recording();
                None
            }
            KeyCode::Char(c) => {
                room.type_char(c);
                None
            }
            _ => None,
        };

        if let Some(route) = next {
            self.navigate(route);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(e) = logging::init(&path) {
            eprintln!("logging disabled: {e}");
        }
    }

    let mut app = match App::new(cli, Box::new(FileConfigStore::new())) {
        Ok(app) => app,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            InterviewEvent::Tick => {}
            InterviewEvent::Second(secs) => {
                if app.on_seconds(secs) {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            InterviewEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            InterviewEvent::Key(key) => {
                let entering_room = app.route != Route::Room;
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
                if entering_room && app.route == Route::Room {
                    // a new session starts on a whole second
                    runner.restart_clock();
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(&app.route).render(app, f);
}
