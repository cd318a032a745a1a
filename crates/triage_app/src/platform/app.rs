use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::mem;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info, engine_warn};
use triage_core::{update, AppState, Msg};
use triage_engine::{ReqwestEmailService, ServiceConfig};

use super::effects::EffectRunner;
use super::export::ReportExporter;
use super::ui::commands::{parse_command, UserCommand};
use super::ui::constants::{DEFAULT_REPORT_PATH, HELP_LINES, PROMPT};
use super::ui::render::{render, RenderOptions};

pub struct AppConfig {
    pub service: ServiceConfig,
    pub initial_file: Option<PathBuf>,
    pub color: bool,
}

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced by a finished engine request.
    Core(Msg),
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    engine_info!("Using email service at {}", config.service.base_url());

    let service = ReqwestEmailService::new(config.service)?;
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(service), app_tx.clone())?;
    spawn_input_reader(app_tx);

    let mut app = App::new(runner, RenderOptions { color: config.color });
    match config.initial_file {
        Some(path) => app.dispatch(Msg::FileChosen(path))?,
        None => app.render_view()?,
    }

    while let Ok(event) = app_rx.recv() {
        if app.handle_event(event)?.is_break() {
            break;
        }
    }
    engine_info!("Exiting");
    Ok(())
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if app_tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    engine_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
    exporter: ReportExporter,
    options: RenderOptions,
    /// Page commands typed while the overlay is up; replayed once it clears.
    held: VecDeque<UserCommand>,
    input_closed: bool,
}

impl App {
    fn new(runner: EffectRunner, options: RenderOptions) -> Self {
        Self {
            state: AppState::new(),
            runner,
            exporter: ReportExporter::default(),
            options,
            held: VecDeque::new(),
            input_closed: false,
        }
    }

    fn handle_event(&mut self, event: AppEvent) -> io::Result<ControlFlow<()>> {
        match event {
            AppEvent::Input(line) => match parse_command(&line) {
                Ok(Some(command)) => {
                    if command.is_blocked_by_overlay() && self.is_blocked() {
                        self.held.push_back(command);
                        return Ok(ControlFlow::Continue(()));
                    }
                    if self.run_command(command)?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                Ok(None) => {}
                Err(err) => self.print(&[err.to_string()])?,
            },
            AppEvent::InputClosed => self.input_closed = true,
            AppEvent::Core(msg) => self.dispatch(msg)?,
        }
        self.replay_held()
    }

    fn is_blocked(&self) -> bool {
        self.state.is_busy() || !self.held.is_empty()
    }

    /// Runs held commands until the overlay comes back; quits once input is
    /// closed and nothing is pending.
    fn replay_held(&mut self) -> io::Result<ControlFlow<()>> {
        while !self.state.is_busy() {
            let Some(command) = self.held.pop_front() else {
                break;
            };
            if self.run_command(command)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        if self.input_closed && self.held.is_empty() && !self.state.is_busy() {
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    }

    fn run_command(&mut self, command: UserCommand) -> io::Result<ControlFlow<()>> {
        match command {
            UserCommand::Open(path) => self.dispatch(Msg::FileChosen(path))?,
            UserCommand::Upload => self.dispatch(Msg::UploadClicked)?,
            UserCommand::ToggleBody => self.dispatch(Msg::BodyToggled)?,
            UserCommand::ToggleAttachment(index) => {
                self.dispatch(Msg::AttachmentToggled { index })?
            }
            UserCommand::Proceed => self.dispatch(Msg::ProceedClicked)?,
            UserCommand::Save(path) => self.save_report(path)?,
            UserCommand::Show => self.render_view()?,
            UserCommand::Help => {
                let lines: Vec<String> = HELP_LINES.iter().map(|l| l.to_string()).collect();
                self.print(&lines)?;
            }
            UserCommand::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.render_view()?;
        }
        Ok(())
    }

    fn save_report(&mut self, path: Option<PathBuf>) -> io::Result<()> {
        let Some(report) = self.state.report() else {
            return self.print(&["No report to save yet.".to_string()]);
        };
        let target = path.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));
        let line = match self.exporter.export(report, &target) {
            Ok(written) => {
                engine_info!("Report written to {:?}", written);
                format!("Report saved to {}", written.display())
            }
            Err(err) => {
                engine_error!("Failed to write report to {:?}: {}", target, err);
                format!("Could not save report: {err}")
            }
        };
        self.print(&[line])
    }

    fn render_view(&mut self) -> io::Result<()> {
        let lines = render(&self.state.view(), self.options);
        self.print(&lines)
    }

    fn print(&self, lines: &[String]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        write!(out, "{PROMPT}")?;
        out.flush()
    }
}
