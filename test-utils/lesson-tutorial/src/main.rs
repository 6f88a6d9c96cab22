mod clipboard;
mod view;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use clap::Parser;
use clipboard::{Clipboard, CopyOutcome};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lesson_engine::{
    builtin_catalog, read_catalog, Completion, LessonStepController, StepTransition,
    DEFAULT_PROMPT,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

#[derive(Parser)]
#[command(name = "lesson-tutorial")]
#[command(version, about = "Interactive lessons with a simulated terminal", long_about = None)]
struct Args {
    /// Lesson content file (TOML); the bundled Docker lessons are used when omitted
    #[clap(short = 'l', long, env = "LESSON_TUTORIAL_CONTENT")]
    lessons: Option<PathBuf>,

    /// Slug of the lesson to open first
    #[clap(long)]
    lesson: Option<String>,

    /// Prompt shown in front of typed commands
    #[clap(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Write logs to this file (the terminal is owned by the UI)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[clap(short = 'v', long)]
    verbose: bool,
}

struct App {
    should_quit: bool,
    controller: LessonStepController,
    input: Input,
    clipboard: Clipboard,
    message: Option<(String, Color)>,
}

impl App {
    fn new(controller: LessonStepController) -> Self {
        Self {
            should_quit: false,
            controller,
            input: Input::default(),
            clipboard: Clipboard::new(),
            message: None,
        }
    }

    fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.ui(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn ui(&self, f: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Step content + terminal
                Constraint::Length(3), // Command input
                Constraint::Length(3), // Message
                Constraint::Length(2), // Footer
            ])
            .split(f.area());

        let lesson = self.controller.current_lesson();
        let (step, total) = self.controller.progress();
        let header_text = format!(
            "{} {} - step {}/{} [{}]",
            lesson.icon,
            lesson.title,
            step,
            total,
            self.controller.animation_key()
        );
        let header = Paragraph::new(header_text)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        let content = Paragraph::new(view::step_content(self.controller.current_step()))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Lesson"));
        f.render_widget(content, body[0]);

        let config = self.controller.terminal_config();
        let lines = view::terminal_lines(&config, self.controller.session());
        let scroll = view::bottom_scroll(lines.len(), body[1].height.saturating_sub(2));
        let scrollback = Paragraph::new(lines)
            .scroll((scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Terminal"));
        f.render_widget(scrollback, body[1]);

        // Input field
        let prompt_width = config.prompt.chars().count();
        let width = chunks[2].width.max(3) - 3;
        let scroll = self
            .input
            .visual_scroll((width as usize).saturating_sub(prompt_width));
        let input_widget = Paragraph::new(Line::from(vec![
            Span::styled(config.prompt.clone(), Style::default().fg(Color::Green)),
            Span::raw(self.input.value()),
        ]))
        .style(Style::default().fg(Color::Yellow))
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Command (Tab for completion, ↑↓ for history)"),
        );
        f.render_widget(input_widget, chunks[2]);

        f.set_cursor_position((
            chunks[2].x
                + (prompt_width + self.input.visual_cursor().max(scroll) - scroll) as u16
                + 1,
            chunks[2].y + 1,
        ));

        let message = match &self.message {
            Some((msg, color)) => Paragraph::new(msg.as_str())
                .style(Style::default().fg(*color))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Message")),
            None => Paragraph::new("Type 'help' to see available commands")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Hint")),
        };
        f.render_widget(message, chunks[3]);

        let footer_text = "Esc quit | Enter run | Ctrl+N/P step | Ctrl+F/B lesson | Ctrl+Y copy output";
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, chunks[4]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.navigate(StepTransition::NextStep),
            KeyCode::Char('p') if ctrl => self.navigate(StepTransition::PreviousStep),
            KeyCode::Char('f') if ctrl => self.navigate(StepTransition::NextLesson),
            KeyCode::Char('b') if ctrl => self.navigate(StepTransition::PreviousLesson),
            KeyCode::Char('y') if ctrl => self.copy_last_output(),
            KeyCode::Enter => {
                self.controller.submit();
                self.sync_input();
                self.message = None;
            }
            KeyCode::Tab => self.handle_tab_completion(),
            KeyCode::Up => {
                self.controller.recall_previous();
                self.sync_input();
            }
            KeyCode::Down => {
                self.controller.recall_next();
                self.sync_input();
            }
            _ => {
                // Cursor movement must not leave recall mode; only value edits do.
                let changed = self.input.handle_event(&Event::Key(key));
                if changed.is_some_and(|state| state.value) {
                    self.controller.edit_input(self.input.value());
                }
            }
        }
    }

    /// Show the session's input line in the editor widget, cursor at the end
    fn sync_input(&mut self) {
        self.input = Input::default().with_value(self.controller.session().input().to_string());
    }

    fn navigate(&mut self, transition: StepTransition) {
        if self.controller.transition(transition) {
            self.sync_input();
            self.message = None;
            info!(
                "Now on {} step {}",
                self.controller.current_lesson().slug,
                self.controller.step_index()
            );
        }
    }

    fn handle_tab_completion(&mut self) {
        match self.controller.complete() {
            Completion::NoMatch => {
                self.message = Some(("No completions available".to_string(), Color::Gray));
            }
            Completion::Applied => {
                self.sync_input();
                self.message = None;
            }
            Completion::Candidates(candidates) => {
                self.message = Some((
                    format!("Completions: {}", candidates.join(", ")),
                    Color::Gray,
                ));
            }
        }
    }

    fn copy_last_output(&mut self) {
        let Some(entry) = self.controller.session().history().last() else {
            self.message = Some(("Nothing to copy yet".to_string(), Color::Gray));
            return;
        };

        let output = entry.output.clone();
        self.message = Some(match self.clipboard.copy(&output) {
            CopyOutcome::System => ("Copied output to clipboard".to_string(), Color::Green),
            CopyOutcome::Fallback(text) => (
                format!("Clipboard unavailable, select to copy: {}", text),
                Color::Yellow,
            ),
        });
    }
}

fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, args.verbose)?;
    }

    let catalog = match &args.lessons {
        Some(path) => read_catalog(path)
            .await
            .with_context(|| format!("Failed to load lessons from {}", path.display()))?,
        None => builtin_catalog().context("Bundled lessons are invalid")?,
    };

    let mut controller = LessonStepController::new(Arc::new(catalog))?.with_prompt(args.prompt);
    if let Some(slug) = &args.lesson {
        if controller.catalog().lesson_index(slug).is_none() {
            bail!("Unknown lesson: {}", slug);
        }
        controller.go_to_lesson(slug);
    }

    let mut app = App::new(controller);
    app.run()?;
    Ok(())
}
