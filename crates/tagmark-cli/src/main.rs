use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};
use tagmark_config::Config;
use tagmark_engine::{ExtractOptions, Index, NoteFile, SpanRecord, io};

struct App {
    notes_path: PathBuf,
    opts: ExtractOptions,
    notes: Vec<NoteFile>,
    index: Index,
    note_list_state: ListState,
    current_records: Vec<String>,
}

impl App {
    fn new(notes_path: PathBuf, opts: ExtractOptions) -> Result<Self> {
        let notes = io::note_files(&notes_path)?;
        let index = io::index_vault(&notes_path, opts)?;

        let mut app = Self {
            notes_path,
            opts,
            notes,
            index,
            note_list_state: ListState::default(),
            current_records: Vec::new(),
        };

        if !app.notes.is_empty() {
            app.note_list_state.select(Some(0));
            app.update_records_for_selection();
        }

        Ok(app)
    }

    fn next_note(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        let i = match self.note_list_state.selected() {
            Some(i) => (i + 1) % self.notes.len(),
            None => 0,
        };
        self.note_list_state.select(Some(i));
        self.update_records_for_selection();
    }

    fn previous_note(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        let i = match self.note_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.notes.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.note_list_state.select(Some(i));
        self.update_records_for_selection();
    }

    fn reindex(&mut self) -> Result<()> {
        self.notes = io::note_files(&self.notes_path)?;
        self.index = io::index_vault(&self.notes_path, self.opts)?;
        if self.note_list_state.selected().is_none_or(|i| i >= self.notes.len()) {
            self.note_list_state
                .select(if self.notes.is_empty() { None } else { Some(0) });
        }
        self.update_records_for_selection();
        Ok(())
    }

    fn update_records_for_selection(&mut self) {
        self.current_records.clear();
        let Some(index) = self.note_list_state.selected() else {
            return;
        };
        let Some(note) = self.notes.get(index) else {
            return;
        };
        for record in self.index.all().iter().filter(|r| r.file == note.id()) {
            self.current_records.push(format_record(record));
        }
        if self.current_records.is_empty() {
            self.current_records
                .push("No tagged spans in this note".to_string());
        }
    }
}

fn format_record(record: &SpanRecord) -> String {
    let kind = match record.kind {
        tagmark_engine::SpanKind::Mark => "mark",
        tagmark_engine::SpanKind::Custom => "custom",
    };
    let tags = record
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    let attrs = if record.attrs.is_empty() {
        String::new()
    } else {
        let pairs = record
            .attrs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        format!(" ({pairs})")
    };
    format!(
        "L{:<4} [{kind}] {} :: {tags}{attrs}",
        record.line + 1,
        record.text
    )
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_note(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_note(),
                KeyCode::Char('r') => {
                    let _ = app.reindex();
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Note list panel
    let note_items: Vec<ListItem> = app
        .notes
        .iter()
        .map(|note| {
            let count = app.index.all().iter().filter(|r| r.file == note.id()).count();
            let display_text = format!("{} ({count})", note.id());
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let notes_list = List::new(note_items)
        .block(Block::default().borders(Borders::ALL).title("Notes"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(notes_list, chunks[0], &mut app.note_list_state);

    // Tagged spans panel
    let record_text = if app.current_records.is_empty() {
        vec![Line::from("Select a note to view its tagged spans")]
    } else {
        app.current_records
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let records = Paragraph::new(record_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tagged spans ({} total)", app.index.len())),
        )
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(records, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("r: Re-index"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);
    let json_export = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    let config_path = Config::config_path();

    let notes_path;
    let opts;
    let from_config;

    if args.len() == 1 {
        // CLI argument provided - use it with default toggles
        notes_path = PathBuf::from(&args[0]);
        opts = ExtractOptions::default();
        from_config = false;
    } else if args.is_empty() {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                notes_path = config.notes_path;
                opts = ExtractOptions {
                    inner: config.enable_inner,
                    outer: config.enable_outer,
                };
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No notes path provided and no config file found");
                eprintln!("Usage: {program} [notes-folder-path] [--json]");
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {program} [notes-folder-path] [--json]");
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {program} [notes-folder-path] [--json]");
        process::exit(1);
    };

    // Validate notes directory using engine
    if let Err(e) = io::validate_notes_dir(&notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            notes_path.display(),
            source
        );
        process::exit(1);
    }

    if json_export {
        let index = io::index_vault(&notes_path, opts)?;
        println!("{}", index.to_json()?);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(notes_path, opts)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}
