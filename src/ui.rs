use anyhow::Result;
use bio_record::{BiographicalRecord, Field};
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    Accepted,
    Rejected(String),
}

/// Form state: one text input per record field, applied through the setters
pub struct FormApp {
    pub record: BiographicalRecord,
    pub inputs: [String; 4],
    pub statuses: [Option<FieldStatus>; 4],
    pub focus: usize,
    pub today: NaiveDate,
}

impl FormApp {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            record: BiographicalRecord::new(),
            inputs: Default::default(),
            statuses: Default::default(),
            focus: 0,
            today,
        }
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn previous_field(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    pub fn push_char(&mut self, c: char) {
        self.inputs[self.focus].push(c);
    }

    pub fn pop_char(&mut self) {
        self.inputs[self.focus].pop();
    }

    /// Run the focused field's setter on its input.
    ///
    /// On success focus moves on; on failure it stays so the input can be fixed.
    pub fn submit(&mut self) {
        let field = self.focused_field();
        let input = self.inputs[self.focus].as_str();

        let result = match field {
            Field::Identifier => self.record.set_identifier(input),
            Field::Name => self.record.set_name(input),
            Field::DateOfBirth => self.record.set_date_of_birth(input),
            Field::Major => self.record.set_major(input),
        };

        match result {
            Ok(()) => {
                info!(%field, "field accepted");
                self.statuses[self.focus] = Some(FieldStatus::Accepted);
                self.next_field();
            }
            Err(err) => {
                debug!(%field, error = %err, "field rejected");
                self.statuses[self.focus] = Some(FieldStatus::Rejected(err.to_string()));
            }
        }
    }

    /// Lines for the preview pane: derived values of what has been accepted so far
    pub fn preview(&self) -> Vec<(&'static str, String)> {
        let summary = self.record.summary_on(self.today);
        let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

        vec![
            ("First name", or_dash(summary.first_name)),
            ("Born", or_dash(summary.formatted_date_of_birth)),
            ("Age", or_dash(summary.age.map(|a| a.to_string()))),
            ("Major", or_dash(Some(summary.major).filter(|m| !m.is_empty()))),
        ]
    }
}

pub fn run_ui(app: &mut FormApp) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut FormApp,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Enter => app.submit(),
                KeyCode::Tab | KeyCode::Down => app.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.previous_field(),
                KeyCode::Backspace => app.pop_char(),
                KeyCode::Char(c) => app.push_char(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &FormApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + preview
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_form(f, content[0], app);
    render_preview(f, content[1], app);
    render_status_bar(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &FormApp) {
    let missing = app.record.missing_fields().len();

    let progress = if missing == 0 {
        Span::styled("complete", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            format!("{} field(s) missing", missing),
            Style::default().fg(Color::Yellow),
        )
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Biographical Record",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        progress,
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &FormApp) {
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from("")];

    for (i, field) in Field::ALL.iter().enumerate() {
        let focused = i == app.focus;
        let marker = if focused { "▶ " } else { "  " };

        let input_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<15}", format!("{}:", label(*field))), label_style),
            Span::styled(app.inputs[i].clone(), input_style),
        ]));

        let status = match &app.statuses[i] {
            Some(FieldStatus::Accepted) => {
                Span::styled("   ✓ accepted", Style::default().fg(Color::Green))
            }
            Some(FieldStatus::Rejected(reason)) => {
                Span::styled(format!("   ✗ {}", reason), Style::default().fg(Color::Red))
            }
            None => Span::styled(
                format!("   {}", hint(*field)),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        };
        lines.push(Line::from(status));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Fields "),
    );

    f.render_widget(form, area);
}

fn render_preview(f: &mut Frame, area: Rect, app: &FormApp) {
    let mut lines = vec![Line::from("")];

    for (label, value) in app.preview() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}: ", label),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ]));
        lines.push(Line::from(""));
    }

    let preview = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Preview "),
    );

    f.render_widget(preview, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status_spans = vec![
        Span::raw(" "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Apply | "),
        Span::styled("Tab/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Next | "),
        Span::styled("Shift-Tab/↑", Style::default().fg(Color::Yellow)),
        Span::raw(" Previous | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Identifier => "Id",
        Field::Name => "Name",
        Field::DateOfBirth => "Date of birth",
        Field::Major => "Major",
    }
}

fn hint(field: Field) -> &'static str {
    match field {
        Field::Identifier => "e.g. 13-8994",
        Field::Name => "full name",
        Field::DateOfBirth => "DD/MM/YYYY",
        Field::Major => "CSEN or DMET",
    }
}
