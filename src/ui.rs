use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use decimal_calculator::{CalculationResult, Evaluator, Operator};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Operand1,
    Operator,
    Operand2,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Operand1 => Field::Operator,
            Field::Operator => Field::Operand2,
            Field::Operand2 => Field::Operand1,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::Operand1 => Field::Operand2,
            Field::Operator => Field::Operand1,
            Field::Operand2 => Field::Operator,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Field::Operand1 => "First number",
            Field::Operator => "Operator",
            Field::Operand2 => "Second number",
        }
    }
}

pub struct App {
    pub evaluator: Evaluator,
    pub operand1: String,
    pub operand2: String,
    pub operator: Operator,
    pub focus: Field,
    pub result: Option<CalculationResult>,
}

impl App {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            operand1: String::new(),
            operand2: String::new(),
            operator: Operator::Add,
            focus: Field::Operand1,
            result: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn cycle_operator(&mut self, forward: bool) {
        let all = Operator::ALL;
        let current = all.iter().position(|op| *op == self.operator).unwrap_or(0);
        let next = if forward {
            (current + 1) % all.len()
        } else {
            (current + all.len() - 1) % all.len()
        };
        self.operator = all[next];
    }

    /// Handle a typed character for the focused field.
    ///
    /// ASCII `+ - * /` select an operator from any field; operand fields
    /// take everything else as text.
    pub fn input(&mut self, c: char) {
        let shortcut = match c {
            '+' if self.focus == Field::Operator => Some(Operator::Add),
            '-' if self.focus == Field::Operator => Some(Operator::Subtract),
            '*' | 'x' if self.focus == Field::Operator => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '*' => Some(Operator::Multiply),
            _ => None,
        };

        if let Some(op) = shortcut {
            self.operator = op;
            if self.focus == Field::Operand1 {
                self.focus = Field::Operand2;
            }
            return;
        }

        match self.focus {
            Field::Operand1 => self.operand1.push(c),
            Field::Operand2 => self.operand2.push(c),
            Field::Operator => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Operand1 => {
                self.operand1.pop();
            }
            Field::Operand2 => {
                self.operand2.pop();
            }
            Field::Operator => {}
        }
    }

    pub fn clear(&mut self) {
        self.operand1.clear();
        self.operand2.clear();
        self.operator = Operator::Add;
        self.focus = Field::Operand1;
        self.result = None;
    }

    pub fn calculate(&mut self) {
        let result = self
            .evaluator
            .evaluate(&self.operand1, &self.operand2, self.operator.symbol());
        self.result = Some(result);
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !handle_key(app, key) {
                return Ok(());
            }
        }
    }
}

/// Apply a key press. Returns `false` when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear(),
        KeyCode::Enter => app.calculate(),
        KeyCode::Tab => app.next_field(),
        KeyCode::BackTab => app.previous_field(),
        KeyCode::Left if app.focus == Field::Operator => app.cycle_operator(false),
        KeyCode::Right if app.focus == Field::Operator => app.cycle_operator(true),
        KeyCode::Up => app.previous_field(),
        KeyCode::Down => app.next_field(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.input(c),
        _ => {}
    }
    true
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // First operand
            Constraint::Length(3), // Operator
            Constraint::Length(3), // Second operand
            Constraint::Length(3), // Result
            Constraint::Min(0),
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_input(f, chunks[0], app, Field::Operand1, &app.operand1);
    render_operator(f, chunks[1], app);
    render_input(f, chunks[2], app, Field::Operand2, &app.operand2);
    render_result(f, chunks[3], app);
    render_status_bar(f, chunks[5]);
}

fn field_block(app: &App, field: Field) -> Block<'static> {
    let border = if app.focus == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", field.title()))
}

fn render_input(f: &mut Frame, area: Rect, app: &App, field: Field, text: &str) {
    let mut spans = vec![Span::styled(text.to_string(), Style::default().fg(Color::White))];
    if app.focus == field {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let input = Paragraph::new(Line::from(spans)).block(field_block(app, field));
    f.render_widget(input, area);
}

fn render_operator(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];
    for (i, op) in Operator::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }

        let style = if *op == app.operator {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(op.symbol(), style));
    }

    let operators = Paragraph::new(Line::from(spans)).block(field_block(app, Field::Operator));
    f.render_widget(operators, area);
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.result {
        None => Line::from(Span::styled("Press Enter to calculate", Style::default().fg(Color::DarkGray))),
        Some(CalculationResult::Success { value }) => Line::from(vec![
            Span::raw("= "),
            Span::styled(
                value.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Some(CalculationResult::Failure { error }) => {
            Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red)))
        }
    };

    let result = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Result "),
    );

    f.render_widget(result, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);

    let status_spans = vec![
        Span::styled(" Enter", key),
        Span::raw(" Calculate | "),
        Span::styled("Tab", key),
        Span::raw(" Field | "),
        Span::styled("←/→", key),
        Span::raw(" Operator | "),
        Span::styled("Ctrl+L", key),
        Span::raw(" Clear | "),
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
