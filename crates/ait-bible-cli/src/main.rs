use ait_bible_config::Config;
use ait_bible_engine::{
    Book, BookStore, Chapter, Glossary, GlossaryTerm, IoError, export_book, io,
    parsing::emphasis::{Emphasis, render_emphasis},
    render_verse, search,
};
use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
    sync::Arc,
};

const USAGE: &str = "Usage:
  ait-bible [book-id] [data-dir]
  ait-bible --export <book-id> <out.json> [data-dir]
  ait-bible --search <query> [data-dir]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Read {
        book: Option<String>,
        data_dir: Option<PathBuf>,
    },
    Export {
        book: String,
        out: PathBuf,
        data_dir: Option<PathBuf>,
    },
    Search {
        query: String,
        data_dir: Option<PathBuf>,
    },
}

/// Parses arguments after the program name.
fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [flag, book, out, rest @ ..] if flag == "--export" && rest.len() <= 1 => Some(Command::Export {
            book: book.clone(),
            out: PathBuf::from(out),
            data_dir: rest.first().map(PathBuf::from),
        }),
        [flag, query, rest @ ..] if flag == "--search" && rest.len() <= 1 => Some(Command::Search {
            query: query.clone(),
            data_dir: rest.first().map(PathBuf::from),
        }),
        [first, ..] if first.starts_with("--") => None,
        [] => Some(Command::Read {
            book: None,
            data_dir: None,
        }),
        [book] => Some(Command::Read {
            book: Some(book.clone()),
            data_dir: None,
        }),
        [book, data_dir] => Some(Command::Read {
            book: Some(book.clone()),
            data_dir: Some(PathBuf::from(data_dir)),
        }),
        _ => None,
    }
}

/// Command-line data directory wins over the config file's.
fn resolve_config(data_dir: Option<PathBuf>) -> Result<Config> {
    let loaded = Config::load().context("Failed to load config file")?;
    let config = match (data_dir, loaded) {
        (Some(data_path), Some(config)) => Config {
            data_path,
            ..config
        },
        (Some(data_path), None) => Config::new(data_path),
        (None, Some(config)) => config,
        (None, None) => bail!(
            "No data directory provided and no config file found at {}",
            Config::config_path().display()
        ),
    };
    io::validate_data_dir(&config.data_path)
        .with_context(|| format!("Data path '{}' is invalid", config.data_path.display()))?;
    Ok(config)
}

/// A missing or broken glossary only disables term highlighting.
fn load_glossary(config: &Config) -> Glossary {
    match io::load_glossary(&config.glossary_file()) {
        Ok(glossary) => glossary,
        Err(IoError::NotFound(path)) => {
            log::warn!("No glossary at {}, terms will not be highlighted", path.display());
            Glossary::default()
        }
        Err(e) => {
            log::warn!("Ignoring glossary: {e}");
            Glossary::default()
        }
    }
}

fn open_book(store: &BookStore, id: &str) -> Result<Arc<Book>> {
    match store.book(id)? {
        Some(book) => Ok(book),
        None => bail!(
            "No book '{id}' in {} (available: {})",
            store.data_dir().display(),
            store.book_ids()?.join(", ")
        ),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{USAGE}");
        process::exit(1);
    };

    match command {
        Command::Export {
            book,
            out,
            data_dir,
        } => {
            let config = resolve_config(data_dir)?;
            let store = BookStore::new(&config.data_path);
            let book = open_book(&store, &book)?;
            io::write_export(&out, &export_book(&book))?;
            println!("Exported {} to {}", book.name, out.display());
            Ok(())
        }
        Command::Search { query, data_dir } => {
            let config = resolve_config(data_dir)?;
            let books = BookStore::new(&config.data_path).books()?;
            for hit in search(books.iter().map(|b| b.as_ref()), &query) {
                println!("{} {}:{}  {}", hit.book, hit.chapter, hit.verse, hit.text);
            }
            Ok(())
        }
        Command::Read { book, data_dir } => {
            let config = resolve_config(data_dir)?;
            let store = BookStore::new(&config.data_path);
            let book_id = match book.or_else(|| config.default_book.clone()) {
                Some(id) => id,
                None => match store.book_ids()?.into_iter().next() {
                    Some(id) => id,
                    None => bail!("No books in {}", config.data_path.display()),
                },
            };
            let book = open_book(&store, &book_id)?;
            let glossary = load_glossary(&config);
            run_reader(App::new(book, glossary))
        }
    }
}

struct App {
    book: Arc<Book>,
    glossary: Glossary,
    chapter_state: ListState,
    scroll: u16,
    show_notes: bool,
}

impl App {
    fn new(book: Arc<Book>, glossary: Glossary) -> Self {
        let mut chapter_state = ListState::default();
        if !book.chapters.is_empty() {
            chapter_state.select(Some(0));
        }
        Self {
            book,
            glossary,
            chapter_state,
            scroll: 0,
            show_notes: true,
        }
    }

    fn chapter(&self) -> Option<&Chapter> {
        self.book.chapters.get(self.chapter_state.selected()?)
    }

    fn next_chapter(&mut self) {
        let count = self.book.chapters.len();
        if count == 0 {
            return;
        }
        let i = self.chapter_state.selected().map_or(0, |i| (i + 1) % count);
        self.chapter_state.select(Some(i));
        self.scroll = 0;
    }

    fn previous_chapter(&mut self) {
        let count = self.book.chapters.len();
        if count == 0 {
            return;
        }
        let i = match self.chapter_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.chapter_state.select(Some(i));
        self.scroll = 0;
    }
}

fn run_reader(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

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

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_chapter(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_chapter(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll = app.scroll.saturating_add(10),
                KeyCode::PageUp => app.scroll = app.scroll.saturating_sub(10),
                KeyCode::Char('n') => app.show_notes = !app.show_notes,
                _ => {}
            }
        }
    }
}

fn speaker_style(speaker: &str) -> Style {
    let color = match speaker.to_lowercase().as_str() {
        "jesus" => Color::Red,
        "god" => Color::Yellow,
        "angel" => Color::Cyan,
        "scripture" => Color::Magenta,
        "crowd" => Color::Green,
        _ => Color::Blue,
    };
    Style::default().fg(color)
}

/// One line per paragraph, verse numbers inline, followed by a blank line.
fn chapter_lines<'a>(chapter: &'a Chapter, glossary: &'a Glossary) -> Vec<Line<'a>> {
    let mut lines = vec![];
    for paragraph in chapter.paragraphs() {
        let mut spans = vec![];
        for verse in paragraph {
            spans.push(Span::styled(
                format!("{} ", verse.number()),
                Style::default().fg(Color::DarkGray),
            ));
            for run in render_verse(verse, glossary) {
                let mut style = run.speaker.map(speaker_style).unwrap_or_default();
                if run.term.is_some() {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(run.text, style));
            }
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }
    lines
}

/// Glossary terms found in the chapter, in first-appearance order.
fn chapter_terms<'a>(chapter: &'a Chapter, glossary: &'a Glossary) -> Vec<&'a GlossaryTerm> {
    let mut terms: Vec<&GlossaryTerm> = vec![];
    for verse in &chapter.verses {
        for term in render_verse(verse, glossary).into_iter().filter_map(|r| r.term) {
            if !terms.iter().any(|t| t.id == term.id) {
                terms.push(term);
            }
        }
    }
    terms
}

fn emphasis_spans(text: &str) -> Vec<Span<'static>> {
    render_emphasis(text)
        .into_iter()
        .map(|run| match run {
            Emphasis::Plain(s) => Span::raw(s),
            Emphasis::Bold(s) => Span::styled(s, Style::default().add_modifier(Modifier::BOLD)),
            Emphasis::Italic(s) => Span::styled(s, Style::default().add_modifier(Modifier::ITALIC)),
        })
        .collect()
}

fn notes_lines<'a>(chapter: &'a Chapter, glossary: &'a Glossary) -> Vec<Line<'a>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![];
    for verse in &chapter.verses {
        for note in &verse.notes {
            let prefix = match note.term.as_str() {
                "" => format!("{} ", verse.number()),
                term => format!("{} {term}: ", verse.number()),
            };
            let mut spans = vec![Span::styled(prefix, label)];
            spans.extend(emphasis_spans(&note.explanation));
            lines.push(Line::from(spans));
        }
    }

    let terms = chapter_terms(chapter, glossary);
    if !terms.is_empty() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::styled("Glossary", label.add_modifier(Modifier::UNDERLINED)));
    }
    for term in terms {
        let mut spans = vec![Span::styled(format!("{}: ", term.rendering), label)];
        spans.extend(emphasis_spans(&term.brief_gloss));
        if let Some(category) = glossary.category(&term.category) {
            spans.push(Span::styled(
                format!(" ({})", category.name),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(rows[0]);

    // Chapter list panel
    let chapter_items: Vec<ListItem> = app
        .book
        .chapters
        .iter()
        .map(|c| ListItem::new(Line::from(format!("Chapter {}", c.number))))
        .collect();
    let chapter_list = List::new(chapter_items)
        .block(Block::default().borders(Borders::ALL).title(app.book.name.as_str()))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(chapter_list, columns[0], &mut app.chapter_state);

    let Some(chapter) = app.chapter() else {
        f.render_widget(
            Paragraph::new("This book has no chapters").block(Block::default().borders(Borders::ALL)),
            columns[1],
        );
        return;
    };

    let (text_area, notes_area) = if app.show_notes {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[1]);
        (split[0], Some(split[1]))
    } else {
        (columns[1], None)
    };

    // Chapter text panel
    let text = Paragraph::new(chapter_lines(chapter, &app.glossary))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} {}", app.book.name, chapter.number)),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));
    f.render_widget(text, text_area);

    // Notes panel
    if let Some(area) = notes_area {
        let notes = Paragraph::new(notes_lines(chapter, &app.glossary))
            .block(Block::default().borders(Borders::ALL).title("Notes"))
            .wrap(Wrap { trim: true });
        f.render_widget(notes, area);
    }

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Chapter | "),
        Span::raw("PgUp/PgDn: Scroll | "),
        Span::raw("n: Notes"),
    ]);
    f.render_widget(Paragraph::new(help), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ait_bible_engine::parse_book;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const BOOK: &str = r#"<ait version="1.0"><book id="mark" name="Mark"><chapter num="1">
        <verse num="1"><text><p/>The beginning of the good news of Jesus the Messiah.</text>
          <note term="good news">Greek *euangelion*.</note></verse>
        <verse num="2"><text>As it is written, <q who="scripture">Prepare the way.</q></text></verse>
        <verse num="3"><text><p/>John appeared in the wilderness.</text><note>A **voice** crying out.</note></verse>
    </chapter></book></ait>"#;

    fn glossary() -> Glossary {
        Glossary::from_json(
            r#"{"terms":[{"id":"messiah","lemma":"Χριστός","aitRendering":"Messiah","category":"loanword","brief":"The *anointed* one"}]}"#,
        )
        .unwrap()
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[rstest]
    #[case(&[], Some(Command::Read { book: None, data_dir: None }))]
    #[case(&["john"], Some(Command::Read { book: Some("john".into()), data_dir: None }))]
    #[case(&["john", "/data"], Some(Command::Read { book: Some("john".into()), data_dir: Some("/data".into()) }))]
    #[case(&["--export", "john", "out.json"], Some(Command::Export { book: "john".into(), out: "out.json".into(), data_dir: None }))]
    #[case(&["--export", "john", "out.json", "/data"], Some(Command::Export { book: "john".into(), out: "out.json".into(), data_dir: Some("/data".into()) }))]
    #[case(&["--search", "living water"], Some(Command::Search { query: "living water".into(), data_dir: None }))]
    #[case(&["--export", "john"], None)]
    #[case(&["--help"], None)]
    #[case(&["a", "b", "c"], None)]
    fn parses_arguments(#[case] input: &[&str], #[case] expected: Option<Command>) {
        assert_eq!(parse_args(&args(input)), expected);
    }

    #[test]
    fn chapter_lines_group_paragraphs() {
        let book = parse_book(BOOK).unwrap().unwrap();
        let glossary = glossary();
        let lines = chapter_lines(&book.chapters[0], &glossary);

        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(
            texts,
            vec![
                "1 The beginning of the good news of Jesus the Messiah. 2 As it is written, Prepare the way. ",
                "",
                "3 John appeared in the wilderness. ",
                "",
            ]
        );
    }

    #[test]
    fn glossary_terms_are_underlined() {
        let book = parse_book(BOOK).unwrap().unwrap();
        let glossary = glossary();
        let lines = chapter_lines(&book.chapters[0], &glossary);

        let underlined: Vec<&str> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::UNDERLINED))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(underlined, vec!["Messiah"]);
    }

    #[test]
    fn notes_list_notes_then_terms() {
        let book = parse_book(BOOK).unwrap().unwrap();
        let glossary = glossary();
        let texts: Vec<String> = notes_lines(&book.chapters[0], &glossary)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "1 good news: Greek euangelion.",
                "3 A voice crying out.",
                "",
                "Glossary",
                "Messiah: The anointed one (Loanwords)",
            ]
        );
    }

    #[test]
    fn emphasis_becomes_modifiers() {
        let spans = emphasis_spans("a **b** *c*");
        let styled: Vec<(&str, bool, bool)> = spans
            .iter()
            .map(|s| {
                (
                    s.content.as_ref(),
                    s.style.add_modifier.contains(Modifier::BOLD),
                    s.style.add_modifier.contains(Modifier::ITALIC),
                )
            })
            .collect();
        assert_eq!(
            styled,
            vec![("a ", false, false), ("b", true, false), (" ", false, false), ("c", false, true)]
        );
    }

    #[test]
    fn chapter_navigation_wraps() {
        let book = Arc::new(parse_book(BOOK).unwrap().unwrap());
        let mut app = App::new(book, Glossary::default());
        app.scroll = 5;
        app.next_chapter();
        assert_eq!(app.chapter_state.selected(), Some(0));
        assert_eq!(app.scroll, 0);
        app.previous_chapter();
        assert_eq!(app.chapter().map(|c| c.number), Some(1));
    }
}
