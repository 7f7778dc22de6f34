use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use cxn_core::{Category, Session, GROUP_SIZE, ROW_WIDTH};
use std::io;

/// Width of one word tile, borders excluded
const TILE_WIDTH: u16 = 14;
/// Full grid width: tiles plus a border on each side of every tile
const GRID_WIDTH: u16 = (TILE_WIDTH + 1) * ROW_WIDTH as u16 + 1;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;
    execute!(stdout, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;
    render_game_screen(stdout, app, term_width, term_height)?;
    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    // Grid + gap + info panel
    let total_width = GRID_WIDTH + 24;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > 24 { 2 } else { 1 };

    let Some(session) = app.board.session() else {
        render_no_puzzle(stdout, app, start_x, start_y)?;
        if let Some(msg) = app.message() {
            render_message(stdout, app, msg, term_width)?;
        }
        return Ok(());
    };

    let mut y = start_y;
    for category in session.correct_guesses() {
        let rank = session.puzzle().difficulty_rank(category);
        render_solved_bar(stdout, app, category, rank, start_x, y)?;
        y += 2;
    }

    let grid_top = y;
    render_grid(stdout, app, session, start_x, grid_top)?;
    let grid_height = session.remaining_words().len() as u16 * 2 + 1;

    render_info_panel(stdout, app, session, start_x + GRID_WIDTH + 3, start_y)?;

    let mut controls_y = grid_top + grid_height + 1;
    if app.screen_state == ScreenState::Complete {
        render_complete_banner(stdout, app, session, start_x, controls_y)?;
        controls_y += 2;
    }
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(msg) = app.message() {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_solved_bar(
    stdout: &mut io::Stdout,
    app: &App,
    category: &Category,
    rank: usize,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let width = GRID_WIDTH as usize;
    let title = fit(&category.commonality.to_uppercase(), width);
    let members = fit(&category.members.join(", "), width);

    execute!(
        stdout,
        SetBackgroundColor(theme.rank_color(rank)),
        SetForegroundColor(theme.fg),
        MoveTo(x, y),
        Print(format!("{:^width$}", title, width = width)),
        MoveTo(x, y + 1),
        Print(format!("{:^width$}", members, width = width)),
        SetBackgroundColor(theme.bg)
    )?;
    Ok(())
}

fn render_grid(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let rows = session.remaining_words();
    if rows.is_empty() {
        return Ok(());
    }

    let separator = format!(
        "+{}",
        format!("{}+", "-".repeat(TILE_WIDTH as usize)).repeat(ROW_WIDTH)
    );

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        MoveTo(x, y),
        Print(&separator)
    )?;

    for (row, words) in rows.iter().enumerate() {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for (col, word) in words.iter().enumerate() {
            execute!(
                stdout,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
            render_tile(stdout, app, session, word, app.cursor == (row, col))?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|"),
            MoveTo(x, cell_y + 1),
            Print(&separator)
        )?;
    }

    Ok(())
}

fn render_tile(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    word: &str,
    is_cursor: bool,
) -> io::Result<()> {
    let theme = &app.theme;
    let (bg, fg) = if session.is_selected(word) {
        (theme.selected_bg, theme.selected_fg)
    } else {
        (theme.tile_bg, theme.fg)
    };
    let fg = if is_cursor { theme.cursor } else { fg };

    let label = fit(word, TILE_WIDTH as usize - 2);
    let text = if is_cursor {
        format!(">{:^width$}<", label, width = TILE_WIDTH as usize - 2)
    } else {
        format!("{:^width$}", label, width = TILE_WIDTH as usize)
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(text)
    )?;
    Ok(())
}

fn render_info_panel(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let board = &app.board;

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ CONNECTIONS ═══"),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!(
            "Puzzle: {:>6}",
            format!("{}/{}", board.index(), board.count_puzzles())
        )),
        MoveTo(x, y + 3),
        Print(format!("Source: {:>6}", board.source().to_string()))
    )?;

    let found = session.correct_guesses().len();
    let total = session.puzzle().groups.len();
    execute!(
        stdout,
        MoveTo(x, y + 5),
        SetForegroundColor(if found == total { theme.success } else { theme.info }),
        Print(format!("Found:  {:>6}", format!("{}/{}", found, total))),
        MoveTo(x, y + 6),
        SetForegroundColor(if session.mistakes() > 0 { theme.error } else { theme.info }),
        Print(format!("Wrong:  {:>6}", session.mistakes()))
    )?;

    let selected = session.selected_cells().len();
    let selected_color = if session.can_submit() { theme.success } else { theme.fg };
    execute!(
        stdout,
        MoveTo(x, y + 8),
        SetForegroundColor(theme.info),
        Print("Selected: "),
        SetForegroundColor(selected_color),
        Print(format!("{}/{}", selected, GROUP_SIZE))
    )?;

    Ok(())
}

fn render_complete_banner(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let text = match session.mistakes() {
        0 => "Perfect! Solved without a mistake".to_string(),
        1 => "Solved with 1 mistake".to_string(),
        n => format!("Solved with {} mistakes", n),
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.success),
        Print(format!("{:^width$}", text, width = GRID_WIDTH as usize))
    )?;
    Ok(())
}

fn render_no_puzzle(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let board = &app.board;
    let text = match board.last_error() {
        Some(err) => format!("Could not load puzzle: {}", err),
        None => format!("Loading {} puzzle {}...", board.source(), board.index()),
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(if board.last_error().is_some() { theme.error } else { theme.info }),
        Print(text)
    )?;
    render_controls(stdout, app, x, y + 2)
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space", "Select"),
        ("g", "Guess"),
        ("d/Esc", "Deselect all"),
        ("s", "Shuffle"),
        ("r", "Restart"),
        ("n/p", "Next/prev"),
        ("o", "Source"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 4
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 24;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(Color::Black),
        SetBackgroundColor(theme.key),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

/// Truncate text to `width` characters, marking the cut with '~'
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
