// --- Terminal Renderer ---
use crate::ViewerArgs;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifestep::{GameStore, GameView};
use std::io::{Write, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// Draws each cell as its live-neighbor count on a green (alive) or white
/// (dead) background, followed by the step counter and key hints.
fn render(out: &mut impl Write, view: &GameView<'_>, playing: bool) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    for (y, row) in view.board.rows().enumerate() {
        queue!(out, cursor::MoveTo(0, y as u16))?;
        for cell in row {
            let background = if cell.is_alive {
                Color::Green
            } else {
                Color::White
            };
            queue!(
                out,
                SetBackgroundColor(background),
                SetForegroundColor(Color::DarkGrey),
                Print(format!(" {} ", cell.live_neighbors))
            )?;
        }
        queue!(out, ResetColor)?;
    }

    let status_line = view.size as u16 + 1;
    queue!(
        out,
        cursor::MoveTo(0, status_line),
        Print(format!(
            "Step: {} of {}   Size: {}{}",
            view.current_step,
            view.history_len - 1,
            view.size,
            if playing { "   [playing]" } else { "" }
        )),
        cursor::MoveTo(0, status_line + 1)
    )?;

    let hint = |enabled: bool| {
        if enabled {
            Color::Reset
        } else {
            Color::DarkGrey
        }
    };
    queue!(
        out,
        SetForegroundColor(hint(view.can_go_back)),
        Print("[<-] prev  "),
        ResetColor,
        Print("[space] evolve  "),
        SetForegroundColor(hint(view.can_go_forward)),
        Print("[->] next  "),
        ResetColor,
        Print("[r] reset  [+/-] size  [p] play  [q] quit")
    )?;

    out.flush()
}

/// Applies one key press. Returns false when the viewer should quit.
fn handle_key(store: &mut GameStore, code: KeyCode, playing: &mut bool) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char(' ') => store.evolve_board(),
        KeyCode::Left => store.go_to_prev_board(),
        KeyCode::Right => store.go_to_next_board(),
        KeyCode::Char('r') => store.initialize_board(),
        KeyCode::Char('+') | KeyCode::Char('=') => store.set_size(store.size() + 1),
        KeyCode::Char('-') => store.set_size(store.size().saturating_sub(1).max(1)),
        KeyCode::Char('p') => *playing = !*playing,
        _ => {}
    }
    true
}

fn event_loop(
    out: &mut impl Write,
    store: &mut GameStore,
    dirty: &AtomicBool,
    fps: f32,
) -> anyhow::Result<()> {
    let frame_duration = Duration::from_secs_f64(1.0 / f64::from(fps.max(0.1)));
    let mut playing = false;
    let mut last_step = Instant::now();

    loop {
        if dirty.swap(false, Ordering::Relaxed) {
            render(out, &store.view(), playing)?;
        }

        let timeout = if playing {
            frame_duration.saturating_sub(last_step.elapsed())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let was_playing = playing;
                    if !handle_key(store, key.code, &mut playing) {
                        break;
                    }
                    if playing != was_playing {
                        last_step = Instant::now();
                        dirty.store(true, Ordering::Relaxed);
                    }
                }
                Event::Resize(..) => dirty.store(true, Ordering::Relaxed),
                _ => {}
            }
        }

        if playing && last_step.elapsed() >= frame_duration {
            store.evolve_board();
            last_step = Instant::now();
        }
    }

    Ok(())
}

pub fn run(args: ViewerArgs) -> anyhow::Result<()> {
    let mut store = args.store();

    // Redraw whenever the store reports a change.
    let dirty = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&dirty);
    store.subscribe(move |_| flag.store(true, Ordering::Relaxed));

    let mut stdout = stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(cursor::Hide)?;
    terminal::enable_raw_mode()?;

    let result = event_loop(&mut stdout, &mut store, &dirty, args.fps);

    terminal::disable_raw_mode()?;
    stdout.execute(cursor::Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    result
}
