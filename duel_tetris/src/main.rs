use clap::Parser;
use console::{Key, Term};
use duel_arena::{Arena, ArenaCommand, StepResult};
use duel_tetris::{
    Action, AnsiTermStyle, DuelConfig, DuelView, MatchEngine, MatchState, PlainTermStyle,
    PlayerInput, TermRender,
};
use tracing_subscriber::EnvFilter;

/// duel_tetris - two player falling blocks with garbage exchange
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board height in cells
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Cell size in pixels for graphical front ends
    #[arg(long, default_value_t = 20)]
    cell_size: u32,

    /// Auto drop interval in milliseconds
    #[arg(long, default_value_t = 500)]
    drop_interval_ms: u64,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seed for the piece and garbage hole sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Render without ANSI colors
    #[arg(long)]
    plain: bool,

    /// Print the final game state as JSON on exit
    #[arg(long)]
    dump_state: bool,
}

const LEGEND: [&str; 5] = [
    "P1: a/d move, w rotate, s drop",
    "P2: arrows move, up rotate, down drop",
    "p pause, r reset, q quit",
    "",
    "Clear 2+ lines to send garbage",
];

type CommandSender = flume::Sender<ArenaCommand<PlayerInput>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout belongs to the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = DuelConfig::default()
        .with_size(args.rows, args.cols)
        .with_cell_size(args.cell_size)
        .with_auto_drop_interval_ms(args.drop_interval_ms)
        .with_target_fps(args.fps)
        .with_seed(args.seed);
    let engine = MatchEngine::new(config)?;
    tracing::debug!("Screen size {:?}", engine.duel().config().screen_size());
    let mut arena = Arena::new(engine.arena_config(), engine)?;

    // Spawn keyboard input task with separate term
    let keyboard_sender = arena.sender();
    let keyboard_task = tokio::task::spawn_blocking(move || {
        let input_term = Term::stdout();
        loop {
            match input_term.read_key() {
                Ok(key) => {
                    if !send_key(&keyboard_sender, key) {
                        break;
                    }
                }
                Err(e) => {
                    // Without input the match can never be quit, treat it as one
                    tracing::error!("Keyboard input failed: {}", e);
                    let _ = keyboard_sender.send(ArenaCommand::Stop);
                    break;
                }
            }
        }
    });

    let render_term = Term::stdout();
    render_term.hide_cursor()?;
    render_term.clear_screen()?;
    render_game(&render_term, arena.game_state(), args.plain)?;

    loop {
        match arena.step().await? {
            StepResult::Stop => break,
            StepResult::GameState(state) => render_game(&render_term, &state, args.plain)?,
            StepResult::Timeout => {}
        }
    }

    keyboard_task.abort();
    let _ = keyboard_task.await;
    render_term.show_cursor()?;

    if args.dump_state {
        println!("{}", arena.game_state().to_json()?);
    }
    Ok(())
}

/// Translate one key press into an arena command. Returns false once the
/// input loop should end.
fn send_key(sender: &CommandSender, key: Key) -> bool {
    let input = |player, action| ArenaCommand::GameAction(PlayerInput::new(player, action));
    let command = match key {
        Key::Char('a') | Key::Char('A') => input(1, Action::MoveLeft),
        Key::Char('d') | Key::Char('D') => input(1, Action::MoveRight),
        Key::Char('w') | Key::Char('W') => input(1, Action::Rotate),
        Key::Char('s') | Key::Char('S') => input(1, Action::SoftDrop),
        Key::ArrowLeft => input(2, Action::MoveLeft),
        Key::ArrowRight => input(2, Action::MoveRight),
        Key::ArrowUp => input(2, Action::Rotate),
        Key::ArrowDown => input(2, Action::SoftDrop),
        Key::Char('p') | Key::Char('P') => ArenaCommand::Pause,
        Key::Char('r') | Key::Char('R') => ArenaCommand::Reset,
        Key::Char('q') | Key::Char('Q') | Key::Escape => {
            let _ = sender.send(ArenaCommand::Stop);
            return false;
        }
        _ => return true,
    };
    sender.send(command).is_ok()
}

fn render_game(term: &Term, state: &MatchState, plain: bool) -> anyhow::Result<()> {
    let legend = LEGEND.iter().map(|line| line.to_string()).collect();
    let view = DuelView::new(state, legend);
    let lines = if plain {
        view.render(&PlainTermStyle)
    } else {
        view.render(&AnsiTermStyle)
    };

    term.move_cursor_to(0, 0)?;
    for line in lines {
        term.write_line(&line)?;
    }
    term.flush()?;
    Ok(())
}
