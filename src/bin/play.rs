use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crossbeam_channel::{unbounded, Receiver};
use tripeaks::{
    load_deal_from_json, Card, CardId, ChannelSink, CoverStrategy, GameEvent, GameSession, Pos,
    SessionConfig,
};

#[derive(Debug, Clone, ValueEnum)]
enum CoveringOpt {
    DealOrder,
    Overlap,
}

#[derive(Debug, Parser)]
#[command(name = "play", about = "Tripeaks engine interactive driver")]
struct Args {
    /// Deal JSON path
    #[arg(long, default_value = "data/deal.json")]
    deal: PathBuf,

    /// Covering construction: deal order or geometric overlap
    #[arg(long, value_enum, default_value_t = CoveringOpt::DealOrder)]
    covering: CoveringOpt,

    /// Card extent for overlap covering, as WxH
    #[arg(long, default_value = "240x360")]
    card_size: String,

    /// Semicolon-separated commands to run before reading stdin
    #[arg(long)]
    script: Option<String>,
}

fn parse_card_size(s: &str) -> Result<Pos, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid card size '{s}', expected WxH"))?;
    let x: f32 = w
        .trim()
        .parse()
        .map_err(|e| format!("Invalid card width in '{s}': {e}"))?;
    let y: f32 = h
        .trim()
        .parse()
        .map_err(|e| format!("Invalid card height in '{s}': {e}"))?;
    Ok(Pos { x, y })
}

fn card_label(card: &Card) -> String {
    format!("{:?} of {:?}", card.face(), card.suit())
}

fn print_state(session: &GameSession) {
    let Some(board) = session.board() else {
        println!("[play] no board");
        return;
    };
    println!("[play] phase: {:?}, moves: {}", board.phase(), board.move_count());
    println!("[play] tableau ({} cards):", board.tableau_ids().len());
    for &id in board.tableau_ids() {
        if let Some(card) = board.card(id) {
            let state = if card.covered {
                "face down"
            } else if board.is_blocked(id) {
                "blocked"
            } else {
                "free"
            };
            println!("[play]   {id}: {} ({state})", card_label(card));
        }
    }
    let stack: Vec<String> = board.stack_ids().iter().map(|id| id.to_string()).collect();
    println!("[play] stack (top last): [{}]", stack.join(", "));
    match board.discard_top() {
        Some(top) => println!("[play] discard top: {}: {}", top.id(), card_label(top)),
        None => println!("[play] discard top: none"),
    }
}

fn drain_events(rx: &Receiver<GameEvent>) {
    while let Ok(event) = rx.try_recv() {
        println!("[play] event: {event:?}");
    }
}

/// Returns false when the session should end.
fn run_command(session: &mut GameSession, rx: &Receiver<GameEvent>, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return true;
    };
    match cmd {
        "click" => match parts.next().and_then(|t| t.parse::<u32>().ok()) {
            Some(n) => {
                let result = session.handle_card_click(CardId(n));
                // headless driver: animations finish instantly
                session.set_animation_playing(false);
                match result {
                    Ok(outcome) => println!("[play] moved card {}", outcome.card),
                    Err(e) => println!("[play] rejected: {e}"),
                }
            }
            None => println!("[play] usage: click <id>"),
        },
        "draw" => {
            let top = session
                .board()
                .and_then(|b| b.stack_ids().last().copied());
            match top {
                Some(id) => {
                    let result = session.attempt_draw_top(id);
                    session.set_animation_playing(false);
                    match result {
                        Ok(outcome) => println!("[play] drew card {}", outcome.card),
                        Err(e) => println!("[play] rejected: {e}"),
                    }
                }
                None => println!("[play] stack is empty"),
            }
        }
        "undo" => {
            let result = session.undo();
            session.set_animation_playing(false);
            match result {
                Ok(()) => println!("[play] undone"),
                Err(e) => println!("[play] rejected: {e}"),
            }
        }
        "state" => print_state(session),
        "quit" | "exit" => return false,
        other => println!("[play] unknown command '{other}' (click/draw/undo/state/quit)"),
    }
    drain_events(rx);
    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let deal = load_deal_from_json(&args.deal).map_err(|e| format!("Deal load error: {e}"))?;
    let strategy = match args.covering {
        CoveringOpt::DealOrder => CoverStrategy::DealOrder,
        CoveringOpt::Overlap => CoverStrategy::Overlap {
            card_size: parse_card_size(&args.card_size)?,
        },
    };

    let (tx, rx) = unbounded();
    let mut session = GameSession::new(SessionConfig::default(), Box::new(ChannelSink::new(tx)));
    session
        .start_deal(&deal, strategy)
        .map_err(|e| format!("Deal rejected: {e}"))?;

    println!(
        "[play] deal loaded: {} tableau, {} stack cards",
        deal.tableau.len(),
        deal.stack.len()
    );
    print_state(&session);

    if let Some(script) = &args.script {
        for cmd in script.split(';') {
            if !run_command(&mut session, &rx, cmd.trim()) {
                return Ok(());
            }
        }
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if !run_command(&mut session, &rx, line.trim()) {
            break;
        }
    }

    Ok(())
}
