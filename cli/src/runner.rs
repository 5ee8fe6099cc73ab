use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc;

use vanishing_ttt::{
    BotInput, GameMode, GameSession, GameStatus, Mark, SessionPhase, calculate_move,
    check_win_with_line, log, warn,
};

use crate::config::CliConfig;

enum Command {
    Move(usize),
    NewGame,
    ChangeMode,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "q" | "quit" => Command::Quit,
        "n" | "new" => Command::NewGame,
        "m" | "mode" => Command::ChangeMode,
        other => match other.parse::<usize>() {
            Ok(index) => Command::Move(index),
            Err(_) => Command::Unknown(other.to_string()),
        },
    }
}

/// Reads stdin on a dedicated thread; the async loop consumes lines through
/// the channel so it can race them against the bot's thinking delay.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn render(session: &GameSession) {
    let board = &session.game().board;
    println!();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                match board[index] {
                    Mark::Empty => index.to_string(),
                    mark => mark.as_char().to_string(),
                }
            })
            .collect();
        println!(" {}", cells.join(" | "));
        if row < 2 {
            println!("---+---+---");
        }
    }
    println!();
}

fn print_status(session: &GameSession) {
    match session.status() {
        GameStatus::XWon | GameStatus::OWon => {
            let winner = session.status().winner().unwrap();
            if let Some((_, line)) = check_win_with_line(&session.game().board) {
                println!("Player {} wins on line {:?}!", winner.as_char(), line);
            } else {
                println!("Player {} wins!", winner.as_char());
            }
        }
        GameStatus::Draw => println!("Draw."),
        GameStatus::InProgress => {
            if session.is_bot_turn() {
                println!("Bot's turn.");
            } else if session.mode() == Some(GameMode::SingleBot) {
                println!("Your turn (X). Enter a cell 0-8, or n/m/q.");
            } else {
                let mark = session.game().current_mark.as_char();
                println!("Player {}'s turn. Enter a cell 0-8, or n/m/q.", mark);
            }
        }
    }
}

pub async fn run(config: CliConfig, initial_mode: Option<GameMode>) {
    let mut session = GameSession::new();
    if let Some(mode) = initial_mode {
        session.select_mode(mode);
        log!("Starting in {:?} mode", mode);
    }

    let mut commands = spawn_input_reader();

    loop {
        match session.phase() {
            SessionPhase::ModeUnselected => {
                println!("Vanishing Tic Tac Toe");
                println!("  1) Play vs bot");
                println!("  2) Two players");
                println!("  q) Quit");
                let Some(line) = commands.recv().await else {
                    break;
                };
                match line.trim() {
                    "1" => session.select_mode(GameMode::SingleBot),
                    "2" => session.select_mode(GameMode::TwoHuman),
                    "q" | "quit" => break,
                    other => println!("Unknown choice: {}", other),
                }
            }
            SessionPhase::Terminal => {
                render(&session);
                print_status(&session);
                println!("n) new game  m) change mode  q) quit");
                let Some(line) = commands.recv().await else {
                    break;
                };
                match parse_command(&line) {
                    Command::NewGame => session.new_game(),
                    Command::ChangeMode => session.change_mode(),
                    Command::Quit => break,
                    _ => {}
                }
            }
            SessionPhase::InProgress if session.is_bot_turn() => {
                render(&session);
                println!("Bot is thinking...");
                // The delay is cosmetic; a command arriving first wins the
                // select and the pending bot move is dropped.
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(config.bot_delay_ms)) => {
                        let input = BotInput::from_game_state(session.game());
                        let choice = tokio::task::spawn_blocking(move || calculate_move(&input)).await;
                        match choice {
                            Ok(Some(index)) => {
                                if let Err(e) = session.apply_bot_move(index) {
                                    warn!("Bot move to {} rejected: {}", index, e);
                                } else {
                                    log!("Bot played {}", index);
                                }
                            }
                            Ok(None) => warn!("Bot found no move"),
                            Err(e) => warn!("Bot task failed: {}", e),
                        }
                    }
                    line = commands.recv() => {
                        let Some(line) = line else { break };
                        match parse_command(&line) {
                            Command::NewGame => session.new_game(),
                            Command::ChangeMode => session.change_mode(),
                            Command::Quit => break,
                            _ => {}
                        }
                    }
                }
            }
            SessionPhase::InProgress => {
                render(&session);
                print_status(&session);
                let Some(line) = commands.recv().await else {
                    break;
                };
                match parse_command(&line) {
                    Command::Move(index) => {
                        if let Err(e) = session.apply_human_move(index) {
                            println!("Move rejected: {}", e);
                        }
                    }
                    Command::NewGame => session.new_game(),
                    Command::ChangeMode => session.change_mode(),
                    Command::Quit => break,
                    Command::Unknown(other) => println!("Unknown command: {}", other),
                }
            }
        }
    }

    log!("Goodbye");
}
