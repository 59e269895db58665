//! Tigers and Goats CLI
//!
//! Thin driver around the engine library: menu, board rendering and
//! input parsing. All game logic and search lives in the library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use baghchal::{
    breakdown, AIEngine, Cell, GameState, Phase, Player, Winner, CELL_COUNT, GOATS_TO_PLACE,
};

/// Tigers and Goats: Bagh-Chal with a minimax AI opponent
#[derive(Parser)]
#[command(name = "baghchal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an AI vs AI demo game
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Demo) => run_game(false, false),
        None => match show_menu()? {
            Some((goat_human, tiger_human)) => run_game(goat_human, tiger_human),
            None => Ok(()),
        },
    }
}

/// Show the mode menu. Returns `(goat_is_human, tiger_is_human)`, or
/// `None` when the player chooses to exit.
fn show_menu() -> Result<Option<(bool, bool)>> {
    println!("=============================================");
    println!("         TIGERS AND GOATS - GAME MENU        ");
    println!("=============================================");
    println!(" 1. Human vs Human");
    println!(" 2. Human (Goat) vs AI (Tiger)");
    println!(" 3. AI (Goat) vs Human (Tiger)");
    println!(" 4. AI vs AI (Demo)");
    println!(" 0. Exit");
    println!("=============================================");

    loop {
        let Some(input) = prompt("Enter your choice (0-4): ")? else {
            return Ok(None);
        };
        match input.as_str() {
            "0" => return Ok(None),
            "1" => return Ok(Some((true, true))),
            "2" => return Ok(Some((true, false))),
            "3" => return Ok(Some((false, true))),
            "4" => return Ok(Some((false, false))),
            _ => println!("Invalid choice. Enter a number between 0 and 4."),
        }
    }
}

fn run_game(goat_human: bool, tiger_human: bool) -> Result<()> {
    print_intro(goat_human, tiger_human);

    let engine = AIEngine::new();
    let mut game = GameState::new();

    while !game.game_over() {
        display(&game);

        let human = match game.turn() {
            Player::Goat => goat_human,
            Player::Tiger => tiger_human,
        };
        if !human {
            if !ai_turn(&engine, &mut game) {
                break;
            }
            continue;
        }

        if game.phase() == Phase::SelectingPiece && game.movable_pieces().is_empty() {
            println!("{} has no legal moves.", side_name(game.turn()));
            break;
        }

        let line = prompt(&format!(
            "\n{} to act - cell 0-22, 'score', 'hint' or 'q': ",
            side_name(game.turn())
        ))?;
        let Some(input) = line else {
            break;
        };
        match input.as_str() {
            "q" => {
                println!("Game ended by player.");
                break;
            }
            "score" => print_score(&game),
            "hint" => {
                ai_turn(&engine, &mut game);
            }
            _ => match input.parse::<usize>() {
                Ok(cell) if cell < CELL_COUNT => {
                    if let Err(err) = game.apply_action(cell) {
                        println!("Invalid move: {err}.");
                    }
                }
                _ => println!("Invalid input. Enter a number between 0 and 22."),
            },
        }
    }

    if let Some(winner) = game.winner() {
        announce(&game, winner);
    }
    Ok(())
}

/// Run one AI action. Returns false when the AI has no legal move.
fn ai_turn(engine: &AIEngine, game: &mut GameState) -> bool {
    let side = side_name(game.turn());
    println!("\n{side} (AI) is thinking...");

    let outcome = engine.select_best_move(game);
    let Some(cell) = outcome.cell else {
        println!("{side} (AI) has no legal move.");
        return false;
    };
    println!(
        "{side} (AI) chooses cell {cell} (score {}, {} ms)",
        outcome.score, outcome.time_ms
    );

    if game.apply_action(cell).is_ok() {
        return true;
    }
    // Keep a demo game moving if a placement was somehow rejected.
    if let Some(spot) = game.empty_cells().first().copied() {
        println!("{side} (AI) retries with cell {spot}");
        return game.apply_action(spot).is_ok();
    }
    false
}

fn print_intro(goat_human: bool, tiger_human: bool) {
    println!("\n=============================================");
    println!("            TIGERS AND GOATS                 ");
    println!("=============================================");
    let mode = match (goat_human, tiger_human) {
        (true, true) => "Human vs Human",
        (true, false) => "Human (Goat) vs AI (Tiger)",
        (false, true) => "AI (Goat) vs Human (Tiger)",
        (false, false) => "AI vs AI (Demo)",
    };
    println!("Game Mode: {mode}");
    println!();
    println!("Rules:");
    println!("- Goats: place all {GOATS_TO_PLACE} goats on empty cells, then move to adjacent empty cells");
    println!("- Tigers: move to adjacent empty cells or jump over goats to capture them");
    println!("- Tigers win by capturing ALL goats");
    println!("- Goats win by blocking every tiger");
    println!("- The game is drawn when both players repeat their exact four-move sequence twice");
    println!();
    println!("Initial board: tigers at cells 0, 3 and 4");
    println!("=============================================");
}

fn display(game: &GameState) {
    let m: Vec<char> = game
        .cells()
        .iter()
        .map(|c| match c {
            Cell::Empty => '.',
            Cell::Goat => 'G',
            Cell::Tiger => 'T',
        })
        .collect();

    println!(
        "
                    {0}_00
   {1}_01     {2}_02  {3}_03  {4}_04  {5}_05     {6}_06
   {7}_07    {8}_08  {9}_09    {10}_10  {11}_11    {12}_12
   {13}_13   {14}_14  {15}_15      {16}_16  {17}_17   {18}_18
         {19}_19  {20}_20        {21}_21  {22}_22
",
        m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12], m[13],
        m[14], m[15], m[16], m[17], m[18], m[19], m[20], m[21], m[22]
    );

    println!("Goats placed: {}/{}", game.goats_placed(), GOATS_TO_PLACE);
    println!("Goats captured: {}/{}", game.goats_captured(), GOATS_TO_PLACE);
    println!(
        "Goats on board: {}",
        game.goats_placed() - game.goats_captured()
    );
    println!("Current turn: {}", side_name(game.turn()));

    match game.phase() {
        Phase::Placing => {
            println!("Remaining goats to place: {}", game.goats_to_place_remaining());
        }
        Phase::SelectingPiece => {
            println!("Movable pieces: {:?}", game.movable_pieces());
        }
        Phase::SelectingDestination => {
            if let Some(src) = game.selected() {
                println!("Destinations for cell {src}: {:?}", game.destinations());
            }
        }
    }

    let log = game.move_log();
    if !log.is_empty() {
        println!("\nRecent moves (source -> destination):");
        for (i, mv) in log.iter().enumerate().skip(log.len().saturating_sub(8)) {
            // Completed moves strictly alternate, goat first.
            let side = if i % 2 == 0 { "Goat" } else { "Tiger" };
            match mv.src {
                Some(src) => println!("{}. {side}: {src} -> {}", i + 1, mv.dst),
                None => println!("{}. {side}: place -> {}", i + 1, mv.dst),
            }
        }
    }
}

fn print_score(game: &GameState) {
    let b = breakdown(game, Player::Tiger);
    println!("Blocked tigers: {}", b.blocked_tigers);
    println!("Goats captured: {}/{}", b.goats_captured, GOATS_TO_PLACE);
    println!("Capturable goats: {}", b.capturable_goats);
    println!("Score (tiger perspective): {}", b.score);
}

fn announce(game: &GameState, winner: Winner) {
    println!("\n==== GAME OVER ====");
    match winner {
        Winner::Tiger => println!(
            "Tigers WIN! All {} goats have been captured.",
            game.goats_captured()
        ),
        Winner::Goat => println!("Goats WIN! Every tiger is blocked."),
        Winner::Draw => println!("Draw: both players repeated their move sequence."),
    }
    display(game);
}

fn side_name(player: Player) -> &'static str {
    match player {
        Player::Goat => "Goat",
        Player::Tiger => "Tiger",
    }
}

/// Print `text`, flush, and read one trimmed line. `None` on EOF.
fn prompt(text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("reading player input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
