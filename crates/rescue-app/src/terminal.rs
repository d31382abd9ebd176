use crate::cli;
use crate::controller::GameController;
use rescue_bot::GreedyPolicy;
use rescue_core::AppInfo;
use rescue_core::game::session::{GameView, SearchError};
use rescue_core::model::point::Point;
use rescue_core::model::zone::SEARCH_ZONES;
use rescue_ui::layout;
use rescue_ui::theme::{MapTheme, built_in_themes};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Interactive console front-end: renders the engine's read-only view and
/// dispatches search/reset commands typed by the operator.
pub fn run() -> ExitCode {
    let options = cli::launch_options();
    let mut controller = GameController::new_with_seed(options.seed);
    let mut greedy = GreedyPolicy;
    let theme = built_in_themes().into_iter().next().unwrap_or_default();

    println!(
        "{} {} • {}",
        AppInfo::name(),
        AppInfo::version(),
        theme.name
    );
    println!("Scenario seed {}. Type 'help' for commands.", controller.seed());
    render(&controller.view(), &theme);

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }

        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "1" | "2" | "3" => {
                let number = command.as_bytes()[0] - b'0';
                match controller.search(number) {
                    Ok(_) => render(&controller.view(), &theme),
                    Err(SearchError::GameAlreadyOver) => {
                        println!("The game is over; type 'reset' to start a new scenario.");
                    }
                    Err(SearchError::InvalidChoice(value)) => {
                        println!("No such area: {value}");
                    }
                }
            }
            "auto" => match controller.auto_search(&mut greedy) {
                Some((area, _)) => {
                    println!("Auto search chose {area}.");
                    render(&controller.view(), &theme);
                }
                None => println!("The game is over; type 'reset' to start a new scenario."),
            },
            "reset" => {
                controller.reset();
                println!("New scenario generated (seed {}).", controller.seed());
                render(&controller.view(), &theme);
            }
            "save" => match parts.next() {
                Some(path) => save(&controller, path),
                None => println!("usage: save <path>"),
            },
            "load" => match parts.next() {
                Some(path) => {
                    if load(&mut controller, path) {
                        render(&controller.view(), &theme);
                    }
                }
                None => println!("usage: load <path>"),
            },
            "map" => render(&controller.view(), &theme),
            "status" => println!("{}", controller.status_text()),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command: {other}"),
        }
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!("1|2|3        search the numbered area");
    println!("auto         let the greedy policy pick the next search");
    println!("reset        abandon this scenario and generate a new one");
    println!("save <path>  write the game snapshot as JSON");
    println!("load <path>  restore a snapshot written by save");
    println!("map          redraw the map and status");
    println!("status       one-line probability summary");
    println!("quit         leave the console");
}

fn save(controller: &GameController, path: &str) {
    match controller.save_json() {
        Ok(json) => match std::fs::write(path, json) {
            Ok(()) => println!("Saved to {path}"),
            Err(err) => eprintln!("Failed to write {path}: {err}"),
        },
        Err(err) => eprintln!("Failed to capture snapshot: {err}"),
    }
}

fn load(controller: &mut GameController, path: &str) -> bool {
    match std::fs::read_to_string(path) {
        Ok(json) => match controller.load_json(&json) {
            Ok(()) => {
                println!("Loaded {path}");
                true
            }
            Err(err) => {
                eprintln!("Failed to parse {path}: {err}");
                false
            }
        },
        Err(err) => {
            eprintln!("Failed to read {path}: {err}");
            false
        }
    }
}

fn render(view: &GameView, theme: &MapTheme) {
    let mut grid = vec![vec![theme.water_glyph; layout::GRID_COLS]; layout::GRID_ROWS];

    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let (x, y) = layout::cell_center(col, row);
            let point = Point::new(x, y);
            for (index, zone) in SEARCH_ZONES.iter().enumerate() {
                if zone.contains(point) {
                    *cell = theme.zone_glyphs[index];
                }
            }
        }
    }

    if let Some((col, row)) = layout::to_cell(view.last_known_position.x, view.last_known_position.y)
    {
        grid[row][col] = theme.last_known_glyph;
    }
    if let Some(position) = view.sailor_position {
        if let Some((col, row)) = layout::to_cell(position.x, position.y) {
            grid[row][col] = theme.sailor_glyph;
        }
    }

    for row in &grid {
        println!("{}", row.iter().collect::<String>());
    }

    println!("Search Number: {}", view.search_num);
    if view.game_over {
        println!(
            "Residual mass (no longer a distribution): P1 = {:.3}, P2 = {:.3}, P3 = {:.3}",
            view.p1, view.p2, view.p3
        );
    } else {
        println!(
            "Probabilities: P1 = {:.3}, P2 = {:.3}, P3 = {:.3}",
            view.p1, view.p2, view.p3
        );
    }
    if !view.message.is_empty() {
        println!("{}", view.message);
    }
}
