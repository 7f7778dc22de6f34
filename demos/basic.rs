//! Basic example of using the puzzle engine

use cxn_core::{
    BundledProvider, GuessOutcome, PuzzleProvider, PuzzleSource, Session, SessionConfig,
};
use std::sync::Arc;

fn main() {
    let provider = BundledProvider::new().expect("bundled datasets should parse");
    for source in PuzzleSource::ALL {
        println!("{} puzzles: {}", source, provider.count_puzzles(source));
    }

    // Load a puzzle stored keyed by label; it arrives in canonical shape
    let puzzle = provider
        .fetch_puzzle(1, PuzzleSource::Nyt)
        .expect("puzzle 1 should exist");
    println!("\nCategories:");
    for group in &puzzle.groups {
        println!(
            "  [{}] {}: {}",
            group.level,
            group.commonality,
            group.members.join(", ")
        );
    }

    let groups = puzzle.groups.clone();
    let mut session = Session::with_seed(Arc::new(puzzle), &SessionConfig::default(), 42);

    println!("\nStarting grid:");
    print_grid(&session);

    // A near miss: three from the first category, one from the second
    let near_miss = groups[0].members.iter().take(3).chain(groups[1].members.iter().take(1));
    for word in near_miss {
        session.toggle_cell(word);
    }
    let outcome = session.submit_guess();
    println!(
        "\nGuess {:?} -> {:?} ({})",
        session.selected_cells(),
        outcome,
        session.feedback().unwrap_or("")
    );
    session.deselect_all();

    // Solve everything
    for group in &groups {
        for word in &group.members {
            session.toggle_cell(word);
        }
        if let GuessOutcome::Correct(category) = session.submit_guess() {
            println!("Found: {}", category.commonality);
        }
    }

    session.shuffle();
    println!(
        "\nComplete: {} with {} mistake(s)",
        session.is_complete(),
        session.mistakes()
    );
}

fn print_grid(session: &Session) {
    for row in session.remaining_words() {
        let line: String = row.iter().map(|w| format!("{:<10}", w)).collect();
        println!("  {}", line);
    }
}
