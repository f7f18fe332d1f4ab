#![no_main]
use arbiter::chess::board::Board;
use arbiter::chess::core::Square;
use arbiter::chess::rules::legal_destinations;
use libfuzzer_sys::fuzz_target;

// Every byte picks one of the legal moves of the side to move.
fuzz_target!(|data: &[u8]| {
    let mut board = Board::starting();
    for &choice in data {
        let player = board.side_to_move();
        let moves: Vec<_> = board
            .pieces()
            .filter(|(_, piece, _)| piece.owner == player)
            .flat_map(|(id, _, _)| {
                legal_destinations(&board, id)
                    .into_iter()
                    .map(move |destination: Square| (id, destination))
            })
            .collect();
        if moves.is_empty() {
            return;
        }
        let (piece, destination) = moves[usize::from(choice) % moves.len()];
        let _ = board.apply_move(piece, destination);
        assert!(board.is_consistent());
        assert_eq!(board.at(destination), Some(piece));
        assert_eq!(board.side_to_move(), player.opponent());
    }
});
