#![no_main]
use arbiter::chess::board::Board;
use arbiter::chess::layout::Layout;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(layout) = Layout::try_from(s) {
            if let Ok(board) = Board::new(&layout) {
                // Placement printed back is accepted again.
                assert!(Layout::try_from(board.to_string().as_str()).is_ok());
            }
        }
    }
});
