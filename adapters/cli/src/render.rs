use std::fmt::Write as _;

const EMPTY_SLOT: &str = "___";

/// Formats the board as `index:value` pairs, marking empty slots.
pub(crate) fn board_line(board: &[Option<i64>]) -> String {
    let mut line = String::new();
    for (index, slot) in board.iter().enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        let _ = match slot {
            Some(value) => write!(line, "{index}:{value}"),
            None => write!(line, "{index}:{EMPTY_SLOT}"),
        };
    }
    line
}

/// Formats the undrawn supply, next draw first.
pub(crate) fn supply_line(supply: &[i64]) -> String {
    let values: Vec<String> = supply.iter().rev().map(i64::to_string).collect();
    format!("upcoming: [{}]", values.join(", "))
}
