//! ASCII world map
//!
//! ```text
//!    A B C D E
//!  1 ■ □ □ □ □
//!  2 □ □ □ □ □
//! ```

use rpg_core::world::ZoneId;

pub const ZONE_CELL: char = '□';
pub const PLAYER_CELL: char = '■';

/// Map lines for a `width` x `height` grid with the player's zone marked
pub fn map_lines(width: u8, height: u8, player: ZoneId) -> Vec<String> {
    let row_label_width = height.to_string().len();
    let mut lines = Vec::with_capacity(height as usize + 1);

    let header: Vec<String> = ZoneId::grid(width, 1)
        .map(|z| z.column_letter().to_string())
        .collect();
    lines.push(format!("{:>w$} {}", "", header.join(" "), w = row_label_width));

    for row in 0..height {
        let cells: Vec<String> = ZoneId::grid(width, height)
            .filter(|z| z.row() == row)
            .map(|z| {
                if z == player { PLAYER_CELL } else { ZONE_CELL }.to_string()
            })
            .collect();
        lines.push(format!(
            "{:>w$} {}",
            row as u16 + 1,
            cells.join(" "),
            w = row_label_width
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_marks_player() {
        let lines = map_lines(5, 5, "B2".parse().unwrap());
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "  A B C D E");
        assert_eq!(lines[1], "1 □ □ □ □ □");
        assert_eq!(lines[2], "2 □ ■ □ □ □");
    }

    #[test]
    fn test_wide_row_labels_align() {
        let lines = map_lines(2, 12, "A12".parse().unwrap());
        assert_eq!(lines[0], "   A B");
        assert_eq!(lines[1], " 1 □ □");
        assert_eq!(lines[12], "12 ■ □");
    }
}
