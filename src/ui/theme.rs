use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub digit: Color,
    pub arrow: Color,
    pub operator: Color,
    pub io: Color,
    pub string: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub cursor_bg: Color,
    pub trail_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    digit: Color::Rgb(250, 179, 135),          // Orange for digits
    arrow: Color::Rgb(137, 180, 250),          // Blue for direction changes
    operator: Color::Rgb(148, 226, 213),       // Teal for stack operations
    io: Color::Rgb(249, 226, 175),             // Yellow for I/O and halt
    string: Color::Rgb(166, 227, 161),         // Green for string literals
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current row
    cursor_bg: Color::Rgb(245, 194, 231),      // Pink block under the cursor
    trail_bg: Color::Rgb(88, 70, 110),         // Recently executed cells
};
