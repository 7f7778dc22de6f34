use clap::ValueEnum;
use crossterm::style::Color;

/// Theme names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    HighContrast,
}

impl ThemeChoice {
    pub fn next(self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::HighContrast,
            ThemeChoice::HighContrast => ThemeChoice::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Which preset this is
    pub choice: ThemeChoice,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Unselected word tile background
    pub tile_bg: Color,
    /// Selected word tile background
    pub selected_bg: Color,
    /// Selected word tile text
    pub selected_fg: Color,
    /// Cursor highlight color
    pub cursor: Color,
    /// Error color
    pub error: Color,
    /// Success/complete color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Solved category bar colors, easiest first
    pub levels: [Color; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
            ThemeChoice::HighContrast => Self::high_contrast(),
        }
    }

    /// Bar color for a category's difficulty rank, 0 being the easiest;
    /// ranks past the palette use the hardest color
    pub fn rank_color(&self, rank: usize) -> Color {
        self.levels[rank.min(self.levels.len() - 1)]
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            choice: ThemeChoice::Dark,
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            tile_bg: Color::Rgb { r: 45, g: 48, b: 62 },
            selected_bg: Color::Rgb { r: 90, g: 94, b: 120 },
            selected_fg: Color::Rgb { r: 255, g: 255, b: 255 },
            cursor: Color::Rgb { r: 255, g: 210, b: 100 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            levels: [
                Color::Rgb { r: 160, g: 140, b: 40 },
                Color::Rgb { r: 70, g: 130, b: 60 },
                Color::Rgb { r: 60, g: 100, b: 160 },
                Color::Rgb { r: 120, g: 70, b: 150 },
            ],
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            choice: ThemeChoice::Light,
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            tile_bg: Color::Rgb { r: 239, g: 239, b: 230 },
            selected_bg: Color::Rgb { r: 90, g: 89, b: 78 },
            selected_fg: Color::Rgb { r: 248, g: 248, b: 252 },
            cursor: Color::Rgb { r: 200, g: 120, b: 20 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            levels: [
                Color::Rgb { r: 249, g: 223, b: 109 },
                Color::Rgb { r: 160, g: 195, b: 90 },
                Color::Rgb { r: 176, g: 196, b: 239 },
                Color::Rgb { r: 186, g: 129, b: 197 },
            ],
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            choice: ThemeChoice::HighContrast,
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            tile_bg: Color::Black,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            cursor: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            levels: [Color::DarkYellow, Color::DarkGreen, Color::DarkBlue, Color::DarkMagenta],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxn_core::{BundledProvider, PuzzleProvider, PuzzleSource};

    #[test]
    fn test_rank_color_by_difficulty_in_both_datasets() {
        let theme = Theme::dark();
        let provider = BundledProvider::new().unwrap();
        for source in PuzzleSource::ALL {
            let puzzle = provider.fetch_puzzle(1, source).unwrap();
            let hardest = puzzle.groups.iter().max_by_key(|g| g.level).unwrap();
            let easiest = puzzle.groups.iter().min_by_key(|g| g.level).unwrap();
            assert_eq!(theme.rank_color(puzzle.difficulty_rank(hardest)), theme.levels[3]);
            assert_eq!(theme.rank_color(puzzle.difficulty_rank(easiest)), theme.levels[0]);
        }
    }

    #[test]
    fn test_rank_color_saturates() {
        let theme = Theme::light();
        assert_eq!(theme.rank_color(9), theme.levels[3]);
    }
}
