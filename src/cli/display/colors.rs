//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Ungrouped images are highlighted so they get a second look
    pub fn get_group_color(&self, ungrouped: bool) -> TableColor {
        if ungrouped {
            self.warning
        } else {
            self.success
        }
    }

    /// Containers without a port are shown muted
    pub fn get_port_color(&self, port: Option<i32>) -> TableColor {
        match port {
            Some(_) => self.info,
            None => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.warning, TableColor::Yellow);
    }

    #[test]
    fn test_group_and_port_colors() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_group_color(true), TableColor::Yellow);
        assert_eq!(theme.get_group_color(false), TableColor::Green);
        assert_eq!(theme.get_port_color(Some(8080)), TableColor::Cyan);
        assert_eq!(theme.get_port_color(None), TableColor::DarkGrey);
    }
}
