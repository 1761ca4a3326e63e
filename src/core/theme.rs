//! Built-in color themes.
//!
//! A theme maps every semantic [`Role`] to an RGB color. Themes are
//! static tables selected by name and swapped wholesale.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// What a piece of text or graph means, independent of its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Border,
    Label,
    Value,
    /// usage below 50%
    Normal,
    /// usage 50% to 80%
    Warning,
    /// usage 80% and above
    Critical,
    Accent,
    Cpu,
    Gpu,
    Memory,
    Disk,
    Network,
    Process,
    Selected,
    GraphFill,
    GraphEmpty,
    Header,
    Footer,
}

impl Role {
    /// Severity role for a usage percentage.
    pub fn for_usage(percent: f64) -> Role {
        if percent < 50.0 {
            Role::Normal
        } else if percent < 80.0 {
            Role::Warning
        } else {
            Role::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub title: Rgb,
    pub border: Rgb,
    pub label: Rgb,
    pub value: Rgb,
    pub normal: Rgb,
    pub warning: Rgb,
    pub critical: Rgb,
    pub accent: Rgb,
    pub cpu: Rgb,
    pub gpu: Rgb,
    pub memory: Rgb,
    pub disk: Rgb,
    pub network: Rgb,
    pub process: Rgb,
    pub selected: Rgb,
    pub graph_fill: Rgb,
    pub graph_empty: Rgb,
    pub header: Rgb,
    pub footer: Rgb,
}

impl Theme {
    pub fn color(&self, role: Role) -> Rgb {
        match role {
            Role::Title => self.title,
            Role::Border => self.border,
            Role::Label => self.label,
            Role::Value => self.value,
            Role::Normal => self.normal,
            Role::Warning => self.warning,
            Role::Critical => self.critical,
            Role::Accent => self.accent,
            Role::Cpu => self.cpu,
            Role::Gpu => self.gpu,
            Role::Memory => self.memory,
            Role::Disk => self.disk,
            Role::Network => self.network,
            Role::Process => self.process,
            Role::Selected => self.selected,
            Role::GraphFill => self.graph_fill,
            Role::GraphEmpty => self.graph_empty,
            Role::Header => self.header,
            Role::Footer => self.footer,
        }
    }

    pub fn usage_color(&self, percent: f64) -> Rgb {
        self.color(Role::for_usage(percent))
    }

    /// Case-insensitive lookup; unknown names get the default theme.
    pub fn by_name(name: &str) -> &'static Theme {
        let key = name.trim().to_lowercase();
        THEMES
            .iter()
            .find(|t| t.key == key)
            .unwrap_or(&THEMES[0])
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|t| t.key)
    }
}

/// Steps through [`THEMES`] in order, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeCycle {
    index: usize,
}

impl ThemeCycle {
    pub fn new(name: &str) -> Self {
        let theme = Theme::by_name(name);
        let index = THEMES.iter().position(|t| t.key == theme.key).unwrap_or(0);
        Self { index }
    }

    pub fn current(&self) -> &'static Theme {
        &THEMES[self.index]
    }

    pub fn next(&mut self) -> &'static Theme {
        self.index = (self.index + 1) % THEMES.len();
        self.current()
    }

    pub fn prev(&mut self) -> &'static Theme {
        self.index = (self.index + THEMES.len() - 1) % THEMES.len();
        self.current()
    }
}

impl Default for ThemeCycle {
    fn default() -> Self {
        Self { index: 0 }
    }
}

pub static THEMES: [Theme; 8] = [
    Theme {
        key: "default",
        name: "Default",
        title: Rgb(85, 255, 255),
        border: Rgb(128, 128, 128),
        label: Rgb(255, 255, 255),
        value: Rgb(229, 229, 229),
        normal: Rgb(85, 255, 85),
        warning: Rgb(255, 255, 85),
        critical: Rgb(255, 85, 85),
        accent: Rgb(255, 85, 255),
        cpu: Rgb(85, 255, 85),
        gpu: Rgb(255, 255, 85),
        memory: Rgb(85, 85, 255),
        disk: Rgb(255, 85, 255),
        network: Rgb(85, 255, 255),
        process: Rgb(255, 255, 255),
        selected: Rgb(85, 255, 255),
        graph_fill: Rgb(85, 255, 255),
        graph_empty: Rgb(128, 128, 128),
        header: Rgb(85, 255, 255),
        footer: Rgb(128, 128, 128),
    },
    Theme {
        key: "dracula",
        name: "Dracula",
        title: Rgb(189, 147, 249),
        border: Rgb(68, 71, 90),
        label: Rgb(248, 248, 242),
        value: Rgb(248, 248, 242),
        normal: Rgb(80, 250, 123),
        warning: Rgb(255, 184, 108),
        critical: Rgb(255, 85, 85),
        accent: Rgb(255, 121, 198),
        cpu: Rgb(80, 250, 123),
        gpu: Rgb(241, 250, 140),
        memory: Rgb(139, 233, 253),
        disk: Rgb(255, 121, 198),
        network: Rgb(139, 233, 253),
        process: Rgb(248, 248, 242),
        selected: Rgb(189, 147, 249),
        graph_fill: Rgb(189, 147, 249),
        graph_empty: Rgb(68, 71, 90),
        header: Rgb(189, 147, 249),
        footer: Rgb(98, 114, 164),
    },
    Theme {
        key: "nord",
        name: "Nord",
        title: Rgb(136, 192, 208),
        border: Rgb(76, 86, 106),
        label: Rgb(236, 239, 244),
        value: Rgb(229, 233, 240),
        normal: Rgb(163, 190, 140),
        warning: Rgb(235, 203, 139),
        critical: Rgb(191, 97, 106),
        accent: Rgb(180, 142, 173),
        cpu: Rgb(163, 190, 140),
        gpu: Rgb(235, 203, 139),
        memory: Rgb(129, 161, 193),
        disk: Rgb(180, 142, 173),
        network: Rgb(136, 192, 208),
        process: Rgb(229, 233, 240),
        selected: Rgb(136, 192, 208),
        graph_fill: Rgb(136, 192, 208),
        graph_empty: Rgb(76, 86, 106),
        header: Rgb(136, 192, 208),
        footer: Rgb(76, 86, 106),
    },
    Theme {
        key: "gruvbox",
        name: "Gruvbox",
        title: Rgb(254, 128, 25),
        border: Rgb(102, 92, 84),
        label: Rgb(235, 219, 178),
        value: Rgb(213, 196, 161),
        normal: Rgb(184, 187, 38),
        warning: Rgb(250, 189, 47),
        critical: Rgb(251, 73, 52),
        accent: Rgb(211, 134, 155),
        cpu: Rgb(184, 187, 38),
        gpu: Rgb(250, 189, 47),
        memory: Rgb(131, 165, 152),
        disk: Rgb(211, 134, 155),
        network: Rgb(254, 128, 25),
        process: Rgb(235, 219, 178),
        selected: Rgb(254, 128, 25),
        graph_fill: Rgb(254, 128, 25),
        graph_empty: Rgb(102, 92, 84),
        header: Rgb(254, 128, 25),
        footer: Rgb(146, 131, 116),
    },
    Theme {
        key: "monokai",
        name: "Monokai",
        title: Rgb(102, 217, 239),
        border: Rgb(117, 113, 94),
        label: Rgb(248, 248, 242),
        value: Rgb(248, 248, 242),
        normal: Rgb(166, 226, 46),
        warning: Rgb(230, 219, 116),
        critical: Rgb(249, 38, 114),
        accent: Rgb(174, 129, 255),
        cpu: Rgb(166, 226, 46),
        gpu: Rgb(230, 219, 116),
        memory: Rgb(102, 217, 239),
        disk: Rgb(174, 129, 255),
        network: Rgb(102, 217, 239),
        process: Rgb(248, 248, 242),
        selected: Rgb(249, 38, 114),
        graph_fill: Rgb(102, 217, 239),
        graph_empty: Rgb(117, 113, 94),
        header: Rgb(102, 217, 239),
        footer: Rgb(117, 113, 94),
    },
    Theme {
        key: "solarized",
        name: "Solarized",
        title: Rgb(38, 139, 210),
        border: Rgb(88, 110, 117),
        label: Rgb(147, 161, 161),
        value: Rgb(131, 148, 150),
        normal: Rgb(133, 153, 0),
        warning: Rgb(181, 137, 0),
        critical: Rgb(220, 50, 47),
        accent: Rgb(108, 113, 196),
        cpu: Rgb(133, 153, 0),
        gpu: Rgb(181, 137, 0),
        memory: Rgb(42, 161, 152),
        disk: Rgb(108, 113, 196),
        network: Rgb(38, 139, 210),
        process: Rgb(147, 161, 161),
        selected: Rgb(38, 139, 210),
        graph_fill: Rgb(38, 139, 210),
        graph_empty: Rgb(88, 110, 117),
        header: Rgb(38, 139, 210),
        footer: Rgb(88, 110, 117),
    },
    Theme {
        key: "tokyo",
        name: "Tokyo Night",
        title: Rgb(122, 162, 247),
        border: Rgb(65, 72, 104),
        label: Rgb(192, 202, 245),
        value: Rgb(169, 177, 214),
        normal: Rgb(158, 206, 106),
        warning: Rgb(224, 175, 104),
        critical: Rgb(247, 118, 142),
        accent: Rgb(187, 154, 247),
        cpu: Rgb(158, 206, 106),
        gpu: Rgb(224, 175, 104),
        memory: Rgb(125, 207, 255),
        disk: Rgb(187, 154, 247),
        network: Rgb(122, 162, 247),
        process: Rgb(192, 202, 245),
        selected: Rgb(255, 158, 100),
        graph_fill: Rgb(122, 162, 247),
        graph_empty: Rgb(65, 72, 104),
        header: Rgb(122, 162, 247),
        footer: Rgb(86, 95, 137),
    },
    Theme {
        key: "catppuccin",
        name: "Catppuccin",
        title: Rgb(137, 180, 250),
        border: Rgb(108, 112, 134),
        label: Rgb(205, 214, 244),
        value: Rgb(186, 194, 222),
        normal: Rgb(166, 227, 161),
        warning: Rgb(249, 226, 175),
        critical: Rgb(243, 139, 168),
        accent: Rgb(203, 166, 247),
        cpu: Rgb(166, 227, 161),
        gpu: Rgb(249, 226, 175),
        memory: Rgb(148, 226, 213),
        disk: Rgb(203, 166, 247),
        network: Rgb(137, 180, 250),
        process: Rgb(205, 214, 244),
        selected: Rgb(245, 194, 231),
        graph_fill: Rgb(137, 180, 250),
        graph_empty: Rgb(108, 112, 134),
        header: Rgb(137, 180, 250),
        footer: Rgb(127, 132, 156),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_thresholds() {
        assert_eq!(Role::for_usage(0.0), Role::Normal);
        assert_eq!(Role::for_usage(49.9), Role::Normal);
        assert_eq!(Role::for_usage(50.0), Role::Warning);
        assert_eq!(Role::for_usage(79.9), Role::Warning);
        assert_eq!(Role::for_usage(80.0), Role::Critical);
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let mut cycle = ThemeCycle::default();
        assert_eq!(cycle.prev().key, "catppuccin");
    }

    #[test]
    fn test_theme_keys_are_unique() {
        let mut keys: Vec<_> = Theme::names().collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), THEMES.len());
    }
}
