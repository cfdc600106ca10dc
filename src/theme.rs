use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub name: &'static str,
    pub accent_primary: Color,
    pub accent_success: Color,
    pub accent_warning: Color,
    pub accent_danger: Color,
    pub bg_app: Color,
    pub bg_panel: Color,
    pub bg_table_header: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub border_panel: Color,
    pub border_focus: Color,
    pub border_popup: Color,
    pub bg_popup: Color,
    pub bg_selected: Color,
}

pub const THEMES: [ThemePalette; 3] = [
    ThemePalette {
        name: "github_dark",
        accent_primary: Color::Rgb(88, 166, 255),
        accent_success: Color::Rgb(63, 185, 80),
        accent_warning: Color::Rgb(210, 153, 34),
        accent_danger: Color::Rgb(248, 81, 73),
        bg_app: Color::Rgb(13, 17, 23),
        bg_panel: Color::Rgb(22, 27, 34),
        bg_table_header: Color::Rgb(28, 34, 43),
        text_primary: Color::Rgb(230, 237, 243),
        text_muted: Color::Rgb(139, 148, 158),
        border_panel: Color::Rgb(48, 54, 61),
        border_focus: Color::Rgb(105, 138, 255),
        border_popup: Color::Rgb(128, 160, 255),
        bg_popup: Color::Rgb(13, 17, 23),
        bg_selected: Color::Rgb(33, 58, 89),
    },
    ThemePalette {
        name: "midnight",
        accent_primary: Color::Rgb(91, 157, 255),
        accent_success: Color::Rgb(68, 201, 127),
        accent_warning: Color::Rgb(236, 186, 84),
        accent_danger: Color::Rgb(238, 111, 129),
        bg_app: Color::Rgb(9, 13, 20),
        bg_panel: Color::Rgb(15, 20, 31),
        bg_table_header: Color::Rgb(20, 27, 40),
        text_primary: Color::Rgb(226, 234, 250),
        text_muted: Color::Rgb(141, 157, 190),
        border_panel: Color::Rgb(39, 57, 98),
        border_focus: Color::Rgb(115, 156, 255),
        border_popup: Color::Rgb(151, 186, 255),
        bg_popup: Color::Rgb(18, 24, 37),
        bg_selected: Color::Rgb(28, 42, 71),
    },
    ThemePalette {
        name: "graphite",
        accent_primary: Color::Rgb(120, 170, 255),
        accent_success: Color::Rgb(103, 205, 147),
        accent_warning: Color::Rgb(229, 192, 123),
        accent_danger: Color::Rgb(241, 124, 149),
        bg_app: Color::Rgb(16, 18, 22),
        bg_panel: Color::Rgb(24, 27, 34),
        bg_table_header: Color::Rgb(31, 35, 45),
        text_primary: Color::Rgb(231, 236, 245),
        text_muted: Color::Rgb(151, 160, 179),
        border_panel: Color::Rgb(54, 62, 81),
        border_focus: Color::Rgb(132, 177, 255),
        border_popup: Color::Rgb(165, 195, 255),
        bg_popup: Color::Rgb(29, 33, 42),
        bg_selected: Color::Rgb(44, 51, 66),
    },
];

pub fn resolve_theme(name: Option<&str>) -> &'static ThemePalette {
    if let Some(name) = name
        && let Some(theme) = THEMES
            .iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name))
    {
        return theme;
    }
    default_theme()
}

pub fn default_theme() -> &'static ThemePalette {
    &THEMES[0]
}
