use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{Ansi256Color, AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of terminal output is, independent of the palette it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
  Timestamp,
  Primary,
  Accent,
  Label,
  Value,
  Success,
}

impl Role {
  const fn rgb(self, theme: Theme) -> (u8, u8, u8) {
    match (self, theme) {
      (Self::Timestamp, Theme::Dark) => (122, 140, 160),
      (Self::Timestamp, Theme::Light) => (96, 96, 110),
      (Self::Primary, Theme::Dark) => (200, 120, 190),
      (Self::Primary, Theme::Light) => (110, 40, 100),
      (Self::Accent, Theme::Dark) => (230, 110, 80),
      (Self::Accent, Theme::Light) => (190, 60, 40),
      (Self::Label, Theme::Dark) => (150, 170, 230),
      (Self::Label, Theme::Light) => (50, 80, 160),
      (Self::Value, Theme::Dark) => (240, 220, 130),
      (Self::Value, Theme::Light) => (130, 100, 20),
      (Self::Success, Theme::Dark) => (120, 200, 140),
      (Self::Success, Theme::Light) => (30, 130, 70),
    }
  }
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
      Color::Black => ComfyColor::Black,
      Color::White => ComfyColor::White,
      Color::Red | Color::DarkRed => ComfyColor::Red,
      Color::Green | Color::DarkGreen => ComfyColor::Green,
      Color::Yellow | Color::DarkYellow => ComfyColor::Yellow,
      Color::Blue | Color::DarkBlue => ComfyColor::Blue,
      Color::Magenta | Color::DarkMagenta => ComfyColor::Magenta,
      Color::Cyan | Color::DarkCyan => ComfyColor::Cyan,
      Color::Grey | Color::DarkGrey => ComfyColor::Grey,
      Color::Reset => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = role.rgb(self.theme);
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(Role::Timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(Role::Primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(Role::Accent)
  }

  pub const fn label(&self) -> Color {
    self.pick(Role::Label)
  }

  pub const fn value(&self) -> Color {
    self.pick(Role::Value)
  }

  pub const fn success(&self) -> Color {
    self.pick(Role::Success)
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      Color::Red | Color::DarkRed => Some(ClapColor::Ansi(AnsiColor::Red)),
      Color::Green | Color::DarkGreen => Some(ClapColor::Ansi(AnsiColor::Green)),
      Color::Yellow | Color::DarkYellow => Some(ClapColor::Ansi(AnsiColor::Yellow)),
      Color::Blue | Color::DarkBlue => Some(ClapColor::Ansi(AnsiColor::Blue)),
      Color::Magenta | Color::DarkMagenta => Some(ClapColor::Ansi(AnsiColor::Magenta)),
      Color::Cyan | Color::DarkCyan => Some(ClapColor::Ansi(AnsiColor::Cyan)),
      Color::Grey | Color::DarkGrey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      Color::Black => Some(ClapColor::Ansi(AnsiColor::Black)),
      Color::White => Some(ClapColor::Ansi(AnsiColor::White)),
      Color::Reset => None,
    }
  }

  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);
    let label = Self::to_clap(colors.label());
    let accent = Self::to_clap(colors.accent());
    let success = Self::to_clap(colors.success());

    Styles::styled()
      .header(Style::new().bold().fg_color(label))
      .usage(Style::new().bold().fg_color(label))
      .literal(Style::new().fg_color(success))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.value())))
      .error(Style::new().bold().fg_color(accent))
      .valid(Style::new().fg_color(success))
      .invalid(Style::new().bold().fg_color(accent))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background indices 7 and up are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let bg = value.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if bg >= 7 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    assert_eq!(colors.primary(), Color::Reset);
    assert_eq!(colors.accent(), Color::Reset);
  }

  #[test]
  fn colorfgbg_background_selects_theme() {
    assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
    assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
    assert_eq!(theme_from_colorfgbg("0;default;15"), Some(Theme::Light));
    assert_eq!(theme_from_colorfgbg("garbage"), None);
  }
}
