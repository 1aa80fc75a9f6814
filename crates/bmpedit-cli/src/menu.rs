//! The numbered menu: rendering and selection parsing.

use std::io::{self, Write};

use bmpedit_core::FilterKind;

/// Menu entry that switches the current input file.
pub const CHANGE_IMAGE: i64 = 11;

/// What a line typed at the menu prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Quit,
    Filter(FilterKind),
    ChangeImage,
    /// Not a number, zero, or a number past the last entry; the menu is shown again.
    Invalid,
}

/// Interpret the first token of a menu line.
pub fn parse_selection(line: &str) -> MenuSelection {
    let token = line.split_whitespace().next().unwrap_or("");
    if token.eq_ignore_ascii_case("q") {
        return MenuSelection::Quit;
    }
    match token.parse::<i64>() {
        Ok(CHANGE_IMAGE) => MenuSelection::ChangeImage,
        Ok(number) => u32::try_from(number)
            .ok()
            .and_then(FilterKind::from_menu_number)
            .map_or(MenuSelection::Invalid, MenuSelection::Filter),
        Err(_) => MenuSelection::Invalid,
    }
}

/// Menu label of a filter.
pub fn label(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Vignette => "Vignette",
        FilterKind::Clarendon => "Clarendon",
        FilterKind::Grayscale => "Grayscale",
        FilterKind::Rotate90 => "Rotate 90 degrees",
        FilterKind::RotateMultiple => "Rotate multiple 90 degrees",
        FilterKind::Enlarge => "Enlarge",
        FilterKind::HighContrast => "High contrast",
        FilterKind::Lighten => "Lighten",
        FilterKind::Darken => "Darken",
        FilterKind::Posterize => "Black, white, red, green, blue",
    }
}

/// Upper-case the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Print the menu followed by the selection prompt.
pub fn write_menu(out: &mut impl Write, current_file: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "IMAGE PROCESSING MENU")?;
    for kind in FilterKind::ALL {
        writeln!(out, "{:>2}) {}", kind.menu_number(), label(kind))?;
    }
    writeln!(out, "{CHANGE_IMAGE}) Change image (current: {current_file})")?;
    writeln!(out)?;
    write!(out, "Enter menu selection (Q/q to quit): ")?;
    out.flush()
}
