use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Compact OneDark-ish skin: colored headers and tables, nothing fancy.
pub fn dashboard_skin() -> MadSkin {
    let mut skin = MadSkin::default();

    skin.headers[0].set_fg(RED);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[0].align = Alignment::Left;

    skin.headers[1].set_fg(YELLOW);
    skin.headers[1].add_attr(Attribute::Bold);

    skin.bold.set_fg(BLUE);
    skin.table.set_fg(PURPLE);
    skin.inline_code.set_fg(GREEN);

    skin
}

const RED: Color = Color::Rgb {
    r: 0xE0,
    g: 0x6C,
    b: 0x75,
};
const YELLOW: Color = Color::Rgb {
    r: 0xE5,
    g: 0xC0,
    b: 0x7B,
};
const BLUE: Color = Color::Rgb {
    r: 0x61,
    g: 0xAF,
    b: 0xEF,
};
const GREEN: Color = Color::Rgb {
    r: 0x98,
    g: 0xC3,
    b: 0x79,
};
const PURPLE: Color = Color::Rgb {
    r: 0xC6,
    g: 0x78,
    b: 0xDD,
};
