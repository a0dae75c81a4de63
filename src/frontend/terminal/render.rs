use std::io::Stdout;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};

use crate::frontend::layout::{CellStyle, Screen};

struct Colors {
    fg: Color,
    bg: Color,
    bold: bool,
}

fn colors(style: CellStyle) -> Colors {
    let (fg, bg, bold) = match style {
        CellStyle::Text => (Color::Reset, Color::Reset, false),
        CellStyle::Selection => (Color::White, Color::Blue, false),
        CellStyle::Highlight(rgb) => (
            Color::Black,
            Color::Rgb {
                r: rgb.0,
                g: rgb.1,
                b: rgb.2,
            },
            false,
        ),
        CellStyle::Filler => (Color::DarkGrey, Color::Reset, false),
        CellStyle::MenuBar | CellStyle::MenuItem => (Color::Black, Color::Grey, false),
        CellStyle::MenuTitleOpen | CellStyle::MenuItemSelected => (Color::White, Color::Blue, false),
        CellStyle::MenuSeparator => (Color::DarkGrey, Color::Grey, false),
        CellStyle::Status => (Color::Black, Color::White, true),
        CellStyle::Dialog => (Color::Black, Color::Grey, false),
        CellStyle::DialogTitle => (Color::White, Color::DarkBlue, true),
        CellStyle::DialogField => (Color::Black, Color::White, false),
        CellStyle::DialogSelected => (Color::White, Color::Blue, false),
        CellStyle::DialogHint => (Color::DarkGrey, Color::Grey, false),
        CellStyle::DialogError => (Color::DarkRed, Color::Grey, true),
    };
    Colors { fg, bg, bold }
}

pub fn render(screen: &Screen, stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, Hide)?;

    for row in 0..screen.height() {
        queue!(stdout, MoveTo(0, row))?;
        let mut current: Option<CellStyle> = None;
        let mut run = String::new();

        for cell in screen.row(row) {
            if cell.ch == '\0' {
                continue;
            }
            if current != Some(cell.style) {
                if let Some(style) = current {
                    print_run(stdout, style, &run)?;
                }
                run.clear();
                current = Some(cell.style);
            }
            run.push(cell.ch);
        }
        if let Some(style) = current {
            print_run(stdout, style, &run)?;
        }
    }

    match screen.cursor {
        Some((col, row)) => queue!(stdout, MoveTo(col, row), Show)?,
        None => queue!(stdout, Hide)?,
    }
    Ok(())
}

fn print_run(stdout: &mut Stdout, style: CellStyle, text: &str) -> std::io::Result<()> {
    let colors = colors(style);
    queue!(
        stdout,
        SetForegroundColor(colors.fg),
        SetBackgroundColor(colors.bg)
    )?;
    if colors.bold {
        queue!(stdout, SetAttribute(Attribute::Bold))?;
    }
    queue!(stdout, Print(text), ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}
