//! Terminal presentation.
//!
//! Images are written straight to the terminal as truecolor escape
//! sequences, two image rows per character row: the upper half block `▀`
//! takes its foreground colour from the top row and its background colour
//! from the bottom row.

use std::io::Write;

use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::{queue, terminal};
use log::{debug, trace};

use crate::grid::Size;
use crate::pixel::{Image, Rgba};

const HALF_BLOCK: char = '▀';

/// Size used when the terminal's own size cannot be read.
const FALLBACK_SIZE: Size = Size {
    width: 80,
    height: 48,
};

/// An image size filling the terminal, two image rows per character row.
///
/// The bottom character row is left free so the shell prompt does not
/// scroll the image. Falls back to 80×48 when the terminal size cannot be
/// read, as when output is piped.
pub fn auto_size() -> Size {
    match terminal::size() {
        Ok((columns, rows)) => {
            let size = Size::new(
                u32::from(columns).max(1),
                u32::from(rows.saturating_sub(1)).max(1) * 2,
            );
            debug!(
                "terminal is {} columns by {} rows, rendering at {}x{}",
                columns, rows, size.width, size.height
            );
            size
        }
        Err(error) => {
            debug!(
                "terminal size unavailable ({}), falling back to {}x{}",
                error, FALLBACK_SIZE.width, FALLBACK_SIZE.height
            );
            FALLBACK_SIZE
        }
    }
}

/// Write `image` to `out`, packing two image rows into every character row.
///
/// An image of odd height gets a black bottom half on its last row. Output
/// is queued and flushed once, so a frame reaches the terminal in a single
/// write.
pub fn present(out: &mut impl Write, image: &Image) -> crossterm::Result<()> {
    trace!("begin present");

    let mut rows = image.rows();
    while let Some(top) = rows.next() {
        let bottom = rows.next();
        for (col, &fg) in top.iter().enumerate() {
            let bg = bottom.map_or(Rgba::BLACK, |row| row[col]);
            queue!(
                out,
                SetColors(Colors::new(terminal_colour(fg), terminal_colour(bg))),
                Print(HALF_BLOCK)
            )?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()?;

    trace!("end present");
    Ok(())
}

fn terminal_colour(rgba: Rgba) -> Color {
    Color::Rgb {
        r: rgba.r,
        g: rgba.g,
        b: rgba.b,
    }
}
