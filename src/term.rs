use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use gridsnake::Cell;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Terminal columns used per grid cell, so cells come out roughly square.
pub const CELL_COLUMNS: TermInt = 2;

#[derive(Copy, Clone, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

/// Where the grid sits on screen: the top-left terminal position of cell (0, 0).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    origin: Coords,
    width: i32,
    height: i32,
}

impl Board {
    /// Terminal size needed to show a `width` x `height` grid with its border.
    pub fn required_size(width: i32, height: i32) -> (u64, u64) {
        let (width, height) = (width.max(0) as u64, height.max(0) as u64);
        (width * CELL_COLUMNS as u64 + 2, height + 2)
    }

    /// Centers the grid in a terminal of the given size, or `None` if it does not fit.
    pub fn centered(term_size: Coords, width: i32, height: i32) -> Option<Board> {
        let (need_w, need_h) = Board::required_size(width, height);
        let (term_w, term_h) = (term_size.0 as u64, term_size.1 as u64);
        if need_w > term_w || need_h > term_h {
            return None;
        }

        let left = (term_w - need_w) / 2 + 1;
        let top = (term_h - need_h) / 2 + 1;
        Some(Board { origin: (left as TermInt, top as TermInt), width, height })
    }

    /// Screen position of a grid cell; cells off the grid have none.
    pub fn to_screen(&self, cell: Cell) -> Option<Coords> {
        if !cell.in_bounds(self.width, self.height) {
            return None;
        }
        Some((
            self.origin.0 + cell.x as TermInt * CELL_COLUMNS,
            self.origin.1 + cell.y as TermInt,
        ))
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)?;
        execute!(self.stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Everything typed since the last call, without waiting.
    pub fn read_key_events_queue(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn draw_border(&mut self, board: &Board) -> crossterm::Result<()> {
        let (inner_w, inner_h) = (board.width as TermInt * CELL_COLUMNS, board.height as TermInt);
        let (left, top) = (board.origin.0 - 1, board.origin.1 - 1);
        let (right, bottom) = (left + inner_w + 1, top + inner_h + 1);

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            self.print_at((x, top), ch, Color::Reset)?;
            self.print_at((x, bottom), ch, Color::Reset)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), '|', Color::Reset)?;
            self.print_at((right, y), '|', Color::Reset)?;
        }

        self.flush()
    }

    /// Fills one grid cell with `ch`; no-op for cells off the board.
    pub fn print_cell(&mut self, board: &Board, cell: Cell, ch: char, color: Color) -> crossterm::Result<()> {
        if let Some((x, y)) = board.to_screen(cell) {
            for dx in 0..CELL_COLUMNS {
                self.print_at((x + dx, y), ch, color)?;
            }
        }
        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Blank padding rows above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> crossterm::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Put back whatever the message was covering
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(glyph) = self.glyph_at((x, y)) {
                    queue!(
                        self.stdout,
                        cursor::MoveTo(x, y),
                        style::SetForegroundColor(glyph.color),
                        style::Print(glyph.ch)
                    )?;
                }
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char, color: Color) -> crossterm::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color),
            style::Print(ch),
            style::ResetColor
        )?;
        if let Some(i) = self.index(pos) {
            self.screen[i] = Glyph { ch, color };
        }
        Ok(())
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn glyph_at(&self, pos: Coords) -> Option<Glyph> {
        self.index(pos).map(|i| self.screen[i])
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> crossterm::Result<()> {
        // Messages are drawn over the board without touching the screen buffer,
        // so hiding one can restore what was underneath.
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_fits_and_centers() {
        let board = Board::centered((80, 30), 32, 24).unwrap();
        // 66 columns and 26 rows including the border
        assert_eq!(board.origin, (8, 3));
        assert_eq!(board.to_screen(Cell::new(0, 0)), Some((8, 3)));
        assert_eq!(board.to_screen(Cell::new(31, 23)), Some((8 + 62, 26)));
    }

    #[test]
    fn board_too_big_for_terminal() {
        assert_eq!(Board::centered((65, 40), 32, 24), None);
        assert_eq!(Board::centered((66, 25), 32, 24), None);
        assert!(Board::centered((66, 26), 32, 24).is_some());
    }

    #[test]
    fn huge_grid_never_fits() {
        assert_eq!(Board::required_size(i32::MAX, 1), (i32::MAX as u64 * 2 + 2, 3));
        assert_eq!(Board::centered((200, 60), i32::MAX, 1), None);
        assert_eq!(Board::centered((TermInt::MAX, TermInt::MAX), i32::MAX, i32::MAX), None);
    }

    #[test]
    fn cells_off_the_grid_are_not_drawn() {
        let board = Board::centered((80, 30), 32, 24).unwrap();
        assert_eq!(board.to_screen(Cell::new(-1, 0)), None);
        assert_eq!(board.to_screen(Cell::new(0, 24)), None);
    }
}
