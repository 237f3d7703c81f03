// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::{Attr, Palette};

struct LastFrame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl LastFrame {
    fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }
}

pub struct Terminal {
    stdout: Stdout,
    last: Option<LastFrame>,
    run_buf: String,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: None,
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    fn apply_attr(&mut self, attr: Attr, cur: &mut Attr) -> Result<()> {
        if attr.fg != cur.fg {
            self.stdout
                .queue(SetForegroundColor(attr.fg.unwrap_or(Color::Reset)))?;
        }
        if attr.bold != cur.bold {
            self.stdout.queue(SetAttribute(if attr.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
        }
        if attr.reverse != cur.reverse {
            self.stdout.queue(SetAttribute(if attr.reverse {
                Attribute::Reverse
            } else {
                Attribute::NoReverse
            }))?;
        }
        *cur = attr;
        Ok(())
    }

    /// Presents the frame, emitting only cells that changed since the
    /// previous call. Consecutive changed cells with identical
    /// attributes are written as one run.
    pub fn draw(&mut self, frame: &Frame, palette: &Palette) -> Result<()> {
        let needs_full = self
            .last
            .as_ref()
            .map(|l| l.width != frame.width || l.height != frame.height)
            .unwrap_or(true);
        if needs_full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            self.last = Some(LastFrame::new(frame.width, frame.height));
        }

        let mut cur = Attr {
            fg: None,
            bold: false,
            reverse: false,
        };
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;

        let width = frame.width as usize;
        for y in 0..frame.height {
            let row = y as usize * width;
            let mut x = 0usize;
            while x < width {
                let idx = row + x;
                let cell = frame.cell_at_index(idx);
                let stale = self
                    .last
                    .as_ref()
                    .is_some_and(|l| l.cells[idx] != cell || needs_full);
                if !stale {
                    x += 1;
                    continue;
                }

                let attr = palette.resolve(cell.style, cell.bold);
                let run_start = x;
                let mut run_buf = std::mem::take(&mut self.run_buf);
                run_buf.clear();
                while x < width {
                    let idx = row + x;
                    let c = frame.cell_at_index(idx);
                    if !needs_full && self.last.as_ref().is_some_and(|l| l.cells[idx] == c) {
                        break;
                    }
                    if palette.resolve(c.style, c.bold) != attr {
                        break;
                    }
                    run_buf.push(c.ch);
                    if let Some(l) = self.last.as_mut() {
                        l.cells[idx] = c;
                    }
                    x += 1;
                }

                self.stdout.queue(cursor::MoveTo(run_start as u16, y))?;
                self.apply_attr(attr, &mut cur)?;
                self.stdout.queue(Print(run_buf.as_str()))?;
                self.run_buf = run_buf;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
