//! Terminal renderer for a `SessionState`.
//!
//! The field is 1400x980 pixels and the terminal is a handful of cells, so
//! every rectangle is reduced to the cell under its centre. Nothing here
//! touches the simulation.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use wave_shooter::entities::{GameStatus, Level, LossCause, SessionState};
use wave_shooter::geometry::Rect;

// ── Palette ───────────────────────────────────────────────────────────────────

mod palette {
    use crossterm::style::Color;

    pub const FRAME: Color = Color::DarkBlue;
    pub const SCORE: Color = Color::Yellow;
    pub const KILLS: Color = Color::Red;
    pub const SHIP: Color = Color::White;
    pub const LEADER: Color = Color::Red;
    pub const FOLLOWER: Color = Color::Green;
    pub const SHOT_UP: Color = Color::Cyan;
    pub const SHOT_DOWN: Color = Color::Magenta;
    pub const HINT: Color = Color::DarkGrey;
    pub const ALERT: Color = Color::Red;
}

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Terminal size plus the field it has to show.
///
/// Layout: row 0 HUD, row 1 top border, rows `2..height-2` play area,
/// row `height-2` bottom border, last row controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    field_width: f32,
    field_height: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, state: &SessionState) -> Self {
        Self {
            width,
            height,
            field_width: state.config.field_width,
            field_height: state.config.field_height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.width.saturating_sub(2) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.height.saturating_sub(4) as f32
    }

    /// Cell holding field point `(x, y)`, or `None` when it is off screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.field_width || y >= self.field_height {
            return None;
        }
        let col = 1 + (x / self.field_width * self.inner_cols()) as u16;
        let row = 2 + (y / self.field_height * self.inner_rows()) as u16;
        Some((col, row))
    }

    /// Cell under the centre of a rectangle.
    fn center_of(&self, rect: &Rect) -> Option<(u16, u16)> {
        self.cell(rect.center_x(), rect.y + rect.h / 2.0)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw the whole frame from scratch and flush it.
pub fn render<W: Write>(out: &mut W, state: &SessionState, view: &Viewport) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_frame(out, view)?;
    draw_hud(out, state, view)?;

    for group in &state.formations.groups {
        for (slot, enemy) in group.enemies.iter().enumerate() {
            draw_enemy(out, &enemy.rect, slot == 0, view)?;
        }
    }
    for bullet in state.player_bullets() {
        draw_bullet(out, bullet, "║", palette::SHOT_UP, view)?;
    }
    for bullet in state.enemy_bullets() {
        draw_bullet(out, bullet, "↓", palette::SHOT_DOWN, view)?;
    }

    draw_ship(out, state.ship(), view)?;
    draw_hint(out, view)?;

    if state.status == GameStatus::GameOver {
        draw_loss_banner(out, state, view)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Play-area frame ───────────────────────────────────────────────────────────

fn rule(left: char, right: char, width: u16) -> String {
    let mut line = String::with_capacity(width as usize * 3);
    line.push(left);
    line.extend(std::iter::repeat('─').take(width.saturating_sub(2) as usize));
    line.push(right);
    line
}

fn draw_frame<W: Write>(out: &mut W, view: &Viewport) -> io::Result<()> {
    let bottom = view.height.saturating_sub(2);
    let right = view.width.saturating_sub(1);

    out.queue(style::SetForegroundColor(palette::FRAME))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(rule('┌', '┐', view.width)))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(rule('└', '┘', view.width)))?;

    for row in 2..bottom {
        for col in [0, right] {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print('│'))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn level_color(level: Level) -> Color {
    match level {
        Level::One => Color::Green,
        Level::Two => Color::Yellow,
        Level::Three => Color::Red,
    }
}

fn draw_hud<W: Write>(out: &mut W, state: &SessionState, view: &Viewport) -> io::Result<()> {
    let level = format!("Level: {}", state.level().number());
    let kills = format!("Kills: {}", state.kills);
    let score = format!("Score: {:>8}", state.score);

    let kills_col = (view.width / 2).saturating_sub(kills.chars().count() as u16 / 2);
    let score_col = view.width.saturating_sub(score.chars().count() as u16 + 1);

    for (col, text, color) in [
        (1, &level, level_color(state.level())),
        (kills_col, &kills, palette::KILLS),
        (score_col, &score, palette::SCORE),
    ] {
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Nose on the cell of the ship's top edge, wings underneath when there is
/// room above the bottom border.
fn draw_ship<W: Write>(out: &mut W, ship: &Rect, view: &Viewport) -> io::Result<()> {
    let Some((col, row)) = view.cell(ship.center_x(), ship.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(palette::SHIP))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print('▲'))?;

    if row + 1 < view.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Rect,
    leader: bool,
    view: &Viewport,
) -> io::Result<()> {
    // Parked columns sit above the top edge until they unfold
    let Some((col, row)) = view.center_of(enemy) else {
        return Ok(());
    };
    let (sprite, color) = if leader {
        ("<▼>", palette::LEADER)
    } else {
        ("(◉)", palette::FOLLOWER)
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Rect,
    glyph: &str,
    color: Color,
    view: &Viewport,
) -> io::Result<()> {
    if let Some((col, row)) = view.center_of(bullet) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Key hint (last row) ───────────────────────────────────────────────────────

fn draw_hint<W: Write>(out: &mut W, view: &Viewport) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(palette::HINT))?;
    out.queue(Print("move: ←/→ or A/D   fire: SPACE   quit: Q/Esc"))?;
    Ok(())
}

// ── Loss banner ───────────────────────────────────────────────────────────────

fn draw_loss_banner<W: Write>(out: &mut W, state: &SessionState, view: &Viewport) -> io::Result<()> {
    let cause = match state.loss {
        Some(LossCause::Rammed) => "the wave rammed your ship",
        Some(LossCause::Shot) => "shot down",
        None => "",
    };
    let summary = format!(
        "score {}  kills {}  level {}",
        state.score,
        state.kills,
        state.level().number()
    );
    let banner = [
        ("*** WAVE OVERRAN YOU ***", palette::ALERT),
        (cause, palette::SHIP),
        (summary.as_str(), palette::SCORE),
        ("press Q to leave", palette::HINT),
    ];

    let mid_col = view.width / 2;
    let top = (view.height / 2).saturating_sub(banner.len() as u16);
    for (offset, (text, color)) in banner.into_iter().enumerate() {
        let col = mid_col.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, top + 2 * offset as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}
