//! Rendering layer: all terminal I/O lives here.
//!
//! `TerminalRenderer` implements the simulation's `Frontend` trait: it maps
//! the world-space viewport onto the terminal grid and paints each draw item
//! as a block of characters. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use sidescroller::entities::{Camera, EnemyKind, Facing, ProjectileOwner};
use sidescroller::interface::{DrawItem, DrawKind, Frontend, HudSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_AMMO: Color = Color::White;
const C_HUD_RELOAD: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ENEMIES: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_WEAPON: Color = Color::Grey;
const C_ENEMY_PATROL_SLOW: Color = Color::Red;
const C_ENEMY_PATROL_FAST: Color = Color::Green;
const C_ENEMY_MELEE: Color = Color::Yellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "← → / A D : Move   W / ↑ : Jump   SPACE : Shoot   R : Reload   Q : Quit";

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    viewport_width: f32,
    viewport_height: f32,
    camera: Camera,
    last_hud: Option<HudSnapshot>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport_width: f32, viewport_height: f32) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            viewport_width,
            viewport_height,
            camera: Camera::default(),
            last_hud: None,
        })
    }

    /// Play area in terminal cells: columns `1..cols-1`, rows `2..rows-2`.
    fn play_area(&self) -> (u16, u16, u16, u16) {
        let left = 1;
        let top = 2;
        let width = self.cols.saturating_sub(2).max(1);
        let height = self.rows.saturating_sub(4).max(1);
        (left, top, width, height)
    }

    /// Map a world-space box to a clipped cell rectangle `(col, row, w, h)`.
    fn to_cells(&self, item: &DrawItem) -> Option<(u16, u16, u16, u16)> {
        let (left, top, width, height) = self.play_area();
        let sx = width as f32 / self.viewport_width;
        let sy = height as f32 / self.viewport_height;

        let x0 = ((item.x - self.camera.x) * sx).floor();
        let y0 = ((item.y - self.camera.y) * sy).floor();
        let x1 = (((item.x + item.width) - self.camera.x) * sx).ceil().max(x0 + 1.0);
        let y1 = (((item.y + item.height) - self.camera.y) * sy).ceil().max(y0 + 1.0);

        let x0 = x0.max(0.0);
        let y0 = y0.max(0.0);
        let x1 = x1.min(width as f32);
        let y1 = y1.min(height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((
            left + x0 as u16,
            top + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }

    fn fill(
        &mut self,
        col: u16,
        row: u16,
        w: u16,
        h: u16,
        glyph: char,
        color: Color,
    ) -> std::io::Result<()> {
        let line: String = std::iter::repeat(glyph).take(w as usize).collect();
        self.out.queue(style::SetForegroundColor(color))?;
        for r in row..row + h {
            self.out.queue(cursor::MoveTo(col, r))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    /// Small weapon mark on the facing side, halfway down the box.
    fn draw_weapon(
        &mut self,
        col: u16,
        row: u16,
        w: u16,
        h: u16,
        facing: Facing,
        glyph: char,
    ) -> std::io::Result<()> {
        let (left, _, width, _) = self.play_area();
        let mid = row + h / 2;
        let wx = match facing {
            Facing::Right => col + w,
            Facing::Left => col.saturating_sub(1),
        };
        if wx < left || wx >= left + width {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(wx, mid))?;
        self.out.queue(style::SetForegroundColor(C_WEAPON))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.cols as usize;
        let h = self.rows;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        // Row 1: top bar
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        // Row h-2: ground line
        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── Game-over overlay ─────────────────────────────────────────────────────

    fn draw_game_over(&mut self, score: u32) -> std::io::Result<()> {
        let score_line = format!("Final Score: {:>6}", score);
        let lines: [(&str, Color); 3] = [
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
        ];
        let cx = self.cols / 2;
        let start_row = (self.rows / 2).saturating_sub(3);

        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
        }

        let score_row = start_row + lines.len() as u16;
        let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, score_row))?;
        self.out.queue(style::SetForegroundColor(Color::Yellow))?;
        self.out.queue(Print(&score_line))?;

        let hint = "R - Play Again  Q - Quit";
        let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, score_row + 1))?;
        self.out.queue(style::SetForegroundColor(Color::White))?;
        self.out.queue(Print(hint))?;
        Ok(())
    }
}

impl<W: Write> Frontend for TerminalRenderer<W> {
    type Error = std::io::Error;

    fn begin_frame(&mut self, camera: &Camera) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        self.camera = *camera;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw(&mut self, item: &DrawItem) -> std::io::Result<()> {
        let Some((col, row, w, h)) = self.to_cells(item) else {
            return Ok(());
        };
        match item.kind {
            DrawKind::Player => {
                self.fill(col, row, w, h, '█', C_PLAYER)?;
                self.draw_weapon(col, row, w, h, item.facing, '═')?;
            }
            DrawKind::Enemy(kind) => {
                let (glyph, color, weapon) = match kind {
                    EnemyKind::PatrolSlow => ('▓', C_ENEMY_PATROL_SLOW, '═'),
                    EnemyKind::PatrolFast => ('▒', C_ENEMY_PATROL_FAST, '═'),
                    EnemyKind::Melee => ('▓', C_ENEMY_MELEE, '†'),
                };
                self.fill(col, row, w, h, glyph, color)?;
                self.draw_weapon(col, row, w, h, item.facing, weapon)?;
            }
            DrawKind::Projectile(owner) => {
                let color = match owner {
                    ProjectileOwner::Player => C_BULLET_PLAYER,
                    ProjectileOwner::Enemy => C_BULLET_ENEMY,
                };
                self.out.queue(cursor::MoveTo(col, row))?;
                self.out.queue(style::SetForegroundColor(color))?;
                self.out.queue(Print('•'))?;
            }
        }
        Ok(())
    }

    // ── HUD (row 0) ───────────────────────────────────────────────────────────

    fn hud(&mut self, hud: &HudSnapshot) -> std::io::Result<()> {
        self.last_hud = Some(*hud);

        // Ammo and reload countdown, left
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
        self.out
            .queue(Print(format!("Bullets: {}/{}", hud.ammo, hud.max_ammo)))?;
        if let Some(secs) = hud.reload_remaining_secs {
            self.out.queue(style::SetForegroundColor(C_HUD_RELOAD))?;
            self.out.queue(Print(format!(" (Reloading: {:.1}s)", secs)))?;
        }

        // Score, centre
        let score_str = format!("Score: {}", hud.score);
        let sx = (self.cols / 2).saturating_sub(score_str.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(sx, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(&score_str))?;

        // Enemy count, right
        let enemies_str = format!("Enemies: {}", hud.enemy_count);
        let ex = self
            .cols
            .saturating_sub(enemies_str.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(ex, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
        self.out.queue(Print(&enemies_str))?;
        Ok(())
    }

    fn end_frame(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(HINT))?;

        if let Some(hud) = self.last_hud.filter(|h| h.game_over) {
            self.draw_game_over(hud.score)?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
