/// Terminal renderer for the canvas, the HUD and the overlays.
///
/// Draws whatever visuals the simulation left attached on the [`Canvas`]
/// and maps mouse clicks back onto them.  Scene units are scaled down to
/// terminal cells through a [`Layout`].

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_turret::canvas::{Canvas, Visual};
use alien_turret::config::GameConfig;
use alien_turret::entities::{
    ALIEN_EXPLOSION_FRAME, EntityKind, TURRET_EXPLODED_FRAME,
};
use alien_turret::{EntityId, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SPEED: Color = Color::Cyan;
const C_TURRET: Color = Color::White;
const C_MISSILE: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Two animation frames per alien variant.
const ALIEN_GLYPHS: [(char, char); 10] = [
    ('▓', '▒'),
    ('◆', '◇'),
    ('●', '○'),
    ('■', '□'),
    ('▲', '△'),
    ('♦', '♢'),
    ('★', '☆'),
    ('◉', '◎'),
    ('▼', '▽'),
    ('♣', '♧'),
];

const ALIEN_COLORS: [Color; 10] = [
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Red,
    Color::Blue,
    Color::White,
    Color::DarkGreen,
    Color::DarkCyan,
    Color::DarkMagenta,
];

// ── Layout ────────────────────────────────────────────────────────────────────

/// Row 0 is the HUD, row 1 the top border; the play area starts at row 2,
/// column 1.  One cell covers `cell_width × cell_height` scene units.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    cell_width: i32,
    cell_height: i32,
    cols: i32,
    rows: i32,
}

const ORIGIN_COL: i32 = 1;
const ORIGIN_ROW: i32 = 2;

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        let cell_width = config.display.cell_width;
        let cell_height = config.display.cell_height;
        Layout {
            cell_width,
            cell_height,
            cols: (config.canvas.width + cell_width - 1) / cell_width,
            rows: (config.canvas.height + cell_height - 1) / cell_height,
        }
    }

    fn col(&self, x: i32) -> i32 {
        ORIGIN_COL + x.div_euclid(self.cell_width)
    }

    fn row(&self, y: i32) -> i32 {
        ORIGIN_ROW + y.div_euclid(self.cell_height)
    }

    fn last_col(&self) -> i32 {
        ORIGIN_COL + self.cols - 1
    }

    fn last_row(&self) -> i32 {
        ORIGIN_ROW + self.rows - 1
    }

    /// Cells covered by a visual, clipped to the play area.
    fn cells(&self, v: &Visual) -> Option<(i32, i32, i32, i32)> {
        let c0 = self.col(v.position.x).max(ORIGIN_COL);
        let c1 = self.col(v.position.x + v.size.width() - 1).min(self.last_col());
        let r0 = self.row(v.position.y).max(ORIGIN_ROW);
        let r1 = self.row(v.position.y + v.size.height() - 1).min(self.last_row());
        (c0 <= c1 && r0 <= r1).then_some((c0, c1, r0, r1))
    }
}

/// The pressable visual drawn under a clicked cell, lowest one first.
pub fn press_target(canvas: &Canvas, layout: &Layout, column: u16, row: u16) -> Option<EntityId> {
    let (col, row) = (column as i32, row as i32);
    canvas
        .visible()
        .filter(|(_, v)| v.pressable)
        .filter(|(_, v)| {
            layout
                .cells(v)
                .map(|(c0, c1, r0, r1)| (c0..=c1).contains(&col) && (r0..=r1).contains(&row))
                .unwrap_or(false)
        })
        .max_by_key(|(_, v)| v.position.y + v.size.height())
        .map(|(id, _)| id)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// The numbers shown above the play area.
pub struct Hud {
    pub score: u32,
    pub best: u32,
    pub speed: u32,
    pub phase: Phase,
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    layout: &Layout,
    hud: &Hud,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, layout)?;
    draw_hud(out, layout, hud)?;

    for (_, visual) in canvas.visible() {
        draw_visual(out, layout, visual)?;
    }

    draw_controls_hint(out, layout)?;

    if hud.phase == Phase::GameOver {
        draw_game_over(out, layout, hud)?;
    }

    // Cursor goes below the hint line
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (layout.last_row() + 2) as u16))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let w = layout.cols as usize;
    let bottom = (layout.last_row() + 1) as u16;
    let right = (layout.last_col() + 1) as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in ORIGIN_ROW as u16..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, layout: &Layout, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}  Best:{:>6}", hud.score, hud.best)))?;

    let speed_str = format!("Speed:{:>3}", hud.speed);
    let sx = (layout.last_col() + 1).saturating_sub(speed_str.len() as i32).max(0);
    out.queue(cursor::MoveTo(sx as u16, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SPEED))?;
    out.queue(Print(speed_str))?;

    Ok(())
}

// ── Visuals ───────────────────────────────────────────────────────────────────

fn glyph_for(visual: &Visual) -> (char, Color) {
    match visual.kind {
        EntityKind::Turret if visual.frame == TURRET_EXPLODED_FRAME => ('✹', Color::Red),
        EntityKind::Turret => ('█', C_TURRET),
        EntityKind::Missile => ('║', C_MISSILE),
        EntityKind::Alien if visual.frame == ALIEN_EXPLOSION_FRAME => ('✺', C_EXPLOSION),
        EntityKind::Alien => {
            let variant = (visual.frame / 2) % ALIEN_GLYPHS.len();
            let (even, odd) = ALIEN_GLYPHS[variant];
            let glyph = if visual.frame % 2 == 0 { even } else { odd };
            (glyph, ALIEN_COLORS[variant])
        }
    }
}

fn draw_visual<W: Write>(out: &mut W, layout: &Layout, visual: &Visual) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = layout.cells(visual) else {
        return Ok(());
    };
    let (glyph, color) = glyph_for(visual);
    let line: String = std::iter::repeat(glyph).take((c1 - c0 + 1) as usize).collect();

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (below the play area) ───────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, (layout.last_row() + 2) as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("CLICK alien : Fire   SPACE : Start/Pause   +/- : Speed   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, layout: &Layout, hud: &Hud) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", hud.score);
    let best_line = if hud.score >= hud.best && hud.score > 0 {
        format!("★ NEW BEST: {:>6} ★", hud.best)
    } else {
        format!("Best Score:  {:>6}", hud.best)
    };

    let lines: [(String, Color); 6] = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (score_line, Color::Yellow),
        (best_line, Color::Yellow),
        ("SPACE - Clear Board  Q - Quit".to_string(), Color::White),
    ];

    let cx = ORIGIN_COL + layout.cols / 2;
    let start_row = (ORIGIN_ROW + layout.rows / 2 - lines.len() as i32 / 2).max(0);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = (cx - msg.chars().count() as i32 / 2).max(0);
        out.queue(cursor::MoveTo(col as u16, (start_row + i as i32) as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
