//! Bar rendering.
//!
//! Renders the step ratio into a fixed-width bar at sub-character
//! resolution: each block subdivides into 8 rendering units, and the
//! last partially-filled block is drawn with an eighth-block glyph.
//! Terminals without the extended glyphs fall back to whole blocks.

use pacer_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Full, empty, and the seven partial fill levels (1..=7 eighths).
const SMOOTH_FULL: char = '█';
const SMOOTH_EMPTY: char = ' ';
const SMOOTH_PARTIAL: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];

const COARSE_FULL: char = '#';
const COARSE_EMPTY: char = '-';

/// Rendering resolution of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fidelity {
    /// Sub-character resolution using eighth-block glyphs.
    Smooth,
    /// Whole blocks only, ASCII glyphs.
    Coarse,
}

impl Fidelity {
    /// Resolve the glyph-capability flag from the locale environment.
    ///
    /// A UTF-8 locale (`LC_ALL`, `LC_CTYPE`, or `LANG`) selects
    /// [`Fidelity::Smooth`]; anything else falls back to
    /// [`Fidelity::Coarse`]. Resolved once per renderer so the renderer
    /// itself stays a pure function of its inputs.
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty());

        match locale {
            Some(value) => {
                let upper = value.to_ascii_uppercase();
                if upper.contains("UTF-8") || upper.contains("UTF8") {
                    Fidelity::Smooth
                } else {
                    Fidelity::Coarse
                }
            }
            None => Fidelity::Coarse,
        }
    }
}

/// Fixed-width bar renderer.
///
/// Pure: all mutable inputs arrive through [`BarRenderer::render`]; the
/// only stored values are the configuration and a constant derived from
/// the (immutable) total step count.
#[derive(Debug, Clone)]
pub struct BarRenderer {
    blocks: usize,
    /// Steps per rendering unit, `total / (blocks * 8)`.
    steps_per_unit: f64,
    fidelity: Fidelity,
}

impl BarRenderer {
    /// Create a renderer for a bar of `block_count` blocks.
    pub fn new(block_count: i64, total_steps: u64, fidelity: Fidelity) -> Result<Self, ConfigError> {
        if block_count <= 0 {
            return Err(ConfigError::NonPositiveBlocks(block_count));
        }
        Ok(Self {
            blocks: block_count as usize,
            steps_per_unit: total_steps as f64 / (block_count as f64 * 8.0),
            fidelity,
        })
    }

    /// Render the bar for `current` completed steps, wrapped in `|`.
    ///
    /// The filled-unit count is the step ratio rounded to the nearest
    /// unit; ties round up. Over-progress (more units than the bar has)
    /// clamps to a fully filled bar.
    pub fn render(&self, current: u64) -> String {
        let unit_total = self.blocks * 8;
        let filled_units = (current as f64 / self.steps_per_unit).round() as usize;

        let (full, empty) = match self.fidelity {
            Fidelity::Smooth => (SMOOTH_FULL, SMOOTH_EMPTY),
            Fidelity::Coarse => (COARSE_FULL, COARSE_EMPTY),
        };

        let mut body = String::new();
        if filled_units >= unit_total {
            for _ in 0..self.blocks {
                body.push(full);
            }
        } else {
            let filled_blocks = filled_units / 8;
            let remainder = filled_units % 8;

            for _ in 0..filled_blocks {
                body.push(full);
            }
            let mut rest = self.blocks - filled_blocks;
            if remainder > 0 && self.fidelity == Fidelity::Smooth {
                body.push(SMOOTH_PARTIAL[remainder - 1]);
                rest -= 1;
            }
            for _ in 0..rest {
                body.push(empty);
            }
        }
        format!("|{}|", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_half_has_no_partial_glyph() {
        let bar = BarRenderer::new(10, 100, Fidelity::Smooth).unwrap();
        assert_eq!(bar.render(50), "|█████     |");
    }

    #[test]
    fn test_smooth_partial_level() {
        // 55 / 1.25 = 44 units: 5 full blocks, 4 eighths, 4 empty.
        let bar = BarRenderer::new(10, 100, Fidelity::Smooth).unwrap();
        assert_eq!(bar.render(55), "|█████▌    |");
    }

    #[test]
    fn test_coarse_drops_partial_fill() {
        let bar = BarRenderer::new(10, 100, Fidelity::Coarse).unwrap();
        assert_eq!(bar.render(55), "|#####-----|");
    }

    #[test]
    fn test_empty_and_full() {
        let bar = BarRenderer::new(4, 4, Fidelity::Smooth).unwrap();
        assert_eq!(bar.render(0), "|    |");
        assert_eq!(bar.render(4), "|████|");
    }

    #[test]
    fn test_over_progress_clamps_to_full() {
        let bar = BarRenderer::new(4, 4, Fidelity::Smooth).unwrap();
        assert_eq!(bar.render(9), "|████|");

        let coarse = BarRenderer::new(4, 4, Fidelity::Coarse).unwrap();
        assert_eq!(coarse.render(9), "|####|");
    }

    #[test]
    fn test_ties_round_up() {
        // 1 / (10 * 8) steps per unit with total 160: step 1 is exactly
        // half a unit and rounds up to one eighth.
        let bar = BarRenderer::new(10, 160, Fidelity::Smooth).unwrap();
        assert_eq!(bar.render(1), "|▏         |");
    }

    #[test]
    fn test_non_positive_block_count_rejected() {
        assert!(matches!(
            BarRenderer::new(0, 100, Fidelity::Smooth),
            Err(ConfigError::NonPositiveBlocks(0))
        ));
    }
}
