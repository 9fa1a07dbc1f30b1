use eframe::egui::{self, Color32, Pos2, Rect};

use super::style;

/// Seconds a celebration burst stays on screen.
pub(super) const BURST_SECS: f64 = 1.8;
const PARTICLE_COUNT: usize = 48;

/// One particle of the burst at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Particle {
    pub pos: Pos2,
    pub radius: f32,
    pub color: Color32,
}

/// Particles rising from the bottom of `rect`, `progress` in `[0, 1]`.
pub(super) fn burst(rect: Rect, progress: f32) -> Vec<Particle> {
    let progress = progress.clamp(0.0, 1.0);
    let fade = 1.0 - progress;
    (0..PARTICLE_COUNT)
        .map(|index| {
            let seed = scramble(index as u32);
            let lane = (seed & 0xffff) as f32 / 65535.0;
            let speed = 0.55 + ((seed >> 16) & 0xff) as f32 / 255.0 * 0.45;
            let sway = (((seed >> 24) & 0xff) as f32 / 255.0 - 0.5) * 40.0;
            let rise = (progress * speed).min(1.0);
            let x = rect.left() + lane * rect.width() + sway * (progress * 6.0).sin();
            let y = rect.bottom() - rise * rect.height();
            let base = style::series_color(index);
            let alpha = (fade * 230.0).round() as u8;
            Particle {
                pos: egui::pos2(x, y),
                radius: 4.0 + (seed % 5) as f32,
                color: Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha),
            }
        })
        .collect()
}

fn scramble(mut value: u32) -> u32 {
    value = value.wrapping_mul(0x9e37_79b9).wrapping_add(0x7f4a_7c15);
    value ^= value >> 15;
    value = value.wrapping_mul(0x85eb_ca6b);
    value ^ (value >> 13)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 300.0))
    }

    #[test]
    fn burst_starts_at_bottom_and_fades_out() {
        let start = burst(area(), 0.0);
        assert_eq!(start.len(), PARTICLE_COUNT);
        assert!(start.iter().all(|p| p.pos.y == 300.0));
        let end = burst(area(), 1.0);
        assert!(end.iter().all(|p| p.color.a() == 0));
        assert!(end.iter().all(|p| p.pos.y < 300.0));
    }

    #[test]
    fn burst_is_deterministic() {
        assert_eq!(burst(area(), 0.4), burst(area(), 0.4));
    }
}
