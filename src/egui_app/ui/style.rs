use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::prediction::AqiBucket;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_strong: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_mint: Color32,
    pub accent_ice: Color32,
    pub accent_copper: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub danger: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(26, 28, 30),
        bg_tertiary: Color32::from_rgb(42, 44, 48),
        panel_outline: Color32::from_rgb(38, 42, 48),
        grid_strong: Color32::from_rgb(56, 60, 66),
        grid_soft: Color32::from_rgb(30, 32, 36),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        accent_mint: Color32::from_rgb(127, 255, 212),
        accent_ice: Color32::from_rgb(167, 217, 255),
        accent_copper: Color32::from_rgb(195, 165, 122),
        warning: Color32::from_rgb(214, 168, 72),
        success: Color32::from_rgb(102, 176, 136),
        danger: Color32::from_rgb(206, 84, 72),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.grid_soft;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette);
    set_rectilinear(&mut visuals.widgets.hovered, palette);
    set_rectilinear(&mut visuals.widgets.active, palette);
    set_rectilinear(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn compartment_fill() -> Color32 {
    palette().bg_primary
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            StatusTone::Idle => "Idle",
            StatusTone::Info => "Info",
            StatusTone::Warning => "Warning",
            StatusTone::Error => "Error",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}

/// Banner colour for a prediction bucket.
pub fn bucket_color(bucket: AqiBucket) -> Color32 {
    let palette = palette();
    match bucket {
        AqiBucket::Good => palette.success,
        AqiBucket::Moderate => palette.warning,
        AqiBucket::Unhealthy => palette.danger,
    }
}

/// Categorical colours for chart series, cycled by index.
pub fn series_color(index: usize) -> Color32 {
    const SERIES: [Color32; 8] = [
        Color32::from_rgb(127, 255, 212),
        Color32::from_rgb(167, 217, 255),
        Color32::from_rgb(195, 165, 122),
        Color32::from_rgb(214, 168, 72),
        Color32::from_rgb(206, 84, 72),
        Color32::from_rgb(176, 140, 220),
        Color32::from_rgb(102, 176, 136),
        Color32::from_rgb(240, 200, 200),
    ];
    SERIES[index % SERIES.len()]
}

/// Diverging blue-white-red ramp for correlations in `[-1, 1]`.
pub fn correlation_color(value: f64) -> Color32 {
    let t = value.clamp(-1.0, 1.0) as f32;
    let neutral = (60.0_f32, 62.0_f32, 68.0_f32);
    let target = if t >= 0.0 {
        (206.0, 84.0, 72.0)
    } else {
        (80.0, 150.0, 220.0)
    };
    let w = t.abs();
    let mix = |a: f32, b: f32| (a + (b - a) * w).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(
        mix(neutral.0, target.0),
        mix(neutral.1, target.1),
        mix(neutral.2, target.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_ramp_hits_endpoints() {
        assert_eq!(correlation_color(1.0), Color32::from_rgb(206, 84, 72));
        assert_eq!(correlation_color(-1.0), Color32::from_rgb(80, 150, 220));
        assert_eq!(correlation_color(0.0), Color32::from_rgb(60, 62, 68));
        assert_eq!(correlation_color(4.0), correlation_color(1.0));
    }

    #[test]
    fn buckets_have_distinct_colours() {
        let colours = [
            bucket_color(AqiBucket::Good),
            bucket_color(AqiBucket::Moderate),
            bucket_color(AqiBucket::Unhealthy),
        ];
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[1], colours[2]);
        assert_ne!(colours[0], colours[2]);
    }
}
