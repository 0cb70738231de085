use eframe::egui::{Color32, Stroke, Visuals, epaint::CornerRadius};

use crate::egui_app::state::StatusTone;
use crate::insights::ConfidenceTier;
use crate::quiz::AgentState;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub danger: Color32,
}

pub fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            bg_primary: Color32::from_rgb(15, 17, 26),
            bg_secondary: Color32::from_rgb(24, 27, 40),
            bg_tertiary: Color32::from_rgb(38, 42, 60),
            panel_outline: Color32::from_rgb(52, 57, 80),
            text_primary: Color32::from_rgb(226, 230, 240),
            text_muted: Color32::from_rgb(150, 156, 176),
            accent: Color32::from_rgb(102, 126, 234),
            accent_soft: Color32::from_rgb(118, 75, 162),
            success: Color32::from_rgb(16, 185, 129),
            warning: Color32::from_rgb(245, 158, 11),
            danger: Color32::from_rgb(239, 68, 68),
        }
    } else {
        Palette {
            bg_primary: Color32::from_rgb(248, 249, 252),
            bg_secondary: Color32::from_rgb(255, 255, 255),
            bg_tertiary: Color32::from_rgb(233, 236, 244),
            panel_outline: Color32::from_rgb(214, 219, 230),
            text_primary: Color32::from_rgb(30, 33, 45),
            text_muted: Color32::from_rgb(100, 106, 124),
            accent: Color32::from_rgb(86, 108, 214),
            accent_soft: Color32::from_rgb(118, 75, 162),
            success: Color32::from_rgb(5, 150, 105),
            warning: Color32::from_rgb(217, 119, 6),
            danger: Color32::from_rgb(220, 38, 38),
        }
    }
}

pub fn visuals(dark: bool) -> Visuals {
    let palette = palette(dark);
    let mut visuals = if dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.window_fill = palette.bg_secondary;
    visuals.panel_fill = palette.bg_primary;
    visuals.extreme_bg_color = palette.bg_tertiary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent;
    visuals.selection.stroke = Stroke::new(1.0, palette.text_primary);
    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    visuals
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(72, 76, 92),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}

pub fn tier_color(tier: ConfidenceTier) -> Color32 {
    match tier {
        ConfidenceTier::High => Color32::from_rgb(16, 185, 129),
        ConfidenceTier::Moderate => Color32::from_rgb(245, 158, 11),
        ConfidenceTier::Low => Color32::from_rgb(239, 68, 68),
        ConfidenceTier::Critical => Color32::from_rgb(220, 38, 38),
    }
}

pub fn agent_state_color(state: AgentState, palette: &Palette) -> Color32 {
    match state {
        AgentState::Running => palette.accent,
        AgentState::Completed => palette.success,
        AgentState::Error => palette.danger,
        AgentState::Idle | AgentState::Unknown => palette.text_muted,
    }
}

/// Hallucination monitor banner fill.
pub fn monitor_fill() -> Color32 {
    Color32::from_rgb(92, 96, 196)
}

pub fn card_corner() -> CornerRadius {
    CornerRadius::same(8)
}
