//! Per-session state consumed by the egui renderer.

use egui::Color32;

use crate::animation::AnimationInfo;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::model::FeatureRecord;
use crate::prediction::Prediction;

/// The two mutually exclusive views reachable from the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Prediction,
    Eda,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Prediction, Page::Eda];

    /// Label shown on the navigation radio.
    pub fn label(self) -> &'static str {
        match self {
            Page::Prediction => "Prediction",
            Page::Eda => "EDA Dashboard",
        }
    }

    /// Map a navigation choice back to its page.
    pub fn select(choice: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.label() == choice)
    }
}

/// Sub-views of the EDA page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdaTab {
    #[default]
    Overview,
    CityWise,
    Correlation,
    Visualizations,
}

impl EdaTab {
    pub const ALL: [EdaTab; 4] = [
        EdaTab::Overview,
        EdaTab::CityWise,
        EdaTab::Correlation,
        EdaTab::Visualizations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EdaTab::Overview => "Overview",
            EdaTab::CityWise => "City-wise Analysis",
            EdaTab::Correlation => "Correlation",
            EdaTab::Visualizations => "Visualizations",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub page: Page,
    pub eda_tab: EdaTab,
    pub status: StatusBarState,
    pub prediction: PredictionFormState,
    pub animation: AnimationState,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::new("Ready", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            tone,
            badge_label: tone.label().into(),
            badge_color: style::status_badge_color(tone),
        }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Input fields and the last submitted result.
#[derive(Clone, Debug, Default)]
pub struct PredictionFormState {
    pub inputs: FeatureRecord,
    /// Result of the last "Predict Now"; editing inputs leaves it untouched.
    pub outcome: Option<PredictionOutcome>,
    /// Incremented for every Good result so the renderer can start a fresh burst.
    pub celebrations: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PredictionOutcome {
    Scored(Prediction),
    Failed(String),
}

/// Sidebar animation lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnimationState {
    #[default]
    Disabled,
    Loading,
    Ready(AnimationInfo),
    Failed(String),
}
