//! Session controller bridging the loaded resources and the egui renderer.

use std::cell::OnceCell;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::animation::{AnimationFetchError, AnimationInfo};
use crate::dataset::{Dataset, DatasetError};
use crate::eda::{self, CityBreakdown, CorrelationMatrix, Distribution, Overview, ScatterPlot};
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::model::{FeatureRecord, ModelLoadError, Predictor};
use crate::prediction::{AqiBucket, predict_and_classify};
use crate::resources::AppResources;
use crate::settings::EdaSettings;

type AnimationResult = Result<AnimationInfo, AnimationFetchError>;

/// Analysis results, computed on first view and reused for the rest of the session.
#[derive(Default)]
struct EdaCache {
    overview: OnceCell<Overview>,
    city: OnceCell<Option<CityBreakdown>>,
    correlation: OnceCell<CorrelationMatrix>,
    distributions: OnceCell<Vec<Distribution>>,
    scatter: OnceCell<Vec<ScatterPlot>>,
}

/// Maintains session state and bridges the model and dataset to the egui UI.
pub struct DashboardController {
    pub ui: UiState,
    resources: AppResources,
    eda_settings: EdaSettings,
    cache: EdaCache,
    animation_rx: Option<Receiver<AnimationResult>>,
}

impl DashboardController {
    pub fn new(resources: AppResources, eda_settings: EdaSettings) -> Self {
        let mut controller = Self {
            ui: UiState::default(),
            resources,
            eda_settings,
            cache: EdaCache::default(),
            animation_rx: None,
        };
        controller.report_resources();
        controller
    }

    fn report_resources(&mut self) {
        match (&self.resources.predictor, &self.resources.dataset) {
            (Err(err), _) => {
                let text = err.to_string();
                self.set_status(text, StatusTone::Error);
            }
            (Ok(_), Err(err)) => {
                let text = err.to_string();
                self.set_status(text, StatusTone::Warning);
            }
            (Ok(predictor), Ok(dataset)) => {
                let text = format!(
                    "Model ready ({} features), {} rows loaded",
                    predictor.features().len(),
                    dataset.row_count()
                );
                self.set_status(text, StatusTone::Info);
            }
        }
    }

    /// Track a background animation fetch; `None` means the animation is disabled.
    pub fn attach_animation(&mut self, receiver: Option<Receiver<AnimationResult>>) {
        self.ui.animation = if receiver.is_some() {
            AnimationState::Loading
        } else {
            AnimationState::Disabled
        };
        self.animation_rx = receiver;
    }

    /// Pick up a finished animation fetch. Returns true when the state changed.
    pub fn poll_animation(&mut self) -> bool {
        let Some(receiver) = &self.animation_rx else {
            return false;
        };
        let next = match receiver.try_recv() {
            Ok(Ok(info)) => AnimationState::Ready(info),
            Ok(Err(err)) => AnimationState::Failed(err.to_string()),
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                AnimationState::Failed("Animation worker stopped".into())
            }
        };
        self.animation_rx = None;
        self.ui.animation = next;
        true
    }

    /// Route the sidebar choice to its page; unknown choices leave the page unchanged.
    pub fn select_choice(&mut self, choice: &str) {
        match Page::select(choice) {
            Some(page) => self.select_page(page),
            None => tracing::warn!("Ignoring unknown page choice '{choice}'"),
        }
    }

    /// Route to a page.
    pub fn select_page(&mut self, page: Page) {
        if self.ui.page != page {
            tracing::debug!("Switching to {}", page.label());
            self.ui.page = page;
        }
    }

    pub fn select_tab(&mut self, tab: EdaTab) {
        self.ui.eda_tab = tab;
    }

    pub fn inputs(&self) -> &FeatureRecord {
        &self.ui.prediction.inputs
    }

    /// Editable inputs; changes take effect on the next [`Self::submit_prediction`].
    pub fn inputs_mut(&mut self) -> &mut FeatureRecord {
        &mut self.ui.prediction.inputs
    }

    /// Score the current inputs and store the outcome for display.
    pub fn submit_prediction(&mut self) {
        let outcome = match &self.resources.predictor {
            Err(err) => PredictionOutcome::Failed(err.to_string()),
            Ok(predictor) => {
                match predict_and_classify(predictor.as_ref(), &self.ui.prediction.inputs) {
                    Ok(prediction) => PredictionOutcome::Scored(prediction),
                    Err(err) => PredictionOutcome::Failed(format!("Prediction failed: {err}")),
                }
            }
        };
        match &outcome {
            PredictionOutcome::Scored(prediction) => {
                tracing::info!(
                    "Predicted AQI {:.2} ({})",
                    prediction.score,
                    prediction.bucket
                );
                if prediction.bucket == AqiBucket::Good {
                    self.ui.prediction.celebrations += 1;
                }
                self.set_status(
                    format!("{} ({})", prediction.headline(), prediction.bucket),
                    StatusTone::Info,
                );
            }
            PredictionOutcome::Failed(message) => {
                tracing::warn!("{message}");
                self.set_status(message.clone(), StatusTone::Error);
            }
        }
        self.ui.prediction.outcome = Some(outcome);
    }

    pub fn predictor(&self) -> Result<&dyn Predictor, &ModelLoadError> {
        match &self.resources.predictor {
            Ok(predictor) => Ok(predictor.as_ref()),
            Err(err) => Err(err),
        }
    }

    /// Summary of the loaded model for the prediction page.
    pub fn model_summary(&self) -> Option<String> {
        self.predictor().ok().map(|predictor| predictor.describe())
    }

    pub fn dataset(&self) -> Result<&Dataset, &DatasetError> {
        match &self.resources.dataset {
            Ok(dataset) => Ok(dataset.as_ref()),
            Err(err) => Err(err),
        }
    }

    pub fn overview(&self) -> Option<&Overview> {
        let dataset = self.dataset().ok()?;
        let rows = self.eda_settings.preview_rows;
        Some(
            self.cache
                .overview
                .get_or_init(|| eda::overview(dataset, rows)),
        )
    }

    /// `None` when the dataset failed to load or has no grouping column.
    pub fn city_breakdown(&self) -> Option<&CityBreakdown> {
        let dataset = self.dataset().ok()?;
        self.cache
            .city
            .get_or_init(|| eda::city_breakdown(dataset))
            .as_ref()
    }

    pub fn correlation(&self) -> Option<&CorrelationMatrix> {
        let dataset = self.dataset().ok()?;
        Some(
            self.cache
                .correlation
                .get_or_init(|| eda::correlation_matrix(dataset)),
        )
    }

    pub fn distributions(&self) -> Option<&[Distribution]> {
        let dataset = self.dataset().ok()?;
        let bins = self.eda_settings.histogram_bins;
        Some(
            self.cache
                .distributions
                .get_or_init(|| eda::distributions(dataset, bins)),
        )
    }

    pub fn scatter_plots(&self) -> Option<&[ScatterPlot]> {
        let dataset = self.dataset().ok()?;
        Some(
            self.cache
                .scatter
                .get_or_init(|| eda::scatter_plots(dataset)),
        )
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }
}

#[cfg(test)]
mod test_support;
