use crate::classifier::ModelArtifacts;
use crate::color::{LabelColors, WordPalette};
use crate::config::DashboardConfig;
use crate::data::aggregate::{sentiment_distribution, sentiment_trend, LabelCount, TrendTable};
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::loader::{load_dataset, LoadError, SchemaError};
use crate::data::model::{DatasetSummary, TweetDataset};
use crate::data::sample::sample_indices;
use crate::wordcloud::{build_word_cloud, corpus_for_label, WordCloudOutcome};

// ---------------------------------------------------------------------------
// Application context: everything loaded once at startup
// ---------------------------------------------------------------------------

/// Read-only inputs for the whole session.
pub struct AppContext {
    pub config: DashboardConfig,
    pub model: ModelArtifacts,
    pub dataset: TweetDataset,
    pub summary: DatasetSummary,
    /// Observed date range with every label selected.
    pub full_criteria: FilterCriteria,
}

impl AppContext {
    /// Load model artifacts, then the dataset. The first failure wins.
    pub fn load(config: DashboardConfig) -> Result<Self, LoadError> {
        let model = ModelArtifacts::load(&config.model_path, &config.vectorizer_path)?;
        let dataset = load_dataset(&config.data_path, &config.columns)?;
        Self::new(config, model, dataset)
    }

    pub fn new(
        config: DashboardConfig,
        model: ModelArtifacts,
        dataset: TweetDataset,
    ) -> Result<Self, LoadError> {
        let empty = || LoadError::schema(&config.data_path, SchemaError::Empty);
        if dataset.is_empty() {
            return Err(empty());
        }
        let summary = dataset.summary().ok_or_else(empty)?;
        let full_criteria = FilterCriteria::full(&dataset).ok_or_else(empty)?;
        Ok(Self {
            config,
            model,
            dataset,
            summary,
            full_criteria,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub context: AppContext,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    pub distribution: Vec<LabelCount>,
    pub trend: TrendTable,

    /// Random rows shown in the sample table.
    pub sample: Vec<usize>,

    /// Fixed seed for the sample; `None` draws a fresh sample every time.
    pub sample_seed: Option<u64>,

    /// Label whose cleaned text feeds the word cloud.
    pub cloud_label: String,

    /// Laid-out word cloud, rebuilt lazily by the UI after invalidation.
    pub word_cloud: Option<WordCloudOutcome>,

    pub label_colors: LabelColors,
    pub word_palette: WordPalette,
}

impl AppState {
    pub fn new(context: AppContext) -> Self {
        let criteria = context.full_criteria.clone();
        let label_colors = LabelColors::new(&context.dataset.labels);
        let cloud_label = context.dataset.labels.first().cloned().unwrap_or_default();

        let mut state = Self {
            context,
            criteria,
            visible_indices: Vec::new(),
            distribution: Vec::new(),
            trend: TrendTable::default(),
            sample: Vec::new(),
            sample_seed: None,
            cloud_label,
            word_cloud: None,
            label_colors,
            word_palette: WordPalette::default(),
        };
        state.refresh();
        state
    }

    pub fn dataset(&self) -> &TweetDataset {
        &self.context.dataset
    }

    /// Recompute every derived view after a criteria change.
    pub fn refresh(&mut self) {
        let ds = &self.context.dataset;
        self.visible_indices = filtered_indices(ds, &self.criteria);
        self.distribution = sentiment_distribution(ds, &self.visible_indices);
        self.trend = sentiment_trend(ds, &self.visible_indices);
        self.word_cloud = None;
        self.resample();
        log::debug!(
            "Filter {}..={} {:?}: {} of {} visible",
            self.criteria.start,
            self.criteria.end,
            self.criteria.labels,
            self.visible_indices.len(),
            self.context.dataset.len()
        );
    }

    /// Draw a new random sample from the visible rows.
    pub fn resample(&mut self) {
        self.sample = sample_indices(
            &self.visible_indices,
            self.context.config.sample_size,
            self.sample_seed,
        );
    }

    /// Toggle one label in the accepted set.
    pub fn toggle_label(&mut self, label: &str) {
        if !self.criteria.labels.remove(label) {
            self.criteria.labels.insert(label.to_string());
        }
        self.refresh();
    }

    /// Accept every label.
    pub fn select_all(&mut self) {
        self.criteria.labels = self.context.full_criteria.labels.clone();
        self.refresh();
    }

    /// Back to the observed date range with every label.
    pub fn reset_filters(&mut self) {
        self.criteria = self.context.full_criteria.clone();
        self.refresh();
    }

    /// Accept no label.
    pub fn select_none(&mut self) {
        self.criteria.labels.clear();
        self.refresh();
    }

    pub fn set_cloud_label(&mut self, label: String) {
        if label != self.cloud_label {
            self.cloud_label = label;
            self.word_cloud = None;
        }
    }

    /// Build the word cloud for the current label if it was invalidated.
    pub fn ensure_word_cloud<F>(&mut self, measure: F) -> &WordCloudOutcome
    where
        F: FnMut(&str, f32) -> [f32; 2],
    {
        let ctx = &self.context;
        let visible = &self.visible_indices;
        let label = &self.cloud_label;
        self.word_cloud.get_or_insert_with(|| {
            let corpus = corpus_for_label(&ctx.dataset, visible, label);
            build_word_cloud(&corpus, &ctx.config.word_cloud, measure)
        })
    }
}
