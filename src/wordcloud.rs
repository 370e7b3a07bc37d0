use std::collections::HashMap;

use crate::config::WordCloudSettings;
use crate::data::model::TweetDataset;

/// Common English function words dropped before counting.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "by", "about",
    "as", "of", "from", "is", "are", "was", "were", "be", "been", "this", "that", "these",
    "those", "it", "its", "they", "them", "their", "have", "has", "had", "do", "does", "did",
    "will", "would", "should", "can", "could", "may", "might", "must", "shall", "rt", "amp",
];

/// Pixels between neighbouring words.
const PADDING: f32 = 2.0;
/// Radial growth of the placement spiral, px per radian.
const SPIRAL_GAP: f32 = 1.5;
const SPIRAL_STEP: f32 = 0.2;
/// Font shrink factor applied when a word finds no free slot.
const SHRINK: f32 = 0.85;

// ---------------------------------------------------------------------------
// Corpus and frequencies
// ---------------------------------------------------------------------------

/// Whitespace-join the cleaned text of every visible record with `label`.
pub fn corpus_for_label(dataset: &TweetDataset, indices: &[usize], label: &str) -> String {
    indices
        .iter()
        .map(|&i| &dataset.records[i])
        .filter(|rec| rec.label == label)
        .map(|rec| rec.text_clean.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(corpus: &str) -> impl Iterator<Item = String> + '_ {
    corpus
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''))
        .map(|t| t.trim_matches('\'').to_lowercase())
        .map(|t| t.strip_suffix("'s").map(str::to_string).unwrap_or(t))
        .filter(|t| t.chars().count() >= 2 && !STOPWORDS.contains(&t.as_str()))
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
}

/// Count single words (no phrase detection, no all-digit tokens), most frequent first, ties
/// broken alphabetically, truncated to `max_words`.
pub fn word_frequencies(corpus: &str, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for tok in tokens(corpus) {
        *counts.entry(tok).or_default() += 1;
    }
    let mut freqs: Vec<(String, usize)> = counts.into_iter().collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs.truncate(max_words);
    freqs
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// A word positioned on the canvas. Coordinates are in canvas units
/// (`WordCloudSettings::width` × `height`).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    /// Frequency rank, 0 for the most common word.
    pub rank: usize,
    pub font_size: f32,
    pub center: [f32; 2],
    pub size: [f32; 2],
}

impl PlacedWord {
    fn overlaps(&self, center: [f32; 2], size: [f32; 2]) -> bool {
        (self.center[0] - center[0]).abs() * 2.0 < self.size[0] + size[0] + PADDING
            && (self.center[1] - center[1]).abs() * 2.0 < self.size[1] + size[1] + PADDING
    }
}

/// Place words along an elliptical spiral from the canvas centre.
///
/// Font size follows relative frequency, never exceeding the size of the
/// previously placed word. A word with no free slot is retried smaller and
/// dropped once it would fall below `min_font_size`. `measure` returns the
/// `[width, height]` of a word at a font size.
pub fn layout_words<F>(
    freqs: &[(String, usize)],
    settings: &WordCloudSettings,
    mut measure: F,
) -> Vec<PlacedWord>
where
    F: FnMut(&str, f32) -> [f32; 2],
{
    let Some(max_count) = freqs.first().map(|(_, c)| *c as f32) else {
        return Vec::new();
    };

    let mut placed: Vec<PlacedWord> = Vec::new();
    let mut ceiling = settings.max_font_size;

    for (rank, (word, count)) in freqs.iter().enumerate() {
        let ratio = *count as f32 / max_count;
        let mut font_size = (settings.max_font_size * (0.5 * ratio + 0.5)).min(ceiling);

        while font_size >= settings.min_font_size {
            let size = measure(word, font_size);
            if let Some(center) = find_slot(size, &placed, settings) {
                placed.push(PlacedWord {
                    word: word.clone(),
                    count: *count,
                    rank,
                    font_size,
                    center,
                    size,
                });
                ceiling = font_size;
                break;
            }
            font_size *= SHRINK;
        }
    }

    placed
}

fn find_slot(size: [f32; 2], placed: &[PlacedWord], settings: &WordCloudSettings) -> Option<[f32; 2]> {
    let (w, h) = (settings.width, settings.height);
    if size[0] > w || size[1] > h {
        return None;
    }
    let aspect = h / w;
    let max_radius = w.hypot(h) / 2.0;

    let mut theta: f32 = 0.0;
    loop {
        let r = SPIRAL_GAP * theta;
        if r > max_radius / aspect.min(1.0) {
            return None;
        }
        let center = [w / 2.0 + r * theta.cos(), h / 2.0 + r * aspect * theta.sin()];
        let inside = center[0] - size[0] / 2.0 >= 0.0
            && center[0] + size[0] / 2.0 <= w
            && center[1] - size[1] / 2.0 >= 0.0
            && center[1] + size[1] / 2.0 <= h;
        if inside && !placed.iter().any(|p| p.overlaps(center, size)) {
            return Some(center);
        }
        theta += SPIRAL_STEP;
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum WordCloudOutcome {
    Rendered(Vec<PlacedWord>),
    /// Nothing to draw for the selected label in the current view.
    NoData,
}

pub fn build_word_cloud<F>(corpus: &str, settings: &WordCloudSettings, measure: F) -> WordCloudOutcome
where
    F: FnMut(&str, f32) -> [f32; 2],
{
    let freqs = word_frequencies(corpus, settings.max_words);
    if freqs.is_empty() {
        return WordCloudOutcome::NoData;
    }
    let words = layout_words(&freqs, settings, measure);
    log::debug!(
        "Word cloud: {} of {} words placed",
        words.len(),
        freqs.len()
    );
    if words.is_empty() {
        return WordCloudOutcome::NoData;
    }
    WordCloudOutcome::Rendered(words)
}
