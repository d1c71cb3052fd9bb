//! Ordered collections of categories.
//!
//! The order of a [`Scheme`] is the legend order and the evaluation
//! priority: a value belongs to the *last* category containing it, and
//! to the first category (the default one) when none does.
//!
//! Changes are reported to an optional [`ChangeSink`].  Bulk edits can
//! be grouped with [`Scheme::batch`] (or [`Scheme::suspend_events`] /
//! [`Scheme::resume_events`]) so that a single
//! [`SchemeEvent::Batched`] is emitted.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};
use std::sync::mpsc::{SendError, Sender};
use log::{debug, trace, warn};
use rgb::RGBA8;
use crate::{color::TRANSPARENT, Category, ColorCategory, ColorRange,
            EditorSettings, FeatureCategory, GradientModel, Palette,
            PaletteType, RGBColor, Symbolizer, SymbolizerKind};

/// A change made to a [`Scheme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeEvent {
    Inserted(usize),
    Removed(usize),
    /// The categories at these two positions were exchanged.
    Swapped(usize, usize),
    Updated(usize),
    Cleared,
    /// Every category may have changed.
    Refreshed,
    /// Emitted instead of the individual events when the outermost
    /// suspension ends.
    Batched { changes: usize },
}

/// Receiver of the change notifications of a [`Scheme`].
pub trait ChangeSink {
    fn notify(&mut self, event: &SchemeEvent);
}

impl<F: FnMut(&SchemeEvent)> ChangeSink for F {
    fn notify(&mut self, event: &SchemeEvent) { self(event) }
}

impl ChangeSink for Sender<SchemeEvent> {
    fn notify(&mut self, event: &SchemeEvent) {
        if let Err(SendError(e)) = self.send(*event) {
            warn!("scheme: receiver gone, dropping {:?}", e);
        }
    }
}

/// Receiver of the category assigned to each feature.  Keeping the
/// assignments, chunking and visibility is up to the implementor.
pub trait DrawingFilter<K> {
    fn assign(&mut self, feature: K, category: usize);
}

impl<K: Eq + Hash> DrawingFilter<K> for HashMap<K, usize> {
    fn assign(&mut self, feature: K, category: usize) {
        self.insert(feature, category);
    }
}

/// Where the colors of placeholder categories come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaletteStrategy {
    /// Walk the hue circle by steps of the golden ratio so that
    /// consecutive colors are far apart.
    Hue,
    /// Cycle through the colors of a palette.
    Palette(Palette<RGBA8>),
}

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

impl PaletteStrategy {
    /// The `i`-th color of the strategy.
    pub fn color(&self, i: usize) -> RGBA8 {
        match self {
            PaletteStrategy::Hue =>
                RGBA8::HUE.rgb((i as f64 * GOLDEN_RATIO_CONJUGATE).fract()),
            PaletteStrategy::Palette(p) => p.cycle(i),
        }
    }
}

impl Default for PaletteStrategy {
    fn default() -> Self { PaletteStrategy::Palette(RGBA8::set1()) }
}

/// What a [`Scheme`] needs from its categories.
pub trait SchemeCategory {
    /// Settings shared by the placeholder categories of a scheme.
    type Template: Clone + Default + fmt::Debug;

    fn category(&self) -> &Category;

    fn category_mut(&mut self) -> &mut Category;

    /// A category wrapping `category`, painted with `color`.
    fn placeholder(category: Category, color: RGBA8,
                   template: &Self::Template) -> Self;
}

impl SchemeCategory for Category {
    type Template = ();

    fn category(&self) -> &Category { self }

    fn category_mut(&mut self) -> &mut Category { self }

    fn placeholder(category: Category, _: RGBA8, _: &()) -> Self { category }
}

impl SchemeCategory for ColorCategory {
    type Template = GradientModel;

    fn category(&self) -> &Category { &self.category }

    fn category_mut(&mut self) -> &mut Category { &mut self.category }

    fn placeholder(category: Category, color: RGBA8,
                   model: &GradientModel) -> Self {
        ColorCategory { category, low_color: color, high_color: color,
                        gradient_model: *model }
    }
}

impl SchemeCategory for FeatureCategory {
    type Template = SymbolizerKind;

    fn category(&self) -> &Category { &self.category }

    fn category_mut(&mut self) -> &mut Category { &mut self.category }

    fn placeholder(category: Category, color: RGBA8,
                   kind: &SymbolizerKind) -> Self {
        FeatureCategory { category, symbolizer: Symbolizer::of_kind(*kind, color) }
    }
}

/// An ordered list of categories.
pub struct Scheme<C: SchemeCategory> {
    categories: Vec<C>,
    /// Colors of the categories built by
    /// [`Scheme::create_random_category`].
    pub palette: PaletteStrategy,
    /// Template of the categories built by
    /// [`Scheme::create_random_category`].
    pub template: C::Template,
    random_count: usize,
    suspend_count: usize,
    pending: usize,
    sink: Option<Box<dyn ChangeSink>>,
}

impl<C: SchemeCategory> Default for Scheme<C> {
    fn default() -> Self { Scheme::new() }
}

impl<C: SchemeCategory + fmt::Debug> fmt::Debug for Scheme<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheme")
            .field("categories", &self.categories)
            .field("palette", &self.palette)
            .field("template", &self.template)
            .field("suspend_count", &self.suspend_count)
            .finish_non_exhaustive()
    }
}

impl<C: SchemeCategory> Scheme<C> {
    pub fn new() -> Self {
        Scheme { categories: Vec::new(),
                 palette: PaletteStrategy::default(),
                 template: C::Template::default(),
                 random_count: 0, suspend_count: 0, pending: 0, sink: None }
    }

    pub fn from_categories(categories: Vec<C>) -> Self {
        Scheme { categories, ..Scheme::new() }
    }

    /// Send the change notifications to `sink` from now on.
    pub fn set_sink(&mut self, sink: impl ChangeSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Stop sending change notifications.
    pub fn remove_sink(&mut self) { self.sink = None }

    fn emit(&mut self, event: SchemeEvent) {
        if self.suspend_count > 0 {
            self.pending += 1;
        } else if let Some(sink) = self.sink.as_mut() {
            trace!("scheme: {:?}", event);
            sink.notify(&event);
        }
    }

    /// Hold back change notifications until a matching
    /// [`Scheme::resume_events`].  Calls nest.
    pub fn suspend_events(&mut self) { self.suspend_count += 1 }

    /// End one suspension.  When the last one ends and something
    /// changed meanwhile, a single [`SchemeEvent::Batched`] is sent.
    pub fn resume_events(&mut self) {
        if self.suspend_count == 0 {
            warn!("scheme: resume_events without matching suspend_events");
            return
        }
        self.suspend_count -= 1;
        if self.suspend_count == 0 && self.pending > 0 {
            let changes = std::mem::take(&mut self.pending);
            self.emit(SchemeEvent::Batched { changes });
        }
    }

    /// Whether change notifications are currently held back.
    pub fn events_suspended(&self) -> bool { self.suspend_count > 0 }

    /// Suspend events until the returned guard is dropped.
    ///
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    /// use color_classes::{Category, Scheme, SchemeEvent};
    /// let events = Rc::new(RefCell::new(vec![]));
    /// let mut scheme = Scheme::<Category>::new();
    /// let log = events.clone();
    /// scheme.set_sink(move |e: &SchemeEvent| log.borrow_mut().push(*e));
    /// {
    ///     let mut batch = scheme.batch();
    ///     batch.add_category(Category::from_bounds(0., 1.));
    ///     batch.add_category(Category::from_bounds(1., 2.));
    /// }
    /// assert_eq!(*events.borrow(), vec![SchemeEvent::Batched { changes: 2 }]);
    /// ```
    pub fn batch(&mut self) -> Batch<'_, C> {
        self.suspend_events();
        Batch { scheme: self }
    }

    pub fn len(&self) -> usize { self.categories.len() }

    pub fn is_empty(&self) -> bool { self.categories.is_empty() }

    pub fn categories(&self) -> &[C] { &self.categories }

    pub fn category(&self, index: usize) -> Option<&C> {
        self.categories.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> { self.categories.iter() }

    /// Index of the first category satisfying `pred`.
    pub fn position(&self, pred: impl FnMut(&C) -> bool) -> Option<usize> {
        self.categories.iter().position(pred)
    }

    /// Append `category`, returning its index.
    pub fn add_category(&mut self, category: C) -> usize {
        self.categories.push(category);
        let i = self.categories.len() - 1;
        self.emit(SchemeEvent::Inserted(i));
        i
    }

    /// Insert `category` at `index`, shifting the following ones.  An
    /// index past the end appends.
    pub fn insert_category(&mut self, index: usize, category: C) {
        let index = index.min(self.categories.len());
        self.categories.insert(index, category);
        self.emit(SchemeEvent::Inserted(index));
    }

    /// Remove and return the category at `index`, if any.
    pub fn remove_category(&mut self, index: usize) -> Option<C> {
        if index >= self.categories.len() { return None }
        let c = self.categories.remove(index);
        self.emit(SchemeEvent::Removed(index));
        Some(c)
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
        self.emit(SchemeEvent::Cleared);
    }

    /// Modify the category at `index` in place.  Returns `false` if
    /// there is no such category.
    pub fn update_category(&mut self, index: usize, f: impl FnOnce(&mut C)) -> bool {
        match self.categories.get_mut(index) {
            Some(c) => f(c),
            None => return false,
        }
        self.emit(SchemeEvent::Updated(index));
        true
    }

    /// Exchange the category at `index` with the previous one.
    /// Returns `false` for the first category or an invalid index.
    pub fn decrease_category_index(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.categories.len() { return false }
        self.categories.swap(index - 1, index);
        self.emit(SchemeEvent::Swapped(index - 1, index));
        true
    }

    /// Exchange the category at `index` with the next one.  Returns
    /// `false` for the last category or an invalid index.
    pub fn increase_category_index(&mut self, index: usize) -> bool {
        if index + 1 >= self.categories.len() { return false }
        self.categories.swap(index, index + 1);
        self.emit(SchemeEvent::Swapped(index, index + 1));
        true
    }

    /// A new category (not added to the scheme) whose values are
    /// selected by `filter_expression` and whose color is the next one
    /// of [`Scheme::palette`].
    pub fn create_random_category(&mut self, filter_expression: &str) -> C {
        let color = self.palette.color(self.random_count);
        self.random_count += 1;
        let mut category = Category::default();
        category.filter_expression = Some(filter_expression.to_string());
        category.legend_text = filter_expression.to_string();
        C::placeholder(category, color, &self.template)
    }

    /// Index of the category of `value`: the last one containing it,
    /// or the first one if none does.  `None` for an empty scheme.
    pub fn classify(&self, value: f64) -> Option<usize> {
        if self.categories.is_empty() { return None }
        let matched = self.categories.iter()
            .rposition(|c| c.category().contains(value));
        Some(matched.unwrap_or(0))
    }

    /// Classify every `(feature, value)` pair and hand the result to
    /// `filter`.  Returns the number of features assigned.
    pub fn classify_into<K>(&self, values: impl IntoIterator<Item = (K, f64)>,
                            filter: &mut impl DrawingFilter<K>) -> usize {
        let mut n = 0;
        for (feature, value) in values {
            if let Some(i) = self.classify(value) {
                filter.assign(feature, i);
                n += 1;
            }
        }
        n
    }

    /// Set the filter expression of every category from its range and
    /// `settings.field_name`, excluding `settings.exclude_expression`.
    pub fn assign_filter_expressions(&mut self, settings: &EditorSettings) {
        for c in &mut self.categories {
            let c = c.category_mut();
            let range = c.range().to_expression(&settings.field_name);
            c.filter_expression = Some(match (range.is_empty(), settings.exclude()) {
                (_, None) => range,
                (true, Some(ex)) => format!("NOT ({})", ex),
                (false, Some(ex)) => format!("{} AND NOT ({})", range, ex),
            });
        }
        self.emit(SchemeEvent::Refreshed);
    }

    /// A filter matching the values of any category.  Empty if some
    /// category covers all values.
    pub fn combined_expression(&self, field: &str) -> String {
        let exprs: Vec<String> = self.categories.iter()
            .map(|c| c.category().range().to_expression(field))
            .collect();
        if exprs.iter().any(|e| e.is_empty()) { return String::new() }
        match exprs.len() {
            1 => exprs.into_iter().next().unwrap_or_default(),
            _ => exprs.iter().map(|e| format!("({})", e))
                      .collect::<Vec<_>>().join(" OR "),
        }
    }

    /// Snap the bounds of every category (see
    /// [`Category::apply_snapping`]) and refresh their legend text.
    /// A sample longer than `settings.max_sample_count` (when not 0) is
    /// thinned to that many evenly spaced values first.
    pub fn apply_snapping(&mut self, settings: &EditorSettings, sample: &[f64]) {
        let sample = thin(sample, settings.max_sample_count);
        for c in &mut self.categories {
            let c = c.category_mut();
            c.apply_snapping(settings.interval_snap_method,
                             settings.interval_rounding_digits, &sample);
            c.apply_min_max(settings);
        }
        self.emit(SchemeEvent::Refreshed);
    }
}

/// At most `max` values of `sample` taken at evenly spaced positions,
/// the first one included.  `max == 0` keeps everything.
fn thin(sample: &[f64], max: usize) -> Cow<'_, [f64]> {
    if max == 0 || sample.len() <= max { return Cow::Borrowed(sample) }
    debug!("scheme: thinning sample of {} values to {}", sample.len(), max);
    let step = sample.len() as f64 / max as f64;
    Cow::Owned((0 .. max).map(|i| sample[(i as f64 * step) as usize]).collect())
}

impl Scheme<ColorCategory> {
    /// Color the categories along a gradient from `start` to `end`:
    /// category `i` of `n` blends between the gradient colors at
    /// `i / n` and `(i + 1) / n`.
    pub fn apply_color_ramp(&mut self, start: RGBA8, end: RGBA8) {
        self.apply_ramp(start.gradient(&end))
    }

    /// Same as [`Scheme::apply_color_ramp`] with the colors of a
    /// sequential or diverging `palette`, the first category starting
    /// at its first color and the last ending at its last one.
    pub fn apply_palette_ramp(&mut self, palette: &Palette<RGBA8>) {
        if palette.typ() == PaletteType::Qual {
            debug!("scheme: ramp along qualitative palette {}", palette.name());
        }
        self.apply_ramp(palette.gradient())
    }

    fn apply_ramp(&mut self, ramp: impl ColorRange<RGBA8>) {
        let n = self.categories.len();
        if n == 0 { return }
        let stops: Vec<RGBA8> = ramp.samples(n + 1).map(|(_, c)| c).collect();
        for (c, pair) in self.categories.iter_mut().zip(stops.windows(2)) {
            c.low_color = pair[0];
            c.high_color = pair[1];
        }
        self.emit(SchemeEvent::Refreshed);
    }

    /// The color of `value` given by the category it belongs to.
    pub fn calculate_color(&self, value: f64) -> RGBA8 {
        match self.classify(value) {
            Some(i) => self.categories[i].calculate_color(value),
            None => TRANSPARENT,
        }
    }
}

impl<'a, C: SchemeCategory> IntoIterator for &'a Scheme<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter { self.categories.iter() }
}

/// Guard returned by [`Scheme::batch`], resuming events when dropped.
pub struct Batch<'a, C: SchemeCategory> {
    scheme: &'a mut Scheme<C>,
}

impl<C: SchemeCategory> Deref for Batch<'_, C> {
    type Target = Scheme<C>;

    fn deref(&self) -> &Scheme<C> { self.scheme }
}

impl<C: SchemeCategory> DerefMut for Batch<'_, C> {
    fn deref_mut(&mut self) -> &mut Scheme<C> { self.scheme }
}

impl<C: SchemeCategory> Drop for Batch<'_, C> {
    fn drop(&mut self) { self.scheme.resume_events() }
}
