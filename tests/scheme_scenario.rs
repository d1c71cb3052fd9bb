use std::collections::HashMap;
use rgb::RGBA8;
use color_classes::{
    ColorCategory, EditorSettings, GradientModel, IntervalSnapMethod, Range,
    Scheme, Statistics,
};

const WHITE: RGBA8 = RGBA8 { r: 255, g: 255, b: 255, a: 255 };
const BLACK: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };

/// Three equal width categories `[10,20), [20,30), [30,40]` built from
/// the statistics of the sample.
fn equal_widths(sample: &mut [f64]) -> Scheme<ColorCategory> {
    let stats = Statistics::of(sample);
    let width = (stats.maximum - stats.minimum) / 3.;
    let mut scheme = Scheme::<ColorCategory>::new();
    let mut batch = scheme.batch();
    for i in 0 .. 3 {
        let min = stats.minimum + i as f64 * width;
        let last = i == 2;
        let max = if last { stats.maximum } else { min + width };
        let range = Range::with_inclusivity(min, max, true, last);
        batch.add_category(ColorCategory::with_range(range, WHITE, BLACK));
    }
    drop(batch);
    scheme
}

#[test]
fn value_in_second_category_is_mid_gray() {
    let mut sample = vec![40., 10., 30., 20.];
    let scheme = equal_widths(&mut sample);
    assert_eq!(sample, vec![10., 20., 30., 40.]);
    assert_eq!(scheme.len(), 3);
    assert_eq!(scheme.categories()[1].range().to_string(), "20 - 30");
    assert_eq!(scheme.classify(25.), Some(1));
    assert_eq!(scheme.calculate_color(25.), RGBA8::new(127, 127, 127, 255));
    assert_eq!(scheme.classify(20.), Some(1));
    assert_eq!(scheme.calculate_color(20.), WHITE);
    assert_eq!(scheme.classify(40.), Some(2));
    assert_eq!(scheme.calculate_color(40.), BLACK);
    assert_eq!(scheme.calculate_color(10.), WHITE);
}

#[test]
fn sample_values_are_assigned_to_features() {
    let mut sample = vec![10., 20., 30., 40.];
    let scheme = equal_widths(&mut sample);
    let features = sample.iter().enumerate().map(|(id, &v)| (id, v));
    let mut assignments: HashMap<usize, usize> = HashMap::new();
    assert_eq!(scheme.classify_into(features, &mut assignments), 4);
    let mut pairs: Vec<_> = assignments.into_iter().collect();
    pairs.sort();
    assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2), (3, 2)]);
}

#[test]
fn settings_drive_expressions_and_legends() {
    let json = r#"{ "field_name": "INCOME",
                    "interval_snap_method": "Rounding",
                    "interval_rounding_digits": 0,
                    "gradient_model": "Exponential" }"#;
    let settings = EditorSettings::from_reader(json.as_bytes()).unwrap();
    assert_eq!(settings.interval_snap_method, IntervalSnapMethod::Rounding);
    let mut scheme = Scheme::from_categories(vec![
        ColorCategory::new(None, 1000.4, WHITE, BLACK),
        ColorCategory::new(1000.4, 5000.6, WHITE, BLACK)
            .gradient_model(settings.gradient_model)]);
    scheme.apply_snapping(&settings, &[]);
    scheme.assign_filter_expressions(&settings);
    let legends: Vec<_> = scheme.iter()
        .map(|c| c.category.legend_text.clone()).collect();
    assert_eq!(legends, vec!["<= 1000", "1000 - 5001"]);
    assert_eq!(scheme.categories()[1].category.filter_expression.as_deref(),
               Some("[INCOME] > 1000 AND [INCOME] <= 5001"));
    assert_eq!(scheme.categories()[1].gradient_model, GradientModel::Exponential);
    // Open ended first category: the high color everywhere.
    assert_eq!(scheme.calculate_color(-3.), BLACK);
}
