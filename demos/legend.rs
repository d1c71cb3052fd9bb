use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGBA8;
use color_classes::{ColorCategory, EditorSettings, FeatureCategory,
                    GradientModel, Range, RGBColor, Scheme, Statistics};

type Err = Box<dyn Error>;

fn css_string(c: RGBA8) -> String {
    format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.)
}

/// One row per category: its color ramp sampled `n` times and its
/// legend text.
fn legend(fh: &mut impl Write, scheme: &Scheme<ColorCategory>, n: usize,
          width: u32) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\">")?;
    for c in scheme {
        let (min, max) = match (c.range().minimum(), c.range().maximum()) {
            (Some(min), Some(max)) => (min, max),
            _ => continue,
        };
        writeln!(fh, "<tr>")?;
        for i in 0 .. n {
            let v = min + (max - min) * i as f64 / (n - 1) as f64;
            writeln!(fh, "  <td style=\"width: {width}px; height: 20px; \
                          background-color: {}\"></td>",
                     css_string(c.calculate_color(v)))?;
        }
        writeln!(fh, "<td style=\"padding-left: 7px\">{}</td></tr>",
                 c.category)?;
    }
    writeln!(fh, "</table><br/>")?;
    Ok(())
}

fn swatches(fh: &mut impl Write, scheme: &Scheme<FeatureCategory>)
            -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 4px\">")?;
    for c in scheme {
        writeln!(fh, "<tr><td style=\"width: 30px; height: 20px; \
                      background-color: {}\"></td><td>{}</td></tr>",
                 css_string(c.symbolizer.color()), c.category)?;
    }
    writeln!(fh, "</table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let settings = EditorSettings { field_name: "DENSITY".into(),
                                    ..Default::default() };
    let mut sample: Vec<f64> = (1 ..= 200).map(|i| (i as f64).powf(1.7)).collect();
    let stats = Statistics::of(&mut sample);

    let mut fh = BufWriter::new(File::create("legend.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Color_classes: {}</title>\n\
                  </head>\n\
                  <body>\n\
                  <p>{}</p>",
             env::args().next().unwrap_or_default(), stats)?;

    let equal_breaks = |model: GradientModel| {
        let n = settings.num_breaks;
        let step = (stats.maximum - stats.minimum) / n as f64;
        Scheme::from_categories((0 .. n).map(|i| {
            let min = stats.minimum + i as f64 * step;
            let range = Range::with_inclusivity(min, min + step, i == 0, true);
            ColorCategory::with_range(range, RGBA8::default(), RGBA8::default())
                .gradient_model(model)
        }).collect())
    };
    for model in [GradientModel::Linear, GradientModel::Exponential,
                  GradientModel::Logarithmic] {
        let mut scheme = equal_breaks(model);
        scheme.apply_color_ramp(settings.start_color, settings.end_color);
        scheme.apply_snapping(&settings, &sample);
        writeln!(fh, "<h3>{:?}</h3>", model)?;
        legend(&mut fh, &scheme, 40, 4)?;
    }

    let mut scheme = equal_breaks(GradientModel::Linear);
    scheme.apply_palette_ramp(&RGBA8::ylorrd());
    scheme.apply_snapping(&settings, &sample);
    writeln!(fh, "<h3>Palette {:?}</h3>", RGBA8::ylorrd())?;
    legend(&mut fh, &scheme, 40, 4)?;

    writeln!(fh, "<h3>Placeholder categories ({:?})</h3>",
             RGBA8::paired())?;
    let mut scheme = Scheme::<FeatureCategory>::new();
    scheme.palette = color_classes::PaletteStrategy::Palette(RGBA8::paired());
    for kind in ["forest", "water", "urban", "farmland"] {
        let c = scheme.create_random_category(&format!("[LANDUSE] = '{kind}'"));
        scheme.add_category(c);
    }
    swatches(&mut fh, &scheme)?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
