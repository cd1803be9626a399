#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use bucketmap::{
    BucketMap, ChainingHashMap, ProbingHashMap,
    hashing::{position_weighted, sum_of_chars},
};
use env_logger::Builder;
use log::{LevelFilter, debug, info};
use plotters::prelude::*;
use rand::Rng;

const INITIAL_CAPACITY: usize = 50;
const TOTAL_KEYS: usize = 2_000;
// Record a sample after every batch of inserts
const BATCH_SIZE: usize = 100;
// Every n-th insert also removes an older key, leaving tombstones in the probing maps
const REMOVE_EVERY: usize = 7;
const KEY_LENGTH: usize = 8;

const COLORS: [RGBColor; 4] = [
    RGBColor(220, 50, 50),  // Bright red
    RGBColor(50, 90, 220),  // Bright blue
    RGBColor(50, 180, 50),  // Bright green
    RGBColor(180, 50, 180), // Bright magenta
];

/// Map state after a batch of operations
#[derive(Debug, Clone, Copy)]
struct Sample {
    inserted: usize,
    live: usize,
    capacity: usize,
    load: f64,
    empty_ratio: f64,
}

fn initialize_logger() {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info).format_timestamp_millis().parse_default_env();

    if builder.try_init().is_err() {
        debug!("logger already initialized");
    }
}

fn random_key(rng: &mut impl Rng) -> String {
    (0..KEY_LENGTH).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

/// Chaining maps never grow on their own; double them once every bucket holds an entry on average
fn grow_when_full<M: BucketMap<String, usize>>(map: &mut M) {
    if map.table_load() >= 1.0 {
        let doubled = map.capacity().saturating_mul(2);
        map.resize(doubled);
    }
}

fn profile<M, F>(mut map: M, keys: &[String], mut maintain: F) -> Vec<Sample>
where
    M: BucketMap<String, usize>,
    F: FnMut(&mut M),
{
    let mut samples = Vec::with_capacity(keys.len() / BATCH_SIZE);

    for (i, key) in keys.iter().enumerate() {
        maintain(&mut map);
        map.put(key.clone(), i);

        if i % REMOVE_EVERY == 0 {
            if let Some(old) = keys.get(i / 2) {
                map.remove(old);
            }
        }

        let inserted = i + 1;
        if inserted % BATCH_SIZE == 0 {
            samples.push(Sample {
                inserted,
                live: map.len(),
                capacity: map.capacity(),
                load: map.table_load(),
                empty_ratio: map.empty_buckets() as f64 / map.capacity() as f64,
            });
        }
    }

    samples
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[(&str, Vec<(usize, f64)>)],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = series.iter().flat_map(|(_, points)| points.iter().map(|&(x, _)| x)).max().unwrap_or(1);
    let max_y = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .fold(0.0_f64, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..max_x, 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (index, (name, points)) in series.iter().enumerate() {
        let color = &COLORS[index % COLORS.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            points.iter().map(|&point| Circle::new(point, 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    info!("wrote {path}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..TOTAL_KEYS).map(|_| random_key(&mut rng)).collect();

    let runs = [
        (
            "Chaining / sum of chars",
            profile(ChainingHashMap::new(INITIAL_CAPACITY, sum_of_chars), &keys, grow_when_full),
        ),
        (
            "Chaining / position weighted",
            profile(ChainingHashMap::new(INITIAL_CAPACITY, position_weighted), &keys, grow_when_full),
        ),
        (
            "Probing / sum of chars",
            profile(ProbingHashMap::new(INITIAL_CAPACITY, sum_of_chars), &keys, |_| {}),
        ),
        (
            "Probing / position weighted",
            profile(ProbingHashMap::new(INITIAL_CAPACITY, position_weighted), &keys, |_| {}),
        ),
    ];

    for (name, samples) in &runs {
        println!("{name}");
        for sample in samples {
            println!(
                "  {:>5} inserted: {:>5} live, capacity {:>5}, load {:.2}, empty {:.1}%",
                sample.inserted,
                sample.live,
                sample.capacity,
                sample.load,
                sample.empty_ratio * 100.0
            );
        }
    }

    let load_series: Vec<(&str, Vec<(usize, f64)>)> = runs
        .iter()
        .map(|(name, samples)| (*name, samples.iter().map(|s| (s.inserted, s.load)).collect()))
        .collect();
    plot("table_load.png", "Table Load by Collision Strategy", "Load Factor", &load_series)?;

    let empty_series: Vec<(&str, Vec<(usize, f64)>)> = runs
        .iter()
        .map(|(name, samples)| {
            (*name, samples.iter().map(|s| (s.inserted, s.empty_ratio * 100.0)).collect())
        })
        .collect();
    plot("empty_buckets.png", "Empty Buckets by Collision Strategy", "Empty Buckets (%)", &empty_series)?;

    Ok(())
}
