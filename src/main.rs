// src/main.rs

use fractal_polyline::{FplSession, GenerationConfig, Point2, SweepSeries, SweepSettings};
use log::info;

fn print_series(title: &str, series: &SweepSeries) {
    println!("{}", title);
    for (x, y) in series.as_pairs() {
        println!("  {:>8.3}  {:>12.6}", x, y);
    }
}

fn main() {
    env_logger::init();

    let mut session = match FplSession::new(GenerationConfig::default(), SweepSettings::default()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid default configuration: {}", e);
            std::process::exit(1);
        }
    };

    session.add_segment(Point2::new(100.0, 300.0), Point2::new(700.0, 300.0));
    info!("Generating with {:?}", session.config());

    if let Err(e) = session.generate() {
        eprintln!("Generation failed: {}", e);
        std::process::exit(1);
    }

    if let Some(fpl) = session.polyline() {
        println!("FPL's coordinates: a(x,y) b(x,y)");
        for s in fpl.segments() {
            println!(
                "  ({:.2}, {:.2}) ({:.2}, {:.2})",
                s.a.x, s.a.y, s.b.x, s.b.y
            );
        }
        println!("path length {:.3}", fpl.path_length());
    }

    if let Some(charts) = session.charts() {
        print_series("max deviation vs spread", &charts.deviation.max_deviation);
        print_series("mean deviation vs spread", &charts.deviation.mean_deviation);
        print_series("elongation vs spread", &charts.deviation.elongation);
        print_series("log2(elongation) vs spread", &charts.deviation.log2_elongation);
        print_series("log2(elongation) vs depth", &charts.depth_log2_elongation);
    }
}
