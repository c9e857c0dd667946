use std::path::Path;
use std::process::ExitCode;

use cgmath::Point3;

use rodcut::{tetrahedral_bar, DemoHost, RawKey, RodCutController, RodToolConfig};

// The liver-scene rod: a thin blade, long on Z, approaching from -X.
const DEFAULT_CENTER: [f64; 3] = [-5.0, 2.0, 0.0];
const DEFAULT_HALF_EXTENTS: [f64; 3] = [0.12, 0.12, 2.5];
const TICKS: usize = 120;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match RodToolConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => RodToolConfig::new(DEFAULT_CENTER, DEFAULT_HALF_EXTENTS),
    };

    // A bar of tissue straddling the rod's sweep path along +X.
    let (positions, tetrahedra) = tetrahedral_bar(8, 4, 4, 1.0, Point3::new(-4.0, 0.0, -2.0));
    let mut host = DemoHost::new(positions, tetrahedra);
    let initial_count = host.tetrahedron_count();
    let mut controller = RodCutController::new(&config, host.bindings());

    println!(
        "demo mesh: {} tetrahedra; rod starts at ({:.2}, {:.2}, {:.2})",
        initial_count, config.center[0], config.center[1], config.center[2]
    );

    // Scripted session: enable cutting, hold "right", run the tick loop the
    // way the engine would, executing each tick's removal request.
    controller.on_key_pressed(&RawKey::Char('p'));
    controller.on_key_pressed(&RawKey::Text("Qt.Key_Right".to_string()));
    let mut removed_total = 0;
    for tick in 0..TICKS {
        controller.on_animate_begin();
        let removed = host.apply_pending_removal();
        if removed > 0 {
            let center = controller.center();
            println!(
                "tick {tick:3}: removed {removed:3} tetrahedra, {} left, rod at ({:.2}, {:.2}, {:.2})",
                host.tetrahedron_count(),
                center.x,
                center.y,
                center.z
            );
        }
        removed_total += removed;
    }
    controller.on_key_released(&RawKey::Text("Qt.Key_Right".to_string()));
    controller.on_key_pressed(&RawKey::Char('p'));

    println!(
        "cut {} of {} tetrahedra; rod geometry republished {} times",
        removed_total,
        initial_count,
        host.rod_republish_count()
    );
    ExitCode::SUCCESS
}
