//! Poly Pong entry point
//!
//! On the web this builds a match on the page canvas and starts the frame
//! loop. Natively it runs a headless demo rally and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Poly Pong starting...");
    poly_pong::platform::web::run(poly_pong::MatchConfig::default())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use poly_pong::MatchConfig;
    use poly_pong::input::KeySnapshot;
    use poly_pong::renderer::VertexCanvas;
    use poly_pong::sim::{GameEvent, Match};

    /// Ticks in the headless demo (about a minute at 60 Hz)
    const DEMO_TICKS: u64 = 3600;

    env_logger::init();
    log::info!("Poly Pong (native) starting...");

    let config = std::env::args()
        .nth(1)
        .map(|path| MatchConfig::load(Path::new(&path)))
        .unwrap_or_default();

    let mut game = match Match::new(config) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start match: {}", e);
            std::process::exit(1);
        }
    };
    let mut canvas = VertexCanvas::new(game.config().width, game.config().height);
    let keys = KeySnapshot::default();

    for frames in 1..=DEMO_TICKS {
        if !game.is_playing() {
            // Serve again after every miss
            game.play();
        }
        game.frame(&keys, &mut canvas);

        for event in game.events() {
            match event {
                GameEvent::BoundaryBounce { index } => log::debug!("tick {}: wall {}", frames, index),
                GameEvent::PaddleBounce { paddle, offset } => {
                    log::info!("tick {}: paddle {} returned at {:.2}", frames, paddle, offset)
                }
                GameEvent::Missed { paddle } => log::info!("tick {}: missed by {:?}", frames, paddle),
            }
        }
    }

    log::info!(
        "Demo finished after {} ticks, misses per slot: {:?}, last frame {} vertices ({} bytes)",
        game.ticks(),
        game.misses(),
        canvas.vertex_count(),
        canvas.as_bytes().len()
    );
}
