//! Gridrun headless demo host
//!
//! Stands in for the real windowing host: builds a simulation context,
//! feeds it a scripted input stream at a fixed timestep and reports what the
//! render sink would have received each frame. Useful for eyeballing the
//! core without a GPU attached.

use gridrun::renderer::Layer;
use gridrun::sim::{Key, SimContext, TickInput, tick};
use gridrun::{CoreConfig, CoreError};

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;

fn main() {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("bad config file: {e}");
            std::process::exit(1);
        }
    };

    let seed = 0xC0FFEE;
    let mut ctx = match SimContext::new(config, seed) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("world generation failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut ctx) {
        log::error!("simulation aborted: {e}");
        std::process::exit(1);
    }
}

/// Optional JSON config as the first CLI argument, defaults otherwise
fn load_config() -> Result<CoreConfig, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
            CoreConfig::from_json(&json).map_err(|e| format!("{path}: {e}"))
        }
        None => Ok(CoreConfig::default()),
    }
}

fn run(ctx: &mut SimContext) -> Result<(), CoreError> {
    let mut prev_keys = 0_u8;

    for frame in 0..FRAMES {
        let mut input = TickInput::new(frame as f32 * FRAME_DT, FRAME_DT);
        input.keys = scripted_keys(frame);
        input.prev_keys = prev_keys;
        prev_keys = input.keys;

        tick(ctx, &input)?;

        if frame % 60 == 0 {
            let alive = ctx
                .world
                .current_chunk(&ctx.player)
                .enemies
                .iter()
                .filter(|e| !e.dead)
                .count();
            log::info!(
                "frame {frame}: player {:.2} moving={} | {} vertices, {} level / {} entity quads, {alive} enemies alive",
                ctx.player.position,
                ctx.player.motion.is_some(),
                ctx.frame.vertex_count(),
                ctx.frame.batch(Layer::Level).len(),
                ctx.frame.batch(Layer::Entities).len(),
            );
        }
    }

    log::info!(
        "done after {FRAMES} frames, arena {} / {} bytes",
        ctx.world_arena.used(),
        ctx.world_arena.capacity()
    );
    Ok(())
}

/// A little choreography: walk right, drop a tower, walk down, reset, walk up
fn scripted_keys(frame: u32) -> u8 {
    let key = match frame {
        10 => Some(Key::Right),
        70 => Some(Key::Action),
        80 => Some(Key::Down),
        150 => Some(Key::Reset),
        160 => Some(Key::Up),
        _ => None,
    };
    key.map_or(0, |k| TickInput::default().press(k).keys)
}
