use std::path::PathBuf;
use std::rc::Rc;

use gold_digger::engine::clock::TickClock;
use gold_digger::engine::presentation::TracingPresenter;
use gold_digger::engine::{InputState, ScreenStack};
use gold_digger::levels::{LevelLoader, LevelSource};
use gold_digger::{Game, RulesConfig};
use tracing::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // gold-digger [level.json] [rules.json]
    let mut args = std::env::args().skip(1);
    let level_path = PathBuf::from(args.next().unwrap_or_else(|| "assets/levels/level_1.json".into()));
    let rules = match args.next() {
        Some(path) => match RulesConfig::load(&path) {
            Ok(rules) => rules,
            Err(e) => {
                error!("Failed to load rules {path}: {e}");
                std::process::exit(1);
            }
        },
        None => RulesConfig::default(),
    };

    let root = level_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let reference = level_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let levels: Rc<dyn LevelSource> = Rc::new(LevelLoader::new(root));
    let rules = Rc::new(rules);
    let ticks_per_second = rules.ticks_per_second;

    let game = match Game::load(&reference, rules, levels, 0, rand::random()) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to load level {}: {e}", level_path.display());
            std::process::exit(1);
        }
    };
    let mut screens = ScreenStack::new(Box::new(game));

    // Initialize the event loop
    let event_loop = EventLoop::new();
    let window = match WindowBuilder::new()
        .with_title("Gold Digger")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(e) => {
            error!("Failed to create window: {e}");
            std::process::exit(1);
        }
    };

    let mut input = InputState::new();
    let mut presenter = TracingPresenter::new();
    let mut clock = TickClock::new(ticks_per_second);
    info!("Gold Digger v{} starting", env!("CARGO_PKG_VERSION"));

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => {
                if let WindowEvent::CloseRequested = event {
                    info!("Window close requested");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                input.handle_event(&event);
            }
            Event::MainEventsCleared => {
                for _ in 0..clock.due_ticks() {
                    let alive = screens.tick(&input, &mut presenter);
                    input.end_tick();
                    if !alive {
                        info!("No screens left, exiting");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                }
                window.request_redraw();
            }
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                screens.draw(&mut presenter);
            }
            _ => (),
        }
    });
}
