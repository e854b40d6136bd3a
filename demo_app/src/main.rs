//! Window compositor demo
//!
//! Builds a handful of overlapping windows, mutates them from worker threads
//! while frames are composited, then writes the last frame to a PNG.
//!
//! Usage: `window_demo [settings.toml|settings.ron] [output.png]`

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::info;
use rand::prelude::*;
use window_compositor::prelude::*;

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;
const FRAME_COUNT: usize = 60;

type Manager = WindowManager<SoftwareBackend>;

fn load_settings(path: Option<&str>) -> Result<CompositorSettings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("Loading compositor settings from {}", path);
            Ok(CompositorSettings::load_from_file(path)?)
        }
        None => Ok(CompositorSettings::default()),
    }
}

fn build_scene(manager: &Manager) -> WindowResult<()> {
    let desktop = WindowConfig {
        title: "Desktop".to_string(),
        start_size: V2i::new(FRAME_WIDTH as i32, FRAME_HEIGHT as i32),
        bg_color: Color::rgb(40, 60, 90),
        ..WindowConfig::default()
    }
    .with_flag(WindowFlags::HAS_TITLE_BAR, false)
    .with_flag(WindowFlags::CLOSABLE, false);
    manager.add_window("desktop", desktop)?;

    manager.add_window(
        "editor",
        WindowConfig::new("Editor", V2i::new(40, 40), V2i::new(320, 220)),
    )?;

    let palette = WindowConfig {
        bg_color: Color::rgb(60, 30, 30),
        title_bg_color: Color::rgb(90, 40, 40),
        ..WindowConfig::new("Palette", V2i::new(300, 120), V2i::new(180, 160))
    }
    .with_flag(WindowFlags::CLOSABLE, false);
    manager.add_window("palette", palette)?;

    let dialog = WindowConfig {
        title_button_color: Color::rgb(255, 90, 90),
        ..WindowConfig::new("Confirm", V2i::new(200, 260), V2i::new(220, 90))
    };
    manager.add_window("dialog", dialog)?;
    manager.update_window_items(
        "dialog",
        vec![
            WindowItem::new("OK", V2i::new(20, 50), V2i::new(80, 24))
                .with_action(|| info!("OK pressed")),
            WindowItem::new("Cancel", V2i::new(120, 50), V2i::new(80, 24)),
        ],
    )?;

    for id in ["desktop", "editor", "palette", "dialog"] {
        manager.open_window(id)?;
    }
    Ok(())
}

/// Paint item rectangles into a window's cache
fn paint_items(manager: &Manager, id: &str) -> WindowResult<()> {
    manager.redraw_window(id, |backend, surface, items| {
        for item in items {
            let position = Vec2::new(item.position.x as f32, item.position.y as f32);
            let size = Vec2::new(item.size.x as f32, item.size.y as f32);
            backend.fill_rect(surface, position, size, item.color, true);
        }
    })
}

fn spawn_workers(manager: &Arc<Manager>) -> Vec<thread::JoinHandle<WindowResult<()>>> {
    let swatches = {
        let manager = Arc::clone(manager);
        thread::spawn(move || -> WindowResult<()> {
            let mut rng = rand::thread_rng();
            for _ in 0..FRAME_COUNT {
                let items = (0..4)
                    .map(|i| {
                        let mut item = WindowItem::new(
                            format!("swatch {i}"),
                            V2i::new(10 + i * 40, 40),
                            V2i::new(30, 30),
                        );
                        item.color = Color::rgb(rng.gen(), rng.gen(), rng.gen());
                        item
                    })
                    .collect();
                manager.update_window_items("palette", items)?;
                paint_items(&manager, "palette")?;
                thread::yield_now();
            }
            Ok(())
        })
    };

    let raiser = {
        let manager = Arc::clone(manager);
        thread::spawn(move || -> WindowResult<()> {
            for i in 0..FRAME_COUNT {
                // Alternate which window sits on top
                let id = if i % 2 == 0 { "editor" } else { "dialog" };
                manager.close_window(id)?;
                manager.open_window(id)?;
                thread::yield_now();
            }
            Ok(())
        })
    };

    vec![swatches, raiser]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (settings_path, output_path) = match args.as_slice() {
        [] => (None, "frame.png"),
        [one] if one.ends_with(".png") => (None, one.as_str()),
        [one] => (Some(one.as_str()), "frame.png"),
        [settings, output, ..] => (Some(settings.as_str()), output.as_str()),
    };

    let settings = load_settings(settings_path)?;
    let manager = Arc::new(WindowManager::new(SoftwareBackend::new(), settings));
    build_scene(&manager)?;
    paint_items(&manager, "dialog")?;

    let workers = spawn_workers(&manager);

    let start = Instant::now();
    let mut last_frame = None;
    for _ in 0..FRAME_COUNT {
        let mut frame = SoftwareBackend::new_target(FRAME_WIDTH, FRAME_HEIGHT);
        manager.draw_frame(&mut frame);
        last_frame = Some(frame);
    }
    let elapsed = start.elapsed();

    for worker in workers {
        worker.join().map_err(|_| "worker thread panicked")??;
    }

    manager.invoke_item_action("dialog", 0)?;

    info!(
        "Composited {} frames in {:.2?} ({:.2?}/frame), draw order: {:?}",
        FRAME_COUNT,
        elapsed,
        elapsed / FRAME_COUNT as u32,
        manager.open_windows()
    );

    let frame = last_frame.ok_or("no frame composited")?;
    frame.save(output_path)?;
    info!("Wrote {}", output_path);
    Ok(())
}
