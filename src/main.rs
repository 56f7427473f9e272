use anyhow::{Context, Error};
use log::{info, warn};
use maze_raycaster::camera::Camera;
use maze_raycaster::frame::Frame;
use maze_raycaster::grid::{Classification, GridTexture};
use maze_raycaster::minimap::render_minimap;
use maze_raycaster::raycast::parallel::FrameRenderer;
use maze_raycaster::raycast::sequential::{Column, Raycaster};
use maze_raycaster::session::{Intent, Session, SessionState};
use maze_raycaster::settings::Settings;
use maze_raycaster::util::stopwatch::Stopwatch;
use rayon::ThreadPool;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of simulated updates before the final frame is written
const DEMO_FRAMES: usize = 120;
/// Seconds per simulated update
const DEMO_DT: f32 = 1.0 / 60.0;

const ASCII_WIDTH: usize = 80;
const ASCII_HEIGHT: usize = 24;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path))?,
        None => {
            let settings = Settings::default();
            settings.validate()?;
            settings
        }
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    info!(
        "Maze raycaster starting up: {:?} at {}x{}",
        settings.standard_grid, settings.width, settings.height
    );

    let mut session = Session::new(
        settings.standard_grid.get_grid(),
        settings.standard_grid.spawn_camera(),
        settings.session.clone(),
    )?;
    let texture = GridTexture::from(session.grid());
    let raycaster = Raycaster::new(settings.width, settings.height, settings.render.clone());
    let renderer = FrameRenderer::new(settings.width, settings.height, settings.render.clone());

    let pool = match rayon::ThreadPoolBuilder::new().build() {
        Ok(pool) => {
            info!("Rendering pixels on {} threads", pool.current_num_threads());
            Some(pool)
        }
        Err(e) => {
            warn!("Thread pool unavailable, rendering frames from columns instead: {e}");
            None
        }
    };

    let mut stopwatch = Stopwatch::new("frame", DEMO_FRAMES);
    let mut last = None;
    for i in 0..DEMO_FRAMES {
        stopwatch.start();
        let state = session.update(demo_intent(i), DEMO_DT);
        stopwatch.mark_segment("update");

        let camera = session.camera();
        let columns = raycaster.cast_rays(session.grid(), &camera, session.has_key());
        stopwatch.mark_segment("cast");

        let frame = draw(
            pool.as_ref(),
            &raycaster,
            &renderer,
            &texture,
            &columns,
            &camera,
            session.has_key(),
        );
        stopwatch.mark_segment("render");
        stopwatch.finish();
        last = Some((columns, frame));

        if state != SessionState::Playing {
            info!("Session ended after {} updates: {:?}", i + 1, state);
            break;
        }
    }

    info!(
        "Average frame over {} updates: {:.2}ms",
        stopwatch.frames(),
        stopwatch.average_frame_millis()
    );
    for (segment, millis) in stopwatch.average_segment_millis() {
        info!("  {segment}: {millis:.2}ms");
    }

    // the camera has not moved since the last update, so its frame is the one written out
    let (columns, frame) = last.context("No frames were rendered")?;
    let camera = session.camera();
    let has_key = session.has_key();

    if let Some(pool) = &pool {
        let hits = pool.install(|| renderer.column_hits(&texture, &camera, has_key));
        let agreeing = columns
            .iter()
            .zip(&hits)
            .filter(|(column, hit)| column.classification == hit.classification)
            .count();
        info!(
            "Sequential and per-pixel marches agree on {agreeing} of {} columns",
            columns.len()
        );
    }

    let ascii = Raycaster::new(ASCII_WIDTH, ASCII_HEIGHT, settings.render.clone());
    println!(
        "{}",
        ascii_view(&ascii.cast_rays(session.grid(), &camera, has_key), ASCII_HEIGHT)
    );
    print_status(&session, &camera);

    let frame_path = out_dir.join("frame.png");
    frame.write_png(&frame_path)?;
    info!("Wrote {}", frame_path.display());

    let minimap_path = out_dir.join("minimap.png");
    render_minimap(session.grid(), &camera, has_key, settings.minimap_cell_size)
        .write_png(&minimap_path)?;
    info!("Wrote {}", minimap_path.display());

    Ok(())
}

/// Paint one frame per pixel on `pool`, or from the already cast `columns` without a pool
fn draw(
    pool: Option<&ThreadPool>,
    raycaster: &Raycaster,
    renderer: &FrameRenderer,
    texture: &GridTexture,
    columns: &[Column],
    camera: &Camera,
    has_key: bool,
) -> Frame {
    match pool {
        Some(pool) => pool.install(|| renderer.render(texture, camera, has_key)),
        None => raycaster.render_columns(columns, has_key),
    }
}

/// Turn for a moment, then walk, repeatedly
fn demo_intent(i: usize) -> Intent {
    Intent {
        forward: i % 40 >= 10,
        turn_right: i % 40 < 10,
        ..Default::default()
    }
}

/// Draw the columns as text, one character per cell of the view
fn ascii_view(columns: &[Column], height: usize) -> String {
    let mut rows = vec![String::with_capacity(columns.len()); height];
    for (y, row) in rows.iter_mut().enumerate() {
        for column in columns {
            let c = match column.slice(height) {
                Some((y_start, y_end)) if (y_start..y_end).contains(&y) => {
                    match column.classification {
                        Classification::Door => 'D',
                        Classification::Key => 'K',
                        Classification::Exit => 'E',
                        _ if column.distance < 3.0 => '#',
                        _ if column.distance < 6.0 => '%',
                        _ if column.distance < 10.0 => '+',
                        _ => '-',
                    }
                }
                _ if y >= height / 2 => '.',
                _ => ' ',
            };
            row.push(c);
        }
    }
    rows.join("\n")
}

fn print_status(session: &Session, camera: &Camera) {
    println!(
        "pos ({:.2}, {:.2}) angle {:.2} | key: {} | time left: {:.1}s | {:?}",
        camera.position.x,
        camera.position.y,
        camera.angle,
        if session.has_key() { "yes" } else { "no" },
        session.time_remaining(),
        session.state()
    );
}
