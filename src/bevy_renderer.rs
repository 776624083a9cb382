// --- Bevy Renderer ---
use crate::WindowArgs;
use bevy::prelude::*;
use lifestep::grid;
use lifestep::GameStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Component)]
struct CellSprite(usize); // Holds the index of the cell in the displayed board

#[derive(Resource)]
struct Store(GameStore);

/// Set by the store's listener, cleared once the sprites are recolored.
#[derive(Resource)]
struct Dirty(Arc<AtomicBool>);

#[derive(Resource)]
struct GameColors {
    alive: Color,
    dead: Color,
}

/// Board size the current sprites were spawned for.
#[derive(Resource)]
struct BoardLayout {
    size: usize,
    window_size: f32,
}

#[derive(Resource)]
struct Autoplay {
    playing: bool,
    timer: Timer,
}

pub fn run(args: WindowArgs) {
    let mut store = args.viewer.store();
    let dirty = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&dirty);
    store.subscribe(move |_| flag.store(true, Ordering::Relaxed));

    let alive = parse_color(&args.alive_color).unwrap_or(Color::srgb_u8(34, 197, 94));
    let dead = parse_color(&args.dead_color).unwrap_or(Color::WHITE);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Game of Life".into(),
                resolution: (args.window_size, args.window_size).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(128, 128, 128)))
        .insert_resource(GameColors { alive, dead })
        .insert_resource(Store(store))
        .insert_resource(Dirty(dirty))
        .insert_resource(BoardLayout {
            size: 0,
            window_size: args.window_size,
        })
        .insert_resource(Autoplay {
            playing: false,
            timer: Timer::from_seconds(1.0 / args.viewer.fps.max(0.1), TimerMode::Repeating),
        })
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (handle_input, autoplay, rebuild_sprites, update_visuals).chain(),
        )
        .run();
}

/// Accepts a color name or an `r,g,b` triple.
fn parse_color(s: &str) -> Option<Color> {
    let named_color = match s.to_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "gray" | "grey" => Some(Color::srgb_u8(128, 128, 128)),
        "red" => Some(Color::srgb_u8(255, 0, 0)),
        "green" => Some(Color::srgb_u8(34, 197, 94)),
        "blue" => Some(Color::srgb_u8(0, 0, 255)),
        "yellow" => Some(Color::srgb_u8(255, 255, 0)),
        "cyan" => Some(Color::srgb_u8(0, 255, 255)),
        "magenta" => Some(Color::srgb_u8(255, 0, 255)),
        "orange" => Some(Color::srgb_u8(255, 165, 0)),
        _ => None,
    };
    if named_color.is_some() {
        return named_color;
    }

    let parts: Vec<&str> = s.split(',').collect();
    if let [r, g, b] = parts.as_slice()
        && let (Ok(r), Ok(g), Ok(b)) = (
            r.trim().parse::<u8>(),
            g.trim().parse::<u8>(),
            b.trim().parse::<u8>(),
        )
    {
        return Some(Color::srgb_u8(r, g, b));
    }
    None
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn handle_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut store: ResMut<Store>,
    mut autoplay: ResMut<Autoplay>,
    mut exit: EventWriter<AppExit>,
) {
    let store = &mut store.0;
    if keys.just_pressed(KeyCode::Space) {
        store.evolve_board();
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        store.go_to_prev_board();
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        store.go_to_next_board();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        store.initialize_board();
    }
    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        store.set_size(store.size() + 1);
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        store.set_size(store.size().saturating_sub(1).max(1));
    }
    if keys.just_pressed(KeyCode::KeyP) {
        autoplay.playing = !autoplay.playing;
        autoplay.timer.reset();
    }
    if keys.any_just_pressed([KeyCode::KeyQ, KeyCode::Escape]) {
        exit.write(AppExit::Success);
    }
}

fn autoplay(time: Res<Time>, mut autoplay: ResMut<Autoplay>, mut store: ResMut<Store>) {
    if !autoplay.playing {
        return;
    }
    if autoplay.timer.tick(time.delta()).just_finished() {
        store.0.evolve_board();
    }
}

/// Respawns one sprite per cell whenever the board size changes.
fn rebuild_sprites(
    mut commands: Commands,
    store: Res<Store>,
    dirty: Res<Dirty>,
    mut layout: ResMut<BoardLayout>,
    sprites: Query<Entity, With<CellSprite>>,
) {
    let size = store.0.size();
    if layout.size == size {
        return;
    }
    for entity in &sprites {
        commands.entity(entity).despawn();
    }
    layout.size = size;
    dirty.0.store(true, Ordering::Relaxed);

    let cell_size = layout.window_size / size as f32;
    let half = size as f32 / 2.0;
    let cell_sprite = Sprite {
        color: Color::BLACK, // Will be updated in update_visuals
        custom_size: Some(Vec2::splat(cell_size * 0.92)),
        ..default()
    };

    for y in 0..size {
        for x in 0..size {
            let index = grid::get_index(size, y, x);
            commands.spawn((
                cell_sprite.clone(),
                // Row 0 at the top of the window
                Transform::from_xyz(
                    (x as f32 - half + 0.5) * cell_size,
                    (half - y as f32 - 0.5) * cell_size,
                    0.0,
                ),
                CellSprite(index),
            ));
        }
    }
}

fn update_visuals(
    store: Res<Store>,
    dirty: Res<Dirty>,
    colors: Res<GameColors>,
    mut query: Query<(&mut Sprite, &CellSprite)>,
    mut windows: Query<&mut Window>,
) {
    if !dirty.0.swap(false, Ordering::Relaxed) {
        return;
    }

    let view = store.0.view();
    let cells = view.board.cells();
    for (mut sprite, cell) in query.iter_mut() {
        sprite.color = match cells.get(cell.0) {
            Some(cell) if cell.is_alive => colors.alive,
            _ => colors.dead,
        };
    }

    for mut window in windows.iter_mut() {
        window.title = format!(
            "Game of Life | step {} of {} | {}x{}",
            view.current_step,
            view.history_len - 1,
            view.size,
            view.size
        );
    }
}
