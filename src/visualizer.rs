//! 2D visualization of the arena, the robot and its trail.

use bevy::{prelude::*, render::camera::ScalingMode, sprite::MaterialMesh2dBundle};

use crate::{
    domain::{Position, Simulation},
    resource::{SimulationRes, TrailRes},
};

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(
                Update,
                (handle_keyboard_input, update_robot, draw_arena, update_text),
            )
            .insert_resource(ClearColor(Color::WHITE))
            .init_resource::<Scene>();
    }
}

#[derive(Resource)]
struct Scene {
    show_text: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self { show_text: true }
    }
}

#[derive(Component)]
struct Robot;

/// Fraction of the arena size left free around the walls.
const MARGIN: f32 = 0.05;
const WALL_COLOR: Color = Color::BLACK;

fn set_up(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<SimulationRes>,
) {
    create_camera(&mut commands, &simulation);
    create_robot(&mut commands, &mut meshes, &mut materials, &simulation);
    create_text(&mut commands);
}

fn create_camera(commands: &mut Commands, simulation: &Simulation) {
    let width = simulation.arena().width() as f32;
    let height = simulation.arena().height() as f32;

    let mut camera = Camera2dBundle::default();
    camera.transform.translation.x = width / 2.0;
    camera.transform.translation.y = height / 2.0;
    camera.projection.scaling_mode = ScalingMode::AutoMin {
        min_width: width * (1.0 + 2.0 * MARGIN),
        min_height: height * (1.0 + 2.0 * MARGIN),
    };
    commands.spawn(camera);
}

fn create_robot(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    simulation: &Simulation,
) {
    let Some(agent) = simulation.agent() else {
        warn!("no robot to visualize");
        return;
    };

    commands.spawn((
        MaterialMesh2dBundle {
            mesh: meshes.add(Circle::new(agent.radius() as f32)).into(),
            material: materials.add(Color::rgba(0.0, 0.0, 1.0, 0.7)),
            transform: Transform::from_translation(
                to_bevy_position(agent.position()).extend(1.0),
            ),
            ..default()
        },
        Robot,
    ));
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 20.0,
        color: Color::BLACK,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );
}

fn update_robot(mut robots: Query<&mut Transform, With<Robot>>, simulation: Res<SimulationRes>) {
    let Some(agent) = simulation.agent() else {
        return;
    };
    for mut transform in robots.iter_mut() {
        transform.translation = to_bevy_position(agent.position()).extend(1.0);
    }
}

fn draw_arena(mut gizmos: Gizmos, simulation: Res<SimulationRes>, trail: Res<TrailRes>) {
    let arena = simulation.arena();
    let size = Vec2::new(arena.width() as f32, arena.height() as f32);
    gizmos.rect_2d(size / 2.0, 0.0, size, WALL_COLOR);

    if trail.len() > 1 {
        gizmos.linestrip_2d(
            trail.positions().map(to_bevy_position),
            Color::rgba(1.0, 0.0, 0.0, 0.5),
        );
    }
}

fn update_text(mut text: Query<&mut Text>, scene: Res<Scene>, simulation: Res<SimulationRes>) {
    let mut text = text.single_mut();
    text.sections[0].value = if scene.show_text {
        overlay_text(&simulation)
    } else {
        String::new()
    };
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<Scene>,
    mut simulation: ResMut<SimulationRes>,
    mut trail: ResMut<TrailRes>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        simulation.reset();
        trail.clear();
    }

    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }
}

fn overlay_text(simulation: &Simulation) -> String {
    format!(
        "Time: {:.1}s\nCollisions: {}",
        simulation.time(),
        simulation.collision_count()
    )
}

fn to_bevy_position(position: Position) -> Vec2 {
    let (x, y): (f32, f32) = position.into();
    Vec2::new(x, y)
}
