use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use bevy_quiver::{QuiverPlugin, field::VectorField, grid::SampleGrid, region::FieldRegion};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Helix Vector Field".into(),
                    resolution: (1000, 800).into(),
                    ..default()
                }),
                ..default()
            }),
            PanOrbitCameraPlugin,
            QuiverPlugin::default(),
        ))
        .add_systems(Startup, setup)
        .add_systems(Update, draw_axes)
        .run();
}

fn setup(mut commands: Commands) {
    const RANGE: f32 = 5.0;
    const RESOLUTION: usize = 6;

    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            ..default()
        },
        Transform::from_xyz(RANGE * 2.4, RANGE * 2.0, RANGE * 2.4).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let grid = SampleGrid::cube(-RANGE, RANGE, RESOLUTION).unwrap();

    commands.spawn(
        FieldRegion::new(VectorField::helix(), grid)
            .with_arrow_length(2.0)
            .with_normalize(true),
    );
}

fn draw_axes(mut gizmos: Gizmos) {
    gizmos.line(
        Vec3::ZERO,
        Vec3::X * 7.0,
        Color::Srgba(Srgba::new(1., 0., 0., 1.)),
    );
    gizmos.line(
        Vec3::ZERO,
        Vec3::Y * 7.0,
        Color::Srgba(Srgba::new(0., 1., 0., 1.)),
    );
    gizmos.line(
        Vec3::ZERO,
        Vec3::Z * 7.0,
        Color::Srgba(Srgba::new(0., 0., 1., 1.)),
    );
}
