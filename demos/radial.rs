use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use bevy_quiver::{
    QuiverPlugin,
    field::VectorField,
    grid::SampleGrid,
    region::FieldRegion,
    types::{Point, Value},
};

const STRENGTH: Value = 10.0;
const SOFTENING: Value = 0.5;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PanOrbitCameraPlugin,
            QuiverPlugin::default(),
        ))
        .add_systems(Startup, setup)
        .run();
}

/// Softened inverse-square falloff of a point source at the origin.
fn falloff(pos: Point) -> Value {
    let r2 = pos.coords.norm_squared() + SOFTENING;
    STRENGTH / (r2 * r2.sqrt())
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            ..default()
        },
        Transform::from_xyz(10., 8., 10.).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let field = VectorField::new(
        |pos| falloff(pos) * pos.x,
        |pos| falloff(pos) * pos.y,
        |pos| falloff(pos) * pos.z,
    );
    let grid = SampleGrid::cube(-4.0, 4.0, 7).unwrap();

    // Unnormalized: arrow length falls off with distance from the source.
    commands.spawn(
        FieldRegion::new(field, grid)
            .with_arrow_length(1.0)
            .with_normalize(false),
    );
}
