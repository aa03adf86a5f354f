use std::sync::Arc;

use bevy::prelude::*;
use bevy_infinite_grid::{InfiniteGridBundle, InfiniteGridPlugin, InfiniteGridSettings};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use bevy_quiver::{QuiverPlugin, field::VectorField, grid::SampleGrid, region::FieldRegion};
use noiz::prelude::*;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            QuiverPlugin::default(),
            PanOrbitCameraPlugin,
            InfiniteGridPlugin,
        ))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(InfiniteGridBundle {
        settings: InfiniteGridSettings {
            fadeout_distance: 1000.0,
            ..Default::default()
        },
        ..Default::default()
    });

    commands.spawn((
        Camera3d::default(),
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            ..default()
        },
        Transform::from_xyz(35., 45., 35.).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let mut noise = Noise::<
        LayeredNoise<
            Normed<f32>,
            Persistence,
            Octave<MixCellGradients<OrthoGrid, Smoothstep, QuickGradients>>,
        >,
    >::default();
    noise.set_frequency(0.06);
    let noise = Arc::new(noise);

    // One noise stack, three decorrelated component samples at fixed offsets.
    let (nx, ny, nz) = (Arc::clone(&noise), Arc::clone(&noise), noise);
    let field = VectorField::new(
        move |pos| nx.sample_for(Vec3::new(pos.x, pos.y, pos.z)),
        move |pos| ny.sample_for(Vec3::new(pos.x + 31.7, pos.y, pos.z)),
        move |pos| nz.sample_for(Vec3::new(pos.x, pos.y + 47.3, pos.z)),
    );

    let grid = SampleGrid::cube(-20.0, 20.0, 14).unwrap();

    commands.spawn(
        FieldRegion::new(field, grid)
            .with_arrow_length(3.0)
            .with_normalize(false),
    );
}
