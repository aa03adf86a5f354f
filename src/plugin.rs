use std::sync::Arc;

use bevy::{
    prelude::*,
    tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future},
};

use crate::{
    field::VectorField, quiver::QuiverGeometry, region::FieldRegion, sample::SampledField,
};

/// System sets for the quiver pipeline.
///
/// Use these to order your own systems relative to sampling:
///
/// ```rust,ignore
/// // Run after arrow geometry is ready but before it's drawn — ideal for
/// // post-processing the arrows:
/// app.add_systems(Update, recolor_arrows.after(QuiverSet::Sample)
///                                        .before(QuiverSet::Draw));
/// ```
///
/// ```text
/// QuiverSet::Spawn  →  [async compute]  →  QuiverSet::Sample  →  [your systems]  →  QuiverSet::Draw
/// ```
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuiverSet {
    /// Spawns an async sampling task for each queued region.
    Spawn,
    /// Polls sampling tasks and inserts [`QuiverGeometry`] on completion.
    Sample,
    /// Draws arrow gizmos for every region with geometry.
    Draw,
}

/// Marker component added to [`FieldRegion`] entities that are waiting to be
/// sampled.
///
/// Removed automatically once the region's arrow geometry is ready.
#[derive(Component)]
pub struct QueuedRegion;

/// Holds the in-flight async sampling task for a [`FieldRegion`].
///
/// Inserted by [`QuiverSet::Spawn`], removed once the task completes and
/// [`QuiverGeometry`] has been inserted by [`QuiverSet::Sample`].
#[derive(Component)]
pub struct SampleTask(Task<QuiverGeometry>);

/// Runtime configuration for the quiver pipeline.
///
/// Inserted as a resource by [`QuiverPlugin`]. Modify it at any time to change
/// behaviour:
///
/// ```rust,ignore
/// app.add_plugins(QuiverPlugin { max_tasks_per_frame: 8 });
///
/// // Or change it at runtime:
/// fn my_system(mut config: ResMut<QuiverConfig>) {
///     config.max_tasks_per_frame = 1;
/// }
/// ```
#[derive(Resource)]
pub struct QuiverConfig {
    /// Maximum number of async sampling tasks spawned per frame.
    ///
    /// Higher values bring many freshly spawned regions on screen faster but
    /// may cause frame hitches. Default: `4`.
    pub max_tasks_per_frame: usize,
}

impl Default for QuiverConfig {
    fn default() -> Self {
        Self {
            max_tasks_per_frame: 4,
        }
    }
}

/// Bevy plugin that samples vector fields and draws them as arrow plots.
///
/// When the `auto_queue` feature is enabled, any [`FieldRegion`] added to the
/// world is automatically processed. Sampling runs on Bevy's
/// `AsyncComputeTaskPool` so the main thread is never blocked:
///
/// ```text
/// FieldRegion added
///   → QueuedRegion inserted          (on_region_add)
///   → SampleTask spawned             (QuiverSet::Spawn)
///   → [async sampling runs]
///   → QuiverGeometry inserted        (QuiverSet::Sample, once task completes)
///   → [your systems here]
///   → arrows drawn with gizmos       (QuiverSet::Draw, every frame)
/// ```
pub struct QuiverPlugin {
    /// Initial value for [`QuiverConfig::max_tasks_per_frame`].
    pub max_tasks_per_frame: usize,
}

impl Default for QuiverPlugin {
    fn default() -> Self {
        Self {
            max_tasks_per_frame: QuiverConfig::default().max_tasks_per_frame,
        }
    }
}

impl Plugin for QuiverPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(QuiverConfig {
            max_tasks_per_frame: self.max_tasks_per_frame,
        });

        #[cfg(feature = "auto_queue")]
        app.configure_sets(
            Update,
            (QuiverSet::Spawn, QuiverSet::Sample, QuiverSet::Draw).chain(),
        )
        .add_systems(
            Update,
            (
                on_region_add,
                spawn_sample_tasks.in_set(QuiverSet::Spawn),
                poll_sample_tasks.in_set(QuiverSet::Sample),
                draw_arrows.in_set(QuiverSet::Draw),
            ),
        );
    }
}

/// Inserts [`QueuedRegion`] on every newly added [`FieldRegion`] that doesn't
/// already have it.
fn on_region_add(
    mut commands: Commands,
    query: Query<Entity, (Added<FieldRegion>, Without<QueuedRegion>)>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert(QueuedRegion);
    }
}

/// Spawns async sampling tasks for [`QueuedRegion`]s, up to
/// [`QuiverConfig::max_tasks_per_frame`] per frame.
fn spawn_sample_tasks(
    mut commands: Commands,
    config: Res<QuiverConfig>,
    query: Query<
        (Entity, &FieldRegion),
        (With<QueuedRegion>, Without<SampleTask>, Without<QuiverGeometry>),
    >,
) {
    let task_pool = AsyncComputeTaskPool::get();

    for (entity, region) in query.iter().take(config.max_tasks_per_frame) {
        // Arc::clone is a single pointer bump — the field itself stays put.
        let field: Arc<VectorField> = Arc::clone(&region.field);
        let grid = region.grid;
        let options = region.options;

        let task = task_pool.spawn(async move {
            let samples = SampledField::sample(grid, &field);
            QuiverGeometry::from_samples(&samples, &options)
        });

        bevy::log::debug!("queued sampling task over {} grid positions", grid.len());
        commands.entity(entity).insert(SampleTask(task));
    }
}

/// Polls in-flight [`SampleTask`]s each frame and inserts [`QuiverGeometry`]
/// on completion.
///
/// Non-blocking: tasks that haven't finished are skipped and retried next
/// frame.
fn poll_sample_tasks(mut commands: Commands, mut query: Query<(Entity, &mut SampleTask)>) {
    for (entity, mut sample_task) in query.iter_mut() {
        if let Some(geometry) = block_on(future::poll_once(&mut sample_task.0)) {
            bevy::log::debug!("sampling complete: {} arrows", geometry.arrows.len());
            commands
                .entity(entity)
                .insert(geometry)
                .remove::<SampleTask>()
                .remove::<QueuedRegion>();
        }
    }
}

/// Draws one gizmo arrow per sampled vector, offset by the region's
/// transform.
fn draw_arrows(mut gizmos: Gizmos, query: Query<(&QuiverGeometry, &GlobalTransform)>) {
    for (geometry, transform) in query.iter() {
        let offset = transform.translation();
        for arrow in &geometry.arrows {
            gizmos.arrow(offset + arrow.start, offset + arrow.end, arrow.color);
        }
    }
}
