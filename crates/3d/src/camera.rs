use crate::terrain::{spawn_terrain, TerrainBounds};
use bevy::prelude::{
    App, Camera3d, Commands, IntoScheduleConfigs, Plugin, Res, Startup,
    Transform, Vec3,
};

/// A single static camera. Controls are left to the engine (there are none).
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera.after(spawn_terrain));
    }
}

/// Put the camera off one corner of the terrain, high enough that the whole
/// grid fits in view, looking at the middle.
fn spawn_camera(mut commands: Commands, bounds: Res<TerrainBounds>) {
    let [x, y, z] = bounds.0.center();
    let [width, _, depth] = bounds.0.extents();
    let target = Vec3::new(x, y, z);
    let distance = width.max(depth);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(
            target + Vec3::new(-0.3, 0.8, 0.9) * distance,
        )
        .looking_at(target, Vec3::Y),
    ));
}
