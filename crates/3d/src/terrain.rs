use anyhow::Context;
use bevy::{
    asset::RenderAssetUsages,
    ecs::error::Result,
    mesh::{Indices, PrimitiveTopology},
    prelude::{
        debug, default, info, App, Assets, Commands, DirectionalLight,
        IntoScheduleConfigs, Mesh, Mesh3d, MeshMaterial3d, Plugin, Res,
        ResMut, Resource, StandardMaterial, Startup, Transform, Vec3,
    },
};
use calm::{
    Aabb, MeshBuffer, RenderConfig, Terrain, TerrainConfig, TerrainRenderer,
    TileCategory,
};

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (spawn_terrain, spawn_light.after(spawn_terrain)),
        );
    }
}

/// Bounds of the rendered terrain mesh, so other systems can frame the scene
#[derive(Copy, Clone, Debug, Resource)]
pub struct TerrainBounds(pub Aabb);

/// Generate the terrain, emit its mesh and hand it to the engine. This runs
/// once; the mesh never changes afterwards.
pub fn spawn_terrain(
    mut commands: Commands,
    terrain_config: Res<TerrainConfig>,
    render_config: Res<RenderConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    let terrain = Terrain::generate(terrain_config.clone())?;
    info!(
        "Generated {} tiles ({} land, {} water, sea level {})",
        terrain.tiles().len(),
        terrain.count(TileCategory::Land),
        terrain.count(TileCategory::Water),
        terrain.sea_level()
    );

    let renderer = TerrainRenderer::new(*render_config)?;
    let buffer = renderer.build_mesh(&terrain);
    let bounds = buffer
        .bounding_box()
        .context("terrain mesh has no vertices")?;
    debug!(
        "Built mesh with {} vertices, bounds {:?}",
        buffer.vertices().len(),
        bounds
    );

    commands.spawn((
        Mesh3d(meshes.add(to_bevy_mesh(&buffer))),
        MeshMaterial3d(materials.add(StandardMaterial {
            perceptual_roughness: 1.0,
            reflectance: 0.1,
            ..default()
        })),
    ));
    commands.insert_resource(TerrainBounds(bounds));
    Ok(())
}

/// Directional light emulates the sun
fn spawn_light(mut commands: Commands, bounds: Res<TerrainBounds>) {
    let [x, _, z] = bounds.0.center();
    let target = Vec3::new(x, 0.0, z);
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        // Only the direction matters, position is just used for .looking_at
        Transform::from_translation(target + Vec3::new(-1.0, 2.0, -0.5))
            .looking_at(target, Vec3::Y),
    ));
}

/// Copy an emitted buffer into an engine mesh. Every attribute is uploaded
/// as-is, including the identity index buffer.
fn to_bevy_mesh(buffer: &MeshBuffer) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, buffer.positions())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, buffer.normals())
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, buffer.colors())
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, buffer.uvs())
        .with_inserted_indices(Indices::U32(buffer.indices().to_vec()))
}
