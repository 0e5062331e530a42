mod camera;
mod demo;
mod terrain;

use crate::{camera::CameraPlugin, demo::Preset, terrain::TerrainPlugin};
use bevy::{
    log::LogPlugin,
    prelude::{default, App, PluginGroup},
    DefaultPlugins,
};
use structopt::StructOpt;
use strum::VariantNames;

/// 3D viewer for Calm terrains. Generates one of the canned demo terrains and
/// shows it from a fixed camera.
#[derive(Debug, StructOpt)]
#[structopt(name = "calm-3d")]
struct Opt {
    /// The demo terrain to show
    #[structopt(
        default_value = "islands",
        possible_values = Preset::VARIANTS
    )]
    preset: Preset,
}

fn main() {
    let opt = Opt::from_args();

    App::new()
        .add_plugins(DefaultPlugins.set(LogPlugin {
            filter: "info,wgpu_core=warn,wgpu_hal=warn,calm=debug,calm_3d=debug"
                .into(),
            level: bevy::log::Level::DEBUG,
            ..default()
        }))
        .insert_resource(opt.preset.terrain_config())
        .insert_resource(opt.preset.render_config())
        .add_plugins((TerrainPlugin, CameraPlugin))
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;
    use structopt::clap::ErrorKind;

    fn parse(args: &[&str]) -> Result<Preset, structopt::clap::Error> {
        let argv = std::iter::once("calm-3d").chain(args.iter().copied());
        Opt::from_iter_safe(argv).map(|opt| opt.preset)
    }

    #[test]
    fn test_preset_arg() {
        assert!(matches!(parse(&[]), Ok(Preset::Islands)));
        assert!(matches!(parse(&["stitched"]), Ok(Preset::Stitched)));
        assert!(matches!(parse(&["noise"]), Ok(Preset::Noise)));
        assert!(parse(&["mountains"]).is_err());
        assert!(parse(&["noise", "extra"]).is_err());
    }

    #[test]
    fn test_help() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HelpDisplayed);
        assert!(err.message.contains("scatter"));
    }
}
