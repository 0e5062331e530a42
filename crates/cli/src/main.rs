use anyhow::{anyhow, Context};
use calm::{
    timed, RenderConfig, Seed, Terrain, TerrainConfig, TerrainRenderer,
    TileCategory, TileLens,
};
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
    process,
};
use structopt::{clap::ArgGroup, StructOpt};
use strum::{
    Display, EnumString, EnumVariantNames, IntoEnumIterator, VariantNames,
};

/// Generate a Calm terrain from a config file, or load a saved one, and
/// export it.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "calm",
    group = ArgGroup::with_name("source").required(true)
)]
struct Opt {
    /// Config file describing the terrain to generate (JSON or TOML)
    #[structopt(short, long, group = "source")]
    config: Option<PathBuf>,

    /// Terrain saved earlier with `--format bin`, to load instead of
    /// generating
    #[structopt(short, long, group = "source")]
    bin: Option<PathBuf>,

    /// Replace the seed from the config file
    #[structopt(long, parse(from_str), conflicts_with = "bin")]
    seed: Option<Seed>,

    /// Replace the grid size from the config file
    #[structopt(long, conflicts_with = "bin")]
    size: Option<u16>,

    /// Directory to export into. Each format becomes `terrain.<ext>`
    #[structopt(short, long, requires = "formats")]
    output: Option<PathBuf>,

    /// Export formats, comma-separated:
    ///
    /// bin - CBOR, reloadable with `--bin`
    ///
    /// cfg - the generation config as TOML
    ///
    /// json - the whole terrain as JSON
    ///
    /// svg - top-down map, one square per tile
    ///
    /// stl - the tile mesh
    #[structopt(
        short = "f",
        long = "format",
        use_delimiter = true,
        possible_values = OutputFormat::VARIANTS,
        requires = "output"
    )]
    formats: Vec<OutputFormat>,

    /// Tile coloring for svg output: category or elevation
    #[structopt(long, default_value = "category")]
    lens: TileLens,

    /// Rendered units per meter of elevation, for stl output
    #[structopt(long, default_value = "0.5")]
    vertical_scale: f64,

    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Copy, Clone, Debug, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    Bin,
    Cfg,
    Json,
    Svg,
    Stl,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Bin => "bin",
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Stl => "stl",
        }
    }
}

/// Read a [TerrainConfig] from JSON or TOML, picked by file extension.
/// Missing fields take their defaults.
fn load_config(path: &Path) -> anyhow::Result<TerrainConfig> {
    let mut settings = config::Config::new();
    settings
        .merge(config::File::from(path))
        .with_context(|| format!("error reading config file {:?}", path))?;
    settings.try_into().context("error parsing terrain config")
}

/// Generate from `--config` plus overrides, or load from `--bin`
fn load_terrain(opt: &Opt) -> anyhow::Result<Terrain> {
    if let Some(path) = &opt.bin {
        let file = File::open(path).with_context(|| {
            format!("error opening terrain file {:?}", path)
        })?;
        let terrain = Terrain::from_bin(BufReader::new(file)).with_context(
            || format!("error loading terrain from {:?}", path),
        )?;
        let size = terrain.config().size;
        info!("Loaded {}x{} terrain from {:?}", size, size, path);
        return Ok(terrain);
    }

    let path = opt
        .config
        .as_ref()
        .ok_or_else(|| anyhow!("no terrain source given"))?;
    let mut config = load_config(path)?;
    if let Some(seed) = &opt.seed {
        config.seed = seed.clone();
    }
    if let Some(size) = opt.size {
        config.size = size;
    }
    Terrain::generate(config)
}

fn log_summary(terrain: &Terrain) {
    let total = terrain.tiles().len() as f64;
    for category in TileCategory::iter() {
        let count = terrain.count(category);
        info!(
            "{}: {} tiles ({:.1}%)",
            category,
            count,
            100.0 * count as f64 / total
        );
    }
    let heights = terrain.heights();
    info!(
        "Elevations span {} (variance {:.3}), sea level at {}",
        heights.range(),
        heights.variance(),
        terrain.sea_level()
    );
}

/// Encode the terrain in one format
fn render(
    format: OutputFormat,
    terrain: &Terrain,
    renderer: &TerrainRenderer,
) -> anyhow::Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Bin => terrain.to_bin()?,
        OutputFormat::Cfg => toml::to_string_pretty(terrain.config())
            .context("error serializing config")?
            .into_bytes(),
        OutputFormat::Json => terrain.to_json()?.into_bytes(),
        OutputFormat::Svg => renderer.render_as_svg(terrain).into_bytes(),
        OutputFormat::Stl => {
            let mesh = renderer.build_mesh(terrain);
            debug!(
                "Mesh has {} triangles, bounds {:?}",
                mesh.triangle_count(),
                mesh.bounding_box()
            );
            mesh.to_stl()?
        }
    })
}

fn export(
    dir: &Path,
    formats: &[OutputFormat],
    terrain: &Terrain,
    renderer: &TerrainRenderer,
) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("error creating output dir {:?}", dir))?;
    for &format in formats {
        let path = dir.join("terrain").with_extension(format.file_ext());
        let bytes = timed!(
            format!("Rendering {}", format),
            render(format, terrain, renderer)
        )?;
        fs::write(&path, &bytes)
            .with_context(|| format!("error writing {:?}", path))?;
        info!("Wrote {} bytes to {:?}", bytes.len(), path);
    }
    Ok(())
}

fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let terrain = load_terrain(&opt)?;
    log_summary(&terrain);

    if let Some(dir) = &opt.output {
        let renderer = TerrainRenderer::new(RenderConfig {
            tile_lens: opt.lens,
            vertical_scale: opt.vertical_scale,
            ..Default::default()
        })
        .context("invalid render options")?;
        export(dir, &opt.formats, &terrain, &renderer)?;
    }
    Ok(())
}

fn main() {
    if let Err(err) = run(Opt::from_args()) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
