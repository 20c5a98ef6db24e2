//! Subcommand implementations.
//!
//! Each command returns the text to print so the binary stays a thin shell
//! around these functions.

use std::path::{Path, PathBuf};

use biomer_config::Config;
use biomer_format::{BiomFile, Hemisphere, Side};
use biomer_gamedata::{BiomeCatalog, BiomeList, RonCatalog, ensure_editable};
use biomer_palette::{GridImage, Rgba, biome_palette, import_layer, render_layer, resource_palette};
use clap::ValueEnum;

use crate::error::CliError;

/// Color painted for values without a palette entry.
const UNMAPPED_COLOR: Rgba = Rgba::rgb(255, 0, 255);

/// Number of most-used biome values listed per hemisphere by `info`.
const HISTOGRAM_ROWS: usize = 8;

/// Hemisphere argument on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HemisphereArg {
    North,
    South,
}

impl From<HemisphereArg> for Hemisphere {
    fn from(arg: HemisphereArg) -> Self {
        match arg {
            HemisphereArg::North => Hemisphere::North,
            HemisphereArg::South => Hemisphere::South,
        }
    }
}

/// Grid layer selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Layer {
    /// Biome table indices.
    Biome,
    /// Resource bytes.
    Resource,
}

impl Layer {
    fn name(self) -> &'static str {
        match self {
            Layer::Biome => "biome",
            Layer::Resource => "resource",
        }
    }
}

/// Loads the configured catalog, if any.
pub fn load_catalog(config: &Config) -> Result<Option<RonCatalog>, CliError> {
    match &config.paths.catalog {
        Some(path) => Ok(Some(RonCatalog::load(path)?)),
        None => Ok(None),
    }
}

/// Summarizes a file: biome table, per-hemisphere usage and resource health.
pub fn info(path: &Path, config: &Config) -> Result<String, CliError> {
    let file = BiomFile::load(path)?;
    let catalog = load_catalog(config)?;
    let list = BiomeList::from_ids(
        file.biome_ids(),
        catalog.as_ref().map(|c| c as &dyn BiomeCatalog),
    );

    let mut lines = vec![
        path.display().to_string(),
        format!("biomes: {}", list.len()),
    ];
    lines.extend(list.items().iter().map(|item| format!("  {item}")));
    if catalog.is_some() {
        lines.push(format!("not in catalog: {}", list.unknown().count()));
    }

    for hemisphere in Hemisphere::ALL {
        let grid = file.grid(hemisphere);
        let mut histogram = grid.biome_histogram();
        histogram.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        lines.push(format!("{}:", hemisphere.name()));
        for &(value, cells) in histogram.iter().take(HISTOGRAM_ROWS) {
            let name = list.name_of(value as usize).unwrap_or("<no biome>");
            lines.push(format!("  {value:>5}  {cells:>6} cells  {name}"));
        }
        if histogram.len() > HISTOGRAM_ROWS {
            lines.push(format!(
                "  ... {} more values",
                histogram.len() - HISTOGRAM_ROWS
            ));
        }
        lines.push(format!(
            "  unknown resource cells: {}",
            grid.unknown_resource_count()
        ));
    }
    Ok(join_lines(lines))
}

/// Appends a biome to the table.
///
/// `biome` is a catalog editor id or a numeric form id.
pub fn add_biome(
    path: &Path,
    biome: &str,
    plugin: Option<&str>,
    output: Option<&Path>,
    config: &Config,
) -> Result<String, CliError> {
    check_plugin(plugin, config)?;
    let catalog = load_catalog(config)?.unwrap_or_default();
    let form_id = catalog
        .resolve(biome)
        .ok_or_else(|| CliError::UnknownBiome(biome.to_string()))?;

    let mut file = BiomFile::load(path)?;
    file.add_biome(form_id);
    let index = file.biome_count() - 1;
    let written = save_edited(&file, path, output, config)?;
    Ok(format!(
        "added {form_id:#010x} at index {index}, wrote {}",
        written.display()
    ))
}

/// Removes the biome at `index` from the table.
pub fn remove_biome(
    path: &Path,
    index: usize,
    plugin: Option<&str>,
    output: Option<&Path>,
    config: &Config,
) -> Result<String, CliError> {
    check_plugin(plugin, config)?;
    let mut file = BiomFile::load(path)?;
    let form_id = file.remove_biome(index)?;
    let written = save_edited(&file, path, output, config)?;
    Ok(format!(
        "removed {form_id:#010x} from index {index}, wrote {}",
        written.display()
    ))
}

/// Renders one layer of one hemisphere to a PNG and returns its path.
pub fn export(
    path: &Path,
    hemisphere: Option<HemisphereArg>,
    layer: Layer,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, CliError> {
    let hemisphere = hemisphere.map_or(config.render.default_hemisphere, Hemisphere::from);
    let file = BiomFile::load(path)?;
    let grid = file.grid(hemisphere);

    let image = match layer {
        Layer::Biome => {
            let mut palette = biome_palette(file.biome_count());
            if config.render.highlight_unmapped {
                palette = palette.with_fallback(UNMAPPED_COLOR);
            }
            render_layer(grid.biome_values(), &palette)?
        }
        Layer::Resource => {
            let mut palette = resource_palette();
            if config.render.highlight_unmapped {
                palette = palette.with_fallback(UNMAPPED_COLOR);
            }
            render_layer(grid.resource_values(), &palette)?
        }
    };
    let png = image.upscale(config.render.scale)?.to_png()?;

    let target = match output {
        Some(output) => output.to_path_buf(),
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "planet".to_string());
            config
                .output_dir()
                .join(format!("{stem}_{}_{}.png", hemisphere.name(), layer.name()))
        }
    };
    std::fs::write(&target, png).map_err(CliError::file(&target))?;
    tracing::info!(
        path = %target.display(),
        hemisphere = hemisphere.name(),
        layer = layer.name(),
        "exported layer"
    );
    Ok(target)
}

/// Replaces one layer of one hemisphere with the contents of a PNG.
pub fn import(
    path: &Path,
    image_path: &Path,
    hemisphere: Option<HemisphereArg>,
    layer: Layer,
    plugin: Option<&str>,
    output: Option<&Path>,
    config: &Config,
) -> Result<String, CliError> {
    check_plugin(plugin, config)?;
    let hemisphere = hemisphere.map_or(config.render.default_hemisphere, Hemisphere::from);
    let png = std::fs::read(image_path).map_err(CliError::file(image_path))?;
    let image = GridImage::from_png(&png)?;

    let mut file = BiomFile::load(path)?;
    let side = Side::from(hemisphere);
    match layer {
        Layer::Biome => {
            let values = import_layer(&image, &biome_palette(file.biome_count()))?;
            file.replace_biome_grid(values, side)?;
        }
        Layer::Resource => {
            let values = import_layer(&image, &resource_palette())?;
            file.replace_resource_grid(values, side)?;
        }
    }
    let written = save_edited(&file, path, output, config)?;
    Ok(format!(
        "imported {} {} layer from {}, wrote {}",
        hemisphere.name(),
        layer.name(),
        image_path.display(),
        written.display()
    ))
}

/// Lists the configured catalog.
pub fn catalog(config: &Config) -> Result<String, CliError> {
    let catalog = load_catalog(config)?.ok_or(CliError::NoCatalog)?;
    let lines = catalog
        .entries()
        .iter()
        .map(|entry| format!("{:#010x}  {}", entry.form_id, entry.editor_id))
        .collect();
    Ok(join_lines(lines))
}

/// Joins output lines, ending every line with a newline.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn check_plugin(plugin: Option<&str>, config: &Config) -> Result<(), CliError> {
    if let Some(plugin) = plugin {
        ensure_editable(plugin, &config.edit.extra_protected_plugins)?;
    }
    Ok(())
}

/// Writes an edited file to `output`, or back to `input` after an optional
/// `.bak` copy of the original. Writes to an explicit `output` never back up,
/// even when it names the input file.
fn save_edited(
    file: &BiomFile,
    input: &Path,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, CliError> {
    if output.is_none() && config.edit.backup_on_save {
        let mut backup = input.as_os_str().to_owned();
        backup.push(".bak");
        let backup = PathBuf::from(backup);
        std::fs::copy(input, &backup).map_err(CliError::file(&backup))?;
        tracing::debug!(path = %backup.display(), "wrote backup");
    }
    let target = output.unwrap_or(input);
    file.save(target)?;
    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biomer_format::{EditError, GRID_FLAT_SIZE};
    use biomer_gamedata::GameDataError;

    struct Fixture {
        dir: tempfile::TempDir,
        biom: PathBuf,
        config: Config,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let biom = dir.path().join("planet.biom");
        let mut file = BiomFile::new(vec![8, 88]);
        let mut resources = vec![8u8; GRID_FLAT_SIZE];
        resources[0] = 200;
        file.replace_resource_grid(resources, Side::North).unwrap();
        file.save(&biom).unwrap();

        let catalog = dir.path().join("biomes.ron");
        std::fs::write(
            &catalog,
            r#"[(form_id: 88, editor_id: "Tundra"), (form_id: 0x1234, editor_id: "Desert")]"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.paths.catalog = Some(catalog);
        config.paths.output_dir = Some(dir.path().to_path_buf());
        Fixture { dir, biom, config }
    }

    #[test]
    fn test_info_lists_table_and_usage() {
        let fx = fixture();
        let text = info(&fx.biom, &fx.config).unwrap();
        assert!(text.contains("biomes: 2"), "{text}");
        assert!(text.contains("Tundra"), "{text}");
        assert!(text.contains("not in catalog: 1"), "{text}");
        assert!(text.contains("0x00000008"), "{text}");
        assert!(text.contains("65536 cells"), "{text}");
        assert!(text.contains("unknown resource cells: 1"), "{text}");
        assert!(text.contains("unknown resource cells: 0"), "{text}");
    }

    #[test]
    fn test_add_biome_by_editor_id_with_backup() {
        let fx = fixture();
        let message = add_biome(&fx.biom, "desert", None, None, &fx.config).unwrap();
        assert!(message.contains("0x00001234"), "{message}");

        let file = BiomFile::load(&fx.biom).unwrap();
        assert_eq!(file.biome_ids(), &[8, 88, 0x1234]);

        let backup = BiomFile::load(&fx.dir.path().join("planet.biom.bak")).unwrap();
        assert_eq!(backup.biome_ids(), &[8, 88]);
    }

    #[test]
    fn test_add_biome_to_separate_output() {
        let fx = fixture();
        let out = fx.dir.path().join("edited.biom");
        add_biome(&fx.biom, "0x10", None, Some(&out), &fx.config).unwrap();
        assert_eq!(BiomFile::load(&out).unwrap().biome_ids(), &[8, 88, 16]);
        assert_eq!(BiomFile::load(&fx.biom).unwrap().biome_ids(), &[8, 88]);
        assert!(!fx.dir.path().join("planet.biom.bak").exists());
    }

    #[test]
    fn test_explicit_output_naming_input_skips_backup() {
        let fx = fixture();
        add_biome(&fx.biom, "0x10", None, Some(&fx.biom), &fx.config).unwrap();
        assert_eq!(BiomFile::load(&fx.biom).unwrap().biome_ids(), &[8, 88, 16]);
        assert!(!fx.dir.path().join("planet.biom.bak").exists());
    }

    #[test]
    fn test_add_unknown_biome() {
        let fx = fixture();
        let result = add_biome(&fx.biom, "Swamp", None, None, &fx.config);
        assert!(matches!(result, Err(CliError::UnknownBiome(name)) if name == "Swamp"));
    }

    #[test]
    fn test_protected_plugin_blocks_edit() {
        let fx = fixture();
        let result = add_biome(&fx.biom, "88", Some("Starfield.esm"), None, &fx.config);
        assert!(matches!(
            result,
            Err(CliError::GameData(GameDataError::ProtectedPlugin(_)))
        ));
        assert_eq!(BiomFile::load(&fx.biom).unwrap().biome_ids(), &[8, 88]);
    }

    #[test]
    fn test_remove_biome_out_of_range_leaves_file() {
        let fx = fixture();
        let before = std::fs::read(&fx.biom).unwrap();
        let result = remove_biome(&fx.biom, 5, None, None, &fx.config);
        assert!(matches!(
            result,
            Err(CliError::Edit(EditError::BiomeIndexOutOfRange { index: 5, len: 2 }))
        ));
        assert_eq!(std::fs::read(&fx.biom).unwrap(), before);
    }

    #[test]
    fn test_remove_biome() {
        let mut fx = fixture();
        fx.config.edit.backup_on_save = false;
        remove_biome(&fx.biom, 0, None, None, &fx.config).unwrap();
        assert_eq!(BiomFile::load(&fx.biom).unwrap().biome_ids(), &[88]);
    }

    #[test]
    fn test_export_then_import_resource_layer() {
        let mut fx = fixture();
        fx.config.render.scale = 2;
        let png = export(
            &fx.biom,
            Some(HemisphereArg::South),
            Layer::Resource,
            None,
            &fx.config,
        )
        .unwrap();
        assert_eq!(png, fx.dir.path().join("planet_south_resource.png"));

        // South resources (all zero) go into the north hemisphere.
        import(
            &fx.biom,
            &png,
            Some(HemisphereArg::North),
            Layer::Resource,
            None,
            None,
            &fx.config,
        )
        .unwrap();
        let file = BiomFile::load(&fx.biom).unwrap();
        assert!(file.north().resource_values().iter().all(|&r| r == 0));
    }

    #[test]
    fn test_import_highlighted_unmapped_fails() {
        let fx = fixture();
        // North has one unknown resource byte, exported in the fallback color.
        let png = export(&fx.biom, None, Layer::Resource, None, &fx.config).unwrap();
        let result = import(
            &fx.biom,
            &png,
            None,
            Layer::Resource,
            None,
            None,
            &fx.config,
        );
        assert!(matches!(
            result,
            Err(CliError::Palette(
                biomer_palette::PaletteError::UnmappedColor { x: 0, y: 0, .. }
            ))
        ));
    }

    #[test]
    fn test_export_without_highlight_fails_on_unknown() {
        let mut fx = fixture();
        fx.config.render.highlight_unmapped = false;
        let result = export(&fx.biom, None, Layer::Resource, None, &fx.config);
        assert!(matches!(result, Err(CliError::Palette(_))));
    }

    #[test]
    fn test_export_oversized_scale_is_error() {
        let mut fx = fixture();
        fx.config.render.scale = 128;
        let result = export(&fx.biom, None, Layer::Biome, None, &fx.config);
        assert!(
            matches!(
                result,
                Err(CliError::Palette(
                    biomer_palette::PaletteError::ScaleTooLarge { scale: 128 }
                ))
            ),
            "got {result:?}"
        );
        assert!(!fx.dir.path().join("planet_north_biome.png").exists());
    }

    #[test]
    fn test_catalog_listing() {
        let fx = fixture();
        let text = catalog(&fx.config).unwrap();
        assert_eq!(text, "0x00000058  Tundra\n0x00001234  Desert\n");

        let result = catalog(&Config::default());
        assert!(matches!(result, Err(CliError::NoCatalog)));
    }
}
