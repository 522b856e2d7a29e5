// THEORY:
// The `pipeline` module is the top-level API of the collage engine. It wraps
// the sequence a driver would otherwise write by hand into one object:
//
//   picture -> shrink to tile size -> six catalog filters -> assemble
//
// The pipeline holds only configuration. Every stage takes the previous
// stage's picture by reference and returns a fresh one, so a pipeline can be
// reused for any number of pictures and the caller's picture is never
// modified.
//
// Sizing: the collage is three tiles wide and two tiles high, so the tile
// budget is `max_width / 3` by `max_height / 2`. The input is downsampled with
// the smallest stride that fits that budget.

use crate::core_modules::collage::{COLLAGE_COLUMNS, COLLAGE_ROWS, assemble_collage};
use crate::core_modules::filters::{DEFAULT_BRIGHTEN_FACTOR, FilterSettings, create_filtered_pics_with};
use crate::core_modules::picture::Picture;
use crate::core_modules::scaling::{downsample, shrink_factor_for};
use crate::error::{Error, Result};
use tracing::{debug, info, instrument};

/// Smallest collage width that leaves at least one pixel per tile column.
pub const MIN_COLLAGE_WIDTH: usize = 3;
/// Smallest accepted collage height.
pub const MIN_COLLAGE_HEIGHT: usize = 1;

/// Configuration for the collage pipelines.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Upper bound on the collage width in pixels.
    pub max_width: usize,
    /// Upper bound on the collage height in pixels.
    pub max_height: usize,
    /// Channel multiplier used by the brighten tile.
    pub brighten_factor: f64,
    /// Worker threads for band-parallel edge detection and the tokio pool.
    pub workers: usize,
}

impl PipelineConfig {
    pub fn new(max_width: usize, max_height: usize) -> Self {
        Self {
            max_width,
            max_height,
            brighten_factor: DEFAULT_BRIGHTEN_FACTOR,
            workers: num_cpus::get(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width < MIN_COLLAGE_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "max width must be at least {MIN_COLLAGE_WIDTH}, got {}",
                self.max_width
            )));
        }
        if self.max_height < MIN_COLLAGE_HEIGHT {
            return Err(Error::InvalidConfig(format!(
                "max height must be at least {MIN_COLLAGE_HEIGHT}, got {}",
                self.max_height
            )));
        }
        if self.workers == 0 {
            return Err(Error::InvalidConfig("worker count must be at least 1".into()));
        }
        if !self.brighten_factor.is_finite() || self.brighten_factor < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "brighten factor must be a finite non-negative number, got {}",
                self.brighten_factor
            )));
        }
        Ok(())
    }

    /// Largest tile that keeps the collage within the configured bounds.
    pub fn tile_budget(&self) -> (usize, usize) {
        (
            self.max_width / COLLAGE_COLUMNS,
            (self.max_height / COLLAGE_ROWS).max(1),
        )
    }

    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings {
            brighten_factor: self.brighten_factor,
            workers: self.workers,
        }
    }
}

/// Sequential collage pipeline.
#[derive(Debug, Clone)]
pub struct CollagePipeline {
    config: PipelineConfig,
}

impl CollagePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Downsamples `picture` so that one tile fits the tile budget.
    #[instrument(skip_all, fields(width = picture.width(), height = picture.height()))]
    pub fn prepare(&self, picture: &Picture) -> Result<Picture> {
        let (tile_width, tile_height) = self.config.tile_budget();
        let stride = shrink_factor_for(picture, tile_width, tile_height)?;
        debug!(stride, tile_width, tile_height, "computed downsample stride");
        downsample(picture, stride)
    }

    /// The six collage variants of `picture`, in tile order.
    pub fn filtered_pics(&self, picture: &Picture) -> [Picture; 6] {
        create_filtered_pics_with(picture, &self.config.filter_settings())
    }

    /// Runs the whole sequence and returns the assembled collage.
    pub fn run(&self, picture: &Picture) -> Result<Picture> {
        let tile = self.prepare(picture)?;
        let pics = self.filtered_pics(&tile);
        let collage = assemble_collage(&pics)?;
        info!(
            width = collage.width(),
            height = collage.height(),
            "assembled collage"
        );
        Ok(collage)
    }
}
