//! End-to-end tests: file in, collage out.

use collage_vision::core_modules::collage::assemble_collage;
use collage_vision::core_modules::color::color::{BLUE, RED, WHITE};
use collage_vision::core_modules::filters::{brighten, create_filtered_pics, grayscale, mirror_horizontal};
use collage_vision::core_modules::scaling::downsample;
use collage_vision::core_modules::utils::image_helper::image_helper;
use collage_vision::{CollagePipeline, Color, Error, ParallelPipeline, Picture, PipelineConfig};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn scene(width: usize, height: usize) -> Picture {
    let mut picture = Picture::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let color = if x < width / 2 { RED } else { BLUE };
            let color = if y == height / 2 { WHITE } else { color };
            picture.set(x, y, color).unwrap();
        }
    }
    picture
}

#[test]
fn collage_survives_a_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("scene.png");
    let collage_path = dir.path().join("collage.png");
    image_helper::save(&scene(64, 48), &source_path).unwrap();

    let source = image_helper::load(&source_path).unwrap();
    let config = PipelineConfig {
        workers: 2,
        ..PipelineConfig::new(96, 48)
    };
    let collage = CollagePipeline::new(config).unwrap().run(&source).unwrap();
    image_helper::save(&collage, &collage_path).unwrap();

    let reloaded = image_helper::load(&collage_path).unwrap();
    assert_eq!(reloaded, collage);
    // 64x48 into a 32x24 tile budget: stride 2.
    assert_eq!(reloaded.dimensions(), (96, 48));

    let tile = downsample(&source, 2).unwrap();
    let brightened = brighten(&tile, 1.5);
    assert_eq!(reloaded.get(0, 0).unwrap(), brightened.get(0, 0).unwrap());
    let mirrored = mirror_horizontal(&tile);
    assert_eq!(reloaded.get(32, 24).unwrap(), mirrored.get(0, 0).unwrap());
}

#[tokio::test]
async fn parallel_and_sequential_collages_match() {
    let source = scene(50, 30);
    let config = PipelineConfig {
        workers: 3,
        ..PipelineConfig::new(75, 30)
    };
    let sequential = CollagePipeline::new(config.clone()).unwrap().run(&source).unwrap();

    let pipeline = ParallelPipeline::new(config).unwrap();
    let parallel = pipeline.run(Arc::new(source)).await.unwrap();
    pipeline.shutdown().await;

    assert_eq!(parallel, sequential);
}

#[test]
fn collage_of_red_square_has_gray_corner_tile() {
    let red = Picture::filled(4, 4, RED).unwrap();
    let collage = assemble_collage(&create_filtered_pics(&red)).unwrap();
    assert_eq!(collage.dimensions(), (12, 8));
    assert_eq!(collage.get(8, 4).unwrap(), Color::gray(85));
    assert_eq!(grayscale(&red).get(3, 3).unwrap(), Color::gray(85));
}

#[test]
fn mismatched_tiles_fail_without_output() {
    let mut tiles = create_filtered_pics(&scene(4, 4));
    tiles[2] = Picture::new(5, 4).unwrap();
    assert!(matches!(
        assemble_collage(&tiles),
        Err(Error::DimensionMismatch { index: 2, .. })
    ));
}
