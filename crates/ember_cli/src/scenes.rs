//! Built-in scene presets.
//!
//! Each preset returns its objects as a flat list together with the camera
//! settings it was composed for.

use std::sync::Arc;

use ember_core::load_image;
use ember_renderer::{
    make_box, CameraConfig, CheckerTexture, Color, Dielectric, DiffuseLight, Hittable,
    HittableList, ImageTexture, Lambertian, Metal, NoiseTexture, Quad, RotateY, SolidColor,
    Sphere, Translate, Vec3,
};
use rand::RngCore;

/// Texture file used by the `earth` preset, relative to the working directory.
pub const EARTH_TEXTURE: &str = "earthmap.jpg";

/// Available built-in scene presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenePreset {
    /// Glass, metal and checkered spheres on a large ground sphere
    Spheres,
    /// Two touching checkered spheres
    CheckeredSpheres,
    /// Image-mapped globe (reads earthmap.jpg)
    Earth,
    /// Marble noise on a ground sphere and a small sphere
    PerlinSpheres,
    /// Five colored quads around the camera axis
    Quads,
    /// Noise-free scene lit only by a sphere and a quad light
    SimpleLight,
    /// Classic Cornell box with two rotated blocks
    CornellBox,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 7] = [
        ScenePreset::Spheres,
        ScenePreset::CheckeredSpheres,
        ScenePreset::Earth,
        ScenePreset::PerlinSpheres,
        ScenePreset::Quads,
        ScenePreset::SimpleLight,
        ScenePreset::CornellBox,
    ];
}

/// A preset's objects and camera.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraConfig,
}

/// Build the objects and camera for `preset`.
pub fn build(preset: ScenePreset, rng: &mut dyn RngCore) -> Scene {
    let scene = match preset {
        ScenePreset::Spheres => spheres(),
        ScenePreset::CheckeredSpheres => checkered_spheres(),
        ScenePreset::Earth => earth(),
        ScenePreset::PerlinSpheres => perlin_spheres(rng),
        ScenePreset::Quads => quads(),
        ScenePreset::SimpleLight => simple_light(),
        ScenePreset::CornellBox => cornell_box(),
    };
    log::info!("Scene {:?}: {} top-level objects", preset, scene.world.len());
    scene
}

/// Daylight camera shared by most presets.
fn sky_camera(aspect_ratio: f32, samples_per_pixel: u32) -> CameraConfig {
    CameraConfig::default()
        .with_image(aspect_ratio, 400)
        .with_quality(samples_per_pixel, 50)
        .with_background(Color::new(0.7, 0.8, 1.0))
}

fn spheres() -> Scene {
    let mut world = HittableList::new();

    let ground = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.push(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let checker = Arc::new(CheckerTexture::from_colors(
        1.0 / 0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.push(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::from_texture(checker)),
    ));
    world.push(Sphere::new(
        Vec3::new(0.0, 1.0, 2.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.8, 0.1, 0.1), 0.6)),
    ));
    world.push(Sphere::new(
        Vec3::new(0.0, 1.0, -2.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    ));

    let camera = sky_camera(16.0 / 9.0, 50)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene { world, camera }
}

fn checkered_spheres() -> Scene {
    let checker = Arc::new(CheckerTexture::from_colors(
        1.0 / 0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let material = Arc::new(Lambertian::from_texture(checker));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, material.clone()));
    world.push(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, material));

    let camera = sky_camera(16.0 / 9.0, 100)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene { world, camera }
}

fn earth() -> Scene {
    let texture = match load_image(EARTH_TEXTURE) {
        Ok(image) => ImageTexture::from_image(image),
        Err(err) => {
            log::warn!("Could not load {}: {}", EARTH_TEXTURE, err);
            ImageTexture::new(None)
        }
    };
    let surface = Arc::new(Lambertian::from_texture(Arc::new(texture)));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::ZERO, 2.0, surface));

    let camera = sky_camera(16.0 / 9.0, 100)
        .with_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene { world, camera }
}

fn perlin_spheres(rng: &mut dyn RngCore) -> Scene {
    let noise = Arc::new(NoiseTexture::new(4.0, rng));
    let material = Arc::new(Lambertian::from_texture(noise));

    let mut world = HittableList::new();
    world.push(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        material.clone(),
    ));
    world.push(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, material));

    let camera = sky_camera(16.0 / 9.0, 100)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene { world, camera }
}

fn quads() -> Scene {
    let left_red = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    let back_green = Arc::new(Lambertian::new(Color::new(0.2, 1.0, 0.2)));
    let right_blue = Arc::new(Lambertian::new(Color::new(0.2, 0.2, 1.0)));
    let upper_orange = Arc::new(Lambertian::new(Color::new(1.0, 0.5, 0.0)));
    let lower_teal = Arc::new(Lambertian::new(Color::new(0.2, 0.8, 0.8)));

    let mut world = HittableList::new();
    world.push(Quad::new(
        Vec3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        left_red,
    ));
    world.push(Quad::new(
        Vec3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    ));
    world.push(Quad::new(
        Vec3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        right_blue,
    ));
    world.push(Quad::new(
        Vec3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    ));
    world.push(Quad::new(
        Vec3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_teal,
    ));

    let camera = sky_camera(1.0, 100)
        .with_position(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0);

    Scene { world, camera }
}

fn simple_light() -> Scene {
    let blue = Arc::new(SolidColor::new(Color::new(0.0, 0.0, 1.0)));
    let surface = Arc::new(Lambertian::from_texture(blue));
    let light = Arc::new(DiffuseLight::new(Color::splat(5.0)));

    let mut world = HittableList::new();
    world.push(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        surface.clone(),
    ));
    world.push(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, surface));
    world.push(Sphere::new(Vec3::new(0.0, 8.0, 0.0), 2.0, light.clone()));
    world.push(Quad::new(
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light,
    ));

    let camera = sky_camera(16.0 / 9.0, 100)
        .with_background(Color::ZERO)
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    Scene { world, camera }
}

fn cornell_box() -> Scene {
    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut world = HittableList::new();
    world.push(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    ));
    world.push(Quad::new(
        Vec3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    ));
    world.push(Quad::new(
        Vec3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    ));
    world.push(Quad::new(
        Vec3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    ));
    world.push(Quad::new(
        Vec3::splat(555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    ));
    world.push(Quad::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    ));

    let tall: Arc<dyn Hittable> = Arc::new(make_box(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    let tall = Arc::new(RotateY::new(tall, 15.0));
    world.push(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0)));

    let short: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::splat(165.0), white));
    let short = Arc::new(RotateY::new(short, -18.0));
    world.push(Translate::new(short, Vec3::new(130.0, 0.0, 65.0)));

    let camera = CameraConfig::default()
        .with_image(1.0, 600)
        .with_quality(500, 50)
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0);

    Scene { world, camera }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_renderer::{BvhNode, Camera, Interval, Ray};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_preset_builds() {
        let mut rng = StdRng::seed_from_u64(0);
        for preset in ScenePreset::ALL {
            let scene = build(preset, &mut rng);
            assert!(!scene.world.is_empty(), "{:?} is empty", preset);
            assert!(Camera::new(scene.camera.clone()).is_ok(), "{:?} camera", preset);
            assert!(BvhNode::from_list(scene.world, &mut rng).is_ok(), "{:?} bvh", preset);
        }
    }

    #[test]
    fn test_preset_names() {
        use clap::ValueEnum;

        let names: Vec<String> = ScenePreset::value_variants()
            .iter()
            .filter_map(|p| p.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "spheres",
                "checkered-spheres",
                "earth",
                "perlin-spheres",
                "quads",
                "simple-light",
                "cornell-box"
            ]
        );
    }

    #[test]
    fn test_cornell_box_encloses_camera_target() {
        let mut rng = StdRng::seed_from_u64(0);
        let scene = build(ScenePreset::CornellBox, &mut rng);

        // Looking straight down the box hits the back wall (or a block)
        let ray = Ray::new(Vec3::new(278.0, 278.0, -800.0), Vec3::Z);
        let rec = scene
            .world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!(rec.p.z > 0.0 && rec.p.z <= 555.0 + 1e-3);
    }
}
