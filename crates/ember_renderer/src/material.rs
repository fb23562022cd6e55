//! Material trait for surface scattering.

use std::sync::Arc;

use crate::{
    hittable::HitRecord,
    sampling::{gen_f32, random_unit_vector},
    texture::{SolidColor, Texture},
    Ray,
};
use ember_math::{reflect, refract, Color, Vec3, Vec3Ext};
use rand::RngCore;

/// Result of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the scattered radiance that reaches the incoming ray
    pub attenuation: Color,
    /// Continuation ray leaving the surface
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    texture: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with a constant albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    /// Create a Lambertian material whose albedo comes from a texture.
    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Normal plus a point on the unit sphere gives a cosine-weighted direction
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.texture.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize_or_zero(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz can push the ray below the surface; absorb it
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Refractive index in vacuum or air, or the ratio of the material's
    /// index over the index of the enclosing medium
    refraction_index: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize_or_zero();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    texture: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    /// Create a light whose emission comes from a texture.
    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.texture.value(u, v, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckerTexture;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Front-face hit on the z = 0 plane at the origin, ray arriving along
    /// `direction`.
    fn hit_on_plane<'a>(material: &'a dyn Material, direction: Vec3) -> (Ray, HitRecord<'a>) {
        let ray = Ray::new(-direction, direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, (0.25, 0.75), material);
        (ray, rec)
    }

    #[test]
    fn test_lambertian_scatter_is_reproducible() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let (ray, rec) = hit_on_plane(&mat, Vec3::new(0.0, 0.0, -1.0));

        let a = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(a.scattered.direction(), b.scattered.direction());
        assert_eq!(a.attenuation, Color::new(0.8, 0.3, 0.3));
        // Always leaves on the normal's side
        assert!(a.scattered.direction().dot(rec.normal) >= 0.0);
        assert_eq!(a.scattered.origin(), rec.p);
    }

    #[test]
    fn test_lambertian_samples_its_texture() {
        let checker = CheckerTexture::from_colors(1.0, Color::ZERO, Color::ONE);
        let mat = Lambertian::from_texture(Arc::new(checker));
        let (ray, mut rec) = hit_on_plane(&mat, Vec3::new(0.0, 0.0, -1.0));

        let mut rng = StdRng::seed_from_u64(1);
        rec.p = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(mat.scatter(&ray, &rec, &mut rng).unwrap().attenuation, Color::ZERO);
        rec.p = Vec3::new(1.5, 0.5, 0.5);
        assert_eq!(mat.scatter(&ray, &rec, &mut rng).unwrap().attenuation, Color::ONE);
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Metal::new(Color::new(0.7, 0.6, 0.5), 0.0);
        let (ray, rec) = hit_on_plane(&mat, Vec3::new(1.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(5);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_fuzz_is_reproducible_and_clamped() {
        let mat = Metal::new(Color::ONE, 3.0);
        assert_eq!(mat.fuzz, 1.0);

        let (ray, rec) = hit_on_plane(&mat, Vec3::new(0.3, 0.0, -1.0));
        let a = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(9));
        let b = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(9));

        assert_eq!(
            a.map(|r| r.scattered.direction()),
            b.map(|r| r.scattered.direction())
        );
    }

    #[test]
    fn test_metal_absorbs_grazing_fuzz_below_surface() {
        // A grazing mirror direction with full fuzz lands below the surface
        // for a good share of samples; every accepted one must be above it.
        let mat = Metal::new(Color::ONE, 1.0);
        let (ray, rec) = hit_on_plane(&mat, Vec3::new(1.0, 0.0, -0.01));
        let mut rng = StdRng::seed_from_u64(3);

        let mut absorbed = 0;
        for _ in 0..200 {
            match mat.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_choice_is_reproducible() {
        let mat = Dielectric::new(1.5);
        let (ray, rec) = hit_on_plane(&mat, Vec3::new(0.6, 0.0, -0.8));

        for seed in 0..16 {
            let a = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a.scattered.direction(), b.scattered.direction());
            assert_eq!(a.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);

        // Exiting glass at a steep angle: 1.5 * sin(60 deg) > 1
        let direction = Vec3::new(60f32.to_radians().sin(), 0.0, 60f32.to_radians().cos());
        let ray = Ray::new(-direction, direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, (0.0, 0.0), &mat);
        assert!(!rec.front_face);

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..32 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = reflect(direction, rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let mat = Dielectric::new(1.5);
        let (ray, rec) = hit_on_plane(&mat, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(17);

        // Normal incidence reflectance is 4%, so refraction dominates
        let refracted = (0..100)
            .filter(|_| {
                let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
                result.scattered.direction().z < 0.0
            })
            .count();
        assert!(refracted > 80);
    }

    #[test]
    fn test_diffuse_light_emits_and_absorbs() {
        let light = DiffuseLight::new(Color::new(4.0, 4.0, 4.0));
        let (ray, rec) = hit_on_plane(&light, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(light.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(light.emitted(0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
        assert_eq!(Lambertian::new(Color::ONE).emitted(0.0, 0.0, Vec3::ZERO), Color::ZERO);
    }
}
