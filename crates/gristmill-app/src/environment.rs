//! Environment scene nodes for the factory yard.
//!
//! Each node owns its shader parameter block and registers a weak
//! descriptor with the scheduler on mount. Unmounting unregisters every id
//! that mount registered.

use std::cell::RefCell;
use std::rc::Rc;

use gristmill_anim::{
    AnimationCategory, AnimationDescriptor, AnimationError, AnimationScheduler, BlinkPattern,
    LightSource,
};
use gristmill_render::{
    CityLightParams, DirectionalLightParams, FacadeParams, SkyDomeParams, StarfieldParams,
    TerrainLayerParams, WaterSurfaceParams,
};
use gristmill_time::Rgb8;

const WINDOW_WARM: Rgb8 = Rgb8::from_hex(0xffd890);
const BEACON_RED: Rgb8 = Rgb8::from_hex(0xff3020);
const STREET_SODIUM: Rgb8 = Rgb8::from_hex(0xffb45a);

/// Parameter blocks of the yard's animated environment.
pub struct EnvironmentNodes {
    pub sky: Rc<RefCell<SkyDomeParams>>,
    pub stars: Rc<RefCell<StarfieldParams>>,
    pub facades: Vec<Rc<RefCell<FacadeParams>>>,
    pub city_lights: Vec<Rc<RefCell<CityLightParams>>>,
    pub terrain: Vec<Rc<RefCell<TerrainLayerParams>>>,
    pub water: Rc<RefCell<WaterSurfaceParams>>,
    pub sun: Rc<RefCell<DirectionalLightParams>>,
    pub moon: Rc<RefCell<DirectionalLightParams>>,
    registered: Vec<(AnimationCategory, String)>,
}

fn block<T: Default>() -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(T::default()))
}

impl EnvironmentNodes {
    /// Build the yard's nodes and register them with `scheduler`.
    ///
    /// `city_lights` controls how many distant lights are spawned; every
    /// fifth one is a blinking aircraft beacon.
    pub fn mount(
        scheduler: &mut AnimationScheduler,
        city_lights: usize,
    ) -> Result<Self, AnimationError> {
        let mut nodes = Self {
            sky: block(),
            stars: block(),
            facades: (0..3).map(|_| block()).collect(),
            city_lights: (0..city_lights).map(|_| block()).collect(),
            terrain: (0..2).map(|_| block()).collect(),
            water: block(),
            sun: block(),
            moon: block(),
            registered: Vec::new(),
        };

        let mut descriptors = vec![
            ("sky".to_string(), AnimationDescriptor::sky_dome(&nodes.sky, 0.004)),
            ("stars".to_string(), AnimationDescriptor::starfield(&nodes.stars, 0.0)),
            ("river".to_string(), AnimationDescriptor::water_surface(&nodes.water, 0.6)),
            (
                "sun".to_string(),
                AnimationDescriptor::directional_light(&nodes.sun, LightSource::Sun),
            ),
            (
                "moon".to_string(),
                AnimationDescriptor::directional_light(&nodes.moon, LightSource::Moon),
            ),
        ];
        for (i, facade) in nodes.facades.iter().enumerate() {
            let lit = 0.4 + 0.2 * i as f32;
            descriptors.push((
                format!("facade-{i}"),
                AnimationDescriptor::building_facade(facade, WINDOW_WARM, lit),
            ));
        }
        for (i, light) in nodes.city_lights.iter().enumerate() {
            let descriptor = if i % 5 == 0 {
                AnimationDescriptor::city_light(
                    light,
                    BEACON_RED,
                    BlinkPattern::new(1.5, 0.2, i as f32 * 0.13),
                )
            } else {
                AnimationDescriptor::city_light(light, STREET_SODIUM, BlinkPattern::STEADY)
            };
            descriptors.push((format!("city-light-{i}"), descriptor));
        }
        let ridges = [Rgb8::from_hex(0x5a6650), Rgb8::from_hex(0x7d8a96)];
        for (i, (layer, base)) in nodes.terrain.iter().zip(ridges).enumerate() {
            // The far ridge picks up more of the sky colour.
            let blend = 0.25 + 0.35 * i as f32;
            descriptors.push((
                format!("ridge-{i}"),
                AnimationDescriptor::terrain_layer(layer, base, blend),
            ));
        }

        for (id, descriptor) in descriptors {
            let category = descriptor.category();
            scheduler.register(category, id.clone(), descriptor)?;
            nodes.registered.push((category, id));
        }
        Ok(nodes)
    }

    /// Number of descriptors this mount registered.
    pub fn registered(&self) -> usize {
        self.registered.len()
    }

    /// Unregister everything registered by [`mount`](Self::mount).
    pub fn unmount(self, scheduler: &mut AnimationScheduler) {
        for (category, id) in &self.registered {
            scheduler.unregister(*category, id);
        }
    }
}
