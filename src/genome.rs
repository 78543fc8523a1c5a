/*
 * Genome Module
 *
 * Per-boid parameters drawn once when a boid is created and never changed
 * afterwards. A genome is split into general traits (limits and mood
 * parameters) and perception zones (radii gating each steering rule).
 */

use rand::Rng;
use std::ops::Range;

// Ranges the random traits are drawn from
pub const MAX_FORCE_RANGE: Range<f32> = 0.001..0.6;
pub const MAX_SPEED_RANGE: Range<f32> = 1.5..2.5;
pub const MOODINESS_RANGE: Range<f32> = 0.001..0.101;
pub const MENTAL_ENDURANCE_RANGE: Range<f32> = 1.0..3.0;
pub const MENTAL_HEALTH_RANGE: Range<f32> = -10.0..10.0;
pub const MOOD_LIMIT: f32 = 10.0;

/// General (non-spatial) traits of a boid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traits {
    pub max_force: f32,
    pub max_speed: f32,
    /// How strongly neighbours and crowding move the mood.
    pub moodiness: f32,
    /// Weight of the crowding term in the mood swing.
    pub mental_endurance: f32,
    /// Constant mood drift, negative for gloomy boids.
    pub mental_health: f32,
    pub mood_limit: f32,
}

/// Perception radii, one per rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    pub food: f32,
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub view: f32,
    /// Neighbours closer than this make the boid uncomfortable.
    pub close: f32,
    /// Neighbours between `close` and this radius make the boid happy.
    pub happy: f32,
    /// Radius over which moods diffuse between boids.
    pub sensitive: f32,
}

impl Default for Zones {
    fn default() -> Self {
        Self {
            food: 200.0,
            alignment: 40.0,
            cohesion: 40.0,
            separation: 40.0,
            view: 40.0,
            close: 20.0,
            happy: 40.0,
            sensitive: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Genome {
    traits: Traits,
    zones: Zones,
}

impl Genome {
    pub fn new(traits: Traits, zones: Zones) -> Self {
        Self { traits, zones }
    }

    // Draw a fresh genome, each trait independently and uniformly
    pub fn random(rng: &mut impl Rng) -> Self {
        let traits = Traits {
            max_force: rng.gen_range(MAX_FORCE_RANGE),
            max_speed: rng.gen_range(MAX_SPEED_RANGE),
            moodiness: rng.gen_range(MOODINESS_RANGE),
            mental_endurance: rng.gen_range(MENTAL_ENDURANCE_RANGE),
            mental_health: rng.gen_range(MENTAL_HEALTH_RANGE),
            mood_limit: MOOD_LIMIT,
        };

        Self::new(traits, Zones::default())
    }

    pub fn zones(&self) -> &Zones {
        &self.zones
    }

    #[inline]
    pub fn max_force(&self) -> f32 {
        self.traits.max_force
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.traits.max_speed
    }

    #[inline]
    pub fn moodiness(&self) -> f32 {
        self.traits.moodiness
    }

    #[inline]
    pub fn mental_endurance(&self) -> f32 {
        self.traits.mental_endurance
    }

    #[inline]
    pub fn mental_health(&self) -> f32 {
        self.traits.mental_health
    }

    #[inline]
    pub fn mood_limit(&self) -> f32 {
        self.traits.mood_limit
    }

    #[inline]
    pub fn food_zone(&self) -> f32 {
        self.zones.food
    }

    #[inline]
    pub fn alignment_zone(&self) -> f32 {
        self.zones.alignment
    }

    #[inline]
    pub fn cohesion_zone(&self) -> f32 {
        self.zones.cohesion
    }

    #[inline]
    pub fn separation_zone(&self) -> f32 {
        self.zones.separation
    }

    #[inline]
    pub fn view_zone(&self) -> f32 {
        self.zones.view
    }

    #[inline]
    pub fn close_zone(&self) -> f32 {
        self.zones.close
    }

    #[inline]
    pub fn happy_zone(&self) -> f32 {
        self.zones.happy
    }

    #[inline]
    pub fn sensitive_zone(&self) -> f32 {
        self.zones.sensitive
    }

    /// Largest radius any flocking rule looks at; sizes the neighbour query.
    ///
    /// The food zone is excluded, food has its own query.
    pub fn max_zone(&self) -> f32 {
        let z = &self.zones;
        [z.alignment, z.cohesion, z.separation, z.view, z.close, z.happy, z.sensitive]
            .into_iter()
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_traits_stay_in_their_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let g = Genome::random(&mut rng);
            assert!(MAX_FORCE_RANGE.contains(&g.max_force()));
            assert!(MAX_SPEED_RANGE.contains(&g.max_speed()));
            assert!(MOODINESS_RANGE.contains(&g.moodiness()));
            assert!(MENTAL_ENDURANCE_RANGE.contains(&g.mental_endurance()));
            assert!(MENTAL_HEALTH_RANGE.contains(&g.mental_health()));
            assert_eq!(g.mood_limit(), MOOD_LIMIT);
            assert!(g.max_force() > 0.0 && g.max_speed() > 0.0);
        }
    }

    #[test]
    fn max_zone_ignores_food_zone() {
        let traits = Traits {
            max_force: 0.2,
            max_speed: 2.0,
            moodiness: 0.05,
            mental_endurance: 2.0,
            mental_health: 0.0,
            mood_limit: 10.0,
        };
        let zones = Zones {
            sensitive: 55.0,
            ..Zones::default()
        };
        let g = Genome::new(traits, zones);
        assert_eq!(g.max_zone(), 55.0);
        assert_eq!(Genome::new(traits, Zones::default()).max_zone(), 40.0);
    }
}
