use glam::Vec2;
use townroam_world::player::InputSample;

/// How the simulated player drives the joystick during a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    /// No input. Measures traffic and NPC ticking alone.
    Idle,
    /// Constant joystick direction.
    Straight { direction: Vec2 },
    /// Heading rotates at `turn_rate` radians per tick.
    Spiral { turn_rate: f32 },
    /// Reverse direction every `period` ticks, crossing the same chunk
    /// boundary repeatedly.
    BackAndForth { direction: Vec2, period: u32 },
}

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub route: Route,
}

impl SceneConfig {
    /// Joystick input for tick `tick` of this scene.
    pub fn input_at(&self, tick: u32) -> InputSample {
        let joystick = match self.route {
            Route::Idle => Vec2::ZERO,
            Route::Straight { direction } => direction,
            Route::Spiral { turn_rate } => {
                let angle = tick as f32 * turn_rate;
                Vec2::new(angle.cos(), angle.sin())
            }
            Route::BackAndForth { direction, period } => {
                let leg = tick / period.max(1);
                if leg % 2 == 0 {
                    direction
                } else {
                    -direction
                }
            }
        };
        InputSample { joystick }
    }
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "idle",
            route: Route::Idle,
        },
        SceneConfig {
            name: "straight",
            route: Route::Straight {
                direction: Vec2::X,
            },
        },
        SceneConfig {
            name: "diagonal",
            route: Route::Straight {
                direction: Vec2::ONE.normalize(),
            },
        },
        SceneConfig {
            name: "spiral",
            route: Route::Spiral { turn_rate: 0.01 },
        },
        SceneConfig {
            name: "back-and-forth",
            route: Route::BackAndForth {
                direction: Vec2::X,
                period: 90,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_names_unique() {
        let scenes = standard_scenes();
        for (i, a) in scenes.iter().enumerate() {
            for b in &scenes[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_back_and_forth_reverses() {
        let scene = SceneConfig {
            name: "t",
            route: Route::BackAndForth {
                direction: Vec2::X,
                period: 10,
            },
        };
        assert_eq!(scene.input_at(0).joystick, Vec2::X);
        assert_eq!(scene.input_at(9).joystick, Vec2::X);
        assert_eq!(scene.input_at(10).joystick, -Vec2::X);
        assert_eq!(scene.input_at(20).joystick, Vec2::X);
    }

    #[test]
    fn test_idle_has_no_input() {
        let scene = SceneConfig {
            name: "idle",
            route: Route::Idle,
        };
        assert_eq!(scene.input_at(42), InputSample::idle());
    }
}
