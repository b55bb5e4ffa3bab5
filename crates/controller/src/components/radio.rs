use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const ANTENNA_SPEED: f32 = 10.0;
pub const RADIO_MAX_POWER: f32 = 100.0;

/// Hand-held radio state. Lives on the radio entity; whoever holds it drives it.
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Radio {
    /// Antenna extension, 0 collapsed to 1 fully out.
    pub antenna_length: f32,
    pub powered: bool,
    pub power: f32,
    pub max_power: f32,
}

impl Default for Radio {
    fn default() -> Self {
        Self {
            antenna_length: 0.0,
            powered: false,
            power: RADIO_MAX_POWER,
            max_power: RADIO_MAX_POWER,
        }
    }
}

impl Radio {
    pub fn toggle(&mut self) {
        self.powered = !self.powered;
    }

    pub fn set_antenna_length(&mut self, length: f32) {
        self.antenna_length = if length.is_finite() {
            length.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// A dead holder keeps the radio broadcasting at full power.
    pub fn distress_beacon(&mut self) {
        self.power = self.max_power;
        self.powered = true;
    }
}

/// The radio a character currently carries. The radio is owned elsewhere;
/// this is only a reference and the character never despawns it.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct HeldRadio(pub Entity);

/// Point on the character the held radio is pinned to.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct RadioAnchor(pub Entity);

/// Input sensitivity shaping for the rate-controlled antenna.
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Default)]
pub enum ResponseCurve {
    #[default]
    Linear,
    Power(f32),
    Eased(EaseFunction),
}

impl ResponseCurve {
    /// Maps a raw input into [0, 1]; out-of-range input is clamped first.
    pub fn evaluate(&self, input: f32) -> f32 {
        let x = if input.is_finite() {
            input.clamp(0.0, 1.0)
        } else {
            0.0
        };

        match *self {
            ResponseCurve::Linear => x,
            ResponseCurve::Power(exponent) => x.powf(exponent.max(f32::EPSILON)),
            ResponseCurve::Eased(function) => {
                EasingCurve::new(0.0, 1.0, function).sample_clamped(x)
            }
        }
    }
}

/// How antenna input drives the extension length.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub enum AntennaControl {
    /// Length follows the look stick magnitude directly.
    #[default]
    Direct,
    /// Extend/retract inputs change the length at `speed` per second.
    Rate { speed: f32, curve: ResponseCurve },
}

impl AntennaControl {
    pub fn rate() -> Self {
        AntennaControl::Rate {
            speed: ANTENNA_SPEED,
            curve: ResponseCurve::Linear,
        }
    }

    /// Antenna length after one tick.
    pub fn next_length(&self, current: f32, look: Vec2, extend: f32, retract: f32, dt: f32) -> f32 {
        match *self {
            AntennaControl::Direct => look.length(),
            AntennaControl::Rate { speed, curve } => {
                current + (curve.evaluate(extend) - curve.evaluate(retract)) * dt * speed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_radio_is_off_and_collapsed() {
        let radio = Radio::default();
        assert!(!radio.powered);
        assert_eq!(radio.antenna_length, 0.0);
        assert_eq!(radio.power, radio.max_power);
    }

    #[test]
    fn antenna_length_is_clamped() {
        let mut radio = Radio::default();
        radio.set_antenna_length(3.0);
        assert_eq!(radio.antenna_length, 1.0);
        radio.set_antenna_length(-2.0);
        assert_eq!(radio.antenna_length, 0.0);
        radio.set_antenna_length(f32::NAN);
        assert_eq!(radio.antenna_length, 0.0);
    }

    #[test]
    fn distress_beacon_forces_full_power() {
        let mut radio = Radio {
            power: 3.0,
            ..default()
        };
        radio.distress_beacon();
        assert!(radio.powered);
        assert_eq!(radio.power, radio.max_power);
    }

    #[test]
    fn response_curves_stay_in_unit_range() {
        let curves = [
            ResponseCurve::Linear,
            ResponseCurve::Power(2.0),
            ResponseCurve::Eased(EaseFunction::QuadraticIn),
        ];
        for curve in curves {
            for input in [-10.0, 0.0, 0.5, 1.0, 10.0, f32::INFINITY] {
                let value = curve.evaluate(input);
                assert!((0.0..=1.0).contains(&value), "{curve:?}({input}) = {value}");
            }
        }
    }

    #[test]
    fn power_curve_softens_small_inputs() {
        assert!(ResponseCurve::Power(2.0).evaluate(0.5) < 0.5);
        assert_eq!(ResponseCurve::Linear.evaluate(0.5), 0.5);
    }

    #[test]
    fn direct_mode_follows_look_magnitude() {
        let control = AntennaControl::Direct;
        let length = control.next_length(0.9, Vec2::new(0.3, 0.4), 1.0, 0.0, 0.1);
        assert!((length - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rate_mode_integrates_difference() {
        let control = AntennaControl::rate();
        let length = control.next_length(0.2, Vec2::ZERO, 1.0, 0.5, 0.01);
        assert!((length - 0.25).abs() < 1e-6);
    }
}
