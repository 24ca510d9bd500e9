//! Daily random-walk price update.

use crate::market::Market;
use crate::rng::GaussianSource;
use serde::{Deserialize, Serialize};

/// Multiplicative random walk with an absolute price floor.
///
/// One simulated day moves every price to
/// `max(price_floor, price * (1 + drift + volatility * z))` with `z` a
/// standard-normal draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceModel {
    /// Standard deviation of the daily return.
    pub volatility: f64,
    /// Mean daily return.
    pub drift: f64,
    /// No price ever goes below this.
    pub price_floor: f64,
}

impl Default for PriceModel {
    fn default() -> Self {
        Self {
            volatility: 0.02,
            drift: 0.0,
            price_floor: 0.5,
        }
    }
}

impl PriceModel {
    /// Next price for a single draw.
    pub fn step(&self, price: f64, z: f64) -> f64 {
        let multiplier = 1.0 + self.drift + self.volatility * z;
        (price * multiplier).max(self.price_floor)
    }

    /// Advance every instrument one day, one draw each, in listing order.
    pub fn tick<G: GaussianSource + ?Sized>(&self, market: &mut Market, noise: &mut G) {
        for inst in market.instruments_mut() {
            inst.price = self.step(inst.price, noise.next_gaussian());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ticker;
    use crate::rng::ScriptedNoise;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn three_percent_move() {
        // volatility 0.02 * z 1.5 = +0.03
        let model = PriceModel::default();
        assert!(approx(model.step(100.0, 1.5), 103.0));
    }

    #[test]
    fn zero_draw_leaves_price_unchanged() {
        assert_eq!(PriceModel::default().step(135.0, 0.0), 135.0);
    }

    #[test]
    fn crash_is_floored() {
        // 1 + 0.02 * -60 = -0.2, price would go negative
        let model = PriceModel::default();
        assert_eq!(model.step(100.0, -60.0), 0.5);
        // already at the floor, any down move stays there
        assert_eq!(model.step(0.5, -1.0), 0.5);
    }

    #[test]
    fn drift_shifts_the_multiplier() {
        let model = PriceModel {
            drift: 0.01,
            ..PriceModel::default()
        };
        assert!(approx(model.step(200.0, 0.0), 202.0));
    }

    #[test]
    fn tick_moves_every_instrument_in_order() {
        let mut market = Market::default_listing();
        let mut noise = ScriptedNoise::new(vec![1.5, 0.0, -1.5, 0.0, 0.0]);
        PriceModel::default().tick(&mut market, &mut noise);

        let price = |t: &str| market.get(&Ticker::new(t)).unwrap().price();
        assert!(approx(price("AAPL"), 180.0 * 1.03));
        assert_eq!(price("GOOG"), 135.0);
        assert!(approx(price("AMZN"), 150.0 * 0.97));
        assert_eq!(price("TSLA"), 220.0);
    }

    #[test]
    fn prices_stay_positive_over_many_bad_days() {
        let mut market = Market::default_listing();
        let mut noise = ScriptedNoise::constant(-10.0);
        let model = PriceModel::default();
        for _ in 0..100 {
            model.tick(&mut market, &mut noise);
        }
        assert!(market.instruments().iter().all(|i| i.price() >= 0.5));
    }
}
