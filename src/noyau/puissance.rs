// src/noyau/puissance.rs
//
// Itérateurs de puissances pour les séries : une multiplication par pas,
// toujours sous la même Precision. Un itérateur sert pour UN couple
// (base, précision) : on en crée un neuf à chaque évaluation.

use super::decimal::{Decimal, Precision};

pub trait PowerIterator {
    /// Puissance courante (sans effet de bord).
    fn current_power(&self) -> &Decimal;

    /// Passe à la puissance suivante.
    fn advance(&mut self);
}

/// x^0, x^1, x^2, …
#[derive(Clone, Debug)]
pub struct PowerNIterator {
    x: Decimal,
    precision: Precision,
    power: Decimal,
}

impl PowerNIterator {
    pub fn new(x: &Decimal, precision: Precision) -> Self {
        Self {
            x: x.clone(),
            precision,
            power: Decimal::one(),
        }
    }
}

impl PowerIterator for PowerNIterator {
    fn current_power(&self) -> &Decimal {
        &self.power
    }

    fn advance(&mut self) {
        self.power = self.power.mul_round(&self.x, self.precision);
    }
}

/// x^1, x^3, x^5, … (séries impaires : arctangente)
#[derive(Clone, Debug)]
pub struct PowerTwoNPlusOneIterator {
    x_carre: Decimal,
    precision: Precision,
    power: Decimal,
}

impl PowerTwoNPlusOneIterator {
    pub fn new(x: &Decimal, precision: Precision) -> Self {
        Self {
            x_carre: x.mul_round(x, precision),
            precision,
            power: x.clone(),
        }
    }
}

impl PowerIterator for PowerTwoNPlusOneIterator {
    fn current_power(&self) -> &Decimal {
        &self.power
    }

    fn advance(&mut self) {
        self.power = self.power.mul_round(&self.x_carre, self.precision);
    }
}
