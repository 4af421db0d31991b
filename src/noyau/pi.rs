// src/noyau/pi.rs
//
// π par Machin : π = 16·atan(1/5) - 4·atan(1/239)
//
// atan(x) = x - x^3/3 + x^5/5 - … passe par le moteur de séries
// (facteurs (-1)^n/(2n+1), puissances impaires x^(2n+1)).
// Le cache garde la valeur la plus précise déjà calculée.

use num_bigint::BigInt;
use std::sync::{Mutex, OnceLock};

use tracing::debug;

use super::decimal::{Decimal, Precision};
use super::erreur::{ErreurNoyau, Resultat};
use super::puissance::PowerTwoNPlusOneIterator;
use super::rationnel::Rational;
use super::serie::{SeriesCalculator, SeriesFactors};

/* ------------------------ Facteurs (-1)^n/(2n+1) ------------------------ */

pub struct AtanFactors {
    n: u64,
}

impl AtanFactors {
    pub fn new() -> Self {
        Self { n: 0 }
    }
}

impl Default for AtanFactors {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesFactors for AtanFactors {
    type PowerIter = PowerTwoNPlusOneIterator;

    fn current_factor(&self) -> Rational {
        let signe = if self.n % 2 == 0 { 1 } else { -1 };
        // 2n+1 > 0 : toujours constructible
        Rational::of(BigInt::from(signe), BigInt::from(2 * self.n + 1))
            .unwrap_or_else(|_| Rational::zero().clone())
    }

    fn advance_factor(&mut self) {
        self.n += 1;
    }

    fn create_power_iterator(x: &Decimal, precision: Precision) -> PowerTwoNPlusOneIterator {
        PowerTwoNPlusOneIterator::new(x, precision)
    }
}

static ATAN_SERIES: OnceLock<SeriesCalculator<AtanFactors>> = OnceLock::new();

pub struct AtanSeries;

impl AtanSeries {
    pub fn instance() -> &'static SeriesCalculator<AtanFactors> {
        ATAN_SERIES.get_or_init(|| SeriesCalculator::new(AtanFactors::new()))
    }

    /// atan(x) pour |x| < 1 (converge d’autant plus vite que |x| est petit).
    pub fn calculate(x: &Decimal, precision: Precision) -> Resultat<Decimal> {
        if x.abs() >= Decimal::one() {
            return Err(ErreurNoyau::argument_illegal(format!(
                "atan : série hors domaine (|x| >= 1) : {x}"
            )));
        }
        Ok(Self::instance().calculate(x, precision))
    }
}

/* ------------------------ π (Machin) ------------------------ */

fn atan_inverse(q: i64, travail: Precision) -> Resultat<Decimal> {
    let x = Decimal::from(q).reciprocal(travail)?;
    AtanSeries::calculate(&x, travail)
}

fn pi_machin(precision: Precision) -> Resultat<Decimal> {
    let travail = precision.plus(10);
    let a = atan_inverse(5, travail)?;
    let b = atan_inverse(239, travail)?;
    let pi = &(&Decimal::from(16) * &a) - &(&Decimal::from(4) * &b);
    Ok(pi.round(precision))
}

static PI_CACHE: OnceLock<Mutex<Option<Decimal>>> = OnceLock::new();

/// π à `precision` chiffres significatifs.
pub fn pi(precision: Precision) -> Resultat<Decimal> {
    let m = PI_CACHE.get_or_init(|| Mutex::new(None));
    let mut guard = m.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(v) = guard.as_ref() {
        if precision.chiffres() as u64 <= v.precision() {
            return Ok(v.round(precision));
        }
    }

    let v = pi_machin(precision)?;
    debug!(chiffres = precision.chiffres(), "cache π recalculé");
    *guard = Some(v.clone());
    Ok(v)
}
