// src/noyau/exp.rs
//
// Exponentielle : série de Taylor Σ x^n / n! sur le moteur générique.
//
// - ExpSeries::calculate(x, p) : la série brute (converge vite pour |x| petit).
// - exp(x, p)                  : réduction d’argument (x/256 puis ^256,
//                                partie entière séparée) : utilisable pour |x| grand.
// - exp_rational(x, p)         : idem depuis un rationnel exact.
// - e(p)                       : constante e + cache (valeur la plus précise).

use num_bigint::BigInt;
use num_traits::One;
use std::sync::{Mutex, OnceLock};

use tracing::debug;

use super::decimal::{nombre_chiffres, Decimal, Precision};
use super::erreur::{ErreurNoyau, Resultat};
use super::puissance::PowerNIterator;
use super::rationnel::Rational;
use super::serie::{SeriesCalculator, SeriesFactors};

/* ------------------------ Facteurs 1/n! ------------------------ */

/// Garde n! (>= 1, jamais nul) et rend 1/n! à la demande.
pub struct ExpFactors {
    n: u64,
    factorielle: BigInt,
}

impl ExpFactors {
    pub fn new() -> Self {
        Self {
            n: 0,
            factorielle: BigInt::one(),
        }
    }
}

impl Default for ExpFactors {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesFactors for ExpFactors {
    type PowerIter = PowerNIterator;

    fn current_factor(&self) -> Rational {
        Rational::normalise(BigInt::one(), self.factorielle.clone())
    }

    fn advance_factor(&mut self) {
        self.n += 1;
        self.factorielle *= self.n;
    }

    fn create_power_iterator(x: &Decimal, precision: Precision) -> PowerNIterator {
        PowerNIterator::new(x, precision)
    }
}

/* ------------------------ Série partagée ------------------------ */

static EXP_SERIES: OnceLock<SeriesCalculator<ExpFactors>> = OnceLock::new();

pub struct ExpSeries;

impl ExpSeries {
    /// Instance unique : son cache de facteurs sert à tous les appels.
    pub fn instance() -> &'static SeriesCalculator<ExpFactors> {
        EXP_SERIES.get_or_init(|| SeriesCalculator::new(ExpFactors::new()))
    }

    /// e^x par la série brute.
    pub fn calculate(x: &Decimal, precision: Precision) -> Decimal {
        Self::instance().calculate(x, precision)
    }
}

/* ------------------------ exp avec réduction d’argument ------------------------ */

/// e^x à `precision` chiffres significatifs, pour tout x.
///
/// |x| < 1 : e^x = (e^(x/256))^256.
/// Sinon   : x = i + f, e^x = (e^(1 + f/i))^i.
pub fn exp(x: &Decimal, precision: Precision) -> Resultat<Decimal> {
    if x.is_zero() {
        return Ok(Decimal::one());
    }

    let entier = x.integral_part();
    if entier.is_zero() {
        return exp_taylor(x, precision);
    }

    let i = entier
        .to_i64()
        .ok_or_else(|| ErreurNoyau::argument_illegal("exp : argument hors bornes"))?;

    // t^i multiplie l’erreur relative de t par |i| : autant de chiffres de garde
    let travail = precision.plus(10 + chiffres_entiers(i.unsigned_abs()));
    let fraction = x.fractional_part();
    let z = &Decimal::one() + &fraction.divide(&entier, travail)?;
    let t = exp_taylor(&z, travail)?;

    Ok(t.pow_integer(i, travail)?.round(precision))
}

/// e^x pour x rationnel.
///
/// L’erreur absolue sur x devient une erreur relative sur e^x : la conversion
/// garde 10 chiffres de plus que la partie entière n’en consomme.
pub fn exp_rational(x: &Rational, precision: Precision) -> Resultat<Decimal> {
    let entier = x.numerator() / x.denominator();
    let garde = u32::try_from(nombre_chiffres(&entier)).unwrap_or(u32::MAX);
    let decimal = x.to_decimal(precision.plus(10).plus(garde));
    exp(&decimal, precision)
}

fn chiffres_entiers(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |l| l + 1)
}

fn exp_taylor(x: &Decimal, precision: Precision) -> Resultat<Decimal> {
    let travail = precision.plus(6);
    let reduit = x.divide(&Decimal::from(256), travail)?;
    let serie = ExpSeries::calculate(&reduit, travail);
    Ok(serie.pow_integer(256, travail)?.round(precision))
}

/* ------------------------ Constante e + cache ------------------------ */

static E_CACHE: OnceLock<Mutex<Option<Decimal>>> = OnceLock::new();

/// e à `precision` chiffres ; le cache garde la valeur la plus précise vue.
pub fn e(precision: Precision) -> Resultat<Decimal> {
    let m = E_CACHE.get_or_init(|| Mutex::new(None));
    let mut guard = m.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(v) = guard.as_ref() {
        if precision.chiffres() as u64 <= v.precision() {
            return Ok(v.round(precision));
        }
    }

    let v = exp(&Decimal::one(), precision)?;
    debug!(chiffres = precision.chiffres(), "cache e recalculé");
    *guard = Some(v.clone());
    Ok(v)
}
