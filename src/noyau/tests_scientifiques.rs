//! Tests scientifiques (campagne) : invariants entre modules + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global (large : les builds de test ne sont pas optimisés)
//! - précisions bornées
//! - tailles bornées (indices de Bernoulli, nombre de décimales)

use std::time::{Duration, Instant};

use super::bernoulli::{bernoulli, calculate_bernoulli_sequential};
use super::decimal::{Decimal, Precision};
use super::exp::{e, exp, ExpSeries};
use super::numerologie::{find, PiSource};
use super::pi::pi;
use super::rationnel::Rational;

fn p(n: u32) -> Precision {
    Precision::new(n).unwrap()
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Rationnel : égalité brute vs valeur ------------------------ */

#[test]
fn sci_egalite_brute_assumee() {
    // 2/4 et 1/2 : même valeur, représentations différentes
    let a = Rational::from_i64_pair(2, 4).unwrap();
    let b = Rational::from_i64_pair(1, 2).unwrap();
    assert_ne!(a, b);
    assert!(a.same_value(&b));
    assert_eq!(a.reduce(), b);

    // l’accumulation ne réduit pas : le dénominateur grossit
    let tiers = Rational::from_i64_pair(1, 3).unwrap();
    let somme = tiers.add(&Rational::from_i64_pair(1, 6).unwrap());
    assert_eq!(somme.to_rational_string(), "9/18");
    assert_eq!(somme.reduce().to_rational_string(), "1/2");
}

#[test]
fn sci_periodique_et_chaine() {
    // 0.(3) = 1/3 ; 0.1(6) = 1/6 ; 1/2/3 = 1/6
    assert!(Rational::parse("0.(3)")
        .unwrap()
        .same_value(&Rational::from_i64_pair(1, 3).unwrap()));
    assert!(Rational::parse("0.1(6)")
        .unwrap()
        .same_value(&Rational::from_i64_pair(1, 6).unwrap()));
    assert!(Rational::parse("1/2/3")
        .unwrap()
        .same_value(&Rational::parse("0.1(6)").unwrap()));
    // 1.5e-3 = 3/2000
    assert!(Rational::parse("1.5e-3")
        .unwrap()
        .same_value(&Rational::from_i64_pair(3, 2000).unwrap()));
}

/* ------------------------ Séries : e^x depuis un rationnel ------------------------ */

#[test]
fn sci_exp_depuis_rationnel() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    // x = 1/3 converti en décimal, e^x · e^-x = 1
    let x = Rational::from_i64_pair(1, 3).unwrap().to_decimal(p(40));
    let a = exp(&x, p(35)).unwrap();
    let b = exp(&-&x, p(35)).unwrap();
    budget(t0, max);

    let produit = a.mul_round(&b, p(40));
    assert!((&produit - &Decimal::one()).abs() <= Decimal::ten_pow_neg(32));
}

#[test]
fn sci_serie_brute_vs_reduite() {
    let x = d("0.75");
    let brute = ExpSeries::calculate(&x, p(30));
    let reduite = exp(&x, p(30)).unwrap();
    assert!((&brute - &reduite).abs() <= Decimal::ten_pow_neg(28));
}

#[test]
fn sci_cache_facteurs_monotone() {
    let serie = ExpSeries::instance();
    let _ = ExpSeries::calculate(&d("0.5"), p(20));
    let avant = serie.cached_factors();
    // moins précis : aucun nouveau facteur
    let _ = ExpSeries::calculate(&d("0.5"), p(10));
    assert!(serie.cached_factors() >= avant);
    // plus précis : le cache grandit (ou était déjà assez grand)
    let _ = ExpSeries::calculate(&d("0.5"), p(60));
    assert!(serie.cached_factors() >= avant);
}

/* ------------------------ Constantes : cohérence des caches ------------------------ */

#[test]
fn sci_constantes_coherentes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let pi_200 = pi(p(200)).unwrap();
    let e_200 = e(p(200)).unwrap();
    budget(t0, max);

    // plus court : préfixe arrondi de la valeur longue
    assert_eq!(pi(p(30)).unwrap(), pi_200.round(p(30)));
    assert_eq!(e(p(30)).unwrap(), e_200.round(p(30)));
}

/* ------------------------ Bernoulli : signes + référence séquentielle ------------------------ */

#[test]
fn sci_bernoulli_signes_alternes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(20);

    // B(2k) : signe (-1)^(k+1)
    for k in 1..=15i64 {
        let b = bernoulli(2 * k).unwrap();
        let attendu = if k % 2 == 1 { 1 } else { -1 };
        assert_eq!(b.signum(), attendu, "B({})", 2 * k);
        budget(t0, max);
    }
}

#[test]
fn sci_bernoulli_parallele_vs_sequentiel() {
    let t0 = Instant::now();
    let max = Duration::from_secs(20);

    for n in [14i64, 18, 22] {
        let cache = bernoulli(n).unwrap();
        let seq = calculate_bernoulli_sequential(n as u64).unwrap();
        assert_eq!(cache, seq, "B({n})");
        budget(t0, max);
    }
}

/* ------------------------ Numérologie : bornes hautes ------------------------ */

#[test]
fn sci_numerologie_999() {
    let t0 = Instant::now();
    let max = Duration::from_secs(60);

    let r = find(999, PiSource::FirstDigits).unwrap();
    assert_eq!(r.pi_digits.len(), 999);
    assert_eq!(r.e_digits.len(), 999);
    assert_eq!(r.two_digit_primes.len(), 285);
    assert_eq!(r.three_digit_primes.len(), 188);
    assert_eq!(r.product, 53580);
    assert_eq!(r.result, 3);
    budget(t0, max);

    // même calcul, π fixe : les caches servent
    let f = find(999, PiSource::FixedLastDigits).unwrap();
    assert_eq!(f.product, 45672);
    assert_eq!(f.result, 6);
    budget(t0, max);
}

#[test]
fn sci_numerologie_deterministe() {
    let a = find(42, PiSource::FirstDigits).unwrap();
    let b = find(42, PiSource::FirstDigits).unwrap();
    assert_eq!(a, b);
    assert!((1..=9).contains(&a.result));
}
