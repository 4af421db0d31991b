// src/noyau/numerologie.rs
//
// Numérologie d’un nombre n (1..=999) :
//
// 1) P = n premières décimales de π (ou la chaîne fixe « 1814666323 »)
// 2) E = n premières décimales de e ; dernier chiffre >= 5 => décrémenté
// 3) K = P + E (entiers)
// 4) compte des « premiers » parmi les fenêtres de 2 puis de 3 chiffres de K
//    (aucun diviseur dans 2..=v/2 : 0 et 1 passent)
// 5) produit, puis somme des chiffres tant que > 9 ; 0 devient 1

use num_bigint::BigInt;
use tracing::{debug, info};

use super::decimal::{Decimal, Precision};
use super::erreur::{ErreurNoyau, Resultat};
use super::exp::e;
use super::pi::pi;

pub const NOMBRE_MIN: u32 = 1;
pub const NOMBRE_MAX: u32 = 999;

/// Décimales “statiques” de π (option « dernière valeur »).
pub const PI_FIXE: &str = "1814666323";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PiSource {
    /// n premières décimales de π
    #[default]
    FirstDigits,
    /// chaîne fixe `PI_FIXE`
    FixedLastDigits,
}

impl PiSource {
    pub fn label(self) -> &'static str {
        match self {
            PiSource::FirstDigits => "π : premières décimales",
            PiSource::FixedLastDigits => "π : dernière valeur (statique)",
        }
    }
}

/// Toutes les étapes du calcul, pour l’affichage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumerologyReport {
    pub nombre: u32,
    pub source: PiSource,
    pub pi_digits: String,
    pub e_digits: String,
    pub k: BigInt,
    pub two_digit_primes: Vec<u32>,
    pub three_digit_primes: Vec<u32>,
    pub product: u64,
    pub result: u32,
}

/// Calcul complet pour `nombre` dans [NOMBRE_MIN, NOMBRE_MAX].
pub fn find(nombre: u32, source: PiSource) -> Resultat<NumerologyReport> {
    if !(NOMBRE_MIN..=NOMBRE_MAX).contains(&nombre) {
        return Err(ErreurNoyau::argument_illegal(format!(
            "nombre hors bornes ({NOMBRE_MIN}..={NOMBRE_MAX}) : {nombre}"
        )));
    }

    // n décimales = n + 1 chiffres significatifs (un chiffre avant la virgule)
    let precision = Precision::new(nombre + 1)?;

    let pi_digits = match source {
        PiSource::FirstDigits => decimales(&pi(precision)?, nombre)?,
        PiSource::FixedLastDigits => PI_FIXE.to_string(),
    };
    let e_digits = decrementer_dernier(decimales(&e(precision)?, nombre)?);
    debug!(%pi_digits, %e_digits, "décimales");

    let k = entier(&pi_digits)? + entier(&e_digits)?;
    let k_texte = k.to_str_radix(10);

    let two_digit_primes = fenetres_premieres(&k_texte, 2);
    let three_digit_primes = fenetres_premieres(&k_texte, 3);
    let product = two_digit_primes.len() as u64 * three_digit_primes.len() as u64;

    let mut result = reduire_chiffres(product);
    if result == 0 {
        result = 1;
    }

    info!(
        nombre,
        ?source,
        deux = two_digit_primes.len(),
        trois = three_digit_primes.len(),
        product,
        result,
        "numérologie"
    );

    Ok(NumerologyReport {
        nombre,
        source,
        pi_digits,
        e_digits,
        k,
        two_digit_primes,
        three_digit_primes,
        product,
        result,
    })
}

/* ------------------------ Étapes ------------------------ */

/// Les `n` chiffres après la virgule de `v` (arrondi demi-haut à l’échelle n).
fn decimales(v: &Decimal, n: u32) -> Resultat<String> {
    let texte = v.with_scale(n as i64).to_string();
    texte
        .split_once('.')
        .map(|(_, f)| f.to_string())
        .ok_or_else(|| ErreurNoyau::analyse(texte.clone()))
}

/// Dernier chiffre >= 5 : on retire un (annule l’arrondi vers le haut).
fn decrementer_dernier(mut chiffres: String) -> String {
    if let Some(dernier) = chiffres.pop() {
        let c = match dernier.to_digit(10) {
            Some(d) if d >= 5 => char::from_digit(d - 1, 10).unwrap_or(dernier),
            _ => dernier,
        };
        chiffres.push(c);
    }
    chiffres
}

fn entier(chiffres: &str) -> Resultat<BigInt> {
    BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurNoyau::analyse(chiffres.to_string()))
}

/// Fenêtres glissantes de `largeur` chiffres retenues par `is_prime` (dans l’ordre).
/// « 07 » vaut 7, « 01 » vaut 1.
fn fenetres_premieres(chiffres: &str, largeur: usize) -> Vec<u32> {
    chiffres
        .as_bytes()
        .windows(largeur)
        .filter_map(|w| {
            let v = w
                .iter()
                .try_fold(0u32, |acc, b| (*b as char).to_digit(10).map(|d| acc * 10 + d))?;
            is_prime(v).then_some(v)
        })
        .collect()
}

/// Crible de l’application : aucun diviseur dans 2..=n/2.
/// 0 et 1 n’en ont aucun et sont donc retenus ; le résultat en dépend.
pub fn is_prime(n: u32) -> bool {
    (2..=n / 2).all(|d| n % d != 0)
}

/// Somme des chiffres répétée jusqu’à un seul chiffre.
pub fn reduire_chiffres(mut n: u64) -> u32 {
    while n > 9 {
        let mut s = 0;
        while n > 0 {
            s += n % 10;
            n /= 10;
        }
        n = s;
    }
    n as u32
}
