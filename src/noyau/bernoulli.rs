// src/noyau/bernoulli.rs
//
// Nombres de Bernoulli exacts + cache.
//
// B(n) = Σ_{k=0..n} 1/(k+1) · Σ_{j=0..k} (-1)^j · C(k,j) · j^n
//
// - Seuls les indices pairs sont stockés (index n/2) ; B(1) = -1/2 et
//   B(impair > 1) = 0 sans calcul.
// - Remplissage séquentiel sous verrou : pas de trou, chaque index calculé une fois.
// - La somme externe sur k est parallèle (rayon) : l’addition rationnelle est
//   associative et commutative, le résultat ne dépend pas de l’ordonnancement.

use std::sync::{Mutex, MutexGuard, OnceLock};

use num_bigint::BigInt;
use rayon::prelude::*;
use tracing::trace;

use super::erreur::{ErreurNoyau, Resultat};
use super::rationnel::Rational;

pub struct BernoulliGenerator {
    cache: Mutex<Vec<Rational>>,
}

impl Default for BernoulliGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BernoulliGenerator {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(Vec::new()),
        }
    }

    fn verrou(&self) -> MutexGuard<'_, Vec<Rational>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// B(n) pour n >= 0 (forme irréductible).
    pub fn bernoulli(&self, n: i64) -> Resultat<Rational> {
        if n < 0 {
            return Err(ErreurNoyau::argument_illegal(format!(
                "bernoulli(n) pour n < 0 : n = {n}"
            )));
        }
        if n == 1 {
            return Rational::from_i64_pair(-1, 2);
        }
        if n % 2 == 1 {
            return Ok(Rational::zero().clone());
        }

        let index = usize::try_from(n / 2)
            .map_err(|_| ErreurNoyau::argument_illegal(format!("bernoulli : n trop grand ({n})")))?;

        let mut cache = self.verrou();
        while cache.len() <= index {
            let m = 2 * cache.len() as u64;
            let b = calculate_bernoulli(m)?;
            trace!(n = m, "bernoulli calculé");
            cache.push(b);
        }
        Ok(cache[index].clone())
    }

    /// Nombre d’entrées (indices pairs) déjà en cache.
    pub fn cached_len(&self) -> usize {
        self.verrou().len()
    }
}

/* ------------------------ Générateur partagé ------------------------ */

static BERNOULLI: OnceLock<BernoulliGenerator> = OnceLock::new();

/// B(n) via le cache du processus.
pub fn bernoulli(n: i64) -> Resultat<Rational> {
    BERNOULLI.get_or_init(BernoulliGenerator::new).bernoulli(n)
}

/* ------------------------ Calcul d’un B(n) ------------------------ */

/// Somme externe en parallèle.
pub fn calculate_bernoulli(n: u64) -> Resultat<Rational> {
    let somme = (0..=n)
        .into_par_iter()
        .map(|k| terme(k, n))
        .try_reduce(|| Rational::zero().clone(), |a, b| Ok(a.add(&b)))?;
    Ok(somme.reduce())
}

/// Même somme, séquentielle (référence).
pub fn calculate_bernoulli_sequential(n: u64) -> Resultat<Rational> {
    let mut somme = Rational::zero().clone();
    for k in 0..=n {
        somme = somme.add(&terme(k, n)?);
    }
    Ok(somme.reduce())
}

/// 1/(k+1) · Σ_{j=0..k} (-1)^j C(k,j) j^n, avec C(k,j) mis à jour pas à pas.
fn terme(k: u64, n: u64) -> Resultat<Rational> {
    let exposant = u32::try_from(n)
        .map_err(|_| ErreurNoyau::argument_illegal(format!("bernoulli : n trop grand ({n})")))?;

    let mut somme_j = Rational::zero().clone();
    let mut bin = Rational::one().clone();

    for j in 0..=k {
        // 0^0 = 1
        let j_puissance_n = BigInt::from(j).pow(exposant);
        let t = bin.multiply_integer(&j_puissance_n);
        somme_j = if j % 2 == 0 {
            somme_j.add(&t)
        } else {
            somme_j.subtract(&t)
        };

        let pas = Rational::from(BigInt::from(k - j)).divide(&Rational::from(BigInt::from(j + 1)))?;
        bin = bin.multiply(&pas);
    }

    // réduit ici : la somme externe reste compacte
    Ok(somme_j.divide_integer(&BigInt::from(k + 1))?.reduce())
}
