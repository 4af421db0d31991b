//! Moteur de séries entières : Σ facteur_i · x^i à une précision donnée.
//!
//! - Les facteurs (rationnels exacts) viennent d’une stratégie `SeriesFactors`
//!   et sont mis en cache : calculés une seule fois, puis partagés entre appels
//!   et entre threads.
//! - Les puissances de x viennent d’un `PowerIterator` neuf à chaque appel
//!   (il dépend de x et de la précision).
//! - Arrêt : dès qu’un terme (ou une paire de termes) tombe sous 10^-(p+1).
//!
//! Pas de garde-fou d’itérations : une stratégie dont les termes ne décroissent
//! pas boucle indéfiniment (limite assumée, c’est à l’appelant de borner).

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace};

use super::decimal::{Decimal, Precision};
use super::puissance::PowerIterator;
use super::rationnel::Rational;

/// Capacités d’une série concrète.
pub trait SeriesFactors: Send {
    type PowerIter: PowerIterator;

    /// Facteur à l’index courant.
    fn current_factor(&self) -> Rational;

    /// Passe au facteur suivant (calcul séquentiel : dépend du précédent).
    fn advance_factor(&mut self);

    /// Itérateur de puissances pour (x, précision).
    fn create_power_iterator(x: &Decimal, precision: Precision) -> Self::PowerIter;
}

struct CacheFacteurs<F> {
    strategie: F,
    facteurs: Vec<Rational>,
}

pub struct SeriesCalculator<F: SeriesFactors> {
    par_paires: bool,
    cache: Mutex<CacheFacteurs<F>>,
}

impl<F: SeriesFactors> SeriesCalculator<F> {
    pub fn new(strategie: F) -> Self {
        Self::with_pairs(strategie, false)
    }

    /// `par_paires` : deux termes par tour, test d’arrêt sur leur somme
    /// (séries dont les termes isolés ne décroissent pas, ex. un sur deux nul).
    pub fn with_pairs(strategie: F, par_paires: bool) -> Self {
        Self {
            par_paires,
            cache: Mutex::new(CacheFacteurs {
                strategie,
                facteurs: Vec::new(),
            }),
        }
    }

    pub fn is_paired(&self) -> bool {
        self.par_paires
    }

    fn verrou(&self) -> MutexGuard<'_, CacheFacteurs<F>> {
        // le cache reste cohérent même après une panique (ajouts seulement)
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Facteur d’index `index`, en complétant le cache au besoin.
    pub fn get_factor(&self, index: usize) -> Rational {
        let mut guard = self.verrou();
        let cache = &mut *guard;

        while cache.facteurs.len() <= index {
            let f = cache.strategie.current_factor();
            cache.facteurs.push(f);
            cache.strategie.advance_factor();
            trace!(taille = cache.facteurs.len(), "cache facteurs étendu");
        }
        cache.facteurs[index].clone()
    }

    /// Nombre de facteurs déjà calculés.
    pub fn cached_factors(&self) -> usize {
        self.verrou().facteurs.len()
    }

    /// Somme de la série en x, arrondie à `precision` chiffres.
    pub fn calculate(&self, x: &Decimal, precision: Precision) -> Decimal {
        self.calculate_with_terms(x, precision).0
    }

    /// Comme `calculate`, avec le nombre de termes consommés.
    pub fn calculate_with_terms(&self, x: &Decimal, precision: Precision) -> (Decimal, usize) {
        let erreur_acceptable = Decimal::ten_pow_neg(precision.chiffres() as i64 + 1);

        let mut puissances = F::create_power_iterator(x, precision);

        let mut somme = Decimal::zero();
        let mut i: usize = 0;

        loop {
            let mut pas = self.terme(i, &mut puissances, precision);
            i += 1;

            if self.par_paires {
                let pas2 = self.terme(i, &mut puissances, precision);
                pas += &pas2;
                i += 1;
            }

            somme += &pas;

            if pas.abs() <= erreur_acceptable {
                break;
            }
        }

        debug!(
            termes = i,
            precision = precision.chiffres(),
            "série convergée"
        );
        (somme.round(precision), i)
    }

    /// facteur.num · x^i / facteur.den, arrondi ; avance l’itérateur.
    fn terme(&self, i: usize, puissances: &mut F::PowerIter, precision: Precision) -> Decimal {
        let facteur = self.get_factor(i);
        let x_puissance = puissances.current_power().clone();
        puissances.advance();

        let produit = &Decimal::from(facteur.numerator()) * &x_puissance;
        produit
            .divide(&Decimal::from(facteur.denominator()), precision)
            // dénominateur d’un Rational : jamais nul
            .unwrap_or_else(|_| Decimal::zero())
    }
}
