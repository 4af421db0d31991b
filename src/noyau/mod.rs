//! Noyau exact Q-pur
//!
//! Organisation interne :
//! - erreur.rs      : ErreurNoyau (thiserror) + Resultat
//! - decimal.rs     : Decimal (coefficient × 10^-échelle) + Precision
//! - rationnel.rs   : Rational non réduit (n/d), parsing, conversions
//! - puissance.rs   : itérateurs de puissances
//! - serie.rs       : moteur de séries + cache de facteurs
//! - exp.rs         : e^x, constante e
//! - pi.rs          : atan, π (Machin) + cache
//! - bernoulli.rs   : nombres de Bernoulli + cache
//! - numerologie.rs : le calcul de l’application

pub mod bernoulli;
pub mod decimal;
pub mod erreur;
pub mod exp;
pub mod numerologie;
pub mod pi;
pub mod puissance;
pub mod rationnel;
pub mod serie;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use bernoulli::{bernoulli, BernoulliGenerator};
pub use decimal::{Decimal, Precision};
pub use erreur::{ErreurNoyau, Resultat};
pub use exp::{e, exp, exp_rational, ExpSeries};
pub use numerologie::{find, NumerologyReport, PiSource};
pub use pi::pi;
pub use rationnel::{NumericConversion, Rational};
pub use serie::{SeriesCalculator, SeriesFactors};
