//! Numérologie Q-pur : noyau exact (rationnels, séries, constantes,
//! Bernoulli, numérologie) + écran eframe.

pub mod app;
pub mod noyau;
