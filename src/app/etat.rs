//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de l’écran (nombre saisi, choix de π, rapport,
//! erreur, outils exacts) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucun calcul ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur les précisions et les indices (anti-gel).

use crate::noyau::{NumerologyReport, PiSource};

/// Précision par défaut des outils (chiffres significatifs).
const DIGITS_DEFAUT: u32 = 20;

/// Garde-fou : on borne la précision.
pub const DIGITS_MAX: u32 = 200;

/// Garde-fou : B(n) au-delà devient lent (somme double en n²).
pub const BERNOULLI_MAX: u32 = 120;

/// Sorties de l’outil rationnel.
#[derive(Clone, Default, Debug)]
pub struct SortieRationnel {
    pub brut: String,
    pub reduit: String,
    pub mixte: String,
    pub decimal: String,
}

#[derive(Clone, Debug)]
pub struct AppNumerologie {
    // --- entrée utilisateur ---
    pub entree: String,
    pub source: PiSource,

    // --- sorties ---
    pub rapport: Option<NumerologyReport>,
    pub erreur: String,

    // --- outils exacts ---
    pub rationnel_entree: String,
    pub rationnel_sortie: Option<SortieRationnel>,
    pub exp_entree: String,
    pub exp_sortie: String,
    pub bernoulli_n: u32,
    pub bernoulli_sortie: String,
    pub erreur_outils: String,

    // --- paramètres ---
    pub digits: u32,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppNumerologie {
    fn default() -> Self {
        Self {
            entree: String::new(),
            source: PiSource::default(),
            rapport: None,
            erreur: String::new(),
            rationnel_entree: String::new(),
            rationnel_sortie: None,
            exp_entree: String::new(),
            exp_sortie: String::new(),
            bernoulli_n: 0,
            bernoulli_sortie: String::new(),
            erreur_outils: String::new(),
            digits: DIGITS_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppNumerologie {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + outils + digits par défaut).
    pub fn reset_total(&mut self) {
        *self = Self::default();
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer rapport + erreur (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.rapport = None;
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// Erreur : l’ancien rapport disparaît (il ne correspond plus à l’entrée).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.rapport = None;
        self.focus_entree = true;
    }

    pub fn set_rapport(&mut self, rapport: NumerologyReport) {
        self.erreur.clear();
        self.rapport = Some(rapport);
        self.focus_entree = true;
    }

    pub fn set_erreur_outils(&mut self, msg: impl Into<String>) {
        self.erreur_outils = msg.into();
    }

    /// Garde-fou : précision dans [1, DIGITS_MAX].
    pub fn set_digits(&mut self, digits: u32) {
        self.digits = digits.clamp(1, DIGITS_MAX);
    }

    pub fn set_bernoulli_n(&mut self, n: u32) {
        self.bernoulli_n = n.min(BERNOULLI_MAX);
    }

    /// DEL : un caractère.
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        self.focus_entree = true;
    }

    /// Chiffre tapé au pavé : on ignore tout ce qui dépasserait 3 chiffres.
    pub fn push_chiffre(&mut self, c: char) {
        if c.is_ascii_digit() && self.entree.trim().len() < 3 {
            self.entree.push(c);
        }
        self.focus_entree = true;
    }
}
