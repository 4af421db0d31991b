//! Erreurs du noyau exact.
//!
//! Trois familles seulement, toutes remontées telles quelles à l’appelant
//! (pas de reprise locale) : l’UI décide du message à afficher.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    /// Dénominateur nul, ou division par une valeur nulle.
    #[error("division par zéro")]
    DivisionParZero,

    /// Littéral numérique mal formé (y compris infini / NaN).
    #[error("nombre invalide: {0}")]
    Analyse(String),

    /// Argument hors domaine (bernoulli(n<0), précision nulle, etc.).
    #[error("argument illégal: {0}")]
    ArgumentIllegal(String),
}

impl ErreurNoyau {
    pub fn analyse(msg: impl Into<String>) -> Self {
        Self::Analyse(msg.into())
    }

    pub fn argument_illegal(msg: impl Into<String>) -> Self {
        Self::ArgumentIllegal(msg.into())
    }
}

pub type Resultat<T> = std::result::Result<T, ErreurNoyau>;
