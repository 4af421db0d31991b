// src/noyau/decimal.rs
//
// Décimal à précision arbitraire : valeur = coefficient × 10^(-echelle).
//
// - Addition / soustraction / multiplication : EXACTES (aucun arrondi).
// - Division : toujours sous une Precision (chiffres significatifs).
// - Arrondi : demi-haut (half-up), éloigné de zéro. Aucun autre mode.
// - L’échelle voyage avec la valeur (pas d’entier “scalé” fixé par l’appelant).

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use super::erreur::{ErreurNoyau, Resultat};

/* ------------------------ Précision ------------------------ */

/// Nombre de chiffres significatifs conservés par une opération arrondie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision(u32);

impl Precision {
    /// Refuse 0 : une précision “illimitée” ferait boucler les séries.
    pub fn new(chiffres: u32) -> Resultat<Self> {
        if chiffres == 0 {
            return Err(ErreurNoyau::argument_illegal(
                "précision illimitée non supportée",
            ));
        }
        Ok(Self(chiffres))
    }

    pub fn chiffres(self) -> u32 {
        self.0
    }

    /// Marge de travail interne (chiffres de garde).
    pub fn plus(self, extra: u32) -> Self {
        Self(self.0.saturating_add(extra))
    }
}

/* ------------------------ Outils entiers ------------------------ */

pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// 10^k pour un écart d’échelles ou un compte de chiffres.
///
/// # Panics
/// Si k dépasse u32::MAX : 10^k ne tiendrait pas en mémoire, et tronquer
/// l’exposant donnerait une valeur fausse.
pub(crate) fn pow10_ecart(k: u64) -> BigInt {
    match u32::try_from(k) {
        Ok(k) => pow10(k),
        Err(_) => panic!("écart d’échelles hors bornes : 10^{k}"),
    }
}

/// Nombre de chiffres décimaux de |n| (0 compte pour 1).
///
/// Estimation par la longueur binaire, puis correction d’au plus un chiffre.
pub(crate) fn nombre_chiffres(n: &BigInt) -> u64 {
    if n.is_zero() {
        return 1;
    }
    let estimation = (n.bits() as f64 * std::f64::consts::LOG10_2) as u64 + 1;
    if estimation > 1 && pow10_ecart(estimation - 1) > n.abs() {
        estimation - 1
    } else {
        estimation
    }
}

/* ------------------------ Decimal ------------------------ */

/// Borne des échelles acceptées à la lecture : |échelle| <= i32::MAX,
/// si bien que l’écart entre deux échelles lues tient dans un u32.
pub(crate) const ECHELLE_MAX: i64 = i32::MAX as i64;

#[derive(Clone, Debug)]
pub struct Decimal {
    coefficient: BigInt,
    echelle: i64,
}

impl Decimal {
    pub fn new(coefficient: BigInt, echelle: i64) -> Self {
        Self {
            coefficient,
            echelle,
        }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }

    /// 10^(-n) : seuil d’erreur acceptable des séries.
    pub fn ten_pow_neg(n: i64) -> Self {
        Self::new(BigInt::one(), n)
    }

    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    pub fn echelle(&self) -> i64 {
        self.echelle
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    pub fn signum(&self) -> i32 {
        if self.coefficient.is_zero() {
            0
        } else if self.coefficient.is_negative() {
            -1
        } else {
            1
        }
    }

    pub fn abs(&self) -> Self {
        Self::new(self.coefficient.abs(), self.echelle)
    }

    /// Nombre de chiffres significatifs du coefficient.
    pub fn precision(&self) -> u64 {
        nombre_chiffres(&self.coefficient)
    }

    /// Arrondi demi-haut à `precision` chiffres significatifs.
    /// Une valeur déjà assez courte est rendue telle quelle (zéros compris).
    pub fn round(&self, precision: Precision) -> Self {
        let p = precision.chiffres() as u64;
        let chiffres = nombre_chiffres(&self.coefficient);
        if chiffres <= p {
            return self.clone();
        }

        let retire = chiffres - p;
        let (q, echelle) = arrondir_magnitude(&self.coefficient.abs(), retire, self.echelle);

        // 9.99…5 -> 10.0… : un chiffre de trop, le dernier est forcément 0
        let (q, echelle) = if nombre_chiffres(&q) > p {
            (q / 10, echelle - 1)
        } else {
            (q, echelle)
        };

        let q = if self.coefficient.is_negative() { -q } else { q };
        Self::new(q, echelle)
    }

    /// Arrondi demi-haut à une échelle fixe (nombre de chiffres après la virgule).
    pub fn with_scale(&self, echelle: i64) -> Self {
        if echelle >= self.echelle {
            let k = echelle.abs_diff(self.echelle);
            return Self::new(&self.coefficient * pow10_ecart(k), echelle);
        }
        let retire = self.echelle.abs_diff(echelle);
        let (q, e) = arrondir_magnitude(&self.coefficient.abs(), retire, self.echelle);
        let q = if self.coefficient.is_negative() { -q } else { q };
        Self::new(q, e)
    }

    /// Retire les zéros finaux sans descendre sous `echelle_min`.
    pub fn strip_trailing_zeros_to(&self, echelle_min: i64) -> Self {
        if self.coefficient.is_zero() {
            return Self::new(BigInt::zero(), echelle_min.max(0));
        }
        let dix = BigInt::from(10);
        let mut c = self.coefficient.clone();
        let mut e = self.echelle;
        while e > echelle_min {
            let (q, r) = c.div_rem(&dix);
            if !r.is_zero() {
                break;
            }
            c = q;
            e -= 1;
        }
        Self::new(c, e)
    }

    /// Produit arrondi (une multiplication exacte puis un seul arrondi).
    pub fn mul_round(&self, autre: &Decimal, precision: Precision) -> Self {
        (self * autre).round(precision)
    }

    /// Quotient arrondi à `precision` chiffres significatifs.
    ///
    /// Si la division tombe juste, les zéros superflus sont retirés
    /// jusqu’à l’échelle “naturelle” (échelle(a) - échelle(b)).
    pub fn divide(&self, diviseur: &Decimal, precision: Precision) -> Resultat<Self> {
        if diviseur.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        let echelle_naturelle = self.echelle - diviseur.echelle;
        if self.is_zero() {
            return Ok(Self::new(BigInt::zero(), echelle_naturelle.max(0)));
        }

        // assez de chiffres pour que le quotient tronqué en ait au moins p + 2
        let p = precision.chiffres() as i64;
        let decalage = (p + 3 + nombre_chiffres(&diviseur.coefficient) as i64
            - nombre_chiffres(&self.coefficient) as i64)
            .max(0);

        let numerateur = &self.coefficient * pow10_ecart(decalage.unsigned_abs());
        let (q, r) = numerateur.div_rem(&diviseur.coefficient);

        let arrondi = Self::new(q, echelle_naturelle + decalage).round(precision);
        if r.is_zero() {
            Ok(arrondi.strip_trailing_zeros_to(echelle_naturelle))
        } else {
            Ok(arrondi)
        }
    }

    pub fn reciprocal(&self, precision: Precision) -> Resultat<Self> {
        Decimal::one().divide(self, precision)
    }

    /// x^n par carrés successifs, avec 10 chiffres de garde.
    /// n < 0 : inverse de x^|n| (division par zéro si x = 0).
    pub fn pow_integer(&self, exposant: i64, precision: Precision) -> Resultat<Self> {
        let travail = precision.plus(10);

        if exposant < 0 {
            let positif = self.pow_integer_positif(exposant.unsigned_abs(), travail);
            return Ok(positif.reciprocal(travail)?.round(precision));
        }

        Ok(self
            .pow_integer_positif(exposant as u64, travail)
            .round(precision))
    }

    fn pow_integer_positif(&self, exposant: u64, travail: Precision) -> Self {
        let mut y = exposant;
        let mut base = self.clone();
        let mut acc = Decimal::one();

        while y > 0 {
            if (y & 1) == 1 {
                acc = acc.mul_round(&base, travail);
            }
            y >>= 1;
            if y > 0 {
                base = base.mul_round(&base, travail);
            }
        }
        acc
    }

    /// Partie entière (troncature vers zéro).
    pub fn integral_part(&self) -> Self {
        if self.echelle <= 0 {
            return self.clone();
        }
        Self::new(&self.coefficient / pow10_ecart(self.echelle.unsigned_abs()), 0)
    }

    pub fn fractional_part(&self) -> Self {
        self - &self.integral_part()
    }

    /// Partie entière en i64 (None si hors bornes).
    pub fn to_i64(&self) -> Option<i64> {
        let entier = self.integral_part();
        if entier.coefficient.is_zero() {
            Some(0)
        } else if entier.echelle < -18 {
            // |c| × 10^19 et plus : hors de i64
            None
        } else if entier.echelle < 0 {
            (&entier.coefficient * pow10_ecart(entier.echelle.unsigned_abs())).to_i64()
        } else {
            entier.coefficient.to_i64()
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Aligne deux coefficients sur la plus grande échelle.
    fn aligner(&self, autre: &Decimal) -> (BigInt, BigInt, i64) {
        match self.echelle.cmp(&autre.echelle) {
            Ordering::Equal => (
                self.coefficient.clone(),
                autre.coefficient.clone(),
                self.echelle,
            ),
            Ordering::Less => {
                let k = autre.echelle.abs_diff(self.echelle);
                (
                    &self.coefficient * pow10_ecart(k),
                    autre.coefficient.clone(),
                    autre.echelle,
                )
            }
            Ordering::Greater => {
                let k = self.echelle.abs_diff(autre.echelle);
                (
                    self.coefficient.clone(),
                    &autre.coefficient * pow10_ecart(k),
                    self.echelle,
                )
            }
        }
    }

    /// Position du chiffre de tête : |x| ∈ [10^(ordre-1), 10^ordre).
    fn ordre(&self) -> i128 {
        nombre_chiffres(&self.coefficient) as i128 - self.echelle as i128
    }
}

/// |c| / 10^retire arrondi demi-haut ; renvoie (quotient, nouvelle échelle).
fn arrondir_magnitude(magnitude: &BigInt, retire: u64, echelle: i64) -> (BigInt, i64) {
    let nouvelle = echelle.saturating_sub_unsigned(retire);
    // plus de chiffres retirés que présents : le quotient vaut 0 (reste < 10^retire / 2)
    if retire > nombre_chiffres(magnitude) {
        return (BigInt::zero(), nouvelle);
    }
    let diviseur = pow10_ecart(retire);
    let (mut q, r) = magnitude.div_rem(&diviseur);
    if (r << 1) >= diviseur {
        q += 1u32;
    }
    (q, nouvelle)
}

/* ------------------------ Conversions ------------------------ */

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Self::new(n, 0)
    }
}

impl From<&BigInt> for Decimal {
    fn from(n: &BigInt) -> Self {
        Self::new(n.clone(), 0)
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }
}

/// Littéral décimal : signe? chiffres? ('.' chiffres?)? ([eE] signe? chiffres)?
/// (au moins un chiffre avant l’exposant).
impl FromStr for Decimal {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Resultat<Self> {
        let texte = s.trim();
        let invalide = || ErreurNoyau::analyse(texte);

        let (mantisse, exposant) = match texte.find(['e', 'E']) {
            Some(i) => (&texte[..i], Some(&texte[i + 1..])),
            None => (texte, None),
        };

        let (negatif, mantisse) = match mantisse.as_bytes().first() {
            Some(b'-') => (true, &mantisse[1..]),
            Some(b'+') => (false, &mantisse[1..]),
            _ => (false, mantisse),
        };

        let (entier, fraction) = match mantisse.split_once('.') {
            Some((e, f)) => (e, f),
            None => (mantisse, ""),
        };

        let chiffres_ok = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if (entier.is_empty() && fraction.is_empty())
            || !chiffres_ok(entier)
            || !chiffres_ok(fraction)
        {
            return Err(invalide());
        }

        let mut tous = String::with_capacity(entier.len() + fraction.len());
        tous.push_str(entier);
        tous.push_str(fraction);
        let mut coefficient = BigInt::parse_bytes(tous.as_bytes(), 10).ok_or_else(invalide)?;
        if negatif {
            coefficient = -coefficient;
        }

        let mut echelle = i64::try_from(fraction.len()).map_err(|_| invalide())?;
        if let Some(exp) = exposant {
            let e: i64 = exp.parse().map_err(|_| invalide())?;
            echelle = echelle.checked_sub(e).ok_or_else(invalide)?;
        }
        if echelle.abs() > ECHELLE_MAX {
            return Err(invalide());
        }

        Ok(Self::new(coefficient, echelle))
    }
}

/// Écriture “plain” (jamais de notation scientifique).
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chiffres = self.coefficient.magnitude().to_str_radix(10);

        if self.echelle <= 0 {
            if !self.coefficient.is_zero() {
                chiffres.push_str(&"0".repeat(self.echelle.unsigned_abs() as usize));
            }
        } else {
            let e = self.echelle as usize;
            while chiffres.len() <= e {
                chiffres.insert(0, '0');
            }
            chiffres.insert(chiffres.len() - e, '.');
        }

        if self.coefficient.is_negative() {
            write!(f, "-{chiffres}")
        } else {
            write!(f, "{chiffres}")
        }
    }
}

/* ------------------------ Comparaison (par valeur) ------------------------ */

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let signes = self.signum().cmp(&other.signum());
        if signes != Ordering::Equal || self.is_zero() {
            return signes;
        }
        // même signe : l’ordre de grandeur tranche sans aligner (écarts énormes compris)
        let grandeur = self.ordre().cmp(&other.ordre());
        if grandeur != Ordering::Equal {
            return if self.signum() > 0 {
                grandeur
            } else {
                grandeur.reverse()
            };
        }
        let (a, b, _) = self.aligner(other);
        a.cmp(&b)
    }
}

/* ------------------------ Opérateurs exacts ------------------------ */

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let (a, b, e) = self.aligner(rhs);
        Decimal::new(a + b, e)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let (a, b, e) = self.aligner(rhs);
        Decimal::new(a - b, e)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(
            &self.coefficient * &rhs.coefficient,
            self.echelle + rhs.echelle,
        )
    }
}

impl AddAssign<&Decimal> for Decimal {
    fn add_assign(&mut self, rhs: &Decimal) {
        *self = &*self + rhs;
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.coefficient, self.echelle)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.coefficient, self.echelle)
    }
}
