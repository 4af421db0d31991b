// src/noyau/rationnel.rs
//
// Rationnel exact NON réduit : (numérateur, dénominateur) en BigInt.
//
// IMPORTANT :
// - Aucune réduction automatique (pas de PGCD à chaque opération : les boucles
//   de séries accumulent beaucoup de termes). reduce() est explicite.
// - `==` et Hash comparent la paire brute : 2/4 != 1/2.
// - compare_to() compare les VALEURS (produit en croix) : 2/4 ~ 1/2.
//   Pas de Ord/PartialOrd : ils devraient coïncider avec ==.
// - Dénominateur jamais nul, jamais négatif ; numérateur nul => 0/1.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

use super::decimal::{nombre_chiffres, pow10, pow10_ecart, Decimal, Precision};
use super::erreur::{ErreurNoyau, Resultat};

/// Précision plancher de `to_decimal_auto()`.
const PRECISION_AUTO_MIN: u32 = 128;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

/* ------------------------ Constantes partagées ------------------------ */

static ZERO: OnceLock<Rational> = OnceLock::new();
static ONE: OnceLock<Rational> = OnceLock::new();
static TWO: OnceLock<Rational> = OnceLock::new();
static TEN: OnceLock<Rational> = OnceLock::new();

impl Rational {
    pub fn zero() -> &'static Rational {
        ZERO.get_or_init(|| Rational::from_integer(BigInt::zero()))
    }

    pub fn one() -> &'static Rational {
        ONE.get_or_init(|| Rational::from_integer(BigInt::one()))
    }

    pub fn two() -> &'static Rational {
        TWO.get_or_init(|| Rational::from_integer(BigInt::from(2)))
    }

    pub fn ten() -> &'static Rational {
        TEN.get_or_init(|| Rational::from_integer(BigInt::from(10)))
    }
}

/* ------------------------ Construction ------------------------ */

impl Rational {
    /// n/d tel quel (pas de réduction). d = 0 => DivisionParZero.
    pub fn of(numerator: BigInt, denominator: BigInt) -> Resultat<Self> {
        if denominator.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        if numerator.is_zero() {
            return Ok(Self::zero().clone());
        }
        Ok(Self::normalise(numerator, denominator))
    }

    /// Chemin interne : le dénominateur est déjà connu non nul.
    pub(crate) fn normalise(numerator: BigInt, denominator: BigInt) -> Self {
        if numerator.is_zero() {
            return Self::from_integer(BigInt::zero());
        }
        if denominator.is_negative() {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    pub fn from_integer(n: BigInt) -> Self {
        Self {
            numerator: n,
            denominator: BigInt::one(),
        }
    }

    pub fn from_i64_pair(numerator: i64, denominator: i64) -> Resultat<Self> {
        Self::of(BigInt::from(numerator), BigInt::from(denominator))
    }

    /// Forme “mixte” : entier ± num/den, le signe suit la partie entière.
    /// Les composantes de la fraction doivent être positives.
    pub fn from_mixed(integer: i64, fraction_num: i64, fraction_den: i64) -> Resultat<Self> {
        if fraction_num < 0 || fraction_den < 0 {
            return Err(ErreurNoyau::argument_illegal(
                "fraction d’un nombre mixte : composantes négatives interdites",
            ));
        }
        let entier = Self::from(integer);
        let fraction = Self::from_i64_pair(fraction_num, fraction_den)?;
        if entier.signum() > 0 {
            Ok(entier.add(&fraction))
        } else {
            Ok(entier.subtract(&fraction))
        }
    }

    /// Valeur exacte d’un flottant, via son écriture décimale la plus courte.
    pub fn from_f64(value: f64) -> Resultat<Self> {
        if value.is_infinite() {
            return Err(ErreurNoyau::analyse("infini"));
        }
        if value.is_nan() {
            return Err(ErreurNoyau::analyse("NaN"));
        }
        if value == 0.0 {
            return Ok(Self::zero().clone());
        }
        let d: Decimal = format!("{value:e}").parse()?;
        Ok(Self::from(&d))
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(BigInt::from(n))
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

/// Conversion exacte : coefficient / 10^echelle.
impl From<&Decimal> for Rational {
    fn from(d: &Decimal) -> Self {
        let c = d.coefficient().clone();
        if d.echelle() <= 0 {
            Self::normalise(c * pow10_ecart(d.echelle().unsigned_abs()), BigInt::one())
        } else {
            Self::normalise(c, pow10_ecart(d.echelle().unsigned_abs()))
        }
    }
}

/// Passerelle vers num-rational (qui, lui, réduit toujours).
impl From<BigRational> for Rational {
    fn from(r: BigRational) -> Self {
        let (n, d) = r.into_raw();
        Self::normalise(n, d)
    }
}

impl Rational {
    pub fn to_big_rational(&self) -> BigRational {
        BigRational::new(self.numerator.clone(), self.denominator.clone())
    }
}

/* ------------------------ Prédicats ------------------------ */

impl Rational {
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// 1 au sens brut (1/1), utilisé par les raccourcis.
    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    pub fn signum(&self) -> i32 {
        if self.numerator.is_zero() {
            0
        } else if self.numerator.is_negative() {
            -1
        } else {
            1
        }
    }

    fn is_integer_brut(&self) -> bool {
        self.denominator.is_one()
    }

    /// Entier au sens de la valeur (6/3 l’est).
    pub fn is_integer(&self) -> bool {
        self.is_integer_brut() || self.numerator.is_multiple_of(&self.denominator)
    }
}

/* ------------------------ Arithmétique ------------------------ */

impl Rational {
    pub fn add(&self, value: &Rational) -> Rational {
        if self.denominator == value.denominator {
            return Self::normalise(&self.numerator + &value.numerator, self.denominator.clone());
        }
        let n = &self.numerator * &value.denominator + &value.numerator * &self.denominator;
        let d = &self.denominator * &value.denominator;
        Self::normalise(n, d)
    }

    pub fn subtract(&self, value: &Rational) -> Rational {
        if self.denominator == value.denominator {
            return Self::normalise(&self.numerator - &value.numerator, self.denominator.clone());
        }
        let n = &self.numerator * &value.denominator - &value.numerator * &self.denominator;
        let d = &self.denominator * &value.denominator;
        Self::normalise(n, d)
    }

    pub fn add_integer(&self, value: &BigInt) -> Rational {
        if value.is_zero() {
            return self.clone();
        }
        Self::normalise(&self.numerator + value * &self.denominator, self.denominator.clone())
    }

    pub fn subtract_integer(&self, value: &BigInt) -> Rational {
        if value.is_zero() {
            return self.clone();
        }
        Self::normalise(&self.numerator - value * &self.denominator, self.denominator.clone())
    }

    pub fn multiply(&self, value: &Rational) -> Rational {
        if self.is_zero() || value.is_zero() {
            return Self::zero().clone();
        }
        if self.is_one() {
            return value.clone();
        }
        if value.is_one() {
            return self.clone();
        }
        Self::normalise(
            &self.numerator * &value.numerator,
            &self.denominator * &value.denominator,
        )
    }

    pub fn multiply_integer(&self, value: &BigInt) -> Rational {
        if self.is_zero() || value.is_zero() {
            return Self::zero().clone();
        }
        if value.is_one() {
            return self.clone();
        }
        Self::normalise(&self.numerator * value, self.denominator.clone())
    }

    pub fn divide(&self, value: &Rational) -> Resultat<Rational> {
        if value.is_one() {
            return Ok(self.clone());
        }
        if value.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        Ok(Self::normalise(
            &self.numerator * &value.denominator,
            &self.denominator * &value.numerator,
        ))
    }

    pub fn divide_integer(&self, value: &BigInt) -> Resultat<Rational> {
        if value.is_one() {
            return Ok(self.clone());
        }
        if value.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        Ok(Self::normalise(
            self.numerator.clone(),
            &self.denominator * value,
        ))
    }

    pub fn reciprocal(&self) -> Resultat<Rational> {
        Self::of(self.denominator.clone(), self.numerator.clone())
    }

    pub fn negate(&self) -> Rational {
        if self.is_zero() {
            return self.clone();
        }
        Self::normalise(-&self.numerator, self.denominator.clone())
    }

    pub fn abs(&self) -> Rational {
        if self.numerator.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    pub fn increment(&self) -> Rational {
        Self::normalise(&self.numerator + &self.denominator, self.denominator.clone())
    }

    pub fn decrement(&self) -> Rational {
        Self::normalise(&self.numerator - &self.denominator, self.denominator.clone())
    }

    /// Partie entière (troncature vers zéro), au même dénominateur.
    pub fn integer_part(&self) -> Rational {
        let reste = &self.numerator % &self.denominator;
        Self::normalise(&self.numerator - reste, self.denominator.clone())
    }

    /// Partie fractionnaire (signe du numérateur), au même dénominateur.
    pub fn fraction_part(&self) -> Rational {
        Self::normalise(&self.numerator % &self.denominator, self.denominator.clone())
    }

    /// x^n ; x^0 = 1 toujours (0^0 compris). n < 0 : inverse élevé à |n|.
    pub fn pow(&self, exponent: i32) -> Resultat<Rational> {
        if exponent == 0 {
            return Ok(Self::one().clone());
        }
        if exponent == 1 {
            return Ok(self.clone());
        }
        let k = exponent.unsigned_abs();
        let n = self.numerator.pow(k);
        let d = self.denominator.pow(k);
        if exponent > 0 {
            Ok(Self::normalise(n, d))
        } else {
            Self::of(d, n)
        }
    }

    /// Forme irréductible (PGCD sur les entiers sous-jacents).
    pub fn reduce(&self) -> Rational {
        let pgcd = self.numerator.gcd(&self.denominator);
        if pgcd.is_one() || pgcd.is_zero() {
            return self.clone();
        }
        Self::normalise(&self.numerator / &pgcd, &self.denominator / &pgcd)
    }

    /// Comparaison par valeur (produit en croix, dénominateurs > 0).
    pub fn compare_to(&self, other: &Rational) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }
        (&self.numerator * &other.denominator).cmp(&(&self.denominator * &other.numerator))
    }

    /// Égalité de valeur (contrairement à `==`, qui compare la représentation).
    pub fn same_value(&self, other: &Rational) -> bool {
        self.compare_to(other) == Ordering::Equal
    }

    pub fn min<'a>(&'a self, other: &'a Rational) -> &'a Rational {
        if self.compare_to(other) != Ordering::Greater {
            self
        } else {
            other
        }
    }

    pub fn max<'a>(&'a self, other: &'a Rational) -> &'a Rational {
        if self.compare_to(other) != Ordering::Less {
            self
        } else {
            other
        }
    }

    /// Plus petit d’une liste (0 si vide).
    pub fn min_of(values: &[Rational]) -> Rational {
        match values.split_first() {
            None => Self::zero().clone(),
            Some((premier, reste)) => reste.iter().fold(premier, |acc, v| acc.min(v)).clone(),
        }
    }

    /// Plus grand d’une liste (0 si vide).
    pub fn max_of(values: &[Rational]) -> Rational {
        match values.split_first() {
            None => Self::zero().clone(),
            Some((premier, reste)) => reste.iter().fold(premier, |acc, v| acc.max(v)).clone(),
        }
    }
}

/* ------------------------ Décimal ------------------------ */

impl Rational {
    /// n/d arrondi à `precision` chiffres significatifs.
    pub fn to_decimal(&self, precision: Precision) -> Decimal {
        // dénominateur jamais nul : la division ne peut pas échouer
        Decimal::from(&self.numerator)
            .divide(&Decimal::from(&self.denominator), precision)
            .unwrap_or_else(|_| Decimal::zero())
    }

    /// Précision “sans perte” pour les tailles usuelles :
    /// chiffres(n) + chiffres(d), jamais moins de 128.
    pub fn to_decimal_auto(&self) -> Decimal {
        let chiffres = nombre_chiffres(&self.numerator) + nombre_chiffres(&self.denominator);
        let p = (chiffres.min(u32::MAX as u64) as u32).max(PRECISION_AUTO_MIN);
        // p >= 128 : jamais nul
        match Precision::new(p) {
            Ok(precision) => self.to_decimal(precision),
            Err(_) => Decimal::zero(),
        }
    }

    /// Rationnel reconstruit depuis la valeur arrondie à `precision` chiffres.
    pub fn with_precision(&self, precision: Precision) -> Rational {
        Self::from(&self.to_decimal(precision))
    }

    /// Rationnel reconstruit depuis la valeur arrondie à `echelle` décimales.
    pub fn with_scale(&self, echelle: i64) -> Rational {
        Self::from(&self.to_decimal_auto().with_scale(echelle))
    }
}

/* ------------------------ Conversions numériques ------------------------ */

/// Conversions “Number” : entier tronqué, décimal, flottant.
pub trait NumericConversion {
    fn to_integer(&self) -> Option<i64>;
    fn to_decimal_value(&self) -> Decimal;
    fn to_f64(&self) -> f64;
}

impl NumericConversion for Rational {
    fn to_integer(&self) -> Option<i64> {
        (&self.numerator / &self.denominator).to_i64()
    }

    fn to_decimal_value(&self) -> Decimal {
        self.to_decimal_auto()
    }

    fn to_f64(&self) -> f64 {
        self.to_decimal_auto().to_f64()
    }
}

/* ------------------------ Texte ------------------------ */

impl Rational {
    /// "n" ou "n/d" (représentation brute, sans réduction).
    pub fn to_rational_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        if self.is_integer_brut() {
            return self.numerator.to_string();
        }
        format!("{}/{}", self.numerator, self.denominator)
    }

    /// Forme mixte : "i", "n/d" ou "i n/d".
    pub fn to_mixed_string(&self) -> String {
        let (entier, reste) = self.numerator.div_rem(&self.denominator);

        let mut out = String::new();
        if !entier.is_zero() {
            out.push_str(&entier.to_string());
        }
        if !reste.is_zero() {
            if out.is_empty() {
                out.push_str(&reste.to_string());
            } else {
                out.push(' ');
                out.push_str(&reste.abs().to_string());
            }
            out.push('/');
            out.push_str(&self.denominator.to_string());
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

/// "0", entier brut, sinon développement décimal (précision auto).
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.is_integer_brut() {
            return write!(f, "{}", self.numerator);
        }
        write!(f, "{}", self.to_decimal_auto())
    }
}

/* ------------------------ Lecture ------------------------ */

impl Rational {
    /// "a/b/c/…" : chaque morceau est un littéral, divisions de gauche à droite.
    pub fn parse(texte: &str) -> Resultat<Rational> {
        let mut morceaux = texte.split('/');
        let premier = morceaux.next().unwrap_or_default();
        let mut acc = Self::parse_literal(premier)?;
        for m in morceaux {
            let diviseur = Self::parse_literal(m)?;
            acc = acc.divide(&diviseur)?;
        }
        Ok(acc)
    }

    /// Un littéral : signe? entier? ('.' fraction?)? ('(' répétition ')')? ([eE] signe? exposant)?
    fn parse_literal(texte: &str) -> Resultat<Rational> {
        let s = texte.trim();
        let invalide = || ErreurNoyau::analyse(s);
        let octets = s.as_bytes();
        let mut i = 0usize;

        let chiffres = |debut: usize| -> usize {
            let mut j = debut;
            while j < octets.len() && octets[j].is_ascii_digit() {
                j += 1;
            }
            j
        };

        let mut positif = true;
        if i < octets.len() && (octets[i] == b'+' || octets[i] == b'-') {
            positif = octets[i] == b'+';
            i += 1;
        }

        let fin = chiffres(i);
        let entier = &s[i..fin];
        i = fin;

        let mut fraction = "";
        if i < octets.len() && octets[i] == b'.' {
            let fin = chiffres(i + 1);
            fraction = &s[i + 1..fin];
            i = fin;
        }

        let mut repetition = "";
        if i < octets.len() && octets[i] == b'(' {
            let fin = chiffres(i + 1);
            if fin == i + 1 || fin >= octets.len() || octets[fin] != b')' {
                return Err(invalide());
            }
            repetition = &s[i + 1..fin];
            i = fin + 1;
        }

        let mut exposant = "";
        if i < octets.len() && (octets[i] == b'e' || octets[i] == b'E') {
            let debut = i + 1;
            let mut j = debut;
            if j < octets.len() && (octets[j] == b'+' || octets[j] == b'-') {
                j += 1;
            }
            let fin = chiffres(j);
            if fin == j {
                return Err(invalide());
            }
            exposant = &s[debut..fin];
            i = fin;
        }

        if i != octets.len() || (entier.is_empty() && fraction.is_empty() && repetition.is_empty()) {
            return Err(invalide());
        }

        Self::from_parts(positif, entier, fraction, repetition, exposant)
    }

    /// Forme structurée : signe, partie entière, fraction, fraction périodique, exposant.
    ///
    /// La période vaut répétition / (10^len - 1), décalée derrière la fraction :
    /// 0.1(6) = (1 + 6/9) / 10 = 1/6.
    pub fn from_parts(
        positive: bool,
        integer_part: &str,
        fraction_part: &str,
        fraction_repeat_part: &str,
        exponent_part: &str,
    ) -> Resultat<Rational> {
        let entier_de = |t: &str| {
            BigInt::parse_bytes(t.as_bytes(), 10).ok_or_else(|| ErreurNoyau::analyse(t))
        };
        // 10^len pour une longueur de texte : au-delà de u32, refusé
        let dix_puissance = |t: &str| {
            u32::try_from(t.len())
                .map(pow10)
                .map_err(|_| ErreurNoyau::analyse(t))
        };

        let mut result = Self::zero().clone();

        if !fraction_repeat_part.is_empty() {
            let neufs = dix_puissance(fraction_repeat_part)? - 1;
            result = Self::of(entier_de(fraction_repeat_part)?, neufs)?;
        }

        if !fraction_part.is_empty() {
            result = result.add_integer(&entier_de(fraction_part)?);
            result = result.divide_integer(&dix_puissance(fraction_part)?)?;
        }

        if !integer_part.is_empty() {
            result = result.add_integer(&entier_de(integer_part)?);
        }

        if !exponent_part.is_empty() {
            let exposant: i64 = exponent_part
                .parse()
                .map_err(|_| ErreurNoyau::analyse(exponent_part))?;
            let puissance = u32::try_from(exposant.unsigned_abs())
                .map(pow10)
                .map_err(|_| ErreurNoyau::analyse(exponent_part))?;
            result = if exposant >= 0 {
                result.multiply_integer(&puissance)
            } else {
                result.divide_integer(&puissance)?
            };
        }

        if !positive {
            result = result.negate();
        }

        Ok(result)
    }
}

impl FromStr for Rational {
    type Err = ErreurNoyau;

    fn from_str(s: &str) -> Resultat<Self> {
        Rational::parse(s)
    }
}

/* ------------------------ Opérateurs (infaillibles) ------------------------ */

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational::add(self, rhs)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self.subtract(rhs)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        self.multiply(rhs)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        self.negate()
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::from_i64_pair(n, d).unwrap()
    }

    fn p(n: u32) -> Precision {
        Precision::new(n).unwrap()
    }

    #[test]
    fn denominateur_nul_refuse() {
        assert_eq!(
            Rational::from_i64_pair(1, 0),
            Err(ErreurNoyau::DivisionParZero)
        );
    }

    #[test]
    fn signe_porte_par_le_numerateur() {
        let x = r(3, -4);
        assert_eq!(x.numerator(), &BigInt::from(-3));
        assert_eq!(x.denominator(), &BigInt::from(4));
        assert_eq!(r(-3, -4), r(3, 4));
        assert_eq!(r(0, -7), *Rational::zero());
    }

    #[test]
    fn egalite_brute_vs_valeur() {
        // représentation différente => `==` faux, valeur identique
        let a = r(2, 4);
        let b = r(1, 2);
        assert_ne!(a, b);
        assert!(a.same_value(&b));
        assert_eq!(a.compare_to(&b), Ordering::Equal);
        assert_eq!(a.reduce(), b);
    }

    #[test]
    fn addition_sans_reduction() {
        // 1/6 + 1/3 = 9/18 (pas 1/2)
        let s = r(1, 6).add(&r(1, 3));
        assert_eq!(s.to_rational_string(), "9/18");
        assert_eq!(s.reduce().to_rational_string(), "1/2");

        // même dénominateur : numérateurs additionnés directement
        assert_eq!(r(1, 6).add(&r(1, 6)).to_rational_string(), "2/6");
        assert_eq!(r(1, 6).subtract(&r(1, 6)), *Rational::zero());
    }

    #[test]
    fn multiplication_division() {
        assert_eq!(r(2, 3).multiply(&r(3, 4)).to_rational_string(), "6/12");
        assert_eq!(r(2, 3).multiply(Rational::one()), r(2, 3));
        assert_eq!(r(2, 3).multiply(Rational::zero()), *Rational::zero());
        assert_eq!(r(2, 3).divide(Rational::one()).unwrap(), r(2, 3));
        assert_eq!(r(2, 3).divide(&r(4, 5)).unwrap().to_rational_string(), "10/12");
        assert_eq!(
            r(2, 3).divide(Rational::zero()),
            Err(ErreurNoyau::DivisionParZero)
        );
        assert_eq!(r(-2, 3).reciprocal().unwrap(), r(-3, 2));
        assert_eq!(
            Rational::zero().reciprocal(),
            Err(ErreurNoyau::DivisionParZero)
        );
    }

    #[test]
    fn puissances() {
        assert_eq!(r(2, 3).pow(3).unwrap(), r(8, 27));
        assert_eq!(r(2, 3).pow(-2).unwrap(), r(9, 4));
        assert_eq!(r(-2, 3).pow(-3).unwrap(), r(-27, 8));
        assert_eq!(Rational::zero().pow(0).unwrap(), *Rational::one());
        assert_eq!(
            Rational::zero().pow(-1),
            Err(ErreurNoyau::DivisionParZero)
        );
        let a = r(5, 7);
        assert!(a.pow(2).unwrap().pow(-1).unwrap().same_value(&a.pow(-2).unwrap()));
    }

    #[test]
    fn reduction_pgcd() {
        let x = r(-84, 36).reduce();
        assert_eq!(x, r(-7, 3));
        assert!(x.numerator().gcd(x.denominator()).is_one());
        assert!(x.same_value(&r(-84, 36)));
    }

    #[test]
    fn parties_entiere_fractionnaire() {
        let x = r(-7, 2);
        assert!(x.integer_part().same_value(&r(-3, 1)));
        assert!(x.fraction_part().same_value(&r(-1, 2)));
        assert!(r(6, 3).is_integer());
        assert!(!r(7, 3).is_integer());
        assert_eq!(r(1, 2).increment(), r(3, 2));
        assert_eq!(r(1, 2).decrement(), r(-1, 2));
    }

    #[test]
    fn min_max() {
        let a = r(1, 3);
        let b = r(2, 5);
        assert_eq!(a.min(&b), &a);
        assert_eq!(a.max(&b), &b);
        assert_eq!(Rational::min_of(&[b.clone(), a.clone(), r(1, 2)]), a);
        assert_eq!(Rational::max_of(&[b.clone(), a, r(1, 2)]), r(1, 2));
        assert_eq!(Rational::max_of(&[]), *Rational::zero());
    }

    #[test]
    fn vers_decimal() {
        assert_eq!(r(1, 3).to_decimal(p(5)).to_string(), "0.33333");
        assert_eq!(r(2, 3).to_decimal(p(5)).to_string(), "0.66667");
        assert_eq!(r(1, 8).to_decimal(p(50)).to_string(), "0.125");

        // précision auto : au moins 128 chiffres
        let tiers = r(1, 3).to_decimal_auto();
        assert_eq!(tiers.precision(), 128);
    }

    #[test]
    fn affichage() {
        assert_eq!(Rational::zero().to_string(), "0");
        assert_eq!(r(42, 1).to_string(), "42");
        assert_eq!(r(3, 4).to_string(), "0.75");
        assert_eq!(r(4, 2).to_string(), "2");
        assert_eq!(r(-3, 4).to_rational_string(), "-3/4");
        assert_eq!(r(5, 1).to_rational_string(), "5");
    }

    #[test]
    fn affichage_mixte() {
        assert_eq!(r(7, 2).to_mixed_string(), "3 1/2");
        assert_eq!(r(-7, 2).to_mixed_string(), "-3 1/2");
        assert_eq!(r(1, 2).to_mixed_string(), "1/2");
        assert_eq!(r(-1, 2).to_mixed_string(), "-1/2");
        assert_eq!(r(4, 2).to_mixed_string(), "2");
        assert_eq!(Rational::zero().to_mixed_string(), "0");
    }

    #[test]
    fn nombre_mixte() {
        assert_eq!(Rational::from_mixed(3, 1, 2).unwrap(), r(7, 2));
        assert!(Rational::from_mixed(-3, 1, 2).unwrap().same_value(&r(-7, 2)));
        assert!(matches!(
            Rational::from_mixed(3, -1, 2),
            Err(ErreurNoyau::ArgumentIllegal(_))
        ));
        assert!(matches!(
            Rational::from_mixed(3, 1, -2),
            Err(ErreurNoyau::ArgumentIllegal(_))
        ));
    }

    #[test]
    fn lecture_simple_et_chainee() {
        assert!(Rational::parse("3/4").unwrap().same_value(&r(3, 4)));
        assert!(Rational::parse("1/2/3").unwrap().same_value(&r(1, 6)));
        assert!(Rational::parse("0.25").unwrap().same_value(&r(1, 4)));
        assert!(Rational::parse("-1.5/0.5").unwrap().same_value(&r(-3, 1)));
        assert!(Rational::parse("12e-1").unwrap().same_value(&r(6, 5)));
        assert!(Rational::parse("2E3").unwrap().same_value(&r(2000, 1)));
        assert_eq!(Rational::parse("1/0"), Err(ErreurNoyau::DivisionParZero));
    }

    #[test]
    fn lecture_periodique() {
        // 0.(3) = 1/3 ; 0.1(6) = 1/6 ; 1.(142857) = 8/7
        assert!(Rational::parse("0.(3)").unwrap().same_value(&r(1, 3)));
        assert!(Rational::parse("0.1(6)").unwrap().same_value(&r(1, 6)));
        assert!(Rational::parse("1.(142857)").unwrap().same_value(&r(8, 7)));
        assert!(Rational::parse("-.(9)").unwrap().same_value(&r(-1, 1)));
        assert!(Rational::from_parts(true, "", "1", "6", "2")
            .unwrap()
            .same_value(&r(50, 3)));
    }

    #[test]
    fn lecture_invalide() {
        for s in ["", "abc", "1.2.3", "1e", "0.(", "0.()", "0.(3", "1..2", "--1", "1e+"] {
            assert!(
                matches!(Rational::parse(s), Err(ErreurNoyau::Analyse(_))),
                "attendu une erreur d’analyse pour {s:?}"
            );
        }
    }

    #[test]
    fn exposant_hors_u32_refuse() {
        for s in ["1e4294967296", "5e-4294967297", "-2.5e18446744073709551615", "1e99999999999999999999"] {
            assert!(
                matches!(Rational::parse(s), Err(ErreurNoyau::Analyse(_))),
                "attendu une erreur d’analyse pour {s:?}"
            );
        }
        // même refus par la forme structurée
        assert!(matches!(
            Rational::from_parts(true, "1", "", "", "-4294967296"),
            Err(ErreurNoyau::Analyse(_))
        ));
        // exposant ordinaire : inchangé
        assert!(Rational::parse("5e-3").unwrap().same_value(&r(1, 200)));
    }

    #[test]
    fn flottants() {
        assert!(Rational::from_f64(0.5).unwrap().same_value(&r(1, 2)));
        assert!(Rational::from_f64(-2.25).unwrap().same_value(&r(-9, 4)));
        assert!(matches!(
            Rational::from_f64(f64::INFINITY),
            Err(ErreurNoyau::Analyse(_))
        ));
        assert!(matches!(
            Rational::from_f64(f64::NAN),
            Err(ErreurNoyau::Analyse(_))
        ));
    }

    #[test]
    fn conversions_numeriques() {
        assert_eq!(r(7, 2).to_integer(), Some(3));
        assert_eq!(r(-7, 2).to_integer(), Some(-3));
        assert!((r(1, 4).to_f64() - 0.25).abs() < 1e-15);
        assert_eq!(r(1, 4).to_decimal_value().to_string(), "0.25");
    }

    #[test]
    fn arrondis() {
        assert!(r(2, 3).with_precision(p(3)).same_value(&r(667, 1000)));
        assert!(r(2, 3).with_scale(2).same_value(&r(67, 100)));
    }

    #[test]
    fn passerelle_num_rational() {
        let brut = r(2, 4);
        let big = brut.to_big_rational();
        assert_eq!(big, BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(Rational::from(big), r(1, 2));
    }

    #[test]
    fn operateurs() {
        let a = r(1, 2);
        let b = r(1, 3);
        assert!((&a + &b).same_value(&r(5, 6)));
        assert!((&a - &b).same_value(&r(1, 6)));
        assert!((&a * &b).same_value(&r(1, 6)));
        assert_eq!(-&a, r(-1, 2));
    }
}
